//! Command handlers.

use std::error::Error as StdError;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};
use termtext::{
    Describable, Listable, OutputMode, Profile, Renderer, Role, Settings, TabWriter,
    JSON_DISPLAY_KEY, SCREEN_PROFILE_KEY,
};

use crate::cli::{Cli, Command};
use crate::fixture::Fixture;

/// Loads settings and applies the environment and command-line overrides.
pub fn settings_for(cli: &Cli) -> Result<Settings> {
    let settings = match &cli.config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::new(),
    };
    let mut settings = settings.with_env_overrides();
    if cli.json {
        settings.set(JSON_DISPLAY_KEY, true);
    }
    if let Some(key) = &cli.profile {
        settings.set(SCREEN_PROFILE_KEY, key.as_str());
    }
    Ok(settings)
}

/// Builds the renderer: a custom profile file wins over the configured key.
pub fn renderer_for(cli: &Cli, settings: &Settings, out: &mut dyn Write) -> Result<Renderer> {
    let flags = cli.flags();
    let profile = match &cli.profile_file {
        Some(path) => {
            let profile = load_profile(path)?;
            info!("using custom profile {:?}", profile.name());
            profile
        }
        None => termtext::init_term_to(out, settings, flags),
    };
    Ok(Renderer::new(profile.resolve(cli.output))
        .flags(flags)
        .json_only(settings.json_display()))
}

fn load_profile(path: &Path) -> Result<Profile> {
    let yaml = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read profile {}", path.display()))?;
    let key = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("custom");
    Profile::from_yaml(key, &yaml).with_context(|| format!("invalid profile {}", path.display()))
}

/// `show`: the response and error only.
pub fn show(renderer: &Renderer, fixture_path: &Path, out: &mut dyn Write) -> Result<()> {
    let fixture = Fixture::load(fixture_path)?;
    debug!("showing {:?}", fixture_path);
    let error = fixture.error();
    renderer.http_display_to(out, Some(fixture.response()?), error.as_ref().map(as_dyn));
    Ok(())
}

/// `render`: the full pipeline with the fixture's object.
pub fn render(
    renderer: &Renderer,
    fixture_path: &Path,
    list: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let fixture = Fixture::load(fixture_path)?;
    debug!("rendering {:?} in {:?} mode", fixture_path, renderer.mode(true));
    let error = fixture.error();
    let error = error.as_ref().map(as_dyn);
    let object = fixture.object();
    let response = Some(fixture.response()?);

    if list {
        renderer.list_to(out, object.as_ref().map(|o| o as &dyn Listable), response, error);
    } else {
        renderer.describe_to(out, object.as_ref().map(|o| o as &dyn Describable), response, error);
    }
    Ok(())
}

/// `profiles`: one row per built-in profile with each role painted.
pub fn profiles(output: OutputMode, out: &mut dyn Write) -> Result<()> {
    let mut tw = TabWriter::new(out, 4, 4, 3, ' ');
    tw.row(["Key", "Name", "Roles"])?;
    for profile in Profile::builtins() {
        let profile = profile.resolve(output);
        let samples: Vec<String> = Role::ALL
            .iter()
            .map(|role| profile.paint(*role, role.name()))
            .collect();
        tw.row([
            profile.key().to_string(),
            profile.name().to_string(),
            samples.join(" "),
        ])?;
    }
    tw.flush()?;
    Ok(())
}

/// Runs the selected command against `out`.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    match &cli.command {
        Command::Profiles => profiles(cli.output, out),
        Command::Show { fixture } => {
            let settings = settings_for(cli)?;
            let renderer = renderer_for(cli, &settings, out)?;
            show(&renderer, fixture, out)
        }
        Command::Render { fixture, list } => {
            let settings = settings_for(cli)?;
            let renderer = renderer_for(cli, &settings, out)?;
            render(&renderer, fixture, *list, out)
        }
    }
}

fn as_dyn(err: &anyhow::Error) -> &(dyn StdError + 'static) {
    err.as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;

    const FIXTURE: &str = r#"
status: 404
headers:
  Content-Type: application/json
body:
  status: 404
  message: not found
error: widget lookup failed
object:
  name: gear
"#;

    fn run_args(args: &[&str]) -> String {
        let cli = Cli::try_parse_from(args).unwrap();
        let mut out = Vec::new();
        run(&cli, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn fixture_file(dir: &tempfile::TempDir) -> String {
        let path = dir.path().join("not_found.yaml");
        fs::write(&path, FIXTURE).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_render_default_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixture_file(&dir);
        let out = run_args(&["termtext", "-o", "text", "render", &path]);
        assert_eq!(
            out,
            "HTTP Response: 404 Not Found\n\
             Message: not found\n\
             Error: widget lookup failed\n\
             Field   Value\n\
             name    gear\n"
        );
    }

    #[test]
    fn test_render_list_json_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixture_file(&dir);
        let out = run_args(&["termtext", "--json", "-o", "text", "render", "--list", &path]);
        assert_eq!(out, "{\n  \"status\": 404,\n  \"message\": \"not found\"\n}\n");
    }

    #[test]
    fn test_show_ignores_verbose() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixture_file(&dir);
        let out = run_args(&["termtext", "-v", "-o", "text", "show", &path]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Status          Length   Encoding   Uncompressed");
        assert_eq!(lines[1], "404 Not Found   36       []         false");
        assert_eq!(lines.last().copied(), Some("Error: widget lookup failed"));
    }

    #[test]
    fn test_debug_prints_profile_banner() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixture_file(&dir);
        let out = run_args(&[
            "termtext",
            "--debug",
            "--profile",
            "termtextDarkDefault",
            "-o",
            "text",
            "render",
            &path,
        ]);
        let out = console::strip_ansi_codes(&out);
        assert!(out.contains(
            "Term inited with profile \"Termtext Default Dark\": Title SubTitle Text Highlight"
        ));
    }

    #[test]
    fn test_custom_profile_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixture_file(&dir);
        let profile = dir.path().join("loud.yaml");
        fs::write(&profile, "fail: { fg: magenta, bold: true }\n").unwrap();

        let out = run_args(&[
            "termtext",
            "--profile-file",
            &profile.to_string_lossy(),
            "-o",
            "term",
            "render",
            &path,
        ]);
        assert!(out.contains("\x1b[35m\x1b[1mwidget lookup failed\x1b[0m"), "{out:?}");
    }

    #[test]
    fn test_invalid_profile_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixture_file(&dir);
        let profile = dir.path().join("bad.yaml");
        fs::write(&profile, "borders: red\n").unwrap();

        let cli = Cli::try_parse_from([
            "termtext",
            "--profile-file",
            &profile.to_string_lossy(),
            "show",
            &path,
        ])
        .unwrap();
        let err = run(&cli, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().starts_with("invalid profile"));
    }

    #[test]
    fn test_profiles_lists_builtins() {
        let out = run_args(&["termtext", "-o", "text", "profiles"]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Key"));
        assert!(lines[1].starts_with("termtextNoColor"));
        assert!(lines[1].ends_with("title sub_title text info highlight success warn fail alert"));
    }
}
