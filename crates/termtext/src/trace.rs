//! Call-site tracing.
//!
//! `trace_enter!` and `trace_exit!` print where they were called from,
//! tab-aligned and styled with the profile's success and alert roles:
//!
//! ```text
//! Enter main()   main.rs:12
//! Exit  main()   main.rs:30
//! ```
//!
//! `trace_scope!` prints the enter line immediately and the exit line when
//! the returned guard is dropped. The enter and exit macros have `_to` forms
//! that write to an explicit sink and return `io::Result<()>`.
//!
//! ```rust
//! use termtext::{trace_enter_to, Profile};
//!
//! fn load() -> String {
//!     let mut out = Vec::new();
//!     trace_enter_to!(&mut out, &Profile::no_color()).unwrap();
//!     String::from_utf8(out).unwrap()
//! }
//!
//! assert!(load().starts_with("Enter load()"));
//! ```

use std::fmt;
use std::io::{self, Write};
use std::path::Path;

use log::warn;

use crate::profile::{Profile, Role};
use crate::tabular::TabWriter;

/// A source location: enclosing function, file basename and line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub function: &'static str,
    pub file: &'static str,
    pub line: u32,
}

impl Location {
    /// Builds a location from a full type path of a marker item inside the
    /// function, as produced by [`here!`](crate::here).
    pub fn new(marker_path: &'static str, file: &'static str, line: u32) -> Self {
        let path = marker_path.strip_suffix("::__here").unwrap_or(marker_path);
        let function = path
            .rsplit("::")
            .find(|segment| *segment != "{{closure}}")
            .unwrap_or(path);
        let file = Path::new(file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(file);
        Self {
            function,
            file,
            line,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}() {}:{}", self.function, self.file, self.line)
    }
}

/// The [`Location`] of the macro call.
#[macro_export]
macro_rules! here {
    () => {
        $crate::trace::Location::new(
            {
                fn __here() {}
                ::std::any::type_name_of_val(&__here)
            },
            file!(),
            line!(),
        )
    };
}

/// `<fn>() <file>:<line>` for the macro call.
#[macro_export]
macro_rules! loc_string {
    () => {
        $crate::here!().to_string()
    };
}

/// Prints an enter line for the calling function.
#[macro_export]
macro_rules! trace_enter {
    ($profile:expr) => {
        $crate::trace::enter($profile, &$crate::here!())
    };
}

/// Prints an enter line for the calling function to a sink.
#[macro_export]
macro_rules! trace_enter_to {
    ($out:expr, $profile:expr) => {
        $crate::trace::enter_to($out, $profile, &$crate::here!())
    };
}

/// Prints an exit line for the calling function.
#[macro_export]
macro_rules! trace_exit {
    ($profile:expr) => {
        $crate::trace::exit($profile, &$crate::here!())
    };
}

/// Prints an exit line for the calling function to a sink.
#[macro_export]
macro_rules! trace_exit_to {
    ($out:expr, $profile:expr) => {
        $crate::trace::exit_to($out, $profile, &$crate::here!())
    };
}

/// Prints an enter line now and an exit line when the guard drops.
///
/// Bind the guard to a named variable; `let _ = ...` drops it immediately.
#[macro_export]
macro_rules! trace_scope {
    ($profile:expr) => {
        $crate::trace::TraceGuard::enter($profile, $crate::here!())
    };
}

/// Writes `Enter <fn>() <file>:<line>` in the success style.
pub fn enter_to(out: &mut dyn Write, profile: &Profile, location: &Location) -> io::Result<()> {
    tagged(out, profile, Role::Success, "Enter", location)
}

/// Writes `Exit <fn>() <file>:<line>` in the alert style.
pub fn exit_to(out: &mut dyn Write, profile: &Profile, location: &Location) -> io::Result<()> {
    tagged(out, profile, Role::Alert, "Exit", location)
}

/// [`enter_to`] standard output. Failures are logged.
pub fn enter(profile: &Profile, location: &Location) {
    let stdout = io::stdout();
    let result = enter_to(&mut stdout.lock(), profile, location);
    log_failure(result);
}

/// [`exit_to`] standard output. Failures are logged.
pub fn exit(profile: &Profile, location: &Location) {
    let stdout = io::stdout();
    let result = exit_to(&mut stdout.lock(), profile, location);
    log_failure(result);
}

fn tagged(
    out: &mut dyn Write,
    profile: &Profile,
    role: Role,
    tag: &str,
    location: &Location,
) -> io::Result<()> {
    let mut tw = TabWriter::new(out, 6, 2, 1, ' ');
    writeln!(
        tw,
        "{}",
        profile.paint(
            role,
            format_args!("{}\t{}()\t{}:{}", tag, location.function, location.file, location.line)
        )
    )?;
    tw.flush()
}

fn log_failure(result: io::Result<()>) {
    if let Err(e) = result {
        warn!(target: "termtext::render", "trace output failed: {}", e);
    }
}

/// Prints the exit line for a scope when dropped.
#[must_use = "the exit line prints when the guard drops"]
pub struct TraceGuard {
    profile: Profile,
    location: Location,
}

impl TraceGuard {
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Prints the enter line and returns the guard.
    pub fn enter(profile: &Profile, location: Location) -> Self {
        enter(profile, &location);
        Self {
            profile: profile.clone(),
            location,
        }
    }
}

impl Drop for TraceGuard {
    fn drop(&mut self) {
        exit(&self.profile, &self.location);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn traced() -> Location {
        crate::here!()
    }

    #[test]
    fn test_location_names_enclosing_function() {
        let loc = traced();
        assert_eq!(loc.function, "traced");
        assert_eq!(loc.file, "trace.rs");
    }

    #[test]
    fn test_location_skips_closures() {
        let loc = (|| crate::here!())();
        assert_eq!(loc.function, "test_location_skips_closures");
    }

    #[test]
    fn test_location_new_strips_paths() {
        let loc = Location::new("app::cmd::run::__here", "src/cmd/run.rs", 9);
        assert_eq!(loc.to_string(), "run() run.rs:9");
    }

    #[test]
    fn test_loc_string() {
        let s = crate::loc_string!();
        assert!(s.starts_with("test_loc_string() trace.rs:"), "{s}");
    }

    #[test]
    fn test_enter_exit_lines() {
        let loc = Location::new("m::fetch::__here", "src/m.rs", 42);
        let profile = Profile::no_color();
        let mut out = Vec::new();
        enter_to(&mut out, &profile, &loc).unwrap();
        exit_to(&mut out, &profile, &loc).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Enter fetch() m.rs:42\nExit  fetch() m.rs:42\n"
        );
    }

    #[test]
    fn test_macros_write_to_sink() {
        let profile = Profile::no_color();
        let mut out = Vec::new();
        crate::trace_enter_to!(&mut out, &profile).unwrap();
        crate::trace_exit_to!(&mut out, &profile).unwrap();
        let out = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("Enter test_macros_write_to_sink() trace.rs:"));
        assert!(lines[1].starts_with("Exit  test_macros_write_to_sink() trace.rs:"));
    }

    #[test]
    fn test_stdout_macros_expand_and_run() {
        let profile = Profile::no_color();
        crate::trace_enter!(&profile);
        crate::trace_exit!(&profile);
    }

    #[test]
    fn test_scope_guard_keeps_location() {
        let guard = crate::trace_scope!(&Profile::no_color());
        assert_eq!(guard.location().function, "test_scope_guard_keeps_location");
    }
}
