//! The render pipeline.
//!
//! A [`Renderer`] holds the resolved [`Profile`], the [`Flags`] and the
//! JSON-only setting. Each render call resolves a [`DisplayMode`], turns it
//! into a [`Plan`] and runs the plan's steps in order against the sink.
//!
//! ```rust
//! use std::io::Write;
//! use termtext::{Flags, HttpResponse, Profile, Renderer};
//!
//! let renderer = Renderer::new(Profile::no_color()).flags(Flags::verbose());
//! let resp = HttpResponse::new(200).body(r#"{"id":7}"#);
//!
//! let mut out = Vec::new();
//! renderer.render_with_to(
//!     &mut out,
//!     |out, profile| writeln!(out, "{}", profile.text("done")),
//!     Some(resp),
//!     None,
//! );
//!
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "HTTP Response: 200 OK\nRESP JSON Body:\n{\n  \"id\": 7\n}\ndone\n"
//! );
//! ```

mod mode;
mod plan;
mod steps;

pub use mode::DisplayMode;
pub use plan::{Plan, RenderStep};

use std::error::Error;
use std::io::{self, Write};

use log::{debug, warn};

use crate::config::{Flags, Settings};
use crate::display::{Describable, Listable};
use crate::http::HttpResponse;
use crate::output::OutputMode;
use crate::profile::{init_term, Profile};

/// Renders domain output decorated with HTTP and error detail.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    profile: Profile,
    flags: Flags,
    json_only: bool,
}

impl Renderer {
    /// Creates a renderer with default flags and JSON-only off.
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            flags: Flags::default(),
            json_only: false,
        }
    }

    /// Builds a renderer from settings.
    ///
    /// The profile comes from `Termtext.screenProfile` (see [`init_term`]) and
    /// is resolved for `output`. JSON-only comes from `Termtext.JSONDisplay`.
    pub fn from_settings(settings: &Settings, flags: Flags, output: OutputMode) -> Self {
        let profile = init_term(settings, flags).resolve(output);
        Self {
            profile,
            flags,
            json_only: settings.json_display(),
        }
    }

    /// Sets the debug and verbose flags.
    pub fn flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the JSON-only setting.
    pub fn json_only(mut self, json_only: bool) -> Self {
        self.json_only = json_only;
        self
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn get_flags(&self) -> Flags {
        self.flags
    }

    pub fn is_json_only(&self) -> bool {
        self.json_only
    }

    /// The display mode a render call would use.
    pub fn mode(&self, has_response: bool) -> DisplayMode {
        DisplayMode::resolve(self.flags, self.json_only, has_response)
    }

    /// Renders to standard output.
    pub fn render_with<F>(&self, callback: F, response: Option<HttpResponse>, err: Option<&dyn Error>)
    where
        F: FnOnce(&mut dyn Write, &Profile) -> io::Result<()>,
    {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.render_with_to(&mut handle, callback, response, err);
    }

    /// Renders to `out`.
    ///
    /// The callback runs last unless the call resolves to JSON-only. Write
    /// failures are logged and the remaining steps still run.
    pub fn render_with_to<F>(
        &self,
        out: &mut dyn Write,
        callback: F,
        response: Option<HttpResponse>,
        err: Option<&dyn Error>,
    ) where
        F: FnOnce(&mut dyn Write, &Profile) -> io::Result<()>,
    {
        let mode = self.mode(response.is_some());
        let plan = Plan::for_mode(mode, err.is_some());
        debug!(target: "termtext::render", "display mode {:?}, plan {:?}", mode, plan);
        self.execute(out, plan, callback, response, err);
    }

    /// Lists `item` (if any) decorated with the response and error.
    pub fn list(
        &self,
        item: Option<&dyn Listable>,
        response: Option<HttpResponse>,
        err: Option<&dyn Error>,
    ) {
        self.render_with(list_callback(item), response, err);
    }

    pub fn list_to(
        &self,
        out: &mut dyn Write,
        item: Option<&dyn Listable>,
        response: Option<HttpResponse>,
        err: Option<&dyn Error>,
    ) {
        self.render_with_to(out, list_callback(item), response, err);
    }

    /// Describes `item` (if any) decorated with the response and error.
    pub fn describe(
        &self,
        item: Option<&dyn Describable>,
        response: Option<HttpResponse>,
        err: Option<&dyn Error>,
    ) {
        self.render_with(describe_callback(item), response, err);
    }

    pub fn describe_to(
        &self,
        out: &mut dyn Write,
        item: Option<&dyn Describable>,
        response: Option<HttpResponse>,
        err: Option<&dyn Error>,
    ) {
        self.render_with_to(out, describe_callback(item), response, err);
    }

    /// Shows a response and error with no domain object.
    pub fn http_display(&self, response: Option<HttpResponse>, err: Option<&dyn Error>) {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.http_display_to(&mut handle, response, err);
    }

    /// Shows a response and error with no domain object, writing to `out`.
    ///
    /// The debug and verbose flags are ignored: unless JSON-only applies, the
    /// full HTTP detail is shown.
    pub fn http_display_to(
        &self,
        out: &mut dyn Write,
        response: Option<HttpResponse>,
        err: Option<&dyn Error>,
    ) {
        let plan = Plan::for_http_display(self.json_only, response.is_some());
        debug!(target: "termtext::render", "http display plan {:?}", plan);
        self.execute(out, plan, |_, _| Ok(()), response, err);
    }

    fn execute<F>(
        &self,
        out: &mut dyn Write,
        plan: Plan,
        callback: F,
        mut response: Option<HttpResponse>,
        err: Option<&dyn Error>,
    ) where
        F: FnOnce(&mut dyn Write, &Profile) -> io::Result<()>,
    {
        let steps = match plan {
            Plan::RawJson => {
                log_failure("raw json", steps::raw_json(out, response.as_mut()));
                return;
            }
            Plan::Steps(steps) => steps,
        };

        let mut callback = Some(callback);
        for step in steps {
            let result = match step {
                RenderStep::ShowFullHttp => steps::full_http(out, &self.profile, response.as_mut()),
                RenderStep::ShowSummaryHttp => {
                    steps::summary_http(out, &self.profile, response.as_mut())
                }
                RenderStep::ShowEmbeddedMessage => {
                    steps::embedded_message(out, &self.profile, response.as_mut())
                }
                RenderStep::ShowErrorLine => steps::error_line(out, &self.profile, err),
                RenderStep::InvokeCallback => match callback.take() {
                    Some(callback) => callback(out, &self.profile),
                    None => Ok(()),
                },
            };
            log_failure(step_name(step), result);
        }
        log_failure("flush", out.flush());
    }
}

fn list_callback(item: Option<&dyn Listable>) -> impl FnOnce(&mut dyn Write, &Profile) -> io::Result<()> + '_ {
    move |out, profile| match item {
        Some(item) => item.list(out, profile),
        None => Ok(()),
    }
}

fn describe_callback(
    item: Option<&dyn Describable>,
) -> impl FnOnce(&mut dyn Write, &Profile) -> io::Result<()> + '_ {
    move |out, profile| match item {
        Some(item) => item.describe(out, profile),
        None => Ok(()),
    }
}

fn step_name(step: RenderStep) -> &'static str {
    match step {
        RenderStep::ShowFullHttp => "full http",
        RenderStep::ShowSummaryHttp => "summary http",
        RenderStep::ShowEmbeddedMessage => "embedded message",
        RenderStep::ShowErrorLine => "error line",
        RenderStep::InvokeCallback => "callback",
    }
}

fn log_failure(what: &str, result: io::Result<()>) {
    if let Err(e) = result {
        warn!(target: "termtext::render", "{} output failed: {}", what, e);
    }
}
