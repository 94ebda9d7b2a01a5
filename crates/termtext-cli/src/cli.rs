//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use termtext::{Flags, OutputMode};

/// Render HTTP response fixtures the way termtext-based tools show them.
#[derive(Debug, Parser)]
#[command(name = "termtext", version, about)]
pub struct Cli {
    /// Show full HTTP detail and trace output
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Show a one-line HTTP summary and the response body
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print only the re-indented response body
    #[arg(long, global = true)]
    pub json: bool,

    /// Color profile key (termtextNoColor, termtextDarkDefault, termtextLightDefault, termtextAuto)
    #[arg(short, long, global = true, value_name = "KEY")]
    pub profile: Option<String>,

    /// Custom color profile in YAML, used instead of --profile
    #[arg(long, global = true, value_name = "FILE")]
    pub profile_file: Option<PathBuf>,

    /// Settings file (YAML or JSON)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// When to emit ANSI color codes
    #[arg(short, long, global = true, default_value = "auto", value_parser = parse_output_mode)]
    pub output: OutputMode,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show a fixture's response and error with no domain object
    Show {
        /// Fixture file (YAML or JSON)
        fixture: PathBuf,
    },
    /// Run a fixture through the full render pipeline
    Render {
        /// Fixture file (YAML or JSON)
        fixture: PathBuf,

        /// List the fixture's object instead of describing it
        #[arg(long)]
        list: bool,
    },
    /// List the built-in color profiles with a sample of each role
    Profiles,
}

impl Cli {
    pub fn flags(&self) -> Flags {
        Flags {
            debug: self.debug,
            verbose: self.verbose,
        }
    }
}

fn parse_output_mode(s: &str) -> Result<OutputMode, String> {
    s.parse()
}
