//! `termtext`: render recorded HTTP responses through the termtext pipeline.
//!
//! ```text
//! termtext --debug render fixtures/not_found.yaml
//! termtext --json show fixtures/ok.json
//! termtext -o term profiles
//! ```

mod cli;
mod commands;
mod fixture;
mod logger;

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.flags()).context("failed to install logger")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::run(&cli, &mut out)?;
    out.flush().context("failed to flush output")
}
