// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! cinelog - search history for your streaming catalog
//!
//! Entry point for the cinelog CLI application.

use std::process::ExitCode;

use clap::Parser;

use cinelog::cli::Cli;
use cinelog::{commands, utils};

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing
    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());

    // `-v` turns on crate diagnostics without knowing target names.
    // `RUST_LOG` still takes precedence.
    if cli.verbose > 0 {
        let directive = if cli.verbose > 1 {
            "cinelog=trace"
        } else {
            "cinelog=debug"
        };
        if let Ok(parsed) = directive.parse() {
            env_filter = env_filter.add_directive(parsed);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match commands::execute(cli, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", utils::format_error(&e));
            ExitCode::FAILURE
        }
    }
}
