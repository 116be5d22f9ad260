// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Notebook Inlining Tool

Expands `{% nbinlined notebook cell_no [ match | replacement ] %}` tags in a
blog source file with the HTML output of the referenced notebook cells.

Usage:
  cargo run --bin inline_notebooks -- <input.md> [output.md] [--config <path>]

Notebooks are resolved under `<content_dir>/<notebook_dir>` from the
`[notebooks]` section of `thesis_configuration.toml` (defaults apply when no
configuration file is found).
*/

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use stevens_thesis::config::{load_config, ThesisConfig};
use stevens_thesis::nbinlined::{NotebookInliner, SYNTAX};
use stevens_thesis::observability::{init_logging, parse_debug_flags, LoggingConfig};
use tracing::{info, warn};

fn main() -> Result<()> {
    let mut positional = Vec::new();
    let mut config_path: Option<PathBuf> = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => match args.next() {
                Some(v) => config_path = Some(PathBuf::from(v)),
                None => usage_and_exit(),
            },
            "-h" | "--help" => usage_and_exit(),
            other if other.starts_with("--debug-") => {}
            other => positional.push(PathBuf::from(other)),
        }
    }
    if positional.is_empty() || positional.len() > 2 {
        usage_and_exit();
    }

    let config = match load_config(config_path.as_deref(), None) {
        Ok(config) => config,
        Err(e) if config_path.is_none() => {
            eprintln!("Using default configuration: {e}");
            ThesisConfig::default()
        }
        Err(e) => return Err(e).context("Failed to load configuration"),
    };

    let _guard = init_logging(
        &parse_debug_flags(),
        &LoggingConfig::with_level(&config.system.log_level),
    )?;

    let input = &positional[0];
    let document = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let inliner = NotebookInliner::new(&config.notebooks.content_dir, &config.notebooks.notebook_dir);
    if !inliner.notebook_root().exists() {
        warn!(
            "[INLINE] Notebook directory {} does not exist",
            inliner.notebook_root().display()
        );
    }
    let expanded = inliner
        .expand(&document)
        .with_context(|| format!("Failed to expand tags in {}", input.display()))?;

    match positional.get(1) {
        Some(output) => {
            fs::write(output, expanded)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!("[INLINE] Wrote {}", output.display());
        }
        None => print!("{expanded}"),
    }
    Ok(())
}

fn usage_and_exit() -> ! {
    eprintln!("Usage: inline_notebooks <input.md> [output.md] [--config <path>]\n");
    eprintln!("Tag syntax: {SYNTAX}");
    process::exit(2);
}
