// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Synthetic profile tool.
//!
//! Loads `thesis_configuration.toml`, synthesizes the spatiotemporal response
//! stack described by its `[synthesis]` section and prints a JSON summary.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use stevens_thesis::config::{load_config, validate_config};
use stevens_thesis::observability::{debug_flags_help, init_logging, parse_debug_flags, LoggingConfig};
use stevens_thesis::{synthesize, StackSummary};
use tracing::info;

struct Args {
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    overrides: HashMap<String, String>,
}

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: synthesize_profiles [--config <path>] [--output <path>] [--set key=value]...\n\n\
         Overrides (--set): density, contrast_multiplier, peak_scaling, offset,\n\
         parameters (mean|median|spread), tauc_lock (number|none), log_level,\n\
         data_dir, asset_dir, notebook_dir\n"
    );
    eprintln!("{}", debug_flags_help());
    process::exit(2);
}

fn parse_args() -> Args {
    let mut parsed = Args {
        config: None,
        output: None,
        overrides: HashMap::new(),
    };

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                parsed.config = Some(PathBuf::from(v));
            }
            "--output" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                parsed.output = Some(PathBuf::from(v));
            }
            "--set" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                let Some((key, value)) = v.split_once('=') else {
                    eprintln!("Expected key=value, got: {v}");
                    usage_and_exit();
                };
                parsed.overrides.insert(key.trim().to_string(), value.trim().to_string());
            }
            "-h" | "--help" => usage_and_exit(),
            other if other.starts_with("--debug-") => {}
            other => {
                eprintln!("Unknown argument: {other}");
                usage_and_exit();
            }
        }
    }

    parsed
}

fn main() -> Result<()> {
    let args = parse_args();

    let config = load_config(args.config.as_deref(), Some(&args.overrides))
        .context("Failed to load configuration")?;
    validate_config(&config)?;

    let debug_flags = parse_debug_flags();
    let _guard = init_logging(&debug_flags, &LoggingConfig::with_level(&config.system.log_level))?;
    info!("[SYNTHESIZE] stevens-thesis v{}", stevens_thesis::VERSION);

    let stack = synthesize(&config.synthesis)?;
    let summary = StackSummary::new(&stack);
    let json = serde_json::to_string_pretty(&summary)?;

    match args.output {
        Some(path) => {
            let path = if path.is_relative() && !config.system.data_dir.as_os_str().is_empty() {
                config.system.data_dir.join(path)
            } else {
                path
            };
            fs::write(&path, json)
                .with_context(|| format!("Failed to write summary to {}", path.display()))?;
            info!("[SYNTHESIZE] Summary written to {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
