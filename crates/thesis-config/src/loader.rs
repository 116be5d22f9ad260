// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! Values are layered in three tiers:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, ThesisConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "thesis_configuration.toml";

/// Find the thesis configuration file
///
/// Search order:
/// 1. `THESIS_CONFIG_PATH` environment variable
/// 2. Current working directory: `./thesis_configuration.toml`
/// 3. Parent directories (up to 5 levels)
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("THESIS_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by THESIS_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        let mut current = cwd.as_path();
        for _ in 0..5 {
            match current.parent() {
                Some(parent) => {
                    search_paths.push(parent.join(CONFIG_FILE_NAME));
                    current = parent;
                }
                None => break,
            }
        }
    }

    if let Some(found) = search_paths.iter().find(|p| p.exists()) {
        return Ok(found.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "Configuration file '{}' not found in any of these locations:\n{}\n\nSet THESIS_CONFIG_PATH environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if config file is not found or contains invalid TOML.
/// Semantic checks are left to [`crate::validate_config`].
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<ThesisConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: ThesisConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `THESIS_LOG_LEVEL` -> `system.log_level`
/// - `THESIS_DATA_DIR` -> `system.data_dir`
/// - `THESIS_ASSET_DIR` -> `assets.asset_dir`
/// - `THESIS_NOTEBOOK_DIR` -> `notebooks.notebook_dir`
/// - `THESIS_DENSITY` -> `synthesis.density`
pub fn apply_environment_overrides(config: &mut ThesisConfig) {
    if let Ok(value) = env::var("THESIS_LOG_LEVEL") {
        config.system.log_level = value;
    }
    if let Ok(value) = env::var("THESIS_DATA_DIR") {
        config.system.data_dir = PathBuf::from(value);
    }
    if let Ok(value) = env::var("THESIS_ASSET_DIR") {
        config.assets.asset_dir = PathBuf::from(value);
    }
    if let Ok(value) = env::var("THESIS_NOTEBOOK_DIR") {
        config.notebooks.notebook_dir = PathBuf::from(value);
    }
    if let Ok(value) = env::var("THESIS_DENSITY") {
        if let Ok(density) = value.parse::<usize>() {
            config.synthesis.density = density;
        }
    }
}

/// Apply CLI argument overrides to configuration
///
/// CLI arguments have the highest precedence. Values that fail to parse are
/// ignored.
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - HashMap of CLI arguments (e.g., `{"density": "40", "contrast_multiplier": "100"}`)
pub fn apply_cli_overrides(config: &mut ThesisConfig, cli_args: &HashMap<String, String>) {
    // System settings
    if let Some(value) = cli_args.get("log_level") {
        config.system.log_level = value.clone();
    }
    if let Some(value) = cli_args.get("data_dir") {
        config.system.data_dir = PathBuf::from(value);
    }
    if let Some(value) = cli_args.get("asset_dir") {
        config.assets.asset_dir = PathBuf::from(value);
    }
    if let Some(value) = cli_args.get("notebook_dir") {
        config.notebooks.notebook_dir = PathBuf::from(value);
    }

    // Synthesis settings
    let synthesis = &mut config.synthesis;
    if let Some(value) = cli_args.get("density") {
        if let Ok(density) = value.parse::<usize>() {
            synthesis.density = density;
        }
    }
    if let Some(value) = cli_args.get("contrast_multiplier") {
        if let Ok(multiplier) = value.parse::<f64>() {
            synthesis.contrast_multiplier = multiplier;
        }
    }
    if let Some(value) = cli_args.get("peak_scaling") {
        synthesis.peak_scaling = value.to_lowercase() == "true" || value == "1";
    }
    if let Some(value) = cli_args.get("offset") {
        if let Ok(offset) = value.parse::<i64>() {
            synthesis.offset = offset;
        }
    }
    if let Some(value) = cli_args.get("parameters") {
        if let Ok(preset) = value.parse::<thesis_ird::ParameterPreset>() {
            synthesis.parameters = preset.parameters();
        }
    }
    if let Some(value) = cli_args.get("tauc_lock") {
        if value.eq_ignore_ascii_case("none") {
            synthesis.tauc_lock = None;
        } else if let Ok(lock) = value.parse::<f64>() {
            synthesis.tauc_lock = Some(lock);
        }
    }
}
