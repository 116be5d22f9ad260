// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Collects every violation in a loaded configuration before reporting, so a
//! single run lists all problems.

use crate::{ConfigError, ConfigResult, ThesisConfig};

/// Validation errors that can occur during config validation
#[derive(Debug, Clone)]
pub enum ConfigValidationError {
    MissingRequired { field: String },
    InvalidValue { field: String, reason: String },
    InvalidSynthesis { reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
            Self::InvalidSynthesis { reason } => {
                write!(f, "Invalid synthesis settings: {}", reason)
            }
        }
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate the entire configuration
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every violation found
pub fn validate_config(config: &ThesisConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_system(config, &mut errors);
    validate_assets(config, &mut errors);
    validate_synthesis(config, &mut errors);
    validate_notebooks(config, &mut errors);

    if !errors.is_empty() {
        let error_messages: Vec<String> = errors.iter().map(|e| format!("  - {}", e)).collect();
        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages.join("\n")
        )));
    }

    Ok(())
}

fn validate_system(config: &ThesisConfig, errors: &mut Vec<ConfigValidationError>) {
    let level = config.system.log_level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "system.log_level".to_string(),
            reason: format!(
                "'{}' is not one of {}",
                config.system.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }
}

fn validate_assets(config: &ThesisConfig, errors: &mut Vec<ConfigValidationError>) {
    if config.assets.asset_dir.as_os_str().is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "assets.asset_dir".to_string(),
        });
    }
}

fn validate_synthesis(config: &ThesisConfig, errors: &mut Vec<ConfigValidationError>) {
    let synthesis = &config.synthesis;
    if let Err(e) = synthesis.validate() {
        errors.push(ConfigValidationError::InvalidSynthesis {
            reason: e.to_string(),
        });
    }
    if !synthesis.contrast_multiplier.is_finite() || synthesis.contrast_multiplier < 0.0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "synthesis.contrast_multiplier".to_string(),
            reason: "must be a finite non-negative number".to_string(),
        });
    }
    if synthesis.lag < 0.0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "synthesis.lag".to_string(),
            reason: "must not be negative".to_string(),
        });
    }
}

fn validate_notebooks(config: &ThesisConfig, errors: &mut Vec<ConfigValidationError>) {
    if config.notebooks.content_dir.as_os_str().is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "notebooks.content_dir".to_string(),
        });
    }
}
