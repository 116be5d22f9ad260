// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! CLI argument parsing for per-crate debug flags
//!
//! Supports flags like `--debug-thesis-ird`, `--debug-thesis-datasets`, etc.

use std::collections::HashMap;
use std::env;

use crate::KNOWN_CRATES;

/// Per-crate debug switches
///
/// # Example
/// ```rust
/// use thesis_observability::CrateDebugFlags;
///
/// let flags = CrateDebugFlags::from_args(vec!["--debug-thesis-ird".to_string()]);
/// assert!(flags.is_enabled("thesis-ird"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CrateDebugFlags {
    pub enabled_crates: HashMap<String, bool>,
}

impl CrateDebugFlags {
    /// Parse debug flags from command-line arguments
    ///
    /// Looks for arguments matching `--debug-{crate-name}`; `--debug-all`
    /// enables every known crate. Other arguments are ignored.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut enabled_crates = HashMap::new();
        let mut debug_all = false;

        for arg in args {
            if arg == "--debug-all" {
                debug_all = true;
                continue;
            }

            if let Some(crate_name) = arg.strip_prefix("--debug-") {
                if !crate_name.is_empty() {
                    enabled_crates.insert(crate_name.to_string(), true);
                }
            }
        }

        if debug_all {
            for crate_name in KNOWN_CRATES {
                enabled_crates.insert(crate_name.to_string(), true);
            }
        }

        CrateDebugFlags { enabled_crates }
    }

    /// Check if debug is enabled for a specific crate
    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.get(crate_name).copied().unwrap_or(false)
    }

    /// Get all enabled crates, sorted by name
    pub fn enabled_crates(&self) -> Vec<&String> {
        let mut names: Vec<&String> = self
            .enabled_crates
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(name, _)| name)
            .collect();
        names.sort();
        names
    }

    pub fn any_enabled(&self) -> bool {
        self.enabled_crates.values().any(|enabled| *enabled)
    }

    /// Log level for a crate: `DEBUG` if enabled, `INFO` otherwise
    pub fn log_level(&self, crate_name: &str) -> tracing::Level {
        if self.is_enabled(crate_name) {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Build an `EnvFilter` directive string
    ///
    /// Crate names are converted to their tracing target form
    /// (`thesis-ird` -> `thesis_ird`). `default_level` applies to everything
    /// else, e.g. `"thesis_datasets=debug,thesis_ird=debug,warn"`.
    pub fn to_filter_string(&self, default_level: &str) -> String {
        let mut filters: Vec<String> = self
            .enabled_crates()
            .into_iter()
            .map(|name| format!("{}=debug", name.replace('-', "_")))
            .collect();
        filters.push(default_level.to_string());
        filters.join(",")
    }
}

/// Parse debug flags from the process arguments and `THESIS_DEBUG`
///
/// Environment variable format: comma-separated crate names, e.g.
/// `thesis-ird,thesis-datasets`, or `all`.
pub fn parse_debug_flags() -> CrateDebugFlags {
    let mut flags = CrateDebugFlags::from_args(env::args());
    if let Ok(env_var) = env::var("THESIS_DEBUG") {
        apply_debug_env(&mut flags, &env_var);
    }
    flags
}

fn apply_debug_env(flags: &mut CrateDebugFlags, env_var: &str) {
    if env_var.trim() == "all" {
        for crate_name in KNOWN_CRATES {
            flags.enabled_crates.insert(crate_name.to_string(), true);
        }
        return;
    }
    for crate_name in env_var.split(',') {
        let crate_name = crate_name.trim();
        if !crate_name.is_empty() {
            flags.enabled_crates.insert(crate_name.to_string(), true);
        }
    }
}

/// Generate help text for debug flags
pub fn debug_flags_help() -> String {
    format!(
        r#"Debug Flags:
  --debug-all                    Enable debug logging for all crates
  --debug-{{crate-name}}          Enable debug logging for specific crate

Available crates:
  {}

Environment Variable:
  THESIS_DEBUG={{crate-name}}[,{{crate-name}}]  Enable debug for crates (comma-separated)
  THESIS_DEBUG=all                               Enable debug for all crates

Examples:
  --debug-thesis-ird
  --debug-thesis-ird --debug-thesis-datasets
  THESIS_DEBUG=thesis-ird,thesis-datasets
"#,
        KNOWN_CRATES.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_crate_flag() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-thesis-ird".to_string()]);
        assert!(flags.is_enabled("thesis-ird"));
        assert!(!flags.is_enabled("thesis-datasets"));
    }

    #[test]
    fn test_unrelated_arguments_are_ignored() {
        let flags = CrateDebugFlags::from_args(vec![
            "synthesize_profiles".to_string(),
            "--config".to_string(),
            "--debug-".to_string(),
        ]);
        assert!(!flags.any_enabled());
    }

    #[test]
    fn test_debug_all() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-all".to_string()]);
        for crate_name in KNOWN_CRATES {
            assert!(flags.is_enabled(crate_name), "{} should be enabled", crate_name);
        }
    }

    #[test]
    fn test_filter_string() {
        let flags = CrateDebugFlags::from_args(vec![
            "--debug-thesis-ird".to_string(),
            "--debug-thesis-datasets".to_string(),
        ]);
        assert_eq!(
            flags.to_filter_string("warn"),
            "thesis_datasets=debug,thesis_ird=debug,warn"
        );
        assert_eq!(CrateDebugFlags::default().to_filter_string("info"), "info");
    }

    #[test]
    fn test_env_list() {
        let mut flags = CrateDebugFlags::default();
        apply_debug_env(&mut flags, " thesis-config, ,thesis-nbinlined");
        assert_eq!(flags.enabled_crates(), vec!["thesis-config", "thesis-nbinlined"]);

        let mut all = CrateDebugFlags::default();
        apply_debug_env(&mut all, "all");
        assert_eq!(all.enabled_crates().len(), KNOWN_CRATES.len());
    }

    #[test]
    fn test_log_level() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-thesis-ird".to_string()]);
        assert_eq!(flags.log_level("thesis-ird"), tracing::Level::DEBUG);
        assert_eq!(flags.log_level("thesis-config"), tracing::Level::INFO);
    }
}
