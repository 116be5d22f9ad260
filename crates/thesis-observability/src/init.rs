// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization
//!
//! Console output is always installed. With the `file-logging` feature each
//! run also writes per-crate JSON log files with configurable retention.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;
use crate::config::{LogOutput, LoggingConfig};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps file writers alive; logs are flushed when dropped
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Directory of the current run's log files, if file logging is active
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

/// Initialize logging
///
/// With file logging enabled, creates a timestamped folder structure:
/// ```text
/// ./logs/
///   └── run_20250101_120000/
///       ├── thesis-ird.log
///       ├── thesis-datasets.log
///       └── thesis.log (combined)
/// ```
///
/// # Errors
///
/// Fails if the filter directives are invalid, the log directory cannot be
/// created or a global subscriber is already installed.
pub fn init_logging(debug_flags: &CrateDebugFlags, config: &LoggingConfig) -> Result<LoggingGuard> {
    let filter = debug_flags.to_filter_string(&config.level);
    let env_filter = EnvFilter::try_new(&filter)
        .with_context(|| format!("Invalid log filter: {}", filter))?;

    let mut layers: Vec<BoxedLayer> = Vec::new();

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false);
    let console_layer = match config.output {
        LogOutput::Stdout => console_layer
            .with_writer(std::io::stdout)
            .with_filter(env_filter)
            .boxed(),
        LogOutput::Stderr => console_layer
            .with_writer(std::io::stderr)
            .with_filter(env_filter)
            .boxed(),
    };
    layers.push(console_layer);

    #[cfg(feature = "file-logging")]
    let (file_guards, log_dir) = {
        let (file_layers, guards, run_folder) = file_layers(debug_flags, config, &filter)?;
        layers.extend(file_layers);
        (guards, Some(run_folder))
    };
    #[cfg(not(feature = "file-logging"))]
    let log_dir = None;

    Registry::default()
        .with(layers)
        .try_init()
        .context("Failed to install the global tracing subscriber")?;

    Ok(LoggingGuard {
        #[cfg(feature = "file-logging")]
        _file_guards: file_guards,
        log_dir,
    })
}

/// Initialize console logging at the given level
pub fn init_logging_default(debug_flags: &CrateDebugFlags) -> Result<LoggingGuard> {
    init_logging(debug_flags, &LoggingConfig::default())
}

#[cfg(feature = "file-logging")]
fn file_layers(
    debug_flags: &CrateDebugFlags,
    config: &LoggingConfig,
    filter: &str,
) -> Result<(
    Vec<BoxedLayer>,
    Vec<tracing_appender::non_blocking::WorkerGuard>,
    PathBuf,
)> {
    use crate::config::LogFormat;
    use chrono::Utc;
    use tracing_appender::rolling;

    let base_log_dir = config
        .log_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("./logs"));

    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    let run_folder = base_log_dir.join(format!("run_{}", timestamp));
    std::fs::create_dir_all(&run_folder)
        .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;

    cleanup_old_logs(&base_log_dir, config.retention_days, config.retention_runs)?;

    let mut layers: Vec<BoxedLayer> = Vec::new();
    let mut guards = Vec::new();

    let mut push_file = |file_name: String, directives: String| -> Result<()> {
        let appender = rolling::daily(&run_folder, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        guards.push(guard);

        let file_filter = EnvFilter::try_new(&directives)
            .with_context(|| format!("Invalid log filter: {}", directives))?;
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true);
        let layer = match config.format {
            LogFormat::Json => layer.json().with_filter(file_filter).boxed(),
            LogFormat::Text => layer.with_filter(file_filter).boxed(),
        };
        layers.push(layer);
        Ok(())
    };

    for crate_name in crate::KNOWN_CRATES {
        let level = debug_flags.log_level(crate_name).to_string().to_lowercase();
        push_file(
            format!("{}.log", crate_name),
            format!("off,{}={}", crate_name.replace('-', "_"), level),
        )?;
    }
    push_file("thesis.log".to_string(), filter.to_string())?;

    Ok((layers, guards, run_folder))
}

/// Remove run folders older than `retention_days`, then keep at most
/// `retention_runs` of the remaining ones
#[cfg(feature = "file-logging")]
fn cleanup_old_logs(base_log_dir: &Path, retention_days: u64, retention_runs: usize) -> Result<()> {
    use chrono::{DateTime, NaiveDateTime, Utc};

    if !base_log_dir.exists() {
        return Ok(());
    }

    let cutoff_date = Utc::now() - chrono::Duration::days(retention_days as i64);

    let mut runs: Vec<(PathBuf, DateTime<Utc>)> = Vec::new();
    for entry in std::fs::read_dir(base_log_dir)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        let Some(timestamp_str) = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_prefix("run_"))
        else {
            continue;
        };
        if let Ok(dt) = NaiveDateTime::parse_from_str(timestamp_str, "%Y%m%d_%H%M%S") {
            runs.push((path, dt.and_utc()));
        }
    }

    // Oldest first
    runs.sort_by_key(|(_, dt)| *dt);

    let (expired, mut kept): (Vec<_>, Vec<_>) =
        runs.into_iter().partition(|(_, dt)| *dt < cutoff_date);
    let excess = kept.len().saturating_sub(retention_runs);
    let removals = expired.into_iter().chain(kept.drain(..excess));

    for (path, _) in removals {
        if let Err(e) = std::fs::remove_dir_all(&path) {
            eprintln!(
                "Warning: Failed to remove old log directory {}: {}",
                path.display(),
                e
            );
        }
    }

    Ok(())
}
