// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `thesis_configuration.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use thesis_ird::ProfileSettings;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ThesisConfig {
    pub system: SystemConfig,
    pub assets: AssetsConfig,
    pub synthesis: ProfileSettings,
    pub notebooks: NotebooksConfig,
}

/// System-level configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SystemConfig {
    pub log_level: String,
    /// Output directory for generated artifacts
    pub data_dir: PathBuf,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            data_dir: PathBuf::from(""),
        }
    }
}

/// Locations of the captured datasets
///
/// Dataset paths are relative to `asset_dir` unless absolute.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetsConfig {
    pub asset_dir: PathBuf,
    pub nowak_histograms: PathBuf,
    pub sit_curves_dir: PathBuf,
    pub sit_raw_traces: PathBuf,
    pub reynaud_curves_dir: PathBuf,
    pub sit_cmap: PathBuf,
    /// Number of entries padded at each end of the Sit colour map
    pub cmap_clip_dist: Option<usize>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("assets"),
            nowak_histograms: PathBuf::from("nowak-hists/nowak_histograms.pkl"),
            sit_curves_dir: PathBuf::from("sit_curves"),
            sit_raw_traces: PathBuf::from("sit-curves/raw_traces_c100.npz"),
            reynaud_curves_dir: PathBuf::from("reynaud-curves"),
            sit_cmap: PathBuf::from("sit_cmap.json"),
            cmap_clip_dist: Some(30),
        }
    }
}

impl AssetsConfig {
    /// Resolve a dataset path against `asset_dir`
    pub fn resolve(&self, path: &std::path::Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.asset_dir.join(path)
        }
    }

    pub fn nowak_histograms_path(&self) -> PathBuf {
        self.resolve(&self.nowak_histograms)
    }

    pub fn sit_curves_path(&self) -> PathBuf {
        self.resolve(&self.sit_curves_dir)
    }

    pub fn sit_raw_traces_path(&self) -> PathBuf {
        self.resolve(&self.sit_raw_traces)
    }

    pub fn reynaud_curves_path(&self) -> PathBuf {
        self.resolve(&self.reynaud_curves_dir)
    }

    pub fn sit_cmap_path(&self) -> PathBuf {
        self.resolve(&self.sit_cmap)
    }
}

/// Notebook inlining configuration (blog content layout)
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NotebooksConfig {
    /// Root of the site content
    pub content_dir: PathBuf,
    /// Notebook directory relative to `content_dir`
    pub notebook_dir: PathBuf,
}

impl Default for NotebooksConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            notebook_dir: PathBuf::from("notebooks"),
        }
    }
}

impl NotebooksConfig {
    pub fn notebook_root(&self) -> PathBuf {
        self.content_dir.join(&self.notebook_dir)
    }
}
