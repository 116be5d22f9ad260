// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Captured Nowak onset latency distributions
//!
//! The archive is a pickled dict mapping each recording condition to a
//! `(frequencies, edges)` pair, plus `mu_bounds` / `su_bounds` 4-tuples used
//! as plot extents.

use serde::{Deserialize, Serialize};
use serde_pickle::{DeOptions, HashableValue, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

use crate::error::{DatasetError, DatasetResult};

/// Recording condition (multi-unit / single-unit, ON / OFF)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum NowakCondition {
    #[default]
    #[serde(rename = "mu_ON")]
    MuOn,
    #[serde(rename = "mu_OFF")]
    MuOff,
    #[serde(rename = "su_ON")]
    SuOn,
    #[serde(rename = "su_OFF")]
    SuOff,
}

impl NowakCondition {
    pub const ALL: [NowakCondition; 4] = [
        NowakCondition::MuOn,
        NowakCondition::MuOff,
        NowakCondition::SuOn,
        NowakCondition::SuOff,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            NowakCondition::MuOn => "mu_ON",
            NowakCondition::MuOff => "mu_OFF",
            NowakCondition::SuOn => "su_ON",
            NowakCondition::SuOff => "su_OFF",
        }
    }

    /// Latency of the distribution peak (ms)
    pub fn peak(&self) -> f64 {
        match self {
            NowakCondition::MuOn => 75.0,
            NowakCondition::MuOff => 65.0,
            NowakCondition::SuOn => 85.0,
            NowakCondition::SuOff => 115.0,
        }
    }

    /// Width of the latency range (ms)
    pub fn range(&self) -> f64 {
        match self {
            NowakCondition::MuOn => 100.0,
            NowakCondition::MuOff => 130.0,
            NowakCondition::SuOn => 100.0,
            NowakCondition::SuOff => 130.0,
        }
    }

    /// Earliest onset latency (ms)
    pub fn onset(&self) -> f64 {
        match self {
            NowakCondition::MuOn => 20.0,
            NowakCondition::MuOff | NowakCondition::SuOn | NowakCondition::SuOff => 30.0,
        }
    }

    pub fn is_multi_unit(&self) -> bool {
        matches!(self, NowakCondition::MuOn | NowakCondition::MuOff)
    }

    fn bounds_key(&self) -> &'static str {
        if self.is_multi_unit() {
            "mu_bounds"
        } else {
            "su_bounds"
        }
    }
}

impl fmt::Display for NowakCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NowakCondition {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NowakCondition::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| DatasetError::UnknownCondition(s.to_string()))
    }
}

/// How the latency axis is shifted before display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Centering {
    None,
    Peak,
    #[default]
    Range,
    ZeroAlign,
}

impl Centering {
    /// Amount subtracted from every bin edge
    pub fn offset(&self, condition: NowakCondition) -> f64 {
        match self {
            Centering::None => 0.0,
            Centering::Peak => condition.peak(),
            Centering::Range => condition.range() / 2.0 + condition.onset(),
            Centering::ZeroAlign => condition.onset(),
        }
    }
}

/// Options of [`NowakArchive::distribution`]
#[derive(Debug, Clone, PartialEq)]
pub struct NowakOptions {
    pub condition: NowakCondition,
    /// Multiplies every frequency when set
    pub scale: Option<f64>,
    /// Histogram when true, `(edge, frequency)` points otherwise
    pub hist: bool,
    pub centering: Centering,
    /// Attach the archive bounds as plot extents
    pub extents: bool,
    pub group: String,
}

impl Default for NowakOptions {
    fn default() -> Self {
        Self {
            condition: NowakCondition::MuOn,
            scale: None,
            hist: true,
            centering: Centering::Range,
            extents: false,
            group: "Nowak".to_string(),
        }
    }
}

/// Histogram of onset latencies; `edges` bound the bins
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub frequencies: Vec<f64>,
    pub edges: Vec<f64>,
    pub key_dimension: String,
    pub group: String,
    pub extents: Option<[f64; 4]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Points {
    pub points: Vec<(f64, f64)>,
    pub group: String,
    pub extents: Option<[f64; 4]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum NowakDistribution {
    Histogram(Histogram),
    Points(Points),
}

impl NowakDistribution {
    pub fn group(&self) -> &str {
        match self {
            NowakDistribution::Histogram(h) => &h.group,
            NowakDistribution::Points(p) => &p.group,
        }
    }

    pub fn extents(&self) -> Option<[f64; 4]> {
        match self {
            NowakDistribution::Histogram(h) => h.extents,
            NowakDistribution::Points(p) => p.extents,
        }
    }
}

/// Decoded contents of the Nowak histogram archive
#[derive(Debug, Clone, PartialEq)]
pub struct NowakArchive {
    pub source: PathBuf,
    pub histograms: BTreeMap<NowakCondition, (Vec<f64>, Vec<f64>)>,
    pub mu_bounds: Option<[f64; 4]>,
    pub su_bounds: Option<[f64; 4]>,
}

impl NowakArchive {
    pub fn load(path: impl AsRef<Path>) -> DatasetResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| DatasetError::io(path, e))?;
        let value = serde_pickle::value_from_reader(
            BufReader::new(file),
            DeOptions::new().decode_strings(),
        )
        .map_err(|e| DatasetError::PickleError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let archive = Self::from_value(path, &value)?;
        debug!(
            "[DATASETS] Loaded Nowak archive {} with {} conditions",
            path.display(),
            archive.histograms.len()
        );
        Ok(archive)
    }

    fn from_value(path: &Path, value: &Value) -> DatasetResult<Self> {
        let Value::Dict(entries) = value else {
            return Err(DatasetError::format(path, "expected a dict at the top level"));
        };

        let mut archive = NowakArchive {
            source: path.to_path_buf(),
            histograms: BTreeMap::new(),
            mu_bounds: None,
            su_bounds: None,
        };

        for (key, entry) in entries {
            let Some(key) = key_name(key) else {
                continue;
            };
            match key.as_str() {
                "mu_bounds" | "su_bounds" => {
                    let bounds = number_list(entry)
                        .filter(|b| b.len() == 4)
                        .map(|b| [b[0], b[1], b[2], b[3]])
                        .ok_or_else(|| {
                            DatasetError::format(path, format!("{} must hold 4 numbers", key))
                        })?;
                    if key == "mu_bounds" {
                        archive.mu_bounds = Some(bounds);
                    } else {
                        archive.su_bounds = Some(bounds);
                    }
                }
                name => {
                    let Ok(condition) = name.parse::<NowakCondition>() else {
                        continue;
                    };
                    let pair = sequence(entry)
                        .filter(|items| items.len() == 2)
                        .and_then(|items| Some((number_list(&items[0])?, number_list(&items[1])?)))
                        .ok_or_else(|| {
                            DatasetError::format(
                                path,
                                format!("{} must be a (frequencies, edges) pair", name),
                            )
                        })?;
                    archive.histograms.insert(condition, pair);
                }
            }
        }
        Ok(archive)
    }

    pub fn bounds(&self, condition: NowakCondition) -> Option<[f64; 4]> {
        if condition.is_multi_unit() {
            self.mu_bounds
        } else {
            self.su_bounds
        }
    }

    /// Build the histogram or point view of one condition
    pub fn distribution(&self, options: &NowakOptions) -> DatasetResult<NowakDistribution> {
        let condition = options.condition;
        let (frequencies, edges) = self.histograms.get(&condition).ok_or_else(|| {
            DatasetError::format(&self.source, format!("missing condition {}", condition))
        })?;

        let offset = options.centering.offset(condition);
        let edges: Vec<f64> = if offset != 0.0 {
            edges.iter().map(|e| e - offset).collect()
        } else {
            edges.clone()
        };

        let frequencies: Vec<f64> = match options.scale {
            Some(scale) => frequencies.iter().map(|f| f * scale).collect(),
            None => frequencies.clone(),
        };

        let extents = if options.extents {
            let bounds = self.bounds(condition).ok_or_else(|| {
                DatasetError::format(
                    &self.source,
                    format!("missing {}", condition.bounds_key()),
                )
            })?;
            let sc = options.scale.filter(|s| *s != 0.0).unwrap_or(1.0);
            Some([bounds[0], bounds[1], bounds[2], bounds[3] * sc])
        } else {
            None
        };

        let group = options.group.clone();
        Ok(if options.hist {
            NowakDistribution::Histogram(Histogram {
                frequencies,
                edges,
                key_dimension: "Onset latency (ms)".to_string(),
                group,
                extents,
            })
        } else {
            NowakDistribution::Points(Points {
                points: edges.into_iter().zip(frequencies).collect(),
                group,
                extents,
            })
        })
    }
}

/// Load the archive at `path` and build one distribution
pub fn nowak_distribution(
    path: impl AsRef<Path>,
    options: &NowakOptions,
) -> DatasetResult<NowakDistribution> {
    NowakArchive::load(path)?.distribution(options)
}

fn key_name(key: &HashableValue) -> Option<String> {
    match key {
        HashableValue::String(s) => Some(s.clone()),
        HashableValue::Bytes(b) => String::from_utf8(b.clone()).ok(),
        _ => None,
    }
}

fn sequence(value: &Value) -> Option<&[Value]> {
    match value {
        Value::List(items) | Value::Tuple(items) => Some(items.as_slice()),
        _ => None,
    }
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::F64(v) => Some(*v),
        Value::I64(v) => Some(*v as f64),
        Value::Bool(v) => Some(f64::from(u8::from(*v))),
        _ => None,
    }
}

fn number_list(value: &Value) -> Option<Vec<f64>> {
    sequence(value)?.iter().map(number).collect()
}
