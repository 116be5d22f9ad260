// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Captured Sit and Reynaud response traces
//!
//! Traces are stored in `.npz` archives of 2-column `[x, y]` float arrays.

use ndarray::{Array2, Array3, ArrayView2, Axis};
use ndarray_npy::NpzReader;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thesis_ird::Curve;
use tracing::debug;

use crate::error::{DatasetError, DatasetResult};

pub const SIT_DEFAULT_CONTRAST: u32 = 100;
pub const REYNAUD_DEFAULT_CONTRAST: u32 = 80;

fn open_npz(path: &Path) -> DatasetResult<NpzReader<BufReader<File>>> {
    let file = File::open(path).map_err(|e| DatasetError::io(path, e))?;
    NpzReader::new(BufReader::new(file)).map_err(|e| DatasetError::npy(path, e))
}

/// Entry names with the `.npy` suffix removed, paired with the raw name
fn entry_names(npz: &mut NpzReader<BufReader<File>>, path: &Path) -> DatasetResult<Vec<(String, String)>> {
    let names = npz.names().map_err(|e| DatasetError::npy(path, e))?;
    Ok(names
        .into_iter()
        .map(|raw| {
            let key = raw.strip_suffix(".npy").unwrap_or(&raw).to_string();
            (key, raw)
        })
        .collect())
}

fn contrast_archive(dir: &Path, contrast: u32) -> PathBuf {
    dir.join(format!("c{}.npz", contrast))
}

fn to_curve(path: &Path, data: ArrayView2<'_, f64>) -> DatasetResult<Curve> {
    Curve::from_array(data).map_err(|e| DatasetError::format(path, e.to_string()))
}

/// Load the captured Sit spatiotemporal curves for one contrast
///
/// Reads `c{contrast}.npz` from `dir`; its `data` entry holds an
/// `(n_curves, n_samples, 2)` array.
pub fn sit_spatiotemporal_traces(dir: impl AsRef<Path>, contrast: u32) -> DatasetResult<Vec<Curve>> {
    let path = contrast_archive(dir.as_ref(), contrast);
    let mut npz = open_npz(&path)?;
    let raw = entry_names(&mut npz, &path)?
        .into_iter()
        .find(|(key, _)| key == "data")
        .map(|(_, raw)| raw)
        .ok_or_else(|| DatasetError::format(&path, "missing 'data' entry"))?;

    let data: Array3<f64> = npz.by_name(&raw).map_err(|e| DatasetError::npy(&path, e))?;
    let curves = data
        .axis_iter(Axis(0))
        .map(|trace| to_curve(&path, trace))
        .collect::<DatasetResult<Vec<_>>>()?;
    debug!(
        "[DATASETS] Loaded {} Sit traces at contrast {}",
        curves.len(),
        contrast
    );
    Ok(curves)
}

/// Load the captured Reynaud spatiotemporal curves for one contrast
///
/// Every entry of `c{contrast}.npz` is a 2-column array; curves are returned
/// in archive order.
pub fn reynaud_spatiotemporal_traces(
    dir: impl AsRef<Path>,
    contrast: u32,
) -> DatasetResult<Vec<Curve>> {
    let path = contrast_archive(dir.as_ref(), contrast);
    let mut npz = open_npz(&path)?;
    let mut curves = Vec::with_capacity(npz.len());
    for index in 0..npz.len() {
        let data: Array2<f64> = npz.by_index(index).map_err(|e| DatasetError::npy(&path, e))?;
        curves.push(to_curve(&path, data.view())?);
    }
    debug!(
        "[DATASETS] Loaded {} Reynaud traces at contrast {}",
        curves.len(),
        contrast
    );
    Ok(curves)
}

/// Linearly resample a 2-column curve array at roughly `distance` spacing
///
/// Produces `floor(trunc(xmax - xmin) / distance)` evenly spaced samples from
/// `xmin` to `xmax` inclusive. Values outside the data range clamp to the end
/// points.
pub fn interpolate(data: ArrayView2<'_, f64>, distance: f64) -> DatasetResult<Array2<f64>> {
    if data.ncols() != 2 {
        return Err(DatasetError::InvalidArgument(format!(
            "expected an (N, 2) array, got {:?}",
            data.shape()
        )));
    }
    if !(distance > 0.0) {
        return Err(DatasetError::InvalidArgument(format!(
            "interpolation distance must be positive, got {}",
            distance
        )));
    }
    if data.nrows() == 0 {
        return Ok(Array2::zeros((0, 2)));
    }

    let mut points: Vec<(f64, f64)> = data.rows().into_iter().map(|r| (r[0], r[1])).collect();
    points.sort_by(|a, b| a.0.total_cmp(&b.0));

    let xmin = points[0].0;
    let xmax = points[points.len() - 1].0;
    let samples = ((xmax - xmin).trunc() / distance).floor() as usize;

    let mut out = Array2::zeros((samples, 2));
    for (i, mut row) in out.rows_mut().into_iter().enumerate() {
        let x = linspace_at(xmin, xmax, samples, i);
        row[0] = x;
        row[1] = interp(&points, x);
    }
    Ok(out)
}

fn linspace_at(start: f64, stop: f64, samples: usize, i: usize) -> f64 {
    if samples <= 1 {
        return start;
    }
    if i == samples - 1 {
        return stop;
    }
    start + (stop - start) * i as f64 / (samples - 1) as f64
}

/// Piecewise-linear interpolation over points sorted by x
fn interp(points: &[(f64, f64)], x: f64) -> f64 {
    let first = points[0];
    let last = points[points.len() - 1];
    if x <= first.0 {
        return first.1;
    }
    if x >= last.0 {
        return last.1;
    }
    let upper = points.partition_point(|p| p.0 <= x);
    let (x0, y0) = points[upper - 1];
    let (x1, y1) = points[upper];
    if x1 == x0 {
        return y0;
    }
    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}

/// Options of [`sit_traces`]
#[derive(Debug, Clone, PartialEq)]
pub struct SitTraceOptions {
    /// Approximate resampling distance in milliseconds; `None` keeps the raw samples
    pub interpolation: Option<f64>,
    /// Contrasts left out of the overlay
    pub exclude: Vec<f64>,
}

impl Default for SitTraceOptions {
    fn default() -> Self {
        Self {
            interpolation: Some(1.0),
            exclude: Vec::new(),
        }
    }
}

/// Raw traces indexed by contrast, in ascending contrast order
#[derive(Debug, Clone, PartialEq)]
pub struct ContrastOverlay {
    pub key_dimension: String,
    pub curves: Vec<(f64, Curve)>,
}

impl ContrastOverlay {
    pub fn contrasts(&self) -> Vec<f64> {
        self.curves.iter().map(|(c, _)| *c).collect()
    }

    pub fn get(&self, contrast: f64) -> Option<&Curve> {
        self.curves
            .iter()
            .find(|(c, _)| *c == contrast)
            .map(|(_, curve)| curve)
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}

/// Load the Sit raw traces (one trace per contrast)
///
/// Archive entries are keyed by their contrast value.
pub fn sit_traces(path: impl AsRef<Path>, options: &SitTraceOptions) -> DatasetResult<ContrastOverlay> {
    let path = path.as_ref();
    let mut npz = open_npz(path)?;
    let interpolation = options.interpolation.filter(|d| *d != 0.0);

    let mut curves = Vec::new();
    for (key, raw) in entry_names(&mut npz, path)? {
        let contrast: f64 = key
            .parse()
            .map_err(|_| DatasetError::format(path, format!("entry '{}' is not a contrast", key)))?;
        if options.exclude.contains(&contrast) {
            continue;
        }
        let data: Array2<f64> = npz.by_name(&raw).map_err(|e| DatasetError::npy(path, e))?;
        let data = match interpolation {
            Some(distance) => interpolate(data.view(), distance)?,
            None => data,
        };
        let curve = to_curve(path, data.view())?.with_label(format!("{}", contrast));
        curves.push((contrast, curve));
    }
    curves.sort_by(|a, b| a.0.total_cmp(&b.0));
    debug!("[DATASETS] Loaded {} Sit raw traces", curves.len());

    Ok(ContrastOverlay {
        key_dimension: "Contrast".to_string(),
        curves,
    })
}
