// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Colour map reproducing the Sit et al. figures
//!
//! The map is a list of RGB colours (components in `0..=1`) spaced evenly
//! over `[0, 1]` and interpolated linearly. It is stored as JSON or captured
//! from a clean colour-bar PNG.

use image::{Rgb, RgbImage};
use ndarray::Array2;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

use crate::error::{DatasetError, DatasetResult};

pub const SIT_CMAP_NAME: &str = "sit_cmap";
pub const DEFAULT_CLIP_DIST: usize = 30;

const COLORBAR_ROWS: usize = 15;
const COLORBAR_COLUMNS: usize = 256;

#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    pub name: String,
    pub colors: Vec<[f64; 3]>,
}

impl Colormap {
    pub fn new(name: impl Into<String>, colors: Vec<[f64; 3]>) -> DatasetResult<Self> {
        if colors.is_empty() {
            return Err(DatasetError::InvalidArgument(
                "a colour map needs at least one colour".to_string(),
            ));
        }
        Ok(Self {
            name: name.into(),
            colors,
        })
    }

    /// Load a JSON array of `[r, g, b]` triples
    pub fn from_json(path: impl AsRef<Path>) -> DatasetResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| DatasetError::io(path, e))?;
        let colors: Vec<[f64; 3]> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| DatasetError::format(path, e.to_string()))?;
        Self::new(SIT_CMAP_NAME, colors)
    }

    /// Capture the colours of a horizontal colour-bar image
    ///
    /// Each column is averaged over the rows and re-saturated to full HSV
    /// saturation.
    pub fn from_png(path: impl AsRef<Path>) -> DatasetResult<Self> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|e| DatasetError::ImageError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
            .to_rgb8();

        let (width, height) = image.dimensions();
        if height == 0 {
            return Err(DatasetError::format(path, "empty colour-bar image"));
        }
        let mut colors = Vec::with_capacity(width as usize);
        for x in 0..width {
            let mut sum = [0.0f64; 3];
            for y in 0..height {
                let Rgb(pixel) = *image.get_pixel(x, y);
                for (acc, channel) in sum.iter_mut().zip(pixel) {
                    *acc += f64::from(channel);
                }
            }
            let mean = sum.map(|s| s / f64::from(height) / 255.0);
            let (h, _, v) = rgb_to_hsv(mean);
            colors.push(hsv_to_rgb(h, 1.0, v));
        }
        Self::new(SIT_CMAP_NAME, colors)
    }

    /// Load by file extension (`.json` or `.png`), then apply the clip distance
    pub fn load(path: impl AsRef<Path>, clip_dist: Option<usize>) -> DatasetResult<Self> {
        let path = path.as_ref();
        let cmap = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(path)?,
            Some("png") => Self::from_png(path)?,
            _ => {
                return Err(DatasetError::format(
                    path,
                    "colour maps are read from .json or .png files",
                ))
            }
        };
        debug!(
            "[DATASETS] Loaded colour map with {} colours from {}",
            cmap.colors.len(),
            path.display()
        );
        match clip_dist {
            Some(dist) => cmap.clipped(dist),
            None => Ok(cmap),
        }
    }

    /// Replace the first and last `dist` colours with the end colours
    pub fn clipped(mut self, dist: usize) -> DatasetResult<Self> {
        if dist == 0 {
            return Ok(self);
        }
        let len = self.colors.len();
        if 2 * dist >= len {
            return Err(DatasetError::InvalidArgument(format!(
                "clip distance {} too large for a map of {} colours",
                dist, len
            )));
        }
        let first = self.colors[0];
        let last = self.colors[len - 1];
        self.colors[..dist].fill(first);
        self.colors[len - dist..].fill(last);
        Ok(self)
    }

    /// Colour at `value`, clamped to `[0, 1]`
    pub fn lookup(&self, value: f64) -> [f64; 3] {
        let n = self.colors.len();
        if n == 1 || value.is_nan() {
            return self.colors[0];
        }
        let position = value.clamp(0.0, 1.0) * (n - 1) as f64;
        let lower = (position.floor() as usize).min(n - 2);
        let frac = position - lower as f64;
        let (a, b) = (self.colors[lower], self.colors[lower + 1]);
        [
            a[0] + (b[0] - a[0]) * frac,
            a[1] + (b[1] - a[1]) * frac,
            a[2] + (b[2] - a[2]) * frac,
        ]
    }

    /// Render the colour-bar preview
    pub fn colorbar_image(&self) -> RgbImage {
        let data = colorbar_data();
        RgbImage::from_fn(COLORBAR_COLUMNS as u32, COLORBAR_ROWS as u32, |x, y| {
            let [r, g, b] = self.lookup(data[[y as usize, x as usize]]);
            Rgb([to_byte(r), to_byte(g), to_byte(b)])
        })
    }
}

/// The 15x256 ramp used for colour-bar previews; every row spans `[0, 1]`
pub fn colorbar_data() -> Array2<f64> {
    Array2::from_shape_fn((COLORBAR_ROWS, COLORBAR_COLUMNS), |(_, col)| {
        col as f64 / (COLORBAR_COLUMNS - 1) as f64
    })
}

fn to_byte(component: f64) -> u8 {
    (component.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// RGB to HSV, all components in `[0, 1]`
pub fn rgb_to_hsv([r, g, b]: [f64; 3]) -> (f64, f64, f64) {
    let maxc = r.max(g).max(b);
    let minc = r.min(g).min(b);
    let v = maxc;
    if minc == maxc {
        return (0.0, 0.0, v);
    }
    let range = maxc - minc;
    let s = range / maxc;
    let rc = (maxc - r) / range;
    let gc = (maxc - g) / range;
    let bc = (maxc - b) / range;
    let h = if r == maxc {
        bc - gc
    } else if g == maxc {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    ((h / 6.0).rem_euclid(1.0), s, v)
}

/// HSV to RGB, all components in `[0, 1]`
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> [f64; 3] {
    if s == 0.0 {
        return [v, v, v];
    }
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (sector as i64).rem_euclid(6) {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}
