//! Tests for the dataset loaders
//!
//! Fixtures are written to a temporary directory in the same formats as the
//! captured assets: pickle for Nowak, npz for the traces, JSON and PNG for
//! the colour map.

use approx::assert_relative_eq;
use ndarray::{array, Array3};
use ndarray_npy::NpzWriter;
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use tempfile::tempdir;
use thesis_datasets::*;

#[derive(Serialize)]
struct NowakFixture {
    #[serde(rename = "mu_ON")]
    mu_on: (Vec<i64>, Vec<f64>),
    #[serde(rename = "su_OFF")]
    su_off: (Vec<f64>, Vec<f64>),
    mu_bounds: (f64, f64, f64, f64),
    su_bounds: (f64, f64, f64, f64),
}

fn write_nowak(path: &Path) {
    let fixture = NowakFixture {
        mu_on: (vec![1, 4, 2], vec![50.0, 60.0, 70.0, 80.0]),
        su_off: (vec![0.5, 0.25], vec![100.0, 110.0, 120.0]),
        mu_bounds: (-60.0, 0.0, 60.0, 10.0),
        su_bounds: (-80.0, 0.0, 80.0, 0.6),
    };
    let mut file = File::create(path).unwrap();
    serde_pickle::to_writer(&mut file, &fixture, serde_pickle::SerOptions::new()).unwrap();
}

#[cfg(test)]
mod test_nowak {
    use super::*;

    #[test]
    fn test_histogram_with_range_centering() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nowak_histograms.pkl");
        write_nowak(&path);

        let dist = nowak_distribution(&path, &NowakOptions::default()).unwrap();
        let NowakDistribution::Histogram(hist) = dist else {
            panic!("expected a histogram");
        };
        // range 100 / 2 + onset 20
        assert_eq!(hist.edges, vec![-20.0, -10.0, 0.0, 10.0]);
        assert_eq!(hist.frequencies, vec![1.0, 4.0, 2.0]);
        assert_eq!(hist.key_dimension, "Onset latency (ms)");
        assert_eq!(hist.group, "Nowak");
        assert_eq!(hist.extents, None);
    }

    #[test]
    fn test_points_with_scale_and_extents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nowak_histograms.pkl");
        write_nowak(&path);

        let options = NowakOptions {
            condition: NowakCondition::SuOff,
            scale: Some(2.0),
            hist: false,
            centering: Centering::Peak,
            extents: true,
            group: "Nowak SU".to_string(),
        };
        let dist = NowakArchive::load(&path).unwrap().distribution(&options).unwrap();
        assert_eq!(dist.group(), "Nowak SU");
        let extents = dist.extents().unwrap();
        assert_eq!(extents[..3], [-80.0, 0.0, 80.0]);
        assert_relative_eq!(extents[3], 1.2, epsilon = 1e-12);

        let NowakDistribution::Points(points) = dist else {
            panic!("expected points");
        };
        // Truncated to the shorter of edges and frequencies
        assert_eq!(points.points, vec![(-15.0, 1.0), (-5.0, 0.5)]);
    }

    #[test]
    fn test_zero_align_is_stable_across_loads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nowak_histograms.pkl");
        write_nowak(&path);

        let options = NowakOptions {
            centering: Centering::ZeroAlign,
            ..NowakOptions::default()
        };
        let first = nowak_distribution(&path, &options).unwrap();
        let second = nowak_distribution(&path, &options).unwrap();
        assert_eq!(first, second);

        let NowakDistribution::Histogram(hist) = first else {
            panic!("expected a histogram");
        };
        assert_eq!(hist.edges, vec![30.0, 40.0, 50.0, 60.0]);
    }

    #[test]
    fn test_missing_condition_and_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nowak_histograms.pkl");
        write_nowak(&path);

        let options = NowakOptions {
            condition: NowakCondition::MuOff,
            ..NowakOptions::default()
        };
        assert!(matches!(
            nowak_distribution(&path, &options),
            Err(DatasetError::InvalidFormat { .. })
        ));
        assert!(matches!(
            NowakArchive::load(dir.path().join("absent.pkl")),
            Err(DatasetError::DataNotFound { .. })
        ));
    }
}

#[cfg(test)]
mod test_traces {
    use super::*;

    #[test]
    fn test_sit_spatiotemporal_traces() {
        let dir = tempdir().unwrap();
        let mut data = Array3::<f64>::zeros((3, 4, 2));
        for curve in 0..3 {
            for sample in 0..4 {
                data[[curve, sample, 0]] = sample as f64;
                data[[curve, sample, 1]] = (curve * 10 + sample) as f64;
            }
        }
        let mut npz = NpzWriter::new(File::create(dir.path().join("c100.npz")).unwrap());
        npz.add_array("data", &data).unwrap();
        npz.finish().unwrap();

        let curves = sit_spatiotemporal_traces(dir.path(), SIT_DEFAULT_CONTRAST).unwrap();
        assert_eq!(curves.len(), 3);
        assert_eq!(curves[2].points[1], (1.0, 21.0));
        assert!(sit_spatiotemporal_traces(dir.path(), 50).is_err());
    }

    #[test]
    fn test_reynaud_traces_keep_archive_order() {
        let dir = tempdir().unwrap();
        let mut npz = NpzWriter::new(File::create(dir.path().join("c80.npz")).unwrap());
        npz.add_array("zeta", &array![[0.0, 1.0], [1.0, 2.0]]).unwrap();
        npz.add_array("alpha", &array![[0.0, 3.0], [1.0, 4.0], [2.0, 5.0]]).unwrap();
        npz.finish().unwrap();

        let curves = reynaud_spatiotemporal_traces(dir.path(), REYNAUD_DEFAULT_CONTRAST).unwrap();
        assert_eq!(curves.len(), 2);
        assert_eq!(curves[0].len(), 2);
        assert_eq!(curves[1].points[2], (2.0, 5.0));
    }

    fn write_raw_traces(path: &Path) {
        let mut npz = NpzWriter::new(File::create(path).unwrap());
        npz.add_array("100", &array![[0.0, 0.0], [10.0, 10.0]]).unwrap();
        npz.add_array("25", &array![[0.0, 1.0], [10.0, 1.0]]).unwrap();
        npz.add_array("50", &array![[0.0, 2.0], [10.0, 4.0]]).unwrap();
        npz.finish().unwrap();
    }

    #[test]
    fn test_sit_traces_overlay() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("raw_traces_c100.npz");
        write_raw_traces(&path);

        let overlay = sit_traces(&path, &SitTraceOptions::default()).unwrap();
        assert_eq!(overlay.key_dimension, "Contrast");
        assert_eq!(overlay.contrasts(), vec![25.0, 50.0, 100.0]);
        // Resampled at 1 ms: trunc(10) / 1 = 10 samples
        assert_eq!(overlay.get(100.0).unwrap().len(), 10);

        let raw = sit_traces(
            &path,
            &SitTraceOptions {
                interpolation: None,
                exclude: vec![50.0],
            },
        )
        .unwrap();
        assert_eq!(raw.contrasts(), vec![25.0, 100.0]);
        assert_eq!(raw.get(25.0).unwrap().points, vec![(0.0, 1.0), (10.0, 1.0)]);
    }
}

#[cfg(test)]
mod test_colormap {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_json_colormap_with_clipping() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sit_cmap.json");
        let colors: Vec<[f64; 3]> = (0..8).map(|i| [i as f64 / 7.0, 0.0, 0.0]).collect();
        serde_json::to_writer(File::create(&path).unwrap(), &colors).unwrap();

        let cmap = Colormap::load(&path, Some(2)).unwrap();
        assert_eq!(cmap.name, SIT_CMAP_NAME);
        assert_eq!(cmap.colors[1], [0.0, 0.0, 0.0]);
        assert_eq!(cmap.colors[6], [1.0, 0.0, 0.0]);
        assert_relative_eq!(cmap.colors[2][0], 2.0 / 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_png_capture_resaturates_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("colorbar.png");
        // Column 0 averages to (100, 100, 200); column 1 is pure grey
        let image = RgbImage::from_fn(2, 2, |x, y| match (x, y) {
            (0, 0) => Rgb([50, 100, 200]),
            (0, _) => Rgb([150, 100, 200]),
            _ => Rgb([128, 128, 128]),
        });
        image.save(&path).unwrap();

        let cmap = Colormap::load(&path, None).unwrap();
        assert_eq!(cmap.colors.len(), 2);
        let [r, g, b] = cmap.colors[0];
        assert_relative_eq!(r, 0.0, epsilon = 1e-12);
        assert_relative_eq!(g, 0.0, epsilon = 1e-12);
        assert_relative_eq!(b, 200.0 / 255.0, epsilon = 1e-12);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sit_cmap.txt");
        File::create(&path).unwrap();
        assert!(matches!(
            Colormap::load(&path, None),
            Err(DatasetError::InvalidFormat { .. })
        ));
    }
}
