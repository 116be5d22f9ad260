// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for the dataset loaders.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Convenient `Result` alias for dataset loading.
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Errors raised while loading captured datasets.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// A required data file or directory was not found on disk.
    #[error("Data not found at `{path}`: {message}")]
    DataNotFound { path: PathBuf, message: String },

    /// A file was found but its format or shape is wrong.
    #[error("Invalid data format in `{path}`: {message}")]
    InvalidFormat { path: PathBuf, message: String },

    /// A low-level I/O error while reading a data file.
    #[error("I/O error reading `{path}`: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A numpy archive could not be parsed.
    #[error("NumPy read error in `{path}`: {message}")]
    NpyReadError { path: PathBuf, message: String },

    /// A pickle archive could not be decoded.
    #[error("Pickle read error in `{path}`: {message}")]
    PickleError { path: PathBuf, message: String },

    /// An image could not be decoded.
    #[error("Image read error in `{path}`: {message}")]
    ImageError { path: PathBuf, message: String },

    /// Unknown recording condition name.
    #[error("Unknown condition '{0}' (expected one of mu_ON, mu_OFF, su_ON, su_OFF)")]
    UnknownCondition(String),

    /// A caller-supplied argument is out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl DatasetError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            DatasetError::DataNotFound {
                path: path.to_path_buf(),
                message: source.to_string(),
            }
        } else {
            DatasetError::IoError {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    pub(crate) fn format(path: &Path, message: impl Into<String>) -> Self {
        DatasetError::InvalidFormat {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    pub(crate) fn npy(path: &Path, err: impl std::fmt::Display) -> Self {
        DatasetError::NpyReadError {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}
