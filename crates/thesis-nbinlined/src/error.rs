// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;
use thiserror::Error;

use crate::SYNTAX;

pub type InlineResult<T> = Result<T, InlineError>;

#[derive(Debug, Error)]
pub enum InlineError {
    #[error("Error processing input '{markup}'. Expected syntax: {syntax}", syntax = SYNTAX)]
    Syntax { markup: String },

    #[error("Use pipe symbol | to split match and replacement strings")]
    MissingPipe,

    #[error("File {0} could not be found")]
    NotebookNotFound(PathBuf),

    #[error("Cell number must be supplied as an integer, got '{0}'")]
    InvalidCellNumber(String),

    #[error("Failed to read notebook {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Notebook {path} is not valid nbformat 4 JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not grab cell {0}")]
    MissingCell(i64),

    #[error("Cell {0} lacks output")]
    NoOutputs(i64),

    #[error("Cell {0} lacks HTML output")]
    NoHtml(i64),

    #[error("Unterminated tag starting at byte {0}")]
    Unterminated(usize),
}
