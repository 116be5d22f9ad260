// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Minimal nbformat 4 model: only what is needed to reach cell HTML output

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{InlineError, InlineResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Notebook {
    pub cells: Vec<Cell>,
    #[serde(default)]
    pub nbformat: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Cell {
    pub cell_type: String,
    /// Absent for markdown and raw cells
    #[serde(default)]
    pub outputs: Option<Vec<Output>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Output {
    pub output_type: String,
    /// MIME bundle; absent for stream and error outputs
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
}

impl Output {
    /// `text/html` payload, joining multi-line string lists
    pub fn html(&self) -> Option<String> {
        match self.data.as_ref()?.get("text/html")? {
            Value::String(s) => Some(s.clone()),
            Value::Array(lines) => lines
                .iter()
                .map(|line| line.as_str())
                .collect::<Option<Vec<_>>>()
                .map(|lines| lines.concat()),
            _ => None,
        }
    }
}

impl Notebook {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Cell by index; negative indices count from the end
    pub fn cell(&self, index: i64) -> Option<&Cell> {
        let len = self.cells.len() as i64;
        let resolved = if index < 0 { len + index } else { index };
        if (0..len).contains(&resolved) {
            self.cells.get(resolved as usize)
        } else {
            None
        }
    }

    /// HTML of the first output of a cell
    pub fn cell_html(&self, index: i64) -> InlineResult<String> {
        let cell = self.cell(index).ok_or(InlineError::MissingCell(index))?;
        let first = cell
            .outputs
            .as_ref()
            .and_then(|outputs| outputs.first())
            .ok_or(InlineError::NoOutputs(index))?;
        first.html().ok_or(InlineError::NoHtml(index))
    }
}
