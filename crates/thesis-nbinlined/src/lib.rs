// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Notebook Cell Inlining
//!
//! Expands `{% nbinlined notebook cell_no [ match | replacement ] %}` tags in
//! blog sources into the HTML output of the referenced notebook cell.
//!
//! Notebooks are looked up under `<content_dir>/<notebook_dir>/` and must be
//! nbformat 4 JSON. The first output of the cell must carry `text/html`.
//!
//! ```rust,no_run
//! use thesis_nbinlined::NotebookInliner;
//!
//! let inliner = NotebookInliner::new("content", "notebooks");
//! let html = inliner.render("Introducing_HoloViews.ipynb 48 <img | <img width='50%'")?;
//! # Ok::<(), thesis_nbinlined::InlineError>(())
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod notebook;
pub mod tag;

pub use error::{InlineError, InlineResult};
pub use notebook::{Cell, Notebook, Output};
pub use tag::InlineTag;

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const TAG_NAME: &str = "nbinlined";
pub const SYNTAX: &str = "{% nbinlined notebook cell_no  [ match | replacement ] %}";

const TAG_OPEN: &str = "{%";
const TAG_CLOSE: &str = "%}";

/// Resolves tags against a notebook directory
#[derive(Debug, Clone)]
pub struct NotebookInliner {
    notebook_root: PathBuf,
}

impl NotebookInliner {
    pub fn new(content_dir: impl AsRef<Path>, notebook_dir: impl AsRef<Path>) -> Self {
        Self {
            notebook_root: content_dir.as_ref().join(notebook_dir),
        }
    }

    pub fn notebook_root(&self) -> &Path {
        &self.notebook_root
    }

    /// Render the markup of a single tag
    pub fn render(&self, markup: &str) -> InlineResult<String> {
        let tag = InlineTag::parse(markup)?;
        self.render_tag(&tag)
    }

    pub fn render_tag(&self, tag: &InlineTag) -> InlineResult<String> {
        let path = self.notebook_root.join(&tag.notebook);
        if !path.exists() {
            return Err(InlineError::NotebookNotFound(path));
        }
        let text = fs::read_to_string(&path).map_err(|source| InlineError::Io {
            path: path.clone(),
            source,
        })?;
        let notebook = Notebook::from_json(&text).map_err(|source| InlineError::Json {
            path: path.clone(),
            source,
        })?;

        let html = notebook.cell_html(tag.cell)?;
        debug!(
            "[NBINLINED] Inlined cell {} of {} ({} bytes)",
            tag.cell,
            path.display(),
            html.len()
        );
        Ok(tag.substitute(&html))
    }

    /// Replace every `nbinlined` tag in a document
    ///
    /// Other `{% ... %}` tags are left untouched.
    pub fn expand(&self, document: &str) -> InlineResult<String> {
        let mut out = String::with_capacity(document.len());
        let mut rest = document;
        let mut offset = 0;
        let mut expanded = 0usize;

        while let Some(start) = rest.find(TAG_OPEN) {
            let after_open = &rest[start + TAG_OPEN.len()..];
            let Some(markup) = after_open.trim_start().strip_prefix(TAG_NAME) else {
                out.push_str(&rest[..start + TAG_OPEN.len()]);
                offset += start + TAG_OPEN.len();
                rest = after_open;
                continue;
            };
            // Require a word boundary after the tag name
            if !markup.starts_with(char::is_whitespace) && !markup.starts_with(TAG_CLOSE) {
                out.push_str(&rest[..start + TAG_OPEN.len()]);
                offset += start + TAG_OPEN.len();
                rest = after_open;
                continue;
            }
            let end = markup
                .find(TAG_CLOSE)
                .ok_or(InlineError::Unterminated(offset + start))?;

            out.push_str(&rest[..start]);
            out.push_str(&self.render(&markup[..end])?);
            expanded += 1;

            let consumed = rest.len() - markup.len() + end + TAG_CLOSE.len();
            offset += consumed;
            rest = &rest[consumed..];
        }
        out.push_str(rest);

        if expanded > 0 {
            info!("[NBINLINED] Expanded {} tag(s)", expanded);
        }
        Ok(out)
    }
}
