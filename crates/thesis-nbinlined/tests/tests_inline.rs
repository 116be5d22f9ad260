//! End-to-end tests for tag expansion against notebooks on disk

use std::fs;
use std::path::Path;
use tempfile::tempdir;
use thesis_nbinlined::*;

const NOTEBOOK: &str = r#"{
  "nbformat": 4,
  "nbformat_minor": 1,
  "metadata": {"kernelspec": {"name": "python2"}},
  "cells": [
    {"cell_type": "code", "execution_count": 1, "metadata": {}, "source": ["hv.Image(data)"],
     "outputs": [{"output_type": "execute_result", "execution_count": 1, "metadata": {},
                  "data": {"text/html": ["<img src='a.png'>\n", "<img src='b.png'>"],
                           "text/plain": [":Image"]}}]},
    {"cell_type": "code", "execution_count": 2, "metadata": {}, "source": [], "outputs": []}
  ]
}"#;

fn write_notebook(content: &Path) {
    let dir = content.join("notebooks");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("Figures.ipynb"), NOTEBOOK).unwrap();
}

#[test]
fn test_expand_document_with_substitution() {
    let content = tempdir().unwrap();
    write_notebook(content.path());
    let inliner = NotebookInliner::new(content.path(), "notebooks");

    let document = "Intro\n\n{% nbinlined Figures.ipynb 0 <img | <img width='50%' %}\n\nOutro";
    let expanded = inliner.expand(document).unwrap();

    // Match and replacement keep the whitespace around the pipe
    assert_eq!(
        expanded,
        "Intro\n\n <img width='50%'src='a.png'>\n <img width='50%'src='b.png'>\n\nOutro"
    );
}

#[test]
fn test_expand_multiple_tags() {
    let content = tempdir().unwrap();
    write_notebook(content.path());
    let inliner = NotebookInliner::new(content.path(), "notebooks");

    let document = "{% nbinlined Figures.ipynb 0 %}|{% nbinlined Figures.ipynb -2 %}";
    let expanded = inliner.expand(document).unwrap();
    let html = "<img src='a.png'>\n<img src='b.png'>";
    assert_eq!(expanded, format!("{}|{}", html, html));
}

#[test]
fn test_cell_without_outputs() {
    let content = tempdir().unwrap();
    write_notebook(content.path());
    let inliner = NotebookInliner::new(content.path(), "notebooks");

    let err = inliner.render("Figures.ipynb 1").unwrap_err();
    assert!(matches!(err, InlineError::NoOutputs(1)));
    assert_eq!(err.to_string(), "Cell 1 lacks output");
}

#[test]
fn test_invalid_notebook_json() {
    let content = tempdir().unwrap();
    let dir = content.path().join("notebooks");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("broken.ipynb"), "{\"cells\": 3}").unwrap();

    let inliner = NotebookInliner::new(content.path(), "notebooks");
    assert!(matches!(
        inliner.render("broken.ipynb 0"),
        Err(InlineError::Json { .. })
    ));
}
