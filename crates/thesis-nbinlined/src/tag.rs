// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Tag markup parsing

use crate::error::{InlineError, InlineResult};

/// A parsed `nbinlined` tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineTag {
    pub notebook: String,
    /// Cell index; negative values count from the end
    pub cell: i64,
    /// Literal `(match, replacement)` applied to the HTML
    pub substitution: Option<(String, String)>,
}

impl InlineTag {
    /// Parse the markup between the tag name and the closing `%}`
    ///
    /// ```
    /// use thesis_nbinlined::InlineTag;
    ///
    /// let tag = InlineTag::parse("Introducing_HoloViews.ipynb 48 <img | <img width='50%'").unwrap();
    /// assert_eq!(tag.cell, 48);
    /// assert_eq!(
    ///     tag.substitution,
    ///     Some(("<img ".to_string(), " <img width='50%'".to_string()))
    /// );
    /// ```
    pub fn parse(markup: &str) -> InlineResult<Self> {
        let words: Vec<&str> = markup.split_whitespace().collect();
        let (notebook, cell) = match words.as_slice() {
            [notebook, cell, ..] => (*notebook, *cell),
            _ => {
                return Err(InlineError::Syntax {
                    markup: markup.to_string(),
                })
            }
        };

        let cell = cell
            .parse::<i64>()
            .map_err(|_| InlineError::InvalidCellNumber(cell.to_string()))?;

        let substitution = if words.len() > 2 {
            let joined = words[2..].join(" ");
            let mut parts = joined.split('|');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(pattern), Some(replacement), None) => {
                    Some((pattern.to_string(), replacement.to_string()))
                }
                (_, None, _) => return Err(InlineError::MissingPipe),
                _ => {
                    return Err(InlineError::Syntax {
                        markup: markup.to_string(),
                    })
                }
            }
        } else {
            None
        };

        Ok(InlineTag {
            notebook: notebook.to_string(),
            cell,
            substitution,
        })
    }

    /// Apply the substitution (if any) to rendered HTML
    pub fn substitute(&self, html: &str) -> String {
        match &self.substitution {
            Some((pattern, replacement)) if !pattern.is_empty() => html.replace(pattern, replacement),
            _ => html.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_tag() {
        let tag = InlineTag::parse("  intro.ipynb   3 ").unwrap();
        assert_eq!(tag.notebook, "intro.ipynb");
        assert_eq!(tag.cell, 3);
        assert_eq!(tag.substitution, None);
    }

    #[test]
    fn test_too_few_words() {
        assert!(matches!(
            InlineTag::parse("intro.ipynb"),
            Err(InlineError::Syntax { .. })
        ));
    }

    #[test]
    fn test_cell_must_be_integer() {
        assert!(matches!(
            InlineTag::parse("intro.ipynb three"),
            Err(InlineError::InvalidCellNumber(s)) if s == "three"
        ));
    }

    #[test]
    fn test_substitution_requires_single_pipe() {
        assert!(matches!(
            InlineTag::parse("intro.ipynb 3 <img <svg"),
            Err(InlineError::MissingPipe)
        ));
        assert!(matches!(
            InlineTag::parse("intro.ipynb 3 a | b | c"),
            Err(InlineError::Syntax { .. })
        ));
    }

    #[test]
    fn test_substitute_is_literal() {
        let tag = InlineTag::parse("nb.ipynb 0 width='100%'|width='50%'").unwrap();
        assert_eq!(
            tag.substitute("<img width='100%'><img width='100%'>"),
            "<img width='50%'><img width='50%'>"
        );
    }
}
