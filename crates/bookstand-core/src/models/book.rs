use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

/// Upper bound for every stored text field, title included.
pub const MAX_FIELD_LEN: usize = 80;

// ─── Book ───────────────────────────────────────────────────

/// A catalogue entry. The title is the record's identity: unique,
/// non-empty, and the key it is stored under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,

    /// Free-form text, not parsed as a calendar date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Book {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: None,
            publisher: None,
            date: None,
        }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Title: {}>", self.title)
    }
}

// ─── BookDraft ──────────────────────────────────────────────

/// Unvalidated form input: all four fields as they arrived, present or not.
/// `validate` is the only path from a draft to a `Book`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookDraft {
    pub title: Option<String>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub date: Option<String>,
}

impl BookDraft {
    pub fn validate(self) -> Result<Book> {
        let title = match self.title {
            Some(t) if !t.trim().is_empty() => t,
            _ => {
                return Err(CatalogError::Validation(
                    "title is required and must be non-empty".to_string(),
                ));
            }
        };

        check_len("title", &title)?;
        let author = check_optional("author", self.author)?;
        let publisher = check_optional("publisher", self.publisher)?;
        let date = check_optional("date", self.date)?;

        Ok(Book {
            title,
            author,
            publisher,
            date,
        })
    }
}

/// `new_title` of a rename goes through the same length/emptiness rules
/// as a draft title.
pub(crate) fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(CatalogError::Validation(
            "title is required and must be non-empty".to_string(),
        ));
    }
    check_len("title", title)
}

fn check_len(field: &str, value: &str) -> Result<()> {
    if value.chars().count() > MAX_FIELD_LEN {
        return Err(CatalogError::Validation(format!(
            "{field} exceeds {MAX_FIELD_LEN} characters"
        )));
    }
    Ok(())
}

fn check_optional(field: &str, value: Option<String>) -> Result<Option<String>> {
    match value {
        Some(v) => {
            check_len(field, &v)?;
            Ok(Some(v))
        }
        None => Ok(None),
    }
}
