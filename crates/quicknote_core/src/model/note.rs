//! Note domain model.
//!
//! # Responsibility
//! - Define the persisted note record and its stable identifier.
//! - Validate user drafts before they reach the note store.
//!
//! # Invariants
//! - `id` is unique within a collection and never changes after creation.
//! - `date` is captured once at creation and preserved across edits.
//! - `title` and `description` are stored trimmed and never empty.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier of a note within its collection.
///
/// Kept as a plain string because persisted ids may come from older
/// generators and are never parsed.
pub type NoteId = String;

/// Display format used for `Note::date`, e.g. `October 05, 2026`.
pub const NOTE_DATE_FORMAT: &str = "%B %d, %Y";

/// Canonical note record.
///
/// Field order matches the persisted JSON shape:
/// `{"title", "description", "date", "id"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Trimmed, non-empty heading.
    pub title: String,
    /// Trimmed, non-empty body text.
    pub description: String,
    /// Human-readable creation date.
    pub date: String,
    /// Stable id generated at creation.
    pub id: NoteId,
}

impl Note {
    /// Builds a note from an already validated draft.
    pub fn from_draft(id: impl Into<NoteId>, date: impl Into<String>, draft: NoteDraft) -> Self {
        Self {
            title: draft.title,
            description: draft.description,
            date: date.into(),
            id: id.into(),
        }
    }

    /// Replaces title/description while keeping `id` and `date`.
    pub fn apply_draft(&mut self, draft: NoteDraft) {
        self.title = draft.title;
        self.description = draft.description;
    }
}

/// Formats a calendar date the way notes display it.
pub fn format_note_date(date: NaiveDate) -> String {
    date.format(NOTE_DATE_FORMAT).to_string()
}

/// Validation failure for note title/description input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Title is empty after trimming.
    EmptyTitle,
    /// Description is empty after trimming.
    EmptyDescription,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "note title must not be empty"),
            Self::EmptyDescription => write!(f, "note description must not be empty"),
        }
    }
}

impl Error for ValidationError {}

/// Trimmed title/description pair that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    title: String,
    description: String,
}

impl NoteDraft {
    /// Trims both inputs and rejects empty values.
    ///
    /// Title is checked first, so `("", "")` reports `EmptyTitle`.
    pub fn parse(title: &str, description: &str) -> Result<Self, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let description = description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        Ok(Self {
            title: title.to_string(),
            description: description.to_string(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::{format_note_date, Note, NoteDraft, ValidationError};
    use chrono::NaiveDate;

    #[test]
    fn draft_trims_surrounding_whitespace() {
        let draft = NoteDraft::parse("  Buy milk ", "\t2% fat\n").unwrap();
        assert_eq!(draft.title(), "Buy milk");
        assert_eq!(draft.description(), "2% fat");
    }

    #[test]
    fn draft_rejects_blank_fields() {
        assert_eq!(
            NoteDraft::parse("", "x").unwrap_err(),
            ValidationError::EmptyTitle
        );
        assert_eq!(
            NoteDraft::parse("x", "   ").unwrap_err(),
            ValidationError::EmptyDescription
        );
        assert_eq!(
            NoteDraft::parse("  ", "  ").unwrap_err(),
            ValidationError::EmptyTitle
        );
    }

    #[test]
    fn date_uses_long_month_and_two_digit_day() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 5).unwrap();
        assert_eq!(format_note_date(date), "October 05, 2026");
    }

    #[test]
    fn apply_draft_keeps_identity_and_date() {
        let mut note = Note::from_draft(
            "n1",
            "October 16, 2026",
            NoteDraft::parse("a", "b").unwrap(),
        );
        note.apply_draft(NoteDraft::parse("c", "d").unwrap());
        assert_eq!(note.id, "n1");
        assert_eq!(note.date, "October 16, 2026");
        assert_eq!(note.title, "c");
        assert_eq!(note.description, "d");
    }

    #[test]
    fn serializes_with_persisted_field_names() {
        let note = Note::from_draft("n1", "October 16, 2026", NoteDraft::parse("t", "d").unwrap());
        let json = serde_json::to_string(&note).unwrap();
        assert_eq!(
            json,
            r#"{"title":"t","description":"d","date":"October 16, 2026","id":"n1"}"#
        );
    }
}
