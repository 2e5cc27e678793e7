//! Typed values of the note form.

use crate::model::note::{Note, NoteDraft, NoteId, ValidationError};

/// Editable field of the note form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
}

/// Snapshot of the note form as submitted by the host.
///
/// `date` and `note_id` mirror the hidden inputs filled when editing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteForm {
    pub title: String,
    pub description: String,
    pub date: Option<String>,
    pub note_id: Option<NoteId>,
}

impl NoteForm {
    /// Form pre-filled from an existing note.
    pub fn for_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            description: note.description.clone(),
            date: Some(note.date.clone()),
            note_id: Some(note.id.clone()),
        }
    }

    /// Form with only the visible fields set.
    pub fn with_text(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        match field {
            FormField::Title => self.title = value.into(),
            FormField::Description => self.description = value.into(),
        }
    }

    /// Validates the visible fields into a trimmed draft.
    pub fn draft(&self) -> Result<NoteDraft, ValidationError> {
        NoteDraft::parse(&self.title, &self.description)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
