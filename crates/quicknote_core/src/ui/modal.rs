//! Modal dialog state machine.
//!
//! # Responsibility
//! - Track whether the shared note dialog is closed or open for create/edit.
//! - Own the form values shown by the dialog.
//! - Track the cosmetic closing phase separately from the logical state.
//!
//! # Invariants
//! - Submission routing is derived only from `ModalState`; there is exactly
//!   one submit entry point.
//! - The visual phase never influences `ModalState`. A stale
//!   `finish_close_transition` after a re-open is ignored.

use crate::model::note::{Note, NoteId};
use crate::ui::form::NoteForm;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const CREATE_HEADING: &str = "Add new note";
pub const CREATE_SUBMIT_LABEL: &str = "Add Note";
pub const EDIT_HEADING: &str = "Update note";
pub const EDIT_SUBMIT_LABEL: &str = "Update note";

/// Logical mode of the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    OpenForCreate,
    OpenForEdit(NoteId),
}

/// Presentation phase of the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    /// Neutral hidden state.
    Hidden,
    /// Fully visible.
    Open,
    /// Closing animation running; logically already closed.
    Closing,
}

/// What a submit should do in the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitTarget {
    Create,
    Update(NoteId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalError {
    /// Open requested while the dialog already shows a form.
    AlreadyOpen(ModalState),
}

impl Display for ModalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyOpen(state) => write!(f, "modal already open: {state:?}"),
        }
    }
}

impl Error for ModalError {}

/// State machine for the single shared note dialog.
#[derive(Debug, Clone)]
pub struct ModalController {
    state: ModalState,
    phase: ModalPhase,
    form: NoteForm,
}

impl Default for ModalController {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalController {
    pub fn new() -> Self {
        Self {
            state: ModalState::Closed,
            phase: ModalPhase::Hidden,
            form: NoteForm::default(),
        }
    }

    /// `Closed -> OpenForCreate` with an empty form.
    pub fn open_for_create(&mut self) -> Result<(), ModalError> {
        self.ensure_closed()?;
        self.form.reset();
        self.transition(ModalState::OpenForCreate);
        Ok(())
    }

    /// `Closed -> OpenForEdit(id)` with the form pre-filled from `note`.
    pub fn open_for_edit(&mut self, note: &Note) -> Result<(), ModalError> {
        self.ensure_closed()?;
        self.form = NoteForm::for_note(note);
        self.transition(ModalState::OpenForEdit(note.id.clone()));
        Ok(())
    }

    /// Any state -> `Closed`; starts the closing animation when visible.
    pub fn close(&mut self) {
        if self.phase == ModalPhase::Open {
            self.phase = ModalPhase::Closing;
        }
        if self.state != ModalState::Closed {
            self.transition(ModalState::Closed);
        }
    }

    /// Animation-end callback: returns to the neutral hidden state.
    ///
    /// Returns `false` when no closing transition was running.
    pub fn finish_close_transition(&mut self) -> bool {
        if self.phase != ModalPhase::Closing || self.state != ModalState::Closed {
            return false;
        }
        self.phase = ModalPhase::Hidden;
        self.form.reset();
        true
    }

    /// Routing for the single submit entry point.
    pub fn submit_target(&self) -> Option<SubmitTarget> {
        match &self.state {
            ModalState::Closed => None,
            ModalState::OpenForCreate => Some(SubmitTarget::Create),
            ModalState::OpenForEdit(id) => Some(SubmitTarget::Update(id.clone())),
        }
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.state != ModalState::Closed
    }

    pub fn form(&self) -> &NoteForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut NoteForm {
        &mut self.form
    }

    pub fn heading(&self) -> &'static str {
        match self.state {
            ModalState::OpenForEdit(_) => EDIT_HEADING,
            _ => CREATE_HEADING,
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.state {
            ModalState::OpenForEdit(_) => EDIT_SUBMIT_LABEL,
            _ => CREATE_SUBMIT_LABEL,
        }
    }

    fn ensure_closed(&self) -> Result<(), ModalError> {
        if self.is_open() {
            return Err(ModalError::AlreadyOpen(self.state.clone()));
        }
        Ok(())
    }

    fn transition(&mut self, next: ModalState) {
        debug!(
            "event=modal_transition module=ui from={:?} to={:?}",
            self.state, next
        );
        if next != ModalState::Closed {
            self.phase = ModalPhase::Open;
        }
        self.state = next;
    }
}
