//! Note collection use-case service.
//!
//! # Responsibility
//! - Provide create/update/delete/find APIs over the ordered collection.
//! - Persist the full collection after every successful mutation.
//!
//! # Invariants
//! - Insertion order is display order; edits keep a note's position.
//! - The in-memory collection only changes after storage accepted the write,
//!   so memory and storage never diverge.
//! - Failed validation never touches storage.
//! - Generated ids are unique within the loaded collection.

use crate::model::note::{format_note_date, Note, NoteDraft, NoteId, ValidationError};
use crate::service::providers::{Clock, IdGenerator, LocalClock, UuidIdGenerator};
use crate::storage::persistence::NotePersistence;
use crate::storage::StorageError;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Ids drawn per `create` before giving up on a colliding generator.
const MAX_ID_ATTEMPTS: usize = 64;

/// Service error for note mutations.
#[derive(Debug)]
pub enum NoteStoreError {
    /// Title or description is blank.
    Validation(ValidationError),
    /// Mutation target does not exist.
    NotFound(NoteId),
    /// Id generator kept returning ids already in the collection.
    DuplicateId(NoteId),
    /// Storage rejected the write; nothing changed.
    Storage(StorageError),
}

impl Display for NoteStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::DuplicateId(id) => write!(f, "generated note id already in use: {id}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) | Self::DuplicateId(_) => None,
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<ValidationError> for NoteStoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for NoteStoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// In-memory note collection synchronized with a persistence adapter.
pub struct NoteStore<P: NotePersistence> {
    persistence: P,
    notes: Vec<Note>,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
}

impl<P: NotePersistence> NoteStore<P> {
    /// Loads the persisted collection using UUID ids and the local clock.
    pub fn new(persistence: P) -> Self {
        Self::with_providers(
            persistence,
            Box::new(UuidIdGenerator),
            Box::new(LocalClock),
        )
    }

    /// Loads the persisted collection with explicit id/date providers.
    pub fn with_providers(
        persistence: P,
        ids: Box<dyn IdGenerator>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let notes = persistence.load();
        Self {
            persistence,
            notes,
            ids,
            clock,
        }
    }

    /// Creates one note and appends it to the collection.
    pub fn create(&mut self, title: &str, description: &str) -> Result<Note, NoteStoreError> {
        let draft = NoteDraft::parse(title, description).inspect_err(|err| {
            warn!("event=note_create module=store status=rejected reason={err}");
        })?;

        let note = Note::from_draft(
            self.fresh_id()?,
            format_note_date(self.clock.today()),
            draft,
        );
        let mut next = self.notes.clone();
        next.push(note.clone());
        self.commit(next)?;

        info!(
            "event=note_create module=store status=ok id={} count={}",
            note.id,
            self.notes.len()
        );
        Ok(note)
    }

    /// Replaces title/description of one note in place.
    ///
    /// `id`, `date` and position are preserved.
    pub fn update(
        &mut self,
        id: &str,
        title: &str,
        description: &str,
    ) -> Result<Note, NoteStoreError> {
        let draft = NoteDraft::parse(title, description).inspect_err(|err| {
            warn!("event=note_update module=store status=rejected id={id} reason={err}");
        })?;

        let Some(index) = self.position(id) else {
            warn!("event=note_update module=store status=not_found id={id}");
            return Err(NoteStoreError::NotFound(id.to_string()));
        };

        let mut next = self.notes.clone();
        next[index].apply_draft(draft);
        let updated = next[index].clone();
        self.commit(next)?;

        info!("event=note_update module=store status=ok id={id}");
        Ok(updated)
    }

    /// Removes one note; returns whether anything was removed.
    ///
    /// Deleting an unknown id is a no-op and does not write storage.
    pub fn delete(&mut self, id: &str) -> Result<bool, NoteStoreError> {
        if self.position(id).is_none() {
            info!("event=note_delete module=store status=noop id={id}");
            return Ok(false);
        }

        let next: Vec<Note> = self
            .notes
            .iter()
            .filter(|note| note.id != id)
            .cloned()
            .collect();
        self.commit(next)?;

        info!(
            "event=note_delete module=store status=ok id={id} count={}",
            self.notes.len()
        );
        Ok(true)
    }

    /// Removes every note and the stored value.
    pub fn clear(&mut self) -> Result<(), NoteStoreError> {
        self.persistence.clear()?;
        self.notes.clear();
        info!("event=note_clear module=store status=ok");
        Ok(())
    }

    /// Current collection in display order.
    pub fn all(&self) -> &[Note] {
        &self.notes
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Read-only access to the persistence adapter.
    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    fn fresh_id(&self) -> Result<NoteId, NoteStoreError> {
        let mut id = self.ids.new_id();
        for _ in 1..MAX_ID_ATTEMPTS {
            if self.position(&id).is_none() {
                return Ok(id);
            }
            debug!("event=note_create module=store status=retry reason=id_taken id={id}");
            id = self.ids.new_id();
        }
        if self.position(&id).is_none() {
            return Ok(id);
        }
        warn!("event=note_create module=store status=error reason=id_taken id={id}");
        Err(NoteStoreError::DuplicateId(id))
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.notes.iter().position(|note| note.id == id)
    }

    fn commit(&mut self, next: Vec<Note>) -> Result<(), NoteStoreError> {
        if let Err(err) = self.persistence.save(&next) {
            warn!("event=notes_save module=store status=error error={err}");
            return Err(err.into());
        }
        self.notes = next;
        Ok(())
    }
}
