//! Core domain logic for QuickNote.
//! Owns the note collection, its persistence, and the note dialog state;
//! hosts feed UI events in and render the returned markup.

pub mod app;
pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod storage;
pub mod ui;

pub use app::{AppController, EventOutcome, Key, UiEvent};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{format_note_date, Note, NoteDraft, NoteId, ValidationError};
pub use service::note_store::{NoteStore, NoteStoreError};
pub use service::providers::{
    Clock, FixedClock, IdGenerator, LocalClock, SequentialIdGenerator, UuidIdGenerator,
};
pub use storage::kv::{KeyValueStorage, MemoryStorage, SqliteStorage};
pub use storage::persistence::{KeyValueNotePersistence, NotePersistence, NOTES_STORAGE_KEY};
pub use storage::{StorageError, StorageResult};
pub use ui::form::{FormField, NoteForm};
pub use ui::icons::{FeatherIcons, Icon, IconRenderer};
pub use ui::modal::{ModalController, ModalError, ModalPhase, ModalState, SubmitTarget};
pub use ui::notify::{LogNotifier, NotificationKind, Notifier, RecordingNotifier};
pub use ui::view::NoteListView;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
