//! Domain model for notes.
//!
//! # Responsibility
//! - Define the canonical note record persisted by the storage layer.
//! - Own input validation rules shared by the store and the form boundary.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - Deletion is a hard removal from the collection.

pub mod note;
