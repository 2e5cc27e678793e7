//! Core use-case services.
//!
//! # Responsibility
//! - Own the in-memory note collection and keep it equal to storage.
//! - Keep UI/host layers decoupled from storage details.

pub mod note_store;
pub mod providers;
