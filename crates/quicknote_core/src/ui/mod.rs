//! Presentation state and markup for the notes page.
//!
//! # Responsibility
//! - Hold the single shared modal's mode and form values.
//! - Render the page and note cards as markup strings.
//! - Define the icon and notification collaborators the UI depends on.
//!
//! # Invariants
//! - Rendering is a pure function of notes, modal state and open menu.

pub mod form;
pub mod icons;
pub mod modal;
pub mod notify;
pub mod view;
