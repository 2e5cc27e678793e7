//! Application controller for the notes page.
//!
//! # Responsibility
//! - Own the note store, the modal controller and UI collaborators.
//! - Translate typed UI events into store/modal operations.
//! - Report outcomes through the notifier and expose the rendered page.
//!
//! # Invariants
//! - A submit is routed only by the modal's current state.
//! - Failed submits leave both the modal state and storage unchanged.
//! - Events never panic; every error ends as a notification.

use crate::model::note::{Note, NoteId};
use crate::service::note_store::{NoteStore, NoteStoreError};
use crate::storage::persistence::NotePersistence;
use crate::ui::form::{FormField, NoteForm};
use crate::ui::icons::{FeatherIcons, IconRenderer};
use crate::ui::modal::{ModalController, SubmitTarget};
use crate::ui::notify::{LogNotifier, NotificationKind, Notifier};
use crate::ui::view::NoteListView;
use log::{debug, warn};

pub const MSG_CREATED: &str = "The note has been successfully created.";
pub const MSG_UPDATED: &str = "The note has been successfully updated.";
pub const MSG_DELETED: &str = "The note has been successfully deleted.";
pub const MSG_EMPTY_FIELDS: &str = "Please fill the fields.";
pub const MSG_NOT_FOUND: &str = "The note could not be found.";
pub const MSG_SAVE_FAILED: &str = "The note could not be saved.";

/// Keyboard key reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other(String),
}

/// User gesture delivered by the host event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// "Add new note" card button.
    CreateClicked,
    /// Close button inside the modal.
    CloseClicked,
    /// Click on the overlay background itself.
    OverlayClicked,
    KeyDown(Key),
    /// Closing animation finished.
    TransitionEnded,
    /// Toggle the action menu of one card.
    MoreClicked(NoteId),
    EditClicked(NoteId),
    DeleteClicked(NoteId),
    /// Typing into a visible form field.
    Input { field: FormField, value: String },
    Submit(NoteForm),
}

/// Result of handling one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// Nothing changed.
    Ignored,
    /// Modal or menu state changed; re-render.
    ViewChanged,
    NoteCreated(Note),
    NoteUpdated(Note),
    NoteDeleted(NoteId),
    /// A user error was reported through the notifier.
    Rejected,
}

/// Single owner of all page state.
pub struct AppController<P: NotePersistence> {
    store: NoteStore<P>,
    modal: ModalController,
    notifier: Box<dyn Notifier>,
    icons: Box<dyn IconRenderer>,
    open_menu: Option<NoteId>,
}

impl<P: NotePersistence> AppController<P> {
    /// Uses log-backed notifications and feather icon placeholders.
    pub fn new(store: NoteStore<P>) -> Self {
        Self::with_collaborators(store, Box::new(LogNotifier), Box::new(FeatherIcons))
    }

    pub fn with_collaborators(
        store: NoteStore<P>,
        notifier: Box<dyn Notifier>,
        icons: Box<dyn IconRenderer>,
    ) -> Self {
        Self {
            store,
            modal: ModalController::new(),
            notifier,
            icons,
            open_menu: None,
        }
    }

    /// Dispatches one UI event.
    pub fn handle(&mut self, event: UiEvent) -> EventOutcome {
        debug!("event=ui_event module=app kind={event:?}");
        match event {
            UiEvent::CreateClicked => self.open_create(),
            UiEvent::CloseClicked | UiEvent::OverlayClicked | UiEvent::KeyDown(Key::Escape) => {
                self.close_modal()
            }
            UiEvent::KeyDown(Key::Other(_)) => EventOutcome::Ignored,
            UiEvent::TransitionEnded => {
                if self.modal.finish_close_transition() {
                    EventOutcome::ViewChanged
                } else {
                    EventOutcome::Ignored
                }
            }
            UiEvent::MoreClicked(id) => self.toggle_menu(id),
            UiEvent::EditClicked(id) => self.open_edit(&id),
            UiEvent::DeleteClicked(id) => self.delete(&id),
            UiEvent::Input { field, value } => {
                if !self.modal.is_open() {
                    return EventOutcome::Ignored;
                }
                self.modal.form_mut().set(field, value);
                EventOutcome::ViewChanged
            }
            UiEvent::Submit(form) => self.submit(form),
        }
    }

    /// Renders the page for the current state.
    pub fn render(&self) -> String {
        NoteListView::new(self.icons.as_ref()).render_page(
            self.store.all(),
            &self.modal,
            self.open_menu.as_deref(),
        )
    }

    pub fn store(&self) -> &NoteStore<P> {
        &self.store
    }

    pub fn modal(&self) -> &ModalController {
        &self.modal
    }

    pub fn open_menu(&self) -> Option<&str> {
        self.open_menu.as_deref()
    }

    /// Removes every note; used by hosts offering a reset gesture.
    pub fn reset(&mut self) -> EventOutcome {
        self.modal.close();
        self.open_menu = None;
        match self.store.clear() {
            Ok(()) => EventOutcome::ViewChanged,
            Err(err) => self.report(err),
        }
    }

    fn open_create(&mut self) -> EventOutcome {
        self.open_menu = None;
        match self.modal.open_for_create() {
            Ok(()) => EventOutcome::ViewChanged,
            Err(err) => {
                debug!("event=modal_open module=app status=ignored reason={err}");
                EventOutcome::Ignored
            }
        }
    }

    fn open_edit(&mut self, id: &str) -> EventOutcome {
        self.open_menu = None;
        let Some(note) = self.store.find_by_id(id) else {
            return self.report(NoteStoreError::NotFound(id.to_string()));
        };
        match self.modal.open_for_edit(note) {
            Ok(()) => EventOutcome::ViewChanged,
            Err(err) => {
                debug!("event=modal_open module=app status=ignored reason={err}");
                EventOutcome::Ignored
            }
        }
    }

    fn close_modal(&mut self) -> EventOutcome {
        if !self.modal.is_open() {
            return EventOutcome::Ignored;
        }
        self.modal.close();
        EventOutcome::ViewChanged
    }

    fn toggle_menu(&mut self, id: NoteId) -> EventOutcome {
        if self.open_menu.as_deref() == Some(id.as_str()) {
            self.open_menu = None;
        } else if self.store.find_by_id(&id).is_some() {
            self.open_menu = Some(id);
        } else {
            return EventOutcome::Ignored;
        }
        EventOutcome::ViewChanged
    }

    fn delete(&mut self, id: &str) -> EventOutcome {
        if self.open_menu.as_deref() == Some(id) {
            self.open_menu = None;
        }
        match self.store.delete(id) {
            Ok(true) => {
                self.notifier.notify(NotificationKind::Success, MSG_DELETED);
                EventOutcome::NoteDeleted(id.to_string())
            }
            Ok(false) => EventOutcome::Ignored,
            Err(err) => self.report(err),
        }
    }

    fn submit(&mut self, form: NoteForm) -> EventOutcome {
        let Some(target) = self.modal.submit_target() else {
            warn!("event=form_submit module=app status=ignored reason=modal_closed");
            return EventOutcome::Ignored;
        };

        // Keep what the user typed visible if the submit is rejected.
        self.modal.form_mut().title = form.title.clone();
        self.modal.form_mut().description = form.description.clone();

        let draft = match form.draft() {
            Ok(draft) => draft,
            Err(err) => return self.report(NoteStoreError::Validation(err)),
        };

        let result = match &target {
            SubmitTarget::Create => self
                .store
                .create(draft.title(), draft.description())
                .map(EventOutcome::NoteCreated),
            SubmitTarget::Update(id) => self
                .store
                .update(id, draft.title(), draft.description())
                .map(EventOutcome::NoteUpdated),
        };

        match result {
            Ok(outcome) => {
                let message = match target {
                    SubmitTarget::Create => MSG_CREATED,
                    SubmitTarget::Update(_) => MSG_UPDATED,
                };
                self.notifier.notify(NotificationKind::Success, message);
                self.modal.close();
                outcome
            }
            Err(err @ NoteStoreError::NotFound(_)) => {
                self.modal.close();
                self.report(err)
            }
            Err(err) => self.report(err),
        }
    }

    fn report(&self, err: NoteStoreError) -> EventOutcome {
        let message = match &err {
            NoteStoreError::Validation(_) => MSG_EMPTY_FIELDS,
            NoteStoreError::NotFound(_) => MSG_NOT_FOUND,
            NoteStoreError::DuplicateId(_) | NoteStoreError::Storage(_) => MSG_SAVE_FAILED,
        };
        warn!("event=user_error module=app error={err}");
        self.notifier.notify(NotificationKind::Warning, message);
        EventOutcome::Rejected
    }
}
