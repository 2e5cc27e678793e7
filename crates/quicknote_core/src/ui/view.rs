//! Markup rendering for the notes page.
//!
//! # Responsibility
//! - Render the page skeleton, the note cards and the modal dialog.
//!
//! # Invariants
//! - Cards are rendered in collection order.
//! - Every user-provided string is HTML-escaped.

use crate::model::note::Note;
use crate::ui::icons::{Icon, IconRenderer};
use crate::ui::modal::{ModalController, ModalPhase};

const AUTHOR_URL: &str = "https://github.com/nagoev-alim";

/// Stateless renderer; call again after every state change.
pub struct NoteListView<'a> {
    icons: &'a dyn IconRenderer,
}

impl<'a> NoteListView<'a> {
    pub fn new(icons: &'a dyn IconRenderer) -> Self {
        Self { icons }
    }

    /// Renders the whole page for the given state.
    ///
    /// `open_menu` names the note whose action menu is expanded.
    pub fn render_page(
        &self,
        notes: &[Note],
        modal: &ModalController,
        open_menu: Option<&str>,
    ) -> String {
        let mut html = String::from("<div class='app-container'>\n<div class='notes'>\n");
        html.push_str("<h2 class='title'>Notes</h2>\n");
        html.push_str("<div class='main' data-notes=''>\n");
        html.push_str(&format!(
            "<div class='item item--add'><button data-create=''>{}</button><p>Add new note</p></div>\n",
            self.icons.icon_markup(Icon::Plus)
        ));
        html.push_str(&self.render_notes(notes, open_menu));
        html.push_str("</div>\n");
        html.push_str(&self.render_modal(modal));
        html.push_str("</div>\n");
        html.push_str(&format!(
            "<a class='app-author' href='{AUTHOR_URL}' target='_blank'>{}</a>\n",
            self.icons.icon_markup(Icon::Github)
        ));
        html.push_str("</div>\n");
        html
    }

    /// Renders one card per note.
    pub fn render_notes(&self, notes: &[Note], open_menu: Option<&str>) -> String {
        notes
            .iter()
            .map(|note| self.render_card(note, open_menu == Some(note.id.as_str())))
            .collect()
    }

    fn render_card(&self, note: &Note, menu_open: bool) -> String {
        let id = escape_html(&note.id);
        let buttons_class = if menu_open { "buttons show" } else { "buttons" };
        format!(
            "<div class='item' data-note='{id}'>\
             <h4>{title}</h4>\
             <p>{description}</p>\
             <div class='footer'>\
             <p class='date'>{date}</p>\
             <div class='action'>\
             <button data-more='{id}'>{more}</button>\
             <div class='{buttons_class}'>\
             <button data-edit='{id}'>{edit}Edit</button>\
             <button data-trash='{id}'>{trash}Delete</button>\
             </div></div></div></div>\n",
            title = escape_html(&note.title),
            description = escape_html(&note.description),
            date = escape_html(&note.date),
            more = self.icons.icon_markup(Icon::MoreHorizontal),
            edit = self.icons.icon_markup(Icon::Edit),
            trash = self.icons.icon_markup(Icon::Trash),
        )
    }

    fn render_modal(&self, modal: &ModalController) -> String {
        let overlay_class = match modal.phase() {
            ModalPhase::Hidden => "overlay",
            ModalPhase::Open => "overlay open",
            ModalPhase::Closing => "overlay open hidden",
        };
        let form = modal.form();
        format!(
            "<div class='{overlay_class}' data-overlay=''>\
             <div class='modal'>\
             <h2 class='h4' data-heading=''>{heading}</h2>\
             <button class='close' data-close=''>{close}</button>\
             <form data-form=''>\
             <input type='text' class='visually-hidden' name='date' value='{date}'>\
             <input type='text' class='visually-hidden' name='noteid' value='{note_id}'>\
             <label><span>Title</span><input type='text' name='title' value='{title}'></label>\
             <label><span>Description</span><textarea name='description'>{description}</textarea></label>\
             <button type='submit'>{submit}</button>\
             </form></div></div>\n",
            heading = modal.heading(),
            close = self.icons.icon_markup(Icon::Close),
            date = escape_html(form.date.as_deref().unwrap_or_default()),
            note_id = escape_html(form.note_id.as_deref().unwrap_or_default()),
            title = escape_html(&form.title),
            description = escape_html(&form.description),
            submit = modal.submit_label(),
        )
    }
}

/// Escapes text for use in element content and single/double quoted attributes.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
