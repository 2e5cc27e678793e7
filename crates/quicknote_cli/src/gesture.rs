//! Parsing of host input lines into UI events.

use quicknote_core::{FormField, Key, UiEvent};

/// One line of host input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    Ui(UiEvent),
    /// Submit the modal's current form values.
    Submit,
    List,
    Render,
    Reset,
    Help,
    Quit,
}

pub const HELP: &str = "\
new | close | esc | key <name> | overlay | done
more <id> | edit <id> | delete <id>
title <text> | description <text> | submit
list | render | reset | help | quit";

/// Parses one input line; blank lines yield `Ok(None)`.
pub fn parse_gesture(line: &str) -> Result<Option<Gesture>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let gesture = match command.to_ascii_lowercase().as_str() {
        "new" => Gesture::Ui(UiEvent::CreateClicked),
        "close" => Gesture::Ui(UiEvent::CloseClicked),
        "esc" => Gesture::Ui(UiEvent::KeyDown(Key::Escape)),
        "key" => Gesture::Ui(UiEvent::KeyDown(Key::Other(required(command, rest)?))),
        "overlay" => Gesture::Ui(UiEvent::OverlayClicked),
        "done" => Gesture::Ui(UiEvent::TransitionEnded),
        "more" => Gesture::Ui(UiEvent::MoreClicked(required(command, rest)?)),
        "edit" => Gesture::Ui(UiEvent::EditClicked(required(command, rest)?)),
        "delete" => Gesture::Ui(UiEvent::DeleteClicked(required(command, rest)?)),
        "title" => Gesture::Ui(UiEvent::Input {
            field: FormField::Title,
            value: rest.to_string(),
        }),
        "description" => Gesture::Ui(UiEvent::Input {
            field: FormField::Description,
            value: rest.to_string(),
        }),
        "submit" => Gesture::Submit,
        "list" => Gesture::List,
        "render" => Gesture::Render,
        "reset" => Gesture::Reset,
        "help" => Gesture::Help,
        "quit" | "exit" => Gesture::Quit,
        other => return Err(format!("unknown command `{other}`; type `help`")),
    };
    Ok(Some(gesture))
}

fn required(command: &str, rest: &str) -> Result<String, String> {
    if rest.is_empty() {
        return Err(format!("`{command}` needs an argument"));
    }
    Ok(rest.to_string())
}
