//! Terminal host for the QuickNote core.
//!
//! # Responsibility
//! - Stand in for the page: read user gestures line by line, forward them
//!   to the app controller, print toasts and re-rendered state.
//! - Choose the storage medium and logging setup from command-line flags.

mod gesture;

use clap::Parser;
use gesture::{parse_gesture, Gesture, HELP};
use log::{error, info};
use quicknote_core::{
    default_log_level, init_logging, AppController, EventOutcome, FeatherIcons,
    KeyValueNotePersistence, KeyValueStorage, MemoryStorage, NoteStore, NotificationKind,
    Notifier, SqliteStorage, UiEvent, NOTES_STORAGE_KEY,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "quicknote")]
#[command(version, about = "Create, edit and delete short notes")]
struct Cli {
    /// SQLite file holding the notes; in-memory storage when omitted
    #[arg(long, value_name = "PATH")]
    db: Option<PathBuf>,

    /// Storage key for the serialized note collection
    #[arg(long, default_value = NOTES_STORAGE_KEY)]
    storage_key: String,

    /// Absolute directory for rolling log files; logging is off when omitted
    #[arg(long, value_name = "DIR")]
    log_dir: Option<String>,

    /// trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,
}

/// Prints toasts to stderr.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, kind: NotificationKind, message: &str) {
        let marker = match kind {
            NotificationKind::Success => "ok",
            NotificationKind::Warning => "!!",
        };
        eprintln!("[{marker}] {message}");
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("quicknote: {err}");
            return ExitCode::FAILURE;
        }
    }

    let result = match cli.db.as_ref() {
        Some(path) => match SqliteStorage::open(path) {
            Ok(storage) => run(storage, &cli.storage_key),
            Err(err) => {
                error!("event=host_start module=cli status=error error={err}");
                eprintln!("quicknote: cannot open {}: {err}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => run(MemoryStorage::new(), &cli.storage_key),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("quicknote: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run<S: KeyValueStorage>(storage: S, storage_key: &str) -> io::Result<()> {
    let store = NoteStore::new(KeyValueNotePersistence::with_key(storage, storage_key));
    let mut app =
        AppController::with_collaborators(store, Box::new(ConsoleNotifier), Box::new(FeatherIcons));
    info!(
        "event=host_start module=cli status=ok notes={}",
        app.store().len()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print_list(&mut stdout, &app)?;

    for line in stdin.lock().lines() {
        let gesture = match parse_gesture(&line?) {
            Ok(Some(gesture)) => gesture,
            Ok(None) => continue,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };

        let outcome = match gesture {
            Gesture::Ui(event) => app.handle(event),
            Gesture::Submit => {
                let form = app.modal().form().clone();
                app.handle(UiEvent::Submit(form))
            }
            Gesture::List => {
                print_list(&mut stdout, &app)?;
                continue;
            }
            Gesture::Render => {
                writeln!(stdout, "{}", app.render())?;
                continue;
            }
            Gesture::Reset => app.reset(),
            Gesture::Help => {
                writeln!(stdout, "{HELP}")?;
                continue;
            }
            Gesture::Quit => break,
        };

        report(&mut stdout, &app, &outcome)?;
    }

    info!("event=host_stop module=cli status=ok");
    Ok(())
}

fn report<S: KeyValueStorage>(
    out: &mut impl Write,
    app: &AppController<KeyValueNotePersistence<S>>,
    outcome: &EventOutcome,
) -> io::Result<()> {
    match outcome {
        EventOutcome::Ignored => Ok(()),
        EventOutcome::NoteCreated(_)
        | EventOutcome::NoteUpdated(_)
        | EventOutcome::NoteDeleted(_) => print_list(out, app),
        EventOutcome::ViewChanged | EventOutcome::Rejected => {
            let modal = app.modal();
            if modal.is_open() {
                let form = modal.form();
                writeln!(
                    out,
                    "[{}] title={:?} description={:?}",
                    modal.heading(),
                    form.title,
                    form.description
                )
            } else {
                print_list(out, app)
            }
        }
    }
}

fn print_list<S: KeyValueStorage>(
    out: &mut impl Write,
    app: &AppController<KeyValueNotePersistence<S>>,
) -> io::Result<()> {
    if app.store().is_empty() {
        return writeln!(out, "(no notes)");
    }
    for note in app.store().all() {
        let marker = if app.open_menu() == Some(note.id.as_str()) {
            " [edit|delete]"
        } else {
            ""
        };
        writeln!(
            out,
            "{}  {}  {} - {}{marker}",
            note.id, note.date, note.title, note.description
        )?;
    }
    Ok(())
}
