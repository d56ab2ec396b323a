//! Line-oriented stand-in for the list screen.

use std::io::{self, Write};

use favourites_core::{EditorRequest, EntryAction, EntryId, ViewState};
use sync_logging::sync_info;

use crate::overlay::LoadingIndicator;
use crate::ports::{Navigator, Notifier};

pub const HELP: &str = "commands: r | retry | o <id> | m <id> | d <id> | e <id> | a | done | q";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Refresh,
    Retry,
    Open(EntryId),
    Menu(EntryId),
    Delete(EntryId),
    Edit(EntryId),
    Add,
    EditorDone,
    Quit,
}

pub fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    let verb = parts.next()?;
    let id = parts.next().and_then(|raw| raw.parse::<EntryId>().ok());
    match (verb, id) {
        ("r", None) => Some(Command::Refresh),
        ("retry", None) => Some(Command::Retry),
        ("o", Some(id)) => Some(Command::Open(id)),
        ("m", Some(id)) => Some(Command::Menu(id)),
        ("d", Some(id)) => Some(Command::Delete(id)),
        ("e", Some(id)) => Some(Command::Edit(id)),
        ("a", None) => Some(Command::Add),
        ("done", None) => Some(Command::EditorDone),
        ("q", None) => Some(Command::Quit),
        _ => None,
    }
}

/// Text rendering of one view snapshot.
pub fn render(view: &ViewState) -> String {
    let mut lines = Vec::new();

    let mut flags = Vec::new();
    if view.loading_overlay {
        flags.push("loading");
    }
    if view.refreshing {
        flags.push("refreshing");
    }
    lines.push(if flags.is_empty() {
        format!("== Collected websites ({})", view.entries.len())
    } else {
        format!(
            "== Collected websites ({}) [{}]",
            view.entries.len(),
            flags.join(", ")
        )
    });

    if view.error_banner {
        lines.push("!! Could not load websites. Type `retry`.".to_string());
    }
    if view.empty_banner {
        lines.push("   (no collected websites)".to_string());
    }
    for entry in &view.entries {
        lines.push(format!(
            "{:>6}  {}  <{}>",
            entry.id,
            entry.display_name(),
            entry.link
        ));
    }

    lines.join("\n")
}

pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        println!("** {message}");
    }
}

pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn open_detail(&self, link: &str) {
        sync_info!("open detail {}", link);
        println!("-> opening {link}");
    }

    fn present_actions(&self, id: EntryId, actions: &[EntryAction]) {
        let choices: Vec<String> = actions
            .iter()
            .map(|action| {
                let verb = match action {
                    EntryAction::Delete => "d",
                    EntryAction::Edit => "e",
                };
                format!("{} ({verb} {id})", action.label())
            })
            .collect();
        println!("-> {}", choices.join(" | "));
    }

    fn open_editor(&self, request: &EditorRequest) {
        match request {
            EditorRequest::New => println!("-> editor: new website (type `done` when saved)"),
            EditorRequest::Edit(entry) => println!(
                "-> editor: {} <{}> (type `done` when saved)",
                entry.display_name(),
                entry.link
            ),
        }
    }
}

pub struct ConsoleIndicator;

impl LoadingIndicator for ConsoleIndicator {
    fn show(&self) {
        print!("[working...] ");
        let _ = io::stdout().flush();
    }

    fn dismiss(&self) {
        println!("[done]");
    }
}
