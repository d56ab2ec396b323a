pub mod config;
pub mod console;
pub mod logging;

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use favourites_core::EntryAction;
use favourites_engine::ReqwestSource;
use sync_logging::{sync_info, sync_warn};

use crate::controller::SyncController;
use crate::overlay::LoadingOverlay;
use crate::ports::Ports;
use config::{AppConfig, DEFAULT_CONFIG_FILENAME};
use console::{Command, ConsoleIndicator, ConsoleNavigator, ConsoleNotifier};

pub fn run_app() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILENAME));
    let config = AppConfig::load(&config_path)?;
    logging::initialize(config.log_destination);
    sync_info!("Starting against {}", config.base_url);

    let source = ReqwestSource::new(config.source_settings()).context("building http client")?;
    let ports = Ports {
        notifier: Arc::new(ConsoleNotifier),
        navigator: Arc::new(ConsoleNavigator),
        overlay: LoadingOverlay::new(ConsoleIndicator),
    };
    let mut controller =
        SyncController::new(Arc::new(source), ports).context("starting engine")?;

    let (line_tx, line_rx) = mpsc::channel::<String>();
    thread::spawn(move || forward_lines(io::stdin().lock(), &line_tx));

    println!("{}", console::HELP);
    controller.attach(|view| println!("{}", console::render(view)));

    // Poll input and remote completions on this thread only.
    let interval = Duration::from_millis(50);
    loop {
        controller.pump();
        let line = match line_rx.recv_timeout(interval) {
            Ok(line) => line,
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        };
        let Some(command) = console::parse_command(&line) else {
            if !line.trim().is_empty() {
                sync_warn!("Unrecognised input {:?}", line);
                println!("{}", console::HELP);
            }
            continue;
        };
        match command {
            Command::Refresh => controller.on_refresh_gesture(),
            Command::Retry => controller.on_error_retry(),
            Command::Open(id) => controller.on_entry_tapped(id),
            Command::Menu(id) => controller.on_entry_long_pressed(id),
            Command::Delete(id) => controller.on_entry_action(id, EntryAction::Delete),
            Command::Edit(id) => controller.on_entry_action(id, EntryAction::Edit),
            Command::Add => controller.on_add_gesture(),
            Command::EditorDone => controller.on_editor_completed(),
            Command::Quit => break,
        }
    }

    controller.on_teardown();
    sync_info!("Session closed");
    Ok(())
}

/// Feeds input lines to the poll loop until input ends or the loop is gone.
fn forward_lines(reader: impl BufRead, line_tx: &mpsc::Sender<String>) -> usize {
    let mut forwarded = 0;
    for line in reader.lines() {
        let Ok(line) = line else { break };
        if line_tx.send(line).is_err() {
            break;
        }
        forwarded += 1;
    }
    forwarded
}
