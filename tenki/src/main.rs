//! tenki - area weather lookup TUI
//!
//! The main loop owns the terminal and a message channel. Terminal events and
//! projected stream emissions both arrive on the loop; the app applies them
//! and the screen is redrawn only when something it shows changed.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tenki::app::{App, AppMsg};
use tenki::screens::SPINNER_TICK_MS;
use tenki::vm::OpenMeteoProvider;
use tenki_core::{spawn_event_poller, UiHandle};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Area weather lookup TUI
#[derive(Parser, Debug)]
#[command(name = "tenki")]
#[command(about = "Weather for a fixed set of areas, in the terminal")]
struct Args {
    /// Write logs to this file (off by default; the terminal is busy)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &PathBuf) -> io::Result<()> {
    let file = std::fs::File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(file)
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableFocusChange, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>) -> io::Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (msg_tx, mut msg_rx) = mpsc::unbounded_channel::<AppMsg>();

    let cancel = CancellationToken::new();
    let poller = spawn_event_poller(
        event_tx,
        Duration::from_millis(10),
        Duration::from_millis(10),
        cancel.clone(),
    );

    // Spinner tick, posted as an ordinary message
    let tick_tx = msg_tx.clone();
    let tick_cancel = cancel.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(SPINNER_TICK_MS));
        loop {
            tokio::select! {
                _ = tick_cancel.cancelled() => break,
                _ = interval.tick() => {
                    if tick_tx.send(AppMsg::Tick).is_err() {
                        break;
                    }
                }
            }
        }
    });

    let provider = Arc::new(OpenMeteoProvider::new());
    let mut app = App::new(provider, UiHandle::from_sender(msg_tx));

    terminal.draw(|frame| app.render(frame))?;

    while !app.should_quit() {
        let dirty = tokio::select! {
            Some(event) = event_rx.recv() => app.handle_event(&event),
            Some(msg) = msg_rx.recv() => app.update(msg),
            else => break,
        };

        if dirty {
            terminal.draw(|frame| app.render(frame))?;
        }
    }

    info!("Shutting down");
    cancel.cancel();
    let _ = poller.await;
    Ok(())
}
