//! Terminal event plumbing
//!
//! A cancellable tokio task polls crossterm and forwards the events the
//! screens care about: key presses, resizes, and terminal focus regained
//! (the TUI analog of an app returning to the foreground).

use std::time::Duration;

use crossterm::event::{self, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// A terminal event after filtering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventKind {
    Key(KeyEvent),
    Resize(u16, u16),
    /// The terminal regained focus.
    FocusGained,
}

/// Map a crossterm event to an [`EventKind`], discarding the rest.
///
/// Key repeats and releases are filtered out; only presses reach the screens.
pub fn map_terminal_event(evt: event::Event) -> Option<EventKind> {
    match evt {
        event::Event::Key(key) if key.kind == KeyEventKind::Press => Some(EventKind::Key(key)),
        event::Event::Resize(width, height) => Some(EventKind::Resize(width, height)),
        event::Event::FocusGained => Some(EventKind::FocusGained),
        _ => None,
    }
}

/// Spawn the event polling task with cancellation support
///
/// Polls for crossterm events and sends them through the provided channel
/// until the token is cancelled.
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<EventKind>,
    poll_timeout: Duration,
    loop_sleep: Duration,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        const MAX_EVENTS_PER_BATCH: usize = 20;

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    info!("Event poller cancelled, draining buffer");
                    // Drain any remaining events from crossterm buffer before exiting
                    while event::poll(Duration::ZERO).unwrap_or(false) {
                        let _ = event::read();
                    }
                    break;
                }
                _ = tokio::time::sleep(loop_sleep) => {
                    // Process up to MAX_EVENTS_PER_BATCH events per iteration
                    let mut events_processed = 0;
                    while events_processed < MAX_EVENTS_PER_BATCH
                        && event::poll(poll_timeout).unwrap_or(false)
                    {
                        events_processed += 1;
                        if let Ok(evt) = event::read() {
                            if let Some(kind) = map_terminal_event(evt) {
                                if tx.send(kind).is_err() {
                                    debug!("Event channel closed, stopping poller");
                                    return;
                                }
                            }
                        }
                    }
                }
            }
        }
    })
}
