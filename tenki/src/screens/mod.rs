//! Screens owned by the app's navigation stack
//!
//! A screen owns its view model, its stream subscriptions, and the render
//! state those subscriptions project into. Input reaches the top screen only;
//! the screen answers with an [`Outcome`] the app applies to the stack.

pub mod detail;
pub mod error_dialog;
pub mod list;

pub use detail::{DetailMsg, DetailScreen};
pub use list::{ListMsg, ListScreen};

use crate::model::AreaWeather;

/// What a screen wants the app to do after handling an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Nothing to do, no redraw needed.
    None,
    /// Redraw the screen.
    Render,
    /// Pop this screen off the stack.
    Pop,
    /// Push a detail screen seeded with this row.
    Push(AreaWeather),
    /// Quit the app.
    Quit,
}

/// Busy-indicator frames, advanced once per tick while loading.
pub const SPINNERS: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Tick period for spinner animation.
pub const SPINNER_TICK_MS: u64 = 120;

pub(crate) fn spinner_frame(tick_count: usize) -> &'static str {
    SPINNERS[tick_count % SPINNERS.len()]
}
