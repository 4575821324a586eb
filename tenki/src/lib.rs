//! tenki - area weather lookup TUI
//!
//! Screens display weather for a set of named areas, driven by observable
//! view-model state:
//!
//! 1. A view model exposes loading / data / error streams and a fetch method
//! 2. Screens subscribe at construction and project emissions onto render state
//! 3. Every emission crosses onto the UI loop through a `UiHandle` first
//! 4. The list screen navigates to a detail screen seeded with the selected
//!    row's already-fetched weather; no re-fetch on navigation

pub mod app;
pub mod icons;
pub mod l10n;
pub mod model;
pub mod screens;
pub mod viewmodel;
pub mod vm;
