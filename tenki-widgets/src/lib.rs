//! Reusable UI components for tenki
//!
//! - [`modal`]: dim-background modal overlay used for the error dialog
//! - [`select_list`]: index-based row list with keyboard navigation

pub mod modal;
pub mod select_list;

pub use modal::{centered_rect, render_modal, ModalStyle};
pub use select_list::{SelectList, SelectListProps};
