//! Modal error dialog shared by both screens
//!
//! Error events carry the underlying failure description, but the dialog
//! shows a fixed generic message; the raw description goes to the log only.
//! Flip [`SHOW_ERROR_DETAIL`] during development to surface it.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tenki_widgets::{centered_rect, render_modal, ModalStyle};

use crate::l10n::tr;

/// Whether the dialog shows the underlying failure description.
pub const SHOW_ERROR_DETAIL: bool = false;

/// The message the dialog presents for a given failure description.
pub fn display_message(detail: &str) -> &str {
    if SHOW_ERROR_DETAIL {
        detail
    } else {
        tr("error.generic")
    }
}

/// Draw the dialog over whatever is already in the frame.
pub fn render_error_dialog(frame: &mut Frame, detail: &str) {
    let area = centered_rect(48, 7, frame.area());
    render_modal(frame, area, &ModalStyle::with_bg(Color::Rgb(40, 20, 20)));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(format!(" {} ", tr("error.title")));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    frame.render_widget(
        Paragraph::new(display_message(detail))
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new(tr("error.ack"))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        rows[1],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenki_core::testing::RenderHarness;

    #[test]
    fn test_generic_message_replaces_detail() {
        assert_eq!(display_message("connection refused"), tr("error.generic"));
    }

    #[test]
    fn test_dialog_hides_raw_detail() {
        let mut harness = RenderHarness::new(80, 24);
        let output = harness.render_to_string_plain(|frame| {
            render_error_dialog(frame, "connection refused");
        });

        assert!(output.contains(tr("error.title")));
        assert!(output.contains("Something went wrong"));
        assert!(!output.contains("connection refused"));
    }
}
