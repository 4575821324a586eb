//! Scrollable selection list component
//!
//! Index-based: the owning screen supplies the rendered row text for each
//! index; this component only tracks the viewport and maps keys to selection
//! moves and activation.

use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};
use tenki_core::{Component, EventKind};

/// Props for SelectList component
pub struct SelectListProps<'a, A> {
    /// Rendered rows, one per index
    pub items: &'a [String],
    /// Currently selected index, if any (rows can be deselected)
    pub selected: Option<usize>,
    /// Whether this component has focus
    pub is_focused: bool,
    /// Callback to create action when the selection moves
    pub on_select: fn(usize) -> A,
    /// Callback to create action when a row is activated (Enter)
    pub on_activate: fn(usize) -> A,
}

/// A scrollable selection list with keyboard navigation
///
/// Handles j/k/up/down for navigation and enter for activation.
/// Renders with highlight on the selected item, if one is selected.
#[derive(Default)]
pub struct SelectList {
    /// Scroll offset for viewport
    scroll_offset: usize,
}

impl SelectList {
    /// Create a new SelectList
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure the selected index is visible within the viewport
    fn ensure_visible(&mut self, selected: usize, viewport_height: usize) {
        if viewport_height == 0 {
            return;
        }

        if selected < self.scroll_offset {
            self.scroll_offset = selected;
        } else if selected >= self.scroll_offset + viewport_height {
            self.scroll_offset = selected.saturating_sub(viewport_height - 1);
        }
    }
}

impl<A> Component<A> for SelectList {
    type Props<'a> = SelectListProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        if !props.is_focused || props.items.is_empty() {
            return None;
        }

        let len = props.items.len();

        match event {
            EventKind::Key(key) => match key.code {
                // Navigate down; a deselected list selects its first row
                KeyCode::Char('j') | KeyCode::Down => match props.selected {
                    None => Some((props.on_select)(0)),
                    Some(current) => {
                        let new_idx = (current + 1).min(len.saturating_sub(1));
                        if new_idx != current {
                            Some((props.on_select)(new_idx))
                        } else {
                            None
                        }
                    }
                },
                // Navigate up
                KeyCode::Char('k') | KeyCode::Up => match props.selected {
                    None => Some((props.on_select)(0)),
                    Some(current) => {
                        let new_idx = current.saturating_sub(1);
                        if new_idx != current {
                            Some((props.on_select)(new_idx))
                        } else {
                            None
                        }
                    }
                },
                // Jump to top
                KeyCode::Char('g') | KeyCode::Home => {
                    if props.selected != Some(0) {
                        Some((props.on_select)(0))
                    } else {
                        None
                    }
                }
                // Jump to bottom
                KeyCode::Char('G') | KeyCode::End => {
                    let last = len.saturating_sub(1);
                    if props.selected != Some(last) {
                        Some((props.on_select)(last))
                    } else {
                        None
                    }
                }
                // Activate current row
                KeyCode::Enter => props.selected.map(props.on_activate),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        // Calculate viewport height (area minus borders)
        let viewport_height = area.height.saturating_sub(2) as usize;

        // Ensure selected item is visible
        if let Some(selected) = props.selected {
            self.ensure_visible(selected, viewport_height);
        }

        // Build list items
        let items: Vec<ListItem> = props
            .items
            .iter()
            .map(|item| ListItem::new(Line::raw(item.as_str())))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(if props.is_focused {
                        Style::default().fg(Color::Cyan)
                    } else {
                        Style::default().fg(Color::DarkGray)
                    }),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD),
            );

        // Use ListState to handle scroll offset and optional selection
        let mut state = ListState::default().with_selected(props.selected);
        *state.offset_mut() = self.scroll_offset;

        frame.render_stateful_widget(list, area, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenki_core::testing::{key, RenderHarness};

    #[derive(Debug, Clone, PartialEq)]
    enum TestAction {
        Select(usize),
        Activate(usize),
    }

    fn make_items() -> Vec<String> {
        vec!["Item 0".into(), "Item 1".into(), "Item 2".into()]
    }

    fn props(items: &[String], selected: Option<usize>) -> SelectListProps<'_, TestAction> {
        SelectListProps {
            items,
            selected,
            is_focused: true,
            on_select: TestAction::Select,
            on_activate: TestAction::Activate,
        }
    }

    #[test]
    fn test_navigate_down() {
        let mut list = SelectList::new();
        let items = make_items();

        let actions: Vec<_> = list
            .handle_event(&EventKind::Key(key("j")), props(&items, Some(0)))
            .into_iter()
            .collect();

        assert_eq!(actions, vec![TestAction::Select(1)]);
    }

    #[test]
    fn test_navigate_up() {
        let mut list = SelectList::new();
        let items = make_items();

        let actions: Vec<_> = list
            .handle_event(&EventKind::Key(key("k")), props(&items, Some(2)))
            .into_iter()
            .collect();

        assert_eq!(actions, vec![TestAction::Select(1)]);
    }

    #[test]
    fn test_navigate_at_bounds() {
        let mut list = SelectList::new();
        let items = make_items();

        let actions: Vec<_> = list
            .handle_event(&EventKind::Key(key("k")), props(&items, Some(0)))
            .into_iter()
            .collect();
        assert!(actions.is_empty());

        let actions: Vec<_> = list
            .handle_event(&EventKind::Key(key("j")), props(&items, Some(2)))
            .into_iter()
            .collect();
        assert!(actions.is_empty());
    }

    #[test]
    fn test_deselected_list_selects_first_row() {
        let mut list = SelectList::new();
        let items = make_items();

        let actions: Vec<_> = list
            .handle_event(&EventKind::Key(key("j")), props(&items, None))
            .into_iter()
            .collect();

        assert_eq!(actions, vec![TestAction::Select(0)]);
    }

    #[test]
    fn test_enter_activates_selected_row() {
        let mut list = SelectList::new();
        let items = make_items();

        let actions: Vec<_> = list
            .handle_event(&EventKind::Key(key("enter")), props(&items, Some(1)))
            .into_iter()
            .collect();

        assert_eq!(actions, vec![TestAction::Activate(1)]);
    }

    #[test]
    fn test_enter_without_selection_is_ignored() {
        let mut list = SelectList::new();
        let items = make_items();

        let actions: Vec<_> = list
            .handle_event(&EventKind::Key(key("enter")), props(&items, None))
            .into_iter()
            .collect();

        assert!(actions.is_empty());
    }

    #[test]
    fn test_empty_list_ignores_keys() {
        let mut list = SelectList::new();
        let items: Vec<String> = vec![];

        let actions: Vec<_> = list
            .handle_event(&EventKind::Key(key("j")), props(&items, None))
            .into_iter()
            .collect();

        assert!(actions.is_empty());
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let mut list = SelectList::new();
        let items = make_items();
        let mut p = props(&items, Some(0));
        p.is_focused = false;

        let actions: Vec<_> = list
            .handle_event(&EventKind::Key(key("j")), p)
            .into_iter()
            .collect();

        assert!(actions.is_empty());
    }

    #[test]
    fn test_render_shows_rows() {
        let mut harness = RenderHarness::new(30, 8);
        let mut list = SelectList::new();
        let items = make_items();

        let output = harness.render_to_string_plain(|frame| {
            list.render(frame, frame.area(), props(&items, Some(1)));
        });

        assert!(output.contains("Item 0"));
        assert!(output.contains("Item 2"));
    }
}
