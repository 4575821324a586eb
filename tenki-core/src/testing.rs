//! Test utilities for tenki screens and components
//!
//! - [`key`]: Create a `KeyEvent` from a string (e.g., `key("ctrl+p")`)
//! - [`RenderHarness`]: Render into an in-memory terminal and read back plain text
//! - [`ActionAssertions`]: assertions over collected component actions

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::{Frame, Terminal};

/// Create a `KeyEvent` from a key string.
///
/// Supports `ctrl+`/`alt+`/`shift+` prefixes and named keys (`esc`, `enter`,
/// `up`, `down`, `left`, `right`, `tab`, `home`, `end`, `backspace`,
/// `f1`..`f12`) in addition to single characters.
///
/// # Panics
///
/// Panics if the key string cannot be parsed; this helper is for tests.
pub fn key(s: &str) -> KeyEvent {
    let mut modifiers = KeyModifiers::empty();
    let mut rest = s;
    loop {
        if let Some(tail) = rest.strip_prefix("ctrl+") {
            modifiers |= KeyModifiers::CONTROL;
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix("alt+") {
            modifiers |= KeyModifiers::ALT;
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix("shift+") {
            modifiers |= KeyModifiers::SHIFT;
            rest = tail;
        } else {
            break;
        }
    }

    let code = match rest {
        "esc" => KeyCode::Esc,
        "enter" => KeyCode::Enter,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "tab" => KeyCode::Tab,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "backspace" => KeyCode::Backspace,
        _ => {
            if let Some(n) = rest.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                KeyCode::F(n)
            } else {
                let mut chars = rest.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => panic!("Invalid key string: {:?}", s),
                }
            }
        }
    };

    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Create a `KeyEvent` for a character with no modifiers.
pub fn char_key(c: char) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::empty(),
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Create a `KeyEvent` for a character with Ctrl modifier.
pub fn ctrl_key(c: char) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::CONTROL,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Convert a buffer to plain text, one line per terminal row.
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let area = buffer.area();
    let mut out = String::new();
    for y in area.y..area.y + area.height {
        if y > area.y {
            out.push('\n');
        }
        for x in area.x..area.x + area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
    }
    out
}

/// Render harness over ratatui's `TestBackend`.
///
/// # Example
///
/// ```ignore
/// let mut harness = RenderHarness::new(60, 24);
/// let output = harness.render_to_string_plain(|frame| {
///     screen.render(frame, frame.area());
/// });
/// assert!(output.contains("Tokyo"));
/// ```
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    /// Create a harness with the given terminal dimensions.
    ///
    /// # Panics
    ///
    /// Panics if the in-memory terminal cannot be created; test-only code.
    pub fn new(width: u16, height: u16) -> Self {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .expect("failed to create test terminal");
        Self { terminal }
    }

    /// Run a render closure and return the resulting buffer as plain text.
    pub fn render_to_string_plain(&mut self, render: impl FnOnce(&mut Frame)) -> String {
        self.terminal.draw(render).expect("draw failed");
        buffer_to_string_plain(self.terminal.backend().buffer())
    }
}

/// Assertions over actions collected from `Component::handle_event`.
pub trait ActionAssertions<A> {
    fn assert_empty(&self);
    fn assert_count(&self, expected: usize);
    fn assert_first(&self, expected: A);
}

impl<A: PartialEq + std::fmt::Debug> ActionAssertions<A> for Vec<A> {
    fn assert_empty(&self) {
        assert!(self.is_empty(), "expected no actions, got: {:?}", self);
    }

    fn assert_count(&self, expected: usize) {
        assert_eq!(
            self.len(),
            expected,
            "expected {} actions, got: {:?}",
            expected,
            self
        );
    }

    fn assert_first(&self, expected: A) {
        assert_eq!(
            self.first(),
            Some(&expected),
            "expected first action {:?}, got: {:?}",
            expected,
            self
        );
    }
}
