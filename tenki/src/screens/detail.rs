//! Detail screen: one area's weather
//!
//! Subscribed to its view model's three streams from construction, so the
//! replayed seed renders on the first frame. Fields without a value yet show
//! the placeholder; a failure opens the modal dialog and leaves every other
//! field exactly as it was.

use std::sync::Arc;

use chrono::Local;
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tenki_core::{EventKind, SubscriptionSet, UiHandle};
use tracing::debug;

use crate::icons;
use crate::l10n::tr;
use crate::model::{format_observed_at, Weather, PLACEHOLDER};
use crate::screens::{error_dialog, spinner_frame, Outcome};
use crate::viewmodel::WeatherViewModel;

/// Stream emissions projected onto the UI loop.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailMsg {
    Loading(bool),
    Weather(Option<Weather>),
    Failed(String),
}

pub struct DetailScreen {
    vm: Arc<dyn WeatherViewModel>,
    subs: SubscriptionSet,
    loading: bool,
    weather: Option<Weather>,
    error: Option<String>,
    tick_count: usize,
}

impl DetailScreen {
    /// Subscribes to all three streams before anything can render, so the
    /// current loading flag and weather are replayed into place immediately.
    pub fn new(vm: Arc<dyn WeatherViewModel>, ui: &UiHandle<DetailMsg>) -> Self {
        let mut subs = SubscriptionSet::new();
        subs.insert(vm.loading().observe_on(ui, |v| DetailMsg::Loading(*v)));
        subs.insert(vm.weather().observe_on(ui, |w| DetailMsg::Weather(w.clone())));
        subs.insert(vm.errors().observe_on(ui, |e| DetailMsg::Failed(e.clone())));

        Self {
            vm,
            subs,
            loading: false,
            weather: None,
            error: None,
            tick_count: 0,
        }
    }

    /// Apply a projected emission. Returns whether a redraw is needed.
    pub fn update(&mut self, msg: DetailMsg) -> bool {
        match msg {
            DetailMsg::Loading(loading) => {
                self.loading = loading;
                true
            }
            DetailMsg::Weather(weather) => {
                let changed = self.weather != weather;
                self.weather = weather;
                changed
            }
            DetailMsg::Failed(detail) => {
                debug!(detail, "Showing error dialog");
                self.error = Some(detail);
                true
            }
        }
    }

    /// Advance the busy indicator. Returns whether a redraw is needed.
    pub fn tick(&mut self) -> bool {
        if self.loading {
            self.tick_count += 1;
        }
        self.loading
    }

    pub fn handle_event(&mut self, event: &EventKind) -> Outcome {
        // An open dialog captures all keys; enter or esc dismisses it.
        if self.error.is_some() {
            if let EventKind::Key(key) = event {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                    self.error = None;
                    return Outcome::Render;
                }
                return Outcome::None;
            }
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('r') | KeyCode::F(5) => {
                    if !self.loading {
                        self.vm.request_weather(Local::now());
                    }
                    Outcome::None
                }
                KeyCode::Esc | KeyCode::Char('q') => Outcome::Pop,
                _ => Outcome::None,
            },
            // Terminal regained focus; refresh what the user is looking at.
            EventKind::FocusGained => {
                if !self.loading {
                    self.vm.request_weather(Local::now());
                }
                Outcome::None
            }
            _ => Outcome::None,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = if self.loading {
            format!(" {} {} ", self.vm.area().name(), spinner_frame(self.tick_count))
        } else {
            format!(" {} ", self.vm.area().name())
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        let (art, condition, temps, observed) = match &self.weather {
            Some(w) => (
                icons::art(w.condition),
                w.condition.label().to_string(),
                format!("High {}   Low {}", w.max_temperature, w.min_temperature),
                format_observed_at(&w.observed_at),
            ),
            None => (
                ["", "", ""],
                PLACEHOLDER.to_string(),
                format!("High {PLACEHOLDER}   Low {PLACEHOLDER}"),
                PLACEHOLDER.to_string(),
            ),
        };

        let art_lines: Vec<Line> = art.iter().map(|l| Line::raw(*l)).collect();
        frame.render_widget(
            Paragraph::new(art_lines)
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center),
            rows[1],
        );
        frame.render_widget(
            Paragraph::new(condition).alignment(Alignment::Center),
            rows[2],
        );
        frame.render_widget(Paragraph::new(temps).alignment(Alignment::Center), rows[3]);
        frame.render_widget(
            Paragraph::new(observed)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            rows[4],
        );

        let hint = if self.loading {
            format!("{} {}", spinner_frame(self.tick_count), tr("detail.loading"))
        } else {
            tr("detail.hint").to_string()
        };
        frame.render_widget(
            Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
            rows[6],
        );

        if let Some(detail) = &self.error {
            error_dialog::render_error_dialog(frame, detail);
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn current_weather(&self) -> Option<&Weather> {
        self.weather.as_ref()
    }

    pub fn error_shown(&self) -> bool {
        self.error.is_some()
    }

    pub fn subscription_count(&self) -> usize {
        self.subs.len()
    }
}
