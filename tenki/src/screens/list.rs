//! List screen: every area and its latest weather
//!
//! The root of the navigation stack. Activating a row pushes a detail screen
//! seeded with that row's already-fetched weather; nothing is re-fetched on
//! navigation.

use std::sync::Arc;

use chrono::Local;
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tenki_core::{Component, EventKind, SubscriptionSet, UiHandle};
use tenki_widgets::{SelectList, SelectListProps};
use tracing::debug;

use crate::icons;
use crate::l10n::tr;
use crate::model::{Area, AreaWeather, PLACEHOLDER};
use crate::screens::{error_dialog, spinner_frame, Outcome};
use crate::viewmodel::AreaWeatherListViewModel;

/// Stream emissions projected onto the UI loop.
#[derive(Debug, Clone, PartialEq)]
pub enum ListMsg {
    Loading(bool),
    Rows(Vec<AreaWeather>),
    Failed(String),
}

/// Row-level actions emitted by the embedded select list.
#[derive(Debug, Clone, Copy, PartialEq)]
enum RowAction {
    Select(usize),
    Activate(usize),
}

pub struct ListScreen {
    vm: Arc<dyn AreaWeatherListViewModel>,
    subs: SubscriptionSet,
    select: SelectList,
    rows: Vec<AreaWeather>,
    selected: Option<usize>,
    loading: bool,
    error: Option<String>,
    tick_count: usize,
}

impl ListScreen {
    pub fn new(vm: Arc<dyn AreaWeatherListViewModel>, ui: &UiHandle<ListMsg>) -> Self {
        let mut subs = SubscriptionSet::new();
        subs.insert(vm.loading().observe_on(ui, |v| ListMsg::Loading(*v)));
        subs.insert(vm.rows().observe_on(ui, |rows| ListMsg::Rows(rows.clone())));
        subs.insert(vm.errors().observe_on(ui, |e| ListMsg::Failed(e.clone())));

        Self {
            vm,
            subs,
            select: SelectList::new(),
            rows: Vec::new(),
            selected: None,
            loading: false,
            error: None,
            tick_count: 0,
        }
    }

    /// First presentation of the screen; kicks off the initial bulk fetch.
    pub fn on_appear(&self) {
        self.vm.request_area_weather(&Area::ALL, Local::now());
    }

    /// Apply a projected emission. Returns whether a redraw is needed.
    pub fn update(&mut self, msg: ListMsg) -> bool {
        match msg {
            ListMsg::Loading(loading) => {
                self.loading = loading;
                true
            }
            ListMsg::Rows(rows) => {
                // Each emission replaces the whole list; keep the selection
                // index in range.
                self.rows = rows;
                if let Some(selected) = self.selected {
                    if self.rows.is_empty() {
                        self.selected = None;
                    } else if selected >= self.rows.len() {
                        self.selected = Some(self.rows.len() - 1);
                    }
                }
                true
            }
            ListMsg::Failed(detail) => {
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

        let items = Self::row_texts(&self.rows);
        let actions: Vec<RowAction> = self
            .select
            .handle_event(
                event,
                SelectListProps {
                    items: &items,
                    selected: self.selected,
                    is_focused: true,
                    on_select: RowAction::Select,
                    on_activate: RowAction::Activate,
                },
            )
            .into_iter()
            .collect();

        if let Some(action) = actions.first() {
            match *action {
                RowAction::Select(index) => {
                    self.selected = Some(index);
                    return Outcome::Render;
                }
                RowAction::Activate(index) => {
                    let row = self.rows[index].clone();
                    self.selected = None;
                    return Outcome::Push(row);
                }
            }
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('r') | KeyCode::F(5) => {
                    if !self.loading {
                        self.vm.request_area_weather(&Area::ALL, Local::now());
                    }
                    Outcome::None
                }
                KeyCode::Esc | KeyCode::Char('q') => Outcome::Quit,
                _ => Outcome::None,
            },
            _ => Outcome::None,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = if self.loading {
            format!(" {} {} ", tr("list.title"), spinner_frame(self.tick_count))
        } else {
            format!(" {} ", tr("list.title"))
        };

        let rows_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(area);

        if self.rows.is_empty() {
            // Placeholder is shown only while the list has never been filled.
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(title);
            let inner = block.inner(rows_areas[0]);
            frame.render_widget(block, rows_areas[0]);
            frame.render_widget(
                Paragraph::new(tr("list.empty"))
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center),
                inner,
            );
        } else {
            let items = Self::row_texts(&self.rows);
            self.select.render(
                frame,
                rows_areas[0],
                SelectListProps::<RowAction> {
                    items: &items,
                    selected: self.selected,
                    is_focused: true,
                    on_select: RowAction::Select,
                    on_activate: RowAction::Activate,
                },
            );
            // The select list draws its own border; overlay the title.
            frame.render_widget(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(title),
                Rect {
                    height: 1,
                    ..rows_areas[0]
                },
            );
        }

        let hint = if self.loading {
            format!("{} {}", spinner_frame(self.tick_count), tr("list.refreshing"))
        } else {
            tr("list.hint").to_string()
        };
        frame.render_widget(
            Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
            rows_areas[1],
        );

        if let Some(detail) = &self.error {
            error_dialog::render_error_dialog(frame, detail);
        }
    }

    fn row_texts(rows: &[AreaWeather]) -> Vec<String> {
        rows.iter().map(Self::row_text).collect()
    }

    fn row_text(row: &AreaWeather) -> String {
        match &row.weather {
            Some(w) => format!(
                "{:<10} {} {:<7} {}/{}",
                row.area.name(),
                icons::glyph(w.condition),
                w.condition.label(),
                w.max_temperature,
                w.min_temperature,
            ),
            None => format!(
                "{:<10} {:<9} {PLACEHOLDER}/{PLACEHOLDER}",
                row.area.name(),
                PLACEHOLDER,
            ),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error_shown(&self) -> bool {
        self.error.is_some()
    }

    pub fn subscription_count(&self) -> usize {
        self.subs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Condition, Weather};
    use chrono::{DateTime, TimeZone};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tenki_core::testing::{key, RenderHarness};
    use tenki_core::{EventStream, StateStream};
    use tokio::sync::mpsc;

    struct FakeListVm {
        loading: StateStream<bool>,
        rows: StateStream<Vec<AreaWeather>>,
        errors: EventStream<String>,
        fetches: AtomicUsize,
    }

    impl FakeListVm {
        fn new() -> Self {
            Self {
                loading: StateStream::new(false),
                rows: StateStream::new(Vec::new()),
                errors: EventStream::new(),
                fetches: AtomicUsize::new(0),
            }
        }
    }

    impl AreaWeatherListViewModel for FakeListVm {
        fn loading(&self) -> &StateStream<bool> {
            &self.loading
        }
        fn rows(&self) -> &StateStream<Vec<AreaWeather>> {
            &self.rows
        }
        fn errors(&self) -> &EventStream<String> {
            &self.errors
        }
        fn request_area_weather(&self, _areas: &[Area], _at: DateTime<Local>) {
            self.fetches.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn sunny() -> Weather {
        Weather {
            condition: Condition::Sunny,
            min_temperature: 10,
            max_temperature: 20,
            observed_at: Local.with_ymd_and_hms(2024, 1, 5, 9, 0, 0).unwrap(),
        }
    }

    fn filled_rows() -> Vec<AreaWeather> {
        Area::ALL
            .iter()
            .map(|&area| AreaWeather {
                area,
                weather: Some(sunny()),
            })
            .collect()
    }

    fn screen() -> (
        Arc<FakeListVm>,
        ListScreen,
        mpsc::UnboundedReceiver<ListMsg>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let ui = UiHandle::from_sender(tx);
        let vm = Arc::new(FakeListVm::new());
        let vm_dyn: Arc<dyn AreaWeatherListViewModel> = vm.clone();
        let screen = ListScreen::new(vm_dyn, &ui);
        (vm, screen, rx)
    }

    fn pump(screen: &mut ListScreen, rx: &mut mpsc::UnboundedReceiver<ListMsg>) {
        while let Ok(msg) = rx.try_recv() {
            screen.update(msg);
        }
    }

    #[test]
    fn test_on_appear_requests_initial_fetch() {
        let (vm, screen, _rx) = screen();
        screen.on_appear();
        assert_eq!(vm.fetches.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_empty_list_renders_placeholder() {
        let (_vm, mut screen, mut rx) = screen();
        pump(&mut screen, &mut rx);
        assert_eq!(screen.row_count(), 0);

        let mut harness = RenderHarness::new(60, 16);
        let output = harness.render_to_string_plain(|frame| screen.render(frame, frame.area()));

        assert!(output.contains("Nothing here yet"));
    }

    #[test]
    fn test_filled_list_renders_one_row_per_area() {
        let (vm, mut screen, mut rx) = screen();
        vm.rows.publish(filled_rows());
        pump(&mut screen, &mut rx);

        assert_eq!(screen.row_count(), Area::ALL.len());

        let mut harness = RenderHarness::new(60, 16);
        let output = harness.render_to_string_plain(|frame| screen.render(frame, frame.area()));

        assert!(output.contains("Tokyo"));
        assert!(output.contains("20/10"));
        assert!(!output.contains("Nothing here yet"));
    }

    #[test]
    fn test_row_without_weather_shows_placeholders() {
        let row = AreaWeather {
            area: Area::Naha,
            weather: None,
        };
        let text = ListScreen::row_text(&row);
        assert!(text.contains("Naha"));
        assert!(text.contains("--/--"));
    }

    #[test]
    fn test_activate_pushes_selected_row_and_deselects() {
        let (vm, mut screen, mut rx) = screen();
        vm.rows.publish(filled_rows());
        pump(&mut screen, &mut rx);

        screen.handle_event(&EventKind::Key(key("j")));
        screen.handle_event(&EventKind::Key(key("j")));
        let outcome = screen.handle_event(&EventKind::Key(key("enter")));

        let expected = AreaWeather {
            area: Area::Sendai,
            weather: Some(sunny()),
        };
        assert_eq!(outcome, Outcome::Push(expected));
        assert_eq!(screen.selected, None);
        // Navigation itself never fetches.
        assert_eq!(vm.fetches.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_enter_on_empty_list_does_nothing() {
        let (_vm, mut screen, mut rx) = screen();
        pump(&mut screen, &mut rx);

        let outcome = screen.handle_event(&EventKind::Key(key("enter")));
        assert_eq!(outcome, Outcome::None);
    }

    #[test]
    fn test_refresh_key_gated_by_loading() {
        let (vm, mut screen, mut rx) = screen();
        pump(&mut screen, &mut rx);

        screen.handle_event(&EventKind::Key(key("r")));
        assert_eq!(vm.fetches.load(Ordering::SeqCst), 1);

        vm.loading.publish(true);
        pump(&mut screen, &mut rx);
        screen.handle_event(&EventKind::Key(key("r")));
        assert_eq!(vm.fetches.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_quit_keys() {
        let (_vm, mut screen, mut rx) = screen();
        pump(&mut screen, &mut rx);

        assert_eq!(screen.handle_event(&EventKind::Key(key("q"))), Outcome::Quit);
        assert_eq!(
            screen.handle_event(&EventKind::Key(key("esc"))),
            Outcome::Quit
        );
    }

    #[test]
    fn test_rows_replacement_clamps_selection() {
        let (vm, mut screen, mut rx) = screen();
        vm.rows.publish(filled_rows());
        pump(&mut screen, &mut rx);
        screen.handle_event(&EventKind::Key(key("G")));
        assert_eq!(screen.selected, Some(Area::ALL.len() - 1));

        vm.rows.publish(filled_rows()[..2].to_vec());
        pump(&mut screen, &mut rx);
        assert_eq!(screen.selected, Some(1));

        vm.rows.publish(Vec::new());
        pump(&mut screen, &mut rx);
        assert_eq!(screen.selected, None);
    }

    #[test]
    fn test_failure_opens_dialog_and_keeps_rows() {
        let (vm, mut screen, mut rx) = screen();
        vm.rows.publish(filled_rows());
        pump(&mut screen, &mut rx);

        vm.errors.emit("boom".into());
        pump(&mut screen, &mut rx);

        assert!(screen.error_shown());
        assert_eq!(screen.row_count(), Area::ALL.len());

        // keys are swallowed while the dialog is open
        assert_eq!(screen.handle_event(&EventKind::Key(key("q"))), Outcome::None);
        assert_eq!(
            screen.handle_event(&EventKind::Key(key("enter"))),
            Outcome::Render
        );
        assert!(!screen.error_shown());
    }
}
