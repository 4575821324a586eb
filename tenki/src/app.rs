//! Navigation stack and message routing
//!
//! The app owns a stack of screens and the single [`UiHandle`] everything
//! posts through. Stream emissions arrive as [`AppMsg`] values tagged with
//! the id of the screen they belong to; a message whose screen has been
//! popped is dropped without effect.

use std::sync::Arc;

use crossterm::event::KeyCode;
use ratatui::Frame;
use tenki_core::{EventKind, UiHandle};
use tracing::debug;

use crate::model::AreaWeather;
use crate::screens::{DetailMsg, DetailScreen, ListMsg, ListScreen, Outcome};
use crate::vm::{RemoteAreaWeatherListViewModel, RemoteWeatherViewModel, WeatherProvider};

/// Identity of one pushed screen; never reused within a run.
pub type ScreenId = u64;

/// Everything the UI loop applies: projected stream emissions plus the
/// animation tick.
#[derive(Debug, Clone, PartialEq)]
pub enum AppMsg {
    List(ScreenId, ListMsg),
    Detail(ScreenId, DetailMsg),
    Tick,
}

enum Screen {
    List(ScreenId, ListScreen),
    Detail(ScreenId, DetailScreen),
}

impl Screen {
    fn id(&self) -> ScreenId {
        match self {
            Screen::List(id, _) => *id,
            Screen::Detail(id, _) => *id,
        }
    }
}

pub struct App {
    stack: Vec<Screen>,
    ui: UiHandle<AppMsg>,
    provider: Arc<dyn WeatherProvider>,
    next_id: ScreenId,
    should_quit: bool,
}

impl App {
    /// Build the app with the list screen as the root of the stack and kick
    /// off its initial fetch.
    pub fn new(provider: Arc<dyn WeatherProvider>, ui: UiHandle<AppMsg>) -> Self {
        let mut app = Self {
            stack: Vec::new(),
            ui,
            provider,
            next_id: 0,
            should_quit: false,
        };

        let id = app.take_id();
        let vm = Arc::new(RemoteAreaWeatherListViewModel::new(Arc::clone(
            &app.provider,
        )));
        let screen_ui = app.ui.map(move |msg| AppMsg::List(id, msg));
        let screen = ListScreen::new(vm, &screen_ui);
        screen.on_appear();
        app.stack.push(Screen::List(id, screen));
        app
    }

    fn take_id(&mut self) -> ScreenId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Push a detail screen seeded with an already-fetched row. The seed is
    /// replayed into the screen's render state; no fetch happens here.
    fn push_detail(&mut self, row: AreaWeather) {
        let id = self.take_id();
        debug!(area = row.area.name(), id, "Pushing detail screen");
        let vm = Arc::new(RemoteWeatherViewModel::seeded(
            row.area,
            row.weather,
            Arc::clone(&self.provider),
        ));
        let screen_ui = self.ui.map(move |msg| AppMsg::Detail(id, msg));
        let screen = DetailScreen::new(vm, &screen_ui);
        self.stack.push(Screen::Detail(id, screen));
    }

    /// Apply one message. Returns whether the visible screen needs a redraw.
    ///
    /// Messages for a screen no longer on the stack are dropped; a popped
    /// screen's subscriptions are already torn down, so these can only be
    /// messages that were in flight at the moment of the pop.
    pub fn update(&mut self, msg: AppMsg) -> bool {
        match msg {
            AppMsg::Tick => match self.stack.last_mut() {
                Some(Screen::List(_, screen)) => screen.tick(),
                Some(Screen::Detail(_, screen)) => screen.tick(),
                None => false,
            },
            AppMsg::List(id, list_msg) => {
                let top_id = self.stack.last().map(Screen::id);
                for screen in &mut self.stack {
                    if let Screen::List(screen_id, screen) = screen {
                        if *screen_id == id {
                            let dirty = screen.update(list_msg);
                            return dirty && top_id == Some(id);
                        }
                    }
                }
                debug!(id, "Dropping message for dismissed screen");
                false
            }
            AppMsg::Detail(id, detail_msg) => {
                let top_id = self.stack.last().map(Screen::id);
                for screen in &mut self.stack {
                    if let Screen::Detail(screen_id, screen) = screen {
                        if *screen_id == id {
                            let dirty = screen.update(detail_msg);
                            return dirty && top_id == Some(id);
                        }
                    }
                }
                debug!(id, "Dropping message for dismissed screen");
                false
            }
        }
    }

    /// Route a terminal event to the top screen and apply its outcome.
    /// Returns whether a redraw is needed.
    pub fn handle_event(&mut self, event: &EventKind) -> bool {
        if let EventKind::Key(key) = event {
            if key.code == KeyCode::Char('c')
                && key
                    .modifiers
                    .contains(crossterm::event::KeyModifiers::CONTROL)
            {
                self.should_quit = true;
                return false;
            }
        }
        if matches!(event, EventKind::Resize(_, _)) {
            return true;
        }

        let outcome = match self.stack.last_mut() {
            Some(Screen::List(_, screen)) => screen.handle_event(event),
            Some(Screen::Detail(_, screen)) => screen.handle_event(event),
            None => Outcome::None,
        };

        match outcome {
            Outcome::None => false,
            Outcome::Render => true,
            Outcome::Pop => {
                // Dropping the screen tears down its subscriptions.
                self.stack.pop();
                if self.stack.is_empty() {
                    self.should_quit = true;
                }
                true
            }
            Outcome::Push(row) => {
                self.push_detail(row);
                true
            }
            Outcome::Quit => {
                self.should_quit = true;
                false
            }
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        match self.stack.last_mut() {
            Some(Screen::List(_, screen)) => screen.render(frame, area),
            Some(Screen::Detail(_, screen)) => screen.render(frame, area),
            None => {}
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Area, Condition, Weather};
    use crate::vm::FetchError;
    use async_trait::async_trait;
    use chrono::{DateTime, Local, TimeZone};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tenki_core::testing::key;
    use tokio::sync::mpsc;

    struct CountingProvider {
        fetches: AtomicUsize,
    }

    impl CountingProvider {
        fn new() -> Self {
            Self {
                fetches: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl WeatherProvider for CountingProvider {
        async fn fetch(&self, _area: Area, _at: DateTime<Local>) -> Result<Weather, FetchError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(Weather {
                condition: Condition::Sunny,
                min_temperature: 10,
                max_temperature: 20,
                observed_at: Local.with_ymd_and_hms(2024, 1, 5, 9, 0, 0).unwrap(),
            })
        }
    }

    fn make_app() -> (
        Arc<CountingProvider>,
        App,
        mpsc::UnboundedReceiver<AppMsg>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let provider = Arc::new(CountingProvider::new());
        let provider_dyn: Arc<dyn WeatherProvider> = provider.clone();
        let app = App::new(provider_dyn, UiHandle::from_sender(tx));
        (provider, app, rx)
    }

    async fn settle(app: &mut App, rx: &mut mpsc::UnboundedReceiver<AppMsg>) {
        for _ in 0..100 {
            while let Ok(msg) = rx.try_recv() {
                app.update(msg);
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_fetch_covers_every_area() {
        let (provider, mut app, mut rx) = make_app();
        settle(&mut app, &mut rx).await;
        assert_eq!(provider.fetches.load(Ordering::SeqCst), Area::ALL.len());
    }

    #[tokio::test(start_paused = true)]
    async fn test_activation_pushes_detail_without_fetch() {
        let (provider, mut app, mut rx) = make_app();
        settle(&mut app, &mut rx).await;
        let before = provider.fetches.load(Ordering::SeqCst);

        app.handle_event(&EventKind::Key(key("j")));
        app.handle_event(&EventKind::Key(key("enter")));
        settle(&mut app, &mut rx).await;

        assert_eq!(app.stack_depth(), 2);
        // Seeding from the row means no new fetch on navigation.
        assert_eq!(provider.fetches.load(Ordering::SeqCst), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pop_returns_to_list() {
        let (_provider, mut app, mut rx) = make_app();
        settle(&mut app, &mut rx).await;

        app.handle_event(&EventKind::Key(key("j")));
        app.handle_event(&EventKind::Key(key("enter")));
        assert_eq!(app.stack_depth(), 2);

        app.handle_event(&EventKind::Key(key("esc")));
        assert_eq!(app.stack_depth(), 1);
        assert!(!app.should_quit());
    }

    #[tokio::test(start_paused = true)]
    async fn test_message_for_popped_screen_is_dropped() {
        let (_provider, mut app, mut rx) = make_app();
        settle(&mut app, &mut rx).await;

        app.handle_event(&EventKind::Key(key("j")));
        app.handle_event(&EventKind::Key(key("enter")));
        app.handle_event(&EventKind::Key(key("esc")));

        // The detail screen had id 1; a straggler for it is ignored.
        let dirty = app.update(AppMsg::Detail(1, DetailMsg::Loading(true)));
        assert!(!dirty);
        assert_eq!(app.stack_depth(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quit_keys_and_ctrl_c() {
        let (_provider, mut app, mut rx) = make_app();
        settle(&mut app, &mut rx).await;

        app.handle_event(&EventKind::Key(key("q")));
        assert!(app.should_quit());

        let (_provider, mut app, mut rx) = make_app();
        settle(&mut app, &mut rx).await;
        app.handle_event(&EventKind::Key(key("ctrl+c")));
        assert!(app.should_quit());
    }

    #[tokio::test(start_paused = true)]
    async fn test_background_list_update_does_not_redraw_detail() {
        let (_provider, mut app, mut rx) = make_app();
        settle(&mut app, &mut rx).await;

        app.handle_event(&EventKind::Key(key("j")));
        app.handle_event(&EventKind::Key(key("enter")));

        // The list (id 0) still receives emissions while covered.
        let dirty = app.update(AppMsg::List(0, ListMsg::Loading(true)));
        assert!(!dirty);
    }
}
