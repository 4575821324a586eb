//! View-model contracts the screens depend on
//!
//! Screens are handed one of these at construction and never construct or
//! own anything else. The three streams represent orthogonal facets of one
//! fetch lifecycle:
//!
//! - `loading`: replay-latest; drives the busy indicator and gates the
//!   reload control
//! - data (`weather` / `rows`): replay-latest; each emission fully replaces
//!   prior state
//! - `errors`: fire-and-forget; each emission is presented once as a modal
//!   and discarded, and a re-subscribing screen never sees a stale error
//!
//! Failures are never returned from the fetch methods; they arrive as error
//! events carrying an opaque human-meaningful description.

use chrono::{DateTime, Local};
use tenki_core::{EventStream, StateStream};

use crate::model::{Area, AreaWeather, Weather};

/// View model behind the detail screen.
pub trait WeatherViewModel: Send + Sync {
    /// The area this view model looks up; fixed for its lifetime.
    fn area(&self) -> Area;

    /// Whether a fetch is in flight.
    fn loading(&self) -> &StateStream<bool>;

    /// Latest result; `None` until the first fetch resolves.
    fn weather(&self) -> &StateStream<Option<Weather>>;

    /// Fetch failures, one event per failed fetch.
    fn errors(&self) -> &EventStream<String>;

    /// Trigger a fetch for the given date. Never blocks, never fails
    /// directly; the outcome arrives on the streams.
    fn request_weather(&self, at: DateTime<Local>);
}

/// View model behind the list screen.
pub trait AreaWeatherListViewModel: Send + Sync {
    /// Whether a bulk fetch is in flight.
    fn loading(&self) -> &StateStream<bool>;

    /// Latest full list; every emission replaces the previous one.
    fn rows(&self) -> &StateStream<Vec<AreaWeather>>;

    /// Fetch failures, at most one event per bulk fetch.
    fn errors(&self) -> &EventStream<String>;

    /// Trigger a bulk fetch for the given areas and date.
    fn request_area_weather(&self, areas: &[Area], at: DateTime<Local>);
}
