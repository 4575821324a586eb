//! Detail-screen view model

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Local};
use tenki_core::{EventStream, StateStream};
use tracing::{debug, warn};

use crate::model::{Area, Weather};
use crate::viewmodel::WeatherViewModel;
use crate::vm::provider::WeatherProvider;

/// Fetches one area's weather through a [`WeatherProvider`].
///
/// Overlapping fetches resolve last-request-wins: every request takes a
/// fresh id, and a completion whose id is no longer current is dropped
/// before it touches any stream.
pub struct RemoteWeatherViewModel {
    area: Area,
    provider: Arc<dyn WeatherProvider>,
    loading: StateStream<bool>,
    weather: StateStream<Option<Weather>>,
    errors: EventStream<String>,
    latest_request: Arc<AtomicU64>,
}

impl RemoteWeatherViewModel {
    pub fn new(area: Area, provider: Arc<dyn WeatherProvider>) -> Self {
        Self::seeded(area, None, provider)
    }

    /// Start from an already-fetched result, so a screen navigated to from
    /// the list renders immediately without a fetch.
    pub fn seeded(
        area: Area,
        weather: Option<Weather>,
        provider: Arc<dyn WeatherProvider>,
    ) -> Self {
        Self {
            area,
            provider,
            loading: StateStream::new(false),
            weather: StateStream::new(weather),
            errors: EventStream::new(),
            latest_request: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl WeatherViewModel for RemoteWeatherViewModel {
    fn area(&self) -> Area {
        self.area
    }

    fn loading(&self) -> &StateStream<bool> {
        &self.loading
    }

    fn weather(&self) -> &StateStream<Option<Weather>> {
        &self.weather
    }

    fn errors(&self) -> &EventStream<String> {
        &self.errors
    }

    fn request_weather(&self, at: DateTime<Local>) {
        let request_id = self.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
        self.loading.publish(true);

        let area = self.area;
        let provider = Arc::clone(&self.provider);
        let latest_request = Arc::clone(&self.latest_request);
        let loading = self.loading.clone();
        let weather = self.weather.clone();
        let errors = self.errors.clone();

        tokio::spawn(async move {
            let result = provider.fetch(area, at).await;

            // A newer request supersedes this one; drop the stale response.
            if latest_request.load(Ordering::SeqCst) != request_id {
                debug!(area = area.name(), request_id, "Dropping stale fetch result");
                return;
            }

            match result {
                Ok(fetched) => {
                    debug!(area = area.name(), ?fetched, "Weather loaded");
                    weather.publish(Some(fetched));
                }
                Err(e) => {
                    warn!(area = area.name(), error = %e, "Weather fetch failed");
                    errors.emit(e.to_string());
                }
            }
            loading.publish(false);
        });
    }
}
