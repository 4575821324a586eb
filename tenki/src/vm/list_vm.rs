//! List-screen view model

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Local};
use futures::future::join_all;
use tenki_core::{EventStream, StateStream};
use tracing::{debug, warn};

use crate::model::{Area, AreaWeather, Weather};
use crate::viewmodel::AreaWeatherListViewModel;
use crate::vm::provider::WeatherProvider;

/// Fetches all areas' weather concurrently and publishes the full list.
///
/// Each refresh replaces the whole list. An area whose fetch failed keeps
/// the value it had in the previous list; at most one error event is emitted
/// per refresh. Overlapping refreshes resolve last-request-wins, same as the
/// detail view model.
pub struct RemoteAreaWeatherListViewModel {
    provider: Arc<dyn WeatherProvider>,
    loading: StateStream<bool>,
    rows: StateStream<Vec<AreaWeather>>,
    errors: EventStream<String>,
    latest_request: Arc<AtomicU64>,
}

impl RemoteAreaWeatherListViewModel {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self {
            provider,
            loading: StateStream::new(false),
            rows: StateStream::new(Vec::new()),
            errors: EventStream::new(),
            latest_request: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl AreaWeatherListViewModel for RemoteAreaWeatherListViewModel {
    fn loading(&self) -> &StateStream<bool> {
        &self.loading
    }

    fn rows(&self) -> &StateStream<Vec<AreaWeather>> {
        &self.rows
    }

    fn errors(&self) -> &EventStream<String> {
        &self.errors
    }

    fn request_area_weather(&self, areas: &[Area], at: DateTime<Local>) {
        let request_id = self.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
        self.loading.publish(true);

        let areas = areas.to_vec();
        let provider = Arc::clone(&self.provider);
        let latest_request = Arc::clone(&self.latest_request);
        let loading = self.loading.clone();
        let rows = self.rows.clone();
        let errors = self.errors.clone();

        tokio::spawn(async move {
            let fetches = areas.iter().map(|&area| {
                let provider = Arc::clone(&provider);
                async move { (area, provider.fetch(area, at).await) }
            });
            let results = join_all(fetches).await;

            // A newer refresh supersedes this one; drop the stale results.
            if latest_request.load(Ordering::SeqCst) != request_id {
                debug!(request_id, "Dropping stale refresh results");
                return;
            }

            let previous: HashMap<Area, Option<Weather>> = rows
                .value()
                .into_iter()
                .map(|row| (row.area, row.weather))
                .collect();

            let mut failure: Option<String> = None;
            let next: Vec<AreaWeather> = results
                .into_iter()
                .map(|(area, result)| match result {
                    Ok(weather) => AreaWeather {
                        area,
                        weather: Some(weather),
                    },
                    Err(e) => {
                        warn!(area = area.name(), error = %e, "Area fetch failed");
                        if failure.is_none() {
                            failure = Some(e.to_string());
                        }
                        AreaWeather {
                            area,
                            weather: previous.get(&area).cloned().flatten(),
                        }
                    }
                })
                .collect();

            debug!(rows = next.len(), failed = failure.is_some(), "Refresh finished");
            rows.publish(next);
            if let Some(description) = failure {
                errors.emit(description);
            }
            loading.publish(false);
        });
    }
}
