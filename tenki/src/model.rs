//! Domain data shapes the screens project
//!
//! These are external inputs to the presentation layer: the closed set of
//! areas, the weather record a fetch resolves to, and the (area, weather)
//! pair the list renders.

use chrono::{DateTime, Local};

/// Placeholder text shown before the first value arrives.
pub const PLACEHOLDER: &str = "--";

/// The closed set of named geographic areas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Area {
    Sapporo,
    Sendai,
    Tokyo,
    Nagoya,
    Osaka,
    Hiroshima,
    Fukuoka,
    Naha,
}

impl Area {
    pub const ALL: [Area; 8] = [
        Area::Sapporo,
        Area::Sendai,
        Area::Tokyo,
        Area::Nagoya,
        Area::Osaka,
        Area::Hiroshima,
        Area::Fukuoka,
        Area::Naha,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Area::Sapporo => "Sapporo",
            Area::Sendai => "Sendai",
            Area::Tokyo => "Tokyo",
            Area::Nagoya => "Nagoya",
            Area::Osaka => "Osaka",
            Area::Hiroshima => "Hiroshima",
            Area::Fukuoka => "Fukuoka",
            Area::Naha => "Naha",
        }
    }

    /// Latitude/longitude used by the forecast provider.
    pub fn coordinates(self) -> (f64, f64) {
        match self {
            Area::Sapporo => (43.0618, 141.3545),
            Area::Sendai => (38.2682, 140.8694),
            Area::Tokyo => (35.6762, 139.6503),
            Area::Nagoya => (35.1815, 136.9066),
            Area::Osaka => (34.6937, 135.5023),
            Area::Hiroshima => (34.3853, 132.4553),
            Area::Fukuoka => (33.5904, 130.4017),
            Area::Naha => (26.2124, 127.6809),
        }
    }
}

impl std::fmt::Display for Area {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Weather condition identifier; icons and labels are keyed by it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Condition {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
}

impl Condition {
    pub fn label(self) -> &'static str {
        match self {
            Condition::Sunny => "sunny",
            Condition::Cloudy => "cloudy",
            Condition::Rainy => "rainy",
            Condition::Snowy => "snowy",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One resolved weather lookup.
#[derive(Clone, Debug, PartialEq)]
pub struct Weather {
    pub condition: Condition,
    pub min_temperature: i32,
    pub max_temperature: i32,
    pub observed_at: DateTime<Local>,
}

/// A list row: an area together with its latest result, if any.
#[derive(Clone, Debug, PartialEq)]
pub struct AreaWeather {
    pub area: Area,
    pub weather: Option<Weather>,
}

/// Long-form observation date text.
///
/// Fixed English long form; deliberately not user-configurable.
pub fn format_observed_at(at: &DateTime<Local>) -> String {
    at.format("%A, %B %-d, %Y %H:%M").to_string()
}
