//! Concrete view models behind the screen contracts
//!
//! The screens only see the traits in [`crate::viewmodel`]; everything here
//! is swappable. Fetching goes through the [`WeatherProvider`] seam so tests
//! can drive the view models without a network.

pub mod list_vm;
pub mod provider;
pub mod weather_vm;

pub use list_vm::RemoteAreaWeatherListViewModel;
pub use provider::{FetchError, OpenMeteoProvider, WeatherProvider};
pub use weather_vm::RemoteWeatherViewModel;
