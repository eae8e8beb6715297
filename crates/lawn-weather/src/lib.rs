//! Location resolution and weather readings for the Lawn Enforcer.
//!
//! Provides forward geocoding, current conditions and pollen readings via
//! the Open-Meteo APIs.

pub mod error_mapping;
pub mod geocode;
pub mod provider;
pub mod types;

pub use geocode::Geocoder;
pub use provider::WeatherProvider;
pub use types::*;

pub(crate) const USER_AGENT: &str = concat!("lawn-enforcer/", env!("CARGO_PKG_VERSION"));

/// Decode a successful JSON response or turn the status into an error.
pub(crate) async fn handle_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, WeatherError> {
    let status = response.status();

    if status.is_success() {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| WeatherError::Parse(e.to_string()))
    } else {
        let message = response.text().await.unwrap_or_default();
        tracing::debug!("Provider returned {}: {}", status, message);
        Err(WeatherError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
