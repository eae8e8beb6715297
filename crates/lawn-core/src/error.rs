//! Centralized error types for the Lawn Enforcer.
//!
//! A failed lookup converts into [`AppError`], which carries a short,
//! non-technical `user_message()` for the verdict panel while the `Display`
//! form keeps the full context for logs. Lookup failures never abort the
//! run; the panel falls back to default readings.

use thiserror::Error;

/// Top-level application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherError),
}

impl AppError {
    /// Returns a user-friendly message suitable for the terminal panel.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Weather(e) => e.user_message(),
        }
    }

    /// True when the resolver matched nothing, as opposed to a failed fetch.
    pub fn is_location_not_found(&self) -> bool {
        matches!(self, AppError::Weather(WeatherError::LocationNotFound(_)))
    }
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Unable to connect. Check your internet connection."
            }
            NetworkError::Timeout => "The request timed out. Please try again.",
            NetworkError::InvalidResponse(_) => {
                "Received an unexpected response. Please try again."
            }
        }
    }
}

/// Weather lookup outcomes that stop a verdict from being based on live data.
///
/// Missing optional readings (a pollen species, gusts) are not represented
/// here; those are defaulted where they are parsed.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The resolver returned zero candidates. Shown as a warning.
    #[error("Location not found: {0}")]
    LocationNotFound(String),

    /// Network or decode failure fetching readings. Shown as an error.
    #[error("Weather data unavailable: {0}")]
    DataUnavailable(String),
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::LocationNotFound(_) => "City not found. Using default sensors.",
            WeatherError::DataUnavailable(_) => "Radar offline. Defaults shown.",
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}
