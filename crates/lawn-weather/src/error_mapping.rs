//! Maps provider errors to lawn_core errors for user-facing messages.

use crate::types::WeatherError;
use lawn_core::{AppError, ReqwestErrorExt};

impl From<WeatherError> for lawn_core::WeatherError {
    fn from(e: WeatherError) -> Self {
        match e {
            WeatherError::LocationNotFound(query) => Self::LocationNotFound(query),
            WeatherError::InvalidQuery(query) => Self::LocationNotFound(query),
            other => Self::DataUnavailable(other.to_string()),
        }
    }
}

impl From<WeatherError> for AppError {
    fn from(e: WeatherError) -> Self {
        match e {
            WeatherError::Network(err) => AppError::Network(err.into_network_error()),
            other => AppError::Weather(other.into()),
        }
    }
}
