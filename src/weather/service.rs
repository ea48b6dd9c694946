use std::sync::Arc;

use axum::http::StatusCode;
use thiserror::Error;

use super::aggregate;
use super::models::WeatherReport;
use super::provider::WeatherProvider;
use crate::config::DisplayTimezone;
use crate::error::HttpError;
use crate::impl_into_response;

pub const CURRENT_FALLBACK_MESSAGE: &str = "Failed to fetch weather data";
pub const FORECAST_FALLBACK_MESSAGE: &str = "Failed to fetch forecast data";

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("City is required")]
    Validation,

    /// The provider answered with a non-success status
    #[error("{0}")]
    Upstream(String),

    #[error("Failed to fetch weather data")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl HttpError for WeatherError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::Upstream(_) | Self::Transport(_) | Self::InvalidResponse(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl_into_response!(WeatherError);

pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
    timezone: DisplayTimezone,
}

impl WeatherService {
    pub fn new(provider: Arc<dyn WeatherProvider>, timezone: DisplayTimezone) -> Self {
        Self { provider, timezone }
    }

    pub fn timezone(&self) -> &DisplayTimezone {
        &self.timezone
    }

    /// Current conditions plus a 5-day summary for `city`.
    ///
    /// The two upstream calls run one after the other; the first failure
    /// ends the request.
    pub async fn get_report(&self, city: Option<&str>) -> Result<WeatherReport, WeatherError> {
        let city = city
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or(WeatherError::Validation)?;

        tracing::debug!(city = %city, "Fetching weather report");

        let current = self.provider.current_weather(city).await?;
        let forecast = self.provider.forecast(city).await?;

        tracing::debug!(
            city = %city,
            samples = forecast.list.len(),
            "Received upstream payloads"
        );

        let report = aggregate::build_report(&current, &forecast, &self.timezone)?;

        tracing::info!(
            city = %report.city,
            country = %report.country,
            temp = report.current.temp,
            days = report.forecast.len(),
            "Weather report built"
        );

        Ok(report)
    }
}
