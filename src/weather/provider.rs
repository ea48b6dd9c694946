use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::models::{CurrentWeatherPayload, ForecastPayload, UpstreamErrorBody};
use super::service::{WeatherError, CURRENT_FALLBACK_MESSAGE, FORECAST_FALLBACK_MESSAGE};

const UNITS: &str = "metric";

/// Source of raw upstream weather data
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current conditions for a city name
    async fn current_weather(&self, city: &str) -> Result<CurrentWeatherPayload, WeatherError>;

    /// 5-day forecast in 3-hour samples for a city name
    async fn forecast(&self, city: &str) -> Result<ForecastPayload, WeatherError>;
}

/// OpenWeatherMap 2.5 data API
pub struct OpenWeatherMapProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherMapProvider {
    pub fn new(client: Client, api_key: &str, base_url: &str) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        city: &str,
        fallback_message: &str,
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        // Use query builder for proper URL encoding - handles spaces and special chars
        let response = self
            .client
            .get(&url)
            .query(&[("q", city), ("units", UNITS), ("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(endpoint = %endpoint, status = %status, "Received API response");

        if !status.is_success() {
            let message = response
                .json::<UpstreamErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| fallback_message.to_string());

            tracing::warn!(
                endpoint = %endpoint,
                city = %city,
                status = %status,
                message = %message,
                "Upstream request failed"
            );
            return Err(WeatherError::Upstream(message));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherMapProvider {
    async fn current_weather(&self, city: &str) -> Result<CurrentWeatherPayload, WeatherError> {
        self.fetch("weather", city, CURRENT_FALLBACK_MESSAGE).await
    }

    async fn forecast(&self, city: &str) -> Result<ForecastPayload, WeatherError> {
        self.fetch("forecast", city, FORECAST_FALLBACK_MESSAGE).await
    }
}
