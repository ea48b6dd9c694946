use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============================================================================
// OpenWeatherMap 2.5 Responses (Internal)
// Only the fields the report needs are deserialized
// ============================================================================

/// `GET /weather?q={city}`
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeatherPayload {
    pub name: String,
    pub sys: SysInfo,
    pub main: CurrentMain,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
    pub wind: WindInfo,
    /// Metres
    #[serde(default)]
    pub visibility: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SysInfo {
    #[serde(default)]
    pub country: String,
    pub sunrise: i64,
    pub sunset: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentMain {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u32,
    pub pressure: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WindInfo {
    /// Metres per second
    pub speed: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherCondition {
    pub description: String,
    pub icon: String,
}

/// `GET /forecast?q={city}` (5 days, 3-hour steps)
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastPayload {
    #[serde(default)]
    pub list: Vec<ForecastSample>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastSample {
    pub dt: i64,
    pub main: SampleMain,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
    /// Probability of precipitation, 0..=1
    #[serde(default)]
    pub pop: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SampleMain {
    pub temp: f64,
    pub humidity: f64,
}

/// Error body returned by OpenWeatherMap on non-success statuses
#[derive(Debug, Deserialize)]
pub struct UpstreamErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

// ============================================================================
// API Response Models (External - what we return to clients)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WeatherReport {
    pub city: String,
    pub country: String,
    pub current: CurrentConditions,
    /// At most five days, oldest first
    pub forecast: Vec<DailyForecast>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CurrentConditions {
    /// Celsius
    pub temp: i64,
    /// Celsius
    pub feels_like: i64,
    pub humidity: u32,
    /// km/h, one decimal
    pub wind_speed: f64,
    pub description: String,
    pub icon: String,
    /// e.g. "06:05:09 AM"
    pub sunrise: String,
    pub sunset: String,
    /// hPa
    pub pressure: u32,
    /// km
    pub visibility: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DailyForecast {
    /// First sample of the day, ISO-8601 UTC
    pub date: String,
    /// e.g. "Mon, Jan 15"
    #[serde(rename = "dateFormatted")]
    pub date_formatted: String,
    pub temp: DayTemperatures,
    pub description: String,
    pub icon: String,
    /// Mean probability, percent
    pub precipitation: i64,
    /// Mean relative humidity, percent
    pub humidity: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct DayTemperatures {
    pub day: i64,
    pub min: i64,
    pub max: i64,
}
