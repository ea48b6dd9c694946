use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};
use config::{Case, Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Environment variable read as a fallback for the provider credential
const LEGACY_API_KEY_VAR: &str = "OPENWEATHER_API_KEY";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// OpenWeatherMap API key
    pub openweathermap_api_key: String,

    /// Base URL of the OpenWeatherMap 2.5 data API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout for upstream calls. Unset means wait indefinitely.
    #[serde(default)]
    pub upstream_timeout_secs: Option<u64>,

    /// Router-level timeout for incoming requests. Unset disables it.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// IANA timezone used for day grouping and clock strings (e.g. "Europe/Paris").
    /// Falls back to the server's local timezone.
    #[serde(default)]
    pub display_timezone: Option<String>,

    /// Shortcut cities offered on the search page
    #[serde(default = "default_popular_cities")]
    pub popular_cities: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_api_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_popular_cities() -> Vec<String> {
    ["New York", "Tokyo", "Paris", "Dubai", "Sydney", "Rio"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let mut builder = Config::builder()
            .set_default("host", default_host())?
            .set_default("port", default_port())?
            .set_default("api_base_url", default_api_base_url())?;

        if let Ok(key) = std::env::var(LEGACY_API_KEY_VAR) {
            builder = builder.set_default("openweathermap_api_key", key)?;
        }

        let config = builder
            // Load from config file if present
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name("config.local").required(false))
            // Override with environment variables (prefixed with COMPASS_)
            .add_source(
                Environment::with_prefix("COMPASS")
                    .prefix_separator("_")
                    .separator("__")
                    .convert_case(Case::Snake)
                    .list_separator(",")
                    .with_list_parse_key("popular_cities")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Resolve the configured display timezone
    pub fn display_timezone(&self) -> Result<DisplayTimezone, ConfigError> {
        match self.display_timezone.as_deref().map(str::trim) {
            None | Some("") => Ok(DisplayTimezone::ServerLocal),
            Some(name) => name
                .parse::<chrono_tz::Tz>()
                .map(DisplayTimezone::Named)
                .map_err(|e| ConfigError::Message(format!("display_timezone: {}", e))),
        }
    }
}

/// Timezone that decides calendar-day boundaries and clock strings
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayTimezone {
    ServerLocal,
    Named(chrono_tz::Tz),
}

impl DisplayTimezone {
    /// Convert Unix seconds into a wall-clock time in this timezone
    pub fn localize(&self, unix_secs: i64) -> Option<DateTime<FixedOffset>> {
        let utc = Utc.timestamp_opt(unix_secs, 0).single()?;
        Some(self.from_utc(utc))
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        self.from_utc(Utc::now())
    }

    fn from_utc(&self, utc: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Self::ServerLocal => utc.with_timezone(&Local).fixed_offset(),
            Self::Named(tz) => utc.with_timezone(tz).fixed_offset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_timezone(tz: Option<&str>) -> AppConfig {
        AppConfig {
            host: default_host(),
            port: default_port(),
            openweathermap_api_key: "key".to_string(),
            api_base_url: default_api_base_url(),
            upstream_timeout_secs: None,
            request_timeout_secs: None,
            display_timezone: tz.map(String::from),
            popular_cities: default_popular_cities(),
        }
    }

    #[test]
    fn test_display_timezone_defaults_to_server_local() {
        assert_eq!(
            config_with_timezone(None).display_timezone().unwrap(),
            DisplayTimezone::ServerLocal
        );
        assert_eq!(
            config_with_timezone(Some("  ")).display_timezone().unwrap(),
            DisplayTimezone::ServerLocal
        );
    }

    #[test]
    fn test_display_timezone_named() {
        assert_eq!(
            config_with_timezone(Some("Asia/Tokyo"))
                .display_timezone()
                .unwrap(),
            DisplayTimezone::Named(chrono_tz::Asia::Tokyo)
        );
    }

    #[test]
    fn test_display_timezone_invalid() {
        assert!(config_with_timezone(Some("Mars/Olympus"))
            .display_timezone()
            .is_err());
    }

    #[test]
    fn test_localize_applies_offset() {
        let tz = DisplayTimezone::Named(chrono_tz::Asia::Tokyo);
        // 2024-01-15T20:00:00Z is already the 16th in Tokyo
        let local = tz.localize(1_705_348_800).unwrap();
        assert_eq!(local.format("%Y-%m-%d %H:%M").to_string(), "2024-01-16 05:00");
    }

    #[test]
    fn test_default_popular_cities() {
        let cities = default_popular_cities();
        assert_eq!(cities.len(), 6);
        assert_eq!(cities[0], "New York");
    }
}
