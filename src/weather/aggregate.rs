use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat, Utc};
use indexmap::{IndexMap, IndexSet};

use super::models::*;
use super::service::WeatherError;
use crate::config::DisplayTimezone;

/// Number of daily summaries returned to clients
pub const FORECAST_DAYS: usize = 5;

/// Visibility reported when the upstream omits it (km)
pub const DEFAULT_VISIBILITY_KM: f64 = 10.0;

const MS_TO_KMH: f64 = 3.6;

/// Accumulates the 3-hour samples that fall on one calendar day
#[derive(Debug)]
pub struct DayBucket {
    first_sample: DateTime<FixedOffset>,
    temps: Vec<f64>,
    descriptions: IndexSet<String>,
    icons: Vec<String>,
    pop_sum: f64,
    humidity_sum: f64,
    count: usize,
}

impl DayBucket {
    fn new(first_sample: DateTime<FixedOffset>) -> Self {
        Self {
            first_sample,
            temps: Vec::new(),
            descriptions: IndexSet::new(),
            icons: Vec::new(),
            pop_sum: 0.0,
            humidity_sum: 0.0,
            count: 0,
        }
    }

    fn push(&mut self, sample: &ForecastSample) {
        self.temps.push(sample.main.temp);
        if let Some(condition) = sample.weather.first() {
            self.descriptions.insert(condition.description.clone());
            self.icons.push(condition.icon.clone());
        }
        self.pop_sum += sample.pop.unwrap_or(0.0);
        self.humidity_sum += sample.main.humidity;
        self.count += 1;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Reduce the bucket into the daily summary sent to clients
    pub fn summarize(&self) -> DailyForecast {
        // Buckets are only created alongside their first sample
        let count = self.count().max(1) as f64;

        let sum: f64 = self.temps.iter().sum();
        let min = self.temps.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.temps.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let icon = self
            .icons
            .get(self.count() / 2)
            .or_else(|| self.icons.first())
            .cloned()
            .unwrap_or_default();

        DailyForecast {
            date: self
                .first_sample
                .with_timezone(&Utc)
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            date_formatted: self.first_sample.format("%a, %b %-d").to_string(),
            temp: DayTemperatures {
                day: round_half_up(sum / count),
                min: round_half_up(min),
                max: round_half_up(max),
            },
            description: self
                .descriptions
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            icon,
            precipitation: round_half_up(self.pop_sum / count * 100.0),
            humidity: round_half_up(self.humidity_sum / count),
        }
    }
}

/// Group forecast samples by calendar day in the display timezone.
///
/// Buckets keep first-seen order, which is chronological because the
/// upstream returns samples sorted by time.
pub fn group_samples(
    samples: &[ForecastSample],
    tz: &DisplayTimezone,
) -> IndexMap<NaiveDate, DayBucket> {
    let mut days: IndexMap<NaiveDate, DayBucket> = IndexMap::new();

    for sample in samples {
        let Some(local) = tz.localize(sample.dt) else {
            tracing::warn!(dt = sample.dt, "Skipping forecast sample with invalid timestamp");
            continue;
        };

        days.entry(local.date_naive())
            .or_insert_with(|| DayBucket::new(local))
            .push(sample);
    }

    days
}

/// Summaries for the first [`FORECAST_DAYS`] days of the forecast
pub fn daily_forecast(samples: &[ForecastSample], tz: &DisplayTimezone) -> Vec<DailyForecast> {
    group_samples(samples, tz)
        .values()
        .take(FORECAST_DAYS)
        .map(DayBucket::summarize)
        .collect()
}

pub fn current_conditions(
    payload: &CurrentWeatherPayload,
    tz: &DisplayTimezone,
) -> Result<CurrentConditions, WeatherError> {
    let condition = payload.weather.first().ok_or_else(|| {
        WeatherError::InvalidResponse("No weather information available".to_string())
    })?;

    let sunrise = format_clock(payload.sys.sunrise, tz)
        .ok_or_else(|| WeatherError::InvalidResponse("Invalid sunrise timestamp".to_string()))?;
    let sunset = format_clock(payload.sys.sunset, tz)
        .ok_or_else(|| WeatherError::InvalidResponse("Invalid sunset timestamp".to_string()))?;

    Ok(CurrentConditions {
        temp: round_half_up(payload.main.temp),
        feels_like: round_half_up(payload.main.feels_like),
        humidity: payload.main.humidity,
        wind_speed: round_one_decimal(payload.wind.speed * MS_TO_KMH),
        description: condition.description.clone(),
        icon: condition.icon.clone(),
        sunrise,
        sunset,
        pressure: payload.main.pressure,
        visibility: payload
            .visibility
            .map(|metres| metres / 1000.0)
            .unwrap_or(DEFAULT_VISIBILITY_KM),
    })
}

/// Merge both upstream payloads into the client-facing report
pub fn build_report(
    current: &CurrentWeatherPayload,
    forecast: &ForecastPayload,
    tz: &DisplayTimezone,
) -> Result<WeatherReport, WeatherError> {
    // A sample without a condition would shift the middle-icon index
    if forecast.list.iter().any(|sample| sample.weather.is_empty()) {
        return Err(WeatherError::InvalidResponse(
            "Forecast sample without weather information".to_string(),
        ));
    }

    Ok(WeatherReport {
        city: current.name.clone(),
        country: current.sys.country.clone(),
        current: current_conditions(current, tz)?,
        forecast: daily_forecast(&forecast.list, tz),
    })
}

/// 12-hour clock with seconds, e.g. "06:05:09 PM"
pub fn format_clock(unix_secs: i64, tz: &DisplayTimezone) -> Option<String> {
    tz.localize(unix_secs)
        .map(|t| t.format("%I:%M:%S %p").to_string())
}

/// Round to the nearest integer with ties going up (-2.5 → -2, 2.5 → 3)
pub fn round_half_up(value: f64) -> i64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor as i64 + 1
    } else {
        floor as i64
    }
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const UTC: DisplayTimezone = DisplayTimezone::Named(chrono_tz::UTC);
    /// 2024-01-15T00:00:00Z (a Monday)
    const JAN_15: i64 = 1_705_276_800;
    const THREE_HOURS: i64 = 3 * 60 * 60;

    fn sample(dt: i64, temp: f64, description: &str, icon: &str, pop: Option<f64>) -> ForecastSample {
        ForecastSample {
            dt,
            main: SampleMain {
                temp,
                humidity: 70.0,
            },
            weather: vec![WeatherCondition {
                description: description.to_string(),
                icon: icon.to_string(),
            }],
            pop,
        }
    }

    /// Eight 3-hour samples per day for `days` days starting at JAN_15
    fn full_forecast(days: i64) -> Vec<ForecastSample> {
        (0..days * 8)
            .map(|i| sample(JAN_15 + i * THREE_HOURS, 10.0, "clear sky", "01d", Some(0.0)))
            .collect()
    }

    fn current_payload() -> CurrentWeatherPayload {
        CurrentWeatherPayload {
            name: "London".to_string(),
            sys: SysInfo {
                country: "GB".to_string(),
                sunrise: JAN_15 + 7 * 3600 + 5 * 60 + 9,
                sunset: JAN_15 + 16 * 3600 + 30 * 60,
            },
            main: CurrentMain {
                temp: 4.6,
                feels_like: 1.4,
                humidity: 81,
                pressure: 1012,
            },
            weather: vec![WeatherCondition {
                description: "light rain".to_string(),
                icon: "10d".to_string(),
            }],
            wind: WindInfo { speed: 10.0 },
            visibility: Some(8500.0),
        }
    }

    #[test]
    fn test_groups_samples_by_calendar_day() {
        let days = group_samples(&full_forecast(3), &UTC);

        assert_eq!(days.len(), 3);
        let keys: Vec<_> = days.keys().map(|d| d.to_string()).collect();
        assert_eq!(keys, ["2024-01-15", "2024-01-16", "2024-01-17"]);
        assert!(days.values().all(|b| b.count() == 8));
    }

    #[test]
    fn test_forecast_capped_at_five_days() {
        // Upstream usually spans six calendar days
        let forecast = daily_forecast(&full_forecast(6), &UTC);

        assert_eq!(forecast.len(), FORECAST_DAYS);
        assert_eq!(forecast[0].date, "2024-01-15T00:00:00.000Z");
        assert_eq!(forecast[4].date, "2024-01-19T00:00:00.000Z");
    }

    #[test]
    fn test_forecast_dates_unique_and_ascending() {
        let forecast = daily_forecast(&full_forecast(5), &UTC);

        for pair in forecast.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
    }

    #[test]
    fn test_partial_first_day() {
        // Forecast starting mid-afternoon still yields one bucket for that day
        let samples: Vec<_> = (5..16)
            .map(|i| sample(JAN_15 + i * THREE_HOURS, 10.0, "clear sky", "01d", None))
            .collect();
        let days = group_samples(&samples, &UTC);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].count(), 3);
        assert_eq!(days[1].count(), 8);
        assert_eq!(days[0].summarize().date, "2024-01-15T15:00:00.000Z");
    }

    #[test]
    fn test_grouping_follows_display_timezone() {
        // 21:00Z on the 15th is the 16th in Tokyo
        let samples = vec![
            sample(JAN_15 + 12 * 3600, 10.0, "clear sky", "01d", None),
            sample(JAN_15 + 21 * 3600, 10.0, "clear sky", "01n", None),
        ];

        assert_eq!(group_samples(&samples, &UTC).len(), 1);

        let tokyo = DisplayTimezone::Named(chrono_tz::Asia::Tokyo);
        assert_eq!(group_samples(&samples, &tokyo).len(), 2);
    }

    #[test]
    fn test_daily_temperatures() {
        let samples = vec![
            sample(JAN_15, 1.2, "clear sky", "01n", None),
            sample(JAN_15 + THREE_HOURS, 4.4, "clear sky", "01d", None),
            sample(JAN_15 + 2 * THREE_HOURS, 7.6, "clear sky", "01d", None),
        ];
        let day = &daily_forecast(&samples, &UTC)[0];

        // mean 4.4
        assert_eq!(day.temp.day, 4);
        assert_eq!(day.temp.min, 1);
        assert_eq!(day.temp.max, 8);
    }

    #[test]
    fn test_negative_temperatures_round_half_up() {
        let samples = vec![
            sample(JAN_15, -3.5, "snow", "13n", None),
            sample(JAN_15 + THREE_HOURS, -1.5, "snow", "13d", None),
        ];
        let day = &daily_forecast(&samples, &UTC)[0];

        // mean -2.5
        assert_eq!(day.temp.day, -2);
        assert_eq!(day.temp.min, -3);
        assert_eq!(day.temp.max, -1);
    }

    #[test]
    fn test_description_merge_keeps_first_seen_order() {
        let samples = vec![
            sample(JAN_15, 10.0, "clear sky", "01d", None),
            sample(JAN_15 + THREE_HOURS, 10.0, "clear sky", "01d", None),
            sample(JAN_15 + 2 * THREE_HOURS, 10.0, "few clouds", "02d", None),
        ];
        let day = &daily_forecast(&samples, &UTC)[0];

        assert_eq!(day.description, "clear sky, few clouds");
    }

    #[test]
    fn test_icon_is_middle_sample() {
        let samples = vec![
            sample(JAN_15, 10.0, "clear sky", "01n", None),
            sample(JAN_15 + THREE_HOURS, 10.0, "few clouds", "02d", None),
            sample(JAN_15 + 2 * THREE_HOURS, 10.0, "rain", "10d", None),
            sample(JAN_15 + 3 * THREE_HOURS, 10.0, "rain", "09d", None),
        ];
        let day = &daily_forecast(&samples, &UTC)[0];

        // floor(4 / 2) = 2
        assert_eq!(day.icon, "10d");
    }

    #[test]
    fn test_icon_single_sample() {
        let samples = vec![sample(JAN_15, 10.0, "mist", "50d", None)];
        assert_eq!(daily_forecast(&samples, &UTC)[0].icon, "50d");
    }

    #[test]
    fn test_precipitation_defaults_missing_pop_to_zero() {
        let samples = vec![
            sample(JAN_15, 10.0, "rain", "10d", Some(0.9)),
            sample(JAN_15 + THREE_HOURS, 10.0, "rain", "10d", None),
            sample(JAN_15 + 2 * THREE_HOURS, 10.0, "rain", "10d", Some(0.35)),
        ];
        let day = &daily_forecast(&samples, &UTC)[0];

        // (0.9 + 0 + 0.35) / 3 * 100 = 41.67
        assert_eq!(day.precipitation, 42);
    }

    #[test]
    fn test_humidity_mean() {
        let mut samples = vec![
            sample(JAN_15, 10.0, "clear sky", "01d", None),
            sample(JAN_15 + THREE_HOURS, 10.0, "clear sky", "01d", None),
        ];
        samples[0].main.humidity = 60.0;
        samples[1].main.humidity = 75.0;

        // 67.5 rounds up
        assert_eq!(daily_forecast(&samples, &UTC)[0].humidity, 68);
    }

    #[test]
    fn test_date_formatted() {
        let forecast = daily_forecast(&full_forecast(1), &UTC);
        assert_eq!(forecast[0].date_formatted, "Mon, Jan 15");
    }

    #[test]
    fn test_empty_forecast_list() {
        assert!(daily_forecast(&[], &UTC).is_empty());
    }

    #[test]
    fn test_current_conditions_conversions() {
        let current = current_conditions(&current_payload(), &UTC).unwrap();

        assert_eq!(current.temp, 5);
        assert_eq!(current.feels_like, 1);
        assert_eq!(current.wind_speed, 36.0);
        assert_eq!(current.visibility, 8.5);
        assert_eq!(current.humidity, 81);
        assert_eq!(current.pressure, 1012);
        assert_eq!(current.description, "light rain");
        assert_eq!(current.icon, "10d");
    }

    #[test]
    fn test_wind_speed_one_decimal() {
        let mut payload = current_payload();
        payload.wind.speed = 4.12;

        // 14.832 km/h
        assert_eq!(current_conditions(&payload, &UTC).unwrap().wind_speed, 14.8);
    }

    #[test]
    fn test_missing_visibility_defaults_to_ten_km() {
        let mut payload = current_payload();
        payload.visibility = None;

        assert_eq!(
            current_conditions(&payload, &UTC).unwrap().visibility,
            DEFAULT_VISIBILITY_KM
        );
    }

    #[test]
    fn test_sunrise_sunset_clock_strings() {
        let current = current_conditions(&current_payload(), &UTC).unwrap();

        assert_eq!(current.sunrise, "07:05:09 AM");
        assert_eq!(current.sunset, "04:30:00 PM");
    }

    #[test]
    fn test_current_without_weather_entry_is_invalid() {
        let mut payload = current_payload();
        payload.weather.clear();

        assert!(matches!(
            current_conditions(&payload, &UTC),
            Err(WeatherError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_build_report() {
        let forecast = ForecastPayload {
            list: full_forecast(6),
        };
        let report = build_report(&current_payload(), &forecast, &UTC).unwrap();

        assert_eq!(report.city, "London");
        assert_eq!(report.country, "GB");
        assert_eq!(report.forecast.len(), 5);
    }

    #[test]
    fn test_forecast_sample_without_weather_entry_is_invalid() {
        let mut list = full_forecast(1);
        list[3].weather.clear();
        let forecast = ForecastPayload { list };

        assert!(matches!(
            build_report(&current_payload(), &forecast, &UTC),
            Err(WeatherError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(2.49), 2);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.51), -3);
        assert_eq!(round_half_up(0.0), 0);
    }

    #[test]
    fn test_report_serializes_wire_field_names() {
        let forecast = ForecastPayload {
            list: full_forecast(1),
        };
        let report = build_report(&current_payload(), &forecast, &UTC).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert!(json["forecast"][0]["dateFormatted"].is_string());
        assert!(json["forecast"][0]["temp"]["day"].is_i64());
        assert_eq!(json["current"]["wind_speed"], 36.0);
    }
}
