use crate::weather::aggregate::round_half_up;

pub const CITY_NOT_FOUND_MESSAGE: &str = "City not found. Please check the spelling.";

pub fn to_fahrenheit(celsius: i64) -> i64 {
    round_half_up(celsius as f64 * 9.0 / 5.0 + 32.0)
}

/// Bar heights in percent, scaled between the lowest and highest value.
/// A flat series has no range to scale over and renders as empty bars.
pub fn trend_heights(temps: &[i64]) -> Vec<f64> {
    let (Some(&min), Some(&max)) = (temps.iter().min(), temps.iter().max()) else {
        return Vec::new();
    };

    if max == min {
        return vec![0.0; temps.len()];
    }

    let range = (max - min) as f64;
    temps
        .iter()
        .map(|&t| (t - min) as f64 / range * 100.0)
        .collect()
}

/// Best-effort rewording of error text shown in the results view
pub fn friendly_error(message: &str) -> &str {
    if message.contains("404") {
        CITY_NOT_FOUND_MESSAGE
    } else {
        message
    }
}

/// Split "Mon, Jan 15" into ("Mon", "Jan 15")
pub fn split_day_label(date_formatted: &str) -> (&str, &str) {
    date_formatted
        .split_once(", ")
        .unwrap_or((date_formatted, ""))
}

/// First entry of a merged ", "-joined description
pub fn primary_description(description: &str) -> &str {
    description.split(", ").next().unwrap_or(description)
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
