/// Display glyph for an OpenWeatherMap icon code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherGlyph {
    Sun,
    CloudSun,
    Cloud,
    Clouds,
    Rain,
    Lightning,
    Snow,
    Fog,
}

impl WeatherGlyph {
    /// Map an icon code such as "10d" by its two-character prefix.
    /// Unknown codes fall back to [`WeatherGlyph::Cloud`].
    pub fn from_icon(icon: &str) -> Self {
        match icon.get(..2) {
            Some("01") => Self::Sun,
            Some("02") => Self::CloudSun,
            Some("03") => Self::Cloud,
            Some("04") => Self::Clouds,
            Some("09") | Some("10") => Self::Rain,
            Some("11") => Self::Lightning,
            Some("13") => Self::Snow,
            Some("50") => Self::Fog,
            _ => Self::Cloud,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Sun => "\u{2600}\u{FE0F}",
            Self::CloudSun => "\u{26C5}",
            Self::Cloud => "\u{2601}\u{FE0F}",
            Self::Clouds => "\u{1F325}\u{FE0F}",
            Self::Rain => "\u{1F327}\u{FE0F}",
            Self::Lightning => "\u{26C8}\u{FE0F}",
            Self::Snow => "\u{2744}\u{FE0F}",
            Self::Fog => "\u{1F32B}\u{FE0F}",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Sun => "sun",
            Self::CloudSun => "sun behind cloud",
            Self::Cloud => "cloud",
            Self::Clouds => "clouds",
            Self::Rain => "rain",
            Self::Lightning => "thunderstorm",
            Self::Snow => "snow",
            Self::Fog => "fog",
        }
    }
}

/// Colour scheme of the current-conditions card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backdrop {
    Rain,
    Cloud,
    Clear,
    Snow,
    Warm,
}

impl Backdrop {
    /// First matching keyword wins, in the order rain, cloud, clear, snow
    pub fn from_description(description: &str) -> Self {
        let desc = description.to_lowercase();
        if desc.contains("rain") {
            Self::Rain
        } else if desc.contains("cloud") {
            Self::Cloud
        } else if desc.contains("clear") {
            Self::Clear
        } else if desc.contains("snow") {
            Self::Snow
        } else {
            Self::Warm
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Rain => "backdrop-rain",
            Self::Cloud => "backdrop-cloud",
            Self::Clear => "backdrop-clear",
            Self::Snow => "backdrop-snow",
            Self::Warm => "backdrop-warm",
        }
    }
}
