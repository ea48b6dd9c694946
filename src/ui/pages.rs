//! Server-rendered HTML for the search and results views.

use super::display::{
    escape_html, friendly_error, primary_description, split_day_label, to_fahrenheit,
    trend_heights,
};
use super::glyph::{Backdrop, WeatherGlyph};
use crate::weather::models::{DailyForecast, WeatherReport};

pub const EMPTY_SEARCH_MESSAGE: &str = "Please enter a city name";
pub const NO_CITY_MESSAGE: &str = "No city specified";

/// What the results view is showing
#[derive(Debug)]
pub enum ResultsState<'a> {
    Loading,
    Failed(&'a str),
    Loaded {
        report: &'a WeatherReport,
        /// Long form of the current date, e.g. "Saturday, October 17"
        today: String,
    },
}

const STYLE: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; color: #29323c;
       background: linear-gradient(135deg, #f5f7fa 0%, #e4e8ed 50%, #d8dee6 100%); min-height: 100vh; }
main { max-width: 56rem; margin: 0 auto; padding: 2rem 1rem; }
.card { max-width: 28rem; margin: 4rem auto; background: #fff; border-radius: 1rem; padding: 2rem;
        box-shadow: 0 10px 25px rgba(0,0,0,.1); text-align: center; }
.card input { width: 100%; box-sizing: border-box; padding: .8rem; font-size: 1rem; border: 1px solid #ccc; border-radius: .5rem; }
.card button { width: 100%; margin-top: 1rem; padding: .8rem; border: 0; border-radius: .5rem; color: #fff;
               font-size: 1rem; background: linear-gradient(45deg, #ff7e5f 0%, #feb47b 100%); cursor: pointer; }
.inline-error { color: #e11d48; font-size: .9rem; }
.cities { display: grid; grid-template-columns: repeat(3, 1fr); gap: .75rem; margin-top: 1rem; }
.cities a { padding: .5rem; border: 1px solid #ccc; border-radius: .5rem; color: inherit; text-decoration: none; }
.footer { margin-top: 1.5rem; font-size: .85rem; color: #485563; }
.header { display: flex; justify-content: space-between; align-items: center; }
.unit-toggle { padding: .25rem .75rem; border: 0; border-radius: 999px; background: #f3f4f6; cursor: pointer; }
.current { border-radius: .75rem; padding: 1.5rem; box-shadow: 0 10px 15px rgba(0,0,0,.1); }
.current-top { display: flex; justify-content: space-between; }
.current h2 { text-transform: capitalize; margin: 0; }
.big { font-size: 3rem; font-weight: 700; margin: .5rem 0; }
.metrics { display: grid; grid-template-columns: repeat(3, 1fr); gap: 1rem; margin-top: 1rem; }
.metric { background: rgba(255,255,255,.2); padding: .5rem; border-radius: .5rem; }
.metric .label { font-size: .75rem; }
.metric .value { font-weight: 700; }
.backdrop-rain { background: #3b82f6; color: #fff; }
.backdrop-cloud { background: #9ca3af; color: #fff; }
.backdrop-clear { background: linear-gradient(135deg, #60a5fa, #2563eb); color: #fff; }
.backdrop-snow { background: #fff; color: #1f2937; }
.backdrop-warm { background: linear-gradient(135deg, #fbbf24, #d97706); color: #fff; }
.sun { display: flex; justify-content: space-between; margin-top: 1.5rem; padding: 1rem;
       border-radius: .75rem; background: linear-gradient(90deg, #fde68a, #fdba74); text-align: center; }
.forecast { display: grid; grid-template-columns: repeat(5, 1fr); gap: .75rem; }
.day { background: rgba(255,255,255,.8); border-radius: .5rem; padding: .75rem; text-align: center; }
.day.today { background: #dbeafe; border: 2px solid #93c5fd; }
.day .desc { font-size: .75rem; text-transform: capitalize; }
.day .range { display: flex; justify-content: space-between; font-size: .75rem; }
.glyph { font-size: 2rem; }
.glyph.xl { font-size: 3rem; }
.trend { margin-top: 2rem; background: #fff; border-radius: .75rem; padding: 1rem; }
.bars { display: flex; align-items: flex-end; height: 10rem; gap: .25rem; }
.bar-col { flex: 1; display: flex; flex-direction: column; align-items: center; justify-content: flex-end; height: 100%; }
.bar { width: 100%; background: linear-gradient(to top, #60a5fa, #2563eb); border-radius: .2rem .2rem 0 0; }
.banner { border-left: 4px solid #ef4444; background: #fef2f2; color: #b91c1c; padding: 1rem; }
.skeleton { background: #e5e7eb; border-radius: .75rem; animation: pulse 1.5s infinite; }
@keyframes pulse { 50% { opacity: .5; } }
"#;

/// Loads the results panel and flips temperatures between °C and °F without refetching
const RESULTS_SCRIPT: &str = r#"
(function () {
  var root = document.getElementById('results');
  fetch('/weather/panel?city=' + encodeURIComponent(root.dataset.city))
    .then(function (res) { return res.text(); })
    .then(function (html) { root.innerHTML = html; })
    .catch(function () {
      root.innerHTML = '<div class="banner"><p>Failed to fetch weather data</p></div>';
    });
  document.addEventListener('click', function (event) {
    var toggle = event.target.closest('[data-unit-toggle]');
    if (!toggle) return;
    var unit = toggle.dataset.unit === 'c' ? 'f' : 'c';
    toggle.dataset.unit = unit;
    toggle.textContent = '°' + unit.toUpperCase();
    document.querySelectorAll('[data-c]').forEach(function (el) {
      el.textContent = el.dataset[unit] + '°';
    });
  });
})();
"#;

fn layout(title: &str, body: &str, script: Option<&str>) -> String {
    let script = script
        .map(|s| format!("<script>{}</script>", s))
        .unwrap_or_default();

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}\n{script}\n</body>\n</html>\n",
        title = escape_html(title),
    )
}

fn weather_link(city: &str) -> String {
    format!("/weather?city={}", urlencoding::encode(city))
}

/// Search page with an optional inline validation message
pub fn home_page(popular_cities: &[String], query: &str, error: Option<&str>) -> String {
    let mut body = String::new();

    body.push_str("<main><div class=\"card\">\n");
    body.push_str("<h1>Weather Compass</h1>\n<p>Discover weather patterns across the globe</p>\n");
    body.push_str(&format!(
        "<form action=\"/search\" method=\"get\">\n\
         <input type=\"text\" name=\"city\" placeholder=\"Search for a city...\" value=\"{}\" autofocus>\n",
        escape_html(query)
    ));
    if let Some(error) = error {
        body.push_str(&format!(
            "<p class=\"inline-error\">{}</p>\n",
            escape_html(error)
        ));
    }
    body.push_str("<button type=\"submit\">Explore Weather</button>\n</form>\n");

    if !popular_cities.is_empty() {
        body.push_str("<p>Popular Cities</p>\n<div class=\"cities\">\n");
        for city in popular_cities {
            body.push_str(&format!(
                "<a href=\"{}\">{}</a>\n",
                escape_html(&weather_link(city)),
                escape_html(city)
            ));
        }
        body.push_str("</div>\n");
    }

    body.push_str("<p class=\"footer\">Powered by OpenWeatherMap API</p>\n</div></main>");

    layout("Weather Compass", &body, None)
}

/// Results page shell: shows the skeleton and loads the panel client-side
pub fn results_page(city: &str) -> String {
    let body = format!(
        "<main><div id=\"results\" data-city=\"{}\">\n{}\n</div></main>",
        escape_html(city),
        results_panel(&ResultsState::Loading)
    );

    layout(
        &format!("Weather in {}", city),
        &body,
        Some(RESULTS_SCRIPT),
    )
}

/// Results page for a request that carries no city at all
pub fn missing_city_page() -> String {
    let body = format!(
        "<main>{}</main>",
        results_panel(&ResultsState::Failed(NO_CITY_MESSAGE))
    );
    layout("Weather Compass", &body, None)
}

/// Inner markup of the results view for a given state
pub fn results_panel(state: &ResultsState<'_>) -> String {
    match state {
        ResultsState::Loading => skeleton(),
        ResultsState::Failed(message) => format!(
            "<div class=\"banner\"><p>{}</p></div>",
            escape_html(friendly_error(message))
        ),
        ResultsState::Loaded { report, today } => loaded(report, today),
    }
}

fn skeleton() -> String {
    let mut out = String::from(
        "<div class=\"skeleton\" style=\"height:2.5rem;width:16rem;margin:0 auto 1rem\"></div>\n\
         <div class=\"skeleton\" style=\"height:16rem\"></div>\n<div class=\"forecast\" style=\"margin-top:1rem\">\n",
    );
    for _ in 0..5 {
        out.push_str("<div class=\"skeleton\" style=\"height:8rem\"></div>\n");
    }
    out.push_str("</div>");
    out
}

fn temperature(celsius: i64) -> String {
    format!(
        "<span data-c=\"{c}\" data-f=\"{f}\">{c}\u{00B0}</span>",
        c = celsius,
        f = to_fahrenheit(celsius)
    )
}

fn glyph(icon: &str, class: &str) -> String {
    let glyph = WeatherGlyph::from_icon(icon);
    format!(
        "<span class=\"{}\" role=\"img\" aria-label=\"{}\">{}</span>",
        class,
        glyph.label(),
        glyph.symbol()
    )
}

fn metric(label: &str, value: &str) -> String {
    format!(
        "<div class=\"metric\"><p class=\"label\">{}</p><p class=\"value\">{}</p></div>",
        label, value
    )
}

fn loaded(report: &WeatherReport, today: &str) -> String {
    let current = &report.current;
    let mut out = String::new();

    out.push_str(&format!(
        "<div class=\"header\"><h1>Weather in {}, {}</h1>\
         <button type=\"button\" class=\"unit-toggle\" data-unit-toggle data-unit=\"c\">\u{00B0}C</button></div>\n",
        escape_html(&report.city),
        escape_html(&report.country)
    ));

    out.push_str(&format!(
        "<section class=\"current {}\">\n<div class=\"current-top\"><div>\
         <h2>{}</h2><p>{}</p><p class=\"big\">{}</p></div>{}</div>\n<div class=\"metrics\">\n",
        Backdrop::from_description(&current.description).css_class(),
        escape_html(&current.description),
        escape_html(today),
        temperature(current.temp),
        glyph(&current.icon, "glyph xl")
    ));
    for (label, value) in [
        ("Feels Like", temperature(current.feels_like)),
        ("Humidity", format!("{}%", current.humidity)),
        ("Wind", format!("{} km/h", current.wind_speed)),
        ("Pressure", format!("{} hPa", current.pressure)),
        ("Visibility", format!("{} km", current.visibility)),
    ] {
        out.push_str(&metric(label, &value));
        out.push('\n');
    }
    out.push_str("</div>\n</section>\n");

    out.push_str(&format!(
        "<section class=\"sun\"><div><p>\u{1F305}</p><p>Sunrise</p><p>{}</p></div>\
         <div><p>\u{1F307}</p><p>Sunset</p><p>{}</p></div></section>\n",
        escape_html(&current.sunrise),
        escape_html(&current.sunset)
    ));

    out.push_str("<h2>5-Day Forecast</h2>\n<div class=\"forecast\">\n");
    for (index, day) in report.forecast.iter().enumerate() {
        out.push_str(&forecast_card(day, index == 0));
    }
    out.push_str("</div>\n");

    if !report.forecast.is_empty() {
        out.push_str(&trend_chart(&report.forecast));
    }

    out
}

fn forecast_card(day: &DailyForecast, is_first: bool) -> String {
    let (weekday, month_day) = split_day_label(&day.date_formatted);
    format!(
        "<div class=\"day{}\"><p><strong>{}</strong></p><p>{}</p>{}\
         <p class=\"big-day\"><strong>{}</strong></p><p class=\"desc\">{}</p>\
         <div class=\"range\"><span>\u{2191}{}</span><span>\u{2193}{}</span></div></div>\n",
        if is_first { " today" } else { "" },
        escape_html(weekday),
        escape_html(month_day),
        glyph(&day.icon, "glyph"),
        temperature(day.temp.day),
        escape_html(primary_description(&day.description)),
        temperature(day.temp.max),
        temperature(day.temp.min)
    )
}

fn trend_chart(days: &[DailyForecast]) -> String {
    let temps: Vec<i64> = days.iter().map(|d| d.temp.day).collect();
    let mut out = String::from(
        "<section class=\"trend\"><h3>Temperature Trend</h3><div class=\"bars\">\n",
    );

    for (day, height) in days.iter().zip(trend_heights(&temps)) {
        let (weekday, _) = split_day_label(&day.date_formatted);
        out.push_str(&format!(
            "<div class=\"bar-col\"><div class=\"bar\" style=\"height: {:.1}%\"></div>\
             <p>{}</p><p>{}</p></div>\n",
            height,
            escape_html(weekday),
            temperature(day.temp.day)
        ));
    }

    out.push_str("</div></section>\n");
    out
}
