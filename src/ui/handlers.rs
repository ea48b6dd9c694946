use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use super::pages::{self, ResultsState};
use crate::error::HttpError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CityQuery {
    pub city: Option<String>,
}

impl CityQuery {
    /// Trimmed city, or None when absent or blank
    fn trimmed(&self) -> Option<&str> {
        self.city
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// GET /
pub async fn home(State(state): State<AppState>) -> Html<String> {
    Html(pages::home_page(&state.config.popular_cities, "", None))
}

/// GET /search?city=...
///
/// Blank input stays on the search page with an inline message.
pub async fn search(State(state): State<AppState>, Query(query): Query<CityQuery>) -> Response {
    match query.trimmed() {
        Some(city) => {
            Redirect::to(&format!("/weather?city={}", urlencoding::encode(city))).into_response()
        }
        None => Html(pages::home_page(
            &state.config.popular_cities,
            query.city.as_deref().unwrap_or_default(),
            Some(pages::EMPTY_SEARCH_MESSAGE),
        ))
        .into_response(),
    }
}

/// GET /weather?city=...
pub async fn results(Query(query): Query<CityQuery>) -> Html<String> {
    match query.trimmed() {
        Some(city) => Html(pages::results_page(city)),
        None => Html(pages::missing_city_page()),
    }
}

/// GET /weather/panel?city=...
///
/// Rendered results fragment, fetched by the results page.
pub async fn panel(State(state): State<AppState>, Query(query): Query<CityQuery>) -> Response {
    let service = &state.weather_service;

    match service.get_report(query.city.as_deref()).await {
        Ok(report) => {
            let today = service.timezone().now().format("%A, %B %-d").to_string();
            Html(pages::results_panel(&ResultsState::Loaded {
                report: &report,
                today,
            }))
            .into_response()
        }
        Err(e) => {
            let status = e.status_code();
            tracing::warn!(error = %e, status = %status, "Results panel failed");
            let message = e.to_string();
            (
                status,
                Html(pages::results_panel(&ResultsState::Failed(&message))),
            )
                .into_response()
        }
    }
}
