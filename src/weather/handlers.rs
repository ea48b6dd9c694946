use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::models::WeatherReport;
use super::service::WeatherError;
use crate::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WeatherQuery {
    /// City name to look up
    pub city: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Current conditions and 5-day forecast for a city
///
/// GET /api/weather?city=London
#[utoipa::path(
    get,
    path = "/api/weather",
    tag = "weather",
    params(WeatherQuery),
    responses(
        (status = 200, description = "Weather report", body = WeatherReport),
        (status = 400, description = "City missing or blank", body = crate::error::ErrorResponse),
        (status = 500, description = "Upstream or transport failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<WeatherReport>, WeatherError> {
    let report = state
        .weather_service
        .get_report(query.city.as_deref())
        .await?;

    Ok(Json(report))
}
