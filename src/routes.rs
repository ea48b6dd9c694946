use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    BoxError, Json, Router,
};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::error::ErrorResponse;
use crate::openapi::swagger_ui;
use crate::ui::handlers as ui_handlers;
use crate::weather::handlers as weather_handlers;
use crate::AppState;

/// Build the JSON API routes
fn api_routes() -> Router<AppState> {
    Router::new().route("/weather", get(weather_handlers::get_weather))
}

/// Build the server-rendered UI routes
fn ui_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(ui_handlers::home))
        .route("/search", get(ui_handlers::search))
        .route("/weather", get(ui_handlers::results))
        .route("/weather/panel", get(ui_handlers::panel))
}

/// Handle request timeout errors with the same flat JSON body as other failures
async fn handle_timeout_error(err: BoxError) -> Response {
    let message = if err.is::<tower::timeout::error::Elapsed>() {
        "Request timed out".to_string()
    } else {
        format!("Internal error: {}", err)
    };

    tracing::error!(error = %message, "Request aborted by timeout layer");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(message)),
    )
        .into_response()
}

/// Build the complete application router
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(weather_handlers::health))
        .nest("/api", api_routes())
        .merge(ui_routes())
        // Swagger UI for API documentation
        .merge(swagger_ui());

    if let Some(secs) = state.config.request_timeout_secs {
        router = router.layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout_error))
                .timeout(Duration::from_secs(secs)),
        );
    }

    router
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
