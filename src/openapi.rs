use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::error::ErrorResponse;
use crate::weather::handlers::HealthResponse;
use crate::weather::models::{CurrentConditions, DailyForecast, DayTemperatures, WeatherReport};

/// OpenAPI documentation for the Weather Compass JSON API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Weather Compass API",
        version = "1.0.0",
        description = "Current conditions and a 5-day forecast for any city, aggregated from OpenWeatherMap.",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(crate::weather::handlers::get_weather),
    tags(
        (name = "weather", description = "Current weather and daily forecast")
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            WeatherReport,
            CurrentConditions,
            DailyForecast,
            DayTemperatures,
        )
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI router
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
