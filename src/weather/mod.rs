pub mod aggregate;
pub mod handlers;
pub mod models;
pub mod provider;
pub mod service;

pub use provider::OpenWeatherMapProvider;
pub use service::WeatherService;
