pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
pub mod routes;

pub use config::Config;
pub use routes::AppState;

/// Builds the application router with its layers, minus tracing.
///
/// Used by `serve` and by the integration tests to exercise the routes
/// without binding a socket.
pub fn create_app(config: Config) -> anyhow::Result<axum::Router> {
    let state = AppState::new(&config)?;

    Ok(routes::router(state).layer(axum::middleware::from_fn(
        middleware::cache_control_middleware,
    )))
}
