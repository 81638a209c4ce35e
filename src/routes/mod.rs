use axum::{
    Router,
    routing::{get, post},
};
use flowsense_contact::Relay;

mod contact;
mod health;

#[derive(Clone)]
pub struct AppState {
    pub relay: Relay,
}

impl AppState {
    pub fn new(config: &crate::config::Config) -> anyhow::Result<Self> {
        let relay = Relay::new(config.webhook.relay_options())?;

        Ok(Self { relay })
    }
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        // Health check endpoints
        .route("/health", get(health::health))
        .route(flowsense_contact::CONTACT_PATH, post(contact::action))
        .with_state(app_state)
}
