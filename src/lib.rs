//! Jira worklog to Zoho People bridge service.

use axum::routing::get;
use axum::Router;
use log::info;
use people_api::{PeopleClient, PeopleConfig};
use tokio::net::TcpListener;

pub mod config;
pub mod secrets;
pub mod webhook;

use config::Config;

pub const WEBHOOK_ROUTE: &str = "/api/JiraWorklogToPeople";

/// Shared handler state; the client owns the auth token for the life of the process.
#[derive(Clone)]
pub struct AppState {
    pub client: PeopleClient,
}

impl AppState {
    pub fn new(client: PeopleClient) -> Self {
        Self { client }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(WEBHOOK_ROUTE, get(webhook::handle).post(webhook::handle))
        .with_state(state)
}

/// Builds the People client from configuration and the auth token secret.
pub fn build_client(config: &Config, token: String) -> Result<PeopleClient, String> {
    let people_config = PeopleConfig::new(token)
        .with_base_url(config.people_base_url.clone())
        .with_timeout(config.request_timeout());
    PeopleClient::new(people_config).map_err(|err| format!("Failed to create People client: {err}"))
}

pub async fn run() -> Result<(), String> {
    let _ = dotenvy::dotenv();
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .format_timestamp_millis()
    .try_init();

    info!("Starting Jira worklog bridge");

    let config = Config::from_env();
    let token = secrets::load_auth_token()?;
    let client = build_client(&config, token)?;

    let listener = TcpListener::bind(&config.bind_address)
        .await
        .map_err(|err| format!("Failed to bind {}: {err}", config.bind_address))?;
    info!("Listening on {}{}", config.bind_address, WEBHOOK_ROUTE);

    axum::serve(listener, router(AppState::new(client)))
        .await
        .map_err(|err| format!("Server stopped: {err}"))
}

#[cfg(test)]
mod tests {
    use super::build_client;
    use crate::config::Config;
    use std::time::Duration;

    #[test]
    fn client_uses_configured_host_and_timeout() {
        let config = Config {
            people_base_url: "https://people.zoho.eu".to_string(),
            request_timeout_secs: 7,
            ..Config::default()
        };
        let client = build_client(&config, "token".to_string()).expect("client");
        assert_eq!(client.config().api_root(), "https://people.zoho.eu/people/api/");
        assert_eq!(client.config().timeout, Some(Duration::from_secs(7)));
    }

    #[test]
    fn blank_token_is_a_startup_error() {
        assert!(build_client(&Config::default(), "  ".to_string()).is_err());
    }
}
