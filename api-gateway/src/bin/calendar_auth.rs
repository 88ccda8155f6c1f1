//! Google Calendar Auth Lambda - Mock OAuth and connection toggling.
//!
//! No tokens are exchanged and no connection is stored; the responses
//! mirror what the dashboard expects from a real integration.
//!
//! Endpoints:
//! - GET /v1/calendar/auth?userType= - Issue mock tokens and a consent URL
//! - POST /v1/calendar/auth - `{action: connect|disconnect, userType}`

use chrono::Utc;
use lambda_http::{run, service_fn, Body, Error, Request, RequestExt, Response};
use shared::http::{json_response, not_found};
use shared::mock_calendar::{AuthAction, AuthRequest, ConnectionStatus, MockTokens, UserType};
use shared::{ApiResponse, Config};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Application state
struct AppState {
    config: Config,
}

async fn issue_tokens(state: &AppState, user_type: UserType) -> Result<Response<Body>, Error> {
    info!(user_type = %user_type, "Issuing mock calendar tokens");
    let tokens = MockTokens::issue(&state.config, user_type, Utc::now());

    json_response(
        200,
        &ApiResponse::with_message("Google Calendar authentication successful", Some(tokens)),
    )
}

async fn change_connection(state: &AppState, body: &Body) -> Result<Response<Body>, Error> {
    let request: AuthRequest = match serde_json::from_slice(body.as_ref()) {
        Ok(request) => request,
        Err(e) => {
            error!(error = %e, "Failed to parse auth request");
            return json_response(500, &ApiResponse::failure("Internal server error"));
        }
    };

    match AuthAction::parse(&request.action) {
        Some(AuthAction::Connect) => {
            tokio::time::sleep(state.config.connect_latency).await;
            info!(user_type = ?request.user_type.as_ref().map(UserType::as_str), "Connected mock calendar");
            json_response(
                200,
                &ApiResponse::with_message(
                    "Google Calendar connected successfully",
                    Some(ConnectionStatus::connected(request.user_type)),
                ),
            )
        }
        Some(AuthAction::Disconnect) => {
            info!(user_type = ?request.user_type.as_ref().map(UserType::as_str), "Disconnected mock calendar");
            json_response(
                200,
                &ApiResponse::with_message(
                    "Google Calendar disconnected successfully",
                    Some(ConnectionStatus::disconnected()),
                ),
            )
        }
        None => {
            warn!(action = %request.action, "Invalid auth action");
            json_response(400, &ApiResponse::failure("Invalid action"))
        }
    }
}

async fn route(
    state: &AppState,
    method: &str,
    path: &str,
    user_type: UserType,
    body: &Body,
) -> Result<Response<Body>, Error> {
    match (method, path) {
        ("GET", "/v1/calendar/auth") => issue_tokens(state, user_type).await,
        ("POST", "/v1/calendar/auth") => change_connection(state, body).await,
        _ => not_found(),
    }
}

async fn handler(state: Arc<AppState>, event: Request) -> Result<Response<Body>, Error> {
    let method = event.method().as_str();
    let raw_path = event.uri().path();
    let path = raw_path.strip_prefix("/api").unwrap_or(raw_path);

    info!("Calendar auth request: {} {}", method, path);

    let params = event.query_string_parameters();
    let user_type = UserType::from_param(params.first("userType"));
    route(&state, method, path, user_type, event.body()).await
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = Arc::new(AppState {
        config: Config::from_env()?,
    });

    run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { handler(state, event).await }
    }))
    .await
}
