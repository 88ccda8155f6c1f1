//! Google Calendar Events Lambda - Mock event listing and mutations.
//!
//! Endpoints:
//! - GET /v1/calendar/events?userType= - List canned events
//! - POST /v1/calendar/events - `{action: create|update|delete, eventData, userType}`

use chrono::Utc;
use lambda_http::{run, service_fn, Body, Error, Request, RequestExt, Response};
use shared::http::{domain_error_response, json_response, not_found};
use shared::mock_calendar::{create_event, list_events, update_event, EventAction, EventsRequest, UserType};
use shared::{ApiResponse, Config};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Application state
struct AppState {
    config: Config,
}

async fn list(state: &AppState, user_type: &UserType) -> Result<Response<Body>, Error> {
    tokio::time::sleep(state.config.list_latency).await;
    let events = list_events(user_type, Utc::now());
    info!(user_type = %user_type, count = events.items.len(), "Listed mock events");
    json_response(200, &ApiResponse::success(events))
}

async fn mutate(state: &AppState, body: &Body) -> Result<Response<Body>, Error> {
    let request: EventsRequest = match serde_json::from_slice(body.as_ref()) {
        Ok(request) => request,
        Err(e) => {
            error!(error = %e, "Failed to parse events request");
            return json_response(500, &ApiResponse::failure("Internal server error"));
        }
    };

    tokio::time::sleep(state.config.mutation_latency).await;

    let Some(action) = EventAction::parse(&request.action) else {
        warn!(action = %request.action, "Invalid event action");
        return json_response(400, &ApiResponse::failure("Invalid action"));
    };

    let outcome = match action {
        EventAction::Create => create_event(request.event_data, Utc::now())
            .map(|event| ApiResponse::with_message("Event created successfully", Some(event))),
        EventAction::Update => update_event(request.event_data, Utc::now())
            .map(|event| ApiResponse::with_message("Event updated successfully", Some(event))),
        EventAction::Delete => Ok(ApiResponse::with_message("Event deleted successfully", None)),
    };

    match outcome {
        Ok(response) => {
            info!(
                action = ?action,
                user_type = ?request.user_type.as_ref().map(UserType::as_str),
                "Applied mock event action"
            );
            json_response(200, &response)
        }
        Err(e) => {
            warn!(action = ?action, error = %e, "Rejected mock event action");
            domain_error_response(&e)
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
        ("GET", "/v1/calendar/events") => list(state, &user_type).await,
        ("POST", "/v1/calendar/events") => mutate(state, body).await,
        _ => not_found(),
    }
}

async fn handler(state: Arc<AppState>, event: Request) -> Result<Response<Body>, Error> {
    let method = event.method().as_str();
    let raw_path = event.uri().path();
    let path = raw_path.strip_prefix("/api").unwrap_or(raw_path);

    info!("Calendar events request: {} {}", method, path);

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
