//! Calendar Lambda - Serves the dashboard calendar views.
//!
//! Endpoints:
//! - GET /v1/calendar?date=&view=&step=&selected= - Projected day/week/month view
//! - GET /v1/calendar/stats - Booking stats for today
//! - GET /v1/calendar/upcoming?limit= - Bookings after today
//! - GET /v1/calendar/services - Bookable services and their colours

use chrono::{Local, NaiveDate};
use lambda_http::{run, service_fn, Body, Error, Request, RequestExt, Response};
use serde::Serialize;
use shared::appointments::DATE_FORMAT;
use shared::calendar::MONTH_PREVIEW_LIMIT;
use shared::dashboard::DEFAULT_UPCOMING_LIMIT;
use shared::http::{domain_error_response, json_response, not_found};
use shared::{
    upcoming, ApiResponse, Appointment, AppointmentStore, CalendarState, Config, DashboardStats,
    MonthStep, ServiceCatalog, ViewMode, ViewSlice, WeeklyRules,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Query parameters accepted by the calendar routes
#[derive(Debug)]
struct CalendarQuery {
    date: Option<String>,
    view: Option<String>,
    step: Option<String>,
    selected: Option<String>,
    limit: Option<String>,
}

impl CalendarQuery {
    fn from_request(event: &Request) -> Self {
        let params = event.query_string_parameters();
        let get = |key: &str| params.first(key).map(String::from);
        Self {
            date: get("date"),
            view: get("view"),
            step: get("step"),
            selected: get("selected"),
            limit: get("limit"),
        }
    }
}

/// Calendar view payload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CalendarResponse {
    reference_date: NaiveDate,
    view: ViewMode,
    slice: ViewSlice,
    selected: Option<Appointment>,
    /// Colour of every service visible in the slice
    colors: BTreeMap<String, String>,
    /// Month cells with more items than fit, and how many are hidden
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    more: BTreeMap<NaiveDate, usize>,
}

/// Application state
struct AppState {
    config: Config,
    store: AppointmentStore,
    provider: WeeklyRules,
    catalog: ServiceCatalog,
}

impl AppState {
    fn new(config: Config) -> Self {
        Self {
            config,
            store: AppointmentStore::seeded(),
            provider: WeeklyRules::default(),
            catalog: ServiceCatalog::default(),
        }
    }

    /// Rebuild the calendar state a request describes.
    fn calendar_state(&self, query: &CalendarQuery, today: NaiveDate) -> shared::Result<CalendarState> {
        let reference = match query.date.as_deref() {
            Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .map_err(|e| shared::Error::InvalidDate(format!("{}: {}", raw, e)))?,
            None => today,
        };
        let mode = match query.view.as_deref() {
            Some(tag) => tag.parse::<ViewMode>()?,
            None => self.config.default_view,
        };

        let mut state = CalendarState::new(reference, mode);
        if let Some(step) = query.step.as_deref() {
            state.advance_month(step.parse::<MonthStep>()?)?;
        }
        Ok(state)
    }

    fn calendar_view(&self, query: &CalendarQuery, today: NaiveDate) -> shared::Result<CalendarResponse> {
        let mut state = self.calendar_state(query, today)?;
        let slice = state.view(&self.store, &self.provider, today)?;

        if let Some(id) = query.selected.as_deref() {
            let found = self
                .store
                .find(id)
                .or_else(|| slice.items().into_iter().find(|item| item.id == id))
                .cloned();
            if found.is_none() {
                warn!(selected = %id, "Selected item not found");
            }
            state.select(found);
        }

        let colors: BTreeMap<String, String> = slice
            .items()
            .into_iter()
            .map(|item| (item.service.clone(), self.catalog.color_for(&item.service).to_string()))
            .collect();

        let more: BTreeMap<NaiveDate, usize> = match &slice {
            ViewSlice::Month { weeks } => weeks
                .iter()
                .flatten()
                .filter_map(|cell| match cell.preview(MONTH_PREVIEW_LIMIT) {
                    (_, 0) => None,
                    (_, hidden) => Some((cell.date, hidden)),
                })
                .collect(),
            _ => BTreeMap::new(),
        };

        Ok(CalendarResponse {
            reference_date: state.reference_date(),
            view: state.view_mode(),
            selected: state.selection().item().cloned(),
            slice,
            colors,
            more,
        })
    }
}

fn route(
    state: &AppState,
    method: &str,
    path: &str,
    query: &CalendarQuery,
    today: NaiveDate,
) -> Result<Response<Body>, Error> {
    match (method, path) {
        ("GET", "/v1/calendar") => match state.calendar_view(query, today) {
            Ok(view) => json_response(200, &ApiResponse::success(view)),
            Err(e) => {
                warn!(error = %e, "Rejected calendar request");
                domain_error_response(&e)
            }
        },

        ("GET", "/v1/calendar/stats") => {
            let stats = DashboardStats::compute(state.store.list(), today);
            json_response(200, &ApiResponse::success(stats))
        }

        ("GET", "/v1/calendar/upcoming") => {
            let limit = query
                .limit
                .as_deref()
                .and_then(|l| l.parse().ok())
                .unwrap_or(DEFAULT_UPCOMING_LIMIT);
            json_response(200, &ApiResponse::success(upcoming(state.store.list(), today, limit)))
        }

        ("GET", "/v1/calendar/services") => json_response(200, &ApiResponse::success(state.catalog.services())),

        _ => not_found(),
    }
}

async fn handler(state: Arc<AppState>, event: Request) -> Result<Response<Body>, Error> {
    let method = event.method().as_str();
    let raw_path = event.uri().path();
    // Strip /api stage prefix if present (API Gateway REST API includes stage in path)
    let path = raw_path.strip_prefix("/api").unwrap_or(raw_path);

    info!("Calendar request: {} {}", method, path);

    let query = CalendarQuery::from_request(&event);
    route(&state, method, path, &query, Local::now().date_naive())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = Arc::new(AppState::new(Config::from_env()?));

    run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { handler(state, event).await }
    }))
    .await
}
