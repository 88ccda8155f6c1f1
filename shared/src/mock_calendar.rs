//! Contracts and canned data for the mock Google Calendar endpoints.
//!
//! Nothing here talks to Google or stores anything: connect, disconnect and
//! event mutations only echo what a real integration would return.

use std::fmt;

use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Map, Value};
use uuid::Uuid;
use validator::Validate;

use crate::{Config, Error, Result};

/// Scope advertised by the mock token and consent URL.
pub const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar";

/// Which dashboard is asking, kept exactly as the caller sent it.
///
/// Only `"user"` picks the user's canned events; any other value is treated
/// as a business client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UserType(String);

impl UserType {
    pub fn user() -> Self {
        Self("user".to_string())
    }

    pub fn client() -> Self {
        Self("client".to_string())
    }

    /// Query-string value. Missing or empty means `user`.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some(raw) if !raw.is_empty() => Self(raw.to_string()),
            _ => Self::user(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_user(&self) -> bool {
        self.0 == "user"
    }
}

impl Default for UserType {
    fn default() -> Self {
        Self::user()
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body field reader: strings are kept, other scalars are stringified and
/// `null` counts as absent.
fn lenient_user_type<'de, D>(deserializer: D) -> std::result::Result<Option<UserType>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(raw)) => Some(UserType(raw)),
        Some(other) => Some(UserType(other.to_string())),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    pub date_time: String,
    pub time_zone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub response_status: String,
}

/// An event in Google Calendar's shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<Attendee>>,
    pub status: String,
    pub html_link: String,
}

/// Event listing payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventList {
    pub items: Vec<CalendarEvent>,
    pub next_sync_token: String,
}

/// Token set handed out by the mock OAuth endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct MockTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub scope: String,
    pub token_type: String,
    #[serde(rename = "userType")]
    pub user_type: UserType,
    pub auth_url: String,
}

impl MockTokens {
    pub fn issue(config: &Config, user_type: UserType, now: DateTime<Utc>) -> Self {
        let auth_url = consent_url(config, &user_type);
        let stamp = now.timestamp_millis();
        Self {
            access_token: format!("mock_access_token_{}", stamp),
            refresh_token: format!("mock_refresh_token_{}", stamp),
            expires_in: 3600,
            scope: CALENDAR_SCOPE.to_string(),
            token_type: "Bearer".to_string(),
            user_type,
            auth_url,
        }
    }
}

/// Consent URL a real integration would redirect to. The state carries the user type.
pub fn consent_url(config: &Config, user_type: &UserType) -> String {
    let state_param = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(user_type.as_str());

    format!(
        "https://accounts.google.com/o/oauth2/v2/auth?\
        client_id={}&\
        redirect_uri={}&\
        response_type=code&\
        scope={}&\
        access_type=offline&\
        prompt=consent&\
        state={}",
        urlencoding::encode(&config.google_client_id),
        urlencoding::encode(&config.redirect_uri),
        urlencoding::encode(CALENDAR_SCOPE),
        state_param
    )
}

/// `POST` body of the auth endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRequest {
    pub action: String,
    #[serde(default, deserialize_with = "lenient_user_type")]
    pub user_type: Option<UserType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    Connect,
    Disconnect,
}

impl AuthAction {
    pub fn parse(action: &str) -> Option<Self> {
        match action {
            "connect" => Some(AuthAction::Connect),
            "disconnect" => Some(AuthAction::Disconnect),
            _ => None,
        }
    }
}

/// Connection status after a connect/disconnect.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStatus {
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_type: Option<UserType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

impl ConnectionStatus {
    /// Echoes whatever user type the caller sent, if any.
    pub fn connected(user_type: Option<UserType>) -> Self {
        Self {
            connected: true,
            user_type,
            permissions: Some(vec!["read".to_string(), "write".to_string()]),
        }
    }

    pub fn disconnected() -> Self {
        Self {
            connected: false,
            user_type: None,
            permissions: None,
        }
    }
}

/// `POST` body of the events endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsRequest {
    pub action: String,
    #[serde(default)]
    pub event_data: Option<Value>,
    #[serde(default, deserialize_with = "lenient_user_type")]
    pub user_type: Option<UserType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventAction {
    Create,
    Update,
    Delete,
}

impl EventAction {
    pub fn parse(action: &str) -> Option<Self> {
        match action {
            "create" => Some(EventAction::Create),
            "update" => Some(EventAction::Update),
            "delete" => Some(EventAction::Delete),
            _ => None,
        }
    }
}

/// Minimum shape an event must have to be created.
#[derive(Debug, Deserialize, Validate)]
struct EventDraft {
    #[validate(length(min = 1, message = "summary must not be empty"))]
    summary: String,
    #[validate(length(max = 8192))]
    description: Option<String>,
}

fn event_object(event_data: Option<Value>) -> Result<Map<String, Value>> {
    match event_data {
        Some(Value::Object(map)) => Ok(map),
        Some(_) => Err(Error::Validation("eventData must be an object".to_string())),
        None => Ok(Map::new()),
    }
}

/// Echo a created event with a fresh id and Google-style metadata.
pub fn create_event(event_data: Option<Value>, now: DateTime<Utc>) -> Result<Value> {
    let fields = event_object(event_data)?;
    let draft: EventDraft = serde_json::from_value(Value::Object(fields.clone()))
        .map_err(|e| Error::Validation(e.to_string()))?;
    draft.validate()?;

    let id = format!("new_event_{}", Uuid::new_v4().simple());
    let stamp = now.to_rfc3339();

    let mut event = Map::new();
    event.insert("id".to_string(), json!(id));
    event.extend(fields);
    event.insert("status".to_string(), json!("confirmed"));
    event.insert(
        "htmlLink".to_string(),
        json!(format!("https://calendar.google.com/event?eid={}", id)),
    );
    event.insert("created".to_string(), json!(stamp));
    event.insert("updated".to_string(), json!(stamp));
    Ok(Value::Object(event))
}

/// Echo an updated event with a fresh `updated` stamp.
pub fn update_event(event_data: Option<Value>, now: DateTime<Utc>) -> Result<Value> {
    let mut event = event_object(event_data)?;
    event.insert("updated".to_string(), json!(now.to_rfc3339()));
    Ok(Value::Object(event))
}

/// Canned events for each dashboard.
pub fn mock_events(user_type: &UserType) -> Vec<CalendarEvent> {
    if user_type.is_user() {
        vec![
            canned("user_event_1", "Hair Appointment", "Scheduled via ScheduleAI", ("2024-01-15T10:00:00-05:00", "2024-01-15T11:30:00-05:00"), "Downtown Salon", None, "confirmed"),
            canned("user_event_2", "Dental Checkup", "Scheduled via ScheduleAI", ("2024-01-18T14:30:00-05:00", "2024-01-18T15:30:00-05:00"), "City Dental Care", None, "confirmed"),
        ]
    } else {
        vec![
            canned(
                "client_event_1",
                "Sarah Johnson - Hair Cut & Style",
                "Customer appointment scheduled via ScheduleAI",
                ("2024-01-15T10:00:00-05:00", "2024-01-15T11:30:00-05:00"),
                "Downtown Salon",
                Some(("sarah.j@email.com", "Sarah Johnson", "accepted")),
                "confirmed",
            ),
            canned(
                "client_event_2",
                "Michael Chen - Dental Checkup",
                "Customer appointment scheduled via ScheduleAI",
                ("2024-01-15T14:30:00-05:00", "2024-01-15T15:30:00-05:00"),
                "City Dental Care",
                Some(("m.chen@email.com", "Michael Chen", "accepted")),
                "confirmed",
            ),
            canned(
                "client_event_3",
                "Emma Davis - Massage Therapy",
                "Customer appointment scheduled via ScheduleAI - Deep tissue massage requested",
                ("2024-01-16T16:00:00-05:00", "2024-01-16T17:15:00-05:00"),
                "Wellness Center",
                Some(("emma.davis@email.com", "Emma Davis", "needsAction")),
                "tentative",
            ),
        ]
    }
}

/// Listing with a throwaway sync token.
pub fn list_events(user_type: &UserType, now: DateTime<Utc>) -> EventList {
    EventList {
        items: mock_events(user_type),
        next_sync_token: format!("mock_sync_token_{}", now.timestamp_millis()),
    }
}

fn canned(
    id: &str,
    summary: &str,
    description: &str,
    (start, end): (&str, &str),
    location: &str,
    attendee: Option<(&str, &str, &str)>,
    status: &str,
) -> CalendarEvent {
    let at = |date_time: &str| EventTime {
        date_time: date_time.to_string(),
        time_zone: "America/New_York".to_string(),
    };

    CalendarEvent {
        id: id.to_string(),
        summary: summary.to_string(),
        description: Some(description.to_string()),
        start: at(start),
        end: at(end),
        location: Some(location.to_string()),
        attendees: attendee.map(|(email, name, response)| {
            vec![Attendee {
                email: email.to_string(),
                display_name: Some(name.to_string()),
                response_status: response.to_string(),
            }]
        }),
        status: status.to_string(),
        html_link: format!("https://calendar.google.com/event?eid={}", id),
    }
}
