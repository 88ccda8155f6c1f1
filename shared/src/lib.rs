//! Shared library for the ScheduleAI calendar Lambda functions.
//!
//! The calendar core lives here: the appointment store, the synthetic external
//! calendar, the 42-day grid aggregation, and the day/week/month projection
//! with its navigation and selection state. The mock Google Calendar contracts
//! and the HTTP helpers used by the `api-gateway` handlers are here too.

pub mod appointments;
pub mod calendar;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod external;
pub mod http;
pub mod mock_calendar;
pub mod state;
pub mod view;

pub use appointments::{Appointment, AppointmentStatus, AppointmentStore, ItemSource};
pub use calendar::{aggregate, aggregate_at, CalendarDay, GRID_DAYS};
pub use config::Config;
pub use dashboard::{upcoming, DashboardStats, ServiceCatalog};
pub use error::{Error, Result};
pub use external::{ExternalEventProvider, NoExternalEvents, WeeklyRules};
pub use http::ApiResponse;
pub use state::{CalendarState, MonthStep, Selection};
pub use view::{project, ViewMode, ViewSlice};
