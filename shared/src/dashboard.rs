//! Dashboard summaries over the appointment set.

use chrono::NaiveDate;
use serde::Serialize;

use crate::appointments::{Appointment, AppointmentStatus};

/// How many upcoming bookings the dashboard lists.
pub const DEFAULT_UPCOMING_LIMIT: usize = 5;

/// Headline numbers shown above the calendar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_bookings: usize,
    pub today_bookings: usize,
    pub pending_bookings: usize,
    /// Sum of prices over completed bookings
    pub revenue: f64,
}

impl DashboardStats {
    pub fn compute(appointments: &[Appointment], today: NaiveDate) -> Self {
        Self {
            total_bookings: appointments.len(),
            today_bookings: appointments.iter().filter(|a| a.falls_on(today)).count(),
            pending_bookings: appointments
                .iter()
                .filter(|a| a.status == AppointmentStatus::Pending)
                .count(),
            revenue: appointments
                .iter()
                .filter(|a| a.status == AppointmentStatus::Completed)
                .map(|a| a.price)
                .sum(),
        }
    }
}

/// Appointments dated after `today`, in store order, at most `limit`.
pub fn upcoming(appointments: &[Appointment], today: NaiveDate, limit: usize) -> Vec<Appointment> {
    appointments
        .iter()
        .filter(|a| a.calendar_date().is_ok_and(|date| date > today))
        .take(limit)
        .cloned()
        .collect()
}

/// A bookable service and its calendar colour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    pub name: String,
    /// Minutes
    pub duration: u32,
    pub price: f64,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceCatalog {
    services: Vec<Service>,
}

impl ServiceCatalog {
    const FALLBACK_COLOR: &'static str = "bg-gray-500";

    pub fn new(services: Vec<Service>) -> Self {
        Self { services }
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn find(&self, name: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.name == name)
    }

    pub fn color_for(&self, name: &str) -> &str {
        self.find(name).map_or(Self::FALLBACK_COLOR, |s| s.color.as_str())
    }
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        let service = |name: &str, duration: u32, price: f64, color: &str| Service {
            name: name.to_string(),
            duration,
            price,
            color: color.to_string(),
        };

        Self::new(vec![
            service("Hair Cut & Style", 90, 85.0, "bg-blue-500"),
            service("Dental Checkup", 60, 120.0, "bg-green-500"),
            service("Massage Therapy", 75, 95.0, "bg-purple-500"),
            service("Personal Training", 60, 75.0, "bg-orange-500"),
            service("Consultation", 45, 150.0, "bg-pink-500"),
            service("Meeting", 60, 0.0, "bg-gray-500"),
            service("Review", 90, 200.0, "bg-gray-500"),
            service("Planning", 120, 150.0, "bg-gray-500"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appointments::{sample, AppointmentStore};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_stats_over_seed() {
        let store = AppointmentStore::seeded();
        let stats = DashboardStats::compute(store.list(), day(2024, 1, 15));
        assert_eq!(
            stats,
            DashboardStats {
                total_bookings: 5,
                today_bookings: 2,
                pending_bookings: 1,
                revenue: 150.0,
            }
        );

        let later = DashboardStats::compute(store.list(), day(2024, 6, 1));
        assert_eq!(later.today_bookings, 0);
    }

    #[test]
    fn test_upcoming_is_strictly_after_today() {
        let store = AppointmentStore::seeded();
        let ids: Vec<String> = upcoming(store.list(), day(2024, 1, 16), DEFAULT_UPCOMING_LIMIT)
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec!["4", "5"]);

        assert_eq!(upcoming(store.list(), day(2023, 1, 1), 3).len(), 3);
        assert!(upcoming(store.list(), day(2025, 1, 1), 5).is_empty());
    }

    #[test]
    fn test_upcoming_skips_invalid_dates() {
        let appointments = vec![sample("bad", "tomorrow"), sample("ok", "2030-01-01")];
        let list = upcoming(&appointments, day(2024, 1, 1), 5);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, "ok");
    }

    #[test]
    fn test_service_colors() {
        let catalog = ServiceCatalog::default();
        assert_eq!(catalog.services().len(), 8);
        assert_eq!(catalog.color_for("Massage Therapy"), "bg-purple-500");
        assert_eq!(catalog.color_for("Unknown"), "bg-gray-500");
        assert_eq!(catalog.find("Planning").unwrap().duration, 120);
    }
}
