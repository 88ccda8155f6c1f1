//! Appointment records and the in-memory store that holds them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Date format used on the wire for appointment dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Confirmed,
    Pending,
    Cancelled,
    Completed,
}

/// Where a calendar item came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemSource {
    #[default]
    Booking,
    ExternalCalendar,
}

/// A booked appointment, or a synthetic external-calendar entry with the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub service: String,
    /// Raw `YYYY-MM-DD` date as received. Parsed lazily, see [`Appointment::calendar_date`].
    pub date: String,
    /// Display time such as `"10:00 AM"`
    pub time: String,
    /// Duration in minutes
    pub duration: u32,
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub source: ItemSource,
}

impl Appointment {
    /// Parse the stored date.
    pub fn calendar_date(&self) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT)
            .map_err(|e| Error::InvalidDate(format!("{} ({}): {}", self.date, self.id, e)))
    }

    /// True when the appointment is dated exactly `date`. Unparsable dates never match.
    pub fn falls_on(&self, date: NaiveDate) -> bool {
        match self.calendar_date() {
            Ok(own) => own == date,
            Err(e) => {
                tracing::debug!(appointment_id = %self.id, error = %e, "Excluding appointment with invalid date");
                false
            }
        }
    }

    pub fn is_external(&self) -> bool {
        self.source == ItemSource::ExternalCalendar
    }
}

/// Canonical set of appointment records.
///
/// Backed by a static seed list; there is no persistence behind it.
#[derive(Debug, Clone, Default)]
pub struct AppointmentStore {
    appointments: Vec<Appointment>,
}

impl AppointmentStore {
    pub fn new(appointments: Vec<Appointment>) -> Self {
        Self { appointments }
    }

    /// The dashboard's demo bookings for the week of 2024-01-15.
    pub fn seeded() -> Self {
        Self::new(vec![
            booking(
                "1",
                ("Sarah Johnson", "sarah.j@email.com", "+1 (555) 123-4567"),
                ("Hair Cut & Style", "2024-01-15", "10:00 AM", 90),
                AppointmentStatus::Confirmed,
                Some("First time customer, prefers shorter styles"),
                85.0,
            ),
            booking(
                "2",
                ("Michael Chen", "m.chen@email.com", "+1 (555) 234-5678"),
                ("Dental Checkup", "2024-01-15", "2:30 PM", 60),
                AppointmentStatus::Confirmed,
                None,
                120.0,
            ),
            booking(
                "3",
                ("Emma Davis", "emma.davis@email.com", "+1 (555) 345-6789"),
                ("Massage Therapy", "2024-01-16", "4:00 PM", 75),
                AppointmentStatus::Pending,
                Some("Requested deep tissue massage"),
                95.0,
            ),
            booking(
                "4",
                ("James Wilson", "j.wilson@email.com", "+1 (555) 456-7890"),
                ("Personal Training", "2024-01-17", "9:00 AM", 60),
                AppointmentStatus::Confirmed,
                None,
                75.0,
            ),
            booking(
                "5",
                ("Lisa Brown", "lisa.b@email.com", "+1 (555) 567-8901"),
                ("Consultation", "2024-01-18", "11:30 AM", 45),
                AppointmentStatus::Completed,
                None,
                150.0,
            ),
        ])
    }

    pub fn list(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn find(&self, id: &str) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }
}

fn booking(
    id: &str,
    (name, email, phone): (&str, &str, &str),
    (service, date, time, duration): (&str, &str, &str, u32),
    status: AppointmentStatus,
    notes: Option<&str>,
    price: f64,
) -> Appointment {
    Appointment {
        id: id.to_string(),
        customer_name: name.to_string(),
        customer_email: email.to_string(),
        customer_phone: phone.to_string(),
        service: service.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        duration,
        status,
        notes: notes.map(String::from),
        price,
        source: ItemSource::Booking,
    }
}

#[cfg(test)]
pub(crate) fn sample(id: &str, date: &str) -> Appointment {
    booking(
        id,
        ("Test Customer", "test@example.com", "+1 (555) 999-9999"),
        ("Consultation", date, "10:00 AM", 30),
        AppointmentStatus::Confirmed,
        None,
        50.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_appointment_json() {
        let json = r#"{
            "id": "7",
            "customerName": "Ana Lima",
            "customerEmail": "ana@example.com",
            "customerPhone": "+1 (555) 777-0000",
            "service": "Consultation",
            "date": "2024-02-03",
            "time": "1:00 PM",
            "duration": 45,
            "status": "pending",
            "price": 150
        }"#;
        let appointment: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(appointment.status, AppointmentStatus::Pending);
        assert_eq!(appointment.source, ItemSource::Booking);
        assert_eq!(
            appointment.calendar_date().unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 3).unwrap()
        );
    }

    #[test]
    fn test_invalid_date_never_matches() {
        let appointment = sample("bad", "2024-02-30");
        assert!(matches!(appointment.calendar_date(), Err(Error::InvalidDate(_))));
        assert!(!appointment.falls_on(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));

        let empty = sample("empty", "");
        assert!(!empty.falls_on(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
    }

    #[test]
    fn test_seeded_store() {
        let store = AppointmentStore::seeded();
        assert_eq!(store.list().len(), 5);
        assert_eq!(store.find("3").unwrap().customer_name, "Emma Davis");
        assert!(store.find("99").is_none());
    }
}
