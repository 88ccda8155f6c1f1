//! Synthetic external-calendar events.
//!
//! Stands in for a connected Google Calendar: each weekday rule emits a
//! fixed recurring entry, derived purely from the date.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::appointments::{Appointment, AppointmentStatus, ItemSource, DATE_FORMAT};

/// Source of external calendar entries for a single date.
pub trait ExternalEventProvider {
    /// Events on `date`. Must be deterministic for a given date.
    fn for_date(&self, date: NaiveDate) -> Vec<Appointment>;
}

/// One recurring weekly entry.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyRule {
    pub weekday: Weekday,
    /// Suffix of the generated id, `google-{date}-{index}`
    pub index: u32,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub time: String,
    pub duration: u32,
    pub price: f64,
}

impl WeeklyRule {
    fn event_on(&self, date: NaiveDate) -> Appointment {
        let date_str = date.format(DATE_FORMAT).to_string();
        Appointment {
            id: format!("google-{}-{}", date_str, self.index),
            customer_name: self.title.clone(),
            customer_email: self.email.clone(),
            customer_phone: self.phone.clone(),
            service: self.service.clone(),
            date: date_str,
            time: self.time.clone(),
            duration: self.duration,
            status: AppointmentStatus::Confirmed,
            notes: None,
            price: self.price,
            source: ItemSource::ExternalCalendar,
        }
    }
}

/// Rule table keyed on day of week.
#[derive(Debug, Clone)]
pub struct WeeklyRules {
    rules: Vec<WeeklyRule>,
}

impl WeeklyRules {
    pub fn new(rules: Vec<WeeklyRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[WeeklyRule] {
        &self.rules
    }
}

impl Default for WeeklyRules {
    fn default() -> Self {
        let rule = |weekday: Weekday,
                    index: u32,
                    title: &str,
                    email: &str,
                    phone: &str,
                    service: &str,
                    time: &str,
                    duration: u32,
                    price: f64| {
            WeeklyRule {
                weekday,
                index,
                title: title.to_string(),
                email: email.to_string(),
                phone: phone.to_string(),
                service: service.to_string(),
                time: time.to_string(),
                duration,
                price,
            }
        };

        Self::new(vec![
            rule(Weekday::Mon, 1, "Team Meeting", "team@company.com", "+1 (555) 000-0000", "Meeting", "9:00 AM", 60, 0.0),
            rule(Weekday::Wed, 2, "Client Review", "client@email.com", "+1 (555) 111-1111", "Review", "2:00 PM", 90, 200.0),
            rule(Weekday::Fri, 3, "Planning Session", "planning@company.com", "+1 (555) 222-2222", "Planning", "3:30 PM", 120, 150.0),
        ])
    }
}

impl ExternalEventProvider for WeeklyRules {
    fn for_date(&self, date: NaiveDate) -> Vec<Appointment> {
        let weekday = date.weekday();
        self.rules
            .iter()
            .filter(|rule| rule.weekday == weekday)
            .map(|rule| rule.event_on(date))
            .collect()
    }
}

/// Provider that never emits anything, for a disconnected calendar.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExternalEvents;

impl ExternalEventProvider for NoExternalEvents {
    fn for_date(&self, _date: NaiveDate) -> Vec<Appointment> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_monday_team_meeting() {
        let events = WeeklyRules::default().for_date(day(2024, 1, 15));
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.id, "google-2024-01-15-1");
        assert_eq!(event.customer_name, "Team Meeting");
        assert_eq!(event.time, "9:00 AM");
        assert_eq!(event.duration, 60);
        assert_eq!(event.date, "2024-01-15");
        assert!(event.is_external());
    }

    #[test]
    fn test_wednesday_and_friday_rules() {
        let provider = WeeklyRules::default();

        let wed = provider.for_date(day(2024, 1, 17));
        assert_eq!(wed.len(), 1);
        assert_eq!(wed[0].customer_name, "Client Review");
        assert_eq!(wed[0].duration, 90);
        assert_eq!(wed[0].id, "google-2024-01-17-2");

        let fri = provider.for_date(day(2024, 1, 19));
        assert_eq!(fri.len(), 1);
        assert_eq!(fri[0].customer_name, "Planning Session");
        assert_eq!(fri[0].time, "3:30 PM");
        assert_eq!(fri[0].duration, 120);
    }

    #[test]
    fn test_other_days_are_empty() {
        let provider = WeeklyRules::default();
        for d in [day(2024, 1, 14), day(2024, 1, 16), day(2024, 1, 18), day(2024, 1, 20)] {
            assert!(provider.for_date(d).is_empty(), "{} should have no events", d);
        }
    }

    #[test]
    fn test_for_date_is_pure() {
        let provider = WeeklyRules::default();
        let date = day(2024, 3, 4);
        assert_eq!(provider.for_date(date), provider.for_date(date));
    }

    #[test]
    fn test_custom_rule_table() {
        let mut rule = WeeklyRules::default().rules()[0].clone();
        rule.weekday = Weekday::Sun;
        rule.index = 9;
        let provider = WeeklyRules::new(vec![rule]);
        assert_eq!(provider.for_date(day(2024, 1, 14))[0].id, "google-2024-01-14-9");
        assert!(provider.for_date(day(2024, 1, 15)).is_empty());
        assert!(NoExternalEvents.for_date(day(2024, 1, 15)).is_empty());
    }
}
