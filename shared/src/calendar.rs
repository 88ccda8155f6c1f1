//! Six-week calendar grid aggregation.
//!
//! Buckets stored appointments and external events into the 42 days shown
//! by a month view, starting on the Sunday on or before the 1st.

use chrono::{Datelike, Days, Local, NaiveDate};
use serde::Serialize;

use crate::appointments::Appointment;
use crate::external::ExternalEventProvider;
use crate::{Error, Result};

/// Number of days in the month grid (6 weeks of 7 days).
pub const GRID_DAYS: usize = 42;

/// Number of days in a grid row.
pub const WEEK_DAYS: usize = 7;

/// Items a month cell shows before collapsing the rest into "+N more".
pub const MONTH_PREVIEW_LIMIT: usize = 2;

/// One cell of the calendar grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// Stored appointments first, then external events
    pub items: Vec<Appointment>,
    pub is_today: bool,
    pub is_current_month: bool,
}

impl CalendarDay {
    /// First `limit` items and how many were left out.
    pub fn preview(&self, limit: usize) -> (&[Appointment], usize) {
        let shown = self.items.len().min(limit);
        (&self.items[..shown], self.items.len() - shown)
    }
}

/// First day of the grid for `reference`'s month.
///
/// Fails when the full six weeks would run past the range chrono can represent.
pub fn grid_start(reference: NaiveDate) -> Result<NaiveDate> {
    let first = reference.with_day(1).unwrap_or(reference);
    let start = first.checked_sub_days(Days::new(u64::from(first.weekday().num_days_from_sunday())));

    match start {
        Some(start) if start.checked_add_days(Days::new(GRID_DAYS as u64 - 1)).is_some() => Ok(start),
        _ => Err(Error::InvalidDate(format!(
            "{}: month grid is outside the supported date range",
            reference
        ))),
    }
}

/// Build the 42-day grid for `reference`'s month, using the local clock for "today".
pub fn aggregate<P>(reference: NaiveDate, appointments: &[Appointment], provider: &P) -> Result<Vec<CalendarDay>>
where
    P: ExternalEventProvider + ?Sized,
{
    aggregate_at(reference, appointments, provider, Local::now().date_naive())
}

/// Build the 42-day grid for `reference`'s month with an explicit `today`.
pub fn aggregate_at<P>(
    reference: NaiveDate,
    appointments: &[Appointment],
    provider: &P,
    today: NaiveDate,
) -> Result<Vec<CalendarDay>>
where
    P: ExternalEventProvider + ?Sized,
{
    let start = grid_start(reference)?;

    let grid = start
        .iter_days()
        .take(GRID_DAYS)
        .map(|date| {
            let mut items: Vec<Appointment> = appointments
                .iter()
                .filter(|a| a.falls_on(date))
                .cloned()
                .collect();
            items.extend(provider.for_date(date));

            CalendarDay {
                date,
                items,
                is_today: date == today,
                is_current_month: date.year() == reference.year() && date.month() == reference.month(),
            }
        })
        .collect();

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appointments::{sample, AppointmentStore};
    use crate::external::{NoExternalEvents, WeeklyRules};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_grid_bounds_january_2024() {
        let grid = aggregate_at(day(2024, 1, 1), &[], &NoExternalEvents, day(2024, 1, 1)).unwrap();
        assert_eq!(grid.len(), GRID_DAYS);
        assert_eq!(grid[0].date, day(2023, 12, 31));
        assert_eq!(grid[41].date, day(2024, 2, 10));
    }

    #[test]
    fn test_grid_is_consecutive_for_many_months() {
        let mut reference = day(2023, 1, 17);
        for _ in 0..36 {
            let grid = aggregate_at(reference, &[], &NoExternalEvents, reference).unwrap();
            assert_eq!(grid.len(), GRID_DAYS);
            assert_eq!(grid[0].date.weekday(), chrono::Weekday::Sun);
            assert!(grid[0].date <= reference.with_day(1).unwrap());
            for pair in grid.windows(2) {
                assert_eq!(pair[1].date - pair[0].date, chrono::Duration::days(1));
            }
            reference = reference + chrono::Months::new(1);
        }
    }

    #[test]
    fn test_month_starting_on_sunday() {
        // 2023-10-01 is a Sunday
        assert_eq!(grid_start(day(2023, 10, 20)).unwrap(), day(2023, 10, 1));
    }

    #[test]
    fn test_appointment_lands_on_exact_day() {
        let appointments = vec![sample("a", "2024-01-15")];
        let grid = aggregate_at(day(2024, 1, 10), &appointments, &WeeklyRules::default(), day(2024, 1, 10)).unwrap();

        let hits: Vec<&CalendarDay> = grid
            .iter()
            .filter(|d| d.items.iter().any(|i| i.id == "a"))
            .collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].date, day(2024, 1, 15));

        // Monday: the booking first, then the synthetic team meeting
        assert_eq!(hits[0].items.len(), 2);
        assert_eq!(hits[0].items[0].id, "a");
        assert_eq!(hits[0].items[1].customer_name, "Team Meeting");
    }

    #[test]
    fn test_items_always_match_their_day() {
        let store = AppointmentStore::seeded();
        let grid = aggregate_at(day(2024, 1, 1), store.list(), &WeeklyRules::default(), day(2024, 1, 1)).unwrap();
        for cell in &grid {
            for item in &cell.items {
                assert_eq!(item.calendar_date().unwrap(), cell.date);
            }
        }
        let placed: usize = grid.iter().map(|d| d.items.iter().filter(|i| !i.is_external()).count()).sum();
        assert_eq!(placed, store.list().len());
    }

    #[test]
    fn test_invalid_dates_are_excluded() {
        let appointments = vec![
            sample("ok", "2024-01-16"),
            sample("bad", "16/01/2024"),
            sample("nonsense", "not a date"),
        ];
        let grid = aggregate_at(day(2024, 1, 1), &appointments, &NoExternalEvents, day(2024, 1, 1)).unwrap();
        let total: usize = grid.iter().map(|d| d.items.len()).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn test_is_today_flag() {
        let grid = aggregate_at(day(2024, 1, 1), &[], &NoExternalEvents, day(2024, 1, 20)).unwrap();
        let todays: Vec<_> = grid.iter().filter(|d| d.is_today).collect();
        assert_eq!(todays.len(), 1);
        assert_eq!(todays[0].date, day(2024, 1, 20));

        // Still inside the trailing days of the window
        let grid = aggregate_at(day(2024, 1, 1), &[], &NoExternalEvents, day(2024, 2, 10)).unwrap();
        assert_eq!(grid.iter().filter(|d| d.is_today).count(), 1);

        let grid = aggregate_at(day(2024, 1, 1), &[], &NoExternalEvents, day(2024, 2, 11)).unwrap();
        assert_eq!(grid.iter().filter(|d| d.is_today).count(), 0);
    }

    #[test]
    fn test_current_month_flag() {
        let grid = aggregate_at(day(2024, 1, 1), &[], &NoExternalEvents, day(2024, 1, 1)).unwrap();
        assert!(!grid[0].is_current_month);
        assert!(grid[1].is_current_month);
        assert_eq!(grid.iter().filter(|d| d.is_current_month).count(), 31);
    }

    #[test]
    fn test_preview_overflow() {
        let appointments = vec![
            sample("a", "2024-01-15"),
            sample("b", "2024-01-15"),
            sample("c", "2024-01-15"),
        ];
        let grid = aggregate_at(day(2024, 1, 1), &appointments, &WeeklyRules::default(), day(2024, 1, 1)).unwrap();
        let monday = grid.iter().find(|d| d.date == day(2024, 1, 15)).unwrap();
        let (shown, hidden) = monday.preview(2);
        assert_eq!(shown.len(), 2);
        assert_eq!(hidden, 2);

        let (shown, hidden) = grid[0].preview(2);
        assert!(shown.is_empty());
        assert_eq!(hidden, 0);
    }

    #[test]
    fn test_grid_at_the_edges_of_the_date_range() {
        let err = aggregate_at(NaiveDate::MIN, &[], &NoExternalEvents, NaiveDate::MIN).unwrap_err();
        assert!(matches!(err, Error::InvalidDate(_)));
        assert_eq!(err.status_code(), 400);

        assert!(matches!(
            aggregate_at(NaiveDate::MAX, &[], &NoExternalEvents, NaiveDate::MAX),
            Err(Error::InvalidDate(_))
        ));

        let earliest = NaiveDate::parse_from_str(&NaiveDate::MIN.to_string(), "%Y-%m-%d").unwrap();
        assert!(grid_start(earliest).is_err());

        // A month well inside the range still yields all 42 days
        let grid = aggregate_at(day(9999, 12, 1), &[], &NoExternalEvents, day(9999, 12, 1)).unwrap();
        assert_eq!(grid.len(), GRID_DAYS);
    }
}
