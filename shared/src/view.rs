//! Day/week/month projection of the calendar grid.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::appointments::Appointment;
use crate::calendar::{CalendarDay, GRID_DAYS, WEEK_DAYS};
use crate::{Error, Result};

/// Which slice of the calendar is displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Day,
    #[default]
    Week,
    Month,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Day => "day",
            ViewMode::Week => "week",
            ViewMode::Month => "month",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(ViewMode::Day),
            "week" => Ok(ViewMode::Week),
            "month" => Ok(ViewMode::Month),
            _ => Err(Error::UnknownViewMode(s.to_string())),
        }
    }
}

/// What the presentation layer renders for a view mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ViewSlice {
    /// Six rows of seven days
    Month { weeks: Vec<Vec<CalendarDay>> },
    /// The grid's first row
    Week { days: Vec<CalendarDay> },
    /// Stored appointments on a single date
    Day { date: NaiveDate, appointments: Vec<Appointment> },
}

impl ViewSlice {
    pub fn mode(&self) -> ViewMode {
        match self {
            ViewSlice::Month { .. } => ViewMode::Month,
            ViewSlice::Week { .. } => ViewMode::Week,
            ViewSlice::Day { .. } => ViewMode::Day,
        }
    }

    /// Every item visible in the slice, in display order.
    pub fn items(&self) -> Vec<&Appointment> {
        match self {
            ViewSlice::Month { weeks } => weeks.iter().flatten().flat_map(|d| d.items.iter()).collect(),
            ViewSlice::Week { days } => days.iter().flat_map(|d| d.items.iter()).collect(),
            ViewSlice::Day { appointments, .. } => appointments.iter().collect(),
        }
    }
}

/// Slice `grid` for `mode`.
///
/// Week mode is always the grid's first row, the week containing the 1st of
/// the month, whatever the reference day is. Day mode ignores the grid and
/// filters `appointments` on `reference` directly.
pub fn project(
    grid: &[CalendarDay],
    mode: ViewMode,
    reference: NaiveDate,
    appointments: &[Appointment],
) -> Result<ViewSlice> {
    if grid.len() != GRID_DAYS {
        return Err(Error::Internal(format!(
            "calendar grid has {} days, expected {}",
            grid.len(),
            GRID_DAYS
        )));
    }

    let slice = match mode {
        ViewMode::Month => ViewSlice::Month {
            weeks: grid.chunks(WEEK_DAYS).map(<[CalendarDay]>::to_vec).collect(),
        },
        ViewMode::Week => ViewSlice::Week {
            days: grid[..WEEK_DAYS].to_vec(),
        },
        ViewMode::Day => ViewSlice::Day {
            date: reference,
            appointments: appointments
                .iter()
                .filter(|a| a.falls_on(reference))
                .cloned()
                .collect(),
        },
    };

    Ok(slice)
}
