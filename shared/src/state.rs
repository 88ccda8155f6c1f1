//! Presentation-owned calendar state: reference date, view mode, selection.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::appointments::{Appointment, AppointmentStore};
use crate::calendar::{aggregate_at, CalendarDay};
use crate::external::ExternalEventProvider;
use crate::view::{project, ViewMode, ViewSlice};
use crate::{Error, Result};

/// Direction of month navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthStep {
    #[serde(alias = "prev")]
    Previous,
    Next,
}

impl std::str::FromStr for MonthStep {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "next" | "+1" => Ok(MonthStep::Next),
            "prev" | "previous" | "-1" => Ok(MonthStep::Previous),
            other => Err(Error::Validation(format!("Invalid month step: {}", other))),
        }
    }
}

/// At most one item picked for detail display.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Selection {
    #[default]
    None,
    One(Appointment),
}

impl Selection {
    pub fn item(&self) -> Option<&Appointment> {
        match self {
            Selection::None => None,
            Selection::One(item) => Some(item),
        }
    }
}

/// Everything the dashboard needs to rebuild its calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarState {
    reference: NaiveDate,
    mode: ViewMode,
    selection: Selection,
}

impl CalendarState {
    pub fn new(reference: NaiveDate, mode: ViewMode) -> Self {
        Self {
            reference,
            mode,
            selection: Selection::None,
        }
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference
    }

    pub fn view_mode(&self) -> ViewMode {
        self.mode
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn set_view(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    /// Move to the same day in the adjacent month.
    ///
    /// Days past the end of the target month clamp to its last day, so
    /// Jan 31 goes to Feb 29 (or 28) and does not come back to Jan 31.
    pub fn advance_month(&mut self, step: MonthStep) -> Result<NaiveDate> {
        let one = Months::new(1);
        let moved = match step {
            MonthStep::Next => self.reference.checked_add_months(one),
            MonthStep::Previous => self.reference.checked_sub_months(one),
        };
        self.reference = moved.ok_or_else(|| {
            Error::InvalidDate(format!("{} has no adjacent month in range", self.reference))
        })?;
        Ok(self.reference)
    }

    /// Replace the selection. `None` clears it.
    pub fn select(&mut self, item: Option<Appointment>) {
        self.selection = match item {
            Some(item) => Selection::One(item),
            None => Selection::None,
        };
    }

    pub fn deselect(&mut self) {
        self.select(None);
    }

    /// Freshly aggregated grid for the current reference month.
    pub fn grid<P>(&self, store: &AppointmentStore, provider: &P, today: NaiveDate) -> Result<Vec<CalendarDay>>
    where
        P: ExternalEventProvider + ?Sized,
    {
        aggregate_at(self.reference, store.list(), provider, today)
    }

    /// Freshly projected slice for the current reference date and view mode.
    pub fn view<P>(&self, store: &AppointmentStore, provider: &P, today: NaiveDate) -> Result<ViewSlice>
    where
        P: ExternalEventProvider + ?Sized,
    {
        let grid = self.grid(store, provider, today)?;
        project(&grid, self.mode, self.reference, store.list())
    }
}
