use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Inclusive calendar-date window over which the daily series are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, AppError> {
        if start > end {
            return Err(AppError::InvalidWindow { start, end });
        }
        Ok(DateWindow { start, end })
    }

    /// Number of calendar days in the window, both ends included.
    pub fn len_days(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every calendar date from start to end inclusive, ascending.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(self.len_days())
    }
}

impl Default for DateWindow {
    /// January 2024, the upstream widget's initial range.
    fn default() -> Self {
        DateWindow {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        }
    }
}

/// Multi-select filter state for a categorical column.
///
/// `Only` with an empty set matches nothing. "Select every value present"
/// is expressed as `All` by the caller's initial widget state — an empty
/// set is never reinterpreted as "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    All,
    Only(BTreeSet<String>),
}

impl Selection {
    pub fn only<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Selection::Only(values.into_iter().map(Into::into).collect())
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(set) => set.contains(value),
        }
    }
}

/// Immutable per-run configuration, passed explicitly into every report
/// call. There is no ambient filter state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    pub types: Selection,
    pub organizations: Selection,
    pub window: DateWindow,
}
