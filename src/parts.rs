//! Plain year/month/day containers.
//!
//! None of these types assert that they represent an existing date. They
//! are ordered lexicographically and validated only by a
//! [`CalendarScope`](crate::CalendarScope).

use serde::{Deserialize, Serialize};

use crate::consts::{FIRST_MONTH, MIN_DAY};
use crate::prelude::*;

/// A (year, month, day) triple.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "{:04}-{:02}-{:02}", year, month, day)]
pub struct DateParts {
    pub year: i32,
    pub month: i32,
    pub day: i32,
}

impl DateParts {
    pub const fn new(year: i32, month: i32, day: i32) -> Self {
        Self { year, month, day }
    }

    /// First day of the first month of `year`.
    pub const fn at_start_of_year(year: i32) -> Self {
        Self::new(year, FIRST_MONTH, MIN_DAY)
    }

    pub const fn month_parts(&self) -> MonthParts {
        MonthParts::new(self.year, self.month)
    }

    /// Returns the triple as a tuple `(year, month, day)`.
    pub const fn deconstruct(&self) -> (i32, i32, i32) {
        (self.year, self.month, self.day)
    }
}

impl From<(i32, i32, i32)> for DateParts {
    fn from((year, month, day): (i32, i32, i32)) -> Self {
        Self::new(year, month, day)
    }
}

/// A (year, day-of-year) pair.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "{:04}-{:03}", year, day_of_year)]
pub struct OrdinalParts {
    pub year: i32,
    pub day_of_year: i32,
}

impl OrdinalParts {
    pub const fn new(year: i32, day_of_year: i32) -> Self {
        Self { year, day_of_year }
    }

    pub const fn at_start_of_year(year: i32) -> Self {
        Self::new(year, MIN_DAY)
    }

    pub const fn deconstruct(&self) -> (i32, i32) {
        (self.year, self.day_of_year)
    }
}

/// A (year, month) pair.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "{:04}-{:02}", year, month)]
pub struct MonthParts {
    pub year: i32,
    pub month: i32,
}

impl MonthParts {
    pub const fn new(year: i32, month: i32) -> Self {
        Self { year, month }
    }

    pub const fn deconstruct(&self) -> (i32, i32) {
        (self.year, self.month)
    }
}
