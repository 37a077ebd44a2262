//! Bit-packed trusted dates.
//!
//! The layout, most significant bits first:
//!
//! - [`Yemoda`]: `year - 1` (23 bits, two's complement), `month - 1` (4 bits),
//!   `day - 1` (5 bits).
//! - [`Yedoy`]: `year - 1` (23 bits, two's complement), `day_of_year - 1` (9 bits).
//!
//! Because the year occupies the sign-carrying high bits and the other
//! fields are unsigned, comparing two packed values as integers orders
//! them lexicographically.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::consts::{
    DAY_BITS, DAY_OF_YEAR_BITS, MAX_PACKED_DAY, MAX_PACKED_DAY_OF_YEAR, MAX_PACKED_MONTH,
    MAX_PACKED_YEAR, MIN_PACKED_YEAR, MONTH_BITS, YEAR_SHIFT,
};
use crate::{CalendarError, DateParts, MonthParts, OrdinalParts};

const DAY_MASK: i32 = (1 << DAY_BITS) - 1;
const MONTH_MASK: i32 = (1 << MONTH_BITS) - 1;
const DAY_OF_YEAR_MASK: i32 = (1 << DAY_OF_YEAR_BITS) - 1;

fn check_year(year: i32) -> Result<(), CalendarError> {
    if (MIN_PACKED_YEAR..=MAX_PACKED_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(CalendarError::out_of_range("year", year))
    }
}

/// A validated, packed (year, month, day).
///
/// Values built by a scope or a factory have been checked against a
/// schema: the month exists in the year and the day exists in the month.
/// A value from [`from_bits`](Self::from_bits) or from deserialization only
/// fits the bit layout; pass it through
/// [`CalendarScope::validate_yemoda`](crate::CalendarScope::validate_yemoda)
/// before handing it to an arithmetic.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Yemoda(i32);

impl Yemoda {
    /// Packs a triple whose fields fit the bit layout.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` naming the first field that does
    /// not fit.
    pub(crate) fn new(year: i32, month: i32, day: i32) -> Result<Self, CalendarError> {
        check_year(year)?;
        if !(1..=MAX_PACKED_MONTH).contains(&month) {
            return Err(CalendarError::out_of_range("month", month));
        }
        if !(1..=MAX_PACKED_DAY).contains(&day) {
            return Err(CalendarError::out_of_range("day", day));
        }
        Ok(Self::new_unchecked(year, month, day))
    }

    #[inline]
    pub(crate) const fn new_unchecked(year: i32, month: i32, day: i32) -> Self {
        Self(((year - 1) << YEAR_SHIFT) | ((month - 1) << DAY_BITS) | (day - 1))
    }

    /// Decodes a packed value. The result is not checked against any
    /// calendar.
    ///
    /// # Errors
    /// Returns `CalendarError::Argument` if the month or day field holds a
    /// value no calendar uses.
    pub fn from_bits(bin: i32) -> Result<Self, CalendarError> {
        if ((bin >> DAY_BITS) & MONTH_MASK) + 1 > MAX_PACKED_MONTH {
            return Err(CalendarError::argument("bin", "the month field is out of range"));
        }
        if (bin & DAY_MASK) + 1 > MAX_PACKED_DAY {
            return Err(CalendarError::argument("bin", "the day field is out of range"));
        }
        Ok(Self(bin))
    }

    /// Returns the packed representation.
    #[inline]
    pub const fn to_bits(self) -> i32 {
        self.0
    }

    #[inline]
    pub const fn year(self) -> i32 {
        (self.0 >> YEAR_SHIFT) + 1
    }

    #[inline]
    pub const fn month(self) -> i32 {
        ((self.0 >> DAY_BITS) & MONTH_MASK) + 1
    }

    #[inline]
    pub const fn day(self) -> i32 {
        (self.0 & DAY_MASK) + 1
    }

    pub const fn deconstruct(self) -> (i32, i32, i32) {
        (self.year(), self.month(), self.day())
    }

    pub const fn to_date_parts(self) -> DateParts {
        DateParts::new(self.year(), self.month(), self.day())
    }

    pub const fn month_parts(self) -> MonthParts {
        MonthParts::new(self.year(), self.month())
    }

    /// First day of the same month.
    pub(crate) const fn start_of_month(self) -> Self {
        Self(self.0 & !DAY_MASK)
    }
}

impl TryFrom<i32> for Yemoda {
    type Error = CalendarError;

    fn try_from(bin: i32) -> Result<Self, Self::Error> {
        Self::from_bits(bin)
    }
}

impl From<Yemoda> for i32 {
    fn from(ymd: Yemoda) -> Self {
        ymd.0
    }
}

impl From<Yemoda> for DateParts {
    fn from(ymd: Yemoda) -> Self {
        ymd.to_date_parts()
    }
}

impl fmt::Debug for Yemoda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Yemoda({})", self.to_date_parts())
    }
}

impl fmt::Display for Yemoda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_date_parts(), f)
    }
}

/// A validated, packed (year, day-of-year).
///
/// Decoded values are checked with
/// [`CalendarScope::validate_yedoy`](crate::CalendarScope::validate_yedoy).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Yedoy(i32);

impl Yedoy {
    /// # Errors
    /// Returns `CalendarError::OutOfRange` naming the first field that does
    /// not fit.
    pub(crate) fn new(year: i32, day_of_year: i32) -> Result<Self, CalendarError> {
        check_year(year)?;
        if !(1..=MAX_PACKED_DAY_OF_YEAR).contains(&day_of_year) {
            return Err(CalendarError::out_of_range("day_of_year", day_of_year));
        }
        Ok(Self::new_unchecked(year, day_of_year))
    }

    #[inline]
    pub(crate) const fn new_unchecked(year: i32, day_of_year: i32) -> Self {
        Self(((year - 1) << DAY_OF_YEAR_BITS) | (day_of_year - 1))
    }

    /// Decodes a packed value, without checking it against a calendar.
    ///
    /// # Errors
    /// Returns `CalendarError::Argument` if the day-of-year field holds a
    /// value no calendar uses.
    pub fn from_bits(bin: i32) -> Result<Self, CalendarError> {
        if (bin & DAY_OF_YEAR_MASK) + 1 > MAX_PACKED_DAY_OF_YEAR {
            return Err(CalendarError::argument(
                "bin",
                "the day-of-year field is out of range",
            ));
        }
        Ok(Self(bin))
    }

    #[inline]
    pub const fn to_bits(self) -> i32 {
        self.0
    }

    #[inline]
    pub const fn year(self) -> i32 {
        (self.0 >> DAY_OF_YEAR_BITS) + 1
    }

    #[inline]
    pub const fn day_of_year(self) -> i32 {
        (self.0 & DAY_OF_YEAR_MASK) + 1
    }

    pub const fn deconstruct(self) -> (i32, i32) {
        (self.year(), self.day_of_year())
    }

    pub const fn to_ordinal_parts(self) -> OrdinalParts {
        OrdinalParts::new(self.year(), self.day_of_year())
    }
}

impl TryFrom<i32> for Yedoy {
    type Error = CalendarError;

    fn try_from(bin: i32) -> Result<Self, Self::Error> {
        Self::from_bits(bin)
    }
}

impl From<Yedoy> for i32 {
    fn from(ydoy: Yedoy) -> Self {
        ydoy.0
    }
}

impl From<Yedoy> for OrdinalParts {
    fn from(ydoy: Yedoy) -> Self {
        ydoy.to_ordinal_parts()
    }
}

impl fmt::Debug for Yedoy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Yedoy({})", self.to_ordinal_parts())
    }
}

impl fmt::Display for Yedoy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_ordinal_parts(), f)
    }
}
