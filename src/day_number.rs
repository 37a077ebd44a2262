use serde::{Deserialize, Serialize};

use crate::consts::{DAYS_IN_WEEK, MAX_DAY_NUMBER, MIN_DAY_NUMBER};
use crate::prelude::*;
use crate::CalendarError;

/// A linear count of days since Monday, January 1st, year 1 of the
/// proleptic Gregorian calendar.
///
/// This is the common currency between every calendar of the crate. The
/// two extreme `i32` values are never used, so that stepping one day past
/// either end of the range is still a representable (and rejected)
/// computation rather than a wraparound.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Into, Serialize, Deserialize,
)]
#[display(fmt = "{}", _0)]
#[serde(try_from = "i32", into = "i32")]
pub struct DayNumber(i32);

impl DayNumber {
    /// Monday, January 1st, 1 CE (proleptic Gregorian).
    pub const ZERO: Self = Self(0);
    /// Smallest day number
    pub const MIN: Self = Self(MIN_DAY_NUMBER);
    /// Largest day number
    pub const MAX: Self = Self(MAX_DAY_NUMBER);

    /// First day of the proleptic Gregorian calendar: 1/1/1.
    pub const GREGORIAN_EPOCH: Self = Self::ZERO;
    /// First day of the proleptic Julian calendar: Gregorian 0/12/30.
    pub const JULIAN_EPOCH: Self = Self(-2);
    /// First day of the Coptic calendar: Julian 284/8/29.
    pub const COPTIC_EPOCH: Self = Self(103_604);
    /// First day of the Egyptian (Nabonassar) calendar: Julian -746/2/26.
    pub const EGYPTIAN_EPOCH: Self = Self(-272_788);
    /// First day of the civil tabular Islamic calendar: Julian 622/7/16.
    pub const TABULAR_ISLAMIC_EPOCH: Self = Self(227_014);

    /// Creates a new day number.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if `value` is one of the two
    /// reserved `i32` extremes.
    pub fn new(value: i32) -> Result<Self, CalendarError> {
        if !(MIN_DAY_NUMBER..=MAX_DAY_NUMBER).contains(&value) {
            return Err(CalendarError::out_of_range("day_number", value));
        }
        Ok(Self(value))
    }

    /// Returns the number of days since the Gregorian epoch.
    #[inline]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Adds a number of days.
    ///
    /// # Errors
    /// Returns `CalendarError::Overflow` if the result is not representable.
    pub fn checked_add(self, days: i32) -> Result<Self, CalendarError> {
        self.0
            .checked_add(days)
            .filter(|n| (MIN_DAY_NUMBER..=MAX_DAY_NUMBER).contains(n))
            .map(Self)
            .ok_or(CalendarError::overflow("DayNumber::checked_add"))
    }

    /// Subtracts a number of days.
    ///
    /// # Errors
    /// Returns `CalendarError::Overflow` if the result is not representable.
    pub fn checked_sub(self, days: i32) -> Result<Self, CalendarError> {
        self.0
            .checked_sub(days)
            .filter(|n| (MIN_DAY_NUMBER..=MAX_DAY_NUMBER).contains(n))
            .map(Self)
            .ok_or(CalendarError::overflow("DayNumber::checked_sub"))
    }

    /// Counts the days from `other` to `self`.
    ///
    /// # Errors
    /// Returns `CalendarError::Overflow` if the difference does not fit in
    /// an `i32`.
    pub fn count_days_since(self, other: Self) -> Result<i32, CalendarError> {
        self.0
            .checked_sub(other.0)
            .ok_or(CalendarError::overflow("DayNumber::count_days_since"))
    }

    /// Returns the following day.
    ///
    /// # Errors
    /// Returns `CalendarError::Overflow` at [`DayNumber::MAX`].
    pub fn next_day(self) -> Result<Self, CalendarError> {
        self.checked_add(1)
    }

    /// Returns the preceding day.
    ///
    /// # Errors
    /// Returns `CalendarError::Overflow` at [`DayNumber::MIN`].
    pub fn previous_day(self) -> Result<Self, CalendarError> {
        self.checked_sub(1)
    }

    pub fn day_of_week(self) -> DayOfWeek {
        DayOfWeek::from_offset(self.0.rem_euclid(DAYS_IN_WEEK))
    }

    /// Finds the closest day strictly after `self` falling on `day_of_week`.
    ///
    /// # Errors
    /// Returns `CalendarError::Overflow` if that day is not representable.
    pub fn next(self, day_of_week: DayOfWeek) -> Result<Self, CalendarError> {
        let delta = self.days_until(day_of_week);
        self.checked_add(if delta == 0 { DAYS_IN_WEEK } else { delta })
    }

    /// Finds the closest day on or after `self` falling on `day_of_week`.
    ///
    /// # Errors
    /// Returns `CalendarError::Overflow` if that day is not representable.
    pub fn next_or_same(self, day_of_week: DayOfWeek) -> Result<Self, CalendarError> {
        self.checked_add(self.days_until(day_of_week))
    }

    /// Finds the closest day strictly before `self` falling on `day_of_week`.
    ///
    /// # Errors
    /// Returns `CalendarError::Overflow` if that day is not representable.
    pub fn previous(self, day_of_week: DayOfWeek) -> Result<Self, CalendarError> {
        let delta = self.days_after(day_of_week);
        self.checked_sub(if delta == 0 { DAYS_IN_WEEK } else { delta })
    }

    /// Finds the closest day on or before `self` falling on `day_of_week`.
    ///
    /// # Errors
    /// Returns `CalendarError::Overflow` if that day is not representable.
    pub fn previous_or_same(self, day_of_week: DayOfWeek) -> Result<Self, CalendarError> {
        self.checked_sub(self.days_after(day_of_week))
    }

    /// Finds the day falling on `day_of_week` within three days of `self`.
    ///
    /// # Errors
    /// Returns `CalendarError::Overflow` if that day is not representable.
    pub fn nearest(self, day_of_week: DayOfWeek) -> Result<Self, CalendarError> {
        let delta = self.days_until(day_of_week);
        if delta > DAYS_IN_WEEK / 2 {
            self.checked_add(delta - DAYS_IN_WEEK)
        } else {
            self.checked_add(delta)
        }
    }

    // Days in [0, 6] from self forward to the next `day_of_week`.
    fn days_until(self, day_of_week: DayOfWeek) -> i32 {
        (day_of_week.offset() - self.day_of_week().offset()).rem_euclid(DAYS_IN_WEEK)
    }

    // Days in [0, 6] from the previous `day_of_week` forward to self.
    fn days_after(self, day_of_week: DayOfWeek) -> i32 {
        (self.day_of_week().offset() - day_of_week.offset()).rem_euclid(DAYS_IN_WEEK)
    }
}

impl TryFrom<i32> for DayNumber {
    type Error = CalendarError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Day of the week, numbered the ISO way (Monday is 1, Sunday is 7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Creates a day of the week from its ISO number.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` unless `value` is in `1..=7`.
    pub fn from_iso(value: i32) -> Result<Self, CalendarError> {
        if !(1..=DAYS_IN_WEEK).contains(&value) {
            return Err(CalendarError::out_of_range("day_of_week", value));
        }
        Ok(Self::from_offset(value - 1))
    }

    /// Returns the ISO number (Monday is 1, Sunday is 7).
    pub const fn to_iso(self) -> i32 {
        self.offset() + 1
    }

    const fn offset(self) -> i32 {
        self as i32
    }

    // `offset` must be in [0, 6].
    fn from_offset(offset: i32) -> Self {
        debug_assert!((0..DAYS_IN_WEEK).contains(&offset));
        Self::ALL[offset.rem_euclid(DAYS_IN_WEEK) as usize]
    }
}
