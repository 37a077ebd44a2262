//! Calendrical schemas.
//!
//! A schema is the pure algorithm set of one calendar: conversions
//! between (year, month, day) and a count of days since the epoch of the
//! calendar, plus the length queries derived from its leap rule. Every
//! method assumes its input lies inside [`CalendricalSchema::supported_years`]
//! and is structurally valid; validation belongs to
//! [`CalendarScope`](crate::CalendarScope).
//!
//! All built-in schemas are arithmetical: every operation is a closed-form
//! integer formula, O(1) and free of side effects.

mod coptic;
mod egyptian;
mod gregorian;
mod julian;
mod tabular_islamic;

pub use coptic::Coptic13Schema;
pub use egyptian::Egyptian13Schema;
pub use gregorian::GregorianSchema;
pub use julian::JulianSchema;
pub use tabular_islamic::TabularIslamicSchema;

use std::fmt;

use crate::consts::{
    DAYS_IN_MONTH, FEBRUARY, MAX_SUPPORTED_YEAR, MIN_SUPPORTED_YEAR,
};
use crate::{DateParts, MonthParts, OrdinalParts, PreValidator, Range};

/// The astronomical cycles a calendar follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendricalFamily {
    Solar,
    Lunar,
    Lunisolar,
}

/// The default range of years supported by the built-in schemas.
pub fn default_supported_years() -> Range<i32> {
    Range::new_unchecked(MIN_SUPPORTED_YEAR, MAX_SUPPORTED_YEAR)
}

/// The algorithm set of one calendar.
///
/// "Days since epoch" always counts from the first day of year 1 of the
/// schema, which is day 0. Schemas are stateless: one instance can be
/// shared by any number of scopes and threads.
pub trait CalendricalSchema: fmt::Debug + Send + Sync {
    fn family(&self) -> CalendricalFamily;

    /// Range of years for which every method is exact and no day count
    /// computed from them overflows.
    fn supported_years(&self) -> Range<i32> {
        default_supported_years()
    }

    fn min_days_in_year(&self) -> i32;

    fn min_days_in_month(&self) -> i32;

    /// The structural checks to run before trusting a (year, month, day).
    fn pre_validator(&self) -> PreValidator {
        PreValidator::Plain
    }

    /// The number of months shared by every year, if any.
    fn regular_months_in_year(&self) -> Option<i32>;

    fn is_leap_year(&self, year: i32) -> bool;

    /// Whether the day only exists in leap years (e.g. February 29th).
    fn is_intercalary_day(&self, year: i32, month: i32, day: i32) -> bool;

    /// Whether the day lies outside the regular month cycle (e.g. the
    /// epagomenal days of the Egyptian calendars).
    fn is_supplementary_day(&self, year: i32, month: i32, day: i32) -> bool;

    fn count_months_in_year(&self, year: i32) -> i32;

    fn count_days_in_year(&self, year: i32) -> i32;

    /// Number of days in the year before the first day of `month`.
    fn count_days_in_year_before_month(&self, year: i32, month: i32) -> i32;

    fn count_days_in_month(&self, year: i32, month: i32) -> i32;

    /// Number of months from the first month of year 1 to (year, month).
    fn count_months_since_epoch(&self, year: i32, month: i32) -> i32;

    /// Inverse of [`count_months_since_epoch`](Self::count_months_since_epoch).
    fn get_month_parts(&self, months_since_epoch: i32) -> MonthParts;

    /// Day count of the first day of `year`.
    fn get_start_of_year(&self, year: i32) -> i32;

    /// The year containing the day `days_since_epoch`.
    fn get_year(&self, days_since_epoch: i32) -> i32;

    /// The (month, day) of the `day_of_year`-th day of `year`.
    fn get_month(&self, year: i32, day_of_year: i32) -> (i32, i32);

    fn count_days_since_epoch(&self, year: i32, month: i32, day: i32) -> i32 {
        self.get_start_of_year(year) + self.count_days_in_year_before_month(year, month) + day - 1
    }

    fn count_days_since_epoch_ordinal(&self, year: i32, day_of_year: i32) -> i32 {
        self.get_start_of_year(year) + day_of_year - 1
    }

    /// Inverse of [`count_days_since_epoch`](Self::count_days_since_epoch).
    fn get_date_parts(&self, days_since_epoch: i32) -> DateParts {
        let OrdinalParts { year, day_of_year } = self.get_ordinal_parts(days_since_epoch);
        let (month, day) = self.get_month(year, day_of_year);
        DateParts::new(year, month, day)
    }

    /// Like [`get_year`](Self::get_year), also returning the day of the year.
    fn get_ordinal_parts(&self, days_since_epoch: i32) -> OrdinalParts {
        let year = self.get_year(days_since_epoch);
        OrdinalParts::new(year, days_since_epoch - self.get_start_of_year(year) + 1)
    }

    fn get_day_of_year(&self, year: i32, month: i32, day: i32) -> i32 {
        self.count_days_in_year_before_month(year, month) + day
    }

    fn get_end_of_year(&self, year: i32) -> i32 {
        self.get_start_of_year(year) + self.count_days_in_year(year) - 1
    }

    fn get_start_of_month(&self, year: i32, month: i32) -> i32 {
        self.count_days_since_epoch(year, month, 1)
    }

    fn get_end_of_month(&self, year: i32, month: i32) -> i32 {
        self.get_start_of_month(year, month) + self.count_days_in_month(year, month) - 1
    }
}

// Formulas shared by the schemas with a fixed number of months per year.

pub(crate) const fn regular_count_months_since_epoch(
    months_in_year: i32,
    year: i32,
    month: i32,
) -> i32 {
    months_in_year * (year - 1) + month - 1
}

pub(crate) const fn regular_get_month_parts(
    months_in_year: i32,
    months_since_epoch: i32,
) -> MonthParts {
    MonthParts::new(
        months_since_epoch.div_euclid(months_in_year) + 1,
        months_since_epoch.rem_euclid(months_in_year) + 1,
    )
}

// Formulas shared by the Gregorian and Julian schemas, Reingold & Dershowitz
// style: months of the Roman calendar with a leap day at the end of February.

/// Returns 0 for a month outside 1..=12.
pub(crate) fn solar12_count_days_in_month(leap: bool, month: i32) -> i32 {
    if month == FEBRUARY && leap {
        return DAYS_IN_MONTH[FEBRUARY as usize] + 1;
    }
    usize::try_from(month)
        .ok()
        .filter(|&m| m >= 1)
        .and_then(|m| DAYS_IN_MONTH.get(m).copied())
        .unwrap_or(0)
}

pub(crate) const fn solar12_count_days_in_year_before_month(leap: bool, month: i32) -> i32 {
    let correction = if month <= FEBRUARY {
        0
    } else if leap {
        1
    } else {
        2
    };
    (367 * month - 362) / 12 - correction
}

pub(crate) const fn solar12_get_month(leap: bool, day_of_year: i32) -> (i32, i32) {
    let d0 = day_of_year - 1;
    // 59 = days in January and February of a common year.
    let correction = if d0 < 59 + leap as i32 {
        0
    } else if leap {
        1
    } else {
        2
    };
    let month = (12 * (d0 + correction) + 373) / 367;
    let day = day_of_year - solar12_count_days_in_year_before_month(leap, month);
    (month, day)
}

// Converts an intermediate i64 that is known to fit back to i32.
#[allow(clippy::cast_possible_truncation)]
pub(crate) const fn narrow(value: i64) -> i32 {
    debug_assert!(value >= i32::MIN as i64 && value <= i32::MAX as i64);
    value as i32
}

#[cfg(test)]
pub(crate) mod testing {
    //! Law checks every schema must pass.

    use super::CalendricalSchema;

    pub(crate) fn check_round_trip(schema: &dyn CalendricalSchema, from: i32, to: i32) {
        for days in from..=to {
            let parts = schema.get_date_parts(days);
            assert_eq!(
                schema.count_days_since_epoch(parts.year, parts.month, parts.day),
                days,
                "{schema:?}: round trip failed at {days} ({parts})"
            );
            let ordinal = schema.get_ordinal_parts(days);
            assert_eq!(ordinal.year, parts.year, "{schema:?}: year mismatch at {days}");
            assert_eq!(
                schema.count_days_since_epoch_ordinal(ordinal.year, ordinal.day_of_year),
                days,
                "{schema:?}: ordinal round trip failed at {days}"
            );
            assert_eq!(schema.get_year(days), parts.year);
        }
    }

    pub(crate) fn check_year_consistency(schema: &dyn CalendricalSchema, years: &[i32]) {
        for &y in years {
            let months = schema.count_months_in_year(y);
            let sum: i32 = (1..=months).map(|m| schema.count_days_in_month(y, m)).sum();
            assert_eq!(sum, schema.count_days_in_year(y), "{schema:?}: year {y}");
            assert_eq!(
                schema.get_start_of_year(y + 1) - schema.get_start_of_year(y),
                schema.count_days_in_year(y),
                "{schema:?}: start of year {y}"
            );
            assert_eq!(schema.get_end_of_year(y) + 1, schema.get_start_of_year(y + 1));
            assert!(schema.count_days_in_year(y) >= schema.min_days_in_year());
            for m in 1..=months {
                assert!(schema.count_days_in_month(y, m) >= schema.min_days_in_month());
                assert_eq!(
                    schema.get_end_of_month(y, m) - schema.get_start_of_month(y, m) + 1,
                    schema.count_days_in_month(y, m)
                );
                let parts = schema.get_month_parts(schema.count_months_since_epoch(y, m));
                assert_eq!(parts.deconstruct(), (y, m));
            }
        }
    }

    pub(crate) fn check_supported_bounds(schema: &dyn CalendricalSchema) {
        let years = schema.supported_years();
        for y in [years.start(), years.end()] {
            let start = schema.get_start_of_year(y);
            let end = schema.get_end_of_year(y);
            assert_eq!(schema.get_date_parts(start).deconstruct(), (y, 1, 1));
            assert_eq!(schema.get_year(end), y);
        }
    }
}
