use crate::schema::{
    narrow, regular_count_months_since_epoch, regular_get_month_parts, CalendricalFamily,
    CalendricalSchema,
};
use crate::{MonthParts, PreValidator};

const MONTHS_IN_YEAR: i32 = 12;
const DAYS_IN_COMMON_YEAR: i32 = 354;
const DAYS_IN_LEAP_YEAR: i32 = 355;
/// Days in a 30-year cycle.
const DAYS_PER_30_YEAR_CYCLE: i64 = 10_631;
const YEARS_PER_CYCLE: i32 = 30;
const LEAP_YEARS_PER_CYCLE: i32 = 11;

/// The civil tabular Islamic calendar: twelve lunar months alternating 30
/// and 29 days, with eleven leap years in every 30-year cycle adding a
/// day to the last month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TabularIslamicSchema;

impl TabularIslamicSchema {
    pub const fn is_leap(year: i32) -> bool {
        (14 + LEAP_YEARS_PER_CYCLE * year).rem_euclid(YEARS_PER_CYCLE) < LEAP_YEARS_PER_CYCLE
    }
}

impl CalendricalSchema for TabularIslamicSchema {
    fn family(&self) -> CalendricalFamily {
        CalendricalFamily::Lunar
    }

    fn min_days_in_year(&self) -> i32 {
        DAYS_IN_COMMON_YEAR
    }

    fn min_days_in_month(&self) -> i32 {
        29
    }

    fn pre_validator(&self) -> PreValidator {
        PreValidator::Lunar12
    }

    fn regular_months_in_year(&self) -> Option<i32> {
        Some(MONTHS_IN_YEAR)
    }

    fn is_leap_year(&self, year: i32) -> bool {
        Self::is_leap(year)
    }

    fn is_intercalary_day(&self, _year: i32, month: i32, day: i32) -> bool {
        month == MONTHS_IN_YEAR && day == 30
    }

    fn is_supplementary_day(&self, _year: i32, _month: i32, _day: i32) -> bool {
        false
    }

    fn count_months_in_year(&self, _year: i32) -> i32 {
        MONTHS_IN_YEAR
    }

    fn count_days_in_year(&self, year: i32) -> i32 {
        if Self::is_leap(year) {
            DAYS_IN_LEAP_YEAR
        } else {
            DAYS_IN_COMMON_YEAR
        }
    }

    fn count_days_in_year_before_month(&self, _year: i32, month: i32) -> i32 {
        29 * (month - 1) + month / 2
    }

    fn count_days_in_month(&self, year: i32, month: i32) -> i32 {
        if month % 2 == 1 || (month == MONTHS_IN_YEAR && Self::is_leap(year)) {
            30
        } else {
            29
        }
    }

    fn count_months_since_epoch(&self, year: i32, month: i32) -> i32 {
        regular_count_months_since_epoch(MONTHS_IN_YEAR, year, month)
    }

    fn get_month_parts(&self, months_since_epoch: i32) -> MonthParts {
        regular_get_month_parts(MONTHS_IN_YEAR, months_since_epoch)
    }

    fn get_start_of_year(&self, year: i32) -> i32 {
        DAYS_IN_COMMON_YEAR * (year - 1)
            + (3 + LEAP_YEARS_PER_CYCLE * year).div_euclid(YEARS_PER_CYCLE)
    }

    fn get_year(&self, days_since_epoch: i32) -> i32 {
        let days = i64::from(days_since_epoch);
        narrow((i64::from(YEARS_PER_CYCLE) * days + 10_646).div_euclid(DAYS_PER_30_YEAR_CYCLE))
    }

    fn get_month(&self, year: i32, day_of_year: i32) -> (i32, i32) {
        let month = (11 * (day_of_year - 1) + 330) / 325;
        (month, day_of_year - self.count_days_in_year_before_month(year, month))
    }
}
