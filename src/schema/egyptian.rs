use crate::consts::DAYS_IN_COMMON_YEAR;
use crate::schema::{
    regular_count_months_since_epoch, regular_get_month_parts, CalendricalFamily,
    CalendricalSchema,
};
use crate::{MonthParts, OrdinalParts, PreValidator};

const MONTHS_IN_YEAR: i32 = 13;
const DAYS_IN_REGULAR_MONTH: i32 = 30;
const EPAGOMENAL_MONTH: i32 = 13;
const DAYS_IN_EPAGOMENAL_MONTH: i32 = 5;

/// The Egyptian civil calendar: a wandering year of exactly 365 days, made
/// of twelve months of 30 days and 5 epagomenal days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Egyptian13Schema;

impl CalendricalSchema for Egyptian13Schema {
    fn family(&self) -> CalendricalFamily {
        CalendricalFamily::Solar
    }

    fn min_days_in_year(&self) -> i32 {
        DAYS_IN_COMMON_YEAR
    }

    fn min_days_in_month(&self) -> i32 {
        DAYS_IN_EPAGOMENAL_MONTH
    }

    fn pre_validator(&self) -> PreValidator {
        PreValidator::Solar13
    }

    fn regular_months_in_year(&self) -> Option<i32> {
        Some(MONTHS_IN_YEAR)
    }

    fn is_leap_year(&self, _year: i32) -> bool {
        false
    }

    fn is_intercalary_day(&self, _year: i32, _month: i32, _day: i32) -> bool {
        false
    }

    fn is_supplementary_day(&self, _year: i32, month: i32, _day: i32) -> bool {
        month == EPAGOMENAL_MONTH
    }

    fn count_months_in_year(&self, _year: i32) -> i32 {
        MONTHS_IN_YEAR
    }

    fn count_days_in_year(&self, _year: i32) -> i32 {
        DAYS_IN_COMMON_YEAR
    }

    fn count_days_in_year_before_month(&self, _year: i32, month: i32) -> i32 {
        DAYS_IN_REGULAR_MONTH * (month - 1)
    }

    fn count_days_in_month(&self, _year: i32, month: i32) -> i32 {
        if month < EPAGOMENAL_MONTH {
            DAYS_IN_REGULAR_MONTH
        } else {
            DAYS_IN_EPAGOMENAL_MONTH
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
    }

    fn get_year(&self, days_since_epoch: i32) -> i32 {
        days_since_epoch.div_euclid(DAYS_IN_COMMON_YEAR) + 1
    }

    fn get_ordinal_parts(&self, days_since_epoch: i32) -> OrdinalParts {
        OrdinalParts::new(
            days_since_epoch.div_euclid(DAYS_IN_COMMON_YEAR) + 1,
            days_since_epoch.rem_euclid(DAYS_IN_COMMON_YEAR) + 1,
        )
    }

    fn get_month(&self, _year: i32, day_of_year: i32) -> (i32, i32) {
        let d0 = day_of_year - 1;
        (d0 / DAYS_IN_REGULAR_MONTH + 1, d0 % DAYS_IN_REGULAR_MONTH + 1)
    }
}
