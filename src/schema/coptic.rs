use crate::consts::{DAYS_IN_COMMON_YEAR, DAYS_IN_LEAP_YEAR, DAYS_PER_4_YEAR_CYCLE, LEAP_YEAR_CYCLE};
use crate::schema::{
    narrow, regular_count_months_since_epoch, regular_get_month_parts, CalendricalFamily,
    CalendricalSchema,
};
use crate::{MonthParts, PreValidator};

const MONTHS_IN_YEAR: i32 = 13;
const DAYS_IN_REGULAR_MONTH: i32 = 30;
const EPAGOMENAL_MONTH: i32 = 13;

/// The Coptic calendar: twelve months of 30 days followed by a thirteenth
/// month of 5 epagomenal days (6 in leap years).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Coptic13Schema;

impl Coptic13Schema {
    pub const fn is_leap(year: i32) -> bool {
        year.rem_euclid(LEAP_YEAR_CYCLE) == 3
    }
}

impl CalendricalSchema for Coptic13Schema {
    fn family(&self) -> CalendricalFamily {
        CalendricalFamily::Solar
    }

    fn min_days_in_year(&self) -> i32 {
        DAYS_IN_COMMON_YEAR
    }

    fn min_days_in_month(&self) -> i32 {
        5
    }

    fn pre_validator(&self) -> PreValidator {
        PreValidator::Solar13
    }

    fn regular_months_in_year(&self) -> Option<i32> {
        Some(MONTHS_IN_YEAR)
    }

    fn is_leap_year(&self, year: i32) -> bool {
        Self::is_leap(year)
    }

    fn is_intercalary_day(&self, _year: i32, month: i32, day: i32) -> bool {
        month == EPAGOMENAL_MONTH && day == 6
    }

    fn is_supplementary_day(&self, _year: i32, month: i32, _day: i32) -> bool {
        month == EPAGOMENAL_MONTH
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
        DAYS_IN_REGULAR_MONTH * (month - 1)
    }

    fn count_days_in_month(&self, year: i32, month: i32) -> i32 {
        if month < EPAGOMENAL_MONTH {
            DAYS_IN_REGULAR_MONTH
        } else if Self::is_leap(year) {
            6
        } else {
            5
        }
    }

    fn count_months_since_epoch(&self, year: i32, month: i32) -> i32 {
        regular_count_months_since_epoch(MONTHS_IN_YEAR, year, month)
    }

    fn get_month_parts(&self, months_since_epoch: i32) -> MonthParts {
        regular_get_month_parts(MONTHS_IN_YEAR, months_since_epoch)
    }

    fn get_start_of_year(&self, year: i32) -> i32 {
        DAYS_IN_COMMON_YEAR * (year - 1) + year.div_euclid(LEAP_YEAR_CYCLE)
    }

    fn get_year(&self, days_since_epoch: i32) -> i32 {
        let days = i64::from(days_since_epoch);
        narrow(
            (i64::from(LEAP_YEAR_CYCLE) * days + 1463).div_euclid(i64::from(DAYS_PER_4_YEAR_CYCLE)),
        )
    }

    fn get_month(&self, _year: i32, day_of_year: i32) -> (i32, i32) {
        let d0 = day_of_year - 1;
        let month = d0 / DAYS_IN_REGULAR_MONTH + 1;
        (month, d0 % DAYS_IN_REGULAR_MONTH + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::testing::{check_round_trip, check_supported_bounds, check_year_consistency};

    #[test]
    fn test_is_leap_year() {
        assert!(Coptic13Schema.is_leap_year(3));
        assert!(Coptic13Schema.is_leap_year(-1));
        assert!(!Coptic13Schema.is_leap_year(4));
        assert_eq!(Coptic13Schema.count_days_in_year(3), 366);
        assert_eq!(Coptic13Schema.count_days_in_year(4), 365);
    }

    #[test]
    fn test_epagomenal_month() {
        let schema = Coptic13Schema;
        assert_eq!(schema.count_days_in_month(3, 13), 6);
        assert_eq!(schema.count_days_in_month(4, 13), 5);
        assert!(schema.is_supplementary_day(4, 13, 1));
        assert!(schema.is_intercalary_day(3, 13, 6));
        assert!(!schema.is_supplementary_day(4, 12, 30));
    }

    #[test]
    fn test_known_day_counts() {
        let schema = Coptic13Schema;
        assert_eq!(schema.get_date_parts(0).deconstruct(), (1, 1, 1));
        assert_eq!(schema.get_date_parts(364).deconstruct(), (1, 13, 5));
        assert_eq!(schema.get_date_parts(1095).deconstruct(), (3, 13, 6));
        assert_eq!(schema.get_date_parts(1096).deconstruct(), (4, 1, 1));
    }

    #[test]
    fn test_round_trip() {
        check_round_trip(&Coptic13Schema, -20_000, 20_000);
    }

    #[test]
    fn test_year_consistency() {
        check_year_consistency(&Coptic13Schema, &[-4, -1, 0, 1, 2, 3, 4, 1732]);
    }

    #[test]
    fn test_supported_bounds() {
        check_supported_bounds(&Coptic13Schema);
    }
}
