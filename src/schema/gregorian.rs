use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_COMMON_YEAR, DAYS_IN_LEAP_YEAR, DAYS_PER_4_YEAR_CYCLE,
    DAYS_PER_400_YEAR_CYCLE, DAYS_PER_CENTURY, FEBRUARY, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE,
};
use crate::schema::{
    regular_count_months_since_epoch, regular_get_month_parts, solar12_count_days_in_month,
    solar12_count_days_in_year_before_month, solar12_get_month, CalendricalFamily,
    CalendricalSchema,
};
use crate::{MonthParts, OrdinalParts, PreValidator};

const MONTHS_IN_YEAR: i32 = 12;

/// The proleptic Gregorian calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GregorianSchema;

impl GregorianSchema {
    pub const fn is_leap(year: i32) -> bool {
        year.rem_euclid(LEAP_YEAR_CYCLE) == 0
            && (year.rem_euclid(CENTURY_CYCLE) != 0 || year.rem_euclid(GREGORIAN_CYCLE) == 0)
    }

    /// Day count of January 1st of `year`.
    pub const fn start_of_year(year: i32) -> i32 {
        let y = year - 1;
        DAYS_IN_COMMON_YEAR * y + y.div_euclid(LEAP_YEAR_CYCLE) - y.div_euclid(CENTURY_CYCLE)
            + y.div_euclid(GREGORIAN_CYCLE)
    }

    // Splits a day count into the 400-, 100-, 4- and 1-year cycles. The
    // last day of a leap year shows up as a fifth year (or century); it is
    // reported as day 366 of the year before.
    const fn ordinal_parts(days_since_epoch: i32) -> (i32, i32) {
        let n400 = days_since_epoch.div_euclid(DAYS_PER_400_YEAR_CYCLE);
        let d1 = days_since_epoch.rem_euclid(DAYS_PER_400_YEAR_CYCLE);
        let n100 = d1 / DAYS_PER_CENTURY;
        let d2 = d1 % DAYS_PER_CENTURY;
        let n4 = d2 / DAYS_PER_4_YEAR_CYCLE;
        let d3 = d2 % DAYS_PER_4_YEAR_CYCLE;
        let n1 = d3 / DAYS_IN_COMMON_YEAR;
        let year = GREGORIAN_CYCLE * n400 + CENTURY_CYCLE * n100 + LEAP_YEAR_CYCLE * n4 + n1;
        if n100 == 4 || n1 == 4 {
            (year, DAYS_IN_LEAP_YEAR)
        } else {
            (year + 1, d3 % DAYS_IN_COMMON_YEAR + 1)
        }
    }
}

impl CalendricalSchema for GregorianSchema {
    fn family(&self) -> CalendricalFamily {
        CalendricalFamily::Solar
    }

    fn min_days_in_year(&self) -> i32 {
        DAYS_IN_COMMON_YEAR
    }

    fn min_days_in_month(&self) -> i32 {
        28
    }

    fn pre_validator(&self) -> PreValidator {
        PreValidator::Solar12
    }

    fn regular_months_in_year(&self) -> Option<i32> {
        Some(MONTHS_IN_YEAR)
    }

    fn is_leap_year(&self, year: i32) -> bool {
        Self::is_leap(year)
    }

    fn is_intercalary_day(&self, _year: i32, month: i32, day: i32) -> bool {
        month == FEBRUARY && day == 29
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

    fn count_days_in_year_before_month(&self, year: i32, month: i32) -> i32 {
        solar12_count_days_in_year_before_month(Self::is_leap(year), month)
    }

    fn count_days_in_month(&self, year: i32, month: i32) -> i32 {
        solar12_count_days_in_month(Self::is_leap(year), month)
    }

    fn count_months_since_epoch(&self, year: i32, month: i32) -> i32 {
        regular_count_months_since_epoch(MONTHS_IN_YEAR, year, month)
    }

    fn get_month_parts(&self, months_since_epoch: i32) -> MonthParts {
        regular_get_month_parts(MONTHS_IN_YEAR, months_since_epoch)
    }

    fn get_start_of_year(&self, year: i32) -> i32 {
        Self::start_of_year(year)
    }

    fn get_year(&self, days_since_epoch: i32) -> i32 {
        Self::ordinal_parts(days_since_epoch).0
    }

    fn get_ordinal_parts(&self, days_since_epoch: i32) -> OrdinalParts {
        let (year, day_of_year) = Self::ordinal_parts(days_since_epoch);
        OrdinalParts::new(year, day_of_year)
    }

    fn get_month(&self, year: i32, day_of_year: i32) -> (i32, i32) {
        solar12_get_month(Self::is_leap(year), day_of_year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::testing::{check_round_trip, check_supported_bounds, check_year_consistency};

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year: i32,
            is_leap: bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year: 2016,
                is_leap: true,
                description: "divisible by 4",
            },
            TestCase {
                year: 2015,
                is_leap: false,
                description: "not divisible by 4",
            },
            TestCase {
                year: 1900,
                is_leap: false,
                description: "century not divisible by 400",
            },
            TestCase {
                year: 2000,
                is_leap: true,
                description: "divisible by 400",
            },
            TestCase {
                year: 0,
                is_leap: true,
                description: "year zero",
            },
            TestCase {
                year: -4,
                is_leap: true,
                description: "negative, divisible by 4",
            },
            TestCase {
                year: -100,
                is_leap: false,
                description: "negative century",
            },
        ];

        for case in &cases {
            assert_eq!(
                GregorianSchema.is_leap_year(case.year),
                case.is_leap,
                "Year {} ({})",
                case.year,
                case.description,
            );
        }
    }

    #[test]
    fn test_known_day_counts() {
        let schema = GregorianSchema;
        assert_eq!(schema.count_days_since_epoch(1, 1, 1), 0);
        assert_eq!(schema.get_date_parts(0).deconstruct(), (1, 1, 1));
        assert_eq!(schema.count_days_since_epoch(2016, 5, 31), 736_114);
        assert_eq!(schema.count_days_since_epoch(1970, 1, 1), 719_162);
        assert_eq!(schema.count_days_since_epoch(0, 12, 31), -1);
        assert_eq!(schema.get_date_parts(-1).deconstruct(), (0, 12, 31));
        assert_eq!(schema.get_date_parts(-366).deconstruct(), (0, 1, 1));
    }

    #[test]
    fn test_days_in_month() {
        let schema = GregorianSchema;
        assert_eq!(schema.count_days_in_month(2016, 2), 29);
        assert_eq!(schema.count_days_in_month(2015, 2), 28);
        assert_eq!(schema.count_days_in_month(2016, 4), 30);
        assert_eq!(schema.count_days_in_month(2016, 12), 31);
    }

    #[test]
    fn test_leap_year_consistency() {
        let schema = GregorianSchema;
        for y in -800..=2800 {
            let expected = 365 + i32::from(schema.is_leap_year(y));
            assert_eq!(schema.count_days_in_year(y), expected, "year {y}");
        }
    }

    #[test]
    fn test_intercalary_day() {
        let schema = GregorianSchema;
        assert!(schema.is_intercalary_day(2016, 2, 29));
        assert!(!schema.is_intercalary_day(2016, 2, 28));
        assert!(!schema.is_supplementary_day(2016, 2, 29));
    }

    #[test]
    fn test_round_trip() {
        let schema = GregorianSchema;
        // Two full 400-year cycles around the epoch.
        check_round_trip(&schema, -146_097, 146_097);
        let start = schema.get_start_of_year(1999);
        check_round_trip(&schema, start, start + 1000);
    }

    #[test]
    fn test_year_consistency() {
        check_year_consistency(&GregorianSchema, &[-401, -400, -1, 0, 1, 4, 100, 1900, 2000, 2016]);
    }

    #[test]
    fn test_supported_bounds() {
        check_supported_bounds(&GregorianSchema);
    }

    quickcheck::quickcheck! {
        fn prop_round_trip(days: i32) -> bool {
            let days = days % 365_000_000;
            let parts = GregorianSchema.get_date_parts(days);
            GregorianSchema.count_days_since_epoch(parts.year, parts.month, parts.day) == days
        }
    }
}
