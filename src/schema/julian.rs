use crate::consts::{
    DAYS_IN_COMMON_YEAR, DAYS_IN_LEAP_YEAR, DAYS_PER_4_YEAR_CYCLE, FEBRUARY, LEAP_YEAR_CYCLE,
};
use crate::schema::{
    narrow, regular_count_months_since_epoch, regular_get_month_parts,
    solar12_count_days_in_month, solar12_count_days_in_year_before_month, solar12_get_month,
    CalendricalFamily, CalendricalSchema,
};
use crate::{MonthParts, PreValidator};

const MONTHS_IN_YEAR: i32 = 12;

/// The proleptic Julian calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct JulianSchema;

impl JulianSchema {
    pub const fn is_leap(year: i32) -> bool {
        year.rem_euclid(LEAP_YEAR_CYCLE) == 0
    }

    pub const fn start_of_year(year: i32) -> i32 {
        let y = year - 1;
        DAYS_IN_COMMON_YEAR * y + y.div_euclid(LEAP_YEAR_CYCLE)
    }
}

impl CalendricalSchema for JulianSchema {
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
        let days = i64::from(days_since_epoch);
        narrow(
            (i64::from(LEAP_YEAR_CYCLE) * days + 1464).div_euclid(i64::from(DAYS_PER_4_YEAR_CYCLE)),
        )
    }

    fn get_month(&self, year: i32, day_of_year: i32) -> (i32, i32) {
        solar12_get_month(Self::is_leap(year), day_of_year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::testing::{check_round_trip, check_supported_bounds, check_year_consistency};
    use crate::schema::GregorianSchema;
    use crate::DayNumber;

    #[test]
    fn test_is_leap_year() {
        assert!(JulianSchema.is_leap_year(1900));
        assert!(JulianSchema.is_leap_year(0));
        assert!(JulianSchema.is_leap_year(-4));
        assert!(!JulianSchema.is_leap_year(-1));
        assert!(!JulianSchema.is_leap_year(2015));
    }

    #[test]
    fn test_known_day_counts() {
        let schema = JulianSchema;
        assert_eq!(schema.count_days_since_epoch(1, 1, 1), 0);
        assert_eq!(schema.get_date_parts(0).deconstruct(), (1, 1, 1));
        assert_eq!(schema.get_date_parts(365).deconstruct(), (2, 1, 1));
        assert_eq!(schema.get_date_parts(1460).deconstruct(), (4, 12, 31));
        assert_eq!(schema.get_date_parts(-1).deconstruct(), (0, 12, 31));
    }

    #[test]
    fn test_agrees_with_gregorian_after_epoch_shift() {
        // Julian 1582-10-05 is Gregorian 1582-10-15.
        let julian = JulianSchema.count_days_since_epoch(1582, 10, 5)
            + DayNumber::JULIAN_EPOCH.get();
        let gregorian = GregorianSchema.count_days_since_epoch(1582, 10, 15)
            + DayNumber::GREGORIAN_EPOCH.get();
        assert_eq!(julian, gregorian);
    }

    #[test]
    fn test_leap_year_consistency() {
        for y in -100..=100 {
            let expected = 365 + i32::from(JulianSchema.is_leap_year(y));
            assert_eq!(JulianSchema.count_days_in_year(y), expected, "year {y}");
        }
    }

    #[test]
    fn test_round_trip() {
        check_round_trip(&JulianSchema, -20_000, 20_000);
    }

    #[test]
    fn test_year_consistency() {
        check_year_consistency(&JulianSchema, &[-5, -4, -1, 0, 1, 3, 4, 1900, 2016]);
    }

    #[test]
    fn test_supported_bounds() {
        check_supported_bounds(&JulianSchema);
    }
}
