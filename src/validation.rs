use crate::schema::CalendricalSchema;
use crate::CalendarError;

/// Structural checks run on a (month, day) or a day-of-year before a
/// packed date is built from it.
///
/// The year must already have been validated. Each variant carries a
/// fast path for the values every year of its family accepts, and only
/// asks the schema when that path is not enough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreValidator {
    /// No shortcut: every check queries the schema.
    Plain,
    /// Twelve months, none shorter than 28 days.
    Solar12,
    /// Twelve months of 30 days followed by a short thirteenth month.
    Solar13,
    /// Twelve months, none shorter than 29 days.
    Lunar12,
}

impl PreValidator {
    /// # Errors
    /// Returns `CalendarError::OutOfRange` naming `month` or `day`.
    pub fn validate_month_day(
        self,
        schema: &dyn CalendricalSchema,
        year: i32,
        month: i32,
        day: i32,
    ) -> Result<(), CalendarError> {
        let months_in_year = match self {
            Self::Solar12 | Self::Lunar12 => 12,
            Self::Solar13 => 13,
            Self::Plain => schema.count_months_in_year(year),
        };
        if !(1..=months_in_year).contains(&month) {
            return Err(CalendarError::out_of_range("month", month));
        }
        let always_valid = match self {
            Self::Plain => 0,
            Self::Solar12 => 28,
            Self::Solar13 if month < 13 => 30,
            Self::Solar13 => 0,
            Self::Lunar12 => 29,
        };
        if day < 1 || (day > always_valid && day > schema.count_days_in_month(year, month)) {
            return Err(CalendarError::out_of_range("day", day));
        }
        Ok(())
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` naming `day_of_year`.
    pub fn validate_day_of_year(
        self,
        schema: &dyn CalendricalSchema,
        year: i32,
        day_of_year: i32,
    ) -> Result<(), CalendarError> {
        if day_of_year < 1
            || (day_of_year > schema.min_days_in_year()
                && day_of_year > schema.count_days_in_year(year))
        {
            return Err(CalendarError::out_of_range("day_of_year", day_of_year));
        }
        Ok(())
    }
}
