//! Conversions between day counts, plain parts and packed dates.

use std::sync::Arc;

use crate::schema::CalendricalSchema;
use crate::{
    CalendarError, CalendarScope, CalendricalSegment, DateParts, MonthParts, OrdinalParts, Yedoy,
    Yemoda,
};

/// Builds plain parts from the formulas of a schema, without validation.
#[derive(Debug, Clone, Copy)]
pub struct PartsAdapter<'a> {
    schema: &'a dyn CalendricalSchema,
}

impl<'a> PartsAdapter<'a> {
    pub fn new(schema: &'a dyn CalendricalSchema) -> Self {
        Self { schema }
    }

    pub fn get_date_parts(&self, days_since_epoch: i32) -> DateParts {
        self.schema.get_date_parts(days_since_epoch)
    }

    pub fn get_ordinal_parts(&self, days_since_epoch: i32) -> OrdinalParts {
        self.schema.get_ordinal_parts(days_since_epoch)
    }

    pub fn get_month_parts(&self, months_since_epoch: i32) -> MonthParts {
        self.schema.get_month_parts(months_since_epoch)
    }

    /// Ordinal form of a (year, month, day).
    pub fn get_ordinal_parts_of(&self, year: i32, month: i32, day: i32) -> OrdinalParts {
        OrdinalParts::new(year, self.schema.get_day_of_year(year, month, day))
    }

    /// Date form of a (year, day-of-year).
    pub fn get_date_parts_of(&self, year: i32, day_of_year: i32) -> DateParts {
        let (month, day) = self.schema.get_month(year, day_of_year);
        DateParts::new(year, month, day)
    }

    pub fn get_date_parts_at_end_of_year(&self, year: i32) -> DateParts {
        let month = self.schema.count_months_in_year(year);
        DateParts::new(year, month, self.schema.count_days_in_month(year, month))
    }

    pub fn get_ordinal_parts_at_end_of_year(&self, year: i32) -> OrdinalParts {
        OrdinalParts::new(year, self.schema.count_days_in_year(year))
    }

    pub fn get_date_parts_at_end_of_month(&self, year: i32, month: i32) -> DateParts {
        DateParts::new(year, month, self.schema.count_days_in_month(year, month))
    }
}

/// Creates packed dates from day counts, checked against a segment.
#[derive(Debug, Clone)]
pub struct PartsFactory {
    schema: Arc<dyn CalendricalSchema>,
    segment: CalendricalSegment,
}

impl PartsFactory {
    pub fn new(schema: Arc<dyn CalendricalSchema>, segment: CalendricalSegment) -> Self {
        Self { schema, segment }
    }

    pub fn for_scope(scope: &CalendarScope) -> Self {
        Self::new(scope.schema().clone(), scope.segment().clone())
    }

    pub fn adapter(&self) -> PartsAdapter<'_> {
        PartsAdapter::new(self.schema.as_ref())
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` naming `days_since_epoch` if the
    /// day is outside the segment.
    pub fn get_yemoda(&self, days_since_epoch: i32) -> Result<Yemoda, CalendarError> {
        self.check_days(days_since_epoch)?;
        let DateParts { year, month, day } = self.schema.get_date_parts(days_since_epoch);
        Yemoda::new(year, month, day)
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` naming `days_since_epoch` if the
    /// day is outside the segment.
    pub fn get_yedoy(&self, days_since_epoch: i32) -> Result<Yedoy, CalendarError> {
        self.check_days(days_since_epoch)?;
        let OrdinalParts { year, day_of_year } = self.schema.get_ordinal_parts(days_since_epoch);
        Yedoy::new(year, day_of_year)
    }

    pub fn count_days_since_epoch(&self, ymd: Yemoda) -> i32 {
        let (y, m, d) = ymd.deconstruct();
        self.schema.count_days_since_epoch(y, m, d)
    }

    pub fn count_days_since_epoch_ordinal(&self, ydoy: Yedoy) -> i32 {
        let (y, doy) = ydoy.deconstruct();
        self.schema.count_days_since_epoch_ordinal(y, doy)
    }

    /// # Errors
    /// Never fails for a date built inside the same segment.
    pub fn to_yedoy(&self, ymd: Yemoda) -> Result<Yedoy, CalendarError> {
        let (y, m, d) = ymd.deconstruct();
        Yedoy::new(y, self.schema.get_day_of_year(y, m, d))
    }

    /// # Errors
    /// Never fails for a date built inside the same segment.
    pub fn to_yemoda(&self, ydoy: Yedoy) -> Result<Yemoda, CalendarError> {
        let (y, doy) = ydoy.deconstruct();
        let (m, d) = self.schema.get_month(y, doy);
        Yemoda::new(y, m, d)
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` naming `year` if the first day of
    /// the year is outside the segment.
    pub fn get_start_of_year(&self, year: i32) -> Result<Yemoda, CalendarError> {
        self.checked_yemoda(DateParts::at_start_of_year(year), "year", year)
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` naming `year` if the year is
    /// outside the segment.
    pub fn get_end_of_year(&self, year: i32) -> Result<Yemoda, CalendarError> {
        if !self.segment.supported_years().contains(year) {
            return Err(CalendarError::out_of_range("year", year));
        }
        let DateParts { year, month, day } = self.adapter().get_date_parts_at_end_of_year(year);
        Yemoda::new(year, month, day)
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` naming `month` if the first day
    /// of the month is outside the segment.
    pub fn get_start_of_month(&self, ymd: Yemoda) -> Result<Yemoda, CalendarError> {
        let start = ymd.start_of_month();
        self.checked_yemoda(start.to_date_parts(), "month", ymd.month())
    }

    /// # Errors
    /// Never fails for a date built inside the same segment.
    pub fn get_end_of_month(&self, ymd: Yemoda) -> Result<Yemoda, CalendarError> {
        let (y, m, _) = ymd.deconstruct();
        Yemoda::new(y, m, self.schema.count_days_in_month(y, m))
    }

    fn check_days(&self, days_since_epoch: i32) -> Result<(), CalendarError> {
        if !self.segment.supported_days().contains(days_since_epoch) {
            return Err(CalendarError::out_of_range("days_since_epoch", days_since_epoch));
        }
        Ok(())
    }

    fn checked_yemoda(
        &self,
        parts: DateParts,
        param: &'static str,
        value: i32,
    ) -> Result<Yemoda, CalendarError> {
        if !self.segment.min_max_date_parts().contains(parts) {
            return Err(CalendarError::out_of_range(param, value));
        }
        Yemoda::new(parts.year, parts.month, parts.day)
    }
}
