//! Precomputed boundaries of a (schema, year range) pair.

use crate::schema::CalendricalSchema;
use crate::{CalendarError, DateParts, OrdinalParts, Range};

/// The concrete boundaries of a range of years of a schema.
///
/// Computed once by the constructors below and never recomputed: scopes,
/// arithmetic objects and factories all read their bounds from here.
/// Day and month counts are relative to the epoch of the schema (the first
/// day, resp. month, of year 1 is 0).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendricalSegment {
    supported_days: Range<i32>,
    supported_months: Range<i32>,
    supported_years: Range<i32>,
    min_max_date_parts: Range<DateParts>,
    min_max_ordinal_parts: Range<OrdinalParts>,
    is_complete: bool,
}

impl CalendricalSegment {
    /// Builds the segment spanning whole years.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` naming `years` if the range is
    /// not a subset of the years supported by `schema`.
    pub fn create(
        schema: &dyn CalendricalSchema,
        years: Range<i32>,
    ) -> Result<Self, CalendarError> {
        check_supported_years(schema, years)?;
        let segment = Self::whole_years(schema, years);
        debug!("created segment of {:?} for years {}", schema, years);
        Ok(segment)
    }

    /// Builds the segment spanning every year supported by `schema`.
    pub fn create_maximal(schema: &dyn CalendricalSchema) -> Self {
        Self::whole_years(schema, schema.supported_years())
    }

    fn whole_years(schema: &dyn CalendricalSchema, years: Range<i32>) -> Self {
        let (min_year, max_year) = years.endpoints();
        let last = last_date_parts(schema, max_year);
        Self {
            supported_days: Range::new_unchecked(
                schema.get_start_of_year(min_year),
                schema.get_end_of_year(max_year),
            ),
            supported_months: Range::new_unchecked(
                schema.count_months_since_epoch(min_year, 1),
                schema.count_months_since_epoch(max_year, last.month),
            ),
            supported_years: years,
            min_max_date_parts: Range::new_unchecked(DateParts::at_start_of_year(min_year), last),
            min_max_ordinal_parts: Range::new_unchecked(
                OrdinalParts::at_start_of_year(min_year),
                OrdinalParts::new(max_year, schema.count_days_in_year(max_year)),
            ),
            is_complete: true,
        }
    }

    /// Builds a segment starting at `first`, which need not be the first
    /// day of its year, and ending with the year `max_year`.
    ///
    /// # Errors
    /// - `CalendarError::OutOfRange` if a year is not supported by the schema,
    ///   or if `first` is not a valid date.
    /// - `CalendarError::Argument` if `max_year` is before the year of `first`.
    pub fn create_bounded_below(
        schema: &dyn CalendricalSchema,
        first: DateParts,
        max_year: i32,
    ) -> Result<Self, CalendarError> {
        let years = Range::new(first.year, max_year)?;
        check_supported_years(schema, years)?;
        schema
            .pre_validator()
            .validate_month_day(schema, first.year, first.month, first.day)?;

        let last = last_date_parts(schema, max_year);
        let first_day_of_year = schema.get_day_of_year(first.year, first.month, first.day);
        let segment = Self {
            supported_days: Range::new_unchecked(
                schema.count_days_since_epoch(first.year, first.month, first.day),
                schema.get_end_of_year(max_year),
            ),
            supported_months: Range::new_unchecked(
                schema.count_months_since_epoch(first.year, first.month),
                schema.count_months_since_epoch(max_year, last.month),
            ),
            supported_years: years,
            min_max_date_parts: Range::new_unchecked(first, last),
            min_max_ordinal_parts: Range::new_unchecked(
                OrdinalParts::new(first.year, first_day_of_year),
                OrdinalParts::new(max_year, schema.count_days_in_year(max_year)),
            ),
            is_complete: first_day_of_year == 1,
        };
        debug!("created segment of {:?} from {} to year {}", schema, first, max_year);
        Ok(segment)
    }

    /// Days since the epoch of the schema, inclusive.
    pub fn supported_days(&self) -> Range<i32> {
        self.supported_days
    }

    /// Months since the epoch of the schema, inclusive.
    pub fn supported_months(&self) -> Range<i32> {
        self.supported_months
    }

    pub fn supported_years(&self) -> Range<i32> {
        self.supported_years
    }

    pub fn min_max_date_parts(&self) -> Range<DateParts> {
        self.min_max_date_parts
    }

    pub fn min_max_ordinal_parts(&self) -> Range<OrdinalParts> {
        self.min_max_ordinal_parts
    }

    /// Whether the segment starts on the first day of a year. It always
    /// ends on the last day of a year.
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }
}

fn check_supported_years(
    schema: &dyn CalendricalSchema,
    years: Range<i32>,
) -> Result<(), CalendarError> {
    let supported = schema.supported_years();
    if years.is_subset_of(&supported) {
        return Ok(());
    }
    let culprit = if supported.contains(years.start()) {
        years.end()
    } else {
        years.start()
    };
    Err(CalendarError::out_of_range("years", culprit))
}

fn last_date_parts(schema: &dyn CalendricalSchema, year: i32) -> DateParts {
    let month = schema.count_months_in_year(year);
    DateParts::new(year, month, schema.count_days_in_month(year, month))
}
