//! The validation boundary of a calendar.

use std::fmt;
use std::sync::Arc;

use crate::schema::CalendricalSchema;
use crate::{
    CalendarError, CalendricalSegment, DateParts, DayNumber, OrdinalParts, Range, Yedoy, Yemoda,
};

/// How the range of a scope was delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeShape {
    /// Whole years, from the first day of a year to the last day of another.
    MinMaxYear,
    /// Starts on an arbitrary day, e.g. the day a calendar was introduced.
    BoundedBelow,
}

/// A schema, an epoch and a segment.
///
/// This is the only component that accepts raw year/month/day input: every
/// validation failure is reported with the name of the rejected parameter,
/// a value is never clamped.
#[derive(Clone)]
pub struct CalendarScope {
    schema: Arc<dyn CalendricalSchema>,
    epoch: DayNumber,
    segment: CalendricalSegment,
    domain: Range<DayNumber>,
    shape: ScopeShape,
}

impl CalendarScope {
    /// Creates a scope spanning the years `min_year` to `max_year`.
    ///
    /// # Errors
    /// - `CalendarError::Argument` if `min_year > max_year`.
    /// - `CalendarError::OutOfRange` if a year is not supported by the schema.
    /// - `CalendarError::Overflow` if the days of the range, shifted by
    ///   `epoch`, do not fit in a [`DayNumber`].
    pub fn min_max_year(
        schema: Arc<dyn CalendricalSchema>,
        epoch: DayNumber,
        min_year: i32,
        max_year: i32,
    ) -> Result<Self, CalendarError> {
        let years = Range::new(min_year, max_year)?;
        let segment = CalendricalSegment::create(schema.as_ref(), years)?;
        Self::from_segment(schema, epoch, segment, ScopeShape::MinMaxYear)
    }

    /// Creates a scope from `min_year` to the last year supported by the schema.
    ///
    /// # Errors
    /// See [`CalendarScope::min_max_year`].
    pub fn with_min_year(
        schema: Arc<dyn CalendricalSchema>,
        epoch: DayNumber,
        min_year: i32,
    ) -> Result<Self, CalendarError> {
        let max_year = schema.supported_years().end();
        Self::min_max_year(schema, epoch, min_year, max_year)
    }

    /// Creates a scope from the first year supported by the schema to `max_year`.
    ///
    /// # Errors
    /// See [`CalendarScope::min_max_year`].
    pub fn with_max_year(
        schema: Arc<dyn CalendricalSchema>,
        epoch: DayNumber,
        max_year: i32,
    ) -> Result<Self, CalendarError> {
        let min_year = schema.supported_years().start();
        Self::min_max_year(schema, epoch, min_year, max_year)
    }

    /// Creates a scope spanning every year supported by the schema.
    ///
    /// # Errors
    /// Returns `CalendarError::Overflow` if those days, shifted by `epoch`,
    /// do not fit in a [`DayNumber`].
    pub fn with_maximal_range(
        schema: Arc<dyn CalendricalSchema>,
        epoch: DayNumber,
    ) -> Result<Self, CalendarError> {
        let segment = CalendricalSegment::create_maximal(schema.as_ref());
        Self::from_segment(schema, epoch, segment, ScopeShape::MinMaxYear)
    }

    /// Creates a scope starting on the day `first` and ending with the
    /// year `max_year`.
    ///
    /// # Errors
    /// - `CalendarError::OutOfRange` if `first` is not a valid date, or if
    ///   a year is not supported by the schema.
    /// - `CalendarError::Argument` if `max_year` is before the year of `first`.
    /// - `CalendarError::Overflow` as for [`CalendarScope::min_max_year`].
    pub fn bounded_below(
        schema: Arc<dyn CalendricalSchema>,
        epoch: DayNumber,
        first: DateParts,
        max_year: i32,
    ) -> Result<Self, CalendarError> {
        let segment = CalendricalSegment::create_bounded_below(schema.as_ref(), first, max_year)?;
        Self::from_segment(schema, epoch, segment, ScopeShape::BoundedBelow)
    }

    fn from_segment(
        schema: Arc<dyn CalendricalSchema>,
        epoch: DayNumber,
        segment: CalendricalSegment,
        shape: ScopeShape,
    ) -> Result<Self, CalendarError> {
        let (min, max) = segment.supported_days().endpoints();
        let domain = Range::new_unchecked(epoch.checked_add(min)?, epoch.checked_add(max)?);
        debug!(
            "created {:?} scope of {:?}: epoch {}, days {}",
            shape, schema, epoch, domain
        );
        Ok(Self {
            schema,
            epoch,
            segment,
            domain,
            shape,
        })
    }

    pub fn schema(&self) -> &Arc<dyn CalendricalSchema> {
        &self.schema
    }

    /// Day number of the first day of year 1.
    pub fn epoch(&self) -> DayNumber {
        self.epoch
    }

    pub fn segment(&self) -> &CalendricalSegment {
        &self.segment
    }

    /// The range of valid day numbers.
    pub fn domain(&self) -> Range<DayNumber> {
        self.domain
    }

    pub fn shape(&self) -> ScopeShape {
        self.shape
    }

    pub fn contains_year(&self, year: i32) -> bool {
        self.segment.supported_years().contains(year)
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` naming `year`.
    pub fn validate_year(&self, year: i32) -> Result<(), CalendarError> {
        if !self.contains_year(year) {
            return Err(CalendarError::out_of_range("year", year));
        }
        Ok(())
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` naming `year` or `month`.
    pub fn validate_year_month(&self, year: i32, month: i32) -> Result<(), CalendarError> {
        self.validate_year(year)?;
        if !(1..=self.schema.count_months_in_year(year)).contains(&month) {
            return Err(CalendarError::out_of_range("month", month));
        }
        let first = self.first_date_parts();
        if year == first.year && month < first.month {
            return Err(CalendarError::out_of_range("month", month));
        }
        Ok(())
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` naming `year`, `month` or `day`.
    pub fn validate_year_month_day(
        &self,
        year: i32,
        month: i32,
        day: i32,
    ) -> Result<(), CalendarError> {
        self.validate_year(year)?;
        self.schema
            .pre_validator()
            .validate_month_day(self.schema.as_ref(), year, month, day)?;
        let first = self.first_date_parts();
        if year == first.year {
            if month < first.month {
                return Err(CalendarError::out_of_range("month", month));
            }
            if month == first.month && day < first.day {
                return Err(CalendarError::out_of_range("day", day));
            }
        }
        Ok(())
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` naming `year` or `day_of_year`.
    pub fn validate_ordinal(&self, year: i32, day_of_year: i32) -> Result<(), CalendarError> {
        self.validate_year(year)?;
        self.schema
            .pre_validator()
            .validate_day_of_year(self.schema.as_ref(), year, day_of_year)?;
        let first = self.first_ordinal_parts();
        if year == first.year && day_of_year < first.day_of_year {
            return Err(CalendarError::out_of_range("day_of_year", day_of_year));
        }
        Ok(())
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` naming `day_number`.
    pub fn validate_day_number(&self, day_number: DayNumber) -> Result<(), CalendarError> {
        if !self.domain.contains(day_number) {
            return Err(CalendarError::out_of_range("day_number", day_number.get()));
        }
        Ok(())
    }

    /// Same check as [`validate_day_number`](Self::validate_day_number), for
    /// a day number that is the result of a computation.
    ///
    /// # Errors
    /// Returns `CalendarError::Overflow`.
    pub fn check_overflow(&self, day_number: DayNumber) -> Result<(), CalendarError> {
        if !self.domain.contains(day_number) {
            return Err(CalendarError::overflow("CalendarScope::check_overflow"));
        }
        Ok(())
    }

    /// Validates then packs a date.
    ///
    /// # Errors
    /// See [`validate_year_month_day`](Self::validate_year_month_day).
    pub fn create_yemoda(&self, year: i32, month: i32, day: i32) -> Result<Yemoda, CalendarError> {
        self.validate_year_month_day(year, month, day)?;
        Yemoda::new(year, month, day)
    }

    /// Validates then packs an ordinal date.
    ///
    /// # Errors
    /// See [`validate_ordinal`](Self::validate_ordinal).
    pub fn create_yedoy(&self, year: i32, day_of_year: i32) -> Result<Yedoy, CalendarError> {
        self.validate_ordinal(year, day_of_year)?;
        Yedoy::new(year, day_of_year)
    }

    /// Checks a packed date that did not come from this scope, e.g. one
    /// decoded with [`Yemoda::from_bits`] or deserialized.
    ///
    /// # Errors
    /// See [`validate_year_month_day`](Self::validate_year_month_day).
    pub fn validate_yemoda(&self, ymd: Yemoda) -> Result<Yemoda, CalendarError> {
        let (year, month, day) = ymd.deconstruct();
        self.validate_year_month_day(year, month, day)?;
        Ok(ymd)
    }

    /// Ordinal counterpart of [`validate_yemoda`](Self::validate_yemoda).
    ///
    /// # Errors
    /// See [`validate_ordinal`](Self::validate_ordinal).
    pub fn validate_yedoy(&self, ydoy: Yedoy) -> Result<Yedoy, CalendarError> {
        let (year, day_of_year) = ydoy.deconstruct();
        self.validate_ordinal(year, day_of_year)?;
        Ok(ydoy)
    }

    /// Number of months of `year` inside the scope.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` naming `year`.
    pub fn count_months_in_year(&self, year: i32) -> Result<i32, CalendarError> {
        self.validate_year(year)?;
        let count = self.schema.count_months_in_year(year);
        let first = self.first_date_parts();
        Ok(if year == first.year { count - first.month + 1 } else { count })
    }

    /// Number of days of `year` inside the scope.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` naming `year`.
    pub fn count_days_in_year(&self, year: i32) -> Result<i32, CalendarError> {
        self.validate_year(year)?;
        let count = self.schema.count_days_in_year(year);
        let first = self.first_ordinal_parts();
        Ok(if year == first.year { count - first.day_of_year + 1 } else { count })
    }

    /// Number of days of the month inside the scope.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` naming `year` or `month`.
    pub fn count_days_in_month(&self, year: i32, month: i32) -> Result<i32, CalendarError> {
        self.validate_year_month(year, month)?;
        let count = self.schema.count_days_in_month(year, month);
        let first = self.first_date_parts();
        Ok(if year == first.year && month == first.month {
            count - first.day + 1
        } else {
            count
        })
    }

    fn first_date_parts(&self) -> DateParts {
        self.segment.min_max_date_parts().start()
    }

    fn first_ordinal_parts(&self) -> OrdinalParts {
        self.segment.min_max_ordinal_parts().start()
    }
}

impl fmt::Debug for CalendarScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarScope")
            .field("schema", &self.schema)
            .field("epoch", &self.epoch)
            .field("shape", &self.shape)
            .field("dates", &self.segment.min_max_date_parts())
            .finish_non_exhaustive()
    }
}
