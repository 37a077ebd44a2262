//! Day, month and year arithmetic over trusted packed dates.
//!
//! Every operation stays inside the segment the arithmetic object was built
//! for: a result past either end of it is reported as
//! [`CalendarError::Overflow`], never wrapped or clamped.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::prelude::*;
use crate::schema::CalendricalSchema;
use crate::{
    CalendarError, CalendarScope, CalendricalSegment, DateParts, MonthParts, Range, Yedoy, Yemoda,
};

/// How to resolve a month or year addition whose target day does not exist,
/// e.g. one month after May 31st.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdditionRule {
    /// Use the last day of the target month.
    #[default]
    EndOfMonth,
    /// Use the first day of the month after the target month.
    StartOfNextMonth,
    /// Count the missing days past the end of the target month.
    Exact,
    /// Fail with [`CalendarError::Ambiguous`].
    Throw,
}

/// The result of a month or year addition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdditionResult<T> {
    pub value: T,
    /// Days by which the naive target day overflowed its month; 0 when the
    /// target day exists.
    pub roundoff: i32,
}

impl<T> AdditionResult<T> {
    pub const fn is_exact(&self) -> bool {
        self.roundoff == 0
    }
}

/// The difference between two dates, as returned by
/// [`CalendricalArithmetic::subtract`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "{}Y{}M{}D", years, months, days)]
pub struct DateDifference {
    pub years: i32,
    pub months: i32,
    pub days: i32,
}

/// Calendrical arithmetic bound to a schema and a segment.
///
/// Inputs are packed dates, so they are assumed to lie inside the segment.
pub trait CalendricalArithmetic: fmt::Debug + Send + Sync {
    fn schema(&self) -> &dyn CalendricalSchema;

    fn segment(&self) -> &CalendricalSegment;

    /// Moves a (year, month) pair by `months` months.
    ///
    /// # Errors
    /// Returns `CalendarError::Overflow` if the target month is outside the
    /// segment.
    fn add_months_to_month(
        &self,
        year: i32,
        month: i32,
        months: i32,
    ) -> Result<MonthParts, CalendarError>;

    /// Number of months from `start` to `end`, ignoring days.
    fn count_months_between_months(&self, start: MonthParts, end: MonthParts) -> i32;

    /// # Errors
    /// Returns `CalendarError::Overflow` if the result is outside the segment.
    fn add_days(&self, ymd: Yemoda, days: i32) -> Result<Yemoda, CalendarError> {
        let schema = self.schema();
        let (y, m, d) = ymd.deconstruct();
        let target = schema
            .count_days_since_epoch(y, m, d)
            .checked_add(days)
            .filter(|&n| self.segment().supported_days().contains(n))
            .ok_or(CalendarError::overflow("add_days"))?;
        let parts = schema.get_date_parts(target);
        Yemoda::new(parts.year, parts.month, parts.day)
    }

    /// # Errors
    /// Returns `CalendarError::Overflow` on the last day of the segment.
    fn next_day(&self, ymd: Yemoda) -> Result<Yemoda, CalendarError> {
        self.add_days(ymd, 1)
    }

    /// # Errors
    /// Returns `CalendarError::Overflow` on the first day of the segment.
    fn previous_day(&self, ymd: Yemoda) -> Result<Yemoda, CalendarError> {
        self.add_days(ymd, -1)
    }

    /// Signed number of days from `start` to `end`.
    ///
    /// # Errors
    /// Returns `CalendarError::Overflow` if the difference does not fit in an `i32`.
    fn count_days_between(&self, start: Yemoda, end: Yemoda) -> Result<i32, CalendarError> {
        let schema = self.schema();
        let (y0, m0, d0) = start.deconstruct();
        let (y1, m1, d1) = end.deconstruct();
        schema
            .count_days_since_epoch(y1, m1, d1)
            .checked_sub(schema.count_days_since_epoch(y0, m0, d0))
            .ok_or(CalendarError::overflow("count_days_between"))
    }

    /// # Errors
    /// Returns `CalendarError::Overflow` if the result is outside the segment.
    fn add_days_ordinal(&self, ydoy: Yedoy, days: i32) -> Result<Yedoy, CalendarError> {
        let schema = self.schema();
        let (y, doy) = ydoy.deconstruct();
        let target = schema
            .count_days_since_epoch_ordinal(y, doy)
            .checked_add(days)
            .filter(|&n| self.segment().supported_days().contains(n))
            .ok_or(CalendarError::overflow("add_days_ordinal"))?;
        let parts = schema.get_ordinal_parts(target);
        Yedoy::new(parts.year, parts.day_of_year)
    }

    /// # Errors
    /// Returns `CalendarError::Overflow` on the last day of the segment.
    fn next_day_ordinal(&self, ydoy: Yedoy) -> Result<Yedoy, CalendarError> {
        let (y, doy) = ydoy.deconstruct();
        if doy < self.schema().count_days_in_year(y) {
            Yedoy::new(y, doy + 1)
        } else if y < self.segment().supported_years().end() {
            Yedoy::new(y + 1, 1)
        } else {
            Err(CalendarError::overflow("next_day_ordinal"))
        }
    }

    /// # Errors
    /// Returns `CalendarError::Overflow` on the first day of the segment.
    fn previous_day_ordinal(&self, ydoy: Yedoy) -> Result<Yedoy, CalendarError> {
        if ydoy.to_ordinal_parts() <= self.segment().min_max_ordinal_parts().start() {
            return Err(CalendarError::overflow("previous_day_ordinal"));
        }
        let (y, doy) = ydoy.deconstruct();
        if doy > 1 {
            Yedoy::new(y, doy - 1)
        } else {
            Yedoy::new(y - 1, self.schema().count_days_in_year(y - 1))
        }
    }

    /// # Errors
    /// Returns `CalendarError::Overflow` if the difference does not fit in an `i32`.
    fn count_days_between_ordinal(&self, start: Yedoy, end: Yedoy) -> Result<i32, CalendarError> {
        let schema = self.schema();
        let (y0, doy0) = start.deconstruct();
        let (y1, doy1) = end.deconstruct();
        schema
            .count_days_since_epoch_ordinal(y1, doy1)
            .checked_sub(schema.count_days_since_epoch_ordinal(y0, doy0))
            .ok_or(CalendarError::overflow("count_days_between_ordinal"))
    }

    /// Adds `months` months, resolving a nonexistent target day with `rule`.
    ///
    /// The roundoff is reported whatever the rule.
    ///
    /// # Errors
    /// - `CalendarError::Overflow` if the result is outside the segment.
    /// - `CalendarError::Ambiguous` if a roundoff is needed and `rule` is
    ///   [`AdditionRule::Throw`].
    fn add_months(
        &self,
        ymd: Yemoda,
        months: i32,
        rule: AdditionRule,
    ) -> Result<AdditionResult<Yemoda>, CalendarError> {
        let (y, m, d) = ymd.deconstruct();
        let target = self.add_months_to_month(y, m, months)?;
        resolve(self.schema(), self.segment(), target, d, rule)
    }

    /// Adds `years` years, keeping the month and resolving a nonexistent
    /// target day with `rule`.
    ///
    /// If the month does not exist in the target year, the last month of
    /// that year is used instead and the day is resolved against it.
    ///
    /// # Errors
    /// See [`add_months`](Self::add_months).
    fn add_years(
        &self,
        ymd: Yemoda,
        years: i32,
        rule: AdditionRule,
    ) -> Result<AdditionResult<Yemoda>, CalendarError> {
        let (y, m, d) = ymd.deconstruct();
        let year = y
            .checked_add(years)
            .filter(|&n| self.segment().supported_years().contains(n))
            .ok_or(CalendarError::overflow("add_years"))?;
        let month = m.min(self.schema().count_months_in_year(year));
        resolve(self.schema(), self.segment(), MonthParts::new(year, month), d, rule)
    }

    /// The largest number of months `n`, of the same sign as `end - start`,
    /// such that adding `n` months to `start` with [`AdditionRule::EndOfMonth`]
    /// does not pass `end`.
    fn count_months_between(&self, start: Yemoda, end: Yemoda) -> i32 {
        let months = self.count_months_between_months(start.month_parts(), end.month_parts());
        let day = start
            .day()
            .min(self.schema().count_days_in_month(end.year(), end.month()));
        if months > 0 && day > end.day() {
            months - 1
        } else if months < 0 && day < end.day() {
            months + 1
        } else {
            months
        }
    }

    /// The largest number of years `n`, of the same sign as `end - start`,
    /// such that adding `n` years to `start` with [`AdditionRule::EndOfMonth`]
    /// does not pass `end`.
    fn count_years_between(&self, start: Yemoda, end: Yemoda) -> i32 {
        let years = end.year() - start.year();
        let schema = self.schema();
        let month = start.month().min(schema.count_months_in_year(end.year()));
        let day = start
            .day()
            .min(schema.count_days_in_month(end.year(), month));
        let candidate = (month, day);
        let target = (end.month(), end.day());
        if years > 0 && candidate > target {
            years - 1
        } else if years < 0 && candidate < target {
            years + 1
        } else {
            years
        }
    }

    /// Splits the time from `start` to `end` into years, months and days.
    ///
    /// The month count is [`count_months_between`](Self::count_months_between)
    /// and the days are what remains after adding it to `start` with
    /// [`AdditionRule::EndOfMonth`], so all three fields share the sign of
    /// `end - start`. Months are grouped into years only for schemas with a
    /// fixed number of months per year; otherwise `years` is 0.
    ///
    /// # Errors
    /// Returns `CalendarError::Overflow` if the day count does not fit in an `i32`.
    fn subtract(&self, end: Yemoda, start: Yemoda) -> Result<DateDifference, CalendarError> {
        let total_months = self.count_months_between(start, end);
        let middle = self.add_months(start, total_months, AdditionRule::EndOfMonth)?;
        let days = self.count_days_between(middle.value, end)?;
        let (years, months) = match self.schema().regular_months_in_year() {
            Some(months_in_year) => (total_months / months_in_year, total_months % months_in_year),
            None => (0, total_months),
        };
        Ok(DateDifference {
            years,
            months,
            days,
        })
    }
}

// Applies `rule` to the day `day` of the month `target`.
fn resolve(
    schema: &dyn CalendricalSchema,
    segment: &CalendricalSegment,
    target: MonthParts,
    day: i32,
    rule: AdditionRule,
) -> Result<AdditionResult<Yemoda>, CalendarError> {
    let MonthParts { year, month } = target;
    let days_in_month = schema.count_days_in_month(year, month);
    let roundoff = (day - days_in_month).max(0);

    let parts = if roundoff == 0 {
        DateParts::new(year, month, day)
    } else {
        trace!("applying {:?} to {}-{}: roundoff {}", rule, year, month, roundoff);
        match rule {
            AdditionRule::EndOfMonth => DateParts::new(year, month, days_in_month),
            AdditionRule::StartOfNextMonth => {
                if month < schema.count_months_in_year(year) {
                    DateParts::new(year, month + 1, 1)
                } else {
                    DateParts::at_start_of_year(year + 1)
                }
            }
            AdditionRule::Exact => {
                let end_of_month = schema.get_end_of_month(year, month);
                let target = end_of_month
                    .checked_add(roundoff)
                    .filter(|&n| segment.supported_days().contains(n))
                    .ok_or(CalendarError::overflow("add_months"))?;
                schema.get_date_parts(target)
            }
            AdditionRule::Throw => return Err(CalendarError::Ambiguous { roundoff }),
        }
    };

    if !segment.min_max_date_parts().contains(parts) {
        return Err(CalendarError::overflow("add_months"));
    }
    Ok(AdditionResult {
        value: Yemoda::new(parts.year, parts.month, parts.day)?,
        roundoff,
    })
}

fn check_month(
    segment: &CalendricalSegment,
    months_since_epoch: Option<i32>,
) -> Result<i32, CalendarError> {
    months_since_epoch
        .filter(|&n| segment.supported_months().contains(n))
        .ok_or(CalendarError::overflow("add_months"))
}

/// Arithmetic for any schema, relying only on the schema's formulas.
#[derive(Debug, Clone)]
pub struct PlainArithmetic {
    schema: Arc<dyn CalendricalSchema>,
    segment: CalendricalSegment,
}

impl PlainArithmetic {
    pub fn new(schema: Arc<dyn CalendricalSchema>, segment: CalendricalSegment) -> Self {
        Self { schema, segment }
    }
}

impl CalendricalArithmetic for PlainArithmetic {
    fn schema(&self) -> &dyn CalendricalSchema {
        self.schema.as_ref()
    }

    fn segment(&self) -> &CalendricalSegment {
        &self.segment
    }

    fn add_months_to_month(
        &self,
        year: i32,
        month: i32,
        months: i32,
    ) -> Result<MonthParts, CalendarError> {
        let start = self.schema.count_months_since_epoch(year, month);
        let target = check_month(&self.segment, start.checked_add(months))?;
        Ok(self.schema.get_month_parts(target))
    }

    fn count_months_between_months(&self, start: MonthParts, end: MonthParts) -> i32 {
        self.schema.count_months_since_epoch(end.year, end.month)
            - self.schema.count_months_since_epoch(start.year, start.month)
    }
}

/// Arithmetic for schemas with a fixed number of months per year.
///
/// Month arithmetic is plain division and day stepping avoids any day count
/// conversion.
#[derive(Debug, Clone)]
pub struct RegularArithmetic {
    schema: Arc<dyn CalendricalSchema>,
    segment: CalendricalSegment,
    months_in_year: i32,
    min_days_in_month: i32,
}

impl RegularArithmetic {
    /// # Errors
    /// Returns `CalendarError::Argument` if the number of months per year
    /// of `schema` varies.
    pub fn new(
        schema: Arc<dyn CalendricalSchema>,
        segment: CalendricalSegment,
    ) -> Result<Self, CalendarError> {
        let months_in_year = schema.regular_months_in_year().ok_or(CalendarError::argument(
            "schema",
            "the number of months per year is not fixed",
        ))?;
        let min_days_in_month = schema.min_days_in_month();
        Ok(Self {
            schema,
            segment,
            months_in_year,
            min_days_in_month,
        })
    }
}

impl CalendricalArithmetic for RegularArithmetic {
    fn schema(&self) -> &dyn CalendricalSchema {
        self.schema.as_ref()
    }

    fn segment(&self) -> &CalendricalSegment {
        &self.segment
    }

    fn add_months_to_month(
        &self,
        year: i32,
        month: i32,
        months: i32,
    ) -> Result<MonthParts, CalendarError> {
        let start = self.months_in_year * (year - 1) + month - 1;
        let target = check_month(&self.segment, start.checked_add(months))?;
        Ok(MonthParts::new(
            target.div_euclid(self.months_in_year) + 1,
            target.rem_euclid(self.months_in_year) + 1,
        ))
    }

    fn count_months_between_months(&self, start: MonthParts, end: MonthParts) -> i32 {
        self.months_in_year * (end.year - start.year) + end.month - start.month
    }

    fn next_day(&self, ymd: Yemoda) -> Result<Yemoda, CalendarError> {
        let (y, m, d) = ymd.deconstruct();
        if d < self.min_days_in_month || d < self.schema.count_days_in_month(y, m) {
            Yemoda::new(y, m, d + 1)
        } else if m < self.months_in_year {
            Yemoda::new(y, m + 1, 1)
        } else if y < self.segment.supported_years().end() {
            Yemoda::new(y + 1, 1, 1)
        } else {
            Err(CalendarError::overflow("next_day"))
        }
    }

    fn previous_day(&self, ymd: Yemoda) -> Result<Yemoda, CalendarError> {
        if ymd.to_date_parts() <= self.segment.min_max_date_parts().start() {
            return Err(CalendarError::overflow("previous_day"));
        }
        let (y, m, d) = ymd.deconstruct();
        if d > 1 {
            Yemoda::new(y, m, d - 1)
        } else if m > 1 {
            Yemoda::new(y, m - 1, self.schema.count_days_in_month(y, m - 1))
        } else {
            let month = self.months_in_year;
            Yemoda::new(y - 1, month, self.schema.count_days_in_month(y - 1, month))
        }
    }
}

/// Returns the general-purpose arithmetic for the years `years` of `schema`:
/// [`RegularArithmetic`] when the number of months per year is fixed,
/// [`PlainArithmetic`] otherwise.
///
/// # Errors
/// Returns `CalendarError::OutOfRange` if `years` is not supported by the schema.
pub fn create_default(
    schema: Arc<dyn CalendricalSchema>,
    years: Range<i32>,
) -> Result<Box<dyn CalendricalArithmetic>, CalendarError> {
    let segment = CalendricalSegment::create(schema.as_ref(), years)?;
    create_for_segment(schema, segment)
}

/// Returns the general-purpose arithmetic bound to the segment of `scope`.
///
/// # Errors
/// Never fails for the built-in schemas; see [`RegularArithmetic::new`].
pub fn create_for_scope(
    scope: &CalendarScope,
) -> Result<Box<dyn CalendricalArithmetic>, CalendarError> {
    create_for_segment(scope.schema().clone(), scope.segment().clone())
}

fn create_for_segment(
    schema: Arc<dyn CalendricalSchema>,
    segment: CalendricalSegment,
) -> Result<Box<dyn CalendricalArithmetic>, CalendarError> {
    if schema.regular_months_in_year().is_some() {
        Ok(Box::new(RegularArithmetic::new(schema, segment)?))
    } else {
        Ok(Box::new(PlainArithmetic::new(schema, segment)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Coptic13Schema, GregorianSchema, TabularIslamicSchema};
    use crate::{DateParts, DayNumber};

    const RULES: [AdditionRule; 4] = [
        AdditionRule::EndOfMonth,
        AdditionRule::StartOfNextMonth,
        AdditionRule::Exact,
        AdditionRule::Throw,
    ];

    fn gregorian() -> Box<dyn CalendricalArithmetic> {
        create_default(Arc::new(GregorianSchema), Range::new(1, 9999).unwrap()).unwrap()
    }

    fn ymd(y: i32, m: i32, d: i32) -> Yemoda {
        Yemoda::new(y, m, d).unwrap()
    }

    // A date of the Gregorian years 1 to 9999, from an arbitrary integer.
    fn arbitrary_date(seed: u32) -> Yemoda {
        let parts = GregorianSchema.get_date_parts((seed % 3_652_059) as i32);
        ymd(parts.year, parts.month, parts.day)
    }

    #[test]
    fn test_add_months_end_of_month() {
        let arith = gregorian();
        let result = arith
            .add_months(ymd(2016, 5, 31), 1, AdditionRule::EndOfMonth)
            .unwrap();
        assert_eq!(result.value, ymd(2016, 6, 30));
        assert_eq!(result.roundoff, 1);
        assert!(!result.is_exact());
    }

    #[test]
    fn test_add_months_other_rules() {
        let arith = gregorian();
        let d = ymd(2016, 5, 31);
        let exact = arith.add_months(d, 1, AdditionRule::Exact).unwrap();
        assert_eq!((exact.value, exact.roundoff), (ymd(2016, 7, 1), 1));
        let next = arith.add_months(d, 1, AdditionRule::StartOfNextMonth).unwrap();
        assert_eq!((next.value, next.roundoff), (ymd(2016, 7, 1), 1));
        assert_eq!(
            arith.add_months(d, 1, AdditionRule::Throw),
            Err(CalendarError::Ambiguous { roundoff: 1 })
        );

        let d = ymd(2016, 1, 31);
        let exact = arith.add_months(d, 1, AdditionRule::Exact).unwrap();
        assert_eq!((exact.value, exact.roundoff), (ymd(2016, 3, 2), 2));
        let next = arith.add_months(d, 1, AdditionRule::StartOfNextMonth).unwrap();
        assert_eq!(next.value, ymd(2016, 3, 1));
        let end = arith.add_months(d, 1, AdditionRule::EndOfMonth).unwrap();
        assert_eq!(end.value, ymd(2016, 2, 29));
    }

    #[test]
    fn test_add_months_without_roundoff() {
        let arith = gregorian();
        for rule in RULES {
            let result = arith.add_months(ymd(2016, 5, 15), 14, rule).unwrap();
            assert_eq!(result.value, ymd(2017, 7, 15));
            assert!(result.is_exact());
            let result = arith.add_months(ymd(2016, 5, 15), -17, rule).unwrap();
            assert_eq!(result.value, ymd(2014, 12, 15));
        }
    }

    #[test]
    fn test_start_of_next_month_crosses_year() {
        let schema: Arc<dyn CalendricalSchema> = Arc::new(Coptic13Schema);
        let arith = create_default(schema, Range::new(1, 100).unwrap()).unwrap();
        let result = arith
            .add_months(ymd(4, 12, 30), 1, AdditionRule::StartOfNextMonth)
            .unwrap();
        assert_eq!(result.value, ymd(5, 1, 1));
        assert_eq!(result.roundoff, 25);
        let result = arith
            .add_months(ymd(4, 12, 30), 1, AdditionRule::Exact)
            .unwrap();
        assert_eq!(result.value, ymd(5, 1, 25));
    }

    #[test]
    fn test_add_months_overflow() {
        let arith = gregorian();
        for rule in RULES {
            assert!(matches!(
                arith.add_months(ymd(9999, 12, 1), 1, rule),
                Err(CalendarError::Overflow { .. })
            ));
            assert!(matches!(
                arith.add_months(ymd(1, 1, 1), -1, rule),
                Err(CalendarError::Overflow { .. })
            ));
        }
        assert!(arith
            .add_months(ymd(9999, 12, 31), i32::MAX, AdditionRule::EndOfMonth)
            .is_err());
    }

    #[test]
    fn test_add_years() {
        let arith = gregorian();
        let d = ymd(2016, 2, 29);
        let end = arith.add_years(d, 1, AdditionRule::EndOfMonth).unwrap();
        assert_eq!((end.value, end.roundoff), (ymd(2017, 2, 28), 1));
        let exact = arith.add_years(d, 1, AdditionRule::Exact).unwrap();
        assert_eq!(exact.value, ymd(2017, 3, 1));
        let leap = arith.add_years(d, 4, AdditionRule::Throw).unwrap();
        assert_eq!((leap.value, leap.roundoff), (ymd(2020, 2, 29), 0));
        assert!(matches!(
            arith.add_years(d, -1, AdditionRule::Throw),
            Err(CalendarError::Ambiguous { roundoff: 1 })
        ));
        assert!(matches!(
            arith.add_years(d, 8000, AdditionRule::EndOfMonth),
            Err(CalendarError::Overflow { .. })
        ));
    }

    #[test]
    fn test_add_days() {
        let arith = gregorian();
        let d = ymd(2016, 5, 31);
        assert_eq!(arith.add_days(d, 0).unwrap(), d);
        assert_eq!(arith.add_days(d, 1).unwrap(), ymd(2016, 6, 1));
        assert_eq!(arith.add_days(d, -366).unwrap(), ymd(2015, 5, 31));
        let later = arith.add_days(d, 1000).unwrap();
        assert_eq!(arith.count_days_between(d, later).unwrap(), 1000);
        assert_eq!(arith.count_days_between(later, d).unwrap(), -1000);
        assert_eq!(arith.count_days_between(d, d).unwrap(), 0);
    }

    #[test]
    fn test_boundaries() {
        let arith = gregorian();
        let (min, max) = (ymd(1, 1, 1), ymd(9999, 12, 31));
        assert!(matches!(arith.add_days(max, 1), Err(CalendarError::Overflow { .. })));
        assert!(matches!(arith.add_days(min, -1), Err(CalendarError::Overflow { .. })));
        assert!(arith.add_days(min, i32::MIN).is_err());
        assert!(arith.next_day(max).is_err());
        assert!(arith.previous_day(min).is_err());
        assert_eq!(arith.next_day(ymd(9999, 12, 30)).unwrap(), max);
        assert_eq!(arith.previous_day(ymd(1, 1, 2)).unwrap(), min);
    }

    #[test]
    fn test_next_and_previous_day() {
        let arith = gregorian();
        assert_eq!(arith.next_day(ymd(2016, 2, 28)).unwrap(), ymd(2016, 2, 29));
        assert_eq!(arith.next_day(ymd(2016, 2, 29)).unwrap(), ymd(2016, 3, 1));
        assert_eq!(arith.next_day(ymd(2016, 12, 31)).unwrap(), ymd(2017, 1, 1));
        assert_eq!(arith.previous_day(ymd(2017, 1, 1)).unwrap(), ymd(2016, 12, 31));
        assert_eq!(arith.previous_day(ymd(2016, 3, 1)).unwrap(), ymd(2016, 2, 29));
        assert_eq!(arith.previous_day(ymd(2015, 3, 1)).unwrap(), ymd(2015, 2, 28));
    }

    #[test]
    fn test_regular_agrees_with_plain() {
        let schema: Arc<dyn CalendricalSchema> = Arc::new(TabularIslamicSchema);
        let segment = CalendricalSegment::create(schema.as_ref(), Range::new(1, 100).unwrap())
            .unwrap();
        let plain = PlainArithmetic::new(schema.clone(), segment.clone());
        let regular = RegularArithmetic::new(schema.clone(), segment).unwrap();
        for n in 0..800 {
            let parts = schema.get_date_parts(n);
            let d = ymd(parts.year, parts.month, parts.day);
            assert_eq!(plain.next_day(d).ok(), regular.next_day(d).ok(), "{d}");
            assert_eq!(plain.previous_day(d).ok(), regular.previous_day(d).ok(), "{d}");
            for rule in RULES {
                assert_eq!(plain.add_months(d, 13, rule), regular.add_months(d, 13, rule));
            }
        }
    }

    #[test]
    fn test_ordinal_arithmetic() {
        let arith = gregorian();
        let ydoy = |y, doy| Yedoy::new(y, doy).unwrap();
        assert_eq!(arith.next_day_ordinal(ydoy(2016, 365)).unwrap(), ydoy(2016, 366));
        assert_eq!(arith.next_day_ordinal(ydoy(2016, 366)).unwrap(), ydoy(2017, 1));
        assert_eq!(arith.previous_day_ordinal(ydoy(2017, 1)).unwrap(), ydoy(2016, 366));
        assert_eq!(arith.add_days_ordinal(ydoy(2016, 1), 366).unwrap(), ydoy(2017, 1));
        assert_eq!(
            arith.count_days_between_ordinal(ydoy(2016, 1), ydoy(2017, 1)).unwrap(),
            366
        );
        assert!(arith.next_day_ordinal(ydoy(9999, 365)).is_err());
        assert!(arith.previous_day_ordinal(ydoy(1, 1)).is_err());
        assert!(arith.add_days_ordinal(ydoy(1, 1), -1).is_err());
    }

    #[test]
    fn test_bounded_below_segment() {
        let scope = CalendarScope::bounded_below(
            Arc::new(GregorianSchema),
            DayNumber::ZERO,
            DateParts::new(1582, 10, 15),
            9999,
        )
        .unwrap();
        let arith = create_for_scope(&scope).unwrap();
        let first = ymd(1582, 10, 15);
        assert!(arith.previous_day(first).is_err());
        assert!(arith.add_days(first, -1).is_err());
        assert!(matches!(
            arith.add_months(ymd(1582, 11, 10), -1, AdditionRule::EndOfMonth),
            Err(CalendarError::Overflow { .. })
        ));
        let result = arith
            .add_months(ymd(1582, 11, 20), -1, AdditionRule::EndOfMonth)
            .unwrap();
        assert_eq!(result.value, ymd(1582, 10, 20));
        let ydoy = Yedoy::new(1582, 288).unwrap();
        assert!(arith.previous_day_ordinal(ydoy).is_err());
    }

    #[test]
    fn test_count_months_and_years_between() {
        let arith = gregorian();
        assert_eq!(arith.count_months_between(ymd(2016, 5, 31), ymd(2016, 6, 30)), 1);
        assert_eq!(arith.count_months_between(ymd(2016, 5, 31), ymd(2016, 6, 29)), 0);
        assert_eq!(arith.count_months_between(ymd(2016, 7, 31), ymd(2016, 6, 30)), -1);
        assert_eq!(arith.count_months_between(ymd(2016, 6, 30), ymd(2016, 5, 31)), 0);
        assert_eq!(arith.count_months_between(ymd(2016, 1, 15), ymd(2017, 1, 15)), 12);
        assert_eq!(arith.count_years_between(ymd(2016, 2, 29), ymd(2017, 2, 28)), 1);
        assert_eq!(arith.count_years_between(ymd(2016, 3, 1), ymd(2017, 2, 28)), 0);
        assert_eq!(arith.count_years_between(ymd(2017, 2, 28), ymd(2016, 2, 28)), -1);
        // One year before 2017-02-28 is 2016-02-28, already past 2016-02-29.
        assert_eq!(arith.count_years_between(ymd(2017, 2, 28), ymd(2016, 2, 29)), 0);
        assert_eq!(arith.count_years_between(ymd(2016, 5, 31), ymd(2016, 5, 1)), 0);
    }

    #[test]
    fn test_subtract() {
        let arith = gregorian();
        let diff = arith.subtract(ymd(2016, 6, 30), ymd(2016, 5, 31)).unwrap();
        assert_eq!(diff, DateDifference { years: 0, months: 1, days: 0 });
        let diff = arith.subtract(ymd(2017, 3, 1), ymd(2016, 2, 29)).unwrap();
        assert_eq!(diff, DateDifference { years: 1, months: 0, days: 1 });
        let diff = arith.subtract(ymd(2016, 5, 31), ymd(2016, 6, 30)).unwrap();
        assert_eq!(diff, DateDifference { years: 0, months: 0, days: -30 });
        let diff = arith.subtract(ymd(2014, 12, 15), ymd(2016, 5, 31)).unwrap();
        assert_eq!(diff, DateDifference { years: -1, months: -5, days: -16 });
        assert_eq!(diff.to_string(), "-1Y-5M-16D");
        let d = ymd(2016, 5, 31);
        assert_eq!(arith.subtract(d, d).unwrap(), DateDifference::default());
    }

    #[test]
    fn test_month_outside_the_year_does_not_panic() {
        // Decodes to 2016-13-30, a date no twelve-month year has.
        let ymd = Yemoda::from_bits(((2016 - 1) << 9) | (12 << 5) | 29).unwrap();
        let arith = gregorian();
        assert_eq!(arith.next_day(ymd).unwrap(), Yemoda::new(2017, 1, 1).unwrap());
        assert!(arith.previous_day(ymd).is_ok());
        assert!(arith.add_days(ymd, 1).is_ok());
    }

    #[test]
    fn test_subtract_with_plain_arithmetic() {
        let schema: Arc<dyn CalendricalSchema> = Arc::new(GregorianSchema);
        let segment = CalendricalSegment::create(schema.as_ref(), Range::new(1, 9999).unwrap())
            .unwrap();
        let arith = PlainArithmetic::new(schema, segment);
        let diff = arith.subtract(ymd(2017, 3, 1), ymd(2016, 2, 29)).unwrap();
        assert_eq!(diff, DateDifference { years: 1, months: 0, days: 1 });
    }

    #[test]
    fn test_regular_arithmetic_requires_regular_schema() {
        #[derive(Debug)]
        struct Irregular;
        impl CalendricalSchema for Irregular {
            fn family(&self) -> crate::schema::CalendricalFamily {
                crate::schema::CalendricalFamily::Lunisolar
            }
            fn min_days_in_year(&self) -> i32 {
                GregorianSchema.min_days_in_year()
            }
            fn min_days_in_month(&self) -> i32 {
                GregorianSchema.min_days_in_month()
            }
            fn regular_months_in_year(&self) -> Option<i32> {
                None
            }
            fn is_leap_year(&self, y: i32) -> bool {
                GregorianSchema.is_leap_year(y)
            }
            fn is_intercalary_day(&self, y: i32, m: i32, d: i32) -> bool {
                GregorianSchema.is_intercalary_day(y, m, d)
            }
            fn is_supplementary_day(&self, _: i32, _: i32, _: i32) -> bool {
                false
            }
            fn count_months_in_year(&self, y: i32) -> i32 {
                GregorianSchema.count_months_in_year(y)
            }
            fn count_days_in_year(&self, y: i32) -> i32 {
                GregorianSchema.count_days_in_year(y)
            }
            fn count_days_in_year_before_month(&self, y: i32, m: i32) -> i32 {
                GregorianSchema.count_days_in_year_before_month(y, m)
            }
            fn count_days_in_month(&self, y: i32, m: i32) -> i32 {
                GregorianSchema.count_days_in_month(y, m)
            }
            fn count_months_since_epoch(&self, y: i32, m: i32) -> i32 {
                GregorianSchema.count_months_since_epoch(y, m)
            }
            fn get_month_parts(&self, n: i32) -> MonthParts {
                GregorianSchema.get_month_parts(n)
            }
            fn get_start_of_year(&self, y: i32) -> i32 {
                GregorianSchema.get_start_of_year(y)
            }
            fn get_year(&self, n: i32) -> i32 {
                GregorianSchema.get_year(n)
            }
            fn get_month(&self, y: i32, doy: i32) -> (i32, i32) {
                GregorianSchema.get_month(y, doy)
            }
        }

        let schema: Arc<dyn CalendricalSchema> = Arc::new(Irregular);
        let segment = CalendricalSegment::create(schema.as_ref(), Range::new(1, 10).unwrap())
            .unwrap();
        assert!(matches!(
            RegularArithmetic::new(schema.clone(), segment),
            Err(CalendarError::Argument { param: "schema", .. })
        ));
        let arith = create_default(schema, Range::new(1, 10).unwrap()).unwrap();
        let diff = arith.subtract(ymd(3, 3, 1), ymd(2, 2, 1)).unwrap();
        assert_eq!(diff, DateDifference { years: 0, months: 13, days: 0 });
        assert_eq!(
            arith.add_months(ymd(2, 1, 31), 1, AdditionRule::EndOfMonth).unwrap().value,
            ymd(2, 2, 28)
        );
    }

    #[test]
    fn test_rule_serde() {
        assert_eq!(AdditionRule::default(), AdditionRule::EndOfMonth);
        let json = serde_json::to_string(&AdditionRule::StartOfNextMonth).unwrap();
        assert_eq!(json, r#""StartOfNextMonth""#);
        let rule: AdditionRule = serde_json::from_str(r#""Exact""#).unwrap();
        assert_eq!(rule, AdditionRule::Exact);
    }

    quickcheck::quickcheck! {
        fn prop_zero_delta_is_identity(seed: u32) -> bool {
            let arith = gregorian();
            let d = arbitrary_date(seed);
            arith.add_days(d, 0) == Ok(d)
                && arith.count_days_between(d, d) == Ok(0)
                && RULES.iter().all(|&rule| {
                    arith.add_months(d, 0, rule) == Ok(AdditionResult { value: d, roundoff: 0 })
                        && arith.add_years(d, 0, rule).map(|r| r.value) == Ok(d)
                })
        }

        fn prop_add_days_inverts_count_days_between(seed: u32, days: i32) -> bool {
            let arith = gregorian();
            let d = arbitrary_date(seed);
            match arith.add_days(d, days) {
                Ok(later) => arith.count_days_between(d, later) == Ok(days),
                Err(err) => matches!(err, CalendarError::Overflow { .. }),
            }
        }

        fn prop_add_months_inverse_without_roundoff(seed: u32, months: i16) -> bool {
            let arith = gregorian();
            let d = arbitrary_date(seed);
            let n = i32::from(months);
            RULES.iter().all(|&rule| match arith.add_months(d, n, rule) {
                Ok(result) if result.is_exact() => {
                    arith.add_months(result.value, -n, rule).map(|r| r.value) == Ok(d)
                }
                _ => true,
            })
        }

        fn prop_exact_rule_preserves_information(seed: u32, months: i16) -> bool {
            let arith = gregorian();
            let d = arbitrary_date(seed);
            let n = i32::from(months);
            let Ok(result) = arith.add_months(d, n, AdditionRule::Exact) else { return true };
            let recovered = arith
                .add_days(result.value, -result.roundoff)
                .and_then(|end| arith.add_months(end, -n, AdditionRule::EndOfMonth))
                .and_then(|back| arith.add_days(back.value, result.roundoff));
            recovered == Ok(d)
        }

        fn prop_subtract_round_trip(a: u32, b: u32) -> bool {
            let arith = gregorian();
            let (end, start) = (arbitrary_date(a), arbitrary_date(b));
            let Ok(diff) = arith.subtract(end, start) else { return false };
            let same_sign = [diff.years, diff.months, diff.days]
                .iter()
                .all(|&x| x == 0 || (x > 0) == (end > start));
            let replayed = arith
                .add_months(start, 12 * diff.years + diff.months, AdditionRule::EndOfMonth)
                .and_then(|r| arith.add_days(r.value, diff.days));
            same_sign && replayed == Ok(end)
        }
    }
}
