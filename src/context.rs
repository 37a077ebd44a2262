//! Ready-to-use calendars and their one-time, lock-free publication.
//!
//! A shared context is built on first use. Two threads racing on first use
//! may both build one; only the first to publish wins and the other drops
//! its candidate. Both are equivalent, so no lock is taken.

use std::fmt;
use std::sync::Arc;

use once_cell::race::OnceBox;

use crate::arithmetic::{self, AdditionResult, AdditionRule, CalendricalArithmetic, DateDifference};
use crate::schema::{
    CalendricalSchema, Coptic13Schema, Egyptian13Schema, GregorianSchema, JulianSchema,
    TabularIslamicSchema,
};
use crate::{
    CalendarError, CalendarScope, DateParts, DayNumber, DayOfWeek, OrdinalParts, PartsFactory,
    Yemoda,
};

/// First year covered by the shared contexts.
pub const SHARED_MIN_YEAR: i32 = 1;
/// Last year covered by the shared contexts.
pub const SHARED_MAX_YEAR: i32 = 9999;

/// A write-once cell, published with a single compare-and-swap.
///
/// Readers never observe a partially built value.
pub struct Published<T> {
    cell: OnceBox<T>,
}

impl<T> Published<T> {
    pub const fn new() -> Self {
        Self {
            cell: OnceBox::new(),
        }
    }

    /// Returns the published value, if any.
    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    /// Returns the published value, building and publishing one first if
    /// needed.
    ///
    /// # Errors
    /// Returns the error of `build`; nothing is published in that case.
    pub fn get_or_try_publish<E>(&self, build: impl FnOnce() -> Result<T, E>) -> Result<&T, E> {
        if let Some(value) = self.cell.get() {
            return Ok(value);
        }
        let candidate = Box::new(build()?);
        let address: *const T = &*candidate;
        let value = self.cell.get_or_init(|| candidate);
        if !std::ptr::eq(value, address) {
            trace!("lost the race to publish; dropped the redundant candidate");
        }
        Ok(value)
    }
}

impl<T> Default for Published<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Published<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Published").field(&self.get()).finish()
    }
}

/// A scope with its arithmetic and factory, and the addition rule applied
/// by the `plus_*` methods.
#[derive(Debug)]
pub struct CalendarContext {
    scope: CalendarScope,
    arithmetic: Box<dyn CalendricalArithmetic>,
    factory: PartsFactory,
    rule: AdditionRule,
}

impl CalendarContext {
    /// # Errors
    /// Never fails for the built-in schemas; see
    /// [`RegularArithmetic::new`](crate::RegularArithmetic::new).
    pub fn new(scope: CalendarScope, rule: AdditionRule) -> Result<Self, CalendarError> {
        let arithmetic = arithmetic::create_for_scope(&scope)?;
        let factory = PartsFactory::for_scope(&scope);
        Ok(Self {
            scope,
            arithmetic,
            factory,
            rule,
        })
    }

    /// Same context with another addition rule.
    #[must_use]
    pub fn with_rule(self, rule: AdditionRule) -> Self {
        Self { rule, ..self }
    }

    pub fn scope(&self) -> &CalendarScope {
        &self.scope
    }

    pub fn arithmetic(&self) -> &dyn CalendricalArithmetic {
        self.arithmetic.as_ref()
    }

    pub fn factory(&self) -> &PartsFactory {
        &self.factory
    }

    pub fn rule(&self) -> AdditionRule {
        self.rule
    }

    /// Validates then packs a date.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` naming the rejected field.
    pub fn date(&self, year: i32, month: i32, day: i32) -> Result<Yemoda, CalendarError> {
        self.scope.create_yemoda(year, month, day)
    }

    /// Decodes a packed date and checks it against the scope.
    ///
    /// # Errors
    /// Returns `CalendarError::Argument` if the bits do not decode, or
    /// `CalendarError::OutOfRange` naming the rejected field.
    pub fn date_from_bits(&self, bin: i32) -> Result<Yemoda, CalendarError> {
        self.scope.validate_yemoda(Yemoda::from_bits(bin)?)
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` naming the rejected field.
    pub fn day_number(&self, year: i32, month: i32, day: i32) -> Result<DayNumber, CalendarError> {
        let ymd = self.date(year, month, day)?;
        self.day_number_of(ymd)
    }

    /// Day number of a date of this context.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if `ymd` is not a date of the
    /// scope, or `CalendarError::Overflow`.
    pub fn day_number_of(&self, ymd: Yemoda) -> Result<DayNumber, CalendarError> {
        let ymd = self.scope.validate_yemoda(ymd)?;
        let day_number = self
            .scope
            .epoch()
            .checked_add(self.factory.count_days_since_epoch(ymd))?;
        self.scope.check_overflow(day_number)?;
        Ok(day_number)
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` naming `day_number` if it is
    /// outside the scope.
    pub fn date_parts(&self, day_number: DayNumber) -> Result<DateParts, CalendarError> {
        let days = self.days_since_epoch(day_number)?;
        Ok(self.factory.adapter().get_date_parts(days))
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` naming `day_number` if it is
    /// outside the scope.
    pub fn ordinal_parts(&self, day_number: DayNumber) -> Result<OrdinalParts, CalendarError> {
        let days = self.days_since_epoch(day_number)?;
        Ok(self.factory.adapter().get_ordinal_parts(days))
    }

    /// # Errors
    /// See [`day_number_of`](Self::day_number_of).
    pub fn day_of_week(&self, ymd: Yemoda) -> Result<DayOfWeek, CalendarError> {
        Ok(self.day_number_of(ymd)?.day_of_week())
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` if `ymd` is not a date of the
    /// scope, or `CalendarError::Overflow` if the result is outside it.
    pub fn plus_days(&self, ymd: Yemoda, days: i32) -> Result<Yemoda, CalendarError> {
        let ymd = self.scope.validate_yemoda(ymd)?;
        self.arithmetic.add_days(ymd, days)
    }

    /// Adds months with the rule of this context.
    ///
    /// # Errors
    /// See [`CalendricalArithmetic::add_months`].
    pub fn plus_months(
        &self,
        ymd: Yemoda,
        months: i32,
    ) -> Result<AdditionResult<Yemoda>, CalendarError> {
        let ymd = self.scope.validate_yemoda(ymd)?;
        self.arithmetic.add_months(ymd, months, self.rule)
    }

    /// Adds years with the rule of this context.
    ///
    /// # Errors
    /// See [`CalendricalArithmetic::add_years`].
    pub fn plus_years(
        &self,
        ymd: Yemoda,
        years: i32,
    ) -> Result<AdditionResult<Yemoda>, CalendarError> {
        let ymd = self.scope.validate_yemoda(ymd)?;
        self.arithmetic.add_years(ymd, years, self.rule)
    }

    /// # Errors
    /// See [`CalendricalArithmetic::subtract`].
    pub fn subtract(&self, end: Yemoda, start: Yemoda) -> Result<DateDifference, CalendarError> {
        let end = self.scope.validate_yemoda(end)?;
        let start = self.scope.validate_yemoda(start)?;
        self.arithmetic.subtract(end, start)
    }

    fn days_since_epoch(&self, day_number: DayNumber) -> Result<i32, CalendarError> {
        self.scope.validate_day_number(day_number)?;
        day_number.count_days_since(self.scope.epoch())
    }
}

fn shared(
    cell: &'static Published<CalendarContext>,
    schema: Arc<dyn CalendricalSchema>,
    epoch: DayNumber,
) -> Result<&'static CalendarContext, CalendarError> {
    cell.get_or_try_publish(|| {
        let scope = CalendarScope::min_max_year(schema, epoch, SHARED_MIN_YEAR, SHARED_MAX_YEAR)?;
        CalendarContext::new(scope, AdditionRule::default())
    })
}

/// The proleptic Gregorian calendar, years 1 to 9999.
///
/// # Errors
/// Never fails in practice; the error of the first construction is returned
/// otherwise.
pub fn gregorian() -> Result<&'static CalendarContext, CalendarError> {
    static CONTEXT: Published<CalendarContext> = Published::new();
    shared(&CONTEXT, Arc::new(GregorianSchema), DayNumber::GREGORIAN_EPOCH)
}

/// The proleptic Julian calendar, years 1 to 9999.
///
/// # Errors
/// See [`gregorian`].
pub fn julian() -> Result<&'static CalendarContext, CalendarError> {
    static CONTEXT: Published<CalendarContext> = Published::new();
    shared(&CONTEXT, Arc::new(JulianSchema), DayNumber::JULIAN_EPOCH)
}

/// The Coptic calendar, years 1 to 9999.
///
/// # Errors
/// See [`gregorian`].
pub fn coptic() -> Result<&'static CalendarContext, CalendarError> {
    static CONTEXT: Published<CalendarContext> = Published::new();
    shared(&CONTEXT, Arc::new(Coptic13Schema), DayNumber::COPTIC_EPOCH)
}

/// The Egyptian calendar, years 1 to 9999.
///
/// # Errors
/// See [`gregorian`].
pub fn egyptian() -> Result<&'static CalendarContext, CalendarError> {
    static CONTEXT: Published<CalendarContext> = Published::new();
    shared(&CONTEXT, Arc::new(Egyptian13Schema), DayNumber::EGYPTIAN_EPOCH)
}

/// The civil tabular Islamic calendar, years 1 to 9999.
///
/// # Errors
/// See [`gregorian`].
pub fn tabular_islamic() -> Result<&'static CalendarContext, CalendarError> {
    static CONTEXT: Published<CalendarContext> = Published::new();
    shared(
        &CONTEXT,
        Arc::new(TabularIslamicSchema),
        DayNumber::TABULAR_ISLAMIC_EPOCH,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_published_once() {
        let cell = Published::new();
        assert!(cell.get().is_none());
        assert_eq!(cell.get_or_try_publish(|| Err::<i32, _>("boom")), Err("boom"));
        assert!(cell.get().is_none());
        assert_eq!(cell.get_or_try_publish(|| Ok::<_, ()>(1)), Ok(&1));
        assert_eq!(cell.get_or_try_publish(|| Ok::<_, ()>(2)), Ok(&1));
        assert_eq!(cell.get(), Some(&1));
    }

    #[test]
    fn test_published_race() {
        let cell: Published<String> = Published::new();
        let addresses: Vec<usize> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let cell = &cell;
                    s.spawn(move || {
                        let value = cell
                            .get_or_try_publish(|| Ok::<_, ()>(format!("candidate {i}")))
                            .unwrap();
                        std::ptr::from_ref(value) as usize
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(addresses.windows(2).all(|w| w[0] == w[1]));
        assert!(cell.get().unwrap().starts_with("candidate "));
    }

    #[test]
    fn test_shared_contexts_are_published_once() {
        assert!(std::ptr::eq(gregorian().unwrap(), gregorian().unwrap()));
        assert!(!std::ptr::eq(gregorian().unwrap(), julian().unwrap()));
        assert!(std::thread::spawn(|| gregorian().is_ok()).join().unwrap());
    }

    #[test]
    fn test_gregorian_scenario() {
        let ctx = gregorian().unwrap();
        assert_eq!(ctx.rule(), AdditionRule::EndOfMonth);
        assert_eq!(ctx.day_number(1, 1, 1).unwrap(), DayNumber::ZERO);
        assert_eq!(ctx.date_parts(DayNumber::ZERO).unwrap(), DateParts::new(1, 1, 1));
        assert_eq!(ctx.scope().schema().count_days_in_month(2016, 2), 29);
        assert_eq!(ctx.scope().schema().count_days_in_month(2015, 2), 28);

        let d = ctx.date(2016, 5, 31).unwrap();
        assert_eq!(ctx.day_of_week(d).unwrap(), DayOfWeek::Tuesday);
        let result = ctx.plus_months(d, 1).unwrap();
        assert_eq!(result.value.deconstruct(), (2016, 6, 30));
        assert_eq!(result.roundoff, 1);

        let exact = CalendarContext::new(ctx.scope().clone(), AdditionRule::Throw)
            .unwrap()
            .with_rule(AdditionRule::Exact);
        let result = exact.plus_months(d, 1).unwrap();
        assert_eq!(result.value.deconstruct(), (2016, 7, 1));
        assert_eq!(result.roundoff, 1);

        let later = ctx.plus_days(d, 1000).unwrap();
        assert_eq!(ctx.arithmetic().count_days_between(d, later).unwrap(), 1000);
        let diff = ctx.subtract(ctx.date(2016, 6, 30).unwrap(), d).unwrap();
        assert_eq!(diff, DateDifference { years: 0, months: 1, days: 0 });
        let leap = ctx.plus_years(ctx.date(2016, 2, 29).unwrap(), 1).unwrap();
        assert_eq!(leap.value.deconstruct(), (2017, 2, 28));
    }

    #[test]
    fn test_conversions_are_validated() {
        let ctx = gregorian().unwrap();
        assert!(matches!(
            ctx.date_parts(DayNumber::new(-1).unwrap()),
            Err(CalendarError::OutOfRange { param: "day_number", .. })
        ));
        assert!(matches!(
            ctx.day_number(2015, 2, 29),
            Err(CalendarError::OutOfRange { param: "day", .. })
        ));
        let n = ctx.day_number(2016, 5, 31).unwrap();
        assert_eq!(n.get(), 736_114);
        assert_eq!(ctx.ordinal_parts(n).unwrap(), OrdinalParts::new(2016, 152));
    }

    #[test]
    fn test_decoded_dates_are_revalidated() {
        let ctx = gregorian().unwrap();
        let bits = ((2016 - 1) << 9) | (12 << 5) | 29;
        assert!(matches!(
            ctx.date_from_bits(bits),
            Err(CalendarError::OutOfRange { param: "month", .. })
        ));
        let ymd: Yemoda = serde_json::from_str(&bits.to_string()).unwrap();
        assert_eq!(ymd.deconstruct(), (2016, 13, 30));
        assert!(ctx.scope().validate_yemoda(ymd).is_err());
        assert!(ctx.day_number_of(ymd).is_err());
        assert!(ctx.day_of_week(ymd).is_err());
        assert!(ctx.plus_days(ymd, 1).is_err());
        assert!(ctx.plus_months(ymd, 1).is_err());
        assert!(ctx.plus_years(ymd, 1).is_err());
        let valid = ctx.date(2016, 5, 31).unwrap();
        assert!(ctx.subtract(ymd, valid).is_err());
        assert!(ctx.subtract(valid, ymd).is_err());
        assert_eq!(ctx.date_from_bits(valid.to_bits()).unwrap(), valid);
        // The same bits are a real date where month 13 has six days.
        let coptic = coptic().unwrap();
        let epagomenal = ((1731 - 1) << 9) | (12 << 5) | 5;
        assert_eq!(
            coptic.date_from_bits(epagomenal).unwrap().deconstruct(),
            (1731, 13, 6)
        );
        assert!(coptic.date_from_bits(bits).is_err());
    }

    #[test]
    fn test_epochs_agree() {
        let gregorian = gregorian().unwrap();
        let julian = julian().unwrap();
        assert_eq!(
            julian.day_number(1582, 10, 5).unwrap(),
            gregorian.day_number(1582, 10, 15).unwrap()
        );
        assert_eq!(
            coptic().unwrap().day_number(1, 1, 1).unwrap(),
            julian.day_number(284, 8, 29).unwrap()
        );
        assert_eq!(
            tabular_islamic().unwrap().day_number(1, 1, 1).unwrap(),
            julian.day_number(622, 7, 16).unwrap()
        );
        let egyptian_epoch =
            JulianSchema.count_days_since_epoch(-746, 2, 26) + DayNumber::JULIAN_EPOCH.get();
        assert_eq!(egyptian().unwrap().day_number(1, 1, 1).unwrap().get(), egyptian_epoch);
    }

    #[test]
    fn test_same_day_in_every_calendar() {
        // 2016-05-31 (Gregorian).
        let n = gregorian().unwrap().day_number(2016, 5, 31).unwrap();
        assert_eq!(julian().unwrap().date_parts(n).unwrap(), DateParts::new(2016, 5, 18));
        assert_eq!(coptic().unwrap().date_parts(n).unwrap(), DateParts::new(1732, 9, 23));
        assert_eq!(
            tabular_islamic().unwrap().date_parts(n).unwrap(),
            DateParts::new(1437, 8, 23)
        );
    }
}
