//! Calendrical schemas, validation scopes and date arithmetic.
//!
//! Every calendar is described by a [`schema::CalendricalSchema`]: closed-form
//! conversions between (year, month, day) and a count of days since the
//! epoch of the calendar. A [`CalendarScope`] binds a schema to an epoch on
//! the common [`DayNumber`] line and to a range of years, and is the only
//! place raw input is validated. Arithmetic and factories then work on the
//! trusted packed values [`Yemoda`] and [`Yedoy`].
//!
//! ```
//! use calendrical::{context, AdditionRule};
//!
//! let gregorian = context::gregorian()?;
//! let may31 = gregorian.date(2016, 5, 31)?;
//! let result = gregorian.arithmetic().add_months(may31, 1, AdditionRule::EndOfMonth)?;
//! assert_eq!(result.value.deconstruct(), (2016, 6, 30));
//! assert_eq!(result.roundoff, 1);
//! # Ok::<(), calendrical::CalendarError>(())
//! ```

#[macro_use]
mod logging;

mod consts;
mod day_number;
mod error;
mod factory;
mod packed;
mod parts;
mod prelude;
mod range;
mod scope;
mod segment;
mod validation;

pub mod arithmetic;
pub mod context;
pub mod schema;

pub use arithmetic::{
    AdditionResult, AdditionRule, CalendricalArithmetic, DateDifference, PlainArithmetic,
    RegularArithmetic,
};
pub use consts::*;
pub use context::{CalendarContext, Published};
pub use day_number::{DayNumber, DayOfWeek};
pub use error::CalendarError;
pub use factory::{PartsAdapter, PartsFactory};
pub use packed::{Yedoy, Yemoda};
pub use parts::{DateParts, MonthParts, OrdinalParts};
pub use range::Range;
pub use scope::{CalendarScope, ScopeShape};
pub use segment::CalendricalSegment;
pub use validation::PreValidator;
