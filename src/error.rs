/// Error type for every fallible operation of the engine.
///
/// Validation never clamps or substitutes a value: an out-of-range input
/// or an unrepresentable result is always reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// A year, month, day, day-of-year or day number lies outside the
    /// active scope, segment or schema.
    #[error("The value of `{param}` was out of range: {value}")]
    OutOfRange {
        /// Name of the offending parameter.
        param: &'static str,
        /// The rejected value.
        value: i64,
    },

    /// The result of a computation would leave the supported range.
    #[error("Arithmetic overflow in {operation}")]
    Overflow { operation: &'static str },

    /// A month or year addition would need a roundoff and the caller
    /// selected [`AdditionRule::Throw`](crate::AdditionRule::Throw).
    #[error("Ambiguous result: the target day overflows its month by {roundoff} day(s)")]
    Ambiguous { roundoff: i32 },

    /// A malformed argument: inverted range, inconsistent constructor
    /// arguments or corrupt packed data.
    #[error("Invalid argument `{param}`: {reason}")]
    Argument {
        param: &'static str,
        reason: &'static str,
    },
}

impl CalendarError {
    pub(crate) fn out_of_range(param: &'static str, value: impl Into<i64>) -> Self {
        Self::OutOfRange {
            param,
            value: value.into(),
        }
    }

    pub(crate) const fn overflow(operation: &'static str) -> Self {
        Self::Overflow { operation }
    }

    pub(crate) const fn argument(param: &'static str, reason: &'static str) -> Self {
        Self::Argument { param, reason }
    }

    /// Returns the parameter name attached to an `OutOfRange` or
    /// `Argument` error.
    pub const fn param_name(&self) -> Option<&'static str> {
        match self {
            Self::OutOfRange { param, .. } | Self::Argument { param, .. } => Some(param),
            Self::Overflow { .. } | Self::Ambiguous { .. } => None,
        }
    }
}
