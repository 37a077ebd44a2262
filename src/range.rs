use std::cmp::Ordering;
use std::fmt;

use crate::CalendarError;

/// An inclusive range `[min, max]` over an ordered type.
/// The minimum is always less than or equal to the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range<T> {
    min: T,
    max: T,
}

impl<T: Ord + Copy> Range<T> {
    /// Creates a new range with validation.
    ///
    /// # Errors
    /// Returns `CalendarError::Argument` if `min > max`.
    pub fn new(min: T, max: T) -> Result<Self, CalendarError> {
        if min > max {
            return Err(CalendarError::argument(
                "max",
                "the maximum of a range must not be less than its minimum",
            ));
        }
        Ok(Self { min, max })
    }

    /// Creates the range containing exactly one value.
    pub fn singleton(value: T) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Builds a range whose endpoints are already known to be ordered.
    pub(crate) fn new_unchecked(min: T, max: T) -> Self {
        debug_assert!(min <= max);
        Self { min, max }
    }

    /// Returns the lower endpoint
    pub fn start(&self) -> T {
        self.min
    }

    /// Returns the upper endpoint
    pub fn end(&self) -> T {
        self.max
    }

    /// Returns both endpoints as a tuple
    pub fn endpoints(&self) -> (T, T) {
        (self.min, self.max)
    }

    /// Checks if the range contains a given value
    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    /// Checks if this range overlaps with another range
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min <= other.max && other.min <= self.max
    }

    /// Checks if this range is completely contained within another range
    pub fn is_subset_of(&self, other: &Self) -> bool {
        other.min <= self.min && self.max <= other.max
    }

    /// Returns the common part of two ranges, if any.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        (min <= max).then_some(Self { min, max })
    }
}

impl Range<i32> {
    /// Number of integers in the range.
    pub fn count(&self) -> i64 {
        i64::from(self.max) - i64::from(self.min) + 1
    }
}

impl<T: fmt::Display> fmt::Display for Range<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

impl<T: Ord> PartialOrd for Range<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord> Ord for Range<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare lower endpoints first, then upper endpoints
        match self.min.cmp(&other.min) {
            Ordering::Equal => self.max.cmp(&other.max),
            ord => ord,
        }
    }
}
