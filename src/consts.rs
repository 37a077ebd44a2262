/// Smallest representable day number. `i32::MIN` is reserved so that
/// `MIN_DAY_NUMBER - 1` is still a valid `i32`.
pub const MIN_DAY_NUMBER: i32 = i32::MIN + 1;
/// Largest representable day number. `i32::MAX` is reserved so that
/// `MAX_DAY_NUMBER + 1` is still a valid `i32`.
pub const MAX_DAY_NUMBER: i32 = i32::MAX - 1;

/// Earliest year any built-in schema supports.
pub const MIN_SUPPORTED_YEAR: i32 = -999_998;
/// Latest year any built-in schema supports.
pub const MAX_SUPPORTED_YEAR: i32 = 999_999;

/// Number of days in a week.
pub const DAYS_IN_WEEK: i32 = 7;

/// Month number for January (or the first month of any schema)
pub const FIRST_MONTH: i32 = 1;
/// Month number for February
pub const FEBRUARY: i32 = 2;
/// First day of a month, or of a year when counting ordinals.
pub const MIN_DAY: i32 = 1;

/// Days in the months of a common Gregorian/Julian year.
/// Index 0 is unused (months are 1-indexed).
pub const DAYS_IN_MONTH: [i32; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (adjusted in leap years)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Days in a common solar year
pub const DAYS_IN_COMMON_YEAR: i32 = 365;
/// Days in a leap solar year
pub const DAYS_IN_LEAP_YEAR: i32 = 366;

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Days in a 4-year Julian cycle
pub(crate) const DAYS_PER_4_YEAR_CYCLE: i32 = 1461;
/// Days in a Gregorian century (not starting with a multiple of 400)
pub(crate) const DAYS_PER_CENTURY: i32 = 36_524;
/// Days in a 400-year Gregorian cycle
pub(crate) const DAYS_PER_400_YEAR_CYCLE: i32 = 146_097;

/// Bit layout shared by [`Yemoda`](crate::Yemoda) and [`Yedoy`](crate::Yedoy).
///
/// `Yemoda`: `| year - 1 (23 bits, signed) | month - 1 (4 bits) | day - 1 (5 bits) |`
///
/// `Yedoy`:  `| year - 1 (23 bits, signed) | day_of_year - 1 (9 bits) |`
pub(crate) const DAY_BITS: u32 = 5;
pub(crate) const MONTH_BITS: u32 = 4;
pub(crate) const DAY_OF_YEAR_BITS: u32 = 9;
pub(crate) const YEAR_SHIFT: u32 = DAY_BITS + MONTH_BITS;

/// Largest month number a packed date may carry.
pub const MAX_PACKED_MONTH: i32 = 13;
/// Largest day-of-month a packed date may carry.
pub const MAX_PACKED_DAY: i32 = 31;
/// Largest day-of-year a packed ordinal date may carry.
pub const MAX_PACKED_DAY_OF_YEAR: i32 = DAYS_IN_LEAP_YEAR;
/// Earliest year a packed date may carry.
pub const MIN_PACKED_YEAR: i32 = -(1 << (31 - YEAR_SHIFT)) + 1;
/// Latest year a packed date may carry.
pub const MAX_PACKED_YEAR: i32 = 1 << (31 - YEAR_SHIFT);
