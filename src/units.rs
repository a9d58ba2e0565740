//! Unit and calendar conversions.
//!
//! Everything else in this crate works in meters, seconds and radians,
//! with absolute times counted in seconds since Julian date 0.
//! This module converts between those and the units ephemeris tables use.

/// One astronomical unit, in meters.
pub const AU: f64 = 149_597_870_000.0;

/// The number of seconds in a day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// The number of days in a Julian century.
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// The Julian date of 1900 January 0.5, the epoch of the polynomial
/// element tables.
pub const J1900: f64 = 2_415_020.0;

/// Converts a Julian date into seconds since Julian date 0.
///
/// # Example
/// ```
/// use keplerian_transfer::units::{seconds_from_julian_date, julian_date};
///
/// let t = seconds_from_julian_date(2_442_980.0);
/// assert_eq!(julian_date(t), 2_442_980.0);
/// ```
pub fn seconds_from_julian_date(julian_date: f64) -> f64 {
    julian_date * SECONDS_PER_DAY
}

/// Converts seconds since Julian date 0 into a Julian date.
pub fn julian_date(seconds: f64) -> f64 {
    seconds / SECONDS_PER_DAY
}

/// Converts seconds since Julian date 0 into Julian centuries since
/// [`J1900`], the time variable of the polynomial element tables.
pub fn julian_centuries(seconds: f64) -> f64 {
    (julian_date(seconds) - J1900) / DAYS_PER_JULIAN_CENTURY
}

/// Converts a number of days into seconds.
pub fn days(days: f64) -> f64 {
    days * SECONDS_PER_DAY
}

/// Converts a number of astronomical units into meters.
pub fn astronomical_units(au: f64) -> f64 {
    au * AU
}
