//! Split composite fields, which pack two small integers into one.
//!
//! The firmware packs a "whole" part and a "fractional" part into a single field by multiplying
//! the whole part by a power of ten and adding the fractional part, e.g. ten minutes and two
//! variables become `1002`. Reading `|value| / scale` as a decimal number with as many digits as
//! the scale has zeros gives the two parts on either side of the decimal point.
//!
//! # Examples
//!
//! ```
//! use frame::split;
//! assert_eq!((10, 2), split::split(1002, 100).unwrap());
//! assert_eq!((24, 366), split::split(24366, 1000).unwrap());
//! ```

use Error;

/// The scale used for the minutes/variables field, the time of day, and calibration files.
pub const HUNDREDS: i64 = 100;

/// Splits the absolute value of a composite field into its whole and fractional parts.
///
/// The fractional part always has as many digits as the scale has zeros, so `500` splits into
/// `(5, 0)` and `510` splits into `(5, 10)`.
///
/// Returns an error if the scale is not a power of ten greater than one, since there would be no
/// decimal point to split on.
///
/// # Examples
///
/// ```
/// use frame::split;
/// assert_eq!((5, 0), split::split(500, 100).unwrap());
/// assert_eq!((5, 10), split::split(-510, 100).unwrap());
/// assert!(split::split(510, 7).is_err());
/// ```
pub fn split(value: i64, scale: i64) -> Result<(i64, i64), Error> {
    if !is_power_of_ten(scale) {
        return Err(Error::Scale(scale));
    }
    let magnitude = value.unsigned_abs();
    let scale = scale as u64;
    Ok(((magnitude / scale) as i64, (magnitude % scale) as i64))
}

fn is_power_of_ten(mut n: i64) -> bool {
    if n < 10 {
        return false;
    }
    while n % 10 == 0 {
        n /= 10;
    }
    n == 1
}
