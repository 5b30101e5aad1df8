//! Rebuild dates and times from the header's julian date and `HHMMSS` time fields.
//!
//! Dates are `YYDDD`: a two-digit year after 2000 and a one-based day of the year. Times are
//! `HHMMSS`, and a negative time means the hour is in the afternoon, i.e. twelve hours should be
//! added to it.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use split::{split, HUNDREDS};
use std::convert::TryFrom;
use Error;

/// Julian dates count years from here.
pub const EPOCH_YEAR: i64 = 2000;

const DAYS: i64 = 1000;
const HOURS: i64 = 10000;
const PM_OFFSET: i64 = 12;

/// Converts a `YYDDD` julian date into a calendar date.
///
/// The day of the year is counted forward from January 1st, so days past the end of the year
/// spill over into the next one.
///
/// # Examples
///
/// ```
/// # extern crate chrono;
/// # extern crate frame;
/// # fn main() {
/// use chrono::NaiveDate;
/// use frame::calendar;
/// assert_eq!(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), calendar::julian_date(24001).unwrap());
/// assert_eq!(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(), calendar::julian_date(24366).unwrap());
/// # }
/// ```
pub fn julian_date(date: i64) -> Result<NaiveDate, Error> {
    let (year, day_of_year) = split(date, DAYS)?;
    let year = year + EPOCH_YEAR;
    i32::try_from(year)
        .ok()
        .and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1))
        .and_then(|january_first| {
            Duration::try_days(day_of_year - 1)
                .and_then(|days| january_first.checked_add_signed(days))
        })
        .ok_or(Error::Date {
            year: year,
            day_of_year: day_of_year,
        })
}

/// Converts a julian date and an `HHMMSS` time into a datetime.
///
/// If the time is negative, twelve hours are added to its hour. The offset is additive, so a
/// negative time with an hour of twelve or more is an error.
///
/// # Examples
///
/// ```
/// # extern crate chrono;
/// # extern crate frame;
/// # fn main() {
/// use chrono::Timelike;
/// use frame::calendar;
/// let datetime = calendar::datetime(24001, -13005).unwrap();
/// assert_eq!((13, 30, 5), (datetime.hour(), datetime.minute(), datetime.second()));
/// # }
/// ```
pub fn datetime(date: i64, time: i64) -> Result<NaiveDateTime, Error> {
    let date = julian_date(date)?;
    let (mut hour, minutes_and_seconds) = split(time, HOURS)?;
    if time < 0 {
        hour += PM_OFFSET;
    }
    let (minute, second) = split(minutes_and_seconds, HUNDREDS)?;
    let time = match (
        u32::try_from(hour),
        u32::try_from(minute),
        u32::try_from(second),
    ) {
        (Ok(h), Ok(m), Ok(s)) => NaiveTime::from_hms_opt(h, m, s),
        _ => None,
    };
    time.map(|time| date.and_time(time)).ok_or(Error::Time {
        hour: hour,
        minute: minute,
        second: second,
    })
}
