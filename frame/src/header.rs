//! The three fields at the start of every frame.

use calendar;
use chrono::{Duration, NaiveDateTime};
use codec;
use config::validate_field_width;
use split::{split, HUNDREDS};
use Error;

/// The number of fields in a frame header: date, time, and minutes/variables.
pub const HEADER_FIELDS: usize = 3;

/// A frame header.
///
/// # Examples
///
/// ```
/// use frame::{codec, Header};
/// let payload: String = [24001, 0, 1504]
///     .iter()
///     .map(|&n| codec::encode(n, 3).unwrap())
///     .collect();
/// let header = Header::parse(&payload, 3).unwrap();
/// assert_eq!("2024-01-01 00:00:00", header.datetime.to_string());
/// assert_eq!(15, header.interval_minutes);
/// assert_eq!(4, header.variable_count);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Header {
    /// The date and time of the first sample.
    pub datetime: NaiveDateTime,

    /// The number of minutes between samples.
    pub interval_minutes: i64,

    /// The number of channels in each sample.
    pub variable_count: usize,
}

impl Header {
    /// Parses the header from the start of a frame.
    ///
    /// A header with zero variables is returned as-is, even though no samples can be read with
    /// it.
    ///
    /// # Examples
    ///
    /// ```
    /// use frame::{Error, Header};
    /// assert_eq!(
    ///     Error::TruncatedFrame { required: 9, actual: 3 },
    ///     Header::parse("@@@", 3).unwrap_err()
    /// );
    /// ```
    pub fn parse(payload: &str, field_width: usize) -> Result<Header, Error> {
        let characters: Vec<char> = payload.chars().collect();
        Header::from_characters(&characters, field_width)
    }

    pub(crate) fn from_characters(characters: &[char], field_width: usize) -> Result<Header, Error> {
        validate_field_width(field_width)?;
        let required = HEADER_FIELDS * field_width;
        if characters.len() < required {
            return Err(Error::TruncatedFrame {
                required: required,
                actual: characters.len(),
            });
        }
        let field =
            |i: usize| codec::decode_field(&characters[i * field_width..(i + 1) * field_width]);
        let datetime = calendar::datetime(field(0), field(1))?;
        let (interval_minutes, variable_count) = split(field(2), HUNDREDS)?;
        Ok(Header {
            datetime: datetime,
            interval_minutes: interval_minutes,
            variable_count: variable_count as usize,
        })
    }

    /// Returns the time between samples.
    ///
    /// Returns an error if the interval is too long to be represented.
    ///
    /// # Examples
    ///
    /// ```
    /// use frame::{codec, Header};
    /// let payload: String = [24001, 0, 1002].iter().map(|&n| codec::encode(n, 3).unwrap()).collect();
    /// let header = Header::parse(&payload, 3).unwrap();
    /// assert_eq!(600, header.interval().unwrap().num_seconds());
    /// ```
    pub fn interval(&self) -> Result<Duration, Error> {
        Duration::try_minutes(self.interval_minutes).ok_or(Error::Interval(self.interval_minutes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn payload(fields: &[i64]) -> String {
        fields
            .iter()
            .map(|&n| codec::encode(n, 3).unwrap())
            .collect()
    }

    #[test]
    fn parse() {
        let header = Header::parse(&payload(&[24366, -12345, 3004]), 3).unwrap();
        assert_eq!(
            NaiveDate::from_ymd_opt(2024, 12, 31)
                .unwrap()
                .and_hms_opt(13, 23, 45)
                .unwrap(),
            header.datetime
        );
        assert_eq!(30, header.interval_minutes);
        assert_eq!(4, header.variable_count);
    }

    #[test]
    fn trailing_fields_are_ignored() {
        let header = Header::parse(&payload(&[24001, 0, 1002, 10, 20]), 3).unwrap();
        assert_eq!(2, header.variable_count);
    }

    #[test]
    fn negative_variables_field() {
        let header = Header::parse(&payload(&[24001, 0, -1002]), 3).unwrap();
        assert_eq!(10, header.interval_minutes);
        assert_eq!(2, header.variable_count);
    }

    #[test]
    fn zero_variables() {
        let header = Header::parse(&payload(&[24001, 0, 1000]), 3).unwrap();
        assert_eq!(10, header.interval_minutes);
        assert_eq!(0, header.variable_count);
    }

    #[test]
    fn truncated() {
        assert_eq!(
            Error::TruncatedFrame {
                required: 9,
                actual: 8,
            },
            Header::parse(&payload(&[24001, 0, 1002])[..8], 3).unwrap_err()
        );
        assert_eq!(
            Error::TruncatedFrame {
                required: 9,
                actual: 0,
            },
            Header::parse("", 3).unwrap_err()
        );
    }

    #[test]
    fn invalid_time() {
        assert_eq!(
            Error::Time {
                hour: 25,
                minute: 0,
                second: 0,
            },
            Header::parse(&payload(&[24001, -130000, 1002]), 3).unwrap_err()
        );
    }

    #[test]
    fn field_width() {
        assert_eq!(
            Error::FieldWidth(0),
            Header::parse("@@@@@@@@@", 0).unwrap_err()
        );
        let header = Header::parse("@@@@@@@@@@@@", 4).unwrap();
        assert_eq!(0, header.variable_count);
    }

    #[test]
    fn interval_out_of_range() {
        let frame: String = [24001, 0, 5_000_000_000_000_000 * 100 + 1]
            .iter()
            .map(|&n| codec::encode(n, 10).unwrap())
            .collect();
        let header = Header::parse(&frame, 10).unwrap();
        assert_eq!(
            Error::Interval(5_000_000_000_000_000),
            header.interval().unwrap_err()
        );
    }
}
