use std::collections::BTreeSet;
use {Error, MAX_FIELD_WIDTH};

const DEFAULT_FIELD_WIDTH: usize = 3;
const DEFAULT_ROUND_DIGITS: i32 = 3;

/// Frame decoding parameters.
///
/// Loaded once, before any frame is decoded, and passed by reference from then on.
///
/// # Examples
///
/// ```
/// use frame::Config;
/// let config = Config::default();
/// assert_eq!(3, config.field_width);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// The number of characters in each field.
    pub field_width: usize,

    /// The number of decimal digits kept after calibration.
    pub round_digits: i32,

    /// Raw values that mean "no reading".
    ///
    /// These are compared against the decoded integer, before calibration.
    pub nan_codes: BTreeSet<i64>,
}

impl Config {
    /// Returns an error if this configuration cannot be used to decode frames.
    ///
    /// # Examples
    ///
    /// ```
    /// use frame::Config;
    /// let mut config = Config::default();
    /// config.field_width = 11;
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), Error> {
        validate_field_width(self.field_width)
    }

    /// Returns true if this raw value is one of the "no reading" codes.
    ///
    /// # Examples
    ///
    /// ```
    /// use frame::Config;
    /// let mut config = Config::default();
    /// config.nan_codes.insert(-131071);
    /// assert!(config.is_nan(-131071));
    /// assert!(!config.is_nan(0));
    /// ```
    pub fn is_nan(&self, raw: i64) -> bool {
        self.nan_codes.contains(&raw)
    }
}

impl Default for Config {
    fn default() -> Config {
        Config {
            field_width: DEFAULT_FIELD_WIDTH,
            round_digits: DEFAULT_ROUND_DIGITS,
            nan_codes: BTreeSet::new(),
        }
    }
}

pub(crate) fn validate_field_width(field_width: usize) -> Result<(), Error> {
    if field_width == 0 || field_width > MAX_FIELD_WIDTH {
        Err(Error::FieldWidth(field_width))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_width() {
        assert_eq!(Err(Error::FieldWidth(0)), validate_field_width(0));
        assert_eq!(Ok(()), validate_field_width(1));
        assert_eq!(Ok(()), validate_field_width(10));
        assert_eq!(Err(Error::FieldWidth(11)), validate_field_width(11));
    }
}
