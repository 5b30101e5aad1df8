//! Per-channel linear calibration.

/// Turns a raw channel reading into a physical measurement: `raw * multiplier + offset`.
///
/// # Examples
///
/// ```
/// use frame::Calibration;
/// let calibration = Calibration::new(2.0, -5.0);
/// assert_eq!(35.0, calibration.apply(20, 3));
/// assert_eq!(20.0, Calibration::default().apply(20, 3));
/// ```
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct Calibration {
    /// The slope.
    pub multiplier: f64,

    /// The intercept.
    pub offset: f64,
}

impl Calibration {
    /// Creates a new calibration.
    ///
    /// # Examples
    ///
    /// ```
    /// use frame::Calibration;
    /// let calibration = Calibration::new(0.1, 273.15);
    /// ```
    pub fn new(multiplier: f64, offset: f64) -> Calibration {
        Calibration {
            multiplier: multiplier,
            offset: offset,
        }
    }

    /// Applies this calibration to a raw value and rounds to `round_digits` decimal digits.
    ///
    /// Ties round away from zero. The tie is judged after scaling by `10^round_digits` in binary
    /// floating point, so a value like `4.35` (stored as `4.3499999...`) scales to exactly `43.5`
    /// and rounds up to `4.4`.
    ///
    /// # Examples
    ///
    /// ```
    /// use frame::Calibration;
    /// assert_eq!(0.3, Calibration::new(0.1, 0.0).apply(3, 3));
    /// assert_eq!(1.23, Calibration::new(0.01, 0.0).apply(123, 2));
    /// ```
    pub fn apply(&self, raw: i64, round_digits: i32) -> f64 {
        round(raw as f64 * self.multiplier + self.offset, round_digits)
    }
}

impl Default for Calibration {
    fn default() -> Calibration {
        Calibration::new(1.0, 0.0)
    }
}

/// Rounds half away from zero, on the scaled binary value rather than the decimal one.
///
/// Values that are already whole once scaled come back unchanged.
fn round(value: f64, digits: i32) -> f64 {
    // Past 2^52 every f64 is a whole number, so there is nothing left to round.
    const WHOLE: f64 = 4_503_599_627_370_496.0;
    let factor = 10f64.powi(digits);
    let scaled = value * factor;
    if factor == 0.0 {
        0.0
    } else if !(scaled.abs() < WHOLE) {
        value
    } else {
        scaled.round() / factor
    }
}
