//! Assemble calibrated, timestamped samples from the body of a frame.
//!
//! After the header, a frame is a run of blocks, one per time step. Each block holds one field per
//! channel. The first block is stamped with the header's datetime and every following block is
//! one interval later.
//!
//! The last block might have been cut short. Channels whose field is incomplete are left out of
//! that sample rather than padded or treated as an error.

use chrono::{Duration, NaiveDateTime};
use codec;
use header::HEADER_FIELDS;
use {Calibration, Config, Error, Header};

/// One time step of channel values.
///
/// Channels that reported a "no reading" code are `None`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Sample {
    /// The date and time of this sample.
    pub datetime: NaiveDateTime,

    /// The calibrated values, in channel order.
    pub values: Vec<Option<f64>>,
}

/// An iterator over the samples in a frame.
///
/// # Examples
///
/// ```
/// use frame::{codec, Config, Header, Samples};
/// let config = Config::default();
/// let payload: String = [24001, 0, 1501, 1, 2, 3]
///     .iter()
///     .map(|&n| codec::encode(n, 3).unwrap())
///     .collect();
/// let header = Header::parse(&payload, 3).unwrap();
/// let samples = Samples::new(&payload, &header, &[], &config).unwrap();
/// let values: Vec<_> = samples.map(|sample| sample.values[0]).collect();
/// assert_eq!(vec![Some(1.0), Some(2.0), Some(3.0)], values);
/// ```
#[derive(Debug)]
pub struct Samples<'a> {
    characters: Vec<char>,
    position: usize,
    datetime: NaiveDateTime,
    interval: Duration,
    variable_count: usize,
    calibrations: &'a [Calibration],
    config: &'a Config,
}

/// Reads every sample in a frame.
///
/// Channels beyond the end of `calibrations` are left uncalibrated.
///
/// # Examples
///
/// ```
/// use frame::{codec, Calibration, Config, Header};
/// let config = Config::default();
/// let payload: String = [24001, 0, 1002, 10, 20]
///     .iter()
///     .map(|&n| codec::encode(n, 3).unwrap())
///     .collect();
/// let header = Header::parse(&payload, 3).unwrap();
/// let calibrations = [Calibration::default(), Calibration::new(2.0, -5.0)];
/// let samples = frame::assemble(&payload, &header, &calibrations, &config).unwrap();
/// assert_eq!(1, samples.len());
/// assert_eq!(vec![Some(10.0), Some(35.0)], samples[0].values);
/// ```
pub fn assemble(
    payload: &str,
    header: &Header,
    calibrations: &[Calibration],
    config: &Config,
) -> Result<Vec<Sample>, Error> {
    Samples::new(payload, header, calibrations, config).map(|samples| samples.collect())
}

impl<'a> Samples<'a> {
    /// Creates an iterator over the samples in `payload`, as described by `header`.
    ///
    /// Returns an error if the payload is empty, the header has no variables, the configured
    /// field width is invalid, or the samples would run past the last representable datetime.
    ///
    /// # Examples
    ///
    /// ```
    /// use frame::{codec, Config, Error, Header, Samples};
    /// let config = Config::default();
    /// let payload: String = [24001, 0, 1000].iter().map(|&n| codec::encode(n, 3).unwrap()).collect();
    /// let header = Header::parse(&payload, 3).unwrap();
    /// assert_eq!(Error::NoVariables, Samples::new(&payload, &header, &[], &config).unwrap_err());
    /// ```
    pub fn new(
        payload: &str,
        header: &Header,
        calibrations: &'a [Calibration],
        config: &'a Config,
    ) -> Result<Samples<'a>, Error> {
        config.validate()?;
        if payload.is_empty() {
            return Err(Error::EmptyPayload);
        }
        if header.variable_count == 0 {
            return Err(Error::NoVariables);
        }
        let characters: Vec<char> = payload.chars().collect();
        let position = HEADER_FIELDS * config.field_width;
        let interval = header.interval()?;
        let block = header.variable_count.saturating_mul(config.field_width);
        let body = characters.len().saturating_sub(position);
        let blocks = body / block + if body % block == 0 { 0 } else { 1 };
        if blocks > 1 {
            // The last sample must be representable, and every earlier one lies between it and
            // the first.
            (blocks as i64 - 1)
                .checked_mul(header.interval_minutes)
                .and_then(Duration::try_minutes)
                .and_then(|span| header.datetime.checked_add_signed(span))
                .ok_or(Error::Interval(header.interval_minutes))?;
        }
        Ok(Samples {
            characters: characters,
            position: position,
            datetime: header.datetime,
            interval: interval,
            variable_count: header.variable_count,
            calibrations: calibrations,
            config: config,
        })
    }

    fn value(&self, channel: usize, raw: i64) -> Option<f64> {
        if self.config.is_nan(raw) {
            None
        } else {
            let calibration = self
                .calibrations
                .get(channel)
                .cloned()
                .unwrap_or_default();
            Some(calibration.apply(raw, self.config.round_digits))
        }
    }
}

impl<'a> Iterator for Samples<'a> {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        if self.position >= self.characters.len() {
            return None;
        }
        let width = self.config.field_width;
        let values = (0..self.variable_count)
            .map(|channel| (channel, self.position + channel * width))
            .take_while(|&(_, start)| start + width <= self.characters.len())
            .map(|(channel, start)| {
                let raw = codec::decode_field(&self.characters[start..start + width]);
                self.value(channel, raw)
            })
            .collect();
        let sample = Sample {
            datetime: self.datetime,
            values: values,
        };
        self.position = self.position.saturating_add(self.variable_count.saturating_mul(width));
        if let Some(datetime) = self.datetime.checked_add_signed(self.interval) {
            self.datetime = datetime;
        }
        Some(sample)
    }
}
