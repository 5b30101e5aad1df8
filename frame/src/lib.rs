//! Decode the pseudo-character frames transmitted by remote environmental sensors.
//!
//! # Background
//!
//! The sensors talk over a low-bandwidth satellite link, so every reading is squeezed into a few
//! printable characters. Each character carries six bits, and a fixed number of characters (three
//! by default) make up one *field*. A frame starts with three header fields (a julian date, an
//! `HHMMSS` time, and the sampling interval packed together with the channel count) followed by
//! one field per channel per time step.
//!
//! # Examples
//!
//! Build a frame with `codec::encode`, then parse its header and walk its samples:
//!
//! ```
//! use frame::{codec, Calibration, Config, Header};
//!
//! let config = Config::default();
//! let payload: String = [24001, 0, 1002, 10, 20]
//!     .iter()
//!     .map(|&n| codec::encode(n, config.field_width).unwrap())
//!     .collect();
//! let header = Header::parse(&payload, config.field_width).unwrap();
//! assert_eq!(10, header.interval_minutes);
//! assert_eq!(2, header.variable_count);
//!
//! let calibrations = vec![Calibration::default(), Calibration::new(2.0, -5.0)];
//! let samples = frame::assemble(&payload, &header, &calibrations, &config).unwrap();
//! assert_eq!(vec![Some(10.0), Some(35.0)], samples[0].values);
//! ```

#![deny(missing_docs, missing_debug_implementations, unsafe_code)]

extern crate chrono;
#[macro_use]
extern crate failure;
extern crate serde;
#[macro_use]
extern crate serde_derive;

pub mod calendar;
pub mod calibration;
pub mod codec;
mod config;
pub mod header;
pub mod sample;
pub mod split;

pub use calibration::Calibration;
pub use config::Config;
pub use header::Header;
pub use sample::{assemble, Sample, Samples};

/// The widest field, in characters, whose bits still fit into an `i64`.
pub const MAX_FIELD_WIDTH: usize = 10;

/// Errors returned while decoding a frame.
#[derive(Debug, Fail, PartialEq)]
pub enum Error {
    /// The frame is too short to hold its header.
    #[fail(
        display = "the frame is {} characters long but at least {} are required",
        actual,
        required
    )]
    TruncatedFrame {
        /// The minimum number of characters.
        required: usize,

        /// The number of characters in the frame.
        actual: usize,
    },

    /// Composite fields can only be split with a power of ten.
    #[fail(display = "cannot split a composite field with a scale of {}", _0)]
    Scale(i64),

    /// The julian date does not name a real day.
    #[fail(display = "invalid julian date: year {}, day {}", year, day_of_year)]
    Date {
        #[allow(missing_docs)]
        year: i64,
        #[allow(missing_docs)]
        day_of_year: i64,
    },

    /// The time of day is out of range.
    #[fail(display = "invalid time: {}:{}:{}", hour, minute, second)]
    Time {
        #[allow(missing_docs)]
        hour: i64,
        #[allow(missing_docs)]
        minute: i64,
        #[allow(missing_docs)]
        second: i64,
    },

    /// Stepping through the samples at this interval runs past the datetimes that can be
    /// represented.
    #[fail(display = "cannot step through samples {} minutes apart", _0)]
    Interval(i64),

    /// The frame header advertises zero channels, so there is nothing to assemble.
    #[fail(display = "the frame header has no variables")]
    NoVariables,

    /// There is no payload to assemble samples from.
    #[fail(display = "the frame payload is empty")]
    EmptyPayload,

    /// The configured field width cannot be decoded.
    #[fail(display = "the field width must be between 1 and 10 characters, not {}", _0)]
    FieldWidth(usize),
}
