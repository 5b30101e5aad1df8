//! Per-device calibration files.
//!
//! Each device has one file in the calibration directory, named after the device (everything
//! after the first `.` in the file name is ignored). The first line is a composite field whose
//! last two digits are the number of channels, and each following line is a `multiplier,offset`
//! pair, in channel order:
//!
//! ```text
//! 1004
//! 0.01,0
//! 0.1,-40
//! 1,0
//! 0.001,0
//! ```
//!
//! Channels that have no line in the file are not calibrated.

use failure::Error as FailureError;
use frame::split::{split, HUNDREDS};
use frame::Calibration;
use regex::Regex;
use std::collections::HashMap;
use std::iter::FromIterator;
use std::path::Path;

/// Calibrations for every known device, by device name.
///
/// # Examples
///
/// ```
/// # extern crate frame;
/// # extern crate vital;
/// # fn main() {
/// use frame::Calibration;
/// use vital::Registry;
///
/// let mut registry = Registry::new();
/// registry.insert("032e1", vec![Calibration::new(0.01, 0.0)]);
/// assert_eq!(1, registry.calibrations(Some("032e1")).len());
/// assert!(registry.calibrations(Some("unknown")).is_empty());
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Registry {
    calibrations: HashMap<String, Vec<Calibration>>,
}

/// Errors returned when reading calibration files.
#[derive(Debug, Fail, PartialEq)]
pub enum Error {
    /// The first line of a calibration file is not an integer.
    #[fail(display = "invalid channel count for device {}: {}", device, line)]
    ChannelCount {
        /// The device named by the calibration file.
        device: String,

        /// The offending line.
        line: String,
    },
}

impl Registry {
    /// Creates a new, empty registry.
    ///
    /// # Examples
    ///
    /// ```
    /// use vital::Registry;
    /// let registry = Registry::new();
    /// assert!(registry.is_empty());
    /// ```
    pub fn new() -> Registry {
        Registry::default()
    }

    /// Reads every calibration file in a directory.
    ///
    /// Empty files are skipped. Returns an error if the directory can't be read or a file's
    /// channel count line is not an integer.
    ///
    /// # Examples
    ///
    /// ```
    /// use vital::Registry;
    /// let registry = Registry::from_path("fixtures/devices").unwrap();
    /// assert_eq!(4, registry.get("032e1").unwrap().len());
    /// ```
    pub fn from_path<P: AsRef<Path>>(directory: P) -> Result<Registry, FailureError> {
        use std::fs;

        info!(
            "loading calibration files from {}",
            directory.as_ref().display()
        );
        let mut registry = Registry::new();
        for entry in fs::read_dir(directory)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let device = match path
                .file_name()
                .and_then(|file_name| file_name.to_str())
                .and_then(|file_name| file_name.split('.').next())
                .filter(|device| !device.is_empty())
            {
                Some(device) => device.to_string(),
                None => continue,
            };
            let contents = fs::read_to_string(&path)?;
            if contents.trim().is_empty() {
                debug!("skipping empty calibration file {}", path.display());
                continue;
            }
            let calibrations = parse(&device, &contents)?;
            registry.insert(device, calibrations);
        }
        Ok(registry)
    }

    /// Sets the calibrations for a device, returning the old ones, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use vital::Registry;
    /// let mut registry = Registry::new();
    /// assert_eq!(None, registry.insert("032e1", Vec::new()));
    /// ```
    pub fn insert<S: Into<String>>(
        &mut self,
        device: S,
        calibrations: Vec<Calibration>,
    ) -> Option<Vec<Calibration>> {
        self.calibrations.insert(device.into(), calibrations)
    }

    /// Returns the calibrations for a device, or `None` if the device is unknown.
    ///
    /// # Examples
    ///
    /// ```
    /// use vital::Registry;
    /// let registry = Registry::from_path("fixtures/devices").unwrap();
    /// assert!(registry.get("032e1").is_some());
    /// assert!(registry.get("unknown").is_none());
    /// ```
    pub fn get(&self, device: &str) -> Option<&[Calibration]> {
        self.calibrations
            .get(device)
            .map(|calibrations| calibrations.as_slice())
    }

    /// Returns a new list of calibrations for a device.
    ///
    /// Unknown (or unnamed) devices get an empty list, i.e. every channel is left uncalibrated.
    ///
    /// # Examples
    ///
    /// ```
    /// use vital::Registry;
    /// let registry = Registry::from_path("fixtures/devices").unwrap();
    /// assert_eq!(4, registry.calibrations(Some("032e1")).len());
    /// assert!(registry.calibrations(None).is_empty());
    /// ```
    pub fn calibrations(&self, device: Option<&str>) -> Vec<Calibration> {
        match device.and_then(|device| self.get(device)) {
            Some(calibrations) => calibrations.to_vec(),
            None => {
                warn!(
                    "no calibration for device {}, channels will not be calibrated",
                    device.unwrap_or("<unnamed>")
                );
                Vec::new()
            }
        }
    }

    /// Returns the number of devices in this registry.
    ///
    /// # Examples
    ///
    /// ```
    /// use vital::Registry;
    /// assert_eq!(0, Registry::new().len());
    /// ```
    pub fn len(&self) -> usize {
        self.calibrations.len()
    }

    /// Returns true if there are no devices in this registry.
    ///
    /// # Examples
    ///
    /// ```
    /// use vital::Registry;
    /// assert!(Registry::new().is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.calibrations.is_empty()
    }
}

impl FromIterator<(String, Vec<Calibration>)> for Registry {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Calibration>)>>(iter: I) -> Registry {
        Registry {
            calibrations: iter.into_iter().collect(),
        }
    }
}

/// Parses the contents of one device's calibration file.
///
/// Lines that are not a `multiplier,offset` pair are logged and skipped.
///
/// # Examples
///
/// ```
/// # extern crate frame;
/// # extern crate vital;
/// # fn main() {
/// use frame::Calibration;
/// let calibrations = vital::calibration::parse("032e1", "1002\n2,1\n0.5,-3\n").unwrap();
/// assert_eq!(vec![Calibration::new(2.0, 1.0), Calibration::new(0.5, -3.0)], calibrations);
/// # }
/// ```
pub fn parse(device: &str, contents: &str) -> Result<Vec<Calibration>, Error> {
    lazy_static! {
        static ref RE: Regex =
            Regex::new(r"^\s*(?P<multiplier>[^,\s]+)\s*,\s*(?P<offset>[^,\s]+)\s*(,.*)?$").unwrap();
    }
    let mut lines = contents.lines();
    let first = lines.next().unwrap_or("");
    let channel_count = first
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|n| split(n, HUNDREDS).ok())
        .map(|(_, channel_count)| channel_count as usize)
        .ok_or_else(|| Error::ChannelCount {
            device: device.to_string(),
            line: first.to_string(),
        })?;
    let lines: Vec<&str> = lines.take(channel_count).collect();
    if lines.len() < channel_count {
        warn!(
            "calibration for device {} lists {} channels but has {} lines",
            device,
            channel_count,
            lines.len()
        );
    }
    let mut calibrations = Vec::with_capacity(lines.len());
    for line in lines {
        match RE.captures(line).and_then(|captures| {
            let multiplier = captures["multiplier"].parse::<f64>().ok()?;
            let offset = captures["offset"].parse::<f64>().ok()?;
            Some(Calibration::new(multiplier, offset))
        }) {
            Some(calibration) => calibrations.push(calibration),
            None => error!(
                "invalid calibration line for device {}, skipping: {}",
                device, line
            ),
        }
    }
    Ok(calibrations)
}
