//! Configuration for decoding.
//!
//! Configurations are usually specified in TOML files:
//!
//! ```toml
//! devices = "devices"
//!
//! [frame]
//! field_width = 3
//! round_digits = 3
//! nan_codes = [-131071]
//! ```

use failure::Error;
use frame;
use std::path::{Path, PathBuf};
use Registry;

/// Decoding configuration.
///
/// # Examples
///
/// ```
/// use vital::Config;
/// let config = Config::from_path("fixtures/config.toml").unwrap();
/// assert_eq!(3, config.frame.field_width);
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Config {
    /// The directory that holds one calibration file per device.
    ///
    /// When read with `Config::from_path`, a relative directory is resolved against the directory
    /// of the configuration file.
    pub devices: PathBuf,

    /// Frame decoding parameters.
    #[serde(default)]
    pub frame: frame::Config,
}

impl Config {
    /// Reads configuration from a toml file.
    ///
    /// Returns an error if the frame parameters cannot be used for decoding.
    ///
    /// # Examples
    ///
    /// ```
    /// let config = vital::Config::from_path("fixtures/config.toml").unwrap();
    /// assert!(config.frame.is_nan(-131071));
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Config, Error> {
        use std::fs::File;
        use std::io::Read;
        use toml;

        let mut file = File::open(path.as_ref())?;
        let mut string = String::new();
        file.read_to_string(&mut string)?;
        let mut config: Config = toml::from_str(&string)?;
        config.frame.validate()?;
        if config.devices.is_relative() {
            if let Some(parent) = path.as_ref().parent() {
                config.devices = parent.join(&config.devices);
            }
        }
        Ok(config)
    }

    /// Loads the calibration registry from this configuration's device directory.
    ///
    /// # Examples
    ///
    /// ```
    /// let config = vital::Config::from_path("fixtures/config.toml").unwrap();
    /// let registry = config.registry().unwrap();
    /// assert!(registry.get("032e1").is_some());
    /// ```
    pub fn registry(&self) -> Result<Registry, Error> {
        Registry::from_path(&self.devices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml;

    #[test]
    fn fixtures() {
        let config = Config::from_path("fixtures/config.toml").unwrap();
        assert_eq!(Path::new("fixtures/devices"), config.devices);
        assert_eq!(3, config.frame.round_digits);
        assert_eq!(1, config.frame.nan_codes.len());
    }

    #[test]
    fn default_frame() {
        let config: Config = toml::from_str("devices = \"/var/lib/vital/devices\"").unwrap();
        assert_eq!(frame::Config::default(), config.frame);
    }

    #[test]
    fn partial_frame() {
        let config: Config = toml::from_str("devices = \"devices\"\n[frame]\nnan_codes = [9999]\n")
            .unwrap();
        assert_eq!(3, config.frame.field_width);
        assert!(config.frame.is_nan(9999));
    }

    #[test]
    fn missing_devices() {
        assert!(toml::from_str::<Config>("[frame]\nfield_width = 3\n").is_err());
    }
}
