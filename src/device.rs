//! Devices, as listed by the upstream message service.

use failure::Error;
use serde_json;
use std::path::Path;

/// Upstream device names carry this prefix, but calibration files don't.
const NAME_PREFIX: &str = "F-0x";

/// A remote device.
///
/// Only the type, id, and name are required; the rest is informational.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct Device {
    pub device_type: i64,
    pub device_id: i64,
    pub device_name: String,
    pub comments: Option<String>,
    pub hive_creation_time: Option<String>,
    #[serde(rename = "hiveFirstheardTime")]
    pub hive_first_heard_time: Option<String>,
    #[serde(rename = "hiveLastheardTime")]
    pub hive_last_heard_time: Option<String>,
    pub firmware_version: Option<String>,
    pub hardware_version: Option<String>,
    pub status: Option<i64>,
    pub two_way_enabled: Option<bool>,
    pub data_encryption_enabled: Option<bool>,
}

/// A list of devices that can be searched by id.
///
/// # Examples
///
/// ```
/// use vital::Directory;
/// let directory = Directory::from_path("fixtures/devices.json").unwrap();
/// let device = directory.find(11746).unwrap();
/// assert_eq!("032e1", device.name());
/// assert!(directory.find(1).is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Directory {
    devices: Vec<Device>,
}

/// The service returns a bare object when there's only one device.
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing {
    Many(Vec<Device>),
    One(Device),
}

impl Device {
    /// Returns this device's name, without the upstream `F-0x` prefix.
    ///
    /// This is the name used for the device's calibration file.
    ///
    /// # Examples
    ///
    /// ```
    /// use vital::Directory;
    /// let directory = Directory::from_path("fixtures/devices.json").unwrap();
    /// assert_eq!("F-0x032e1", directory.find(11746).unwrap().device_name);
    /// assert_eq!("032e1", directory.find(11746).unwrap().name());
    /// assert_eq!("other", directory.find(11747).unwrap().name());
    /// ```
    pub fn name(&self) -> &str {
        if self.device_name.starts_with(NAME_PREFIX) {
            &self.device_name[NAME_PREFIX.len()..]
        } else {
            &self.device_name
        }
    }
}

impl Directory {
    /// Reads a directory from a JSON file.
    ///
    /// # Examples
    ///
    /// ```
    /// use vital::Directory;
    /// let directory = Directory::from_path("fixtures/devices.json").unwrap();
    /// assert_eq!(2, directory.devices().len());
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Directory, Error> {
        use std::fs;
        let string = fs::read_to_string(path)?;
        Directory::from_json(&string)
    }

    /// Parses a directory from JSON, either an array of devices or a single device.
    ///
    /// # Examples
    ///
    /// ```
    /// use vital::Directory;
    /// let directory = Directory::from_json(
    ///     r#"{"deviceType": 1, "deviceId": 42, "deviceName": "F-0xabc"}"#,
    /// ).unwrap();
    /// assert_eq!("abc", directory.find(42).unwrap().name());
    /// ```
    pub fn from_json(json: &str) -> Result<Directory, Error> {
        let devices = match serde_json::from_str::<Listing>(json)? {
            Listing::Many(devices) => devices,
            Listing::One(device) => vec![device],
        };
        Ok(Directory::from(devices))
    }

    /// Returns the device with the given id, or `None` if there isn't one.
    ///
    /// # Examples
    ///
    /// ```
    /// use vital::Directory;
    /// let directory = Directory::default();
    /// assert!(directory.find(11746).is_none());
    /// ```
    pub fn find(&self, device_id: i64) -> Option<&Device> {
        self.devices
            .iter()
            .find(|device| device.device_id == device_id)
    }

    /// Returns a slice of all devices.
    ///
    /// # Examples
    ///
    /// ```
    /// use vital::Directory;
    /// assert!(Directory::default().devices().is_empty());
    /// ```
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }
}

impl From<Vec<Device>> for Directory {
    fn from(devices: Vec<Device>) -> Directory {
        Directory { devices: devices }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures() {
        let directory = Directory::from_path("fixtures/devices.json").unwrap();
        let device = directory.find(11746).unwrap();
        assert_eq!(1, device.device_type);
        assert_eq!(Some("1.0.2".to_string()), device.firmware_version);
        assert_eq!(Some(true), device.two_way_enabled);
        let device = directory.find(11747).unwrap();
        assert_eq!(None, device.firmware_version);
    }

    #[test]
    fn missing_required_field() {
        assert!(Directory::from_json(r#"[{"deviceType": 1, "deviceName": "F-0xabc"}]"#).is_err());
    }

    #[test]
    fn not_a_listing() {
        assert!(Directory::from_json("42").is_err());
    }

    #[test]
    fn empty() {
        assert!(Directory::from_json("[]").unwrap().devices().is_empty());
    }

    #[test]
    fn prefix_only_at_start() {
        let directory =
            Directory::from_json(r#"{"deviceType": 1, "deviceId": 1, "deviceName": "abcF-0x"}"#)
                .unwrap();
        assert_eq!("abcF-0x", directory.find(1).unwrap().name());
    }
}
