//! Packets, as delivered by the upstream message service.
//!
//! The service returns a JSON array of packet objects. Each object names the device that sent it
//! and carries the frame as base64 text:
//!
//! ```json
//! {
//!     "packetId": 51432891,
//!     "deviceType": 1,
//!     "deviceId": 11746,
//!     "status": 0,
//!     "data": "RXdBT3R1QFhE...",
//!     "hiveRxTime": "2024-04-23T21:31:24"
//! }
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use failure::Error;
use serde_json::{self, Value};
use std::path::Path;

/// A raw packet.
///
/// # Examples
///
/// ```
/// let packets = vital::packet::from_path("fixtures/messages.json").unwrap();
/// let packet = &packets[0];
/// assert_eq!(11746, packet.device_id);
/// assert!(packet.frame().unwrap().is_some());
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Packet {
    /// The upstream id of this packet.
    #[serde(rename = "packetId")]
    pub id: i64,

    /// The type of the device that sent this packet.
    pub device_type: i64,

    /// The id of the device that sent this packet.
    pub device_id: i64,

    /// The upstream delivery status.
    pub status: i64,

    /// The base64-encoded frame, if the packet has one.
    pub data: Option<String>,

    /// When the upstream service received this packet, as reported by the service.
    #[serde(rename = "hiveRxTime")]
    pub received_at: Option<String>,
}

impl Packet {
    /// Decodes this packet's data into frame text.
    ///
    /// Returns `None` if the packet has no data, and an error if the data is not base64-encoded
    /// UTF-8.
    ///
    /// # Examples
    ///
    /// ```
    /// let packets = vital::packet::from_path("fixtures/messages.json").unwrap();
    /// assert_eq!(None, packets[1].frame().unwrap());
    /// ```
    pub fn frame(&self) -> Result<Option<String>, Error> {
        match self.data {
            Some(ref data) => {
                let bytes = STANDARD.decode(data)?;
                Ok(Some(String::from_utf8(bytes)?))
            }
            None => Ok(None),
        }
    }
}

/// Parses a JSON array of packets.
///
/// Array entries that are not objects are ignored, but objects that are missing a required field
/// are an error.
///
/// # Examples
///
/// ```
/// let packets = vital::packet::from_json(r#"[
///     {"packetId": 1, "deviceType": 1, "deviceId": 42, "status": 0, "data": null},
///     "not a packet"
/// ]"#).unwrap();
/// assert_eq!(1, packets.len());
/// ```
pub fn from_json(json: &str) -> Result<Vec<Packet>, Error> {
    let values: Vec<Value> = serde_json::from_str(json)?;
    values
        .into_iter()
        .filter(|value| value.is_object())
        .map(|value| serde_json::from_value(value).map_err(Error::from))
        .collect()
}

/// Reads a JSON array of packets from a file.
///
/// # Examples
///
/// ```
/// let packets = vital::packet::from_path("fixtures/messages.json").unwrap();
/// assert_eq!(5, packets.len());
/// ```
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Packet>, Error> {
    use std::fs;
    let string = fs::read_to_string(path)?;
    from_json(&string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packet(data: Option<&str>) -> Packet {
        Packet {
            id: 1,
            device_type: 1,
            device_id: 42,
            status: 0,
            data: data.map(|s| s.to_string()),
            received_at: None,
        }
    }

    #[test]
    fn fixtures() {
        let packets = from_path("fixtures/messages.json").unwrap();
        assert_eq!(51432891, packets[0].id);
        assert_eq!(
            Some("2024-04-23T21:31:24".to_string()),
            packets[0].received_at
        );
        assert_eq!(None, packets[1].data);
    }

    #[test]
    fn frame() {
        assert_eq!(
            Some("EwA@@@@Oj@@J@@T".to_string()),
            packet(Some("RXdBQEBAQE9qQEBKQEBU")).frame().unwrap()
        );
        assert_eq!(None, packet(None).frame().unwrap());
    }

    #[test]
    fn invalid_base64() {
        assert!(packet(Some("not base64!")).frame().is_err());
    }

    #[test]
    fn invalid_utf8() {
        assert!(packet(Some("/w==")).frame().is_err());
    }

    #[test]
    fn missing_field() {
        assert!(from_json(r#"[{"packetId": 1, "deviceType": 1, "status": 0}]"#).is_err());
    }

    #[test]
    fn missing_data_is_none() {
        let packets =
            from_json(r#"[{"packetId": 1, "deviceType": 1, "deviceId": 2, "status": 0}]"#).unwrap();
        assert_eq!(None, packets[0].data);
    }

    #[test]
    fn not_an_array() {
        assert!(from_json(r#"{"packetId": 1}"#).is_err());
    }
}
