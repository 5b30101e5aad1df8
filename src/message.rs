//! Decoded messages, which are built from one packet each.
//!
//! # Examples
//!
//! Decode one packet at a time if you want to handle errors yourself:
//!
//! ```
//! use vital::{packet, Config, Directory, Message};
//!
//! let config = Config::from_path("fixtures/config.toml").unwrap();
//! let registry = config.registry().unwrap();
//! let directory = Directory::from_path("fixtures/devices.json").unwrap();
//! let packets = packet::from_path("fixtures/messages.json").unwrap();
//!
//! let packet = &packets[0];
//! let device_name = directory.find(packet.device_id).map(|device| device.name());
//! let mut message = Message::from_packet(packet, device_name).unwrap();
//! message.decode(&registry, &config.frame).unwrap();
//! assert_eq!(2, message.samples.len());
//! ```
//!
//! Or use `decode_all`, which skips (and logs) anything that can't be decoded.

use chrono::NaiveDateTime;
use failure::Error as FailureError;
use frame::{self, Calibration, Header, Sample};
use {Directory, Packet, Registry};

/// A decoded message.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Message {
    /// The id of the packet this message came from.
    pub id: i64,

    /// The type of the sending device.
    pub device_type: i64,

    /// The id of the sending device.
    pub device_id: i64,

    /// The name of the sending device, if it is in the device directory.
    pub device_name: Option<String>,

    /// The upstream delivery status.
    pub status: i64,

    /// When the upstream service received the packet.
    pub received_at: Option<String>,

    /// The frame text.
    pub data: String,

    /// The frame header.
    ///
    /// Filled in by `decode` unless it was already set.
    pub header: Option<Header>,

    /// The channel calibrations.
    ///
    /// Filled in from the registry by `decode` if empty.
    pub calibrations: Vec<Calibration>,

    /// The decoded samples.
    pub samples: Vec<Sample>,
}

/// Errors associated with creating messages.
#[derive(Debug, Fail, PartialEq)]
pub enum Error {
    /// The packet doesn't carry a frame.
    #[fail(display = "packet {} has no data", _0)]
    NoData(i64),
}

impl Message {
    /// Creates an undecoded message from a packet.
    ///
    /// Returns an error if the packet has no data or its data can't be decoded into text.
    ///
    /// # Examples
    ///
    /// ```
    /// use vital::{packet, Message};
    /// let packets = packet::from_path("fixtures/messages.json").unwrap();
    /// let message = Message::from_packet(&packets[0], Some("032e1")).unwrap();
    /// assert!(message.samples.is_empty());
    /// assert!(Message::from_packet(&packets[1], None).is_err());
    /// ```
    pub fn from_packet(packet: &Packet, device_name: Option<&str>) -> Result<Message, FailureError> {
        let data = packet.frame()?.ok_or(Error::NoData(packet.id))?;
        Ok(Message {
            id: packet.id,
            device_type: packet.device_type,
            device_id: packet.device_id,
            device_name: device_name.map(|name| name.to_string()),
            status: packet.status,
            received_at: packet.received_at.clone(),
            data: data,
            header: None,
            calibrations: Vec::new(),
            samples: Vec::new(),
        })
    }

    /// Decodes this message's frame.
    ///
    /// The header is parsed from the frame unless one with at least one variable is already set,
    /// and the calibrations are looked up by device name unless some are already set. Decoding is
    /// all or nothing: on error, the message is left as it was.
    ///
    /// # Examples
    ///
    /// ```
    /// # extern crate frame;
    /// # extern crate vital;
    /// # fn main() {
    /// use frame::{codec, Config};
    /// use vital::{Message, Registry};
    ///
    /// let data: String = [24001, 0, 1002, 10, 20]
    ///     .iter()
    ///     .map(|&n| codec::encode(n, 3).unwrap())
    ///     .collect();
    /// let mut message = Message::from(data);
    /// message.decode(&Registry::new(), &Config::default()).unwrap();
    /// assert_eq!(vec![Some(10.0), Some(20.0)], message.samples[0].values);
    /// # }
    /// ```
    pub fn decode(&mut self, registry: &Registry, config: &frame::Config) -> Result<(), frame::Error> {
        let header = match self.header {
            Some(header) if header.variable_count > 0 => header,
            _ => Header::parse(&self.data, config.field_width)?,
        };
        let calibrations = if self.calibrations.is_empty() {
            registry.calibrations(self.device_name.as_ref().map(|name| name.as_str()))
        } else {
            self.calibrations.clone()
        };
        let samples = frame::assemble(&self.data, &header, &calibrations, config)?;
        debug!(
            "decoded {} samples from packet {} (device {})",
            samples.len(),
            self.id,
            self.device_id
        );
        self.header = Some(header);
        self.calibrations = calibrations;
        self.samples = samples;
        Ok(())
    }

    /// Returns the datetime of the first sample, if the header is known.
    ///
    /// # Examples
    ///
    /// ```
    /// use vital::Message;
    /// let message = Message::from(String::new());
    /// assert_eq!(None, message.datetime());
    /// ```
    pub fn datetime(&self) -> Option<NaiveDateTime> {
        self.header.map(|header| header.datetime)
    }

    /// Returns the minutes between samples, if the header is known.
    ///
    /// # Examples
    ///
    /// ```
    /// use vital::Message;
    /// let message = Message::from(String::new());
    /// assert_eq!(None, message.interval_minutes());
    /// ```
    pub fn interval_minutes(&self) -> Option<i64> {
        self.header.map(|header| header.interval_minutes)
    }

    /// Returns the number of channels, if the header is known.
    ///
    /// # Examples
    ///
    /// ```
    /// use vital::Message;
    /// let message = Message::from(String::new());
    /// assert_eq!(None, message.variable_count());
    /// ```
    pub fn variable_count(&self) -> Option<usize> {
        self.header.map(|header| header.variable_count)
    }
}

impl From<String> for Message {
    fn from(data: String) -> Message {
        Message {
            id: 0,
            device_type: 0,
            device_id: 0,
            device_name: None,
            status: 0,
            received_at: None,
            data: data,
            header: None,
            calibrations: Vec::new(),
            samples: Vec::new(),
        }
    }
}

/// Decodes every packet that carries data.
///
/// Packets without data are skipped. Packets that can't be decoded are logged and skipped, so
/// one bad packet doesn't cost the rest. Messages are returned in packet order.
///
/// # Examples
///
/// ```
/// use vital::{packet, Config, Directory};
///
/// let config = Config::from_path("fixtures/config.toml").unwrap();
/// let registry = config.registry().unwrap();
/// let directory = Directory::from_path("fixtures/devices.json").unwrap();
/// let packets = packet::from_path("fixtures/messages.json").unwrap();
/// let messages = vital::decode_all(&packets, &directory, &registry, &config.frame);
/// assert_eq!(51432891, messages[0].id);
/// ```
pub fn decode_all(
    packets: &[Packet],
    directory: &Directory,
    registry: &Registry,
    config: &frame::Config,
) -> Vec<Message> {
    packets
        .iter()
        .filter(|packet| packet.data.is_some())
        .filter_map(|packet| {
            let device_name = directory.find(packet.device_id).map(|device| device.name());
            if device_name.is_none() {
                debug!("device {} is not in the directory", packet.device_id);
            }
            match decode(packet, device_name, registry, config) {
                Ok(message) => Some(message),
                Err(err) => {
                    warn!("skipping packet {}: {}", packet.id, err);
                    None
                }
            }
        })
        .collect()
}

fn decode(
    packet: &Packet,
    device_name: Option<&str>,
    registry: &Registry,
    config: &frame::Config,
) -> Result<Message, FailureError> {
    let mut message = Message::from_packet(packet, device_name)?;
    message.decode(registry, config)?;
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use chrono::NaiveDate;
    use env_logger;
    use frame::codec;

    fn data(fields: &[i64]) -> String {
        fields
            .iter()
            .map(|&n| codec::encode(n, 3).unwrap())
            .collect()
    }

    fn datetime(month: u32, day: u32, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    fn fixtures() -> (Vec<Packet>, Directory, Registry, frame::Config) {
        let _ = env_logger::try_init();
        let config = ::Config::from_path("fixtures/config.toml").unwrap();
        (
            ::packet::from_path("fixtures/messages.json").unwrap(),
            Directory::from_path("fixtures/devices.json").unwrap(),
            config.registry().unwrap(),
            config.frame,
        )
    }

    #[test]
    fn decode_all_fixtures() {
        let (packets, directory, registry, config) = fixtures();
        let messages = decode_all(&packets, &directory, &registry, &config);
        assert_eq!(2, messages.len());

        let message = &messages[0];
        assert_eq!(51432891, message.id);
        assert_eq!(Some("032e1".to_string()), message.device_name);
        assert_eq!(Some(datetime(1, 1, 13, 30, 5)), message.datetime());
        assert_eq!(Some(15), message.interval_minutes());
        assert_eq!(Some(4), message.variable_count());
        assert_eq!(4, message.calibrations.len());
        assert_eq!(
            vec![
                Sample {
                    datetime: datetime(1, 1, 13, 30, 5),
                    values: vec![Some(12.34), Some(-18.5), Some(7.0), Some(9.0)],
                },
                Sample {
                    datetime: datetime(1, 1, 13, 45, 5),
                    values: vec![Some(12.4), None, Some(8.0), Some(9.01)],
                },
            ],
            message.samples
        );

        let message = &messages[1];
        assert_eq!(51432893, message.id);
        assert_eq!(Some("other".to_string()), message.device_name);
        assert!(message.calibrations.is_empty());
        assert_eq!(
            vec![
                Sample {
                    datetime: datetime(4, 9, 8, 0, 0),
                    values: vec![Some(5.0), Some(6.0)],
                },
                Sample {
                    datetime: datetime(4, 9, 8, 30, 0),
                    values: vec![Some(7.0)],
                },
            ],
            message.samples
        );
    }

    #[test]
    fn unknown_device() {
        let (packets, _, registry, config) = fixtures();
        let messages = decode_all(&packets, &Directory::default(), &registry, &config);
        assert_eq!(2, messages.len());
        assert_eq!(None, messages[0].device_name);
        assert!(messages[0].calibrations.is_empty());
        assert_eq!(Some(1234.0), messages[0].samples[0].values[0]);
    }

    #[test]
    fn decode_errors_propagate() {
        let (packets, _, registry, config) = fixtures();
        let mut message = Message::from_packet(&packets[3], Some("032e1")).unwrap();
        assert_eq!(
            frame::Error::TruncatedFrame {
                required: 9,
                actual: 4,
            },
            message.decode(&registry, &config).unwrap_err()
        );
        assert_eq!(None, message.header);
        assert!(message.calibrations.is_empty());
    }

    #[test]
    fn no_data() {
        let (packets, _, _, _) = fixtures();
        let err = Message::from_packet(&packets[1], None).unwrap_err();
        assert_eq!(Error::NoData(51432892), err.downcast().unwrap());
    }

    #[test]
    fn scenario() {
        let mut registry = Registry::new();
        registry.insert(
            "sensor",
            vec![Calibration::new(1.0, 0.0), Calibration::new(2.0, -5.0)],
        );
        let mut message = Message::from(data(&[24001, 0, 1002, 10, 20]));
        message.device_name = Some("sensor".to_string());
        message.decode(&registry, &frame::Config::default()).unwrap();
        assert_eq!(
            vec![Sample {
                datetime: datetime(1, 1, 0, 0, 0),
                values: vec![Some(10.0), Some(35.0)],
            }],
            message.samples
        );
    }

    #[test]
    fn attached_header_and_calibrations() {
        let mut message = Message::from(data(&[24001, 0, 1002, 10, 20]));
        message.header = Some(Header {
            datetime: datetime(6, 1, 12, 0, 0),
            interval_minutes: 5,
            variable_count: 1,
        });
        message.calibrations = vec![Calibration::new(3.0, 0.0)];
        message.decode(&Registry::new(), &frame::Config::default()).unwrap();
        assert_eq!(2, message.samples.len());
        assert_eq!(datetime(6, 1, 12, 5, 0), message.samples[1].datetime);
        assert_eq!(vec![Some(30.0)], message.samples[0].values);
        assert_eq!(vec![Some(60.0)], message.samples[1].values);
    }

    #[test]
    fn zero_variable_header_is_reparsed() {
        let mut message = Message::from(data(&[24001, 0, 1002, 10, 20]));
        message.header = Some(Header {
            datetime: datetime(6, 1, 12, 0, 0),
            interval_minutes: 5,
            variable_count: 0,
        });
        message.decode(&Registry::new(), &frame::Config::default()).unwrap();
        assert_eq!(Some(2), message.variable_count());
        assert_eq!(Some(datetime(1, 1, 0, 0, 0)), message.datetime());
    }

    #[test]
    fn no_variables() {
        let mut message = Message::from(data(&[24001, 0, 1000, 10, 20]));
        assert_eq!(
            frame::Error::NoVariables,
            message
                .decode(&Registry::new(), &frame::Config::default())
                .unwrap_err()
        );
    }

    #[test]
    fn runaway_interval_is_skipped() {
        let mut config = frame::Config::default();
        config.field_width = 7;
        let runaway: String = [24001, 0, 20_000_000_000 * 100 + 1, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10]
            .iter()
            .map(|&n| codec::encode(n, 7).unwrap())
            .collect();

        let mut message = Message::from(runaway.clone());
        assert_eq!(
            frame::Error::Interval(20_000_000_000),
            message.decode(&Registry::new(), &config).unwrap_err()
        );
        assert_eq!(None, message.header);

        let good: String = [24001, 0, 1001, 42]
            .iter()
            .map(|&n| codec::encode(n, 7).unwrap())
            .collect();
        let packets: Vec<Packet> = [runaway, good]
            .iter()
            .enumerate()
            .map(|(i, data)| Packet {
                id: i as i64,
                device_type: 1,
                device_id: 42,
                status: 0,
                data: Some(STANDARD.encode(data)),
                received_at: None,
            })
            .collect();
        let messages = decode_all(&packets, &Directory::default(), &Registry::new(), &config);
        assert_eq!(1, messages.len());
        assert_eq!(1, messages[0].id);
        assert_eq!(vec![Some(42.0)], messages[0].samples[0].values);
    }
}
