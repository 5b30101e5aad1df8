//! Decode telemetry packets from remote environmental sensors.
//!
//! Sensors send their readings over a satellite link as packets. Each packet carries a base64
//! encoded frame (see the `frame` crate for the frame format) and the id of the device that sent
//! it. Turning packets into calibrated time series takes three pieces of outside information:
//!
//! - a `Directory` of devices, to turn device ids into device names,
//! - a calibration `Registry`, which holds each device's per-channel calibrations,
//! - a `Config`, which holds the frame decoding parameters.
//!
//! # Examples
//!
//! ```
//! use vital::{packet, Config, Directory};
//!
//! let config = Config::from_path("fixtures/config.toml").unwrap();
//! let registry = config.registry().unwrap();
//! let directory = Directory::from_path("fixtures/devices.json").unwrap();
//! let packets = packet::from_path("fixtures/messages.json").unwrap();
//! let messages = vital::decode_all(&packets, &directory, &registry, &config.frame);
//! assert_eq!(2, messages.len());
//! ```

#![deny(missing_docs, missing_debug_implementations, unsafe_code)]

extern crate base64;
extern crate chrono;
#[cfg(test)]
extern crate env_logger;
#[macro_use]
extern crate failure;
extern crate frame;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
extern crate regex;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_json;
extern crate toml;

pub mod calibration;
mod config;
pub mod device;
pub mod message;
pub mod packet;

pub use calibration::Registry;
pub use config::Config;
pub use device::{Device, Directory};
pub use message::{decode_all, Message};
pub use packet::Packet;
