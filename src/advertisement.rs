//! Parsing of Broodminder manufacturer-specific advertisement payloads.
//!
//! The payload starts right after the company identifier (`0x8D 0x02`).
//! Multi-byte values are little-endian.
//!
//! | Index | Field |
//! |-------|-------|
//! | 0     | model |
//! | 1     | firmware minor |
//! | 2     | firmware major |
//! | 3     | realtime temperature LSB |
//! | 4     | battery % |
//! | 5-6   | sample counter |
//! | 7-8   | temperature |
//! | 9     | realtime temperature MSB |
//! | 10-11 | weight left |
//! | 12-13 | weight right |
//! | 14    | humidity % |
//! | 15-16 | weight left 2 / swarm time low |
//! | 17-18 | weight right 2 / swarm time high |
//! | 19-20 | realtime total weight / swarm state (19) |

use crate::decoder::{celsius_to_fahrenheit, decode_temperature, decode_weight, round_to};
use crate::mac_address::MacAddress;
use crate::model::{Capabilities, classify};
use crate::reading::{CellPair, Firmware, Reading, Swarm, Temperature, WeightReading};
use chrono::{DateTime, Local};
use thiserror::Error;

/// Shortest payload that holds model, firmware, battery, counter and temperature.
pub const MIN_PAYLOAD_LEN: usize = 15;

/// Error returned when a payload cannot be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("payload too short: got {len} bytes, need at least {MIN_PAYLOAD_LEN}")]
    PayloadTooShort { len: usize },
}

/// A manufacturer payload overheard from one device, already filtered to
/// the Broodminder company identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Advertisement {
    pub mac: MacAddress,
    /// Signal strength in dBm
    pub rssi: i16,
    /// Manufacturer data without the company identifier
    pub data: Vec<u8>,
    pub received_at: DateTime<Local>,
}

impl Advertisement {
    /// Create an advertisement stamped with the current time.
    pub fn new(mac: MacAddress, rssi: i16, data: Vec<u8>) -> Self {
        Self {
            mac,
            rssi,
            data,
            received_at: Local::now(),
        }
    }

    pub fn parse(&self) -> Result<Reading, DecodeError> {
        parse_advertisement_at(self.mac, self.rssi, &self.data, self.received_at)
    }
}

/// Parse a payload into a [`Reading`] stamped with the current time.
pub fn parse_advertisement(
    mac: MacAddress,
    rssi: i16,
    data: &[u8],
) -> Result<Reading, DecodeError> {
    parse_advertisement_at(mac, rssi, data, Local::now())
}

/// Parse a payload into a [`Reading`] with an explicit capture time.
///
/// Only a payload shorter than [`MIN_PAYLOAD_LEN`] is an error. Missing
/// optional tails, sentinels and unknown models leave fields unset.
pub fn parse_advertisement_at(
    mac: MacAddress,
    rssi: i16,
    data: &[u8],
    timestamp: DateTime<Local>,
) -> Result<Reading, DecodeError> {
    if data.len() < MIN_PAYLOAD_LEN {
        return Err(DecodeError::PayloadTooShort { len: data.len() });
    }

    let model = data[0];
    let caps = classify(model);

    Ok(Reading {
        mac,
        rssi,
        model,
        firmware: Firmware {
            major: data[2],
            minor: data[1],
        },
        battery_percent: data[4].min(100),
        sample_counter: u16_at(data, 5),
        temperature: temperature(caps, u16_at(data, 7)),
        humidity_percent: humidity(caps, data[14]),
        weight: weight(caps, data),
        realtime_temperature: realtime_temperature(caps, data),
        realtime_weight: realtime_weight(caps, data),
        swarm: swarm(caps, data),
        timestamp,
    })
}

#[inline]
fn u16_at(data: &[u8], index: usize) -> u16 {
    u16::from_le_bytes([data[index], data[index + 1]])
}

fn temperature(caps: Capabilities, raw: u16) -> Temperature {
    let celsius = round_to(decode_temperature(caps, raw), 2);
    Temperature {
        celsius,
        fahrenheit: celsius_to_fahrenheit(celsius),
    }
}

fn humidity(caps: Capabilities, raw: u8) -> Option<u8> {
    (caps.has_humidity && raw <= 100).then_some(raw)
}

/// A pair is present when at least one of its cells decodes; the other
/// cell then reads as 0 kg.
fn cell_pair(caps: Capabilities, left_raw: u16, right_raw: u16) -> Option<CellPair> {
    match (decode_weight(caps, left_raw), decode_weight(caps, right_raw)) {
        (None, None) => None,
        (left, right) => Some(CellPair {
            left: round_to(left.unwrap_or(0.0), 2),
            right: round_to(right.unwrap_or(0.0), 2),
        }),
    }
}

fn weight(caps: Capabilities, data: &[u8]) -> Option<WeightReading> {
    let primary = cell_pair(caps, u16_at(data, 10), u16_at(data, 12));
    let secondary = if caps.has_four_cell && data.len() >= 19 {
        cell_pair(caps, u16_at(data, 15), u16_at(data, 17))
    } else {
        None
    };

    let total = match (primary, secondary) {
        (None, None) => return None,
        (Some(p), None) => p.sum(),
        (None, Some(s)) => s.sum(),
        (Some(p), Some(s)) => p.sum() + s.sum(),
    };

    Some(WeightReading {
        primary,
        secondary,
        total: round_to(total, 2),
    })
}

/// Low byte at index 3, high byte at index 9; 0 and 0xFFFF mean absent.
fn realtime_temperature(caps: Capabilities, data: &[u8]) -> Option<Temperature> {
    if caps.legacy_temperature {
        return None;
    }
    let raw = u16::from_le_bytes([data[3], data[9]]);
    if raw == 0 || raw == 0xFFFF {
        return None;
    }
    Some(temperature(caps, raw))
}

fn realtime_weight(caps: Capabilities, data: &[u8]) -> Option<f64> {
    if data.len() < 21 || !caps.has_weight || caps.legacy_temperature {
        return None;
    }
    decode_weight(caps, u16_at(data, 19)).map(|kg| round_to(kg, 2))
}

fn swarm(caps: Capabilities, data: &[u8]) -> Option<Swarm> {
    if !caps.has_swarm || data.len() < 20 {
        return None;
    }
    Some(Swarm {
        time: u32::from_le_bytes([data[15], data[16], data[17], data[18]]),
        state: data[19],
    })
}
