//! Broodminder reading data structure.

use crate::mac_address::MacAddress;
use crate::model::{self, Model};
use chrono::{DateTime, Local};
use std::borrow::Cow;
use std::fmt;

/// One decoded advertisement. Built once by
/// [`crate::advertisement::parse_advertisement`] and never mutated.
///
/// Units and rounding, applied at construction:
/// - Temperatures in Celsius (2 decimals) and Fahrenheit (1 decimal)
/// - Weights in kilograms (2 decimals)
/// - Battery and humidity in percent
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    /// Device address
    pub mac: MacAddress,
    /// Received signal strength in dBm
    pub rssi: i16,
    /// Raw model byte
    pub model: u8,
    pub firmware: Firmware,
    /// Battery level, clamped to 0..=100
    pub battery_percent: u8,
    /// Per-device sample counter, the dedup key
    pub sample_counter: u16,
    pub temperature: Temperature,
    /// Relative humidity, only for humidity-capable models
    pub humidity_percent: Option<u8>,
    /// Load-cell readings, only for weight-capable models
    pub weight: Option<WeightReading>,
    /// Instantaneous temperature (current-generation models)
    pub realtime_temperature: Option<Temperature>,
    /// Instantaneous total weight in kg
    pub realtime_weight: Option<f64>,
    pub swarm: Option<Swarm>,
    /// When the advertisement was captured
    pub timestamp: DateTime<Local>,
}

impl Reading {
    pub fn model_name(&self) -> Cow<'static, str> {
        model::model_name(self.model)
    }

    pub fn known_model(&self) -> Option<Model> {
        Model::from_byte(self.model)
    }
}

/// Firmware version as advertised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Firmware {
    pub major: u8,
    pub minor: u8,
}

impl fmt::Display for Firmware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.major, self.minor)
    }
}

/// A temperature in both scales, each already rounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Temperature {
    pub celsius: f64,
    pub fahrenheit: f64,
}

/// A left/right load-cell pair in kg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellPair {
    pub left: f64,
    pub right: f64,
}

impl CellPair {
    pub fn sum(&self) -> f64 {
        self.left + self.right
    }
}

/// Weight scale readings in kg. At least one pair is present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightReading {
    /// First load-cell pair
    pub primary: Option<CellPair>,
    /// Second pair, four-cell models only
    pub secondary: Option<CellPair>,
    /// Sum of the pairs present
    pub total: f64,
}

/// SwarmMinder state from T2/TH2 class devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swarm {
    pub time: u32,
    pub state: u8,
}
