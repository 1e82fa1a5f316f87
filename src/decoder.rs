//! Field decoders for raw Broodminder payload values.
//!
//! All functions here are pure and total: a missing or bogus value is
//! reported through the return type, never as an error.

use crate::model::Capabilities;

/// Raw temperature value meaning "no reading".
pub const TEMPERATURE_SENTINEL: u16 = 0xFFFF;

/// Raw weight values meaning "no load cell" or factory default.
pub const WEIGHT_SENTINELS: [u16; 3] = [0x7FFF, 0x8005, 0xFFFF];

/// Raw weight value that corresponds to 0 kg.
const WEIGHT_ZERO_POINT: f64 = 32767.0;

/// Convert a raw 16-bit temperature to degrees Celsius.
///
/// Legacy models use the SHT-style `(raw / 65536) * 165 - 40`; everything
/// else uses centi-degrees with a 5000 offset. The sentinel yields `0.0`.
pub fn decode_temperature(caps: Capabilities, raw: u16) -> f64 {
    if raw == TEMPERATURE_SENTINEL {
        return 0.0;
    }
    let raw = f64::from(raw);
    if caps.legacy_temperature {
        (raw / 65536.0) * 165.0 - 40.0
    } else {
        (raw - 5000.0) / 100.0
    }
}

/// Convert a raw 16-bit load-cell value to kilograms.
///
/// Returns `None` for models without load cells and for sentinel values.
/// Results below zero are valid: calibration can sit under the zero point.
pub fn decode_weight(caps: Capabilities, raw: u16) -> Option<f64> {
    if !caps.has_weight || is_weight_sentinel(raw) {
        return None;
    }
    Some((f64::from(raw) - WEIGHT_ZERO_POINT) / 100.0)
}

#[inline]
pub fn is_weight_sentinel(raw: u16) -> bool {
    WEIGHT_SENTINELS.contains(&raw)
}

/// Round to a fixed number of decimal places.
#[inline]
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

/// Fahrenheit from an already rounded Celsius value, rounded to 0.1.
#[inline]
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    round_to(celsius * 9.0 / 5.0 + 32.0, 1)
}
