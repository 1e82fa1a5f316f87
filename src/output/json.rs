//! JSON lines output.

use crate::output::OutputFormatter;
use crate::reading::Reading;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::borrow::Cow;
use std::io::{self, Write};

/// Wire shape of one reading. Optional groups are omitted when absent.
#[derive(Debug, Serialize)]
pub struct JsonRecord<'a> {
    pub mac: String,
    pub rssi: i16,
    pub model: Cow<'static, str>,
    pub model_byte: u8,
    pub firmware: String,
    pub battery_percent: u8,
    pub sample_counter: u16,
    pub temperature_c: f64,
    pub temperature_f: f64,
    pub has_humidity: bool,
    pub humidity_pct: u8,
    pub has_weight: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_left: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_right: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_total: Option<f64>,
    #[serde(skip_serializing_if = "is_false")]
    pub has_4cell: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_left_2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_right_2: Option<f64>,
    #[serde(skip_serializing_if = "is_false")]
    pub has_realtime: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realtime_temp_c: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realtime_temp_f: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realtime_weight: Option<f64>,
    #[serde(skip_serializing_if = "is_false")]
    pub has_swarm: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swarm_state: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swarm_time: Option<u32>,
    pub timestamp: &'a DateTime<Local>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl<'a> From<&'a Reading> for JsonRecord<'a> {
    fn from(r: &'a Reading) -> Self {
        let primary = r.weight.and_then(|w| w.primary);
        let secondary = r.weight.and_then(|w| w.secondary);
        JsonRecord {
            mac: r.mac.to_string(),
            rssi: r.rssi,
            model: r.model_name(),
            model_byte: r.model,
            firmware: r.firmware.to_string(),
            battery_percent: r.battery_percent,
            sample_counter: r.sample_counter,
            temperature_c: r.temperature.celsius,
            temperature_f: r.temperature.fahrenheit,
            has_humidity: r.humidity_percent.is_some(),
            humidity_pct: r.humidity_percent.unwrap_or(0),
            has_weight: r.weight.is_some(),
            weight_left: primary.map(|p| p.left),
            weight_right: primary.map(|p| p.right),
            weight_total: r.weight.map(|w| w.total),
            has_4cell: secondary.is_some(),
            weight_left_2: secondary.map(|p| p.left),
            weight_right_2: secondary.map(|p| p.right),
            has_realtime: r.realtime_temperature.is_some(),
            realtime_temp_c: r.realtime_temperature.map(|t| t.celsius),
            realtime_temp_f: r.realtime_temperature.map(|t| t.fahrenheit),
            realtime_weight: r.realtime_weight,
            has_swarm: r.swarm.is_some(),
            swarm_state: r.swarm.map(|s| s.state),
            swarm_time: r.swarm.map(|s| s.time),
            timestamp: &r.timestamp,
        }
    }
}

/// Formatter emitting one JSON object per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn write_reading(&self, reading: &Reading, out: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer(&mut *out, &JsonRecord::from(reading))?;
        writeln!(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advertisement::parse_advertisement_at;
    use crate::model::Model;
    use crate::test_utils::{PayloadBuilder, TEST_MAC};
    use chrono::TimeZone;
    use serde_json::Value;

    fn render(builder: PayloadBuilder) -> Value {
        let timestamp = Local.with_ymd_and_hms(2024, 5, 1, 14, 3, 9).unwrap();
        let reading = parse_advertisement_at(TEST_MAC, -71, &builder.build(), timestamp).unwrap();
        let mut out = Vec::new();
        JsonFormatter.write_reading(&reading, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.ends_with('\n'));
        assert_eq!(out.lines().count(), 1);
        serde_json::from_str(out.trim_end()).unwrap()
    }

    #[test]
    fn test_base_fields() {
        let v = render(
            PayloadBuilder::new(Model::Th)
                .firmware(3, 10)
                .battery(68)
                .sample_counter(89)
                .humidity(64),
        );
        assert_eq!(v["mac"], "AA:BB:CC:DD:EE:FF");
        assert_eq!(v["rssi"], -71);
        assert_eq!(v["model"], "TH");
        assert_eq!(v["model_byte"], 42);
        assert_eq!(v["firmware"], "3.10");
        assert_eq!(v["battery_percent"], 68);
        assert_eq!(v["sample_counter"], 89);
        assert_eq!(v["has_humidity"], true);
        assert_eq!(v["humidity_pct"], 64);
        assert_eq!(v["has_weight"], false);
        assert!(v["timestamp"].as_str().unwrap().starts_with("2024-05-01T14:03:09"));

        let obj = v.as_object().unwrap();
        for absent in ["weight_left", "has_4cell", "has_realtime", "has_swarm", "swarm_state"] {
            assert!(!obj.contains_key(absent), "{absent} should be omitted");
        }
    }

    #[test]
    fn test_weight_fields() {
        let raw = 32767 + 1000;
        let v = render(
            PayloadBuilder::new(Model::W3)
                .temperature(7000)
                .weights(raw, raw)
                .second_weights(raw, raw)
                .realtime_weight(32767 + 4000),
        );
        assert_eq!(v["temperature_c"], 20.0);
        assert_eq!(v["temperature_f"], 68.0);
        assert_eq!(v["has_weight"], true);
        assert_eq!(v["weight_left"], 10.0);
        assert_eq!(v["weight_right_2"], 10.0);
        assert_eq!(v["weight_total"], 40.0);
        assert_eq!(v["has_4cell"], true);
        assert_eq!(v["realtime_weight"], 40.0);
        assert_eq!(v["has_humidity"], false);
    }

    #[test]
    fn test_missing_first_pair_is_omitted() {
        let raw = 32767 + 1000;
        let v = render(PayloadBuilder::new(Model::W3).second_weights(raw, raw));
        let obj = v.as_object().unwrap();
        assert_eq!(v["has_weight"], true);
        assert!(!obj.contains_key("weight_left"));
        assert!(!obj.contains_key("weight_right"));
        assert_eq!(v["weight_left_2"], 10.0);
        assert_eq!(v["weight_right_2"], 10.0);
        assert_eq!(v["weight_total"], 20.0);
    }

    #[test]
    fn test_swarm_and_realtime_fields() {
        let v = render(
            PayloadBuilder::new(Model::T2)
                .realtime_temperature(7250)
                .swarm(1234, 3),
        );
        assert_eq!(v["has_realtime"], true);
        assert_eq!(v["realtime_temp_c"], 22.5);
        assert_eq!(v["realtime_temp_f"], 72.5);
        assert_eq!(v["has_swarm"], true);
        assert_eq!(v["swarm_state"], 3);
        assert_eq!(v["swarm_time"], 1234);
    }
}
