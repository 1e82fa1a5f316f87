//! Human-readable single-line output.

use crate::output::OutputFormatter;
use crate::reading::{Reading, Temperature, WeightReading};
use std::fmt;
use std::io::{self, Write};

/// Text formatter producing lines like
/// `[14:03:09] AA:BB:CC:DD:EE:FF TH     FW:3.10  Bat: 68%  Sample:   89  Temp:71.6°F`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormatter {
    /// Render temperatures in Celsius instead of Fahrenheit
    celsius: bool,
}

impl TextFormatter {
    pub fn new(celsius: bool) -> Self {
        Self { celsius }
    }

    /// A displayable view of one reading in this formatter's units.
    pub fn line<'a>(&self, reading: &'a Reading) -> TextLine<'a> {
        TextLine {
            reading,
            celsius: self.celsius,
        }
    }
}

/// One reading rendered as a single text line, without the newline.
#[derive(Debug, Clone, Copy)]
pub struct TextLine<'a> {
    reading: &'a Reading,
    celsius: bool,
}

fn fmt_temperature(t: &Temperature, celsius: bool, fmt: &mut fmt::Formatter) -> fmt::Result {
    if celsius {
        write!(fmt, "{:.2}°C", t.celsius)
    } else {
        write!(fmt, "{:.1}°F", t.fahrenheit)
    }
}

fn fmt_weight(weight: &WeightReading, fmt: &mut fmt::Formatter) -> fmt::Result {
    write!(fmt, "  Wt:")?;
    if let Some(first) = &weight.primary {
        write!(fmt, " L={:.2} R={:.2}", first.left, first.right)?;
    }
    if let Some(second) = &weight.secondary {
        write!(fmt, " L2={:.2} R2={:.2}", second.left, second.right)?;
    }
    write!(fmt, " Total={:.2} kg", weight.total)
}

impl fmt::Display for TextLine<'_> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let r = self.reading;
        write!(
            fmt,
            "[{}] {} {:<6} FW:{}  Bat:{:>3}%  Sample:{:>5}  Temp:",
            r.timestamp.format("%H:%M:%S"),
            r.mac,
            r.model_name(),
            r.firmware,
            r.battery_percent,
            r.sample_counter,
        )?;
        fmt_temperature(&r.temperature, self.celsius, fmt)?;

        if let Some(humidity) = r.humidity_percent {
            write!(fmt, "  Humidity:{humidity:>3}%")?;
        }

        if let Some(weight) = &r.weight {
            fmt_weight(weight, fmt)?;
        }

        if let Some(rt) = r.realtime_temperature.filter(|t| t.celsius != 0.0) {
            write!(fmt, "  RT:")?;
            fmt_temperature(&rt, self.celsius, fmt)?;
        }

        if let Some(swarm) = r.swarm.filter(|s| s.state > 0) {
            write!(fmt, "  Swarm:{}", swarm.state)?;
        }

        Ok(())
    }
}

impl OutputFormatter for TextFormatter {
    fn write_reading(&self, reading: &Reading, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}", self.line(reading))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advertisement::parse_advertisement_at;
    use crate::model::Model;
    use crate::test_utils::{PayloadBuilder, TEST_MAC};
    use chrono::{Local, TimeZone};

    fn reading(builder: PayloadBuilder) -> Reading {
        let timestamp = Local.with_ymd_and_hms(2024, 5, 1, 14, 3, 9).unwrap();
        parse_advertisement_at(TEST_MAC, -60, &builder.build(), timestamp).unwrap()
    }

    #[test]
    fn test_legacy_th_fahrenheit() {
        let r = reading(
            PayloadBuilder::new(Model::Th)
                .firmware(3, 10)
                .battery(68)
                .sample_counter(89)
                .temperature(24618)
                .humidity(64),
        );
        let line = TextFormatter::new(false).line(&r).to_string();
        assert_eq!(
            line,
            format!(
                "[14:03:09] AA:BB:CC:DD:EE:FF TH     FW:3.10  Bat: 68%  Sample:   89  Temp:{:.1}°F  Humidity: 64%",
                r.temperature.fahrenheit
            )
        );
    }

    #[test]
    fn test_celsius() {
        let r = reading(PayloadBuilder::new(Model::T2).temperature(8500));
        let line = TextFormatter::new(true).line(&r).to_string();
        assert!(line.contains("Temp:35.00°C"), "{line}");
        assert!(!line.contains("Humidity"));
    }

    #[test]
    fn test_weight_two_cells() {
        let r = reading(
            PayloadBuilder::new(Model::WPlus)
                .temperature(6100)
                .weights(36479, 36472),
        );
        let line = TextFormatter::new(false).line(&r).to_string();
        assert!(line.contains("Temp:51.8°F"), "{line}");
        assert!(line.ends_with("  Wt: L=37.12 R=37.05 Total=74.17 kg"), "{line}");
    }

    #[test]
    fn test_weight_four_cells() {
        let raw = 32767 + 1000;
        let r = reading(
            PayloadBuilder::new(Model::W3)
                .weights(raw, raw)
                .second_weights(raw, raw),
        );
        let line = TextFormatter::new(false).line(&r).to_string();
        assert!(
            line.contains("  Wt: L=10.00 R=10.00 L2=10.00 R2=10.00 Total=40.00 kg"),
            "{line}"
        );
    }

    #[test]
    fn test_weight_missing_first_pair_is_not_zero() {
        let raw = 32767 + 1000;
        let r = reading(PayloadBuilder::new(Model::W3).second_weights(raw, raw));
        let line = TextFormatter::new(false).line(&r).to_string();
        assert!(line.ends_with("  Wt: L2=10.00 R2=10.00 Total=20.00 kg"), "{line}");
        assert!(!line.contains(" L=0.00"), "{line}");
    }

    #[test]
    fn test_realtime_and_swarm() {
        let r = reading(
            PayloadBuilder::new(Model::Th2)
                .realtime_temperature(7250)
                .swarm(0, 2),
        );
        let fahrenheit = TextFormatter::new(false).line(&r).to_string();
        assert!(fahrenheit.contains("  RT:72.5°F"), "{fahrenheit}");
        assert!(fahrenheit.ends_with("  Swarm:2"), "{fahrenheit}");

        let celsius = TextFormatter::new(true).line(&r).to_string();
        assert!(celsius.contains("  RT:22.50°C"), "{celsius}");
    }

    #[test]
    fn test_idle_swarm_and_zero_realtime_hidden() {
        let r = reading(
            PayloadBuilder::new(Model::T2)
                .realtime_temperature(5000)
                .swarm(0, 0),
        );
        let line = TextFormatter::new(false).line(&r).to_string();
        assert!(r.realtime_temperature.is_some());
        assert!(!line.contains("RT:"), "{line}");
        assert!(!line.contains("Swarm"), "{line}");
    }

    #[test]
    fn test_unknown_model_padding() {
        let r = reading(PayloadBuilder::new_raw(99));
        let line = TextFormatter::new(false).line(&r).to_string();
        assert!(line.contains(" ?(99)  FW:1.00"), "{line}");
    }

    #[test]
    fn test_write_reading_appends_newline() {
        let r = reading(PayloadBuilder::new(Model::T));
        let mut out = Vec::new();
        TextFormatter::new(false).write_reading(&r, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.ends_with('\n'));
        assert_eq!(out.lines().count(), 1);
    }
}
