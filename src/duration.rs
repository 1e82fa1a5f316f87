//! Human-readable durations for the `--duration` flag.

use std::fmt;
use std::time::Duration;

/// Parse a duration such as `30s`, `5m`, `500ms`, `2h` or `1h30m`.
///
/// A bare number is interpreted as seconds. Segments may be chained; each
/// is a whole number followed by `h`, `m`, `s` or `ms`.
///
/// # Examples
/// ```
/// use broodminder_scan::duration::parse_duration;
/// use std::time::Duration;
///
/// assert_eq!(parse_duration("30s").unwrap(), Duration::from_secs(30));
/// assert_eq!(parse_duration("1m30s").unwrap(), Duration::from_secs(90));
/// assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
/// ```
pub fn parse_duration(src: &str) -> Result<Duration, String> {
    let src = src.trim();
    if src.is_empty() {
        return Err("empty duration string".to_string());
    }

    if let Ok(secs) = src.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }

    let mut total = Duration::ZERO;
    let mut rest = src;
    while !rest.is_empty() {
        let digits = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if digits == 0 {
            return Err(format!("invalid duration: {src}"));
        }
        let value: u64 = rest[..digits]
            .parse()
            .map_err(|_| format!("invalid duration: {src}"))?;
        rest = &rest[digits..];

        let (segment, unit_len) = if rest.starts_with("ms") {
            (Duration::from_millis(value), 2)
        } else if rest.starts_with('h') {
            (Duration::from_secs(value.saturating_mul(3600)), 1)
        } else if rest.starts_with('m') {
            (Duration::from_secs(value.saturating_mul(60)), 1)
        } else if rest.starts_with('s') {
            (Duration::from_secs(value), 1)
        } else {
            return Err(format!("invalid duration unit in: {src}"));
        };
        total = total.saturating_add(segment);
        rest = &rest[unit_len..];
    }

    Ok(total)
}

/// Displays a duration in compact unit form: `1h0m0s`, `1m30s`, `2.5s`, `500ms`.
///
/// Hours and minutes are always followed by seconds; below one second the
/// largest fitting unit among `ms`, `µs` and `ns` is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanDuration(pub Duration);

/// Write `whole` followed by the significant digits of `frac`, which has
/// `width` decimal places.
fn fmt_decimal(fmt: &mut fmt::Formatter, whole: u64, frac: u32, width: usize) -> fmt::Result {
    write!(fmt, "{whole}")?;
    if frac == 0 {
        return Ok(());
    }
    let digits = format!("{frac:0width$}");
    write!(fmt, ".{}", digits.trim_end_matches('0'))
}

impl fmt::Display for HumanDuration {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let secs = self.0.as_secs();
        let nanos = self.0.subsec_nanos();

        if secs == 0 {
            return match nanos {
                0 => write!(fmt, "0s"),
                1..=999 => write!(fmt, "{nanos}ns"),
                1_000..=999_999 => {
                    fmt_decimal(fmt, u64::from(nanos / 1_000), nanos % 1_000, 3)?;
                    write!(fmt, "µs")
                }
                _ => {
                    fmt_decimal(fmt, u64::from(nanos / 1_000_000), nanos % 1_000_000, 6)?;
                    write!(fmt, "ms")
                }
            };
        }

        let hours = secs / 3600;
        let minutes = secs / 60 % 60;
        if hours > 0 {
            write!(fmt, "{hours}h{minutes}m")?;
        } else if minutes > 0 {
            write!(fmt, "{minutes}m")?;
        }
        fmt_decimal(fmt, secs % 60, nanos, 9)?;
        write!(fmt, "s")
    }
}
