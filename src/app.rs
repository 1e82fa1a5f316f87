//! Core application runner (business logic) for `broodminder-scan`.
//!
//! This module is intentionally decoupled from CLI parsing and process exit codes
//! so it can be tested deterministically.

use crate::advertisement::Advertisement;
use crate::duration::HumanDuration;
use crate::output::OutputFormatter;
use crate::output::json::JsonFormatter;
use crate::output::text::TextFormatter;
use crate::scanner::ScanError;
use crate::tracker::Tracker;
use clap::Parser;
use log::debug;
use std::future::Future;
use std::io;
use std::io::Write;
use std::pin::Pin;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;

/// Models listed in the start-up banner.
const SUPPORTED_MODELS: &str = "T, TH, W, T2/T3, TH2/TH3, W+, W3/W4, DIY, SubHub, BeeDar, Hub";

/// Configuration for the core run loop.
#[derive(Parser, Debug, Clone, Default)]
#[command(author, about, version)]
pub struct Options {
    /// Scan duration, e.g. 30s, 5m, 1h30m. 0 or absent scans continuously.
    #[arg(long, value_parser = crate::duration::parse_duration)]
    pub duration: Option<Duration>,

    /// Display temperature in Celsius (default: Fahrenheit)
    #[arg(long)]
    pub celsius: bool,

    /// Output readings as JSON lines
    #[arg(long)]
    pub json: bool,

    /// Show all advertisements (don't deduplicate by sample counter)
    #[arg(long)]
    pub all: bool,

    /// Verbose logging of scanner internals
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Errors returned by the core run loop.
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Counts reported at the end of a scan.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    /// Distinct devices discovered
    pub devices: usize,
    /// Readings written to the output
    pub readings: usize,
}

/// Scanner abstraction to enable deterministic unit tests without Bluetooth hardware.
pub trait Scanner: Send + Sync {
    fn start_scan(
        &self,
    ) -> Pin<
        Box<dyn Future<Output = Result<mpsc::Receiver<Advertisement>, ScanError>> + Send + '_>,
    >;
}

/// Real scanner implementation that delegates to the compiled-in backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealScanner;

impl Scanner for RealScanner {
    fn start_scan(
        &self,
    ) -> Pin<
        Box<dyn Future<Output = Result<mpsc::Receiver<Advertisement>, ScanError>> + Send + '_>,
    > {
        Box::pin(crate::scanner::start_scan())
    }
}

/// Per-run state: dedup tracker, formatter and running counts.
struct Pipeline<'a> {
    options: &'a Options,
    tracker: Tracker,
    formatter: Box<dyn OutputFormatter>,
    summary: ScanSummary,
}

impl<'a> Pipeline<'a> {
    fn new(options: &'a Options) -> Self {
        let formatter: Box<dyn OutputFormatter> = if options.json {
            Box::new(JsonFormatter)
        } else {
            Box::new(TextFormatter::new(options.celsius))
        };
        Self {
            options,
            tracker: Tracker::new(),
            formatter,
            summary: ScanSummary::default(),
        }
    }

    fn handle(
        &mut self,
        advertisement: &Advertisement,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> io::Result<()> {
        let reading = match advertisement.parse() {
            Ok(reading) => reading,
            Err(e) => {
                return writeln!(err, "warning: parse error for {}: {e}", advertisement.mac);
            }
        };

        if !self.options.all && !self.tracker.admit(reading.mac, reading.sample_counter) {
            return Ok(());
        }

        if self.tracker.first_discovery(reading.mac) {
            self.summary.devices += 1;
            debug!("new device {} ({})", reading.mac, reading.model_name());
            if !self.options.json {
                writeln!(
                    err,
                    "Discovered Broodminder device #{}: {} ({})",
                    self.summary.devices,
                    reading.mac,
                    reading.model_name()
                )?;
            }
        }

        self.formatter.write_reading(&reading, out)?;
        self.summary.readings += 1;
        Ok(())
    }
}

fn write_banner(err: &mut dyn Write, duration: Option<Duration>) -> io::Result<()> {
    writeln!(err, "Scanning for Broodminder BLE devices...")?;
    writeln!(err, "Supported models: {SUPPORTED_MODELS}")?;
    match duration {
        Some(d) => writeln!(err, "Duration: {}", HumanDuration(d))?,
        None => writeln!(err, "Press Ctrl+C to stop")?,
    }
    writeln!(err, "---")
}

/// Run the core processing loop, writing readings to `out` and diagnostics to `err`.
///
/// - Each advertisement is parsed; failures are reported on `err` and skipped.
/// - Unless `options.all` is set, repeated sample counters are dropped.
/// - The loop ends when the scanner closes its channel, when `options.duration`
///   elapses, or when `shutdown` completes.
///
/// Text mode also writes a banner, discovery notices and a summary to `err`;
/// JSON mode keeps `err` for warnings only.
pub async fn run_with_io<F>(
    options: Options,
    scanner: &dyn Scanner,
    shutdown: F,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<ScanSummary, RunError>
where
    F: Future<Output = ()>,
{
    let duration = options.duration.filter(|d| !d.is_zero());
    let mut advertisements = scanner.start_scan().await?;

    if !options.json {
        write_banner(err, duration)?;
    }

    let deadline = async move {
        match duration {
            Some(d) => tokio::time::sleep(d).await,
            None => std::future::pending().await,
        }
    };
    tokio::pin!(deadline);
    tokio::pin!(shutdown);

    let mut pipeline = Pipeline::new(&options);

    loop {
        tokio::select! {
            () = &mut shutdown => {
                writeln!(err, "\nStopping scan...")?;
                break;
            }
            () = &mut deadline => {
                debug!("scan duration elapsed");
                break;
            }
            advertisement = advertisements.recv() => match advertisement {
                Some(advertisement) => pipeline.handle(&advertisement, out, err)?,
                None => break,
            },
        }
    }

    let summary = pipeline.summary;
    if !options.json {
        writeln!(
            err,
            "---\nScan complete. Found {} Broodminder device(s).",
            summary.devices
        )?;
    }

    Ok(summary)
}
