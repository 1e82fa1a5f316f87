//! `broodminder-scan` library.
//!
//! The binary (`src/main.rs`) is responsible for CLI parsing and process exit codes.
//! Payload decoding lives in [`crate::advertisement`], [`crate::decoder`] and
//! [`crate::model`]; the run loop in [`crate::app`] can be tested
//! deterministically with an injected scanner and injected output streams.

pub mod advertisement;
pub mod app;
pub mod decoder;
pub mod duration;
pub mod mac_address;
pub mod model;
pub mod output;
pub mod reading;
pub mod scanner;
pub mod tracker;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types at the crate root
pub use advertisement::{Advertisement, DecodeError, MIN_PAYLOAD_LEN, parse_advertisement};
pub use decoder::{decode_temperature, decode_weight};
pub use mac_address::MacAddress;
pub use model::{Capabilities, Model, classify, model_name};
pub use output::OutputFormatter;
pub use output::json::JsonFormatter;
pub use output::text::TextFormatter;
pub use reading::Reading;
pub use scanner::ScanError;
pub use tracker::Tracker;
