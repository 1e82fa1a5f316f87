//! BLE scanner seam for Broodminder devices.
//!
//! Backends only deliver raw manufacturer payloads that carry the
//! Broodminder company identifier; decoding happens in
//! [`crate::advertisement`].

#[cfg(feature = "bluer")]
pub mod bluer;

use crate::advertisement::Advertisement;
use thiserror::Error;
use tokio::sync::mpsc;

/// Error type for scanner operations.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Bluetooth/adapter related error
    #[error("Bluetooth error: {0}")]
    Bluetooth(String),
    /// No scanning backend compiled in
    #[error("Backend '{0}' not available (not compiled in)")]
    BackendNotAvailable(String),
}

/// Broodminder (IF, LLC) Bluetooth company identifier.
pub const BROODMINDER_MANUFACTURER_ID: u16 = 0x028D;

/// Channel buffer size for advertisements.
pub const ADVERTISEMENT_CHANNEL_BUFFER_SIZE: usize = 100;

/// Start scanning with the compiled-in backend.
///
/// Runs until the returned receiver is dropped.
pub async fn start_scan() -> Result<mpsc::Receiver<Advertisement>, ScanError> {
    #[cfg(feature = "bluer")]
    return bluer::start_scan().await;

    #[cfg(not(feature = "bluer"))]
    return Err(ScanError::BackendNotAvailable("bluer".to_string()));
}
