//! BlueZ D-Bus backend for Broodminder scanning.
//!
//! This backend uses the `bluer` crate to communicate with the BlueZ daemon
//! via D-Bus. It requires the `bluetoothd` daemon to be running.

use super::{ADVERTISEMENT_CHANNEL_BUFFER_SIZE, BROODMINDER_MANUFACTURER_ID, ScanError};
use crate::advertisement::Advertisement;
use crate::mac_address::MacAddress;
use bluer::{Adapter, AdapterEvent, Address, DiscoveryFilter, DiscoveryTransport, Session};
use futures::{StreamExt, pin_mut};
use log::{debug, info};
use tokio::sync::mpsc;

impl From<bluer::Error> for ScanError {
    fn from(err: bluer::Error) -> Self {
        ScanError::Bluetooth(err.to_string())
    }
}

/// Start an LE discovery and forward every Broodminder payload.
///
/// Duplicate data reporting is enabled so each rebroadcast of a changed
/// payload shows up as a device update; deduplication is left to the
/// caller. The background task ends when the receiver is dropped.
pub async fn start_scan() -> Result<mpsc::Receiver<Advertisement>, ScanError> {
    let session = Session::new().await?;
    let adapter = session.default_adapter().await?;
    adapter.set_powered(true).await?;
    info!("scanning on adapter {}", adapter.name());

    adapter
        .set_discovery_filter(DiscoveryFilter {
            transport: DiscoveryTransport::Le,
            duplicate_data: true,
            ..Default::default()
        })
        .await?;

    let events = adapter.discover_devices_with_changes().await?;
    let (tx, rx) = mpsc::channel(ADVERTISEMENT_CHANNEL_BUFFER_SIZE);

    // The task owns the session so discovery stays active while it runs
    tokio::spawn(async move {
        let _session = session;
        pin_mut!(events);

        while let Some(event) = events.next().await {
            let AdapterEvent::DeviceAdded(address) = event else {
                continue;
            };
            match read_advertisement(&adapter, address).await {
                Ok(Some(advertisement)) => {
                    if tx.send(advertisement).await.is_err() {
                        debug!("advertisement receiver closed, stopping discovery");
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => debug!("failed to read {address}: {e}"),
            }
        }
    });

    Ok(rx)
}

/// Read the Broodminder manufacturer data of a device, if it has any.
async fn read_advertisement(
    adapter: &Adapter,
    address: Address,
) -> Result<Option<Advertisement>, ScanError> {
    let device = adapter.device(address)?;

    let Some(manufacturer_data) = device.manufacturer_data().await? else {
        return Ok(None);
    };
    let Some(data) = manufacturer_data.get(&BROODMINDER_MANUFACTURER_ID) else {
        return Ok(None);
    };
    let rssi = device.rssi().await?.unwrap_or_default();

    Ok(Some(Advertisement::new(
        MacAddress::from(address),
        rssi,
        data.clone(),
    )))
}
