//! Device identity for Broodminder beacons.
//!
//! Addresses are stored as six raw octets, so the canonical text form
//! (uppercase, colon-separated) falls out of `Display` no matter how the
//! radio stack spelled the address.

use std::fmt;

/// A Bluetooth device address stored as a compact 6-byte array.
///
/// Used as the dedup key in [`crate::tracker::Tracker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct MacAddress(pub [u8; 6]);

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

#[cfg(feature = "bluer")]
impl From<bluer::Address> for MacAddress {
    fn from(addr: bluer::Address) -> Self {
        Self(addr.0)
    }
}
