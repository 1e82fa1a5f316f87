//! Duplicate suppression for Broodminder readings.
//!
//! Devices repeat the same advertisement many times between samples. The
//! tracker remembers the last sample counter per device so each sample is
//! emitted once, and separately remembers which devices have been announced.

use crate::mac_address::MacAddress;
use log::trace;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct TrackerState {
    /// Last admitted sample counter per device
    last_counter: HashMap<MacAddress, u16>,
    /// Devices already reported by `first_discovery`
    discovered: HashSet<MacAddress>,
}

/// Per-device dedup cache, safe to share between scan callbacks.
///
/// Every call takes one lock for both the lookup and the update, so two
/// concurrent `admit` calls with the same device and counter never both
/// return `true`. Entries live for the life of the tracker.
#[derive(Debug, Default)]
pub struct Tracker {
    state: Mutex<TrackerState>,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, TrackerState> {
        // state stays consistent even if a holder panicked
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Check whether a reading with this sample counter is new.
    ///
    /// Returns `true` the first time a device is seen and whenever the
    /// counter differs from the last admitted one (counters wrap, so a
    /// lower value is still new). A repeated counter returns `false` and
    /// leaves the state untouched.
    pub fn admit(&self, mac: MacAddress, counter: u16) -> bool {
        let mut state = self.state();
        match state.last_counter.insert(mac, counter) {
            Some(last) if last == counter => {
                trace!("duplicate sample {counter} from {mac}");
                false
            }
            _ => true,
        }
    }

    /// Returns `true` exactly once per device.
    pub fn first_discovery(&self, mac: MacAddress) -> bool {
        self.state().discovered.insert(mac)
    }

    /// Number of distinct devices admitted so far.
    pub fn len(&self) -> usize {
        self.state().last_counter.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
