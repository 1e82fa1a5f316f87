use crate::mac_address::MacAddress;
use crate::model::Model;

/// A stable device address for unit tests.
pub const TEST_MAC: MacAddress = MacAddress([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);

/// Builds a full 21-byte Broodminder payload.
///
/// Defaults leave every optional field absent: weight slots hold the
/// `0x7FFF` sentinel and the realtime temperature is 0.
#[derive(Debug, Clone)]
pub struct PayloadBuilder {
    model: u8,
    firmware: (u8, u8),
    battery: u8,
    sample_counter: u16,
    temperature: u16,
    realtime_temperature: u16,
    weights: (u16, u16),
    humidity: u8,
    second_weights: (u16, u16),
    tail: u16,
}

impl PayloadBuilder {
    pub fn new(model: Model) -> Self {
        Self::new_raw(model as u8)
    }

    pub fn new_raw(model: u8) -> Self {
        Self {
            model,
            firmware: (1, 0),
            battery: 50,
            sample_counter: 1,
            temperature: 5000,
            realtime_temperature: 0,
            weights: (0x7FFF, 0x7FFF),
            humidity: 0,
            second_weights: (0x7FFF, 0x7FFF),
            tail: 0x7FFF,
        }
    }

    pub fn firmware(mut self, major: u8, minor: u8) -> Self {
        self.firmware = (major, minor);
        self
    }

    pub fn battery(mut self, percent: u8) -> Self {
        self.battery = percent;
        self
    }

    pub fn sample_counter(mut self, counter: u16) -> Self {
        self.sample_counter = counter;
        self
    }

    pub fn temperature(mut self, raw: u16) -> Self {
        self.temperature = raw;
        self
    }

    pub fn realtime_temperature(mut self, raw: u16) -> Self {
        self.realtime_temperature = raw;
        self
    }

    pub fn weights(mut self, left: u16, right: u16) -> Self {
        self.weights = (left, right);
        self
    }

    pub fn humidity(mut self, percent: u8) -> Self {
        self.humidity = percent;
        self
    }

    pub fn second_weights(mut self, left: u16, right: u16) -> Self {
        self.second_weights = (left, right);
        self
    }

    pub fn swarm(mut self, time: u32, state: u8) -> Self {
        self.second_weights = ((time & 0xFFFF) as u16, (time >> 16) as u16);
        self.tail = u16::from(state);
        self
    }

    pub fn realtime_weight(mut self, raw: u16) -> Self {
        self.tail = raw;
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let [rt_lo, rt_hi] = self.realtime_temperature.to_le_bytes();
        let mut p = Vec::with_capacity(21);
        p.push(self.model);
        p.push(self.firmware.1);
        p.push(self.firmware.0);
        p.push(rt_lo);
        p.push(self.battery);
        p.extend_from_slice(&self.sample_counter.to_le_bytes());
        p.extend_from_slice(&self.temperature.to_le_bytes());
        p.push(rt_hi);
        p.extend_from_slice(&self.weights.0.to_le_bytes());
        p.extend_from_slice(&self.weights.1.to_le_bytes());
        p.push(self.humidity);
        p.extend_from_slice(&self.second_weights.0.to_le_bytes());
        p.extend_from_slice(&self.second_weights.1.to_le_bytes());
        p.extend_from_slice(&self.tail.to_le_bytes());
        p
    }
}
