//! Broodminder device models and their payload capabilities.
//!
//! The model byte at the start of every payload decides which temperature
//! formula applies and which optional fields carry real data.

use std::borrow::Cow;
use std::fmt;

/// Known Broodminder device models, keyed by the model byte they advertise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Model {
    /// Temperature only (1st gen)
    T = 41,
    /// Temperature + humidity (1st gen)
    Th = 42,
    /// Weight scale with 2 load cells (1st gen)
    W = 43,
    /// Temperature + SwarmMinder (T2/T3)
    T2 = 47,
    /// Weight scale with 4 load cells (W3/W4)
    W3 = 49,
    /// SubHub BLE relay
    SubHub = 52,
    /// Cell hub (Hub 4G, Weather, Solar)
    Hub4G = 54,
    /// Temperature + humidity + SwarmMinder (TH2/TH3)
    Th2 = 56,
    /// Weight scale with 2 load cells (W+/W2)
    WPlus = 57,
    /// DIY weight scale with 4 load cells
    Diy = 58,
    /// WiFi hub
    HubWf = 60,
    /// Bee flight counter
    BeeDar = 63,
}

impl Model {
    /// Every known model, in model-byte order.
    pub const ALL: [Model; 12] = [
        Model::T,
        Model::Th,
        Model::W,
        Model::T2,
        Model::W3,
        Model::SubHub,
        Model::Hub4G,
        Model::Th2,
        Model::WPlus,
        Model::Diy,
        Model::HubWf,
        Model::BeeDar,
    ];

    pub const fn from_byte(byte: u8) -> Option<Model> {
        match byte {
            41 => Some(Model::T),
            42 => Some(Model::Th),
            43 => Some(Model::W),
            47 => Some(Model::T2),
            49 => Some(Model::W3),
            52 => Some(Model::SubHub),
            54 => Some(Model::Hub4G),
            56 => Some(Model::Th2),
            57 => Some(Model::WPlus),
            58 => Some(Model::Diy),
            60 => Some(Model::HubWf),
            63 => Some(Model::BeeDar),
            _ => None,
        }
    }

    /// Display name as printed by the scanner.
    pub const fn name(self) -> &'static str {
        match self {
            Model::T => "T",
            Model::Th => "TH",
            Model::W => "W",
            Model::T2 => "T2",
            Model::W3 => "W3",
            Model::SubHub => "SubHub",
            Model::Hub4G => "Hub4G",
            Model::Th2 => "TH2",
            Model::WPlus => "W+",
            Model::Diy => "DIY",
            Model::HubWf => "HubWF",
            Model::BeeDar => "BeeDar",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a model byte says about the rest of the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Temperature uses `(raw / 65536) * 165 - 40` instead of `(raw - 5000) / 100`.
    pub legacy_temperature: bool,
    /// The humidity byte carries a reading. Models without a humidity
    /// sensor emit noise there, which must be ignored.
    pub has_humidity: bool,
    pub has_weight: bool,
    /// Bytes 15..19 hold a second load-cell pair.
    pub has_four_cell: bool,
    /// Bytes 15..20 hold swarm time and swarm state.
    pub has_swarm: bool,
}

impl Capabilities {
    /// Classify a model byte. Total over `u8`: unknown models get the
    /// current temperature formula, a humidity field and nothing else.
    pub const fn of(model: u8) -> Capabilities {
        let known = Model::from_byte(model);
        let Some(model) = known else {
            return Capabilities {
                legacy_temperature: false,
                has_humidity: true,
                has_weight: false,
                has_four_cell: false,
                has_swarm: false,
            };
        };

        Capabilities {
            legacy_temperature: matches!(model, Model::T | Model::Th | Model::W),
            has_humidity: !matches!(model, Model::T | Model::T2 | Model::W3 | Model::SubHub),
            has_weight: matches!(model, Model::W | Model::WPlus | Model::W3 | Model::Diy),
            has_four_cell: matches!(model, Model::W3 | Model::Diy),
            has_swarm: matches!(model, Model::T2 | Model::Th2),
        }
    }
}

/// Classify a raw model byte into its capability set.
pub const fn classify(model: u8) -> Capabilities {
    Capabilities::of(model)
}

/// Display name for a raw model byte; unknown bytes render as `?(N)`.
pub fn model_name(model: u8) -> Cow<'static, str> {
    match Model::from_byte(model) {
        Some(known) => Cow::Borrowed(known.name()),
        None => Cow::Owned(format!("?({model})")),
    }
}
