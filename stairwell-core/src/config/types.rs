//! Configuration type definitions
//!
//! These types are resolved once at startup and never change afterwards.

use embassy_time::Duration;
use stairwell_hal::PinId;

/// Default debounce window for the sensor input (ms)
pub const DEFAULT_DEBOUNCE_MS: u64 = 100;

/// Relay wiring scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Topology {
    /// One relay switching one traveller pair (staircase circuit)
    #[default]
    TwoWay,
    /// Two relays switched together (intermediate/cross circuit)
    FourWay,
}

impl Topology {
    /// Number of switching points, as written in the `ways` option
    pub const fn ways(self) -> u8 {
        match self {
            Topology::TwoWay => 2,
            Topology::FourWay => 4,
        }
    }
}

/// Sensor polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Polarity {
    /// If true, logical switch state is the negated sensor reading
    pub reverse: bool,
}

impl Polarity {
    /// Polarity that passes sensor readings through unchanged
    pub const NORMAL: Polarity = Polarity { reverse: false };

    /// Polarity that negates sensor readings
    pub const REVERSED: Polarity = Polarity { reverse: true };

    /// Interpret a raw sensor reading as a logical switch state
    pub const fn apply(self, raw: bool) -> bool {
        raw != self.reverse
    }
}

/// Relay pins together with their topology
///
/// A four-way circuit without its second pin cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RelayWiring {
    /// Single relay
    TwoWay(PinId),
    /// Primary and secondary relay, always driven together
    FourWay(PinId, PinId),
}

impl RelayWiring {
    /// Topology of this wiring
    pub const fn topology(&self) -> Topology {
        match self {
            RelayWiring::TwoWay(_) => Topology::TwoWay,
            RelayWiring::FourWay(_, _) => Topology::FourWay,
        }
    }

    /// Pin of the primary relay
    pub const fn primary(&self) -> PinId {
        match self {
            RelayWiring::TwoWay(pin) | RelayWiring::FourWay(pin, _) => *pin,
        }
    }

    /// Pin of the secondary relay, if the topology has one
    pub const fn secondary(&self) -> Option<PinId> {
        match self {
            RelayWiring::TwoWay(_) => None,
            RelayWiring::FourWay(_, pin) => Some(*pin),
        }
    }
}

/// Resolved module configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModuleConfig {
    /// How sensor readings map to the logical switch state
    pub polarity: Polarity,
    /// Sensor input pin
    pub sensor_gpio: PinId,
    /// Debounce window for the sensor input
    pub debounce: Duration,
    /// Relay output pins
    pub relays: RelayWiring,
}

impl ModuleConfig {
    /// Relay topology
    pub fn topology(&self) -> Topology {
        self.relays.topology()
    }
}
