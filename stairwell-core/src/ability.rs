//! Abilities exposed to the host framework
//!
//! An ability is a named state query plus action. The set is fixed: the
//! host gets the static [`ABILITIES`] table at registration, and calls come
//! back as [`AbilityCall`] values dispatched by the
//! [`Reconciler`](crate::Reconciler).

/// Name of the event published on every stabilized sensor transition
pub const SWITCH_EVENT: &str = "switch";

/// Ability identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ability {
    /// Logical switch: state from the sensor, action toggles the relays
    /// only when the sensor disagrees with the request
    Switch,
    /// Raw relay state, action forces the relays to a level
    RelaysSwitch,
}

impl Ability {
    /// All abilities, in registration order
    pub const ALL: [Ability; 2] = [Ability::Switch, Ability::RelaysSwitch];

    /// Name the ability is registered under
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Static description of this ability
    pub fn descriptor(self) -> &'static AbilityDescriptor {
        match self {
            Ability::Switch => &ABILITIES[0],
            Ability::RelaysSwitch => &ABILITIES[1],
        }
    }
}

/// Type of the value an ability's state and action carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataType {
    Boolean,
}

/// What the host framework is told about an ability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AbilityDescriptor {
    /// Registered name
    pub name: &'static str,
    /// Human readable summary
    pub description: &'static str,
    /// Type of state and action values
    pub data_type: DataType,
    /// Description of the event published under the ability name, if any
    pub event: Option<&'static str>,
    /// Description of the state query
    pub state: &'static str,
    /// Description of the action
    pub action: &'static str,
}

/// Abilities registered with the host, indexed by [`Ability`]
pub static ABILITIES: [AbilityDescriptor; 2] = [
    AbilityDescriptor {
        name: "switch",
        description: "Light switch reconciled between wall sensor and relays",
        data_type: DataType::Boolean,
        event: Some("Switch state changed at the wall or through the relays"),
        state: "Current switch state as read by the sensor",
        action: "Turn the switch on or off, pulsing the relays only if needed",
    },
    AbilityDescriptor {
        name: "relaysSwitch",
        description: "Direct relay control, independent of the sensor",
        data_type: DataType::Boolean,
        event: None,
        state: "Current relay output state",
        action: "Force the relays to the given state",
    },
];

/// A request from the host to query or drive an ability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AbilityCall {
    /// State query
    State(Ability),
    /// Action with its target value
    Action(Ability, bool),
}

impl AbilityCall {
    /// Ability this call targets
    pub const fn ability(&self) -> Ability {
        match self {
            AbilityCall::State(a) | AbilityCall::Action(a, _) => *a,
        }
    }
}

/// Result of a successful ability call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AbilityReply {
    /// Answer to a state query
    State(bool),
    /// Action completed (any relay writes have resolved)
    Done,
}
