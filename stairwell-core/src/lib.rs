//! Board-agnostic core logic for the relay switch controller
//!
//! This crate contains all logic that does not depend on a specific board
//! or executor:
//!
//! - Configuration model, parsing and validation
//! - Debounce decision state machine
//! - Reconciliation between the switch sensor and the relays
//! - Ability records exposed to the host framework
//! - Collaborator traits (sensor status, relay control, event sink)
//! - Error types

#![no_std]
#![deny(unsafe_code)]

pub mod ability;
pub mod config;
pub mod debounce;
pub mod error;
pub mod reconcile;
pub mod traits;

pub use ability::{Ability, AbilityCall, AbilityDescriptor, AbilityReply, ABILITIES, SWITCH_EVENT};
pub use config::{ModuleConfig, Polarity, RelayWiring, Topology};
pub use debounce::Debouncer;
pub use error::{ConfigError, Error, HardwareError, HardwareOp, HostError};
pub use reconcile::{decide, Reconciler, RelayCommand};
pub use traits::{EventSink, RelayControl, SensorStatus};
