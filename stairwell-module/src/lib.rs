//! Host module adapter
//!
//! Glue between the host module framework and the controller:
//!
//! - [`ModuleHost`] is what the host binding implements
//! - [`start`] resolves configuration, claims the pins and registers the
//!   abilities
//! - [`RelaySwitch`] serves ability calls and forwards sensor transitions
//!   as host events

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod host;
pub mod module;

pub use host::ModuleHost;
pub use module::{serve, start, RelaySwitch, SwitchCore};
