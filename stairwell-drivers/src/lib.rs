//! Hardware driver implementations
//!
//! This crate provides the concrete components the reconciliation core
//! talks to, built on the `stairwell-hal` GPIO traits:
//!
//! - Debounced input monitor for the switch sensor
//! - Relay output set for two-way and four-way circuits

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod input;
pub mod relay;

pub use input::{DebouncedInput, MonitorError, MonitorState, TransitionListener};
pub use relay::RelayOutputSet;
