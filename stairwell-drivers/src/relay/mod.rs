//! Relay outputs

pub mod set;

pub use set::RelayOutputSet;
