//! Stairwell Hardware Abstraction Layer
//!
//! This crate defines the GPIO contract the controller is written against.
//! Board support code implements [`GpioBank`] to hand out pins by number;
//! the controller never touches chip registers itself.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  stairwell-module / stairwell-drivers   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  stairwell-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ board GpioBank│       │ embedded-hal  │
//! │ implementation│       │ pin adapters  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`], [`gpio::OutputPin`] - Async digital I/O
//! - [`gpio::GpioBank`] - Claiming pins by configured number

#![no_std]
#![deny(unsafe_code)]

pub mod adapter;
pub mod gpio;
pub mod registry;

// Re-export key items at crate root for convenience
pub use adapter::{EhInput, EhOutput};
pub use gpio::{parse_pin, GpioBank, GpioError, InputPin, OutputPin, PinId};
pub use registry::{PinRegistry, MAX_PINS};
