//! Error types
//!
//! Nothing in the controller recovers from an error locally: configuration
//! and pin-claim failures abort startup, write failures go back to whoever
//! asked for the write.

use stairwell_hal::{GpioError, PinId};

/// Configuration problems, detected before any GPIO is touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A required option is not set
    MissingOption(&'static str),
    /// An option is set but its value has the wrong type or format
    InvalidValue(&'static str),
    /// `ways` is neither 2 nor 4
    UnsupportedWays(i64),
    /// `ways = 4` without `relayGpio2`
    MissingSecondRelay,
    /// The same pin is assigned to more than one role
    DuplicatePin(PinId),
}

/// Which GPIO operation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HardwareOp {
    /// Claiming and configuring the pin
    Init,
    /// Reading the pin level or waiting for an edge
    Read,
    /// Driving the pin
    Write,
}

/// A GPIO operation failed on a specific pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HardwareError {
    /// Pin the operation was issued on
    pub pin: PinId,
    /// Operation that failed
    pub op: HardwareOp,
    /// Cause reported by the GPIO layer
    pub cause: GpioError,
}

impl HardwareError {
    /// Pin could not be claimed
    pub fn init(pin: PinId, cause: GpioError) -> Self {
        Self {
            pin,
            op: HardwareOp::Init,
            cause,
        }
    }

    /// Pin could not be read
    pub fn read(pin: PinId, cause: GpioError) -> Self {
        Self {
            pin,
            op: HardwareOp::Read,
            cause,
        }
    }

    /// Pin could not be driven
    pub fn write(pin: PinId, cause: GpioError) -> Self {
        Self {
            pin,
            op: HardwareOp::Write,
            cause,
        }
    }

    /// Check if this error happened while claiming the pin
    pub fn is_init(&self) -> bool {
        self.op == HardwareOp::Init
    }
}

/// Failures reported by the host module framework
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostError {
    /// Ability registration was refused
    Register,
    /// Event could not be published
    Emit,
    /// Module start was refused
    Start,
    /// Reply to an ability call could not be delivered
    Reply,
}

/// Any error the controller can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Invalid module configuration
    Config(ConfigError),
    /// GPIO failure
    Hardware(HardwareError),
    /// Host framework failure
    Host(HostError),
    /// The sensor monitor has no free listener slot
    NoListenerSlot,
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<HardwareError> for Error {
    fn from(e: HardwareError) -> Self {
        Error::Hardware(e)
    }
}

impl From<HostError> for Error {
    fn from(e: HostError) -> Self {
        Error::Host(e)
    }
}
