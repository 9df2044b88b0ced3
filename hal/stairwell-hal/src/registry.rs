//! Pin claim tracking
//!
//! Tracks which GPIO pins are in use so a bank can refuse to hand the same
//! pin to two components.

use heapless::FnvIndexSet;

use crate::gpio::{GpioError, PinId};

/// Most pins a registry can track
pub const MAX_PINS: u8 = 64;

/// Registry of claimed pins for a bank with `pin_count` GPIOs
pub struct PinRegistry {
    /// Number of pins the board exposes (valid numbers are `0..pin_count`)
    pin_count: u8,
    /// Set of claimed GPIO pins
    claimed: FnvIndexSet<u8, { MAX_PINS as usize }>,
}

impl PinRegistry {
    /// Create a registry for a board with `pin_count` GPIOs
    ///
    /// Counts above [`MAX_PINS`] are capped, so higher pin numbers are
    /// reported as [`GpioError::InvalidPin`].
    pub fn new(pin_count: u8) -> Self {
        Self {
            pin_count: pin_count.min(MAX_PINS),
            claimed: FnvIndexSet::new(),
        }
    }

    /// Claim a GPIO pin
    ///
    /// Fails with [`GpioError::InvalidPin`] for numbers the board does not
    /// have and [`GpioError::AlreadyClaimed`] for pins already in use.
    pub fn claim(&mut self, pin: PinId) -> Result<(), GpioError> {
        if pin.number() >= self.pin_count {
            return Err(GpioError::InvalidPin);
        }
        if self.claimed.contains(&pin.number()) {
            return Err(GpioError::AlreadyClaimed);
        }
        self.claimed
            .insert(pin.number())
            .map_err(|_| GpioError::Unsupported)?;
        Ok(())
    }

    /// Release a GPIO pin
    pub fn release(&mut self, pin: PinId) {
        self.claimed.remove(&pin.number());
    }

    /// Check if a pin is claimed
    pub fn is_claimed(&self, pin: PinId) -> bool {
        self.claimed.contains(&pin.number())
    }

    /// Get the number of claimed pins
    pub fn claimed_count(&self) -> usize {
        self.claimed.len()
    }
}
