//! GPIO pin abstractions
//!
//! Provides async traits for digital input and output pins, and for the
//! bank that hands them out by number. Board crates implement these for
//! their chip; the drivers only ever see the traits.

/// GPIO pin number as written in the module configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId(pub u8);

impl PinId {
    /// Raw pin number
    pub const fn number(self) -> u8 {
        self.0
    }
}

impl From<u8> for PinId {
    fn from(pin: u8) -> Self {
        Self(pin)
    }
}

/// Errors reported by the GPIO layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioError {
    /// Pin number does not exist on this board
    InvalidPin,
    /// Pin was already claimed by another component
    AlreadyClaimed,
    /// Pin exists but cannot be used in the requested mode
    Unsupported,
    /// Reading the pin level failed
    Read,
    /// Driving the pin failed
    Write,
}

/// Digital input pin with edge notification
#[allow(async_fn_in_trait)]
pub trait InputPin {
    /// Read the instantaneous pin level
    ///
    /// Takes `&mut self` to match `embedded-hal` 1.0, where some pins
    /// (expanders, shared buses) need mutable access to read.
    fn is_high(&mut self) -> Result<bool, GpioError>;

    /// Wait until the pin sees a rising or falling edge
    ///
    /// Raw edges are reported as-is; contact bounce is the caller's problem.
    async fn wait_for_any_edge(&mut self) -> Result<(), GpioError>;
}

/// Digital output pin
#[allow(async_fn_in_trait)]
pub trait OutputPin {
    /// Drive the pin to a specific state
    ///
    /// Resolves once the level has been applied.
    async fn set_state(&mut self, high: bool) -> Result<(), GpioError>;

    /// Check if the pin is currently driven high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently driven low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Source of pins, keyed by configured pin number
///
/// Claiming is the "init" step of a pin: once claimed, the pin belongs to
/// the caller for the rest of the process lifetime.
#[allow(async_fn_in_trait)]
pub trait GpioBank {
    /// Input pin type handed out by this bank
    type Input: InputPin;
    /// Output pin type handed out by this bank
    type Output: OutputPin;

    /// Claim a pin and configure it as an input
    async fn claim_input(&mut self, pin: PinId) -> Result<Self::Input, GpioError>;

    /// Claim a pin and configure it as an output
    ///
    /// The output keeps whatever level the pin currently has.
    async fn claim_output(&mut self, pin: PinId) -> Result<Self::Output, GpioError>;
}

/// Parse a pin string from config
///
/// Supports formats:
/// - "gpio17" -> 17
/// - "GPIO17" -> 17
/// - "17" -> 17
pub fn parse_pin(s: &str) -> Option<PinId> {
    let s = s.trim();

    let digits = match s.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("gpio") => &s[4..],
        _ => s,
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    digits.parse().ok().map(PinId)
}
