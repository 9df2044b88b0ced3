//! Adapters from `embedded-hal` pins
//!
//! Most chip HALs (embassy-rp, embassy-stm32, esp-hal, linux-embedded-hal)
//! implement the `embedded-hal` 1.0 digital traits. These wrappers let such
//! pins be handed out by a [`GpioBank`](crate::GpioBank) without any
//! chip-specific glue.

use embedded_hal::digital::{InputPin as EhInputPin, OutputPin as EhOutputPin, PinState};
use embedded_hal_async::digital::Wait;

use crate::gpio::{GpioError, InputPin, OutputPin};

/// Input pin backed by an `embedded-hal` input with async edge waiting
pub struct EhInput<P> {
    pin: P,
}

impl<P> EhInput<P>
where
    P: EhInputPin + Wait,
{
    /// Wrap an `embedded-hal` input pin
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Release the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P> InputPin for EhInput<P>
where
    P: EhInputPin + Wait,
{
    fn is_high(&mut self) -> Result<bool, GpioError> {
        self.pin.is_high().map_err(|_| GpioError::Read)
    }

    async fn wait_for_any_edge(&mut self) -> Result<(), GpioError> {
        self.pin.wait_for_any_edge().await.map_err(|_| GpioError::Read)
    }
}

/// Output pin backed by an `embedded-hal` output
///
/// Remembers the last level it drove, since plain `embedded-hal` outputs
/// cannot be read back without `&mut` access.
pub struct EhOutput<P> {
    pin: P,
    high: bool,
}

impl<P: EhOutputPin> EhOutput<P> {
    /// Wrap an `embedded-hal` output pin, driving it to `initial`
    pub fn new(mut pin: P, initial: bool) -> Result<Self, GpioError> {
        pin.set_state(PinState::from(initial))
            .map_err(|_| GpioError::Write)?;
        Ok(Self { pin, high: initial })
    }

    /// Release the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: EhOutputPin> OutputPin for EhOutput<P> {
    async fn set_state(&mut self, high: bool) -> Result<(), GpioError> {
        self.pin
            .set_state(PinState::from(high))
            .map_err(|_| GpioError::Write)?;
        self.high = high;
        Ok(())
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embassy_futures::block_on;
    use embedded_hal::digital::{ErrorKind, ErrorType};

    /// Mock `embedded-hal` input that flips level on every awaited edge
    struct MockInput {
        high: bool,
    }

    impl ErrorType for MockInput {
        type Error = Infallible;
    }

    impl EhInputPin for MockInput {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.high)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.high)
        }
    }

    impl Wait for MockInput {
        async fn wait_for_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            Ok(())
        }

        async fn wait_for_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            Ok(())
        }

        async fn wait_for_rising_edge(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            Ok(())
        }

        async fn wait_for_falling_edge(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            Ok(())
        }

        async fn wait_for_any_edge(&mut self) -> Result<(), Self::Error> {
            self.high = !self.high;
            Ok(())
        }
    }

    /// Mock `embedded-hal` output that can be told to fail
    struct MockOutput {
        high: bool,
        broken: bool,
    }

    impl ErrorType for MockOutput {
        type Error = ErrorKind;
    }

    impl EhOutputPin for MockOutput {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            if self.broken {
                return Err(ErrorKind::Other);
            }
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            if self.broken {
                return Err(ErrorKind::Other);
            }
            self.high = true;
            Ok(())
        }
    }

    #[test]
    fn test_input_adapter() {
        let mut input = EhInput::new(MockInput { high: false });

        assert_eq!(input.is_high(), Ok(false));
        block_on(input.wait_for_any_edge()).unwrap();
        assert_eq!(input.is_high(), Ok(true));
    }

    #[test]
    fn test_output_adapter_drives_initial_level() {
        let output = EhOutput::new(
            MockOutput {
                high: false,
                broken: false,
            },
            true,
        )
        .unwrap();

        assert!(output.is_set_high());
        assert!(output.into_inner().high);
    }

    #[test]
    fn test_output_adapter_set_state() {
        let mut output = EhOutput::new(
            MockOutput {
                high: false,
                broken: false,
            },
            false,
        )
        .unwrap();

        block_on(output.set_state(true)).unwrap();
        assert!(output.is_set_high());

        block_on(output.set_state(false)).unwrap();
        assert!(output.is_set_low());
    }

    #[test]
    fn test_output_adapter_write_failure_keeps_level() {
        let mut output = EhOutput::new(
            MockOutput {
                high: false,
                broken: false,
            },
            false,
        )
        .unwrap();
        output.pin.broken = true;

        assert_eq!(block_on(output.set_state(true)), Err(GpioError::Write));
        assert!(output.is_set_low());
    }
}
