//! Debounced switch sensor monitor
//!
//! The monitor is split in two:
//!
//! - [`MonitorState`] is the shared half. It holds the last stabilized
//!   level and the listener registry, and is what the reconciliation core
//!   reads through [`SensorStatus`].
//! - [`DebouncedInput`] owns the pin and the timer. Its loop waits for a
//!   raw edge, keeps restarting the debounce window while edges arrive,
//!   then samples the pin once and publishes the level if it changed.
//!
//! The initial level is read at init and stored without notifying
//! anybody. Listeners only ever see transitions that happened after they
//! subscribed.

use core::sync::atomic::{AtomicBool, Ordering};

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::pubsub::{PubSubChannel, Subscriber};
use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;

use stairwell_core::{Debouncer, HardwareError, SensorStatus};
use stairwell_hal::{GpioBank, InputPin, PinId};

/// Transitions buffered per listener before the oldest is dropped
pub const TRANSITION_QUEUE_SIZE: usize = 4;

/// Maximum number of simultaneous transition listeners
pub const MAX_LISTENERS: usize = 4;

type TransitionChannel<M> = PubSubChannel<M, bool, TRANSITION_QUEUE_SIZE, MAX_LISTENERS, 1>;

/// Receiver of stabilized sensor transitions
///
/// Each message is the new raw level, without polarity applied.
pub type TransitionListener<'a, M> =
    Subscriber<'a, M, bool, TRANSITION_QUEUE_SIZE, MAX_LISTENERS, 1>;

/// Errors from the listener registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MonitorError {
    /// All listener slots are taken
    TooManyListeners,
}

/// Shared state of the sensor monitor
///
/// Usually lives in a `static` so the input task and the ability handler
/// can both borrow it for `'static`.
pub struct MonitorState<M: RawMutex> {
    status: AtomicBool,
    transitions: TransitionChannel<M>,
}

impl<M: RawMutex> MonitorState<M> {
    /// Create an empty state, reading low until the input is initialized
    pub const fn new() -> Self {
        Self {
            status: AtomicBool::new(false),
            transitions: PubSubChannel::new(),
        }
    }

    /// Last stabilized raw level
    pub fn current_status(&self) -> bool {
        self.status.load(Ordering::Acquire)
    }

    /// Register a listener for stabilized transitions
    ///
    /// Dropping the returned listener frees its slot.
    pub fn on_change(&self) -> Result<TransitionListener<'_, M>, MonitorError> {
        self.transitions
            .subscriber()
            .map_err(|_| MonitorError::TooManyListeners)
    }

    /// Store a level without notifying listeners
    fn store(&self, level: bool) {
        self.status.store(level, Ordering::Release);
    }

    /// Store a new stable level and notify every listener
    fn publish(&self, level: bool) {
        self.store(level);
        self.transitions.immediate_publisher().publish_immediate(level);
    }
}

impl<M: RawMutex> Default for MonitorState<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex> SensorStatus for MonitorState<M> {
    fn current_status(&self) -> bool {
        MonitorState::current_status(self)
    }
}

/// Debounced input on the switch sensor pin
pub struct DebouncedInput<'a, P, D, M: RawMutex> {
    pin: P,
    pin_id: PinId,
    delay: D,
    window: Duration,
    debouncer: Debouncer,
    state: &'a MonitorState<M>,
}

impl<'a, P, D, M> DebouncedInput<'a, P, D, M>
where
    P: InputPin,
    D: DelayNs,
    M: RawMutex,
{
    /// Claim the sensor pin and read its initial level
    ///
    /// The level is stored in `state` as the initial stable value.
    /// Listeners are not notified.
    pub async fn init<B>(
        bank: &mut B,
        pin_id: PinId,
        delay: D,
        window: Duration,
        state: &'a MonitorState<M>,
    ) -> Result<Self, HardwareError>
    where
        B: GpioBank<Input = P>,
    {
        let mut pin = bank
            .claim_input(pin_id)
            .await
            .map_err(|e| HardwareError::init(pin_id, e))?;
        let level = pin.is_high().map_err(|e| HardwareError::read(pin_id, e))?;

        state.store(level);
        info!(
            "Sensor on gpio{} ready, level={}, debounce={}ms",
            pin_id.number(),
            level,
            window.as_millis()
        );

        Ok(Self {
            pin,
            pin_id,
            delay,
            window,
            debouncer: Debouncer::new(level),
            state,
        })
    }

    /// Sensor pin
    pub fn pin_id(&self) -> PinId {
        self.pin_id
    }

    /// Last stabilized raw level
    pub fn current_status(&self) -> bool {
        self.debouncer.stable()
    }

    /// Shared state this input publishes to
    pub fn state(&self) -> &'a MonitorState<M> {
        self.state
    }

    /// Wait for the next burst of edges to settle
    ///
    /// Returns `Some(level)` if the settled level differs from the previous
    /// stable level (listeners have been notified by then), or `None` if
    /// the burst was a glitch.
    ///
    /// A pin that already reads differently from the stable level counts
    /// as a pending edge, so a change that slipped in between two calls is
    /// not lost.
    pub async fn next_transition(&mut self) -> Result<Option<bool>, HardwareError> {
        let pin_id = self.pin_id;
        let window_ms = u32::try_from(self.window.as_millis()).unwrap_or(u32::MAX);

        let level = self
            .pin
            .is_high()
            .map_err(|e| HardwareError::read(pin_id, e))?;
        if level == self.debouncer.stable() {
            self.pin
                .wait_for_any_edge()
                .await
                .map_err(|e| HardwareError::read(pin_id, e))?;
        }
        self.debouncer.on_edge();

        // Every edge restarts the window
        loop {
            match select(self.pin.wait_for_any_edge(), self.delay.delay_ms(window_ms)).await {
                Either::First(edge) => {
                    edge.map_err(|e| HardwareError::read(pin_id, e))?;
                    self.debouncer.on_edge();
                }
                Either::Second(()) => break,
            }
        }

        let edges = self.debouncer.pending_edges();
        let level = self
            .pin
            .is_high()
            .map_err(|e| HardwareError::read(pin_id, e))?;

        match self.debouncer.settle(level) {
            Some(stable) => {
                debug!(
                    "Sensor gpio{} settled at {} after {} edges",
                    pin_id.number(),
                    stable,
                    edges
                );
                self.state.publish(stable);
                Ok(Some(stable))
            }
            None => {
                trace!("Sensor gpio{} glitch ignored ({} edges)", pin_id.number(), edges);
                Ok(None)
            }
        }
    }

    /// Monitor the pin until a read fails
    pub async fn run(&mut self) -> HardwareError {
        loop {
            if let Err(e) = self.next_transition().await {
                error!("Sensor gpio{} read failed: {:?}", self.pin_id.number(), e);
                return e;
            }
        }
    }
}
