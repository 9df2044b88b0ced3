//! Reconciliation between the switch sensor and the relays
//!
//! The sensor tells us whether the light is on; the relays are one of the
//! places it can be switched from. The [`Reconciler`] answers ability calls
//! from those two readings:
//!
//! - `switch` reads the sensor (with polarity applied) and drives the
//!   relays only when the sensor disagrees with the request
//! - `relaysSwitch` reads and drives the relays directly, bypassing the
//!   sensor, so an operator can bring them back in step after a desync
//!
//! There is no stored state beyond the two readings. The same readings and
//! request always produce the same decision.
//!
//! The two action paths are not locked against each other. If a `switch`
//! action and a `relaysSwitch` action race, the last write to complete
//! wins.

use crate::ability::{Ability, AbilityCall, AbilityReply, SWITCH_EVENT};
use crate::config::Polarity;
use crate::error::{Error, HostError};
use crate::traits::{EventSink, RelayControl, SensorStatus};

/// What the `switch` action should do with the relays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RelayCommand {
    /// Logical state already matches, leave the relays alone
    Hold,
    /// Drive the relays to the given state
    Drive(bool),
}

/// Decide whether a `switch` request needs a relay write
pub const fn decide(current: bool, target: bool) -> RelayCommand {
    if current == target {
        RelayCommand::Hold
    } else {
        RelayCommand::Drive(target)
    }
}

/// Reconciliation core
///
/// Owns the relay outputs and reads the sensor through `S`, which is
/// usually a shared reference to the input monitor's state.
pub struct Reconciler<S, R> {
    sensor: S,
    relays: R,
    polarity: Polarity,
}

impl<S: SensorStatus, R: RelayControl> Reconciler<S, R> {
    /// Wire a sensor and relay set together
    pub fn new(sensor: S, relays: R, polarity: Polarity) -> Self {
        Self {
            sensor,
            relays,
            polarity,
        }
    }

    /// Sensor polarity in use
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Relay outputs
    pub fn relays(&self) -> &R {
        &self.relays
    }

    /// Logical switch state: the sensor reading with polarity applied
    pub fn logical_sensor_state(&self) -> bool {
        self.polarity.apply(self.sensor.current_status())
    }

    /// Logical relay state (no polarity on the relay side)
    pub fn logical_relay_state(&self) -> bool {
        self.relays.current_status()
    }

    /// `switch` state query
    pub fn switch_state(&self) -> bool {
        self.logical_sensor_state()
    }

    /// `switch` action
    ///
    /// Writes the relays only if the logical sensor state differs from
    /// `target`. Returns once the write, if any, has completed.
    pub async fn switch_action(&mut self, target: bool) -> Result<RelayCommand, Error> {
        let command = decide(self.logical_sensor_state(), target);

        if let RelayCommand::Drive(level) = command {
            self.relays.set_status(level).await?;
        }

        Ok(command)
    }

    /// `relaysSwitch` state query
    pub fn relays_state(&self) -> bool {
        self.relays.current_status()
    }

    /// `relaysSwitch` action
    ///
    /// Hands `target` to the relay set as-is; the only idempotence check is
    /// the relay set's own.
    pub async fn relays_action(&mut self, target: bool) -> Result<(), Error> {
        self.relays.set_status(target).await?;
        Ok(())
    }

    /// Logical value to publish for a stabilized raw sensor transition
    pub fn transition_value(&self, raw: bool) -> bool {
        self.polarity.apply(raw)
    }

    /// Publish a stabilized sensor transition as a `switch` event
    ///
    /// Never touches the relays.
    pub fn on_transition<E: EventSink + ?Sized>(
        &self,
        raw: bool,
        sink: &mut E,
    ) -> Result<bool, HostError> {
        let value = self.transition_value(raw);
        sink.emit(SWITCH_EVENT, value)?;
        Ok(value)
    }

    /// Dispatch an ability call
    pub async fn call(&mut self, call: AbilityCall) -> Result<AbilityReply, Error> {
        match call {
            AbilityCall::State(Ability::Switch) => Ok(AbilityReply::State(self.switch_state())),
            AbilityCall::State(Ability::RelaysSwitch) => {
                Ok(AbilityReply::State(self.relays_state()))
            }
            AbilityCall::Action(Ability::Switch, target) => {
                self.switch_action(target).await?;
                Ok(AbilityReply::Done)
            }
            AbilityCall::Action(Ability::RelaysSwitch, target) => {
                self.relays_action(target).await?;
                Ok(AbilityReply::Done)
            }
        }
    }
}
