//! Collaborator traits
//!
//! These traits define the interface between the reconciliation logic and
//! the components that own hardware or talk to the host framework.

use crate::error::{HardwareError, HostError};

/// Stabilized reading of the switch sensor
pub trait SensorStatus {
    /// Last debounce-stabilized raw level, without polarity applied
    fn current_status(&self) -> bool;
}

/// Relay outputs driven as one logical switch
#[allow(async_fn_in_trait)]
pub trait RelayControl {
    /// Commanded state of the relays
    fn current_status(&self) -> bool;

    /// Drive the relays to `target`
    ///
    /// Must be a no-op when every relay already carries `target`, and must
    /// not resolve until every physical write has completed.
    async fn set_status(&mut self, target: bool) -> Result<(), HardwareError>;
}

/// Outbound event publication on the host event bus
pub trait EventSink {
    /// Publish `value` under the event name `event`
    fn emit(&mut self, event: &'static str, value: bool) -> Result<(), HostError>;
}

impl<T: SensorStatus + ?Sized> SensorStatus for &T {
    fn current_status(&self) -> bool {
        (**self).current_status()
    }
}
