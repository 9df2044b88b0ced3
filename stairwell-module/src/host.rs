//! Host framework contract

use stairwell_core::config::ConfigSource;
use stairwell_core::{AbilityCall, AbilityDescriptor, AbilityReply, Error, EventSink, HostError};

/// Binding to the host module framework
///
/// Events go out through the [`EventSink`] supertrait.
#[allow(async_fn_in_trait)]
pub trait ModuleHost: EventSink {
    /// Configuration source for this module
    type Config: ConfigSource;

    /// Module configuration, resolved by the host before start
    fn config(&self) -> &Self::Config;

    /// Register the module's abilities
    fn register(&mut self, abilities: &'static [AbilityDescriptor]) -> Result<(), HostError>;

    /// Tell the host the module is ready
    async fn start(&mut self) -> Result<(), HostError>;

    /// Wait for the next ability call
    ///
    /// Returns `None` once the host shuts the module down. Must be
    /// cancel-safe: the dispatch loop drops this future whenever a sensor
    /// transition arrives first, so a call may only be taken off the host's
    /// queue in the final poll (a single `Channel::receive` is fine).
    async fn next_call(&mut self) -> Option<AbilityCall>;

    /// Deliver the outcome of an ability call
    async fn reply(
        &mut self,
        call: AbilityCall,
        result: Result<AbilityReply, Error>,
    ) -> Result<(), HostError>;
}
