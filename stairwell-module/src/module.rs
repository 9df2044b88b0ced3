//! Module startup and ability dispatch
//!
//! [`start`] brings the controller up in a fixed order:
//!
//! 1. Resolve configuration (a bad configuration fails before any pin is
//!    touched)
//! 2. Claim the sensor input and read its initial level
//! 3. Claim the relay outputs
//! 4. Wire the reconciliation core and subscribe to sensor transitions
//! 5. Register the abilities and start the host module
//!
//! After that the board runs the returned input monitor and
//! [`RelaySwitch`] side by side, usually through [`serve`].
//!
//! `RelaySwitch` handles one thing at a time: either forwarding a sensor
//! transition or serving an ability call to completion. Two actions never
//! interleave, so racing `switch` and `relaysSwitch` calls resolve in
//! arrival order.

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;

use stairwell_core::{
    AbilityCall, Error, HostError, ModuleConfig, Reconciler, ABILITIES,
};
use stairwell_drivers::{DebouncedInput, MonitorState, RelayOutputSet, TransitionListener};
use stairwell_hal::{GpioBank, InputPin, OutputPin};

use crate::host::ModuleHost;

/// Reconciliation core as wired by [`start`]
pub type SwitchCore<'a, P, M> = Reconciler<&'a MonitorState<M>, RelayOutputSet<P>>;

/// Bring the controller up
///
/// `state` must outlive both returned halves; boards keep it in a
/// `static`. On error nothing has been registered with the host, but any
/// pins claimed so far stay claimed.
#[allow(clippy::type_complexity)]
pub async fn start<'a, H, B, D, M>(
    mut host: H,
    bank: &mut B,
    delay: D,
    state: &'a MonitorState<M>,
) -> Result<
    (
        DebouncedInput<'a, B::Input, D, M>,
        RelaySwitch<'a, H, B::Output, M>,
    ),
    Error,
>
where
    H: ModuleHost,
    B: GpioBank,
    D: DelayNs,
    M: RawMutex,
{
    let config = match ModuleConfig::from_source(host.config()) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {:?}", e);
            return Err(e.into());
        }
    };
    info!(
        "Config: sensor=gpio{}, reverse={}, debounce={}ms, {}-way",
        config.sensor_gpio.number(),
        config.polarity.reverse,
        config.debounce.as_millis(),
        config.topology().ways()
    );

    let input =
        DebouncedInput::init(bank, config.sensor_gpio, delay, config.debounce, state).await?;
    let relays = RelayOutputSet::init(bank, config.relays).await?;
    let core = Reconciler::new(state, relays, config.polarity);

    let transitions = state.on_change().map_err(|_| Error::NoListenerSlot)?;

    host.register(&ABILITIES)?;
    host.start().await?;
    info!("Module started");

    Ok((
        input,
        RelaySwitch {
            host,
            core,
            transitions,
        },
    ))
}

/// Run the input monitor and the ability handler until either stops
///
/// Returns `Ok(())` when the host shuts the module down, or the first
/// error from either side.
pub async fn serve<'a, H, P, O, D, M>(
    input: &mut DebouncedInput<'a, P, D, M>,
    switch: &mut RelaySwitch<'a, H, O, M>,
) -> Result<(), Error>
where
    H: ModuleHost,
    P: InputPin,
    O: OutputPin,
    D: DelayNs,
    M: RawMutex,
{
    match select(input.run(), switch.run()).await {
        Either::First(e) => Err(e.into()),
        Either::Second(result) => result,
    }
}

/// Running controller: serves ability calls and publishes sensor events
pub struct RelaySwitch<'a, H, P, M: RawMutex> {
    host: H,
    core: SwitchCore<'a, P, M>,
    transitions: TransitionListener<'a, M>,
}

impl<'a, H, P, M> RelaySwitch<'a, H, P, M>
where
    H: ModuleHost,
    P: OutputPin,
    M: RawMutex,
{
    /// Host binding
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Reconciliation core
    pub fn core(&self) -> &SwitchCore<'a, P, M> {
        &self.core
    }

    /// Serve one ability call and deliver its outcome to the host
    ///
    /// A failed action is not an error here: the failure is handed to the
    /// host as the call's result. Only a failed reply is.
    pub async fn handle(&mut self, call: AbilityCall) -> Result<(), HostError> {
        let result = self.core.call(call).await;
        if let Err(e) = &result {
            warn!("{:?} failed: {:?}", call, e);
        }
        self.host.reply(call, result).await
    }

    /// Publish a stabilized raw sensor level as a `switch` event
    pub fn forward(&mut self, raw: bool) -> Result<bool, HostError> {
        let value = self.core.on_transition(raw, &mut self.host)?;
        debug!("Switch event: {}", value);
        Ok(value)
    }

    /// Publish every transition already queued, returning how many
    pub fn forward_pending(&mut self) -> Result<usize, HostError> {
        let mut forwarded = 0;
        while let Some(raw) = self.transitions.try_next_message_pure() {
            self.forward(raw)?;
            forwarded += 1;
        }
        Ok(forwarded)
    }

    /// Serve calls and forward transitions until the host shuts down
    pub async fn run(&mut self) -> Result<(), Error> {
        loop {
            let next = select(self.transitions.next_message_pure(), self.host.next_call()).await;
            match next {
                Either::First(raw) => {
                    self.forward(raw)?;
                }
                Either::Second(Some(call)) => self.handle(call).await?,
                Either::Second(None) => {
                    info!("Host closed the module");
                    return Ok(());
                }
            }
        }
    }
}
