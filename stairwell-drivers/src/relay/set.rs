//! Relay output set
//!
//! Drives one relay (two-way circuit) or two relays (four-way circuit) as a
//! single logical switch. In a four-way circuit both relays always carry
//! the same level: they are aligned at init and written together.

use embassy_futures::join::join;

use stairwell_core::{HardwareError, RelayControl, RelayWiring, Topology};
use stairwell_hal::{GpioBank, OutputPin, PinId};

/// A claimed relay output
struct Relay<P> {
    id: PinId,
    pin: P,
}

impl<P: OutputPin> Relay<P> {
    async fn claim<B>(bank: &mut B, id: PinId) -> Result<Self, HardwareError>
    where
        B: GpioBank<Output = P>,
    {
        let pin = bank
            .claim_output(id)
            .await
            .map_err(|e| HardwareError::init(id, e))?;
        Ok(Self { id, pin })
    }

    fn is_high(&self) -> bool {
        self.pin.is_set_high()
    }

    async fn write(&mut self, high: bool) -> Result<(), HardwareError> {
        let id = self.id;
        self.pin
            .set_state(high)
            .await
            .map_err(|e| HardwareError::write(id, e))
    }
}

/// Relay outputs driven as one switch
pub struct RelayOutputSet<P> {
    primary: Relay<P>,
    /// Present only in a four-way circuit
    secondary: Option<Relay<P>>,
}

impl<P: OutputPin> RelayOutputSet<P> {
    /// Claim the relay pins described by `wiring`
    ///
    /// In a four-way circuit the second relay is driven to the level of
    /// the first if they disagree, so the set starts with one status.
    pub async fn init<B>(bank: &mut B, wiring: RelayWiring) -> Result<Self, HardwareError>
    where
        B: GpioBank<Output = P>,
    {
        let primary = Relay::claim(bank, wiring.primary()).await?;

        let secondary = match wiring.secondary() {
            Some(id) => {
                let mut relay = Relay::claim(bank, id).await?;
                if relay.is_high() != primary.is_high() {
                    warn!(
                        "Relay gpio{} disagrees with gpio{}, aligning",
                        id.number(),
                        primary.id.number()
                    );
                    relay.write(primary.is_high()).await?;
                }
                Some(relay)
            }
            None => None,
        };

        let set = Self { primary, secondary };
        info!(
            "Relays ready: {}-way, status={}",
            set.topology().ways(),
            set.current_status()
        );
        Ok(set)
    }

    /// Circuit topology
    pub fn topology(&self) -> Topology {
        match self.secondary {
            Some(_) => Topology::FourWay,
            None => Topology::TwoWay,
        }
    }

    /// Commanded relay state
    pub fn current_status(&self) -> bool {
        self.primary.is_high()
    }

    /// Drive every relay to `target`
    ///
    /// Only relays not already carrying `target` are written, so the call
    /// does nothing when all of them do. In a four-way circuit both writes
    /// are issued together and the call resolves once both have completed.
    /// A pair left split by an earlier failed write is brought back in step
    /// by the next call.
    pub async fn set_status(&mut self, target: bool) -> Result<(), HardwareError> {
        let primary_due = self.primary.is_high() != target;

        match &mut self.secondary {
            None if !primary_due => {
                trace!("Relays already {}", target);
                return Ok(());
            }
            None => self.primary.write(target).await?,
            Some(secondary) => match (primary_due, secondary.is_high() != target) {
                (false, false) => {
                    trace!("Relays already {}", target);
                    return Ok(());
                }
                (true, false) => {
                    warn!("Relay gpio{} lagging, resyncing", self.primary.id.number());
                    self.primary.write(target).await?;
                }
                (false, true) => {
                    warn!("Relay gpio{} lagging, resyncing", secondary.id.number());
                    secondary.write(target).await?;
                }
                (true, true) => {
                    let (first, second) =
                        join(self.primary.write(target), secondary.write(target)).await;
                    first?;
                    second?;
                }
            },
        }

        debug!("Relays switched to {}", target);
        Ok(())
    }
}

impl<P: OutputPin> RelayControl for RelayOutputSet<P> {
    fn current_status(&self) -> bool {
        RelayOutputSet::current_status(self)
    }

    async fn set_status(&mut self, target: bool) -> Result<(), HardwareError> {
        RelayOutputSet::set_status(self, target).await
    }
}
