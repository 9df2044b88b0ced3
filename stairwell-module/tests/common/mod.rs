//! Mock host and GPIO bank shared by the module tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal_async::delay::DelayNs;
use stairwell_core::config::KeyValueConfig;
use stairwell_core::{
    AbilityCall, AbilityDescriptor, AbilityReply, Error, EventSink, HostError,
};
use stairwell_hal::{GpioBank, GpioError, InputPin, OutputPin, PinId, PinRegistry};
use stairwell_module::ModuleHost;

/// Host that replays queued calls and records everything the module does
pub struct MockHost {
    pub config: KeyValueConfig<'static>,
    pub registered: Option<&'static [AbilityDescriptor]>,
    pub started: bool,
    pub calls: VecDeque<AbilityCall>,
    pub replies: Vec<(AbilityCall, Result<AbilityReply, Error>)>,
    pub events: Vec<(&'static str, bool)>,
    pub refuse_register: bool,
}

impl MockHost {
    pub fn new(config: &'static str) -> Self {
        Self {
            config: KeyValueConfig::new(config),
            registered: None,
            started: false,
            calls: VecDeque::new(),
            replies: Vec::new(),
            events: Vec::new(),
            refuse_register: false,
        }
    }
}

impl EventSink for MockHost {
    fn emit(&mut self, event: &'static str, value: bool) -> Result<(), HostError> {
        self.events.push((event, value));
        Ok(())
    }
}

impl ModuleHost for MockHost {
    type Config = KeyValueConfig<'static>;

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn register(&mut self, abilities: &'static [AbilityDescriptor]) -> Result<(), HostError> {
        if self.refuse_register {
            return Err(HostError::Register);
        }
        self.registered = Some(abilities);
        Ok(())
    }

    async fn start(&mut self) -> Result<(), HostError> {
        self.started = true;
        Ok(())
    }

    async fn next_call(&mut self) -> Option<AbilityCall> {
        self.calls.pop_front()
    }

    async fn reply(
        &mut self,
        call: AbilityCall,
        result: Result<AbilityReply, Error>,
    ) -> Result<(), HostError> {
        self.replies.push((call, result));
        Ok(())
    }
}

/// One step of a scripted sensor
#[derive(Debug, Clone, Copy)]
pub enum Step {
    /// Edge to the given level
    Edge(bool),
    /// No edge for longer than the debounce window
    Quiet,
}

/// Relay writes as `(pin, level)`, in issue order
pub type WriteLog = Rc<RefCell<Vec<(PinId, bool)>>>;

pub struct MockInput {
    level: bool,
    script: &'static [Step],
    pos: usize,
}

impl InputPin for MockInput {
    fn is_high(&mut self) -> Result<bool, GpioError> {
        Ok(self.level)
    }

    async fn wait_for_any_edge(&mut self) -> Result<(), GpioError> {
        let step = self.script.get(self.pos).copied();
        self.pos += 1;
        match step {
            Some(Step::Edge(level)) => {
                self.level = level;
                Ok(())
            }
            Some(Step::Quiet) | None => core::future::pending().await,
        }
    }
}

pub struct MockOutput {
    id: PinId,
    high: bool,
    writes: WriteLog,
}

impl OutputPin for MockOutput {
    async fn set_state(&mut self, high: bool) -> Result<(), GpioError> {
        self.high = high;
        self.writes.borrow_mut().push((self.id, high));
        Ok(())
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Bank of 30 pins with preset levels
pub struct MockBank {
    pub registry: PinRegistry,
    /// Every claim, in order
    pub claims: Vec<PinId>,
    pub levels: [bool; 30],
    /// Edges the sensor input will see
    pub script: &'static [Step],
    pub writes: WriteLog,
}

impl MockBank {
    pub fn new() -> Self {
        Self {
            registry: PinRegistry::new(30),
            claims: Vec::new(),
            levels: [false; 30],
            script: &[],
            writes: WriteLog::default(),
        }
    }

    pub fn with_level(mut self, pin: u8, level: bool) -> Self {
        self.levels[pin as usize] = level;
        self
    }

    pub fn with_script(mut self, script: &'static [Step]) -> Self {
        self.script = script;
        self
    }

    pub fn writes(&self) -> Vec<(PinId, bool)> {
        self.writes.borrow().clone()
    }

    fn claim(&mut self, pin: PinId) -> Result<bool, GpioError> {
        self.registry.claim(pin)?;
        self.claims.push(pin);
        Ok(self.levels[pin.number() as usize])
    }
}

impl GpioBank for MockBank {
    type Input = MockInput;
    type Output = MockOutput;

    async fn claim_input(&mut self, pin: PinId) -> Result<MockInput, GpioError> {
        let level = self.claim(pin)?;
        Ok(MockInput {
            level,
            script: self.script,
            pos: 0,
        })
    }

    async fn claim_output(&mut self, pin: PinId) -> Result<MockOutput, GpioError> {
        let high = self.claim(pin)?;
        Ok(MockOutput {
            id: pin,
            high,
            writes: self.writes.clone(),
        })
    }
}

/// Delay whose window has always already elapsed
pub struct NoDelay;

impl DelayNs for NoDelay {
    async fn delay_ns(&mut self, _ns: u32) {}
}
