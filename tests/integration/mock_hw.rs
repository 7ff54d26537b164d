//! Mock adapters for integration tests.
//!
//! Records every actuator, sleep and event call so tests can assert on the
//! full history without touching GPIO/LEDC registers. [`Rig`] wires them to
//! a real [`GarageController`] and a host-side [`SharedTimeBase`] that the
//! test advances by hand in place of the tick timer.

use garage_light::app::events::AppEvent;
use garage_light::app::ports::{ActuatorPort, EventSink, SensorPort, SleepPort};
use garage_light::app::service::{GarageController, Iteration};
use garage_light::config::ControllerConfig;
use garage_light::control::relay::RelayState;
use garage_light::sensors::SensorId;
use garage_light::timebase::SharedTimeBase;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    SetRelay(bool),
    SetIntensity(u8),
}

// ── MockHardware ──────────────────────────────────────────────

/// Raw input levels set by the test, plus a log of output commands.
pub struct MockHardware {
    pub door: bool,
    pub motion: bool,
    door_idle: bool,
    motion_idle: bool,
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockHardware {
    /// Both lines at their idle level.
    pub fn idle(cfg: &ControllerConfig) -> Self {
        Self {
            door: cfg.door_idle_level(),
            motion: cfg.motion_idle_level(),
            door_idle: cfg.door_idle_level(),
            motion_idle: cfg.motion_idle_level(),
            calls: Vec::new(),
        }
    }

    pub fn set_door_open(&mut self, open: bool) {
        self.door = if open { !self.door_idle } else { self.door_idle };
    }

    pub fn set_motion(&mut self, moving: bool) {
        self.motion = if moving { !self.motion_idle } else { self.motion_idle };
    }

    pub fn relay_writes(&self) -> Vec<bool> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ActuatorCall::SetRelay(on) => Some(*on),
                ActuatorCall::SetIntensity(_) => None,
            })
            .collect()
    }

    pub fn intensity_writes(&self) -> Vec<u8> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ActuatorCall::SetIntensity(level) => Some(*level),
                ActuatorCall::SetRelay(_) => None,
            })
            .collect()
    }

    pub fn relay_on(&self) -> bool {
        self.relay_writes().last().copied().unwrap_or(false)
    }
}

impl SensorPort for MockHardware {
    fn read_raw(&mut self, sensor: SensorId) -> bool {
        match sensor {
            SensorId::Door => self.door,
            SensorId::Motion => self.motion,
        }
    }
}

impl ActuatorPort for MockHardware {
    fn set_relay(&mut self, on: bool) {
        self.calls.push(ActuatorCall::SetRelay(on));
    }

    fn set_intensity(&mut self, level: u8) {
        self.calls.push(ActuatorCall::SetIntensity(level));
    }
}

// ── MockSleep ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SleepCall {
    Arm(Vec<SensorId>),
    Enter,
    Disarm,
}

#[derive(Default)]
pub struct MockSleep {
    pub calls: Vec<SleepCall>,
}

#[allow(dead_code)]
impl MockSleep {
    pub fn sleeps(&self) -> usize {
        self.calls.iter().filter(|c| **c == SleepCall::Enter).count()
    }
}

impl SleepPort for MockSleep {
    fn arm_wake_on_edge(&mut self, sensors: &[SensorId]) {
        self.calls.push(SleepCall::Arm(sensors.to_vec()));
    }

    fn enter_low_power(&mut self) {
        self.calls.push(SleepCall::Enter);
    }

    fn disarm(&mut self) {
        self.calls.push(SleepCall::Disarm);
    }
}

// ── RecordingSink ────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn relay_changes(&self) -> Vec<(RelayState, RelayState)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::RelayChanged { from, to } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    pub fn countdown(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::CooldownRemaining(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, event: AppEvent) -> usize {
        self.events.iter().filter(|e| **e == event).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}

// ── Rig ───────────────────────────────────────────────────────

/// Controller plus mocks. Each [`step`](Rig::step) is one hardware tick
/// followed by one main-loop iteration.
pub struct Rig {
    pub app: GarageController,
    pub hw: MockHardware,
    pub timing: SharedTimeBase,
    pub sleep: MockSleep,
    pub sink: RecordingSink,
}

#[allow(dead_code)]
impl Rig {
    pub fn new(cfg: &ControllerConfig) -> Self {
        assert_eq!(cfg.validate(), Ok(()), "test config must be valid");
        let mut rig = Self {
            app: GarageController::new(cfg),
            hw: MockHardware::idle(cfg),
            timing: SharedTimeBase::new(cfg),
            sleep: MockSleep::default(),
            sink: RecordingSink::default(),
        };
        rig.app.start(&mut rig.hw, &mut rig.sink);
        rig
    }

    pub fn step(&mut self) -> Iteration {
        self.timing.on_tick();
        self.iterate()
    }

    /// One main-loop iteration without a tick.
    pub fn iterate(&mut self) -> Iteration {
        self.app
            .run_once(&mut self.hw, &self.timing, &mut self.sleep, &mut self.sink)
    }

    /// `steps` ticks and iterations (at least one); returns the last.
    pub fn run(&mut self, steps: usize) -> Iteration {
        let mut last = self.step();
        for _ in 1..steps {
            last = self.step();
        }
        last
    }

    /// Step until `done` holds; returns the number of steps taken.
    pub fn run_until(&mut self, max: usize, mut done: impl FnMut(&Iteration) -> bool) -> Option<usize> {
        (1..=max).find(|_| {
            let it = self.step();
            done(&it)
        })
    }
}
