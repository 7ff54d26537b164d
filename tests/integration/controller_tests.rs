//! Full-loop scenarios: mock board, real controller, host-driven time base.

use garage_light::app::events::AppEvent;
use garage_light::config::{ControllerConfig, GARAGE};
use garage_light::control::relay::RelayState;
use garage_light::sensors::SensorId;

use super::mock_hw::{Rig, SleepCall};

/// One-second ticks of 250 ms, 3 s "minutes", 2 min cooldown: the relay
/// drops out 24 ticks after the last asserted sample.
const FAST: ControllerConfig = ControllerConfig {
    tick_period_ms: 250,
    ticks_per_second: 4,
    seconds_per_minute: 3,
    cooldown_minutes: 2,
    fade_interval_ticks: 1,
    fade_step: 50,
    ..GARAGE
};

fn activate_door(rig: &mut Rig) {
    rig.hw.set_door_open(true);
    assert_eq!(rig.step().relay, RelayState::Off, "first sample is not trusted");
    assert_eq!(rig.step().relay, RelayState::Active);
}

/// Steps from the last asserted sample until the relay drops out.
fn steps_to_off(rig: &mut Rig, cfg: &ControllerConfig) -> usize {
    let cooldown = cfg.ticks_per_cooldown() as usize;
    rig.run_until(cooldown + 2, |it| it.relay == RelayState::Off)
        .expect("relay must drop out within one cooldown window")
}

/// A cooldown starting mid-second may finish up to one second early.
fn assert_one_window(cfg: &ControllerConfig, steps: usize) {
    let full = cfg.ticks_per_cooldown() as usize;
    let slack = usize::from(cfg.ticks_per_second) - 1;
    assert!(
        (full - slack..=full).contains(&steps),
        "relay dropped after {steps} ticks, expected {}..={full}",
        full - slack
    );
}

// ── Shipped configuration, one real cycle ─────────────────────

#[test]
fn garage_door_cycle_end_to_end() {
    let mut rig = Rig::new(&GARAGE);
    rig.run(10);

    activate_door(&mut rig);
    let it = rig.run(500);
    assert_eq!(it.relay, RelayState::Active);
    assert_eq!(it.intensity, GARAGE.intensity_max);

    rig.hw.set_door_open(false);
    let it = rig.step();
    assert_eq!(it.relay, RelayState::Cooldown);
    let steps = 1 + steps_to_off(&mut rig, &GARAGE);
    assert_one_window(&GARAGE, steps);

    assert_eq!(rig.hw.relay_writes(), [false, true, false]);
    assert_eq!(
        rig.sink.relay_changes(),
        [
            (RelayState::Off, RelayState::Active),
            (RelayState::Active, RelayState::Cooldown),
            (RelayState::Cooldown, RelayState::Off),
        ]
    );

    let expected: Vec<u32> = (1..GARAGE.cooldown_secs()).rev().collect();
    assert_eq!(rig.sink.countdown(), expected);

    assert_eq!(
        rig.sleep.calls,
        [
            SleepCall::Arm(vec![SensorId::Door, SensorId::Motion]),
            SleepCall::Enter,
            SleepCall::Disarm,
        ]
    );
    assert_eq!(rig.sink.count(AppEvent::SleepRequested), 1);
    assert_eq!(rig.sink.count(AppEvent::Woke), 1);
    assert_eq!(rig.sink.events[0], AppEvent::Started);
    assert_eq!(rig.app.intensity(), GARAGE.intensity_min);
}

#[test]
fn idle_after_power_on_never_sleeps() {
    let mut rig = Rig::new(&GARAGE);
    let it = rig.run(2 * GARAGE.ticks_per_cooldown() as usize);
    assert_eq!(it.relay, RelayState::Off);
    assert!(!rig.app.has_activated());
    assert!(rig.sleep.calls.is_empty());
    assert_eq!(rig.hw.relay_writes(), [false]);
    assert!(rig.sink.relay_changes().is_empty());
    assert!(rig.sink.countdown().is_empty());
}

// ── Relay timing ──────────────────────────────────────────────

#[test]
fn holding_door_open_keeps_light_on() {
    let mut rig = Rig::new(&FAST);
    activate_door(&mut rig);
    let left_active = rig.run_until(FAST.ticks_per_cooldown() as usize * 10, |it| {
        it.relay != RelayState::Active
    });
    assert_eq!(left_active, None);
    assert_eq!(rig.hw.relay_writes(), [false, true]);
    assert!(rig.sleep.calls.is_empty());
}

#[test]
fn motion_takes_over_from_door() {
    let mut rig = Rig::new(&FAST);
    activate_door(&mut rig);

    rig.hw.set_motion(true);
    rig.run(2);
    rig.hw.set_door_open(false);
    let it = rig.run(FAST.ticks_per_cooldown() as usize * 2);
    assert_eq!(it.relay, RelayState::Active);

    rig.hw.set_motion(false);
    assert_eq!(rig.step().relay, RelayState::Cooldown);
    let steps = 1 + steps_to_off(&mut rig, &FAST);
    assert_one_window(&FAST, steps);
}

#[test]
fn reassert_during_cooldown_restarts_window() {
    let mut rig = Rig::new(&FAST);
    activate_door(&mut rig);
    rig.hw.set_door_open(false);
    rig.run(10);
    assert_eq!(rig.app.relay_state(), RelayState::Cooldown);

    activate_door_from_cooldown(&mut rig);
    rig.hw.set_door_open(false);
    assert_eq!(rig.step().relay, RelayState::Cooldown);
    let steps = 1 + steps_to_off(&mut rig, &FAST);
    assert_one_window(&FAST, steps);

    assert_eq!(rig.hw.relay_writes(), [false, true, true, false]);
}

fn activate_door_from_cooldown(rig: &mut Rig) {
    rig.hw.set_door_open(true);
    assert_eq!(rig.step().relay, RelayState::Cooldown);
    assert_eq!(rig.step().relay, RelayState::Active);
}

#[test]
fn stale_delay_flag_is_discarded_on_rearm() {
    let mut rig = Rig::new(&FAST);
    activate_door(&mut rig);

    // A long stall: the delay flag is raised while the door is still open.
    rig.timing.advance(FAST.ticks_per_cooldown() * 3);
    assert_eq!(rig.iterate().relay, RelayState::Active);

    rig.hw.set_door_open(false);
    assert_eq!(rig.step().relay, RelayState::Cooldown);
    assert_eq!(rig.hw.relay_writes(), [false, true]);
}

#[test]
fn bouncing_contact_does_not_switch_relay() {
    let mut rig = Rig::new(&FAST);
    for _ in 0..20 {
        rig.hw.set_door_open(true);
        rig.step();
        rig.hw.set_door_open(false);
        rig.step();
    }
    assert_eq!(rig.app.relay_state(), RelayState::Off);
    assert_eq!(rig.hw.relay_writes(), [false]);
}

// ── Countdown diagnostics ─────────────────────────────────────

#[test]
fn countdown_reports_each_second_of_cooldown() {
    let mut rig = Rig::new(&FAST);
    activate_door(&mut rig);
    rig.run(5);
    assert!(rig.sink.countdown().is_empty(), "no countdown while active");

    rig.hw.set_door_open(false);
    rig.step();
    steps_to_off(&mut rig, &FAST);
    assert_eq!(rig.sink.countdown(), [5, 4, 3, 2, 1]);
}

// ── Indicator fade ────────────────────────────────────────────

#[test]
fn indicator_ramps_up_and_back_down() {
    let mut rig = Rig::new(&FAST);
    rig.hw.set_motion(true);
    let it = rig.run(6);
    assert_eq!(it.intensity, 200);

    rig.hw.set_motion(false);
    let it = rig.run(6);
    assert_eq!(it.intensity, 0);

    assert_eq!(
        rig.hw.intensity_writes(),
        [0, 50, 100, 150, 200, 150, 100, 50, 0]
    );
}

#[test]
fn shipped_fade_reaches_full_scale_in_fifty_fade_ticks() {
    let mut rig = Rig::new(&GARAGE);
    activate_door(&mut rig);
    rig.run(300);
    let writes = rig.hw.intensity_writes();
    let ramp: Vec<u8> = (1..=50).map(|i| i * 4).collect();
    assert_eq!(&writes[1..], &ramp[..]);
}

// ── Sleep policy ──────────────────────────────────────────────

#[test]
fn every_activation_earns_one_sleep() {
    let mut rig = Rig::new(&FAST);
    for round in 1..=3 {
        activate_door_from_off(&mut rig);
        rig.hw.set_door_open(false);
        rig.step();
        let it_slept = rig.run_until(FAST.ticks_per_cooldown() as usize + 2, |it| it.slept);
        assert!(it_slept.is_some());
        assert_eq!(rig.sleep.sleeps(), round);

        rig.run(FAST.ticks_per_cooldown() as usize * 2);
        assert_eq!(rig.sleep.sleeps(), round, "no sleep without a new activation");
    }
    assert_eq!(rig.app.sleep_count(), 3);
}

fn activate_door_from_off(rig: &mut Rig) {
    assert_eq!(rig.app.relay_state(), RelayState::Off);
    activate_door(rig);
}

#[test]
fn sleep_disabled_keeps_running() {
    let cfg = ControllerConfig {
        sleep_enabled: false,
        ..FAST
    };
    let mut rig = Rig::new(&cfg);
    activate_door(&mut rig);
    rig.hw.set_door_open(false);
    rig.step();
    steps_to_off(&mut rig, &cfg);

    assert!(rig.sleep.calls.is_empty());
    assert_eq!(rig.sink.count(AppEvent::SleepRequested), 0);
    assert_eq!(rig.app.relay_state(), RelayState::Off);
}
