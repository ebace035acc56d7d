//! Integration tests for shift-stepper library.
//!
//! These tests drive the full path from configuration to wire traffic,
//! observing the serial lines through shared recording pins and
//! embedded-hal-mock transaction pins.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use embedded_hal::digital::OutputPin;
use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::digital::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};
use proptest::prelude::*;

use shift_stepper::{
    parse_config, DriveMode, RadPerSec, RevPerMin, ShiftBus, StepClock, StepperChainBuilder,
    MAX_MOTORS,
};

// =============================================================================
// Test doubles
// =============================================================================

/// Output pin that records every level written, shared across clones.
#[derive(Clone, Default)]
struct SharedPin {
    levels: Rc<RefCell<Vec<bool>>>,
}

impl SharedPin {
    fn new() -> Self {
        Self::default()
    }

    /// Number of writes that drove the line high.
    fn highs(&self) -> usize {
        self.levels.borrow().iter().filter(|&&level| level).count()
    }

    fn writes(&self) -> Vec<bool> {
        self.levels.borrow().clone()
    }
}

impl embedded_hal::digital::ErrorType for SharedPin {
    type Error = core::convert::Infallible;
}

impl OutputPin for SharedPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.levels.borrow_mut().push(true);
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.levels.borrow_mut().push(false);
        Ok(())
    }
}

/// Microsecond clock that jumps a full interval per poll, so the speed
/// gate never spins the test suite.
fn fast_clock() -> impl StepClock {
    let now = Cell::new(0u64);
    move || {
        now.set(now.get() + 100_000);
        now.get()
    }
}

struct Lines {
    data: SharedPin,
    clock: SharedPin,
    latch: SharedPin,
}

fn recorded_chain(
    count: u16,
) -> (
    shift_stepper::StepperChain<SharedPin, SharedPin, SharedPin, NoopDelay, impl StepClock>,
    Lines,
) {
    let lines = Lines {
        data: SharedPin::new(),
        clock: SharedPin::new(),
        latch: SharedPin::new(),
    };

    let chain = StepperChainBuilder::new()
        .data_pin(lines.data.clone())
        .clock_pin(lines.clock.clone())
        .latch_pin(lines.latch.clone())
        .delay(NoopDelay)
        .clock(fast_clock())
        .motor_count(count)
        .steps_per_revolution(200)
        .build()
        .expect("chain should build");

    (chain, lines)
}

// =============================================================================
// Wire-level contract: bit order and clock edges
// =============================================================================

#[test]
fn shift_out_clocks_low_bits_lsb_first() {
    // 0b0101 over 4 lines: data follows bits 0..3, clock toggles low-high
    // per bit and ends high.
    let data = PinMock::new(&[
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
    ]);
    let clock = PinMock::new(&[
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
    ]);
    let latch = PinMock::new(&[]);

    let mut data_handle = data.clone();
    let mut clock_handle = clock.clone();
    let mut latch_handle = latch.clone();

    let mut bus = ShiftBus::new(data, clock, latch, 4);
    bus.shift_out(0b0101).unwrap();

    data_handle.done();
    clock_handle.done();
    latch_handle.done();
}

#[test]
fn shift_out_honours_bits_per_frame() {
    // Only the two low bits go out on a 2-line frame.
    let data = PinMock::new(&[
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::High),
    ]);
    let clock = PinMock::new(&[
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
    ]);
    let latch = PinMock::new(&[]);

    let mut data_handle = data.clone();
    let mut clock_handle = clock.clone();
    let mut latch_handle = latch.clone();

    let mut bus = ShiftBus::new(data, clock, latch, 2);
    bus.shift_out(0b1111_1111).unwrap();

    data_handle.done();
    clock_handle.done();
    latch_handle.done();
}

#[test]
fn single_step_frame_on_the_wire() {
    // One motor, full-step mode. After one forward step the counter is 1,
    // phase pattern 0b0110: data Low, High, High, Low. The latch drops at
    // build time, opens for the frame, then pulses high-low to commit.
    let data = PinMock::new(&[
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
    ]);
    let clock = PinMock::new(&[
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
    ]);
    let latch = PinMock::new(&[
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
    ]);

    let mut data_handle = data.clone();
    let mut clock_handle = clock.clone();
    let mut latch_handle = latch.clone();

    let mut chain = StepperChainBuilder::new()
        .data_pin(data)
        .clock_pin(clock)
        .latch_pin(latch)
        .delay(NoopDelay)
        .clock(fast_clock())
        .motor_count(1)
        .steps_per_revolution(200)
        .build()
        .unwrap();

    chain.move_one(0, 1).unwrap();

    data_handle.done();
    clock_handle.done();
    latch_handle.done();
}

// =============================================================================
// Broadcast accounting: latch pulses and truncated frames
// =============================================================================

#[test]
fn one_latch_pulse_per_round() {
    let (mut chain, lines) = recorded_chain(3);

    // Max delta magnitude is 3, so three rounds, three commits.
    chain.move_many(&[3, -2, 0]).unwrap();
    assert_eq!(lines.latch.highs(), 3);
    assert_eq!(chain.positions(), &[3, -2, 0]);
}

#[test]
fn move_one_retransmits_the_whole_chain() {
    let (mut chain, lines) = recorded_chain(4);

    // A single-motor step is a full-length frame: 4 motors x 4 bits.
    chain.move_one(0, 1).unwrap();
    assert_eq!(lines.clock.highs(), 16);
    // One data-line write per bit shifted.
    assert_eq!(lines.data.writes().len(), 16);
}

#[test]
fn coordinated_moves_truncate_idle_tail_motors() {
    let (mut chain, lines) = recorded_chain(4);

    // Highest touched index is 1, so each round ships frames for motors
    // 1 and 0 only: 2 frames x 4 bits x 1 round.
    chain.move_many(&[1, 1, 0, 0]).unwrap();
    assert_eq!(lines.clock.highs(), 8);
    assert_eq!(lines.latch.highs(), 1);
}

#[test]
fn homing_rounds_match_farthest_motor() {
    let (mut chain, lines) = recorded_chain(2);

    chain.move_many(&[2, -3]).unwrap();
    let commits_before_home = lines.latch.highs();

    chain.home().unwrap();
    assert_eq!(chain.positions(), &[0, 0]);
    // Farthest counter is 3 steps out: three homing rounds.
    assert_eq!(lines.latch.highs() - commits_before_home, 3);
}

// =============================================================================
// Motion controller edge policy
// =============================================================================

#[test]
fn out_of_range_index_completes_without_traffic() {
    let (mut chain, lines) = recorded_chain(2);
    let commits_at_build = lines.latch.highs();

    chain.move_one(2, 1000).unwrap();
    assert_eq!(chain.positions(), &[0, 0]);
    assert_eq!(lines.latch.highs(), commits_at_build);
}

#[test]
fn oversized_delta_list_is_truncated() {
    let (mut chain, _lines) = recorded_chain(2);

    chain.move_many(&[5, -5, 7, 9]).unwrap();
    assert_eq!(chain.positions(), &[5, -5]);
}

#[test]
fn resize_discards_positions_and_survives_failure() {
    let (mut chain, _lines) = recorded_chain(3);

    chain.move_many(&[1, 2, 3]).unwrap();
    chain.resize_motors(6).unwrap();
    assert_eq!(chain.motor_count(), 6);
    assert!(chain.positions().iter().all(|&c| c == 0));

    chain.move_one(0, 4).unwrap();
    assert!(chain.resize_motors(MAX_MOTORS + 1).is_err());
    assert_eq!(chain.motor_count(), 6);
    assert_eq!(chain.position(0), Some(4));
}

// =============================================================================
// Optional lines
// =============================================================================

#[test]
fn wired_enable_line_follows_commands() {
    let enable = SharedPin::new();

    let mut chain = StepperChainBuilder::new()
        .data_pin(SharedPin::new())
        .clock_pin(SharedPin::new())
        .latch_pin(SharedPin::new())
        .enable_pin(enable.clone())
        .delay(NoopDelay)
        .clock(fast_clock())
        .motor_count(1)
        .steps_per_revolution(200)
        .build()
        .unwrap();

    // Build settles the line low (outputs powered).
    assert_eq!(enable.writes(), vec![false]);

    assert!(chain.disable().unwrap());
    assert!(chain.enable().unwrap());
    assert_eq!(enable.writes(), vec![false, true, false]);
}

#[test]
fn wired_clear_line_pulses_low() {
    let clear = SharedPin::new();

    let mut chain = StepperChainBuilder::new()
        .data_pin(SharedPin::new())
        .clock_pin(SharedPin::new())
        .latch_pin(SharedPin::new())
        .clear_pin(clear.clone())
        .delay(NoopDelay)
        .clock(fast_clock())
        .motor_count(1)
        .steps_per_revolution(200)
        .build()
        .unwrap();

    // Idle high at build, then a low-high pulse per clear().
    assert!(chain.clear().unwrap());
    assert_eq!(clear.writes(), vec![true, false, true]);
}

#[test]
fn unwired_lines_report_unsupported() {
    let (mut chain, _lines) = recorded_chain(1);
    assert!(!chain.enable().unwrap());
    assert!(!chain.disable().unwrap());
    assert!(!chain.clear().unwrap());
}

// =============================================================================
// Configuration workflow
// =============================================================================

const FULL_CONFIG: &str = r#"
[chain]
name = "marquee"
bits_per_motor = 4

[motors]
count = 24
steps_per_revolution = 2048
drive_mode = "half_step"
speed_rev_per_min = 12
"#;

#[test]
fn config_driven_chain_matches_file() {
    let config = parse_config(FULL_CONFIG).expect("config should parse");

    let chain = StepperChainBuilder::new()
        .data_pin(SharedPin::new())
        .clock_pin(SharedPin::new())
        .latch_pin(SharedPin::new())
        .delay(NoopDelay)
        .clock(fast_clock())
        .from_config(&config)
        .build()
        .expect("chain should build from config");

    assert_eq!(chain.name(), "marquee");
    assert_eq!(chain.motor_count(), 24);
    assert_eq!(chain.drive_mode(), DriveMode::HalfStep);
    // 60_000_000 / (2048 * 12)
    assert_eq!(chain.step_interval().as_micros(), 2441);
}

#[test]
fn speed_units_share_the_step_basis() {
    let (mut chain, _lines) = recorded_chain(1);

    chain.set_speed_rev_per_min(RevPerMin(60));
    assert_eq!(chain.step_interval().as_micros(), 5000);

    // One revolution per second, expressed in radians.
    chain.set_speed_rad_per_sec(RadPerSec(core::f32::consts::TAU));
    assert_eq!(chain.step_interval().as_micros(), 5000);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn home_returns_any_configuration_to_zero(
        starts in proptest::collection::vec(-40i32..40, 1..6)
    ) {
        let (mut chain, lines) = recorded_chain(starts.len() as u16);

        chain.move_many(&starts).unwrap();
        prop_assert_eq!(chain.positions(), starts.as_slice());

        let commits_before_home = lines.latch.highs();
        chain.home().unwrap();

        prop_assert!(chain.positions().iter().all(|&c| c == 0));

        // One round per step of the farthest motor.
        let rounds = starts.iter().map(|d| d.unsigned_abs()).max().unwrap_or(0) as usize;
        prop_assert_eq!(lines.latch.highs() - commits_before_home, rounds);
    }

    #[test]
    fn move_one_is_exact_for_any_delta(delta in -60i32..60) {
        let (mut chain, _lines) = recorded_chain(3);

        chain.move_one(1, delta).unwrap();
        prop_assert_eq!(chain.positions(), &[0, delta, 0]);
    }
}
