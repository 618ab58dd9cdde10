//! End-to-end runs of the control loop against scripted adapters.

use std::cell::Cell;
use std::collections::VecDeque;

use embedded_hal::blocking::delay::DelayMs;

use linedancer::config::LinePolarity;
use linedancer::motors::{DriveMotors, MotorCommand};
use linedancer::sensors::{BatteryMonitor, LineSensors, ReflectanceArray, SensorReading};
use linedancer::telemetry::LineWriter;
use linedancer::tracker::Monotonic;
use linedancer::{Error, LineTracker, Phase, RunSummary, TrackerConfig};

const HEADER_LINES: usize = 9;
const SWEEP_SAMPLES: u16 = 8;

/// Plays back a fixed list of readings, then reports an all-dark array.
#[derive(Default)]
struct ScriptedSensors {
    readings: VecDeque<[u16; 5]>,
    sweep_samples: u16,
    calibration_steps: usize,
    calibrations: usize,
    fail_reads: bool,
}

impl ScriptedSensors {
    fn new(readings: &[[u16; 5]]) -> Self {
        Self {
            readings: readings.iter().copied().collect(),
            sweep_samples: SWEEP_SAMPLES,
            ..Self::default()
        }
    }
}

impl LineSensors for ScriptedSensors {
    fn calibration_samples(&self) -> u16 {
        self.sweep_samples
    }

    fn begin_calibration(&mut self) {
        self.calibration_steps = 0;
    }

    fn calibration_step(&mut self) -> Result<(), Error> {
        self.calibration_steps += 1;
        Ok(())
    }

    fn finish_calibration(&mut self) -> Result<(), Error> {
        self.calibrations += 1;
        Ok(())
    }

    fn read_all(&mut self) -> Result<SensorReading, Error> {
        if self.fail_reads {
            return Err(Error::Sensor);
        }
        Ok(self
            .readings
            .pop_front()
            .map(SensorReading::new)
            .unwrap_or(SensorReading::ZERO))
    }
}

#[derive(Default)]
struct RecordingMotors {
    commands: Vec<MotorCommand>,
    stops: usize,
}

impl RecordingMotors {
    fn last(&self) -> MotorCommand {
        *self.commands.last().expect("no motor command")
    }
}

impl DriveMotors for RecordingMotors {
    fn set_speeds(&mut self, left: f32, right: f32) -> Result<(), Error> {
        self.commands.push(MotorCommand::new(left, right));
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Error> {
        self.stops += 1;
        self.set_speeds(0.0, 0.0)
    }
}

#[derive(Default)]
struct Lines(Vec<String>);

impl LineWriter for Lines {
    fn write_line(&mut self, line: &str) -> Result<(), Error> {
        self.0.push(line.to_string());
        Ok(())
    }
}

/// Advances by a fixed step on every read.
struct StepClock {
    now: u32,
    step: u32,
}

impl Monotonic for StepClock {
    fn now_ms(&mut self) -> u32 {
        let now = self.now;
        self.now = self.now.wrapping_add(self.step);
        now
    }
}

struct NoDelay;

impl DelayMs<u32> for NoDelay {
    fn delay_ms(&mut self, _ms: u32) {}
}

struct FixedBattery(f32);

impl BatteryMonitor for FixedBattery {
    fn battery_volts(&mut self) -> Result<f32, Error> {
        Ok(self.0)
    }
}

type Tracker = LineTracker<ScriptedSensors, RecordingMotors, Lines, StepClock>;

fn tracker(readings: &[[u16; 5]], step_ms: u32, config: TrackerConfig) -> Tracker {
    LineTracker::new(
        ScriptedSensors::new(readings),
        RecordingMotors::default(),
        Lines::default(),
        StepClock {
            now: 0,
            step: step_ms,
        },
        config,
    )
    .unwrap()
}

/// Initialized and calibrated, ready for the first step.
fn tracking(readings: &[[u16; 5]], step_ms: u32, config: TrackerConfig) -> Tracker {
    let mut t = tracker(readings, step_ms, config);
    t.initialize(&mut FixedBattery(4.8)).unwrap();
    t.calibrate().unwrap();
    assert_eq!(t.phase(), Phase::Tracking);
    t
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn centered_line_drives_straight() {
    let config = TrackerConfig::default().with_max_speed(0.2);
    let mut t = tracking(&[[0, 800, 800, 800, 0]], 10, config);

    assert_eq!(t.step().unwrap(), Phase::Tracking);
    assert_eq!(t.last_estimate().position, 0.0);

    let (_, motors, _, _) = t.release();
    assert_eq!(motors.last(), MotorCommand::new(0.2, 0.2));
}

#[test]
fn line_right_of_center_slows_the_left_wheel() {
    let config = TrackerConfig::default().with_max_speed(0.2);
    let mut t = tracking(&[[0, 200, 500, 900, 0]], 10, config);

    assert_eq!(t.step().unwrap(), Phase::Tracking);
    assert!(close(t.last_estimate().position, 0.4375));

    let (_, motors, _, _) = t.release();
    let cmd = motors.last();
    assert_eq!(cmd.right, 0.2);
    assert!(close(cmd.left, 0.1125), "{:?}", cmd);
}

#[test]
fn losing_the_line_stops_with_one_final_record() {
    let mut t = tracking(&[], 10, TrackerConfig::default());
    assert_eq!(t.summary().records_sent, 1);

    assert_eq!(t.step().unwrap(), Phase::Stopped);
    assert_eq!(t.summary().records_sent, 2);

    let (_, motors, out, _) = t.release();
    assert_eq!(motors.stops, 1);
    assert_eq!(motors.last(), MotorCommand::STOP);

    // Header, initial record, final record.
    assert_eq!(out.0.len(), HEADER_LINES + 2);
    assert_eq!(
        out.0.last().unwrap(),
        "|     0.01|     0.00|     0|     0|     0|     0|     0|"
    );
}

#[test]
fn stopped_is_terminal() {
    let mut t = tracking(&[], 10, TrackerConfig::default());
    assert_eq!(t.step().unwrap(), Phase::Stopped);
    assert_eq!(t.step().unwrap(), Phase::Stopped);
    assert_eq!(t.step().unwrap(), Phase::Stopped);

    let summary = t.summary();
    assert_eq!(summary.cycles, 1);
    assert_eq!(summary.records_sent, 2);

    let (_, motors, out, _) = t.release();
    assert_eq!(motors.stops, 1);
    assert_eq!(out.0.len(), HEADER_LINES + 2);
}

#[test]
fn full_run_reports_at_the_configured_cadence() {
    let centered = [0, 800, 800, 800, 0];
    let mut t = tracker(&[centered; 10], 20, TrackerConfig::default());

    let summary = t.run(&mut FixedBattery(4.8765)).unwrap();
    assert_eq!(
        summary,
        RunSummary {
            cycles: 11,
            degenerate_cycles: 1,
            // initial, three periodic (60, 120, 180 ms), final
            records_sent: 5,
            elapsed_ms: 220,
        }
    );
    assert_eq!(t.phase(), Phase::Stopped);

    let (sensors, motors, out, _) = t.release();
    assert_eq!(sensors.calibrations, 1);

    // Calibration spin, launch straight ahead, one command per cycle, then the stop.
    let sweep = SWEEP_SAMPLES as usize;
    assert_eq!(motors.commands.len(), sweep + 1 + 11 + 1);
    assert_eq!(motors.commands[sweep], MotorCommand::straight(0.3));
    assert_eq!(motors.last(), MotorCommand::STOP);

    let lines = &out.0;
    assert_eq!(lines.len(), HEADER_LINES + 5);
    assert_eq!(lines[0], "Pololu Line-Dancer");
    assert_eq!(lines[1], "Battery voltage: 4.877");
    assert_eq!(
        lines[HEADER_LINES],
        "|     0.00|     0.00|     0|     0|     0|     0|     0|"
    );
    assert_eq!(
        lines[HEADER_LINES + 1],
        "|     0.06|     0.00|     0|   800|   800|   800|     0|"
    );
    assert_eq!(
        lines[HEADER_LINES + 4],
        "|     0.22|     0.00|     0|     0|     0|     0|     0|"
    );
}

#[test]
fn phases_must_run_in_order() {
    let mut t = tracker(&[], 10, TrackerConfig::default());

    assert_eq!(
        t.calibrate(),
        Err(Error::Phase {
            expected: Phase::Calibrating,
            found: Phase::Initializing,
        })
    );
    assert_eq!(
        t.step(),
        Err(Error::Phase {
            expected: Phase::Tracking,
            found: Phase::Initializing,
        })
    );

    t.initialize(&mut FixedBattery(5.0)).unwrap();
    assert_eq!(
        t.initialize(&mut FixedBattery(5.0)),
        Err(Error::Phase {
            expected: Phase::Initializing,
            found: Phase::Calibrating,
        })
    );
}

#[test]
fn invalid_config_is_rejected() {
    let result = LineTracker::new(
        ScriptedSensors::default(),
        RecordingMotors::default(),
        Lines::default(),
        StepClock { now: 0, step: 1 },
        TrackerConfig::default().with_transmit_interval_ms(0),
    );
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn sensor_failure_aborts_and_stops_the_motors() {
    let mut t = tracker(&[], 10, TrackerConfig::default());
    t.initialize(&mut FixedBattery(4.8)).unwrap();
    t.calibrate().unwrap();

    let (mut sensors, motors, out, clock) = t.release();
    sensors.fail_reads = true;
    let mut t = LineTracker::new(sensors, motors, out, clock, TrackerConfig::default()).unwrap();

    assert_eq!(t.run(&mut FixedBattery(4.8)), Err(Error::Sensor));
    let (_, motors, _, _) = t.release();
    assert_eq!(motors.stops, 1);
}

#[test]
fn degenerate_reading_keeps_tracking_straight() {
    // On a light line every sensor reading 0 still sees the line, but there is nothing to divide.
    let config = TrackerConfig::default().with_polarity(LinePolarity::LightLine);
    let mut t = tracking(&[[0, 0, 0, 0, 0]], 10, config);

    assert_eq!(t.step().unwrap(), Phase::Tracking);
    let estimate = t.last_estimate();
    assert!(estimate.on_track);
    assert!(estimate.degenerate);
    assert_eq!(estimate.position, 0.0);
    assert_eq!(t.summary().degenerate_cycles, 1);

    let (_, motors, _, _) = t.release();
    assert_eq!(motors.last(), MotorCommand::straight(0.3));
}

#[test]
fn wrapping_time_source_yields_small_deltas() {
    let mut t = LineTracker::new(
        ScriptedSensors::new(&[[0, 800, 800, 800, 0]]),
        RecordingMotors::default(),
        Lines::default(),
        StepClock {
            now: u32::MAX - 5,
            step: 10,
        },
        TrackerConfig::default(),
    )
    .unwrap();
    t.initialize(&mut FixedBattery(4.8)).unwrap();
    t.calibrate().unwrap();

    t.step().unwrap();
    assert_eq!(t.run_clock().elapsed_ms(), 10);
}

#[test]
fn calibration_spins_over_the_line_before_launch() {
    let config = TrackerConfig::default().with_calibration_speed(0.25);
    let mut t = tracking(&[], 10, config);
    assert_eq!(t.summary().cycles, 0);

    let (sensors, motors, _, _) = t.release();
    assert_eq!(sensors.calibration_steps, SWEEP_SAMPLES as usize);
    assert_eq!(sensors.calibrations, 1);

    let right = MotorCommand::new(0.25, -0.25);
    let left = MotorCommand::new(-0.25, 0.25);
    assert_eq!(
        motors.commands,
        [
            right,
            right,
            left,
            left,
            left,
            left,
            right,
            right,
            MotorCommand::straight(0.3),
        ]
    );
}

#[test]
fn still_robot_over_the_floor_calibrates_and_stops_cleanly() {
    // A stationary array only records ADC jitter; that must neither abort the run nor read as line.
    let n = Cell::new(0u16);
    let sensors = ReflectanceArray::new(
        |_: usize| {
            n.set(n.get().wrapping_add(1));
            298 + n.get() % 5
        },
        NoDelay,
    );

    let mut t = LineTracker::new(
        sensors,
        RecordingMotors::default(),
        Lines::default(),
        StepClock { now: 0, step: 10 },
        TrackerConfig::default(),
    )
    .unwrap();

    let summary = t.run(&mut FixedBattery(4.8)).unwrap();
    assert_eq!(summary.cycles, 1);
    assert_eq!(t.phase(), Phase::Stopped);
    assert!(!t.last_estimate().on_track);
    assert!(t.last_reading().values().iter().all(|&v| v < 100));

    let (_, motors, _, _) = t.release();
    assert_eq!(motors.stops, 1);
}
