// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Line tracking control loop.
//!
//! [`LineTracker`] owns the sensor array, the drive motors, the telemetry transport and the time
//! source for the whole run, and moves through four phases:
//!
//! ```text
//! Initializing -> Calibrating -> Tracking -> Stopped
//! ```
//!
//! Each [`step`](LineTracker::step) while tracking reads the sensors, estimates the line position,
//! steers, advances the run clock and lets the reporter decide whether a record is due. Once none
//! of the central sensors sees the line the motors are stopped, a final record is sent and the
//! tracker stays in `Stopped` for good.
//!
//! Typical usage pattern:
//!
//! ```ignore
//! let mut tracker = LineTracker::new(sensors, motors, serial, clock, TrackerConfig::default())?;
//! let summary = tracker.run(&mut battery)?;
//! ```

pub mod clock;

pub use clock::{Monotonic, RunClock};

use crate::config::TrackerConfig;
use crate::control::{calibration_spin, compute_speeds, Estimate, PositionEstimator};
use crate::error::Error;
use crate::motors::{DriveMotors, MotorCommand};
use crate::sensors::{BatteryMonitor, LineSensors, SensorReading};
use crate::telemetry::{header, LineWriter, TelemetryReporter};

/// Control loop phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Header not yet written.
    Initializing,

    /// Header written, sensor calibration sweep not yet run.
    Calibrating,

    /// Following the line.
    Tracking,

    /// Line lost, motors stopped. Terminal.
    Stopped,
}

/// Counters collected over one run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RunSummary {
    /// Tracking iterations executed.
    pub cycles: u32,

    /// Iterations whose central sensors summed to zero.
    pub degenerate_cycles: u32,

    /// Telemetry records written, including the initial and final ones.
    pub records_sent: u32,

    /// Run time from the start of tracking to the stop.
    pub elapsed_ms: u32,
}

pub struct LineTracker<S, M, W, C> {
    sensors: S,
    motors: M,
    out: W,
    clock: C,

    config: TrackerConfig,
    estimator: PositionEstimator,
    reporter: TelemetryReporter,

    phase: Phase,
    run_clock: RunClock,
    last_tick_ms: u32,
    last_reading: SensorReading,
    last_estimate: Estimate,
    summary: RunSummary,
}

impl<S, M, W, C> LineTracker<S, M, W, C>
where
    S: LineSensors,
    M: DriveMotors,
    W: LineWriter,
    C: Monotonic,
{
    /// Take ownership of the adapters. Fails if `config` does not validate.
    pub fn new(sensors: S, motors: M, out: W, clock: C, config: TrackerConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            sensors,
            motors,
            out,
            clock,
            config,
            estimator: PositionEstimator::from_config(&config),
            reporter: TelemetryReporter::from_config(&config),
            phase: Phase::Initializing,
            run_clock: RunClock::start(config.transmit_interval_ms),
            last_tick_ms: 0,
            last_reading: SensorReading::ZERO,
            last_estimate: Estimate::CENTERED,
            summary: RunSummary::default(),
        })
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    #[inline]
    pub fn run_clock(&self) -> &RunClock {
        &self.run_clock
    }

    /// Estimate from the most recent tracking step.
    #[inline]
    pub fn last_estimate(&self) -> Estimate {
        self.last_estimate
    }

    /// Reading from the most recent tracking step.
    #[inline]
    pub fn last_reading(&self) -> SensorReading {
        self.last_reading
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            elapsed_ms: self.run_clock.elapsed_ms(),
            ..self.summary
        }
    }

    fn expect(&self, expected: Phase) -> Result<(), Error> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(Error::Phase {
                expected,
                found: self.phase,
            })
        }
    }

    fn enter(&mut self, phase: Phase) {
        debug!("phase {} -> {}", self.phase, phase);
        self.phase = phase;
    }

    /// Write the header block and an initial all-zero record.
    pub fn initialize<B: BatteryMonitor>(&mut self, battery: &mut B) -> Result<(), Error> {
        self.expect(Phase::Initializing)?;

        let volts = battery.battery_volts()?;
        info!("battery {} V", volts);
        header::write_header(&mut self.out, volts)?;
        self.report(true)?;

        self.enter(Phase::Calibrating);
        Ok(())
    }

    /// Spin over the line while the sensors calibrate, then launch straight ahead and start the
    /// run clock.
    pub fn calibrate(&mut self) -> Result<(), Error> {
        self.expect(Phase::Calibrating)?;

        let samples = self.sensors.calibration_samples();
        self.sensors.begin_calibration();
        for i in 0..samples {
            let spin = calibration_spin(i, samples, self.config.calibration_speed);
            self.motors.apply(spin)?;
            self.sensors.calibration_step()?;
        }
        self.sensors.finish_calibration()?;
        info!("calibration done after {} samples", samples);

        self.motors.apply(MotorCommand::straight(self.config.max_speed))?;
        self.run_clock = RunClock::start(self.config.transmit_interval_ms);
        self.last_tick_ms = self.clock.now_ms();

        self.enter(Phase::Tracking);
        Ok(())
    }

    /// Run one read, estimate, steer, report iteration.
    ///
    /// Returns the phase after the step. Once `Stopped`, further calls do nothing.
    pub fn step(&mut self) -> Result<Phase, Error> {
        if self.phase == Phase::Stopped {
            return Ok(Phase::Stopped);
        }
        self.expect(Phase::Tracking)?;

        let reading = self.sensors.read_all()?;
        let estimate = self.estimator.estimate(&reading);
        let command = compute_speeds(estimate.position, self.config.max_speed);
        self.motors.apply(command)?;

        let now = self.clock.now_ms();
        let delta_ms = now.wrapping_sub(self.last_tick_ms);
        self.last_tick_ms = now;
        self.run_clock.advance(delta_ms);

        self.last_reading = reading;
        self.last_estimate = estimate;
        self.summary.cycles = self.summary.cycles.saturating_add(1);
        if estimate.degenerate {
            self.summary.degenerate_cycles = self.summary.degenerate_cycles.saturating_add(1);
        }

        self.report(false)?;

        if !estimate.on_track {
            self.stop()?;
        }
        Ok(self.phase)
    }

    /// Drive every phase to completion.
    ///
    /// On an adapter failure the motors are stopped (best effort) before the error is returned.
    pub fn run<B: BatteryMonitor>(&mut self, battery: &mut B) -> Result<RunSummary, Error> {
        self.initialize(battery)?;
        if let Err(err) = self.calibrate() {
            return Err(self.abort(err));
        }

        loop {
            match self.step() {
                Ok(Phase::Stopped) => return Ok(self.summary()),
                Ok(_) => {}
                Err(err) => return Err(self.abort(err)),
            }
        }
    }

    /// Tear down the tracker and return its adapters.
    pub fn release(self) -> (S, M, W, C) {
        (self.sensors, self.motors, self.out, self.clock)
    }

    fn report(&mut self, force: bool) -> Result<(), Error> {
        let sent = self.reporter.maybe_report(
            &mut self.run_clock,
            self.last_estimate.position,
            &self.last_reading,
            force,
            &mut self.out,
        )?;
        if sent {
            self.summary.records_sent = self.summary.records_sent.saturating_add(1);
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Error> {
        self.motors.stop()?;
        self.report(true)?;
        info!(
            "line lost after {} ms, {} cycles",
            self.run_clock.elapsed_ms(),
            self.summary.cycles
        );
        self.enter(Phase::Stopped);
        Ok(())
    }

    fn abort(&mut self, err: Error) -> Error {
        warn!("aborting: {}", err);
        if self.motors.stop().is_err() {
            warn!("motor stop failed while aborting");
        }
        err
    }
}
