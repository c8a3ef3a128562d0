//! Fixed timestep driver
//!
//! Turns variable frame deltas into fixed simulation ticks on a synthetic
//! clock, so a flight replays identically regardless of frame rate.

use super::mission::Mission;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_HZ};
use crate::settings::Settings;

/// Accumulator-based fixed-step scheduler for a `Mission`
#[derive(Debug, Clone)]
pub struct FixedStepRunner {
    step_ms: f64,
    max_substeps: u32,
    accumulator_ms: f64,
    clock_ms: f64,
}

impl Default for FixedStepRunner {
    fn default() -> Self {
        Self::new(SIM_HZ, MAX_SUBSTEPS)
    }
}

impl FixedStepRunner {
    pub fn new(sim_hz: u32, max_substeps: u32) -> Self {
        Self {
            step_ms: 1000.0 / f64::from(sim_hz.max(1)),
            max_substeps: max_substeps.max(1),
            accumulator_ms: 0.0,
            clock_ms: 0.0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.sim_hz, settings.max_substeps)
    }

    /// Simulation time of the last tick (ms)
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    /// Feed one frame of `frame_dt` seconds; returns the substeps run
    pub fn advance(&mut self, mission: &mut Mission, frame_dt: f64) -> u32 {
        let dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator_ms += dt * 1000.0;

        let mut substeps = 0;
        while self.accumulator_ms >= self.step_ms && substeps < self.max_substeps {
            self.clock_ms += self.step_ms;
            mission.tick(self.clock_ms);
            self.accumulator_ms -= self.step_ms;
            substeps += 1;
        }
        substeps
    }

    /// Feed frames until the committed flight settles
    ///
    /// Returns false if it is still running after `max_frames`.
    pub fn run_until_settled(&mut self, mission: &mut Mission, frame_dt: f64, max_frames: u32) -> bool {
        for _ in 0..max_frames {
            if !mission.phase().is_running() {
                return true;
            }
            self.advance(mission, frame_dt);
        }
        !mission.phase().is_running()
    }
}
