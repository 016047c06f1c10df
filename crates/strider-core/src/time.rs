//! Fixed-timestep clock
//!
//! Accumulates rendered-frame time and hands out whole simulation steps, so
//! per-tick logic always runs with the same dt regardless of frame rate.

use serde::{Deserialize, Serialize};

/// Configuration for the fixed-step clock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeConfig {
    /// Fixed timestep for simulation (in seconds)
    pub fixed_timestep: f32,
    /// Maximum delta time to prevent spiral of death
    pub max_delta_time: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            fixed_timestep: 1.0 / 60.0,
            max_delta_time: 0.25,
        }
    }
}

/// Frame-time accumulator producing fixed simulation steps
#[derive(Debug, Clone)]
pub struct FixedClock {
    /// Configuration
    pub config: TimeConfig,
    /// Simulated time since start in seconds
    pub total_time: f64,
    /// Frame counter
    pub frame_count: u64,
    /// Accumulated time not yet consumed by fixed steps
    accumulator: f32,
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new(TimeConfig::default())
    }
}

impl FixedClock {
    /// Create a clock with the given config
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            total_time: 0.0,
            frame_count: 0,
            accumulator: 0.0,
        }
    }

    /// Feed the raw delta from the previous rendered frame
    pub fn advance(&mut self, raw_dt: f32) {
        let dt = raw_dt.min(self.config.max_delta_time).max(0.0);
        self.total_time += dt as f64;
        self.accumulator += dt;
        self.frame_count += 1;
    }

    /// Take the number of fixed steps to simulate this frame
    pub fn drain_steps(&mut self) -> u32 {
        let mut steps = 0;
        while self.accumulator >= self.config.fixed_timestep {
            self.accumulator -= self.config.fixed_timestep;
            steps += 1;
        }
        steps
    }

    /// Interpolation factor for rendering between simulation steps
    pub fn interpolation(&self) -> f32 {
        self.accumulator / self.config.fixed_timestep
    }
}
