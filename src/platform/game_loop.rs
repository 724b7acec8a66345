//! Loop running state and fixed-step frame pacing

use crate::consts::MAX_SUBSTEPS;

/// Whether the level's tick loop is live
///
/// `generation` counts starts so a host can tell a restarted loop apart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameLoop {
    running: bool,
    generation: u32,
}

impl GameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.running = true;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Stop ticking; calling it again does nothing
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// Accumulates wall-clock time into whole fixed ticks
#[derive(Debug, Clone)]
pub struct FrameClock {
    dt: f32,
    accumulator: f32,
    max_substeps: u32,
}

impl FrameClock {
    pub fn new(tick_rate_hz: u32) -> Self {
        Self {
            dt: 1.0 / tick_rate_hz.max(1) as f32,
            accumulator: 0.0,
            max_substeps: MAX_SUBSTEPS,
        }
    }

    /// Fixed step in seconds
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Feed elapsed frame time; returns how many ticks to run now
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        // Clamp long frames (tab switch, debugger) to avoid a catch-up burst
        self.accumulator += elapsed.clamp(0.0, 0.1);

        let mut substeps = 0;
        while self.accumulator >= self.dt && substeps < self.max_substeps {
            self.accumulator -= self.dt;
            substeps += 1;
        }
        substeps
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
