//! Frame timing

use std::time::Instant;

/// Where the per-frame time step comes from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepMode {
    /// Measure wall-clock time between ticks
    RealTime,
    /// Report the same step every tick (headless runs, tests)
    Fixed(f32),
}

/// Frame clock producing the Δt handed to the episode each frame
pub struct FrameClock {
    mode: StepMode,
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(StepMode::RealTime)
    }
}

impl FrameClock {
    /// Create a new clock
    pub fn new(mode: StepMode) -> Self {
        Self {
            mode,
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Advance to the next frame and return its time step in seconds
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.delta_time = match self.mode {
            StepMode::RealTime => now.duration_since(self.last_frame).as_secs_f32(),
            StepMode::Fixed(step) => step,
        };
        self.last_frame = now;
        self.total_time += self.delta_time;
        self.frame_count += 1;
        self.delta_time
    }

    /// Time step of the most recent frame
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Accumulated simulated time
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Number of ticks so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Average frames per simulated second
    #[allow(clippy::cast_precision_loss)]
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}
