/// Steps beyond this many per frame are dropped rather than simulated.
pub const MAX_STEPS_PER_FRAME: u32 = 8;

/// Fixed-timestep driver: turns variable frame deltas into a whole number
/// of simulation ticks at a constant interval.
#[derive(Debug, Clone)]
pub struct FixedStepClock {
    interval: f32,
    accumulator: f32,
    tick: u64,
}

impl FixedStepClock {
    /// Clock ticking at `tick_rate` Hz. Non-positive rates fall back to 60 Hz.
    pub fn new(tick_rate: f32) -> Self {
        let rate = if tick_rate.is_finite() && tick_rate > 0.0 {
            tick_rate
        } else {
            tracing::warn!(tick_rate, "Invalid tick rate, using 60 Hz");
            60.0
        };
        Self {
            interval: 1.0 / rate,
            accumulator: 0.0,
            tick: 0,
        }
    }

    /// Seconds per tick.
    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Ticks produced since creation.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Feed a frame delta and return how many ticks are due.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulator += frame_dt;
        }

        let mut steps = 0;
        while self.accumulator >= self.interval {
            if steps == MAX_STEPS_PER_FRAME {
                tracing::debug!(
                    dropped_secs = self.accumulator,
                    "Simulation falling behind, dropping backlog"
                );
                self.accumulator = 0.0;
                break;
            }
            self.accumulator -= self.interval;
            steps += 1;
        }
        self.tick += u64::from(steps);
        steps
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.tick = 0;
    }
}
