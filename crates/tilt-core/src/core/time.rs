/// Fixed timestep accumulator.
/// Turns variable frame deltas into a whole number of fixed simulation
/// steps so the physics step size never varies.
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps
    /// to run. Capped at 10 steps per frame to avoid the spiral of death
    /// after a long stall.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt;
        self.accumulator = self.accumulator.min(self.dt * 10.0);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Drop any banked time, e.g. when leaving a menu so the first playing
    /// frame does not run a burst of catch-up steps.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }
}
