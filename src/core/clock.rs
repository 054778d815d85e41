//! Core domain: fixed-timestep accumulator decoupling integration from frames.

/// Default physics rate used by the headless simulation.
pub const DEFAULT_FIXED_STEP: f32 = 1.0 / 50.0;

/// Upper bound on fixed steps per frame before excess time is dropped.
pub const DEFAULT_MAX_STEPS: u32 = 5;

/// Accumulates variable frame time and hands out whole fixed steps.
#[derive(Debug, Clone)]
pub struct FixedStepClock {
    step: f32,
    accumulator: f32,
    max_steps: u32,
}

impl Default for FixedStepClock {
    fn default() -> Self {
        Self::new(DEFAULT_FIXED_STEP)
    }
}

impl FixedStepClock {
    pub fn new(step: f32) -> Self {
        Self {
            step: step.max(f32::EPSILON),
            accumulator: 0.0,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Add a frame's elapsed time and return how many fixed steps are due.
    ///
    /// When more than `max_steps` are due the surplus is discarded so a long
    /// hitch cannot snowball into ever longer frames.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        let due = (self.accumulator / self.step).floor() as u32;
        let steps = due.min(self.max_steps);
        self.accumulator -= steps as f32 * self.step;
        if due > steps {
            self.accumulator %= self.step;
        }
        steps
    }

    /// Fraction of a step left in the accumulator, for render interpolation.
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.step).clamp(0.0, 1.0)
    }
}
