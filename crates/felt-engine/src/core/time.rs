/// Fixed timestep accumulator.
/// Lets a host with variable frame times drive the simulation at a
/// consistent rate: feed it real frame deltas, run the returned number of
/// fixed steps, and use `alpha` to interpolate rendering between ticks.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    /// Cap on queued steps so a long stall cannot spiral the simulation.
    const MAX_STEPS: u32 = 10;

    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Convenience constructor from a tick rate in Hz.
    pub fn from_hz(hz: f32) -> Self {
        Self::new(1.0 / hz)
    }

    /// Add frame time to the accumulator. Returns the number of fixed
    /// steps to run this frame.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt;
        self.accumulator = self.accumulator.min(self.dt * Self::MAX_STEPS as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Drop any banked time, e.g. after a pause or a table reset.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::from_hz(60.0);
        assert_eq!(ts.accumulate(1.0 / 60.0), 1);
    }

    #[test]
    fn accumulates_partial_frames() {
        let mut ts = FixedTimestep::from_hz(60.0);
        assert_eq!(ts.accumulate(0.008), 0);
        assert_eq!(ts.accumulate(0.010), 1);
    }

    #[test]
    fn long_stall_is_capped() {
        let mut ts = FixedTimestep::from_hz(60.0);
        assert_eq!(ts.accumulate(1.0), 10);
    }

    #[test]
    fn reset_drops_banked_time() {
        let mut ts = FixedTimestep::from_hz(60.0);
        ts.accumulate(0.016);
        ts.reset();
        assert_eq!(ts.accumulate(0.008), 0);
    }

    #[test]
    fn alpha_stays_normalized() {
        let mut ts = FixedTimestep::from_hz(60.0);
        ts.accumulate(0.008);
        let a = ts.alpha();
        assert!((0.0..=1.0).contains(&a), "alpha was {}", a);
    }
}
