/// Simulated time. Advanced once per tick by the frame delta.
///
/// `now` is kept in `f64` so deadlines stay exact over long sessions; the
/// per-tick delta handed to gameplay code stays `f32` like the rest of the
/// math.
#[derive(Debug, Clone, Copy, Default)]
pub struct Clock {
    now: f64,
    ticks: u64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `dt` seconds and return the sanitized delta.
    /// Negative or non-finite deltas count as zero.
    pub fn advance(&mut self, dt: f32) -> f32 {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.now += dt as f64;
        self.ticks += 1;
        dt
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
