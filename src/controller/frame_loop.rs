use crate::config::FrameConfig;

/// Turns host timestamps into tick durations for the controller
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    pub max_step: f32,
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new(config: FrameConfig) -> Self {
        Self { max_step: config.max_step, last_ms: None }
    }

    /// Seconds since the previous call, clamped to `[0, max_step]`.
    /// The first call only primes the clock and returns 0.
    pub fn step(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0).clamp(0.0, self.max_step as f64) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt
    }

    /// Forget the last timestamp, e.g. after the page was hidden
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(FrameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_step_is_zero() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.step(12_345.0), 0.0);
        let dt = clock.step(12_345.0 + 16.0);
        assert!((dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_step_is_clamped() {
        let mut clock = FrameClock::default();
        clock.step(0.0);
        assert_eq!(clock.step(5_000.0), 0.1, "long pause clamps to max_step");
        assert_eq!(clock.step(4_000.0), 0.0, "time going backwards clamps to zero");
    }

    #[test]
    fn test_reset() {
        let mut clock = FrameClock::new(FrameConfig { max_step: 1.0 });
        clock.step(0.0);
        clock.reset();
        assert_eq!(clock.step(500.0), 0.0);
        assert!((clock.step(1_000.0) - 0.5).abs() < 1e-6);
    }
}
