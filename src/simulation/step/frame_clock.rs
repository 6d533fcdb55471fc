/// Converts host animation-frame timestamps (milliseconds) into step dt.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    /// Seconds since the previous tick, clamped to `[0, max_dt]`. The first
    /// tick after creation or `reset` yields 0.
    pub(crate) fn tick(&mut self, now_ms: f64, max_dt: f32) -> f32 {
        let dt = match self.last_ms {
            Some(last) if now_ms.is_finite() => ((now_ms - last) / 1000.0) as f32,
            _ => 0.0,
        };
        if now_ms.is_finite() {
            self.last_ms = Some(now_ms);
        }
        super::step::clamp_dt(dt, max_dt)
    }

    pub(crate) fn reset(&mut self) {
        self.last_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_zero_then_measures_elapsed() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.tick(1000.0, 0.05), 0.0);
        let dt = clock.tick(1016.0, 0.05);
        assert!((dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn long_frames_clamp_and_backwards_time_is_zero() {
        let mut clock = FrameClock::default();
        clock.tick(0.0, 0.05);
        assert_eq!(clock.tick(2000.0, 0.05), 0.05);
        assert_eq!(clock.tick(1500.0, 0.05), 0.0);
    }

    #[test]
    fn reset_forgets_last_timestamp() {
        let mut clock = FrameClock::default();
        clock.tick(0.0, 0.05);
        clock.reset();
        assert_eq!(clock.tick(30.0, 0.05), 0.0);
    }
}
