//! Time-driven interpolation between two values

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    duration_ms: f64,
    elapsed_ms: f64,
}

impl Tween {
    pub fn new(from: f64, to: f64, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            duration_ms: duration_ms.max(0.0),
            elapsed_ms: 0.0,
        }
    }

    /// Linear progress in `0.0..=1.0`
    pub fn progress(&self) -> f64 {
        if self.duration_ms <= 0.0 {
            1.0
        } else {
            (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
        }
    }

    /// Current value, ease-out cubic
    pub fn value(&self) -> f64 {
        let t = self.progress();
        let eased = 1.0 - (1.0 - t).powi(3);
        self.from + (self.to - self.from) * eased
    }

    /// Advance by `dt_ms`; true once finished
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        self.elapsed_ms += dt_ms.max(0.0);
        self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tween_reaches_target() {
        let mut tween = Tween::new(600.0, 0.0, 300.0);
        assert_eq!(tween.value(), 600.0);
        assert!(!tween.advance(150.0));
        let mid = tween.value();
        assert!(mid < 300.0 && mid > 0.0, "ease-out is past halfway at t=0.5: {}", mid);
        assert!(tween.advance(200.0));
        assert_eq!(tween.value(), 0.0);
    }

    #[test]
    fn test_zero_duration_is_immediate() {
        let tween = Tween::new(1.0, 2.0, 0.0);
        assert!(tween.is_finished());
        assert_eq!(tween.value(), 2.0);
    }
}
