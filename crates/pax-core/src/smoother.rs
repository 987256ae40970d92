//! Exponential easing toward a moving target.

use crate::geometry::Offset2D;

/// Fraction of the remaining distance covered per frame
pub const SMOOTHING_FACTOR: f64 = 0.1;

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Single-pole exponential moving average with fixed-precision output
#[derive(Debug, Clone, Copy, Default)]
pub struct Smoother;

impl Smoother {
    /// Step `current` toward `target`.
    ///
    /// An unset `current` snaps straight to the target. The result is rounded
    /// to `precision` decimal digits on both axes.
    pub fn advance(&self, current: Option<Offset2D>, target: Offset2D, precision: u32) -> Offset2D {
        let next = match current {
            None => target,
            Some(current) => Offset2D::new(
                lerp(current.x, target.x, SMOOTHING_FACTOR),
                lerp(current.y, target.y, SMOOTHING_FACTOR),
            ),
        };
        next.round_to(precision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::round_to;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 100.0, 0.0) - 0.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 0.5) - 50.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 1.0) - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_first_frame_snaps() {
        let target = Offset2D::new(50.0, 0.0);
        assert_eq!(Smoother.advance(None, target, 2), target);
    }

    #[test]
    fn test_single_step() {
        let next = Smoother.advance(Some(Offset2D::ZERO), Offset2D::new(100.0, -20.0), 2);
        assert_eq!(next, Offset2D::new(10.0, -2.0));
    }

    #[test]
    fn test_converges_without_overshoot() {
        let target = Offset2D::new(100.0, 0.0);
        let mut current = Offset2D::ZERO;
        let mut distance = (target.x - current.x).abs();

        for step in 0..40 {
            current = Smoother.advance(Some(current), target, 2);
            let next_distance = (target.x - current.x).abs();
            assert!(next_distance < distance, "step {} did not get closer", step);
            assert!(current.x <= target.x, "step {} overshot", step);
            distance = next_distance;
        }
    }

    #[test]
    fn test_output_respects_precision() {
        let target = Offset2D::new(33.333, -17.777);
        let mut current = Some(Offset2D::new(1.0, 1.0));
        for _ in 0..20 {
            let next = Smoother.advance(current, target, 2);
            assert_eq!(round_to(next.x, 2), next.x);
            assert_eq!(round_to(next.y, 2), next.y);
            current = Some(next);
        }
    }

    #[test]
    fn test_reaches_fixed_point() {
        let target = Offset2D::new(100.0, -40.0);
        let mut current = Offset2D::ZERO;
        let mut stable = false;

        for _ in 0..500 {
            let next = Smoother.advance(Some(current), target, 2);
            if next == current {
                stable = true;
                break;
            }
            current = next;
        }

        assert!(stable, "did not settle, last value {:?}", current);
        assert!((target.x - current.x).abs() < 0.1);
        assert!((target.y - current.y).abs() < 0.1);
    }
}
