//! Target offset from scroll progress: piecewise-linear between two breakpoints,
//! held at the start offset before and the end offset after.

use crate::geometry::{Offset2D, Size};
use crate::metric::clamp_progress;
use crate::profile::ElementProfile;

#[derive(Debug, Clone, Copy, Default)]
pub struct TargetResolver;

impl TargetResolver {
    /// Compute the target offset in absolute units for `raw_progress`.
    ///
    /// `base` is the size fractions are multiplied by, already chosen
    /// according to the profile's sizing basis.
    pub fn resolve<N>(&self, profile: &ElementProfile<N>, raw_progress: f64, base: Size) -> Offset2D {
        let p = clamp_progress(raw_progress);
        let base = base.sanitized();

        if p <= profile.start.progress {
            return profile.start.offset.scale(base);
        }
        if p >= profile.end.progress {
            return profile.end.offset.scale(base);
        }
        // start < p < end, so diff.progress > 0 here; the guard covers NaN thresholds
        if profile.diff.progress.is_nan() || profile.diff.progress <= 0.0 {
            return profile.end.offset.scale(base);
        }

        let t = (p - profile.start.progress) / profile.diff.progress;
        profile.start.offset.scale(base) + (profile.diff.offset * t).scale(base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Breakpoint;
    use crate::profile::SizingBasis;

    fn profile(start: Breakpoint, end: Breakpoint) -> ElementProfile<()> {
        ElementProfile::new((), (), SizingBasis::ElementSize, start, end, None)
    }

    fn assert_offset(actual: Offset2D, x: f64, y: f64) {
        assert!(
            (actual.x - x).abs() < 1e-9 && (actual.y - y).abs() < 1e-9,
            "expected ({}, {}), got {:?}",
            x,
            y,
            actual
        );
    }

    #[test]
    fn test_boundary_interpolation() {
        let p = profile(Breakpoint::new(0.2, 0.0, 0.0), Breakpoint::new(0.8, 1.0, 0.0));
        let base = Size::new(100.0, 100.0);
        let resolver = TargetResolver;

        assert_offset(resolver.resolve(&p, 0.1, base), 0.0, 0.0);
        assert_offset(resolver.resolve(&p, 0.2, base), 0.0, 0.0);
        assert_offset(resolver.resolve(&p, 0.5, base), 50.0, 0.0);
        assert_offset(resolver.resolve(&p, 0.8, base), 100.0, 0.0);
        assert_offset(resolver.resolve(&p, 0.95, base), 100.0, 0.0);
    }

    #[test]
    fn test_raw_progress_is_clamped() {
        let p = profile(Breakpoint::new(0.0, 0.0, -1.0), Breakpoint::new(1.0, 0.0, 1.0));
        let base = Size::new(10.0, 10.0);
        assert_offset(TargetResolver.resolve(&p, -3.0, base), 0.0, -10.0);
        assert_offset(TargetResolver.resolve(&p, 3.0, base), 0.0, 10.0);
        assert_offset(TargetResolver.resolve(&p, f64::NAN, base), 0.0, -10.0);
    }

    #[test]
    fn test_coinciding_thresholds() {
        let p = profile(Breakpoint::new(0.5, 1.0, 1.0), Breakpoint::new(0.5, 2.0, 2.0));
        let base = Size::new(10.0, 20.0);
        assert_offset(TargetResolver.resolve(&p, 0.5, base), 10.0, 20.0);
        assert_offset(TargetResolver.resolve(&p, 0.6, base), 20.0, 40.0);
        let t = TargetResolver.resolve(&p, 0.4, base);
        assert!(t.x.is_finite() && t.y.is_finite());
    }

    #[test]
    fn test_reversed_thresholds() {
        // end before start: every p is either <= start or >= end
        let p = profile(Breakpoint::new(0.8, 1.0, 0.0), Breakpoint::new(0.2, 0.0, 0.0));
        let base = Size::new(100.0, 100.0);
        assert_offset(TargetResolver.resolve(&p, 0.5, base), 100.0, 0.0);
        assert_offset(TargetResolver.resolve(&p, 0.9, base), 0.0, 0.0);
    }

    #[test]
    fn test_non_finite_base() {
        let p = profile(Breakpoint::new(0.0, 1.0, 1.0), Breakpoint::new(1.0, 1.0, 1.0));
        let t = TargetResolver.resolve(&p, 0.5, Size::new(f64::NAN, 50.0));
        assert_offset(t, 0.0, 50.0);
    }
}
