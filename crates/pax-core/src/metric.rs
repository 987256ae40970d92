//! Scroll-progress measurement.
//!
//! Raw values are unclamped; [`clamp_progress`] normalizes them to [0, 1].
//! Zero or negative denominators yield 0 instead of NaN or infinity.

use crate::config::ScrollBasis;
use crate::host::{Layout, PageGeometry};

/// Progress of the document scroll: `offset / (scroll_height - viewport_height)`
pub fn page_progress(page: PageGeometry) -> f64 {
    let range = page.scroll_height - page.viewport_height;
    ratio(page.scroll_offset, range)
}

/// Progress of a container through the viewport:
/// `(viewport_height - container_top) / container_height`
pub fn container_progress(viewport_height: f64, container_top: f64, container_height: f64) -> f64 {
    ratio(viewport_height - container_top, container_height)
}

/// Clamp a raw progress value into [0, 1]; NaN becomes 0
#[inline]
pub fn clamp_progress(raw: f64) -> f64 {
    if raw.is_nan() {
        0.0
    } else {
        raw.clamp(0.0, 1.0)
    }
}

#[inline]
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if !numerator.is_finite() || !denominator.is_finite() || denominator <= 0.0 {
        tracing::trace!(numerator, denominator, "Degenerate scroll geometry, progress = 0");
        return 0.0;
    }
    numerator / denominator
}

/// Measures raw progress according to the active basis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollMetric {
    basis: ScrollBasis,
}

impl ScrollMetric {
    pub fn new(basis: ScrollBasis) -> Self {
        Self { basis }
    }

    /// Raw document progress
    pub fn measure_page<L: Layout>(&self, layout: &L) -> f64 {
        page_progress(layout.page())
    }

    /// Raw progress for an element whose visibility is measured on `container`
    pub fn measure_for<L: Layout>(&self, layout: &L, container: &L::Node) -> f64 {
        match self.basis {
            ScrollBasis::ContainerVisibility => {
                let page = layout.page();
                let bounds = layout.bounds(container);
                container_progress(page.viewport_height, bounds.top, bounds.height)
            }
            ScrollBasis::PageScroll => self.measure_page(layout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_progress() {
        assert_eq!(clamp_progress(-0.5), 0.0);
        assert_eq!(clamp_progress(0.0), 0.0);
        assert_eq!(clamp_progress(0.42), 0.42);
        assert_eq!(clamp_progress(1.0), 1.0);
        assert_eq!(clamp_progress(7.0), 1.0);
        assert_eq!(clamp_progress(f64::NAN), 0.0);
        assert_eq!(clamp_progress(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_clamp_progress_range() {
        for i in -50..=150 {
            let raw = i as f64 / 37.0;
            let p = clamp_progress(raw);
            assert!((0.0..=1.0).contains(&p), "{} -> {}", raw, p);
            if (0.0..=1.0).contains(&raw) {
                assert_eq!(p, raw);
            }
        }
    }

    #[test]
    fn test_page_progress() {
        let page = PageGeometry {
            scroll_offset: 500.0,
            scroll_height: 3000.0,
            viewport_height: 1000.0,
        };
        assert!((page_progress(page) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_page_progress_zero_range() {
        let page = PageGeometry {
            scroll_offset: 0.0,
            scroll_height: 800.0,
            viewport_height: 800.0,
        };
        let p = page_progress(page);
        assert_eq!(p, 0.0);
        assert!(!p.is_nan());
    }

    #[test]
    fn test_container_progress() {
        // Container top at the bottom edge of the viewport: not yet visible
        assert_eq!(container_progress(800.0, 800.0, 400.0), 0.0);
        // Scrolled 200px into view
        assert!((container_progress(800.0, 600.0, 400.0) - 0.5).abs() < 1e-9);
        // Past the container: unclamped
        assert!(container_progress(800.0, -200.0, 400.0) > 1.0);
    }

    #[test]
    fn test_container_progress_zero_height() {
        assert_eq!(container_progress(800.0, 100.0, 0.0), 0.0);
        assert_eq!(container_progress(800.0, 100.0, -5.0), 0.0);
    }
}
