use serde::{Deserialize, Serialize};

use crate::geometry::{Breakpoint, Offset2D, Size};

/// How fractional offsets are converted to absolute units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SizingBasis {
    /// Multiply by the element's own rendered size
    #[default]
    ElementSize,
    /// Multiply by the room left in the container (container size - element size)
    ContainerSize,
}

impl SizingBasis {
    /// Parse a declared basis; anything unrecognized falls back to `ElementSize`
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("containersize") => Self::ContainerSize,
            _ => Self::ElementSize,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ElementSize => "elementSize",
            Self::ContainerSize => "containerSize",
        }
    }

    /// Base size that offset fractions are multiplied by
    pub fn base_size(&self, element: Size, container: Size) -> Size {
        match self {
            Self::ElementSize => element,
            Self::ContainerSize => container - element,
        }
    }
}

/// Motion parameters declared on an element, as decoded from its tokens.
///
/// Every field is optional; [`ElementProfile::from_spec`] applies defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionSpec {
    pub start_progress: Option<f64>,
    pub end_progress: Option<f64>,
    pub start_x: Option<f64>,
    pub start_y: Option<f64>,
    pub end_x: Option<f64>,
    pub end_y: Option<f64>,
    /// Raw sizing-basis value
    pub base_size: Option<String>,
    /// Background-parallax factor
    pub background_factor: Option<f64>,
    /// Selector overriding the structural parent as container
    pub container: Option<String>,
}

/// A tracked element with its motion parameters and per-frame state
#[derive(Debug, Clone, PartialEq)]
pub struct ElementProfile<N> {
    pub element: N,
    /// Node whose visibility drives container-based progress
    pub container: N,
    pub sizing_basis: SizingBasis,
    pub start: Breakpoint,
    pub end: Breakpoint,
    /// `end - start` for progress and both offset axes
    pub diff: Breakpoint,
    /// Present only when nonzero
    pub background_factor: Option<f64>,
    pub(crate) target: Offset2D,
    pub(crate) current: Option<Offset2D>,
}

impl<N> ElementProfile<N> {
    /// Build a profile from declared parameters, applying every default in one place
    pub fn from_spec(element: N, container: N, spec: &MotionSpec) -> Self {
        let num = |v: Option<f64>| v.filter(|n| n.is_finite()).unwrap_or(0.0);

        let start = Breakpoint::new(
            num(spec.start_progress),
            num(spec.start_x),
            num(spec.start_y),
        );
        let end = Breakpoint::new(num(spec.end_progress), num(spec.end_x), num(spec.end_y));

        Self::new(
            element,
            container,
            SizingBasis::parse(spec.base_size.as_deref()),
            start,
            end,
            spec.background_factor.filter(|f| f.is_finite() && *f != 0.0),
        )
    }

    pub fn new(
        element: N,
        container: N,
        sizing_basis: SizingBasis,
        start: Breakpoint,
        end: Breakpoint,
        background_factor: Option<f64>,
    ) -> Self {
        let diff = Breakpoint {
            progress: end.progress - start.progress,
            offset: end.offset - start.offset,
        };
        Self {
            element,
            container,
            sizing_basis,
            start,
            end,
            diff,
            background_factor,
            target: Offset2D::ZERO,
            current: None,
        }
    }

    /// Last computed target position
    pub fn target(&self) -> Offset2D {
        self.target
    }

    /// Last emitted position, unset before the first frame
    pub fn current(&self) -> Option<Offset2D> {
        self.current
    }
}
