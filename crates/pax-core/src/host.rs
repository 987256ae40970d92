//! Boundary between the engine and whatever renders the page.
//!
//! The engine never owns nodes. It reads geometry through [`Layout`],
//! discovers tracked elements through [`Document`] and writes styles through
//! [`StyleSink`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{Offset2D, Size};
use crate::profile::MotionSpec;

/// Document-level scroll geometry
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    /// Pixels scrolled from the top of the document
    pub scroll_offset: f64,
    /// Total scrollable height of the document
    pub scroll_height: f64,
    /// Height of the visible viewport
    pub viewport_height: f64,
}

/// Geometry of a single node
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeBounds {
    /// Distance from the viewport's top edge to the node's top edge
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl NodeBounds {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Background-parallax output for one element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BackgroundStyle {
    /// Upward shift of the background image, in pixels
    pub offset_y: f64,
    /// Background height as a percentage of the viewport height
    pub size_vh: f64,
}

impl BackgroundStyle {
    /// CSS `background-position` value
    pub fn position_css(&self) -> String {
        let y = if self.offset_y == 0.0 { 0.0 } else { -self.offset_y };
        format!("center {}px", y)
    }

    /// CSS `background-size` value
    pub fn size_css(&self) -> String {
        format!("auto {}vh", self.size_vh)
    }
}

/// CSS `transform` value for a translation
pub fn translate_css(offset: Offset2D) -> String {
    format!("translate3d({}px, {}px, 0)", offset.x, offset.y)
}

/// Read-only geometry queries
pub trait Layout {
    /// Opaque, identity-comparable node handle
    type Node: Clone + PartialEq + fmt::Debug;

    fn page(&self) -> PageGeometry;

    fn bounds(&self, node: &Self::Node) -> NodeBounds;
}

/// Write access to rendered style
pub trait StyleSink: Layout {
    fn set_translation(&mut self, node: &Self::Node, offset: Offset2D);

    fn set_background(&mut self, node: &Self::Node, background: BackgroundStyle);
}

/// Element discovery and selector resolution
pub trait Document: Layout {
    /// Elements bearing the activation marker, in document order
    fn marked_elements(&self) -> Vec<Self::Node>;

    /// Decoded motion parameters declared on a node
    fn motion_spec(&self, node: &Self::Node) -> MotionSpec;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// First node matching `selector` in document order
    fn query_selector(&self, selector: &str) -> Option<Self::Node>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_output() {
        assert_eq!(
            translate_css(Offset2D::new(12.5, -3.0)),
            "translate3d(12.5px, -3px, 0)"
        );
        let bg = BackgroundStyle {
            offset_y: 150.0,
            size_vh: 30.0,
        };
        assert_eq!(bg.position_css(), "center -150px");
        assert_eq!(bg.size_css(), "auto 30vh");

        let still = BackgroundStyle {
            offset_y: 0.0,
            size_vh: 30.0,
        };
        assert_eq!(still.position_css(), "center 0px");
    }
}
