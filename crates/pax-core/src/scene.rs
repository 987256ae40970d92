//! In-memory page model implementing every host trait.
//!
//! A scene is a flat list of boxes in document coordinates plus a scroll
//! position. It backs the CLI, the terminal preview and the tests.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geometry::Offset2D;
use crate::host::{BackgroundStyle, Document, Layout, NodeBounds, PageGeometry, StyleSink};
use crate::profile::{MotionSpec, ACTIVATION_MARKER};

/// Scene description as written in a scene file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub page: PageDescription,
    #[serde(default)]
    pub nodes: Vec<NodeDescription>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageDescription {
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f64,
    #[serde(default)]
    pub scroll_offset: f64,
    /// Defaults to the bottom edge of the lowest node
    #[serde(default)]
    pub document_height: Option<f64>,
}

impl Default for PageDescription {
    fn default() -> Self {
        Self {
            viewport_height: default_viewport_height(),
            scroll_offset: 0.0,
            document_height: None,
        }
    }
}

fn default_viewport_height() -> f64 {
    800.0
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeDescription {
    #[serde(default)]
    pub id: Option<String>,
    /// Class tokens: the activation marker and motion tokens live here
    #[serde(default)]
    pub classes: Vec<String>,
    /// Id of the parent node, which must be declared earlier
    #[serde(default)]
    pub parent: Option<String>,
    /// Selector overriding the parent as visibility container
    #[serde(default)]
    pub container: Option<String>,
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

/// Handle to a node in a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node{}", self.0)
    }
}

/// Box in document coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub parent: Option<NodeId>,
    pub container: Option<String>,
    pub rect: Rect,
}

impl SceneNode {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// `#id` when the node has one, else its handle
    pub fn label(&self, handle: NodeId) -> String {
        match &self.id {
            Some(id) => format!("#{}", id),
            None => handle.to_string(),
        }
    }
}

/// Last style written to a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NodeStyle {
    pub transform: Option<Offset2D>,
    pub background: Option<BackgroundStyle>,
}

#[derive(Debug, Clone)]
pub struct Scene {
    nodes: Vec<SceneNode>,
    styles: Vec<NodeStyle>,
    viewport_height: f64,
    document_height: f64,
    scroll_offset: f64,
}

impl Scene {
    /// Build a scene, resolving parent ids
    pub fn from_description(description: SceneDescription) -> crate::Result<Self> {
        let mut by_id: HashMap<String, NodeId> = HashMap::new();
        let mut nodes = Vec::with_capacity(description.nodes.len());

        for (index, node) in description.nodes.into_iter().enumerate() {
            let handle = NodeId(index);

            let parent = match &node.parent {
                Some(parent_id) => Some(*by_id.get(parent_id).ok_or_else(|| {
                    crate::Error::Scene(format!(
                        "parent '{}' of node {} must be declared before it",
                        parent_id, index
                    ))
                })?),
                None => None,
            };

            if let Some(id) = &node.id {
                if by_id.insert(id.clone(), handle).is_some() {
                    return Err(crate::Error::Scene(format!("duplicate node id '{}'", id)));
                }
            }

            nodes.push(SceneNode {
                id: node.id,
                classes: node.classes,
                parent,
                container: node.container,
                rect: Rect {
                    top: node.top,
                    left: node.left,
                    width: node.width,
                    height: node.height,
                },
            });
        }

        let page = description.page;
        let content_bottom = nodes
            .iter()
            .map(|n| n.rect.top + n.rect.height)
            .fold(0.0_f64, f64::max);
        let document_height = page
            .document_height
            .unwrap_or(content_bottom)
            .max(page.viewport_height);

        let mut scene = Self {
            styles: vec![NodeStyle::default(); nodes.len()],
            nodes,
            viewport_height: page.viewport_height,
            document_height,
            scroll_offset: 0.0,
        };
        scene.scroll_to(page.scroll_offset);
        Ok(scene)
    }

    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        Self::from_description(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> crate::Result<Self> {
        Self::from_description(serde_json::from_str(content)?)
    }

    /// Load a scene file; `.json` files are JSON, anything else TOML
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn node(&self, handle: NodeId) -> Option<&SceneNode> {
        self.nodes.get(handle.0)
    }

    pub fn style(&self, handle: NodeId) -> NodeStyle {
        self.styles.get(handle.0).copied().unwrap_or_default()
    }

    /// Display label for a node, `#id` when it has one
    pub fn label(&self, handle: NodeId) -> String {
        self.node(handle)
            .map(|n| n.label(handle))
            .unwrap_or_else(|| handle.to_string())
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn document_height(&self) -> f64 {
        self.document_height
    }

    /// Largest reachable scroll offset
    pub fn max_scroll(&self) -> f64 {
        (self.document_height - self.viewport_height).max(0.0)
    }

    /// Scroll to an absolute offset, clamped to the scrollable range
    pub fn scroll_to(&mut self, offset: f64) {
        self.scroll_offset = if offset.is_finite() {
            offset.clamp(0.0, self.max_scroll())
        } else {
            0.0
        };
    }

    pub fn scroll_by(&mut self, delta: f64) {
        self.scroll_to(self.scroll_offset + delta);
    }
}

impl Layout for Scene {
    type Node = NodeId;

    fn page(&self) -> PageGeometry {
        PageGeometry {
            scroll_offset: self.scroll_offset,
            scroll_height: self.document_height,
            viewport_height: self.viewport_height,
        }
    }

    fn bounds(&self, node: &NodeId) -> NodeBounds {
        match self.node(*node) {
            Some(n) => NodeBounds {
                top: n.rect.top - self.scroll_offset,
                width: n.rect.width,
                height: n.rect.height,
            },
            None => NodeBounds::default(),
        }
    }
}

impl StyleSink for Scene {
    fn set_translation(&mut self, node: &NodeId, offset: Offset2D) {
        if let Some(style) = self.styles.get_mut(node.0) {
            style.transform = Some(offset);
        }
    }

    fn set_background(&mut self, node: &NodeId, background: BackgroundStyle) {
        if let Some(style) = self.styles.get_mut(node.0) {
            style.background = Some(background);
        }
    }
}

impl Document for Scene {
    fn marked_elements(&self) -> Vec<NodeId> {
        self.nodes()
            .filter(|(_, n)| n.has_class(ACTIVATION_MARKER))
            .map(|(handle, _)| handle)
            .collect()
    }

    fn motion_spec(&self, node: &NodeId) -> MotionSpec {
        match self.node(*node) {
            Some(n) => MotionSpec::from_tokens(n.classes.iter().map(String::as_str))
                .with_container(n.container.as_deref()),
            None => MotionSpec::default(),
        }
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.node(*node).and_then(|n| n.parent)
    }

    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        let selector = selector.trim();
        if let Some(id) = selector.strip_prefix('#') {
            self.nodes()
                .find(|(_, n)| n.id.as_deref() == Some(id))
                .map(|(handle, _)| handle)
        } else if let Some(class) = selector.strip_prefix('.') {
            self.nodes()
                .find(|(_, n)| n.has_class(class))
                .map(|(handle, _)| handle)
        } else {
            debug!(selector, "Unsupported selector, only #id and .class are matched");
            None
        }
    }
}
