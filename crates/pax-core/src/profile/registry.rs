use tracing::{debug, warn};

use crate::host::Document;

use super::models::ElementProfile;

/// Owns every tracked element's profile, in discovery order
#[derive(Debug, Clone)]
pub struct ProfileRegistry<N> {
    profiles: Vec<ElementProfile<N>>,
}

impl<N> Default for ProfileRegistry<N> {
    fn default() -> Self {
        Self {
            profiles: Vec::new(),
        }
    }
}

impl<N: Clone + PartialEq + std::fmt::Debug> ProfileRegistry<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from every marked element in the document
    pub fn discover<D>(document: &D) -> Self
    where
        D: Document<Node = N>,
    {
        let mut registry = Self::new();

        for element in document.marked_elements() {
            let spec = document.motion_spec(&element);
            let container = resolve_container(document, &element, spec.container.as_deref());
            let profile = ElementProfile::from_spec(element, container, &spec);
            registry.insert(profile);
        }

        debug!("Discovered {} moving elements", registry.len());
        registry
    }

    /// Add a profile. Returns false if the element is already tracked.
    pub fn insert(&mut self, profile: ElementProfile<N>) -> bool {
        if self.find(&profile.element).is_some() {
            warn!(element = ?profile.element, "Element already tracked, ignoring duplicate");
            return false;
        }
        self.profiles.push(profile);
        true
    }

    pub fn find(&self, element: &N) -> Option<&ElementProfile<N>> {
        self.profiles.iter().find(|p| &p.element == element)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ElementProfile<N>> {
        self.profiles.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, ElementProfile<N>> {
        self.profiles.iter_mut()
    }

    pub fn as_slice(&self) -> &[ElementProfile<N>] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Container for visibility measurement: the override selector when it
/// resolves, else the structural parent, else the element itself.
fn resolve_container<D: Document>(document: &D, element: &D::Node, selector: Option<&str>) -> D::Node {
    if let Some(selector) = selector.filter(|s| !s.is_empty()) {
        if let Some(node) = document.query_selector(selector) {
            return node;
        }
        warn!(selector, "Container selector matched nothing, using parent");
    }

    document
        .parent(element)
        .unwrap_or_else(|| element.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Breakpoint;
    use crate::profile::SizingBasis;

    fn profile(element: u32) -> ElementProfile<u32> {
        ElementProfile::new(
            element,
            0,
            SizingBasis::ElementSize,
            Breakpoint::default(),
            Breakpoint::default(),
            None,
        )
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut registry = ProfileRegistry::new();
        assert!(registry.insert(profile(1)));
        assert!(registry.insert(profile(2)));
        assert!(!registry.insert(profile(1)));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let mut registry = ProfileRegistry::new();
        for id in [5, 3, 9] {
            registry.insert(profile(id));
        }
        let order: Vec<u32> = registry.iter().map(|p| p.element).collect();
        assert_eq!(order, vec![5, 3, 9]);
        assert!(registry.find(&3).is_some());
        assert!(registry.find(&4).is_none());
    }
}
