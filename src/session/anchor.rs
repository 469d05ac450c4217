use std::fmt;
use std::sync::Arc;

use crate::registry::Renderable;

/// Identifier a session hands out for each added anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnchorId(pub u64);

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "anchor-{}", self.0)
    }
}

/// Which detected planes an anchor may attach to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaneAlignment {
    Horizontal,
    Vertical,
    #[default]
    Any,
}

impl PlaneAlignment {
    pub fn accepts(self, plane: PlaneAlignment) -> bool {
        self == PlaneAlignment::Any || plane == PlaneAlignment::Any || self == plane
    }
}

/// Where the session should put an anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorTarget {
    /// On a detected plane, at the current focus position
    Plane { alignment: PlaneAlignment },
}

impl Default for AnchorTarget {
    fn default() -> Self {
        Self::Plane {
            alignment: PlaneAlignment::Any,
        }
    }
}

/// An anchor with the content attached to it
#[derive(Debug, Clone, Default)]
pub struct Anchor {
    pub target: AnchorTarget,
    children: Vec<Arc<Renderable>>,
}

impl Anchor {
    pub fn on_plane(alignment: PlaneAlignment) -> Self {
        Self {
            target: AnchorTarget::Plane { alignment },
            children: Vec::new(),
        }
    }

    pub fn add_child(&mut self, renderable: Arc<Renderable>) {
        self.children.push(renderable);
    }

    pub fn with_child(mut self, renderable: Arc<Renderable>) -> Self {
        self.add_child(renderable);
        self
    }

    pub fn children(&self) -> &[Arc<Renderable>] {
        &self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_matching() {
        assert!(PlaneAlignment::Any.accepts(PlaneAlignment::Vertical));
        assert!(PlaneAlignment::Horizontal.accepts(PlaneAlignment::Horizontal));
        assert!(!PlaneAlignment::Horizontal.accepts(PlaneAlignment::Vertical));
    }

    #[test]
    fn test_default_anchor_targets_any_plane() {
        let anchor = Anchor::default();
        assert_eq!(
            anchor.target,
            AnchorTarget::Plane {
                alignment: PlaneAlignment::Any
            }
        );
        assert!(anchor.children().is_empty());
    }
}
