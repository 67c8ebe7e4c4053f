use eframe::egui::Vec2;

use super::{Edge, Node, PointerId};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodePlacement<'a> {
    pub tower_id: &'a str,
    pub position: Vec2,
    pub dragged: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgePlacement<'a> {
    pub from_id: &'a str,
    pub to_id: &'a str,
    pub from: Vec2,
    pub to: Vec2,
}

/// The rendering side of a constellation. The physics core only ever writes
/// through `place_node` and `place_edge`.
pub trait ViewAdapter {
    /// `None` when the view container is missing.
    fn container_size(&self) -> Option<Vec2>;

    /// Visual footprint of a tower's node, if the view knows it.
    fn node_size(&self, _tower_id: &str) -> Option<Vec2> {
        None
    }

    fn place_node(&mut self, placement: NodePlacement<'_>);

    fn place_edge(&mut self, placement: EdgePlacement<'_>);
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    #[error("pointer {0} is not active on the view")]
    InactivePointer(PointerId),
    #[error("pointer capture refused: {0}")]
    Refused(String),
}

pub trait PointerCapture {
    fn capture(&mut self, pointer_id: PointerId, tower_id: &str) -> Result<(), CaptureError>;

    fn release(&mut self, pointer_id: PointerId);
}

/// Grants every capture; for hosts that route pointer events themselves.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImplicitCapture;

impl PointerCapture for ImplicitCapture {
    fn capture(&mut self, _pointer_id: PointerId, _tower_id: &str) -> Result<(), CaptureError> {
        Ok(())
    }

    fn release(&mut self, _pointer_id: PointerId) {}
}

pub struct ViewBinding {
    pub(super) surface: Box<dyn ViewAdapter>,
    pub(super) pointer: Box<dyn PointerCapture>,
}

impl ViewBinding {
    pub fn new(
        surface: impl ViewAdapter + 'static,
        pointer: impl PointerCapture + 'static,
    ) -> Self {
        Self {
            surface: Box::new(surface),
            pointer: Box::new(pointer),
        }
    }

    pub fn without_capture(surface: impl ViewAdapter + 'static) -> Self {
        Self::new(surface, ImplicitCapture)
    }
}

pub(super) fn sync_view(surface: &mut dyn ViewAdapter, nodes: &[Node], edges: &[Edge]) {
    for node in nodes {
        surface.place_node(NodePlacement {
            tower_id: &node.id,
            position: node.position,
            dragged: node.dragged,
        });
    }

    for edge in edges {
        let (Some(from), Some(to)) = (nodes.get(edge.from), nodes.get(edge.to)) else {
            continue;
        };
        surface.place_edge(EdgePlacement {
            from_id: &from.id,
            to_id: &to.id,
            from: from.position,
            to: to.position,
        });
    }
}
