use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use eframe::egui::{Context, Vec2};
use tower_constellation::{
    CaptureError, EdgePlacement, NodePlacement, PointerCapture, PointerId, Scheduler, ViewAdapter,
};

#[derive(Clone, Copy)]
pub(super) struct NodeSprite {
    pub(super) position: Vec2,
    pub(super) dragged: bool,
}

/// What the constellation last wrote, in panel-local coordinates. The frame
/// painter reads it; only the constellation writes sprites.
#[derive(Default)]
pub(super) struct Placements {
    pub(super) container: Option<Vec2>,
    pub(super) nodes: HashMap<String, NodeSprite>,
    pub(super) edges: HashMap<(String, String), (Vec2, Vec2)>,
}

impl Placements {
    pub(super) fn clear_sprites(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    /// Records the panel size; true when it differs from the previous one.
    pub(super) fn resize(&mut self, size: Vec2) -> bool {
        let changed = self
            .container
            .is_none_or(|previous| (previous - size).length_sq() > 0.25);
        self.container = Some(size);
        changed
    }
}

pub(super) struct EguiSurface {
    shared: Rc<RefCell<Placements>>,
}

impl EguiSurface {
    pub(super) fn new(shared: Rc<RefCell<Placements>>) -> Self {
        Self { shared }
    }
}

impl ViewAdapter for EguiSurface {
    fn container_size(&self) -> Option<Vec2> {
        self.shared.borrow().container
    }

    fn place_node(&mut self, placement: NodePlacement<'_>) {
        self.shared.borrow_mut().nodes.insert(
            placement.tower_id.to_owned(),
            NodeSprite {
                position: placement.position,
                dragged: placement.dragged,
            },
        );
    }

    fn place_edge(&mut self, placement: EdgePlacement<'_>) {
        self.shared.borrow_mut().edges.insert(
            (placement.from_id.to_owned(), placement.to_id.to_owned()),
            (placement.from, placement.to),
        );
    }
}

/// egui keeps routing a drag to the widget it started on, so capture only
/// has to keep one pointer per node.
#[derive(Default)]
pub(super) struct EguiPointer {
    held: HashSet<PointerId>,
}

impl PointerCapture for EguiPointer {
    fn capture(&mut self, pointer_id: PointerId, _tower_id: &str) -> Result<(), CaptureError> {
        if self.held.insert(pointer_id) {
            Ok(())
        } else {
            Err(CaptureError::Refused(format!(
                "pointer {pointer_id} is already captured"
            )))
        }
    }

    fn release(&mut self, pointer_id: PointerId) {
        self.held.remove(&pointer_id);
    }
}

pub(super) struct RepaintScheduler {
    ctx: Context,
    running: bool,
}

impl RepaintScheduler {
    pub(super) fn new(ctx: Context) -> Self {
        Self {
            ctx,
            running: false,
        }
    }
}

impl Scheduler for RepaintScheduler {
    fn start(&mut self) {
        self.running = true;
        self.ctx.request_repaint();
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
