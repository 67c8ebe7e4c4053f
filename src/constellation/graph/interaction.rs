use eframe::egui::Vec2;
use tracing::{debug, warn};

use crate::tower::DetailTrigger;
use crate::util::clamp_components;

use super::super::layout::clamp_to_container;
use super::super::{CaptureError, Constellation};

pub type PointerId = u64;

/// Seconds assumed between two samples that arrive with the same or an
/// earlier timestamp.
const MIN_SAMPLE_INTERVAL: f64 = 1e-3;

/// A pointer position in view coordinates, stamped in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub position: Vec2,
    pub time: f64,
}

impl PointerSample {
    pub fn new(position: Vec2, time: f64) -> Self {
        Self { position, time }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PressOutcome {
    Captured,
    /// The drag proceeds without capture; moves still route by pointer id.
    Degraded(CaptureError),
    Ignored(IgnoreReason),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    Inactive,
    UnknownNode,
    NodeBusy,
    PointerBusy,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ReleaseOutcome {
    Tap { tower_id: String },
    Fling { tower_id: String, velocity: Vec2 },
    Ignored,
}

#[derive(Clone, Debug)]
pub(crate) struct DragState {
    pointer_id: PointerId,
    node_index: usize,
    tower_id: String,
    start_pointer: Vec2,
    start_position: Vec2,
    moved: bool,
    last_pointer: PointerSample,
    last_position: Vec2,
    velocity: Vec2,
    captured: bool,
}

impl Constellation {
    fn accepts_pointer_input(&self) -> bool {
        self.visible && self.binding.is_some() && self.scheduler.is_running()
    }

    fn drag_slot(&self, pointer_id: PointerId) -> Option<usize> {
        self.drags
            .iter()
            .position(|drag| drag.pointer_id == pointer_id)
    }

    /// The node whose footprint contains `point`, nearest center first.
    pub fn hit_test(&self, point: Vec2) -> Option<&str> {
        self.nodes
            .iter()
            .filter_map(|node| {
                let distance = (node.position - point).length();
                (distance <= node.radius()).then_some((node, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(node, _)| node.id.as_str())
    }

    pub fn is_dragging(&self, tower_id: &str) -> bool {
        self.drags.iter().any(|drag| drag.tower_id == tower_id)
    }

    pub fn pointer_down(
        &mut self,
        pointer_id: PointerId,
        tower_id: &str,
        sample: PointerSample,
    ) -> PressOutcome {
        if !self.accepts_pointer_input() {
            return PressOutcome::Ignored(IgnoreReason::Inactive);
        }
        let Some(&node_index) = self.index_by_id.get(tower_id) else {
            return PressOutcome::Ignored(IgnoreReason::UnknownNode);
        };
        if self.drag_slot(pointer_id).is_some() {
            return PressOutcome::Ignored(IgnoreReason::PointerBusy);
        }
        if self.nodes[node_index].dragged {
            return PressOutcome::Ignored(IgnoreReason::NodeBusy);
        }

        let capture = match self.binding.as_mut() {
            Some(binding) => binding.pointer.capture(pointer_id, tower_id),
            None => return PressOutcome::Ignored(IgnoreReason::Inactive),
        };

        let node = &mut self.nodes[node_index];
        node.velocity = Vec2::ZERO;
        node.dragged = true;
        self.drags.push(DragState {
            pointer_id,
            node_index,
            tower_id: tower_id.to_owned(),
            start_pointer: sample.position,
            start_position: node.position,
            moved: false,
            last_pointer: sample,
            last_position: node.position,
            velocity: Vec2::ZERO,
            captured: capture.is_ok(),
        });

        match capture {
            Ok(()) => {
                debug!(pointer_id, tower = tower_id, "drag pressed");
                PressOutcome::Captured
            }
            Err(error) => {
                warn!(pointer_id, tower = tower_id, %error, "pointer capture failed; dragging without capture");
                PressOutcome::Degraded(error)
            }
        }
    }

    /// Moves the node held by `pointer_id`. Returns false when the pointer
    /// holds nothing.
    pub fn pointer_move(&mut self, pointer_id: PointerId, sample: PointerSample) -> bool {
        let Some(slot) = self.drag_slot(pointer_id) else {
            return false;
        };

        let interaction = self.config.interaction;
        let container = self.container;
        let drag = &mut self.drags[slot];
        let Some(node) = self.nodes.get_mut(drag.node_index) else {
            return false;
        };

        let delta = sample.position - drag.start_pointer;
        if !drag.moved && delta.length() > interaction.activation_threshold {
            drag.moved = true;
            debug!(pointer_id, tower = %drag.tower_id, "drag activated");
        }

        let candidate = clamp_to_container(drag.start_position + delta, node.padding, container);
        // Coalesced or same-frame samples can share a timestamp.
        let elapsed = (sample.time - drag.last_pointer.time).max(MIN_SAMPLE_INTERVAL);
        let estimate = (candidate - drag.last_position) / elapsed as f32;
        drag.velocity = clamp_components(estimate, interaction.max_drag_velocity);

        node.position = candidate;
        node.velocity = Vec2::ZERO;
        drag.last_pointer = sample;
        drag.last_position = candidate;

        self.sync_view();
        true
    }

    /// Ends the drag held by `pointer_id`: a tap opens the tower's detail, a
    /// drag past the activation threshold flings the node.
    pub fn pointer_up(&mut self, pointer_id: PointerId) -> ReleaseOutcome {
        let Some(slot) = self.drag_slot(pointer_id) else {
            return ReleaseOutcome::Ignored;
        };
        let drag = self.drags.swap_remove(slot);
        self.release_capture(&drag);

        let Some(node) = self.nodes.get_mut(drag.node_index) else {
            return ReleaseOutcome::Ignored;
        };
        node.dragged = false;

        if drag.moved {
            node.velocity = drag.velocity;
            debug!(pointer_id, tower = %drag.tower_id, velocity = ?drag.velocity, "node flung");
            return ReleaseOutcome::Fling {
                tower_id: drag.tower_id,
                velocity: drag.velocity,
            };
        }

        node.velocity = Vec2::ZERO;
        let trigger = DetailTrigger {
            pointer_id,
            position: node.position,
        };
        self.host.open_detail(&drag.tower_id, &trigger);
        debug!(pointer_id, tower = %drag.tower_id, "node tapped");
        ReleaseOutcome::Tap {
            tower_id: drag.tower_id,
        }
    }

    /// Abandons the drag held by `pointer_id` without a tap or a fling.
    pub fn pointer_cancel(&mut self, pointer_id: PointerId) -> bool {
        let Some(slot) = self.drag_slot(pointer_id) else {
            return false;
        };
        let drag = self.drags.swap_remove(slot);
        self.abandon_drag(drag);
        true
    }

    pub(in crate::constellation) fn cancel_all_drags(&mut self) {
        for drag in std::mem::take(&mut self.drags) {
            self.abandon_drag(drag);
        }
    }

    fn abandon_drag(&mut self, drag: DragState) {
        self.release_capture(&drag);
        if let Some(node) = self.nodes.get_mut(drag.node_index) {
            node.dragged = false;
            node.velocity = Vec2::ZERO;
        }
        debug!(pointer_id = drag.pointer_id, tower = %drag.tower_id, "drag cancelled");
    }

    fn release_capture(&mut self, drag: &DragState) {
        if !drag.captured {
            return;
        }
        if let Some(binding) = self.binding.as_mut() {
            binding.pointer.release(drag.pointer_id);
        }
    }
}
