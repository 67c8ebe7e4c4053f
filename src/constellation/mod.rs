use std::collections::HashMap;

use eframe::egui::{Vec2, vec2};
use tracing::debug;

use crate::tower::{TowerDescriptor, TowerHost};

mod config;
pub mod graph;
mod layout;
mod physics;
mod scheduler;
mod view;

pub use config::{ConstellationConfig, InteractionConfig, PhysicsConfig};
pub use graph::interaction::{IgnoreReason, PointerId, PointerSample, PressOutcome, ReleaseOutcome};
pub use scheduler::{ManualScheduler, Scheduler};
pub use view::{
    CaptureError, EdgePlacement, ImplicitCapture, NodePlacement, PointerCapture, ViewAdapter,
    ViewBinding,
};

use graph::interaction::DragState;
use physics::step_physics;
use view::sync_view;

#[derive(Clone, Debug)]
pub struct Node {
    id: String,
    descriptor: TowerDescriptor,
    position: Vec2,
    anchor: Vec2,
    velocity: Vec2,
    force: Vec2,
    size: Vec2,
    padding: f32,
    dragged: bool,
}

impl Node {
    pub(crate) fn new(descriptor: TowerDescriptor, size: Vec2, physics: &PhysicsConfig) -> Self {
        let size = vec2(size.x.max(0.0), size.y.max(0.0));
        let padding = physics.padding_for(size.x.max(size.y) * 0.5);
        Self {
            id: descriptor.id.clone(),
            descriptor,
            position: Vec2::ZERO,
            anchor: Vec2::ZERO,
            velocity: Vec2::ZERO,
            force: Vec2::ZERO,
            size,
            padding,
            dragged: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn descriptor(&self) -> &TowerDescriptor {
        &self.descriptor
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Net force from the last tick.
    pub fn force(&self) -> Vec2 {
        self.force
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn radius(&self) -> f32 {
        self.size.x.max(self.size.y) * 0.5
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    pub fn is_dragged(&self) -> bool {
        self.dragged
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    from: usize,
    to: usize,
    from_id: String,
    to_id: String,
    target_length: f32,
}

impl Edge {
    pub fn from_id(&self) -> &str {
        &self.from_id
    }

    pub fn to_id(&self) -> &str {
        &self.to_id
    }

    pub fn target_length(&self) -> f32 {
        self.target_length
    }

    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.from_id == a && self.to_id == b) || (self.from_id == b && self.to_id == a)
    }
}

/// A live dependency constellation: the graph inferred from tower formulas,
/// its physics state, in-flight drags and the view it renders into.
pub struct Constellation {
    host: Box<dyn TowerHost>,
    scheduler: Box<dyn Scheduler>,
    config: ConstellationConfig,
    binding: Option<ViewBinding>,
    visible: bool,
    container: Vec2,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    index_by_id: HashMap<String, usize>,
    drags: Vec<DragState>,
    revision: u64,
}

impl Constellation {
    pub fn new(
        host: impl TowerHost + 'static,
        scheduler: impl Scheduler + 'static,
        config: ConstellationConfig,
    ) -> Self {
        Self {
            host: Box::new(host),
            scheduler: Box::new(scheduler),
            config,
            binding: None,
            visible: false,
            container: Vec2::ZERO,
            nodes: Vec::new(),
            edges: Vec::new(),
            index_by_id: HashMap::new(),
            drags: Vec::new(),
            revision: 0,
        }
    }

    /// Binds the view. A previous binding is torn down first.
    pub fn initialize(&mut self, binding: ViewBinding) {
        self.teardown();
        self.binding = Some(binding);
        if self.visible {
            self.refresh();
        }
    }

    /// Rebuilds the whole graph from the host's current roster and unlock set.
    pub fn refresh(&mut self) {
        let Some(container) = self.container_size() else {
            debug!("refresh skipped: no view container bound");
            return;
        };

        self.teardown();
        self.container = container;
        self.rebuild_graph();

        if self.visible && !self.nodes.is_empty() {
            self.scheduler.start();
            debug!(revision = self.revision, "constellation scheduler started");
            self.sync_view();
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if visible {
            self.refresh();
        } else {
            self.teardown();
        }
    }

    /// Advances the simulation by `delta_seconds` and writes the result to the
    /// view. Does nothing while the scheduler is stopped. Returns whether the
    /// layout is still in motion.
    pub fn tick(&mut self, delta_seconds: f32) -> bool {
        if !self.scheduler.is_running() {
            return false;
        }
        let Some(binding) = self.binding.as_mut() else {
            return false;
        };

        let moving = step_physics(
            &mut self.nodes,
            &self.edges,
            self.container,
            &self.config.physics,
            delta_seconds,
        );
        sync_view(binding.surface.as_mut(), &self.nodes, &self.edges);
        moving || !self.drags.is_empty()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    pub fn config(&self) -> &ConstellationConfig {
        &self.config
    }

    /// Takes effect on the next tick; anchors and target lengths are only
    /// recomputed by `refresh`.
    pub fn set_config(&mut self, config: ConstellationConfig) {
        self.config = config;
    }

    pub fn container(&self) -> Vec2 {
        self.container
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, tower_id: &str) -> Option<&Node> {
        self.index_by_id
            .get(tower_id)
            .and_then(|&index| self.nodes.get(index))
    }

    /// Ids of the towers linked to `tower_id` by an edge.
    pub fn neighbors(&self, tower_id: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter_map(|edge| {
                if edge.from_id == tower_id {
                    Some(edge.to_id.as_str())
                } else if edge.to_id == tower_id {
                    Some(edge.from_id.as_str())
                } else {
                    None
                }
            })
            .collect()
    }

    /// Bumped on every rebuild.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn container_size(&self) -> Option<Vec2> {
        self.binding
            .as_ref()
            .and_then(|binding| binding.surface.container_size())
            .filter(|size| size.x.is_finite() && size.y.is_finite() && size.x > 0.0 && size.y > 0.0)
    }

    fn sync_view(&mut self) {
        if !self.scheduler.is_running() {
            return;
        }
        if let Some(binding) = self.binding.as_mut() {
            sync_view(binding.surface.as_mut(), &self.nodes, &self.edges);
        }
    }

    fn teardown(&mut self) {
        self.cancel_all_drags();
        if self.scheduler.is_running() {
            debug!(revision = self.revision, "constellation scheduler stopped");
        }
        self.scheduler.stop();
    }
}

impl Drop for Constellation {
    fn drop(&mut self) {
        self.teardown();
    }
}
