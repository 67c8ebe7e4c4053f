use std::collections::HashMap;

use eframe::egui::vec2;
use tracing::{info, warn};

use super::super::layout::tier_anchors;
use super::super::{Constellation, Edge, Node};
use super::extract::build_edges;

impl Constellation {
    /// Discards all physics state and recreates it from the host. Callers
    /// must have cancelled drags and stopped the scheduler first.
    pub(in crate::constellation) fn rebuild_graph(&mut self) {
        self.revision = self.revision.wrapping_add(1);
        self.nodes.clear();
        self.edges.clear();
        self.index_by_id.clear();

        let physics = self.config.physics;
        let roster = self.host.tower_roster();
        let unlocked = self.host.unlocked_ids();
        let default_size = vec2(physics.base_diameter, physics.base_diameter);

        let mut nodes = Vec::new();
        let mut index_by_id = HashMap::new();
        for descriptor in roster.iter().filter(|tower| unlocked.contains(&tower.id)) {
            if index_by_id.contains_key(&descriptor.id) {
                warn!(tower = %descriptor.id, "duplicate tower id in roster; keeping the first");
                continue;
            }
            let size = self
                .binding
                .as_ref()
                .and_then(|binding| binding.surface.node_size(&descriptor.id))
                .unwrap_or(default_size);
            index_by_id.insert(descriptor.id.clone(), nodes.len());
            nodes.push(Node::new(descriptor.clone(), size, &physics));
        }

        if nodes.is_empty() {
            info!(revision = self.revision, "rebuilt empty tower constellation");
            return;
        }

        let anchors = tier_anchors(&nodes, self.container, physics.max_jitter);
        for (node, anchor) in nodes.iter_mut().zip(anchors) {
            node.anchor = anchor;
            node.position = anchor;
        }

        let host = &self.host;
        let dependencies = build_edges(&roster, |tower_id| host.formula_text(tower_id));
        let edges = dependencies
            .iter()
            .filter_map(|dependency| {
                let from = *index_by_id.get(&dependency.from_id)?;
                let to = *index_by_id.get(&dependency.to_id)?;
                Some(Edge {
                    from,
                    to,
                    from_id: dependency.from_id.clone(),
                    to_id: dependency.to_id.clone(),
                    target_length: physics
                        .target_length(nodes[from].descriptor.tier, nodes[to].descriptor.tier),
                })
            })
            .collect::<Vec<_>>();

        info!(
            revision = self.revision,
            nodes = nodes.len(),
            edges = edges.len(),
            "rebuilt tower constellation"
        );

        self.nodes = nodes;
        self.edges = edges;
        self.index_by_id = index_by_id;
    }
}
