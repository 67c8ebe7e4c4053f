use std::collections::BTreeMap;

use eframe::egui::{Vec2, vec2};

use crate::util::stable_pair;

use super::Node;

fn clamp_axis(value: f32, padding: f32, extent: f32) -> f32 {
    let min = padding;
    let max = extent - padding;
    if max < min {
        extent * 0.5
    } else {
        value.clamp(min, max)
    }
}

/// Keeps `position` inside `[padding, container - padding]` on both axes. A
/// container too small for the padding pins the axis to its center.
pub(crate) fn clamp_to_container(position: Vec2, padding: f32, container: Vec2) -> Vec2 {
    vec2(
        clamp_axis(position.x, padding, container.x),
        clamp_axis(position.y, padding, container.y),
    )
}

/// Tier columns left to right in ascending tier order; members of a tier are
/// spread top to bottom in roster order with a small per-id jitter.
pub(super) fn tier_anchors(nodes: &[Node], container: Vec2, max_jitter: f32) -> Vec<Vec2> {
    let mut tiers: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for (index, node) in nodes.iter().enumerate() {
        tiers.entry(node.descriptor.tier).or_default().push(index);
    }

    let mut anchors = vec![Vec2::ZERO; nodes.len()];
    let column_spacing = container.x / (tiers.len() as f32 + 1.0);
    for (column, members) in tiers.values().enumerate() {
        let x = column_spacing * (column as f32 + 1.0);
        let row_spacing = container.y / (members.len() as f32 + 1.0);
        let jitter = max_jitter.min(column_spacing.min(row_spacing) * 0.25).max(0.0);

        for (row, &index) in members.iter().enumerate() {
            let y = row_spacing * (row as f32 + 1.0);
            let (jx, jy) = stable_pair(&nodes[index].id);
            let target = vec2(x + jx * jitter, y + jy * jitter);
            anchors[index] = clamp_to_container(target, nodes[index].padding, container);
        }
    }

    anchors
}
