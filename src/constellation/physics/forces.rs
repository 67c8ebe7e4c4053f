use eframe::egui::Vec2;

use crate::util::golden_direction;

use super::super::{Edge, Node, PhysicsConfig};

fn separation_direction(delta: Vec2, distance: f32, first: usize, second: usize) -> Vec2 {
    if distance > 0.0001 {
        delta / distance
    } else {
        golden_direction(first, second)
    }
}

pub(super) fn accumulate_springs(nodes: &mut [Node], edges: &[Edge], spring_strength: f32) {
    let node_count = nodes.len();
    for edge in edges {
        let (from, to) = (edge.from, edge.to);
        if from >= node_count || to >= node_count || from == to {
            continue;
        }

        let delta = nodes[to].position - nodes[from].position;
        let distance = delta.length();
        let direction = separation_direction(delta, distance, from, to);
        let pull = direction * (spring_strength * (distance - edge.target_length));

        nodes[from].force += pull;
        nodes[to].force -= pull;
    }
}

pub(super) fn accumulate_repulsion(nodes: &mut [Node], config: &PhysicsConfig) {
    if config.repulsion_strength <= 0.0 {
        return;
    }

    let node_count = nodes.len();
    for i in 0..node_count {
        for j in (i + 1)..node_count {
            let delta = nodes[i].position - nodes[j].position;
            let distance = delta.length();
            let direction = separation_direction(delta, distance, i, j);

            let min_separation =
                (nodes[i].radius() + nodes[j].radius()) * config.min_separation_ratio;
            let effective = distance
                .max(config.distance_floor)
                .max(min_separation)
                .max(f32::EPSILON);
            let push = direction * (config.repulsion_strength / (effective * effective));

            nodes[i].force += push;
            nodes[j].force -= push;
        }
    }
}

pub(super) fn accumulate_anchors(nodes: &mut [Node], anchor_strength: f32) {
    for node in nodes {
        node.force += (node.anchor - node.position) * anchor_strength;
    }
}

fn axis_penetration(value: f32, inset: f32, extent: f32) -> f32 {
    let min = inset;
    let max = extent - inset;
    if max < min {
        extent * 0.5 - value
    } else if value < min {
        min - value
    } else if value > max {
        max - value
    } else {
        0.0
    }
}

pub(super) fn accumulate_boundary(nodes: &mut [Node], container: Vec2, config: &PhysicsConfig) {
    for node in nodes {
        let inset = node.padding + config.boundary_margin.max(0.0);
        node.force.x += axis_penetration(node.position.x, inset, container.x) * config.boundary_strength;
        node.force.y += axis_penetration(node.position.y, inset, container.y) * config.boundary_strength;
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;
    use crate::tower::TowerDescriptor;

    fn node_at(id: &str, position: Vec2) -> Node {
        let physics = PhysicsConfig::default();
        let mut node = Node::new(
            TowerDescriptor::new(id, id, id, 0),
            vec2(physics.base_diameter, physics.base_diameter),
            &physics,
        );
        node.position = position;
        node.anchor = position;
        node
    }

    fn edge(from: usize, to: usize, target_length: f32) -> Edge {
        Edge {
            from,
            to,
            from_id: String::new(),
            to_id: String::new(),
            target_length,
        }
    }

    #[test]
    fn stretched_spring_pulls_endpoints_together() {
        let mut nodes = [node_at("a", vec2(100.0, 100.0)), node_at("b", vec2(300.0, 100.0))];
        accumulate_springs(&mut nodes, &[edge(0, 1, 100.0)], 2.0);
        assert_eq!(nodes[0].force, vec2(200.0, 0.0));
        assert_eq!(nodes[1].force, vec2(-200.0, 0.0));
    }

    #[test]
    fn compressed_spring_pushes_endpoints_apart() {
        let mut nodes = [node_at("a", vec2(100.0, 100.0)), node_at("b", vec2(150.0, 100.0))];
        accumulate_springs(&mut nodes, &[edge(0, 1, 100.0)], 1.0);
        assert!(nodes[0].force.x < 0.0);
        assert!(nodes[1].force.x > 0.0);
    }

    #[test]
    fn repulsion_is_symmetric_and_floored() {
        let config = PhysicsConfig::default();
        let mut nodes = [node_at("a", vec2(200.0, 200.0)), node_at("b", vec2(200.0, 200.0))];
        accumulate_repulsion(&mut nodes, &config);
        let total = nodes[0].force + nodes[1].force;
        assert!(total.length() < 0.001);
        assert!(nodes[0].force.length().is_finite());
        assert!(nodes[0].force.length() > 0.0);
    }

    #[test]
    fn boundary_pushes_back_inside() {
        let config = PhysicsConfig::default();
        let mut nodes = [node_at("a", vec2(10.0, 590.0))];
        accumulate_boundary(&mut nodes, vec2(800.0, 600.0), &config);
        assert!(nodes[0].force.x > 0.0);
        assert!(nodes[0].force.y < 0.0);
    }

    #[test]
    fn anchored_node_near_the_edge_feels_no_boundary_force() {
        let config = PhysicsConfig::default();
        let mut nodes = [node_at("a", vec2(40.0, 300.0))];
        assert!(nodes[0].position.x > nodes[0].padding);
        accumulate_boundary(&mut nodes, vec2(800.0, 600.0), &config);
        accumulate_anchors(&mut nodes, config.anchor_strength);
        assert_eq!(nodes[0].force, Vec2::ZERO);
    }

    #[test]
    fn boundary_margin_pushes_from_inside_the_band() {
        let config = PhysicsConfig {
            boundary_margin: 12.0,
            ..PhysicsConfig::default()
        };
        let mut nodes = [node_at("a", vec2(40.0, 300.0))];
        accumulate_boundary(&mut nodes, vec2(800.0, 600.0), &config);
        assert!(nodes[0].force.x > 0.0);
        assert_eq!(nodes[0].force.y, 0.0);
    }

    #[test]
    fn anchor_pulls_toward_home() {
        let mut nodes = [node_at("a", vec2(10.0, 10.0))];
        nodes[0].anchor = vec2(20.0, 0.0);
        accumulate_anchors(&mut nodes, 0.5);
        assert_eq!(nodes[0].force, vec2(5.0, -5.0));
    }
}
