mod forces;

use eframe::egui::Vec2;

use super::layout::clamp_to_container;
use super::{Edge, Node, PhysicsConfig};
use forces::{accumulate_anchors, accumulate_boundary, accumulate_repulsion, accumulate_springs};

/// One semi-implicit Euler step. Nodes under pointer control still exert
/// forces but are not integrated. Returns whether any node is still moving.
pub(super) fn step_physics(
    nodes: &mut [Node],
    edges: &[Edge],
    container: Vec2,
    config: &PhysicsConfig,
    delta_seconds: f32,
) -> bool {
    if nodes.is_empty() {
        return false;
    }

    let dt = if delta_seconds.is_finite() {
        delta_seconds.clamp(0.0, config.max_substep.max(0.0))
    } else {
        0.0
    };

    for node in nodes.iter_mut() {
        node.force = Vec2::ZERO;
    }

    accumulate_springs(nodes, edges, config.spring_strength);
    accumulate_repulsion(nodes, config);
    accumulate_anchors(nodes, config.anchor_strength);
    accumulate_boundary(nodes, container, config);

    let damping_factor = config.damping.clamp(0.0, 1.0).powf(dt * 60.0);
    let rest_sq = config.rest_speed * config.rest_speed;
    let mut any_motion = false;
    for node in nodes.iter_mut() {
        if node.dragged {
            continue;
        }

        let mut velocity = (node.velocity + node.force * dt) * damping_factor;
        if velocity.length_sq() < rest_sq && node.force.length_sq() < rest_sq {
            velocity = Vec2::ZERO;
        }

        let unclamped = node.position + velocity * dt;
        let position = clamp_to_container(unclamped, node.padding, container);
        if position.x != unclamped.x {
            velocity.x = 0.0;
        }
        if position.y != unclamped.y {
            velocity.y = 0.0;
        }

        node.velocity = velocity;
        node.position = position;
        if velocity.length_sq() > 0.0 {
            any_motion = true;
        }
    }

    any_motion
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

    #[test]
    fn settled_node_stays_put() {
        let config = PhysicsConfig::default();
        let mut nodes = [node_at("a", vec2(400.0, 300.0))];
        let moving = step_physics(&mut nodes, &[], vec2(800.0, 600.0), &config, 1.0 / 60.0);
        assert!(!moving);
        assert_eq!(nodes[0].position, vec2(400.0, 300.0));
    }

    #[test]
    fn long_pauses_are_clamped_to_one_substep() {
        let config = PhysicsConfig::default();
        let mut clamped = [node_at("a", vec2(300.0, 300.0))];
        clamped[0].velocity = vec2(30.0, 0.0);
        let mut single = clamped.clone();

        step_physics(&mut clamped, &[], vec2(800.0, 600.0), &config, 5.0);
        step_physics(&mut single, &[], vec2(800.0, 600.0), &config, config.max_substep);
        assert_eq!(clamped[0].position, single[0].position);
    }

    #[test]
    fn damping_is_per_sixtieth_of_a_second() {
        let config = PhysicsConfig {
            anchor_strength: 0.0,
            ..PhysicsConfig::default()
        };
        let container = vec2(800.0, 600.0);
        let mut at_60 = [node_at("a", vec2(400.0, 300.0))];
        at_60[0].velocity = vec2(100.0, 0.0);
        let mut at_120 = at_60.clone();

        step_physics(&mut at_60, &[], container, &config, 1.0 / 60.0);
        step_physics(&mut at_120, &[], container, &config, 1.0 / 120.0);
        step_physics(&mut at_120, &[], container, &config, 1.0 / 120.0);

        assert!((at_60[0].velocity.x - 100.0 * config.damping).abs() < 1e-3);
        assert!((at_120[0].velocity.x - at_60[0].velocity.x).abs() < 1e-3);
    }

    #[test]
    fn dragged_nodes_are_not_integrated() {
        let config = PhysicsConfig::default();
        let mut nodes = [node_at("a", vec2(300.0, 300.0)), node_at("b", vec2(310.0, 300.0))];
        nodes[0].dragged = true;
        step_physics(&mut nodes, &[], vec2(800.0, 600.0), &config, 1.0 / 60.0);
        assert_eq!(nodes[0].position, vec2(300.0, 300.0));
        assert!(nodes[1].position.x > 310.0);
    }

    #[test]
    fn escaping_node_is_clamped_and_stopped() {
        let config = PhysicsConfig::default();
        let mut nodes = [node_at("a", vec2(760.0, 300.0))];
        nodes[0].velocity = vec2(5000.0, 0.0);
        step_physics(&mut nodes, &[], vec2(800.0, 600.0), &config, 1.0 / 30.0);
        assert_eq!(nodes[0].position.x, 800.0 - nodes[0].padding);
        assert_eq!(nodes[0].velocity.x, 0.0);
    }
}
