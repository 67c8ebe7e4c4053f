use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConstellationConfig {
    pub physics: PhysicsConfig,
    pub interaction: InteractionConfig,
}

impl ConstellationConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid constellation config in {}", path.display()))
    }
}

/// Tunables for layout and the per-tick force model. Lengths are in view
/// pixels, strengths in pixels per second squared per unit of offset.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub base_diameter: f32,
    pub length_multiplier: f32,
    pub padding_multiplier: f32,
    pub spring_strength: f32,
    pub repulsion_strength: f32,
    pub distance_floor: f32,
    pub min_separation_ratio: f32,
    pub anchor_strength: f32,
    pub boundary_strength: f32,
    /// Band inside the padded bounds where the boundary force already pushes.
    /// Zero applies it only past the bounds; a positive band keeps anchors that
    /// fall inside it from ever settling.
    pub boundary_margin: f32,
    /// Velocity retained per 1/60 s.
    pub damping: f32,
    pub max_substep: f32,
    pub max_jitter: f32,
    pub rest_speed: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            base_diameter: 64.0,
            length_multiplier: 1.75,
            padding_multiplier: 0.6,
            spring_strength: 6.0,
            repulsion_strength: 1_600_000.0,
            distance_floor: 12.0,
            min_separation_ratio: 0.85,
            anchor_strength: 1.2,
            boundary_strength: 60.0,
            boundary_margin: 0.0,
            damping: 0.9,
            max_substep: 1.0 / 30.0,
            max_jitter: 18.0,
            rest_speed: 0.5,
        }
    }
}

impl PhysicsConfig {
    pub fn target_length(&self, tier_a: u32, tier_b: u32) -> f32 {
        let tier_distance = tier_a.abs_diff(tier_b).max(1) as f32;
        self.base_diameter * self.length_multiplier * tier_distance
    }

    pub fn padding_for(&self, node_radius: f32) -> f32 {
        node_radius.max(self.base_diameter * self.padding_multiplier)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Pointer travel, in pixels, before a press becomes a drag.
    pub activation_threshold: f32,
    pub max_drag_velocity: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            activation_threshold: 4.0,
            max_drag_velocity: 2400.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: ConstellationConfig =
            serde_json::from_str(r#"{ "physics": { "spring_strength": 2.5 } }"#).unwrap();
        assert_eq!(config.physics.spring_strength, 2.5);
        assert_eq!(config.physics.base_diameter, 64.0);
        assert_eq!(config.interaction, InteractionConfig::default());
    }

    #[test]
    fn target_length_scales_with_tier_distance() {
        let physics = PhysicsConfig::default();
        let unit = physics.base_diameter * physics.length_multiplier;
        assert_eq!(physics.target_length(3, 3), unit);
        assert_eq!(physics.target_length(1, 2), unit);
        assert_eq!(physics.target_length(4, 1), unit * 3.0);
    }

    #[test]
    fn padding_never_drops_below_node_radius() {
        let physics = PhysicsConfig::default();
        assert_eq!(physics.padding_for(10.0), 64.0 * 0.6);
        assert_eq!(physics.padding_for(80.0), 80.0);
    }
}
