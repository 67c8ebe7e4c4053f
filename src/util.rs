use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use eframe::egui::{Vec2, vec2};

/// Deterministic offsets in `[-1, 1]` derived from a tower id.
pub(crate) fn stable_pair(id: &str) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0)
}

pub(crate) fn clamp_components(value: Vec2, limit: f32) -> Vec2 {
    let limit = limit.abs();
    vec2(value.x.clamp(-limit, limit), value.y.clamp(-limit, limit))
}

pub(crate) fn golden_direction(first: usize, second: usize) -> Vec2 {
    let angle = ((first as f32) * 0.618_034 + (second as f32) * 0.414_214) * std::f32::consts::TAU;
    vec2(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_pair_is_bounded_and_repeatable() {
        for id in ["alpha", "beta", "", "ω-tower"] {
            let (x, y) = stable_pair(id);
            assert!((-1.0..=1.0).contains(&x));
            assert!((-1.0..=1.0).contains(&y));
            assert_eq!(stable_pair(id), (x, y));
        }
    }

    #[test]
    fn clamp_components_limits_each_axis() {
        let clamped = clamp_components(vec2(5000.0, -12.0), 100.0);
        assert_eq!(clamped, vec2(100.0, -12.0));
    }
}
