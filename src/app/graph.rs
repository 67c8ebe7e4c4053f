use std::collections::HashSet;

use eframe::egui::{self, Align2, Color32, FontId, Rect, Sense, Stroke, Ui, Vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use tower_constellation::{PointerSample, PressOutcome, ReleaseOutcome};
use tracing::debug;

use super::render_utils::{draw_background, highlight, muted, tier_color};
use super::{ConstellationApp, MOUSE_POINTER};

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_lowercase(), &query.to_lowercase()))
}

impl ConstellationApp {
    fn search_matches(&self) -> Option<HashSet<String>> {
        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        let matcher = SkimMatcherV2::default();
        let matches = self
            .constellation
            .nodes()
            .iter()
            .filter(|node| {
                let descriptor = node.descriptor();
                fuzzy_match_score(&matcher, &descriptor.name, query).is_some()
                    || fuzzy_match_score(&matcher, descriptor.label(), query).is_some()
            })
            .map(|node| node.id().to_owned())
            .collect();
        Some(matches)
    }

    fn forward_pointer(&mut self, ui: &Ui, rect: Rect, response: &egui::Response) {
        let (pressed, released, interact, latest, time, focused) = ui.input(|input| {
            (
                input.pointer.primary_pressed(),
                input.pointer.primary_released(),
                input.pointer.interact_pos(),
                input.pointer.latest_pos(),
                input.time,
                input.focused,
            )
        });

        if self.pointer_held && !focused {
            self.constellation.pointer_cancel(MOUSE_POINTER);
            self.pointer_held = false;
            debug!("drag cancelled: window lost focus");
            return;
        }

        if pressed
            && response.hovered()
            && let Some(position) = interact
        {
            let local = position - rect.min;
            let hit = self.constellation.hit_test(local).map(str::to_owned);
            if let Some(tower_id) = hit {
                let outcome = self.constellation.pointer_down(
                    MOUSE_POINTER,
                    &tower_id,
                    PointerSample::new(local, time),
                );
                self.pointer_held = !matches!(outcome, PressOutcome::Ignored(_));
            }
        }

        if !self.pointer_held {
            return;
        }

        if let Some(position) = latest {
            self.constellation
                .pointer_move(MOUSE_POINTER, PointerSample::new(position - rect.min, time));
        }

        if released {
            self.pointer_held = false;
            match self.constellation.pointer_up(MOUSE_POINTER) {
                ReleaseOutcome::Tap { tower_id } => debug!(tower = %tower_id, "tower tapped"),
                ReleaseOutcome::Fling { tower_id, velocity } => {
                    debug!(tower = %tower_id, vx = velocity.x, vy = velocity.y, "tower flung");
                }
                ReleaseOutcome::Ignored => {}
            }
        }
    }

    pub(super) fn draw_constellation(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        draw_background(&painter, rect);

        if !self.constellation.is_visible() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "Constellation hidden",
                FontId::proportional(16.0),
                Color32::from_gray(150),
            );
            return;
        }

        let resized = self.placements.borrow_mut().resize(rect.size());
        if resized {
            self.refresh_constellation();
        }

        self.forward_pointer(ui, rect, &response);

        let delta_seconds = ui.input(|input| input.stable_dt);
        if self.constellation.tick(delta_seconds) {
            ui.ctx().request_repaint();
        }

        if self.constellation.nodes().is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No unlocked towers",
                FontId::proportional(16.0),
                Color32::from_gray(150),
            );
            return;
        }

        let matches = self.search_matches();
        let selected = self.selected.as_deref();
        let focus = selected.map(|id| {
            let mut focus = self
                .constellation
                .neighbors(id)
                .into_iter()
                .map(str::to_owned)
                .collect::<HashSet<_>>();
            focus.insert(id.to_owned());
            focus
        });
        let emphasized = |id: &str| {
            let in_focus = focus.as_ref().is_none_or(|focus| focus.contains(id));
            let in_search = matches.as_ref().is_none_or(|matches| matches.contains(id));
            in_focus && in_search
        };

        let max_tier = self
            .constellation
            .nodes()
            .iter()
            .map(|node| node.descriptor().tier)
            .max()
            .unwrap_or(0);
        let origin = rect.min.to_vec2();
        let placements = self.placements.borrow();

        for ((from_id, to_id), (from, to)) in &placements.edges {
            let lit = emphasized(from_id) && emphasized(to_id);
            let color = if lit {
                Color32::from_rgba_unmultiplied(170, 190, 215, 150)
            } else {
                Color32::from_rgba_unmultiplied(90, 100, 115, 50)
            };
            let width = if lit { 1.6 } else { 1.0 };
            painter.line_segment(
                [(*from + origin).to_pos2(), (*to + origin).to_pos2()],
                Stroke::new(width, color),
            );
        }

        for node in self.constellation.nodes() {
            let Some(sprite) = placements.nodes.get(node.id()) else {
                continue;
            };
            let center = (sprite.position + origin).to_pos2();
            let radius = node.radius();
            let base = tier_color(node.descriptor().tier, max_tier);
            let fill = if sprite.dragged {
                highlight(base)
            } else if emphasized(node.id()) {
                base
            } else {
                muted(base, 0.35)
            };

            painter.circle_filled(center, radius, fill);
            if selected == Some(node.id()) {
                painter.circle_stroke(center, radius + 3.0, Stroke::new(2.0, Color32::WHITE));
            }
            painter.text(
                center,
                Align2::CENTER_CENTER,
                node.descriptor().label(),
                FontId::proportional((radius * 0.7).clamp(10.0, 28.0)),
                Color32::from_gray(240),
            );
            painter.text(
                center + Vec2::new(0.0, radius + 10.0),
                Align2::CENTER_CENTER,
                &node.descriptor().name,
                FontId::proportional(12.0),
                muted(Color32::from_gray(220), if emphasized(node.id()) { 1.0 } else { 0.5 }),
            );
        }
    }
}
