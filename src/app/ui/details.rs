use eframe::egui::{self, Context, RichText, Ui};

use super::super::ConstellationApp;

impl ConstellationApp {
    pub(in crate::app) fn show_details(&mut self, ctx: &Context) {
        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_details(ui));
    }

    fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Tower Details");
        ui.add_space(6.0);

        let Some(selected_id) = self.selected.clone() else {
            ui.label("Tap a tower in the constellation.");
            return;
        };

        let host = self.host.borrow();
        let roster = host.roster();
        let Some(tower) = roster.tower(&selected_id) else {
            drop(host);
            self.selected = None;
            return;
        };

        ui.label(RichText::new(format!("{}  {}", tower.label(), tower.name)).strong());
        ui.small(tower.id.as_str());
        ui.add_space(6.0);
        ui.label(format!("Tier: {}", tower.tier));
        ui.label(format!(
            "Unlocked: {}",
            if roster.is_unlocked(&tower.id) { "yes" } else { "no" }
        ));

        ui.separator();
        ui.label(RichText::new("Formula").strong());
        let formula = roster.formula(&tower.id);
        if formula.trim().is_empty() {
            ui.label("No formula.");
        } else {
            ui.monospace(formula);
        }

        ui.separator();
        ui.label(RichText::new("Linked towers").strong());
        let neighbors = self.constellation.neighbors(&selected_id);
        let mut clicked = None;
        if neighbors.is_empty() {
            ui.label("No dependencies in the current constellation.");
        } else {
            for neighbor in neighbors {
                let text = roster
                    .tower(neighbor)
                    .map(|other| format!("{}  {}", other.label(), other.name))
                    .unwrap_or_else(|| neighbor.to_owned());
                if ui.link(text).clicked() {
                    clicked = Some(neighbor.to_owned());
                }
            }
        }

        ui.add_space(8.0);
        let close = ui.button("Close").clicked();
        drop(host);

        if close {
            self.selected = None;
        } else if clicked.is_some() {
            self.selected = clicked;
        }
    }
}
