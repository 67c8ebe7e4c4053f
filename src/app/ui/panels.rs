use eframe::egui::{self, Align, Context, Layout, Ui};

use super::super::ConstellationApp;

impl ConstellationApp {
    pub(in crate::app) fn show_controls(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Tower constellation");
                    ui.separator();
                    ui.label(format!("nodes: {}", self.constellation.nodes().len()));
                    ui.label(format!("edges: {}", self.constellation.edges().len()));

                    let mut visible = self.constellation.is_visible();
                    if ui.checkbox(&mut visible, "Show constellation").changed() {
                        self.set_constellation_visible(visible);
                    }
                    if ui.button("Rebuild graph").clicked() {
                        self.refresh_constellation();
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let state = if self.constellation.is_running() {
                            "running"
                        } else {
                            "stopped"
                        };
                        ui.label(format!("revision {} ({state})", self.constellation.revision()));
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| self.draw_controls(ui));
            });
    }

    fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Search");
        ui.add(egui::TextEdit::singleline(&mut self.search).hint_text("symbol or name"));

        ui.separator();
        ui.heading("Unlocked towers");
        if self.draw_unlock_toggles(ui) {
            self.refresh_constellation();
        }

        ui.separator();
        ui.heading("Physics");
        self.draw_physics_sliders(ui);
    }

    /// Returns true when the unlock set changed.
    fn draw_unlock_toggles(&mut self, ui: &mut Ui) -> bool {
        let mut host = self.host.borrow_mut();
        let roster = host.roster_mut();
        let towers = roster.towers().to_vec();

        let mut changed = false;
        for tower in &towers {
            let mut unlocked = roster.is_unlocked(&tower.id);
            let label = format!("{}  {} (tier {})", tower.label(), tower.name, tower.tier);
            if ui.checkbox(&mut unlocked, label).changed() {
                roster.set_unlocked(&tower.id, unlocked);
                changed = true;
            }
        }
        changed
    }

    fn draw_physics_sliders(&mut self, ui: &mut Ui) {
        let mut config = *self.constellation.config();
        let physics = &mut config.physics;

        ui.add(egui::Slider::new(&mut physics.spring_strength, 0.0..=30.0).text("Spring"));
        ui.add(
            egui::Slider::new(&mut physics.repulsion_strength, 0.0..=6_000_000.0)
                .logarithmic(true)
                .text("Repulsion"),
        );
        ui.add(egui::Slider::new(&mut physics.anchor_strength, 0.0..=10.0).text("Anchor pull"));
        ui.add(egui::Slider::new(&mut physics.boundary_strength, 0.0..=300.0).text("Boundary"));
        ui.add(egui::Slider::new(&mut physics.damping, 0.5..=0.99).text("Damping"));
        ui.add(
            egui::Slider::new(&mut physics.length_multiplier, 0.5..=4.0).text("Edge length"),
        );

        ui.add_space(4.0);
        let interaction = &mut config.interaction;
        ui.add(
            egui::Slider::new(&mut interaction.activation_threshold, 0.0..=24.0)
                .text("Drag threshold"),
        );
        ui.add(
            egui::Slider::new(&mut interaction.max_drag_velocity, 100.0..=6000.0)
                .text("Max fling speed"),
        );

        let restore = ui.button("Restore defaults").clicked();
        if restore {
            config = Default::default();
        }

        if config != *self.constellation.config() {
            // Edge lengths are baked in at build time.
            let rebuild = restore
                || config.physics.length_multiplier
                    != self.constellation.config().physics.length_multiplier;
            self.constellation.set_config(config);
            if rebuild {
                self.refresh_constellation();
            }
            ui.ctx().request_repaint();
        }
    }
}
