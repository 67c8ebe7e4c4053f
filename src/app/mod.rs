use std::cell::RefCell;
use std::rc::Rc;

use eframe::egui::{self, Context};
use tower_constellation::{
    Constellation, ConstellationConfig, PointerId, StaticTowerHost, TowerRoster, ViewBinding,
};
use tracing::debug;

mod graph;
mod render_utils;
mod surface;
mod ui;

use surface::{EguiPointer, EguiSurface, Placements, RepaintScheduler};

const MOUSE_POINTER: PointerId = 0;

pub struct ConstellationApp {
    constellation: Constellation,
    host: Rc<RefCell<StaticTowerHost>>,
    placements: Rc<RefCell<Placements>>,
    search: String,
    selected: Option<String>,
    pointer_held: bool,
}

impl ConstellationApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        roster: TowerRoster,
        config: ConstellationConfig,
    ) -> Self {
        let host = Rc::new(RefCell::new(StaticTowerHost::new(roster)));
        let placements = Rc::new(RefCell::new(Placements::default()));

        let mut constellation = Constellation::new(
            Rc::clone(&host),
            RepaintScheduler::new(cc.egui_ctx.clone()),
            config,
        );
        constellation.initialize(ViewBinding::new(
            EguiSurface::new(Rc::clone(&placements)),
            EguiPointer::default(),
        ));
        constellation.set_visible(true);

        Self {
            constellation,
            host,
            placements,
            search: String::new(),
            selected: None,
            pointer_held: false,
        }
    }

    fn refresh_constellation(&mut self) {
        self.pointer_held = false;
        self.placements.borrow_mut().clear_sprites();
        self.constellation.refresh();
    }

    fn set_constellation_visible(&mut self, visible: bool) {
        self.pointer_held = false;
        self.placements.borrow_mut().clear_sprites();
        self.constellation.set_visible(visible);
    }

    fn collect_detail_requests(&mut self) -> bool {
        let requests = self.host.borrow_mut().take_detail_requests();
        let Some((tower_id, trigger)) = requests.into_iter().last() else {
            return false;
        };
        debug!(tower = %tower_id, x = trigger.position.x, y = trigger.position.y, "opening tower detail");
        self.selected = Some(tower_id);
        true
    }
}

impl eframe::App for ConstellationApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.show_controls(ctx);
        self.show_details(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_constellation(ui));

        if self.collect_detail_requests() {
            ctx.request_repaint();
        }
    }
}
