use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use eframe::egui::Vec2;

use crate::constellation::PointerId;

use super::TowerDescriptor;

/// Where a tap that opens a tower's detail view came from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetailTrigger {
    pub pointer_id: PointerId,
    pub position: Vec2,
}

/// The application that owns the tower roster.
pub trait TowerHost {
    fn tower_roster(&self) -> Vec<TowerDescriptor>;

    fn unlocked_ids(&self) -> HashSet<String>;

    /// Plain-text formula source; empty when the tower has none.
    fn formula_text(&self, tower_id: &str) -> String;

    fn open_detail(&mut self, tower_id: &str, trigger: &DetailTrigger);
}

impl<T: TowerHost> TowerHost for Rc<RefCell<T>> {
    fn tower_roster(&self) -> Vec<TowerDescriptor> {
        self.borrow().tower_roster()
    }

    fn unlocked_ids(&self) -> HashSet<String> {
        self.borrow().unlocked_ids()
    }

    fn formula_text(&self, tower_id: &str) -> String {
        self.borrow().formula_text(tower_id)
    }

    fn open_detail(&mut self, tower_id: &str, trigger: &DetailTrigger) {
        self.borrow_mut().open_detail(tower_id, trigger);
    }
}
