mod descriptor;
mod host;
mod roster;

pub use descriptor::TowerDescriptor;
pub use host::{DetailTrigger, TowerHost};
pub use roster::{RosterError, StaticTowerHost, TowerRoster};
