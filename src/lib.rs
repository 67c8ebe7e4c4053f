pub mod constellation;
pub mod tower;
mod util;

pub use constellation::{
    CaptureError, Constellation, ConstellationConfig, Edge, EdgePlacement, IgnoreReason,
    InteractionConfig, ManualScheduler, Node, NodePlacement, PhysicsConfig, PointerCapture,
    PointerId, PointerSample, PressOutcome, ReleaseOutcome, Scheduler, ViewAdapter, ViewBinding,
};
pub use tower::{DetailTrigger, StaticTowerHost, TowerDescriptor, TowerHost, TowerRoster};
