//! Collision detection - SAT narrow phase, bounding-circle broad phase, and
//! the per-pair START/TOUCHING/END state machine.

mod sat;
mod events;
mod detector;

pub use detector::{may_touch, CollisionDetector};
pub use events::{CollisionEvent, CollisionTracker, Contact};
pub use sat::{find_collision, CollisionInfo};

/// Collision work done during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionCounters {
    pub narrow_phase_tests: u32,
    pub broad_phase_rejects: u32,
    pub events: u32,
}
