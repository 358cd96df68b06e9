use log::trace;

use crate::rigid_body::Body;
use crate::rigid_body_system::BodyHandle;
use crate::systems::forces::{CollisionHandler, ForceContext, ForceCreator};

use super::events::{CollisionTracker, Contact};
use super::sat::find_collision;

/// Cheap pre-filter: can the bounding circles touch at all?
pub fn may_touch(a: &Body, b: &Body) -> bool {
    a.centroid().distance(b.centroid()) <= a.radius() + b.radius()
}

/// Force creator that runs the pair test every tick and forwards
/// START/TOUCHING/END transitions to `handler`.
pub struct CollisionDetector<H> {
    a: BodyHandle,
    b: BodyHandle,
    tracker: CollisionTracker,
    handler: H,
}

impl<H: CollisionHandler> CollisionDetector<H> {
    pub fn new(a: BodyHandle, b: BodyHandle, handler: H) -> Self {
        Self {
            a,
            b,
            tracker: CollisionTracker::new(),
            handler,
        }
    }
}

impl<H: CollisionHandler> ForceCreator for CollisionDetector<H> {
    fn apply(&mut self, ctx: &mut ForceContext<'_>) {
        let (Some(body_a), Some(body_b)) = (ctx.body(self.a), ctx.body(self.b)) else {
            return;
        };

        // A broad-phase miss counts as apart, so an END still fires when the
        // bodies separate faster than the narrow phase can see.
        let (collided, axis) = if may_touch(body_a, body_b) {
            let info = find_collision(body_a.polygon(), body_b.polygon());
            ctx.counters_mut().narrow_phase_tests += 1;
            (info.collided, info.axis)
        } else {
            let axis = (body_b.centroid() - body_a.centroid()).normalize();
            ctx.counters_mut().broad_phase_rejects += 1;
            (false, axis)
        };

        if let Some(event) = self.tracker.advance(collided) {
            trace!("collision {:?} between {:?} and {:?}", event, self.a, self.b);
            ctx.counters_mut().events += 1;
            let contact = Contact { a: self.a, b: self.b, axis, event };
            self.handler.on_collision(ctx, contact);
        }
    }
}
