use crate::rigid_body::Vec2;
use crate::rigid_body_system::BodyHandle;
use crate::systems::collision::{CollisionEvent, Contact};

use super::{CollisionHandler, ForceContext};

/// Remove both bodies on first contact.
pub fn destructive(ctx: &mut ForceContext<'_>, contact: Contact) {
    if contact.event == CollisionEvent::Start {
        ctx.mark_removed(contact.a);
        ctx.mark_removed(contact.b);
    }
}

/// Exchange momentum along `axis` with the given restitution.
///
/// Uses the reduced mass `m₁m₂/(m₁+m₂)`, which degenerates to the finite
/// mass when the other body is immovable. Two immovable bodies are left
/// alone.
pub fn bounce(ctx: &mut ForceContext<'_>, a: BodyHandle, b: BodyHandle, axis: Vec2, restitution: f64) {
    if axis == Vec2::ZERO {
        return;
    }
    let Some((body_a, body_b)) = ctx.pair_mut(a, b) else {
        return;
    };
    let (m1, m2) = (body_a.mass(), body_b.mass());
    let reduced_mass = match (m1.is_infinite(), m2.is_infinite()) {
        (true, true) => return,
        (true, false) => m2,
        (false, true) => m1,
        (false, false) => m1 * m2 / (m1 + m2),
    };

    let u1 = body_a.velocity().project(axis);
    let u2 = body_b.velocity().project(axis);
    let impulse = (u2 - u1) * (reduced_mass * (1.0 + restitution));
    body_a.add_impulse(impulse);
    body_b.add_impulse(-impulse);
}

/// Impulse response on contact START.
#[derive(Clone, Copy, Debug)]
pub struct PhysicsCollision {
    restitution: f64,
}

impl PhysicsCollision {
    /// Panics if `restitution` is negative or NaN.
    pub fn new(restitution: f64) -> Self {
        assert!(restitution >= 0.0, "restitution must be non-negative, got {restitution}");
        Self { restitution }
    }

    pub fn restitution(&self) -> f64 {
        self.restitution
    }
}

impl CollisionHandler for PhysicsCollision {
    fn on_collision(&mut self, ctx: &mut ForceContext<'_>, contact: Contact) {
        if contact.event == CollisionEvent::Start {
            bounce(ctx, contact.a, contact.b, contact.axis, self.restitution);
        }
    }
}
