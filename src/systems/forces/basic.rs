use crate::rigid_body::Vec2;
use crate::rigid_body_system::BodyHandle;

use super::{ForceContext, ForceCreator};

/// Newtonian attraction between two bodies, `F = G·m₁·m₂/d²`.
///
/// Skipped while the bounding circles overlap, where `d` can approach zero,
/// and when either body is immovable.
#[derive(Clone, Copy, Debug)]
pub struct Gravity {
    pub g: f64,
    pub a: BodyHandle,
    pub b: BodyHandle,
}

impl Gravity {
    pub fn new(g: f64, a: BodyHandle, b: BodyHandle) -> Self {
        Self { g, a, b }
    }
}

fn apply_gravity(ctx: &mut ForceContext<'_>, g: f64, a: BodyHandle, b: BodyHandle) {
    let Some((body_a, body_b)) = ctx.pair_mut(a, b) else {
        return;
    };
    if !body_a.mass().is_finite() || !body_b.mass().is_finite() {
        return;
    }
    let r12 = body_b.centroid() - body_a.centroid();
    let distance = r12.length();
    if distance <= body_a.radius() + body_b.radius() {
        return;
    }
    let f12 = r12 * (g * body_a.mass() * body_b.mass() / distance.powi(3));
    body_a.add_force(f12);
    body_b.add_force(-f12);
}

impl ForceCreator for Gravity {
    fn apply(&mut self, ctx: &mut ForceContext<'_>) {
        apply_gravity(ctx, self.g, self.a, self.b);
    }
}

/// Gravity that only pulls while one of the bodies is airborne, so grounded
/// bodies are not pressed into their platform.
#[derive(Clone, Copy, Debug)]
pub struct PlatformGravity(pub Gravity);

impl PlatformGravity {
    pub fn new(g: f64, a: BodyHandle, b: BodyHandle) -> Self {
        Self(Gravity::new(g, a, b))
    }
}

impl ForceCreator for PlatformGravity {
    fn apply(&mut self, ctx: &mut ForceContext<'_>) {
        let Gravity { g, a, b } = self.0;
        let falling = |h: BodyHandle| ctx.info(h).is_some_and(|info| info.is_falling());
        if falling(a) || falling(b) {
            apply_gravity(ctx, g, a, b);
        }
    }
}

/// Hooke spring with zero rest length, `F = k·(c₂ − c₁)`.
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    k: f64,
    a: BodyHandle,
    b: BodyHandle,
}

impl Spring {
    /// Panics if `k` is negative or NaN.
    pub fn new(k: f64, a: BodyHandle, b: BodyHandle) -> Self {
        assert!(k >= 0.0, "spring constant must be non-negative, got {k}");
        Self { k, a, b }
    }
}

impl ForceCreator for Spring {
    fn apply(&mut self, ctx: &mut ForceContext<'_>) {
        let Some((body_a, body_b)) = ctx.pair_mut(self.a, self.b) else {
            return;
        };
        let f12 = (body_b.centroid() - body_a.centroid()) * self.k;
        body_a.add_force(f12);
        body_b.add_force(-f12);
    }
}

/// Linear drag, `F = −γ·v`.
#[derive(Clone, Copy, Debug)]
pub struct Drag {
    gamma: f64,
    body: BodyHandle,
}

impl Drag {
    /// Panics if `gamma` is negative or NaN.
    pub fn new(gamma: f64, body: BodyHandle) -> Self {
        assert!(gamma >= 0.0, "drag coefficient must be non-negative, got {gamma}");
        Self { gamma, body }
    }
}

impl ForceCreator for Drag {
    fn apply(&mut self, ctx: &mut ForceContext<'_>) {
        if let Some(body) = ctx.body_mut(self.body) {
            let force = body.velocity() * -self.gamma;
            body.add_force(force);
        }
    }
}

/// Drag on the horizontal component only.
#[derive(Clone, Copy, Debug)]
pub struct Friction {
    gamma: f64,
    body: BodyHandle,
}

impl Friction {
    /// Panics if `gamma` is negative or NaN.
    pub fn new(gamma: f64, body: BodyHandle) -> Self {
        assert!(gamma >= 0.0, "friction coefficient must be non-negative, got {gamma}");
        Self { gamma, body }
    }
}

impl ForceCreator for Friction {
    fn apply(&mut self, ctx: &mut ForceContext<'_>) {
        if let Some(body) = ctx.body_mut(self.body) {
            let force = Vec2::new(-self.gamma * body.velocity().x, 0.0);
            body.add_force(force);
        }
    }
}
