//! Force handlers - callbacks invoked once per tick, each bound to the
//! bodies it depends on.
//!
//! A handler whose dependent body has been flagged for removal is dropped
//! by the scene before it would run again; dropping the boxed creator is
//! the only cleanup a handler gets.

mod basic;
mod response;
mod platformer;
mod gameplay;
pub mod wiring;

use log::debug;
use rand::RngCore;

use crate::domain::body_info::{BodyInfo, BodyKind};
use crate::domain::input::InputState;
use crate::domain::status::SceneStatus;
use crate::rigid_body::Body;
use crate::rigid_body_system::{BodyHandle, RigidBodySystem};
use crate::systems::collision::{CollisionCounters, CollisionDetector, Contact};

pub use basic::{Drag, Friction, Gravity, PlatformGravity, Spring};
pub use gameplay::{
    apply_powerup, bullet_hit, enemy_contact, random_boost, spike_contact, BossHit, EnemyShooter,
    PlayerGun,
};
pub use platformer::{MovementKeys, PlatformCollision, PlatformTuning, PlayerMovement};
pub use response::{bounce, destructive, PhysicsCollision};
pub use wiring::{
    spawn_moving_floor, wire_boss_forces, wire_bullet_forces, wire_enemy_forces, wire_level,
    wire_player_forces,
};

/// Per-tick behavior of a handler.
pub trait ForceCreator {
    fn apply(&mut self, ctx: &mut ForceContext<'_>);
}

impl<F> ForceCreator for F
where
    F: FnMut(&mut ForceContext<'_>),
{
    fn apply(&mut self, ctx: &mut ForceContext<'_>) {
        self(ctx)
    }
}

/// Response to a contact event between two monitored bodies.
pub trait CollisionHandler {
    fn on_collision(&mut self, ctx: &mut ForceContext<'_>, contact: Contact);
}

impl<F> CollisionHandler for F
where
    F: FnMut(&mut ForceContext<'_>, Contact),
{
    fn on_collision(&mut self, ctx: &mut ForceContext<'_>, contact: Contact) {
        self(ctx, contact)
    }
}

/// A registered creator plus the bodies whose removal retires it.
pub struct ForceHandler {
    creator: Box<dyn ForceCreator>,
    dependents: Vec<BodyHandle>,
}

impl ForceHandler {
    pub fn new(creator: impl ForceCreator + 'static, dependents: Vec<BodyHandle>) -> Self {
        Self {
            creator: Box::new(creator),
            dependents,
        }
    }

    pub fn dependents(&self) -> &[BodyHandle] {
        &self.dependents
    }

    /// True once any dependent body is flagged or gone.
    pub fn is_stale(&self, bodies: &RigidBodySystem) -> bool {
        self.dependents.iter().any(|h| bodies.is_removed(*h))
    }

    pub(crate) fn invoke(&mut self, env: &mut HandlerEnv<'_>) {
        let mut ctx = ForceContext {
            bodies: &mut *env.bodies,
            dependents: &self.dependents,
            input: env.input,
            rng: &mut *env.rng,
            status: &mut *env.status,
            pending: &mut *env.pending,
            counters: &mut *env.counters,
        };
        self.creator.apply(&mut ctx);
    }
}

/// Scene state lent to the handler pass; each handler gets a
/// [`ForceContext`] built from it.
pub(crate) struct HandlerEnv<'a> {
    pub(crate) bodies: &'a mut RigidBodySystem,
    pub(crate) input: &'a InputState,
    pub(crate) rng: &'a mut dyn RngCore,
    pub(crate) status: &'a mut SceneStatus,
    pub(crate) pending: &'a mut Vec<ForceHandler>,
    pub(crate) counters: &'a mut CollisionCounters,
}

impl std::fmt::Debug for ForceHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForceHandler")
            .field("dependents", &self.dependents)
            .finish_non_exhaustive()
    }
}

/// Anything that holds bodies and accepts new handlers: the scene between
/// ticks, or a [`ForceContext`] while handlers run.
pub trait ForceRegistry {
    fn bodies(&self) -> &RigidBodySystem;

    fn add_body(&mut self, body: Body) -> BodyHandle;

    fn add_handler(&mut self, handler: ForceHandler);

    fn register_force_handler(&mut self, creator: impl ForceCreator + 'static, dependents: Vec<BodyHandle>)
    where
        Self: Sized,
    {
        self.add_handler(ForceHandler::new(creator, dependents));
    }

    /// Watch the pair `(a, b)` and forward contact events to `handler`.
    fn register_collision_handler(
        &mut self,
        a: BodyHandle,
        b: BodyHandle,
        handler: impl CollisionHandler + 'static,
    ) where
        Self: Sized,
    {
        self.add_handler(ForceHandler::new(CollisionDetector::new(a, b, handler), vec![a, b]));
    }

    /// Live bodies of `kind`, in insertion order.
    fn bodies_of_kind(&self, kind: BodyKind) -> Vec<BodyHandle> {
        self.bodies()
            .iter()
            .filter(|(_, body)| body.info().is_some_and(|info| info.kind == kind))
            .map(|(h, _)| h)
            .collect()
    }

    fn first_body_of_kind(&self, kind: BodyKind) -> Option<BodyHandle> {
        self.bodies()
            .iter()
            .find(|(_, body)| body.info().is_some_and(|info| info.kind == kind))
            .map(|(h, _)| h)
    }

    fn kind_of(&self, handle: BodyHandle) -> Option<BodyKind> {
        self.bodies().get(handle)?.info().map(|info| info.kind)
    }
}

/// Everything a handler may touch during a tick.
pub struct ForceContext<'a> {
    bodies: &'a mut RigidBodySystem,
    dependents: &'a [BodyHandle],
    input: &'a InputState,
    rng: &'a mut dyn RngCore,
    status: &'a mut SceneStatus,
    pending: &'a mut Vec<ForceHandler>,
    counters: &'a mut CollisionCounters,
}

impl<'a> ForceContext<'a> {
    /// Bodies the running handler was registered with.
    pub fn dependents(&self) -> &[BodyHandle] {
        self.dependents
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.get(handle)
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.bodies.get_mut(handle)
    }

    pub fn pair_mut(&mut self, a: BodyHandle, b: BodyHandle) -> Option<(&mut Body, &mut Body)> {
        self.bodies.pair_mut(a, b)
    }

    pub fn info(&self, handle: BodyHandle) -> Option<&BodyInfo> {
        self.bodies.get(handle)?.info()
    }

    pub fn info_mut(&mut self, handle: BodyHandle) -> Option<&mut BodyInfo> {
        self.bodies.get_mut(handle)?.info_mut()
    }

    pub fn mark_removed(&mut self, handle: BodyHandle) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.mark_removed();
        }
    }

    pub fn input(&self) -> &InputState {
        self.input
    }

    pub fn rng(&mut self) -> &mut dyn RngCore {
        &mut *self.rng
    }

    pub fn status(&self) -> &SceneStatus {
        &*self.status
    }

    pub fn status_mut(&mut self) -> &mut SceneStatus {
        &mut *self.status
    }

    /// Scene time at the start of this tick.
    pub fn time(&self) -> f64 {
        self.status.time
    }

    pub fn counters_mut(&mut self) -> &mut CollisionCounters {
        &mut *self.counters
    }

    /// Add a body mid-tick. It is integrated in this tick's body pass.
    pub fn spawn_body(&mut self, body: Body) -> BodyHandle {
        let handle = self.bodies.insert(body);
        debug!("spawned body {:?} during handler pass", handle);
        handle
    }
}

impl ForceRegistry for ForceContext<'_> {
    fn bodies(&self) -> &RigidBodySystem {
        &*self.bodies
    }

    fn add_body(&mut self, body: Body) -> BodyHandle {
        self.spawn_body(body)
    }

    /// Handlers registered mid-tick first run on the next tick.
    fn add_handler(&mut self, handler: ForceHandler) {
        self.pending.push(handler);
    }
}
