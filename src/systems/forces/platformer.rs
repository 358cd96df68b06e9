use crate::domain::body_info::{BodyKind, Movement, WallTouch};
use crate::domain::input::{LEFT_ARROW, RIGHT_ARROW, UP_ARROW};
use crate::domain::settings::PhysicsSettings;
use crate::rigid_body::Vec2;
use crate::rigid_body_system::BodyHandle;
use crate::systems::collision::{CollisionEvent, Contact};

use super::response::bounce;
use super::{CollisionHandler, ForceContext, ForceCreator};

/// Constants for resting contact against a platform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlatformTuning {
    pub shift_x: f64,
    pub shift_y: f64,
    pub touch_threshold: f64,
}

impl PlatformTuning {
    pub fn from_settings(settings: &PhysicsSettings) -> Self {
        Self {
            shift_x: settings.platform_shift_x,
            shift_y: settings.platform_shift_y,
            touch_threshold: settings.touch_threshold,
        }
    }

    fn wall_touch(&self, axis: Vec2) -> Option<WallTouch> {
        if axis.x.abs() <= self.touch_threshold {
            None
        } else if axis.x > 0.0 {
            Some(WallTouch::Right)
        } else {
            Some(WallTouch::Left)
        }
    }
}

impl Default for PlatformTuning {
    fn default() -> Self {
        Self::from_settings(&PhysicsSettings::default())
    }
}

/// Contact between a moving body (`a`) and a platform (`b`).
///
/// START from above lands the body with no bounce and resets its jumps;
/// a player hitting a wall side-on is stopped and records the wall side.
/// TOUCHING pushes the body back out along the contact axis and carries it
/// with a moving floor. END puts a player back into free fall and turns an
/// enemy around.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlatformCollision {
    tuning: PlatformTuning,
}

impl PlatformCollision {
    pub fn new(tuning: PlatformTuning) -> Self {
        Self { tuning }
    }

    fn touching(&self, ctx: &mut ForceContext<'_>, mover: BodyHandle, platform: BodyHandle, axis: Vec2) {
        let carries = ctx.info(platform).is_some_and(|info| info.kind == BodyKind::MovingFloor);
        let platform_velocity = ctx.body(platform).map(|b| b.velocity());
        let Some(body) = ctx.body_mut(mover) else {
            return;
        };
        if let (true, Some(platform_velocity)) = (carries, platform_velocity) {
            let impulse = (platform_velocity - body.velocity()) * body.mass();
            body.add_impulse(impulse);
        }
        let shift = Vec2::new(-self.tuning.shift_x * axis.x, -self.tuning.shift_y * axis.y);
        body.set_centroid(body.centroid() + shift);

        let wall = self.tuning.wall_touch(axis);
        if let Some(info) = body.info_mut() {
            info.movement = Movement::Grounded;
            if let Some(wall) = wall {
                info.touch = wall;
            }
        }
    }

    fn start(&self, ctx: &mut ForceContext<'_>, mover: BodyHandle, platform: BodyHandle, axis: Vec2) {
        if axis.y < 0.0 {
            bounce(ctx, mover, platform, axis, 0.0);
            if let Some(info) = ctx.info_mut(mover) {
                info.movement = Movement::Grounded;
                info.jumps = 0;
            }
        }
        let is_player = ctx.info(mover).is_some_and(|info| info.kind == BodyKind::Player);
        if let (Some(wall), true) = (self.tuning.wall_touch(axis), is_player) {
            bounce(ctx, mover, platform, axis, 0.0);
            if let Some(info) = ctx.info_mut(mover) {
                info.touch = wall;
            }
        }
    }

    fn end(&self, ctx: &mut ForceContext<'_>, mover: BodyHandle, axis: Vec2) {
        let side_on = self.tuning.wall_touch(axis).is_some();
        let Some(body) = ctx.body_mut(mover) else {
            return;
        };
        match body.info().map(|info| info.kind) {
            Some(BodyKind::Player) => {
                if let Some(info) = body.info_mut() {
                    info.movement = Movement::Falling;
                    if side_on {
                        info.touch = WallTouch::None;
                    }
                }
            }
            Some(BodyKind::Enemy) => {
                let reversed = -body.velocity();
                body.set_velocity(reversed);
            }
            _ => {}
        }
    }
}

impl CollisionHandler for PlatformCollision {
    fn on_collision(&mut self, ctx: &mut ForceContext<'_>, contact: Contact) {
        match contact.event {
            CollisionEvent::Start => self.start(ctx, contact.a, contact.b, contact.axis),
            CollisionEvent::Touching => self.touching(ctx, contact.a, contact.b, contact.axis),
            CollisionEvent::End => self.end(ctx, contact.a, contact.axis),
        }
    }
}

/// Which input slots steer a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MovementKeys {
    pub left: usize,
    pub right: usize,
    pub up: usize,
}

impl Default for MovementKeys {
    fn default() -> Self {
        Self {
            left: LEFT_ARROW,
            right: RIGHT_ARROW,
            up: UP_ARROW,
        }
    }
}

/// Keyboard-driven horizontal running and multi-step jumping.
///
/// A held direction key snaps horizontal speed to `max_speed` unless the
/// body is already against a wall on that side. Holding jump adds one
/// `jump_step` of upward impulse per tick until `max_jumps` steps have been
/// taken since the last landing.
#[derive(Clone, Copy, Debug)]
pub struct PlayerMovement {
    body: BodyHandle,
    keys: MovementKeys,
    max_speed: f64,
    jump_step: f64,
    max_jumps: u32,
}

impl PlayerMovement {
    pub fn new(body: BodyHandle, keys: MovementKeys, max_speed: f64, jump_step: f64, max_jumps: u32) -> Self {
        Self {
            body,
            keys,
            max_speed,
            jump_step,
            max_jumps,
        }
    }

    pub fn from_settings(body: BodyHandle, keys: MovementKeys, settings: &PhysicsSettings) -> Self {
        Self::new(
            body,
            keys,
            settings.player_max_speed,
            settings.jump_step_impulse(),
            settings.max_jumps,
        )
    }
}

impl ForceCreator for PlayerMovement {
    fn apply(&mut self, ctx: &mut ForceContext<'_>) {
        let input = ctx.input();
        let left = input.is_pressed(self.keys.left);
        let right = input.is_pressed(self.keys.right);
        let up = input.is_pressed(self.keys.up);

        let Some(body) = ctx.body_mut(self.body) else {
            return;
        };
        let Some(info) = body.info().cloned() else {
            return;
        };
        let velocity = body.velocity();
        let mass = body.mass();

        let mut touch = info.touch;
        if left && info.touch != WallTouch::Left {
            body.add_impulse(Vec2::new((-self.max_speed - velocity.x) * mass, 0.0));
            touch = WallTouch::None;
        } else if right && info.touch != WallTouch::Right {
            body.add_impulse(Vec2::new((self.max_speed - velocity.x) * mass, 0.0));
            touch = WallTouch::None;
        }

        let mut jumps = info.jumps;
        if up && jumps < self.max_jumps {
            body.add_impulse(Vec2::new(0.0, self.jump_step));
            jumps += 1;
        }

        if let Some(info) = body.info_mut() {
            info.touch = touch;
            info.jumps = jumps;
        }
    }
}
