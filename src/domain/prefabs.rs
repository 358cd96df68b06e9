//! Body constructors for each gameplay kind, with payload and default
//! color set. Placement is left to the caller.

use crate::error::BodyError;
use crate::rigid_body::{shapes, Body, RgbColor, Vec2};

use super::body_info::{BodyInfo, BodyKind};
use super::settings::PhysicsSettings;

pub const PLAYER_MASS: f64 = 50.0;
pub const BOSS_MASS: f64 = 50.0;
pub const ENEMY_VERTICES: usize = 30;
pub const GRAVITY_WELL_MASS: f64 = 6e20;
/// Heavy enough to shrug off any gameplay impulse while still moving on a spring.
pub const HEAVY_MASS: f64 = 6e81;
pub const ANCHOR_SIZE: f64 = 0.5;

pub const BOSS_COLOR: RgbColor = RgbColor::new(1.0, 0.5, 0.5);

pub fn player(size: f64) -> Result<Body, BodyError> {
    Body::with_info(
        shapes::rectangle(size, size)?,
        PLAYER_MASS,
        RgbColor::GREEN,
        BodyInfo::falling(BodyKind::Player),
    )
}

/// Immovable rectangular platform.
pub fn floor(width: f64, height: f64, color: RgbColor) -> Result<Body, BodyError> {
    Body::with_info(
        shapes::rectangle(width, height)?,
        f64::INFINITY,
        color,
        BodyInfo::fixed(BodyKind::Floor),
    )
}

/// Platform meant to oscillate on a spring, and the anchor it hangs from.
pub fn moving_floor(width: f64, height: f64, mass: f64, color: RgbColor) -> Result<(Body, Body), BodyError> {
    let floor = Body::with_info(
        shapes::rectangle(width, height)?,
        mass,
        color,
        BodyInfo::fixed(BodyKind::MovingFloor),
    )?;
    let anchor = Body::new(shapes::rectangle(ANCHOR_SIZE, ANCHOR_SIZE)?, mass, color)?;
    Ok((floor, anchor))
}

pub fn enemy(size: f64, mass: f64) -> Result<Body, BodyError> {
    Body::with_info(
        shapes::circle(size, ENEMY_VERTICES)?,
        mass,
        RgbColor::RED,
        BodyInfo::falling(BodyKind::Enemy),
    )
}

pub fn boss(size: f64) -> Result<Body, BodyError> {
    Body::with_info(
        shapes::triangle(size)?,
        BOSS_MASS,
        BOSS_COLOR,
        BodyInfo::falling(BodyKind::Boss),
    )
}

pub fn spike(radius: f64) -> Result<Body, BodyError> {
    Body::with_info(
        shapes::triangle(radius)?,
        HEAVY_MASS,
        RgbColor::RED,
        BodyInfo::fixed(BodyKind::Spike),
    )
}

/// Spike pointing down.
pub fn hanging_spike(radius: f64) -> Result<Body, BodyError> {
    let mut body = spike(radius)?;
    body.set_rotation(std::f64::consts::PI);
    Ok(body)
}

/// `kind` must be one of the powerup kinds.
pub fn powerup(radius: f64, kind: BodyKind, color: RgbColor) -> Result<Body, BodyError> {
    debug_assert!(kind.is_powerup(), "{kind:?} is not a powerup");
    Body::with_info(shapes::four_point_star(radius)?, f64::INFINITY, color, BodyInfo::fixed(kind))
}

/// Tiny heavy body that other bodies fall toward.
pub fn gravity_well() -> Result<Body, BodyError> {
    Body::with_info(
        shapes::rectangle(1.0, 1.0)?,
        GRAVITY_WELL_MASS,
        RgbColor::BLACK,
        BodyInfo::fixed(BodyKind::GravityWell),
    )
}

/// Shape and launch parameters for bullets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BulletSpec {
    /// Star radius is a fifth of this.
    pub size: f64,
    pub mass: f64,
    pub speed: f64,
    pub color: RgbColor,
}

impl BulletSpec {
    pub fn from_settings(settings: &PhysicsSettings) -> Self {
        Self {
            size: settings.bullet_size,
            mass: settings.bullet_mass,
            speed: settings.bullet_speed,
            color: RgbColor::BLUE,
        }
    }

    /// Bullet centered on `at`, rotated to `heading` radians and flying that way.
    pub fn build(&self, kind: BodyKind, at: Vec2, heading: f64) -> Result<Body, BodyError> {
        let mut body = Body::with_info(
            shapes::four_point_star(self.size / 5.0)?,
            self.mass,
            self.color,
            BodyInfo::fixed(kind),
        )?;
        body.set_centroid(at);
        body.set_rotation(heading);
        body.set_velocity(Vec2::new(self.speed, 0.0).rotate(heading));
        Ok(body)
    }
}

impl Default for BulletSpec {
    fn default() -> Self {
        Self::from_settings(&PhysicsSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefabs_carry_their_kind() {
        let cases = [
            (player(100.0).unwrap(), BodyKind::Player),
            (floor(10.0, 1.0, RgbColor::BLACK).unwrap(), BodyKind::Floor),
            (enemy(70.0, 50.0).unwrap(), BodyKind::Enemy),
            (boss(50.0).unwrap(), BodyKind::Boss),
            (spike(50.0).unwrap(), BodyKind::Spike),
            (gravity_well().unwrap(), BodyKind::GravityWell),
            (powerup(60.0, BodyKind::BulletPowerup, RgbColor::BLUE).unwrap(), BodyKind::BulletPowerup),
        ];
        for (body, kind) in cases {
            assert_eq!(body.info().unwrap().kind, kind);
        }
    }

    #[test]
    fn floor_is_immovable() {
        assert!(floor(1.0, 1.0, RgbColor::BLACK).unwrap().mass().is_infinite());
    }

    #[test]
    fn moving_floor_anchor_has_no_payload() {
        let (floor, anchor) = moving_floor(2.0, 1.0, 10.0, RgbColor::BLACK).unwrap();
        assert_eq!(floor.info().unwrap().kind, BodyKind::MovingFloor);
        assert!(anchor.info().is_none());
    }

    #[test]
    fn bullet_launches_along_heading() {
        let spec = BulletSpec::default();
        let bullet = spec
            .build(BodyKind::EnemyBullet, Vec2::new(3.0, 4.0), std::f64::consts::FRAC_PI_2)
            .unwrap();
        assert!((bullet.centroid() - Vec2::new(3.0, 4.0)).length() < 1e-9);
        assert!((bullet.velocity() - Vec2::new(0.0, 1500.0)).length() < 1e-9);
        assert_eq!(bullet.mass(), 20.0);
    }

    #[test]
    fn bad_size_is_rejected() {
        assert!(player(0.0).is_err());
        assert!(enemy(10.0, -1.0).is_err());
    }
}
