use crate::domain::body_info::BodyInfo;
use crate::error::BodyError;

use super::color::RgbColor;
use super::polygon::Polygon;
use super::vec2::Vec2;

/// Rigid body - a convex polygon that moves as a single unit.
///
/// Forces and impulses accumulate between ticks and are consumed by
/// [`Body::tick`]. The polygon is kept in world coordinates; the cached
/// centroid and bounding radius follow every translate and rotate.
#[derive(Clone, Debug)]
pub struct Body {
    // === Shape ===
    polygon: Polygon,
    centroid: Vec2,
    /// Max distance from centroid to any vertex (broad-phase cutoff).
    radius: f64,
    /// Accumulated rotation about the centroid, in radians.
    rotation: f64,

    // === Physics State ===
    /// `f64::INFINITY` means immovable.
    mass: f64,
    velocity: Vec2,
    force: Vec2,
    impulse: Vec2,

    // === Presentation / gameplay ===
    color: RgbColor,
    /// Drawn relative to the camera; `false` pins it to the screen.
    camera_attached: bool,
    info: Option<BodyInfo>,

    removed: bool,
}

impl Body {
    pub fn new(polygon: Polygon, mass: f64, color: RgbColor) -> Result<Self, BodyError> {
        // NaN fails this comparison too.
        if !(mass > 0.0) {
            return Err(BodyError::NonPositiveMass(mass));
        }
        let centroid = polygon.centroid();
        let radius = polygon.bounding_radius(centroid);
        Ok(Self {
            polygon,
            centroid,
            radius,
            rotation: 0.0,
            mass,
            velocity: Vec2::zero(),
            force: Vec2::zero(),
            impulse: Vec2::zero(),
            color,
            camera_attached: true,
            info: None,
            removed: false,
        })
    }

    pub fn with_info(polygon: Polygon, mass: f64, color: RgbColor, info: BodyInfo) -> Result<Self, BodyError> {
        let mut body = Self::new(polygon, mass, color)?;
        body.info = Some(info);
        Ok(body)
    }

    /// Advance by `dt` seconds.
    ///
    /// Velocity jumps by `impulse / mass` and changes by `force / mass * dt`;
    /// the displacement uses the average of the old and new velocities, so a
    /// constant force reproduces constant-acceleration kinematics exactly.
    /// Both accumulators are cleared afterwards.
    pub fn tick(&mut self, dt: f64) {
        let old_velocity = self.velocity;
        // An immovable body ignores its accumulators, even infinite ones.
        let new_velocity = if self.mass.is_finite() {
            old_velocity + self.impulse / self.mass + self.force / self.mass * dt
        } else {
            old_velocity
        };
        let displacement = (old_velocity + new_velocity) * (0.5 * dt);

        self.polygon.translate(displacement);
        self.centroid += displacement;
        self.velocity = new_velocity;
        self.force = Vec2::zero();
        self.impulse = Vec2::zero();
    }

    pub fn add_force(&mut self, force: Vec2) {
        self.force += force;
    }

    pub fn add_impulse(&mut self, impulse: Vec2) {
        self.impulse += impulse;
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Move the body so its centroid lands on `centroid`.
    pub fn set_centroid(&mut self, centroid: Vec2) {
        self.polygon.translate(centroid - self.centroid);
        self.centroid = centroid;
    }

    pub fn centroid(&self) -> Vec2 {
        self.centroid
    }

    /// Rotate about the centroid to an absolute angle.
    pub fn set_rotation(&mut self, angle: f64) {
        self.polygon.rotate(angle - self.rotation, self.centroid);
        self.rotation = angle;
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Flag for removal at the end of the current tick. Cannot be undone.
    pub fn mark_removed(&mut self) {
        self.removed = true;
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Copy of the outline, for consumers that keep it past the next tick.
    pub fn shape(&self) -> Polygon {
        self.polygon.clone()
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn force(&self) -> Vec2 {
        self.force
    }

    pub fn impulse(&self) -> Vec2 {
        self.impulse
    }

    pub fn color(&self) -> RgbColor {
        self.color
    }

    pub fn set_color(&mut self, color: RgbColor) {
        self.color = color;
    }

    pub fn camera_attached(&self) -> bool {
        self.camera_attached
    }

    pub fn set_camera_attached(&mut self, attached: bool) {
        self.camera_attached = attached;
    }

    pub fn info(&self) -> Option<&BodyInfo> {
        self.info.as_ref()
    }

    pub fn info_mut(&mut self) -> Option<&mut BodyInfo> {
        self.info.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::body_info::BodyKind;
    use crate::systems::rigid_body::shapes;

    fn square(mass: f64) -> Body {
        Body::new(shapes::rectangle(2.0, 2.0).unwrap(), mass, RgbColor::BLACK).unwrap()
    }

    #[test]
    fn rejects_bad_mass() {
        let poly = shapes::rectangle(1.0, 1.0).unwrap();
        assert_eq!(
            Body::new(poly.clone(), 0.0, RgbColor::BLACK).unwrap_err(),
            BodyError::NonPositiveMass(0.0)
        );
        assert!(Body::new(poly.clone(), -3.0, RgbColor::BLACK).is_err());
        assert!(Body::new(poly.clone(), f64::NAN, RgbColor::BLACK).is_err());
        assert!(Body::new(poly, f64::INFINITY, RgbColor::BLACK).is_ok());
    }

    #[test]
    fn tick_without_accumulators_is_stationary() {
        let mut body = square(1.0);
        body.set_centroid(Vec2::new(3.5, -1.25));
        for dt in [0.0, 0.016, 1.0, 250.0] {
            body.tick(dt);
            assert_eq!(body.velocity(), Vec2::zero());
            assert_eq!(body.centroid(), Vec2::new(3.5, -1.25));
        }
    }

    #[test]
    fn tick_keeps_velocity_without_accumulators() {
        let mut body = square(1.0);
        body.set_velocity(Vec2::new(2.0, -1.0));
        body.tick(0.5);
        assert_eq!(body.velocity(), Vec2::new(2.0, -1.0));
        assert_eq!(body.centroid(), Vec2::new(1.0, -0.5));
    }

    #[test]
    fn constant_force_matches_closed_form() {
        let mass = 4.0;
        let v0 = Vec2::new(1.0, 3.0);
        let force = Vec2::new(8.0, -2.0);
        let dt = 0.25;

        let mut body = square(mass);
        body.set_velocity(v0);
        body.add_force(force);
        body.tick(dt);

        let v1 = v0 + force * (dt / mass);
        let expected = v0 * dt + force * (0.5 * dt * dt / mass);
        assert!((body.velocity() - v1).length() < 1e-12);
        assert!((body.centroid() - expected).length() < 1e-12);
        assert!(body.polygon().centroid().distance(body.centroid()) < 1e-12);
        assert_eq!(body.force(), Vec2::zero());
    }

    #[test]
    fn impulse_is_instant_velocity_jump() {
        let mut body = square(2.0);
        body.add_impulse(Vec2::new(4.0, 0.0));
        body.tick(1.0);
        assert_eq!(body.velocity(), Vec2::new(2.0, 0.0));
        assert_eq!(body.centroid(), Vec2::new(1.0, 0.0));
        assert_eq!(body.impulse(), Vec2::zero());
    }

    #[test]
    fn infinite_mass_is_immovable() {
        let mut body = square(f64::INFINITY);
        for _ in 0..5 {
            body.add_force(Vec2::new(1e30, -1e30));
            body.add_impulse(Vec2::new(-5e20, 7.0));
            body.tick(0.1);
        }
        assert_eq!(body.velocity(), Vec2::zero());
        assert_eq!(body.centroid(), Vec2::zero());

        body.add_force(Vec2::new(f64::INFINITY, f64::NEG_INFINITY));
        body.tick(0.1);
        assert_eq!(body.velocity(), Vec2::zero());
        assert_eq!(body.centroid(), Vec2::zero());
    }

    #[test]
    fn rotation_is_absolute_and_keeps_centroid() {
        let mut body = square(1.0);
        body.set_centroid(Vec2::new(5.0, 5.0));
        let radius = body.radius();
        body.set_rotation(1.0);
        body.set_rotation(std::f64::consts::FRAC_PI_2);
        assert!(body.polygon().centroid().distance(Vec2::new(5.0, 5.0)) < 1e-9);
        assert_eq!(body.rotation(), std::f64::consts::FRAC_PI_2);
        assert_eq!(body.radius(), radius);
        // A quarter turn maps the square onto itself.
        let first = body.polygon().vertices()[0];
        assert!((first - Vec2::new(4.0, 6.0)).length() < 1e-9);
    }

    #[test]
    fn shape_is_a_detached_copy() {
        let mut body = square(1.0);
        let snapshot = body.shape();
        body.set_centroid(Vec2::new(10.0, 0.0));
        assert!(snapshot.centroid().length() < 1e-12);
    }

    #[test]
    fn payload_is_mutable_in_place() {
        let poly = shapes::rectangle(1.0, 1.0).unwrap();
        let mut body =
            Body::with_info(poly, 1.0, RgbColor::GREEN, BodyInfo::falling(BodyKind::Player)).unwrap();
        body.info_mut().unwrap().jumps = 4;
        assert_eq!(body.info().unwrap().jumps, 4);
        assert!(square(1.0).info().is_none());
    }
}
