//! Flattened per-frame copy of body geometry for the host renderer.
//!
//! The buffers are reused across frames and exposed to JS by pointer, so
//! `extract` only reallocates when the scene grows.

use crate::rigid_body::Vec2;
use crate::rigid_body_system::BodyHandle;

use super::SceneCore;

/// Kind byte for bodies without a payload.
pub const NO_KIND: u8 = u8::MAX;

/// Viewport origin in world coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Camera {
    position: Vec2,
    velocity: Vec2,
    follow: Option<(BodyHandle, Vec2)>,
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn shift(&mut self, by: Vec2) {
        self.position += by;
    }

    /// Drift speed used while not following a body.
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Track `target` horizontally at `offset.x`; `y` is pinned to `offset.y`.
    pub fn follow(&mut self, target: BodyHandle, offset: Vec2) {
        self.follow = Some((target, offset));
    }

    pub fn unfollow(&mut self) {
        self.follow = None;
    }

    pub fn target(&self) -> Option<BodyHandle> {
        self.follow.map(|(handle, _)| handle)
    }

    /// Follow the target if it is still in the scene, otherwise drift.
    pub fn update(&mut self, scene: &SceneCore, dt: f64) {
        let followed = self
            .follow
            .and_then(|(handle, offset)| scene.body(handle).map(|body| (body.centroid(), offset)));
        match followed {
            Some((centroid, offset)) => {
                self.position = Vec2::new(centroid.x + offset.x, offset.y);
            }
            None => self.position += self.velocity * dt,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RenderSnapshot {
    /// `x, y` pairs, camera-relative for attached bodies.
    vertices: Vec<f32>,
    /// Vertex-pair index where each body starts; one extra trailing entry.
    offsets: Vec<u32>,
    /// `0xRRGGBBAA` per body.
    colors: Vec<u32>,
    kinds: Vec<u8>,
    camera_attached: Vec<u8>,
}

impl RenderSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refill from the scene's live bodies, in insertion order.
    pub fn extract(&mut self, scene: &SceneCore, camera: &Camera) {
        self.vertices.clear();
        self.offsets.clear();
        self.colors.clear();
        self.kinds.clear();
        self.camera_attached.clear();

        let origin = camera.position();
        let mut vertex_count = 0u32;
        for (_, body) in scene.bodies().iter() {
            let shift = if body.camera_attached() { origin } else { Vec2::zero() };
            self.offsets.push(vertex_count);
            for v in body.polygon().vertices() {
                let p = *v - shift;
                self.vertices.push(p.x as f32);
                self.vertices.push(p.y as f32);
                vertex_count += 1;
            }
            self.colors.push(body.color().to_rgba_u32());
            self.kinds.push(body.info().map_or(NO_KIND, |info| info.kind.to_u8()));
            self.camera_attached.push(body.camera_attached() as u8);
        }
        self.offsets.push(vertex_count);
    }

    pub fn body_count(&self) -> usize {
        self.colors.len()
    }

    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    pub fn colors(&self) -> &[u32] {
        &self.colors
    }

    pub fn kinds(&self) -> &[u8] {
        &self.kinds
    }

    pub fn camera_attached(&self) -> &[u8] {
        &self.camera_attached
    }

    /// Vertices of body `i` as `x, y` pairs.
    pub fn body_vertices(&self, i: usize) -> &[f32] {
        let start = self.offsets[i] as usize * 2;
        let end = self.offsets[i + 1] as usize * 2;
        &self.vertices[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::prefabs;
    use crate::rigid_body::{shapes, RgbColor};

    fn square_at(scene: &mut SceneCore, at: Vec2) -> BodyHandle {
        let h = scene
            .create_body(shapes::rectangle(2.0, 2.0).unwrap(), 1.0, RgbColor::RED)
            .unwrap();
        scene.body_mut(h).unwrap().set_centroid(at);
        h
    }

    #[test]
    fn extract_flattens_bodies_in_order() {
        let mut scene = SceneCore::new();
        square_at(&mut scene, Vec2::new(10.0, 0.0));
        scene.add_body(prefabs::boss(5.0).unwrap());

        let mut snapshot = RenderSnapshot::new();
        snapshot.extract(&scene, &Camera::new());

        assert_eq!(snapshot.body_count(), 2);
        assert_eq!(snapshot.offsets(), &[0, 4, 7]);
        assert_eq!(snapshot.vertices().len(), 14);
        assert_eq!(snapshot.kinds()[0], NO_KIND);
        assert_eq!(snapshot.kinds()[1], crate::domain::body_info::BodyKind::Boss.to_u8());
        assert_eq!(snapshot.colors()[0], RgbColor::RED.to_rgba_u32());

        let xs: Vec<f32> = snapshot.body_vertices(0).iter().step_by(2).copied().collect();
        assert!(xs.iter().all(|x| (9.0..=11.0).contains(x)));
    }

    #[test]
    fn camera_offsets_attached_bodies_only() {
        let mut scene = SceneCore::new();
        square_at(&mut scene, Vec2::new(10.0, 0.0));
        let hud = square_at(&mut scene, Vec2::new(10.0, 0.0));
        scene.body_mut(hud).unwrap().set_camera_attached(false);

        let mut camera = Camera::new();
        camera.set_position(Vec2::new(10.0, 0.0));
        let mut snapshot = RenderSnapshot::new();
        snapshot.extract(&scene, &camera);

        let attached_x: f32 = snapshot.body_vertices(0).iter().step_by(2).sum::<f32>() / 4.0;
        let hud_x: f32 = snapshot.body_vertices(1).iter().step_by(2).sum::<f32>() / 4.0;
        assert!(attached_x.abs() < 1e-4);
        assert!((hud_x - 10.0).abs() < 1e-4);
        assert_eq!(snapshot.camera_attached(), &[1, 0]);
    }

    #[test]
    fn camera_follows_then_drifts() {
        let mut scene = SceneCore::new();
        let target = square_at(&mut scene, Vec2::new(300.0, 40.0));

        let mut camera = Camera::new();
        camera.follow(target, Vec2::new(-100.0, 5.0));
        camera.set_velocity(Vec2::new(1.0, 0.0));
        camera.update(&scene, 1.0);
        assert_eq!(camera.position(), Vec2::new(200.0, 5.0));

        scene.remove_body(target);
        scene.tick(0.0);
        camera.update(&scene, 2.0);
        assert_eq!(camera.position(), Vec2::new(202.0, 5.0));
    }
}
