use wasm_bindgen::prelude::*;

use crate::domain::body_info::BodyKind;
use crate::domain::input::{KeyState, KEY_SLOTS};
use crate::domain::prefabs;
use crate::domain::settings::PhysicsSettings;
use crate::rigid_body::{Body, Polygon, RgbColor, Vec2};
use crate::rigid_body_system::BodyHandle;
use crate::systems::forces::{
    destructive, spawn_moving_floor, wire_level, Drag, Gravity, MovementKeys, PhysicsCollision, Spring,
};

use super::perf_stats::PerfStats;
use super::render::{Camera, RenderSnapshot};
use super::SceneCore;

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn non_negative(name: &str, value: f64) -> Result<f64, JsValue> {
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(JsValue::from_str(&format!("{name} must be non-negative, got {value}")))
    }
}

fn color(r: f32, g: f32, b: f32) -> RgbColor {
    RgbColor::new(r, g, b)
}

/// Browser-facing scene: the core plus camera and render buffers.
/// Bodies cross the boundary as `u64` handle bits.
#[wasm_bindgen]
pub struct Scene {
    core: SceneCore,
    camera: Camera,
    snapshot: RenderSnapshot,
}

impl Scene {
    fn place(&mut self, mut body: Body, x: f64, y: f64) -> u64 {
        body.set_centroid(Vec2::new(x, y));
        self.core.add_body(body).to_bits()
    }

    fn live(&self, bits: u64) -> Result<BodyHandle, JsValue> {
        let handle = BodyHandle::from_bits(bits);
        if self.core.body(handle).is_some() {
            Ok(handle)
        } else {
            Err(JsValue::from_str(&format!("no body with handle {bits}")))
        }
    }

    fn finite_mass(&self, bits: u64) -> Result<BodyHandle, JsValue> {
        let handle = self.live(bits)?;
        match self.core.body(handle) {
            Some(body) if body.mass().is_finite() => Ok(handle),
            _ => Err(JsValue::from_str(&format!("body {bits} has infinite mass"))),
        }
    }

    pub fn core(&self) -> &SceneCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut SceneCore {
        &mut self.core
    }
}

#[wasm_bindgen]
impl Scene {
    /// Empty scene with default settings and the given RNG seed.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Self {
        let settings = PhysicsSettings { seed, ..PhysicsSettings::default() };
        Self {
            core: SceneCore::with_settings(settings),
            camera: Camera::new(),
            snapshot: RenderSnapshot::new(),
        }
    }

    /// Replace settings from JSON; affects bodies wired afterwards.
    pub fn load_settings(&mut self, json: &str) -> Result<(), JsValue> {
        self.core.load_settings_json(json).map_err(js_err)
    }

    pub fn settings_json(&self) -> String {
        self.core.settings_json()
    }

    /// Advance, move the camera, and refresh the render buffers.
    pub fn tick(&mut self, dt: f64) -> Result<(), JsValue> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(JsValue::from_str(&format!("invalid dt {dt}")));
        }
        self.core.tick(dt);
        self.camera.update(&self.core, dt);
        self.snapshot.extract(&self.core, &self.camera);
        Ok(())
    }

    pub fn set_key(&mut self, slot: usize, pressed: bool) -> Result<(), JsValue> {
        if slot >= KEY_SLOTS {
            return Err(JsValue::from_str(&format!("key slot {slot} out of range")));
        }
        self.core.input_mut().set(slot, KeyState::from_pressed(pressed));
        Ok(())
    }

    pub fn clear(&mut self) {
        self.core.clear();
        self.camera = Camera::new();
        self.snapshot.extract(&self.core, &self.camera);
    }

    // === BODIES ===

    /// Arbitrary convex polygon from flat `x, y` pairs. `mass` may be `Infinity`.
    pub fn spawn_polygon(&mut self, xy: &[f64], mass: f64, r: f32, g: f32, b: f32) -> Result<u64, JsValue> {
        let polygon = Polygon::from_flat(xy).map_err(js_err)?;
        let handle = self.core.create_body(polygon, mass, color(r, g, b)).map_err(js_err)?;
        Ok(handle.to_bits())
    }

    pub fn spawn_player(&mut self, x: f64, y: f64, size: f64) -> Result<u64, JsValue> {
        let body = prefabs::player(size).map_err(js_err)?;
        Ok(self.place(body, x, y))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn spawn_floor(&mut self, x: f64, y: f64, w: f64, h: f64, r: f32, g: f32, b: f32) -> Result<u64, JsValue> {
        let body = prefabs::floor(w, h, color(r, g, b)).map_err(js_err)?;
        Ok(self.place(body, x, y))
    }

    /// Floor on a spring of stiffness `k`, starting `(dx, dy)` from its anchor at `(x, y)`.
    #[allow(clippy::too_many_arguments)]
    pub fn spawn_moving_floor(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        mass: f64,
        k: f64,
        dx: f64,
        dy: f64,
    ) -> Result<u64, JsValue> {
        let k = non_negative("spring constant", k)?;
        let handle = spawn_moving_floor(
            &mut self.core,
            Vec2::new(w, h),
            mass,
            k,
            Vec2::new(x, y),
            Vec2::new(dx, dy),
            RgbColor::BLACK,
        )
        .map_err(js_err)?;
        Ok(handle.to_bits())
    }

    pub fn spawn_enemy(&mut self, x: f64, y: f64, size: f64, mass: f64) -> Result<u64, JsValue> {
        let body = prefabs::enemy(size, mass).map_err(js_err)?;
        Ok(self.place(body, x, y))
    }

    pub fn spawn_boss(&mut self, x: f64, y: f64, size: f64) -> Result<u64, JsValue> {
        let body = prefabs::boss(size).map_err(js_err)?;
        Ok(self.place(body, x, y))
    }

    pub fn spawn_spike(&mut self, x: f64, y: f64, radius: f64, hanging: bool) -> Result<u64, JsValue> {
        let body = if hanging { prefabs::hanging_spike(radius) } else { prefabs::spike(radius) };
        Ok(self.place(body.map_err(js_err)?, x, y))
    }

    /// `kind` is a `BodyKind` byte and must name a powerup.
    pub fn spawn_powerup(&mut self, x: f64, y: f64, radius: f64, kind: u8) -> Result<u64, JsValue> {
        let kind = BodyKind::from_u8(kind)
            .filter(|k| k.is_powerup())
            .ok_or_else(|| JsValue::from_str(&format!("{kind} is not a powerup kind")))?;
        let tint = match kind {
            BodyKind::FinishedLevelPowerup => RgbColor::GOLD,
            BodyKind::BoostPowerup => RgbColor::GREEN,
            _ => RgbColor::BLUE,
        };
        let body = prefabs::powerup(radius, kind, tint).map_err(js_err)?;
        Ok(self.place(body, x, y))
    }

    pub fn spawn_gravity_well(&mut self, x: f64, y: f64) -> Result<u64, JsValue> {
        let body = prefabs::gravity_well().map_err(js_err)?;
        Ok(self.place(body, x, y))
    }

    /// Flag a body for removal on the next tick.
    pub fn remove_body(&mut self, handle: u64) -> bool {
        self.core.remove_body(BodyHandle::from_bits(handle))
    }

    pub fn set_velocity(&mut self, handle: u64, vx: f64, vy: f64) -> Result<(), JsValue> {
        let handle = self.live(handle)?;
        if let Some(body) = self.core.body_mut(handle) {
            body.set_velocity(Vec2::new(vx, vy));
        }
        Ok(())
    }

    /// Pin a body to the screen instead of the world.
    pub fn set_camera_attached(&mut self, handle: u64, attached: bool) -> Result<(), JsValue> {
        let handle = self.live(handle)?;
        if let Some(body) = self.core.body_mut(handle) {
            body.set_camera_attached(attached);
        }
        Ok(())
    }

    pub fn body_x(&self, handle: u64) -> Option<f64> {
        self.core.body(BodyHandle::from_bits(handle)).map(|b| b.centroid().x)
    }

    pub fn body_y(&self, handle: u64) -> Option<f64> {
        self.core.body(BodyHandle::from_bits(handle)).map(|b| b.centroid().y)
    }

    // === FORCES ===

    /// Both bodies need finite mass; an immovable body has no defined pull.
    pub fn add_gravity(&mut self, g: f64, a: u64, b: u64) -> Result<(), JsValue> {
        let (a, b) = (self.finite_mass(a)?, self.finite_mass(b)?);
        self.core.register_force_handler(Gravity::new(g, a, b), vec![a, b]);
        Ok(())
    }

    pub fn add_spring(&mut self, k: f64, a: u64, b: u64) -> Result<(), JsValue> {
        let k = non_negative("spring constant", k)?;
        let (a, b) = (self.live(a)?, self.live(b)?);
        self.core.register_force_handler(Spring::new(k, a, b), vec![a, b]);
        Ok(())
    }

    pub fn add_drag(&mut self, gamma: f64, body: u64) -> Result<(), JsValue> {
        let gamma = non_negative("drag coefficient", gamma)?;
        let body = self.live(body)?;
        self.core.register_force_handler(Drag::new(gamma, body), vec![body]);
        Ok(())
    }

    pub fn add_physics_collision(&mut self, a: u64, b: u64, restitution: f64) -> Result<(), JsValue> {
        let restitution = non_negative("restitution", restitution)?;
        let (a, b) = (self.live(a)?, self.live(b)?);
        self.core.register_collision_handler(a, b, PhysicsCollision::new(restitution));
        Ok(())
    }

    pub fn add_destructive_collision(&mut self, a: u64, b: u64) -> Result<(), JsValue> {
        let (a, b) = (self.live(a)?, self.live(b)?);
        self.core.register_collision_handler(a, b, destructive);
        Ok(())
    }

    /// Register the gameplay handlers for every player, enemy and boss.
    /// Returns the number of handlers added.
    pub fn wire_level(&mut self) -> u32 {
        let settings = self.core.settings().clone();
        wire_level(&mut self.core, MovementKeys::default(), &settings) as u32
    }

    // === RENDER ===

    pub fn render_body_count(&self) -> u32 { self.snapshot.body_count() as u32 }

    pub fn vertices_ptr(&self) -> *const f32 { self.snapshot.vertices().as_ptr() }

    pub fn vertices_len(&self) -> u32 { self.snapshot.vertices().len() as u32 }

    pub fn offsets_ptr(&self) -> *const u32 { self.snapshot.offsets().as_ptr() }

    pub fn offsets_len(&self) -> u32 { self.snapshot.offsets().len() as u32 }

    pub fn colors_ptr(&self) -> *const u32 { self.snapshot.colors().as_ptr() }

    pub fn kinds_ptr(&self) -> *const u8 { self.snapshot.kinds().as_ptr() }

    pub fn camera_attached_ptr(&self) -> *const u8 { self.snapshot.camera_attached().as_ptr() }

    /// Refresh the render buffers without ticking.
    pub fn extract(&mut self) {
        self.snapshot.extract(&self.core, &self.camera);
    }

    // === CAMERA ===

    pub fn set_camera(&mut self, x: f64, y: f64) {
        self.camera.set_position(Vec2::new(x, y));
    }

    pub fn move_camera(&mut self, dx: f64, dy: f64) {
        self.camera.shift(Vec2::new(dx, dy));
    }

    pub fn set_camera_velocity(&mut self, vx: f64, vy: f64) {
        self.camera.set_velocity(Vec2::new(vx, vy));
    }

    pub fn follow_body(&mut self, handle: u64, offset_x: f64, offset_y: f64) -> Result<(), JsValue> {
        let handle = self.live(handle)?;
        self.camera.follow(handle, Vec2::new(offset_x, offset_y));
        Ok(())
    }

    pub fn unfollow(&mut self) {
        self.camera.unfollow();
    }

    #[wasm_bindgen(getter)]
    pub fn camera_x(&self) -> f64 { self.camera.position().x }

    #[wasm_bindgen(getter)]
    pub fn camera_y(&self) -> f64 { self.camera.position().y }

    // === STATUS ===

    #[wasm_bindgen(getter)]
    pub fn time(&self) -> f64 { self.core.time() }

    #[wasm_bindgen(getter)]
    pub fn done(&self) -> bool { self.core.is_done() }

    #[wasm_bindgen(getter)]
    pub fn finished_level(&self) -> bool { self.core.finished_level() }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> u32 { self.core.body_count() as u32 }

    #[wasm_bindgen(getter)]
    pub fn handler_count(&self) -> u32 { self.core.handler_count() as u32 }

    /// Enable or disable per-tick perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Last tick's perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.perf_stats()
    }
}
