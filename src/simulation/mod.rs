//! Scene - owner of bodies and force handlers, and the per-frame scheduler.
//!
//! `SceneCore` only orchestrates: geometry and integration live in
//! `rigid_body`, contact detection in `collision`, and every concrete
//! behavior is a force handler from `forces`. Each tick runs the handler
//! pass back-to-front, then the body pass back-to-front.

use rand::RngCore;

use crate::domain::input::InputState;
use crate::domain::settings::PhysicsSettings;
use crate::domain::status::SceneStatus;
use crate::error::{BodyError, SettingsError};
use crate::rigid_body::{Body, Polygon, RgbColor};
use crate::rigid_body_system::{BodyHandle, RigidBodySystem};
use crate::systems::collision::CollisionCounters;
use crate::systems::forces::{CollisionHandler, ForceCreator, ForceHandler, ForceRegistry};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "render/render_extract.rs"]
pub mod render;
mod facade;

pub use facade::Scene;
pub use perf_stats::PerfStats;
pub use render::{Camera, RenderSnapshot};
pub use step::TickReport;

use perf_timer::PerfTimer;

/// The simulation scene
pub struct SceneCore {
    bodies: RigidBodySystem,
    /// Invoked in reverse registration order.
    handlers: Vec<ForceHandler>,
    /// Registered from inside a handler; joins `handlers` after the pass.
    pending: Vec<ForceHandler>,

    // Shared state handed to handlers
    input: InputState,
    rng: Box<dyn RngCore>,
    settings: PhysicsSettings,
    status: SceneStatus,
    counters: CollisionCounters,

    frame: u64,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl SceneCore {
    /// Empty scene with default settings, seeded from `settings.seed`.
    pub fn new() -> Self {
        init::create_scene_core(PhysicsSettings::default())
    }

    pub fn with_settings(settings: PhysicsSettings) -> Self {
        init::create_scene_core(settings)
    }

    /// Empty scene drawing randomness from `rng` instead of the seeded default.
    pub fn with_rng(settings: PhysicsSettings, rng: Box<dyn RngCore>) -> Self {
        init::create_scene_core_with_rng(settings, rng)
    }

    pub fn settings(&self) -> &PhysicsSettings {
        &self.settings
    }

    /// Replace the settings. Handlers wired earlier keep what they captured.
    pub fn load_settings_json(&mut self, json: &str) -> Result<(), SettingsError> {
        settings::load_settings_json(self, json)
    }

    pub fn settings_json(&self) -> String {
        self.settings.to_json()
    }

    /// Restart the random stream from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        settings::reseed(self, seed);
    }

    pub fn frame(&self) -> u64 { self.frame }

    pub fn body_count(&self) -> usize { self.bodies.len() }

    pub fn handler_count(&self) -> usize { self.handlers.len() + self.pending.len() }

    /// Enable or disable per-tick perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last tick's perf snapshot (zeros when perf disabled)
    pub fn perf_stats(&self) -> PerfStats {
        settings::perf_stats(self)
    }

    // === BODIES ===

    pub fn add_body(&mut self, body: Body) -> BodyHandle {
        commands::add_body(self, body)
    }

    pub fn create_body(&mut self, polygon: Polygon, mass: f64, color: RgbColor) -> Result<BodyHandle, BodyError> {
        commands::create_body(self, polygon, mass, color)
    }

    /// Flag a body; it leaves the scene on the next tick.
    pub fn remove_body(&mut self, handle: BodyHandle) -> bool {
        commands::remove_body(self, handle)
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.get(handle)
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.bodies.get_mut(handle)
    }

    pub fn bodies(&self) -> &RigidBodySystem {
        &self.bodies
    }

    /// Live handles in insertion order.
    pub fn body_handles(&self) -> &[BodyHandle] {
        self.bodies.handles()
    }

    // === HANDLERS ===

    pub fn register_force_handler(&mut self, creator: impl ForceCreator + 'static, dependents: Vec<BodyHandle>) {
        <Self as ForceRegistry>::register_force_handler(self, creator, dependents);
    }

    pub fn register_collision_handler(
        &mut self,
        a: BodyHandle,
        b: BodyHandle,
        handler: impl CollisionHandler + 'static,
    ) {
        <Self as ForceRegistry>::register_collision_handler(self, a, b, handler);
    }

    pub fn handlers(&self) -> &[ForceHandler] {
        &self.handlers
    }

    // === INPUT / STATUS ===

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Written by the host between ticks; handlers only read it.
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn status(&self) -> &SceneStatus {
        &self.status
    }

    pub fn time(&self) -> f64 { self.status.time }

    pub fn is_done(&self) -> bool { self.status.done }

    pub fn finished_level(&self) -> bool { self.status.finished_level }

    /// Advance the scene by `dt` seconds.
    pub fn tick(&mut self, dt: f64) -> TickReport {
        step::tick(self, dt)
    }

    /// Drop every body and handler and reset status and input.
    pub fn clear(&mut self) {
        commands::clear(self)
    }
}

impl Default for SceneCore {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceRegistry for SceneCore {
    fn bodies(&self) -> &RigidBodySystem {
        &self.bodies
    }

    fn add_body(&mut self, body: Body) -> BodyHandle {
        commands::add_body(self, body)
    }

    fn add_handler(&mut self, handler: ForceHandler) {
        commands::add_handler(self, handler)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
