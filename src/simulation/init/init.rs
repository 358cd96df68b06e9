use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::domain::input::InputState;
use crate::domain::settings::PhysicsSettings;
use crate::domain::status::SceneStatus;
use crate::rigid_body_system::RigidBodySystem;
use crate::systems::collision::CollisionCounters;

use super::perf_stats::PerfStats;
use super::SceneCore;

pub(super) fn seeded_rng(seed: u64) -> Box<dyn RngCore> {
    Box::new(Xoshiro256PlusPlus::seed_from_u64(seed))
}

pub(super) fn create_scene_core(settings: PhysicsSettings) -> SceneCore {
    let rng = seeded_rng(settings.seed);
    create_scene_core_with_rng(settings, rng)
}

pub(super) fn create_scene_core_with_rng(settings: PhysicsSettings, rng: Box<dyn RngCore>) -> SceneCore {
    SceneCore {
        bodies: RigidBodySystem::new(),
        handlers: Vec::with_capacity(64),
        pending: Vec::new(),
        input: InputState::new(),
        rng,
        settings,
        status: SceneStatus::default(),
        counters: CollisionCounters::default(),
        frame: 0,
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    }
}
