use log::warn;

use crate::domain::settings::PhysicsSettings;
use crate::error::SettingsError;

use super::init::seeded_rng;
use super::perf_stats::PerfStats;
use super::SceneCore;

pub(super) fn load_settings_json(scene: &mut SceneCore, json: &str) -> Result<(), SettingsError> {
    match PhysicsSettings::from_json(json) {
        Ok(settings) => {
            scene.settings = settings;
            Ok(())
        }
        Err(err) => {
            warn!("settings rejected, keeping previous: {err}");
            Err(err)
        }
    }
}

pub(super) fn reseed(scene: &mut SceneCore, seed: u64) {
    scene.settings.seed = seed;
    scene.rng = seeded_rng(seed);
}

pub(super) fn enable_perf_metrics(scene: &mut SceneCore, enabled: bool) {
    scene.perf_enabled = enabled;
    if !enabled {
        scene.perf_stats.reset();
    }
}

pub(super) fn perf_stats(scene: &SceneCore) -> PerfStats {
    scene.perf_stats.clone()
}
