use log::debug;

use crate::domain::input::InputState;
use crate::domain::status::SceneStatus;
use crate::error::BodyError;
use crate::rigid_body::{Body, Polygon, RgbColor};
use crate::rigid_body_system::BodyHandle;
use crate::systems::forces::ForceHandler;

use super::SceneCore;

pub(super) fn add_body(scene: &mut SceneCore, body: Body) -> BodyHandle {
    let handle = scene.bodies.insert(body);
    debug!("added body {:?} ({} in scene)", handle, scene.bodies.len());
    handle
}

pub(super) fn create_body(
    scene: &mut SceneCore,
    polygon: Polygon,
    mass: f64,
    color: RgbColor,
) -> Result<BodyHandle, BodyError> {
    let body = Body::new(polygon, mass, color)?;
    Ok(add_body(scene, body))
}

/// Returns false if the handle no longer resolves.
pub(super) fn remove_body(scene: &mut SceneCore, handle: BodyHandle) -> bool {
    match scene.bodies.get_mut(handle) {
        Some(body) => {
            body.mark_removed();
            true
        }
        None => false,
    }
}

pub(super) fn add_handler(scene: &mut SceneCore, handler: ForceHandler) {
    debug!("registered handler on {:?}", handler.dependents());
    scene.handlers.push(handler);
}

pub(super) fn clear(scene: &mut SceneCore) {
    scene.handlers.clear();
    scene.pending.clear();
    scene.bodies.clear();
    scene.status = SceneStatus::default();
    scene.input = InputState::new();
    scene.frame = 0;
    scene.perf_stats.reset();
}
