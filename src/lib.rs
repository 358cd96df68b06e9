//! Polyscene Engine - 2D convex-polygon rigid bodies in WASM
//!
//! Architecture:
//! - domain/      - Body payloads, settings, input table, prefabs
//! - systems/     - Geometry, body storage, collision, force handlers
//! - simulation/  - Scene ownership, tick scheduling, render extraction, JS facade

pub mod error;
pub mod domain;
pub mod systems;
pub mod simulation;

// Short paths for the most used systems
pub use systems::collision;
pub use systems::forces;
pub use systems::rigid_body;
pub use systems::rigid_body_system;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine: panic hook and console logger.
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    // A second call finds the logger already set; that is fine.
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    let _ = console_log::init_with_level(level);

    web_sys::console::log_1(&"Polyscene WASM engine initialized".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use domain::body_info::{BodyInfo, BodyKind};
pub use domain::settings::PhysicsSettings;
pub use error::{BodyError, GeometryError, SettingsError};
pub use simulation::{Scene, SceneCore};

/// Everything needed to build and run a scene from Rust.
pub mod prelude {
    pub use crate::domain::body_info::{BodyInfo, BodyKind, Movement, WallTouch};
    pub use crate::domain::input::{InputState, KeyState};
    pub use crate::domain::prefabs;
    pub use crate::domain::settings::PhysicsSettings;
    pub use crate::domain::status::SceneStatus;
    pub use crate::error::{BodyError, GeometryError, SettingsError};
    pub use crate::forces::{CollisionHandler, ForceContext, ForceCreator, ForceHandler, ForceRegistry};
    pub use crate::rigid_body::{shapes, Body, Polygon, RgbColor, Vec2};
    pub use crate::rigid_body_system::BodyHandle;
    pub use crate::collision::{CollisionEvent, Contact};
    pub use crate::simulation::{SceneCore, TickReport};
}
