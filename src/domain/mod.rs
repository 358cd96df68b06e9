//! Gameplay vocabulary: body payloads, settings, input, and prefabs.

pub mod body_info;
pub mod input;
pub mod prefabs;
pub mod settings;
pub mod status;
