//! Rigid body - a convex polygon that moves as a unit.
//!
//! Geometry lives in world coordinates; the body caches its centroid and
//! bounding radius and keeps them in step with every translate and rotate.

mod vec2;
mod polygon;
mod color;
mod body;
pub mod shapes;

pub use vec2::Vec2;
pub use polygon::Polygon;
pub use color::RgbColor;
pub use body::Body;
