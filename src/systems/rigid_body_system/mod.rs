//! RigidBodySystem - owning table of scene bodies.
//!
//! Bodies live in generational slots addressed by [`BodyHandle`]; force
//! handlers keep handles, never references, so the table can grow and shrink
//! between handler calls.

mod handle;
mod system;

pub use handle::BodyHandle;
pub use system::{BodyPass, RigidBodySystem};
