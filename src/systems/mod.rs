pub mod rigid_body;
pub mod rigid_body_system;
pub mod collision;
pub mod forces;
