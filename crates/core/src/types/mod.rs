//! Newtype wrappers and enums shared across the workspace.

mod email;
mod id;
mod role;
mod status;

pub use email::{Email, EmailError};
pub use role::UserRole;
pub use status::{OrderStatus, SessionPurpose};

pub use id::*;
