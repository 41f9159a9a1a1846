//! Domain models for the storefront API.
//!
//! These map 1:1 to the persisted tables. They derive `sqlx::FromRow` so the
//! repositories can select straight into them, and serialize as camelCase to
//! match the public JSON surface.

pub mod cart;
pub mod catalog;
pub mod order;
pub mod session;
pub mod user;

pub use cart::CartItem;
pub use catalog::{Category, Product};
pub use order::{Order, OrderItem};
pub use session::Session;
pub use user::User;
