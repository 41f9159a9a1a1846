//! Business-logic services sitting between routes and repositories.

pub mod auth;
pub mod checkout;

pub use auth::{AuthError, AuthService};
pub use checkout::{CheckoutError, CheckoutRequest, CheckoutService};
