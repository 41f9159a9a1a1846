//! Polostore API library.
//!
//! A JSON HTTP storefront core: bearer-token authentication, product and
//! category catalog, anonymous carts, orders, and a transactional checkout.
//! This crate exposes the functionality as a library so the binary stays
//! thin and integration tests can drive the router directly.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
