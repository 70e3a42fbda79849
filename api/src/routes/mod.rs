//! Route handlers, one module per service

pub mod auth;
pub mod health;
pub mod order;
pub mod user;
