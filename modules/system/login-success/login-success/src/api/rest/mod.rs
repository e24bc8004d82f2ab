//! REST surface of the login success module.

pub mod error;
pub mod handlers;
pub mod routes;
