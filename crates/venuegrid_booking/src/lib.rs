// --- File: crates/venuegrid_booking/src/lib.rs ---
pub mod doc;
pub mod handlers;
#[cfg(test)]
mod handlers_test;
pub mod logic;
pub mod routes;
pub mod service;

pub use routes::{routes, routes_with_engine};
