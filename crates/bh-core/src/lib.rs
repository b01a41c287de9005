//! borghista/crates/bh-core/src/lib.rs
//!
//! The central domain logic and interface definitions for Il Borghista's
//! client-side persistence core.

pub mod borghi;
pub mod error;
pub mod geo;
pub mod models;
pub mod ports;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use ports::*;
