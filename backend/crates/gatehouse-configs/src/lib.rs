//! gatehouse-configs
//!
//! Server configuration types and loader for Gatehouse.

pub mod config;

pub use config::*;
pub use config::defaults;
