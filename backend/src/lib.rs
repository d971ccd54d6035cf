//! Gatehouse Server Library
//!
//! This library exposes server modules for integration testing.

pub mod commands;
pub mod lifecycle;
pub mod logging;
pub mod middleware;
