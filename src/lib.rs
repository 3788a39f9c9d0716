//! Food Log Renderer Library
//!
//! Turns a daily weight, step and meal log into an HTML report with charts,
//! trend markers and summary figures.

pub mod advisory;
pub mod build_info;
pub mod config;
pub mod dates;
pub mod loader;
pub mod models;
pub mod nutrition;
pub mod report;
pub mod stats;
