//! Command implementations for the CLI
//!
//! - serve: Start the HTTP server
//! - analyze: Run one image through the analysis pipeline
//! - models: List known model names
//! - config: Configuration display and validation

pub mod analyze;
pub mod config;
pub mod models;
pub mod serve;
