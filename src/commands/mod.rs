//! Command implementations for the CLI
//!
//! - start: Start the HTTP server
//! - reload: Ask a running server to reload its catalog
//! - check: Parse the catalog and report what was loaded
//! - recommend: Offline recommendation against the catalog
//! - config: Configuration display and validation

pub mod check;
pub mod config;
pub mod recommend;
pub mod reload;
pub mod start;
