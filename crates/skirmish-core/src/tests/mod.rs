//! Cross-module tests for the battlefield engine.
//!
//! - `integration.rs`: end-to-end battles and control lifecycle over a real
//!   thread
//! - `helpers.rs`: scenario setup utilities

mod helpers;

pub use helpers::*;
