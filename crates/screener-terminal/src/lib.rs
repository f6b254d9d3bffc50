//! screener-terminal library root.
//!
//! Re-exports internal modules so that integration tests can drive the
//! phase machine, the renderer and the input loop directly without going
//! through stdin/stdout.

pub mod config;
pub mod controller;
pub mod session;
pub mod terminal;
pub mod view;
