//! Sentiment dashboard daemon library - exposes modules for testing.

pub mod chart;
pub mod render;
pub mod routes;
pub mod server;
pub mod state;
