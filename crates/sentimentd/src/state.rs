//! Shared daemon state.

use sentiment_common::{Dashboard, InputArea, SentimentAnalyzer};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

/// Application state shared across handlers
pub struct AppState {
    pub analyzer: SentimentAnalyzer,
    pub dashboard: RwLock<Dashboard>,
    pub input: RwLock<InputArea>,
    pub max_upload_bytes: usize,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(analyzer: SentimentAnalyzer, max_upload_bytes: usize) -> Self {
        Self {
            analyzer,
            dashboard: RwLock::new(Dashboard::new()),
            input: RwLock::new(InputArea::new()),
            max_upload_bytes,
            started_at: Instant::now(),
        }
    }
}

/// Thread-safe shared state handle
pub type SharedState = Arc<AppState>;
