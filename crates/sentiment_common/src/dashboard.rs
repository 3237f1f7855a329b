//! Results dashboard state machine.
//!
//! ```text
//!   Idle    --begin-->       Loading
//!   Error   --begin-->       Loading
//!   Loading --resolve(Ok)--> Idle (new results)
//!   Loading --resolve(Err)-> Error (no results)
//!   any     --clear-->       Idle (empty)
//! ```
//!
//! Every `begin` and `clear` bumps the request generation. An outcome is
//! applied only when its ticket still matches, so a response arriving after a
//! clear or a newer request cannot bring back stale results.

use crate::error::AnalysisError;
use crate::types::{AnalysisResult, SentimentSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Display state of the results section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "message", rename_all = "lowercase")]
pub enum DashboardPhase {
    /// Showing the current list; a placeholder when it is empty
    Idle,
    Loading,
    Error(String),
}

/// Identifies one analysis call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
}

impl RequestTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    phase: DashboardPhase,
    results: Vec<AnalysisResult>,
    generation: u64,
    completed_at: Option<DateTime<Utc>>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            phase: DashboardPhase::Idle,
            results: Vec::new(),
            generation: 0,
            completed_at: None,
        }
    }

    /// Start a call. Refused while another is in flight.
    pub fn begin(&mut self) -> Option<RequestTicket> {
        if self.is_loading() {
            debug!("Analysis already in flight, refusing generation {}", self.generation + 1);
            return None;
        }
        self.generation += 1;
        self.phase = DashboardPhase::Loading;
        self.results.clear();
        Some(RequestTicket {
            generation: self.generation,
        })
    }

    /// Apply an outcome. Returns false when the ticket was superseded.
    pub fn resolve(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<Vec<AnalysisResult>, AnalysisError>,
    ) -> bool {
        if ticket.generation != self.generation || !self.is_loading() {
            info!(
                "Discarding stale response for generation {} (current {})",
                ticket.generation, self.generation
            );
            return false;
        }

        match outcome {
            Ok(results) => {
                self.results = results;
                self.phase = DashboardPhase::Idle;
            }
            Err(e) => {
                self.results.clear();
                self.phase = DashboardPhase::Error(e.user_message());
            }
        }
        self.completed_at = Some(Utc::now());
        true
    }

    /// Drop results and errors; supersedes any in-flight call
    pub fn clear(&mut self) {
        self.generation += 1;
        self.phase = DashboardPhase::Idle;
        self.results.clear();
        self.completed_at = None;
    }

    pub fn phase(&self) -> &DashboardPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == DashboardPhase::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            DashboardPhase::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn results(&self) -> &[AnalysisResult] {
        &self.results
    }

    pub fn summary(&self) -> SentimentSummary {
        SentimentSummary::from_results(&self.results)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }
}
