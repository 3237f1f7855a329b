//! sentimentctl - terminal client for batch sentiment analysis

pub mod cli;
pub mod commands;
pub mod output;
