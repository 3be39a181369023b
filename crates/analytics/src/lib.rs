//! # Opponent Analytics
//!
//! Turns loaded box-score rows into per-opponent tables.
//!
//! ## Stages
//!
//! 1. [`partition`]: split rows into played and did-not-play games, coercing the
//!    played games' stat cells to numbers.
//! 2. [`aggregate`]: group played games by opponent and compute game count,
//!    totals and averages for any requested statistics.
//! 3. [`compose`]: project the six tracked averages, append the combined
//!    metrics and rank by average points.
//!
//! Every stage borrows its input and returns a new table. The
//! [`AnalyticsEngine`] chains them and is stateless.

// Declare the modules that constitute this crate.
pub mod aggregate;
pub mod compose;
pub mod engine;
pub mod error;
pub mod format;
pub mod partition;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use aggregate::{aggregate_by_opponent, points_summary, team_summary};
pub use compose::compose_derived_metrics;
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use format::{format_summary, summary_headers};
pub use partition::{PartitionedGames, partition_games};
pub use report::PipelineReport;
