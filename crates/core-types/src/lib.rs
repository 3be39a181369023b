pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::Stat;
pub use error::CoreError;
pub use structs::{
    normalize_opponent, round2, ActiveGame, DerivedOpponentMetrics, GameRecord, OpponentSummary,
    PointsSummary, StatAggregate, StatLine, StatValue, FEATURE_NAMES, INACTIVE_SENTINEL,
    OPPONENT_ALIASES,
};
