use core_types::Stat;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Opponent '{opponent}' has no aggregate for {stat}; it must be in the requested stat list")]
    MissingStat { opponent: String, stat: Stat },
}
