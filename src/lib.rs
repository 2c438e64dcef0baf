// Library crate for the mahjong league engine
// Exposes the computation core and the HTTP surface for integration tests

pub mod api;
pub mod config;
pub mod league;
pub mod shared;

// Re-export commonly used types for easier access in tests
pub use config::{AppConfig, ConfigError};
pub use league::{
    GameForm, GameFormValidator, GameRecord, Period, PlayerStats, RuleSettings, ScoreConverter,
    StatsAggregator, TrophyEvaluator, ValidationError, ValidationMode,
};
pub use shared::{AppError, AppState};
