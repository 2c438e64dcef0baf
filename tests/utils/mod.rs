pub mod history_builders;

// Re-export main utilities for use by test files
pub use history_builders::HistoryBuilder;
