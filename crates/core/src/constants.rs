//! Shared constants for the refresh pipeline and summary artifact.

/// Inclusive lower bound of the synthetic GDP multiplier.
pub const GDP_FACTOR_MIN: i64 = 1000;

/// Inclusive upper bound of the synthetic GDP multiplier.
pub const GDP_FACTOR_MAX: i64 = 2000;

/// Number of countries shown on the summary leaderboard.
pub const SUMMARY_TOP_COUNT: usize = 5;

/// File name of the cached summary artifact, stable across regenerations.
pub const SUMMARY_FILENAME: &str = "summary.png";

/// Canvas dimensions of the summary artifact.
pub const SUMMARY_WIDTH: u32 = 800;
pub const SUMMARY_HEIGHT: u32 = 600;
