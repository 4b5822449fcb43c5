//! Shared constants.

/// Default agenda/export window: ±30 days from now.
pub const DEFAULT_WINDOW_DAYS: i64 = 30;
