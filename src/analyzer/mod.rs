pub mod series;
pub mod summary;

pub use series::{compute_daily_series, DailyCount};
pub use summary::{summarize, PrioritySlaBucket};
