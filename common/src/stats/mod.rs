mod record;
mod store;

pub use record::StatisticsRecord;
pub use store::{DEFAULT_STATS_FILE, StatsStore};
