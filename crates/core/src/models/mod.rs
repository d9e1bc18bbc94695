pub mod export;
pub mod record;
pub mod statistics;

pub use export::ExportDocument;
pub use record::{GameRecord, Winner};
pub use statistics::{GameStats, PerformanceSeries, WinRates};
