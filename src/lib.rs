// Library interface for loadtrend modules
// This allows integration tests to access the core functionality

pub mod clock;
pub mod config;
pub mod daily;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod pmc;
pub mod preparer;
pub mod service;
pub mod source;
pub mod stress;

// Re-export commonly used types for convenience
pub use models::*;
pub use clock::{Clock, FixedClock, SystemClock};
pub use daily::{DailyStressGenerator, PREVIEW_DAYS};
pub use stress::StressCalculator;
pub use pmc::{PmcCalculator, TsbInterpretation, ATL_TIME_CONSTANT, CTL_TIME_CONSTANT};
pub use preparer::{ActivityPreparer, PreparationOptions};
pub use service::FitnessTrendService;
pub use source::{ActivitySource, JsonFileSource, StaticSource};
pub use export::{DateRange, ExportFormat};
pub use error::{TrendError, Result, SourceError};
pub use logging::{LogConfig, LogLevel, LogFormat};
