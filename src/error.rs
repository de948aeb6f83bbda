//! Unified error hierarchy for loadtrend
//!
//! Every pipeline stage reports through [`TrendError`]. Failures of the
//! activity source are forwarded untouched so callers see the upstream error.

use crate::models::HeartRateImpulseMode;
use thiserror::Error;

/// Error produced by an activity source
pub type SourceError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all loadtrend operations
#[derive(Debug, Error)]
pub enum TrendError {
    /// The heart rate mode cannot be combined with an enabled feature
    #[error("Incompatible configuration: {mode} mode cannot be combined with {feature}")]
    IncompatibleConfiguration {
        mode: HeartRateImpulseMode,
        feature: String,
    },

    /// No activity in the batch could be scored
    #[error("Insufficient data: no activity carries the minimum data required to compute a stress score")]
    InsufficientData,

    /// Activity source failure, forwarded as-is
    #[error(transparent)]
    Fetch(SourceError),

    /// Data validation errors
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for loadtrend operations
pub type Result<T> = std::result::Result<T, TrendError>;

impl TrendError {
    /// Only the activity source may be retried; the computation is pure
    pub fn is_retryable(&self) -> bool {
        matches!(self, TrendError::Fetch(_))
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TrendError::InsufficientData => ErrorSeverity::Warning,
            TrendError::Validation(_) => ErrorSeverity::Warning,
            TrendError::IncompatibleConfiguration { .. } => ErrorSeverity::Error,
            TrendError::Fetch(_) => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            TrendError::IncompatibleConfiguration { mode, feature } => format!(
                "The {} heart rate mode cannot be used while {} is enabled. Switch to hrss or disable {}.",
                mode, feature, feature
            ),
            TrendError::InsufficientData => {
                "None of your activities has heart rate, power or swim data to compute a training load."
                    .to_string()
            }
            TrendError::Fetch(e) => format!("Unable to load activities: {}", e),
            TrendError::Validation(_) => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Error that prevents operation but system can continue
    Error,
    /// Warning that doesn't prevent operation
    Warning,
}
