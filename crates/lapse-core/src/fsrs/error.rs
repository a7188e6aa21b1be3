//! Scheduler error types
//!
//! Every rejected input is reported to the caller. None of these conditions
//! is transient, so none of them is worth retrying with the same arguments.

/// Scheduler error type
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchedulerError {
    /// Grade value outside 1-4
    #[error("Invalid grade: {0} (expected 1=again, 2=hard, 3=good, 4=easy)")]
    InvalidGrade(i64),
    /// Grade text that is neither a grade name nor a number
    #[error("Unrecognized grade: {0:?}")]
    UnrecognizedGrade(String),
    /// Stability that is zero, negative or not finite
    #[error("Invalid stability: {0} (must be finite and greater than 0)")]
    InvalidStability(f64),
    /// Difficulty outside [1, 10] or not finite
    #[error("Invalid difficulty: {0} (must be within [1, 10])")]
    InvalidDifficulty(f64),
    /// Negative or non-finite elapsed time
    #[error("Invalid elapsed days: {0} (must be finite and >= 0)")]
    InvalidElapsedDays(f64),
    /// Target retention outside (0, 1]
    #[error("Invalid retention rate: {0} (must be within (0, 1])")]
    InvalidRetentionRate(f64),
    /// Malformed weight vector
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Scheduler result type
pub type Result<T> = std::result::Result<T, SchedulerError>;
