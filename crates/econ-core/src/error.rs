//! Error types for the econometric diagnostics pipeline
//!
//! Provides a unified error type for all econ-stats crates.

use thiserror::Error;

/// Core error type for econometric computations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data (NaN, mismatched lengths, unordered timestamps)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data for {context}: expected at least {expected} samples, got {actual}")]
    InsufficientData {
        context: String,
        expected: usize,
        actual: usize,
    },

    /// A series has zero variance where variance is required
    #[error("Degenerate input in {context}: {reason}")]
    DegenerateInput { context: String, reason: String },

    /// Collinear or constant regressors
    #[error("Singular design matrix in {context}: {reason}")]
    SingularDesignMatrix { context: String, reason: String },

    /// Design matrix too ill-conditioned to trust the solution
    #[error(
        "Numerical instability in {context}: condition number {condition_number:.3e} exceeds {threshold:.3e}"
    )]
    NumericalInstability {
        context: String,
        condition_number: f64,
        threshold: f64,
    },

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// A pipeline step failed; carries the step and series it ran on
    #[error("{step} failed{}: {source}", series_suffix(.series))]
    Step {
        step: String,
        series: Option<String>,
        #[source]
        source: Box<Error>,
    },

    /// IO error (for file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

fn series_suffix(series: &Option<String>) -> String {
    series
        .as_deref()
        .map(|name| format!(" for series '{name}'"))
        .unwrap_or_default()
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for too few observations
    pub fn insufficient(context: &str, expected: usize, actual: usize) -> Self {
        Self::InsufficientData {
            context: context.to_string(),
            expected,
            actual,
        }
    }

    /// Create an error for zero-variance input
    pub fn degenerate(context: &str, reason: impl Into<String>) -> Self {
        Self::DegenerateInput {
            context: context.to_string(),
            reason: reason.into(),
        }
    }

    /// Create an error for a rank-deficient design
    pub fn singular(context: &str, reason: impl Into<String>) -> Self {
        Self::SingularDesignMatrix {
            context: context.to_string(),
            reason: reason.into(),
        }
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::InvalidInput(format!("{context} contains NaN or infinite values"))
    }

    /// Wrap this error with the pipeline step (and series) that produced it
    pub fn in_step(self, step: &str, series: Option<&str>) -> Self {
        Self::Step {
            step: step.to_string(),
            series: series.map(str::to_string),
            source: Box::new(self),
        }
    }

    /// Underlying error with every `Step` layer removed
    pub fn root_cause(&self) -> &Error {
        match self {
            Self::Step { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
