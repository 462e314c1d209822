//! Error types.
//!
//! Core operations return typed errors (`FetchError`, `AnalysisError`) so callers
//! can distinguish failure kinds and, e.g., add their own retry policy on top.
//! The application boundary folds everything into `AppError`, which carries the
//! process exit code used by `main`.

/// A fetch against the data provider failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Non-success HTTP status or transport failure.
    RequestFailed(String),
    /// The payload shape could not be parsed.
    ParseFailure(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::RequestFailed(msg) => write!(f, "{msg}"),
            FetchError::ParseFailure(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// The analyzer could not produce a summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// `summarize` was called on an empty change sequence.
    InsufficientData(String),
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::InsufficientData(entity) => {
                write!(f, "No observations available for {entity}.")
            }
        }
    }
}

impl std::error::Error for AnalysisError {}

/// Application-level error with a process exit code.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        AppError::new(4, err.to_string())
    }
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        AppError::new(4, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
