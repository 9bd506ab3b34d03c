//! Diagnostics raised while reading the sheet and shaping it into a chart.
//!
//! Each carries the phase it came from and a short code the page can key on.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Load,
    Validate,
    Select,
    Config,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Load => write!(f, "Load"),
            Phase::Validate => write!(f, "Validate"),
            Phase::Select => write!(f, "Select"),
            Phase::Config => write!(f, "Config"),
        }
    }
}

/// A recoverable problem found while turning sheet rows into a hierarchy.
///
/// None of these abort the pipeline; they are collected so the caller can
/// log or display them next to the (possibly degraded) chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetError {
    pub code: String,
    pub phase: Phase,
    pub message: String,
    pub label: Option<String>,
}

impl std::fmt::Display for SheetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.label {
            Some(label) => write!(
                f,
                "[{}:{}] {} (label '{}')",
                self.phase, self.code, self.message, label
            ),
            None => write!(f, "[{}:{}] {}", self.phase, self.code, self.message),
        }
    }
}

impl std::error::Error for SheetError {}

impl From<LoadError> for SheetError {
    fn from(e: LoadError) -> Self {
        SheetError::load("L001", e.to_string(), None)
    }
}

impl SheetError {
    pub fn load(code: &str, message: impl Into<String>, label: Option<String>) -> Self {
        SheetError {
            code: code.into(),
            phase: Phase::Load,
            message: message.into(),
            label,
        }
    }

    pub fn validate(code: &str, message: impl Into<String>, label: Option<String>) -> Self {
        SheetError {
            code: code.into(),
            phase: Phase::Validate,
            message: message.into(),
            label,
        }
    }

    pub fn select(code: &str, message: impl Into<String>) -> Self {
        SheetError {
            code: code.into(),
            phase: Phase::Select,
            message: message.into(),
            label: None,
        }
    }

    pub fn config(code: &str, message: impl Into<String>) -> Self {
        SheetError {
            code: code.into(),
            phase: Phase::Config,
            message: message.into(),
            label: None,
        }
    }
}

/// Failure to obtain any rows at all from the data source.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to parse sheet rows: {0}")]
    Json(#[from] serde_json::Error),
    #[error("sheet rows must be a JSON array, found {0}")]
    NotAnArray(&'static str),
    #[error("data source unavailable: {0}")]
    Source(String),
}
