use std::fmt;

/// Errors raised when simulation inputs fail validation
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    InvalidParameter {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
    InvalidBounds {
        field: &'static str,
        min: f64,
        max: f64,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidParameter {
                field,
                value,
                reason,
            } => {
                write!(f, "invalid value {value} for {field}: {reason}")
            }
            ValidationError::InvalidBounds { field, min, max } => {
                write!(f, "invalid bounds [{min}, {max}] for {field}: min must be below max")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors related to solver and sensitivity-analysis operations
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    Validation(ValidationError),
    /// A variable name that is not part of the plan-variable whitelist
    UnknownVariable(String),
    /// Analysis was cancelled by user request
    Cancelled,
    /// Configuration error
    Config(String),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::Validation(e) => write!(f, "validation error: {e}"),
            AnalysisError::UnknownVariable(name) => {
                write!(f, "unknown plan variable '{name}'")
            }
            AnalysisError::Cancelled => write!(f, "analysis cancelled"),
            AnalysisError::Config(msg) => write!(f, "configuration error: {msg}"),
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalysisError::Validation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationError> for AnalysisError {
    fn from(e: ValidationError) -> Self {
        AnalysisError::Validation(e)
    }
}
