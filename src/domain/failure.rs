// Failure taxonomy for a single chart bootstrap
use thiserror::Error;

/// Why a chart could not be rendered.
///
/// Every variant except [`ChartFailure::ContainerMissing`] is shown to the
/// user through the error panel. A missing container has nowhere to show
/// anything, so it only reaches the logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartFailure {
    #[error("Unable to determine employee ID")]
    SubjectUnresolved,

    #[error("Chart container ({0}) not found")]
    ContainerMissing(String),

    #[error("{0}")]
    Network(String),

    #[error("{message}")]
    HttpStatus { status: u16, message: String },

    #[error("Invalid data: {0}")]
    SchemaInvalid(String),
}

impl ChartFailure {
    /// Generic message used when a non-2xx body carries no usable error text
    pub fn http_status(status: u16) -> Self {
        Self::HttpStatus {
            status,
            message: format!("HTTP {}", status),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_displayable(&self) -> bool {
        !matches!(self, Self::ContainerMissing(_))
    }

    /// Short tag for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SubjectUnresolved => "subject_unresolved",
            Self::ContainerMissing(_) => "container_missing",
            Self::Network(_) => "network",
            Self::HttpStatus { .. } => "http_status",
            Self::SchemaInvalid(_) => "schema_invalid",
        }
    }
}
