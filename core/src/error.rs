use crate::types::Period;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Historical table missing or malformed: {reason}")]
    DataShape { reason: String },

    #[error("Scoring service failed: {reason}")]
    PredictionService { reason: String },

    #[error("Percent change undefined: most recent outcome is zero")]
    UndefinedChange,

    #[error("Failed to persist scenario: {reason}")]
    Persistence { reason: String },

    #[error("Calendar exhausted: no period remains after {last}")]
    CalendarExhausted { last: Period },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EngineError {
    pub fn data_shape(reason: impl Into<String>) -> Self {
        EngineError::DataShape { reason: reason.into() }
    }

    pub fn prediction_service(reason: impl Into<String>) -> Self {
        EngineError::PredictionService { reason: reason.into() }
    }

    pub fn persistence(reason: impl Into<String>) -> Self {
        EngineError::Persistence { reason: reason.into() }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
