use thiserror::Error;

use crate::board::ZoneKind;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DartsError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid zone: cannot aim at {zone:?} with value {value}")]
    InvalidZone { value: u32, zone: ZoneKind },

    #[error("Invalid value: {value} is not a single-throw score")]
    InvalidValue { value: u32 },

    #[error("Too many committed throws: {count} (a turn has 3)")]
    TooManyCommitted { count: usize },

    #[error("Committed throws total {committed}, more than the {remaining} remaining")]
    Overshoot { remaining: u32, committed: u32 },

    #[error("Game already finished")]
    GameFinished,

    #[error("Throw error source exhausted")]
    ErrorSourceExhausted,
}

impl DartsError {
    /// Contract violations and exhausted test sources are never recoverable;
    /// a bad configuration can be fixed by the caller and retried.
    pub fn is_recoverable(&self) -> bool {
        match self {
            DartsError::InvalidConfiguration(_) => true,
            DartsError::InvalidZone { .. } => false,
            DartsError::InvalidValue { .. } => false,
            DartsError::TooManyCommitted { .. } => false,
            DartsError::Overshoot { .. } => false,
            DartsError::GameFinished => false,
            DartsError::ErrorSourceExhausted => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, DartsError>;
