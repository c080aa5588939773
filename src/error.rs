// Error taxonomy for the filtering and countdown core

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// A filter control sent a name outside the known set.
    #[error("invalid {field} `{value}`")]
    InvalidCriteria { field: &'static str, value: String },

    /// A catalog row that cannot take part in filtering.
    #[error("malformed record `{id}`: {reason}")]
    MalformedRecord { id: String, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ScheduleError {
    pub fn invalid_criteria(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidCriteria {
            field,
            value: value.into(),
        }
    }

    pub fn malformed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            id: id.into(),
            reason: reason.into(),
        }
    }
}
