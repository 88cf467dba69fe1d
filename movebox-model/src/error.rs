use thiserror::Error;

/// Errors raised while normalizing user-supplied values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Color name or RGB value that matches no known color
    #[error("Invalid color: '{0}'")]
    InvalidColor(String),

    /// Timestamp that is neither ISO-8601 nor "now"
    #[error("Invalid timestamp '{input}': {reason}")]
    InvalidTimestamp { input: String, reason: String },

    /// Table or record type name that is not part of the schema
    #[error("Unknown record type: '{0}'")]
    UnknownRecordKind(String),

    /// Label type name with no matching label layout
    #[error("Unknown label type: '{0}' (expected one of: page, bagtag)")]
    UnknownLabelKind(String),

    /// Box id argument that is neither an id nor a start-end range
    #[error("Invalid id or range: '{0}'")]
    InvalidIdRange(String),
}

impl ModelError {
    pub fn invalid_timestamp(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTimestamp {
            input: input.into(),
            reason: reason.into(),
        }
    }
}
