use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnnuityError {
    #[error("Invalid parameter: {field} — {reason}")]
    InvalidParameter { field: String, reason: String },

    #[error("Numeric overflow in {context}")]
    NumericOverflow { context: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AnnuityError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        AnnuityError::InvalidParameter {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn overflow(context: impl Into<String>) -> Self {
        AnnuityError::NumericOverflow {
            context: context.into(),
        }
    }
}

impl From<serde_json::Error> for AnnuityError {
    fn from(e: serde_json::Error) -> Self {
        AnnuityError::Serialization(e.to_string())
    }
}
