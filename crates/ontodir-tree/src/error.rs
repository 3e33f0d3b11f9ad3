/// Failure to turn external document text into records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    #[error("malformed document at byte {position}: {message}")]
    Malformed { position: u64, message: String },
    #[error("document has no `{path}` element")]
    MissingPath { path: String },
    #[error("<{element}> has no `{field}` child")]
    MissingField { element: String, field: String },
}

impl TransformError {
    pub(crate) fn malformed(position: u64, message: impl Into<String>) -> Self {
        Self::Malformed {
            position,
            message: message.into(),
        }
    }

    pub fn missing_field(element: &str, field: &str) -> Self {
        Self::MissingField {
            element: element.to_string(),
            field: field.to_string(),
        }
    }
}
