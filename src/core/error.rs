use thiserror::Error;

/// Failure classes of the issuance pipeline.
///
/// The HTTP layer maps each variant to a status code: validation 400,
/// rejection 422, render 500, infrastructure and storage 502.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EmisionError {
    /// Malformed, missing or incoherent input.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// SUNAT declined the document.
    #[error("SUNAT rechazó el comprobante ({code}): {message}")]
    Rejection { code: String, message: String },

    /// Network, transport, signing or storage failure.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),

    /// PDF generation failure.
    #[error("render error: {0}")]
    Render(String),

    /// Artifact publishing failure.
    #[error("storage error: {0}")]
    Storage(String),
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "cliente.numDoc").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Missing required field.
    pub fn missing(field: impl Into<String>) -> Self {
        let field = field.into();
        let message = format!("required field '{field}' is missing");
        Self { field, message }
    }
}
