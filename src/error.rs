//! Error types for the field-mapping engine.
//!
//! Resolution faults (missing or malformed style/config input) never surface
//! here — they are absorbed by fallback inside the resolver and the wire
//! converter. Only validation and assembly faults reach the caller.

/// Result type alias for field-mapping operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Machine-readable validation codes, stable against the backend contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationCode {
    /// A workflow step that requires a mapped field has none.
    FlowDataMissingSignature,
    /// A workflow step that requires an e-seal mapping has none.
    FlowDataMissingEseal,
}

impl ValidationCode {
    /// The stable wire form of this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationCode::FlowDataMissingSignature => "FLOW_DATA_MISSING_SIGNATURE",
            ValidationCode::FlowDataMissingEseal => "FLOW_DATA_MISSING_ESEAL",
        }
    }
}

impl std::fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error types that can occur during mapping validation and assembly.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The aggregated mapping violates a workflow invariant.
    #[error("{code}: {message}")]
    Validation {
        /// Machine-readable code
        code: ValidationCode,
        /// Human-readable message
        message: String,
    },

    /// The source document could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The source document was empty.
    #[error("Source document '{0}' is empty")]
    EmptyDocument(String),

    /// B2B assembly was requested without counterparty details.
    #[error("B2B submission requires counterparty details")]
    MissingPartyDetails,
}

impl Error {
    /// Build a validation error from a code and message.
    pub fn validation(code: ValidationCode, message: impl Into<String>) -> Self {
        Error::Validation {
            code,
            message: message.into(),
        }
    }

    /// The validation code, if this is a validation fault.
    pub fn validation_code(&self) -> Option<ValidationCode> {
        match self {
            Error::Validation { code, .. } => Some(*code),
            _ => None,
        }
    }
}
