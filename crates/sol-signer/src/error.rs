use sol_tx::SolError;
use thiserror::Error;

/// Coarse classification of a signing failure, for callers that only need
/// to decide who is at fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request itself is wrong: bad text encodings, missing fields,
    /// out-of-range values.
    MalformedInput,
    /// The request is well-formed but does not fit the message it targets.
    InternalConsistency,
    /// A key or signature failed a cryptographic check.
    Cryptographic,
}

#[derive(Debug, Error)]
pub enum SignerError {
    #[error(transparent)]
    Sol(#[from] SolError),

    #[error("Invalid {field}: {source}")]
    InvalidField {
        field: &'static str,
        #[source]
        source: SolError,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid JSON request: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No transaction type specified")]
    MissingTransactionType,

    #[error("Missing signature: {0}")]
    MissingSignature(String),
}

impl SignerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SignerError::InvalidField { .. }
            | SignerError::InvalidInput(_)
            | SignerError::Json(_)
            | SignerError::MissingTransactionType => ErrorKind::MalformedInput,
            SignerError::MissingSignature(_) => ErrorKind::InternalConsistency,
            SignerError::Sol(e) => match e {
                SolError::AccountNotFound(_)
                | SolError::SignatureCountMismatch { .. }
                | SolError::ProgramAddressExhausted => ErrorKind::InternalConsistency,
                SolError::InvalidSignature(_) | SolError::SigningError(_) => {
                    ErrorKind::Cryptographic
                }
                _ => ErrorKind::MalformedInput,
            },
        }
    }
}

/// Attach the name of the offending request field to a parse error.
pub(crate) trait FieldContext<T> {
    fn field(self, field: &'static str) -> Result<T, SignerError>;
}

impl<T> FieldContext<T> for Result<T, SolError> {
    fn field(self, field: &'static str) -> Result<T, SignerError> {
        self.map_err(|source| SignerError::InvalidField { field, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_context_in_message() {
        let parsed: Result<(), SolError> = Err(SolError::InvalidAddress("bad base58".into()));
        let err = parsed.field("recipient").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid recipient: invalid address: bad base58"
        );
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn sol_errors_are_transparent() {
        let err = SignerError::from(SolError::AccountNotFound("x".into()));
        assert_eq!(err.to_string(), "account not found: x");
    }

    #[test]
    fn kinds() {
        let mismatch = SignerError::from(SolError::SignatureCountMismatch {
            expected: 2,
            actual: 1,
        });
        assert_eq!(mismatch.kind(), ErrorKind::InternalConsistency);

        let forged = SignerError::from(SolError::InvalidSignature("bad".into()));
        assert_eq!(forged.kind(), ErrorKind::Cryptographic);

        assert_eq!(
            SignerError::MissingSignature("fee payer".into()).kind(),
            ErrorKind::InternalConsistency
        );
        assert_eq!(
            SignerError::MissingTransactionType.kind(),
            ErrorKind::MalformedInput
        );
    }
}
