use thiserror::Error;

/// Errors raised while building, compiling, encoding or signing Solana
/// transactions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SolError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid hash: {0}")]
    InvalidHash(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid params: {0}")]
    InvalidParams(String),

    /// An address was looked up in a message's account table and is not there.
    #[error("account not found: {0}")]
    AccountNotFound(String),

    #[error("signature count mismatch: expected {expected}, got {actual}")]
    SignatureCountMismatch { expected: usize, actual: usize },

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("unable to find a viable program address bump seed")]
    ProgramAddressExhausted,

    #[error("transaction too large: {0}")]
    TransactionTooLarge(String),

    #[error("serialization error: {0}")]
    SerializationError(String),

    #[error("signing error: {0}")]
    SigningError(String),
}
