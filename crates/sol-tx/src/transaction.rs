//! Signed transactions and their wire encodings.
//!
//! # Wire format
//!
//! ```text
//! [compact-u16: num_signatures]
//! [64-byte signature] * num_signatures
//! [message]
//! ```
//!
//! Signature slot `i` belongs to account key `i` of the message. Unsigned
//! slots hold 64 zero bytes.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use log::warn;

use crate::address::{Address, Hash};
use crate::error::SolError;
use crate::keypair::{verify_signature, Signature};
use crate::message::VersionedMessage;
use crate::short_vec::{write_len, WireReader};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub(crate) signatures: Vec<Signature>,
    pub(crate) message: VersionedMessage,
}

impl Transaction {
    /// Wrap `message` with one zeroed signature slot per required signer.
    pub fn new(message: VersionedMessage) -> Self {
        let slots = message.header().num_required_signatures as usize;
        Self {
            signatures: vec![Signature::default(); slots],
            message,
        }
    }

    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    pub fn message(&self) -> &VersionedMessage {
        &self.message
    }

    pub fn into_message(self) -> VersionedMessage {
        self.message
    }

    /// The bytes every signer signs.
    pub fn message_data(&self) -> Result<Vec<u8>, SolError> {
        self.message.serialize()
    }

    /// Position of `address` in the message's account table.
    pub fn account_index(&self, address: &Address) -> Result<usize, SolError> {
        self.message
            .account_keys()
            .iter()
            .position(|k| k == address)
            .ok_or_else(|| {
                SolError::AccountNotFound("publicKey not found in message.accountKeys".into())
            })
    }

    /// Pairs each required signer with the signature in its slot.
    pub fn signer_signatures(&self) -> impl Iterator<Item = (Address, Signature)> + '_ {
        self.message
            .signer_keys()
            .iter()
            .copied()
            .zip(self.signatures.iter().copied())
    }

    pub fn is_fully_signed(&self) -> bool {
        self.signatures.iter().all(|s| !s.is_placeholder())
    }

    /// Re-anchor the message to `blockhash`.
    ///
    /// Every existing signature covers the old bytes, so all slots are reset
    /// to the zero placeholder.
    pub fn set_recent_blockhash(&mut self, blockhash: Hash) {
        if self.signatures.iter().any(|s| !s.is_placeholder()) {
            warn!(
                "blockhash changed to {blockhash}, discarding {} existing signatures",
                self.signatures.len()
            );
        }
        self.message.set_recent_blockhash(blockhash);
        self.signatures.fill(Signature::default());
    }

    /// Check every signature slot against its signer key.
    pub fn verify(&self) -> Result<(), SolError> {
        let message = self.message_data()?;
        for (address, signature) in self.signer_signatures() {
            verify_signature(&address, &message, &signature)?;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Encoding
    // -----------------------------------------------------------------------

    pub fn serialize(&self) -> Result<Vec<u8>, SolError> {
        let message = self.message_data()?;
        let mut wire =
            Vec::with_capacity(1 + self.signatures.len() * Signature::LEN + message.len());

        write_len(&mut wire, self.signatures.len())?;
        for signature in &self.signatures {
            wire.extend_from_slice(signature.as_bytes());
        }
        wire.extend_from_slice(&message);

        Ok(wire)
    }

    pub fn to_base58(&self) -> Result<String, SolError> {
        Ok(bs58::encode(self.serialize()?).into_string())
    }

    pub fn to_base64(&self) -> Result<String, SolError> {
        Ok(BASE64.encode(self.serialize()?))
    }

    /// Parse wire bytes. The signature count must match the message header.
    pub fn from_bytes(data: &[u8]) -> Result<Self, SolError> {
        let mut reader = WireReader::new(data);

        let count = reader.read_len()?;
        let mut signatures = Vec::with_capacity(count);
        for _ in 0..count {
            signatures.push(Signature::new(reader.read_array("signature")?));
        }

        let message = VersionedMessage::read(&mut reader)?;
        if !reader.is_empty() {
            return Err(SolError::SerializationError(format!(
                "{} trailing bytes after transaction",
                data.len() - reader.position()
            )));
        }

        let expected = message.header().num_required_signatures as usize;
        if signatures.len() != expected {
            return Err(SolError::SignatureCountMismatch {
                expected,
                actual: signatures.len(),
            });
        }

        Ok(Self {
            signatures,
            message,
        })
    }

    pub fn from_base58(encoded: &str) -> Result<Self, SolError> {
        let bytes = bs58::decode(encoded)
            .into_vec()
            .map_err(|e| SolError::SerializationError(format!("base58 decode failed: {e}")))?;
        Self::from_bytes(&bytes)
    }

    pub fn from_base64(encoded: &str) -> Result<Self, SolError> {
        let bytes = BASE64
            .decode(encoded)
            .map_err(|e| SolError::SerializationError(format!("base64 decode failed: {e}")))?;
        Self::from_bytes(&bytes)
    }
}
