//! Ed25519 keypairs and signatures.

use std::fmt;
use std::str::FromStr;

use ed25519_dalek::{Signer as _, SigningKey, VerifyingKey};
use zeroize::Zeroize;

use crate::address::Address;
use crate::error::SolError;

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// A 64-byte Ed25519 signature. The all-zero value marks an unsigned slot.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; 64]);

impl Signature {
    pub const LEN: usize = 64;

    pub const fn new(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    pub const fn to_bytes(&self) -> [u8; 64] {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// `true` for the zeroed placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

impl Default for Signature {
    fn default() -> Self {
        Self([0u8; 64])
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = SolError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        <[u8; 64]>::try_from(bytes).map(Self).map_err(|_| {
            SolError::InvalidSignature(format!("expected 64 bytes, got {}", bytes.len()))
        })
    }
}

impl FromStr for Signature {
    type Err = SolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| SolError::InvalidSignature(format!("base58 decode failed: {e}")))?;
        Self::try_from(bytes.as_slice())
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({self})")
    }
}

// ---------------------------------------------------------------------------
// Keypair
// ---------------------------------------------------------------------------

/// An Ed25519 signing key together with its Solana address.
///
/// The secret half is wiped when the keypair is dropped.
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Build a keypair from secret key bytes.
    ///
    /// Accepts either the 32-byte seed or the 64-byte `seed || public key`
    /// form written by the Solana CLI. In the latter case the public half must
    /// match the seed.
    pub fn from_bytes(secret: &[u8]) -> Result<Self, SolError> {
        let mut seed = [0u8; 32];
        match secret.len() {
            32 => seed.copy_from_slice(secret),
            64 => seed.copy_from_slice(&secret[..32]),
            n => {
                return Err(SolError::InvalidPrivateKey(format!(
                    "expected 32 or 64 bytes, got {n}"
                )))
            }
        }

        let signing_key = SigningKey::from_bytes(&seed);
        seed.zeroize();

        if secret.len() == 64 && signing_key.verifying_key().as_bytes() != &secret[32..] {
            return Err(SolError::InvalidPrivateKey(
                "public key half does not match the seed".into(),
            ));
        }

        Ok(Self { signing_key })
    }

    /// Build a keypair from a Base58-encoded secret.
    pub fn from_base58(secret: &str) -> Result<Self, SolError> {
        let mut bytes = bs58::decode(secret)
            .into_vec()
            .map_err(|e| SolError::InvalidPrivateKey(format!("base58 decode failed: {e}")))?;
        let keypair = Self::from_bytes(&bytes);
        bytes.zeroize();
        keypair
    }

    pub fn address(&self) -> Address {
        Address::from_public_key(&self.signing_key.verifying_key())
    }

    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }

    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature(self.signing_key.sign(message).to_bytes())
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

/// Check `signature` over `message` against the Ed25519 key behind `address`.
pub fn verify_signature(
    address: &Address,
    message: &[u8],
    signature: &Signature,
) -> Result<(), SolError> {
    let key = VerifyingKey::from_bytes(address.as_bytes())
        .map_err(|e| SolError::InvalidPublicKey(format!("{address}: {e}")))?;
    let signature = ed25519_dalek::Signature::from_bytes(signature.as_bytes());
    key.verify_strict(message, &signature)
        .map_err(|_| SolError::InvalidSignature(format!("signature does not verify for {address}")))
}
