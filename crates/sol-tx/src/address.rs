//! Solana addresses and blockhashes.
//!
//! Both are plain 32-byte values shown as Base58 text. An address is usually
//! an Ed25519 public key, but program-derived addresses and sysvars are just
//! hash outputs or well-known constants. No checksum and no hashing step is
//! involved in the text form.

use std::fmt;
use std::str::FromStr;

use ed25519_dalek::VerifyingKey;

use crate::error::SolError;

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A 32-byte Solana account address.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; 32]);

impl Address {
    pub const LEN: usize = 32;

    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// The address owned by an Ed25519 public key: the key bytes themselves.
    pub fn from_public_key(key: &VerifyingKey) -> Self {
        Self(key.to_bytes())
    }

    /// Returns `true` if `text` is Base58 that decodes to exactly 32 bytes.
    pub fn is_valid(text: &str) -> bool {
        decode_base58_32(text).is_ok()
    }

    pub const fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl FromStr for Address {
    type Err = SolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_base58_32(s).map(Self).map_err(SolError::InvalidAddress)
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = SolError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        <[u8; 32]>::try_from(bytes).map(Self).map_err(|_| {
            SolError::InvalidAddress(format!(
                "invalid size: expected 32 bytes, got {}",
                bytes.len()
            ))
        })
    }
}

impl From<[u8; 32]> for Address {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<&VerifyingKey> for Address {
    fn from(key: &VerifyingKey) -> Self {
        Self::from_public_key(key)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

// ---------------------------------------------------------------------------
// Hash
// ---------------------------------------------------------------------------

/// A 32-byte recent blockhash or durable nonce value.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Hash([u8; 32]);

impl Hash {
    pub const LEN: usize = 32;

    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub const fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl FromStr for Hash {
    type Err = SolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_base58_32(s).map(Self).map_err(SolError::InvalidHash)
    }
}

impl TryFrom<&[u8]> for Hash {
    type Error = SolError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        <[u8; 32]>::try_from(bytes).map(Self).map_err(|_| {
            SolError::InvalidHash(format!("invalid size: expected 32 bytes, got {}", bytes.len()))
        })
    }
}

impl From<[u8; 32]> for Hash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({self})")
    }
}

fn decode_base58_32(text: &str) -> Result<[u8; 32], String> {
    let bytes = bs58::decode(text)
        .into_vec()
        .map_err(|e| format!("base58 decode failed: {e}"))?;

    <[u8; 32]>::try_from(bytes.as_slice())
        .map_err(|_| format!("invalid size: expected 32 bytes, got {}", bytes.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_from_public_key() {
        let seed: [u8; 32] = bs58::decode("A7psj2GW7ZMdY4E5hJq14KMeYg7HFjULSsWSrTXZLvYr")
            .into_vec()
            .unwrap()
            .try_into()
            .unwrap();
        let key = ed25519_dalek::SigningKey::from_bytes(&seed);
        let address = Address::from_public_key(&key.verifying_key());
        assert_eq!(
            address.to_string(),
            "7v91N7iZ9mNicL8WfG6cgSCKyRXydQjLh6UYBWwm6y1Q"
        );
    }

    #[test]
    fn address_text_roundtrip() {
        let text = "EN2sCsJ1WDV8UFqsiTXHcUPUxQ4juE71eCknHYYMifkd";
        let address: Address = text.parse().unwrap();
        assert_eq!(address.to_string(), text);
    }

    #[test]
    fn byte_roundtrip_through_base58() {
        for fill in [0x00u8, 0x01, 0x7f, 0xff] {
            let address = Address::new([fill; 32]);
            let parsed: Address = address.to_string().parse().unwrap();
            assert_eq!(parsed, address);
        }
    }

    #[test]
    fn system_program_is_all_ones() {
        assert_eq!(
            Address::default().to_string(),
            "11111111111111111111111111111111"
        );
    }

    #[test]
    fn is_valid_accepts_32_byte_addresses() {
        assert!(Address::is_valid("2gVkYWexTHR5Hb2aLeQN3tnngvWzisFKXDUPrgMHpdST"));
        assert!(Address::is_valid("Stake11111111111111111111111111111111111111"));
    }

    #[test]
    fn is_valid_rejects_wrong_length_and_alphabet() {
        // 33 bytes once decoded.
        assert!(!Address::is_valid(
            "2gVkYWexTHR5Hb2aLeQN3tnngvWzisFKXDUPrgMHpdSTz"
        ));
        // '0', 'O', 'I' and 'l' are not in the alphabet.
        assert!(!Address::is_valid("0gVkYWexTHR5Hb2aLeQN3tnngvWzisFKXDUPrgMHpdST"));
        assert!(!Address::is_valid(""));
    }

    #[test]
    fn parse_reports_invalid_address() {
        let err = "not-base58!".parse::<Address>().unwrap_err();
        assert!(matches!(err, SolError::InvalidAddress(_)));
    }

    #[test]
    fn try_from_slice_rejects_invalid_size() {
        let err = Address::try_from([1u8; 31].as_slice()).unwrap_err();
        assert!(err.to_string().contains("invalid size"));
        assert!(Address::try_from([1u8; 32].as_slice()).is_ok());
    }

    #[test]
    fn equality_is_bytewise() {
        let a = Address::new([9u8; 32]);
        let b: Address = a.to_string().parse().unwrap();
        assert_eq!(a, b);
        assert_ne!(a, Address::new([8u8; 32]));
    }

    #[test]
    fn hash_roundtrip() {
        let text = "GgBaCs3NCBuZN12kCJgAW63ydqohFkHEdfdEXBPzLHq";
        let hash: Hash = text.parse().unwrap();
        assert_eq!(hash.to_string(), text);
        assert_eq!(Hash::default().to_string(), "11111111111111111111111111111111");
    }

    #[test]
    fn hash_parse_reports_invalid_hash() {
        let err = "abc".parse::<Hash>().unwrap_err();
        assert!(matches!(err, SolError::InvalidHash(_)));
    }

    #[test]
    fn debug_shows_base58() {
        let address = Address::default();
        assert_eq!(
            format!("{address:?}"),
            "Address(11111111111111111111111111111111)"
        );
    }
}
