//! Derived addresses: program-derived addresses (PDAs), seeded addresses and
//! associated token accounts.
//!
//! A PDA is `SHA-256(seed_0 || ... || seed_n || program_id || "ProgramDerivedAddress")`
//! [`create_program_address`] returns that hash unchecked. A usable PDA must not
//! be a valid Ed25519 point, so no private key can exist for it:
//! [`find_program_address`] searches bump seeds from 255 down to 0 until the
//! result falls off the curve.

use curve25519_dalek::edwards::CompressedEdwardsY;
use sha2::{Digest, Sha256};

use crate::address::{Address, Hash};
use crate::error::SolError;
use crate::programs::token::TokenProgram;
use crate::programs::ASSOCIATED_TOKEN_ID;

/// Longest single seed accepted by the runtime.
pub const MAX_SEED_LEN: usize = 32;

/// Most seeds accepted by the runtime, bump included.
pub const MAX_SEEDS: usize = 16;

/// The string appended to PDA derivation: "ProgramDerivedAddress".
const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// Derive a program address from `seeds`.
///
/// The hash is returned as is, on the curve or not. Fails only if a seed is
/// longer than [`MAX_SEED_LEN`] or there are more than [`MAX_SEEDS`] seeds.
pub fn create_program_address(seeds: &[&[u8]], program_id: &Address) -> Result<Address, SolError> {
    check_seeds(seeds, MAX_SEEDS)?;
    Ok(Address::new(hash_program_address(seeds, &[], program_id)))
}

/// Find the first off-curve program address for `seeds`, trying bump seeds
/// from 255 down to 0.
///
/// Returns the address and the bump that produced it. Running out of bumps
/// is reported as [`SolError::ProgramAddressExhausted`].
pub fn find_program_address(
    seeds: &[&[u8]],
    program_id: &Address,
) -> Result<(Address, u8), SolError> {
    // The bump takes one seed slot.
    check_seeds(seeds, MAX_SEEDS - 1)?;

    for bump in (0u8..=255).rev() {
        let hash = hash_program_address(seeds, &[bump], program_id);
        if !is_on_curve(&hash) {
            return Ok((Address::new(hash), bump));
        }
    }

    Err(SolError::ProgramAddressExhausted)
}

/// Check if 32 bytes represent a valid Ed25519 curve point.
///
/// Uses `curve25519-dalek` to attempt decompression. If it succeeds, the
/// point is on the curve.
pub fn is_on_curve(bytes: &[u8; 32]) -> bool {
    CompressedEdwardsY(*bytes).decompress().is_some()
}

fn hash_program_address(seeds: &[&[u8]], bump: &[u8], program_id: &Address) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for seed in seeds {
        hasher.update(seed);
    }
    hasher.update(bump);
    hasher.update(program_id.as_bytes());
    hasher.update(PDA_MARKER);
    hasher.finalize().into()
}

fn check_seeds(seeds: &[&[u8]], max_seeds: usize) -> Result<(), SolError> {
    if seeds.len() > max_seeds {
        return Err(SolError::InvalidParams(format!(
            "{} seeds given, at most {max_seeds} allowed",
            seeds.len()
        )));
    }
    if let Some(seed) = seeds.iter().find(|s| s.len() > MAX_SEED_LEN) {
        return Err(SolError::InvalidParams(format!(
            "seed of {} bytes exceeds the {MAX_SEED_LEN}-byte limit",
            seed.len()
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Seeded addresses
// ---------------------------------------------------------------------------

/// `SHA-256(base || seed || owner)`, the address `CreateAccountWithSeed`
/// creates.
pub fn create_with_seed(base: &Address, seed: &[u8], owner: &Address) -> Result<Address, SolError> {
    if seed.len() > MAX_SEED_LEN {
        return Err(SolError::InvalidParams(format!(
            "seed of {} bytes exceeds the {MAX_SEED_LEN}-byte limit",
            seed.len()
        )));
    }
    if owner.as_bytes().ends_with(PDA_MARKER) {
        return Err(SolError::InvalidParams(
            "owner id ends with the program-derived address marker".into(),
        ));
    }
    Ok(hash_with_seed(base, seed, owner))
}

/// Text seed as stored on chain: the UTF-8 bytes zero-padded or truncated to
/// exactly 32 bytes.
pub fn seed_from_text(text: &str) -> [u8; 32] {
    let mut seed = [0u8; 32];
    let bytes = text.as_bytes();
    let len = bytes.len().min(seed.len());
    seed[..len].copy_from_slice(&bytes[..len]);
    seed
}

/// Stake account address seeded with a validator's vote address text.
pub fn address_from_validator_seed(
    owner: &Address,
    validator: &Address,
    program_id: &Address,
) -> Address {
    hash_with_seed(owner, &seed_from_text(&validator.to_string()), program_id)
}

/// Stake account address seeded with a recent blockhash's text.
pub fn address_from_recent_blockhash(
    owner: &Address,
    blockhash: &Hash,
    program_id: &Address,
) -> Address {
    hash_with_seed(owner, &seed_from_text(&blockhash.to_string()), program_id)
}

fn hash_with_seed(base: &Address, seed: &[u8], owner: &Address) -> Address {
    let mut hasher = Sha256::new();
    hasher.update(base.as_bytes());
    hasher.update(seed);
    hasher.update(owner.as_bytes());
    Address::new(hasher.finalize().into())
}

// ---------------------------------------------------------------------------
// Associated token accounts
// ---------------------------------------------------------------------------

/// Derive the associated token account address for a wallet + mint pair.
///
/// The ATA is a PDA with seeds `[wallet, token_program_id, mint]` under the
/// Associated Token Account program.
pub fn find_associated_token_address(
    wallet: &Address,
    mint: &Address,
    program: TokenProgram,
) -> Result<Address, SolError> {
    let token_program = program.id();
    find_program_address(
        &[wallet.as_bytes(), token_program.as_bytes(), mint.as_bytes()],
        &ASSOCIATED_TOKEN_ID,
    )
    .map(|(address, _bump)| address)
}
