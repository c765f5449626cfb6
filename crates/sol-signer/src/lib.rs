pub mod builder;
pub mod encoded_tx;
pub mod error;
pub mod signing;
pub mod types;

use error::{FieldContext, SignerError};
use sol_tx::{Address, Keypair, Signature};
use types::{PreSigningOutput, SecretBytes, SigningInput, SigningOutput};

// ─── Request flows ───────────────────────────────────────────────────

/// Build and fully sign the transaction described by `input`
pub fn sign(input: &SigningInput) -> Result<SigningOutput, SignerError> {
    signing::sign(input)
}

/// Sign a JSON request with `private_key`, returning the encoded transaction.
///
/// A key inside the JSON is replaced by `private_key` when the latter is
/// non-empty.
pub fn sign_json(json: &str, private_key: &[u8]) -> Result<String, SignerError> {
    let mut input: SigningInput = serde_json::from_str(json)?;
    if !private_key.is_empty() {
        input.private_key = SecretBytes::from(private_key);
    }
    Ok(signing::sign(&input)?.encoded)
}

/// Message bytes to sign and the signer addresses, in slot order
pub fn preimage_hashes(input: &SigningInput) -> Result<PreSigningOutput, SignerError> {
    signing::preimage_hashes(input)
}

/// Assemble the transaction with signatures produced by an external signer
pub fn compile_with_signatures(
    input: &SigningInput,
    signatures: &[Signature],
    public_keys: &[Address],
) -> Result<SigningOutput, SignerError> {
    signing::compile_with_signatures(input, signatures, public_keys)
}

// ─── Encoded transaction edits ───────────────────────────────────────
// All of these take and return Base64 transactions.

/// Re-anchor to a new blockhash and sign with the given secret keys
pub fn update_blockhash_and_sign(
    encoded_tx: &str,
    recent_blockhash: &str,
    private_keys: &[SecretBytes],
) -> Result<SigningOutput, SignerError> {
    let keys = private_keys
        .iter()
        .filter(|key| !key.is_empty())
        .map(|key| Keypair::from_bytes(key.as_bytes()).field("privateKeys"))
        .collect::<Result<Vec<_>, _>>()?;
    encoded_tx::update_blockhash_and_sign(encoded_tx, recent_blockhash, &keys)
}

/// Compute-unit price in micro-lamports, if the transaction sets one
pub fn get_compute_unit_price(encoded_tx: &str) -> Result<Option<u64>, SignerError> {
    encoded_tx::get_compute_unit_price(encoded_tx)
}

/// Compute-unit limit, if the transaction sets one
pub fn get_compute_unit_limit(encoded_tx: &str) -> Result<Option<u32>, SignerError> {
    encoded_tx::get_compute_unit_limit(encoded_tx)
}

/// Set or replace the compute-unit price
pub fn set_compute_unit_price(
    encoded_tx: &str,
    micro_lamports: u64,
) -> Result<String, SignerError> {
    encoded_tx::set_compute_unit_price(encoded_tx, micro_lamports)
}

/// Set or replace the compute-unit limit
pub fn set_compute_unit_limit(encoded_tx: &str, units: u32) -> Result<String, SignerError> {
    encoded_tx::set_compute_unit_limit(encoded_tx, units)
}

/// Put a new fee payer in front of the existing signers
pub fn set_fee_payer(encoded_tx: &str, fee_payer: &str) -> Result<String, SignerError> {
    encoded_tx::set_fee_payer(encoded_tx, fee_payer)
}

/// Insert a JSON instruction; `None` appends it
pub fn insert_instruction(
    encoded_tx: &str,
    insert_at: Option<usize>,
    instruction: &str,
) -> Result<String, SignerError> {
    encoded_tx::insert_instruction(encoded_tx, insert_at, instruction)
}
