//! Operations on Base64 transactions built elsewhere.
//!
//! Edits change the message bytes, so the returned transaction always has
//! empty signature slots and must be signed again.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use log::debug;
use sol_tx::{signer, Address, Hash, Instruction, Keypair, Transaction, VersionedMessage};

use crate::error::{FieldContext, SignerError};
use crate::signing::signing_output;
use crate::types::{InstructionInput, SigningOutput, TxEncoding};

/// Move `encoded_tx` to `recent_blockhash` and sign it with `keys`.
///
/// With no keys the result is the re-anchored, unsigned transaction.
pub fn update_blockhash_and_sign(
    encoded_tx: &str,
    recent_blockhash: &str,
    keys: &[Keypair],
) -> Result<SigningOutput, SignerError> {
    let mut tx = decode(encoded_tx)?;
    let blockhash = recent_blockhash.parse::<Hash>().field("recentBlockhash")?;
    signer::sign_update_blockhash(keys, &mut tx, blockhash)?;
    signing_output(&tx, TxEncoding::Base64)
}

pub fn get_compute_unit_price(encoded_tx: &str) -> Result<Option<u64>, SignerError> {
    Ok(decode(encoded_tx)?.message().compute_unit_price())
}

pub fn get_compute_unit_limit(encoded_tx: &str) -> Result<Option<u32>, SignerError> {
    Ok(decode(encoded_tx)?.message().compute_unit_limit())
}

pub fn set_compute_unit_price(
    encoded_tx: &str,
    micro_lamports: u64,
) -> Result<String, SignerError> {
    edit(encoded_tx, |message| message.set_compute_unit_price(micro_lamports))
}

pub fn set_compute_unit_limit(encoded_tx: &str, units: u32) -> Result<String, SignerError> {
    edit(encoded_tx, |message| message.set_compute_unit_limit(units))
}

/// Make `fee_payer` the first signer of `encoded_tx`.
pub fn set_fee_payer(encoded_tx: &str, fee_payer: &str) -> Result<String, SignerError> {
    let fee_payer = fee_payer.parse::<Address>().field("feePayer")?;
    edit(encoded_tx, |message| message.set_fee_payer(fee_payer))
}

/// Insert a JSON instruction at `insert_at`, or append it when `None`.
pub fn insert_instruction(
    encoded_tx: &str,
    insert_at: Option<usize>,
    instruction: &str,
) -> Result<String, SignerError> {
    let input: InstructionInput = serde_json::from_str(instruction)?;
    let instruction = Instruction::try_from(&input)?;

    edit(encoded_tx, |message| {
        let at = insert_at.unwrap_or(message.instructions().len());
        message.insert_instruction(at, &instruction)
    })
}

fn decode(encoded_tx: &str) -> Result<Transaction, SignerError> {
    Transaction::from_base64(encoded_tx).field("encodedTx")
}

fn edit<F>(encoded_tx: &str, apply: F) -> Result<String, SignerError>
where
    F: FnOnce(&mut VersionedMessage) -> Result<(), sol_tx::SolError>,
{
    let mut message = decode(encoded_tx)?.into_message();
    apply(&mut message)?;

    let tx = Transaction::new(message);
    debug!(
        "edited transaction now has {} accounts and {} instructions",
        tx.message().account_keys().len(),
        tx.message().instructions().len()
    );
    Ok(BASE64.encode(tx.serialize()?))
}
