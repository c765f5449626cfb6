//! Filling signature slots.
//!
//! Keys may be supplied in any order: each key's slot is found by looking up
//! its address in the message's account table. Signing is deterministic, so
//! signing twice with the same key writes the same bytes. A failure part way
//! through leaves the slots filled so far in place.

use log::debug;

use crate::address::{Address, Hash};
use crate::error::SolError;
use crate::keypair::{verify_signature, Keypair, Signature};
use crate::short_vec::write_len;
use crate::transaction::Transaction;

/// Sign `tx` with every key in `keys`.
pub fn sign(keys: &[Keypair], tx: &mut Transaction) -> Result<(), SolError> {
    let message = tx.message_data()?;

    for key in keys {
        let address = key.address();
        let slot = signer_slot(tx, &address)?;
        tx.signatures[slot] = key.sign(&message);
        debug!("filled signature slot {slot} for {address}");
    }
    Ok(())
}

/// Move `tx` to `blockhash`, dropping existing signatures, then sign it.
pub fn sign_update_blockhash(
    keys: &[Keypair],
    tx: &mut Transaction,
    blockhash: Hash,
) -> Result<(), SolError> {
    tx.set_recent_blockhash(blockhash);
    sign(keys, tx)
}

/// Sign an already-serialized message.
///
/// Signatures are emitted in the order of `keys`; the result is the
/// short-vec signature list followed by `raw_message` unchanged.
pub fn sign_raw_message(keys: &[Keypair], raw_message: &[u8]) -> Result<Vec<u8>, SolError> {
    let mut wire = Vec::with_capacity(1 + keys.len() * Signature::LEN + raw_message.len());
    write_len(&mut wire, keys.len())?;
    for key in keys {
        wire.extend_from_slice(key.sign(raw_message).as_bytes());
    }
    wire.extend_from_slice(raw_message);

    debug!("signed raw message of {} bytes with {} keys", raw_message.len(), keys.len());
    Ok(wire)
}

/// Place signatures produced elsewhere into their slots.
///
/// Each signature must verify against the message under its address.
pub fn add_external_signatures(
    tx: &mut Transaction,
    signatures: &[(Address, Signature)],
) -> Result<(), SolError> {
    let message = tx.message_data()?;

    for (address, signature) in signatures {
        let slot = signer_slot(tx, address)?;
        verify_signature(address, &message, signature)?;
        tx.signatures[slot] = *signature;
        debug!("added external signature for {address} in slot {slot}");
    }
    Ok(())
}

fn signer_slot(tx: &Transaction, address: &Address) -> Result<usize, SolError> {
    let index = tx.account_index(address)?;
    if index >= tx.signatures.len() {
        return Err(SolError::AccountNotFound(format!(
            "{address} is not a required signer of this message"
        )));
    }
    Ok(index)
}
