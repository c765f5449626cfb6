//! Account deduplication and index compilation.
//!
//! Every account referenced by a list of instructions is merged into one
//! ordered table: signers first, then writable non-signers, then read-only
//! non-signers. Program ids are appended last as read-only. Each instruction
//! is then rewritten to refer to accounts by their position in that table.

use log::debug;

use crate::address::Address;
use crate::error::SolError;
use crate::instruction::Instruction;
use crate::message::{CompiledInstruction, MessageHeader};

/// Largest account table whose indices fit in a byte.
pub const MAX_ACCOUNTS: usize = 256;

/// Header and account table produced by [`compile_keys`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledKeys {
    pub header: MessageHeader,
    pub account_keys: Vec<Address>,
}

#[derive(Default)]
struct Buckets {
    signed: Vec<Address>,
    writable: Vec<Address>,
    readonly: Vec<Address>,
}

impl Buckets {
    /// Place `address` in the highest bucket it qualifies for. Signer beats
    /// writable beats read-only; a promoted address leaves the lower bucket.
    fn add(&mut self, address: Address, is_signer: bool, is_writable: bool) {
        if is_signer {
            if !self.signed.contains(&address) {
                self.signed.push(address);
            }
            self.writable.retain(|a| *a != address);
            self.readonly.retain(|a| *a != address);
        } else if is_writable {
            if !self.signed.contains(&address) && !self.writable.contains(&address) {
                self.writable.push(address);
            }
            self.readonly.retain(|a| *a != address);
        } else if !self.signed.contains(&address)
            && !self.writable.contains(&address)
            && !self.readonly.contains(&address)
        {
            self.readonly.push(address);
        }
    }
}

/// Build the header and deduplicated account table for `instructions`.
///
/// When given, `fee_payer` is placed first as a writable signer.
pub fn compile_keys(
    instructions: &[Instruction],
    fee_payer: Option<&Address>,
) -> Result<CompiledKeys, SolError> {
    let mut buckets = Buckets::default();

    if let Some(payer) = fee_payer {
        buckets.add(*payer, true, true);
    }
    for meta in instructions.iter().flat_map(|ix| ix.accounts.iter()) {
        buckets.add(meta.pubkey, meta.is_signer, meta.is_writable);
    }
    for ix in instructions {
        buckets.add(ix.program_id, false, false);
    }

    let total = buckets.signed.len() + buckets.writable.len() + buckets.readonly.len();
    if total > MAX_ACCOUNTS {
        return Err(SolError::TransactionTooLarge(format!(
            "{total} accounts referenced, at most {MAX_ACCOUNTS} fit in a message"
        )));
    }

    let num_required_signatures = u8::try_from(buckets.signed.len())
        .map_err(|_| SolError::TransactionTooLarge("more than 255 signers".into()))?;
    let num_readonly_unsigned_accounts = u8::try_from(buckets.readonly.len())
        .map_err(|_| SolError::TransactionTooLarge("more than 255 read-only accounts".into()))?;

    let header = MessageHeader {
        num_required_signatures,
        num_readonly_signed_accounts: 0,
        num_readonly_unsigned_accounts,
    };

    let mut account_keys = buckets.signed;
    account_keys.extend(buckets.writable);
    account_keys.extend(buckets.readonly);

    debug!(
        "compiled {} instructions: {} accounts, {} required signatures",
        instructions.len(),
        account_keys.len(),
        header.num_required_signatures
    );

    Ok(CompiledKeys {
        header,
        account_keys,
    })
}

/// Rewrite `instructions` against `account_keys`.
///
/// Every program id and account must already be in the table.
pub fn compile_instructions(
    instructions: &[Instruction],
    account_keys: &[Address],
) -> Result<Vec<CompiledInstruction>, SolError> {
    instructions
        .iter()
        .map(|ix| {
            let accounts = ix
                .accounts
                .iter()
                .map(|meta| key_index(account_keys, &meta.pubkey))
                .collect::<Result<Vec<u8>, _>>()?;

            Ok(CompiledInstruction {
                program_id_index: key_index(account_keys, &ix.program_id)?,
                accounts,
                data: ix.data.clone(),
            })
        })
        .collect()
}

fn key_index(account_keys: &[Address], address: &Address) -> Result<u8, SolError> {
    let index = account_keys
        .iter()
        .position(|k| k == address)
        .ok_or_else(|| SolError::AccountNotFound(address.to_string()))?;
    u8::try_from(index)
        .map_err(|_| SolError::TransactionTooLarge(format!("account index {index} exceeds 255")))
}
