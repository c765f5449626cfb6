//! In-place edits of compiled messages.
//!
//! Used to adjust a transaction that was built elsewhere (a dApp, a wallet
//! adapter) without recompiling it from instructions. The account table keeps
//! its four regions in order:
//!
//! ```text
//! | writable signers | read-only signers | writable non-signers | read-only non-signers |
//! ```
//!
//! A new account is inserted at the end of its region and every index at or
//! past the insertion point is shifted. Existing signatures cover the old
//! bytes; callers rebuild the transaction with fresh slots after editing.
//!
//! Compute-budget edits replace the data of an existing instruction when the
//! message has one. A new unit limit goes first (after an advance-nonce
//! instruction, which must stay first); a new unit price goes last.

use log::debug;

use crate::address::Address;
use crate::error::SolError;
use crate::instruction::{AccountMeta, Instruction};
use crate::message::{shift_indices, CompiledInstruction, VersionedMessage};
use crate::programs::compute_budget::ComputeBudgetInstruction;
use crate::programs::{system, COMPUTE_BUDGET_ID, SYSTEM_ID};

impl VersionedMessage {
    /// Find `meta` in the account table or insert it into its region.
    ///
    /// An address already present must carry the same signer and writable
    /// flags it has in the message.
    pub fn push_account(&mut self, meta: &AccountMeta) -> Result<u8, SolError> {
        if let Some(index) = self.account_keys().iter().position(|k| *k == meta.pubkey) {
            let is_signer = index < self.header().num_required_signatures as usize;
            if meta.is_signer != is_signer || meta.is_writable != self.is_writable(index) {
                return Err(SolError::InvalidParams(format!(
                    "{} is already in the message with different signer or writable flags",
                    meta.pubkey
                )));
            }
            return to_index(index);
        }

        let (header, keys, instructions) = self.parts_mut();
        let signers = header.num_required_signatures as usize;
        let readonly_signed = header.num_readonly_signed_accounts as usize;
        let readonly_unsigned = header.num_readonly_unsigned_accounts as usize;

        let at = match (meta.is_signer, meta.is_writable) {
            (true, true) => signers - readonly_signed,
            (true, false) => signers,
            (false, true) => keys.len() - readonly_unsigned,
            (false, false) => keys.len(),
        };
        let index = to_index(at)?;

        let overflow = || SolError::TransactionTooLarge("too many accounts in one region".into());
        if meta.is_signer {
            header.num_required_signatures =
                header.num_required_signatures.checked_add(1).ok_or_else(overflow)?;
            if !meta.is_writable {
                header.num_readonly_signed_accounts = header
                    .num_readonly_signed_accounts
                    .checked_add(1)
                    .ok_or_else(overflow)?;
            }
        } else if !meta.is_writable {
            header.num_readonly_unsigned_accounts = header
                .num_readonly_unsigned_accounts
                .checked_add(1)
                .ok_or_else(overflow)?;
        }

        shift_indices(instructions, index)?;
        keys.insert(at, meta.pubkey);
        debug!("inserted account {} at index {at}", meta.pubkey);
        Ok(index)
    }

    /// Compile `instruction` against this message's account table and insert
    /// it at position `at`, adding any accounts it needs.
    pub fn insert_instruction(
        &mut self,
        at: usize,
        instruction: &Instruction,
    ) -> Result<(), SolError> {
        let count = self.instructions().len();
        if at > count {
            return Err(SolError::InvalidParams(format!(
                "cannot insert an instruction at {at}, the message has {count}"
            )));
        }

        let accounts = instruction
            .accounts
            .iter()
            .map(|meta| self.push_account(meta))
            .collect::<Result<Vec<u8>, _>>()?;
        let program_id_index = self.push_readonly_unsigned(instruction.program_id)?;

        self.instructions_mut().insert(
            at,
            CompiledInstruction {
                program_id_index,
                accounts,
                data: instruction.data.clone(),
            },
        );
        Ok(())
    }

    /// Make `fee_payer` the first account and an additional required signer.
    ///
    /// The address must not already take part in the message: a fee payer
    /// that is also touched by an instruction would sign off on that
    /// instruction too.
    pub fn set_fee_payer(&mut self, fee_payer: Address) -> Result<(), SolError> {
        if self.account_keys().contains(&fee_payer) {
            return Err(SolError::InvalidParams(format!(
                "fee payer {fee_payer} is already in the account list"
            )));
        }

        let (header, keys, instructions) = self.parts_mut();
        header.num_required_signatures = header
            .num_required_signatures
            .checked_add(1)
            .ok_or_else(|| SolError::TransactionTooLarge("more than 255 signers".into()))?;
        shift_indices(instructions, 0)?;
        keys.insert(0, fee_payer);

        debug!("set fee payer {fee_payer}");
        Ok(())
    }

    pub fn compute_unit_price(&self) -> Option<u64> {
        self.find_compute_budget(unit_price).map(|(_, price)| price)
    }

    pub fn compute_unit_limit(&self) -> Option<u32> {
        self.find_compute_budget(unit_limit).map(|(_, limit)| limit)
    }

    pub fn set_compute_unit_price(&mut self, micro_lamports: u64) -> Result<(), SolError> {
        let data = ComputeBudgetInstruction::SetComputeUnitPrice(micro_lamports).data();
        if let Some((position, _)) = self.find_compute_budget(unit_price) {
            self.instructions_mut()[position].data = data;
            return Ok(());
        }

        let program_id_index = self.push_readonly_unsigned(COMPUTE_BUDGET_ID)?;
        self.instructions_mut().push(CompiledInstruction {
            program_id_index,
            accounts: Vec::new(),
            data,
        });
        debug!("appended compute unit price {micro_lamports}");
        Ok(())
    }

    pub fn set_compute_unit_limit(&mut self, units: u32) -> Result<(), SolError> {
        let data = ComputeBudgetInstruction::SetComputeUnitLimit(units).data();
        if let Some((position, _)) = self.find_compute_budget(unit_limit) {
            self.instructions_mut()[position].data = data;
            return Ok(());
        }

        let at = usize::from(self.starts_with_advance_nonce());
        let program_id_index = self.push_readonly_unsigned(COMPUTE_BUDGET_ID)?;
        self.instructions_mut().insert(
            at,
            CompiledInstruction {
                program_id_index,
                accounts: Vec::new(),
                data,
            },
        );
        debug!("inserted compute unit limit {units} at {at}");
        Ok(())
    }

    fn find_compute_budget<T>(
        &self,
        pick: fn(ComputeBudgetInstruction) -> Option<T>,
    ) -> Option<(usize, T)> {
        let keys = self.account_keys();
        self.instructions()
            .iter()
            .enumerate()
            .find_map(|(position, ix)| {
                if keys.get(ix.program_id_index as usize) != Some(&COMPUTE_BUDGET_ID) {
                    return None;
                }
                ComputeBudgetInstruction::parse(&ix.data)
                    .and_then(pick)
                    .map(|value| (position, value))
            })
    }

    fn starts_with_advance_nonce(&self) -> bool {
        self.instructions().first().is_some_and(|first| {
            self.account_keys().get(first.program_id_index as usize) == Some(&SYSTEM_ID)
                && system::is_advance_nonce_account(&first.data)
        })
    }
}

fn unit_price(ix: ComputeBudgetInstruction) -> Option<u64> {
    match ix {
        ComputeBudgetInstruction::SetComputeUnitPrice(price) => Some(price),
        _ => None,
    }
}

fn unit_limit(ix: ComputeBudgetInstruction) -> Option<u32> {
    match ix {
        ComputeBudgetInstruction::SetComputeUnitLimit(units) => Some(units),
        _ => None,
    }
}

fn to_index(index: usize) -> Result<u8, SolError> {
    u8::try_from(index)
        .map_err(|_| SolError::TransactionTooLarge(format!("account index {index} exceeds 255")))
}
