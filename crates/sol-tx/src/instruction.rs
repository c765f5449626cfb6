//! Uncompiled instructions: a program id, the accounts it touches and opaque
//! data.

use crate::address::Address;

/// One account referenced by an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountMeta {
    pub pubkey: Address,
    pub is_signer: bool,
    pub is_writable: bool,
}

impl AccountMeta {
    /// A writable account.
    pub fn new(pubkey: Address, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: true,
        }
    }

    /// A read-only account.
    pub fn readonly(pubkey: Address, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: false,
        }
    }

    pub fn is_readonly(&self) -> bool {
        !self.is_writable
    }
}

/// A program invocation before account-index compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub program_id: Address,
    pub accounts: Vec<AccountMeta>,
    pub data: Vec<u8>,
}

impl Instruction {
    pub fn new(program_id: Address, accounts: Vec<AccountMeta>, data: Vec<u8>) -> Self {
        Self {
            program_id,
            accounts,
            data,
        }
    }

    /// Append read-only, non-signer reference accounts.
    ///
    /// References let indexers find a transaction by an address the program
    /// itself does not use (e.g. a payment reference).
    pub fn with_references(mut self, references: &[Address]) -> Self {
        self.accounts
            .extend(references.iter().map(|r| AccountMeta::readonly(*r, false)));
        self
    }
}
