//! SPL Token and Associated Token Account instructions.
//!
//! Both the original Token program and Token-2022 share the instruction
//! layouts used here; only the program id differs.

use super::{ASSOCIATED_TOKEN_ID, SYSTEM_ID, SYSVAR_RENT_ID, TOKEN_2022_ID, TOKEN_ID};
use crate::address::Address;
use crate::instruction::{AccountMeta, Instruction};

const TRANSFER_CHECKED: u8 = 12;

/// Which token program owns a mint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TokenProgram {
    #[default]
    Token,
    Token2022,
}

impl TokenProgram {
    pub fn id(&self) -> Address {
        match self {
            TokenProgram::Token => TOKEN_ID,
            TokenProgram::Token2022 => TOKEN_2022_ID,
        }
    }
}

/// Create the associated token account `token_account` of `wallet` for `mint`.
///
/// `token_account` is expected to be the address returned by
/// [`crate::pda::find_associated_token_address`]; the program rejects any
/// other. The instruction carries no data.
pub fn create_associated_token_account(
    funding: &Address,
    wallet: &Address,
    mint: &Address,
    token_account: &Address,
    program: TokenProgram,
) -> Instruction {
    Instruction::new(
        ASSOCIATED_TOKEN_ID,
        vec![
            AccountMeta::new(*funding, true),
            AccountMeta::new(*token_account, false),
            AccountMeta::readonly(*wallet, false),
            AccountMeta::readonly(*mint, false),
            AccountMeta::readonly(SYSTEM_ID, false),
            AccountMeta::readonly(program.id(), false),
            AccountMeta::readonly(SYSVAR_RENT_ID, false),
        ],
        Vec::new(),
    )
}

/// Build a `TransferChecked` instruction.
///
/// # Wire format
///
/// `[12]` followed by the u64 LE amount in base units and the mint's
/// decimals as a single byte. Total data: 10 bytes.
pub fn transfer_checked(
    source: &Address,
    mint: &Address,
    destination: &Address,
    owner: &Address,
    amount: u64,
    decimals: u8,
    program: TokenProgram,
) -> Instruction {
    let mut data = Vec::with_capacity(10);
    data.push(TRANSFER_CHECKED);
    data.extend_from_slice(&amount.to_le_bytes());
    data.push(decimals);

    Instruction::new(
        program.id(),
        vec![
            AccountMeta::new(*source, false),
            AccountMeta::readonly(*mint, false),
            AccountMeta::new(*destination, false),
            AccountMeta::readonly(*owner, true),
        ],
        data,
    )
}
