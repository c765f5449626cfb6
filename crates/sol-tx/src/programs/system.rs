//! System program instructions: transfers, account creation and durable
//! nonce management.

use super::{SYSTEM_ID, SYSVAR_RECENT_BLOCKHASHES_ID, SYSVAR_RENT_ID};
use crate::address::Address;
use crate::instruction::{AccountMeta, Instruction};

/// Size of a nonce account's state.
pub const NONCE_ACCOUNT_SPACE: u64 = 80;

const CREATE_ACCOUNT: u32 = 0;
const TRANSFER: u32 = 2;
const CREATE_ACCOUNT_WITH_SEED: u32 = 3;
const ADVANCE_NONCE_ACCOUNT: u32 = 4;
const WITHDRAW_NONCE_ACCOUNT: u32 = 5;
const INITIALIZE_NONCE_ACCOUNT: u32 = 6;

pub fn create_account(
    from: &Address,
    new_account: &Address,
    lamports: u64,
    space: u64,
    owner: &Address,
) -> Instruction {
    let mut data = Vec::with_capacity(52);
    data.extend_from_slice(&CREATE_ACCOUNT.to_le_bytes());
    data.extend_from_slice(&lamports.to_le_bytes());
    data.extend_from_slice(&space.to_le_bytes());
    data.extend_from_slice(owner.as_bytes());

    Instruction::new(
        SYSTEM_ID,
        vec![
            AccountMeta::new(*from, true),
            AccountMeta::new(*new_account, true),
        ],
        data,
    )
}

/// Transfer `lamports` from `from` to `to`.
///
/// Wire data: `[2, 0, 0, 0]` followed by the u64 LE amount.
pub fn transfer(from: &Address, to: &Address, lamports: u64) -> Instruction {
    let mut data = Vec::with_capacity(12);
    data.extend_from_slice(&TRANSFER.to_le_bytes());
    data.extend_from_slice(&lamports.to_le_bytes());

    Instruction::new(
        SYSTEM_ID,
        vec![AccountMeta::new(*from, true), AccountMeta::new(*to, false)],
        data,
    )
}

/// Create `to`, an address derived from `base` and `seed`, funded by `from`.
///
/// The seed is written as a u64 LE length followed by its bytes.
pub fn create_account_with_seed(
    from: &Address,
    to: &Address,
    base: &Address,
    seed: &[u8],
    lamports: u64,
    space: u64,
    owner: &Address,
) -> Instruction {
    let mut data = Vec::with_capacity(4 + 32 + 8 + seed.len() + 8 + 8 + 32);
    data.extend_from_slice(&CREATE_ACCOUNT_WITH_SEED.to_le_bytes());
    data.extend_from_slice(base.as_bytes());
    data.extend_from_slice(&(seed.len() as u64).to_le_bytes());
    data.extend_from_slice(seed);
    data.extend_from_slice(&lamports.to_le_bytes());
    data.extend_from_slice(&space.to_le_bytes());
    data.extend_from_slice(owner.as_bytes());

    Instruction::new(
        SYSTEM_ID,
        vec![
            AccountMeta::new(*from, true),
            AccountMeta::new(*to, false),
            AccountMeta::readonly(*base, true),
        ],
        data,
    )
}

// ---------------------------------------------------------------------------
// Durable nonces
// ---------------------------------------------------------------------------

pub fn advance_nonce_account(nonce: &Address, authority: &Address) -> Instruction {
    Instruction::new(
        SYSTEM_ID,
        vec![
            AccountMeta::new(*nonce, false),
            AccountMeta::readonly(SYSVAR_RECENT_BLOCKHASHES_ID, false),
            AccountMeta::readonly(*authority, true),
        ],
        ADVANCE_NONCE_ACCOUNT.to_le_bytes().to_vec(),
    )
}

/// Whether `data` is an `AdvanceNonceAccount` instruction body.
pub fn is_advance_nonce_account(data: &[u8]) -> bool {
    data == ADVANCE_NONCE_ACCOUNT.to_le_bytes().as_slice()
}

pub fn initialize_nonce_account(nonce: &Address, authority: &Address) -> Instruction {
    let mut data = Vec::with_capacity(36);
    data.extend_from_slice(&INITIALIZE_NONCE_ACCOUNT.to_le_bytes());
    data.extend_from_slice(authority.as_bytes());

    Instruction::new(
        SYSTEM_ID,
        vec![
            AccountMeta::new(*nonce, false),
            AccountMeta::readonly(SYSVAR_RECENT_BLOCKHASHES_ID, false),
            AccountMeta::readonly(SYSVAR_RENT_ID, false),
        ],
        data,
    )
}

pub fn withdraw_nonce_account(
    nonce: &Address,
    authority: &Address,
    to: &Address,
    lamports: u64,
) -> Instruction {
    let mut data = Vec::with_capacity(12);
    data.extend_from_slice(&WITHDRAW_NONCE_ACCOUNT.to_le_bytes());
    data.extend_from_slice(&lamports.to_le_bytes());

    Instruction::new(
        SYSTEM_ID,
        vec![
            AccountMeta::new(*nonce, false),
            AccountMeta::new(*to, false),
            AccountMeta::readonly(SYSVAR_RECENT_BLOCKHASHES_ID, false),
            AccountMeta::readonly(SYSVAR_RENT_ID, false),
            AccountMeta::readonly(*authority, true),
        ],
        data,
    )
}

/// Allocate a nonce account owned by the System program and initialize it
/// under `authority`. Both `from` and `nonce` must sign.
pub fn create_nonce_account(
    from: &Address,
    nonce: &Address,
    authority: &Address,
    lamports: u64,
) -> Vec<Instruction> {
    vec![
        create_account(from, nonce, lamports, NONCE_ACCOUNT_SPACE, &SYSTEM_ID),
        initialize_nonce_account(nonce, authority),
    ]
}
