//! Stake program instructions and the deposit (create + delegate) flow.

use super::{STAKE_CONFIG_ID, STAKE_ID, SYSVAR_CLOCK_ID, SYSVAR_RENT_ID, SYSVAR_STAKE_HISTORY_ID};
use crate::address::{Address, Hash};
use crate::instruction::{AccountMeta, Instruction};
use crate::pda;
use crate::programs::system;

/// Size of a stake account's state.
pub const STAKE_ACCOUNT_SPACE: u64 = 200;

const INITIALIZE: u32 = 0;
const DELEGATE_STAKE: u32 = 2;
const WITHDRAW: u32 = 4;
const DEACTIVATE: u32 = 5;

/// Lockup applied at initialization. The default is no lockup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lockup {
    pub unix_timestamp: i64,
    pub epoch: u64,
    pub custodian: Address,
}

pub fn initialize(
    stake: &Address,
    staker: &Address,
    withdrawer: &Address,
    lockup: &Lockup,
) -> Instruction {
    let mut data = Vec::with_capacity(116);
    data.extend_from_slice(&INITIALIZE.to_le_bytes());
    data.extend_from_slice(staker.as_bytes());
    data.extend_from_slice(withdrawer.as_bytes());
    data.extend_from_slice(&lockup.unix_timestamp.to_le_bytes());
    data.extend_from_slice(&lockup.epoch.to_le_bytes());
    data.extend_from_slice(lockup.custodian.as_bytes());

    Instruction::new(
        STAKE_ID,
        vec![
            AccountMeta::new(*stake, false),
            AccountMeta::readonly(SYSVAR_RENT_ID, false),
        ],
        data,
    )
}

pub fn delegate_stake(stake: &Address, authority: &Address, vote: &Address) -> Instruction {
    Instruction::new(
        STAKE_ID,
        vec![
            AccountMeta::new(*stake, false),
            AccountMeta::readonly(*vote, false),
            AccountMeta::readonly(SYSVAR_CLOCK_ID, false),
            AccountMeta::readonly(SYSVAR_STAKE_HISTORY_ID, false),
            AccountMeta::readonly(STAKE_CONFIG_ID, false),
            AccountMeta::readonly(*authority, true),
        ],
        DELEGATE_STAKE.to_le_bytes().to_vec(),
    )
}

pub fn deactivate(stake: &Address, authority: &Address) -> Instruction {
    Instruction::new(
        STAKE_ID,
        vec![
            AccountMeta::new(*stake, false),
            AccountMeta::readonly(SYSVAR_CLOCK_ID, false),
            AccountMeta::readonly(*authority, true),
        ],
        DEACTIVATE.to_le_bytes().to_vec(),
    )
}

/// Withdraw `lamports` from a stake account to `recipient`.
///
/// A custodian must co-sign when the account is still under lockup.
pub fn withdraw(
    stake: &Address,
    withdrawer: &Address,
    recipient: &Address,
    lamports: u64,
    custodian: Option<&Address>,
) -> Instruction {
    let mut data = Vec::with_capacity(12);
    data.extend_from_slice(&WITHDRAW.to_le_bytes());
    data.extend_from_slice(&lamports.to_le_bytes());

    let mut accounts = vec![
        AccountMeta::new(*stake, false),
        AccountMeta::new(*recipient, false),
        AccountMeta::readonly(SYSVAR_CLOCK_ID, false),
        AccountMeta::readonly(SYSVAR_STAKE_HISTORY_ID, false),
        AccountMeta::readonly(*withdrawer, true),
    ];
    if let Some(custodian) = custodian {
        accounts.push(AccountMeta::readonly(*custodian, true));
    }

    Instruction::new(STAKE_ID, accounts, data)
}

/// Fund a new stake account from `sender` and delegate it to `vote`.
///
/// The stake account is created with a seed derived from the recent
/// blockhash; when `stake_account` is `None` the matching derived address is
/// used. The sender becomes both staker and withdrawer with no lockup.
pub fn deposit_stake(
    sender: &Address,
    vote: &Address,
    lamports: u64,
    recent_blockhash: &Hash,
    stake_account: Option<&Address>,
) -> Vec<Instruction> {
    let stake = match stake_account {
        Some(address) => *address,
        None => pda::address_from_recent_blockhash(sender, recent_blockhash, &STAKE_ID),
    };
    let seed = pda::seed_from_text(&recent_blockhash.to_string());

    vec![
        system::create_account_with_seed(
            sender,
            &stake,
            sender,
            &seed,
            lamports,
            STAKE_ACCOUNT_SPACE,
            &STAKE_ID,
        ),
        initialize(&stake, sender, sender, &Lockup::default()),
        delegate_stake(&stake, sender, vote),
    ]
}
