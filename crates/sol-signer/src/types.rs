use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use sol_tx::{AccountMeta, Address, Instruction, TokenProgram};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{FieldContext, SignerError};

/// Private key material. Wiped on drop; never printed.
///
/// In JSON requests a key is a hex string; an empty string means "not set".
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretBytes(Vec<u8>);

impl SecretBytes {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for SecretBytes {
    fn from(bytes: Vec<u8>) -> Self {
        SecretBytes(bytes)
    }
}

impl From<&[u8]> for SecretBytes {
    fn from(bytes: &[u8]) -> Self {
        SecretBytes(bytes.to_vec())
    }
}

impl fmt::Debug for SecretBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("SecretBytes(empty)")
        } else {
            f.write_str("SecretBytes(<redacted>)")
        }
    }
}

impl<'de> Deserialize<'de> for SecretBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut text = String::deserialize(deserializer)?;
        let decoded = hex::decode(text.trim_start_matches("0x")).map_err(serde::de::Error::custom);
        text.zeroize();
        decoded.map(SecretBytes)
    }
}

// ─── Request ─────────────────────────────────────────────────────────

/// Everything needed to build and sign one Solana transaction.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SigningInput {
    /// 32-byte ed25519 seed of the signer. Empty when only `sender` is known.
    pub private_key: SecretBytes,
    /// Signer address, used when `private_key` is empty.
    pub sender: String,
    pub recent_blockhash: String,
    /// Durable nonce account; when set an advance-nonce instruction goes first.
    pub nonce_account: Option<String>,
    pub fee_payer: Option<String>,
    pub fee_payer_private_key: SecretBytes,
    pub v0_msg: bool,
    pub priority_fee_price: Option<u64>,
    pub priority_fee_limit: Option<u32>,
    pub tx_encoding: TxEncoding,
    pub transaction_type: Option<TransactionType>,
    /// A complete Base64 transaction to sign instead of building one from
    /// `transaction_type`.
    pub raw_message: Option<String>,
    /// Signatures produced elsewhere, placed after local signing.
    pub external_signatures: Vec<PubkeySignature>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TxEncoding {
    #[default]
    Base58,
    Base64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenProgramId {
    #[default]
    Token,
    Token2022,
}

impl From<TokenProgramId> for TokenProgram {
    fn from(id: TokenProgramId) -> Self {
        match id {
            TokenProgramId::Token => TokenProgram::Token,
            TokenProgramId::Token2022 => TokenProgram::Token2022,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionType {
    Transfer(Transfer),
    DelegateStake(DelegateStake),
    DeactivateStake(DeactivateStake),
    DeactivateAllStake(DeactivateAllStake),
    WithdrawStake(WithdrawStake),
    WithdrawAllStake(WithdrawAllStake),
    CreateTokenAccount(CreateTokenAccount),
    TokenTransfer(TokenTransfer),
    CreateAndTransferToken(CreateAndTransferToken),
    CreateNonceAccount(CreateNonceAccount),
    WithdrawNonceAccount(WithdrawNonceAccount),
    AdvanceNonceAccount(AdvanceNonceAccount),
}

impl TransactionType {
    pub fn name(&self) -> &'static str {
        match self {
            TransactionType::Transfer(_) => "transfer",
            TransactionType::DelegateStake(_) => "delegate_stake",
            TransactionType::DeactivateStake(_) => "deactivate_stake",
            TransactionType::DeactivateAllStake(_) => "deactivate_all_stake",
            TransactionType::WithdrawStake(_) => "withdraw_stake",
            TransactionType::WithdrawAllStake(_) => "withdraw_all_stake",
            TransactionType::CreateTokenAccount(_) => "create_token_account",
            TransactionType::TokenTransfer(_) => "token_transfer",
            TransactionType::CreateAndTransferToken(_) => "create_and_transfer_token",
            TransactionType::CreateNonceAccount(_) => "create_nonce_account",
            TransactionType::WithdrawNonceAccount(_) => "withdraw_nonce_account",
            TransactionType::AdvanceNonceAccount(_) => "advance_nonce_account",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Transfer {
    pub recipient: String,
    pub value: u64,
    pub memo: String,
    pub references: Vec<String>,
}

/// Creates a stake account and delegates it to `validator_pubkey`. Without
/// `stake_account` the account address is derived from the blockhash.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DelegateStake {
    pub validator_pubkey: String,
    pub value: u64,
    pub stake_account: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeactivateStake {
    pub stake_account: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeactivateAllStake {
    pub stake_accounts: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WithdrawStake {
    pub stake_account: String,
    pub value: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WithdrawAllStake {
    pub stake_accounts: Vec<StakeAccountValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StakeAccountValue {
    pub stake_account: String,
    pub value: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateTokenAccount {
    pub main_address: String,
    pub token_mint_address: String,
    pub token_address: String,
    pub token_program_id: TokenProgramId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenTransfer {
    pub token_mint_address: String,
    pub sender_token_address: String,
    pub recipient_token_address: String,
    pub amount: u64,
    pub decimals: u32,
    pub memo: String,
    pub references: Vec<String>,
    pub token_program_id: TokenProgramId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateAndTransferToken {
    pub recipient_main_address: String,
    pub token_mint_address: String,
    pub recipient_token_address: String,
    pub sender_token_address: String,
    pub amount: u64,
    pub decimals: u32,
    pub memo: String,
    pub references: Vec<String>,
    pub token_program_id: TokenProgramId,
}

/// The new account is `nonce_account`, or the address of
/// `nonce_account_private_key` when that is empty. The key also signs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateNonceAccount {
    pub nonce_account: String,
    pub rent: u64,
    pub nonce_account_private_key: SecretBytes,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WithdrawNonceAccount {
    pub nonce_account: String,
    pub recipient: String,
    pub value: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdvanceNonceAccount {
    pub nonce_account: String,
}

// ─── Response ────────────────────────────────────────────────────────

/// A signer address and its signature, both Base58.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PubkeySignature {
    pub pubkey: String,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningOutput {
    /// The signed transaction.
    pub encoded: String,
    /// The message alone, without signatures.
    pub unsigned_tx: String,
    pub signatures: Vec<PubkeySignature>,
}

/// The bytes to sign and the addresses whose signatures are needed, in
/// slot order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreSigningOutput {
    pub signers: Vec<String>,
    pub data: Vec<u8>,
}

// ─── Instruction JSON ────────────────────────────────────────────────

/// An instruction in the JSON shape used by Solana web clients, with
/// Base58 `data`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstructionInput {
    pub program_id: String,
    pub accounts: Vec<AccountMetaInput>,
    pub data: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountMetaInput {
    pub pubkey: String,
    pub is_signer: bool,
    pub is_writable: bool,
}

impl TryFrom<&InstructionInput> for Instruction {
    type Error = SignerError;

    fn try_from(input: &InstructionInput) -> Result<Self, Self::Error> {
        let program_id = input.program_id.parse::<Address>().field("programId")?;
        let accounts = input
            .accounts
            .iter()
            .map(|meta| {
                let pubkey = meta.pubkey.parse::<Address>().field("account pubkey")?;
                Ok(AccountMeta {
                    pubkey,
                    is_signer: meta.is_signer,
                    is_writable: meta.is_writable,
                })
            })
            .collect::<Result<Vec<_>, SignerError>>()?;
        let data = bs58::decode(&input.data).into_vec().map_err(|e| {
            SignerError::InvalidInput(format!("instruction data is not base58: {e}"))
        })?;
        Ok(Instruction::new(program_id, accounts, data))
    }
}
