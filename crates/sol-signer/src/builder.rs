//! Turns a [`SigningInput`] into a compiled message and the keys that sign it.
//!
//! Every transaction kind starts from the same prelude:
//!
//! ```text
//! [advance nonce] [compute-unit price] [compute-unit limit] [memo] kind instructions...
//! ```
//!
//! Create-and-transfer is the exception: its memo sits between the account
//! creation and the transfer.

use log::{debug, warn};
use sol_tx::programs::{compute_budget, memo, stake, system, token};
use sol_tx::{
    signer, verify_signature, Address, Hash, Instruction, Keypair, Signature, Transaction,
    VersionedMessage,
};

use crate::error::{FieldContext, SignerError};
use crate::types::{SecretBytes, SigningInput, TransactionType};

pub struct MessageBuilder<'a> {
    input: &'a SigningInput,
}

impl<'a> MessageBuilder<'a> {
    pub fn new(input: &'a SigningInput) -> Self {
        Self { input }
    }

    /// Keys that sign locally: the fee payer's, the signer's and, for a new
    /// nonce account, the nonce account's. Keys left empty are skipped.
    pub fn signing_keys(&self) -> Result<Vec<Keypair>, SignerError> {
        let mut keys = Vec::with_capacity(3);
        if let Some(fee_payer) = keypair(&self.input.fee_payer_private_key, "feePayerPrivateKey")? {
            keys.push(fee_payer);
        }
        if let Some(signer) = keypair(&self.input.private_key, "privateKey")? {
            keys.push(signer);
        }
        if let Some(TransactionType::CreateNonceAccount(ref create)) = self.input.transaction_type {
            let nonce = keypair(&create.nonce_account_private_key, "nonceAccountPrivateKey")?;
            if let Some(nonce) = nonce {
                keys.push(nonce);
            }
        }
        Ok(keys)
    }

    /// The transaction to sign, with whatever signatures it already carries.
    ///
    /// A raw message is decoded as-is, moved to `recent_blockhash` when one
    /// is given, and stripped of signatures that no longer verify. Otherwise
    /// the message is compiled from `transaction_type`.
    pub fn build_transaction(&self) -> Result<Transaction, SignerError> {
        match self.input.raw_message {
            Some(ref raw) => self.raw_transaction(raw),
            None => Ok(Transaction::new(self.build()?)),
        }
    }

    /// Compile the message for `transaction_type`.
    pub fn build(&self) -> Result<VersionedMessage, SignerError> {
        let instructions = self.build_instructions()?;
        let fee_payer = self.fee_payer()?;
        let message = VersionedMessage::compile(
            &instructions,
            Some(&fee_payer),
            self.recent_blockhash()?,
            self.input.v0_msg,
        )?;
        Ok(message)
    }

    /// The fee payer's key address, else the `fee_payer` address, else the signer.
    pub fn fee_payer(&self) -> Result<Address, SignerError> {
        if let Some(key) = keypair(&self.input.fee_payer_private_key, "feePayerPrivateKey")? {
            return Ok(key.address());
        }
        match non_empty(&self.input.fee_payer) {
            Some(fee_payer) => parse_address(fee_payer, "feePayer"),
            None => self.signer_address(),
        }
    }

    pub fn signer_address(&self) -> Result<Address, SignerError> {
        match keypair(&self.input.private_key, "privateKey")? {
            Some(key) => Ok(key.address()),
            None => parse_address(&self.input.sender, "sender"),
        }
    }

    fn recent_blockhash(&self) -> Result<Hash, SignerError> {
        self.input
            .recent_blockhash
            .parse::<Hash>()
            .field("recentBlockhash")
    }

    fn nonce_account(&self) -> Result<Option<Address>, SignerError> {
        non_empty(&self.input.nonce_account)
            .map(|nonce| parse_address(nonce, "nonceAccount"))
            .transpose()
    }

    fn raw_transaction(&self, raw: &str) -> Result<Transaction, SignerError> {
        let mut tx = Transaction::from_base64(raw).field("rawMessage")?;

        if !self.input.recent_blockhash.is_empty() {
            tx.set_recent_blockhash(self.recent_blockhash()?);
            return Ok(tx);
        }

        let message = tx.message_data()?;
        let present = tx.signatures().iter().filter(|s| !s.is_placeholder()).count();
        let valid: Vec<(Address, Signature)> = tx
            .signer_signatures()
            .filter(|(address, signature)| {
                !signature.is_placeholder()
                    && verify_signature(address, &message, signature).is_ok()
            })
            .collect();
        if valid.len() == present {
            return Ok(tx);
        }

        warn!(
            "raw message carries {} signatures that do not verify, discarding them",
            present - valid.len()
        );
        let mut fresh = Transaction::new(tx.into_message());
        signer::add_external_signatures(&mut fresh, &valid)?;
        Ok(fresh)
    }

    fn build_instructions(&self) -> Result<Vec<Instruction>, SignerError> {
        let kind = self
            .input
            .transaction_type
            .as_ref()
            .ok_or(SignerError::MissingTransactionType)?;
        debug!("building {} instructions", kind.name());

        let signer = self.signer_address()?;
        let nonce = match kind {
            TransactionType::AdvanceNonceAccount(advance) => {
                Some(parse_address(&advance.nonce_account, "nonceAccount")?)
            }
            _ => self.nonce_account()?,
        };

        let mut list = InstructionList::default();
        list.maybe_advance_nonce(nonce, &signer)
            .maybe_priority_fee_price(self.input.priority_fee_price)
            .maybe_priority_fee_limit(self.input.priority_fee_limit);

        match kind {
            TransactionType::Transfer(transfer) => {
                let to = parse_address(&transfer.recipient, "recipient")?;
                let references = parse_references(&transfer.references)?;
                list.maybe_memo(&transfer.memo).add(
                    system::transfer(&signer, &to, transfer.value).with_references(&references),
                );
            }
            TransactionType::DelegateStake(delegate) => {
                let validator = parse_address(&delegate.validator_pubkey, "validatorPubkey")?;
                let stake_account = if delegate.stake_account.is_empty() {
                    None
                } else {
                    Some(parse_address(&delegate.stake_account, "stakeAccount")?)
                };
                list.extend(stake::deposit_stake(
                    &signer,
                    &validator,
                    delegate.value,
                    &self.recent_blockhash()?,
                    stake_account.as_ref(),
                ));
            }
            TransactionType::DeactivateStake(deactivate) => {
                let stake_account = parse_address(&deactivate.stake_account, "stakeAccount")?;
                list.add(stake::deactivate(&stake_account, &signer));
            }
            TransactionType::DeactivateAllStake(deactivate_all) => {
                for stake_account in &deactivate_all.stake_accounts {
                    let stake_account = parse_address(stake_account, "stakeAccounts")?;
                    list.add(stake::deactivate(&stake_account, &signer));
                }
            }
            TransactionType::WithdrawStake(withdraw) => {
                let stake_account = parse_address(&withdraw.stake_account, "stakeAccount")?;
                list.add(stake::withdraw(
                    &stake_account,
                    &signer,
                    &signer,
                    withdraw.value,
                    None,
                ));
            }
            TransactionType::WithdrawAllStake(withdraw_all) => {
                for withdraw in &withdraw_all.stake_accounts {
                    let stake_account = parse_address(&withdraw.stake_account, "stakeAccounts")?;
                    list.add(stake::withdraw(
                        &stake_account,
                        &signer,
                        &signer,
                        withdraw.value,
                        None,
                    ));
                }
            }
            TransactionType::CreateTokenAccount(create) => {
                let wallet = parse_address(&create.main_address, "mainAddress")?;
                let mint = parse_address(&create.token_mint_address, "tokenMintAddress")?;
                let token_account = parse_address(&create.token_address, "tokenAddress")?;
                list.add(token::create_associated_token_account(
                    &signer,
                    &wallet,
                    &mint,
                    &token_account,
                    create.token_program_id.into(),
                ));
            }
            TransactionType::TokenTransfer(transfer) => {
                let mint = parse_address(&transfer.token_mint_address, "tokenMintAddress")?;
                let source = parse_address(&transfer.sender_token_address, "senderTokenAddress")?;
                let destination =
                    parse_address(&transfer.recipient_token_address, "recipientTokenAddress")?;
                let references = parse_references(&transfer.references)?;
                let ix = token::transfer_checked(
                    &source,
                    &mint,
                    &destination,
                    &signer,
                    transfer.amount,
                    decimals(transfer.decimals)?,
                    transfer.token_program_id.into(),
                )
                .with_references(&references);
                list.maybe_memo(&transfer.memo).add(ix);
            }
            TransactionType::CreateAndTransferToken(transfer) => {
                let wallet =
                    parse_address(&transfer.recipient_main_address, "recipientMainAddress")?;
                let mint = parse_address(&transfer.token_mint_address, "tokenMintAddress")?;
                let destination =
                    parse_address(&transfer.recipient_token_address, "recipientTokenAddress")?;
                let source = parse_address(&transfer.sender_token_address, "senderTokenAddress")?;
                let references = parse_references(&transfer.references)?;
                let program = transfer.token_program_id.into();

                // The fee payer funds the new account, which may not be the signer.
                let create = token::create_associated_token_account(
                    &self.fee_payer()?,
                    &wallet,
                    &mint,
                    &destination,
                    program,
                );
                let ix = token::transfer_checked(
                    &source,
                    &mint,
                    &destination,
                    &signer,
                    transfer.amount,
                    decimals(transfer.decimals)?,
                    program,
                )
                .with_references(&references);
                list.add(create).maybe_memo(&transfer.memo).add(ix);
            }
            TransactionType::CreateNonceAccount(create) => {
                let nonce = if create.nonce_account.is_empty() {
                    keypair(&create.nonce_account_private_key, "nonceAccountPrivateKey")?
                        .map(|key| key.address())
                        .ok_or_else(|| {
                            SignerError::InvalidInput(
                                "either nonceAccount or nonceAccountPrivateKey is required".into(),
                            )
                        })?
                } else {
                    parse_address(&create.nonce_account, "nonceAccount")?
                };
                list.extend(system::create_nonce_account(&signer, &nonce, &signer, create.rent));
            }
            TransactionType::WithdrawNonceAccount(withdraw) => {
                let nonce = parse_address(&withdraw.nonce_account, "nonceAccount")?;
                let recipient = parse_address(&withdraw.recipient, "recipient")?;
                list.add(system::withdraw_nonce_account(
                    &nonce,
                    &signer,
                    &recipient,
                    withdraw.value,
                ));
            }
            TransactionType::AdvanceNonceAccount(_) => {}
        }

        Ok(list.into_inner())
    }
}

/// Instruction sequence with optional steps that are skipped when unset.
#[derive(Default)]
struct InstructionList(Vec<Instruction>);

impl InstructionList {
    fn maybe_advance_nonce(&mut self, nonce: Option<Address>, authority: &Address) -> &mut Self {
        if let Some(nonce) = nonce {
            self.0.push(system::advance_nonce_account(&nonce, authority));
        }
        self
    }

    fn maybe_priority_fee_price(&mut self, price: Option<u64>) -> &mut Self {
        if let Some(price) = price {
            self.0.push(compute_budget::set_compute_unit_price(price));
        }
        self
    }

    fn maybe_priority_fee_limit(&mut self, limit: Option<u32>) -> &mut Self {
        if let Some(limit) = limit {
            self.0.push(compute_budget::set_compute_unit_limit(limit));
        }
        self
    }

    fn maybe_memo(&mut self, text: &str) -> &mut Self {
        if !text.is_empty() {
            self.0.push(memo::memo(text));
        }
        self
    }

    fn add(&mut self, instruction: Instruction) -> &mut Self {
        self.0.push(instruction);
        self
    }

    fn extend(&mut self, instructions: Vec<Instruction>) -> &mut Self {
        self.0.extend(instructions);
        self
    }

    fn into_inner(self) -> Vec<Instruction> {
        self.0
    }
}

fn keypair(secret: &SecretBytes, field: &'static str) -> Result<Option<Keypair>, SignerError> {
    if secret.is_empty() {
        return Ok(None);
    }
    Keypair::from_bytes(secret.as_bytes()).field(field).map(Some)
}

fn parse_address(text: &str, field: &'static str) -> Result<Address, SignerError> {
    text.parse::<Address>().field(field)
}

fn parse_references(references: &[String]) -> Result<Vec<Address>, SignerError> {
    references
        .iter()
        .map(|r| parse_address(r, "references"))
        .collect()
}

fn non_empty(text: &Option<String>) -> Option<&str> {
    text.as_deref().filter(|s| !s.is_empty())
}

fn decimals(decimals: u32) -> Result<u8, SignerError> {
    u8::try_from(decimals).map_err(|_| {
        SignerError::InvalidInput(format!("token decimals must be below 256, got {decimals}"))
    })
}
