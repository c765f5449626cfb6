//! Compiled messages: the bytes every signer signs.
//!
//! ```text
//! legacy: header(3) || short-vec keys || blockhash(32) || short-vec instructions
//! v0:     0x80 || <legacy body> || short-vec address table lookups
//! ```
//!
//! A legacy message starts with `num_required_signatures`, which is always
//! below 128, so a set high bit on the first byte marks a versioned message.

use crate::address::{Address, Hash};
use crate::compile::{compile_instructions, compile_keys};
use crate::error::SolError;
use crate::instruction::Instruction;
use crate::short_vec::{write_len, WireReader};

const VERSION_PREFIX: u8 = 0x80;

// ---------------------------------------------------------------------------
// Parts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageHeader {
    /// Number of signatures required (first N account keys are signers).
    pub num_required_signatures: u8,
    /// Number of signer accounts that are read-only.
    pub num_readonly_signed_accounts: u8,
    /// Number of non-signer accounts that are read-only.
    pub num_readonly_unsigned_accounts: u8,
}

/// An instruction whose program and accounts are indices into the message's
/// account table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledInstruction {
    pub program_id_index: u8,
    pub accounts: Vec<u8>,
    pub data: Vec<u8>,
}

/// Accounts loaded from an on-chain address lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageAddressTableLookup {
    pub account_key: Address,
    pub writable_indexes: Vec<u8>,
    pub readonly_indexes: Vec<u8>,
}

// ---------------------------------------------------------------------------
// Legacy and V0 bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyMessage {
    pub header: MessageHeader,
    pub account_keys: Vec<Address>,
    pub recent_blockhash: Hash,
    pub instructions: Vec<CompiledInstruction>,
}

impl LegacyMessage {
    /// Compile `instructions` into a legacy message.
    pub fn new(
        instructions: &[Instruction],
        fee_payer: Option<&Address>,
        recent_blockhash: Hash,
    ) -> Result<Self, SolError> {
        let keys = compile_keys(instructions, fee_payer)?;
        let compiled = compile_instructions(instructions, &keys.account_keys)?;

        Ok(Self {
            header: keys.header,
            account_keys: keys.account_keys,
            recent_blockhash,
            instructions: compiled,
        })
    }

    pub fn serialize(&self) -> Result<Vec<u8>, SolError> {
        let mut buf = Vec::new();
        write_body(
            &mut buf,
            &self.header,
            &self.account_keys,
            &self.recent_blockhash,
            &self.instructions,
        )?;
        Ok(buf)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct V0Message {
    pub header: MessageHeader,
    pub account_keys: Vec<Address>,
    pub recent_blockhash: Hash,
    pub instructions: Vec<CompiledInstruction>,
    pub address_table_lookups: Vec<MessageAddressTableLookup>,
}

impl V0Message {
    /// Compile `instructions` into a V0 message with no lookup tables.
    pub fn new(
        instructions: &[Instruction],
        fee_payer: Option<&Address>,
        recent_blockhash: Hash,
    ) -> Result<Self, SolError> {
        let legacy = LegacyMessage::new(instructions, fee_payer, recent_blockhash)?;

        Ok(Self {
            header: legacy.header,
            account_keys: legacy.account_keys,
            recent_blockhash: legacy.recent_blockhash,
            instructions: legacy.instructions,
            address_table_lookups: Vec::new(),
        })
    }

    pub fn serialize(&self) -> Result<Vec<u8>, SolError> {
        let mut buf = vec![VERSION_PREFIX];
        write_body(
            &mut buf,
            &self.header,
            &self.account_keys,
            &self.recent_blockhash,
            &self.instructions,
        )?;

        write_len(&mut buf, self.address_table_lookups.len())?;
        for lookup in &self.address_table_lookups {
            buf.extend_from_slice(lookup.account_key.as_bytes());
            write_len(&mut buf, lookup.writable_indexes.len())?;
            buf.extend_from_slice(&lookup.writable_indexes);
            write_len(&mut buf, lookup.readonly_indexes.len())?;
            buf.extend_from_slice(&lookup.readonly_indexes);
        }
        Ok(buf)
    }
}

fn write_body(
    buf: &mut Vec<u8>,
    header: &MessageHeader,
    account_keys: &[Address],
    recent_blockhash: &Hash,
    instructions: &[CompiledInstruction],
) -> Result<(), SolError> {
    buf.push(header.num_required_signatures);
    buf.push(header.num_readonly_signed_accounts);
    buf.push(header.num_readonly_unsigned_accounts);

    write_len(buf, account_keys.len())?;
    for key in account_keys {
        buf.extend_from_slice(key.as_bytes());
    }

    buf.extend_from_slice(recent_blockhash.as_bytes());

    write_len(buf, instructions.len())?;
    for ix in instructions {
        buf.push(ix.program_id_index);
        write_len(buf, ix.accounts.len())?;
        buf.extend_from_slice(&ix.accounts);
        write_len(buf, ix.data.len())?;
        buf.extend_from_slice(&ix.data);
    }
    Ok(())
}

struct Body {
    header: MessageHeader,
    account_keys: Vec<Address>,
    recent_blockhash: Hash,
    instructions: Vec<CompiledInstruction>,
}

fn read_body(reader: &mut WireReader<'_>) -> Result<Body, SolError> {
    let header = MessageHeader {
        num_required_signatures: reader.read_u8()?,
        num_readonly_signed_accounts: reader.read_u8()?,
        num_readonly_unsigned_accounts: reader.read_u8()?,
    };

    let key_count = reader.read_len()?;
    let mut account_keys = Vec::with_capacity(key_count);
    for _ in 0..key_count {
        account_keys.push(Address::new(reader.read_array("account key")?));
    }

    let recent_blockhash = Hash::new(reader.read_array("recent blockhash")?);

    let ix_count = reader.read_len()?;
    let mut instructions = Vec::with_capacity(ix_count);
    for _ in 0..ix_count {
        let program_id_index = reader.read_u8()?;
        let accounts = reader.read_vec("instruction accounts")?;
        let data = reader.read_vec("instruction data")?;
        instructions.push(CompiledInstruction {
            program_id_index,
            accounts,
            data,
        });
    }

    Ok(Body {
        header,
        account_keys,
        recent_blockhash,
        instructions,
    })
}

/// `loaded` counts the accounts a V0 message pulls from lookup tables; their
/// indices follow the static keys.
fn validate_body(body: &Body, loaded: usize) -> Result<(), SolError> {
    let header = &body.header;
    let signers = header.num_required_signatures as usize;
    let keys = body.account_keys.len();

    if signers > keys
        || header.num_readonly_signed_accounts as usize > signers
        || header.num_readonly_unsigned_accounts as usize > keys - signers
    {
        return Err(SolError::SerializationError(format!(
            "header {header:?} does not fit {keys} account keys"
        )));
    }

    for ix in &body.instructions {
        let out_of_range = std::iter::once(&ix.program_id_index)
            .chain(ix.accounts.iter())
            .any(|i| *i as usize >= keys + loaded);
        if out_of_range {
            return Err(SolError::SerializationError(
                "instruction refers to an account index past the key table".into(),
            ));
        }
    }
    Ok(())
}

/// Bump every program and account index at or past `from`, making room for
/// a key inserted at that position.
pub(crate) fn shift_indices(
    instructions: &mut [CompiledInstruction],
    from: u8,
) -> Result<(), SolError> {
    for ix in instructions.iter_mut() {
        for i in std::iter::once(&mut ix.program_id_index).chain(ix.accounts.iter_mut()) {
            if *i >= from {
                *i = i.checked_add(1).ok_or_else(|| {
                    SolError::TransactionTooLarge("account index exceeds 255".into())
                })?;
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// VersionedMessage
// ---------------------------------------------------------------------------

/// A legacy or V0 message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionedMessage {
    Legacy(LegacyMessage),
    V0(V0Message),
}

impl VersionedMessage {
    /// Compile `instructions` into a V0 message when `v0` is set, legacy
    /// otherwise.
    pub fn compile(
        instructions: &[Instruction],
        fee_payer: Option<&Address>,
        recent_blockhash: Hash,
        v0: bool,
    ) -> Result<Self, SolError> {
        if v0 {
            V0Message::new(instructions, fee_payer, recent_blockhash).map(Self::V0)
        } else {
            LegacyMessage::new(instructions, fee_payer, recent_blockhash).map(Self::Legacy)
        }
    }

    pub fn header(&self) -> &MessageHeader {
        match self {
            Self::Legacy(m) => &m.header,
            Self::V0(m) => &m.header,
        }
    }

    pub fn account_keys(&self) -> &[Address] {
        match self {
            Self::Legacy(m) => &m.account_keys,
            Self::V0(m) => &m.account_keys,
        }
    }

    pub fn recent_blockhash(&self) -> &Hash {
        match self {
            Self::Legacy(m) => &m.recent_blockhash,
            Self::V0(m) => &m.recent_blockhash,
        }
    }

    pub fn instructions(&self) -> &[CompiledInstruction] {
        match self {
            Self::Legacy(m) => &m.instructions,
            Self::V0(m) => &m.instructions,
        }
    }

    pub fn instructions_mut(&mut self) -> &mut Vec<CompiledInstruction> {
        match self {
            Self::Legacy(m) => &mut m.instructions,
            Self::V0(m) => &mut m.instructions,
        }
    }

    /// The account keys that must sign, in signature-slot order.
    pub fn signer_keys(&self) -> &[Address] {
        let n = self.header().num_required_signatures as usize;
        &self.account_keys()[..n.min(self.account_keys().len())]
    }

    pub fn is_v0(&self) -> bool {
        matches!(self, Self::V0(_))
    }

    /// Whether the account at `index` may be written by the transaction.
    pub fn is_writable(&self, index: usize) -> bool {
        let header = self.header();
        let keys = self.account_keys().len();
        let signers = header.num_required_signatures as usize;

        if index < signers {
            index < signers - header.num_readonly_signed_accounts as usize
        } else {
            index < keys.saturating_sub(header.num_readonly_unsigned_accounts as usize)
        }
    }

    /// Replace the recent blockhash. Callers holding signatures over the old
    /// bytes must discard them; [`crate::Transaction::set_recent_blockhash`]
    /// does so.
    pub(crate) fn set_recent_blockhash(&mut self, blockhash: Hash) {
        match self {
            Self::Legacy(m) => m.recent_blockhash = blockhash,
            Self::V0(m) => m.recent_blockhash = blockhash,
        }
    }

    /// Append `address` as a read-only non-signer, or return its existing
    /// index.
    ///
    /// Indices at or past the new slot refer to lookup-table accounts in a V0
    /// message; those are shifted up by one.
    pub fn push_readonly_unsigned(&mut self, address: Address) -> Result<u8, SolError> {
        if let Some(index) = self.account_keys().iter().position(|k| *k == address) {
            return u8::try_from(index)
                .map_err(|_| SolError::TransactionTooLarge("account index exceeds 255".into()));
        }

        let (header, keys, instructions) = self.parts_mut();
        let index = u8::try_from(keys.len())
            .map_err(|_| SolError::TransactionTooLarge("account table is full".into()))?;
        header.num_readonly_unsigned_accounts = header
            .num_readonly_unsigned_accounts
            .checked_add(1)
            .ok_or_else(|| SolError::TransactionTooLarge("too many read-only accounts".into()))?;

        shift_indices(instructions, index)?;
        keys.push(address);
        Ok(index)
    }

    pub(crate) fn parts_mut(
        &mut self,
    ) -> (
        &mut MessageHeader,
        &mut Vec<Address>,
        &mut Vec<CompiledInstruction>,
    ) {
        match self {
            Self::Legacy(m) => (&mut m.header, &mut m.account_keys, &mut m.instructions),
            Self::V0(m) => (&mut m.header, &mut m.account_keys, &mut m.instructions),
        }
    }

    pub fn serialize(&self) -> Result<Vec<u8>, SolError> {
        match self {
            Self::Legacy(m) => m.serialize(),
            Self::V0(m) => m.serialize(),
        }
    }

    /// Parse a message that makes up the whole of `data`.
    pub fn deserialize(data: &[u8]) -> Result<Self, SolError> {
        let mut reader = WireReader::new(data);
        let message = Self::read(&mut reader)?;
        if !reader.is_empty() {
            return Err(SolError::SerializationError(format!(
                "{} trailing bytes after message",
                data.len() - reader.position()
            )));
        }
        Ok(message)
    }

    pub(crate) fn read(reader: &mut WireReader<'_>) -> Result<Self, SolError> {
        let first = reader
            .peek_u8()
            .ok_or_else(|| SolError::SerializationError("empty message".into()))?;

        if first & VERSION_PREFIX == 0 {
            let body = read_body(reader)?;
            validate_body(&body, 0)?;
            return Ok(Self::Legacy(LegacyMessage {
                header: body.header,
                account_keys: body.account_keys,
                recent_blockhash: body.recent_blockhash,
                instructions: body.instructions,
            }));
        }

        reader.read_u8()?;
        let version = first & !VERSION_PREFIX;
        if version != 0 {
            return Err(SolError::SerializationError(format!(
                "unsupported message version {version}"
            )));
        }

        let body = read_body(reader)?;
        let lookup_count = reader.read_len()?;
        let mut address_table_lookups = Vec::with_capacity(lookup_count);
        for _ in 0..lookup_count {
            address_table_lookups.push(MessageAddressTableLookup {
                account_key: Address::new(reader.read_array("lookup table key")?),
                writable_indexes: reader.read_vec("writable indexes")?,
                readonly_indexes: reader.read_vec("readonly indexes")?,
            });
        }
        let loaded = address_table_lookups
            .iter()
            .map(|l| l.writable_indexes.len() + l.readonly_indexes.len())
            .sum();
        validate_body(&body, loaded)?;

        Ok(Self::V0(V0Message {
            header: body.header,
            account_keys: body.account_keys,
            recent_blockhash: body.recent_blockhash,
            instructions: body.instructions,
            address_table_lookups,
        }))
    }
}

impl From<LegacyMessage> for VersionedMessage {
    fn from(message: LegacyMessage) -> Self {
        Self::Legacy(message)
    }
}

impl From<V0Message> for VersionedMessage {
    fn from(message: V0Message) -> Self {
        Self::V0(message)
    }
}
