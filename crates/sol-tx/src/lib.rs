//! Solana transaction compilation and signing.
//!
//! This crate builds Solana instructions, compiles them into legacy or V0
//! messages and signs the result, without pulling in `solana-sdk`.
//!
//! The wire format is implemented by hand, using `ed25519-dalek` for
//! signatures, `curve25519-dalek` for the program-derived-address curve test,
//! `sha2` for address derivation and `bs58` / `base64` for text encodings.
//!
//! ```text
//! Instruction* --compile--> VersionedMessage --Transaction::new--> Transaction
//!                                                   |
//!                                   signer::sign(keys, &mut tx)
//! ```

pub mod address;
pub mod compile;
pub mod edit;
pub mod error;
pub mod instruction;
pub mod keypair;
pub mod message;
pub mod pda;
pub mod programs;
pub mod short_vec;
pub mod signer;
pub mod transaction;

// Re-export key public types for ergonomic imports.
pub use address::{Address, Hash};
pub use error::SolError;
pub use instruction::{AccountMeta, Instruction};
pub use keypair::{verify_signature, Keypair, Signature};
pub use message::{
    CompiledInstruction, LegacyMessage, MessageAddressTableLookup, MessageHeader, V0Message,
    VersionedMessage,
};
pub use pda::{
    address_from_recent_blockhash, address_from_validator_seed, create_program_address,
    create_with_seed, find_associated_token_address, find_program_address,
};
pub use programs::token::TokenProgram;
pub use transaction::Transaction;
