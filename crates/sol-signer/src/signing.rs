//! The three request flows: sign locally, hand out the pre-image for an
//! external signer, and compile with signatures produced elsewhere.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use log::debug;
use sol_tx::{signer, Address, Signature, SolError, Transaction};

use crate::builder::MessageBuilder;
use crate::error::{FieldContext, SignerError};
use crate::types::{PreSigningOutput, PubkeySignature, SigningInput, SigningOutput, TxEncoding};

pub fn sign(input: &SigningInput) -> Result<SigningOutput, SignerError> {
    let builder = MessageBuilder::new(input);
    let keys = builder.signing_keys()?;
    let mut tx = builder.build_transaction()?;

    signer::sign(&keys, &mut tx)?;
    let external = parse_pubkey_signatures(&input.external_signatures)?;
    signer::add_external_signatures(&mut tx, &external)?;

    if let Some((address, _)) = tx.signer_signatures().find(|(_, s)| s.is_placeholder()) {
        return Err(SignerError::MissingSignature(format!(
            "no key or signature given for signer {address}"
        )));
    }

    debug!("signed transaction with {} signatures", tx.signatures().len());
    signing_output(&tx, input.tx_encoding)
}

pub fn preimage_hashes(input: &SigningInput) -> Result<PreSigningOutput, SignerError> {
    let tx = MessageBuilder::new(input).build_transaction()?;
    let signers = tx
        .message()
        .signer_keys()
        .iter()
        .map(Address::to_string)
        .collect();

    Ok(PreSigningOutput {
        signers,
        data: tx.message_data()?,
    })
}

/// Attach `signatures[i]` to the slot of `public_keys[i]`.
///
/// Every required signer must be listed. A zero signature leaves its slot
/// unsigned; any other signature must verify.
pub fn compile_with_signatures(
    input: &SigningInput,
    signatures: &[Signature],
    public_keys: &[Address],
) -> Result<SigningOutput, SignerError> {
    if signatures.len() != public_keys.len() {
        return Err(SolError::SignatureCountMismatch {
            expected: public_keys.len(),
            actual: signatures.len(),
        }
        .into());
    }

    let message = MessageBuilder::new(input).build_transaction()?.into_message();
    let mut tx = Transaction::new(message);

    if let Some(missing) = tx
        .message()
        .signer_keys()
        .iter()
        .find(|signer| !public_keys.contains(signer))
    {
        return Err(SignerError::MissingSignature(format!(
            "no signature given for signer {missing}"
        )));
    }

    let mut provided = Vec::with_capacity(signatures.len());
    for (address, signature) in public_keys.iter().zip(signatures) {
        if signature.is_placeholder() {
            if !tx.message().signer_keys().contains(address) {
                return Err(SolError::AccountNotFound(format!(
                    "{address} is not a required signer of this message"
                ))
                .into());
            }
            continue;
        }
        provided.push((*address, *signature));
    }
    signer::add_external_signatures(&mut tx, &provided)?;

    signing_output(&tx, input.tx_encoding)
}

pub(crate) fn signing_output(
    tx: &Transaction,
    encoding: TxEncoding,
) -> Result<SigningOutput, SignerError> {
    let signatures = tx
        .signer_signatures()
        .map(|(address, signature)| PubkeySignature {
            pubkey: address.to_string(),
            signature: signature.to_string(),
        })
        .collect();

    Ok(SigningOutput {
        encoded: encode(&tx.serialize()?, encoding),
        unsigned_tx: encode(&tx.message_data()?, encoding),
        signatures,
    })
}

fn encode(bytes: &[u8], encoding: TxEncoding) -> String {
    match encoding {
        TxEncoding::Base58 => bs58::encode(bytes).into_string(),
        TxEncoding::Base64 => BASE64.encode(bytes),
    }
}

fn parse_pubkey_signatures(
    entries: &[PubkeySignature],
) -> Result<Vec<(Address, Signature)>, SignerError> {
    entries
        .iter()
        .map(|entry| {
            let address = entry.pubkey.parse::<Address>().field("externalSignatures.pubkey")?;
            let signature = entry
                .signature
                .parse::<Signature>()
                .field("externalSignatures.signature")?;
            Ok((address, signature))
        })
        .collect()
}
