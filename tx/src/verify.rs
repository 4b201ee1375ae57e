//! Transaction signature verification.

use crate::{
    Error, MultisigKey, ProviderError, PublicKey, SignMode, SignatureData, SignerData, TxData,
    WireSignMode,
};
use bytes::Bytes;
use chainkit_utils::{hex, BitArray};

/// Maximum multisig nesting depth accepted by [verify_tx_signature].
///
/// A multisig-within-a-multisig counts as one level; a chain deeper than
/// this is rejected with [Error::NestingTooDeep] before any nested
/// signature is checked.
pub const MAX_MULTISIG_DEPTH: usize = 3;

/// Derives the canonical bytes-to-sign for a transaction.
///
/// Implementations own the encoding of `tx_data` under each sign mode;
/// verification treats the result as opaque.
pub trait SignBytesProvider {
    fn sign_bytes(
        &self,
        mode: WireSignMode,
        signer_data: &SignerData,
        tx_data: &TxData,
    ) -> Result<Bytes, ProviderError>;
}

/// Verifies `signature` over `tx_data` against `signer_data.public_key`.
///
/// Single signatures are checked against the sign bytes produced by
/// `provider` for their declared mode. Multisignatures are checked
/// structurally (participant bitmap, threshold, nesting depth) and then each
/// nested signature is verified recursively against its participant key.
pub fn verify_tx_signature<P: SignBytesProvider>(
    provider: &P,
    signer_data: &SignerData,
    signature: &SignatureData,
    tx_data: &TxData,
) -> Result<(), Error> {
    verify_at_depth(provider, signer_data, &signer_data.public_key, signature, tx_data, 0)
}

fn verify_at_depth<P: SignBytesProvider>(
    provider: &P,
    signer_data: &SignerData,
    public_key: &PublicKey,
    signature: &SignatureData,
    tx_data: &TxData,
    depth: usize,
) -> Result<(), Error> {
    match signature {
        SignatureData::Single { mode, signature } => verify_single(
            provider,
            signer_data,
            public_key,
            *mode,
            signature,
            tx_data,
        ),
        SignatureData::Multi {
            bitarray,
            signatures,
        } => {
            let PublicKey::Multisig(multisig_key) = public_key else {
                return Err(Error::TypeMismatch(
                    "multisignature requires a multisig public key".into(),
                ));
            };
            verify_multi(
                provider,
                signer_data,
                multisig_key,
                bitarray,
                signatures,
                tx_data,
                depth,
            )
        }
    }
}

fn verify_single<P: SignBytesProvider>(
    provider: &P,
    signer_data: &SignerData,
    public_key: &PublicKey,
    mode: SignMode,
    signature: &Bytes,
    tx_data: &TxData,
) -> Result<(), Error> {
    let wire_mode = mode.to_wire()?;
    let sign_bytes = provider
        .sign_bytes(wire_mode, signer_data, tx_data)
        .map_err(Error::Provider)?;
    let verified = match (mode, public_key) {
        (SignMode::Eip191, PublicKey::Secp256k1(key)) => {
            key.verify_signature_eip191(&sign_bytes, signature)
        }
        (SignMode::Eip191, PublicKey::Multisig(_)) => {
            return Err(Error::TypeMismatch(
                "eip191 sign mode requires a single secp256k1 public key".into(),
            ));
        }
        (_, PublicKey::Secp256k1(key)) => key.verify_signature(&sign_bytes, signature),
        (_, PublicKey::Multisig(_)) => {
            return Err(Error::TypeMismatch(
                "single signature requires a single public key".into(),
            ));
        }
    };
    if !verified {
        return Err(Error::VerificationFailed {
            signature: hex(signature),
            sign_bytes: hex(&sign_bytes),
        });
    }
    Ok(())
}

fn verify_multi<P: SignBytesProvider>(
    provider: &P,
    signer_data: &SignerData,
    multisig_key: &MultisigKey,
    bitarray: &BitArray,
    signatures: &[SignatureData],
    tx_data: &TxData,
    depth: usize,
) -> Result<(), Error> {
    if depth >= MAX_MULTISIG_DEPTH {
        return Err(Error::NestingTooDeep(MAX_MULTISIG_DEPTH));
    }
    let keys = multisig_key.keys();
    if bitarray.len() != keys.len() {
        return Err(Error::InvalidInput(format!(
            "bitarray length {} does not match key count {}",
            bitarray.len(),
            keys.len()
        )));
    }
    let set = bitarray.count_ones();
    if signatures.len() != set {
        return Err(Error::StructuralMismatch {
            expected: set,
            got: signatures.len(),
        });
    }
    let required = multisig_key.threshold() as usize;
    if set < required {
        return Err(Error::ThresholdNotMet { required, got: set });
    }
    for (signature, index) in signatures.iter().zip(bitarray.iter_ones()) {
        verify_at_depth(
            provider,
            signer_data,
            &keys[index],
            signature,
            tx_data,
            depth + 1,
        )?;
    }
    Ok(())
}
