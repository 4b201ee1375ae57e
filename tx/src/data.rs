//! Data model shared by the verification pipeline.

use crate::{Error, SignMode};
use bytes::Bytes;
use chainkit_cryptography::secp256k1;
use chainkit_utils::BitArray;

/// A public key a transaction can be signed against.
///
/// Mirrors [SignatureData]: a [PublicKey::Secp256k1] key verifies a
/// [SignatureData::Single] and a [PublicKey::Multisig] key verifies a
/// [SignatureData::Multi].
#[derive(Clone, Debug, PartialEq)]
pub enum PublicKey {
    /// A single secp256k1 key.
    Secp256k1(secp256k1::PublicKey),
    /// A threshold multisignature key.
    Multisig(MultisigKey),
}

/// A threshold multisignature key: at least `threshold` of `keys` must have
/// produced a valid nested signature.
#[derive(Clone, Debug, PartialEq)]
pub struct MultisigKey {
    threshold: u32,
    keys: Vec<PublicKey>,
}

impl MultisigKey {
    /// Creates a threshold key over the given participants.
    ///
    /// The threshold must be at least one and no larger than the number of
    /// participant keys.
    pub fn new(threshold: u32, keys: Vec<PublicKey>) -> Result<Self, Error> {
        if threshold == 0 {
            return Err(Error::InvalidInput(
                "multisig threshold must be positive".into(),
            ));
        }
        if threshold as usize > keys.len() {
            return Err(Error::InvalidInput(format!(
                "multisig threshold {} exceeds key count {}",
                threshold,
                keys.len()
            )));
        }
        Ok(Self { threshold, keys })
    }

    /// Returns the number of participants required to sign.
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Returns the participant keys in their fixed order.
    pub fn keys(&self) -> &[PublicKey] {
        &self.keys
    }
}

/// Signature material attached to a transaction.
#[derive(Clone, Debug, PartialEq)]
pub enum SignatureData {
    /// One signature produced under one sign mode.
    Single {
        /// Mode the sign bytes were derived under.
        mode: SignMode,
        /// Raw 64-byte signature.
        signature: Bytes,
    },
    /// A threshold multisignature.
    ///
    /// Bit `i` of `bitarray` marks whether participant `i` signed;
    /// `signatures` holds the nested signatures of the participants whose
    /// bit is set, in ascending participant order.
    Multi {
        bitarray: BitArray,
        signatures: Vec<SignatureData>,
    },
}

/// Per-signer context the sign-bytes derivation depends on.
#[derive(Clone, Debug)]
pub struct SignerData {
    /// Chain the transaction is bound to.
    pub chain_id: String,
    /// Account number of the signer on that chain.
    pub account_number: u64,
    /// Expected sequence (replay counter) of the signer.
    pub sequence: u64,
    /// Bech32-encoded address of the signer.
    pub address: String,
    /// Key the signature is checked against.
    pub public_key: PublicKey,
}

/// Opaque transaction payload handed to the sign-bytes provider.
#[derive(Clone, Debug, PartialEq)]
pub struct TxData(Bytes);

impl TxData {
    pub fn new(data: Bytes) -> Self {
        Self(data)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for TxData {
    fn from(data: Vec<u8>) -> Self {
        Self(Bytes::from(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainkit_cryptography::{PrivateKeyExt, Signer};

    fn participant(seed: u64) -> PublicKey {
        PublicKey::Secp256k1(secp256k1::PrivateKey::from_seed(seed).public_key())
    }

    #[test]
    fn test_multisig_key_valid() {
        let key = MultisigKey::new(2, vec![participant(0), participant(1), participant(2)])
            .expect("2-of-3 is valid");
        assert_eq!(key.threshold(), 2);
        assert_eq!(key.keys().len(), 3);
    }

    #[test]
    fn test_multisig_key_zero_threshold() {
        let result = MultisigKey::new(0, vec![participant(0)]);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_multisig_key_threshold_exceeds_keys() {
        let result = MultisigKey::new(3, vec![participant(0), participant(1)]);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_tx_data_round_trip() {
        let tx = TxData::from(b"transfer 10 tokens".to_vec());
        assert_eq!(tx.as_bytes(), b"transfer 10 tokens");
    }
}
