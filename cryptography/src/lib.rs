//! Sign arbitrary messages and deterministically verify signatures.
//!
//! Schemes expose concrete `PrivateKey`, `PublicKey`, and `Signature` types
//! and implement the [Signer] and [Verifier] traits so embedding systems can
//! swap the curve implementation (or a deterministic fake) at the seam.

use rand::{CryptoRng, Rng, SeedableRng};
use thiserror::Error;

pub mod secp256k1;

/// Errors that can occur when working with keys and signatures.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("invalid private key length")]
    InvalidPrivateKeyLength,
    #[error("invalid private key")]
    InvalidPrivateKey,
    #[error("invalid public key length")]
    InvalidPublicKeyLength,
    #[error("invalid public key")]
    InvalidPublicKey,
    #[error("invalid signature length")]
    InvalidSignatureLength,
}

/// Produces [Signature]s over messages that can be verified with a
/// corresponding [Verifier].
pub trait Signer: Clone + Send + Sync + 'static {
    /// The type of [Signature] produced by this [Signer].
    type Signature: Signature;

    /// The corresponding public key type.
    type PublicKey: Verifier<Signature = Self::Signature>;

    /// Returns the public key corresponding to this [Signer].
    fn public_key(&self) -> Self::PublicKey;

    /// Sign a message.
    ///
    /// The message should not be hashed prior to calling this function. If a
    /// particular scheme requires a payload to be hashed before it is signed,
    /// it will be done internally.
    fn sign(&self, message: &[u8]) -> Self::Signature;
}

/// Verifies [Signature]s over messages.
pub trait Verifier {
    /// The type of [Signature] that this verifier can verify.
    type Signature: Signature;

    /// Verify that a [Signature] is valid over a given message.
    ///
    /// The message should not be hashed prior to calling this function. If a
    /// particular scheme requires a payload to be hashed before it is
    /// verified, it will be done internally.
    fn verify(&self, message: &[u8], signature: &Self::Signature) -> bool;
}

/// A [Signer] that can be generated from a seed or RNG.
pub trait PrivateKeyExt: Signer + Sized {
    /// Create a [Signer] from a seed.
    ///
    /// # Warning
    ///
    /// This function is insecure and should only be used for examples
    /// and testing.
    fn from_seed(seed: u64) -> Self {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        Self::from_rng(&mut rng)
    }

    /// Create a fresh [Signer] using the supplied RNG.
    fn from_rng<R: Rng + CryptoRng>(rng: &mut R) -> Self;
}

/// A [Signature] over a message.
pub trait Signature: Clone + Sized + PartialEq + AsRef<[u8]> + std::fmt::Debug {}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_sign_and_verify<C: PrivateKeyExt>() {
        let private_key = C::from_seed(0);
        let message = b"test_message";
        let signature = private_key.sign(message);
        let public_key = private_key.public_key();
        assert!(public_key.verify(message, &signature));
    }

    fn test_sign_and_verify_wrong_message<C: PrivateKeyExt>() {
        let private_key = C::from_seed(0);
        let message = b"test_message";
        let wrong_message = b"wrong_message";
        let signature = private_key.sign(message);
        let public_key = private_key.public_key();
        assert!(!public_key.verify(wrong_message, &signature));
    }

    fn test_signature_determinism<C: PrivateKeyExt>() {
        let private_key_1 = C::from_seed(0);
        let private_key_2 = C::from_seed(0);
        let message = b"test_message";
        let signature_1 = private_key_1.sign(message);
        let signature_2 = private_key_2.sign(message);
        assert_eq!(signature_1, signature_2);
    }

    fn test_invalid_signature_publickey_pair<C: PrivateKeyExt>() {
        let private_key = C::from_seed(0);
        let private_key_2 = C::from_seed(1);
        let message = b"test_message";
        let signature = private_key.sign(message);
        let public_key = private_key_2.public_key();
        assert!(!public_key.verify(message, &signature));
    }

    #[test]
    fn test_secp256k1_sign_and_verify() {
        test_sign_and_verify::<secp256k1::PrivateKey>();
    }

    #[test]
    fn test_secp256k1_sign_and_verify_wrong_message() {
        test_sign_and_verify_wrong_message::<secp256k1::PrivateKey>();
    }

    #[test]
    fn test_secp256k1_signature_determinism() {
        test_signature_determinism::<secp256k1::PrivateKey>();
    }

    #[test]
    fn test_secp256k1_invalid_signature_publickey_pair() {
        test_invalid_signature_publickey_pair::<secp256k1::PrivateKey>();
    }

    #[test]
    fn test_secp256k1_len() {
        assert_eq!(secp256k1::PUBLIC_KEY_LENGTH, 33);
        assert_eq!(secp256k1::SIGNATURE_LENGTH, 64);
    }
}
