//! Secp256k1 implementation of the [crate::Signer] and [crate::Verifier] traits.
//!
//! This implementation operates over public keys in compressed form (SEC 1, Version 2.0,
//! Section 2.3.3) and generates deterministic signatures over SHA-256 digests as specified in
//! [RFC 6979](https://datatracker.ietf.org/doc/html/rfc6979). Signatures are the 64-byte
//! `R || S` form (big-endian scalars, no recovery identifier) and are enforced to be normalized
//! according to [BIP 62](https://github.com/bitcoin/bips/blob/master/bip-0062.mediawiki#low-s-values-in-signatures):
//! any signature with an `S` value in the upper half of the curve order is rejected at
//! verification, so the `(r, s)`/`(r, order - s)` malleability pair can never both verify.
//!
//! A second verification path, [PublicKey::verify_signature_eip191], hashes the message with
//! Keccak-256 for interoperability with externally produced personal-message signatures and
//! additionally requires the parsed signature to survive a DER round trip unchanged, rejecting
//! alternate encodings of the same logical signature.
//!
//! # Example
//! ```rust
//! use chainkit_cryptography::{secp256k1, PrivateKeyExt, Signer, Verifier};
//!
//! // Generate a new private key
//! let signer = secp256k1::PrivateKey::from_seed(0);
//!
//! // Create a message to sign
//! let msg = b"hello, world!";
//!
//! // Sign the message
//! let signature = signer.sign(msg);
//!
//! // Verify the signature
//! assert!(signer.public_key().verify(msg, &signature));
//! ```

use crate::Error;
use chainkit_utils::hex;
use k256::{
    ecdsa::{
        signature::{DigestSigner, DigestVerifier},
        Signature as CurveSignature, SigningKey, VerifyingKey,
    },
    elliptic_curve::scalar::IsHigh,
};
use rand::{CryptoRng, Rng};
use sha2::{Digest, Sha256};
use sha3::Keccak256;
use std::fmt::{Debug, Display};
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of a private key scalar in bytes.
pub const PRIVATE_KEY_LENGTH: usize = 32;

/// Length of a compressed public key in bytes (Y-Parity || X).
pub const PUBLIC_KEY_LENGTH: usize = 33;

/// Length of a raw signature in bytes (R || S).
pub const SIGNATURE_LENGTH: usize = 64;

/// Secp256k1 private key.
///
/// Key material is zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    raw: [u8; PRIVATE_KEY_LENGTH],
    #[zeroize(skip)]
    key: SigningKey,
}

impl PrivateKey {
    /// Signs `SHA-256(message)` with a deterministic (RFC 6979) nonce.
    ///
    /// The returned signature is the 64-byte `R || S` form in canonical low-S
    /// encoding.
    pub fn sign(&self, message: &[u8]) -> Signature {
        let signature: CurveSignature = self.key.sign_digest(Sha256::new_with_prefix(message));
        // The library already emits low-S signatures; normalize anyway so the
        // canonical invariant never rests on library internals.
        let signature = signature.normalize_s().unwrap_or(signature);
        Signature::from(signature)
    }
}

impl crate::Signer for PrivateKey {
    type Signature = Signature;
    type PublicKey = PublicKey;

    fn public_key(&self) -> PublicKey {
        PublicKey::from(*self.key.verifying_key())
    }

    fn sign(&self, message: &[u8]) -> Signature {
        self.sign(message)
    }
}

impl crate::PrivateKeyExt for PrivateKey {
    fn from_rng<R: Rng + CryptoRng>(rng: &mut R) -> Self {
        Self::from(SigningKey::random(rng))
    }
}

impl From<SigningKey> for PrivateKey {
    fn from(key: SigningKey) -> Self {
        let mut raw = [0u8; PRIVATE_KEY_LENGTH];
        raw.copy_from_slice(key.to_bytes().as_slice());
        Self { raw, key }
    }
}

impl TryFrom<&[u8]> for PrivateKey {
    type Error = Error;
    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let raw: [u8; PRIVATE_KEY_LENGTH] = value
            .try_into()
            .map_err(|_| Error::InvalidPrivateKeyLength)?;
        let key = SigningKey::from_slice(&raw).map_err(|_| Error::InvalidPrivateKey)?;
        Ok(Self { raw, key })
    }
}

impl TryFrom<Vec<u8>> for PrivateKey {
    type Error = Error;
    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from(value.as_slice())
    }
}

impl Eq for PrivateKey {}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl AsRef<[u8]> for PrivateKey {
    fn as_ref(&self) -> &[u8] {
        &self.raw
    }
}

impl Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.raw))
    }
}

impl Display for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.raw))
    }
}

/// Secp256k1 public key (compressed SEC 1 point).
#[derive(Clone, Eq, PartialEq)]
pub struct PublicKey {
    raw: [u8; PUBLIC_KEY_LENGTH],
    key: VerifyingKey,
}

impl PublicKey {
    /// Verifies a signature of the form `R || S` against `SHA-256(message)`.
    ///
    /// Returns false (never panics) for a signature that is not exactly
    /// 64 bytes, fails to parse, or is not in lower-S form.
    pub fn verify_signature(&self, message: &[u8], signature: &[u8]) -> bool {
        let Some(signature) = signature_from_bytes(signature) else {
            return false;
        };
        self.key
            .verify_digest(Sha256::new_with_prefix(message), &signature)
            .is_ok()
    }

    /// Verifies a signature of the form `R || S` against `Keccak-256(message)`.
    ///
    /// In addition to rejecting non-lower-S signatures, the parsed signature
    /// is serialized to DER and re-parsed; any structural divergence from the
    /// original is rejected. This keeps alternate encodings of the same
    /// logical signature from slipping past a bare low-S check.
    pub fn verify_signature_eip191(&self, message: &[u8], signature: &[u8]) -> bool {
        let Some(signature) = signature_from_bytes(signature) else {
            return false;
        };
        let der = signature.to_der();
        let Ok(reparsed) = CurveSignature::from_der(der.as_bytes()) else {
            return false;
        };
        if reparsed != signature {
            return false;
        }
        self.key
            .verify_digest(Keccak256::new_with_prefix(message), &signature)
            .is_ok()
    }
}

impl crate::Verifier for PublicKey {
    type Signature = Signature;

    fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        self.verify_signature(message, signature.as_ref())
    }
}

impl From<VerifyingKey> for PublicKey {
    fn from(key: VerifyingKey) -> Self {
        let mut raw = [0u8; PUBLIC_KEY_LENGTH];
        raw.copy_from_slice(key.to_encoded_point(true).as_bytes());
        Self { raw, key }
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = Error;
    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let raw: [u8; PUBLIC_KEY_LENGTH] =
            value.try_into().map_err(|_| Error::InvalidPublicKeyLength)?;
        let key = VerifyingKey::from_sec1_bytes(&raw).map_err(|_| Error::InvalidPublicKey)?;
        Ok(Self { raw, key })
    }
}

impl TryFrom<Vec<u8>> for PublicKey {
    type Error = Error;
    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from(value.as_slice())
    }
}

impl Hash for PublicKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl Ord for PublicKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl PartialOrd for PublicKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.raw
    }
}

impl Deref for PublicKey {
    type Target = [u8];
    fn deref(&self) -> &[u8] {
        &self.raw
    }
}

impl Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.raw))
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.raw))
    }
}

/// Secp256k1 signature in raw `R || S` form.
///
/// Construction only checks length; canonicality (lower-S) is enforced at
/// verification time.
#[derive(Clone, Eq, PartialEq)]
pub struct Signature {
    raw: [u8; SIGNATURE_LENGTH],
}

impl crate::Signature for Signature {}

impl From<CurveSignature> for Signature {
    fn from(value: CurveSignature) -> Self {
        let mut raw = [0u8; SIGNATURE_LENGTH];
        raw.copy_from_slice(value.to_bytes().as_slice());
        Self { raw }
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = Error;
    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let raw: [u8; SIGNATURE_LENGTH] = value
            .try_into()
            .map_err(|_| Error::InvalidSignatureLength)?;
        Ok(Self { raw })
    }
}

impl TryFrom<Vec<u8>> for Signature {
    type Error = Error;
    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from(value.as_slice())
    }
}

impl Hash for Signature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.raw
    }
}

impl Deref for Signature {
    type Target = [u8];
    fn deref(&self) -> &[u8] {
        &self.raw
    }
}

impl Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.raw))
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.raw))
    }
}

/// Parses a signature from `R || S`, rejecting signatures that are not in
/// lower-S form.
fn signature_from_bytes(signature: &[u8]) -> Option<CurveSignature> {
    let raw: [u8; SIGNATURE_LENGTH] = signature.try_into().ok()?;
    let signature = CurveSignature::from_slice(&raw).ok()?;
    if signature.s().is_high().into() {
        return None;
    }
    Some(signature)
}
