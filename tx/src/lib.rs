//! Verify that a transaction carries valid cryptographic authorization from
//! its claimed signer(s).
//!
//! The entry point is [verify_tx_signature], which dispatches on the shape of
//! the attached [SignatureData]: a single signature is checked against the
//! canonical sign bytes for its declared [SignMode], while a threshold
//! multisignature recursively verifies every contributing sub-signature
//! (each under its own declared mode) and enforces the threshold. Sign bytes
//! are resolved by an externally supplied [SignBytesProvider]; the
//! transaction payload itself is an opaque [TxData] handle that is never
//! interpreted here.
//!
//! Every operation is a synchronous, side-effect-free function of its
//! arguments, safe to call concurrently without coordination.
//!
//! # Example
//! ```rust
//! use bytes::Bytes;
//! use chainkit_cryptography::{secp256k1, PrivateKeyExt, Signer as _};
//! use chainkit_tx::{
//!     verify_tx_signature, ProviderError, PublicKey, SignBytesProvider, SignMode,
//!     SignatureData, SignerData, TxData, WireSignMode,
//! };
//!
//! // A provider that derives sign bytes from the declared mode and payload.
//! struct Provider;
//! impl SignBytesProvider for Provider {
//!     fn sign_bytes(
//!         &self,
//!         mode: WireSignMode,
//!         _signer_data: &SignerData,
//!         tx_data: &TxData,
//!     ) -> Result<Bytes, ProviderError> {
//!         let mut bytes = mode.to_string().into_bytes();
//!         bytes.extend_from_slice(tx_data.as_bytes());
//!         Ok(Bytes::from(bytes))
//!     }
//! }
//!
//! let signer = secp256k1::PrivateKey::from_seed(0);
//! let signer_data = SignerData {
//!     chain_id: "demo-chain".to_string(),
//!     account_number: 1,
//!     sequence: 0,
//!     address: "demo1signer".to_string(),
//!     public_key: PublicKey::Secp256k1(signer.public_key()),
//! };
//! let tx_data = TxData::from(b"transfer 10 tokens".to_vec());
//!
//! // Sign the canonical sign bytes, not the raw payload.
//! let sign_bytes = Provider
//!     .sign_bytes(WireSignMode::Direct, &signer_data, &tx_data)
//!     .unwrap();
//! let signature = signer.sign(&sign_bytes);
//! let signature_data = SignatureData::Single {
//!     mode: SignMode::Direct,
//!     signature: Bytes::copy_from_slice(signature.as_ref()),
//! };
//!
//! verify_tx_signature(&Provider, &signer_data, &signature_data, &tx_data)
//!     .expect("signature should verify");
//! ```

use thiserror::Error;

mod data;
pub use data::{MultisigKey, PublicKey, SignatureData, SignerData, TxData};
mod mode;
pub use mode::{modes_to_internal, SignMode, WireSignMode};
mod verify;
pub use verify::{verify_tx_signature, SignBytesProvider, MAX_MULTISIG_DEPTH};

/// Failure reported by an external [SignBytesProvider].
pub type ProviderError = Box<dyn std::error::Error + Send + Sync>;

/// Failures produced while verifying a transaction signature.
///
/// All errors are terminal and non-retryable; there is no transient class.
/// Malformed attacker-supplied bytes always surface as one of these variants,
/// never as a panic.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed arguments (empty key sets, mismatched bit array size).
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Sign mode outside the recognized set, including explicit UNSPECIFIED.
    #[error("unsupported sign mode {0}")]
    UnsupportedSignMode(String),
    /// Public-key variant does not match the signature-data variant.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
    /// The cryptographic check failed; carries both sides for diagnosis.
    #[error("unable to verify signature {signature} for sign bytes {sign_bytes}")]
    VerificationFailed {
        signature: String,
        sign_bytes: String,
    },
    /// Multisig set-bit count below the declared threshold.
    #[error("threshold not met: {got} signature(s), {required} required")]
    ThresholdNotMet { required: usize, got: usize },
    /// Nested-signature count disagrees with the set-bit count.
    #[error("nested signature count {got} does not match set bit count {expected}")]
    StructuralMismatch { expected: usize, got: usize },
    /// The sign-bytes provider failed; propagated immediately, no retry.
    #[error("sign bytes provider failed: {0}")]
    Provider(ProviderError),
    /// Multisig-of-multisig configurations deeper than [MAX_MULTISIG_DEPTH].
    #[error("multisig nesting exceeds {0} levels")]
    NestingTooDeep(usize),
}
