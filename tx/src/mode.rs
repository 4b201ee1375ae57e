//! Bidirectional registry between the wire sign-mode enumeration and the
//! internal one.
//!
//! The two enumerations must be kept in lock-step: adding a mode requires
//! updating both conversion tables here and the dispatch in
//! [crate::verify_tx_signature] together.

use crate::Error;
use std::fmt::{self, Display};

/// Internal sign-mode enumeration.
///
/// A sign mode names the strategy used to derive the canonical bytes-to-sign
/// from a transaction, letting multiple signing conventions coexist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SignMode {
    /// Placeholder for an undeclared mode; always rejected.
    Unspecified,
    /// Structured binary sign bytes.
    Direct,
    /// Human-readable textual sign bytes.
    Textual,
    /// Structured binary sign bytes for auxiliary signers.
    DirectAux,
    /// Legacy JSON sign bytes.
    LegacyAminoJson,
    /// Ethereum personal-message (EIP-191) sign bytes.
    Eip191,
}

impl SignMode {
    /// Converts to the wire representation.
    ///
    /// Fails with [Error::UnsupportedSignMode] for anything outside the five
    /// recognized modes, including explicit [SignMode::Unspecified].
    pub fn to_wire(self) -> Result<WireSignMode, Error> {
        match self {
            SignMode::Direct => Ok(WireSignMode::Direct),
            SignMode::Textual => Ok(WireSignMode::Textual),
            SignMode::DirectAux => Ok(WireSignMode::DirectAux),
            SignMode::LegacyAminoJson => Ok(WireSignMode::LegacyAminoJson),
            SignMode::Eip191 => Ok(WireSignMode::Eip191),
            SignMode::Unspecified => Err(Error::UnsupportedSignMode(self.to_string())),
        }
    }
}

impl Display for SignMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SignMode::Unspecified => "SIGN_MODE_UNSPECIFIED",
            SignMode::Direct => "SIGN_MODE_DIRECT",
            SignMode::Textual => "SIGN_MODE_TEXTUAL",
            SignMode::DirectAux => "SIGN_MODE_DIRECT_AUX",
            SignMode::LegacyAminoJson => "SIGN_MODE_LEGACY_AMINO_JSON",
            SignMode::Eip191 => "SIGN_MODE_EIP_191",
        };
        name.fmt(f)
    }
}

/// Wire sign-mode enumeration.
///
/// The numeric values appear in persisted and transmitted transactions and
/// must never change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum WireSignMode {
    Unspecified = 0,
    Direct = 1,
    Textual = 2,
    DirectAux = 3,
    LegacyAminoJson = 127,
    Eip191 = 191,
}

impl WireSignMode {
    /// Converts to the internal representation.
    ///
    /// Fails with [Error::UnsupportedSignMode] for anything outside the five
    /// recognized modes, including explicit [WireSignMode::Unspecified].
    pub fn to_internal(self) -> Result<SignMode, Error> {
        match self {
            WireSignMode::Direct => Ok(SignMode::Direct),
            WireSignMode::Textual => Ok(SignMode::Textual),
            WireSignMode::DirectAux => Ok(SignMode::DirectAux),
            WireSignMode::LegacyAminoJson => Ok(SignMode::LegacyAminoJson),
            WireSignMode::Eip191 => Ok(SignMode::Eip191),
            WireSignMode::Unspecified => Err(Error::UnsupportedSignMode(self.to_string())),
        }
    }

    /// Returns the numeric wire value.
    pub const fn value(self) -> i32 {
        self as i32
    }
}

impl Display for WireSignMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WireSignMode::Unspecified => "SIGN_MODE_UNSPECIFIED",
            WireSignMode::Direct => "SIGN_MODE_DIRECT",
            WireSignMode::Textual => "SIGN_MODE_TEXTUAL",
            WireSignMode::DirectAux => "SIGN_MODE_DIRECT_AUX",
            WireSignMode::LegacyAminoJson => "SIGN_MODE_LEGACY_AMINO_JSON",
            WireSignMode::Eip191 => "SIGN_MODE_EIP_191",
        };
        name.fmt(f)
    }
}

impl TryFrom<i32> for WireSignMode {
    type Error = Error;
    fn try_from(value: i32) -> Result<Self, Error> {
        match value {
            0 => Ok(WireSignMode::Unspecified),
            1 => Ok(WireSignMode::Direct),
            2 => Ok(WireSignMode::Textual),
            3 => Ok(WireSignMode::DirectAux),
            127 => Ok(WireSignMode::LegacyAminoJson),
            191 => Ok(WireSignMode::Eip191),
            other => Err(Error::UnsupportedSignMode(other.to_string())),
        }
    }
}

/// Converts a slice of wire sign modes to internal modes, failing on the
/// first unsupported value.
pub fn modes_to_internal(modes: &[WireSignMode]) -> Result<Vec<SignMode>, Error> {
    modes.iter().map(|mode| mode.to_internal()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    const RECOGNIZED: [SignMode; 5] = [
        SignMode::Direct,
        SignMode::Textual,
        SignMode::DirectAux,
        SignMode::LegacyAminoJson,
        SignMode::Eip191,
    ];

    #[test]
    fn test_round_trip() {
        for mode in RECOGNIZED {
            assert_eq!(mode.to_wire().unwrap().to_internal().unwrap(), mode);
        }
    }

    #[test]
    fn test_unspecified_rejected_both_directions() {
        assert!(matches!(
            SignMode::Unspecified.to_wire(),
            Err(Error::UnsupportedSignMode(name)) if name == "SIGN_MODE_UNSPECIFIED"
        ));
        assert!(matches!(
            WireSignMode::Unspecified.to_internal(),
            Err(Error::UnsupportedSignMode(name)) if name == "SIGN_MODE_UNSPECIFIED"
        ));
    }

    #[test]
    fn test_wire_values_are_stable() {
        // Compatibility-critical: these values appear in persisted txs.
        assert_eq!(WireSignMode::Unspecified.value(), 0);
        assert_eq!(WireSignMode::Direct.value(), 1);
        assert_eq!(WireSignMode::Textual.value(), 2);
        assert_eq!(WireSignMode::DirectAux.value(), 3);
        assert_eq!(WireSignMode::LegacyAminoJson.value(), 127);
        assert_eq!(WireSignMode::Eip191.value(), 191);
    }

    #[test]
    fn test_wire_from_value() {
        for mode in RECOGNIZED {
            let wire = mode.to_wire().unwrap();
            assert_eq!(WireSignMode::try_from(wire.value()).unwrap(), wire);
        }
        assert!(matches!(
            WireSignMode::try_from(42),
            Err(Error::UnsupportedSignMode(value)) if value == "42"
        ));
    }

    #[test]
    fn test_modes_to_internal() {
        let wire = [WireSignMode::Direct, WireSignMode::Eip191];
        assert_eq!(
            modes_to_internal(&wire).unwrap(),
            vec![SignMode::Direct, SignMode::Eip191]
        );
        let with_unspecified = [WireSignMode::Direct, WireSignMode::Unspecified];
        assert!(matches!(
            modes_to_internal(&with_unspecified),
            Err(Error::UnsupportedSignMode(_))
        ));
    }
}
