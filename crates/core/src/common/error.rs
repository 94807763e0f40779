//! Error definitions for the fallible edges of the crate.
//!
//! The conversion kernel itself is total and never fails. Errors only arise where
//! untrusted input enters the crate:
//! 1. **Format descriptors:** Custom exponent/mantissa layouts that cannot be encoded.
//! 2. **Configuration:** JSON documents and files describing a conversion.
//! 3. **Names:** Format and rounding mode names given on the command line.

use thiserror::Error;

/// Reasons a floating-point format descriptor is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The exponent field is outside the supported range.
    ///
    /// At least two bits are needed to distinguish zero/subnormal, normal, and
    /// infinity/NaN encodings; more than fifteen would overflow the signed
    /// exponent arithmetic used by the kernel.
    #[error("exponent field of {0} bits is outside the supported range 2..=15")]
    ExponentBits(u32),

    /// The mantissa (fraction) field is empty.
    #[error("mantissa field must hold at least one bit")]
    EmptyMantissa,

    /// The encoding does not fit into a 128-bit pattern.
    #[error("format needs {0} storage bits, the maximum is 128")]
    TooWide(u32),

    /// A format name did not match any entry in the catalogue.
    #[error("unknown floating-point format `{0}`")]
    UnknownName(String),
}

/// Errors produced while loading a conversion configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON or does not match the expected shape.
    #[error("invalid configuration document: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("cannot read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// A custom format in the document is not encodable.
    #[error("invalid {role} format: {source}")]
    Format {
        /// Which side of the conversion the format describes (`source` or `destination`).
        role: &'static str,
        /// The underlying descriptor error.
        source: FormatError,
    },

    /// A rounding mode name did not match any known mode.
    #[error("unknown rounding mode `{0}`")]
    UnknownRoundingMode(String),
}
