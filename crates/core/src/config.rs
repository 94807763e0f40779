//! Conversion configuration.
//!
//! A conversion is described by a small JSON document:
//!
//! ```json
//! {
//!     "source": "double",
//!     "destination": { "exponent_bits": 4, "mantissa_bits": 3 },
//!     "rounding": "rtz",
//!     "nan_policy": "canonical"
//! }
//! ```
//!
//! Formats are either catalogue names (see [`FormatKind`]) or custom
//! descriptors. Every field is optional; [`ConvertConfig::default`] converts
//! single to half precision, rounding to nearest, ties to even.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::common::ConfigError;
use crate::format::{FloatFormat, FormatKind};
use crate::fpu::NarrowingConverter;
use crate::fpu::nan_handling::NanPolicy;
use crate::fpu::rounding_modes::RoundingMode;

/// Either a catalogue entry or a custom layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormatSpec {
    /// A named format such as `"half"` or `"x87"`.
    Named(FormatKind),
    /// An explicit exponent/mantissa layout.
    Custom(FloatFormat),
}

impl FormatSpec {
    /// Returns the validated descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Format`] if a custom layout cannot be encoded.
    pub fn resolve(&self, role: &'static str) -> Result<FloatFormat, ConfigError> {
        match *self {
            Self::Named(kind) => Ok(kind.format()),
            Self::Custom(format) => {
                format
                    .validate()
                    .map_err(|source| ConfigError::Format { role, source })?;
                Ok(format)
            }
        }
    }
}

impl From<FormatKind> for FormatSpec {
    fn from(kind: FormatKind) -> Self {
        Self::Named(kind)
    }
}

/// Settings for one conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// Format of the input encodings.
    #[serde(default = "ConvertConfig::default_source")]
    pub source: FormatSpec,

    /// Format of the output encodings.
    #[serde(default = "ConvertConfig::default_destination")]
    pub destination: FormatSpec,

    /// Rounding mode for inexact results.
    #[serde(default)]
    pub rounding: RoundingMode,

    /// Whether NaN payloads survive the conversion.
    #[serde(default)]
    pub nan_policy: NanPolicy,
}

impl ConvertConfig {
    fn default_source() -> FormatSpec {
        FormatSpec::Named(FormatKind::Single)
    }

    fn default_destination() -> FormatSpec {
        FormatSpec::Named(FormatKind::Half)
    }

    /// Parses a configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the document is malformed.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        debug!(?config, "parsed conversion config");
        Ok(config)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Json`] if its contents are malformed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading conversion config");
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Validates the formats and builds a converter.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Format`] if a custom layout cannot be encoded.
    pub fn build(&self) -> Result<NarrowingConverter, ConfigError> {
        let source = self.source.resolve("source")?;
        let destination = self.destination.resolve("destination")?;
        if source == destination {
            warn!(%source, "source and destination formats are identical");
        } else if source.mantissa_bits() <= destination.mantissa_bits()
            && source.exponent_bits() <= destination.exponent_bits()
        {
            debug!(%source, %destination, "widening conversion, results are exact");
        }
        Ok(NarrowingConverter::new(source, destination)
            .with_rounding(self.rounding)
            .with_nan_policy(self.nan_policy))
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            source: Self::default_source(),
            destination: Self::default_destination(),
            rounding: RoundingMode::default(),
            nan_policy: NanPolicy::default(),
        }
    }
}
