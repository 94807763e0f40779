//! Parsing and printing of raw bit patterns.
//!
//! Values are accepted as hexadecimal (`0x3f80_0000`), binary (`0b...`), or
//! decimal integers and are always printed as zero-padded hexadecimal sized to
//! the format width.

use fptrunc_core::FloatFormat;
use fptrunc_core::common::EncodedValue;
use thiserror::Error;

/// Errors for bit patterns given on the command line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    /// The text is not an integer literal.
    #[error("`{0}` is not a hexadecimal, binary, or decimal bit pattern")]
    Malformed(String),

    /// The value has bits set above the format width.
    #[error("`{text}` does not fit in the {width}-bit source format")]
    TooWide {
        /// The pattern as given.
        text: String,
        /// Width of the source format.
        width: u32,
    },
}

/// Parses one bit pattern for `format`.
pub fn parse(text: &str, format: &FloatFormat) -> Result<EncodedValue, PatternError> {
    let cleaned = text.replace('_', "");
    let lower = cleaned.to_ascii_lowercase();
    let parsed = if let Some(hex) = lower.strip_prefix("0x") {
        u128::from_str_radix(hex, 16)
    } else if let Some(bin) = lower.strip_prefix("0b") {
        u128::from_str_radix(bin, 2)
    } else {
        lower.parse::<u128>()
    };
    let bits = parsed.map_err(|_| PatternError::Malformed(text.to_string()))?;
    if (bits & !format.mask()) != 0 {
        return Err(PatternError::TooWide {
            text: text.to_string(),
            width: format.width(),
        });
    }
    Ok(bits)
}

/// Prints a pattern as hexadecimal with one digit per started nibble of the format.
pub fn render(bits: EncodedValue, format: &FloatFormat) -> String {
    let digits = format.width().div_ceil(4) as usize;
    format!("{bits:#0width$x}", width = digits + 2)
}
