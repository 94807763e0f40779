//! Floating-point rounding mode support.
//!
//! The five IEEE 754 rounding directions, numbered as in the RISC-V `frm` field:
//!
//! | Value | Mode | Description                             |
//! |-------|------|-----------------------------------------|
//! | 0b000 | RNE  | Round to Nearest, ties to Even          |
//! | 0b001 | RTZ  | Round towards Zero                      |
//! | 0b010 | RDN  | Round Down (towards −∞)                 |
//! | 0b011 | RUP  | Round Up (towards +∞)                   |
//! | 0b100 | RMM  | Round to Nearest, ties to Max Magnitude |
//!
//! Rounding is performed on integer significands: [`round_shift`] drops the low
//! bits of a significand and decides from the guard and sticky bits whether
//! the kept part is incremented.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::ConfigError;

/// IEEE 754 rounding direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum RoundingMode {
    /// Round to Nearest, ties to Even (default IEEE mode).
    #[default]
    #[serde(alias = "nearest-even")]
    Rne = 0b000,
    /// Round towards Zero.
    #[serde(alias = "toward-zero")]
    Rtz = 0b001,
    /// Round Down (towards −∞).
    #[serde(alias = "downward")]
    Rdn = 0b010,
    /// Round Up (towards +∞).
    #[serde(alias = "upward")]
    Rup = 0b011,
    /// Round to Nearest, ties to Max Magnitude.
    #[serde(alias = "nearest-away")]
    Rmm = 0b100,
}

impl RoundingMode {
    /// Every mode in encoding order.
    pub const ALL: [Self; 5] = [Self::Rne, Self::Rtz, Self::Rdn, Self::Rup, Self::Rmm];

    /// Decodes a 3-bit rounding mode field.
    ///
    /// Returns `None` for reserved encodings (0b101, 0b110) and the dynamic
    /// sentinel (0b111), which the caller must resolve to a concrete mode.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits & 0x7 {
            0b000 => Some(Self::Rne),
            0b001 => Some(Self::Rtz),
            0b010 => Some(Self::Rdn),
            0b011 => Some(Self::Rup),
            0b100 => Some(Self::Rmm),
            _ => None,
        }
    }

    /// Lowercase mnemonic.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rne => "rne",
            Self::Rtz => "rtz",
            Self::Rdn => "rdn",
            Self::Rup => "rup",
            Self::Rmm => "rmm",
        }
    }

    /// Whether a magnitude that overflows the destination becomes infinity.
    ///
    /// Modes that round toward zero for this sign saturate to the largest
    /// finite magnitude instead.
    #[inline(always)]
    pub const fn overflows_to_infinity(self, negative: bool) -> bool {
        match self {
            Self::Rne | Self::Rmm => true,
            Self::Rtz => false,
            Self::Rdn => negative,
            Self::Rup => !negative,
        }
    }

    /// Decides whether to increment a truncated significand.
    ///
    /// `guard` is the most significant discarded bit, `sticky` is the OR of
    /// every discarded bit below it, and `odd` is the low bit of the kept part.
    #[inline(always)]
    pub const fn rounds_up(self, negative: bool, odd: bool, guard: bool, sticky: bool) -> bool {
        match self {
            Self::Rne => guard && (sticky || odd),
            Self::Rmm => guard,
            Self::Rtz => false,
            Self::Rdn => negative && (guard || sticky),
            Self::Rup => !negative && (guard || sticky),
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RoundingMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rne" | "nearest-even" => Ok(Self::Rne),
            "rtz" | "toward-zero" => Ok(Self::Rtz),
            "rdn" | "downward" => Ok(Self::Rdn),
            "rup" | "upward" => Ok(Self::Rup),
            "rmm" | "nearest-away" => Ok(Self::Rmm),
            _ => Err(ConfigError::UnknownRoundingMode(s.to_string())),
        }
    }
}

/// Outcome of dropping the low bits of a significand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rounded {
    /// The kept significand after any increment. May carry into one extra bit.
    pub significand: u128,
    /// Whether any discarded bit was set.
    pub inexact: bool,
}

/// Shifts `significand` right by `shift` bits and rounds per `mode`.
///
/// Shifts past bit 127 leave no kept bits; everything discarded feeds the
/// guard and sticky bits.
#[inline(always)]
pub const fn round_shift(significand: u128, shift: u32, negative: bool, mode: RoundingMode) -> Rounded {
    if shift == 0 {
        return Rounded {
            significand,
            inexact: false,
        };
    }
    let (kept, guard, sticky) = if shift > 128 {
        (0, false, significand != 0)
    } else if shift == 128 {
        (0, significand >> 127 != 0, significand << 1 != 0)
    } else {
        let guard_bit = 1u128 << (shift - 1);
        (
            significand >> shift,
            (significand & guard_bit) != 0,
            (significand & (guard_bit - 1)) != 0,
        )
    };
    let up = mode.rounds_up(negative, (kept & 1) != 0, guard, sticky);
    Rounded {
        significand: if up { kept + 1 } else { kept },
        inexact: guard || sticky,
    }
}
