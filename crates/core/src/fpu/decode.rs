//! Field extraction and classification of encoded values.

use crate::common::EncodedValue;
use crate::format::FloatFormat;

/// IEEE 754 class of an encoded value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FpClass {
    /// Positive or negative zero.
    Zero,
    /// Nonzero value below the normal range.
    Subnormal,
    /// Finite value in the normal range.
    Normal,
    /// Positive or negative infinity.
    Infinite,
    /// NaN with the quiet bit set.
    QuietNan,
    /// NaN with the quiet bit clear.
    SignalingNan,
    /// An x87 encoding the hardware rejects as an operand: pseudo-NaN,
    /// pseudo-infinity, or an unnormal (nonzero exponent, integer bit clear).
    Invalid,
}

impl FpClass {
    /// Whether the class is a quiet or signaling NaN.
    pub const fn is_nan(self) -> bool {
        matches!(self, Self::QuietNan | Self::SignalingNan)
    }

    /// Whether the class denotes a finite nonzero number.
    pub const fn is_finite_nonzero(self) -> bool {
        matches!(self, Self::Normal | Self::Subnormal)
    }
}

/// Sign, exponent, and significand fields of one encoded value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedComponents {
    /// Sign bit.
    pub negative: bool,
    /// Raw biased exponent field.
    pub biased_exponent: u32,
    /// Stored fraction field, without the leading bit.
    pub fraction: EncodedValue,
    /// Leading significand bit: stored for explicit formats, implied by a
    /// nonzero exponent otherwise.
    pub integer_bit: bool,
}

impl DecodedComponents {
    /// Splits `bits` into its fields; bits above the format width are ignored.
    #[inline(always)]
    pub const fn decode(bits: EncodedValue, format: &FloatFormat) -> Self {
        let bits = bits & format.mask();
        let biased_exponent = ((bits & format.exponent_mask()) >> format.exponent_shift()) as u32;
        let integer_bit = if format.explicit_leading_bit() {
            (bits & format.integer_bit()) != 0
        } else {
            biased_exponent != 0
        };
        Self {
            negative: (bits & format.sign_mask()) != 0,
            biased_exponent,
            fraction: bits & format.fraction_mask(),
            integer_bit,
        }
    }

    /// Classifies the value.
    #[inline(always)]
    pub const fn classify(&self, format: &FloatFormat) -> FpClass {
        let max = format.max_biased_exponent();
        if self.biased_exponent == max {
            if format.explicit_leading_bit() && !self.integer_bit {
                FpClass::Invalid
            } else if self.fraction == 0 {
                FpClass::Infinite
            } else if (self.fraction & format.quiet_bit()) != 0 {
                FpClass::QuietNan
            } else {
                FpClass::SignalingNan
            }
        } else if self.biased_exponent == 0 {
            if self.fraction == 0 && !self.integer_bit {
                FpClass::Zero
            } else {
                // Pseudo-denormals (integer bit set) land here as well.
                FpClass::Subnormal
            }
        } else if !self.integer_bit {
            FpClass::Invalid
        } else {
            FpClass::Normal
        }
    }

    /// Full significand including the leading bit.
    #[inline(always)]
    pub const fn significand(&self, format: &FloatFormat) -> u128 {
        if self.integer_bit {
            format.integer_bit() | self.fraction
        } else {
            self.fraction
        }
    }

    /// Biased exponent with subnormals mapped onto the minimum normal exponent.
    ///
    /// The encoded magnitude is `significand * 2^(effective_exponent - bias - mantissa_bits)`.
    #[inline(always)]
    pub const fn effective_exponent(&self) -> i32 {
        if self.biased_exponent == 0 {
            1
        } else {
            self.biased_exponent as i32
        }
    }
}
