//! Floating-point format descriptors.
//!
//! A [`FloatFormat`] describes one binary interchange-style encoding: a sign bit,
//! a biased exponent field, and a fraction field, optionally preceded by an
//! explicit leading (integer) significand bit as in the x87 80-bit format.
//!
//! | Format   | Width | Exponent | Fraction | Leading bit |
//! |----------|-------|----------|----------|-------------|
//! | HALF     | 16    | 5        | 10       | implicit    |
//! | BFLOAT16 | 16    | 8        | 7        | implicit    |
//! | SINGLE   | 32    | 8        | 23       | implicit    |
//! | DOUBLE   | 64    | 11       | 52       | implicit    |
//! | EXTENDED | 80    | 15       | 63       | explicit    |
//! | QUAD     | 128   | 15       | 112      | implicit    |
//!
//! Descriptors are plain `Copy` values with `const fn` accessors so that the
//! kernel folds them away when instantiated through the [`Format`] marker types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::{BitPattern, EncodedValue, FormatError};

/// Layout of a binary floating-point encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FloatFormat {
    exponent_bits: u32,
    mantissa_bits: u32,
    #[serde(default)]
    explicit_leading_bit: bool,
}

impl FloatFormat {
    /// IEEE 754 binary16.
    pub const HALF: Self = Self::ieee(5, 10);
    /// Brain floating point: binary32 with the fraction cut to 7 bits.
    pub const BFLOAT16: Self = Self::ieee(8, 7);
    /// IEEE 754 binary32.
    pub const SINGLE: Self = Self::ieee(8, 23);
    /// IEEE 754 binary64.
    pub const DOUBLE: Self = Self::ieee(11, 52);
    /// x87 80-bit extended precision with an explicit integer bit.
    pub const EXTENDED: Self = Self {
        exponent_bits: 15,
        mantissa_bits: 63,
        explicit_leading_bit: true,
    };
    /// IEEE 754 binary128.
    pub const QUAD: Self = Self::ieee(15, 112);

    const fn ieee(exponent_bits: u32, mantissa_bits: u32) -> Self {
        Self {
            exponent_bits,
            mantissa_bits,
            explicit_leading_bit: false,
        }
    }

    /// Creates a validated format descriptor.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] if the exponent field is not 2..=15 bits wide,
    /// the fraction field is empty, or the encoding exceeds 128 bits.
    pub fn new(
        exponent_bits: u32,
        mantissa_bits: u32,
        explicit_leading_bit: bool,
    ) -> Result<Self, FormatError> {
        let format = Self {
            exponent_bits,
            mantissa_bits,
            explicit_leading_bit,
        };
        format.validate()?;
        Ok(format)
    }

    /// Checks that the descriptor can be handled by the kernel.
    ///
    /// # Errors
    ///
    /// See [`FloatFormat::new`].
    pub fn validate(&self) -> Result<(), FormatError> {
        if !(2..=15).contains(&self.exponent_bits) {
            return Err(FormatError::ExponentBits(self.exponent_bits));
        }
        if self.mantissa_bits == 0 {
            return Err(FormatError::EmptyMantissa);
        }
        let width = self
            .exponent_bits
            .saturating_add(self.mantissa_bits)
            .saturating_add(1 + self.explicit_leading_bit as u32);
        if width > 128 {
            return Err(FormatError::TooWide(width));
        }
        Ok(())
    }

    /// Whether [`FloatFormat::validate`] would accept the descriptor.
    ///
    /// Descriptors deserialized on their own skip validation; the dynamic
    /// kernel entry points assert this in debug builds.
    #[inline(always)]
    pub const fn is_encodable(&self) -> bool {
        self.exponent_bits >= 2
            && self.exponent_bits <= 15
            && self.mantissa_bits >= 1
            // Bounds the sum in `width()`.
            && self.mantissa_bits <= 126
            && self.width() <= 128
    }

    /// Width of the biased exponent field.
    #[inline(always)]
    pub const fn exponent_bits(&self) -> u32 {
        self.exponent_bits
    }

    /// Width of the stored fraction field, excluding any explicit leading bit.
    #[inline(always)]
    pub const fn mantissa_bits(&self) -> u32 {
        self.mantissa_bits
    }

    /// Whether the leading significand bit is stored (x87 extended) or implied.
    #[inline(always)]
    pub const fn explicit_leading_bit(&self) -> bool {
        self.explicit_leading_bit
    }

    /// Total storage width in bits.
    #[inline(always)]
    pub const fn width(&self) -> u32 {
        1 + self.exponent_bits + self.mantissa_bits + self.explicit_leading_bit as u32
    }

    /// Exponent bias, `2^(e-1) - 1`.
    #[inline(always)]
    pub const fn bias(&self) -> i32 {
        (1 << (self.exponent_bits - 1)) - 1
    }

    /// The all-ones biased exponent reserved for infinities and NaNs.
    #[inline(always)]
    pub const fn max_biased_exponent(&self) -> u32 {
        (1 << self.exponent_bits) - 1
    }

    /// Precision in bits, counting the leading significand bit.
    #[inline(always)]
    pub const fn significand_bits(&self) -> u32 {
        self.mantissa_bits + 1
    }

    /// Bit position of the lowest exponent bit.
    #[inline(always)]
    pub const fn exponent_shift(&self) -> u32 {
        self.mantissa_bits + self.explicit_leading_bit as u32
    }

    /// Mask covering every bit of the encoding.
    #[inline(always)]
    pub const fn mask(&self) -> EncodedValue {
        let width = self.width();
        if width >= 128 {
            u128::MAX
        } else {
            (1 << width) - 1
        }
    }

    /// Mask of the sign bit.
    #[inline(always)]
    pub const fn sign_mask(&self) -> EncodedValue {
        1 << (self.width() - 1)
    }

    /// Mask of the biased exponent field.
    #[inline(always)]
    pub const fn exponent_mask(&self) -> EncodedValue {
        (self.max_biased_exponent() as EncodedValue) << self.exponent_shift()
    }

    /// Mask of the stored fraction field.
    #[inline(always)]
    pub const fn fraction_mask(&self) -> EncodedValue {
        (1 << self.mantissa_bits) - 1
    }

    /// Position of the leading significand bit; stored only for explicit formats.
    #[inline(always)]
    pub const fn integer_bit(&self) -> EncodedValue {
        1 << self.mantissa_bits
    }

    /// Most significant fraction bit, which distinguishes quiet from signaling NaNs.
    #[inline(always)]
    pub const fn quiet_bit(&self) -> EncodedValue {
        1 << (self.mantissa_bits - 1)
    }

    /// Stored leading bit for normal encodings: the integer bit on explicit formats.
    #[inline(always)]
    pub(crate) const fn stored_integer_bit(&self) -> EncodedValue {
        if self.explicit_leading_bit {
            self.integer_bit()
        } else {
            0
        }
    }

    #[inline(always)]
    const fn sign(&self, negative: bool) -> EncodedValue {
        if negative { self.sign_mask() } else { 0 }
    }

    /// Signed zero.
    #[inline(always)]
    pub const fn zero(&self, negative: bool) -> EncodedValue {
        self.sign(negative)
    }

    /// Signed infinity.
    #[inline(always)]
    pub const fn infinity(&self, negative: bool) -> EncodedValue {
        self.sign(negative) | self.exponent_mask() | self.stored_integer_bit()
    }

    /// Signed largest finite magnitude.
    #[inline(always)]
    pub const fn max_finite(&self, negative: bool) -> EncodedValue {
        self.sign(negative)
            | (((self.max_biased_exponent() - 1) as EncodedValue) << self.exponent_shift())
            | self.stored_integer_bit()
            | self.fraction_mask()
    }

    /// Positive quiet NaN with an empty payload.
    #[inline(always)]
    pub const fn default_nan(&self) -> EncodedValue {
        self.exponent_mask() | self.stored_integer_bit() | self.quiet_bit()
    }

    /// Packs a sign, biased exponent, and stored fraction into an encoding.
    ///
    /// `fraction` must already fit the fraction field. For explicit formats the
    /// integer bit is set whenever `biased_exponent` is nonzero.
    #[inline(always)]
    pub const fn pack(&self, negative: bool, biased_exponent: u32, fraction: EncodedValue) -> EncodedValue {
        let integer = if self.explicit_leading_bit && biased_exponent != 0 {
            self.integer_bit()
        } else {
            0
        };
        self.sign(negative)
            | ((biased_exponent as EncodedValue) << self.exponent_shift())
            | integer
            | (fraction & self.fraction_mask())
    }
}

impl fmt::Display for FloatFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}{}",
            self.width(),
            self.exponent_bits,
            self.mantissa_bits,
            if self.explicit_leading_bit { " (explicit leading bit)" } else { "" }
        )
    }
}

/// Named entries of the format catalogue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    /// IEEE 754 binary16.
    #[serde(alias = "f16", alias = "binary16")]
    Half,
    /// bfloat16.
    #[serde(alias = "bf16")]
    BFloat16,
    /// IEEE 754 binary32.
    #[default]
    #[serde(alias = "f32", alias = "binary32")]
    Single,
    /// IEEE 754 binary64.
    #[serde(alias = "f64", alias = "binary64")]
    Double,
    /// x87 80-bit extended precision.
    #[serde(alias = "x87", alias = "f80")]
    Extended,
    /// IEEE 754 binary128.
    #[serde(alias = "f128", alias = "binary128")]
    Quad,
}

impl FormatKind {
    /// Every catalogue entry, narrowest first.
    pub const ALL: [Self; 6] = [
        Self::Half,
        Self::BFloat16,
        Self::Single,
        Self::Double,
        Self::Extended,
        Self::Quad,
    ];

    /// The descriptor for this entry.
    pub const fn format(self) -> FloatFormat {
        match self {
            Self::Half => FloatFormat::HALF,
            Self::BFloat16 => FloatFormat::BFLOAT16,
            Self::Single => FloatFormat::SINGLE,
            Self::Double => FloatFormat::DOUBLE,
            Self::Extended => FloatFormat::EXTENDED,
            Self::Quad => FloatFormat::QUAD,
        }
    }

    /// Canonical lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Half => "half",
            Self::BFloat16 => "bfloat16",
            Self::Single => "single",
            Self::Double => "double",
            Self::Extended => "extended",
            Self::Quad => "quad",
        }
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormatKind {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "half" | "f16" | "binary16" => Ok(Self::Half),
            "bfloat16" | "bf16" => Ok(Self::BFloat16),
            "single" | "f32" | "binary32" => Ok(Self::Single),
            "double" | "f64" | "binary64" => Ok(Self::Double),
            "extended" | "x87" | "f80" => Ok(Self::Extended),
            "quad" | "f128" | "binary128" => Ok(Self::Quad),
            _ => Err(FormatError::UnknownName(s.to_string())),
        }
    }
}

/// A format known at compile time, used to monomorphize the kernel per pair.
pub trait Format {
    /// Layout of the encoding.
    const FORMAT: FloatFormat;
    /// Smallest unsigned integer holding the encoding.
    type Bits: BitPattern;
}

macro_rules! marker_formats {
    ($($(#[$doc:meta])* $name:ident => $format:expr, $bits:ty;)*) => {
        $(
            $(#[$doc])*
            #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
            pub struct $name;

            impl Format for $name {
                const FORMAT: FloatFormat = $format;
                type Bits = $bits;
            }
        )*
    };
}

marker_formats! {
    /// Marker for [`FloatFormat::HALF`].
    Half => FloatFormat::HALF, u16;
    /// Marker for [`FloatFormat::BFLOAT16`].
    BFloat16 => FloatFormat::BFLOAT16, u16;
    /// Marker for [`FloatFormat::SINGLE`].
    Single => FloatFormat::SINGLE, u32;
    /// Marker for [`FloatFormat::DOUBLE`].
    Double => FloatFormat::DOUBLE, u64;
    /// Marker for [`FloatFormat::EXTENDED`]; the 80 bits sit in the low end of a `u128`.
    Extended => FloatFormat::EXTENDED, u128;
    /// Marker for [`FloatFormat::QUAD`].
    Quad => FloatFormat::QUAD, u128;
}
