//! Software floating-point conversion kernel.
//!
//! This module converts an encoded value from one [`FloatFormat`] to another,
//! bit for bit the way IEEE 754 hardware does. A single routine covers
//! narrowing (double to half), widening (half to single), and equal-width
//! re-encoding (half to bfloat16):
//!
//! 1. Decode sign, exponent, and significand from the source encoding.
//! 2. Zeros, infinities, and NaNs map straight onto their destination encodings.
//! 3. Finite values are re-biased and their significand is shifted to the
//!    destination precision. Bits shifted out are rounded per the rounding mode;
//!    values above the destination range overflow, values below it become
//!    subnormal or zero.
//! 4. The result is packed and returned together with the raised exception flags.
//!
//! Submodules:
//! - [`decode`]: field extraction and classification.
//! - [`rounding_modes`]: rounding directions and guard/sticky rounding.
//! - [`nan_handling`]: NaN payload transfer and canonicalization.
//! - [`exception_flags`]: IEEE 754 exception flags.

/// Field extraction and classification.
pub mod decode;

/// Rounding mode definitions and significand rounding.
pub mod rounding_modes;

/// NaN payload transfer and canonicalization.
pub mod nan_handling;

/// Floating-point exception flag types.
pub mod exception_flags;

use crate::common::{BitPattern, EncodedValue};
use crate::format::{FloatFormat, Format};

use self::decode::{DecodedComponents, FpClass};
use self::exception_flags::FpFlags;
use self::nan_handling::{NanPolicy, canonicalize, transfer_nan};
use self::rounding_modes::{RoundingMode, round_shift};

/// Converts `bits` from `src` to `dst`, rounding to nearest, ties to even.
///
/// # Examples
///
/// ```
/// use fptrunc_core::format::FloatFormat;
/// use fptrunc_core::fpu::convert;
///
/// // 1.0f32 -> 1.0 in binary16
/// assert_eq!(convert(0x3F80_0000, FloatFormat::SINGLE, FloatFormat::HALF), 0x3C00);
/// // +inf stays +inf
/// assert_eq!(convert(0x7F80_0000, FloatFormat::SINGLE, FloatFormat::HALF), 0x7C00);
/// ```
#[inline(always)]
pub const fn convert(bits: EncodedValue, src: FloatFormat, dst: FloatFormat) -> EncodedValue {
    convert_full(bits, src, dst, RoundingMode::Rne).0
}

/// Converts `bits` from `src` to `dst` under an explicit rounding mode.
#[inline(always)]
pub const fn convert_with_rm(
    bits: EncodedValue,
    src: FloatFormat,
    dst: FloatFormat,
    rm: RoundingMode,
) -> EncodedValue {
    convert_full(bits, src, dst, rm).0
}

/// Converts `bits` from `src` to `dst` and reports the raised exception flags.
///
/// # Arguments
///
/// * `bits` - Source encoding in the low `src.width()` bits; higher bits are ignored.
/// * `src`  - Source format.
/// * `dst`  - Destination format.
/// * `rm`   - Rounding mode applied to inexact finite results.
///
/// # Returns
///
/// The destination encoding in the low `dst.width()` bits, and the flags.
#[inline(always)]
pub const fn convert_full(
    bits: EncodedValue,
    src: FloatFormat,
    dst: FloatFormat,
    rm: RoundingMode,
) -> (EncodedValue, FpFlags) {
    debug_assert!(
        src.is_encodable() && dst.is_encodable(),
        "format descriptor is not encodable"
    );
    let a = DecodedComponents::decode(bits, &src);
    match a.classify(&src) {
        FpClass::Zero => (dst.zero(a.negative), FpFlags::NONE),
        FpClass::Infinite => (dst.infinity(a.negative), FpFlags::NONE),
        FpClass::QuietNan => (transfer_nan(&a, &src, &dst), FpFlags::NONE),
        FpClass::SignalingNan => (transfer_nan(&a, &src, &dst), FpFlags::NV),
        FpClass::Invalid => (dst.default_nan(), FpFlags::NV),
        FpClass::Normal | FpClass::Subnormal => convert_finite(&a, &src, &dst, rm),
    }
}

/// Result for a magnitude beyond the destination's finite range.
#[inline(always)]
const fn overflow(negative: bool, dst: &FloatFormat, rm: RoundingMode) -> (EncodedValue, FpFlags) {
    let bits = if rm.overflows_to_infinity(negative) {
        dst.infinity(negative)
    } else {
        dst.max_finite(negative)
    };
    (bits, FpFlags::OF.union(FpFlags::NX))
}

#[inline(always)]
const fn convert_finite(
    a: &DecodedComponents,
    src: &FloatFormat,
    dst: &FloatFormat,
    rm: RoundingMode,
) -> (EncodedValue, FpFlags) {
    let significand = a.significand(src);
    let msb = 127 - significand.leading_zeros() as i32;

    // Magnitude is significand * 2^src_scale.
    let src_scale = a.effective_exponent() - src.bias() - src.mantissa_bits() as i32;
    let biased = src_scale + msb + dst.bias();
    if biased >= dst.max_biased_exponent() as i32 {
        return overflow(a.negative, dst, rm);
    }

    let tiny = biased < 1;
    let dst_exponent = if tiny { 1 } else { biased };
    let dst_scale = dst_exponent - dst.bias() - dst.mantissa_bits() as i32;
    let shift = dst_scale - src_scale;

    let (mut result, inexact) = if shift <= 0 {
        (significand << (-shift) as u32, false)
    } else {
        let rounded = round_shift(significand, shift as u32, a.negative, rm);
        (rounded.significand, rounded.inexact)
    };

    let mut flags = if inexact { FpFlags::NX } else { FpFlags::NONE };
    if tiny && inexact {
        flags = flags.union(FpFlags::UF);
    }

    let exponent = if tiny {
        // Rounding may carry a subnormal up into the smallest normal.
        if result >> dst.mantissa_bits() != 0 { 1 } else { 0 }
    } else if result >> (dst.mantissa_bits() + 1) != 0 {
        result >>= 1;
        let carried = dst_exponent as u32 + 1;
        if carried >= dst.max_biased_exponent() {
            return overflow(a.negative, dst, rm);
        }
        carried
    } else {
        dst_exponent as u32
    };

    (dst.pack(a.negative, exponent, result), flags)
}

/// Rejects marker formats whose storage integer is narrower than the encoding.
#[inline(always)]
const fn assert_storage<S: Format, D: Format>() {
    const {
        assert!(
            S::FORMAT.width() <= <S::Bits as BitPattern>::BITS
                && D::FORMAT.width() <= <D::Bits as BitPattern>::BITS,
            "format storage type is narrower than the encoding"
        );
    }
}

/// Converts between two compile-time formats, rounding to nearest, ties to even.
///
/// # Examples
///
/// ```
/// use fptrunc_core::format::{Double, Half};
/// use fptrunc_core::fpu::trunc;
///
/// assert_eq!(trunc::<Double, Half>(65504.0f64.to_bits()), 0x7BFF);
/// assert_eq!(trunc::<Double, Half>(65520.0f64.to_bits()), 0x7C00);
/// ```
#[inline(always)]
pub fn trunc<S: Format, D: Format>(a: S::Bits) -> D::Bits {
    assert_storage::<S, D>();
    D::Bits::from_encoded(convert(a.to_encoded(), S::FORMAT, D::FORMAT))
}

/// Like [`trunc`], with an explicit rounding mode and the raised flags.
#[inline(always)]
pub fn trunc_full<S: Format, D: Format>(a: S::Bits, rm: RoundingMode) -> (D::Bits, FpFlags) {
    assert_storage::<S, D>();
    let (bits, flags) = convert_full(a.to_encoded(), S::FORMAT, D::FORMAT, rm);
    (D::Bits::from_encoded(bits), flags)
}

/// Widens between two compile-time formats. Always exact.
///
/// Instantiating this with a destination that cannot hold every source value
/// is a compile-time error.
#[inline(always)]
pub fn extend<S: Format, D: Format>(a: S::Bits) -> D::Bits {
    const {
        assert!(
            S::FORMAT.mantissa_bits() <= D::FORMAT.mantissa_bits()
                && S::FORMAT.exponent_bits() <= D::FORMAT.exponent_bits(),
            "extend requires a destination at least as wide as the source"
        );
    }
    assert_storage::<S, D>();
    D::Bits::from_encoded(convert(a.to_encoded(), S::FORMAT, D::FORMAT))
}

/// A conversion between two formats chosen at run time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NarrowingConverter {
    source: FloatFormat,
    destination: FloatFormat,
    rounding: RoundingMode,
    nan_policy: NanPolicy,
}

impl NarrowingConverter {
    /// Creates a converter rounding to nearest, ties to even, and propagating NaN payloads.
    ///
    /// Both formats must be encodable; descriptors from [`FloatFormat::new`]
    /// and [`crate::config::ConvertConfig::build`] always are.
    pub const fn new(source: FloatFormat, destination: FloatFormat) -> Self {
        debug_assert!(
            source.is_encodable() && destination.is_encodable(),
            "format descriptor is not encodable"
        );
        Self {
            source,
            destination,
            rounding: RoundingMode::Rne,
            nan_policy: NanPolicy::Propagate,
        }
    }

    /// Replaces the rounding mode.
    #[must_use]
    pub const fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    /// Replaces the NaN policy.
    #[must_use]
    pub const fn with_nan_policy(mut self, nan_policy: NanPolicy) -> Self {
        self.nan_policy = nan_policy;
        self
    }

    /// Source format.
    pub const fn source(&self) -> FloatFormat {
        self.source
    }

    /// Destination format.
    pub const fn destination(&self) -> FloatFormat {
        self.destination
    }

    /// Rounding mode.
    pub const fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    /// NaN policy.
    pub const fn nan_policy(&self) -> NanPolicy {
        self.nan_policy
    }

    /// Converts one encoding.
    #[inline]
    pub fn convert(&self, bits: EncodedValue) -> EncodedValue {
        self.convert_full(bits).0
    }

    /// Converts one encoding and reports the raised flags.
    #[inline]
    pub fn convert_full(&self, bits: EncodedValue) -> (EncodedValue, FpFlags) {
        let (result, flags) = convert_full(bits, self.source, self.destination, self.rounding);
        let result = canonicalize(result, &self.destination, self.nan_policy);
        #[cfg(feature = "trace-conversions")]
        tracing::trace!(
            input = %format!("{bits:#x}"),
            output = %format!("{result:#x}"),
            %flags,
            "converted {} -> {}",
            self.source,
            self.destination
        );
        (result, flags)
    }
}
