//! NaN propagation across formats.
//!
//! - **Transfer** ([`transfer_nan`]): the destination NaN keeps the source sign,
//!   always has its quiet bit set, and carries the source payload (the fraction
//!   bits below the quiet bit) aligned at the top of the destination payload.
//!   Narrowing drops the low payload bits; widening appends zeros.
//! - **Canonicalization** ([`canonicalize`]): under [`NanPolicy::Canonical`]
//!   every NaN result is replaced by the positive quiet NaN with an empty
//!   payload, the way RISC-V `FCVT` instructions behave.

use serde::{Deserialize, Serialize};

use super::decode::DecodedComponents;
use crate::common::EncodedValue;
use crate::format::FloatFormat;

/// How NaN results are reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NanPolicy {
    /// Keep sign and payload; quiet signaling NaNs.
    #[default]
    Propagate,
    /// Replace every NaN with the format's default quiet NaN.
    Canonical,
}

/// Whether a decoded NaN is signaling (quiet bit clear).
#[inline(always)]
pub const fn is_signaling(nan: &DecodedComponents, format: &FloatFormat) -> bool {
    (nan.fraction & format.quiet_bit()) == 0
}

/// Payload bits of a decoded NaN, excluding the quiet bit.
#[inline(always)]
pub const fn payload(nan: &DecodedComponents, format: &FloatFormat) -> EncodedValue {
    nan.fraction & (format.quiet_bit() - 1)
}

/// Re-encodes a source NaN in the destination format as a quiet NaN.
#[inline(always)]
pub const fn transfer_nan(
    nan: &DecodedComponents,
    src: &FloatFormat,
    dst: &FloatFormat,
) -> EncodedValue {
    let source_payload = payload(nan, src);
    let aligned = if src.mantissa_bits() >= dst.mantissa_bits() {
        source_payload >> (src.mantissa_bits() - dst.mantissa_bits())
    } else {
        source_payload << (dst.mantissa_bits() - src.mantissa_bits())
    };
    let fraction = dst.quiet_bit() | (aligned & (dst.quiet_bit() - 1));
    dst.pack(nan.negative, dst.max_biased_exponent(), fraction)
}

/// Applies `policy` to an already converted destination encoding.
#[inline(always)]
pub const fn canonicalize(bits: EncodedValue, format: &FloatFormat, policy: NanPolicy) -> EncodedValue {
    match policy {
        NanPolicy::Propagate => bits,
        NanPolicy::Canonical => {
            let decoded = DecodedComponents::decode(bits, format);
            if decoded.classify(format).is_nan() {
                format.default_nan()
            } else {
                bits
            }
        }
    }
}
