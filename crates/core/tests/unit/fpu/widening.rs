//! # Widening and Equal-Width Conversion Tests
//!
//! Widening is always exact; half and bfloat16 share a width but neither
//! contains the other, so conversions between them round in both directions.

use fptrunc_core::format::{BFloat16, Double, Extended, FloatFormat, Half, Quad, Single};
use fptrunc_core::fpu::{convert_full, extend, trunc, trunc_full};
use fptrunc_core::{FpFlags, RoundingMode};
use pretty_assertions::assert_eq;

const EXTENDED_ONE: u128 = 0x3FFF_8000_0000_0000_0000;
const EXTENDED_PI: u128 = 0x4000_C90F_DAA2_2168_C235;

#[test]
fn half_subnormal_becomes_single_normal() {
    assert_eq!(extend::<Half, Single>(0x0001), 0x3380_0000);
    assert_eq!(extend::<Half, Single>(0x8200), 0xB800_0000);
    assert_eq!(extend::<Half, Single>(0x7BFF), 0x477F_E000);
}

#[test]
fn half_specials_widen() {
    assert_eq!(extend::<Half, Single>(0x7C00), 0x7F80_0000);
    assert_eq!(extend::<Half, Double>(0xFC00), 0xFFF0_0000_0000_0000);
    assert_eq!(extend::<Half, Single>(0x8000), 0x8000_0000);
}

#[test]
fn single_to_double_matches_host_cast() {
    for x in [1.0f32, -0.5, 1e-45, 1.17e-38, f32::MAX, f32::INFINITY] {
        assert_eq!(extend::<Single, Double>(x.to_bits()), f64::from(x).to_bits(), "{x}");
    }
}

#[test]
fn extended_to_quad() {
    assert_eq!(extend::<Extended, Quad>(EXTENDED_ONE), 0x3FFF << 112);
    assert_eq!(
        extend::<Extended, Quad>(EXTENDED_PI),
        (0x4000 << 112) | (0x490F_DAA2_2168_C235 << 49)
    );
    // Smallest extended subnormal, 2^-16445.
    assert_eq!(extend::<Extended, Quad>(1), 1 << 49);
}

#[test]
fn double_to_extended_sets_integer_bit() {
    assert_eq!(extend::<Double, Extended>(1.0f64.to_bits()), EXTENDED_ONE);
    // Double subnormals are normal in extended precision.
    assert_eq!(
        extend::<Double, Extended>(1),
        ((16383 - 1074) << 64) | 0x8000_0000_0000_0000
    );
}

#[test]
fn widening_never_raises_flags_for_numbers() {
    for bits in [0x0001u128, 0x03FF, 0x3555, 0x7BFF, 0xFBFF] {
        let (_, flags) = convert_full(bits, FloatFormat::HALF, FloatFormat::QUAD, RoundingMode::Rup);
        assert_eq!(flags, FpFlags::NONE, "{bits:#06x}");
    }
}

#[test]
fn every_half_value_survives_a_round_trip() {
    for bits in 0..=u16::MAX {
        let is_nan = (bits & 0x7C00) == 0x7C00 && (bits & 0x03FF) != 0;
        if is_nan {
            continue;
        }
        let via_single = trunc::<Single, Half>(extend::<Half, Single>(bits));
        assert_eq!(via_single, bits, "single round trip of {bits:#06x}");
        let via_double = trunc::<Double, Half>(extend::<Half, Double>(bits));
        assert_eq!(via_double, bits, "double round trip of {bits:#06x}");
    }
}

#[test]
fn half_and_bfloat16_round_into_each_other() {
    // 65504 needs more fraction bits than bfloat16 has and rounds up to 2^16.
    assert_eq!(
        trunc_full::<Half, BFloat16>(0x7BFF, RoundingMode::Rne),
        (0x4780, FpFlags::NX)
    );
    assert_eq!(trunc::<BFloat16, Half>(0x3F80), 0x3C00);
    // bfloat16 keeps single range; half does not.
    assert_eq!(
        trunc_full::<BFloat16, Half>(0x0001, RoundingMode::Rne),
        (0x0000, FpFlags::UF | FpFlags::NX)
    );
    assert_eq!(
        trunc_full::<BFloat16, Half>(0x4780, RoundingMode::Rne),
        (0x7C00, FpFlags::OF | FpFlags::NX)
    );
}
