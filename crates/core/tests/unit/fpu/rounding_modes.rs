//! # Rounding Mode Tests
//!
//! Verifies each IEEE 754 rounding direction on inexact, tied, overflowing,
//! and underflowing conversions, and the guard/sticky primitive underneath.

use fptrunc_core::common::ConfigError;
use fptrunc_core::format::{Half, Single};
use fptrunc_core::fpu::rounding_modes::{Rounded, round_shift};
use fptrunc_core::fpu::trunc_full;
use fptrunc_core::{FpFlags, RoundingMode};
use pretty_assertions::assert_eq;
use rstest::rstest;

use RoundingMode::{Rdn, Rmm, Rne, Rtz, Rup};

fn to_half(bits: u32, rm: RoundingMode) -> u16 {
    trunc_full::<Single, Half>(bits, rm).0
}

// ══════════════════════════════════════════════════════════
// 1. Conversions
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(Rne, 0x3C01, 0xBC01)]
#[case(Rtz, 0x3C00, 0xBC00)]
#[case(Rdn, 0x3C00, 0xBC01)]
#[case(Rup, 0x3C01, 0xBC00)]
#[case(Rmm, 0x3C01, 0xBC01)]
fn above_halfway(#[case] rm: RoundingMode, #[case] positive: u16, #[case] negative: u16) {
    assert_eq!(to_half(0x3F80_1001, rm), positive);
    assert_eq!(to_half(0xBF80_1001, rm), negative);
}

#[rstest]
#[case(Rne, 0x3C00)]
#[case(Rtz, 0x3C00)]
#[case(Rdn, 0x3C00)]
#[case(Rup, 0x3C01)]
#[case(Rmm, 0x3C01)]
fn exact_tie(#[case] rm: RoundingMode, #[case] expected: u16) {
    assert_eq!(to_half(0x3F80_1000, rm), expected);
}

#[rstest]
#[case(Rne, 0x7C00, 0xFC00)]
#[case(Rtz, 0x7BFF, 0xFBFF)]
#[case(Rdn, 0x7BFF, 0xFC00)]
#[case(Rup, 0x7C00, 0xFBFF)]
#[case(Rmm, 0x7C00, 0xFC00)]
fn overflow_direction(#[case] rm: RoundingMode, #[case] positive: u16, #[case] negative: u16) {
    assert_eq!(to_half(0x47C3_5000, rm), positive);
    assert_eq!(to_half(0xC7C3_5000, rm), negative);
    // Overflow is reported even when the result saturates.
    assert_eq!(
        trunc_full::<Single, Half>(0x47C3_5000, rm).1,
        FpFlags::OF | FpFlags::NX
    );
}

#[test]
fn rounding_past_max_finite() {
    assert_eq!(
        trunc_full::<Single, Half>(0x477F_F000, Rtz),
        (0x7BFF, FpFlags::NX)
    );
    assert_eq!(
        trunc_full::<Single, Half>(0x477F_F000, Rup),
        (0x7C00, FpFlags::OF | FpFlags::NX)
    );
}

#[rstest]
#[case(Rne, 0x0000, 0x8000)]
#[case(Rtz, 0x0000, 0x8000)]
#[case(Rdn, 0x0000, 0x8001)]
#[case(Rup, 0x0001, 0x8000)]
#[case(Rmm, 0x0000, 0x8000)]
fn underflow_direction(#[case] rm: RoundingMode, #[case] positive: u16, #[case] negative: u16) {
    assert_eq!(to_half(0x0000_0001, rm), positive);
    assert_eq!(to_half(0x8000_0001, rm), negative);
}

#[test]
fn exact_values_ignore_rounding_mode() {
    for rm in RoundingMode::ALL {
        assert_eq!(trunc_full::<Single, Half>(0x3F80_0000, rm), (0x3C00, FpFlags::NONE));
        assert_eq!(trunc_full::<Single, Half>(0x3380_0000, rm), (0x0001, FpFlags::NONE));
    }
}

// ══════════════════════════════════════════════════════════
// 2. Guard and sticky rounding
// ══════════════════════════════════════════════════════════

#[rstest]
#[case::above_half(0b1011, 2, 0b11)]
#[case::tie_even_stays(0b1010, 2, 0b10)]
#[case::tie_odd_rounds_up(0b1110, 2, 0b100)]
#[case::below_half(0b1001, 2, 0b10)]
fn round_shift_nearest_even(#[case] significand: u128, #[case] shift: u32, #[case] expected: u128) {
    let rounded = round_shift(significand, shift, false, Rne);
    assert_eq!(rounded.significand, expected);
    assert!(rounded.inexact);
}

#[test]
fn round_shift_by_zero_is_exact() {
    assert_eq!(
        round_shift(0xABCD, 0, false, Rup),
        Rounded {
            significand: 0xABCD,
            inexact: false
        }
    );
}

#[test]
fn round_shift_drops_every_bit() {
    let half = 1u128 << 127;
    assert_eq!(round_shift(half, 128, false, Rne).significand, 0);
    assert_eq!(round_shift(half, 128, false, Rmm).significand, 1);
    assert!(round_shift(half, 128, false, Rne).inexact);

    assert_eq!(round_shift(1, 200, false, Rup).significand, 1);
    assert_eq!(round_shift(1, 200, false, Rne).significand, 0);
    assert_eq!(round_shift(1, 200, true, Rdn).significand, 1);
    assert!(!round_shift(0, 200, false, Rup).inexact);
}

// ══════════════════════════════════════════════════════════
// 3. Encoding and names
// ══════════════════════════════════════════════════════════

#[test]
fn from_bits_rejects_reserved_encodings() {
    for (bits, rm) in (0u8..).zip(RoundingMode::ALL) {
        assert_eq!(RoundingMode::from_bits(bits), Some(rm));
        assert_eq!(rm as u8, bits);
    }
    for bits in 5..=7 {
        assert_eq!(RoundingMode::from_bits(bits), None);
    }
}

#[rstest]
#[case("rne", Rne)]
#[case("RTZ", Rtz)]
#[case("downward", Rdn)]
#[case("upward", Rup)]
#[case("nearest-away", Rmm)]
fn mode_names_parse(#[case] name: &str, #[case] expected: RoundingMode) {
    assert_eq!(name.parse::<RoundingMode>().ok(), Some(expected));
}

#[test]
fn unknown_mode_name_is_rejected() {
    assert!(matches!(
        "stochastic".parse::<RoundingMode>(),
        Err(ConfigError::UnknownRoundingMode(name)) if name == "stochastic"
    ));
}

#[test]
fn modes_deserialize_with_aliases() {
    let modes: Vec<RoundingMode> =
        serde_json::from_str(r#"["rmm", "toward-zero", "nearest-even"]"#).unwrap();
    assert_eq!(modes, vec![Rmm, Rtz, Rne]);
    assert_eq!(serde_json::to_string(&Rup).unwrap(), r#""rup""#);
}
