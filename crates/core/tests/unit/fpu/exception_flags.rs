//! Exception flag set operations and the flags each kind of conversion raises.

use fptrunc_core::format::{Half, Single};
use fptrunc_core::fpu::trunc_full;
use fptrunc_core::{FpFlags, RoundingMode};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn display_lists_names_most_significant_first() {
    assert_eq!((FpFlags::NX | FpFlags::UF | FpFlags::OF).to_string(), "OF|UF|NX");
    assert_eq!(FpFlags::NV.to_string(), "NV");
    assert_eq!(FpFlags::NONE.to_string(), "-");
}

#[test]
fn set_operations() {
    let mut flags = FpFlags::NONE;
    assert!(flags.is_empty());
    flags |= FpFlags::UF;
    flags |= FpFlags::NX;
    assert!(flags.contains(FpFlags::UF | FpFlags::NX));
    assert!(!flags.contains(FpFlags::OF));
    assert_eq!(flags.bits(), 0b0_0011);
    assert_eq!(FpFlags::from_bits(0xFF).bits(), 0x1F);
    assert_eq!(FpFlags::from_bits(0x10), FpFlags::NV);
}

#[rstest]
#[case::exact(0x3F80_0000, FpFlags::NONE)]
#[case::inexact(0x3F80_1001, FpFlags::NX)]
#[case::overflow(0x47C3_5000, FpFlags::OF | FpFlags::NX)]
#[case::tiny_and_inexact(0x3300_0000, FpFlags::UF | FpFlags::NX)]
#[case::exact_subnormal(0x3380_0000, FpFlags::NONE)]
#[case::signaling_nan(0x7F80_0001, FpFlags::NV)]
#[case::quiet_nan(0x7FC0_0000, FpFlags::NONE)]
#[case::infinity(0xFF80_0000, FpFlags::NONE)]
#[case::zero(0x8000_0000, FpFlags::NONE)]
fn conversion_flags(#[case] input: u32, #[case] expected: FpFlags) {
    assert_eq!(trunc_full::<Single, Half>(input, RoundingMode::Rne).1, expected);
}

#[test]
fn divide_by_zero_is_never_raised() {
    for bits in [0u32, 0x8000_0000, 0x0000_0001, 0x7F80_0000, 0x7F80_0001, 0x7F7F_FFFF] {
        for rm in RoundingMode::ALL {
            let (_, flags) = trunc_full::<Single, Half>(bits, rm);
            assert!(!flags.contains(FpFlags::DZ));
        }
    }
}
