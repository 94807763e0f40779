//! Per-pair conversion entry points.
//!
//! Each function fixes one source/destination pair and only marshals host
//! types to and from bit patterns; the arithmetic lives in [`crate::fpu`].
//! Names follow the compiler runtime convention (`sf` single, `df` double,
//! `xf` x87 extended, `tf` quad, `hf` half, `bf` bfloat16).
//!
//! Half, bfloat16, and quad values travel as raw bit patterns because the
//! matching primitive float types are not stable. x87 values travel as
//! [`X87Extended`].
//!
//! With the `export-symbols` feature, `__truncdfsf2` and `__extendsfdf2` are
//! additionally exported under their unmangled runtime names. They are the
//! only pairs whose arguments and results are both `f32`/`f64`. Runtimes pass
//! half and bfloat16 values as `_Float16`/`__bf16` in floating-point
//! registers, and quad and x87 values likewise, none of which a Rust
//! `extern "C"` signature can express, so those pairs stay Rust-only.

use crate::fpu::{extend, trunc};
use crate::format::{BFloat16, Double, Extended, Half, Quad, Single};

/// An x87 80-bit extended precision value.
///
/// Bit 79 is the sign, bits 64..=78 the exponent, bit 63 the explicit integer
/// bit, and bits 0..=62 the fraction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct X87Extended(u128);

impl X87Extended {
    const MASK: u128 = (1 << 80) - 1;

    /// Wraps an 80-bit pattern; bits above 79 are discarded.
    pub const fn from_bits(bits: u128) -> Self {
        Self(bits & Self::MASK)
    }

    /// The 80-bit pattern in the low end of a `u128`.
    pub const fn to_bits(self) -> u128 {
        self.0
    }

    /// Reads the 10-byte little-endian memory image (`fstp tbyte`).
    pub const fn from_le_bytes(bytes: [u8; 10]) -> Self {
        let mut wide = [0u8; 16];
        let mut i = 0;
        while i < 10 {
            wide[i] = bytes[i];
            i += 1;
        }
        Self(u128::from_le_bytes(wide))
    }

    /// Writes the 10-byte little-endian memory image (`fld tbyte`).
    pub const fn to_le_bytes(self) -> [u8; 10] {
        let wide = self.0.to_le_bytes();
        let mut bytes = [0u8; 10];
        let mut i = 0;
        while i < 10 {
            bytes[i] = wide[i];
            i += 1;
        }
        bytes
    }
}

macro_rules! builtins {
    ($(
        $(#[$doc:meta])*
        $name:ident($arg:ident: $src:ty) -> $dst:ty $(as $symbol:ident)? $body:block
    )*) => {
        $(
            $(#[$doc])*
            #[inline]
            pub fn $name($arg: $src) -> $dst $body

            $(
                #[cfg(feature = "export-symbols")]
                #[allow(unsafe_code)]
                #[unsafe(no_mangle)]
                #[doc = concat!("Unmangled runtime symbol for [`", stringify!($name), "`].")]
                pub extern "C" fn $symbol($arg: $src) -> $dst {
                    $name($arg)
                }
            )?
        )*
    };
}

builtins! {
    /// Single to half (`__truncsfhf2`).
    trunc_sf_hf(a: f32) -> u16 {
        trunc::<Single, Half>(a.to_bits())
    }

    /// Double to half (`__truncdfhf2`).
    trunc_df_hf(a: f64) -> u16 {
        trunc::<Double, Half>(a.to_bits())
    }

    /// Double to single (`__truncdfsf2`).
    trunc_df_sf(a: f64) -> f32 as __truncdfsf2 {
        f32::from_bits(trunc::<Double, Single>(a.to_bits()))
    }

    /// Single to bfloat16 (`__truncsfbf2`).
    trunc_sf_bf(a: f32) -> u16 {
        trunc::<Single, BFloat16>(a.to_bits())
    }

    /// Double to bfloat16 (`__truncdfbf2`).
    trunc_df_bf(a: f64) -> u16 {
        trunc::<Double, BFloat16>(a.to_bits())
    }

    /// Quad to single (`__trunctfsf2`).
    trunc_tf_sf(a: u128) -> f32 {
        f32::from_bits(trunc::<Quad, Single>(a))
    }

    /// Quad to double (`__trunctfdf2`).
    trunc_tf_df(a: u128) -> f64 {
        f64::from_bits(trunc::<Quad, Double>(a))
    }

    /// Quad to half (`__trunctfhf2`).
    trunc_tf_hf(a: u128) -> u16 {
        trunc::<Quad, Half>(a)
    }

    /// Extended to half (`__truncxfhf2`).
    ///
    /// Narrows to single precision first and then to half precision, as the
    /// runtime wrapper does. The two roundings can differ from a single direct
    /// rounding when the first one lands exactly on a half-precision tie; use
    /// `trunc::<Extended, Half>` for the directly rounded result.
    trunc_xf_hf(a: X87Extended) -> u16 {
        let single = trunc::<Extended, Single>(a.to_bits());
        trunc::<Single, Half>(single)
    }

    /// Extended to single (`__truncxfsf2`).
    trunc_xf_sf(a: X87Extended) -> f32 {
        f32::from_bits(trunc::<Extended, Single>(a.to_bits()))
    }

    /// Extended to double (`__truncxfdf2`).
    trunc_xf_df(a: X87Extended) -> f64 {
        f64::from_bits(trunc::<Extended, Double>(a.to_bits()))
    }

    /// Half to single (`__extendhfsf2`).
    extend_hf_sf(a: u16) -> f32 {
        f32::from_bits(extend::<Half, Single>(a))
    }

    /// Single to double (`__extendsfdf2`).
    extend_sf_df(a: f32) -> f64 as __extendsfdf2 {
        f64::from_bits(extend::<Single, Double>(a.to_bits()))
    }

    /// Extended to quad (`__extendxftf2`).
    extend_xf_tf(a: X87Extended) -> u128 {
        extend::<Extended, Quad>(a.to_bits())
    }
}
