//! Encoded floating-point values.
//!
//! Every format handled by the kernel fits into 128 bits, so the dynamic API
//! passes encodings around as a `u128` holding the low `width()` bits. The
//! monomorphized API keeps each format in its natural storage integer and
//! widens to `u128` only inside the kernel.

/// An encoded floating-point value in the low bits of a `u128`.
///
/// Bits above the owning format's width are ignored on input and are always
/// zero on output.
pub type EncodedValue = u128;

/// Unsigned integer types used as storage for an encoded format.
pub trait BitPattern: Copy + Eq + core::fmt::Debug {
    /// Number of bits in the storage type.
    const BITS: u32;

    /// Zero-extends the pattern to a `u128`.
    fn to_encoded(self) -> EncodedValue;

    /// Truncates a `u128` to the storage type.
    fn from_encoded(bits: EncodedValue) -> Self;
}

macro_rules! impl_bit_pattern {
    ($($ty:ty),*) => {
        $(
            impl BitPattern for $ty {
                const BITS: u32 = <$ty>::BITS;

                #[inline(always)]
                fn to_encoded(self) -> EncodedValue {
                    self as EncodedValue
                }

                #[inline(always)]
                fn from_encoded(bits: EncodedValue) -> Self {
                    bits as Self
                }
            }
        )*
    };
}

impl_bit_pattern!(u16, u32, u64, u128);
