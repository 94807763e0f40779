//! Floating-point exception (accrued) flags.
//!
//! Conversions report IEEE 754 exceptions in the RISC-V `fflags` bit order:
//!
//! | Bit | Flag | Description         | Raised by a conversion when            |
//! |-----|------|---------------------|----------------------------------------|
//! |  4  | NV   | Invalid Operation   | the source is a signaling NaN or an invalid x87 encoding |
//! |  3  | DZ   | Divide by Zero      | never                                   |
//! |  2  | OF   | Overflow            | the rounded magnitude exceeds the destination range |
//! |  1  | UF   | Underflow           | the result is tiny and inexact          |
//! |  0  | NX   | Inexact             | any nonzero bits were discarded         |

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Floating-point exception flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FpFlags(u8);

impl FpFlags {
    /// No exceptions raised.
    pub const NONE: Self = Self(0);
    /// Invalid Operation.
    pub const NV: Self = Self(1 << 4);
    /// Divide by Zero.
    pub const DZ: Self = Self(1 << 3);
    /// Overflow.
    pub const OF: Self = Self(1 << 2);
    /// Underflow.
    pub const UF: Self = Self(1 << 1);
    /// Inexact.
    pub const NX: Self = Self(1 << 0);

    const NAMES: [(Self, &'static str); 5] = [
        (Self::NV, "NV"),
        (Self::DZ, "DZ"),
        (Self::OF, "OF"),
        (Self::UF, "UF"),
        (Self::NX, "NX"),
    ];

    /// Builds a flag set from the low five bits of an `fflags` value.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0x1F)
    }

    /// Returns the raw 5-bit flag value.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if no flags are set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if every flag in `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// `const` counterpart of `|`, usable inside the kernel.
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Short mnemonics of the raised flags, most significant first.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        Self::NAMES
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| name)
    }
}

impl BitOr for FpFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for FpFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for FpFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        for (i, name) in self.names().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}
