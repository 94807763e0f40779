//! Software IEEE 754 floating-point format conversions.
//!
//! This crate converts encoded floating-point values between binary formats the
//! way a compiler runtime's `trunc`/`extend` builtins do, bit for bit:
//! 1. **Formats:** Descriptors for half, bfloat16, single, double, x87 extended,
//!    quad, and custom layouts.
//! 2. **Kernel:** One generic conversion routine with IEEE 754 rounding, overflow,
//!    underflow, and NaN payload propagation, plus exception flags.
//! 3. **Builtins:** Per-pair entry points marshalling host types
//!    (`__truncsfhf2`, `__truncxfhf2`, ...).
//! 4. **Configuration:** JSON-described conversions for tools built on the kernel.

/// Common types (encoded values, error types).
pub mod common;
/// Conversion configuration (formats, rounding mode, NaN policy).
pub mod config;
/// Floating-point format descriptors and compile-time format markers.
pub mod format;
/// Conversion kernel (decode, rounding, NaN handling, exception flags).
pub mod fpu;
/// Per-pair builtin entry points.
pub mod builtins;

/// Root configuration type; use `ConvertConfig::default()` or parse it from JSON.
pub use crate::config::ConvertConfig;
/// Format descriptor type and its catalogue names.
pub use crate::format::{FloatFormat, FormatKind};
/// Run-time converter and the free conversion functions.
pub use crate::fpu::{NarrowingConverter, convert, convert_full, convert_with_rm, extend, trunc};
/// Exception flags returned alongside conversion results.
pub use crate::fpu::exception_flags::FpFlags;
/// Rounding directions.
pub use crate::fpu::rounding_modes::RoundingMode;
