//! Common types shared by the kernel, the configuration layer, and the builtins.
//!
//! This module provides:
//! 1. **Error Handling:** Descriptor and configuration error types.
//! 2. **Bit Patterns:** The storage integer abstraction used by monomorphized entry points.

/// Error types for format descriptors and configuration loading.
pub mod error;

/// Storage integers carrying encoded floating-point values.
pub mod bits;

pub use self::bits::{BitPattern, EncodedValue};
pub use self::error::{ConfigError, FormatError};
