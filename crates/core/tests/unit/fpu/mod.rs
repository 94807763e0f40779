//! # Conversion Kernel Tests
//!
//! Tests for the `fpu` module, from field extraction up to full conversions.


/// Exception flag accumulation and reporting.
pub mod exception_flags;




/// Directed and nearest rounding modes.
pub mod rounding_modes;

/// Widening and equal-width conversions.
pub mod widening;
