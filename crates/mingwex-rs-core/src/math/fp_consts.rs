//! IEEE-754 special-value constant tables.
//!
//! The CRT keeps the NaN/infinity/denormal bit patterns as named constants;
//! the formatting engine consults classification (not numeric conversion)
//! when it meets one of these values. Classification itself goes through
//! the platform facility (`f64::classify`); the raw patterns are pinned
//! here so tests can verify them bit-for-bit.

use std::num::FpCategory;

/// Quiet NaN (f64).
pub const QNAN_BITS: u64 = 0x7ff8_0000_0000_0000;
/// Signaling NaN (f64).
pub const SNAN_BITS: u64 = 0x7ff0_0000_0000_0001;
/// Positive infinity (f64).
pub const INF_BITS: u64 = 0x7ff0_0000_0000_0000;
/// Negative infinity (f64).
pub const NEG_INF_BITS: u64 = 0xfff0_0000_0000_0000;
/// Smallest positive denormal (f64).
pub const DENORM_MIN_BITS: u64 = 0x0000_0000_0000_0001;

/// Quiet NaN (f32).
pub const QNAN_BITS_F32: u32 = 0x7fc0_0000;
/// Positive infinity (f32).
pub const INF_BITS_F32: u32 = 0x7f80_0000;
/// Smallest positive denormal (f32).
pub const DENORM_MIN_BITS_F32: u32 = 0x0000_0001;

/// Floating-point class as the formatting engine cares about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FpClass {
    Nan,
    Infinite,
    Zero,
    Subnormal,
    Normal,
}

/// Classify using the platform's native facility.
pub fn classify(x: f64) -> FpClass {
    match x.classify() {
        FpCategory::Nan => FpClass::Nan,
        FpCategory::Infinite => FpClass::Infinite,
        FpCategory::Zero => FpClass::Zero,
        FpCategory::Subnormal => FpClass::Subnormal,
        FpCategory::Normal => FpClass::Normal,
    }
}

/// C99 `nan(tagp)`: returns a quiet NaN. The tag is accepted for interface
/// compatibility and ignored, as the original does.
pub fn nan(_tag: &[u8]) -> f64 {
    f64::from_bits(QNAN_BITS)
}
