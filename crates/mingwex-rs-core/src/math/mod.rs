//! Math-layer collaborators of the CRT.

pub mod fp_consts;

pub use fp_consts::nan;
