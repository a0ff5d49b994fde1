//! # mingwex-rs-core
//!
//! Safe Rust implementations of the MinGW-style C runtime formatted-output
//! subsystem.
//!
//! The heart of the crate is [`stdio::pformat`], a single formatting engine
//! that backs every printf-family entry point. Around it sit the small CRT
//! collaborators the engine needs: IEEE-754 special-value constant tables
//! ([`math::fp_consts`]) and NUL-terminated string primitives ([`string`]).
//! No `unsafe` code is permitted at the crate level.

#![deny(unsafe_code)]

pub mod math;
pub mod stdio;
pub mod string;
