//! Core utilities for the SECDED codec
//!
//! This crate provides fundamental types used across the workspace:
//! - BitBuffer, a fixed-length bit container with sequential and random access
//! - CodewordPos, the 1-based codeword position type
//! - CodecErr, the caller-contract error type
//! - Logging setup

pub mod bitbuffer;
pub mod debug;
pub mod error;
pub mod position;

pub use bitbuffer::BitBuffer;
pub use error::CodecErr;
pub use position::{CODEWORD_BITS, CodewordPos, HAMMING_PARITY_BITS, PAYLOAD_BITS};
