//! SECDED Hamming(72,64) codec
//!
//! Packs 64 payload bits into a 72-bit codeword with seven Hamming parity bits at the
//! power-of-two positions and an overall parity bit at position 72. Decoding corrects any
//! single flipped bit and detects any two flipped bits. Three or more flipped bits are
//! classified by the same rule, but the result is not guaranteed to be right.
//!
//! All operations are pure. The only shared data is the coverage table, a compile-time constant.

pub mod codeword;
pub mod coverage;
pub mod decoder;
pub mod encoder;

pub use codeword::Codeword;
pub use coverage::{COVERAGE_MAP, CoverageSet, PARITY_WEIGHTS, coverage};
pub use decoder::{DecodeOutcome, Syndrome, compute_syndrome, correct, decode, decode_codeword, extract_payload};
pub use encoder::{encode, encode_u64};
