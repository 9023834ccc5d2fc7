use std::fmt;

use secded_core::{BitBuffer, CodecErr, CodewordPos};

use crate::codeword::Codeword;
use crate::coverage::COVERAGE_MAP;

/// Diagnosis of a received codeword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// All parity checks pass
    NoError,
    /// Exactly one bit is assumed flipped, at the given position. Flipping it back restores the codeword.
    SingleCorrectableError(CodewordPos),
    /// Two (or more) bits flipped; the payload is unreliable and must not be used
    DoubleErrorDetected,
}

impl DecodeOutcome {
    /// Position to flip back, if any
    pub fn error_position(&self) -> Option<CodewordPos> {
        match self {
            DecodeOutcome::SingleCorrectableError(pos) => Some(*pos),
            _ => None,
        }
    }

    /// True if the payload can be trusted, possibly after applying the correction
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, DecodeOutcome::DoubleErrorDetected)
    }
}

impl fmt::Display for DecodeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeOutcome::NoError => write!(f, "NO_ERROR"),
            DecodeOutcome::SingleCorrectableError(pos) => write!(f, "SINGLE_ERROR at position {}", pos),
            DecodeOutcome::DoubleErrorDetected => write!(f, "DOUBLE_ERROR_DETECTED"),
        }
    }
}

/// Result of recomputing all parity checks over a codeword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Syndrome {
    /// 7-bit Hamming syndrome, bit i set when the check of weight 2^i fails.
    /// When nonzero it reads as the 1-based position of a single flipped bit.
    pub hamming: u8,
    /// Overall parity over all 72 bits, 0 or 1
    pub overall: u8,
}

impl Syndrome {
    pub fn is_clean(&self) -> bool {
        self.hamming == 0 && self.overall == 0
    }

    /// Maps the syndrome pair to a decode outcome.
    ///
    /// | hamming | overall | outcome                      |
    /// |---------|---------|------------------------------|
    /// | 0       | 0       | NoError                      |
    /// | s != 0  | 1       | SingleCorrectableError(s)    |
    /// | s != 0  | 0       | DoubleErrorDetected          |
    /// | 0       | 1       | SingleCorrectableError(72)   |
    ///
    /// A single flipped bit never yields a Hamming syndrome above 71. Values of 72 and up can only come
    /// from three or more flipped bits and point past the codeword, so they are reported as
    /// uncorrectable instead of as a correction.
    pub fn classify(&self) -> DecodeOutcome {
        match (self.hamming, self.overall) {
            (0, 0) => DecodeOutcome::NoError,
            (0, _) => DecodeOutcome::SingleCorrectableError(CodewordPos::OVERALL_PARITY),
            (s, 1) => match CodewordPos::new(s as usize) {
                Ok(pos) if !pos.is_overall_parity() => DecodeOutcome::SingleCorrectableError(pos),
                _ => {
                    tracing::debug!("syndrome {} points outside codeword, treating as uncorrectable", s);
                    DecodeOutcome::DoubleErrorDetected
                }
            },
            _ => DecodeOutcome::DoubleErrorDetected,
        }
    }
}

/// Recomputes the seven Hamming checks and the overall parity over `codeword`
pub fn compute_syndrome(codeword: &Codeword) -> Syndrome {
    let mut hamming = 0u8;
    for (i, set) in COVERAGE_MAP.iter().enumerate() {
        // The coverage set already holds the parity slot itself
        let check = set.parity_of(codeword.as_bits());
        hamming |= check << i;
    }
    Syndrome {
        hamming,
        overall: codeword.parity(),
    }
}

/// Decodes a 72-bit sequence. Fails with InvalidLength if `bits` does not hold exactly 72 bits.
pub fn decode(bits: &BitBuffer) -> Result<DecodeOutcome, CodecErr> {
    let codeword = Codeword::from_bits(bits.clone())?;
    Ok(decode_codeword(&codeword))
}

/// Classifies a codeword without modifying it
pub fn decode_codeword(codeword: &Codeword) -> DecodeOutcome {
    let syndrome = compute_syndrome(codeword);
    let outcome = syndrome.classify();
    tracing::trace!("decode {} syndrome {:07b}/{} -> {}", codeword.to_bitstr(), syndrome.hamming, syndrome.overall, outcome);
    outcome
}

/// Decodes `codeword` and, on a single correctable error, flips the reported bit back in place.
/// Returns the outcome observed before correction.
pub fn correct(codeword: &mut Codeword) -> DecodeOutcome {
    let outcome = decode_codeword(codeword);
    match outcome {
        DecodeOutcome::NoError => {}
        DecodeOutcome::SingleCorrectableError(pos) => {
            tracing::debug!("correcting bit at position {}", pos);
            codeword.flip(pos);
        }
        DecodeOutcome::DoubleErrorDetected => {
            tracing::warn!("uncorrectable codeword {}", codeword.to_bitstr());
        }
    }
    outcome
}

/// Reads the 64 payload bits back out of a codeword, first payload bit as MSB.
/// Does not check or correct; call `correct` first.
pub fn extract_payload(codeword: &Codeword) -> u64 {
    codeword.payload()
}
