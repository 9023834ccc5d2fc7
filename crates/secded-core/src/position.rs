use core::fmt;

use crate::error::CodecErr;

/// Number of bits in a codeword
pub const CODEWORD_BITS: usize = 72;
/// Number of payload bits carried by a codeword
pub const PAYLOAD_BITS: usize = 64;
/// Number of Hamming parity bits (excluding the overall parity bit)
pub const HAMMING_PARITY_BITS: usize = 7;

/// A 1-based position inside a 72-bit codeword.
///
/// Positions are 1..=72 throughout the codec, while storage is 0-indexed.
/// This type is the only place where the two are converted: construct it from
/// a 1-based position with [`CodewordPos::new`] and get the storage offset
/// with [`CodewordPos::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CodewordPos(u8);

impl CodewordPos {
    /// Overall parity bit, covering the whole codeword
    pub const OVERALL_PARITY: CodewordPos = CodewordPos(CODEWORD_BITS as u8);

    /// Validates a 1-based position
    pub const fn new(pos: usize) -> Result<Self, CodecErr> {
        if pos >= 1 && pos <= CODEWORD_BITS {
            Ok(CodewordPos(pos as u8))
        } else {
            Err(CodecErr::PositionOutOfRange { position: pos })
        }
    }

    /// Position for 0-based storage offset `idx`
    pub const fn from_index(idx: usize) -> Option<Self> {
        if idx < CODEWORD_BITS {
            Some(CodewordPos(idx as u8 + 1))
        } else {
            None
        }
    }

    /// 1-based position
    #[inline]
    pub const fn get(self) -> usize {
        self.0 as usize
    }

    /// 0-based storage offset
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// True for the seven Hamming parity slots 1, 2, 4, .., 64
    pub const fn is_hamming_parity(self) -> bool {
        (self.0 as usize).is_power_of_two()
    }

    pub const fn is_overall_parity(self) -> bool {
        self.0 as usize == CODEWORD_BITS
    }

    pub const fn is_parity(self) -> bool {
        self.is_hamming_parity() || self.is_overall_parity()
    }

    pub const fn is_payload(self) -> bool {
        !self.is_parity()
    }

    /// All positions 1..=72, ascending
    pub fn all() -> impl Iterator<Item = CodewordPos> {
        (1..=CODEWORD_BITS as u8).map(CodewordPos)
    }

    /// The 64 payload positions, ascending. The n-th item holds payload bit n.
    pub fn payload_positions() -> impl Iterator<Item = CodewordPos> {
        Self::all().filter(|p| p.is_payload())
    }
}

impl TryFrom<usize> for CodewordPos {
    type Error = CodecErr;

    fn try_from(pos: usize) -> Result<Self, Self::Error> {
        CodewordPos::new(pos)
    }
}

impl fmt::Display for CodewordPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
