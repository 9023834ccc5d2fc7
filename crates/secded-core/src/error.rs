use core::fmt;

/// Errors raised when a caller hands the codec malformed input.
/// Uncorrectable codewords are not errors; they are reported as a decode outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecErr {
    /// Bit sequence does not have the exact length the operation requires
    InvalidLength { expected: usize, found: usize },
    /// Bit string or hex string contains a character that is not a valid digit
    InvalidCharacter { found: char, offset: usize },
    /// 1-based codeword position outside of [1, 72]
    PositionOutOfRange { position: usize },
}

impl fmt::Display for CodecErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecErr::InvalidLength { expected, found } => {
                write!(f, "invalid length: expected {} bits, found {}", expected, found)
            }
            CodecErr::InvalidCharacter { found, offset } => {
                write!(f, "invalid character `{}` at offset {}", found, offset)
            }
            CodecErr::PositionOutOfRange { position } => {
                write!(f, "codeword position {} out of range [1, 72]", position)
            }
        }
    }
}

impl std::error::Error for CodecErr {}

/// Checks whether a bit sequence has the expected length. If not, returns CodecErr::InvalidLength
#[macro_export]
macro_rules! expect_len {
    ($found:expr, $expected:expr) => {{
        let found: usize = $found;
        let expected: usize = $expected;
        if found == expected {
            Ok(())
        } else {
            Err($crate::CodecErr::InvalidLength { expected, found })
        }
    }};
}
