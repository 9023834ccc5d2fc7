use std::fmt;

use secded_core::{BitBuffer, CODEWORD_BITS, CodecErr, CodewordPos, PAYLOAD_BITS, expect_len};

/// A 72-bit SECDED codeword. The length is checked on construction and never changes.
#[derive(Clone, PartialEq, Eq)]
pub struct Codeword {
    bits: BitBuffer,
}

impl Codeword {
    /// All-zero codeword, which is also the valid encoding of the all-zero payload
    pub fn zeroed() -> Self {
        Codeword { bits: BitBuffer::new(CODEWORD_BITS) }
    }

    /// Wraps a bit sequence, failing with InvalidLength unless it holds exactly 72 bits
    pub fn from_bits(bits: BitBuffer) -> Result<Self, CodecErr> {
        expect_len!(bits.get_len(), CODEWORD_BITS)?;
        Ok(Codeword { bits })
    }

    /// Parses a 72 character string of '0'/'1', position 1 first
    pub fn from_bitstr(bitstr: &str) -> Result<Self, CodecErr> {
        Self::from_bits(BitBuffer::from_bitstr(bitstr)?)
    }

    pub fn get(&self, pos: CodewordPos) -> u8 {
        self.bits.get_bit(pos.index())
    }

    pub fn set(&mut self, pos: CodewordPos, value: u8) {
        self.bits.write_bit_at(pos.index(), value);
    }

    /// Inverts the bit at `pos`, modelling a single-bit fault or undoing one
    pub fn flip(&mut self, pos: CodewordPos) {
        self.bits.flip_bit_at(pos.index());
    }

    /// XOR over all 72 bits
    pub fn parity(&self) -> u8 {
        self.bits.parity()
    }

    /// The 64 payload bits, read from the payload positions in ascending order
    pub fn payload_bits(&self) -> BitBuffer {
        let mut payload = BitBuffer::new(PAYLOAD_BITS);
        for pos in CodewordPos::payload_positions() {
            payload.write_bit(self.get(pos));
        }
        payload.seek(0);
        payload
    }

    /// Payload as an integer, first payload bit as MSB
    pub fn payload(&self) -> u64 {
        CodewordPos::payload_positions().fold(0u64, |acc, pos| (acc << 1) | self.get(pos) as u64)
    }

    pub fn as_bits(&self) -> &BitBuffer {
        &self.bits
    }

    pub fn into_bits(self) -> BitBuffer {
        self.bits
    }

    pub fn to_bitstr(&self) -> String {
        self.bits.to_bitstr()
    }
}

impl TryFrom<BitBuffer> for Codeword {
    type Error = CodecErr;

    fn try_from(bits: BitBuffer) -> Result<Self, Self::Error> {
        Codeword::from_bits(bits)
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits.to_bitstr())
    }
}

impl fmt::Debug for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Codeword {{ {} }}", self.bits.dump_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_checked() {
        assert_eq!(
            Codeword::from_bits(BitBuffer::new(71)).unwrap_err(),
            CodecErr::InvalidLength { expected: 72, found: 71 }
        );
        assert_eq!(
            Codeword::from_bits(BitBuffer::new(73)).unwrap_err(),
            CodecErr::InvalidLength { expected: 72, found: 73 }
        );
        assert!(Codeword::try_from(BitBuffer::new(72)).is_ok());
    }

    #[test]
    fn test_flip_is_one_based() {
        let mut cw = Codeword::zeroed();
        cw.flip(CodewordPos::new(1).unwrap());
        cw.flip(CodewordPos::OVERALL_PARITY);
        let s = cw.to_bitstr();
        assert!(s.starts_with('1'));
        assert!(s.ends_with('1'));
        assert_eq!(s.matches('1').count(), 2);
        assert_eq!(cw.parity(), 0);
    }

    #[test]
    fn test_payload_positions() {
        // Position 3 is the first payload slot, 71 the last
        let mut cw = Codeword::zeroed();
        cw.set(CodewordPos::new(3).unwrap(), 1);
        assert_eq!(cw.payload(), 1 << 63);
        cw.set(CodewordPos::new(71).unwrap(), 1);
        assert_eq!(cw.payload(), (1 << 63) | 1);

        // Parity slots never leak into the payload
        cw.set(CodewordPos::new(64).unwrap(), 1);
        cw.set(CodewordPos::OVERALL_PARITY, 1);
        assert_eq!(cw.payload(), (1 << 63) | 1);
        assert_eq!(cw.payload_bits().to_bitstr(), format!("1{}1", "0".repeat(62)));
    }
}
