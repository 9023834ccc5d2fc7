use std::fmt;

use crate::error::CodecErr;

/// Fixed-length bit container, packed MSB-first into bytes.
///
/// Supports sequential access through a cursor (`pos`) as well as random
/// access by 0-based offset. The length never changes after construction.
#[derive(Clone)]
pub struct BitBuffer {
    buffer: Vec<u8>,
    pos: usize, // next bit offset for sequential read/write
    len: usize, // number of valid bits
}

impl BitBuffer {
    /// Create a zeroed buffer holding exactly `len_bits` bits.
    pub fn new(len_bits: usize) -> Self {
        BitBuffer {
            buffer: vec![0; len_bits.div_ceil(8)],
            pos: 0,
            len: len_bits,
        }
    }

    /// Parse a string of '0'/'1' characters. Any other character is rejected.
    pub fn from_bitstr(bitstr: &str) -> Result<Self, CodecErr> {
        let mut buf = BitBuffer::new(bitstr.chars().count());
        for (offset, c) in bitstr.chars().enumerate() {
            match c {
                '0' => buf.write_bit(0),
                '1' => buf.write_bit(1),
                found => return Err(CodecErr::InvalidCharacter { found, offset }),
            }
        }
        buf.pos = 0;
        Ok(buf)
    }

    /// Parse a hex string (optionally prefixed with `0x`), 4 bits per digit.
    pub fn from_hexstr(hexstr: &str) -> Result<Self, CodecErr> {
        let digits = hexstr.strip_prefix("0x").or_else(|| hexstr.strip_prefix("0X")).unwrap_or(hexstr);
        let prefix_len = hexstr.len() - digits.len();
        let mut buf = BitBuffer::new(digits.chars().count() * 4);
        for (i, c) in digits.chars().enumerate() {
            let Some(nibble) = c.to_digit(16) else {
                return Err(CodecErr::InvalidCharacter { found: c, offset: prefix_len + i });
            };
            buf.write_bits(nibble as u64, 4);
        }
        buf.pos = 0;
        Ok(buf)
    }

    /// Parse user input: `0x`-prefixed hex, otherwise a '0'/'1' string. Surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Result<Self, CodecErr> {
        let input = input.trim();
        if input.starts_with("0x") || input.starts_with("0X") {
            Self::from_hexstr(input)
        } else {
            Self::from_bitstr(input)
        }
    }

    /// Construct a `num_bits` long buffer holding the low `num_bits` of `value`, MSB first.
    pub fn from_u64(value: u64, num_bits: usize) -> Self {
        let mut buf = BitBuffer::new(num_bits);
        buf.write_bits(value, num_bits);
        buf.pos = 0;
        buf
    }

    /// Total length in bits
    pub fn get_len(&self) -> usize {
        self.len
    }

    /// Number of bits left from pos to end
    pub fn get_len_remaining(&self) -> usize {
        self.len - self.pos
    }

    pub fn get_pos(&self) -> usize {
        self.pos
    }

    /// Seek `pos` to `offset`.
    pub fn seek(&mut self, offset: usize) {
        assert!(offset <= self.len, "seek out of range: got {}, allowed [0,{}]", offset, self.len);
        self.pos = offset;
    }

    // Random access /////////////////////////////////////////////////////////

    /// Bit at 0-based `offset`, or None if outside the buffer
    pub fn read_bit_at(&self, offset: usize) -> Option<u8> {
        if offset >= self.len {
            return None;
        }
        Some(self.read_bit_at_unchecked(offset))
    }

    /// Bit at 0-based `offset`. Panics when out of range.
    pub fn get_bit(&self, offset: usize) -> u8 {
        assert!(offset < self.len, "get_bit: offset {} exceeds length {}", offset, self.len);
        self.read_bit_at_unchecked(offset)
    }

    /// Set bit at 0-based `offset` to `value` (0 or 1). Panics when out of range.
    pub fn write_bit_at(&mut self, offset: usize, value: u8) {
        assert!(value == 0 || value == 1, "write_bit_at: value must be 0 or 1");
        assert!(offset < self.len, "write_bit_at: offset {} exceeds length {}", offset, self.len);
        let mask = 1u8 << (7 - (offset % 8));
        if value == 1 {
            self.buffer[offset / 8] |= mask;
        } else {
            self.buffer[offset / 8] &= !mask;
        }
    }

    /// Invert bit at 0-based `offset`. Panics when out of range.
    pub fn flip_bit_at(&mut self, offset: usize) {
        assert!(offset < self.len, "flip_bit_at: offset {} exceeds length {}", offset, self.len);
        self.buffer[offset / 8] ^= 1 << (7 - (offset % 8));
    }

    /// XOR of all bits in the buffer
    pub fn parity(&self) -> u8 {
        let ones: u32 = self.buffer.iter().map(|b| b.count_ones()).sum();
        // Bits past `len` are never set, so whole-byte counting is exact
        (ones & 1) as u8
    }

    // Sequential access /////////////////////////////////////////////////////

    /// Read up to 64 bits at pos, MSB first, advancing on success.
    /// Returns None if `num_bits > 64` or not enough bits remain.
    pub fn read_bits(&mut self, num_bits: usize) -> Option<u64> {
        if num_bits > 64 || num_bits > self.get_len_remaining() {
            return None;
        }
        let mut v = 0u64;
        for i in 0..num_bits {
            v = (v << 1) | self.read_bit_at_unchecked(self.pos + i) as u64;
        }
        self.pos += num_bits;
        Some(v)
    }

    /// Write a single bit to pos. Panics if the buffer is full.
    pub fn write_bit(&mut self, value: u8) {
        assert!(self.pos < self.len, "write would exceed buffer end");
        self.write_bit_at(self.pos, value);
        self.pos += 1;
    }

    /// Write the low `num_bits` of `value` at pos, MSB first.
    pub fn write_bits(&mut self, value: u64, num_bits: usize) {
        assert!(num_bits <= 64, "can only write up to 64 bits");
        assert!(num_bits == 64 || value >> num_bits == 0, "value exceeds num_bits {} {}", value, num_bits);
        assert!(self.pos + num_bits <= self.len, "write would exceed buffer end");
        for i in (0..num_bits).rev() {
            self.write_bit(((value >> i) & 1) as u8);
        }
    }

    // Conversions /////////////////////////////////////////////////////////

    /// Entire buffer as a String of '0'/'1' characters.
    pub fn to_bitstr(&self) -> String {
        (0..self.len)
            .map(|i| if self.read_bit_at_unchecked(i) == 1 { '1' } else { '0' })
            .collect()
    }

    /// Dump as uppercase hex, 4 bits per digit. A trailing partial nibble is padded with zeroes.
    pub fn dump_hex(&self) -> String {
        let mut s = String::with_capacity(self.len.div_ceil(4));
        for nibble_start in (0..self.len).step_by(4) {
            let mut digit = 0u8;
            for i in 0..4 {
                let bit = self.read_bit_at(nibble_start + i).unwrap_or(0);
                digit = (digit << 1) | bit;
            }
            s.push_str(&format!("{:X}", digit));
        }
        s
    }

    /// Dump as '0'/'1' string with a ^ marker before the current pos.
    pub fn dump_bin(&self) -> String {
        let mut s = String::with_capacity(self.len + 1);
        for i in 0..self.len {
            if i == self.pos {
                s.push('^');
            }
            s.push(if self.read_bit_at_unchecked(i) == 1 { '1' } else { '0' });
        }
        if self.pos == self.len {
            s.push('^');
        }
        s
    }

    /// Caller must ensure `offset < len`
    #[inline]
    fn read_bit_at_unchecked(&self, offset: usize) -> u8 {
        (self.buffer[offset / 8] >> (7 - (offset % 8))) & 1
    }
}

/// Buffers are equal when they hold the same bits; the cursor is not compared
impl PartialEq for BitBuffer {
    fn eq(&self, other: &Self) -> bool {
        // Bits past `len` are never set
        self.len == other.len && self.buffer == other.buffer
    }
}

impl Eq for BitBuffer {}

impl fmt::Debug for BitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitBuffer {{ ^{} len {} {} }}", self.pos, self.len, self.dump_bin())
    }
}
