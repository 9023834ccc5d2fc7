use secded_core::{BitBuffer, CODEWORD_BITS, CodewordPos, HAMMING_PARITY_BITS};

/// Hamming parity weights, ascending. `PARITY_WEIGHTS[i]` maps to syndrome bit i.
pub const PARITY_WEIGHTS: [usize; HAMMING_PARITY_BITS] = [1, 2, 4, 8, 16, 32, 64];

/// Codeword positions checked by one Hamming parity bit.
///
/// Holds every position p in [1, 71] with `p & weight != 0`, which includes
/// the parity slot `weight` itself. Position 72 (overall parity) is never covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverageSet {
    weight: usize,
    /// Bit `pos.index()` is set for every covered position
    mask: u128,
}

impl CoverageSet {
    pub const fn weight(&self) -> usize {
        self.weight
    }

    /// Slot where this parity bit is stored, equal to its weight
    pub const fn parity_pos(&self) -> CodewordPos {
        match CodewordPos::new(self.weight) {
            Ok(pos) => pos,
            Err(_) => panic!("parity weight outside codeword"),
        }
    }

    pub const fn contains(&self, pos: CodewordPos) -> bool {
        (self.mask >> pos.index()) & 1 == 1
    }

    pub const fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    pub const fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Covered positions, ascending
    pub fn iter(&self) -> impl Iterator<Item = CodewordPos> + '_ {
        CodewordPos::all().filter(|pos| self.contains(*pos))
    }

    /// XOR of the bits of `codeword` at the covered positions
    pub fn parity_of(&self, codeword: &BitBuffer) -> u8 {
        self.iter().fold(0, |acc, pos| acc ^ codeword.get_bit(pos.index()))
    }
}

const fn compute_coverage_map() -> [CoverageSet; HAMMING_PARITY_BITS] {
    let mut out = [CoverageSet { weight: 0, mask: 0 }; HAMMING_PARITY_BITS];
    let mut i = 0;
    while i < HAMMING_PARITY_BITS {
        let weight = PARITY_WEIGHTS[i];
        let mut mask = 0u128;
        // Storage offsets 0..71, i.e. positions 1..71; the overall parity slot is left out
        let mut idx = 0;
        while idx < CODEWORD_BITS - 1 {
            let pos = match CodewordPos::from_index(idx) {
                Some(pos) => pos,
                None => panic!("offset outside codeword"),
            };
            if pos.get() & weight != 0 {
                mask |= 1u128 << idx;
            }
            idx += 1;
        }
        out[i] = CoverageSet { weight, mask };
        i += 1;
    }
    out
}

/// Coverage of each parity weight, in `PARITY_WEIGHTS` order. Evaluated at compile time.
pub static COVERAGE_MAP: [CoverageSet; HAMMING_PARITY_BITS] = compute_coverage_map();

/// Coverage set for `weight`, or None if `weight` is not one of `PARITY_WEIGHTS`
pub fn coverage(weight: usize) -> Option<&'static CoverageSet> {
    if !weight.is_power_of_two() || weight > PARITY_WEIGHTS[HAMMING_PARITY_BITS - 1] {
        return None;
    }
    Some(&COVERAGE_MAP[weight.trailing_zeros() as usize])
}
