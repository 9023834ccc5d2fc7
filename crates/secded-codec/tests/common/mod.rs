use secded_codec::{Codeword, encode_u64};
use secded_core::CodewordPos;

/// Fixed payloads that exercise all-zero, all-one and alternating patterns
pub const FIXED_PAYLOADS: [u64; 6] = [
    0,
    u64::MAX,
    0x5555_5555_5555_5555,
    0xAAAA_AAAA_AAAA_AAAA,
    0x0123_4567_89AB_CDEF,
    0x8000_0000_0000_0001,
];

/// Fixed payloads followed by `num_random` random ones
pub fn test_payloads(num_random: usize) -> Vec<u64> {
    let mut payloads = FIXED_PAYLOADS.to_vec();
    payloads.extend((0..num_random).map(|_| rand::random::<u64>()));
    payloads
}

/// Encodes `payload` and flips the given 1-based positions
pub fn encode_with_faults(payload: u64, faults: &[CodewordPos]) -> Codeword {
    let mut cw = encode_u64(payload);
    for &pos in faults {
        cw.flip(pos);
    }
    cw
}

/// All distinct position pairs (p, q) with p < q
pub fn all_position_pairs() -> Vec<(CodewordPos, CodewordPos)> {
    let positions: Vec<CodewordPos> = CodewordPos::all().collect();
    let mut pairs = Vec::with_capacity(positions.len() * (positions.len() - 1) / 2);
    for (i, &p) in positions.iter().enumerate() {
        for &q in &positions[i + 1..] {
            pairs.push((p, q));
        }
    }
    pairs
}
