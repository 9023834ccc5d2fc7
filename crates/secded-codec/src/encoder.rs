use secded_core::{BitBuffer, CodecErr, CodewordPos, PAYLOAD_BITS, expect_len};

use crate::codeword::Codeword;
use crate::coverage::COVERAGE_MAP;

/// Encodes 64 payload bits into a 72-bit SECDED codeword.
/// Fails with InvalidLength if `payload` does not hold exactly 64 bits.
pub fn encode(payload: &BitBuffer) -> Result<Codeword, CodecErr> {
    expect_len!(payload.get_len(), PAYLOAD_BITS)?;
    Ok(encode_checked(payload))
}

/// Encodes a 64-bit integer, MSB first
pub fn encode_u64(payload: u64) -> Codeword {
    encode_checked(&BitBuffer::from_u64(payload, PAYLOAD_BITS))
}

/// Caller guarantees `payload` holds 64 bits
fn encode_checked(payload: &BitBuffer) -> Codeword {
    tracing::trace!("encode payload {}", payload.dump_hex());
    let mut cw = Codeword::zeroed();

    // Payload bits fill the non-parity positions in ascending order
    for (i, pos) in CodewordPos::payload_positions().enumerate() {
        cw.set(pos, payload.get_bit(i));
    }

    // Hamming parity bits. Each coverage set holds its own slot, which still reads as zero here,
    // and no other parity slot, so the order of evaluation does not matter.
    for set in COVERAGE_MAP.iter() {
        let parity = set.parity_of(cw.as_bits());
        cw.set(set.parity_pos(), parity);
    }

    // Overall parity over all other 71 bits; slot 72 is still zero
    let overall = cw.parity();
    cw.set(CodewordPos::OVERALL_PARITY, overall);

    tracing::trace!("encode codeword {}", cw.to_bitstr());
    cw
}
