mod common;

use secded_codec::{Codeword, DecodeOutcome, correct, decode, decode_codeword, encode, encode_u64, extract_payload};
use secded_core::{BitBuffer, CodecErr, CodewordPos, debug};

use common::{all_position_pairs, encode_with_faults, test_payloads};

fn pos(p: usize) -> CodewordPos {
    CodewordPos::new(p).unwrap()
}

#[test]
fn test_clean_codewords_decode_without_error() {
    for payload in test_payloads(64) {
        let cw = encode_u64(payload);
        assert_eq!(decode_codeword(&cw), DecodeOutcome::NoError, "payload {:016X}", payload);
        assert_eq!(extract_payload(&cw), payload);
    }
}

#[test]
fn test_every_single_flip_is_located_and_corrected() {
    for payload in test_payloads(16) {
        for p in CodewordPos::all() {
            let mut cw = encode_with_faults(payload, &[p]);
            assert_eq!(
                decode_codeword(&cw),
                DecodeOutcome::SingleCorrectableError(p),
                "payload {:016X} flip {}",
                payload,
                p
            );

            // Caller-side recovery: flip the reported bit back
            cw.flip(p);
            assert_eq!(decode_codeword(&cw), DecodeOutcome::NoError);
            assert_eq!(extract_payload(&cw), payload);
        }
    }
}

#[test]
fn test_correct_recovers_payload() {
    for payload in test_payloads(8) {
        for p in CodewordPos::all() {
            let mut cw = encode_with_faults(payload, &[p]);
            assert_eq!(correct(&mut cw), DecodeOutcome::SingleCorrectableError(p));
            assert_eq!(cw, encode_u64(payload));
        }
    }
}

#[test]
fn test_every_double_flip_is_detected() {
    let pairs = all_position_pairs();
    assert_eq!(pairs.len(), 72 * 71 / 2);

    for payload in test_payloads(4) {
        for &(p, q) in &pairs {
            let cw = encode_with_faults(payload, &[p, q]);
            assert_eq!(
                decode_codeword(&cw),
                DecodeOutcome::DoubleErrorDetected,
                "payload {:016X} flips {} {}",
                payload,
                p,
                q
            );
        }
    }
}

#[test]
fn test_double_flip_is_never_miscorrected() {
    let mut cw = encode_with_faults(0xC0FF_EE00_1234_5678, &[pos(3), pos(5)]);
    let before = cw.clone();
    let outcome = correct(&mut cw);
    assert_eq!(outcome, DecodeOutcome::DoubleErrorDetected);
    assert!(!outcome.is_recoverable());
    assert_eq!(cw, before);
}

#[test]
fn test_length_preconditions() {
    for len in [63, 65, 0, 72] {
        assert_eq!(
            encode(&BitBuffer::new(len)).unwrap_err(),
            CodecErr::InvalidLength { expected: 64, found: len }
        );
    }
    for len in [71, 73, 0, 64] {
        assert_eq!(
            decode(&BitBuffer::new(len)).unwrap_err(),
            CodecErr::InvalidLength { expected: 72, found: len }
        );
    }
}

#[test]
fn test_reference_scenarios() {
    debug::setup_logging_verbose();

    // All-zero payload encodes to the all-zero codeword
    let payload = BitBuffer::from_bitstr(&"0".repeat(64)).unwrap();
    let clean = encode(&payload).unwrap();
    assert_eq!(clean.to_bitstr(), "0".repeat(72));
    assert_eq!(decode(clean.as_bits()), Ok(DecodeOutcome::NoError));

    // Data bit fault
    let mut cw = clean.clone();
    cw.flip(pos(42));
    assert_eq!(decode(cw.as_bits()), Ok(DecodeOutcome::SingleCorrectableError(pos(42))));

    // Second fault on top of it
    cw.flip(pos(10));
    assert_eq!(decode(cw.as_bits()), Ok(DecodeOutcome::DoubleErrorDetected));

    // Overall parity bit fault
    let mut cw = clean.clone();
    cw.flip(CodewordPos::OVERALL_PARITY);
    assert_eq!(decode(cw.as_bits()), Ok(DecodeOutcome::SingleCorrectableError(pos(72))));
}

#[test]
fn test_bitstring_roundtrip_through_decoder() {
    let payload = 0x0F1E_2D3C_4B5A_6978u64;
    let encoded = encode_u64(payload).to_bitstr();
    assert_eq!(encoded.len(), 72);

    let received = Codeword::from_bitstr(&encoded).unwrap();
    assert_eq!(decode_codeword(&received), DecodeOutcome::NoError);
    assert_eq!(received.payload_bits(), BitBuffer::from_u64(payload, 64));
}

#[test]
fn test_concurrent_use() {
    let handles: Vec<_> = (0..4u64)
        .map(|t| {
            std::thread::spawn(move || {
                for i in 0..256u64 {
                    let payload = (t << 60) ^ i.wrapping_mul(0x9E37_79B9_7F4A_7C15);
                    let p = CodewordPos::new((i as usize % 72) + 1).unwrap();
                    let mut cw = encode_with_faults(payload, &[p]);
                    assert_eq!(correct(&mut cw), DecodeOutcome::SingleCorrectableError(p));
                    assert_eq!(extract_payload(&cw), payload);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
}
