use secded_codec::{Codeword, DecodeOutcome, correct, encode, encode_u64};
use secded_config::CfgDemo;
use secded_core::{CodecErr, CodewordPos};

/// One fault-injection run against a freshly encoded codeword
struct Scenario {
    name: &'static str,
    faults: Vec<CodewordPos>,
    expected: DecodeOutcome,
}

impl Scenario {
    fn build_all(cfg: &CfgDemo) -> Result<Vec<Scenario>, CodecErr> {
        let single = CodewordPos::new(cfg.single_flip)?;
        let double = [CodewordPos::new(cfg.double_flip[0])?, CodewordPos::new(cfg.double_flip[1])?];
        let parity = CodewordPos::new(cfg.parity_flip)?;

        Ok(vec![
            Scenario {
                name: "Clean data check",
                faults: vec![],
                expected: DecodeOutcome::NoError,
            },
            Scenario {
                name: "Single error check",
                faults: vec![single],
                expected: DecodeOutcome::SingleCorrectableError(single),
            },
            Scenario {
                name: "Double error check",
                faults: double.to_vec(),
                expected: DecodeOutcome::DoubleErrorDetected,
            },
            Scenario {
                name: "Single parity error check",
                faults: vec![parity],
                expected: DecodeOutcome::SingleCorrectableError(parity),
            },
        ])
    }
}

/// Encodes the configured (or a random) payload and runs the clean, single data fault,
/// double fault and single parity fault scenarios against it.
/// Returns true if every scenario produced the expected outcome.
pub fn run_demo(cfg: &CfgDemo) -> Result<bool, CodecErr> {
    let clean: Codeword = match cfg.payload {
        Some(ref bits) => encode(bits)?,
        None => encode_u64(rand::random::<u64>()),
    };
    let payload = clean.payload();

    println!("Original data: {:064b}", payload);
    println!("Encoded data:  {}", clean);
    println!();

    let mut all_ok = true;
    for scenario in Scenario::build_all(cfg)? {
        let mut cw = clean.clone();
        for &pos in &scenario.faults {
            cw.flip(pos);
            tracing::debug!("{}: flipped bit at position {}", scenario.name, pos);
        }

        let outcome = correct(&mut cw);
        let recovered = outcome.is_recoverable() && cw.payload() == payload;
        let ok = outcome == scenario.expected;
        all_ok &= ok;

        println!(
            "{:<27} {:<30} payload {:<11} [{}]",
            format!("{}:", scenario.name),
            outcome.to_string(),
            if recovered { "recovered" } else { "unreliable" },
            if ok { "ok" } else { "UNEXPECTED" }
        );
        if !ok {
            tracing::error!("{}: expected {}, got {}", scenario.name, scenario.expected, outcome);
        }
    }

    Ok(all_ok)
}
