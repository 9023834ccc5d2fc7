use clap::{Parser, Subcommand};

use secded_codec::{COVERAGE_MAP, Codeword, DecodeOutcome, correct, encode, extract_payload};
use secded_config::{ToolConfig, toml_config};
use secded_core::{BitBuffer, CodecErr, CodewordPos, debug};

mod demo;

/// Load configuration file
fn load_config_from_toml(cfg_path: &str) -> ToolConfig {
    match toml_config::from_file(cfg_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration from {}: {}", cfg_path, e);
            std::process::exit(1);
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "SECDED Hamming(72,64) codec tool",
    long_about = "Encodes 64-bit payloads into 72-bit SECDED codewords, and diagnoses and corrects received codewords.\n\
                  Bit strings are written position 1 first; hex input needs a 0x prefix."
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a 64-bit payload into a 72-bit codeword
    Encode {
        #[arg(help = "Payload: 64 character 0/1 string or 0x-prefixed 16 digit hex")]
        payload: String,
    },

    /// Diagnose a 72-bit codeword, correcting a single flipped bit
    Decode {
        #[arg(help = "Codeword: 72 character 0/1 string or 0x-prefixed 18 digit hex")]
        codeword: String,
    },

    /// Flip bits of a codeword to model faults
    Flip {
        #[arg(help = "Codeword: 72 character 0/1 string or 0x-prefixed 18 digit hex")]
        codeword: String,

        #[arg(required = true, help = "1-based positions to flip [1..72]")]
        positions: Vec<usize>,
    },

    /// Run the clean / single / double / parity fault self-check
    Demo {
        #[arg(short = 'c', long = "config", help = "TOML config with demo scenarios")]
        config: Option<String>,
    },

    /// Print the positions covered by each Hamming parity bit
    Coverage,
}

fn parse_codeword(input: &str) -> Result<Codeword, CodecErr> {
    Codeword::from_bits(BitBuffer::parse(input)?)
}

fn run_encode(payload: &str) -> Result<(), CodecErr> {
    let cw = encode(&BitBuffer::parse(payload)?)?;
    println!("{}", cw);
    Ok(())
}

fn run_decode(codeword: &str) -> Result<DecodeOutcome, CodecErr> {
    let mut cw = parse_codeword(codeword)?;
    let outcome = correct(&mut cw);
    println!("Status:    {}", outcome);
    if outcome.error_position().is_some() {
        println!("Corrected: {}", cw);
    }
    if outcome.is_recoverable() {
        println!("Payload:   0x{:016X}", extract_payload(&cw));
    } else {
        println!("Payload:   unreliable, codeword is not correctable");
    }
    Ok(outcome)
}

fn run_flip(codeword: &str, positions: &[usize]) -> Result<(), CodecErr> {
    let mut cw = parse_codeword(codeword)?;
    for &p in positions {
        cw.flip(CodewordPos::new(p)?);
        tracing::debug!("flipped bit at position {}", p);
    }
    println!("{}", cw);
    Ok(())
}

fn print_coverage() {
    for set in COVERAGE_MAP.iter() {
        let positions: Vec<String> = set.iter().map(|p| p.to_string()).collect();
        println!("p{:<2} ({:>2} positions): {}", set.weight(), set.len(), positions.join(" "));
    }
    println!("p72 (overall parity): all positions 1..71");
}

fn exit_on_err<T>(result: Result<T, CodecErr>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn main() {
    let args = Args::parse();

    let cfg = match args.command {
        Command::Demo { config: Some(ref path) } => load_config_from_toml(path),
        _ => ToolConfig::default(),
    };
    let _log_guard = debug::setup_logging_default(cfg.debug_log.clone());

    match args.command {
        Command::Encode { payload } => exit_on_err(run_encode(&payload)),
        Command::Decode { codeword } => {
            // Exit status 2 signals an uncorrectable codeword to scripts
            if exit_on_err(run_decode(&codeword)) == DecodeOutcome::DoubleErrorDetected {
                std::process::exit(2);
            }
        }
        Command::Flip { codeword, positions } => exit_on_err(run_flip(&codeword, &positions)),
        Command::Demo { .. } => {
            eprintln!("[+] SECDED Hamming(72,64) self-check");
            if !exit_on_err(demo::run_demo(&cfg.demo)) {
                std::process::exit(1);
            }
        }
        Command::Coverage => print_coverage(),
    }
}
