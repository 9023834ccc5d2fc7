use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use secded_core::BitBuffer;
use serde::Deserialize;
use toml::Value;

use super::tool_config::{CfgDemo, ToolConfig};

/// Build `ToolConfig` from a TOML configuration string
pub fn from_toml_str(toml_str: &str) -> Result<ToolConfig, Box<dyn std::error::Error>> {
    let root: TomlConfigRoot = toml::from_str(toml_str)?;

    // Various sanity checks
    let expected_config_version = "0.1";
    if !root.config_version.eq(expected_config_version) {
        return Err(format!(
            "Unrecognized config_version: {}, expect {}",
            root.config_version, expected_config_version
        )
        .into());
    }
    if !root.extra.is_empty() {
        return Err(format!("Unrecognized top-level fields: {:?}", sorted_keys(&root.extra)).into());
    }
    if let Some(ref demo) = root.demo {
        if !demo.extra.is_empty() {
            return Err(format!("Unrecognized fields in demo: {:?}", sorted_keys(&demo.extra)).into());
        }
    }

    let mut cfg = ToolConfig {
        debug_log: root.debug_log,
        demo: CfgDemo::default(),
    };

    if let Some(demo) = root.demo {
        apply_demo_patch(&mut cfg.demo, demo)?;
    }

    cfg.validate()?;
    Ok(cfg)
}

/// Build `ToolConfig` from any reader.
pub fn from_reader<R: Read>(reader: R) -> Result<ToolConfig, Box<dyn std::error::Error>> {
    let mut contents = String::new();
    let mut reader = BufReader::new(reader);
    reader.read_to_string(&mut contents)?;
    from_toml_str(&contents)
}

/// Build `ToolConfig` from a file path.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<ToolConfig, Box<dyn std::error::Error>> {
    let f = File::open(path)?;
    from_reader(f)
}

fn apply_demo_patch(dst: &mut CfgDemo, src: DemoDto) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(payload) = src.payload {
        dst.payload = Some(BitBuffer::parse(&payload)?);
    }
    if let Some(v) = src.single_flip {
        dst.single_flip = v;
    }
    if let Some(v) = src.double_flip {
        dst.double_flip = v;
    }
    if let Some(v) = src.parity_flip {
        dst.parity_flip = v;
    }
    Ok(())
}

fn sorted_keys(map: &HashMap<String, Value>) -> Vec<&str> {
    let mut v: Vec<&str> = map.keys().map(|s| s.as_str()).collect();
    v.sort_unstable();
    v
}

/// ----------------------- DTOs for input shape -----------------------

#[derive(Deserialize)]
struct TomlConfigRoot {
    config_version: String,
    debug_log: Option<String>,

    #[serde(default)]
    demo: Option<DemoDto>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[derive(Default, Deserialize)]
struct DemoDto {
    pub payload: Option<String>,
    pub single_flip: Option<usize>,
    pub double_flip: Option<[usize; 2]>,
    pub parity_flip: Option<usize>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config() {
        let cfg = from_toml_str("config_version = \"0.1\"\n").unwrap();
        assert!(cfg.debug_log.is_none());
        assert!(cfg.demo.payload.is_none());
        assert_eq!(cfg.demo.double_flip, [42, 10]);
    }

    #[test]
    fn test_full_config() {
        let toml_str = r#"
            config_version = "0.1"
            debug_log = "secded-debug.log"

            [demo]
            payload = "0x0123456789abcdef"
            single_flip = 7
            double_flip = [1, 72]
            parity_flip = 72
        "#;
        let cfg = from_toml_str(toml_str).unwrap();
        assert_eq!(cfg.debug_log.as_deref(), Some("secded-debug.log"));
        let mut payload = cfg.demo.payload.unwrap();
        assert_eq!(payload.read_bits(64), Some(0x0123456789ABCDEF));
        assert_eq!(cfg.demo.single_flip, 7);
        assert_eq!(cfg.demo.double_flip, [1, 72]);
        assert_eq!(cfg.demo.parity_flip, 72);
    }

    #[test]
    fn test_binary_payload() {
        let toml_str = format!("config_version = \"0.1\"\n[demo]\npayload = \"{}\"\n", "01".repeat(32));
        let cfg = from_toml_str(&toml_str).unwrap();
        assert_eq!(cfg.demo.payload.unwrap().to_bitstr(), "01".repeat(32));
    }

    #[test]
    fn test_rejects_wrong_version() {
        let err = from_toml_str("config_version = \"0.5\"\n").unwrap_err();
        assert!(err.to_string().contains("Unrecognized config_version"));
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let err = from_toml_str("config_version = \"0.1\"\nstack_mode = \"Bs\"\n").unwrap_err();
        assert!(err.to_string().contains("stack_mode"));

        let err = from_toml_str("config_version = \"0.1\"\n[demo]\ntriple_flip = [1, 2, 3]\n").unwrap_err();
        assert!(err.to_string().contains("triple_flip"));
    }

    #[test]
    fn test_rejects_invalid_scenarios() {
        let err = from_toml_str("config_version = \"0.1\"\n[demo]\npayload = \"0x1234\"\n").unwrap_err();
        assert!(err.to_string().contains("64 bits"));

        let err = from_toml_str("config_version = \"0.1\"\n[demo]\npayload = \"0xZZ\"\n").unwrap_err();
        assert!(err.to_string().contains("invalid character"));

        let err = from_toml_str("config_version = \"0.1\"\n[demo]\nsingle_flip = 0\n").unwrap_err();
        assert!(err.to_string().contains("single_flip"));
    }

    #[test]
    fn test_from_reader() {
        let cfg = from_reader("config_version = \"0.1\"\n[demo]\nparity_flip = 16\n".as_bytes()).unwrap();
        assert_eq!(cfg.demo.parity_flip, 16);
    }
}
