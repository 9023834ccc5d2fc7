//! Configuration for the SECDED command-line tool
//!
//! - TOML configuration file parsing
//! - Tool configuration structures and validation

pub mod tool_config;
pub mod toml_config;

pub use tool_config::*;
