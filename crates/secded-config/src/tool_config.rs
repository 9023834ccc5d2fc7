use secded_core::{BitBuffer, CodewordPos, PAYLOAD_BITS};

/// Fault-injection scenarios run by the self-check demo
#[derive(Debug, Clone)]
pub struct CfgDemo {
    /// Payload to encode. A random payload is drawn when absent.
    pub payload: Option<BitBuffer>,
    /// 1-based position flipped for the single data-bit fault scenario
    pub single_flip: usize,
    /// Two 1-based positions flipped for the double fault scenario
    pub double_flip: [usize; 2],
    /// 1-based position flipped for the parity-bit fault scenario
    pub parity_flip: usize,
}

impl Default for CfgDemo {
    fn default() -> Self {
        Self {
            payload: None,
            single_flip: default_single_flip(),
            double_flip: default_double_flip(),
            parity_flip: default_parity_flip(),
        }
    }
}

#[inline]
fn default_single_flip() -> usize {
    42
}

#[inline]
fn default_double_flip() -> [usize; 2] {
    [42, 10]
}

#[inline]
fn default_parity_flip() -> usize {
    4
}

#[derive(Debug, Clone, Default)]
pub struct ToolConfig {
    /// Optional verbose log file
    pub debug_log: Option<String>,

    pub demo: CfgDemo,
}

impl ToolConfig {
    /// Validate that all configured scenarios can be run.
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(ref payload) = self.demo.payload {
            if payload.get_len() != PAYLOAD_BITS {
                return Err("demo.payload must hold exactly 64 bits");
            }
        }

        let in_range = |p: usize| CodewordPos::new(p).is_ok();
        if !in_range(self.demo.single_flip) {
            return Err("demo.single_flip must be a codeword position in 1..=72");
        }
        if !self.demo.double_flip.iter().all(|&p| in_range(p)) {
            return Err("demo.double_flip positions must be in 1..=72");
        }
        if self.demo.double_flip[0] == self.demo.double_flip[1] {
            return Err("demo.double_flip positions must differ");
        }
        match CodewordPos::new(self.demo.parity_flip) {
            Ok(pos) if pos.is_parity() => {}
            Ok(_) => return Err("demo.parity_flip must be a parity position (1, 2, 4, .., 64 or 72)"),
            Err(_) => return Err("demo.parity_flip must be a codeword position in 1..=72"),
        }

        Ok(())
    }
}
