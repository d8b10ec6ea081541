pub mod context;
pub mod eval;
pub mod ordering;
pub mod pesto;
pub mod picker;
pub mod search;
pub mod see;
pub mod tt;

/// UCI `setOption` surface (spec §6). `threads`/`multi_pv` are clamped back
/// to 1 with a `tracing::warn!` rather than rejected outright, matching how
/// `IllegalMove`/`OptionOutOfRange` are otherwise just logged and ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOptions {
    pub hash_mb: usize,
    pub threads: u8,
    pub ponder: bool,
    pub move_overhead_ms: u64,
    pub multi_pv: u8,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            hash_mb: 512,
            threads: 1,
            ponder: false,
            move_overhead_ms: 0,
            multi_pv: 1,
        }
    }
}

impl EngineOptions {
    /// Apply one `setoption name <name> value <value>` pair. Unrecognized
    /// names are logged and otherwise ignored, per spec §7's
    /// `OptionUnknown`/`OptionOutOfRange` handling.
    pub fn set(&mut self, name: &str, value: &str) {
        match name.to_ascii_lowercase().as_str() {
            "hashmb" | "hash" => {
                if let Ok(v) = value.parse() {
                    self.hash_mb = v;
                } else {
                    tracing::warn!(name, value, "OptionOutOfRange: could not parse HashMB");
                }
            }
            "threads" => match value.parse::<u8>() {
                Ok(1) => self.threads = 1,
                Ok(_) => {
                    tracing::warn!(value, "OptionOutOfRange: Threads clamped to 1");
                    self.threads = 1;
                }
                Err(_) => tracing::warn!(name, value, "OptionOutOfRange: could not parse Threads"),
            },
            "ponder" => {
                self.ponder = value.eq_ignore_ascii_case("true");
            }
            "moveoverhead" => {
                if let Ok(v) = value.parse() {
                    self.move_overhead_ms = v;
                } else {
                    tracing::warn!(name, value, "OptionOutOfRange: could not parse MoveOverhead");
                }
            }
            "multipv" => match value.parse::<u8>() {
                Ok(1) => self.multi_pv = 1,
                Ok(_) => {
                    tracing::warn!(value, "OptionOutOfRange: MultiPV clamped to 1");
                    self.multi_pv = 1;
                }
                Err(_) => tracing::warn!(name, value, "OptionOutOfRange: could not parse MultiPV"),
            },
            _ => tracing::warn!(name, "OptionUnknown: ignoring unrecognized UCI option"),
        }
    }
}
