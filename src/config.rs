use std::fmt;
use std::str::FromStr;

/// What `+`, `-`, `*` and `/` do when the exact result does not fit in an `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Two's-complement wraparound, the behaviour of native machine integers.
    #[default]
    Wrapping,
    /// Clamp to `i64::MIN` / `i64::MAX`.
    Saturating,
}

impl OverflowPolicy {
    pub const NAMES: [&'static str; 2] = ["wrapping", "saturating"];
}

impl FromStr for OverflowPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wrapping" | "wrap" => Ok(OverflowPolicy::Wrapping),
            "saturating" | "saturate" => Ok(OverflowPolicy::Saturating),
            other => Err(format!(
                "unknown overflow policy '{}', expected one of: {}",
                other,
                Self::NAMES.join(", ")
            )),
        }
    }
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OverflowPolicy::Wrapping => write!(f, "wrapping"),
            OverflowPolicy::Saturating => write!(f, "saturating"),
        }
    }
}

/// Settings shared by the REPL and one-shot evaluation.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Print the syntax tree and its node count before each result.
    pub show_tree: bool,
    pub overflow: OverflowPolicy,
}
