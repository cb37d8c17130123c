use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive start / stop character offsets of a segment in the source SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub stop: usize,
}

impl Span {
    /// Position used for nodes synthesized by the compiler.
    pub const ZERO: Span = Span { start: 0, stop: 0 };

    pub fn new(start: usize, stop: usize) -> Self {
        Self { start, stop }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.stop)
    }
}
