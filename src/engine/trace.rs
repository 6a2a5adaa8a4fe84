//! Scan trace data.
//!
//! Collected only by the verbose entry points; the plain extraction path
//! does not record per-token data.

use super::classify::Shape;
use std::time::Duration;

/// Where and why a scan stopped early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbortInfo {
    /// Zero-based token index of the offending token.
    pub position: usize,
    pub token: String,
    /// Artifact prefix that is not a configured abbreviation.
    pub prefix: String,
}

/// One examined token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRecord {
    pub position: usize,
    pub token: String,
    pub shape: Shape,
    pub prefix: Option<String>,
}

impl TokenRecord {
    pub fn is_action(&self) -> bool {
        self.shape.contains(Shape::ACTION)
    }

    pub fn is_artifact(&self) -> bool {
        self.shape.contains(Shape::ARTIFACT)
    }
}

/// What a single extraction saw and did.
#[derive(Debug, Clone, Default)]
pub struct ScanTrace {
    /// Number of tokens in the message.
    pub token_count: usize,
    /// Tokens examined before the scan ended, with their shapes.
    pub tokens: Vec<TokenRecord>,
    /// Groupings in close order, before coalescing. Rendered as text.
    pub groups: Vec<String>,
    pub abort: Option<AbortInfo>,
    pub elapsed: Duration,
}
