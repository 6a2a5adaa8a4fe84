//! Token shape classification.
//!
//! A token is checked against two independent, unanchored patterns:
//!
//! - **action shape**: an uppercase letter, one or more lowercase letters, then
//!   one or more letters, underscores or hyphens (`Fixed`, `In-Progress`).
//! - **artifact shape**: one or two uppercase letters immediately followed by
//!   digits (`DE1235`, `S12`). The first such run found in the token is
//!   captured as `prefix` + `number`.
//!
//! Both searches may match anywhere inside the token. `STP9321` therefore
//! classifies with prefix `TP`, which the vocabulary later rejects; that
//! rejection is what stops the scan on malformed identifiers.
//!
//! Shape says nothing about validity. Whether `Fixed` is a recognized action
//! or `TP` a known abbreviation is decided by the [`Vocabulary`].
//!
//! [`Vocabulary`]: crate::Vocabulary

use regex::Regex;

bitflags::bitflags! {
    /// Shapes a single token can have. A token may carry both.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Shape: u8 {
        const ACTION   = 1 << 0;
        const ARTIFACT = 1 << 1;
    }
}

/// Result of classifying one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification<'t> {
    pub shape: Shape,
    /// Letter prefix of the first artifact-shaped run, if any.
    pub prefix: Option<&'t str>,
    /// Digit run following `prefix`.
    pub number: Option<&'t str>,
}

impl Classification<'_> {
    pub fn is_action(&self) -> bool {
        self.shape.contains(Shape::ACTION)
    }

    pub fn is_artifact(&self) -> bool {
        self.shape.contains(Shape::ARTIFACT)
    }

    pub fn is_noise(&self) -> bool {
        self.shape.is_empty()
    }
}

/// Compiled shape patterns.
///
/// Built once per [`Extractor`](crate::Extractor) and shared read-only by
/// every scan it runs.
#[derive(Debug, Clone)]
pub struct Classifier {
    action: Regex,
    artifact: Regex,
}

impl Classifier {
    const ACTION_PATTERN: &'static str = r"[A-Z][a-z]+[a-zA-Z_\-]+";
    // ASCII digits only; `\d` would also accept other Unicode decimal digits.
    const ARTIFACT_PATTERN: &'static str = r"(?P<prefix>[A-Z]{1,2})(?P<number>[0-9]+)";

    pub fn new() -> Self {
        let action = Regex::new(Self::ACTION_PATTERN).expect("action pattern is a valid literal");
        let artifact = Regex::new(Self::ARTIFACT_PATTERN).expect("artifact pattern is a valid literal");
        Classifier { action, artifact }
    }

    /// Classify `token`. Never fails; a token with no shape is noise.
    pub fn classify<'t>(&self, token: &'t str) -> Classification<'t> {
        let mut shape = Shape::empty();
        if self.action.is_match(token) {
            shape |= Shape::ACTION;
        }

        let (prefix, number) = match self.artifact.captures(token) {
            Some(caps) => {
                shape |= Shape::ARTIFACT;
                (caps.name("prefix").map(|m| m.as_str()), caps.name("number").map(|m| m.as_str()))
            }
            None => (None, None),
        };

        Classification { shape, prefix, number }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}
