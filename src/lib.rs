//! Extract work-item references and lifecycle actions from commit messages.
//!
//! A commit message such as `"DE543 Completed DE322 Fixed"` mentions tracker
//! artifacts (`DE543`, `DE322`) and the state transitions the author intends
//! for them (`Completed`, `Fixed`). [`Extractor`] turns such a message into an
//! [`ActionMap`]: an ordered mapping from action (or no action) to the
//! artifacts it governs.
//!
//! ```
//! use commit_actions::{Extractor, Vocabulary};
//!
//! let extractor = Extractor::new(Vocabulary::standard());
//! let map = extractor.extract("DE543 Completed DE322 Fixed S235 Completed overnight delivery");
//!
//! assert_eq!(map.get(Some("Completed")), Some(&["DE543".to_string(), "S235".to_string()][..]));
//! assert_eq!(map.get(Some("Fixed")), Some(&["DE322".to_string()][..]));
//! ```

#[macro_use]
mod macros;
mod api;
mod config;
mod engine;
pub mod identity;

pub use api::{
    ActionEntry, ActionMap, ActionScope, ExtractionVerbose, Extractor, Options, StateUpdate, extract,
    extract_verbose_with, extract_with,
};
pub use config::{ArtifactSpec, ConfigError, ExtractorConfig, Vocabulary};
pub use engine::{AbortInfo, ScanTrace, Shape, TokenRecord};

// --- Internal types ---------------------------------------------------------

/// The action slot of a grouping.
///
/// `Unset` and `Unrecognized` both surface as "no action" in the result, but
/// only a `Word` makes a grouping action-saturated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) enum ActionSlot {
    #[default]
    Unset,
    /// An action-shaped word was seen but is not in the vocabulary.
    Unrecognized,
    Word(String),
}

impl ActionSlot {
    /// Label used for the result mapping. Both empty states collapse to `None`.
    pub fn label(&self) -> Option<&str> {
        match self {
            ActionSlot::Word(word) => Some(word.as_str()),
            ActionSlot::Unset | ActionSlot::Unrecognized => None,
        }
    }

    pub fn is_word(&self) -> bool {
        matches!(self, ActionSlot::Word(_))
    }
}

/// Which kind of element a grouping received first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum FirstKind {
    #[default]
    Unset,
    Action,
    Target,
}
