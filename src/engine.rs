//! Scanning engine.
//!
//! This module holds everything between a raw commit message and the ordered
//! list of coalesced groupings the public API turns into an [`ActionMap`].
//!
//! ## How the parts work together
//!
//! ```text
//! message ── tokenize (whitespace runs)        (scanner.rs)
//!                │
//!                v
//!        Scanner::run  ── per token ──> Classifier::classify   (classify.rs)
//!          - open / close Grouping              Vocabulary checks (config.rs)
//!          - abort on unknown prefix
//!          - final flush of complete group      (grouping.rs)
//!                │
//!                v
//!        scope::refile (PerAbbreviation only)   (scope.rs)
//!                │
//!                v
//!        coalesce  ── one grouping per action   (coalesce.rs)
//!                │
//!                v
//!        Vec<Grouping> ──> ActionMap (api.rs)
//! ```
//!
//! ## Responsibilities by module
//!
//! - `classify.rs`: decides whether a token is action-shaped and/or
//!   artifact-shaped and captures the artifact prefix.
//! - `grouping.rs`: the in-progress `(action, [artifacts])` record and its
//!   saturation rules.
//! - `scanner.rs`: the left-to-right walk that opens and closes groupings.
//! - `coalesce.rs`: merges finished groupings that share an action label.
//! - `scope.rs`: optional per-abbreviation action filtering.
//! - `trace.rs`: opt-in data describing a scan, for debugging and the CLI.
//!
//! Every structure here is built fresh per extraction; nothing is cached
//! across calls except the compiled [`Classifier`] owned by an `Extractor`.
//!
//! [`ActionMap`]: crate::ActionMap

#[path = "engine/classify.rs"]
mod classify;
#[path = "engine/coalesce.rs"]
mod coalesce;
#[path = "engine/grouping.rs"]
mod grouping;
#[path = "engine/scanner.rs"]
mod scanner;
#[path = "engine/scope.rs"]
mod scope;
#[path = "engine/trace.rs"]
mod trace;

#[cfg(test)]
#[path = "engine/tests.rs"]
mod tests;

pub use classify::Shape;
pub(crate) use classify::Classifier;
pub(crate) use coalesce::coalesce;
pub(crate) use grouping::Grouping;
pub(crate) use scanner::{ScanOutcome, Scanner, tokenize};
pub(crate) use scope::refile;
pub use trace::{AbortInfo, ScanTrace, TokenRecord};
