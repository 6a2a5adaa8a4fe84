//! Left-to-right scan over message tokens.
//!
//! The scanner keeps at most one open [`Grouping`]. Each token is classified
//! and then:
//!
//! ```text
//! noise           -> skipped, open grouping untouched
//! action-shaped   -> close open grouping if action-saturated,
//!                    then fill its action slot (word or unrecognized)
//! artifact-shaped -> unknown prefix: stop scanning
//!                    otherwise close open grouping if target-saturated,
//!                    then append the whole token as a target
//! ```
//!
//! Groupings closed at a boundary are kept even without targets, so the order
//! of first appearance of each action survives coalescing. When the tokens
//! run out, or the scan stops on an unknown prefix, the open grouping is kept
//! only if it is complete.
//!
//! A token that is both action- and artifact-shaped goes through the action
//! step first and the artifact step second.

use super::classify::Classifier;
use super::grouping::Grouping;
use super::trace::{AbortInfo, TokenRecord};
use crate::Vocabulary;

/// Split on runs of whitespace (spaces, tabs, newlines), preserving order.
pub(crate) fn tokenize(message: &str) -> Vec<&str> {
    message.split_whitespace().collect()
}

/// Finished groupings in close order, plus why the scan stopped.
#[derive(Debug, Clone, Default)]
pub(crate) struct ScanOutcome {
    pub groups: Vec<Grouping>,
    pub abort: Option<AbortInfo>,
    /// Per-token records; only filled when the scanner records.
    pub tokens: Vec<TokenRecord>,
}

/// Single-use scan state. Borrowed pieces are shared read-only.
pub(crate) struct Scanner<'a> {
    classifier: &'a Classifier,
    vocabulary: &'a Vocabulary,
    current: Option<Grouping>,
    finished: Vec<Grouping>,
    record: bool,
    records: Vec<TokenRecord>,
}

impl<'a> Scanner<'a> {
    pub fn new(classifier: &'a Classifier, vocabulary: &'a Vocabulary) -> Self {
        Scanner { classifier, vocabulary, current: None, finished: Vec::new(), record: false, records: Vec::new() }
    }

    /// Keep a [`TokenRecord`] for every token examined.
    pub fn recording(mut self) -> Self {
        self.record = true;
        self
    }

    pub fn run<'t, I>(mut self, tokens: I) -> ScanOutcome
    where
        I: IntoIterator<Item = &'t str>,
    {
        let mut abort = None;

        for (position, token) in tokens.into_iter().enumerate() {
            let class = self.classifier.classify(token);
            tracing::trace!(position, token, shape = ?class.shape, "classified token");
            if self.record {
                self.records.push(TokenRecord {
                    position,
                    token: token.to_string(),
                    shape: class.shape,
                    prefix: class.prefix.map(str::to_string),
                });
            }

            if class.is_noise() {
                continue;
            }

            let mut group = self.current.take().unwrap_or_default();

            if class.is_action() {
                if group.is_action_saturated() {
                    group = self.close(group, "action");
                }
                let word = self.vocabulary.is_recognized_action(token).then(|| token.to_string());
                group.set_action(word);
            }

            if let Some(prefix) = class.prefix {
                if !self.vocabulary.is_valid_abbreviation(prefix) {
                    tracing::debug!(position, token, prefix, "unknown artifact prefix; stopping scan");
                    abort = Some(AbortInfo { position, token: token.to_string(), prefix: prefix.to_string() });
                    self.current = Some(group);
                    break;
                }
                if group.is_target_saturated() {
                    group = self.close(group, "target");
                }
                group.add_target(token);
            }

            self.current = Some(group);
        }

        self.flush();
        ScanOutcome { groups: self.finished, abort, tokens: self.records }
    }

    /// Finish `group` and hand back a fresh one.
    ///
    /// A group closed before it got any target is still kept: its action
    /// claims an output position, and it is filtered out after coalescing.
    fn close(&mut self, group: Grouping, boundary: &'static str) -> Grouping {
        if group.is_complete() {
            tracing::debug!(boundary, group = %group, "closing grouping");
        } else {
            tracing::debug!(boundary, group = %group, "closing grouping without targets");
        }
        self.finished.push(group);
        Grouping::new()
    }

    fn flush(&mut self) {
        match self.current.take() {
            Some(group) if group.is_complete() => {
                tracing::debug!(group = %group, "flushing final grouping");
                self.finished.push(group);
            }
            Some(group) => tracing::debug!(group = %group, "discarding incomplete grouping"),
            None => {}
        }
    }
}
