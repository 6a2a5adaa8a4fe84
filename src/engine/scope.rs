//! Per-abbreviation action scoping.
//!
//! During the scan an action word counts as recognized if any artifact spec
//! lists it, so group boundaries never depend on scoping. Afterwards, with
//! [`ActionScope::PerAbbreviation`](crate::ActionScope), each artifact keeps
//! its group's action only when the spec for its own abbreviation lists that
//! action. Artifacts that fail the check are re-filed under no action.
//!
//! `refile` splits groups into one grouping per artifact, preserving scan
//! order, so a following `coalesce` rebuilds first-seen ordering exactly.
//! Groupings without targets pass through untouched and keep their slot.

use super::classify::Classifier;
use super::grouping::Grouping;
use crate::{ActionSlot, Vocabulary};

pub(crate) fn refile(groups: Vec<Grouping>, classifier: &Classifier, vocabulary: &Vocabulary) -> Vec<Grouping> {
    let mut out = Vec::with_capacity(groups.len());

    for group in groups {
        let (action, targets) = group.into_parts();
        let word = match action {
            ActionSlot::Word(word) if !targets.is_empty() => word,
            action => {
                out.push(Grouping::from_parts(action, targets));
                continue;
            }
        };

        for target in targets {
            let prefix = classifier.classify(&target).prefix.unwrap_or_default().to_string();
            let slot = if vocabulary.is_action_for(&prefix, &word) {
                ActionSlot::Word(word.clone())
            } else {
                tracing::debug!(artifact = %target, action = %word, "action not valid for artifact type; re-filed without action");
                ActionSlot::Unrecognized
            };
            out.push(Grouping::from_parts(slot, vec![target]));
        }
    }

    out
}
