//! Merge finished groupings that share an action label.
//!
//! Output holds one grouping per distinct label, ordered by the label's first
//! appearance. Targets are concatenated in input order, duplicates kept.
//!
//! Labels, not slots, are compared: an unrecognized action and a grouping
//! that never saw an action both land under the no-action label.

use super::grouping::Grouping;

pub(crate) fn coalesce(groups: Vec<Grouping>) -> Vec<Grouping> {
    let mut merged: Vec<Grouping> = Vec::with_capacity(groups.len());

    for group in groups {
        match merged.iter_mut().find(|m| m.label() == group.label()) {
            Some(existing) => {
                let (_, targets) = group.into_parts();
                existing.extend_targets(targets);
            }
            None => merged.push(group),
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ActionSlot;

    fn group(action: ActionSlot, targets: &[&str]) -> Grouping {
        Grouping::from_parts(action, targets.iter().map(|t| t.to_string()).collect())
    }

    fn word(w: &str) -> ActionSlot {
        ActionSlot::Word(w.to_string())
    }

    #[test]
    fn merges_by_label_in_first_seen_order() {
        let out = coalesce(vec![
            group(word("Completed"), &["S432"]),
            group(word("Fixed"), &["DE549"]),
            group(word("Completed"), &["TA617", "S432"]),
        ]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].label(), Some("Completed"));
        assert_eq!(out[0].targets(), ["S432", "TA617", "S432"]);
        assert_eq!(out[1].label(), Some("Fixed"));
        assert_eq!(out[1].targets(), ["DE549"]);
    }

    #[test]
    fn unset_and_unrecognized_share_the_empty_label() {
        let out = coalesce(vec![
            group(ActionSlot::Unrecognized, &["S1"]),
            group(word("Fixed"), &["DE1"]),
            group(ActionSlot::Unset, &["S2"]),
        ]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].label(), None);
        assert_eq!(out[0].targets(), ["S1", "S2"]);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(coalesce(Vec::new()).is_empty());
    }
}
