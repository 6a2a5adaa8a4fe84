use crate::{ActionSlot, FirstKind};

/// One in-progress or finished `(action, [artifacts])` association.
///
/// `first` records whether the grouping opened with an action or an
/// artifact and is fixed after the first assignment. Together with the
/// action slot it decides when the scanner must close the grouping:
///
/// ```text
///                        action-saturated   target-saturated
/// action = Word              yes             if first == Target
/// action = Unrecognized      no              no
/// action = Unset             no              no
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Grouping {
    action: ActionSlot,
    targets: Vec<String>,
    first: FirstKind,
}

impl Grouping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a finished grouping directly (used when re-filing targets).
    ///
    /// No scan produced it, so `first` stays [`FirstKind::Unset`].
    pub(crate) fn from_parts(action: ActionSlot, targets: Vec<String>) -> Self {
        Grouping { action, targets, first: FirstKind::Unset }
    }

    /// Fill the action slot. `None` marks an action-shaped word that is not
    /// in the vocabulary.
    pub fn set_action(&mut self, word: Option<String>) {
        self.action = match word {
            Some(word) => ActionSlot::Word(word),
            None => ActionSlot::Unrecognized,
        };
        if self.first == FirstKind::Unset {
            self.first = FirstKind::Action;
        }
    }

    pub fn add_target(&mut self, target: impl Into<String>) {
        self.targets.push(target.into());
        if self.first == FirstKind::Unset {
            self.first = FirstKind::Target;
        }
    }

    /// A grouping is only emitted once it holds at least one target.
    pub fn is_complete(&self) -> bool {
        !self.targets.is_empty()
    }

    pub fn is_action_saturated(&self) -> bool {
        self.action.is_word()
    }

    pub fn is_target_saturated(&self) -> bool {
        self.is_action_saturated() && self.first == FirstKind::Target
    }

    pub fn action(&self) -> &ActionSlot {
        &self.action
    }

    pub fn label(&self) -> Option<&str> {
        self.action.label()
    }

    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    pub(crate) fn first(&self) -> FirstKind {
        self.first
    }

    pub(crate) fn extend_targets(&mut self, more: impl IntoIterator<Item = String>) {
        self.targets.extend(more);
    }

    pub(crate) fn into_parts(self) -> (ActionSlot, Vec<String>) {
        (self.action, self.targets)
    }
}

impl std::fmt::Display for Grouping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.action {
            ActionSlot::Word(word) => write!(f, "'{word}'")?,
            ActionSlot::Unrecognized => f.write_str("<unrecognized>")?,
            ActionSlot::Unset => f.write_str("<none>")?,
        }
        if self.targets.is_empty() { f.write_str(" -NO TARGETS-") } else { write!(f, ": {}", self.targets.join(", ")) }
    }
}
