use crate::Vocabulary;
use crate::engine::{self, Classifier, Grouping, ScanTrace, Scanner};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Instant;

/// How action words are matched against artifact types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionScope {
    /// An action applies to any artifact if any spec lists it.
    #[default]
    Global,
    /// An action applies to an artifact only if that artifact's own spec
    /// lists it; other artifacts are reported without an action.
    PerAbbreviation,
}

impl FromStr for ActionScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "global" => Ok(ActionScope::Global),
            "per-abbreviation" | "scoped" => Ok(ActionScope::PerAbbreviation),
            other => Err(format!("unknown action scope '{other}' (expected 'global' or 'per-abbreviation')")),
        }
    }
}

/// Options that affect extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    pub scope: ActionScope,
}

/// One action and the artifacts it governs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionEntry {
    /// `None` when the artifacts were mentioned without a recognized action.
    pub action: Option<String>,
    pub artifacts: Vec<String>,
}

/// Ordered mapping from action (or no action) to artifact identifiers.
///
/// Entries appear in the order their action was first seen; artifacts keep
/// message order and may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionMap {
    entries: Vec<ActionEntry>,
}

impl ActionMap {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Artifacts filed under `action`; `None` looks up the no-action entry.
    pub fn get(&self, action: Option<&str>) -> Option<&[String]> {
        self.entries.iter().find(|e| e.action.as_deref() == action).map(|e| e.artifacts.as_slice())
    }

    pub fn contains_action(&self, action: Option<&str>) -> bool {
        self.get(action).is_some()
    }

    pub fn entries(&self) -> &[ActionEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ActionEntry> {
        self.entries.iter()
    }

    /// Every artifact mentioned, in entry order.
    pub fn artifacts(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().flat_map(|e| e.artifacts.iter().map(String::as_str))
    }

    pub fn into_entries(self) -> Vec<ActionEntry> {
        self.entries
    }

    fn from_groups(groups: Vec<Grouping>) -> Self {
        let entries = groups
            .into_iter()
            .filter(Grouping::is_complete)
            .map(|g| {
                let (action, artifacts) = g.into_parts();
                ActionEntry { action: action.label().map(str::to_string), artifacts }
            })
            .collect();
        ActionMap { entries }
    }
}

impl<'a> IntoIterator for &'a ActionMap {
    type Item = &'a ActionEntry;
    type IntoIter = std::slice::Iter<'a, ActionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl std::fmt::Display for ActionMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        for (idx, entry) in self.entries.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            match &entry.action {
                Some(action) => write!(f, "'{action}'")?,
                None => f.write_str("None")?,
            }
            write!(f, ": [{}]", entry.artifacts.iter().map(|a| format!("'{a}'")).collect::<Vec<_>>().join(", "))?;
        }
        f.write_str("}")
    }
}

/// A tracker field assignment implied by an extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateUpdate {
    /// Normalized identifier (`prefix` + `number`), e.g. `DE12` for `(DE12),`.
    pub artifact: String,
    pub field: String,
    pub value: String,
}

/// Result of [`Extractor::extract_verbose`] and [`extract_verbose_with`].
#[derive(Debug, Clone)]
pub struct ExtractionVerbose {
    pub text: String,
    pub map: ActionMap,
    pub trace: ScanTrace,
}

/// Reusable extractor: a compiled classifier plus a vocabulary.
///
/// Immutable once built, so it can be shared across threads.
///
/// # Example
/// ```
/// use commit_actions::{ArtifactSpec, Extractor, Vocabulary};
///
/// let vocabulary = Vocabulary::new(vec![
///     ArtifactSpec::new("DE", Some("State"), ["Open", "Fixed", "Closed"]),
///     ArtifactSpec::new("S", Some("ScheduleState"), ["Completed"]),
/// ])
/// .unwrap();
/// let extractor = Extractor::new(vocabulary);
///
/// let map = extractor.extract("Fixed DE532 Completed S342 for your peace of mind");
/// assert_eq!(map.get(Some("Fixed")), Some(&["DE532".to_string()][..]));
/// assert_eq!(map.get(Some("Completed")), Some(&["S342".to_string()][..]));
/// ```
#[derive(Debug, Clone)]
pub struct Extractor {
    classifier: Classifier,
    vocabulary: Vocabulary,
    options: Options,
}

impl Extractor {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self::with_options(vocabulary, Options::default())
    }

    pub fn with_options(vocabulary: Vocabulary, options: Options) -> Self {
        Extractor { classifier: Classifier::new(), vocabulary, options }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Extract the action → artifacts mapping from `message`.
    pub fn extract(&self, message: &str) -> ActionMap {
        run(&self.classifier, &self.vocabulary, &self.options, message)
    }

    /// Like [`Extractor::extract`], also returning a [`ScanTrace`].
    pub fn extract_verbose(&self, message: &str) -> ExtractionVerbose {
        run_verbose(&self.classifier, &self.vocabulary, &self.options, message)
    }

    /// Field assignments a tracker connector would make for `map`.
    ///
    /// Only artifacts whose own spec lists the action and names an update
    /// field produce an update. Nothing is written anywhere.
    pub fn updates(&self, map: &ActionMap) -> Vec<StateUpdate> {
        let mut updates = Vec::new();
        for entry in map {
            let Some(action) = entry.action.as_deref() else {
                continue;
            };
            for artifact in &entry.artifacts {
                let class = self.classifier.classify(artifact);
                let (Some(prefix), Some(number)) = (class.prefix, class.number) else {
                    continue;
                };
                if !self.vocabulary.is_action_for(prefix, action) {
                    continue;
                }
                if let Some(field) = self.vocabulary.update_field(prefix) {
                    updates.push(StateUpdate {
                        artifact: format!("{prefix}{number}"),
                        field: field.to_string(),
                        value: action.to_string(),
                    });
                }
            }
        }
        updates
    }
}

/// Extract from `message` with default [`Options`].
///
/// Compiles the shape patterns on every call; build an [`Extractor`] when
/// processing many messages.
pub fn extract(message: &str, vocabulary: &Vocabulary) -> ActionMap {
    extract_with(message, vocabulary, &Options::default())
}

pub fn extract_with(message: &str, vocabulary: &Vocabulary, options: &Options) -> ActionMap {
    run(&Classifier::new(), vocabulary, options, message)
}

/// Extract from `message` and return the scan trace alongside the map.
pub fn extract_verbose_with(message: &str, vocabulary: &Vocabulary, options: &Options) -> ExtractionVerbose {
    run_verbose(&Classifier::new(), vocabulary, options, message)
}

fn run(classifier: &Classifier, vocabulary: &Vocabulary, options: &Options, message: &str) -> ActionMap {
    let outcome = Scanner::new(classifier, vocabulary).run(engine::tokenize(message));
    finish(classifier, vocabulary, options, outcome.groups)
}

fn run_verbose(classifier: &Classifier, vocabulary: &Vocabulary, options: &Options, message: &str) -> ExtractionVerbose {
    let start = Instant::now();
    let tokens = engine::tokenize(message);
    let token_count = tokens.len();

    let outcome = Scanner::new(classifier, vocabulary).recording().run(tokens);
    let groups = outcome.groups.iter().map(|g| g.to_string()).collect();
    let map = finish(classifier, vocabulary, options, outcome.groups);

    let trace =
        ScanTrace { token_count, tokens: outcome.tokens, groups, abort: outcome.abort, elapsed: start.elapsed() };
    ExtractionVerbose { text: message.to_string(), map, trace }
}

fn finish(classifier: &Classifier, vocabulary: &Vocabulary, options: &Options, groups: Vec<Grouping>) -> ActionMap {
    let groups = match options.scope {
        ActionScope::Global => groups,
        ActionScope::PerAbbreviation => engine::refile(groups, classifier, vocabulary),
    };
    ActionMap::from_groups(engine::coalesce(groups))
}
