//! Vocabulary configuration.
//!
//! A [`Vocabulary`] answers the two validity questions the scanner asks:
//! is this prefix a configured artifact abbreviation, and is this word a
//! recognized action. It is built once from a list of [`ArtifactSpec`]s and
//! is immutable afterwards, so one instance can back any number of scans.
//!
//! Abbreviation checks are exact, case-sensitive set membership against the
//! configured abbreviations. A prefix never matches as a substring of a longer
//! abbreviation or the other way round.

use crate::api::{ActionScope, Extractor, Options};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while building a [`Vocabulary`] or loading an [`ExtractorConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("vocabulary has no artifact abbreviations; every artifact reference would stop the scan")]
    NoAbbreviations,

    #[error("artifact spec #{index} has an empty abbreviation")]
    EmptyAbbreviation { index: usize },

    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {origin}: {source}")]
    Toml {
        origin: String,
        #[source]
        source: toml::de::Error,
    },
}

/// One artifact type: its abbreviation, the tracker field a state change is
/// written to, and the action words valid for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSpec {
    /// One or two uppercase letters, e.g. `DE` or `S`.
    pub abbreviation: String,
    /// Tracker attribute updated by a recognized action, e.g. `State`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_field: Option<String>,
    /// Recognized action words for this abbreviation.
    #[serde(default, alias = "valid_values")]
    pub actions: Vec<String>,
}

impl ArtifactSpec {
    pub fn new<A, I, S>(abbreviation: A, update_field: Option<&str>, actions: I) -> Self
    where
        A: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ArtifactSpec {
            abbreviation: abbreviation.into(),
            update_field: update_field.map(str::to_string),
            actions: actions.into_iter().map(Into::into).collect(),
        }
    }
}

/// Validated, immutable vocabulary.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// Specs in configuration order, duplicates merged into the first entry.
    specs: Vec<ArtifactSpec>,
    abbreviations: HashSet<String>,
    /// Union of every spec's action words.
    actions: HashSet<String>,
}

impl Vocabulary {
    /// Build a vocabulary from `specs`.
    ///
    /// Specs sharing an abbreviation are merged: their action words are
    /// combined and the first non-empty `update_field` wins.
    pub fn new(specs: Vec<ArtifactSpec>) -> Result<Self, ConfigError> {
        if specs.is_empty() {
            return Err(ConfigError::NoAbbreviations);
        }

        let mut merged: Vec<ArtifactSpec> = Vec::with_capacity(specs.len());
        for (index, spec) in specs.into_iter().enumerate() {
            if spec.abbreviation.trim().is_empty() {
                return Err(ConfigError::EmptyAbbreviation { index });
            }
            if !is_plausible_abbreviation(&spec.abbreviation) {
                tracing::warn!(
                    abbreviation = %spec.abbreviation,
                    "abbreviation is not one or two uppercase letters; no artifact reference can match it"
                );
            }

            match merged.iter_mut().find(|m| m.abbreviation == spec.abbreviation) {
                Some(existing) => {
                    tracing::warn!(abbreviation = %spec.abbreviation, "duplicate artifact spec merged into earlier entry");
                    for action in spec.actions {
                        if !existing.actions.contains(&action) {
                            existing.actions.push(action);
                        }
                    }
                    if existing.update_field.is_none() {
                        existing.update_field = spec.update_field;
                    }
                }
                None => merged.push(spec),
            }
        }

        let abbreviations = merged.iter().map(|s| s.abbreviation.clone()).collect();
        let actions = merged.iter().flat_map(|s| s.actions.iter().cloned()).collect();
        tracing::debug!(specs = merged.len(), "vocabulary built");

        Ok(Vocabulary { specs: merged, abbreviations, actions })
    }

    /// The stock tracker vocabulary: stories (`S`, `US`), defects (`DE`),
    /// tasks (`TA`) and test cases (`TC`).
    pub fn standard() -> Self {
        let specs = vec![
            ArtifactSpec::new("S", Some("ScheduleState"), ["Defined", "In-Progress", "Implemented", "Completed"]),
            ArtifactSpec::new("US", Some("ScheduleState"), ["Defined", "In-Progress", "Implemented", "Completed"]),
            ArtifactSpec::new("DE", Some("State"), ["Submitted", "Open", "Fixed", "Closed"]),
            ArtifactSpec::new("TA", Some("State"), ["Defined", "In-Progress", "Completed"]),
            ArtifactSpec::new("TC", Some("State"), ["Replicated"]),
        ];
        match Vocabulary::new(specs) {
            Ok(vocabulary) => vocabulary,
            Err(err) => unreachable!("standard vocabulary is non-empty: {err}"),
        }
    }

    pub fn specs(&self) -> &[ArtifactSpec] {
        &self.specs
    }

    pub fn spec(&self, abbreviation: &str) -> Option<&ArtifactSpec> {
        self.specs.iter().find(|s| s.abbreviation == abbreviation)
    }

    /// Exact membership test for an artifact prefix.
    pub fn is_valid_abbreviation(&self, prefix: &str) -> bool {
        self.abbreviations.contains(prefix)
    }

    /// True when any spec lists `word` as an action.
    pub fn is_recognized_action(&self, word: &str) -> bool {
        self.actions.contains(word)
    }

    /// True when the spec for `abbreviation` lists `word`.
    pub fn is_action_for(&self, abbreviation: &str, word: &str) -> bool {
        self.spec(abbreviation).is_some_and(|s| s.actions.iter().any(|a| a == word))
    }

    pub fn update_field(&self, abbreviation: &str) -> Option<&str> {
        self.spec(abbreviation).and_then(|s| s.update_field.as_deref())
    }
}

fn is_plausible_abbreviation(abbreviation: &str) -> bool {
    (1..=2).contains(&abbreviation.len()) && abbreviation.bytes().all(|b| b.is_ascii_uppercase())
}

/// On-disk extractor configuration.
///
/// ```toml
/// scope = "per-abbreviation"
///
/// [[artifact]]
/// abbreviation = "DE"
/// update_field = "State"
/// actions = ["Open", "Fixed", "Closed"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    #[serde(default)]
    pub scope: ActionScope,
    #[serde(default, rename = "artifact")]
    pub artifacts: Vec<ArtifactSpec>,
}

impl ExtractorConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Toml { origin: "inline config".to_string(), source })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let config: ExtractorConfig =
            toml::from_str(&text).map_err(|source| ConfigError::Toml { origin: path.display().to_string(), source })?;
        tracing::debug!(path = %path.display(), artifacts = config.artifacts.len(), "loaded extractor config");
        Ok(config)
    }

    /// Validate the artifact list and split into vocabulary + options.
    pub fn into_parts(self) -> Result<(Vocabulary, Options), ConfigError> {
        let vocabulary = Vocabulary::new(self.artifacts)?;
        Ok((vocabulary, Options { scope: self.scope }))
    }

    pub fn build(self) -> Result<Extractor, ConfigError> {
        let (vocabulary, options) = self.into_parts()?;
        Ok(Extractor::with_options(vocabulary, options))
    }
}
