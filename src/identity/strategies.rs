use super::committer::{CommitterStyle, compound_email};
use super::{LookupError, UserLookup};
use std::collections::HashSet;

/// Appends a fixed domain to the committer identifier and accepts the result
/// if it is a known user name (`jdoe` + `example.com` → `jdoe@example.com`).
#[derive(Debug, Clone)]
pub struct DomainAugmentLookup {
    domain: String,
    users: HashSet<String>,
    style: CommitterStyle,
}

impl DomainAugmentLookup {
    /// `domain` may be wrapped in single or double quotes.
    pub fn new(domain: &str, users: HashSet<String>, style: CommitterStyle) -> Result<Self, LookupError> {
        let domain = domain.trim().trim_matches(|c| c == '"' || c == '\'');
        if domain.is_empty() {
            return Err(LookupError::MissingConfig { strategy: "DomainAugmentLookup" });
        }
        tracing::debug!(users = users.len(), domain, "domain lookup user cache populated");
        Ok(DomainAugmentLookup { domain: domain.to_string(), users, style })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }
}

impl UserLookup for DomainAugmentLookup {
    fn name(&self) -> &'static str {
        "DomainAugmentLookup"
    }

    fn lookup(&self, committer: &str) -> Option<String> {
        let candidate = format!("{}@{}", self.style.identify(committer), self.domain);
        let found = self.users.contains(&candidate).then_some(candidate);
        tracing::debug!(committer, found = ?found, "domain augment lookup");
        found
    }
}

/// Uses the committer's email address as the user name when it is a known
/// user. Accepts a bare address or the address inside a compound value.
#[derive(Debug, Clone)]
pub struct EmailAddressLookup {
    users: HashSet<String>,
}

impl EmailAddressLookup {
    pub fn new(users: HashSet<String>) -> Self {
        tracing::debug!(users = users.len(), "email lookup user cache populated");
        EmailAddressLookup { users }
    }

    fn extract<'c>(&self, committer: &'c str) -> Option<&'c str> {
        let email = regex!(r"^[[:alnum:]][^\s@]*@[[:alnum:]][^\s@]*\.[^\s@]*[[:alnum:]]$");
        if !committer.contains(' ') && email.is_match(committer) {
            return Some(committer);
        }
        compound_email(committer)
    }
}

impl UserLookup for EmailAddressLookup {
    fn name(&self) -> &'static str {
        "EmailAddressLookup"
    }

    fn lookup(&self, committer: &str) -> Option<String> {
        let address = self.extract(committer)?;
        let found = self.users.contains(address).then(|| address.to_string());
        tracing::debug!(committer, found = ?found, "email address lookup");
        found
    }
}

/// Always answers with an empty user name.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlankLookup;

impl UserLookup for BlankLookup {
    fn name(&self) -> &'static str {
        "BlankLookup"
    }

    fn lookup(&self, _committer: &str) -> Option<String> {
        Some(String::new())
    }
}

/// Ordered strategies; the first one that answers wins.
#[derive(Default)]
pub struct LookupChain {
    strategies: Vec<Box<dyn UserLookup>>,
}

impl LookupChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, strategy: impl UserLookup + 'static) -> Self {
        self.push(Box::new(strategy));
        self
    }

    pub fn push(&mut self, strategy: Box<dyn UserLookup>) {
        self.strategies.push(strategy);
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }
}

impl std::fmt::Debug for LookupChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupChain").field("strategies", &self.names()).finish()
    }
}

impl UserLookup for LookupChain {
    fn name(&self) -> &'static str {
        "LookupChain"
    }

    fn lookup(&self, committer: &str) -> Option<String> {
        self.strategies.iter().find_map(|strategy| {
            let found = strategy.lookup(committer);
            if found.is_some() {
                tracing::debug!(strategy = strategy.name(), committer, "lookup chain hit");
            }
            found
        })
    }
}
