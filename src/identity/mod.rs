//! Committer → tracker user lookup.
//!
//! A commit carries a committer string whose shape depends on the VCS
//! (`jdoe` from Subversion, `"Jane Doe" <jdoe@example.com>` from Git). A
//! tracker connector needs the tracker's user name for that person. Several
//! interchangeable [`UserLookup`] strategies answer that question, and a
//! [`LookupChain`] tries them in order until one answers.
//!
//! ```
//! use commit_actions::identity::{CommitterStyle, DomainAugmentLookup, EmailAddressLookup, LookupChain, UserLookup};
//! use std::collections::HashSet;
//!
//! let users: HashSet<String> = ["jdoe@example.com".to_string()].into();
//! let chain = LookupChain::new()
//!     .with(EmailAddressLookup::new(users.clone()))
//!     .with(DomainAugmentLookup::new("example.com", users, CommitterStyle::SingleValue).unwrap());
//!
//! assert_eq!(chain.lookup("Jane Doe <jdoe@example.com>").as_deref(), Some("jdoe@example.com"));
//! assert_eq!(chain.lookup("jdoe").as_deref(), Some("jdoe@example.com"));
//! assert_eq!(chain.lookup("someone-else"), None);
//! ```

mod committer;
mod strategies;
mod user_map;

pub use committer::CommitterStyle;
pub use strategies::{BlankLookup, DomainAugmentLookup, EmailAddressLookup, LookupChain};
pub use user_map::UserMapLookup;

use std::path::PathBuf;
use thiserror::Error;

/// One way of turning a committer string into a tracker user name.
pub trait UserLookup: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// `None` when this strategy does not know the committer.
    fn lookup(&self, committer: &str) -> Option<String>;
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("unrecognized VCS identifier '{0}'")]
    UnknownVcs(String),

    #[error("{strategy} needs a non-empty config value")]
    MissingConfig { strategy: &'static str },

    #[error("user map config '{0}' must be in the format 'filename,sepchar'")]
    BadUserMapSpec(String),

    #[error("user map config has an empty filename")]
    EmptyFilename,

    #[error("user map separator '{0}' must be a single character or a quoted single character")]
    BadSeparator(String),

    #[error("user map file '{filename}' not found in any of {searched:?}")]
    UserMapNotFound { filename: String, searched: Vec<PathBuf> },

    #[error("user map file {} is empty", .0.display())]
    EmptyUserMap(PathBuf),

    #[error("no entries containing the separator found in {origin}")]
    NoPlausibleEntries { origin: String },

    #[error("{count} entries in {origin} contain the separator more than once")]
    MultipleSeparators { origin: String, count: usize },

    #[error("no usable entries in {origin}")]
    NoUsableEntries { origin: String },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
