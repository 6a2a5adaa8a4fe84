use super::LookupError;
use regex::{Captures, Regex};

/// How a VCS formats its committer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitterStyle {
    /// A bare identifier (`jdoe`): Subversion, Perforce, TFS, ClearCase.
    SingleValue,
    /// Name plus email (`Jane Doe <jdoe@example.com>`): Git, Mercurial, Bazaar.
    Compound,
}

impl CommitterStyle {
    /// Style for a VCS name such as `git`, `svn` or `p4` (case-insensitive).
    pub fn for_vcs(vcs: &str) -> Result<Self, LookupError> {
        match vcs.trim().to_ascii_lowercase().as_str() {
            "svn" | "subversion" | "perforce" | "p4" | "tfs" | "clearcase" | "cc" => Ok(CommitterStyle::SingleValue),
            "git" | "github" | "mercurial" | "hg" | "bazaar" | "bzr" => Ok(CommitterStyle::Compound),
            _ => Err(LookupError::UnknownVcs(vcs.to_string())),
        }
    }

    /// The identifier part of `committer`, trimmed.
    ///
    /// Compound values yield the name with double quotes removed. A compound
    /// value that is neither `Name <addr>` nor `Name addr@host` but holds
    /// exactly one space yields its first word; anything else is returned as is.
    pub fn identify(&self, committer: &str) -> String {
        match self {
            CommitterStyle::SingleValue => committer.trim().to_string(),
            CommitterStyle::Compound => compound_identifier(committer).trim().to_string(),
        }
    }
}

/// `Name <addr@host>`
fn bracketed() -> &'static Regex {
    regex!(r"^\s*(?P<ident>[^<]+)\s+<(?P<email>[^@]+@.+)>\s*$")
}

/// `Name addr@host`
fn bare() -> &'static Regex {
    regex!(r"^\s*(?P<ident>.+)\s+(?P<email>[^@]+@[^ ]+)\s*$")
}

fn compound_captures(committer: &str) -> Option<Captures<'_>> {
    bracketed().captures(committer).or_else(|| bare().captures(committer))
}

fn compound_identifier(committer: &str) -> String {
    if let Some(caps) = compound_captures(committer) {
        return caps["ident"].replace('"', "");
    }

    let compound = committer.trim();
    if compound.matches(' ').count() == 1 {
        if let Some((left, _)) = compound.split_once(' ') {
            return left.replace('"', "");
        }
    }

    committer.to_string()
}

/// Email address embedded in a compound committer value, if any.
pub(crate) fn compound_email(committer: &str) -> Option<&str> {
    compound_captures(committer).and_then(|caps| caps.name("email")).map(|m| m.as_str())
}
