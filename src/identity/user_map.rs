//! Static committer → user table read from a text file.
//!
//! ```text
//! # vcs identifier : tracker user name
//! bob   : bobby@snoozer.org
//! ali   : alienag@deepspace.com
//! ```
//!
//! The file is named by a `"filename,sepchar"` config string. `sepchar` is a
//! single character, optionally quoted (`':'`). Lines are trimmed; blank lines,
//! lines shorter than six characters and `#` comments are skipped. A line
//! holding the separator more than once rejects the whole file.

use super::committer::CommitterStyle;
use super::{LookupError, UserLookup};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const MIN_ENTRY_LEN: usize = 6;

#[derive(Debug, Clone)]
pub struct UserMapLookup {
    table: HashMap<String, String>,
    style: CommitterStyle,
}

impl UserMapLookup {
    /// Resolve a `"filename,sepchar"` config against `.` and `./configs`.
    pub fn from_config(config: &str, style: CommitterStyle) -> Result<Self, LookupError> {
        Self::from_config_in(config, style, &[PathBuf::from("."), PathBuf::from("configs")])
    }

    /// Like [`UserMapLookup::from_config`] with an explicit search path.
    pub fn from_config_in(config: &str, style: CommitterStyle, dirs: &[PathBuf]) -> Result<Self, LookupError> {
        let (filename, separator) = parse_config(config)?;
        tracing::debug!(filename, %separator, "user map config");

        let path = dirs
            .iter()
            .map(|dir| dir.join(filename))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| LookupError::UserMapNotFound { filename: filename.to_string(), searched: dirs.to_vec() })?;

        Self::from_path(&path, separator, style)
    }

    pub fn from_path(path: &Path, separator: char, style: CommitterStyle) -> Result<Self, LookupError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| LookupError::Io { path: path.to_path_buf(), source })?;
        if content.is_empty() {
            return Err(LookupError::EmptyUserMap(path.to_path_buf()));
        }
        Self::parse(&content, separator, style, &path.display().to_string())
    }

    /// Build the table from file `content`. `origin` names the source in errors.
    pub fn parse(content: &str, separator: char, style: CommitterStyle, origin: &str) -> Result<Self, LookupError> {
        let lines: Vec<&str> = content.lines().map(str::trim).filter(|l| !l.starts_with('#')).collect();

        let plausible: Vec<&str> = lines.iter().copied().filter(|l| l.contains(separator)).collect();
        if plausible.is_empty() {
            return Err(LookupError::NoPlausibleEntries { origin: origin.to_string() });
        }
        let crowded = plausible.iter().filter(|l| l.matches(separator).count() > 1).count();
        if crowded > 0 {
            return Err(LookupError::MultipleSeparators { origin: origin.to_string(), count: crowded });
        }

        let mut table = HashMap::new();
        for line in lines {
            if line.len() < MIN_ENTRY_LEN {
                continue;
            }
            let Some((ident, user)) = line.split_once(separator) else {
                tracing::warn!(line, "user map entry without separator ignored");
                continue;
            };
            let (ident, user) = (ident.trim(), user.trim());
            if ident.is_empty() || user.is_empty() {
                tracing::error!(ident, user, "user map entry has an empty side");
                continue;
            }
            if let Some(prior) = table.insert(ident.to_string(), user.to_string()) {
                tracing::warn!(ident, prior = %prior, replacement = user, "user map entry replaced by later line");
            }
        }

        if table.is_empty() {
            return Err(LookupError::NoUsableEntries { origin: origin.to_string() });
        }
        tracing::debug!(entries = table.len(), origin, "user map populated");
        Ok(UserMapLookup { table, style })
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl UserLookup for UserMapLookup {
    fn name(&self) -> &'static str {
        "UserMapLookup"
    }

    fn lookup(&self, committer: &str) -> Option<String> {
        let ident = self.style.identify(committer);
        let found = self.table.get(&ident).cloned();
        match &found {
            Some(user) => tracing::debug!(committer, ident, user = %user, "user map hit"),
            None => tracing::debug!(committer, ident, "user map miss"),
        }
        found
    }
}

fn parse_config(config: &str) -> Result<(&str, char), LookupError> {
    let config = config.trim();
    if config.is_empty() {
        return Err(LookupError::MissingConfig { strategy: "UserMapLookup" });
    }
    if config.matches(',').count() != 1 {
        return Err(LookupError::BadUserMapSpec(config.to_string()));
    }
    let (filename, separator) = config.split_once(',').ok_or_else(|| LookupError::BadUserMapSpec(config.to_string()))?;
    let (filename, separator) = (filename.trim(), separator.trim());
    if filename.is_empty() {
        return Err(LookupError::EmptyFilename);
    }

    let chars: Vec<char> = separator.chars().collect();
    match chars.as_slice() {
        [c] => Ok((filename, *c)),
        [q, c, q2] if q == q2 && (*q == '"' || *q == '\'') => Ok((filename, *c)),
        _ => Err(LookupError::BadSeparator(separator.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# committer : user
bob : bobby@snoozer.org
ali : alienag@deepspace.com

x:y
crufty entry without separator
bob : robert@snoozer.org
";

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("commit-actions-{}-{name}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn parses_entries_and_later_lines_win() {
        let map = UserMapLookup::parse(SAMPLE, ':', CommitterStyle::SingleValue, "sample").unwrap();
        // `x:y` is shorter than the minimum entry length.
        assert_eq!(map.len(), 2);
        assert_eq!(map.lookup(" bob ").as_deref(), Some("robert@snoozer.org"));
        assert_eq!(map.lookup("ali").as_deref(), Some("alienag@deepspace.com"));
        assert_eq!(map.lookup("x"), None);
    }

    #[test]
    fn compound_committers_are_reduced_before_lookup() {
        let map = UserMapLookup::parse(SAMPLE, ':', CommitterStyle::Compound, "sample").unwrap();
        assert_eq!(map.lookup("ali <ali@laptop.local>").as_deref(), Some("alienag@deepspace.com"));
    }

    #[test]
    fn rejects_files_without_separator_lines() {
        let err = UserMapLookup::parse("bob bobby\nali alienag\n", ':', CommitterStyle::SingleValue, "flat").unwrap_err();
        assert!(matches!(err, LookupError::NoPlausibleEntries { .. }));
    }

    #[test]
    fn rejects_lines_with_repeated_separator() {
        let err = UserMapLookup::parse("bob : b : c\nali : a@b.c\n", ':', CommitterStyle::SingleValue, "crowded")
            .unwrap_err();
        assert!(matches!(err, LookupError::MultipleSeparators { count: 1, .. }));
    }

    #[test]
    fn rejects_files_with_only_unusable_entries() {
        let err = UserMapLookup::parse("bob :    \n   : alienag\n", ':', CommitterStyle::SingleValue, "hollow").unwrap_err();
        assert!(matches!(err, LookupError::NoUsableEntries { .. }));
    }

    #[test]
    fn config_accepts_plain_and_quoted_separators() {
        assert_eq!(parse_config("user_map.txt,:").unwrap(), ("user_map.txt", ':'));
        assert_eq!(parse_config(" user_map.txt , ':' ").unwrap(), ("user_map.txt", ':'));
        assert_eq!(parse_config("map.txt,\"|\"").unwrap(), ("map.txt", '|'));
    }

    #[test]
    fn config_rejects_malformed_values() {
        assert!(matches!(parse_config(""), Err(LookupError::MissingConfig { .. })));
        assert!(matches!(parse_config("user_map.txt"), Err(LookupError::BadUserMapSpec(_))));
        assert!(matches!(parse_config("a,b,c"), Err(LookupError::BadUserMapSpec(_))));
        assert!(matches!(parse_config(" ,:"), Err(LookupError::EmptyFilename)));
        assert!(matches!(parse_config("map.txt,::"), Err(LookupError::BadSeparator(_))));
        assert!(matches!(parse_config("map.txt,'|\""), Err(LookupError::BadSeparator(_))));
    }

    #[test]
    fn loads_from_search_path() {
        let dir = scratch_dir("search");
        std::fs::write(dir.join("user_map.txt"), SAMPLE).unwrap();

        let missing = dir.join("missing");
        let map =
            UserMapLookup::from_config_in("user_map.txt,:", CommitterStyle::SingleValue, &[missing, dir.clone()]).unwrap();
        assert_eq!(map.lookup("ali").as_deref(), Some("alienag@deepspace.com"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_and_empty_files_are_reported() {
        let dir = scratch_dir("empty");
        let err = UserMapLookup::from_config_in("nope.txt,:", CommitterStyle::SingleValue, &[dir.clone()]).unwrap_err();
        assert!(matches!(err, LookupError::UserMapNotFound { .. }));

        std::fs::write(dir.join("blank.txt"), "").unwrap();
        let err = UserMapLookup::from_config_in("blank.txt,:", CommitterStyle::SingleValue, &[dir.clone()]).unwrap_err();
        assert!(matches!(err, LookupError::EmptyUserMap(_)));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
