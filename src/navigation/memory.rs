//! Remembers the last path visited inside each tracked top-level section

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Per-section memory of the last visited path.
///
/// Entries are only ever created or overwritten; nothing is forgotten until
/// the memory itself is dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavigationMemory {
    /// Section keys that are tracked, e.g. `/manage`
    tracked: Vec<String>,

    /// Section key -> last full path visited in it
    entries: BTreeMap<String, String>,

    /// Number of upserts that actually changed an entry
    revision: u64,
}

impl NavigationMemory {
    /// Create a memory tracking the given section keys
    pub fn new<I, S>(tracked: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tracked = tracked
            .into_iter()
            .map(|s| normalize_section(&s.into()))
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            tracked,
            entries: BTreeMap::new(),
            revision: 0,
        }
    }

    /// Tracked section keys
    pub fn tracked(&self) -> &[String] {
        &self.tracked
    }

    /// The tracked section `path` falls under; the longest key wins
    pub fn section_for(&self, path: &str) -> Option<&str> {
        self.tracked
            .iter()
            .filter(|section| path_in_section(path, section))
            .max_by_key(|section| section.len())
            .map(String::as_str)
    }

    /// The upsert a visit to `path` calls for, if any.
    ///
    /// `None` when the path is outside every tracked section or the section
    /// already remembers exactly this path.
    pub fn pending_upsert(&self, path: &str) -> Option<(String, String)> {
        let section = self.section_for(path)?;
        match self.entries.get(section) {
            Some(existing) if existing == path => None,
            _ => Some((section.to_string(), path.to_string())),
        }
    }

    /// Record `path` for `section`. Returns true when the entry changed.
    pub fn upsert(&mut self, section: &str, path: &str) -> bool {
        if self.entries.get(section).map(String::as_str) == Some(path) {
            return false;
        }
        debug!(section, path, "Remembering navigation path");
        self.entries.insert(section.to_string(), path.to_string());
        self.revision += 1;
        true
    }

    /// Convenience: apply whatever upsert a visit to `path` calls for
    pub fn observe(&mut self, path: &str) -> bool {
        match self.pending_upsert(path) {
            Some((section, path)) => self.upsert(&section, &path),
            None => false,
        }
    }

    /// Remembered path for a section
    pub fn get(&self, section: &str) -> Option<&str> {
        self.entries.get(section).map(String::as_str)
    }

    /// Link target for a section: the remembered path, or `fallback`
    pub fn resolve<'a>(&'a self, section: &str, fallback: &'a str) -> &'a str {
        self.get(section).unwrap_or(fallback)
    }

    /// All remembered entries, ordered by section key
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of mutations applied so far
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

fn normalize_section(section: &str) -> String {
    let trimmed = section.trim().trim_end_matches('/');
    trimmed.to_string()
}

fn path_in_section(path: &str, section: &str) -> bool {
    match path.strip_prefix(section) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_visit_creates_entry_once() {
        let mut memory = NavigationMemory::new(["/manage"]);
        assert!(memory.is_empty());

        assert!(memory.observe("/manage/User"));
        assert_eq!(memory.get("/manage"), Some("/manage/User"));
        assert_eq!(memory.revision(), 1);

        assert!(!memory.observe("/manage/User"));
        assert_eq!(memory.revision(), 1);
        assert_eq!(memory.len(), 1);
    }

    #[test]
    fn test_upsert_is_idempotent() {
        let mut memory = NavigationMemory::new(["/jobs"]);
        assert!(memory.upsert("/jobs", "/jobs/detail/J-0001"));
        assert!(!memory.upsert("/jobs", "/jobs/detail/J-0001"));
        assert_eq!(memory.revision(), 1);

        assert!(memory.upsert("/jobs", "/jobs/detail/J-0002"));
        assert_eq!(memory.revision(), 2);
        assert_eq!(memory.get("/jobs"), Some("/jobs/detail/J-0002"));
    }

    #[test]
    fn test_untracked_paths_are_ignored() {
        let mut memory = NavigationMemory::new(["/manage"]);
        assert!(memory.pending_upsert("/dashboard").is_none());
        assert!(memory.pending_upsert("/managers").is_none(), "prefix must end at a segment");
        assert!(!memory.observe("/jobs"));
        assert!(memory.is_empty());
    }

    #[test]
    fn test_section_root_counts_as_inside() {
        let memory = NavigationMemory::new(["/jobs/"]);
        assert_eq!(memory.tracked(), &["/jobs".to_string()]);
        assert_eq!(memory.section_for("/jobs"), Some("/jobs"));
        assert_eq!(memory.section_for("/jobs?page=2"), Some("/jobs"));
    }

    #[test]
    fn test_longest_section_wins() {
        let memory = NavigationMemory::new(["/manage", "/manage/Center"]);
        assert_eq!(memory.section_for("/manage/Center/C-01"), Some("/manage/Center"));
        assert_eq!(memory.section_for("/manage/User"), Some("/manage"));
    }

    #[test]
    fn test_resolve_falls_back_until_remembered() {
        let mut memory = NavigationMemory::new(["/manage"]);
        assert_eq!(memory.resolve("/manage", "/manage/User"), "/manage/User");

        memory.observe("/manage/Center");
        assert_eq!(memory.resolve("/manage", "/manage/User"), "/manage/Center");
    }

    #[test]
    fn test_entries_are_never_removed() {
        let mut memory = NavigationMemory::new(["/manage", "/jobs"]);
        memory.observe("/manage/User");
        memory.observe("/jobs/detail/J-0003");
        memory.observe("/dashboard");

        let entries: Vec<_> = memory.entries().collect();
        assert_eq!(
            entries,
            vec![("/jobs", "/jobs/detail/J-0003"), ("/manage", "/manage/User")]
        );
    }
}
