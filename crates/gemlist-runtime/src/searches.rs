use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::Result;

/// Receives free-text search terms as the user submits them
pub trait SearchRecorder: Send {
    fn record(&mut self, term: &str);
}

/// Most-recent-first list of search terms, de-duplicated case-insensitively
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentSearches {
    terms: Vec<String>,
    capacity: usize,
}

impl RecentSearches {
    pub fn new(capacity: usize) -> Self {
        Self {
            terms: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Put `term` in front, dropping an older spelling of the same term
    pub fn push(&mut self, term: &str) {
        let term = term.trim();
        if term.is_empty() {
            return;
        }
        let folded = term.to_lowercase();
        self.terms.retain(|t| t.to_lowercase() != folded);
        self.terms.insert(0, term.to_string());
        self.terms.truncate(self.capacity);
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn clear(&mut self) {
        self.terms.clear();
    }

    /// Load from a JSON file; a missing file is an empty list
    pub fn load_from(path: &Path, capacity: usize) -> Result<Self> {
        let mut searches = Self::new(capacity);
        if !path.exists() {
            return Ok(searches);
        }
        let content = std::fs::read_to_string(path)?;
        let stored: Vec<String> = serde_json::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("{}: {}", path.display(), e)))?;
        // oldest first so the stored order survives
        for term in stored.iter().rev() {
            searches.push(term);
        }
        Ok(searches)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.terms)
            .map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl SearchRecorder for RecentSearches {
    fn record(&mut self, term: &str) {
        self.push(term);
    }
}

/// Shared recorder, so the owner can read terms while a controller records
impl<R: SearchRecorder> SearchRecorder for Arc<Mutex<R>> {
    fn record(&mut self, term: &str) {
        if let Ok(mut inner) = self.lock() {
            inner.record(term);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_most_recent_first_and_case_insensitive() {
        let mut recent = RecentSearches::new(5);
        recent.push("Ruby");
        recent.push("sapphire");
        recent.push("ruby");
        assert_eq!(recent.terms(), &["ruby", "sapphire"]);
    }

    #[test]
    fn test_capacity_and_blank_terms() {
        let mut recent = RecentSearches::new(2);
        recent.push("a");
        recent.push("   ");
        recent.push("b");
        recent.push("c");
        assert_eq!(recent.terms(), &["c", "b"]);
    }

    #[test]
    fn test_shared_recorder() {
        let shared = Arc::new(Mutex::new(RecentSearches::new(3)));
        let mut recorder: Box<dyn SearchRecorder> = Box::new(shared.clone());
        recorder.record("emerald");
        assert_eq!(shared.lock().unwrap().terms(), &["emerald"]);
    }

    #[test]
    fn test_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("recent.json");

        let mut recent = RecentSearches::new(4);
        recent.push("oval");
        recent.push("pear");
        recent.save_to(&path)?;

        let loaded = RecentSearches::load_from(&path, 4)?;
        assert_eq!(loaded.terms(), &["pear", "oval"]);
        assert!(RecentSearches::load_from(&temp_dir.path().join("none.json"), 4)?.is_empty());
        Ok(())
    }
}
