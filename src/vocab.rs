// Term vocabularies: the two fixed term lists and their alone-counts.
//
// Callers supply well-formed lists (unique, non-empty labels). Nothing here
// validates that; the only invariant maintained is that each count vector
// has exactly one slot per term.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermVocabulary {
    target_terms: Vec<String>,
    association_terms: Vec<String>,
    target_counts: Vec<u64>,
    association_counts: Vec<u64>,
}

impl TermVocabulary {
    pub fn new(target_terms: Vec<String>, association_terms: Vec<String>) -> Self {
        let mut vocab = Self::default();
        vocab.set_target_terms(target_terms);
        vocab.set_association_terms(association_terms);
        vocab
    }

    /// Replace the target terms. Their counts are wiped back to zero.
    pub fn set_target_terms(&mut self, terms: Vec<String>) {
        self.target_counts = vec![0; terms.len()];
        self.target_terms = terms;
    }

    /// Replace the association terms. Their counts are wiped back to zero.
    pub fn set_association_terms(&mut self, terms: Vec<String>) {
        self.association_counts = vec![0; terms.len()];
        self.association_terms = terms;
    }

    pub fn target_terms(&self) -> &[String] {
        &self.target_terms
    }

    pub fn association_terms(&self) -> &[String] {
        &self.association_terms
    }

    pub fn target_counts(&self) -> &[u64] {
        &self.target_counts
    }

    pub fn association_counts(&self) -> &[u64] {
        &self.association_counts
    }

    pub fn target_index(&self, term: &str) -> Option<usize> {
        self.target_terms.iter().position(|t| t == term)
    }

    pub fn association_index(&self, term: &str) -> Option<usize> {
        self.association_terms.iter().position(|t| t == term)
    }

    /// Overwrite both count vectors at once. Lengths must match the term lists.
    pub(crate) fn replace_counts(&mut self, target_counts: Vec<u64>, association_counts: Vec<u64>) {
        debug_assert_eq!(target_counts.len(), self.target_terms.len());
        debug_assert_eq!(association_counts.len(), self.association_terms.len());
        self.target_counts = target_counts;
        self.association_counts = association_counts;
    }
}

/// Read a term list: one term per line, blank lines and `#` comments skipped.
pub fn load_terms_file(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read term file {}", path.display()))?;
    Ok(parse_terms(&text))
}

pub fn parse_terms(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}
