// Data models for harvested articles and their word counts.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One retrieved article. Fields the record lacked are None / empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub id: u64,
    pub title: Option<String>,
    pub year: Option<u32>,
    /// Normalized abstract tokens, in abstract order.
    pub words: Vec<String>,
}

/// Token counts that remember the order tokens were first seen.
///
/// Iteration and tie-breaking follow first occurrence, never key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<(String, usize)>", into = "Vec<(String, usize)>")]
pub struct FrequencyTable {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn from_words<'a, I>(words: I) -> Self
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut table = Self::default();
        for word in words {
            table.add(word, 1);
        }
        table
    }

    fn add(&mut self, word: &str, count: usize) {
        match self.index.get(word) {
            Some(&i) => self.entries[i].1 += count,
            None => {
                self.index.insert(word.to_string(), self.entries.len());
                self.entries.push((word.to_string(), count));
            }
        }
    }

    pub fn get(&self, word: &str) -> Option<usize> {
        self.index.get(word).map(|&i| self.entries[i].1)
    }

    /// Drop a token. Absent tokens are ignored.
    pub fn remove(&mut self, word: &str) -> Option<usize> {
        let i = self.index.remove(word)?;
        let (_, count) = self.entries.remove(i);
        for (w, _) in &self.entries[i..] {
            if let Some(slot) = self.index.get_mut(w) {
                *slot -= 1;
            }
        }
        Some(count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(w, c)| (w.as_str(), *c))
    }

    /// The `n` most frequent tokens; equal counts keep first-seen order.
    pub fn most_common(&self, n: usize) -> Vec<(String, usize)> {
        let mut ranked: Vec<&(String, usize)> = self.entries.iter().collect();
        // sort_by is stable, so ties stay in insertion order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.into_iter().take(n).cloned().collect()
    }
}

impl From<Vec<(String, usize)>> for FrequencyTable {
    fn from(entries: Vec<(String, usize)>) -> Self {
        let mut table = Self::default();
        for (word, count) in entries {
            table.add(&word, count);
        }
        table
    }
}

impl From<FrequencyTable> for Vec<(String, usize)> {
    fn from(table: FrequencyTable) -> Self {
        table.entries
    }
}

/// Everything harvested for one target term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermArticleSet {
    pub term: String,
    pub records: Vec<ArticleRecord>,
    /// Filled by `FrequencyAggregator::combine`.
    pub all_words: Vec<String>,
    /// Filled by `FrequencyAggregator::build_frequencies`.
    pub frequencies: FrequencyTable,
}

impl TermArticleSet {
    pub fn new(term: &str) -> Self {
        Self {
            term: term.to_string(),
            records: Vec::new(),
            all_words: Vec::new(),
            frequencies: FrequencyTable::default(),
        }
    }

    pub fn n_articles(&self) -> usize {
        self.records.len()
    }

    pub fn years(&self) -> Vec<u32> {
        self.records.iter().filter_map(|r| r.year).collect()
    }

    /// Articles per year, for the temporal profile.
    pub fn year_counts(&self) -> BTreeMap<u32, usize> {
        let mut counts = BTreeMap::new();
        for year in self.years() {
            *counts.entry(year).or_insert(0) += 1;
        }
        counts
    }
}

/// Saved state of a words run: one article set per target term, in
/// vocabulary order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordsData {
    pub scraped_at: DateTime<Utc>,
    pub sets: Vec<TermArticleSet>,
}

impl WordsData {
    pub fn get(&self, term: &str) -> Option<&TermArticleSet> {
        self.sets.iter().find(|s| s.term == term)
    }

    pub fn get_mut(&mut self, term: &str) -> Option<&mut TermArticleSet> {
        self.sets.iter_mut().find(|s| s.term == term)
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.sets.iter().map(|s| s.term.as_str())
    }
}
