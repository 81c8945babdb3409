// Word aggregation across a term's articles.
//
// Two explicit steps: `combine` flattens the per-article word lists, then
// `build_frequencies` counts them. They stay separate so the raw per-article
// lists can be inspected before flattening.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::models::{FrequencyTable, TermArticleSet, WordsData};

/// Short per-term report: size, top words and year span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermSummary {
    pub term: String,
    pub n_articles: usize,
    pub n_with_abstract: usize,
    pub top_words: Vec<(String, usize)>,
    pub first_year: Option<u32>,
    pub last_year: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct FrequencyAggregator {
    /// Extra words dropped from every table, on top of the term itself.
    exclusions: HashSet<String>,
}

impl FrequencyAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exclusions<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclusions
            .extend(words.into_iter().map(|w| w.into().to_lowercase()));
        self
    }

    /// Flatten every record's words, in record order, into `all_words`.
    ///
    /// Rebuilds from scratch, so calling it twice does not double the words.
    pub fn combine(&self, set: &mut TermArticleSet) {
        set.all_words = set
            .records
            .iter()
            .flat_map(|r| r.words.iter().cloned())
            .collect();
    }

    /// Count `all_words`, leaving out the term's own lowercase label and any
    /// configured exclusions.
    pub fn build_frequencies(&self, set: &mut TermArticleSet) {
        let mut table = FrequencyTable::from_words(&set.all_words);
        table.remove(&set.term.to_lowercase());
        for word in &self.exclusions {
            table.remove(word);
        }
        set.frequencies = table;
    }

    /// The `n` most frequent words, ties in first-occurrence order.
    pub fn top_n(&self, set: &TermArticleSet, n: usize) -> Vec<(String, usize)> {
        set.frequencies.most_common(n)
    }

    /// Run both steps for every term.
    pub fn aggregate_all(&self, data: &mut WordsData) {
        for set in &mut data.sets {
            self.combine(set);
            self.build_frequencies(set);
        }
    }

    pub fn summarize(&self, set: &TermArticleSet, n: usize) -> TermSummary {
        let years = set.years();
        TermSummary {
            term: set.term.clone(),
            n_articles: set.n_articles(),
            n_with_abstract: set.records.iter().filter(|r| !r.words.is_empty()).count(),
            top_words: self.top_n(set, n),
            first_year: years.iter().copied().min(),
            last_year: years.iter().copied().max(),
        }
    }
}
