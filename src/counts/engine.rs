// Pairwise co-occurrence scrape.
//
// Every (target, association) pair is one exact-phrase AND search. The
// response's counts are positional: joint count, then the target alone,
// then the association alone. Pairs are queried one at a time in
// target-major order and any failure aborts the whole scrape.

use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use super::matrix::CooccurrenceMatrix;
use crate::error::{Result, ScrapeError};
use crate::eutils::traits::{and_query, phrase, LiteratureSearch};
use crate::vocab::TermVocabulary;

/// Where each term's alone-count comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AloneCounts {
    /// Taken from the pair queries; the last pair touching a term wins.
    #[default]
    LastPair,
    /// One single-term query per term before the pairwise loop.
    Dedicated,
}

pub struct CooccurrenceEngine<'a> {
    search: &'a dyn LiteratureSearch,
    alone_counts: AloneCounts,
    show_progress: bool,
}

impl<'a> CooccurrenceEngine<'a> {
    pub fn new(search: &'a dyn LiteratureSearch) -> Self {
        Self {
            search,
            alone_counts: AloneCounts::default(),
            show_progress: false,
        }
    }

    pub fn with_alone_counts(mut self, mode: AloneCounts) -> Self {
        self.alone_counts = mode;
        self
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Build a fresh matrix for `vocab` and overwrite its alone-counts.
    ///
    /// On error the vocabulary is left as it was.
    pub async fn scrape(&self, vocab: &mut TermVocabulary) -> Result<CooccurrenceMatrix> {
        let targets = vocab.target_terms();
        let associations = vocab.association_terms();

        info!(
            targets = targets.len(),
            associations = associations.len(),
            mode = ?self.alone_counts,
            "Starting co-occurrence scrape"
        );

        let mut matrix = CooccurrenceMatrix::zeros(targets.len(), associations.len(), Utc::now());
        let mut target_counts = vec![0; targets.len()];
        let mut association_counts = vec![0; associations.len()];

        if self.alone_counts == AloneCounts::Dedicated {
            target_counts = self.term_counts(targets).await?;
            association_counts = self.term_counts(associations).await?;
        }

        let pb = self.progress_bar((targets.len() * associations.len()) as u64);

        for (t, target) in targets.iter().enumerate() {
            for (a, association) in associations.iter().enumerate() {
                let [joint, target_alone, association_alone] = self
                    .pair_counts(target, association)
                    .await
                    .map_err(|e| ScrapeError::Pair {
                        target: target.clone(),
                        association: association.clone(),
                        source: Box::new(e),
                    })?;

                let denominator = match self.alone_counts {
                    AloneCounts::LastPair => {
                        target_counts[t] = target_alone;
                        association_counts[a] = association_alone;
                        target_alone
                    }
                    AloneCounts::Dedicated => target_counts[t],
                };
                matrix.record(t, a, joint, denominator);
                pb.inc(1);
            }
        }
        pb.finish_and_clear();

        let pairs = targets.len() * associations.len();
        vocab.replace_counts(target_counts, association_counts);
        info!(pairs, "Co-occurrence scrape complete");
        Ok(matrix)
    }

    async fn pair_counts(&self, target: &str, association: &str) -> Result<[u64; 3]> {
        let query = and_query(target, association);
        let counts = self.search.search_counts(&query).await?;

        match counts.as_slice() {
            [joint, target_alone, association_alone, ..] => {
                debug!(query = %query, joint, target_alone, association_alone, "Pair counts");
                Ok([*joint, *target_alone, *association_alone])
            }
            _ => Err(ScrapeError::malformed(
                query,
                format!("expected 3 counts, got {}", counts.len()),
            )),
        }
    }

    async fn term_counts(&self, terms: &[String]) -> Result<Vec<u64>> {
        let mut counts = Vec::with_capacity(terms.len());
        for term in terms {
            let query = phrase(term);
            let found = self
                .search
                .search_counts(&query)
                .await
                .and_then(|c| {
                    c.first()
                        .copied()
                        .ok_or_else(|| ScrapeError::malformed(&query, "no count in response"))
                })
                .map_err(|e| ScrapeError::TermCount {
                    term: term.clone(),
                    source: Box::new(e),
                })?;
            debug!(term = %term, count = found, "Term count");
            counts.push(found);
        }
        Ok(counts)
    }

    fn progress_bar(&self, total: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(total);
        if let Ok(style) =
            ProgressStyle::default_bar().template("  Pairs [{bar:30}] {pos}/{len} ({eta})")
        {
            pb.set_style(style);
        }
        pb
    }
}
