// Per-term article harvest: search for ids, fetch the records in one batch,
// then extract each record's fields independently.
//
// The id list is capped at the page size. A failed search or fetch aborts
// that term; a record missing fields still yields an ArticleRecord so that
// article counts match the ids retrieved. Fetched records are matched to ids
// by their own PMID, and by position only when a record carries none.

use std::collections::HashMap;

use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use super::extract::{extract_pmid, extract_record};
use super::models::{TermArticleSet, WordsData};
use super::tokenize::StopWords;
use crate::error::{Result, ScrapeError};
use crate::eutils::traits::{phrase, LiteratureSearch};
use crate::eutils::XmlElement;

pub struct RecordHarvester<'a> {
    search: &'a dyn LiteratureSearch,
    stop_words: &'a StopWords,
    show_progress: bool,
}

impl<'a> RecordHarvester<'a> {
    pub fn new(search: &'a dyn LiteratureSearch, stop_words: &'a StopWords) -> Self {
        Self {
            search,
            stop_words,
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Harvest up to `page_size` articles mentioning `term`.
    pub async fn harvest(&self, term: &str, page_size: usize) -> Result<TermArticleSet> {
        self.harvest_term(term, page_size)
            .await
            .map_err(|e| ScrapeError::Harvest {
                term: term.to_string(),
                source: Box::new(e),
            })
    }

    async fn harvest_term(&self, term: &str, page_size: usize) -> Result<TermArticleSet> {
        let mut set = TermArticleSet::new(term);

        let mut ids = self.search.search_ids(&phrase(term), page_size).await?;
        ids.truncate(page_size);

        if ids.is_empty() {
            info!(term = term, "No articles found");
            return Ok(set);
        }

        let articles = self.search.fetch_records(&ids).await?;
        if articles.len() != ids.len() {
            warn!(
                term = term,
                ids = ids.len(),
                records = articles.len(),
                "Fetched record count differs from id count"
            );
        }

        let by_pmid: HashMap<u64, &XmlElement> = articles
            .iter()
            .filter_map(|a| extract_pmid(a).map(|pmid| (pmid, a)))
            .collect();

        let mut misaligned = 0;
        set.records = ids
            .iter()
            .enumerate()
            .map(|(i, &id)| {
                let positional = articles.get(i);
                if let Some(pmid) = positional.and_then(extract_pmid) {
                    if pmid != id {
                        misaligned += 1;
                    }
                }
                let article = by_pmid
                    .get(&id)
                    .copied()
                    .or_else(|| positional.filter(|a| extract_pmid(a).is_none()));
                extract_record(id, article, self.stop_words)
            })
            .collect();

        if misaligned > 0 {
            warn!(
                term = term,
                misaligned = misaligned,
                "Fetched records out of id order, matched by PMID"
            );
        }

        info!(term = term, articles = set.n_articles(), "Harvested term");
        Ok(set)
    }

    /// Harvest every term in order. The first failing term aborts the run.
    pub async fn harvest_all(&self, terms: &[String], page_size: usize) -> Result<WordsData> {
        let scraped_at = Utc::now();
        let pb = self.progress_bar(terms.len() as u64);

        let mut sets = Vec::with_capacity(terms.len());
        for term in terms {
            pb.set_message(term.clone());
            sets.push(self.harvest(term, page_size).await?);
            pb.inc(1);
        }
        pb.finish_and_clear();

        Ok(WordsData { scraped_at, sets })
    }

    fn progress_bar(&self, total: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(total);
        if let Ok(style) =
            ProgressStyle::default_bar().template("  Terms [{bar:30}] {pos}/{len} {msg}")
        {
            pb.set_style(style);
        }
        pb
    }
}
