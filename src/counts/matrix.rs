// Co-occurrence matrix and the summary queries over a finished scrape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::{self, argmax, TimeAssociation};
use crate::vocab::TermVocabulary;

/// Pairwise document counts between target and association terms.
///
/// Rows are targets, columns are associations, both in vocabulary order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CooccurrenceMatrix {
    pub numbers: Vec<Vec<u64>>,
    /// `numbers / target alone-count`; None where the alone-count was zero.
    pub percent: Vec<Vec<Option<f64>>>,
    pub scraped_at: DateTime<Utc>,
}

impl CooccurrenceMatrix {
    pub fn zeros(n_targets: usize, n_associations: usize, scraped_at: DateTime<Utc>) -> Self {
        Self {
            numbers: vec![vec![0; n_associations]; n_targets],
            percent: vec![vec![None; n_associations]; n_targets],
            scraped_at,
        }
    }

    pub(crate) fn record(&mut self, target: usize, association: usize, joint: u64, target_alone: u64) {
        self.numbers[target][association] = joint;
        self.percent[target][association] = association_percent(joint, target_alone);
    }

    /// Percent row for one target with undefined entries as NaN.
    pub fn percent_row(&self, target: usize) -> Vec<f64> {
        self.percent
            .get(target)
            .map(|row| row.iter().map(|p| p.unwrap_or(f64::NAN)).collect())
            .unwrap_or_default()
    }

    /// Percent column for one association with undefined entries as NaN.
    pub fn percent_column(&self, association: usize) -> Vec<f64> {
        self.percent
            .iter()
            .map(|row| row.get(association).copied().flatten().unwrap_or(f64::NAN))
            .collect()
    }
}

/// Fraction of a target's documents that also mention the association.
pub fn association_percent(joint: u64, target_alone: u64) -> Option<f64> {
    if target_alone == 0 {
        None
    } else {
        Some(joint as f64 / target_alone as f64)
    }
}

/// A term picked by one of the summary queries, with the value that won.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<'a, T> {
    pub term: &'a str,
    pub value: T,
}

/// Saved state of a co-occurrence run: the vocabulary with its alone-counts
/// and the matrix built from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountsData {
    pub vocabulary: TermVocabulary,
    pub matrix: CooccurrenceMatrix,
}

impl CountsData {
    pub fn new(vocabulary: TermVocabulary, matrix: CooccurrenceMatrix) -> Self {
        Self { vocabulary, matrix }
    }

    /// The association with the highest percent for `target`.
    pub fn strongest_association_for(&self, target: &str) -> Option<Ranked<'_, f64>> {
        let t = self.vocabulary.target_index(target)?;
        let row = self.matrix.percent_row(t);
        let best = argmax(row.iter().copied())?;
        Some(Ranked {
            term: self.vocabulary.association_terms().get(best)?,
            value: row[best],
        })
    }

    /// The target with the highest percent for `association`.
    pub fn strongest_target_for(&self, association: &str) -> Option<Ranked<'_, f64>> {
        let a = self.vocabulary.association_index(association)?;
        let column = self.matrix.percent_column(a);
        let best = argmax(column.iter().copied())?;
        Some(Ranked {
            term: self.vocabulary.target_terms().get(best)?,
            value: column[best],
        })
    }

    pub fn most_studied_target(&self) -> Option<Ranked<'_, u64>> {
        most_studied(self.vocabulary.target_terms(), self.vocabulary.target_counts())
    }

    pub fn most_studied_association(&self) -> Option<Ranked<'_, u64>> {
        most_studied(
            self.vocabulary.association_terms(),
            self.vocabulary.association_counts(),
        )
    }

    /// Time associations using the percent matrix as the score.
    pub fn time_associations(&self) -> Vec<TimeAssociation> {
        let scores: Vec<Vec<f64>> = (0..self.vocabulary.target_terms().len())
            .map(|t| self.matrix.percent_row(t))
            .collect();
        analysis::time_associations(
            self.vocabulary.target_terms(),
            self.vocabulary.association_terms(),
            &scores,
        )
    }
}

fn most_studied<'a>(terms: &'a [String], counts: &[u64]) -> Option<Ranked<'a, u64>> {
    let best = argmax(counts.iter().map(|&c| c as f64))?;
    Some(Ranked {
        term: terms.get(best)?,
        value: counts[best],
    })
}
