// Time associations for canonically named ERP components.
//
// A canonical label is a polarity letter followed by a latency in
// milliseconds ("P300", "N170"). For each such target the strongest
// association in its score row is reported, so the results can be laid out
// on a latency axis.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Polarity {
    P,
    N,
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Polarity::P => write!(f, "P"),
            Polarity::N => write!(f, "N"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeAssociation {
    pub associated_term: String,
    pub polarity: Polarity,
    pub latency_ms: u64,
}

/// Split a canonical ERP label into polarity and latency.
///
/// Returns None for anything else ("ERN", "MMN", "P3b", a bare "P"), and for
/// latencies too large for a u64.
pub fn parse_erp_label(label: &str) -> Option<(Polarity, u64)> {
    let polarity = match label.chars().next()? {
        'P' => Polarity::P,
        'N' => Polarity::N,
        _ => return None,
    };
    let digits = &label[1..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let latency = digits.parse::<u64>().ok()?;
    Some((polarity, latency))
}

/// Index of the first maximum, NaN entries ignored.
///
/// With duplicated maxima the lowest index wins. Returns None for an empty
/// or all-NaN row.
pub fn argmax<I>(values: I) -> Option<usize>
where
    I: IntoIterator<Item = f64>,
{
    let mut best: Option<(usize, f64)> = None;
    for (i, v) in values.into_iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Strongest association for every canonically named target, in target order.
///
/// `scores[i][j]` is the strength of target `i` with association `j`. Targets
/// with a non-canonical label are skipped. A row with no defined score falls
/// back to the first association so every canonical target is reported.
pub fn time_associations(
    targets: &[String],
    associations: &[String],
    scores: &[Vec<f64>],
) -> Vec<TimeAssociation> {
    targets
        .iter()
        .zip(scores)
        .filter_map(|(label, row)| {
            let (polarity, latency_ms) = parse_erp_label(label)?;
            let best = argmax(row.iter().copied()).unwrap_or_else(|| {
                warn!(label = %label, "No defined scores, reporting first association");
                0
            });
            let associated_term = associations.get(best)?.clone();
            Some(TimeAssociation {
                associated_term,
                polarity,
                latency_ms,
            })
        })
        .collect()
}
