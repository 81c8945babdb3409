// Per-field extraction from a PubMed article record.
//
// Records are structurally heterogeneous: any of title, abstract or creation
// date may be missing. Each field has its own lookup returning an Option, so
// a missing abstract never costs us the title or the year.

use super::models::ArticleRecord;
use super::tokenize::{process_words, StopWords};
use crate::eutils::XmlElement;

/// The record's own PubMed id, from the first `PMID` element.
pub fn extract_pmid(article: &XmlElement) -> Option<u64> {
    article.find("PMID")?.text().trim().parse().ok()
}

pub fn extract_title(article: &XmlElement) -> Option<String> {
    article
        .find("ArticleTitle")
        .map(|el| el.text().trim().to_string())
}

/// Tokens of the first abstract section; empty when there is no abstract.
pub fn extract_words(article: &XmlElement, stop_words: &StopWords) -> Vec<String> {
    article
        .find("AbstractText")
        .map(|el| process_words(&el.text(), stop_words))
        .unwrap_or_default()
}

/// Year of the record's creation date.
pub fn extract_year(article: &XmlElement) -> Option<u32> {
    article
        .find("DateCreated")?
        .find("Year")?
        .text()
        .trim()
        .parse()
        .ok()
}

/// Build the record for `id`. A missing article yields a record with every
/// field absent.
pub fn extract_record(id: u64, article: Option<&XmlElement>, stop_words: &StopWords) -> ArticleRecord {
    ArticleRecord {
        id,
        title: article.and_then(extract_title),
        year: article.and_then(extract_year),
        words: article
            .map(|a| extract_words(a, stop_words))
            .unwrap_or_default(),
    }
}
