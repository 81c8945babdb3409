// Article harvesting and word-frequency profiles per target term.

pub mod aggregate;
pub mod extract;
pub mod harvest;
pub mod models;
pub mod tokenize;

pub use aggregate::{FrequencyAggregator, TermSummary};
pub use harvest::RecordHarvester;
pub use models::{ArticleRecord, FrequencyTable, TermArticleSet, WordsData};
pub use tokenize::StopWords;
