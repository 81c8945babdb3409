// NCBI E-utilities access: search and fetch over HTTP, XML parsing, throttling.
//
// The rest of the crate talks to the LiteratureSearch trait only, so the
// scrape logic never sees reqwest or quick-xml directly.

pub mod client;
pub mod rate_limiter;
pub mod traits;
pub mod xml;

pub use client::EutilsClient;
pub use traits::LiteratureSearch;
pub use xml::XmlElement;
