// ERP-SCANR: literature co-occurrence and word profiles for ERP components.
//
// This is the library root. Counting and harvesting both talk to PubMed
// through the eutils module; everything downstream of a scrape is pure.

pub mod analysis;
pub mod config;
pub mod counts;
pub mod error;
pub mod eutils;
pub mod output;
pub mod store;
pub mod vocab;
pub mod words;
