// Colored terminal summaries for counts, words and time associations.
//
// Presentation only; nothing here feeds back into the data.

use colored::Colorize;

use crate::analysis::TimeAssociation;
use crate::counts::CountsData;
use crate::words::TermSummary;

/// Which vocabulary to list raw counts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountKind {
    Targets,
    Associations,
}

/// Strongest association for every target term.
pub fn display_target_associations(data: &CountsData) {
    println!("\n{}", "=== Strongest association per target ===".bold());
    for target in data.vocabulary.target_terms() {
        match data.strongest_association_for(target) {
            Some(best) => println!(
                "  {:<8} {:<24} {:>7}",
                target,
                best.term,
                super::format_percent(best.value).green(),
            ),
            None => println!("  {:<8} {}", target, "no defined association".dimmed()),
        }
    }
}

/// Strongest target for every association term.
pub fn display_association_targets(data: &CountsData) {
    println!("\n{}", "=== Strongest target per association ===".bold());
    for association in data.vocabulary.association_terms() {
        match data.strongest_target_for(association) {
            Some(best) => println!(
                "  {:<24} {:<8} {:>7}",
                association,
                best.term,
                super::format_percent(best.value).green(),
            ),
            None => println!("  {:<24} {}", association, "no defined target".dimmed()),
        }
    }
}

/// The terms with the most papers on their own.
pub fn display_most_studied(data: &CountsData) {
    println!();
    if let Some(top) = data.most_studied_target() {
        println!(
            "  Most studied target:      {:<12} {:>10} papers",
            top.term.bold(),
            top.value
        );
    }
    if let Some(top) = data.most_studied_association() {
        println!(
            "  Most studied association: {:<12} {:>10} papers",
            top.term.bold(),
            top.value
        );
    }
}

/// Raw alone-counts for one vocabulary.
pub fn display_counts(data: &CountsData, kind: CountKind) {
    let (title, terms, counts) = match kind {
        CountKind::Targets => (
            "Target",
            data.vocabulary.target_terms(),
            data.vocabulary.target_counts(),
        ),
        CountKind::Associations => (
            "Association",
            data.vocabulary.association_terms(),
            data.vocabulary.association_counts(),
        ),
    };

    println!("\n{}", format!("=== {title} paper counts ===").bold());
    for (term, count) in terms.iter().zip(counts) {
        println!("  {:<24} {:>10}", term, count);
    }
}

pub fn display_time_associations(associations: &[TimeAssociation]) {
    if associations.is_empty() {
        println!("No canonically named targets (e.g. P300, N170) in the saved counts.");
        return;
    }

    println!("\n{}", "=== Time associations ===".bold());
    println!(
        "  {:>8}  {:<8}  {}",
        "Latency".dimmed(),
        "Polarity".dimmed(),
        "Association".dimmed()
    );
    let mut sorted: Vec<&TimeAssociation> = associations.iter().collect();
    sorted.sort_by_key(|a| a.latency_ms);
    for assoc in sorted {
        let polarity = assoc.polarity.to_string();
        let polarity = match assoc.polarity {
            crate::analysis::Polarity::P => polarity.red(),
            crate::analysis::Polarity::N => polarity.blue(),
        };
        println!(
            "  {:>6}ms  {:<8}  {}",
            assoc.latency_ms, polarity, assoc.associated_term
        );
    }
}

/// Top words and year span for each harvested term.
pub fn display_term_summaries(summaries: &[TermSummary]) {
    println!("\n{}", "=== Word profiles ===".bold());
    for summary in summaries {
        let span = match (summary.first_year, summary.last_year) {
            (Some(first), Some(last)) => format!("{first}-{last}"),
            _ => "no years".to_string(),
        };
        println!(
            "  {}: {} articles ({} with abstracts), {}",
            summary.term.bold(),
            summary.n_articles,
            summary.n_with_abstract,
            span.dimmed()
        );
        if summary.top_words.is_empty() {
            println!("      {}", "no words".dimmed());
            continue;
        }
        let words: Vec<&str> = summary.top_words.iter().map(|(w, _)| w.as_str()).collect();
        println!("      {}", words.join(", "));
    }
}
