use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing::info;

use erpscanr::config::Config;
use erpscanr::counts::{CooccurrenceEngine, CountsData};
use erpscanr::eutils::rate_limiter::RateLimiter;
use erpscanr::eutils::EutilsClient;
use erpscanr::output::terminal::{self, CountKind};
use erpscanr::store::Store;
use erpscanr::vocab::{load_terms_file, TermVocabulary};
use erpscanr::words::{FrequencyAggregator, RecordHarvester, StopWords, TermSummary, WordsData};

/// ERP-SCANR: literature profiles for event-related potential components.
///
/// Counts how often ERP component names co-occur with cognitive and
/// clinical terms in PubMed, and builds word and year profiles from the
/// abstracts that mention each component.
#[derive(Parser)]
#[command(name = "erpscanr", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count co-occurrences between target and association terms
    Count {
        /// File with one target term per line
        #[arg(long)]
        targets: PathBuf,

        /// File with one association term per line
        #[arg(long)]
        associations: PathBuf,
    },

    /// Harvest abstracts for each target term and build word profiles
    Words {
        /// File with one target term per line
        #[arg(long)]
        targets: PathBuf,

        /// Max articles per term (default: ERPSCANR_RETMAX or 500)
        #[arg(long)]
        retmax: Option<usize>,

        /// Number of top words to show per term
        #[arg(long, default_value = "10")]
        top: usize,

        /// File with extra words to leave out of the profiles
        #[arg(long)]
        exclusions: Option<PathBuf>,
    },

    /// Print summaries of previously saved data
    Report {
        #[arg(value_enum)]
        data: ReportKind,

        /// Number of top words to show per term
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Show the strongest association for each canonically named ERP
    TimeAssociations,
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportKind {
    Counts,
    Words,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("erpscanr=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let store = Store::new(config.data_dir.clone());

    match cli.command {
        Commands::Count {
            targets,
            associations,
        } => {
            let mut vocab =
                TermVocabulary::new(load_terms_file(&targets)?, load_terms_file(&associations)?);
            let client = build_client(&config)?;

            println!(
                "Counting co-occurrences for {} targets x {} associations...",
                vocab.target_terms().len(),
                vocab.association_terms().len()
            );

            let matrix = CooccurrenceEngine::new(&client)
                .with_alone_counts(config.alone_counts)
                .with_progress(true)
                .scrape(&mut vocab)
                .await?;

            let data = CountsData::new(vocab, matrix);
            let path = store.save_counts(&data)?;
            print_counts(&data);
            println!("\n{}", format!("Counts saved to: {}", path.display()).bold());
        }

        Commands::Words {
            targets,
            retmax,
            top,
            exclusions,
        } => {
            let terms = load_terms_file(&targets)?;
            let retmax = retmax.unwrap_or(config.retmax);
            let client = build_client(&config)?;
            let stop_words = StopWords::english();
            let aggregator = build_aggregator(exclusions.as_deref())?;

            println!(
                "Harvesting up to {} articles for each of {} terms...",
                retmax,
                terms.len()
            );

            let mut data = RecordHarvester::new(&client, &stop_words)
                .with_progress(true)
                .harvest_all(&terms, retmax)
                .await?;
            aggregator.aggregate_all(&mut data);

            let path = store.save_words(&data)?;
            terminal::display_term_summaries(&summaries(&aggregator, &data, top));
            println!("\n{}", format!("Words saved to: {}", path.display()).bold());
        }

        Commands::Report { data, top } => match data {
            ReportKind::Counts => {
                let data = store.load_counts()?;
                println!("Counts scraped at {}", data.matrix.scraped_at);
                print_counts(&data);
            }
            ReportKind::Words => {
                let data = store.load_words()?;
                println!("Words scraped at {}", data.scraped_at);
                let aggregator = FrequencyAggregator::new();
                terminal::display_term_summaries(&summaries(&aggregator, &data, top));
            }
        },

        Commands::TimeAssociations => {
            let data = store.load_counts()?;
            let associations = data.time_associations();
            info!(count = associations.len(), "Extracted time associations");
            terminal::display_time_associations(&associations);
        }
    }

    Ok(())
}

fn build_client(config: &Config) -> Result<EutilsClient> {
    EutilsClient::new(
        &config.eutils_url,
        config.api_key.clone(),
        RateLimiter::from_millis(config.request_delay_ms),
    )
}

fn build_aggregator(exclusions: Option<&Path>) -> Result<FrequencyAggregator> {
    let aggregator = FrequencyAggregator::new();
    match exclusions {
        Some(path) => Ok(aggregator.with_exclusions(load_terms_file(path)?)),
        None => Ok(aggregator),
    }
}

fn summaries(aggregator: &FrequencyAggregator, data: &WordsData, top: usize) -> Vec<TermSummary> {
    data.sets
        .iter()
        .map(|set| aggregator.summarize(set, top))
        .collect()
}

fn print_counts(data: &CountsData) {
    terminal::display_target_associations(data);
    terminal::display_association_targets(data);
    terminal::display_most_studied(data);
    terminal::display_counts(data, CountKind::Targets);
    terminal::display_counts(data, CountKind::Associations);
}
