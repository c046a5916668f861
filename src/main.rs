use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use lectern::config::Config;
use lectern::dataset::{self, TEXT_COLUMN};
use lectern::model::GibbsLdaFitter;
use lectern::normalize::TextNormalizer;
use lectern::pipeline;
use lectern::scoring;
use lectern::store::ModelRepository;
use lectern::vectorize::CountVectorizer;

/// Lectern: topic analysis for speech transcripts.
///
/// Trains a topic model over a transcript dataset once, persists it, and
/// surfaces the dominant topics of any single transcript.
#[derive(Parser)]
#[command(name = "lectern", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the topic model on a dataset and persist it
    Train {
        /// Dataset file (CSV or JSON) with a transcript column
        dataset: PathBuf,

        /// Name of the transcript text column
        #[arg(long, default_value = TEXT_COLUMN)]
        column: String,

        /// Topic count (overrides LECTERN_TOPICS)
        #[arg(long)]
        topics: Option<usize>,
    },

    /// Show the dominant topics of one transcript
    Topics {
        /// Dataset file (CSV or JSON) with a transcript column
        dataset: PathBuf,

        /// Row index of the transcript to analyze
        row: usize,

        /// Name of the transcript text column
        #[arg(long, default_value = TEXT_COLUMN)]
        column: String,

        /// Minimum topic strength to report
        #[arg(long, default_value_t = scoring::DEFAULT_THRESHOLD)]
        threshold: f64,

        /// Maximum number of topics to report
        #[arg(long, default_value_t = scoring::DEFAULT_TOP_K)]
        top_k: usize,
    },

    /// List transcripts in a dataset with row indices and previews
    List {
        /// Dataset file (CSV or JSON) with a transcript column
        dataset: PathBuf,

        /// Name of the transcript text column
        #[arg(long, default_value = TEXT_COLUMN)]
        column: String,
    },

    /// Show model artifact status (path, age, topics, vocabulary)
    Status,

    /// Delete the persisted model so the next run retrains
    Invalidate,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("lectern=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let repo = ModelRepository::new(config.model_path.clone());

    match cli.command {
        Commands::Train {
            dataset,
            column,
            topics,
        } => {
            let transcripts = dataset::load_transcripts(&dataset, &column)?;
            let texts: Vec<String> = transcripts.into_iter().map(|t| t.text).collect();
            println!("Training topic model on {} transcripts...", texts.len());

            let normalizer = TextNormalizer::default();
            let fitter = GibbsLdaFitter {
                topics: topics.unwrap_or(config.num_topics),
                seed: config.seed,
                ..GibbsLdaFitter::default()
            };

            let bundle =
                pipeline::train_bundle(&normalizer, CountVectorizer::new(), &fitter, &texts)?;
            let bundle = repo.save(bundle)?;

            println!("\n{}", "Training complete.".bold());
            println!("  Topics: {}", bundle.model.num_topics());
            println!("  Vocabulary: {} terms", bundle.vectorizer.vocabulary_size());
            println!("  Saved to: {}", repo.path().display());
        }

        Commands::Topics {
            dataset,
            row,
            column,
            threshold,
            top_k,
        } => {
            let transcripts = dataset::load_transcripts(&dataset, &column)?;
            let texts: Vec<String> = transcripts.iter().map(|t| t.text.clone()).collect();

            let normalizer = TextNormalizer::default();
            let fitter = GibbsLdaFitter {
                topics: config.num_topics,
                seed: config.seed,
                ..GibbsLdaFitter::default()
            };
            let bundle = pipeline::ensure_model(&repo, &normalizer, &fitter, &texts)?;

            let transcript = dataset::select_row(&transcripts, row)?;
            println!(
                "Analyzing transcript {}: {}",
                transcript.index,
                transcript.preview().dimmed()
            );

            let hits = scoring::score(&transcript.text, &normalizer, &bundle, threshold, top_k)?;
            info!(hits = hits.len(), row, "transcript scored");
            lectern::output::terminal::display_topic_hits(&hits);
        }

        Commands::List { dataset, column } => {
            let transcripts = dataset::load_transcripts(&dataset, &column)?;
            lectern::output::terminal::display_transcript_list(&transcripts);
        }

        Commands::Status => {
            lectern::status::show(&repo)?;
        }

        Commands::Invalidate => {
            if repo.invalidate()? {
                println!("Deleted model artifact at {}", repo.path().display());
                println!("The next `lectern topics` run will retrain.");
            } else {
                println!("No model artifact to delete at {}", repo.path().display());
            }
        }
    }

    Ok(())
}
