use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Every
/// field has a default; CLI flags override where a per-run value makes
/// sense.
pub struct Config {
    /// Where the persisted model bundle lives.
    pub model_path: PathBuf,
    /// Topic count used when training a new model.
    pub num_topics: usize,
    /// Seed for the Gibbs sampler; fixed so runs reproduce.
    pub seed: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let model_path = env::var("LECTERN_MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_model_path());

        let num_topics = match env::var("LECTERN_TOPICS") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("LECTERN_TOPICS is not a valid topic count: {raw}"))?,
            Err(_) => 25,
        };

        let seed = match env::var("LECTERN_SEED") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("LECTERN_SEED is not a valid seed: {raw}"))?,
            Err(_) => 42,
        };

        Ok(Self {
            model_path,
            num_topics,
            seed,
        })
    }
}

/// Default artifact location: the platform data directory, falling back
/// to the working directory.
fn default_model_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lectern")
        .join("topic_model.bin")
}
