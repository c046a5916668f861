// System status display — shows the model artifact, its age and shape.

use anyhow::Result;

use crate::store::{ModelRepository, StoreError};

/// Display model store status to the terminal.
pub fn show(repo: &ModelRepository) -> Result<()> {
    let path = repo.path();

    if !repo.exists() {
        println!("Model: not trained yet");
        println!("  Artifact path: {}", path.display());
        println!("\nRun `lectern train <dataset>` to train one.");
        return Ok(());
    }

    let file_size = std::fs::metadata(path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Model: {} ({})", path.display(), file_size);

    match repo.load() {
        Ok(bundle) => {
            println!("  Trained at: {}", bundle.trained_at.to_rfc3339());
            println!("  Topics: {}", bundle.model.num_topics());
            println!("  Vocabulary: {} terms", bundle.vectorizer.vocabulary_size());
            println!(
                "  Corpus fingerprint: {}…",
                &bundle.corpus_fingerprint[..12.min(bundle.corpus_fingerprint.len())]
            );
        }
        Err(err @ StoreError::Corrupt { .. }) => {
            println!("  {err}");
        }
        Err(StoreError::Missing(_)) => {
            // raced with a concurrent delete; treat as untrained
            println!("Model: not trained yet");
        }
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
