// Model persistence — one bincode artifact holding the full bundle.
//
// The artifact is the only mechanism for skipping retraining. Staleness is
// detected through the corpus fingerprint stamped into the bundle: a
// mismatch against the loaded dataset means the artifact was trained on
// different data and must be rebuilt. A corrupt artifact is fatal to the
// load path; there is no automatic fallback, only explicit invalidation.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::info;

use crate::model::TopicModel;
use crate::vectorize::CountVectorizer;

/// Everything needed to score documents without retraining: the frozen
/// vectorizer, the fitted model, and the precomputed per-topic word lists.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelBundle {
    pub vectorizer: CountVectorizer,
    pub model: TopicModel,
    /// Top terms per topic, highest weight first. Derived once after
    /// training; inference reads these, never recomputes them.
    pub topic_words: Vec<Vec<String>>,
    /// SHA-256 over the training corpus; identifies the dataset the
    /// model was fitted to.
    pub corpus_fingerprint: String,
    pub trained_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// Expected control flow: no artifact yet, caller falls back to
    /// training.
    #[error("no persisted model at {0}")]
    Missing(PathBuf),
    /// Fatal to the load path: the artifact exists but cannot be decoded.
    /// Requires manual invalidation.
    #[error("model artifact at {path} is corrupt: {reason}\nRun `lectern invalidate` to delete it and retrain")]
    Corrupt { path: PathBuf, reason: String },
}

/// Handle to the persisted model artifact.
///
/// Loads are memoized once per process behind a presence check; there is
/// no hidden invalidation beyond process restart. `invalidate` deletes the
/// artifact and clears the memo explicitly.
pub struct ModelRepository {
    path: PathBuf,
    cache: RwLock<Option<Arc<ModelBundle>>>,
}

impl ModelRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: RwLock::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether an artifact is present on disk. Callers check this before
    /// `load` to drive the train-vs-load branch.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the bundle, memoized for the life of the process.
    pub fn load(&self) -> Result<Arc<ModelBundle>, StoreError> {
        if let Ok(guard) = self.cache.read() {
            if let Some(bundle) = guard.as_ref() {
                return Ok(Arc::clone(bundle));
            }
        }

        if !self.exists() {
            return Err(StoreError::Missing(self.path.clone()));
        }

        let bytes = fs::read(&self.path).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        let bundle: ModelBundle =
            bincode::deserialize(&bytes).map_err(|e| StoreError::Corrupt {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        let bundle = Arc::new(bundle);
        if let Ok(mut guard) = self.cache.write() {
            *guard = Some(Arc::clone(&bundle));
        }
        Ok(bundle)
    }

    /// Persist the bundle, replacing any existing artifact, and prime the
    /// in-process memo with it.
    pub fn save(&self, bundle: ModelBundle) -> Result<Arc<ModelBundle>> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create model directory {}", parent.display())
                })?;
            }
        }

        let bytes = bincode::serialize(&bundle).context("failed to encode model bundle")?;
        fs::write(&self.path, bytes)
            .with_context(|| format!("failed to write model artifact {}", self.path.display()))?;
        info!(path = %self.path.display(), "model bundle saved");

        let bundle = Arc::new(bundle);
        if let Ok(mut guard) = self.cache.write() {
            *guard = Some(Arc::clone(&bundle));
        }
        Ok(bundle)
    }

    /// Delete the artifact and clear the in-process memo. Returns whether
    /// an artifact was actually removed.
    pub fn invalidate(&self) -> Result<bool> {
        if let Ok(mut guard) = self.cache.write() {
            *guard = None;
        }
        if self.exists() {
            fs::remove_file(&self.path).with_context(|| {
                format!("failed to delete model artifact {}", self.path.display())
            })?;
            info!(path = %self.path.display(), "model bundle invalidated");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

/// Fingerprint a training corpus: SHA-256 over every raw document with a
/// length prefix, so reordering or editing any row changes the digest.
pub fn corpus_fingerprint(texts: &[String]) -> String {
    let mut hasher = Sha256::new();
    for text in texts {
        hasher.update((text.len() as u64).to_le_bytes());
        hasher.update(text.as_bytes());
    }
    hex::encode(hasher.finalize())
}
