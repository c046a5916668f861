// Training orchestration — the train-vs-load decision and the full
// normalize → vectorize → fit → persist sequence.

use std::sync::Arc;

use anyhow::Result;
use indicatif::ProgressBar;
use tracing::info;

use crate::model::TopicFitter;
use crate::normalize::TextNormalizer;
use crate::store::{corpus_fingerprint, ModelBundle, ModelRepository};
use crate::vectorize::CountVectorizer;

/// Words precomputed per topic at training time. Labels use the first
/// five; the rest give context in status output.
pub const TOP_WORDS_PER_TOPIC: usize = 10;

/// Train a bundle from raw transcripts.
///
/// Every document goes through the same normalizer that inference will
/// use. Vectorization failures (empty corpus, empty vocabulary) propagate
/// as recoverable errors; nothing is persisted here.
pub fn train_bundle(
    normalizer: &TextNormalizer,
    mut vectorizer: CountVectorizer,
    fitter: &dyn TopicFitter,
    texts: &[String],
) -> Result<ModelBundle> {
    let fingerprint = corpus_fingerprint(texts);

    let bar = ProgressBar::new(texts.len() as u64);
    let normalized: Vec<String> = texts
        .iter()
        .map(|text| {
            let doc = normalizer.normalize(text);
            bar.inc(1);
            doc
        })
        .collect();
    bar.finish_and_clear();

    let matrix = vectorizer.fit(&normalized)?;
    info!(
        docs = matrix.rows.len(),
        features = matrix.n_features,
        "document-term matrix built"
    );

    let model = fitter.fit(&matrix)?;
    let topic_words = model.top_words(vectorizer.feature_names(), TOP_WORDS_PER_TOPIC);

    Ok(ModelBundle {
        vectorizer,
        model,
        topic_words,
        corpus_fingerprint: fingerprint,
        trained_at: chrono::Utc::now(),
    })
}

/// Load the persisted model for this corpus, or train and persist one.
///
/// A persisted bundle whose fingerprint no longer matches the corpus was
/// trained on different data: it is replaced, not silently reused. A
/// corrupt artifact surfaces as an error; it is never repaired
/// automatically.
pub fn ensure_model(
    repo: &ModelRepository,
    normalizer: &TextNormalizer,
    fitter: &dyn TopicFitter,
    texts: &[String],
) -> Result<Arc<ModelBundle>> {
    if repo.exists() {
        let bundle = repo.load()?;
        if bundle.corpus_fingerprint == corpus_fingerprint(texts) {
            info!(path = %repo.path().display(), "loaded persisted topic model");
            return Ok(bundle);
        }
        info!("dataset changed since the model was trained; retraining");
    } else {
        info!("no persisted topic model; training on the full dataset");
    }

    let bundle = train_bundle(normalizer, CountVectorizer::new(), fitter, texts)?;
    repo.save(bundle)
}
