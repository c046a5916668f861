// Inference scoring — rank the dominant topics of one transcript.
//
// The transcript goes through the same normalizer used at training time,
// is vectorized against the frozen vocabulary, and scored against the
// fitted model. Only topics strictly above the relevance threshold
// survive; an empty result is the "no strong topic" state, not an error.

use anyhow::Result;

use crate::normalize::TextNormalizer;
use crate::store::ModelBundle;

/// Strength below which a topic is considered background noise.
pub const DEFAULT_THRESHOLD: f64 = 0.1;
/// How many topics to surface at most.
pub const DEFAULT_TOP_K: usize = 3;
/// How many of a topic's words make up its display label.
const LABEL_WORDS: usize = 5;

/// One ranked topic for a scored transcript.
#[derive(Debug, Clone)]
pub struct TopicHit {
    /// Topic index within the model.
    pub topic: usize,
    /// Human-readable label: the topic's strongest words.
    pub label: String,
    /// Proportion of the transcript attributed to this topic (0..1).
    pub strength: f64,
}

/// Score one raw transcript against a trained bundle.
///
/// Returns at most `top_k` topics with strength strictly above
/// `threshold`, strongest first. Ties keep topic-index order (the sort is
/// stable).
pub fn score(
    raw_text: &str,
    normalizer: &TextNormalizer,
    bundle: &ModelBundle,
    threshold: f64,
    top_k: usize,
) -> Result<Vec<TopicHit>> {
    let normalized = normalizer.normalize(raw_text);
    let row = bundle.vectorizer.transform(&normalized)?;
    let strengths = bundle.model.infer(&row);

    let mut hits: Vec<TopicHit> = strengths
        .iter()
        .enumerate()
        .filter(|(_, &strength)| strength > threshold)
        .map(|(topic, &strength)| TopicHit {
            topic,
            label: topic_label(bundle, topic),
            strength,
        })
        .collect();

    hits.sort_by(|a, b| b.strength.total_cmp(&a.strength));
    hits.truncate(top_k);
    Ok(hits)
}

/// Label a topic with the first few entries of its precomputed word list.
fn topic_label(bundle: &ModelBundle, topic: usize) -> String {
    bundle
        .topic_words
        .get(topic)
        .map(|words| {
            words
                .iter()
                .take(LABEL_WORDS)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_else(|| format!("topic {topic}"))
}
