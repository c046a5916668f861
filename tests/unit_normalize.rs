// Unit tests for the normalization pipeline.
//
// Covers the contractual step order end to end, the capability-trait
// seams (substituting a custom tagger/lemmatizer), and the fixed-point
// property of already-normalized text.

use lectern::normalize::traits::{EntityKind, EntityTagger, Lemmatizer};
use lectern::normalize::TextNormalizer;

// ============================================================
// Full-pipeline behavior
// ============================================================

#[test]
fn pipeline_runs_all_steps_in_order() {
    let n = TextNormalizer::default();
    let out = n.normalize("The Economy (00:01) is growing, said Obama in China: tariffs!");
    // timestamp gone, case folded, person+GPE dropped, punctuation
    // stripped, "the"/"is"/"in"/"said" removed, "tariffs" lemmatized
    assert_eq!(out, "economy growing tariff");
}

#[test]
fn timestamps_anywhere_in_the_text_are_removed() {
    let n = TextNormalizer::default();
    let out = n.normalize("(00:00) economy (59:59) tariff (07:30)");
    assert_eq!(out, "economy tariff");
}

#[test]
fn malformed_timestamps_are_not_removed() {
    let n = TextNormalizer::default();
    // single-digit minutes don't match the (NN:NN) shape; the digits are
    // then dropped by alphabetic tokenization anyway
    let out = n.normalize("economy (0:1) tariff");
    assert_eq!(out, "economy tariff");
}

#[test]
fn list_input_is_joined_with_single_spaces() {
    let n = TextNormalizer::default();
    let parts = vec![
        "the economy".to_string(),
        "and trade".to_string(),
        "tariffs".to_string(),
    ];
    assert_eq!(n.normalize_parts(&parts), "economy trade tariff");
}

#[test]
fn empty_input_yields_empty_output() {
    let n = TextNormalizer::default();
    assert_eq!(n.normalize(""), "");
    assert_eq!(n.normalize_parts(&[]), "");
}

#[test]
fn fully_filtered_input_yields_empty_output_not_an_error() {
    let n = TextNormalizer::default();
    // stopwords, fillers, a timestamp and punctuation only
    assert_eq!(n.normalize("well, you know, the -- (01:23) us"), "");
}

// ============================================================
// Fixed point: normalizing normalized output changes nothing
// ============================================================

#[test]
fn normalized_text_is_a_fixed_point() {
    let n = TextNormalizer::default();
    let samples = [
        "The economy (00:01) is growing rapidly said the president",
        "Trade tariffs and energy policies across markets",
        "Climate change, carbon taxes & solar subsidies!",
    ];
    for sample in samples {
        let once = n.normalize(sample);
        assert_eq!(n.normalize(&once), once, "not a fixed point for: {sample}");
    }
}

// ============================================================
// Capability-trait substitution
// ============================================================

/// Tagger that filters nothing — entity filtering disabled.
struct PassthroughTagger;

impl EntityTagger for PassthroughTagger {
    fn tag(&self, tokens: &[&str]) -> Vec<EntityKind> {
        vec![EntityKind::Other; tokens.len()]
    }
}

/// Lemmatizer that stamps every token, proving it was invoked.
struct StampLemmatizer;

impl Lemmatizer for StampLemmatizer {
    fn lemma(&self, _token: &str) -> String {
        "stamped".to_string()
    }
}

#[test]
fn custom_tagger_disables_entity_filtering() {
    let n = TextNormalizer::with_components(
        Box::new(PassthroughTagger),
        Box::new(lectern::normalize::lemma::RuleLemmatizer),
    );
    // "obama" and "china" survive with the no-op tagger
    assert_eq!(n.normalize("obama china tariff"), "obama china tariff");
}

#[test]
fn custom_lemmatizer_is_applied_to_every_surviving_token() {
    let n = TextNormalizer::with_components(
        Box::new(PassthroughTagger),
        Box::new(StampLemmatizer),
    );
    assert_eq!(n.normalize("economy tariff"), "stamped stamped");
}
