// Unit tests for the model repository — persistence round-trips, the
// missing/corrupt distinction, explicit invalidation, and the
// once-per-process memoized load.

use std::fs;

use lectern::model::{GibbsLdaFitter, TopicFitter};
use lectern::store::{corpus_fingerprint, ModelBundle, ModelRepository, StoreError};
use lectern::vectorize::CountVectorizer;

fn small_bundle() -> ModelBundle {
    let texts = vec![
        "economy trade tariff".to_string(),
        "economy climate energy".to_string(),
        "trade deficit economy".to_string(),
    ];
    let mut vectorizer = CountVectorizer::new().with_min_df(1).with_max_df(1.0);
    let matrix = vectorizer.fit(&texts).unwrap();
    let model = GibbsLdaFitter::with_topics(2).fit(&matrix).unwrap();
    let topic_words = model.top_words(vectorizer.feature_names(), 10);

    ModelBundle {
        vectorizer,
        model,
        topic_words,
        corpus_fingerprint: corpus_fingerprint(&texts),
        trained_at: chrono::Utc::now(),
    }
}

#[test]
fn save_then_load_round_trips_the_bundle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("topic_model.bin");

    let original = small_bundle();
    let vocab = original.vectorizer.vocabulary_size();
    let topics = original.model.num_topics();
    let fingerprint = original.corpus_fingerprint.clone();
    let words = original.topic_words.clone();

    ModelRepository::new(path.clone()).save(original).unwrap();

    // a fresh repository (fresh memo) must read the same bundle back
    let repo = ModelRepository::new(path);
    let loaded = repo.load().unwrap();
    assert_eq!(loaded.vectorizer.vocabulary_size(), vocab);
    assert_eq!(loaded.model.num_topics(), topics);
    assert_eq!(loaded.corpus_fingerprint, fingerprint);
    assert_eq!(loaded.topic_words, words);
}

#[test]
fn save_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("model.bin");
    let repo = ModelRepository::new(path.clone());
    repo.save(small_bundle()).unwrap();
    assert!(path.is_file());
}

#[test]
fn missing_artifact_is_distinguishable_from_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.bin");

    let repo = ModelRepository::new(path.clone());
    assert!(!repo.exists());
    assert!(matches!(repo.load(), Err(StoreError::Missing(_))));

    fs::write(&path, b"definitely not a bundle").unwrap();
    let repo = ModelRepository::new(path);
    assert!(repo.exists());
    assert!(matches!(repo.load(), Err(StoreError::Corrupt { .. })));
}

#[test]
fn corrupt_error_mentions_invalidation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.bin");
    fs::write(&path, b"\x00\x01garbage").unwrap();

    let err = ModelRepository::new(path).load().unwrap_err();
    assert!(err.to_string().contains("invalidate"));
}

#[test]
fn invalidate_removes_artifact_and_reports() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.bin");

    let repo = ModelRepository::new(path.clone());
    repo.save(small_bundle()).unwrap();
    assert!(repo.exists());

    assert!(repo.invalidate().unwrap(), "first call removes the artifact");
    assert!(!repo.exists());
    assert!(!repo.invalidate().unwrap(), "second call finds nothing");

    // and the memo was cleared, not served stale
    assert!(matches!(repo.load(), Err(StoreError::Missing(_))));
}

#[test]
fn load_is_memoized_for_the_process_lifetime() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.bin");

    let repo = ModelRepository::new(path.clone());
    repo.save(small_bundle()).unwrap();
    repo.load().unwrap();

    // damage the artifact behind the repository's back; the memoized
    // bundle keeps serving until the process (or an invalidate) ends it
    fs::write(&path, b"overwritten").unwrap();
    assert!(repo.load().is_ok(), "memoized load must not re-read disk");

    // a fresh repository sees the damage
    assert!(matches!(
        ModelRepository::new(path).load(),
        Err(StoreError::Corrupt { .. })
    ));
}
