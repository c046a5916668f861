// Bag-of-words vectorizer over normalized documents.
//
// fit() builds unigram+bigram features, applies document-frequency bounds
// (terms in >95% of documents are uninformative, terms in <2 documents
// cannot support a stable topic) and freezes the vocabulary. transform()
// reuses the frozen vocabulary unchanged; unseen terms count as zero.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use stop_words::{get, LANGUAGE};
use thiserror::Error;
use tracing::debug;

/// Recoverable vectorization failures. Both fit-time variants mean "no
/// model can be trained from this corpus" — callers report the diagnostic
/// and skip training; nothing is persisted.
#[derive(Debug, Error)]
pub enum VectorizeError {
    #[error("every document in the corpus is empty after normalization")]
    EmptyCorpus,
    #[error("vocabulary is empty after document-frequency filtering; the corpus may be too small or over-filtered")]
    EmptyVocabulary,
    #[error("transform called before fit froze a vocabulary")]
    NotFitted,
}

/// One document as sparse (feature index, count) pairs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SparseRow {
    pub entries: Vec<(usize, u32)>,
}

impl SparseRow {
    /// Total token count across all features.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| u64::from(*c)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Sparse document-term count matrix: one row per document.
#[derive(Debug, Clone)]
pub struct DocumentTermMatrix {
    pub rows: Vec<SparseRow>,
    pub n_features: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CountVectorizer {
    ngram_range: (usize, usize),
    min_df: usize,
    max_df: f64,
    stopwords: HashSet<String>,
    /// Term -> feature index, frozen by fit(). Empty until then.
    vocabulary: HashMap<String, usize>,
    /// Feature index -> term, the inverse of `vocabulary`.
    feature_names: Vec<String>,
}

impl Default for CountVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl CountVectorizer {
    /// Defaults per the training configuration: unigrams+bigrams,
    /// min_df 2, max_df 0.95, English stopwords.
    pub fn new() -> Self {
        Self {
            ngram_range: (1, 2),
            min_df: 2,
            max_df: 0.95,
            stopwords: get(LANGUAGE::English).into_iter().collect(),
            vocabulary: HashMap::new(),
            feature_names: Vec::new(),
        }
    }

    pub fn with_ngram_range(mut self, min: usize, max: usize) -> Self {
        self.ngram_range = (min, max);
        self
    }

    pub fn with_min_df(mut self, min_df: usize) -> Self {
        self.min_df = min_df;
        self
    }

    pub fn with_max_df(mut self, max_df: f64) -> Self {
        self.max_df = max_df;
        self
    }

    pub fn vocabulary_size(&self) -> usize {
        self.feature_names.len()
    }

    /// Terms in frozen index order.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Build the vocabulary from a normalized corpus and return the
    /// document-term matrix. Indices are assigned in sorted term order so
    /// refitting the same corpus reproduces the same matrix.
    pub fn fit(&mut self, docs: &[String]) -> Result<DocumentTermMatrix, VectorizeError> {
        let doc_grams: Vec<Vec<String>> = docs.iter().map(|d| self.ngrams(d)).collect();

        if doc_grams.iter().all(|g| g.is_empty()) {
            return Err(VectorizeError::EmptyCorpus);
        }

        // Document frequency per term.
        let mut df: HashMap<&str, usize> = HashMap::new();
        for grams in &doc_grams {
            let unique: HashSet<&str> = grams.iter().map(String::as_str).collect();
            for gram in unique {
                *df.entry(gram).or_insert(0) += 1;
            }
        }

        let n_docs = docs.len() as f64;
        let mut kept: Vec<&str> = df
            .into_iter()
            .filter(|(_, count)| {
                *count >= self.min_df && (*count as f64) <= self.max_df * n_docs
            })
            .map(|(gram, _)| gram)
            .collect();
        kept.sort_unstable();

        if kept.is_empty() {
            return Err(VectorizeError::EmptyVocabulary);
        }

        self.vocabulary = kept
            .iter()
            .enumerate()
            .map(|(idx, gram)| ((*gram).to_string(), idx))
            .collect();
        self.feature_names = kept.iter().map(|g| (*g).to_string()).collect();

        debug!(
            features = self.feature_names.len(),
            docs = docs.len(),
            "vocabulary frozen"
        );

        let rows = doc_grams.iter().map(|grams| self.count_row(grams)).collect();
        Ok(DocumentTermMatrix {
            rows,
            n_features: self.feature_names.len(),
        })
    }

    /// Vectorize one normalized document against the frozen vocabulary.
    /// Out-of-vocabulary terms are silently ignored; a document with no
    /// known terms yields an all-zero (empty) row.
    pub fn transform(&self, doc: &str) -> Result<SparseRow, VectorizeError> {
        if self.feature_names.is_empty() {
            return Err(VectorizeError::NotFitted);
        }
        Ok(self.count_row(&self.ngrams(doc)))
    }

    fn count_row(&self, grams: &[String]) -> SparseRow {
        let mut counts: HashMap<usize, u32> = HashMap::new();
        for gram in grams {
            if let Some(&idx) = self.vocabulary.get(gram.as_str()) {
                *counts.entry(idx).or_insert(0) += 1;
            }
        }
        let mut entries: Vec<(usize, u32)> = counts.into_iter().collect();
        entries.sort_unstable_by_key(|(idx, _)| *idx);
        SparseRow { entries }
    }

    /// Produce the n-grams of one document: stopwords are removed first,
    /// then grams are built over the surviving token sequence.
    fn ngrams(&self, doc: &str) -> Vec<String> {
        let tokens: Vec<&str> = doc
            .split_whitespace()
            .filter(|t| !self.stopwords.contains(*t))
            .collect();

        let (lo, hi) = self.ngram_range;
        let mut grams = Vec::new();
        for n in lo..=hi {
            if n == 0 || tokens.len() < n {
                continue;
            }
            for window in tokens.windows(n) {
                grams.push(window.join(" "));
            }
        }
        grams
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<String> {
        vec![
            "economy trade policy".to_string(),
            "economy growth policy".to_string(),
            "tariff trade economy".to_string(),
        ]
    }

    #[test]
    fn fit_builds_unigrams_and_bigrams() {
        let mut v = CountVectorizer::new().with_min_df(1).with_max_df(1.0);
        let matrix = v.fit(&corpus()).unwrap();
        assert_eq!(matrix.rows.len(), 3);

        let names = v.feature_names();
        assert!(names.contains(&"economy".to_string()));
        assert!(names.contains(&"economy trade".to_string()), "bigram expected");
    }

    #[test]
    fn min_df_drops_rare_terms() {
        let mut v = CountVectorizer::new().with_min_df(2).with_max_df(1.0);
        v.fit(&corpus()).unwrap();
        // "growth" appears in one document only
        assert!(!v.feature_names().contains(&"growth".to_string()));
        // "economy" appears in all three
        assert!(v.feature_names().contains(&"economy".to_string()));
    }

    #[test]
    fn max_df_drops_near_universal_terms() {
        let mut v = CountVectorizer::new().with_min_df(1).with_max_df(0.5);
        v.fit(&corpus()).unwrap();
        // in 3/3 docs, above the 0.5 ratio
        assert!(!v.feature_names().contains(&"economy".to_string()));
        // in 1/3 docs, below it
        assert!(v.feature_names().contains(&"growth".to_string()));
    }

    #[test]
    fn indices_are_stable_across_refits() {
        let mut a = CountVectorizer::new().with_min_df(1);
        let mut b = CountVectorizer::new().with_min_df(1);
        a.fit(&corpus()).unwrap();
        b.fit(&corpus()).unwrap();
        assert_eq!(a.feature_names(), b.feature_names());
    }

    #[test]
    fn transform_ignores_unseen_terms() {
        let mut v = CountVectorizer::new().with_min_df(1).with_max_df(1.0);
        v.fit(&corpus()).unwrap();
        let row = v.transform("economy blockchain").unwrap();
        assert_eq!(row.entries.len(), 1, "only the in-vocabulary term counts");
    }

    #[test]
    fn transform_all_oov_yields_zero_row() {
        let mut v = CountVectorizer::new().with_min_df(1);
        let before = v.fit(&corpus()).unwrap().n_features;
        let row = v.transform("blockchain cryptocurrency").unwrap();
        assert!(row.is_empty());
        assert_eq!(row.total(), 0);
        // and the vocabulary was not mutated
        assert_eq!(v.vocabulary_size(), before);
    }

    #[test]
    fn transform_before_fit_is_an_error() {
        let v = CountVectorizer::new();
        assert!(matches!(
            v.transform("economy"),
            Err(VectorizeError::NotFitted)
        ));
    }

    #[test]
    fn empty_corpus_is_reported() {
        let mut v = CountVectorizer::new();
        let docs = vec![String::new(), String::new()];
        assert!(matches!(v.fit(&docs), Err(VectorizeError::EmptyCorpus)));
    }

    #[test]
    fn over_filtered_corpus_reports_empty_vocabulary() {
        // every term unique to its document, min_df 2 removes them all
        let mut v = CountVectorizer::new().with_min_df(2);
        let docs = vec!["alpha".to_string(), "beta".to_string()];
        assert!(matches!(v.fit(&docs), Err(VectorizeError::EmptyVocabulary)));
    }

    #[test]
    fn counts_are_occurrence_counts() {
        let mut v = CountVectorizer::new()
            .with_min_df(1)
            .with_max_df(1.0)
            .with_ngram_range(1, 1);
        v.fit(&["economy economy trade".to_string()]).unwrap();
        let row = v.transform("economy economy economy").unwrap();
        assert_eq!(row.total(), 3);
    }
}
