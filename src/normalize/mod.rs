// Text normalization — turns raw transcript text into the token stream the
// vectorizer consumes.
//
// The step order is contractual: timestamps, casing, entity filtering,
// tokenization, stopwords, lemmatization. Training and inference MUST run
// the same normalizer; the vocabulary indices frozen at fit time are only
// meaningful if inference-time text went through the identical pipeline.

pub mod entities;
pub mod lemma;
pub mod traits;

use std::collections::HashSet;

use regex_lite::Regex;
use stop_words::{get, LANGUAGE};

use self::entities::GazetteerTagger;
use self::lemma::RuleLemmatizer;
use self::traits::{EntityTagger, Lemmatizer};

/// Filler and discourse words common in spoken transcripts that the stock
/// English stopword list misses.
const FILLER_WORDS: &[&str] = &[
    "look", "lot", "going", "said", "know", "thing", "well", "actually",
    "thank", "us", "think", "just", "people", "country", "ve", "don", "ll",
];

/// Inline timestamps like "(00:41)" that transcription tools leave behind.
const TIMESTAMP_PATTERN: &str = r"\(\d{2}:\d{2}\)";

/// Tokens shorter than this are discarded (transcription artifacts).
const MIN_TOKEN_LEN: usize = 2;
/// Tokens longer than this are discarded (run-together garbage).
const MAX_TOKEN_LEN: usize = 15;

pub struct TextNormalizer {
    tagger: Box<dyn EntityTagger>,
    lemmatizer: Box<dyn Lemmatizer>,
    stopwords: HashSet<String>,
    timestamp: Regex,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::with_components(
            Box::new(GazetteerTagger::default()),
            Box::new(RuleLemmatizer),
        )
    }
}

impl TextNormalizer {
    /// Build a normalizer around specific tagger/lemmatizer implementations.
    pub fn with_components(
        tagger: Box<dyn EntityTagger>,
        lemmatizer: Box<dyn Lemmatizer>,
    ) -> Self {
        let mut stopwords: HashSet<String> = get(LANGUAGE::English).into_iter().collect();
        stopwords.extend(FILLER_WORDS.iter().map(|w| (*w).to_string()));

        Self {
            tagger,
            lemmatizer,
            stopwords,
            timestamp: Regex::new(TIMESTAMP_PATTERN).expect("literal pattern compiles"),
        }
    }

    /// Normalize one transcript into a space-separated token string.
    ///
    /// Empty input, or input where every token is filtered away, yields an
    /// empty string — not an error. Downstream vectorization tolerates
    /// empty documents.
    pub fn normalize(&self, text: &str) -> String {
        let text = self.timestamp.replace_all(text, "");
        let text = text.to_lowercase();

        // Drop person/GPE tokens before punctuation stripping, while the
        // tagger can still see surrounding context.
        let raw_tokens: Vec<&str> = text.split_whitespace().collect();
        let kinds = self.tagger.tag(&raw_tokens);
        let kept = raw_tokens
            .iter()
            .zip(&kinds)
            .filter(|(_, kind)| !kind.is_filtered())
            .map(|(token, _)| *token)
            .collect::<Vec<_>>()
            .join(" ");

        let tokens = tokenize(&kept);

        tokens
            .into_iter()
            .filter(|token| !self.stopwords.contains(token))
            .map(|token| self.lemmatizer.lemma(&token))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Join multi-part input with single spaces, then normalize.
    pub fn normalize_parts(&self, parts: &[String]) -> String {
        self.normalize(&parts.join(" "))
    }
}

/// Split text into lowercase alphabetic tokens, folding accented characters
/// to their ASCII base and discarding everything else (digits, punctuation).
fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for c in text.chars() {
        if let Some(base) = fold_alphabetic(c) {
            current.push(base);
        } else if !current.is_empty() {
            push_token(&mut tokens, &mut current);
        }
    }
    if !current.is_empty() {
        push_token(&mut tokens, &mut current);
    }

    tokens
}

fn push_token(tokens: &mut Vec<String>, current: &mut String) {
    if (MIN_TOKEN_LEN..=MAX_TOKEN_LEN).contains(&current.len()) {
        tokens.push(std::mem::take(current));
    } else {
        current.clear();
    }
}

/// Map an alphabetic character to its ASCII base form, or None for
/// non-alphabetic characters.
fn fold_alphabetic(c: char) -> Option<char> {
    if c.is_ascii_alphabetic() {
        return Some(c);
    }
    if !c.is_alphabetic() {
        return None;
    }
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    };
    Some(folded)
}
