// Gazetteer-based entity tagger — the default EntityTagger.
//
// The normalizer lowercases text before entity filtering, so casing cues
// are unavailable by construction. What remains usable is a lookup against
// fixed name lists plus one contextual rule: a token following a personal
// title ("senator smith") is a person name even when it isn't in the list.

use std::collections::HashSet;

use super::traits::{EntityKind, EntityTagger};

/// Common given names and surnames seen in political speech. Lowercase,
/// matched after trimming surrounding punctuation.
const PERSON_NAMES: &[&str] = &[
    "abraham", "barack", "bernie", "biden", "carter", "chuck", "clinton",
    "donald", "elizabeth", "franklin", "george", "harris", "hillary",
    "jimmy", "joe", "john", "kamala", "kennedy", "lincoln", "mike",
    "mitch", "nancy", "obama", "pelosi", "pence", "reagan", "richard",
    "ronald", "roosevelt", "sanders", "schumer", "trump", "warren",
];

/// Countries, states and other geo-political names. Lowercase.
const GPE_NAMES: &[&str] = &[
    "afghanistan", "america", "beijing", "california", "canada", "china",
    "cuba", "europe", "florida", "france", "germany", "iran", "iraq",
    "israel", "japan", "korea", "mexico", "moscow", "ohio", "pennsylvania",
    "russia", "syria", "texas", "ukraine", "venezuela", "vietnam",
    "washington",
];

/// Titles whose following token is treated as a person name.
const PERSON_TITLES: &[&str] = &[
    "mr", "mrs", "ms", "dr", "senator", "congressman", "congresswoman",
    "governor", "secretary", "justice", "general", "ambassador",
];

pub struct GazetteerTagger {
    persons: HashSet<&'static str>,
    gpes: HashSet<&'static str>,
    titles: HashSet<&'static str>,
}

impl Default for GazetteerTagger {
    fn default() -> Self {
        Self {
            persons: PERSON_NAMES.iter().copied().collect(),
            gpes: GPE_NAMES.iter().copied().collect(),
            titles: PERSON_TITLES.iter().copied().collect(),
        }
    }
}

/// Strip leading/trailing non-alphabetic characters so "america," and
/// "(obama)" still hit the gazetteer.
fn core_word(token: &str) -> &str {
    token.trim_matches(|c: char| !c.is_alphabetic())
}

impl EntityTagger for GazetteerTagger {
    fn tag(&self, tokens: &[&str]) -> Vec<EntityKind> {
        let mut kinds = Vec::with_capacity(tokens.len());
        let mut after_title = false;

        for token in tokens {
            let word = core_word(token);
            let kind = if self.persons.contains(word) || (after_title && !word.is_empty()) {
                EntityKind::Person
            } else if self.gpes.contains(word) {
                EntityKind::GeoPolitical
            } else {
                EntityKind::Other
            };

            after_title = self.titles.contains(word);
            kinds.push(kind);
        }

        kinds
    }
}
