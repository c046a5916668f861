// Rule-based English lemmatizer — the default Lemmatizer.
//
// Noun-form lemmatization only: an irregular-plural table plus ordered
// suffix rules. Verb inflections ("growing", "said") are left alone, the
// same behavior as a dictionary lemmatizer queried without a part of
// speech. Must be idempotent: lemma(lemma(w)) == lemma(w).

use super::traits::Lemmatizer;

/// Irregular plural -> singular pairs the suffix rules cannot derive.
const IRREGULARS: &[(&str, &str)] = &[
    ("children", "child"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("lives", "life"),
    ("men", "man"),
    ("mice", "mouse"),
    ("teeth", "tooth"),
    ("wives", "wife"),
    ("women", "woman"),
];

#[derive(Default)]
pub struct RuleLemmatizer;

impl Lemmatizer for RuleLemmatizer {
    fn lemma(&self, token: &str) -> String {
        if let Some((_, singular)) = IRREGULARS.iter().find(|(plural, _)| *plural == token) {
            return (*singular).to_string();
        }

        // Ordered suffix rules; first match wins.
        if token.len() > 4 && token.ends_with("ies") {
            // policies -> policy
            return format!("{}y", &token[..token.len() - 3]);
        }
        if token.len() > 4
            && ["sses", "xes", "ches", "shes", "zes"]
                .iter()
                .any(|s| token.ends_with(s))
        {
            // classes -> class, boxes -> box, speeches -> speech
            return token[..token.len() - 2].to_string();
        }
        if token.len() > 3
            && token.ends_with('s')
            && !token.ends_with("ss")
            && !token.ends_with("us")
            && !token.ends_with("is")
        {
            // years -> year, houses -> house
            return token[..token.len() - 1].to_string();
        }

        token.to_string()
    }
}
