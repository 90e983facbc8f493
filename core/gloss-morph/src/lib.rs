#![no_std]

#[macro_use]
extern crate alloc;

// std paths for std consumers and the test harness
#[cfg(any(feature = "std", test))]
extern crate std;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use gloss_protocol::{Lexicon, SuffixRule};

/// Shortest stem a suffix rule may produce.
const MIN_STEM_CHARS: usize = 2;

/// Reduces surface words to a canonical stem: override table first, then the
/// first applicable suffix rule.
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    overrides: BTreeMap<String, String>,
    rules: Vec<SuffixRule>,
}

impl Lemmatizer {
    pub fn new(overrides: BTreeMap<String, String>, rules: Vec<SuffixRule>) -> Self {
        Self { overrides, rules }
    }

    pub fn from_lexicon(lexicon: &Lexicon) -> Self {
        let overrides = lexicon
            .lemma_overrides
            .iter()
            .map(|o| (o.form.to_lowercase(), o.lemma.clone()))
            .collect();
        Self::new(overrides, lexicon.suffix_rules.clone())
    }

    /// Total and pure: unknown shapes come back lower-cased and unchanged.
    pub fn lemmatize(&self, word: &str) -> String {
        let lower = word.to_lowercase();
        if lower.is_empty() {
            return lower;
        }
        if let Some(lemma) = self.overrides.get(&lower) {
            return lemma.clone();
        }

        let char_len = lower.chars().count();
        for rule in &self.rules {
            if let Some(stem) = apply_rule(rule, &lower, char_len) {
                return stem;
            }
        }
        lower
    }

    /// Lemmatizes each space-separated word and rejoins them.
    pub fn lemmatize_phrase(&self, phrase: &str) -> String {
        phrase
            .split(' ')
            .map(|w| self.lemmatize(w))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn apply_rule(rule: &SuffixRule, lower: &str, char_len: usize) -> Option<String> {
    let suffix = rule.suffix.as_str();
    if suffix.is_empty() || !lower.ends_with(suffix) {
        return None;
    }
    if char_len <= rule.min_len as usize {
        return None;
    }
    if rule.skip_double {
        if let Some(last) = suffix.chars().last() {
            let doubled = format!("{}{}", suffix, last);
            if lower.ends_with(doubled.as_str()) {
                return None;
            }
        }
    }
    // A plural "s" never comes off "-ss" words ("dress", "glass").
    if suffix == "s" && lower.ends_with("ss") {
        return None;
    }

    let mut stem = lower[..lower.len() - suffix.len()].to_string();
    stem.push_str(&rule.replacement);
    if stem.chars().count() < MIN_STEM_CHARS {
        return None;
    }
    Some(stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn isl() -> Lemmatizer {
        Lemmatizer::from_lexicon(&Lexicon::isl())
    }

    #[test]
    fn test_overrides_win_over_rules() {
        let lem = isl();
        assert_eq!(lem.lemmatize("Better"), "good");
        assert_eq!(lem.lemmatize("happiest"), "happy");
        assert_eq!(lem.lemmatize("children"), "child");
        assert_eq!(lem.lemmatize("phones"), "phone");
    }

    #[test]
    fn test_suffix_rules_in_order() {
        let lem = isl();
        assert_eq!(lem.lemmatize("ladies"), "lady");
        assert_eq!(lem.lemmatize("wolves"), "wolf");
        assert_eq!(lem.lemmatize("dreaming"), "dream");
        assert_eq!(lem.lemmatize("dreamed"), "dream");
        assert_eq!(lem.lemmatize("loudest"), "loud");
        assert_eq!(lem.lemmatize("louder"), "loud");
        assert_eq!(lem.lemmatize("Chairs"), "chair");
    }

    #[test]
    fn test_minimum_length_guards() {
        let lem = isl();
        // Not longer than the rule minimum
        assert_eq!(lem.lemmatize("bed"), "bed");
        assert_eq!(lem.lemmatize("sing"), "sing");
        assert_eq!(lem.lemmatize("hats"), "hats");
        // Double-s words keep their ending
        assert_eq!(lem.lemmatize("dress"), "dress");
        assert_eq!(lem.lemmatize("glass"), "glass");
    }

    #[test]
    fn test_short_stem_falls_through_to_next_rule() {
        let rules = vec![SuffixRule::new("abc", "", 1), SuffixRule::new("c", "", 1)];
        let lem = Lemmatizer::new(BTreeMap::new(), rules);
        // "xabc" -> "x" is too short, so the "-c" rule applies instead
        assert_eq!(lem.lemmatize("xabc"), "xab");
    }

    #[test]
    fn test_vocabulary_stems_are_idempotent() {
        let lexicon = Lexicon::isl();
        let lem = Lemmatizer::from_lexicon(&lexicon);
        for gloss in lexicon.vocabulary() {
            for word in gloss.split(' ') {
                let once = lem.lemmatize(word);
                assert_eq!(lem.lemmatize(&once), once, "stem of {word:?} is not stable");
            }
        }
    }

    #[test]
    fn test_phrase_lemmatizes_each_word() {
        assert_eq!(isl().lemmatize_phrase("Cell Phones"), "cell phone");
    }

    proptest! {
        #[test]
        fn test_lemmatize_is_total(word in "[a-zA-Z]{0,16}") {
            let lem = isl();
            let lower = word.to_lowercase();
            let stem = lem.lemmatize(&word);
            // Either untouched or a stem of at least two characters
            prop_assert!(stem == lower || stem.chars().count() >= MIN_STEM_CHARS);
        }
    }
}
