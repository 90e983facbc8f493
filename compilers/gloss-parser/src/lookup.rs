use std::collections::{HashMap, HashSet};

use gloss_protocol::{Lexicon, MatchSource};
use tracing::warn;

/// Hash lookups over the lexicon: vocabulary, alias table and stop words.
#[derive(Debug, Clone)]
pub struct PhraseTable {
    vocabulary: HashSet<String>,
    aliases: HashMap<String, String>,
    stop_words: HashSet<String>,
}

impl PhraseTable {
    pub fn new(lexicon: &Lexicon) -> Self {
        let vocabulary: HashSet<String> = lexicon.vocabulary().map(str::to_string).collect();

        let mut aliases = HashMap::new();
        for group in &lexicon.aliases {
            let canonical = group.canonical.trim().to_lowercase();
            if !vocabulary.contains(&canonical) {
                warn!("Alias group '{}' is not in the vocabulary, skipping", group.canonical);
                continue;
            }
            aliases.insert(canonical.clone(), canonical.clone());
            for variant in &group.variants {
                let key = variant.trim().to_lowercase();
                if !key.is_empty() {
                    // Later groups win on duplicates
                    aliases.insert(key, canonical.clone());
                }
            }
        }

        let stop_words = lexicon.stop_words.iter().map(|w| w.to_lowercase()).collect();

        Self {
            vocabulary,
            aliases,
            stop_words,
        }
    }

    /// Resolution priority: exact, lemma, alias of the surface form, alias of the lemma.
    pub fn resolve(&self, normalized: &str, lemma: &str) -> Option<(String, MatchSource)> {
        if self.vocabulary.contains(normalized) {
            return Some((normalized.to_string(), MatchSource::Exact));
        }
        if !lemma.is_empty() && self.vocabulary.contains(lemma) {
            return Some((lemma.to_string(), MatchSource::Lemma));
        }
        if let Some(canonical) = self.aliases.get(normalized) {
            return Some((canonical.clone(), MatchSource::Alias));
        }
        if let Some(canonical) = self.aliases.get(lemma) {
            return Some((canonical.clone(), MatchSource::Alias));
        }
        None
    }

    pub fn is_stop_word(&self, normalized: &str) -> bool {
        self.stop_words.contains(normalized)
    }

    pub fn in_vocabulary(&self, word: &str) -> bool {
        self.vocabulary.contains(word)
    }
}
