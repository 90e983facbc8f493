pub mod lookup;
pub mod parser;

use std::collections::HashMap;

use gloss_morph::Lemmatizer;
use gloss_protocol::{Lexicon, Span, Token};
use tracing::{debug, trace};

use crate::lookup::PhraseTable;
use crate::parser::split_words;

/// Longest-match-first segmenter over the lexicon.
pub struct Segmenter {
    table: PhraseTable,
    lemmatizer: Lemmatizer,
    transliterations: HashMap<String, String>,
}

impl Segmenter {
    pub fn new(lexicon: &Lexicon) -> Self {
        Self {
            table: PhraseTable::new(lexicon),
            lemmatizer: Lemmatizer::from_lexicon(lexicon),
            transliterations: lexicon
                .transliterations
                .iter()
                .map(|t| (t.source.clone(), t.target.clone()))
                .collect(),
        }
    }

    pub fn lemmatizer(&self) -> &Lemmatizer {
        &self.lemmatizer
    }

    pub fn table(&self) -> &PhraseTable {
        &self.table
    }

    /// The word sequence segmentation runs over: transliterated, stripped, split.
    pub fn words(&self, sentence: &str) -> Vec<String> {
        let trimmed = sentence.trim();
        let text = match self.transliterations.get(trimmed) {
            Some(target) => {
                debug!("Transliterated sentence {:?} -> {:?}", trimmed, target);
                target.as_str()
            }
            None => trimmed,
        };
        split_words(text)
    }

    /// Primary entry point: Text -> Tokens.
    ///
    /// Greedy and single pass. At each cursor position the longest resolvable
    /// span wins; a position nothing resolves becomes a raw token, or is
    /// dropped if it is a stop word. Committed tokens are never revisited.
    pub fn segment(&self, sentence: &str) -> Vec<Token> {
        let raw_words = self.words(sentence);
        let normalized: Vec<String> = raw_words.iter().map(|w| w.to_lowercase()).collect();
        let lemmas: Vec<String> = normalized
            .iter()
            .map(|w| self.lemmatizer.lemmatize(w))
            .collect();

        let total = normalized.len();
        let mut tokens = Vec::new();
        let mut position = 0;

        while position < total {
            match self.longest_match(&normalized, &lemmas, position) {
                Some((len, canonical, source)) => {
                    let span = Span::new(position, position + len);
                    let original = raw_words[position..position + len].join(" ");
                    trace!("Matched {:?} -> {:?} ({:?})", original, canonical, source);
                    tokens.push(Token::matched(span, original, canonical, source));
                    position += len;
                }
                None => {
                    let word = &normalized[position];
                    if self.table.is_stop_word(word) {
                        trace!("Dropped stop word {:?}", word);
                    } else {
                        tokens.push(Token::raw(
                            Span::new(position, position + 1),
                            raw_words[position].clone(),
                            word.clone(),
                            lemmas[position].clone(),
                        ));
                    }
                    position += 1;
                }
            }
        }

        tokens
    }

    fn longest_match(
        &self,
        normalized: &[String],
        lemmas: &[String],
        start: usize,
    ) -> Option<(usize, String, gloss_protocol::MatchSource)> {
        for len in (1..=normalized.len() - start).rev() {
            let span_normalized = normalized[start..start + len].join(" ");
            let span_lemma = lemmas[start..start + len].join(" ");
            if let Some((canonical, source)) = self.table.resolve(&span_normalized, &span_lemma) {
                return Some((len, canonical, source));
            }
        }
        None
    }
}
