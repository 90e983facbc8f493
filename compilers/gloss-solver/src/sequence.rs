use std::collections::HashSet;

use gloss_protocol::{Lexicon, Token, TokenKind};

/// Turns the current token state into the ordered gloss list.
#[derive(Debug, Clone)]
pub struct GlossSequencer {
    time_words: HashSet<String>,
    fingerspelling_enabled: bool,
}

impl GlossSequencer {
    pub fn new(lexicon: &Lexicon, fingerspelling_enabled: bool) -> Self {
        Self {
            time_words: lexicon.time_words.iter().map(|w| w.to_lowercase()).collect(),
            fingerspelling_enabled,
        }
    }

    pub fn fingerspelling_enabled(&self) -> bool {
        self.fingerspelling_enabled
    }

    /// Word a token contributes, if selected. Raw tokens contribute their
    /// surface text and only when fingerspelling is on.
    fn selected<'a>(&self, token: &'a Token) -> Option<&'a str> {
        match token.kind() {
            TokenKind::Matched | TokenKind::Semantic if token.accepted => token.canonical(),
            TokenKind::Raw if self.fingerspelling_enabled => Some(token.original.as_str()),
            _ => None,
        }
    }

    pub fn is_time_expression(&self, text: &str) -> bool {
        text.split_whitespace()
            .any(|w| self.time_words.contains(&w.to_lowercase()))
    }

    /// Time expressions first, then everything else; relative order kept in both.
    pub fn build(&self, tokens: &[Token]) -> Vec<String> {
        let (time, other): (Vec<&str>, Vec<&str>) = tokens
            .iter()
            .filter_map(|t| self.selected(t))
            .partition(|w| self.is_time_expression(w));
        time.into_iter().chain(other).map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gloss_protocol::{MatchSource, Span};

    fn matched(i: usize, word: &str) -> Token {
        Token::matched(Span::new(i, i + 1), word.into(), word.into(), MatchSource::Exact)
    }

    fn raw(i: usize, word: &str) -> Token {
        Token::raw(Span::new(i, i + 1), word.into(), word.to_lowercase(), word.to_lowercase())
    }

    #[test]
    fn test_time_words_move_to_front() {
        let seq = GlossSequencer::new(&Lexicon::isl(), true);
        let tokens = [matched(0, "hat"), matched(1, "monday"), matched(2, "shirt")];
        assert_eq!(seq.build(&tokens), ["monday", "hat", "shirt"]);
    }

    #[test]
    fn test_reorder_is_stable() {
        let seq = GlossSequencer::new(&Lexicon::isl(), true);
        let tokens = [
            matched(0, "hat"),
            matched(1, "friday"),
            matched(2, "door"),
            matched(3, "today"),
            matched(4, "lamp"),
        ];
        assert_eq!(seq.build(&tokens), ["friday", "today", "hat", "door", "lamp"]);
    }

    #[test]
    fn test_raw_tokens_follow_fingerspelling_toggle() {
        let tokens = [raw(0, "Kitchen"), matched(1, "fan"), raw(2, "Tomorrow")];
        let on = GlossSequencer::new(&Lexicon::isl(), true);
        assert_eq!(on.build(&tokens), ["Tomorrow", "Kitchen", "fan"]);

        let off = GlossSequencer::new(&Lexicon::isl(), false);
        assert_eq!(off.build(&tokens), ["fan"]);
    }

    #[test]
    fn test_rejected_tokens_are_left_out() {
        let seq = GlossSequencer::new(&Lexicon::isl(), false);
        let mut tokens = vec![
            matched(0, "hat"),
            raw(1, "computr").with_semantic_match("computer".into(), 0.9),
        ];
        assert_eq!(seq.build(&tokens), ["hat", "computer"]);
        tokens[1].accepted = false;
        assert_eq!(seq.build(&tokens), ["hat"]);
    }
}
