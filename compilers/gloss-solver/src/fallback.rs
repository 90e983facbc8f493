use gloss_protocol::{Token, TokenKind};
use serde::Serialize;

use crate::embedding::LocalEmbedder;
use crate::index::{SemanticIndex, SemanticMatch};

/// One Raw token promoted by the semantic fallback.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppliedFallback {
    pub index: usize,
    pub original: String,
    pub canonical: String,
    pub score: f32,
}

#[derive(Debug, Clone, Default)]
pub struct FallbackOutcome {
    pub tokens: Vec<Token>,
    pub applied: Vec<AppliedFallback>,
}

impl FallbackOutcome {
    /// Rebuilds the token list from per-token lookup results.
    /// `matches[i]` is only consulted for Raw tokens.
    pub fn from_matches(tokens: &[Token], matches: Vec<Option<SemanticMatch>>) -> Self {
        let mut outcome = Self {
            tokens: Vec::with_capacity(tokens.len()),
            applied: Vec::new(),
        };
        for (i, (token, found)) in tokens.iter().zip(matches).enumerate() {
            match found {
                Some(m) if token.kind() == TokenKind::Raw => {
                    outcome.applied.push(AppliedFallback {
                        index: i,
                        original: token.original.clone(),
                        canonical: m.word.clone(),
                        score: m.score,
                    });
                    outcome.tokens.push(token.with_semantic_match(m.word, m.score));
                }
                _ => outcome.tokens.push(token.clone()),
            }
        }
        outcome
    }

    pub fn unchanged(tokens: &[Token]) -> Self {
        Self {
            tokens: tokens.to_vec(),
            applied: Vec::new(),
        }
    }
}

pub fn has_raw(tokens: &[Token]) -> bool {
    tokens.iter().any(|t| t.kind() == TokenKind::Raw)
}

/// Synchronous fallback over a prebuilt local index.
pub fn apply_local(
    tokens: &[Token],
    index: &SemanticIndex,
    embedder: &LocalEmbedder,
    min_similarity: f32,
) -> FallbackOutcome {
    if !has_raw(tokens) {
        return FallbackOutcome::unchanged(tokens);
    }
    let matches = tokens
        .iter()
        .map(|t| match t.kind() {
            TokenKind::Raw => {
                index.lookup(&embedder.embed(t.query_text()), t.word_count(), min_similarity)
            }
            _ => None,
        })
        .collect();
    FallbackOutcome::from_matches(tokens, matches)
}
