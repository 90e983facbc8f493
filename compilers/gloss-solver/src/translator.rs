use std::sync::Arc;

use gloss_parser::Segmenter;
use gloss_protocol::{Lexicon, Token, TokenKind};
use serde::Serialize;
use tracing::{info, instrument};

use crate::config::EngineConfig;
use crate::context::SemanticContext;
use crate::fallback::{AppliedFallback, FallbackOutcome};
use crate::provider::EmbeddingProvider;
use crate::sequence::GlossSequencer;

/// Result of translating one sentence. Glosses are derived from the tokens
/// and recomputed whenever a token's `accepted` flag changes.
#[derive(Debug, Clone, Serialize)]
pub struct Conversion {
    pub tokens: Vec<Token>,
    pub semantic_applied: Vec<AppliedFallback>,
    pub glosses: Vec<String>,
    #[serde(skip)]
    sequencer: GlossSequencer,
}

impl Conversion {
    pub fn new(outcome: FallbackOutcome, sequencer: GlossSequencer) -> Self {
        let glosses = sequencer.build(&outcome.tokens);
        Self {
            tokens: outcome.tokens,
            semantic_applied: outcome.applied,
            glosses,
            sequencer,
        }
    }

    /// Returns false when `index` is out of range.
    pub fn set_accepted(&mut self, index: usize, accepted: bool) -> bool {
        match self.tokens.get_mut(index) {
            Some(token) => {
                token.accepted = accepted;
                self.glosses = self.sequencer.build(&self.tokens);
                true
            }
            None => false,
        }
    }

    /// Lower-cased surface text of tokens nothing resolved.
    pub fn unmatched_words(&self) -> Vec<String> {
        self.tokens
            .iter()
            .filter(|t| t.kind() == TokenKind::Raw)
            .map(|t| t.original.to_lowercase())
            .collect()
    }
}

/// Sentence -> tokens -> semantic fallback -> gloss sequence.
pub struct Translator {
    lexicon: Arc<Lexicon>,
    segmenter: Segmenter,
    semantic: SemanticContext,
    sequencer: GlossSequencer,
}

impl Translator {
    /// Uses the remote provider from `config` when one is configured and
    /// the `remote` feature is on.
    pub fn new(lexicon: Lexicon, config: &EngineConfig) -> Self {
        let provider = remote_provider(config);
        Self::with_provider(lexicon, config, provider)
    }

    pub fn with_provider(
        lexicon: Lexicon,
        config: &EngineConfig,
        provider: Option<Arc<dyn EmbeddingProvider>>,
    ) -> Self {
        let lexicon = Arc::new(lexicon);
        Self {
            segmenter: Segmenter::new(&lexicon),
            semantic: SemanticContext::new(lexicon.clone(), provider, config.min_similarity),
            sequencer: GlossSequencer::new(&lexicon, config.fingerspelling_enabled),
            lexicon,
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn semantic(&self) -> &SemanticContext {
        &self.semantic
    }

    pub fn segment(&self, sentence: &str) -> Vec<Token> {
        self.segmenter.segment(sentence)
    }

    #[instrument(skip(self))]
    pub async fn translate(&self, sentence: &str) -> Conversion {
        let tokens = self.segmenter.segment(sentence);
        let outcome = self.semantic.apply_fallback(&tokens).await;
        if !outcome.applied.is_empty() {
            info!("Semantic fallback resolved {} token(s)", outcome.applied.len());
        }
        Conversion::new(outcome, self.sequencer.clone())
    }
}

#[cfg(feature = "remote")]
fn remote_provider(config: &EngineConfig) -> Option<Arc<dyn EmbeddingProvider>> {
    use crate::provider::HttpEmbeddingProvider;
    use std::time::Duration;

    let endpoint = config.embedding_endpoint.as_ref()?;
    let timeout = config.embedding_timeout_secs.map(Duration::from_secs);
    match HttpEmbeddingProvider::new(endpoint.clone(), config.embedding_api_key.clone(), timeout) {
        Ok(provider) => Some(Arc::new(provider)),
        Err(e) => {
            tracing::warn!("Embedding provider disabled: {}", e);
            None
        }
    }
}

#[cfg(not(feature = "remote"))]
fn remote_provider(config: &EngineConfig) -> Option<Arc<dyn EmbeddingProvider>> {
    if config.embedding_endpoint.is_some() {
        tracing::warn!("Embedding endpoint ignored: built without the remote feature");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use gloss_protocol::MatchSource;

    fn translator(fingerspelling_enabled: bool) -> Translator {
        let config = EngineConfig {
            fingerspelling_enabled,
            ..EngineConfig::default()
        };
        Translator::new(Lexicon::isl(), &config)
    }

    #[tokio::test]
    async fn test_today_i_am_happy() {
        let conversion = translator(true).translate("today I am happy").await;
        assert_eq!(conversion.glosses, ["today", "happy"]);
        assert_eq!(conversion.tokens.len(), 2);
        assert!(conversion.semantic_applied.is_empty());
    }

    #[tokio::test]
    async fn test_the_pc_is_loud() {
        let conversion = translator(true).translate("the pc is loud").await;
        assert_eq!(conversion.glosses, ["computer", "loud"]);
        assert_eq!(conversion.tokens[0].source(), Some(MatchSource::Alias));
        assert!(conversion.unmatched_words().is_empty());
    }

    #[tokio::test]
    async fn test_semantic_and_raw_tokens() {
        let t = translator(true);
        let mut conversion = t.translate("My computr in the kitchen on Monday").await;
        assert_eq!(conversion.glosses, ["monday", "computer", "kitchen"]);
        assert_eq!(conversion.semantic_applied.len(), 1);
        assert_eq!(conversion.unmatched_words(), ["kitchen"]);
        assert!(t.semantic().is_ready());

        // Rejecting the semantic match recomputes without re-segmenting
        assert!(conversion.set_accepted(0, false));
        assert_eq!(conversion.glosses, ["monday", "kitchen"]);
        assert!(conversion.set_accepted(0, true));
        assert_eq!(conversion.glosses, ["monday", "computer", "kitchen"]);
        assert!(!conversion.set_accepted(10, true));
    }

    #[tokio::test]
    async fn test_fingerspelling_off_drops_raw_words() {
        let conversion = translator(false).translate("kitchen fan").await;
        assert_eq!(conversion.glosses, ["fan"]);
        assert_eq!(conversion.unmatched_words(), ["kitchen"]);
    }

    #[tokio::test]
    async fn test_empty_sentence() {
        let t = translator(true);
        let conversion = t.translate("  ... ").await;
        assert!(conversion.tokens.is_empty());
        assert!(conversion.glosses.is_empty());
        assert!(!t.semantic().is_ready());
    }

    #[test]
    fn test_conversion_serializes_without_sequencer() {
        let sequencer = GlossSequencer::new(&Lexicon::isl(), true);
        let conversion = Conversion::new(FallbackOutcome::default(), sequencer);
        let json = serde_json::to_value(&conversion).unwrap();
        assert!(json.get("sequencer").is_none());
        assert!(json["glosses"].as_array().unwrap().is_empty());
    }
}
