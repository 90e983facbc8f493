use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use gloss_protocol::{Lexicon, Token, TokenKind};
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument, warn};

use crate::embedding::LocalEmbedder;
use crate::fallback::{has_raw, FallbackOutcome};
use crate::index::{IndexMethod, SemanticIndex, SemanticMatch};
use crate::provider::EmbeddingProvider;

/// Lower-cased text -> vector. Grows monotonically, never evicted.
#[derive(Debug, Default)]
pub struct EmbeddingCache {
    vectors: Mutex<HashMap<String, Arc<Vec<f32>>>>,
}

impl EmbeddingCache {
    pub fn get(&self, key: &str) -> Option<Arc<Vec<f32>>> {
        self.vectors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    pub fn insert(&self, key: String, vector: Vec<f32>) -> Arc<Vec<f32>> {
        let vector = Arc::new(vector);
        self.vectors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, vector.clone());
        vector
    }

    pub fn len(&self) -> usize {
        self.vectors.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Owns the semantic index and the embedding cache.
///
/// The index is built lazily by the first lookup; concurrent first callers
/// await the same build. Once built it never changes.
pub struct SemanticContext {
    lexicon: Arc<Lexicon>,
    embedder: LocalEmbedder,
    provider: Option<Arc<dyn EmbeddingProvider>>,
    index: OnceCell<SemanticIndex>,
    cache: EmbeddingCache,
    min_similarity: f32,
}

impl SemanticContext {
    pub fn new(
        lexicon: Arc<Lexicon>,
        provider: Option<Arc<dyn EmbeddingProvider>>,
        min_similarity: f32,
    ) -> Self {
        Self {
            embedder: LocalEmbedder::new(&lexicon),
            lexicon,
            provider,
            index: OnceCell::new(),
            cache: EmbeddingCache::default(),
            min_similarity,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.index.initialized()
    }

    pub fn cache(&self) -> &EmbeddingCache {
        &self.cache
    }

    /// The index, building it on first use.
    pub async fn ready(&self) -> &SemanticIndex {
        self.index.get_or_init(|| self.build()).await
    }

    #[instrument(skip(self), fields(vocabulary = self.lexicon.glosses.len()))]
    async fn build(&self) -> SemanticIndex {
        if let Some(provider) = &self.provider {
            if let Some(index) = SemanticIndex::build_remote(&self.lexicon, provider.as_ref()).await {
                info!("Semantic index ready (remote, {} entries)", index.len());
                return index;
            }
            warn!("Remote embedding build failed, rebuilding with local embeddings");
        }
        let index = SemanticIndex::build_local(&self.lexicon, &self.embedder);
        info!("Semantic index ready (local, {} entries)", index.len());
        index
    }

    async fn embed_query(&self, text: &str, method: IndexMethod) -> Option<Arc<Vec<f32>>> {
        let key = text.trim().to_lowercase();
        if let Some(hit) = self.cache.get(&key) {
            return Some(hit);
        }
        let vector = match (method, &self.provider) {
            (IndexMethod::Remote, Some(provider)) => match provider.embed(&key).await {
                Ok(v) => v,
                Err(e) => {
                    warn!("Query embedding failed for {:?}: {}", key, e);
                    return None;
                }
            },
            _ => self.embedder.embed(&key),
        };
        Some(self.cache.insert(key, vector))
    }

    /// Nearest vocabulary entry for the token's query text, if it clears the floor.
    pub async fn resolve(&self, token: &Token) -> Option<SemanticMatch> {
        let index = self.ready().await;
        let query = token.query_text();
        let vector = self.embed_query(query, index.method).await?;
        if vector.len() != index.dimension {
            warn!(
                "Query {:?} embedded with dimension {}, index has {}",
                query,
                vector.len(),
                index.dimension
            );
            return None;
        }
        let found = index.lookup(&vector, token.word_count(), self.min_similarity);
        debug!("Semantic lookup {:?} -> {:?}", query, found);
        found
    }

    /// Resolves every Raw token. Skips the index build entirely when none exist.
    pub async fn apply_fallback(&self, tokens: &[Token]) -> FallbackOutcome {
        if !has_raw(tokens) {
            return FallbackOutcome::unchanged(tokens);
        }
        let mut matches = Vec::with_capacity(tokens.len());
        for token in tokens {
            matches.push(match token.kind() {
                TokenKind::Raw => self.resolve(token).await,
                _ => None,
            });
        }
        FallbackOutcome::from_matches(tokens, matches)
    }
}
