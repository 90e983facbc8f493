use gloss_protocol::{word_count, GlossId, Lexicon};
use serde::Serialize;
use tracing::{debug, warn};

use crate::embedding::{cosine_similarity, vector_norm, LocalEmbedder};
use crate::provider::EmbeddingProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexMethod {
    Local,
    Remote,
}

#[derive(Debug, Clone)]
pub struct SemanticIndexEntry {
    pub gloss: GlossId,
    pub word: String,
    pub vector: Vec<f32>,
    pub norm: f32,
    pub token_count: usize,
}

impl SemanticIndexEntry {
    fn new(gloss: GlossId, word: &str, vector: Vec<f32>) -> Self {
        Self {
            gloss,
            word: word.to_string(),
            norm: vector_norm(&vector),
            token_count: word_count(word),
            vector,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemanticMatch {
    pub word: String,
    pub score: f32,
}

/// One embedded entry per vocabulary word. Immutable once built.
#[derive(Debug, Clone)]
pub struct SemanticIndex {
    pub method: IndexMethod,
    pub entries: Vec<SemanticIndexEntry>,
    pub dimension: usize,
}

impl SemanticIndex {
    pub fn build_local(lexicon: &Lexicon, embedder: &LocalEmbedder) -> Self {
        let entries = lexicon
            .glosses
            .iter()
            .map(|g| SemanticIndexEntry::new(g.id, &g.text, embedder.embed(&g.text)))
            .collect();
        Self {
            method: IndexMethod::Local,
            entries,
            dimension: embedder.dimension(),
        }
    }

    /// Embeds every vocabulary word through the provider. Any single failure,
    /// or vectors of differing dimension, abandon the remote build; the
    /// caller rebuilds locally.
    pub async fn build_remote(
        lexicon: &Lexicon,
        provider: &dyn EmbeddingProvider,
    ) -> Option<Self> {
        let mut entries = Vec::with_capacity(lexicon.glosses.len());
        for gloss in &lexicon.glosses {
            match provider.embed(&gloss.text).await {
                Ok(vector) => entries.push(SemanticIndexEntry::new(gloss.id, &gloss.text, vector)),
                Err(e) => {
                    warn!("Remote embedding failed for {:?}: {}", gloss.text, e);
                    return None;
                }
            }
        }
        let dimension = entries.first().map(|e| e.vector.len()).unwrap_or(0);
        if let Some(entry) = entries.iter().find(|e| e.vector.len() != dimension) {
            warn!(
                "Remote embedding for {:?} has dimension {}, expected {}",
                entry.word,
                entry.vector.len(),
                dimension
            );
            return None;
        }
        debug!("Remote index built: {} entries, dimension {}", entries.len(), dimension);
        Some(Self {
            method: IndexMethod::Remote,
            entries,
            dimension,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest-scoring entry with the same word count as the query.
    /// Ties keep the earliest entry.
    pub fn nearest(&self, query: &[f32], query_words: usize) -> Option<SemanticMatch> {
        let query_norm = vector_norm(query);
        let mut best: Option<(&SemanticIndexEntry, f32)> = None;
        for entry in self.entries.iter().filter(|e| e.token_count == query_words) {
            let score = cosine_similarity(query, &entry.vector, query_norm, entry.norm);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((entry, score));
            }
        }
        best.map(|(entry, score)| SemanticMatch {
            word: entry.word.clone(),
            score,
        })
    }

    /// `nearest`, kept only when the score clears `min_similarity`.
    pub fn lookup(
        &self,
        query: &[f32],
        query_words: usize,
        min_similarity: f32,
    ) -> Option<SemanticMatch> {
        self.nearest(query, query_words)
            .filter(|m| m.score >= min_similarity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gloss_protocol::Gloss;

    fn lexicon_of(words: &[&str]) -> Lexicon {
        let mut lexicon = Lexicon::isl();
        lexicon.glosses = words
            .iter()
            .enumerate()
            .map(|(i, w)| Gloss {
                id: GlossId::from_index(i),
                text: w.to_string(),
                clip_name: w.to_string(),
            })
            .collect();
        lexicon
    }

    #[test]
    fn test_local_index_covers_vocabulary() {
        let lexicon = Lexicon::isl();
        let index = SemanticIndex::build_local(&lexicon, &LocalEmbedder::new(&lexicon));
        assert_eq!(index.method, IndexMethod::Local);
        assert_eq!(index.len(), lexicon.glosses.len());
        assert_eq!(index.dimension, 64);
        let entry = index.entries.iter().find(|e| e.word == "good morning").unwrap();
        assert_eq!(entry.token_count, 2);
        assert!(entry.norm > 0.0);
    }

    #[test]
    fn test_identical_text_scores_one() {
        let lexicon = Lexicon::isl();
        let embedder = LocalEmbedder::new(&lexicon);
        let index = SemanticIndex::build_local(&lexicon, &embedder);
        let hit = index.lookup(&embedder.embed("window"), 1, 0.85).unwrap();
        assert_eq!(hit.word, "window");
        assert!((hit.score - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_word_count_gates_candidates() {
        let lexicon = lexicon_of(&["good morning"]);
        let embedder = LocalEmbedder::new(&lexicon);
        let index = SemanticIndex::build_local(&lexicon, &embedder);
        // Same text, wrong word count: never a candidate
        assert!(index.nearest(&embedder.embed("good morning"), 1).is_none());
        assert!(index.lookup(&embedder.embed("good morning"), 2, 0.85).is_some());

        let lexicon = lexicon_of(&["phone"]);
        let index = SemanticIndex::build_local(&lexicon, &embedder);
        assert!(index.nearest(&embedder.embed("cell phone"), 2).is_none());
    }

    #[test]
    fn test_floor_rejects_weak_matches() {
        let lexicon = Lexicon::isl();
        let embedder = LocalEmbedder::new(&lexicon);
        let index = SemanticIndex::build_local(&lexicon, &embedder);
        let query = embedder.embed("qzx");
        let best = index.nearest(&query, 1).unwrap();
        assert!(best.score < 0.85);
        assert!(index.lookup(&query, 1, 0.85).is_none());
    }

    #[test]
    fn test_zero_query_never_matches() {
        let lexicon = Lexicon::isl();
        let index = SemanticIndex::build_local(&lexicon, &LocalEmbedder::new(&lexicon));
        let zero = vec![0.0; 64];
        assert!(index.lookup(&zero, 1, 0.0001).is_none());
    }
}
