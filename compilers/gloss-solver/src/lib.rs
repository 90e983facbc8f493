pub mod config;
pub mod context;
pub mod embedding;
pub mod fallback;
pub mod index;
pub mod provider;
pub mod sequence;
pub mod translator;

pub use config::EngineConfig;
pub use context::{EmbeddingCache, SemanticContext};
pub use embedding::{cosine_similarity, vector_norm, LocalEmbedder, LOCAL_EMBED_DIM};
pub use fallback::{apply_local, AppliedFallback, FallbackOutcome};
pub use index::{IndexMethod, SemanticIndex, SemanticIndexEntry, SemanticMatch};
pub use provider::{EmbeddingProvider, ProviderError};
pub use sequence::GlossSequencer;
pub use translator::{Conversion, Translator};

#[cfg(feature = "remote")]
pub use provider::HttpEmbeddingProvider;
