use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_SIMILARITY: f32 = 0.85;

/// System-level toggles for translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Unresolved words stay in the gloss sequence to be fingerspelled.
    pub fingerspelling_enabled: bool,
    /// Similarity floor for the semantic fallback (local embedding scale).
    pub min_similarity: f32,
    /// Remote embedding provider; the local hashed embedding is used when unset.
    pub embedding_endpoint: Option<String>,
    pub embedding_api_key: Option<String>,
    /// Request timeout for the provider. None waits indefinitely.
    pub embedding_timeout_secs: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fingerspelling_enabled: true,
            min_similarity: DEFAULT_MIN_SIMILARITY,
            embedding_endpoint: None,
            embedding_api_key: None,
            embedding_timeout_secs: None,
        }
    }
}

impl EngineConfig {
    /// Load from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            fingerspelling_enabled: std::env::var("GLOSS_FINGERSPELLING")
                .map(|s| s != "false" && s != "0")
                .unwrap_or(defaults.fingerspelling_enabled),
            min_similarity: std::env::var("GLOSS_MIN_SIMILARITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.min_similarity),
            embedding_endpoint: std::env::var("GLOSS_EMBEDDING_ENDPOINT")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            embedding_api_key: std::env::var("GLOSS_EMBEDDING_API_KEY")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            embedding_timeout_secs: std::env::var("GLOSS_EMBEDDING_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "fingerspelling_enabled": false }"#).unwrap();
        assert!(!config.fingerspelling_enabled);
        assert_eq!(config.min_similarity, DEFAULT_MIN_SIMILARITY);
        assert!(config.embedding_endpoint.is_none());
    }
}
