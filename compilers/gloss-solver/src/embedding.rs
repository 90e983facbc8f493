//! Deterministic bag-of-features embedding.
//!
//! Not a learned representation: character-position hashes, trigram hashes,
//! two scalar features and one slot per semantic category. The only contract
//! is that the same text always yields the same vector.

use gloss_protocol::{CategoryFlags, Lexicon, SemanticCategory};

pub const LOCAL_EMBED_DIM: usize = 64;
const EXTRA_FEATURES: usize = SemanticCategory::COUNT + 2;
pub const LOCAL_HASH_SPACE: usize = if LOCAL_EMBED_DIM - EXTRA_FEATURES > 16 {
    LOCAL_EMBED_DIM - EXTRA_FEATURES
} else {
    16
};

const LENGTH_SLOT: usize = LOCAL_HASH_SPACE;
const VOWEL_SLOT: usize = LOCAL_HASH_SPACE + 1;
const CATEGORY_BASE: usize = LOCAL_EMBED_DIM - SemanticCategory::COUNT;

/// Local embedding with the lexicon's category keyword table.
#[derive(Debug, Clone)]
pub struct LocalEmbedder {
    keywords: Vec<(SemanticCategory, Vec<String>)>,
}

impl LocalEmbedder {
    pub fn new(lexicon: &Lexicon) -> Self {
        Self {
            keywords: lexicon
                .categories
                .iter()
                .map(|c| (c.category, c.keywords.clone()))
                .collect(),
        }
    }

    pub fn dimension(&self) -> usize {
        LOCAL_EMBED_DIM
    }

    /// Categories with at least one keyword occurring as a substring.
    pub fn detect_categories(&self, text: &str) -> CategoryFlags {
        let mut flags = CategoryFlags::empty();
        for (category, keywords) in &self.keywords {
            if keywords.iter().any(|kw| text.contains(kw.as_str())) {
                flags |= category.flag();
            }
        }
        flags
    }

    pub fn embed(&self, text: &str) -> Vec<f32> {
        let cleaned = text.trim().to_lowercase();
        let mut vec = vec![0.0f32; LOCAL_EMBED_DIM];
        if cleaned.is_empty() {
            return vec;
        }

        let chars: Vec<char> = cleaned.chars().collect();
        for (i, &c) in chars.iter().enumerate() {
            vec[(c as usize + i) % LOCAL_HASH_SPACE] += 1.0;
            if i + 2 < chars.len() {
                let trigram = &chars[i..i + 3];
                vec[hash_chars(trigram) as usize % LOCAL_HASH_SPACE] += 0.5;
            }
        }

        vec[LENGTH_SLOT] = (chars.len() as f32 / 4.0).min(3.0);
        vec[VOWEL_SLOT] = chars
            .iter()
            .filter(|c| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'))
            .count() as f32;

        for category in self.detect_categories(&cleaned).categories() {
            vec[CATEGORY_BASE + category.index()] = 1.0;
        }
        vec
    }
}

/// Rolling base-31 hash, wrapping at 32 bits.
fn hash_chars(chars: &[char]) -> u32 {
    chars
        .iter()
        .fold(0u32, |h, &c| h.wrapping_mul(31).wrapping_add(c as u32))
}

pub fn vector_norm(vec: &[f32]) -> f32 {
    vec.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Cosine over the common prefix. Zero norms give zero similarity.
pub fn cosine_similarity(a: &[f32], b: &[f32], norm_a: f32, norm_b: f32) -> f32 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn embedder() -> LocalEmbedder {
        LocalEmbedder::new(&Lexicon::isl())
    }

    #[test]
    fn test_layout_constants() {
        assert_eq!(LOCAL_HASH_SPACE, 52);
        assert_eq!(CATEGORY_BASE, VOWEL_SLOT + 1);
    }

    #[test]
    fn test_embedding_is_deterministic() {
        let e = embedder();
        assert_eq!(e.embed("Computer"), e.embed("computer "));
        assert_ne!(e.embed("computer"), e.embed("computers"));
    }

    #[test]
    fn test_scalar_and_category_features() {
        let v = embedder().embed("good morning");
        assert_eq!(v[LENGTH_SLOT], 3.0);
        assert_eq!(v[VOWEL_SLOT], 4.0);
        // greeting ("good morning") and feeling-positive ("good")
        assert_eq!(v[CATEGORY_BASE + SemanticCategory::Greeting.index()], 1.0);
        assert_eq!(v[CATEGORY_BASE + SemanticCategory::FeelingPositive.index()], 1.0);
        assert_eq!(v[CATEGORY_BASE + SemanticCategory::Time.index()], 0.0);
    }

    #[test]
    fn test_empty_text_is_zero_vector() {
        let v = embedder().embed("   ");
        assert_eq!(vector_norm(&v), 0.0);
        assert_eq!(cosine_similarity(&v, &v, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_cosine_of_identical_vectors_is_one() {
        let v = embedder().embed("window");
        let n = vector_norm(&v);
        assert!((cosine_similarity(&v, &v, n, n) - 1.0).abs() < 1e-5);
    }
}
