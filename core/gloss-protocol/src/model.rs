use rkyv::{AlignedVec, Archive, Deserialize, Serialize};
use crate::category::SemanticCategory;
use crate::ids::GlossId;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// One vocabulary entry: a sign with a recorded motion clip.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Gloss {
    pub id: GlossId,
    /// Canonical lower-case spelling, possibly multi-word ("good morning").
    pub text: String,
    /// Base name of the clip file in the motion dataset.
    pub clip_name: String,
}

/// Surface variants that should resolve to `canonical`.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct AliasGroup {
    pub canonical: String,
    pub variants: Vec<String>,
}

/// Irregular form mapped straight to its lemma ("better" -> "good").
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct LemmaOverride {
    pub form: String,
    pub lemma: String,
}

/// Suffix stripping rule. Applies only when the word is longer than `min_len`.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct SuffixRule {
    pub suffix: String,
    pub replacement: String,
    pub min_len: u32,
    /// Skip words ending in the suffix followed by its own last letter ("ss").
    pub skip_double: bool,
}

impl SuffixRule {
    pub fn new(suffix: &str, replacement: &str, min_len: u32) -> Self {
        Self {
            suffix: suffix.to_string(),
            replacement: replacement.to_string(),
            min_len,
            skip_double: false,
        }
    }

    pub fn skipping_double(mut self) -> Self {
        self.skip_double = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct CategoryKeywords {
    pub category: SemanticCategory,
    pub keywords: Vec<String>,
}

/// Whole-sentence rewrite applied before segmentation.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Transliteration {
    pub source: String,
    pub target: String,
}

/// Static data driving segmentation, lemmatization and the local embedding.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Lexicon {
    pub version: u32,
    pub glosses: Vec<Gloss>,
    pub aliases: Vec<AliasGroup>,
    pub stop_words: Vec<String>,
    pub time_words: Vec<String>,
    pub lemma_overrides: Vec<LemmaOverride>,
    /// Ordered most specific first; the first applicable rule wins.
    pub suffix_rules: Vec<SuffixRule>,
    pub categories: Vec<CategoryKeywords>,
    pub transliterations: Vec<Transliteration>,
}

#[derive(Debug)]
pub enum LexiconError {
    /// The bytes are not a valid archived lexicon.
    Archive(String),
}

impl fmt::Display for LexiconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexiconError::Archive(msg) => write!(f, "Invalid lexicon archive: {}", msg),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LexiconError {}

impl Lexicon {
    /// Validates and deserializes an rkyv archive produced by `lexicon-compiler`.
    pub fn from_archive(bytes: &[u8]) -> Result<Self, LexiconError> {
        // Archives read from disk or fetch() are not guaranteed to be aligned.
        let mut aligned = AlignedVec::with_capacity(bytes.len());
        aligned.extend_from_slice(bytes);

        rkyv::from_bytes::<Lexicon>(&aligned)
            .map_err(|e| LexiconError::Archive(alloc::format!("{:?}", e)))
    }

    pub fn gloss(&self, text: &str) -> Option<&Gloss> {
        self.glosses.iter().find(|g| g.text == text)
    }

    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.glosses.iter().map(|g| g.text.as_str())
    }

    /// Clip file base name for a gloss; unknown glosses use their own text.
    pub fn clip_name<'a>(&'a self, gloss: &'a str) -> &'a str {
        let lower = gloss.to_lowercase();
        self.glosses
            .iter()
            .find(|g| g.text == lower)
            .map(|g| g.clip_name.as_str())
            .unwrap_or(gloss)
    }

    pub fn transliterate(&self, sentence: &str) -> Option<&str> {
        self.transliterations
            .iter()
            .find(|t| t.source == sentence)
            .map(|t| t.target.as_str())
    }

    pub fn is_time_word(&self, word: &str) -> bool {
        self.time_words.iter().any(|w| w == word)
    }
}
