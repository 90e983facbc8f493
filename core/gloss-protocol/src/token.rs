use alloc::string::String;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Half-open range of word positions in the preprocessed sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// How a matched token found its canonical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MatchSource {
    Exact,
    Lemma,
    Alias,
    Semantic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TokenKind {
    Matched,
    Semantic,
    Raw,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
pub enum Resolution {
    /// Nothing in the lexicon covers the word; it may still be fingerspelled.
    Unresolved { normalized: String, lemma: String },
    /// Resolved against the vocabulary or alias table.
    Matched { canonical: String, source: MatchSource },
    /// Resolved by nearest-neighbour search over the semantic index.
    Semantic { canonical: String, score: f32 },
}

/// One parsed unit of input. `canonical`, when present, is always a vocabulary entry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Token {
    pub span: Span,
    /// Exact surface text consumed, words joined by single spaces.
    pub original: String,
    pub resolution: Resolution,
    /// User-editable. Raw tokens start rejected, resolved tokens accepted.
    pub accepted: bool,
}

impl Token {
    pub fn matched(span: Span, original: String, canonical: String, source: MatchSource) -> Self {
        Self {
            span,
            original,
            resolution: Resolution::Matched { canonical, source },
            accepted: true,
        }
    }

    pub fn raw(span: Span, original: String, normalized: String, lemma: String) -> Self {
        Self {
            span,
            original,
            resolution: Resolution::Unresolved { normalized, lemma },
            accepted: false,
        }
    }

    /// Promotes an unresolved token to a semantic match, leaving `self` untouched.
    pub fn with_semantic_match(&self, canonical: String, score: f32) -> Self {
        Self {
            span: self.span,
            original: self.original.clone(),
            resolution: Resolution::Semantic { canonical, score },
            accepted: true,
        }
    }

    pub fn kind(&self) -> TokenKind {
        match self.resolution {
            Resolution::Unresolved { .. } => TokenKind::Raw,
            Resolution::Matched { .. } => TokenKind::Matched,
            Resolution::Semantic { .. } => TokenKind::Semantic,
        }
    }

    pub fn canonical(&self) -> Option<&str> {
        match &self.resolution {
            Resolution::Unresolved { .. } => None,
            Resolution::Matched { canonical, .. } | Resolution::Semantic { canonical, .. } => {
                Some(canonical)
            }
        }
    }

    pub fn source(&self) -> Option<MatchSource> {
        match self.resolution {
            Resolution::Unresolved { .. } => None,
            Resolution::Matched { source, .. } => Some(source),
            Resolution::Semantic { .. } => Some(MatchSource::Semantic),
        }
    }

    pub fn score(&self) -> Option<f32> {
        match self.resolution {
            Resolution::Semantic { score, .. } => Some(score),
            _ => None,
        }
    }

    /// Text used to query the semantic index: lemma, else normalized, else original.
    pub fn query_text(&self) -> &str {
        match &self.resolution {
            Resolution::Unresolved { normalized, lemma } => {
                if !lemma.is_empty() {
                    lemma
                } else if !normalized.is_empty() {
                    normalized
                } else {
                    &self.original
                }
            }
            _ => &self.original,
        }
    }

    /// Number of whitespace-separated words in the surface text (at least 1).
    pub fn word_count(&self) -> usize {
        word_count(&self.original)
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count().max(1)
}
