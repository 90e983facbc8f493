use wasm_bindgen::prelude::*;
use gloss_protocol::{Lexicon, MatchSource, Token, TokenKind};
use gloss_parser::Segmenter;
use gloss_solver::{
    apply_local, Conversion, EngineConfig, GlossSequencer, LocalEmbedder, SemanticIndex,
};
use serde::Serialize;
use thiserror::Error;

#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// One token as shown in the review table
#[derive(Debug, Serialize)]
pub struct TokenReport {
    pub text: String,
    pub kind: TokenKind,
    pub canonical: Option<String>,
    pub source: Option<MatchSource>,
    pub score: Option<f32>,
    pub accepted: bool,
}

impl From<&Token> for TokenReport {
    fn from(t: &Token) -> Self {
        Self {
            text: t.original.clone(),
            kind: t.kind(),
            canonical: t.canonical().map(str::to_string),
            source: t.source(),
            score: t.score(),
            accepted: t.accepted,
        }
    }
}

/// The structured response sent back to JavaScript
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub tokens: Vec<TokenReport>,
    pub glosses: Vec<String>,
    pub semantic_matches: usize,
    pub unmatched_words: Vec<String>,
    pub debug_info: String,
}

/// The Engine Instance running in the Browser
#[wasm_bindgen]
pub struct GlossEngine {
    lexicon: Lexicon,
    segmenter: Segmenter,
    embedder: LocalEmbedder,
    index: SemanticIndex,
    config: EngineConfig,
    // Last analysis, kept so acceptance toggles don't re-segment
    current: Option<Conversion>,
}

#[wasm_bindgen]
impl GlossEngine {
    /// `data` is a lexicon archive produced by lexicon-compiler (loaded via fetch() in JS)
    #[wasm_bindgen(constructor)]
    pub fn new(data: Vec<u8>) -> Result<GlossEngine, JsValue> {
        let lexicon = Lexicon::from_archive(&data).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::from_lexicon(lexicon))
    }

    /// Engine over the built-in ISL lexicon
    pub fn builtin() -> GlossEngine {
        Self::from_lexicon(Lexicon::isl())
    }

    pub fn set_fingerspelling(&mut self, enabled: bool) {
        self.config.fingerspelling_enabled = enabled;
    }

    /// The Main Loop: Text -> Segmenter -> Semantic Fallback -> Gloss Sequence -> JSON
    pub fn analyze(&mut self, input: &str) -> Result<JsValue, JsValue> {
        let report = self.analyze_report(input);
        serde_wasm_bindgen::to_value(&report).map_err(JsValue::from)
    }

    /// Toggles one token of the last analysis and returns the updated report
    pub fn set_accepted(&mut self, index: usize, accepted: bool) -> Result<JsValue, JsValue> {
        let report = self
            .toggle(index, accepted)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        serde_wasm_bindgen::to_value(&report).map_err(JsValue::from)
    }
}

impl GlossEngine {
    pub fn from_lexicon(lexicon: Lexicon) -> Self {
        let embedder = LocalEmbedder::new(&lexicon);
        let index = SemanticIndex::build_local(&lexicon, &embedder);
        Self {
            segmenter: Segmenter::new(&lexicon),
            embedder,
            index,
            config: EngineConfig::default(),
            current: None,
            lexicon,
        }
    }

    pub fn analyze_report(&mut self, input: &str) -> AnalysisReport {
        let tokens = self.segmenter.segment(input);
        let outcome = apply_local(&tokens, &self.index, &self.embedder, self.config.min_similarity);
        let sequencer = GlossSequencer::new(&self.lexicon, self.config.fingerspelling_enabled);
        let conversion = Conversion::new(outcome, sequencer);
        let report = self.report(&conversion);
        self.current = Some(conversion);
        report
    }

    pub fn toggle(&mut self, index: usize, accepted: bool) -> Result<AnalysisReport, ToggleError> {
        let mut conversion = self.current.take().ok_or(ToggleError::NotAnalyzed)?;
        let changed = conversion.set_accepted(index, accepted);
        let report = self.report(&conversion);
        self.current = Some(conversion);
        if changed {
            Ok(report)
        } else {
            Err(ToggleError::NoSuchToken(index))
        }
    }

    fn report(&self, conversion: &Conversion) -> AnalysisReport {
        AnalysisReport {
            tokens: conversion.tokens.iter().map(TokenReport::from).collect(),
            glosses: conversion.glosses.clone(),
            semantic_matches: conversion.semantic_applied.len(),
            unmatched_words: conversion.unmatched_words(),
            debug_info: format!(
                "Glosses: {}, Index: {} entries",
                self.lexicon.glosses.len(),
                self.index.len()
            ),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum ToggleError {
    #[error("no sentence analyzed yet")]
    NotAnalyzed,
    #[error("no token at index {0}")]
    NoSuchToken(usize),
}
