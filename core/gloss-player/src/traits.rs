use async_trait::async_trait;
use gloss_protocol::{Clip, Frame};
use tracing::{debug, info};

use crate::error::{ClipError, RenderError};

/// Source of motion clips, keyed by gloss.
#[async_trait]
pub trait ClipStore: Send + Sync {
    async fn fetch_clip(&self, gloss: &str) -> Result<Clip, ClipError>;
}

/// Draws one frame. Called once per advanced frame.
pub trait Renderer: Send + Sync {
    fn present(&self, frame: &Frame, index: usize) -> Result<(), RenderError>;
}

/// Letter-by-letter presentation of a word.
#[async_trait]
pub trait Fingerspeller: Send + Sync {
    /// Resolves once the word has been spelled (true) or could not be (false).
    async fn spell_word(&self, word: &str) -> bool;
    fn is_active(&self) -> bool;
    /// Dismisses the overlay; an in-flight spell returns false.
    fn hide(&self);
}

pub trait StatusSink: Send + Sync {
    fn status(&self, text: &str);
    /// "Word i/n: WORD" during sentence playback, empty when idle.
    fn progress(&self, text: &str);
}

/// Reports status lines through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingStatus;

impl StatusSink for TracingStatus {
    fn status(&self, text: &str) {
        info!(target: "gloss::status", "{}", text);
    }

    fn progress(&self, text: &str) {
        if !text.is_empty() {
            debug!(target: "gloss::status", "{}", text);
        }
    }
}
