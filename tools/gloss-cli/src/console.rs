use gloss_player::{LetterDisplay, RenderError, Renderer, StatusSink};
use gloss_protocol::Frame;
use tracing::debug;

/// Terminal stand-in for the avatar: one line per presented frame at debug level.
pub struct ConsoleRenderer;

impl Renderer for ConsoleRenderer {
    fn present(&self, frame: &Frame, index: usize) -> Result<(), RenderError> {
        debug!(
            frame = index,
            groups = frame.groups.len(),
            points = frame.point_count(),
            "present"
        );
        Ok(())
    }
}

pub struct ConsoleLetters;

impl LetterDisplay for ConsoleLetters {
    fn show_letter(&self, word: &str, index: usize, letter: char) {
        eprintln!("  ✋ {} ({}/{}): {}", word, index + 1, word.len(), letter);
    }

    fn show_complete(&self, word: &str) {
        eprintln!("  ✋ {} complete", word);
    }

    fn hide(&self) {}
}

/// Status on stderr, progress lines prefixed for readability.
pub struct ConsoleStatus;

impl StatusSink for ConsoleStatus {
    fn status(&self, text: &str) {
        eprintln!("{}", text);
    }

    fn progress(&self, text: &str) {
        if !text.is_empty() {
            eprintln!("▶ {}", text);
        }
    }
}
