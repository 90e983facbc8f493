use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::traits::Fingerspeller;

pub const LETTER_DELAY: Duration = Duration::from_millis(600);
pub const END_DELAY: Duration = Duration::from_millis(800);

/// Where fingerspelled letters are shown (an overlay, a terminal line, ...).
pub trait LetterDisplay: Send + Sync {
    /// Whether a sign exists for `letter`. Letters without one are skipped.
    fn can_show(&self, _letter: char) -> bool {
        true
    }
    fn show_letter(&self, word: &str, index: usize, letter: char);
    fn show_complete(&self, word: &str);
    fn hide(&self);
}

/// Upper-cased ASCII letters and digits of `word`.
pub fn normalize_word(word: &str) -> String {
    word.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Spells a word one letter per `letter_delay`, holds the whole word for
/// `end_delay`, then hides.
pub struct TimedFingerspeller<D: LetterDisplay> {
    display: D,
    active: AtomicBool,
    generation: AtomicU64,
    letter_delay: Duration,
    end_delay: Duration,
}

impl<D: LetterDisplay> TimedFingerspeller<D> {
    pub fn new(display: D) -> Self {
        Self::with_delays(display, LETTER_DELAY, END_DELAY)
    }

    pub fn with_delays(display: D, letter_delay: Duration, end_delay: Duration) -> Self {
        Self {
            display,
            active: AtomicBool::new(false),
            generation: AtomicU64::new(0),
            letter_delay,
            end_delay,
        }
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    fn is_current(&self, generation: u64) -> bool {
        self.active.load(Ordering::SeqCst) && self.generation.load(Ordering::SeqCst) == generation
    }
}

#[async_trait]
impl<D: LetterDisplay> Fingerspeller for TimedFingerspeller<D> {
    async fn spell_word(&self, word: &str) -> bool {
        let normalized = normalize_word(word);
        if normalized.is_empty() {
            warn!("Cannot fingerspell {:?}: no displayable characters", word);
            return false;
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.active.store(true, Ordering::SeqCst);
        debug!("Fingerspelling {}", normalized);

        let mut shown = 0;
        for (index, letter) in normalized.chars().enumerate() {
            if !self.display.can_show(letter) {
                debug!("Skipping unsupported letter {:?}", letter);
                continue;
            }
            self.display.show_letter(&normalized, index, letter);
            shown += 1;
            sleep(self.letter_delay).await;
            if !self.is_current(generation) {
                return false;
            }
        }

        if shown == 0 {
            warn!("No letters of {:?} could be displayed", normalized);
            self.hide();
            return false;
        }

        self.display.show_complete(&normalized);
        sleep(self.end_delay).await;
        if !self.is_current(generation) {
            return false;
        }
        self.hide();
        true
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn hide(&self) {
        self.active.store(false, Ordering::SeqCst);
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.display.hide();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::time::Instant;

    struct RecordingDisplay {
        start: Instant,
        digits: bool,
        events: Mutex<Vec<(u128, String)>>,
    }

    impl RecordingDisplay {
        fn new(digits: bool) -> Self {
            Self {
                start: Instant::now(),
                digits,
                events: Mutex::new(Vec::new()),
            }
        }

        fn record(&self, event: String) {
            let at = self.start.elapsed().as_millis();
            self.events.lock().unwrap().push((at, event));
        }

        fn events(&self) -> Vec<(u128, String)> {
            self.events.lock().unwrap().clone()
        }
    }

    impl LetterDisplay for RecordingDisplay {
        fn can_show(&self, letter: char) -> bool {
            self.digits || !letter.is_ascii_digit()
        }

        fn show_letter(&self, _word: &str, index: usize, letter: char) {
            self.record(format!("{index}:{letter}"));
        }

        fn show_complete(&self, word: &str) {
            self.record(format!("complete {word}"));
        }

        fn hide(&self) {
            self.record("hide".to_string());
        }
    }

    #[test]
    fn test_normalize_word() {
        assert_eq!(normalize_word("kitchen's #2"), "KITCHENS2");
        assert_eq!(normalize_word("...!"), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_letters_are_timed() {
        let speller = TimedFingerspeller::new(RecordingDisplay::new(true));
        assert!(speller.spell_word("ok!").await);
        assert!(!speller.is_active());
        assert_eq!(
            speller.display().events(),
            [
                (0, "0:O".to_string()),
                (600, "1:K".to_string()),
                (1200, "complete OK".to_string()),
                (2000, "hide".to_string()),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_displayable_fails() {
        let speller = TimedFingerspeller::new(RecordingDisplay::new(false));
        assert!(!speller.spell_word("?!").await);
        assert!(speller.display().events().is_empty());

        assert!(!speller.spell_word("42").await);
        assert_eq!(speller.display().events(), [(0, "hide".to_string())]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hide_interrupts_spelling() {
        let speller = Arc::new(TimedFingerspeller::new(RecordingDisplay::new(true)));
        let task = tokio::spawn({
            let speller = speller.clone();
            async move { speller.spell_word("hello").await }
        });

        tokio::time::sleep(Duration::from_millis(700)).await;
        assert!(speller.is_active());
        speller.hide();
        assert!(!task.await.unwrap());
        assert!(!speller.is_active());

        let letters = speller
            .display()
            .events()
            .iter()
            .filter(|(_, e)| e.contains(':'))
            .count();
        assert_eq!(letters, 2);
    }
}
