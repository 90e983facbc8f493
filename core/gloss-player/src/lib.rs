//! Sentence playback for gloss sequences.
//!
//! A `Player` walks a gloss list word by word: it fetches each clip from a
//! `ClipStore`, drives a `Renderer` from a refresh-rate clock, and hands words
//! without a usable clip to a `Fingerspeller`. Every wait is cancellable; a
//! stop or a newer session ends the current one at its next suspension point.

pub mod clock;
pub mod config;
pub mod error;
pub mod fingerspell;
pub mod scheduler;
pub mod session;
pub mod store;
pub mod traits;
pub mod word;

pub use clock::Playhead;
pub use config::PlayerConfig;
pub use error::{ClipError, RenderError};
pub use fingerspell::{normalize_word, LetterDisplay, TimedFingerspeller};
pub use scheduler::{Player, RunOutcome, SentenceRun};
pub use session::PlaybackSession;
pub use store::{parse_clip, FsClipStore};
pub use traits::{ClipStore, Fingerspeller, Renderer, StatusSink, TracingStatus};
pub use word::{TickState, WordPlayback};
