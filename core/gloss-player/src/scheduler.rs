use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use gloss_protocol::{Clip, SessionId};
use tokio::time::{interval, sleep, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::clock::Playhead;
use crate::config::PlayerConfig;
use crate::error::ClipError;
use crate::session::PlaybackSession;
use crate::traits::{ClipStore, Fingerspeller, Renderer, StatusSink};
use crate::word::WordPlayback;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every word was processed and the session ended on its own.
    Completed,
    /// Stopped, or replaced by a newer session.
    Cancelled,
}

/// Drives sentence playback against the external collaborators.
///
/// Cheap to clone; clones share the same current-session slot, so at most
/// one sentence session is active across all of them.
#[derive(Clone)]
pub struct Player {
    store: Arc<dyn ClipStore>,
    renderer: Arc<dyn Renderer>,
    speller: Arc<dyn Fingerspeller>,
    status: Arc<dyn StatusSink>,
    config: PlayerConfig,
    session: Arc<Mutex<Option<Arc<PlaybackSession>>>>,
    next_id: Arc<AtomicU32>,
}

impl Player {
    pub fn new(
        store: Arc<dyn ClipStore>,
        renderer: Arc<dyn Renderer>,
        speller: Arc<dyn Fingerspeller>,
        status: Arc<dyn StatusSink>,
        config: PlayerConfig,
    ) -> Self {
        Self {
            store,
            renderer,
            speller,
            status,
            config,
            session: Arc::new(Mutex::new(None)),
            next_id: Arc::new(AtomicU32::new(1)),
        }
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    fn slot(&self) -> MutexGuard<'_, Option<Arc<PlaybackSession>>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn active_session(&self) -> Option<Arc<PlaybackSession>> {
        self.slot().clone().filter(|s| s.is_active())
    }

    /// Creates a new session, deactivating any previous one first.
    /// Nothing happens for an empty gloss list.
    pub fn start_sentence(&self, glosses: Vec<String>, looping: bool) -> Option<SentenceRun> {
        if glosses.is_empty() {
            return None;
        }
        let id = SessionId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let session = Arc::new(PlaybackSession::new(id, glosses, looping));

        let previous = self.slot().replace(session.clone());
        if let Some(previous) = previous {
            if previous.deactivate() {
                debug!("{} replaced by {}", previous.id(), id);
                self.speller.hide();
            }
        }

        Some(SentenceRun {
            player: self.clone(),
            session,
        })
    }

    /// Deactivates the current session. Returns false when nothing was playing.
    pub fn stop(&self) -> bool {
        let current = self.slot().take();
        match current {
            Some(session) if session.deactivate() => {
                info!("{} stopped", session.id());
                self.speller.hide();
                self.status.progress("");
                self.status.status("sentence playback stopped");
                true
            }
            _ => false,
        }
    }

    /// Single-word playback outside sentence mode. Stops any sentence first.
    pub async fn load_word(&self, word: &str) -> Result<WordPlayback, ClipError> {
        let word = word.trim().to_lowercase();
        if word.is_empty() {
            self.status.status("error: enter a word");
            return Err(ClipError::EmptyName);
        }
        self.stop();

        let clip = match self.fetch(&word).await {
            Ok(clip) if clip.is_empty() => Err(ClipError::Empty),
            other => other,
        };
        let clip = match clip {
            Ok(clip) => clip,
            Err(e) => {
                self.status.status(&format!("error: {e}"));
                return Err(e);
            }
        };

        self.status.status(&format!(
            "ready: {} frames @ {} fps",
            clip.len(),
            clip.frame_rate
        ));
        let mut playback = WordPlayback::new(
            clip,
            self.renderer.clone(),
            self.status.clone(),
            self.config.refresh_interval,
        );
        playback.present_current();
        playback.play(Instant::now());
        Ok(playback)
    }

    async fn fetch(&self, word: &str) -> Result<Clip, ClipError> {
        match self.config.fetch_timeout {
            Some(limit) => tokio::time::timeout(limit, self.store.fetch_clip(word))
                .await
                .unwrap_or_else(|_| Err(ClipError::TimedOut(word.to_string()))),
            None => self.store.fetch_clip(word).await,
        }
    }

    /// One word: load, then play or fingerspell. Returns false if the
    /// session was deactivated meanwhile.
    async fn play_item(&self, session: &PlaybackSession, word: &str) -> bool {
        let fetched = tokio::select! {
            result = self.fetch(word) => result,
            _ = session.cancelled() => return false,
        };

        match fetched {
            Ok(clip) if !clip.is_empty() => self.play_clip(session, &clip).await,
            Ok(_) => {
                self.status.status(&format!("Error: no frames in {word}"));
                self.fallback(session, word, None).await
            }
            Err(e) => {
                debug!("Clip for {:?} unavailable: {}", word, e);
                self.fallback(session, word, Some(e)).await
            }
        }
    }

    async fn fallback(
        &self,
        session: &PlaybackSession,
        word: &str,
        error: Option<ClipError>,
    ) -> bool {
        if !self.config.fingerspelling_enabled {
            if let Some(e) = error {
                self.status.status(&format!("Error loading {word}: {e} (skipped)"));
            }
            return true;
        }

        if error.is_some() {
            self.status.status(&format!("Word not found: {word} - fingerspelling..."));
        }
        tokio::select! {
            spelled = self.speller.spell_word(word) => {
                if !spelled {
                    debug!("Fingerspelling {:?} did not complete", word);
                }
                true
            }
            _ = session.cancelled() => false,
        }
    }

    /// Runs the refresh clock until the final frame has been presented and
    /// no fingerspelling is showing, or the session is deactivated.
    async fn play_clip(&self, session: &PlaybackSession, clip: &Clip) -> bool {
        let mut playhead = Playhead::new(clip.len(), clip.frame_rate);
        let mut ticker = interval(self.config.refresh_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut presented: Option<usize> = None;
        playhead.start(Instant::now());

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = session.cancelled() => return false,
            }
            if !session.is_active() {
                return false;
            }

            let index = playhead.advance(Instant::now()).min(clip.len() - 1);
            if presented != Some(index) {
                if let Err(e) = self.renderer.present(&clip.frames[index], index) {
                    warn!("Frame {} of {:?} failed to render: {}", index, clip.gloss, e);
                }
                presented = Some(index);
            }

            if index + 1 >= clip.len() && !self.speller.is_active() {
                return true;
            }
        }
    }

    /// Waits one refresh period between items, so every pass through the
    /// word loop suspends even when clip loads fail immediately.
    async fn settle(&self, session: &PlaybackSession) -> bool {
        tokio::select! {
            _ = sleep(self.config.refresh_interval) => session.is_active(),
            _ = session.cancelled() => false,
        }
    }

    /// Ends a session that ran out of words.
    fn finish(&self, session: &Arc<PlaybackSession>) {
        {
            let mut slot = self.slot();
            if slot.as_ref().is_some_and(|s| Arc::ptr_eq(s, session)) {
                slot.take();
            }
        }
        if session.deactivate() {
            info!("{} complete", session.id());
            self.speller.hide();
            self.status.progress("");
            self.status.status("sentence playback complete");
        }
    }
}

/// A started sentence session, waiting to be driven.
pub struct SentenceRun {
    player: Player,
    session: Arc<PlaybackSession>,
}

impl SentenceRun {
    pub fn session(&self) -> &Arc<PlaybackSession> {
        &self.session
    }

    /// The driving loop. Words are processed strictly in order; each one's
    /// clip or fingerspelling finishes before the next is requested.
    pub async fn run(self) -> RunOutcome {
        let Self { player, session } = self;
        let total = session.len();
        info!("{} started: {} word(s)", session.id(), total);
        player.status.status("sentence playback started");

        loop {
            while let Some(word) = session.current_word() {
                if !session.is_active() {
                    return RunOutcome::Cancelled;
                }
                let display = word.to_uppercase();
                player.status.progress(&format!(
                    "Word {}/{}: {}",
                    session.current_index() + 1,
                    total,
                    display
                ));
                player.status.status(&format!("playing: {display}"));

                if !player.play_item(&session, word).await {
                    return RunOutcome::Cancelled;
                }
                if !player.settle(&session).await {
                    return RunOutcome::Cancelled;
                }
                session.advance();
            }

            if !session.is_active() {
                return RunOutcome::Cancelled;
            }
            if !session.looping() {
                break;
            }
            debug!("{} looping", session.id());
            session.rewind();
        }

        player.finish(&session);
        RunOutcome::Completed
    }
}
