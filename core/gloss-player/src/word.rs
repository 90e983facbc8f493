use std::sync::Arc;
use std::time::Duration;

use gloss_protocol::Clip;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::warn;

use crate::clock::Playhead;
use crate::traits::{Renderer, StatusSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickState {
    Idle,
    Frame(usize),
    Finished,
}

/// One loaded clip under manual control: play, pause, step, stop.
pub struct WordPlayback {
    clip: Clip,
    playhead: Playhead,
    playing: bool,
    presented: Option<usize>,
    renderer: Arc<dyn Renderer>,
    status: Arc<dyn StatusSink>,
    refresh_interval: Duration,
}

impl WordPlayback {
    pub fn new(
        clip: Clip,
        renderer: Arc<dyn Renderer>,
        status: Arc<dyn StatusSink>,
        refresh_interval: Duration,
    ) -> Self {
        Self {
            playhead: Playhead::new(clip.len(), clip.frame_rate),
            clip,
            playing: false,
            presented: None,
            renderer,
            status,
            refresh_interval,
        }
    }

    pub fn clip(&self) -> &Clip {
        &self.clip
    }

    pub fn frame_index(&self) -> usize {
        self.playhead.frame_index()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    fn present(&mut self, index: usize) {
        if let Err(e) = self.renderer.present(&self.clip.frames[index], index) {
            warn!("Frame {} of {:?} failed to render: {}", index, self.clip.gloss, e);
        }
        self.presented = Some(index);
    }

    /// Redraws the frame under the playhead.
    pub fn present_current(&mut self) {
        if self.clip.is_empty() {
            return;
        }
        let index = self.frame_index().min(self.clip.len() - 1);
        self.present(index);
    }

    pub fn play(&mut self, now: Instant) {
        if self.clip.is_empty() {
            self.status.status("nothing loaded");
            return;
        }
        self.playing = true;
        self.playhead.start(now);
        self.status.status("playing");
    }

    pub fn pause(&mut self) {
        self.playing = false;
        self.playhead.pause();
        self.status.status("paused");
    }

    pub fn resume(&mut self, now: Instant) {
        self.play(now);
    }

    /// Pauses and moves exactly one frame forward, stopping at the last frame.
    pub fn step_once(&mut self) {
        if self.clip.is_empty() {
            return;
        }
        self.playing = false;
        self.playhead.pause();
        self.playhead.seek(self.playhead.frame_index() + 1);
        self.present(self.playhead.frame_index());
        self.status.status("stepping");
    }

    /// Back to frame zero, not playing.
    pub fn stop(&mut self) {
        self.playing = false;
        self.playhead.reset();
        self.presented = None;
    }

    /// Advances to the frame for `now`, presenting it if it changed.
    pub fn tick(&mut self, now: Instant) -> TickState {
        if !self.playing || self.clip.is_empty() {
            return TickState::Idle;
        }
        let index = self.playhead.advance(now);
        if index >= self.clip.len() {
            self.playing = false;
            self.playhead.reset();
            self.status.status("done");
            return TickState::Finished;
        }
        if self.presented != Some(index) {
            self.present(index);
        }
        TickState::Frame(index)
    }

    /// Drives `tick` from the refresh clock until paused, stopped or finished.
    pub async fn run(&mut self) -> TickState {
        let mut ticker = interval(self.refresh_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            match self.tick(Instant::now()) {
                TickState::Frame(_) => continue,
                state => return state,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerConfig;
    use crate::error::{ClipError, RenderError};
    use crate::scheduler::Player;
    use crate::traits::{ClipStore, Fingerspeller};
    use async_trait::async_trait;
    use gloss_protocol::Frame;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Log {
        events: Mutex<Vec<String>>,
    }

    impl Log {
        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }

        fn frames(&self) -> Vec<String> {
            self.events()
                .into_iter()
                .filter(|e| e.starts_with("frame"))
                .collect()
        }
    }

    impl Renderer for Log {
        fn present(&self, _frame: &Frame, index: usize) -> Result<(), RenderError> {
            self.events.lock().unwrap().push(format!("frame {index}"));
            Ok(())
        }
    }

    impl StatusSink for Log {
        fn status(&self, text: &str) {
            self.events.lock().unwrap().push(text.to_string());
        }

        fn progress(&self, _text: &str) {}
    }

    #[async_trait]
    impl Fingerspeller for Log {
        async fn spell_word(&self, _word: &str) -> bool {
            false
        }

        fn is_active(&self) -> bool {
            false
        }

        fn hide(&self) {}
    }

    struct OneClip(Clip);

    #[async_trait]
    impl ClipStore for OneClip {
        async fn fetch_clip(&self, gloss: &str) -> Result<Clip, ClipError> {
            if gloss == self.0.gloss {
                Ok(self.0.clone())
            } else {
                Err(ClipError::NotFound(gloss.to_string()))
            }
        }
    }

    fn clip(frames: usize, rate: f32) -> Clip {
        Clip::new("hat".to_string(), vec![Frame::default(); frames], rate)
    }

    fn playback(frames: usize, rate: f32) -> (WordPlayback, Arc<Log>) {
        let log = Arc::new(Log::default());
        let playback = WordPlayback::new(
            clip(frames, rate),
            log.clone(),
            log.clone(),
            Duration::from_millis(10),
        );
        (playback, log)
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_word_plays_to_the_end() {
        let log = Arc::new(Log::default());
        let player = Player::new(
            Arc::new(OneClip(clip(3, 30.0))),
            log.clone(),
            log.clone(),
            log.clone(),
            PlayerConfig::default(),
        );

        let mut playback = player.load_word("  Hat ").await.unwrap();
        assert!(log.events().contains(&"ready: 3 frames @ 30 fps".to_string()));
        assert_eq!(playback.run().await, TickState::Finished);
        assert_eq!(log.frames(), ["frame 0", "frame 1", "frame 2"]);
        assert_eq!(log.events().last().map(String::as_str), Some("done"));
        assert_eq!(playback.frame_index(), 0);

        assert!(matches!(player.load_word("door").await, Err(ClipError::NotFound(_))));
        assert!(matches!(player.load_word(" ").await, Err(ClipError::EmptyName)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_clip_is_rejected() {
        let log = Arc::new(Log::default());
        let player = Player::new(
            Arc::new(OneClip(clip(0, 30.0))),
            log.clone(),
            log.clone(),
            log.clone(),
            PlayerConfig::default(),
        );
        assert!(matches!(player.load_word("hat").await, Err(ClipError::Empty)));
        assert_eq!(log.events(), ["error: no frames found"]);
    }

    #[tokio::test]
    async fn test_pause_step_resume() {
        let (mut playback, log) = playback(5, 10.0);
        let t0 = Instant::now();
        playback.play(t0);
        assert_eq!(playback.tick(t0), TickState::Frame(0));
        assert_eq!(playback.tick(t0 + Duration::from_millis(150)), TickState::Frame(1));

        playback.pause();
        assert_eq!(playback.tick(t0 + Duration::from_secs(10)), TickState::Idle);
        playback.step_once();
        assert_eq!(playback.frame_index(), 2);

        let t1 = t0 + Duration::from_secs(20);
        playback.resume(t1);
        assert_eq!(playback.tick(t1 + Duration::from_millis(110)), TickState::Frame(3));
        assert_eq!(playback.tick(t1 + Duration::from_millis(310)), TickState::Finished);
        assert_eq!(log.frames(), ["frame 0", "frame 1", "frame 2", "frame 3"]);
    }

    #[tokio::test]
    async fn test_step_stops_at_last_frame_and_stop_rewinds() {
        let (mut playback, log) = playback(2, 30.0);
        playback.step_once();
        playback.step_once();
        assert_eq!(playback.frame_index(), 1);
        assert_eq!(log.events().last().map(String::as_str), Some("stepping"));

        playback.stop();
        assert_eq!(playback.frame_index(), 0);
        assert!(!playback.is_playing());
    }
}
