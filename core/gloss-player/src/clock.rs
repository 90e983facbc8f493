use std::time::Duration;

use gloss_protocol::clamp_frame_rate;
use tokio::time::Instant;

/// Maps elapsed wall time to a frame index at a fixed frame rate.
///
/// While running, the index is `base + elapsed / frame_duration`. Pausing
/// folds the current index into `base`, so resuming continues from it.
#[derive(Debug, Clone)]
pub struct Playhead {
    frame_count: usize,
    frame_duration: Duration,
    started: Option<Instant>,
    base: usize,
    frame_index: usize,
}

impl Playhead {
    pub fn new(frame_count: usize, frame_rate: f32) -> Self {
        let rate = clamp_frame_rate(frame_rate) as f64;
        Self {
            frame_count,
            frame_duration: Duration::from_secs_f64(1.0 / rate),
            started: None,
            base: 0,
            frame_index: 0,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    pub fn start(&mut self, now: Instant) {
        self.started = Some(now);
    }

    pub fn pause(&mut self) {
        self.started = None;
        self.base = self.frame_index;
    }

    /// Stops and moves to `index` (clamped to the last frame).
    pub fn seek(&mut self, index: usize) {
        self.started = None;
        self.frame_index = index.min(self.frame_count.saturating_sub(1));
        self.base = self.frame_index;
    }

    pub fn reset(&mut self) {
        self.started = None;
        self.base = 0;
        self.frame_index = 0;
    }

    pub fn frame_at(&self, now: Instant) -> usize {
        match self.started {
            Some(start) => {
                let elapsed = now.saturating_duration_since(start).as_nanos();
                self.base + (elapsed / self.frame_duration.as_nanos()) as usize
            }
            None => self.base,
        }
    }

    /// Recomputes the index for `now`. May run past the last frame.
    pub fn advance(&mut self, now: Instant) -> usize {
        self.frame_index = self.frame_at(now);
        self.frame_index
    }

    pub fn is_at_end(&self) -> bool {
        self.frame_index + 1 >= self.frame_count
    }
}
