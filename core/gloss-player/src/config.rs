use std::time::Duration;

/// Display refresh period the playback clock ticks at.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_micros(16_667);

#[derive(Debug, Clone)]
pub struct PlayerConfig {
    /// Missing or empty clips are fingerspelled instead of skipped.
    pub fingerspelling_enabled: bool,
    pub refresh_interval: Duration,
    /// Clip fetches exceeding this count as load failures. None waits indefinitely.
    pub fetch_timeout: Option<Duration>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            fingerspelling_enabled: true,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            fetch_timeout: None,
        }
    }
}
