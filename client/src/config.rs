use std::time::Duration;

/// Which points send the rules off to be rewritten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegenerateOn {
    /// Only the player's points level the game up
    #[default]
    PlayerScore,
    AnyScore,
}

/// Client-side timing and match policy
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Display refresh rate the render loop is paced at
    pub fps: u32,
    /// How long an accepted modification is announced before play resumes
    pub announce_duration: Duration,
    /// How long an error stays up before play resumes on the old rules
    pub recover_duration: Duration,
    /// Longest the match waits on the generator before giving up
    pub fallback_timeout: Duration,
    pub regenerate_on: RegenerateOn,
    pub seed: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            announce_duration: Duration::from_millis(3500),
            recover_duration: Duration::from_millis(2000),
            fallback_timeout: Duration::from_secs(10),
            regenerate_on: RegenerateOn::default(),
            seed: 12345,
        }
    }
}

impl ClientConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps.max(1) as f64)
    }
}
