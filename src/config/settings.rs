//! Playback settings edited through the player config dialog
//!
//! These start from the `[playback]` section of the config file and are then
//! owned by the session for the lifetime of the process.

use serde::{Deserialize, Serialize};

/// Lowest rate accepted by the player
pub const MIN_PLAYBACK_RATE: f64 = 0.01;

/// Highest rate accepted by the player
pub const MAX_PLAYBACK_RATE: f64 = 100.0;

/// Player parameters: loop, clock publishing and rate
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PlaybackSettings {
    /// Restart playback when the end of the bag is reached (`-l`)
    #[serde(default)]
    pub loop_playback: bool,

    /// Publish simulated time on /clock (`--clock`)
    #[serde(default = "default_publish_clock")]
    pub publish_clock: bool,

    /// Playback rate multiplier (`-r`)
    #[serde(default = "default_rate")]
    pub rate: f64,
}

fn default_publish_clock() -> bool {
    true
}

fn default_rate() -> f64 {
    1.0
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            loop_playback: false,
            publish_clock: true,
            rate: 1.0,
        }
    }
}

impl PlaybackSettings {
    /// Copy with the rate forced into the accepted range
    pub fn clamped(self) -> Self {
        let rate = if self.rate.is_finite() {
            self.rate.clamp(MIN_PLAYBACK_RATE, MAX_PLAYBACK_RATE)
        } else {
            default_rate()
        };
        Self { rate, ..self }
    }
}
