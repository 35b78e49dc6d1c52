//! Scrub bar / time field linkage
//!
//! The timeline holds both views of the playback position: the time field
//! in seconds since the bag's begin time, and the slider position in
//! `[0, slider_range]`. Every change goes through [`Timeline::apply`], which
//! sets the edited view and derives the other one from it, so neither view
//! ever feeds back into the one that triggered the update.

/// Which input moved the playback position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSource {
    /// The numeric time field (seconds)
    TimeField,
    /// The live clock feed (seconds since begin time)
    Clock,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    duration: f64,
    time: f64,
    slider: i32,
    slider_range: i32,
}

impl Timeline {
    pub fn new(slider_range: i32) -> Self {
        Self {
            duration: 0.0,
            time: 0.0,
            slider: 0,
            slider_range: slider_range.max(1),
        }
    }

    /// Length of the loaded bag in seconds
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Current time field value in seconds
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Current slider position
    pub fn slider(&self) -> i32 {
        self.slider
    }

    pub fn slider_range(&self) -> i32 {
        self.slider_range
    }

    /// Set a new duration and rewind to 0
    pub fn reset(&mut self, duration: f64) {
        self.duration = if duration.is_finite() {
            duration.max(0.0)
        } else {
            0.0
        };
        self.time = 0.0;
        self.slider = 0;
    }

    /// Move to `seconds`, clamped to `[0, duration]`, and update the slider
    pub fn apply(&mut self, source: TimeSource, seconds: f64) {
        let seconds = if seconds.is_finite() { seconds } else { 0.0 };
        self.time = seconds.clamp(0.0, self.duration);
        self.slider = self.slider_for(self.time);
        tracing::trace!(?source, time = self.time, slider = self.slider, "timeline moved");
    }

    /// Move the slider to `position` and update the time field
    pub fn apply_slider(&mut self, position: i32) {
        self.slider = position.clamp(0, self.slider_range);
        self.time = self.time_for(self.slider);
    }

    /// Slider position representing `seconds`
    pub fn slider_for(&self, seconds: f64) -> i32 {
        if self.duration <= 0.0 {
            return 0;
        }
        let position = (seconds / self.duration * self.slider_range as f64).round();
        (position as i32).clamp(0, self.slider_range)
    }

    /// Time field value represented by slider `position`
    pub fn time_for(&self, position: i32) -> f64 {
        self.duration * position as f64 / self.slider_range as f64
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_SLIDER_RANGE)
    }
}
