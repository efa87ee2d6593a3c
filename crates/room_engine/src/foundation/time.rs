//! Frame timing driven by the window system clock

/// Frame timer fed with the window system's elapsed time
///
/// The clock value comes from the windowing layer (`glfwGetTime` on the
/// desktop app, a scripted value in tests) so the scene never reads the
/// wall clock itself.
#[derive(Debug, Clone)]
pub struct Timer {
    last_frame: Option<f64>,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: None,
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Advance to the clock value `now` (seconds) and return the frame delta
    ///
    /// The first tick yields a zero delta. A clock that goes backwards also
    /// yields zero rather than a negative step.
    pub fn tick(&mut self, now: f64) -> f32 {
        self.delta_time = self
            .last_frame
            .map_or(0.0, |last| (now - last).max(0.0) as f32);
        self.total_time += self.delta_time;
        self.last_frame = Some(now);
        self.frame_count += 1;
        self.delta_time
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since the first tick
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Frame-rate counter that reports once per sampling window
#[derive(Debug, Clone)]
pub struct FrameStats {
    window_seconds: f32,
    accumulated: f32,
    frames: u32,
    frame_rate: f32,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl FrameStats {
    /// Create a counter that averages over `window_seconds`
    pub fn new(window_seconds: f32) -> Self {
        Self {
            window_seconds,
            accumulated: 0.0,
            frames: 0,
            frame_rate: 0.0,
        }
    }

    /// Record one frame; returns the new average when a window completes
    pub fn record(&mut self, delta_time: f32) -> Option<f32> {
        self.accumulated += delta_time;
        self.frames += 1;

        if self.accumulated < self.window_seconds {
            return None;
        }

        self.frame_rate = self.frames as f32 / self.accumulated;
        self.accumulated = 0.0;
        self.frames = 0;
        Some(self.frame_rate)
    }

    /// Last completed frame-rate average
    pub fn frame_rate(&self) -> f32 {
        self.frame_rate
    }
}
