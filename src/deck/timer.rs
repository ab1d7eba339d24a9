/// Elapsed lecture time, ticked once per second up to the lecture length.
#[derive(Debug, Clone)]
pub struct LectureTimer {
    elapsed: u32,
    ceiling: u32,
}

impl LectureTimer {
    pub fn new(duration_minutes: u32) -> Self {
        Self {
            elapsed: 0,
            ceiling: duration_minutes.saturating_mul(60),
        }
    }

    /// Advances one second. Returns false once the ceiling is reached and
    /// the timer has stopped.
    pub fn tick(&mut self) -> bool {
        if self.elapsed >= self.ceiling {
            return false;
        }
        self.elapsed += 1;
        true
    }

    /// Applies `seconds` ticks, stopping early at the ceiling.
    pub fn advance(&mut self, seconds: u64) {
        for _ in 0..seconds {
            if !self.tick() {
                break;
            }
        }
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.ceiling
    }

    /// `MM:SS`
    pub fn format(&self) -> String {
        format!("{:02}:{:02}", self.elapsed / 60, self.elapsed % 60)
    }

    pub fn progress_percent(&self) -> f64 {
        if self.ceiling == 0 {
            return 100.0;
        }
        (f64::from(self.elapsed) / f64::from(self.ceiling) * 100.0).min(100.0)
    }
}
