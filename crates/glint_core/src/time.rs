use std::time::{Duration, Instant};

pub struct Time {
    startup: Instant,
    last_update: Instant,
    delta: Duration,
}

impl Default for Time {
    fn default() -> Self {
        Self {
            startup: Instant::now(),
            last_update: Instant::now(),
            delta: Duration::ZERO,
        }
    }
}

impl Time {
    /// Called by the frame loop once per frame
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta = now - self.last_update;
        self.last_update = now;
    }

    /// Returns time in seconds since last frame (e.g., 0.016 for 60fps)
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Returns total time since app started; drives the cube's time uniform
    pub fn elapsed_seconds(&self) -> f32 {
        self.startup.elapsed().as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_is_zero_before_the_first_update() {
        let time = Time::default();
        assert_eq!(time.delta_seconds(), 0.0);
    }

    #[test]
    fn elapsed_never_decreases() {
        let mut time = Time::default();
        let first = time.elapsed_seconds();
        time.update();
        let second = time.elapsed_seconds();
        assert!(second >= first);
        assert!(time.delta_seconds() >= 0.0);
    }
}
