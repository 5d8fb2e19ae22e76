// Drives the effect's shared progress value from 0.0 to 1.0 over a fixed duration.
// Visual: progress feeds the coarse sideways slide of every speck.

use std::time::{Duration, Instant};

pub struct Ticker {
    duration: Duration,
    started: Instant,
    last: f32,
    stopped: bool,
}

impl Ticker {
    /// Starts counting immediately at `now`.
    pub fn start(duration: Duration, now: Instant) -> Self {
        Self { duration, started: now, last: 0.0, stopped: false }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Progress for a given elapsed time, clamped to [0,1].
    pub fn progress_at(&self, elapsed: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Next progress value, or None once the run is over (or stopped).
    /// The final 1.0 is delivered exactly once; values never go backwards.
    pub fn poll(&mut self, now: Instant) -> Option<f32> {
        if self.stopped {
            return None;
        }
        let progress = self.progress_at(now.saturating_duration_since(self.started)).max(self.last);
        self.last = progress;
        if progress >= 1.0 {
            self.stopped = true;
        }
        Some(progress)
    }

    /// Detach: no further ticks are delivered.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_running(&self) -> bool {
        !self.stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_runs_from_zero_to_one_then_stops() {
        let t0 = Instant::now();
        let mut ticker = Ticker::start(Duration::from_secs(10), t0);
        assert_eq!(ticker.poll(t0), Some(0.0));
        assert_eq!(ticker.poll(t0 + Duration::from_secs(5)), Some(0.5));
        assert_eq!(ticker.poll(t0 + Duration::from_secs(12)), Some(1.0));
        assert!(!ticker.is_running());
        assert_eq!(ticker.poll(t0 + Duration::from_secs(13)), None);
    }

    #[test]
    fn progress_never_goes_backwards() {
        let t0 = Instant::now();
        let mut ticker = Ticker::start(Duration::from_secs(10), t0);
        assert_eq!(ticker.poll(t0 + Duration::from_secs(4)), Some(0.4));
        assert_eq!(ticker.poll(t0 + Duration::from_secs(2)), Some(0.4));
    }

    #[test]
    fn stopped_ticker_delivers_nothing() {
        let t0 = Instant::now();
        let mut ticker = Ticker::start(Duration::from_secs(10), t0);
        ticker.stop();
        assert_eq!(ticker.poll(t0 + Duration::from_secs(1)), None);
    }
}
