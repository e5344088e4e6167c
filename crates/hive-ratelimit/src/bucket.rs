use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::error::RateLimitError;

const WINDOW: Duration = Duration::from_secs(60);

struct Window {
    rpm_limit: u32,
    window_start: Instant,
    used_in_window: u32,
}

impl Window {
    fn new(rpm_limit: u32) -> Self {
        Self {
            rpm_limit,
            window_start: Instant::now(),
            used_in_window: 0,
        }
    }

    /// Advance the window if 60s have elapsed, resetting the counter.
    /// `window_start` always moves forward in multiples of `WINDOW`,
    /// matching `spec.md` §3's invariant.
    fn advance(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed >= WINDOW {
            let windows_elapsed = elapsed.as_secs() / WINDOW.as_secs();
            self.window_start += WINDOW * u32::try_from(windows_elapsed).unwrap_or(u32::MAX);
            self.used_in_window = 0;
        }
    }

    fn can_proceed(&mut self, now: Instant) -> bool {
        self.advance(now);
        self.used_in_window < self.rpm_limit
    }

    fn record(&mut self, now: Instant) {
        self.advance(now);
        self.used_in_window += 1;
    }

    fn time_until_reset(&self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.window_start);
        WINDOW.saturating_sub(elapsed)
    }
}

/// A single backend's rate-limit bucket: one window-reset counter behind
/// a `tokio::sync::Mutex`, giving the single-writer discipline `spec.md`
/// §4.2/§5 requires (one mutex per backend, operations serialized).
pub struct RateLimitBucket {
    window: Mutex<Window>,
}

impl RateLimitBucket {
    /// Build a bucket for a backend with the given requests-per-60s limit.
    ///
    /// # Errors
    ///
    /// Returns an error if `rpm_limit` is zero.
    pub fn new(rpm_limit: u32) -> Result<Self, RateLimitError> {
        if rpm_limit == 0 {
            return Err(RateLimitError::Config("rpm_limit must be greater than 0".to_owned()));
        }
        Ok(Self {
            window: Mutex::new(Window::new(rpm_limit)),
        })
    }

    /// Take one unit of capacity, sleeping until the window resets if the
    /// backend is currently exhausted.
    pub async fn acquire(&self) {
        loop {
            let sleep_for = {
                let mut window = self.window.lock().await;
                let now = Instant::now();
                if window.can_proceed(now) {
                    window.record(now);
                    return;
                }
                window.time_until_reset(now)
            };
            tokio::time::sleep(sleep_for).await;
        }
    }

    /// Take one unit of capacity if immediately available; otherwise
    /// return `Exceeded` without blocking (the `no_wait` contract in
    /// `spec.md` §5).
    ///
    /// # Errors
    ///
    /// Returns `RateLimitError::Exceeded` if the window is exhausted.
    pub async fn try_acquire(&self) -> Result<(), RateLimitError> {
        let mut window = self.window.lock().await;
        let now = Instant::now();
        if window.can_proceed(now) {
            window.record(now);
            return Ok(());
        }
        let retry_after = window.time_until_reset(now).as_secs().max(1);
        Err(RateLimitError::Exceeded { retry_after })
    }

    /// Current `used_in_window` count, for telemetry/tests.
    pub async fn used_in_window(&self) -> u32 {
        let mut window = self.window.lock().await;
        window.advance(Instant::now());
        window.used_in_window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn acquire_under_limit_does_not_block() {
        let bucket = RateLimitBucket::new(5).unwrap();
        let start = Instant::now();
        for _ in 0..5 {
            bucket.acquire().await;
        }
        assert!(start.elapsed() < Duration::from_millis(50));
        assert_eq!(bucket.used_in_window().await, 5);
    }

    #[tokio::test]
    async fn try_acquire_reports_exceeded_once_exhausted() {
        let bucket = RateLimitBucket::new(1).unwrap();
        bucket.try_acquire().await.unwrap();
        let err = bucket.try_acquire().await.unwrap_err();
        assert!(matches!(err, RateLimitError::Exceeded { retry_after } if retry_after > 0));
    }

    #[test]
    fn zero_rpm_limit_rejected() {
        assert!(RateLimitBucket::new(0).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn window_resets_after_sixty_seconds() {
        let bucket = RateLimitBucket::new(1).unwrap();
        bucket.try_acquire().await.unwrap();
        assert!(bucket.try_acquire().await.is_err());

        tokio::time::advance(Duration::from_secs(61)).await;

        bucket.try_acquire().await.unwrap();
    }
}
