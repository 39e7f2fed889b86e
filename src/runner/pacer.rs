//! @ai:module:intent Fixed delay between consecutive model calls
//! @ai:module:layer infrastructure
//! @ai:module:public_api RequestPacer, PacerTrait
//! @ai:module:stateless false

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// @ai:intent Trait for spacing out requests
pub trait PacerTrait: Send + Sync {
    /// @ai:intent Wait until the next request may start
    fn wait(&self) -> impl std::future::Future<Output = ()> + Send;

    /// @ai:intent Mark the end of a request
    fn complete(&self) -> impl std::future::Future<Output = ()> + Send;
}

/// @ai:intent Keeps at least `delay` between the end of one call and the start of the next
///
/// The first call never waits, so nothing sleeps after the final call.
pub struct RequestPacer {
    last_completed: Arc<Mutex<Option<Instant>>>,
    delay: Duration,
}

impl RequestPacer {
    /// @ai:intent Create a pacer; a zero delay disables pacing
    /// @ai:effects pure
    pub fn new(delay: Duration) -> Self {
        Self {
            last_completed: Arc::new(Mutex::new(None)),
            delay,
        }
    }

    /// @ai:intent Create a pacer from a delay in seconds, negatives treated as zero
    /// @ai:effects pure
    pub fn from_secs_f64(secs: f64) -> Self {
        let secs = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
        Self::new(Duration::from_secs_f64(secs))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl PacerTrait for RequestPacer {
    /// @ai:effects time
    async fn wait(&self) {
        if self.delay.is_zero() {
            return;
        }

        let remaining = {
            let last = self.last_completed.lock().await;
            last.map(|at| self.delay.saturating_sub(at.elapsed()))
        };

        if let Some(remaining) = remaining.filter(|r| !r.is_zero()) {
            tokio::time::sleep(remaining).await;
        }
    }

    /// @ai:effects state:write
    async fn complete(&self) {
        *self.last_completed.lock().await = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_call_does_not_wait() {
        let pacer = RequestPacer::new(Duration::from_millis(300));

        let start = Instant::now();
        pacer.wait().await;
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_waits_after_completed_call() {
        let pacer = RequestPacer::new(Duration::from_millis(100));

        pacer.wait().await;
        pacer.complete().await;

        let start = Instant::now();
        pacer.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(90));
    }

    #[tokio::test]
    async fn test_zero_delay_never_waits() {
        let pacer = RequestPacer::from_secs_f64(0.0);

        let start = Instant::now();
        for _ in 0..50 {
            pacer.wait().await;
            pacer.complete().await;
        }
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[test]
    fn test_negative_delay_is_zero() {
        assert!(RequestPacer::from_secs_f64(-1.0).delay().is_zero());
        assert!(RequestPacer::from_secs_f64(f64::NAN).delay().is_zero());
    }
}
