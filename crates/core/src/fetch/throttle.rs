use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Shared minimum-interval gate in front of every outbound call of one client.
///
/// The mutex stays held while waiting, so callers pass the gate one at a time
/// and no two calls are ever released closer than `min_interval` apart.
#[derive(Debug)]
pub struct ThrottleGate {
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl ThrottleGate {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: Mutex::new(None),
        }
    }

    /// Waits out the rest of the interval, then stamps the call time.
    pub async fn acquire(&self) {
        let mut last_call = self.last_call.lock().await;
        if let Some(last) = *last_call {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                tracing::debug!(?wait, "throttle gate delaying request");
                tokio::time::sleep(wait).await;
            }
        }
        *last_call = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_call_passes_immediately() {
        let gate = ThrottleGate::new(Duration::from_millis(1000));
        let start = Instant::now();
        gate.acquire().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn back_to_back_calls_are_spaced() {
        let gate = ThrottleGate::new(Duration::from_millis(1000));
        gate.acquire().await;
        let first = Instant::now();
        gate.acquire().await;
        assert!(first.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn waits_only_for_the_remainder() {
        let gate = ThrottleGate::new(Duration::from_millis(1000));
        gate.acquire().await;
        tokio::time::sleep(Duration::from_millis(700)).await;

        let before = Instant::now();
        gate.acquire().await;
        let waited = before.elapsed();
        assert!(waited >= Duration::from_millis(300));
        assert!(waited < Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_callers_are_serialized() {
        let gate = ThrottleGate::new(Duration::from_millis(1000));
        let gate = &gate;
        let stamp = move || async move {
            gate.acquire().await;
            Instant::now()
        };

        let (a, b, c) = tokio::join!(stamp(), stamp(), stamp());
        let mut released = vec![a, b, c];
        released.sort();
        for pair in released.windows(2) {
            assert!(pair[1].duration_since(pair[0]) >= Duration::from_millis(1000));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn no_wait_after_interval_has_passed() {
        let gate = ThrottleGate::new(Duration::from_millis(1000));
        gate.acquire().await;
        tokio::time::sleep(Duration::from_millis(1500)).await;

        let before = Instant::now();
        gate.acquire().await;
        assert_eq!(before.elapsed(), Duration::ZERO);
    }
}
