//! Rate limiter initialization.
//!
//! This module provides a token-bucket rate limiter for controlling request rate.

use std::sync::Arc;

use tokio::sync::Semaphore as TokioSemaphore;
use tokio::time::{interval, Duration as TokioDuration};
use tokio_util::sync::CancellationToken;

/// Token-bucket rate limiter for controlling request rate.
///
/// Tokens are replenished at a fixed rate (tokens per second) up to the bucket
/// capacity. Each acquired token is consumed for good; callers block while the
/// bucket is empty.
///
/// # Behavior
///
/// - The bucket starts full, allowing an initial burst of `capacity` tokens
/// - Replenishment runs on a background task that stops when the limiter is
///   shut down or dropped
/// - Requests for more tokens than the capacity are served in capacity-sized chunks
pub struct RateLimiter {
    permits: Arc<TokioSemaphore>,
    capacity: usize,
    rps: u32,
    shutdown: CancellationToken,
}

impl RateLimiter {
    /// Waits for one token.
    pub async fn acquire(&self) {
        self.acquire_many(1).await;
    }

    /// Waits for `count` tokens.
    pub async fn acquire_many(&self, count: usize) {
        let mut remaining = count;
        while remaining > 0 {
            let chunk = remaining.min(self.capacity);
            let chunk_permits = u32::try_from(chunk).unwrap_or(u32::MAX);
            match self.permits.acquire_many(chunk_permits).await {
                Ok(permit) => permit.forget(),
                // Closed semaphore: nothing left to wait for
                Err(_) => return,
            }
            remaining -= chunk;
        }
    }

    /// Tokens currently available without waiting.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Maximum number of tokens the bucket holds.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Replenishment rate in tokens per second.
    pub fn rps(&self) -> u32 {
        self.rps
    }

    /// Stops token replenishment and closes the bucket.
    ///
    /// Pending and later acquisitions return immediately instead of waiting
    /// for tokens that will never arrive.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
        self.permits.close();
    }
}

impl Drop for RateLimiter {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Initializes a token-bucket rate limiter.
///
/// If `rps` is 0, rate limiting is disabled and `None` is returned. A `burst`
/// of 0 defaults the capacity to `rps`.
///
/// Must be called from within a Tokio runtime: the replenishment task is
/// spawned immediately.
pub fn init_rate_limiter(rps: u32, burst: usize) -> Option<RateLimiter> {
    if rps == 0 {
        return None;
    }
    let capacity = if burst == 0 { rps as usize } else { burst };
    let shutdown = CancellationToken::new();
    let shutdown_clone = shutdown.clone();

    let permits = Arc::new(TokioSemaphore::new(capacity));
    let limiter = RateLimiter {
        permits: Arc::clone(&permits),
        capacity,
        rps,
        shutdown,
    };

    // Fast ticker (every 100ms); the number of tokens added follows elapsed time
    let mut ticker = interval(TokioDuration::from_millis(100));
    tokio::spawn(async move {
        let mut last_time = tokio::time::Instant::now();
        let mut fractional_permits = 0.0f64;
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let now = tokio::time::Instant::now();
                    let elapsed = now.duration_since(last_time);
                    last_time = now;

                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    let permits_to_add_f64 = f64::from(rps) * elapsed.as_secs_f64() + fractional_permits;
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    let permits_to_add = permits_to_add_f64 as usize;
                    #[allow(clippy::cast_precision_loss)]
                    {
                        fractional_permits = permits_to_add_f64 - permits_to_add as f64;
                    }

                    // Never fill past capacity
                    let room = capacity.saturating_sub(permits.available_permits());
                    let to_add = permits_to_add.min(room);
                    if to_add > 0 {
                        permits.add_permits(to_add);
                    }
                    if room == 0 {
                        fractional_permits = 0.0;
                    }
                }
                _ = shutdown_clone.cancelled() => {
                    log::debug!("Rate limiter background task shutting down");
                    break;
                }
            }
        }
    });

    Some(limiter)
}
