//! Synthetic "thinking" delay before the assistant replies.
//! Purely cosmetic; tests swap in `NoDelay` so nothing sleeps.

use async_trait::async_trait;
use rand_core::{OsRng, RngCore};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_MIN_DELAY_MS: u64 = 600;
pub const DEFAULT_MAX_DELAY_MS: u64 = 1400;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayError {
    #[error("Delay range [{min_ms}, {max_ms}) is empty")]
    EmptyRange { min_ms: u64, max_ms: u64 },
}

#[async_trait]
pub trait DelayStrategy: Send + Sync {
    fn next_delay(&self) -> Duration;

    async fn wait(&self) {
        let delay = self.next_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Uniform delay in `[min_ms, max_ms)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomDelay {
    min_ms: u64,
    max_ms: u64,
}

impl Default for RandomDelay {
    fn default() -> Self {
        Self {
            min_ms: DEFAULT_MIN_DELAY_MS,
            max_ms: DEFAULT_MAX_DELAY_MS,
        }
    }
}

impl RandomDelay {
    pub fn new(min_ms: u64, max_ms: u64) -> Result<Self, DelayError> {
        if min_ms >= max_ms {
            return Err(DelayError::EmptyRange { min_ms, max_ms });
        }
        Ok(Self { min_ms, max_ms })
    }

    pub fn bounds(&self) -> (u64, u64) {
        (self.min_ms, self.max_ms)
    }

    pub fn sample_ms<R: RngCore + ?Sized>(&self, rng: &mut R) -> u64 {
        self.min_ms + rng.next_u64() % (self.max_ms - self.min_ms)
    }
}

impl DelayStrategy for RandomDelay {
    fn next_delay(&self) -> Duration {
        Duration::from_millis(self.sample_ms(&mut OsRng))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay(pub Duration);

impl DelayStrategy for FixedDelay {
    fn next_delay(&self) -> Duration {
        self.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoDelay;

impl DelayStrategy for NoDelay {
    fn next_delay(&self) -> Duration {
        Duration::ZERO
    }
}
