use crate::utils::error::{CheckError, Result};
use rand::Rng;
use std::time::Duration;

pub const DEFAULT_MIN_DELAY: Duration = Duration::from_secs(5);
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(10);

/// 每次查詢前的隨機等待區間，避免觸發遠端的濫用偵測
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingPolicy {
    min_delay: Duration,
    max_delay: Duration,
}

impl PacingPolicy {
    pub fn new(min_delay: Duration, max_delay: Duration) -> Result<Self> {
        if min_delay > max_delay {
            return Err(CheckError::InvalidConfigValueError {
                field: "pacing".to_string(),
                value: format!("{:?}..{:?}", min_delay, max_delay),
                reason: "min delay must not exceed max delay".to_string(),
            });
        }
        Ok(Self {
            min_delay,
            max_delay,
        })
    }

    /// 不等待，給測試用
    pub fn none() -> Self {
        Self {
            min_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    pub fn min_delay(&self) -> Duration {
        self.min_delay
    }

    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }

    pub fn is_disabled(&self) -> bool {
        self.max_delay.is_zero()
    }

    pub fn next_delay(&self) -> Duration {
        self.next_delay_with(&mut rand::thread_rng())
    }

    pub fn next_delay_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.min_delay == self.max_delay {
            return self.min_delay;
        }
        let secs = rng.gen_range(self.min_delay.as_secs_f64()..=self.max_delay.as_secs_f64());
        Duration::from_secs_f64(secs)
    }
}

impl Default for PacingPolicy {
    fn default() -> Self {
        Self {
            min_delay: DEFAULT_MIN_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
        }
    }
}
