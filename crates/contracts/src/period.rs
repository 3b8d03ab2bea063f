//! SamplingPeriod - timer period derived from an operator frequency

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::ContractError;

/// Timer period split into whole seconds and a nanosecond remainder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplingPeriod {
    /// Whole seconds
    pub seconds: u64,
    /// Nanosecond remainder, always `< 1_000_000_000`
    pub nanoseconds: u32,
}

impl SamplingPeriod {
    /// Longest accepted period, one year
    pub const MAX_SECONDS: u64 = 365 * 24 * 60 * 60;

    /// Compute the period for `frequency_hz`
    ///
    /// `1 / frequency` is split into its integral and fractional parts; the
    /// fractional part is scaled to nanoseconds and truncated.
    ///
    /// # Errors
    /// Non-finite or non-positive frequencies, frequencies so low that the
    /// period exceeds [`Self::MAX_SECONDS`], and frequencies so high that the
    /// truncated period is zero.
    pub fn from_frequency(frequency_hz: f64) -> Result<Self, ContractError> {
        if !frequency_hz.is_finite() || frequency_hz <= 0.0 {
            return Err(ContractError::timer(format!(
                "frequency must be a finite value > 0, got {frequency_hz}"
            )));
        }

        let period = 1.0 / frequency_hz;
        if !period.is_finite() || period > Self::MAX_SECONDS as f64 {
            return Err(ContractError::timer(format!(
                "period for {frequency_hz} Hz is out of range"
            )));
        }

        let whole = period.trunc();
        let nanoseconds = ((period - whole) * 1e9) as u32;
        let result = Self {
            seconds: whole as u64,
            nanoseconds: nanoseconds.min(999_999_999),
        };

        if result.is_zero() {
            return Err(ContractError::timer(format!(
                "frequency {frequency_hz} Hz yields a zero period"
            )));
        }

        Ok(result)
    }

    /// True when both parts are zero
    pub fn is_zero(&self) -> bool {
        self.seconds == 0 && self.nanoseconds == 0
    }

    /// Period as a [`Duration`]
    pub fn as_duration(&self) -> Duration {
        Duration::new(self.seconds, self.nanoseconds)
    }
}

impl fmt::Display for SamplingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} sec + {} nsec", self.seconds, self.nanoseconds)
    }
}
