//! Engine configuration established before processing starts.

use crate::invariant_ppt::{assert_invariant, CONFIG_REJECTS_INVALID, CONFIG_VALID};
use crate::oscillator::DEFAULT_AMPLITUDE;
use crate::params;
use std::fmt;

/// Construction-time settings for a [`SineProcessor`](crate::processor::SineProcessor).
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Sample rate in Hz used by offline rendering and the harness.
    pub sample_rate: f32,
    /// Largest block the host will request.
    pub max_block_size: usize,
    /// Initial tone frequency in Hz.
    pub frequency: f32,
    /// Initial published gain target. The applied gain always starts at 0.
    pub gain: f32,
    /// Oscillator peak level before gain.
    pub amplitude: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            max_block_size: 512,
            frequency: params::FREQUENCY.default,
            gain: 0.0,
            amplitude: DEFAULT_AMPLITUDE,
        }
    }
}

/// Errors from validating an [`EngineConfig`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Sample rate is zero, negative or not finite.
    InvalidSampleRate,
    /// Block size is zero.
    InvalidBlockSize,
    /// Frequency is zero, negative or not finite.
    InvalidFrequency,
    /// Gain lies outside the gain parameter range or is NaN.
    InvalidGain,
    /// Amplitude is negative or not finite.
    InvalidAmplitude,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSampleRate => write!(f, "sample rate must be positive and finite"),
            ConfigError::InvalidBlockSize => write!(f, "block size must be non-zero"),
            ConfigError::InvalidFrequency => write!(f, "frequency must be positive and finite"),
            ConfigError::InvalidGain => write!(
                f,
                "gain must lie in [{}, {}]",
                params::GAIN.min,
                params::GAIN.max
            ),
            ConfigError::InvalidAmplitude => write!(f, "amplitude must be non-negative and finite"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl EngineConfig {
    /// Config with a given sample rate, everything else default.
    pub fn with_sample_rate(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            ..Self::default()
        }
    }

    /// Check every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let result = self.check();
        if let Err(ref e) = result {
            assert_invariant(
                CONFIG_REJECTS_INVALID,
                true,
                "Invalid engine config rejected",
                Some(&e.to_string()),
            );
            return result;
        }
        assert_invariant(
            CONFIG_VALID,
            self.sample_rate > 0.0 && self.max_block_size > 0 && self.frequency > 0.0,
            "Validated config has positive rate, block size and frequency",
            Some("validate"),
        );
        Ok(())
    }

    fn check(&self) -> Result<(), ConfigError> {
        if !is_positive_finite(self.sample_rate) {
            return Err(ConfigError::InvalidSampleRate);
        }
        if self.max_block_size == 0 {
            return Err(ConfigError::InvalidBlockSize);
        }
        if !is_positive_finite(self.frequency) {
            return Err(ConfigError::InvalidFrequency);
        }
        if !params::GAIN.contains(self.gain) {
            return Err(ConfigError::InvalidGain);
        }
        if !(self.amplitude.is_finite() && self.amplitude >= 0.0) {
            return Err(ConfigError::InvalidAmplitude);
        }
        Ok(())
    }
}

pub(crate) fn is_positive_finite(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.frequency, 220.0);
        assert_eq!(config.gain, 0.0);
        assert_eq!(config.amplitude, 0.5);
    }

    #[test]
    fn rejects_bad_fields() {
        let bad = EngineConfig::with_sample_rate(0.0);
        assert_eq!(bad.validate(), Err(ConfigError::InvalidSampleRate));

        let bad = EngineConfig {
            max_block_size: 0,
            ..EngineConfig::default()
        };
        assert_eq!(bad.validate(), Err(ConfigError::InvalidBlockSize));

        let bad = EngineConfig {
            frequency: f32::NAN,
            ..EngineConfig::default()
        };
        assert_eq!(bad.validate(), Err(ConfigError::InvalidFrequency));

        let bad = EngineConfig {
            gain: 1.5,
            ..EngineConfig::default()
        };
        assert_eq!(bad.validate(), Err(ConfigError::InvalidGain));

        let bad = EngineConfig {
            amplitude: -0.1,
            ..EngineConfig::default()
        };
        assert_eq!(bad.validate(), Err(ConfigError::InvalidAmplitude));
    }

    #[test]
    fn error_messages_are_readable() {
        assert_eq!(
            ConfigError::InvalidGain.to_string(),
            "gain must lie in [0, 1]"
        );
    }
}
