//! Control surface for non-RT actors (UI handlers, automation).
//!
//! A [`Controls`] handle publishes gain and frequency targets into single-slot
//! atomics that the RT callback reads. Every setter is one relaxed store:
//! no queue, no lock, no allocation. Only the latest value matters, so a
//! burst of updates between two blocks collapses into the last one.

#![forbid(unsafe_code)]

use crate::atomic::AtomicF32;
use crate::config::is_positive_finite;
use crate::params;
use crate::smoother::GainTarget;
use log::warn;
use std::fmt;
use std::sync::Arc;

/// Errors returned to control-domain callers.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlError {
    /// Value is NaN or infinite.
    NotFinite,
    /// Frequency is zero or negative.
    NonPositiveFrequency,
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlError::NotFinite => write!(f, "control value must be finite"),
            ControlError::NonPositiveFrequency => write!(f, "frequency must be positive"),
        }
    }
}

impl std::error::Error for ControlError {}

/// Cloneable, `Send + Sync` handle onto a processor's published targets.
#[derive(Debug, Clone)]
pub struct Controls {
    gain: GainTarget,
    frequency: Arc<AtomicF32>,
}

impl Controls {
    pub(crate) fn new(gain: GainTarget, frequency: Arc<AtomicF32>) -> Self {
        Self { gain, frequency }
    }

    /// Publish a new gain target, clamped into the gain parameter range.
    ///
    /// Returns the value actually published.
    pub fn set_gain_target(&self, gain: f32) -> Result<f32, ControlError> {
        if gain.is_nan() {
            warn!("Rejected NaN gain target");
            return Err(ControlError::NotFinite);
        }
        let clamped = params::GAIN.clamp(gain);
        self.gain.set(clamped);
        Ok(clamped)
    }

    /// Restore the gain parameter default.
    pub fn reset_gain(&self) {
        self.gain.set(params::GAIN.default);
    }

    /// Publish a new frequency. The processor picks it up at the next block
    /// boundary without resetting phase.
    pub fn set_frequency(&self, hz: f32) -> Result<(), ControlError> {
        if !hz.is_finite() {
            warn!("Rejected non-finite frequency {}", hz);
            return Err(ControlError::NotFinite);
        }
        if !is_positive_finite(hz) {
            warn!("Rejected non-positive frequency {}", hz);
            return Err(ControlError::NonPositiveFrequency);
        }
        self.frequency.store(hz);
        Ok(())
    }

    /// Latest published gain target.
    pub fn gain_target(&self) -> f32 {
        self.gain.get()
    }

    /// Latest published frequency.
    pub fn frequency(&self) -> f32 {
        self.frequency.load()
    }
}
