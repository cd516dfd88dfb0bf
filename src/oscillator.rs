//! Oscillator: phase-accumulating sine source.

// IMPORTANT: Do not call assert_invariant or any PPT logging here; next_sample runs on the RT thread.

#![forbid(unsafe_code)]

use std::f32::consts::TAU;

/// Output amplitude of the reference tone.
pub const DEFAULT_AMPLITUDE: f32 = 0.5;

/// Add `addend` to `value` and fold the result back into `[0, limit)`.
///
/// Uses repeated subtraction for the common case. An addend large enough to
/// overshoot by more than one period falls back to `rem_euclid`, so a
/// pathological increment can never spin the loop.
#[inline]
fn wrapping_add(value: &mut f32, addend: f32, limit: f32) {
    *value += addend;
    if *value >= 2.0 * limit {
        *value = value.rem_euclid(limit);
    }
    while *value >= limit {
        *value -= limit;
    }
}

/// Sine oscillator with a phase accumulator kept in `[0, 2π)`.
#[derive(Debug, Clone)]
pub struct Oscillator {
    phase: f32,
    phase_increment: f32,
    amplitude: f32,
    frequency: f32,
    sample_rate: f32,
}

impl Oscillator {
    /// Create an unconfigured oscillator. It yields silence until
    /// [`configure`](Self::configure) succeeds.
    pub fn new(amplitude: f32) -> Self {
        Self {
            phase: 0.0,
            phase_increment: 0.0,
            amplitude,
            frequency: 0.0,
            sample_rate: 0.0,
        }
    }

    /// Set sample rate and frequency, recompute the increment and reset phase.
    ///
    /// Returns `false` and keeps the previous configuration when either value
    /// is non-positive or non-finite, or the resulting increment is not finite.
    pub fn configure(&mut self, sample_rate: f32, frequency: f32) -> bool {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return false;
        }
        let Some(increment) = increment_for(frequency, sample_rate) else {
            return false;
        };
        self.sample_rate = sample_rate;
        self.frequency = frequency;
        self.phase_increment = increment;
        self.phase = 0.0;
        true
    }

    /// Retune without touching phase, keeping the waveform continuous.
    ///
    /// Has no effect on an unconfigured oscillator or for an invalid frequency.
    pub fn set_frequency(&mut self, frequency: f32) -> bool {
        if !self.is_configured() {
            return false;
        }
        match increment_for(frequency, self.sample_rate) {
            Some(increment) => {
                self.frequency = frequency;
                self.phase_increment = increment;
                true
            }
            None => false,
        }
    }

    /// Produce one sample and advance the phase.
    ///
    /// Call exactly once per output frame.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let sample = self.amplitude * self.phase.sin();
        if self.phase_increment > 0.0 {
            wrapping_add(&mut self.phase, self.phase_increment, TAU);
        }
        sample
    }

    /// Rewind phase to zero.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Whether a sample rate has been applied.
    pub fn is_configured(&self) -> bool {
        self.sample_rate > 0.0
    }

    /// Current phase in radians.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Radians advanced per sample.
    pub fn phase_increment(&self) -> f32 {
        self.phase_increment
    }

    /// Frequency in Hz.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Sample rate in Hz, zero while unconfigured.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Peak output level.
    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }
}

impl Default for Oscillator {
    fn default() -> Self {
        Self::new(DEFAULT_AMPLITUDE)
    }
}

// period T = 1/f, one sample lasts 1/sample_rate, so the increment is 2π·f/sample_rate
fn increment_for(frequency: f32, sample_rate: f32) -> Option<f32> {
    if !(frequency.is_finite() && frequency > 0.0) {
        return None;
    }
    let increment = TAU * frequency / sample_rate;
    (increment.is_finite() && increment > 0.0).then_some(increment)
}
