//! Processor module: the real-time block renderer.
//!
//! `SineProcessor::process` is the host callback body. It never allocates,
//! locks, logs or performs I/O. Everything that may do so (prepare, release)
//! runs outside the audio thread.

// IMPORTANT: Do not call assert_invariant or any PPT logging in RT paths to avoid locks/allocs.

use crate::atomic::AtomicF32;
use crate::config::{is_positive_finite, ConfigError, EngineConfig};
use crate::control::Controls;
use crate::invariant_rt::{
    new_invariant_queue, signal_invariant, INV_BLOCK_FILLED, INV_BLOCK_REJECTED,
    INV_FREQUENCY_APPLIED, INV_GAIN_SETTLED,
};
use crate::oscillator::Oscillator;
use crate::smoother::GainSmoother;
use log::{info, warn};
use rtrb::{Consumer, Producer};
use std::fmt;
use std::sync::Arc;

/// Errors from [`SineProcessor::prepare`]. The previous configuration is kept.
#[derive(Debug, Clone, PartialEq)]
pub enum PrepareError {
    /// Sample rate is zero, negative or not finite.
    InvalidSampleRate,
    /// Expected block size is zero.
    InvalidBlockSize,
    /// The published frequency yields no usable phase increment at this rate.
    InvalidFrequency,
}

impl fmt::Display for PrepareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrepareError::InvalidSampleRate => write!(f, "sample rate must be positive and finite"),
            PrepareError::InvalidBlockSize => write!(f, "block size must be non-zero"),
            PrepareError::InvalidFrequency => {
                write!(f, "frequency has no finite phase increment at this sample rate")
            }
        }
    }
}

impl std::error::Error for PrepareError {}

/// Errors from [`SineProcessor::process`]. Outputs are silenced and no
/// state advances.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessError {
    /// `process` was called before `prepare`, or after `release`.
    NotPrepared,
    /// An output slice holds fewer than `needed` samples.
    BufferTooShort {
        /// Samples requested.
        needed: usize,
        /// Length of the shortest output slice.
        available: usize,
    },
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::NotPrepared => write!(f, "processor is not prepared"),
            ProcessError::BufferTooShort { needed, available } => write!(
                f,
                "output buffer too short: needed {} samples, got {}",
                needed, available
            ),
        }
    }
}

impl std::error::Error for ProcessError {}

/// Stereo sine generator with smoothed gain.
///
/// Phase, phase increment and applied gain are owned here and only touched
/// from the thread calling `process`. Gain and frequency targets arrive
/// through [`Controls`].
pub struct SineProcessor {
    config: EngineConfig,
    oscillator: Oscillator,
    gain: GainSmoother,
    frequency: Arc<AtomicF32>,
    applied_frequency: f32,
    sample_rate: Option<f32>,
    max_block_size: usize,
    probe: Option<Producer<u8>>,
}

impl fmt::Debug for SineProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SineProcessor")
            .field("oscillator", &self.oscillator)
            .field("gain", &self.gain)
            .field("applied_frequency", &self.applied_frequency)
            .field("sample_rate", &self.sample_rate)
            .field("max_block_size", &self.max_block_size)
            .field("probe", &self.probe.is_some())
            .finish()
    }
}

impl SineProcessor {
    /// Create an unprepared processor from a validated config.
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config: config.clone(),
            oscillator: Oscillator::new(config.amplitude),
            gain: GainSmoother::new(config.gain),
            frequency: Arc::new(AtomicF32::new(config.frequency)),
            applied_frequency: config.frequency,
            sample_rate: None,
            max_block_size: config.max_block_size,
            probe: None,
        })
    }

    /// Create a processor that reports RT invariants through the returned consumer.
    pub fn with_probe(config: &EngineConfig) -> Result<(Self, Consumer<u8>), ConfigError> {
        let mut processor = Self::new(config)?;
        let (tx, rx) = new_invariant_queue();
        processor.probe = Some(tx);
        Ok((processor, rx))
    }

    /// Handle for control-domain actors.
    pub fn controls(&self) -> Controls {
        Controls::new(self.gain.target_handle(), Arc::clone(&self.frequency))
    }

    /// Apply a sample rate before processing. Call again on every sample-rate
    /// change; phase restarts at zero.
    pub fn prepare(&mut self, sample_rate: f32, max_block_size: usize) -> Result<(), PrepareError> {
        if !is_positive_finite(sample_rate) {
            warn!("Rejected prepare with sample rate {}", sample_rate);
            return Err(PrepareError::InvalidSampleRate);
        }
        if max_block_size == 0 {
            warn!("Rejected prepare with zero block size");
            return Err(PrepareError::InvalidBlockSize);
        }
        let frequency = self.frequency.load();
        let mut oscillator = self.oscillator.clone();
        if !oscillator.configure(sample_rate, frequency) {
            warn!(
                "Rejected prepare: frequency {} unusable at sample rate {}",
                frequency, sample_rate
            );
            return Err(PrepareError::InvalidFrequency);
        }
        self.oscillator = oscillator;
        self.applied_frequency = frequency;
        self.sample_rate = Some(sample_rate);
        self.max_block_size = max_block_size;

        info!(
            "Preparing to play audio: samples_per_block_expected = {}, sample_rate = {}",
            max_block_size, sample_rate
        );
        Ok(())
    }

    /// Prepare with the sample rate and block size from the construction config.
    pub fn prepare_from_config(&mut self) -> Result<(), PrepareError> {
        self.prepare(self.config.sample_rate, self.config.max_block_size)
    }

    /// Return to the unprepared state. Applied gain is kept.
    pub fn release(&mut self) {
        self.sample_rate = None;
        info!("Releasing audio resources");
    }

    /// Render `num_frames` frames, writing the same sample to both channels.
    ///
    /// `num_frames == 0` is a no-op. On error the first
    /// `min(num_frames, len)` samples of each output are zeroed.
    pub fn process(
        &mut self,
        num_frames: usize,
        left: &mut [f32],
        right: &mut [f32],
    ) -> Result<(), ProcessError> {
        if num_frames == 0 {
            return Ok(());
        }
        if let Err(e) = self.check_block(num_frames, left.len().min(right.len())) {
            silence(left, num_frames);
            silence(right, num_frames);
            self.signal(INV_BLOCK_REJECTED);
            return Err(e);
        }
        self.apply_frequency();

        for (l, r) in left[..num_frames].iter_mut().zip(&mut right[..num_frames]) {
            let sample = self.oscillator.next_sample();
            let gain = self.gain.advance();
            *l = gain * sample;
            *r = *l;
        }

        self.finish_block();
        Ok(())
    }

    /// Render into one interleaved `[L, R, L, R, ...]` buffer.
    pub fn process_interleaved(&mut self, num_frames: usize, out: &mut [f32]) -> Result<(), ProcessError> {
        if num_frames == 0 {
            return Ok(());
        }
        let needed = num_frames.saturating_mul(2);
        if let Err(e) = self.check_block(needed, out.len()) {
            silence(out, needed);
            self.signal(INV_BLOCK_REJECTED);
            return Err(e);
        }
        self.apply_frequency();

        for frame in out[..needed].chunks_exact_mut(2) {
            let sample = self.oscillator.next_sample();
            let gain = self.gain.advance();
            frame[0] = gain * sample;
            frame[1] = frame[0];
        }

        self.finish_block();
        Ok(())
    }

    /// Whether `prepare` has succeeded since construction or the last `release`.
    pub fn is_prepared(&self) -> bool {
        self.sample_rate.is_some()
    }

    /// Prepared sample rate.
    pub fn sample_rate(&self) -> Option<f32> {
        self.sample_rate
    }

    /// Largest block announced by the host.
    pub fn max_block_size(&self) -> usize {
        self.max_block_size
    }

    /// Gain applied to the most recent frame.
    pub fn current_gain(&self) -> f32 {
        self.gain.current()
    }

    /// Frequency the oscillator is currently running at.
    pub fn frequency(&self) -> f32 {
        self.applied_frequency
    }

    /// Read-only view of the oscillator.
    pub fn oscillator(&self) -> &Oscillator {
        &self.oscillator
    }

    /// Construction config.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    fn check_block(&self, needed: usize, available: usize) -> Result<(), ProcessError> {
        if self.sample_rate.is_none() {
            return Err(ProcessError::NotPrepared);
        }
        if available < needed {
            return Err(ProcessError::BufferTooShort { needed, available });
        }
        Ok(())
    }

    #[inline]
    fn apply_frequency(&mut self) {
        let requested = self.frequency.load();
        if requested != self.applied_frequency && self.oscillator.set_frequency(requested) {
            self.applied_frequency = requested;
            self.signal(INV_FREQUENCY_APPLIED);
        }
    }

    #[inline]
    fn finish_block(&mut self) {
        self.signal(INV_BLOCK_FILLED);
        if self.gain.is_settled() {
            self.signal(INV_GAIN_SETTLED);
        }
    }

    #[inline]
    fn signal(&mut self, id: u8) {
        if let Some(tx) = self.probe.as_mut() {
            signal_invariant(tx, id);
        }
    }
}

#[inline]
fn silence(out: &mut [f32], frames: usize) {
    let n = frames.min(out.len());
    out[..n].fill(0.0);
}

/// Run `process` with panic containment. Any error or panic leaves both
/// outputs silent.
pub fn process_safe(processor: &mut SineProcessor, num_frames: usize, left: &mut [f32], right: &mut [f32]) {
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        processor.process(num_frames, left, right)
    }));
    if !matches!(result, Ok(Ok(()))) {
        // Fail closed: silence output
        silence(left, num_frames);
        silence(right, num_frames);
    }
}
