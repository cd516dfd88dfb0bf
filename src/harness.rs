//! RT Proof Harness: drive a processor like a host would and measure the output.

use crate::config::EngineConfig;
use crate::processor::{process_safe, PrepareError, SineProcessor};
use crate::control::Controls;

/// Host stand-in owning preallocated output buffers.
pub struct RtHarness {
    processor: SineProcessor,
    left: Vec<f32>,
    right: Vec<f32>,
    frames_rendered: u64,
}

impl RtHarness {
    /// Build and prepare a processor from `config`.
    ///
    /// # Panics
    /// Panics if `config` is invalid.
    pub fn new(config: &EngineConfig) -> Self {
        let mut processor = SineProcessor::new(config).expect("harness config must be valid");
        processor
            .prepare_from_config()
            .expect("harness config must prepare");
        let block = config.max_block_size;
        Self {
            processor,
            left: vec![0.0; block],
            right: vec![0.0; block],
            frames_rendered: 0,
        }
    }

    /// Control handle for the wrapped processor.
    pub fn controls(&self) -> Controls {
        self.processor.controls()
    }

    /// Render one block of `frames` (capped at the buffer size) with panic containment.
    pub fn run_block(&mut self, frames: usize) -> (&[f32], &[f32]) {
        let frames = frames.min(self.left.len());
        process_safe(&mut self.processor, frames, &mut self.left, &mut self.right);
        self.frames_rendered += frames as u64;
        (&self.left[..frames], &self.right[..frames])
    }

    /// Re-prepare at a new sample rate, keeping the buffer size.
    pub fn change_sample_rate(&mut self, sample_rate: f32) -> Result<(), PrepareError> {
        self.processor.prepare(sample_rate, self.left.len())
    }

    /// Total frames rendered so far.
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// The wrapped processor.
    pub fn processor(&self) -> &SineProcessor {
        &self.processor
    }
}

/// Count sign changes, treating exact zero as non-negative.
pub fn zero_crossings(samples: &[f32]) -> usize {
    samples
        .windows(2)
        .filter(|w| (w[0] < 0.0) != (w[1] < 0.0))
        .count()
}
