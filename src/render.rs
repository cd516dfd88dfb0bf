//! Offline rendering and WAV export.

use crate::invariant_ppt::{
    assert_invariant, RENDER_BLOCK_BOUNDED, RENDER_LENGTH_EXACT, WAV_STEREO_LAYOUT,
};
use crate::processor::{PrepareError, ProcessError, SineProcessor};
use log::debug;
use std::fmt;
use std::path::Path;

/// Planar stereo audio produced by [`render_offline`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StereoBuffer {
    /// Left channel samples.
    pub left: Vec<f32>,
    /// Right channel samples.
    pub right: Vec<f32>,
}

impl StereoBuffer {
    /// Zeroed buffer of `frames` frames.
    pub fn silent(frames: usize) -> Self {
        Self {
            left: vec![0.0; frames],
            right: vec![0.0; frames],
        }
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// Whether the buffer holds no frames.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Largest absolute sample across both channels.
    pub fn peak(&self) -> f32 {
        self.left
            .iter()
            .chain(&self.right)
            .fold(0.0f32, |acc, &s| acc.max(s.abs()))
    }
}

/// Errors from offline rendering or export.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// Preparing the processor failed.
    Prepare(PrepareError),
    /// A block failed to render.
    Process(ProcessError),
    /// Writing the WAV file failed.
    Wav(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Prepare(e) => write!(f, "prepare failed: {}", e),
            RenderError::Process(e) => write!(f, "render failed: {}", e),
            RenderError::Wav(msg) => write!(f, "wav export failed: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<PrepareError> for RenderError {
    fn from(e: PrepareError) -> Self {
        RenderError::Prepare(e)
    }
}

impl From<ProcessError> for RenderError {
    fn from(e: ProcessError) -> Self {
        RenderError::Process(e)
    }
}

impl From<hound::Error> for RenderError {
    fn from(e: hound::Error) -> Self {
        RenderError::Wav(e.to_string())
    }
}

/// Render `frames` frames in blocks of at most `max_block_size`.
///
/// Prepares the processor from its config first if it is not prepared yet.
/// The final block may be partial.
pub fn render_offline(processor: &mut SineProcessor, frames: usize) -> Result<StereoBuffer, RenderError> {
    if !processor.is_prepared() {
        processor.prepare_from_config()?;
    }
    let block_size = processor.max_block_size();
    let mut output = StereoBuffer::silent(frames);
    let mut offset = 0;
    while offset < frames {
        let end = (offset + block_size).min(frames);
        let block_len = end - offset;
        assert_invariant(
            RENDER_BLOCK_BOUNDED,
            block_len > 0 && block_len <= block_size,
            "Offline block within host block size",
            Some("render_offline"),
        );
        processor.process(
            block_len,
            &mut output.left[offset..end],
            &mut output.right[offset..end],
        )?;
        offset = end;
    }
    assert_invariant(
        RENDER_LENGTH_EXACT,
        output.left.len() == frames && output.right.len() == frames,
        "Rendered exactly the requested frames",
        Some("render_offline"),
    );
    debug!("Rendered {} frames in blocks of {}", frames, block_size);
    Ok(output)
}

/// Write `buffer` as a 2-channel 32-bit float WAV file.
pub fn write_wav<P: AsRef<Path>>(path: P, buffer: &StereoBuffer, sample_rate: u32) -> Result<(), RenderError> {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    assert_invariant(
        WAV_STEREO_LAYOUT,
        buffer.left.len() == buffer.right.len(),
        "Channels have equal length before interleaving",
        Some("write_wav"),
    );
    let mut writer = hound::WavWriter::create(path.as_ref(), spec)?;
    for (&l, &r) in buffer.left.iter().zip(&buffer.right) {
        writer.write_sample(l)?;
        writer.write_sample(r)?;
    }
    writer.finalize()?;
    debug!("Wrote {} frames to {}", buffer.len(), path.as_ref().display());
    Ok(())
}
