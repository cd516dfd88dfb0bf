//! Hera: a real-time-safe sine tone generator.
//!
//! A [`SineProcessor`] renders a sine tone into stereo output from inside a
//! host audio callback. Gain and frequency are published from any thread
//! through [`Controls`]; the gain is smoothed per sample so target jumps
//! never click.
//!
//! ```no_run
//! use hera::{EngineConfig, SineProcessor};
//!
//! let mut processor = SineProcessor::new(&EngineConfig::default()).unwrap();
//! let controls = processor.controls();
//! processor.prepare(48_000.0, 512).unwrap();
//! controls.set_gain_target(0.8).unwrap();
//!
//! let mut left = vec![0.0; 512];
//! let mut right = vec![0.0; 512];
//! processor.process(512, &mut left, &mut right).unwrap();
//! ```

pub mod atomic;
pub mod config;
pub mod control;
#[doc(hidden)]
pub mod harness;
#[doc(hidden)]
pub mod invariant_ppt;
pub mod invariant_rt;
pub mod oscillator;
pub mod params;
pub mod processor;
pub mod render;
pub mod smoother;

pub use config::{ConfigError, EngineConfig};
pub use control::{ControlError, Controls};
pub use oscillator::Oscillator;
pub use processor::{process_safe, PrepareError, ProcessError, SineProcessor};
pub use render::{render_offline, write_wav, RenderError, StereoBuffer};
pub use smoother::{GainSmoother, GainTarget};
