//! Sinelab - noisy harmonic generation and smoothing for interactive labs
//!
//! This library generates a sampled sine wave with additive Gaussian noise,
//! smooths it with a moving-average or Gaussian kernel, and drives both from
//! a message-dispatch `Controller` that a UI can sit on top of.
//!
//! An interactive terminal front end lives in `demos/terminal_lab.rs` and is
//! registered as a Cargo example (`cargo run --example terminal_lab`). It sits
//! outside the default `examples/` directory, so `Cargo.toml` lists its path
//! explicitly.

pub mod config;
pub mod controller;
mod error;
pub mod filters;
mod grid;
#[cfg(feature = "logging")]
pub mod logging;
pub mod noise;
pub mod signals;

// Re-export commonly used types at the crate root
pub use config::{Bound, LabConfig, NoiseRefresh, ParameterBounds};
pub use controller::{Controller, Frame, Message, Parameter, SessionState};
pub use error::{LabError, Result};
pub use filters::{FilterChoice, FilterKernel, SignalFilter, filter};
pub use grid::TimeGrid;
pub use noise::{NoiseParams, NoiseTrace};
pub use signals::{
    FilteredSignal, FrequencyScale, Harmonic, Signal, SignalGenerator, SignalParams, Waveform,
};
