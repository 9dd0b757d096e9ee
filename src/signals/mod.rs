//! Signal generation types and traits.
//!
//! This module provides the time-domain side of the pipeline:
//! - `Waveform` trait for anything that can be evaluated at a time `t`
//! - `Signal` for a sampled sequence on a `TimeGrid`
//! - `Harmonic` sine waveform with its `FrequencyScale`
//! - `SignalGenerator` combining a harmonic with a cached noise trace

mod generator;
mod harmonic;
mod waveform;

pub use generator::{SignalGenerator, SignalParams};
pub use harmonic::{FrequencyScale, Harmonic};
pub use waveform::{FilteredSignal, Signal, Waveform};
