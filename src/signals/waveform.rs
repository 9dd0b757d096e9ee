//! The waveform trait and the sampled `Signal` sequence it renders into.

use crate::TimeGrid;
use std::ops::Index;

/// Common interface for anything that can be evaluated at a point in time.
///
/// This trait defines the core functionality for continuous-time sources such
/// as the harmonic oscillator. It provides two operations:
/// - Single sample evaluation via `sample_at()`
/// - Batch rendering over a time grid via `render()`
pub trait Waveform {
    /// Evaluates the waveform at time `t`.
    fn sample_at(&self, t: f64) -> f64;

    /// Evaluates the waveform at every time of `grid` into `buffer`.
    ///
    /// Default implementation calls `sample_at()` for each element. Only
    /// `min(grid.len(), buffer.len())` samples are written.
    ///
    /// # Arguments
    ///
    /// * `grid` - Sample times
    /// * `buffer` - Mutable slice to fill with samples
    fn render_into(&self, grid: &TimeGrid, buffer: &mut [f64]) {
        for (sample, t) in buffer.iter_mut().zip(grid.iter()) {
            *sample = self.sample_at(t);
        }
    }

    /// Evaluates the waveform over `grid` into a new `Signal`.
    fn render(&self, grid: &TimeGrid) -> Signal {
        let mut samples = vec![0.0; grid.len()];
        self.render_into(grid, &mut samples);
        Signal::new(samples)
    }
}

/// An ordered sequence of real-valued samples tied to a time grid.
///
/// # Examples
///
/// ```
/// use sinelab::Signal;
///
/// let signal = Signal::new(vec![1.0, -1.0, 1.0, -1.0]);
/// assert_eq!(signal.len(), 4);
/// assert_eq!(signal[1], -1.0);
/// assert_eq!(signal.mean(), 0.0);
/// assert_eq!(signal.rms(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Signal {
    samples: Vec<f64>,
}

/// The output of a smoothing filter. Same shape as its input.
pub type FilteredSignal = Signal;

impl Signal {
    pub fn new(samples: Vec<f64>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.samples
    }

    /// Arithmetic mean of the samples, or 0.0 for an empty signal.
    pub fn mean(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    /// Root-mean-square level, or 0.0 for an empty signal.
    pub fn rms(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let power = self.samples.iter().map(|s| s * s).sum::<f64>() / self.samples.len() as f64;
        power.sqrt()
    }

    /// Largest absolute sample value, or 0.0 for an empty signal.
    pub fn peak(&self) -> f64 {
        self.samples.iter().fold(0.0, |peak, s| peak.max(s.abs()))
    }
}

impl From<Vec<f64>> for Signal {
    fn from(samples: Vec<f64>) -> Self {
        Signal::new(samples)
    }
}

impl AsRef<[f64]> for Signal {
    fn as_ref(&self) -> &[f64] {
        &self.samples
    }
}

impl Index<usize> for Signal {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.samples[index]
    }
}
