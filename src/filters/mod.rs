//! Smoothing filters for sampled signals.
//!
//! A `SignalFilter` precomputes the normalized weights of a `FilterKernel`
//! once and then applies them with same-length, zero-padded convolution, so
//! the filtered signal always lines up with the input's time grid.

mod convolve;
mod kernel;

pub use convolve::convolve_same;
pub use kernel::{FilterChoice, FilterKernel};

use crate::{FilteredSignal, LabError, Result, Signal};

/// A validated smoothing filter ready to apply to signals.
///
/// # Examples
///
/// ```
/// use sinelab::{FilterKernel, Signal, SignalFilter};
///
/// let filter = SignalFilter::new(FilterKernel::Uniform { window_size: 3 }).unwrap();
/// let input = Signal::new(vec![0.0, 0.0, 0.0, 10.0, 0.0, 0.0, 0.0]);
/// let output = filter.apply(&input).unwrap();
///
/// assert_eq!(output.len(), input.len());
/// assert!((output[3] - 10.0 / 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SignalFilter {
    kernel: FilterKernel,
    weights: Vec<f64>,
}

impl SignalFilter {
    /// Creates a filter, rejecting invalid kernel parameters.
    pub fn new(kernel: FilterKernel) -> Result<Self> {
        let weights = kernel.weights()?;
        Ok(Self { kernel, weights })
    }

    pub fn kernel(&self) -> FilterKernel {
        self.kernel
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Smooths `signal`, returning a sequence of the same length.
    ///
    /// The identity kernel returns an exact copy. A window longer than the
    /// signal is rejected, since most of its taps would only ever see padding.
    pub fn apply(&self, signal: &Signal) -> Result<FilteredSignal> {
        if self.kernel == FilterKernel::Identity {
            return Ok(signal.clone());
        }
        if self.weights.len() > signal.len() {
            return Err(LabError::invalid(
                "window_size",
                format!(
                    "window of {} samples exceeds signal length {}",
                    self.weights.len(),
                    signal.len()
                ),
            ));
        }
        Ok(Signal::new(convolve_same(signal.samples(), &self.weights)))
    }
}

/// One-shot convenience for `SignalFilter::new(kernel)?.apply(signal)`.
pub fn filter(signal: &Signal, kernel: FilterKernel) -> Result<FilteredSignal> {
    SignalFilter::new(kernel)?.apply(signal)
}
