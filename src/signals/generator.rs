//! Noisy harmonic generation over a fixed time grid.

use super::{FrequencyScale, Harmonic, Signal, Waveform};
use crate::noise::{NoiseParams, NoiseTrace};
use crate::{LabError, Result, TimeGrid};
use serde::{Deserialize, Serialize};

/// Everything the generator needs to produce one signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalParams {
    pub amplitude: f64,
    pub frequency: f64,
    pub phase: f64,
    pub noise: NoiseParams,
    pub show_noise: bool,
}

impl SignalParams {
    /// The noise-free part of these parameters on the given frequency scale.
    pub fn harmonic(&self, scale: FrequencyScale) -> Harmonic {
        Harmonic::new(self.amplitude, self.frequency, self.phase).with_scale(scale)
    }

    pub fn validate(&self) -> Result<()> {
        Harmonic::new(self.amplitude, self.frequency, self.phase).validate()?;
        self.noise.validate()
    }
}

impl Default for SignalParams {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            frequency: 1.0,
            phase: 0.5,
            noise: NoiseParams::default(),
            show_noise: true,
        }
    }
}

/// Produces sampled noisy sine waves over one immutable time grid.
///
/// The generator holds no noise of its own: the caller owns the `NoiseTrace`
/// and passes it in, so identical inputs always give identical output.
///
/// # Examples
///
/// ```
/// use sinelab::{NoiseTrace, SignalGenerator, SignalParams, TimeGrid};
///
/// let grid = TimeGrid::linspace(0.0, 10.0, 1000).unwrap();
/// let generator = SignalGenerator::new(grid);
/// let noise = NoiseTrace::zeros(generator.len());
///
/// let params = SignalParams { show_noise: false, ..SignalParams::default() };
/// let signal = generator.generate(&params, &noise).unwrap();
/// assert!((signal[0] - 0.5_f64.sin()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct SignalGenerator {
    grid: TimeGrid,
    scale: FrequencyScale,
}

impl SignalGenerator {
    pub fn new(grid: TimeGrid) -> Self {
        Self {
            grid,
            scale: FrequencyScale::Angular,
        }
    }

    pub fn with_scale(mut self, scale: FrequencyScale) -> Self {
        self.scale = scale;
        self
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    pub fn scale(&self) -> FrequencyScale {
        self.scale
    }

    /// Number of samples in every generated signal.
    pub fn len(&self) -> usize {
        self.grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// Renders `amplitude * sin(ω t + phase)` with no noise.
    pub fn clean(&self, params: &SignalParams) -> Result<Signal> {
        let harmonic = params.harmonic(self.scale);
        harmonic.validate()?;
        Ok(harmonic.render(&self.grid))
    }

    /// Renders the harmonic and, when `params.show_noise` is set, adds `noise`
    /// rescaled to `N(params.noise.mean, params.noise.variance)`.
    ///
    /// # Errors
    ///
    /// * `InvalidParameter` - a non-finite parameter or a negative variance
    /// * `LengthMismatch` - `noise` was drawn for a different grid
    pub fn generate(&self, params: &SignalParams, noise: &NoiseTrace) -> Result<Signal> {
        params.validate()?;

        let mut samples = params.harmonic(self.scale).render(&self.grid).into_inner();
        if params.show_noise {
            if noise.len() != samples.len() {
                return Err(LabError::LengthMismatch {
                    expected: samples.len(),
                    actual: noise.len(),
                });
            }
            for (sample, n) in samples.iter_mut().zip(noise.scaled(&params.noise)) {
                *sample += n;
            }
        }

        Ok(Signal::new(samples))
    }
}
