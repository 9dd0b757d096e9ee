//! Harmonic (sine) waveform.

use super::Waveform;
use crate::{LabError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// How the `frequency` parameter is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyScale {
    /// Angular frequency: `sin(frequency * t + phase)`
    #[default]
    Angular,
    /// Frequency in Hz: `sin(2π * frequency * t + phase)`
    Hertz,
}

impl FrequencyScale {
    /// Angular velocity in radians per time unit for `frequency`.
    pub fn angular(self, frequency: f64) -> f64 {
        match self {
            FrequencyScale::Angular => frequency,
            FrequencyScale::Hertz => 2.0 * PI * frequency,
        }
    }
}

/// A sine wave `amplitude * sin(ω * t + phase)`.
///
/// `ω` is `frequency` itself on the angular scale, or `2π * frequency` on the
/// Hertz scale. The waveform is stateless, so evaluating it over the same grid
/// always gives the same samples.
///
/// # Examples
///
/// ```
/// use sinelab::{Harmonic, Waveform};
///
/// let wave = Harmonic::new(1.0, 1.0, 0.5);
/// assert!((wave.sample_at(0.0) - 0.5_f64.sin()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Harmonic {
    pub amplitude: f64,
    pub frequency: f64,
    pub phase: f64,
    pub scale: FrequencyScale,
}

impl Harmonic {
    /// Creates a harmonic on the angular frequency scale.
    pub fn new(amplitude: f64, frequency: f64, phase: f64) -> Self {
        Self {
            amplitude,
            frequency,
            phase,
            scale: FrequencyScale::Angular,
        }
    }

    pub fn with_scale(mut self, scale: FrequencyScale) -> Self {
        self.scale = scale;
        self
    }

    /// Rejects non-finite amplitude, frequency or phase.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("amplitude", self.amplitude),
            ("frequency", self.frequency),
            ("phase", self.phase),
        ] {
            if !value.is_finite() {
                return Err(LabError::invalid(name, format!("must be finite, got {value}")));
            }
        }
        Ok(())
    }
}

impl Waveform for Harmonic {
    fn sample_at(&self, t: f64) -> f64 {
        self.amplitude * (self.scale.angular(self.frequency) * t + self.phase).sin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TimeGrid;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_matches_analytic_sine() {
        let grid = TimeGrid::linspace(0.0, 10.0, 1000).unwrap();
        let wave = Harmonic::new(2.5, 3.0, -0.7);
        let signal = wave.render(&grid);
        for (s, t) in signal.iter().zip(grid.iter()) {
            assert!((s - 2.5 * (3.0 * t - 0.7).sin()).abs() < EPS);
        }
    }

    #[test]
    fn test_first_sample_is_sin_of_phase() {
        let grid = TimeGrid::linspace(0.0, 10.0, 1000).unwrap();
        let signal = Harmonic::new(1.0, 1.0, 0.5).render(&grid);
        assert!((signal[0] - 0.479_425_538_604_203).abs() < EPS);
    }

    #[test]
    fn test_hertz_scale() {
        let wave = Harmonic::new(1.0, 1.0, 0.0).with_scale(FrequencyScale::Hertz);
        // Quarter period of a 1 Hz wave
        assert!((wave.sample_at(0.25) - 1.0).abs() < EPS);
        assert!(wave.sample_at(0.5).abs() < EPS);
    }

    #[test]
    fn test_zero_amplitude_is_silent() {
        let wave = Harmonic::new(0.0, 4.0, 1.0);
        assert_eq!(wave.sample_at(1.3), 0.0);
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        assert!(Harmonic::new(1.0, 1.0, 0.0).validate().is_ok());
        assert!(matches!(
            Harmonic::new(f64::NAN, 1.0, 0.0).validate(),
            Err(LabError::InvalidParameter { name: "amplitude", .. })
        ));
        assert!(Harmonic::new(1.0, f64::INFINITY, 0.0).validate().is_err());
    }
}
