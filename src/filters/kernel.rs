//! Smoothing kernels and their weight sequences.

use crate::{LabError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The smoothing algorithm to apply, together with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FilterKernel {
    /// Pass the signal through unchanged
    Identity,
    /// Moving average over `window_size` samples
    Uniform { window_size: usize },
    /// Gaussian-weighted average over `window_size` samples with spread `sigma`
    Gaussian { window_size: usize, sigma: f64 },
}

impl FilterKernel {
    /// Checks the kernel parameters.
    ///
    /// Window sizes must be at least 1 and `sigma` must be a positive finite
    /// number. Even window sizes are allowed; the kernel centre then sits half a
    /// sample to the left.
    pub fn validate(&self) -> Result<()> {
        match *self {
            FilterKernel::Identity => Ok(()),
            FilterKernel::Uniform { window_size } => validate_window(window_size),
            FilterKernel::Gaussian { window_size, sigma } => {
                validate_window(window_size)?;
                if !sigma.is_finite() || sigma <= 0.0 {
                    return Err(LabError::invalid(
                        "sigma",
                        format!("must be a positive number, got {sigma}"),
                    ));
                }
                Ok(())
            }
        }
    }

    /// Number of taps in the weight sequence.
    pub fn window_size(&self) -> usize {
        match *self {
            FilterKernel::Identity => 1,
            FilterKernel::Uniform { window_size } | FilterKernel::Gaussian { window_size, .. } => {
                window_size
            }
        }
    }

    /// The normalized weight sequence, summing to 1.
    ///
    /// `Identity` yields the single tap `[1.0]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sinelab::FilterKernel;
    ///
    /// let weights = FilterKernel::Uniform { window_size: 4 }.weights().unwrap();
    /// assert_eq!(weights, vec![0.25; 4]);
    /// ```
    pub fn weights(&self) -> Result<Vec<f64>> {
        self.validate()?;
        let weights = match *self {
            FilterKernel::Identity => vec![1.0],
            FilterKernel::Uniform { window_size } => {
                vec![1.0 / window_size as f64; window_size]
            }
            FilterKernel::Gaussian { window_size, sigma } => gaussian_window(window_size, sigma),
        };
        Ok(weights)
    }
}

fn validate_window(window_size: usize) -> Result<()> {
    if window_size == 0 {
        return Err(LabError::invalid("window_size", "must be at least 1"));
    }
    Ok(())
}

/// `exp(-n² / 2σ²)` sampled at offsets `n` centred on the window, normalized.
///
/// Exponents are taken relative to the tap nearest the centre, so the largest
/// raw tap is exactly 1.0 and the total never underflows for a tiny `sigma`.
fn gaussian_window(window_size: usize, sigma: f64) -> Vec<f64> {
    let centre = (window_size as f64 - 1.0) / 2.0;
    let nearest = if window_size % 2 == 0 { 0.5 } else { 0.0 };
    let raw: Vec<f64> = (0..window_size)
        .map(|i| {
            let d = (i as f64 - centre).abs();
            // (d² - nearest²) / σ², factored so σ² cannot underflow to 0
            let exponent = ((d - nearest) / sigma) * ((d + nearest) / sigma);
            (-0.5 * exponent).exp()
        })
        .collect();
    let total: f64 = raw.iter().sum();
    raw.into_iter().map(|w| w / total).collect()
}

/// Which smoothing the user picked, without its numeric parameters.
///
/// The window size and sigma are tuned separately, so switching between
/// filters keeps them. Parsing accepts the names used by the lab controls
/// and rejects anything else.
///
/// # Examples
///
/// ```
/// use sinelab::{FilterChoice, FilterKernel};
///
/// let choice: FilterChoice = "moving_average".parse().unwrap();
/// assert_eq!(choice, FilterChoice::Uniform);
/// assert_eq!(choice.kernel(5, 2.0), FilterKernel::Uniform { window_size: 5 });
/// assert!("median".parse::<FilterChoice>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterChoice {
    #[default]
    None,
    Uniform,
    Gaussian,
}

impl FilterChoice {
    pub const ALL: [FilterChoice; 3] = [
        FilterChoice::None,
        FilterChoice::Uniform,
        FilterChoice::Gaussian,
    ];

    /// Builds the concrete kernel for this choice.
    pub fn kernel(self, window_size: usize, sigma: f64) -> FilterKernel {
        match self {
            FilterChoice::None => FilterKernel::Identity,
            FilterChoice::Uniform => FilterKernel::Uniform { window_size },
            FilterChoice::Gaussian => FilterKernel::Gaussian { window_size, sigma },
        }
    }

    /// The next choice in `ALL`, wrapping around.
    pub fn next(self) -> Self {
        match self {
            FilterChoice::None => FilterChoice::Uniform,
            FilterChoice::Uniform => FilterChoice::Gaussian,
            FilterChoice::Gaussian => FilterChoice::None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FilterChoice::None => "none",
            FilterChoice::Uniform => "uniform",
            FilterChoice::Gaussian => "gaussian",
        }
    }
}

impl fmt::Display for FilterChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterChoice {
    type Err = LabError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "identity" => Ok(FilterChoice::None),
            "uniform" | "moving_average" => Ok(FilterChoice::Uniform),
            "gaussian" => Ok(FilterChoice::Gaussian),
            other => Err(LabError::invalid(
                "filter_type",
                format!("unknown filter '{other}'"),
            )),
        }
    }
}

impl From<FilterKernel> for FilterChoice {
    fn from(kernel: FilterKernel) -> Self {
        match kernel {
            FilterKernel::Identity => FilterChoice::None,
            FilterKernel::Uniform { .. } => FilterChoice::Uniform,
            FilterKernel::Gaussian { .. } => FilterChoice::Gaussian,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_uniform_weights_sum_to_one() {
        for window_size in 1..=101 {
            let weights = FilterKernel::Uniform { window_size }.weights().unwrap();
            assert_eq!(weights.len(), window_size);
            assert!((weights.iter().sum::<f64>() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn test_gaussian_weights_sum_to_one() {
        for window_size in 1..=101 {
            for &sigma in &[0.1, 2.0, 10.0] {
                let weights = FilterKernel::Gaussian { window_size, sigma }
                    .weights()
                    .unwrap();
                assert_eq!(weights.len(), window_size);
                assert!((weights.iter().sum::<f64>() - 1.0).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_gaussian_is_symmetric_and_peaked() {
        let weights = FilterKernel::Gaussian {
            window_size: 7,
            sigma: 1.5,
        }
        .weights()
        .unwrap();
        for i in 0..7 {
            assert!((weights[i] - weights[6 - i]).abs() < EPS);
        }
        assert!(weights[3] > weights[2] && weights[2] > weights[1]);
    }

    #[test]
    fn test_gaussian_shape() {
        let weights = FilterKernel::Gaussian {
            window_size: 3,
            sigma: 1.0,
        }
        .weights()
        .unwrap();
        // Edge tap relative to centre is exp(-1/2)
        assert!((weights[0] / weights[1] - (-0.5_f64).exp()).abs() < EPS);
    }

    #[test]
    fn test_narrow_gaussian_stays_normalized() {
        let cases = [
            (2, 1e-3),
            (2, 0.01),
            (4, 1e-3),
            (5, 1e-3),
            (50, 1e-6),
            (6, 1e-200),
        ];
        for (window_size, sigma) in cases {
            let weights = FilterKernel::Gaussian { window_size, sigma }
                .weights()
                .unwrap();
            assert!(weights.iter().all(|w| w.is_finite()), "{weights:?}");
            assert!((weights.iter().sum::<f64>() - 1.0).abs() < EPS);
        }

        // Even window: the two central taps share the weight
        let weights = FilterKernel::Gaussian {
            window_size: 2,
            sigma: 1e-3,
        }
        .weights()
        .unwrap();
        assert_eq!(weights, vec![0.5, 0.5]);
    }

    #[test]
    fn test_identity_weights() {
        assert_eq!(FilterKernel::Identity.weights().unwrap(), vec![1.0]);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(matches!(
            FilterKernel::Uniform { window_size: 0 }.weights(),
            Err(LabError::InvalidParameter {
                name: "window_size",
                ..
            })
        ));
        assert!(matches!(
            FilterKernel::Gaussian {
                window_size: 5,
                sigma: 0.0
            }
            .validate(),
            Err(LabError::InvalidParameter { name: "sigma", .. })
        ));
        assert!(
            FilterKernel::Gaussian {
                window_size: 5,
                sigma: f64::NAN
            }
            .validate()
            .is_err()
        );
    }

    #[test]
    fn test_choice_parsing() {
        assert_eq!("none".parse::<FilterChoice>().unwrap(), FilterChoice::None);
        assert_eq!(
            " Gaussian ".parse::<FilterChoice>().unwrap(),
            FilterChoice::Gaussian
        );
        assert_eq!(
            "uniform".parse::<FilterChoice>().unwrap(),
            FilterChoice::Uniform
        );
        assert!(matches!(
            "savgol".parse::<FilterChoice>(),
            Err(LabError::InvalidParameter {
                name: "filter_type",
                ..
            })
        ));
    }

    #[test]
    fn test_choice_roundtrip_through_kernel() {
        for choice in FilterChoice::ALL {
            assert_eq!(FilterChoice::from(choice.kernel(5, 2.0)), choice);
            assert_eq!(choice.name().parse::<FilterChoice>().unwrap(), choice);
        }
    }

    #[test]
    fn test_choice_cycle() {
        let mut choice = FilterChoice::None;
        for _ in 0..3 {
            choice = choice.next();
        }
        assert_eq!(choice, FilterChoice::None);
    }
}
