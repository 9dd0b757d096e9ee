//! Session configuration: time grid, initial control values and their bounds.
//!
//! Configurations are plain serde structs, so they can be persisted as JSON
//! and partially overridden: every field falls back to its default.
//!
//! ```
//! use sinelab::{LabConfig, NoiseRefresh};
//!
//! let config = LabConfig::from_json_str(r#"{ "noise_refresh": "manual", "seed": 7 }"#).unwrap();
//! assert_eq!(config.noise_refresh, NoiseRefresh::Manual);
//! assert_eq!(config.grid.points, 1000);
//! ```

use crate::controller::Parameter;
use crate::{FilterChoice, FrequencyScale, LabError, Result, TimeGrid};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::path::Path;

/// Sample times shared by every signal in the session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub start: f64,
    pub end: f64,
    pub points: usize,
}

impl GridConfig {
    pub fn build(&self) -> Result<TimeGrid> {
        TimeGrid::linspace(self.start, self.end, self.points)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 10.0,
            points: 1000,
        }
    }
}

/// Values the controls start at and return to on reset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialParams {
    pub amplitude: f64,
    pub frequency: f64,
    pub phase: f64,
    pub noise_mean: f64,
    pub noise_variance: f64,
    pub show_noise: bool,
    pub filter: FilterChoice,
    pub window_size: usize,
    pub sigma: f64,
}

impl InitialParams {
    /// The initial value of a bounded control.
    pub fn value(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Amplitude => self.amplitude,
            Parameter::Frequency => self.frequency,
            Parameter::Phase => self.phase,
            Parameter::NoiseMean => self.noise_mean,
            Parameter::NoiseVariance => self.noise_variance,
            Parameter::WindowSize => self.window_size as f64,
            Parameter::Sigma => self.sigma,
        }
    }
}

impl Default for InitialParams {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            frequency: 1.0,
            phase: 0.5,
            noise_mean: 0.0,
            noise_variance: 0.1,
            show_noise: true,
            filter: FilterChoice::None,
            window_size: 50,
            sigma: 2.0,
        }
    }
}

/// A closed interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bound {
    pub min: f64,
    pub max: f64,
}

impl Bound {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Allowed range of every bounded control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterBounds {
    pub amplitude: Bound,
    pub frequency: Bound,
    pub phase: Bound,
    pub noise_mean: Bound,
    pub noise_variance: Bound,
    pub window_size: Bound,
    pub sigma: Bound,
}

impl ParameterBounds {
    pub fn bound(&self, parameter: Parameter) -> Bound {
        match parameter {
            Parameter::Amplitude => self.amplitude,
            Parameter::Frequency => self.frequency,
            Parameter::Phase => self.phase,
            Parameter::NoiseMean => self.noise_mean,
            Parameter::NoiseVariance => self.noise_variance,
            Parameter::WindowSize => self.window_size,
            Parameter::Sigma => self.sigma,
        }
    }

    /// Rejects `value` if it lies outside the bound of `parameter`.
    pub fn check(&self, parameter: Parameter, value: f64) -> Result<()> {
        let bound = self.bound(parameter);
        if !bound.contains(value) {
            return Err(LabError::invalid(
                parameter.name(),
                format!("{value} is outside [{}, {}]", bound.min, bound.max),
            ));
        }
        Ok(())
    }
}

impl Default for ParameterBounds {
    fn default() -> Self {
        Self {
            amplitude: Bound::new(0.1, 10.0),
            frequency: Bound::new(0.1, 10.0),
            phase: Bound::new(0.0, 2.0 * PI),
            noise_mean: Bound::new(-1.0, 1.0),
            noise_variance: Bound::new(0.0, 1.0),
            window_size: Bound::new(3.0, 101.0),
            sigma: Bound::new(0.1, 10.0),
        }
    }
}

/// When the controller draws a new noise trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseRefresh {
    /// Redraw whenever the noise mean or variance changes, and on request
    #[default]
    OnNoiseChange,
    /// Keep the draws and only rescale them; redraw on request only
    Manual,
}

/// Complete configuration of a lab session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    pub grid: GridConfig,
    pub initial: InitialParams,
    pub bounds: ParameterBounds,
    pub noise_refresh: NoiseRefresh,
    pub frequency_scale: FrequencyScale,
    /// Seed for the noise generator; `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl LabConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: LabConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks the grid, the bounds, and that every initial value is in bounds.
    pub fn validate(&self) -> Result<()> {
        self.grid.build()?;

        for parameter in Parameter::ALL {
            let bound = self.bounds.bound(parameter);
            if !bound.min.is_finite() || !bound.max.is_finite() || bound.min > bound.max {
                return Err(LabError::Config(format!(
                    "bound for '{}' is not a finite range: [{}, {}]",
                    parameter.name(),
                    bound.min,
                    bound.max
                )));
            }
            self.bounds
                .check(parameter, self.initial.value(parameter))
                .map_err(|err| LabError::Config(format!("initial value rejected: {err}")))?;
        }

        if self.bounds.window_size.min < 1.0 {
            return Err(LabError::Config(format!(
                "window_size bound must start at 1 or more, got {}",
                self.bounds.window_size.min
            )));
        }
        if self.bounds.sigma.min <= 0.0 {
            return Err(LabError::Config(format!(
                "sigma bound must be positive, got {}",
                self.bounds.sigma.min
            )));
        }

        if self.initial.window_size > self.grid.points {
            return Err(LabError::Config(format!(
                "initial window of {} samples exceeds the {}-point grid",
                self.initial.window_size, self.grid.points
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = LabConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid.build().unwrap().len(), 1000);
        assert_eq!(config.initial.phase, 0.5);
        assert_eq!(config.noise_refresh, NoiseRefresh::OnNoiseChange);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = LabConfig::from_json_str(
            r#"{ "initial": { "amplitude": 2.0, "filter": "gaussian" }, "frequency_scale": "hertz" }"#,
        )
        .unwrap();
        assert_eq!(config.initial.amplitude, 2.0);
        assert_eq!(config.initial.filter, FilterChoice::Gaussian);
        assert_eq!(config.initial.window_size, 50);
        assert_eq!(config.frequency_scale, FrequencyScale::Hertz);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = LabConfig {
            seed: Some(99),
            noise_refresh: NoiseRefresh::Manual,
            ..LabConfig::default()
        };
        let json = config.to_json_string().unwrap();
        assert_eq!(LabConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_initial_out_of_bounds() {
        let result = LabConfig::from_json_str(r#"{ "initial": { "noise_variance": 3.0 } }"#);
        assert!(matches!(result, Err(LabError::Config(_))));
    }

    #[test]
    fn test_rejects_bad_grid() {
        let result = LabConfig::from_json_str(r#"{ "grid": { "points": 0 } }"#);
        assert!(matches!(result, Err(LabError::InvalidParameter { .. })));
    }

    #[test]
    fn test_rejects_window_larger_than_grid() {
        let result = LabConfig::from_json_str(r#"{ "grid": { "points": 20 } }"#);
        assert!(matches!(result, Err(LabError::Config(_))));
    }

    #[test]
    fn test_rejects_non_positive_filter_bounds() {
        let window = LabConfig::from_json_str(
            r#"{ "bounds": { "window_size": { "min": -5.0, "max": 101.0 } } }"#,
        );
        assert!(matches!(window, Err(LabError::Config(_))));

        let sigma = LabConfig::from_json_str(
            r#"{ "bounds": { "sigma": { "min": 0.0, "max": 10.0 } } }"#,
        );
        assert!(matches!(sigma, Err(LabError::Config(_))));

        let narrow = LabConfig::from_json_str(
            r#"{ "bounds": { "sigma": { "min": 0.001, "max": 10.0 } } }"#,
        );
        assert!(narrow.is_ok());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            LabConfig::from_json_str("{ grid"),
            Err(LabError::Config(_))
        ));
    }

    #[test]
    fn test_bounds_check() {
        let bounds = ParameterBounds::default();
        assert!(bounds.check(Parameter::Amplitude, 10.0).is_ok());
        assert!(matches!(
            bounds.check(Parameter::Amplitude, 10.5),
            Err(LabError::InvalidParameter {
                name: "amplitude",
                ..
            })
        ));
        assert_eq!(bounds.noise_mean.clamp(-4.0), -1.0);
    }
}
