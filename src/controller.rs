//! Message-driven session controller.
//!
//! The controller owns everything that persists between user interactions:
//! the current control values, the cached noise trace and the random number
//! generator. Each interaction is a `Message`; `dispatch()` applies it and
//! recomputes both plots in one synchronous step.
//!
//! A rejected message leaves the session exactly as it was.

use crate::config::{LabConfig, NoiseRefresh};
use crate::{
    FilterChoice, FilterKernel, FilteredSignal, LabError, NoiseParams, NoiseTrace, Result, Signal,
    SignalFilter, SignalGenerator, SignalParams, TimeGrid,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace, warn};

/// A bounded numeric control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    Amplitude,
    Frequency,
    Phase,
    NoiseMean,
    NoiseVariance,
    WindowSize,
    Sigma,
}

impl Parameter {
    pub const ALL: [Parameter; 7] = [
        Parameter::Amplitude,
        Parameter::Frequency,
        Parameter::Phase,
        Parameter::NoiseMean,
        Parameter::NoiseVariance,
        Parameter::WindowSize,
        Parameter::Sigma,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Parameter::Amplitude => "amplitude",
            Parameter::Frequency => "frequency",
            Parameter::Phase => "phase",
            Parameter::NoiseMean => "noise_mean",
            Parameter::NoiseVariance => "noise_variance",
            Parameter::WindowSize => "window_size",
            Parameter::Sigma => "sigma",
        }
    }

    /// True for the parameters that shape the noise distribution.
    pub fn is_noise(&self) -> bool {
        matches!(self, Parameter::NoiseMean | Parameter::NoiseVariance)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A user interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    /// A slider moved to a new value
    ParameterChanged(Parameter, f64),
    /// The "show noise" checkbox was toggled
    ToggleNoise(bool),
    /// A different smoothing filter was picked
    SelectFilter(FilterChoice),
    /// Draw a fresh noise realisation
    RegenerateNoise,
    /// Restore every control to its initial value
    Reset,
}

/// The current value of every control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub signal: SignalParams,
    pub filter: FilterChoice,
    pub window_size: usize,
    pub sigma: f64,
}

impl SessionState {
    pub fn from_config(config: &LabConfig) -> Self {
        let initial = &config.initial;
        Self {
            signal: SignalParams {
                amplitude: initial.amplitude,
                frequency: initial.frequency,
                phase: initial.phase,
                noise: NoiseParams::new(initial.noise_mean, initial.noise_variance),
                show_noise: initial.show_noise,
            },
            filter: initial.filter,
            window_size: initial.window_size,
            sigma: initial.sigma,
        }
    }

    /// The kernel selected by `filter`, with the current window and sigma.
    pub fn kernel(&self) -> FilterKernel {
        self.filter.kernel(self.window_size, self.sigma)
    }

    pub fn value(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Amplitude => self.signal.amplitude,
            Parameter::Frequency => self.signal.frequency,
            Parameter::Phase => self.signal.phase,
            Parameter::NoiseMean => self.signal.noise.mean,
            Parameter::NoiseVariance => self.signal.noise.variance,
            Parameter::WindowSize => self.window_size as f64,
            Parameter::Sigma => self.sigma,
        }
    }

    fn set(&mut self, parameter: Parameter, value: f64) -> Result<()> {
        match parameter {
            Parameter::Amplitude => self.signal.amplitude = value,
            Parameter::Frequency => self.signal.frequency = value,
            Parameter::Phase => self.signal.phase = value,
            Parameter::NoiseMean => self.signal.noise.mean = value,
            Parameter::NoiseVariance => self.signal.noise.variance = value,
            Parameter::WindowSize => {
                if value.fract() != 0.0 || value < 1.0 {
                    return Err(LabError::invalid(
                        parameter.name(),
                        format!("must be a whole number of samples, at least 1, got {value}"),
                    ));
                }
                self.window_size = value as usize;
            }
            Parameter::Sigma => self.sigma = value,
        }
        Ok(())
    }
}

/// Both plots produced by one interaction, sharing one time grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub time: TimeGrid,
    pub signal: Signal,
    pub filtered: FilteredSignal,
}

impl Frame {
    /// `(t, signal, filtered)` triples in time order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.time
            .iter()
            .zip(self.signal.iter())
            .zip(self.filtered.iter())
            .map(|((t, s), f)| (t, s, f))
    }
}

/// Owns the session state and turns messages into frames.
///
/// # Examples
///
/// ```
/// use sinelab::{Controller, FilterChoice, LabConfig, Message, Parameter};
///
/// let config = LabConfig { seed: Some(1), ..LabConfig::default() };
/// let mut controller = Controller::new(config).unwrap();
///
/// controller.dispatch(Message::SelectFilter(FilterChoice::Uniform)).unwrap();
/// let frame = controller
///     .dispatch(Message::ParameterChanged(Parameter::Amplitude, 2.0))
///     .unwrap();
/// assert_eq!(frame.filtered.len(), frame.signal.len());
///
/// // Out-of-range values are rejected and change nothing
/// assert!(controller.dispatch(Message::ParameterChanged(Parameter::Amplitude, 50.0)).is_err());
/// assert_eq!(controller.state().signal.amplitude, 2.0);
/// ```
#[derive(Debug)]
pub struct Controller<R: Rng = StdRng> {
    config: LabConfig,
    generator: SignalGenerator,
    state: SessionState,
    noise: NoiseTrace,
    rng: R,
}

impl Controller<StdRng> {
    /// Creates a controller seeded from `config.seed`, or from OS entropy.
    pub fn new(config: LabConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> Controller<R> {
    /// Creates a controller drawing noise from `rng`.
    pub fn with_rng(config: LabConfig, mut rng: R) -> Result<Self> {
        config.validate()?;
        let grid = config.grid.build()?;
        let generator = SignalGenerator::new(grid).with_scale(config.frequency_scale);
        let noise = NoiseTrace::draw(generator.len(), &mut rng);
        let state = SessionState::from_config(&config);
        debug!(
            points = generator.len(),
            refresh = ?config.noise_refresh,
            scale = ?config.frequency_scale,
            "session started"
        );
        Ok(Self {
            config,
            generator,
            state,
            noise,
            rng,
        })
    }

    pub fn config(&self) -> &LabConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn noise(&self) -> &NoiseTrace {
        &self.noise
    }

    pub fn grid(&self) -> &TimeGrid {
        self.generator.grid()
    }

    /// Recomputes both plots from the current state without changing it.
    pub fn render(&self) -> Result<Frame> {
        self.compute(&self.state, &self.noise)
    }

    /// Applies `message` and returns the recomputed plots.
    ///
    /// # Errors
    ///
    /// * `InvalidParameter` - the value is outside its configured bound, or the
    ///   resulting filter cannot be applied to the grid
    pub fn dispatch(&mut self, message: Message) -> Result<Frame> {
        debug!(?message, "dispatching");
        let result = self.try_dispatch(message);
        if let Err(err) = &result {
            warn!(?message, %err, "message rejected");
        }
        result
    }

    fn try_dispatch(&mut self, message: Message) -> Result<Frame> {
        let mut next = self.state;
        let mut redraw = false;

        match message {
            Message::ParameterChanged(parameter, value) => {
                self.config.bounds.check(parameter, value)?;
                next.set(parameter, value)?;
                redraw = parameter.is_noise()
                    && self.config.noise_refresh == NoiseRefresh::OnNoiseChange
                    && next.value(parameter) != self.state.value(parameter);
            }
            Message::ToggleNoise(show) => next.signal.show_noise = show,
            Message::SelectFilter(choice) => next.filter = choice,
            Message::RegenerateNoise => redraw = true,
            Message::Reset => {
                next = SessionState::from_config(&self.config);
                redraw = true;
            }
        }

        let fresh = redraw.then(|| {
            let mut noise = self.noise.clone();
            noise.regenerate(&mut self.rng);
            noise
        });
        let frame = self.compute(&next, fresh.as_ref().unwrap_or(&self.noise))?;

        self.state = next;
        if let Some(noise) = fresh {
            debug!(samples = noise.len(), "noise trace redrawn");
            self.noise = noise;
        }
        Ok(frame)
    }

    fn compute(&self, state: &SessionState, noise: &NoiseTrace) -> Result<Frame> {
        let signal = self.generator.generate(&state.signal, noise)?;
        let filtered = SignalFilter::new(state.kernel())?.apply(&signal)?;
        trace!(
            mean = signal.mean(),
            rms = signal.rms(),
            peak = signal.peak(),
            filtered_rms = filtered.rms(),
            filter = %state.filter,
            "frame computed"
        );
        Ok(Frame {
            time: self.generator.grid().clone(),
            signal,
            filtered,
        })
    }
}
