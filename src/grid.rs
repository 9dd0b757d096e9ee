//! Evenly spaced sample times shared by every signal in a session.

use crate::{LabError, Result};

/// An immutable, evenly spaced sequence of sample times over `[start, end]`.
///
/// Both endpoints are included, so a grid of `points` samples has a step of
/// `(end - start) / (points - 1)`. A single-point grid contains only `start`.
///
/// # Examples
///
/// ```
/// use sinelab::TimeGrid;
///
/// let grid = TimeGrid::linspace(0.0, 10.0, 1000).unwrap();
/// assert_eq!(grid.len(), 1000);
/// assert_eq!(grid.times()[0], 0.0);
/// assert_eq!(grid.times()[999], 10.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    start: f64,
    end: f64,
    times: Vec<f64>,
}

impl TimeGrid {
    /// Creates a grid of `points` samples from `start` to `end` inclusive.
    ///
    /// # Arguments
    ///
    /// * `start` - First sample time
    /// * `end` - Last sample time, must be greater than `start` when `points > 1`
    /// * `points` - Number of samples, must be non-zero
    pub fn linspace(start: f64, end: f64, points: usize) -> Result<Self> {
        if points == 0 {
            return Err(LabError::invalid("points", "grid needs at least one sample"));
        }
        if !start.is_finite() || !end.is_finite() {
            return Err(LabError::invalid("grid", "bounds must be finite"));
        }
        if points > 1 && end <= start {
            return Err(LabError::invalid(
                "grid",
                format!("end ({end}) must be greater than start ({start})"),
            ));
        }

        let times = if points == 1 {
            vec![start]
        } else {
            let step = (end - start) / (points - 1) as f64;
            // Last sample is pinned to `end` so it does not drift by rounding
            (0..points)
                .map(|i| if i == points - 1 { end } else { start + step * i as f64 })
                .collect()
        };

        Ok(Self { start, end, times })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// Spacing between neighbouring samples (zero for a single-point grid).
    pub fn step(&self) -> f64 {
        if self.times.len() < 2 {
            0.0
        } else {
            (self.end - self.start) / (self.times.len() - 1) as f64
        }
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.times.iter().copied()
    }
}
