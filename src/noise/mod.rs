//! Additive measurement noise.
//!
//! The noise realisation is owned session state: a `NoiseTrace` is drawn once
//! and handed to the generator on every call, so it only changes when the
//! owner decides to redraw it.

mod trace;

pub use trace::{NoiseParams, NoiseTrace};
