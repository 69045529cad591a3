// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slider configuration: value domain, step grid and handle behavior.

use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::align::{align_to_increment, align_to_set, clamp, round_to_precision, spread};
use crate::error::ConfigError;

/// Axis along which the slider track runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Orientation {
    /// The track runs left to right.
    #[default]
    Horizontal,
    /// The track runs top to bottom.
    Vertical,
}

/// The discrete grid handles snap to.
#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    /// A fixed positive increment anchored at the configured `min`.
    Increment(f64),
    /// An explicit, strictly ascending set of allowed values.
    Set(Vec<f64>),
}

impl Default for Step {
    fn default() -> Self {
        Self::Increment(1.0)
    }
}

impl Step {
    /// Snaps `value` onto this grid.
    ///
    /// `min` anchors the increment grid; it is ignored for explicit sets.
    #[must_use]
    pub fn align(&self, value: f64, min: f64) -> f64 {
        match self {
            Self::Increment(step) => align_to_increment(value, min, *step),
            Self::Set(set) => align_to_set(value, set),
        }
    }
}

/// Configuration snapshot for a slider.
///
/// A configuration is treated as immutable for the duration of a render cycle;
/// hosts replace it wholesale through [`Slider::set_props`](crate::Slider::set_props)
/// or [`ValueEngine::reconcile`](crate::ValueEngine::reconcile).
#[derive(Clone, Debug, PartialEq)]
pub struct SliderConfig {
    /// Lower bound of the value domain.
    pub min: f64,
    /// Upper bound of the value domain.
    pub max: f64,
    /// Grid values are snapped to.
    pub step: Step,
    /// Minimum gap kept between adjacent handles.
    pub min_distance: f64,
    /// When `true`, a moving handle pushes its neighbors instead of stopping at them.
    pub pearling: bool,
    /// Axis of the track.
    pub orientation: Orientation,
    /// Reverses the mapping so that `max` sits at the start of the track.
    pub invert: bool,
    /// Ignore all input.
    pub disabled: bool,
    /// Do not move the closest handle when the track itself is pressed.
    pub snap_drag_disabled: bool,
    /// Whether the renderer draws bars between handles.
    pub with_bars: bool,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            step: Step::default(),
            min_distance: 0.0,
            pearling: false,
            orientation: Orientation::default(),
            invert: false,
            disabled: false,
            snap_drag_disabled: false,
            with_bars: false,
        }
    }
}

impl SliderConfig {
    /// Creates a configuration over `[min, max]` with default options.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            ..Self::default()
        }
    }

    /// Sets a fixed step increment.
    #[must_use]
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Step::Increment(step);
        self
    }

    /// Replaces the increment with an explicit set of allowed values.
    #[must_use]
    pub fn with_step_set(mut self, set: impl Into<Vec<f64>>) -> Self {
        self.step = Step::Set(set.into());
        self
    }

    /// Sets the minimum gap between adjacent handles.
    #[must_use]
    pub fn with_min_distance(mut self, min_distance: f64) -> Self {
        self.min_distance = min_distance;
        self
    }

    /// Enables or disables pearling.
    #[must_use]
    pub fn with_pearling(mut self, pearling: bool) -> Self {
        self.pearling = pearling;
        self
    }

    /// Sets the track orientation.
    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Enables or disables inversion.
    #[must_use]
    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Enables or disables the slider.
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Enables or disables snapping the closest handle on track presses.
    #[must_use]
    pub fn with_snap_drag_disabled(mut self, snap_drag_disabled: bool) -> Self {
        self.snap_drag_disabled = snap_drag_disabled;
        self
    }

    /// Enables or disables bars between handles.
    #[must_use]
    pub fn with_bars(mut self, with_bars: bool) -> Self {
        self.with_bars = with_bars;
        self
    }

    /// Checks that this configuration can drive the engine.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.min, self.max);
        if !min.is_finite() || !max.is_finite() {
            return Err(ConfigError::NonFiniteBound { min, max });
        }
        if min >= max {
            return Err(ConfigError::EmptyRange { min, max });
        }
        match &self.step {
            Step::Increment(step) => {
                if !step.is_finite() || *step <= 0.0 {
                    return Err(ConfigError::NonPositiveStep(*step));
                }
            }
            Step::Set(set) => {
                let Some(first) = set.first() else {
                    return Err(ConfigError::EmptyStepSet);
                };
                for &value in set {
                    if !(min..=max).contains(&value) {
                        return Err(ConfigError::StepOutOfRange { value, min, max });
                    }
                }
                let mut previous = *first;
                for &next in &set[1..] {
                    // Also rejects NaN, which never compares greater.
                    if next.partial_cmp(&previous) != Some(Ordering::Greater) {
                        return Err(ConfigError::UnorderedStepSet { previous, next });
                    }
                    previous = next;
                }
            }
        }
        if !self.min_distance.is_finite() || self.min_distance < 0.0 {
            return Err(ConfigError::NegativeMinDistance(self.min_distance));
        }
        Ok(())
    }

    /// Pins `value` into `[min, max]`.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        clamp(value, self.min, self.max)
    }

    /// Snaps `value` onto the step grid.
    #[must_use]
    pub fn align(&self, value: f64) -> f64 {
        self.step.align(value, self.min)
    }

    /// Clamps, then aligns `value`.
    ///
    /// When the step does not divide the range, the grid point nearest to a
    /// bound can lie past it; the result then steps back onto the last grid
    /// point inside `[min, max]`.
    #[must_use]
    pub fn trim_align(&self, value: f64) -> f64 {
        let aligned = self.align(self.clamp(value));
        match self.step {
            Step::Increment(step) if aligned > self.max => round_to_precision(aligned - step),
            Step::Increment(step) if aligned < self.min => round_to_precision(aligned + step),
            _ => aligned,
        }
    }

    /// Picks the starting values for `handle_count` handles.
    ///
    /// A `handle_count` of zero means the host did not fix the number of
    /// handles, so whichever of `value` or `default_value` is present wins.
    /// Otherwise the first of the two whose length matches is used; if neither
    /// does, a warning is logged and the handles are spread evenly over
    /// `[min, max]`.
    #[must_use]
    pub fn initial_values(
        &self,
        value: &[f64],
        default_value: &[f64],
        handle_count: usize,
    ) -> Vec<f64> {
        if handle_count == 0 {
            return if value.is_empty() {
                default_value.to_vec()
            } else {
                value.to_vec()
            };
        }
        if value.len() == handle_count {
            return value.to_vec();
        }
        if default_value.len() == handle_count {
            return default_value.to_vec();
        }
        tracing::warn!(
            handle_count,
            value_len = value.len(),
            default_value_len = default_value.len(),
            "number of values does not match number of handles, spreading handles evenly"
        );
        spread(self.min, self.max, handle_count)
    }
}
