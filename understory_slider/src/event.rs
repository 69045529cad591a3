// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Notifications a slider hands back to its host.

use alloc::vec::Vec;

use smallvec::SmallVec;

/// A slider's value as seen by the host.
///
/// Internally values are always a sequence; a single-handle slider reports a
/// bare number at this boundary.
#[derive(Clone, Debug, PartialEq)]
pub enum SliderValue {
    /// The value of a single-handle slider.
    Single(f64),
    /// The ordered values of a multi-handle (or empty) slider.
    Multiple(Vec<f64>),
}

impl SliderValue {
    /// Wraps `values`, unwrapping a one-element sequence.
    #[must_use]
    pub fn from_slice(values: &[f64]) -> Self {
        match values {
            [single] => Self::Single(*single),
            _ => Self::Multiple(values.to_vec()),
        }
    }

    /// The values as a sequence, regardless of arity.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        match self {
            Self::Single(value) => core::slice::from_ref(value),
            Self::Multiple(values) => values,
        }
    }
}

impl From<f64> for SliderValue {
    fn from(value: f64) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<f64>> for SliderValue {
    fn from(values: Vec<f64>) -> Self {
        match values.as_slice() {
            [single] => Self::Single(*single),
            _ => Self::Multiple(values),
        }
    }
}

/// Notification emitted by the engine for the host to forward to its callbacks.
#[derive(Clone, Debug, PartialEq)]
pub enum SliderEvent {
    /// A handle is about to be moved; carries the values before the interaction.
    BeforeChange(SliderValue),
    /// Values were committed.
    Change(SliderValue),
    /// An interaction ended; carries the final values.
    AfterChange(SliderValue),
    /// The track was clicked without moving any handle; carries the value under
    /// the pointer.
    SliderClicked(f64),
}

/// Events produced by a single input call, in emission order.
pub type SliderEvents = SmallVec<[SliderEvent; 2]>;
