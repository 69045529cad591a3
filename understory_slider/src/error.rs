// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors.

use thiserror::Error;

/// Error returned when a [`SliderConfig`](crate::SliderConfig) cannot drive the engine.
///
/// The engine itself never fails: every value it receives is clamped and
/// aligned. Invalid configurations would instead surface as `NaN` or infinite
/// offsets during geometry math, so they are rejected up front.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// `min` or `max` is `NaN` or infinite.
    #[error("slider bounds must be finite (min: {min}, max: {max})")]
    NonFiniteBound {
        /// Configured lower bound.
        min: f64,
        /// Configured upper bound.
        max: f64,
    },
    /// `min` is not strictly less than `max`.
    #[error("slider range is empty: min ({min}) must be less than max ({max})")]
    EmptyRange {
        /// Configured lower bound.
        min: f64,
        /// Configured upper bound.
        max: f64,
    },
    /// A fixed increment is zero, negative or not finite.
    #[error("step increment must be positive and finite, got {0}")]
    NonPositiveStep(f64),
    /// An explicit step set contains no entries.
    #[error("step set must contain at least one value")]
    EmptyStepSet,
    /// An explicit step set is not strictly ascending (or holds `NaN`).
    #[error("step set must be strictly ascending, found {previous} followed by {next}")]
    UnorderedStepSet {
        /// The earlier entry.
        previous: f64,
        /// The entry that does not exceed `previous`.
        next: f64,
    },
    /// An explicit step set entry lies outside `[min, max]`.
    #[error("step set entry {value} lies outside [{min}, {max}]")]
    StepOutOfRange {
        /// The offending entry.
        value: f64,
        /// Configured lower bound.
        min: f64,
        /// Configured upper bound.
        max: f64,
    },
    /// `min_distance` is negative or not finite.
    #[error("min_distance must be finite and non-negative, got {0}")]
    NegativeMinDistance(f64),
}
