// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The value engine: ordered handle values, stacking order, the current drag
//! session, and the constraint resolution that keeps handles ordered and
//! spaced.
//!
//! ## Constraint resolution
//!
//! Every committed move goes through [`ValueEngine::move_active`]:
//!
//! - Without pearling, the moved handle is clamped against its immediate
//!   neighbors (`min_distance` away from each). Other handles never move.
//! - With pearling, the moved handle takes the new value and pushes its
//!   successors (when moving up) or predecessors (when moving down) so they
//!   stay `min_distance` apart. The pushed end is then trimmed so the last `k`
//!   handles still fit below `max` (or above `min`).
//!
//! Both loops are bounded by the number of handles. When `min_distance` is too
//! large for every handle to fit, the trimmed end wins and handles at the far
//! end may be left too close together or past a bound.
//!
//! ## Example
//!
//! ```
//! use understory_slider::{Capture, SliderConfig, ValueEngine};
//!
//! let config = SliderConfig::new(0.0, 100.0)
//!     .with_min_distance(10.0)
//!     .with_pearling(true);
//! let mut engine = ValueEngine::initialize(&[20.0, 50.0, 80.0], config);
//!
//! engine.start_drag(0, Capture::Keyboard, None, None);
//! engine.move_active(65.0);
//! assert_eq!(engine.values(), &[65.0, 75.0, 85.0]);
//! ```

use alloc::vec::Vec;

use kurbo::Point;
use smallvec::SmallVec;

use crate::align::round_to_precision;
use crate::config::{SliderConfig, Step};
use crate::event::{SliderEvent, SliderValue};
use crate::geometry::GeometryMapper;
use crate::input::{Bound, StepDirection};
use crate::session::{Capture, DragSession, ScrollIntent};

/// Result of a successful [`ValueEngine::seek_from_pointer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeekOutcome {
    /// Handle that was moved under the pointer.
    pub index: usize,
    /// Whether its value actually changed.
    pub moved: bool,
}

/// Stateful holder of the ordered value set.
#[derive(Clone, Debug)]
pub struct ValueEngine {
    config: SliderConfig,
    values: SmallVec<[f64; 4]>,
    z_order: SmallVec<[usize; 4]>,
    session: Option<DragSession>,
}

impl ValueEngine {
    /// Creates an engine holding `raw`, each value clamped and aligned.
    ///
    /// Handles are stacked in index order.
    #[must_use]
    pub fn initialize(raw: &[f64], config: SliderConfig) -> Self {
        let values = raw.iter().map(|&value| config.trim_align(value)).collect();
        let z_order = (0..raw.len()).collect();
        Self {
            config,
            values,
            z_order,
            session: None,
        }
    }

    /// The configuration currently in effect.
    #[must_use]
    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    /// Ordered handle values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Handle values, unwrapped to a single number for one-handle sliders.
    #[must_use]
    pub fn value(&self) -> SliderValue {
        SliderValue::from_slice(&self.values)
    }

    /// Number of handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` for a slider without handles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Handle indices from bottom to top of the stack.
    #[must_use]
    pub fn z_order(&self) -> &[usize] {
        &self.z_order
    }

    /// One-based stacking index of handle `index`, higher is on top.
    #[must_use]
    pub fn z_index(&self, index: usize) -> Option<usize> {
        self.z_order
            .iter()
            .position(|&i| i == index)
            .map(|position| position + 1)
    }

    /// The live drag session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Index of the handle being moved.
    ///
    /// `None` while idle, and while a touch gesture is scrolling the page.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.session
            .filter(|session| !session.is_scrolling())
            .map(|session| session.index())
    }

    /// Pixel offsets of every handle.
    #[must_use]
    pub fn offsets(&self, mapper: &GeometryMapper) -> Vec<f64> {
        self.values
            .iter()
            .map(|&value| mapper.value_to_offset(value))
            .collect()
    }

    /// Brings the engine in line with externally supplied values.
    ///
    /// Indices present in both `external` and the engine take the external
    /// value, clamped and aligned under `config`. If `external` is shorter the
    /// engine is truncated to match; extra external values are ignored, the
    /// engine never grows.
    pub fn reconcile(&mut self, external: &[f64], config: SliderConfig) {
        for (value, &incoming) in self.values.iter_mut().zip(external) {
            *value = config.trim_align(incoming);
        }
        if self.values.len() > external.len() {
            let len = external.len();
            self.values.truncate(len);
            self.z_order.retain(|index| *index < len);
            if self.session.is_some_and(|session| session.index() >= len) {
                self.session = None;
            }
        }
        self.config = config;
    }

    /// Opens a drag session on handle `index` and raises it to the top of the stack.
    ///
    /// Returns the [`SliderEvent::BeforeChange`] notification, or `None` if
    /// `index` is out of range. Any previous session is replaced.
    pub fn start_drag(
        &mut self,
        index: usize,
        capture: Capture,
        start_position: Option<f64>,
        origin: Option<Point>,
    ) -> Option<SliderEvent> {
        let start_value = *self.values.get(index)?;
        self.z_order.retain(|i| *i != index);
        self.z_order.push(index);
        self.session = Some(DragSession::new(
            index,
            start_value,
            capture,
            start_position,
            origin,
        ));
        tracing::trace!(index, ?capture, start_value, "drag started");
        Some(SliderEvent::BeforeChange(self.value()))
    }

    /// Moves the active handle to follow the pointer at `position`.
    ///
    /// The pointer travel since the drag started is converted into a value
    /// delta, added to the start value, clamped, aligned and resolved against
    /// the other handles. Returns [`SliderEvent::Change`] only if the handle's
    /// value changed.
    pub fn drag_to(&mut self, position: f64, mapper: &GeometryMapper) -> Option<SliderEvent> {
        let session = self.session?;
        if session.is_scrolling() {
            return None;
        }
        let start = session.start_position()?;
        let delta = mapper.pixels_to_value_delta(mapper.drag_delta(start, position))?;
        let candidate = self.config.trim_align(session.start_value() + delta);
        self.move_active(candidate)
    }

    /// Classifies the live touch gesture as a drag or a scroll.
    ///
    /// See [`DragSession::classify_scroll`].
    pub fn classify_scroll(&mut self, along: f64, across: f64) -> Option<ScrollIntent> {
        self.session
            .as_mut()
            .map(|session| session.classify_scroll(along, across))
    }

    /// Jumps the handle closest to the pointer at `position` under the pointer.
    ///
    /// The whole move is rejected if afterwards any two adjacent handles would
    /// be closer than `min_distance` (or out of order). Nothing happens while
    /// the track is unmeasured.
    pub fn seek_from_pointer(
        &mut self,
        position: f64,
        mapper: &GeometryMapper,
    ) -> Option<SeekOutcome> {
        let offset = mapper.position_to_offset(position);
        let index = self.closest_index(offset, mapper)?;
        let next = self.config.trim_align(mapper.offset_to_value(offset)?);

        let mut tentative = self.values.clone();
        tentative[index] = next;
        let min_distance = self.config.min_distance;
        if tentative
            .windows(2)
            .any(|pair| pair[1] - pair[0] < min_distance)
        {
            tracing::debug!(index, next, "seek rejected, handles would be too close");
            return None;
        }

        let moved = self.values[index] != next;
        self.values = tentative;
        Some(SeekOutcome { index, moved })
    }

    /// Moves the active handle one step in `direction`.
    ///
    /// Fixed increments are clamped to `[min, max]`; explicit step sets move to
    /// the adjacent entry and stay put at either end.
    pub fn step_by(&mut self, direction: StepDirection) -> Option<SliderEvent> {
        let index = self.active_index()?;
        let current = self.values[index];
        let (min, max) = (self.config.min, self.config.max);
        let target = match (&self.config.step, direction) {
            (Step::Increment(step), StepDirection::Up) => {
                round_to_precision((current + step).min(max))
            }
            (Step::Increment(step), StepDirection::Down) => {
                round_to_precision((current - step).max(min))
            }
            (Step::Set(set), StepDirection::Up) => set
                .iter()
                .copied()
                .find(|&entry| entry > current)
                .unwrap_or(current),
            (Step::Set(set), StepDirection::Down) => set
                .iter()
                .rev()
                .copied()
                .find(|&entry| entry < current)
                .unwrap_or(current),
        };
        self.move_active(target)
    }

    /// Moves the active handle to `min` or `max`.
    pub fn jump_to(&mut self, bound: Bound) -> Option<SliderEvent> {
        let target = match bound {
            Bound::Min => self.config.min,
            Bound::Max => self.config.max,
        };
        self.move_active(target)
    }

    /// Resolves constraints for moving the active handle to `new_value` and commits.
    ///
    /// Returns [`SliderEvent::Change`] if the active handle's stored value
    /// changed, `None` otherwise (including when no handle is active).
    pub fn move_active(&mut self, new_value: f64) -> Option<SliderEvent> {
        let index = self.active_index()?;
        let len = self.values.len();
        let old_value = *self.values.get(index)?;
        let min_distance = self.config.min_distance;
        let mut new_value = new_value;

        if !self.config.pearling {
            if index > 0 {
                let before = self.values[index - 1];
                if new_value < before + min_distance {
                    new_value = before + min_distance;
                }
            }
            if index + 1 < len {
                let after = self.values[index + 1];
                if new_value > after - min_distance {
                    new_value = after - min_distance;
                }
            }
        }

        self.values[index] = new_value;

        if self.config.pearling && len > 1 {
            if new_value > old_value {
                self.push_succeeding(index);
                self.trim_succeeding();
            } else if new_value < old_value {
                self.push_preceding(index);
                self.trim_preceding();
            }
        }

        if self.values[index] == old_value {
            return None;
        }
        tracing::trace!(index, old_value, new_value = self.values[index], "value changed");
        Some(SliderEvent::Change(self.value()))
    }

    /// Closes the drag session.
    ///
    /// Returns [`SliderEvent::AfterChange`] with the final values, or `None`
    /// if no session was open.
    pub fn end_drag(&mut self) -> Option<SliderEvent> {
        let session = self.session.take()?;
        tracing::trace!(index = session.index(), capture = ?session.capture(), "drag ended");
        Some(SliderEvent::AfterChange(self.value()))
    }

    /// Drops the drag session without notifying anyone.
    ///
    /// Used on teardown, when there is nobody left to receive
    /// [`SliderEvent::AfterChange`].
    pub fn cancel_drag(&mut self) -> Option<DragSession> {
        let session = self.session.take()?;
        tracing::trace!(index = session.index(), "drag cancelled");
        Some(session)
    }

    /// Closest handle to `offset`; the lower index wins ties.
    fn closest_index(&self, offset: f64, mapper: &GeometryMapper) -> Option<usize> {
        let mut closest = None;
        let mut min_dist = f64::MAX;
        for (index, &value) in self.values.iter().enumerate() {
            let dist = (offset - mapper.value_to_offset(value)).abs();
            if dist < min_dist {
                min_dist = dist;
                closest = Some(index);
            }
        }
        closest
    }

    fn push_succeeding(&mut self, index: usize) {
        let min_distance = self.config.min_distance;
        let mut i = index;
        while i + 1 < self.values.len() {
            let padding = self.values[i] + min_distance;
            if padding <= self.values[i + 1] {
                break;
            }
            self.values[i + 1] = self.config.align(padding);
            i += 1;
        }
    }

    fn trim_succeeding(&mut self) {
        let len = self.values.len();
        for k in 0..len {
            let cap = self.config.max - k as f64 * self.config.min_distance;
            let value = &mut self.values[len - 1 - k];
            if *value > cap {
                *value = cap;
            }
        }
    }

    fn push_preceding(&mut self, index: usize) {
        let min_distance = self.config.min_distance;
        let mut i = index;
        while i > 0 {
            let padding = self.values[i] - min_distance;
            if padding >= self.values[i - 1] {
                break;
            }
            self.values[i - 1] = self.config.align(padding);
            i -= 1;
        }
    }

    fn trim_preceding(&mut self) {
        for k in 0..self.values.len() {
            let floor = self.config.min + k as f64 * self.config.min_distance;
            let value = &mut self.values[k];
            if *value < floor {
                *value = floor;
            }
        }
    }
}
