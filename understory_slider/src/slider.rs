// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The slider controller: host-facing input handlers around a [`ValueEngine`].
//!
//! Every handler takes an already normalized payload (a page [`Point`], a
//! [`SliderKey`] with [`Modifiers`], a touch count) and returns the
//! [`SliderEvents`] the host should forward to its callbacks, in order.
//!
//! ## Sessions
//!
//! A handle press ([`Slider::handle_mouse_down`], [`Slider::handle_touch_start`])
//! or focus ([`Slider::handle_focus`]) opens a session owned by one [`Capture`].
//! While it is open the host routes that input kind's moves to
//! [`Slider::mouse_move`], [`Slider::touch_move`] or [`Slider::key_down`], and
//! ends it with [`Slider::release`] on mouse-up, touch-end or blur. Inputs of
//! another kind are ignored, so each session has exactly one way out.
//!
//! ## Measurement
//!
//! Handles cannot move until the track has been measured. Call
//! [`Slider::mount`] (and [`Slider::resize`] on layout changes), measure when
//! the host's layout has settled, then hand the result back through
//! [`Slider::complete_measure`] with the ticket.

use alloc::vec::Vec;

use kurbo::Point;

use crate::config::SliderConfig;
use crate::engine::ValueEngine;
use crate::error::ConfigError;
use crate::event::{SliderEvent, SliderEvents, SliderValue};
use crate::geometry::{BarSegment, GeometryMapper, TrackGeometry};
use crate::input::{KeyIntent, Modifiers, SliderKey};
use crate::measure::{MeasureRequest, MeasureScheduler, MeasureState, MeasureTicket};
use crate::session::{Capture, ScrollIntent};

/// A multi-handle range slider.
#[derive(Clone, Debug)]
pub struct Slider {
    engine: ValueEngine,
    geometry: TrackGeometry,
    measure: MeasureScheduler,
    handle_count: usize,
    has_moved: bool,
}

impl Slider {
    /// Creates a slider.
    ///
    /// `handle_count` is the number of custom handles the host renders, or
    /// zero to let the values decide. See [`SliderConfig::initial_values`] for
    /// how `value` and `default_value` are picked.
    pub fn new(
        config: SliderConfig,
        value: &[f64],
        default_value: &[f64],
        handle_count: usize,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let initial = config.initial_values(value, default_value, handle_count);
        Ok(Self {
            engine: ValueEngine::initialize(&initial, config),
            geometry: TrackGeometry::default(),
            measure: MeasureScheduler::new(),
            handle_count,
            has_moved: false,
        })
    }

    /// Applies a new configuration and, in controlled mode, externally owned values.
    ///
    /// With `value` set to `None` the current values are kept and re-aligned
    /// under the new configuration. Returns a measurement request when the
    /// track has not been measured yet.
    pub fn set_props(
        &mut self,
        config: SliderConfig,
        value: Option<&[f64]>,
    ) -> Result<Option<MeasureRequest>, ConfigError> {
        config.validate()?;
        let current = self.engine.values().to_vec();
        let resolved = config.initial_values(value.unwrap_or(&[]), &current, self.handle_count);
        self.engine.reconcile(&resolved, config);
        Ok((!self.geometry.is_measured()).then(|| self.measure.request()))
    }

    /// The slider was attached to the host's layout; measure the track.
    pub fn mount(&mut self) -> MeasureRequest {
        self.measure.request()
    }

    /// The host's layout changed; measure the track again.
    ///
    /// Any measurement still pending is superseded.
    pub fn resize(&mut self) -> MeasureRequest {
        self.measure.request()
    }

    /// Delivers the measurement taken for `ticket`.
    ///
    /// Returns `false`, leaving the geometry untouched, if the ticket was
    /// superseded or cancelled.
    pub fn complete_measure(&mut self, ticket: MeasureTicket, geometry: TrackGeometry) -> bool {
        if !self.measure.complete(ticket) {
            return false;
        }
        tracing::debug!(
            track_length = geometry.track_length,
            handle_size = geometry.handle_size,
            track_start = geometry.track_start,
            "track measured"
        );
        self.geometry = geometry;
        true
    }

    /// The slider is going away.
    ///
    /// Cancels the pending measurement first, returning its ticket so the host
    /// can cancel its timer, then drops any live session without emitting
    /// [`SliderEvent::AfterChange`].
    pub fn teardown(&mut self) -> Option<MeasureTicket> {
        let cancelled = self.measure.cancel();
        self.engine.cancel_drag();
        self.has_moved = false;
        cancelled
    }

    /// Mouse pressed on handle `index`.
    pub fn handle_mouse_down(&mut self, index: usize, point: Point) -> SliderEvents {
        if self.is_disabled() {
            return SliderEvents::new();
        }
        let position = self.mapper().axis_position(point);
        self.start(index, Capture::Mouse, Some(position), None)
    }

    /// Touch started on handle `index`.
    ///
    /// Multi-touch gestures are left to the host.
    pub fn handle_touch_start(
        &mut self,
        index: usize,
        point: Point,
        touch_count: usize,
    ) -> SliderEvents {
        if self.is_disabled() || touch_count > 1 {
            return SliderEvents::new();
        }
        let position = self.mapper().axis_position(point);
        self.start(index, Capture::Touch, Some(position), Some(point))
    }

    /// Handle `index` received keyboard focus.
    pub fn handle_focus(&mut self, index: usize) -> SliderEvents {
        if self.is_disabled() {
            return SliderEvents::new();
        }
        self.start(index, Capture::Keyboard, None, None)
    }

    /// Mouse pressed on the track itself.
    ///
    /// Unless snapping is disabled, the closest handle jumps under the pointer
    /// and a mouse session starts on it, so the press can turn into a drag.
    pub fn track_mouse_down(&mut self, point: Point) -> SliderEvents {
        let mut events = SliderEvents::new();
        if self.is_disabled() {
            return events;
        }
        self.has_moved = false;
        if self.engine.config().snap_drag_disabled {
            return events;
        }

        let mapper = self.mapper();
        let position = mapper.axis_position(point);
        let Some(outcome) = self.engine.seek_from_pointer(position, &mapper) else {
            return events;
        };
        if outcome.moved {
            self.has_moved = true;
            events.push(SliderEvent::Change(self.engine.value()));
        }
        events.extend(
            self.engine
                .start_drag(outcome.index, Capture::Mouse, Some(position), None),
        );
        events
    }

    /// Mouse clicked on the track.
    ///
    /// Emits [`SliderEvent::SliderClicked`] with the value under the pointer,
    /// but only when no handle moved since the press.
    pub fn track_click(&mut self, point: Point) -> SliderEvents {
        let mut events = SliderEvents::new();
        if self.is_disabled() || self.has_moved {
            return events;
        }
        let mapper = self.mapper();
        let offset = mapper.position_to_offset(mapper.axis_position(point));
        if let Some(value) = mapper.offset_to_value(offset) {
            events.push(SliderEvent::SliderClicked(self.engine.config().trim_align(value)));
        }
        events
    }

    /// Mouse moved while a mouse session is open.
    pub fn mouse_move(&mut self, point: Point) -> SliderEvents {
        if self.is_disabled() || !self.is_captured_by(Capture::Mouse) {
            return SliderEvents::new();
        }
        self.has_moved = true;
        let mapper = self.mapper();
        self.engine
            .drag_to(mapper.axis_position(point), &mapper)
            .into_iter()
            .collect()
    }

    /// Touch moved while a touch session is open.
    ///
    /// The first move decides whether the gesture drags the handle or scrolls
    /// the page; a scrolling gesture is ignored until the touch ends.
    pub fn touch_move(&mut self, point: Point, touch_count: usize) -> SliderEvents {
        if self.is_disabled() || touch_count > 1 {
            return SliderEvents::new();
        }
        let Some(session) = self
            .engine
            .session()
            .copied()
            .filter(|session| session.is_captured_by(Capture::Touch))
        else {
            return SliderEvents::new();
        };

        let mapper = self.mapper();
        let position = mapper.axis_position(point);
        let along = session.total_offset(position).unwrap_or(0.0);
        let across = session.origin().map_or(0.0, |origin| {
            mapper.orthogonal_position(point) - mapper.orthogonal_position(origin)
        });
        if self.engine.classify_scroll(along, across) == Some(ScrollIntent::Scrolling) {
            return SliderEvents::new();
        }

        self.has_moved = true;
        self.engine.drag_to(position, &mapper).into_iter().collect()
    }

    /// Key pressed while a keyboard session is open.
    pub fn key_down(&mut self, key: SliderKey, modifiers: Modifiers) -> SliderEvents {
        if self.is_disabled() || !self.is_captured_by(Capture::Keyboard) {
            return SliderEvents::new();
        }
        let Some(intent) = KeyIntent::from_key(key, modifiers) else {
            return SliderEvents::new();
        };
        self.has_moved = true;
        let event = match intent {
            KeyIntent::Step(direction) => self.engine.step_by(direction),
            KeyIntent::Jump(bound) => self.engine.jump_to(bound),
        };
        event.into_iter().collect()
    }

    /// The input kind `capture` let go: mouse-up, touch-end or blur.
    ///
    /// Ends the session, emitting [`SliderEvent::AfterChange`], if it is owned
    /// by `capture`.
    pub fn release(&mut self, capture: Capture) -> SliderEvents {
        if !self.is_captured_by(capture) {
            return SliderEvents::new();
        }
        self.engine.end_drag().into_iter().collect()
    }

    /// The value engine.
    #[must_use]
    pub fn engine(&self) -> &ValueEngine {
        &self.engine
    }

    /// The configuration currently in effect.
    #[must_use]
    pub fn config(&self) -> &SliderConfig {
        self.engine.config()
    }

    /// Returns `true` when the slider ignores input.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.engine.config().disabled
    }

    /// Ordered handle values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        self.engine.values()
    }

    /// Handle values as reported to the host.
    #[must_use]
    pub fn value(&self) -> SliderValue {
        self.engine.value()
    }

    /// Pixel offset of each handle from the `min` edge of the track.
    #[must_use]
    pub fn offsets(&self) -> Vec<f64> {
        self.engine.offsets(&self.mapper())
    }

    /// Handle indices from bottom to top of the stack.
    #[must_use]
    pub fn z_order(&self) -> &[usize] {
        self.engine.z_order()
    }

    /// One-based stacking index of each handle, in handle order.
    #[must_use]
    pub fn z_indices(&self) -> Vec<usize> {
        (0..self.engine.len())
            .map(|index| self.engine.z_index(index).unwrap_or(0))
            .collect()
    }

    /// See [`ValueEngine::active_index`].
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.engine.active_index()
    }

    /// Last accepted track measurement.
    #[must_use]
    pub fn geometry(&self) -> TrackGeometry {
        self.geometry
    }

    /// Whether a measurement is outstanding.
    #[must_use]
    pub fn measure_state(&self) -> MeasureState {
        self.measure.state()
    }

    /// A mapper for the current configuration and geometry.
    #[must_use]
    pub fn mapper(&self) -> GeometryMapper {
        GeometryMapper::from_config(self.engine.config(), self.geometry)
    }

    /// Bars to draw between the handles; empty unless bars are enabled.
    #[must_use]
    pub fn bar_segments(&self) -> Vec<BarSegment> {
        if !self.engine.config().with_bars {
            return Vec::new();
        }
        let mapper = self.mapper();
        mapper.bar_segments(&self.engine.offsets(&mapper))
    }

    fn start(
        &mut self,
        index: usize,
        capture: Capture,
        position: Option<f64>,
        origin: Option<Point>,
    ) -> SliderEvents {
        self.has_moved = false;
        self.engine
            .start_drag(index, capture, position, origin)
            .into_iter()
            .collect()
    }

    fn is_captured_by(&self, capture: Capture) -> bool {
        self.engine
            .session()
            .is_some_and(|session| session.is_captured_by(capture))
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::config::Orientation;

    /// 0..100 over a 200px handle range; x = 10 is value 0, x = 210 is 100.
    fn measured(config: SliderConfig, values: &[f64]) -> Slider {
        let mut slider = Slider::new(config, values, &[], 0).unwrap();
        let request = slider.mount();
        assert!(slider.complete_measure(request.ticket, TrackGeometry::new(220.0, 20.0, 0.0)));
        slider
    }

    fn at(x: f64) -> Point {
        Point::new(x, 0.0)
    }

    #[test]
    fn new_validates_configuration() {
        let result = Slider::new(SliderConfig::new(1.0, 1.0), &[1.0], &[], 0);
        assert!(matches!(result, Err(ConfigError::EmptyRange { .. })));
    }

    #[test]
    fn new_uses_default_value_when_value_is_empty() {
        let slider = Slider::new(SliderConfig::default(), &[], &[25.0, 75.0], 0).unwrap();
        assert_eq!(slider.values(), &[25.0, 75.0]);
        assert_eq!(slider.value(), SliderValue::Multiple(vec![25.0, 75.0]));
    }

    #[test]
    fn mouse_drag_emits_before_change_change_after_change() {
        let mut slider = measured(SliderConfig::default(), &[50.0]);

        let events = slider.handle_mouse_down(0, at(110.0));
        assert_eq!(
            events.as_slice(),
            &[SliderEvent::BeforeChange(SliderValue::Single(50.0))]
        );
        assert_eq!(slider.active_index(), Some(0));

        let events = slider.mouse_move(at(130.0));
        assert_eq!(
            events.as_slice(),
            &[SliderEvent::Change(SliderValue::Single(60.0))]
        );

        // Mouse-up from another input kind does not end a mouse session.
        assert!(slider.release(Capture::Keyboard).is_empty());
        let events = slider.release(Capture::Mouse);
        assert_eq!(
            events.as_slice(),
            &[SliderEvent::AfterChange(SliderValue::Single(60.0))]
        );
        assert_eq!(slider.active_index(), None);
        assert!(slider.mouse_move(at(200.0)).is_empty());
    }

    #[test]
    fn handles_do_not_move_before_measurement() {
        let mut slider = Slider::new(SliderConfig::default(), &[50.0], &[], 0).unwrap();
        slider.handle_mouse_down(0, at(110.0));
        assert!(slider.mouse_move(at(190.0)).is_empty());
        assert_eq!(slider.values(), &[50.0]);
    }

    #[test]
    fn disabled_slider_ignores_input() {
        let mut slider = measured(SliderConfig::default().with_disabled(true), &[50.0]);
        assert!(slider.handle_mouse_down(0, at(110.0)).is_empty());
        assert!(slider.handle_focus(0).is_empty());
        assert!(slider.track_mouse_down(at(30.0)).is_empty());
        assert!(slider.track_click(at(30.0)).is_empty());
        assert_eq!(slider.active_index(), None);
        assert_eq!(slider.values(), &[50.0]);
    }

    #[test]
    fn keyboard_session_steps_and_jumps() {
        let mut slider = measured(SliderConfig::new(0.0, 10.0), &[4.0]);
        // Keys without a session do nothing.
        assert!(slider.key_down(SliderKey::ArrowRight, Modifiers::empty()).is_empty());

        slider.handle_focus(0);
        slider.key_down(SliderKey::ArrowRight, Modifiers::empty());
        assert_eq!(slider.values(), &[5.0]);
        slider.key_down(SliderKey::ArrowUp, Modifiers::empty());
        slider.key_down(SliderKey::ArrowLeft, Modifiers::empty());
        assert_eq!(slider.values(), &[3.0]);

        assert!(slider.key_down(SliderKey::End, Modifiers::SHIFT).is_empty());
        slider.key_down(SliderKey::End, Modifiers::empty());
        assert_eq!(slider.values(), &[10.0]);
        slider.key_down(SliderKey::Home, Modifiers::META);
        assert_eq!(slider.values(), &[0.0]);

        let events = slider.release(Capture::Keyboard);
        assert_eq!(
            events.as_slice(),
            &[SliderEvent::AfterChange(SliderValue::Single(0.0))]
        );
    }

    #[test]
    fn track_press_seeks_then_drags() {
        let mut slider = measured(SliderConfig::default(), &[20.0, 80.0]);
        // x = 130 is value 60, closest to the second handle.
        let events = slider.track_mouse_down(at(130.0));
        assert_eq!(
            events.as_slice(),
            &[
                SliderEvent::Change(SliderValue::Multiple(vec![20.0, 60.0])),
                SliderEvent::BeforeChange(SliderValue::Multiple(vec![20.0, 60.0])),
            ]
        );
        assert_eq!(slider.active_index(), Some(1));
        assert_eq!(slider.z_order(), &[0, 1]);

        slider.mouse_move(at(150.0));
        assert_eq!(slider.values(), &[20.0, 70.0]);
        // The press moved a handle, so the click is not reported.
        slider.release(Capture::Mouse);
        assert!(slider.track_click(at(150.0)).is_empty());
    }

    #[test]
    fn click_without_movement_reports_value() {
        let mut slider = measured(
            SliderConfig::default().with_snap_drag_disabled(true),
            &[20.0],
        );
        assert!(slider.track_mouse_down(at(100.0)).is_empty());
        assert_eq!(slider.values(), &[20.0]);
        assert_eq!(
            slider.track_click(at(100.0)).as_slice(),
            &[SliderEvent::SliderClicked(45.0)]
        );
    }

    #[test]
    fn click_on_the_handle_itself_is_reported() {
        let mut slider = measured(SliderConfig::default(), &[20.0]);
        // x = 50 is exactly value 20: the seek commits no change.
        let events = slider.track_mouse_down(at(50.0));
        assert_eq!(
            events.as_slice(),
            &[SliderEvent::BeforeChange(SliderValue::Single(20.0))]
        );
        slider.release(Capture::Mouse);
        assert_eq!(
            slider.track_click(at(50.0)).as_slice(),
            &[SliderEvent::SliderClicked(20.0)]
        );
    }

    #[test]
    fn touch_scroll_is_ignored_until_touch_end() {
        let mut slider = measured(SliderConfig::default(), &[50.0]);
        slider.handle_touch_start(0, Point::new(110.0, 300.0), 1);

        // Mostly vertical: the page scrolls.
        assert!(slider.touch_move(Point::new(112.0, 340.0), 1).is_empty());
        assert_eq!(slider.active_index(), None);
        assert!(slider.touch_move(Point::new(190.0, 340.0), 1).is_empty());
        assert_eq!(slider.values(), &[50.0]);

        let events = slider.release(Capture::Touch);
        assert_eq!(
            events.as_slice(),
            &[SliderEvent::AfterChange(SliderValue::Single(50.0))]
        );
    }

    #[test]
    fn touch_drag_moves_the_handle() {
        let mut slider = measured(SliderConfig::default(), &[50.0]);
        slider.handle_touch_start(0, Point::new(110.0, 300.0), 1);
        let events = slider.touch_move(Point::new(150.0, 305.0), 1);
        assert_eq!(
            events.as_slice(),
            &[SliderEvent::Change(SliderValue::Single(70.0))]
        );
        // A second finger is left to the host.
        assert!(slider.touch_move(Point::new(190.0, 305.0), 2).is_empty());
        assert_eq!(slider.values(), &[70.0]);
    }

    #[test]
    fn multi_touch_start_is_ignored() {
        let mut slider = measured(SliderConfig::default(), &[50.0]);
        assert!(slider.handle_touch_start(0, at(110.0), 2).is_empty());
        assert_eq!(slider.active_index(), None);
    }

    #[test]
    fn vertical_inverted_drag_increases_towards_the_top() {
        let config = SliderConfig::default()
            .with_orientation(Orientation::Vertical)
            .with_invert(true);
        let mut slider = Slider::new(config, &[50.0], &[], 0).unwrap();
        let request = slider.mount();
        // Track spans y = 0..220; the `min` end is at the bottom.
        slider.complete_measure(request.ticket, TrackGeometry::new(220.0, 20.0, 220.0));

        slider.handle_mouse_down(0, Point::new(0.0, 110.0));
        slider.mouse_move(Point::new(0.0, 70.0));
        assert_eq!(slider.values(), &[70.0]);
        assert_eq!(slider.offsets(), vec![140.0]);
    }

    #[test]
    fn stale_measurements_are_dropped() {
        let mut slider = Slider::new(SliderConfig::default(), &[50.0], &[], 0).unwrap();
        let first = slider.mount();
        let second = slider.resize();
        assert_eq!(second.cancelled, Some(first.ticket));

        assert!(!slider.complete_measure(first.ticket, TrackGeometry::new(999.0, 1.0, 0.0)));
        assert_eq!(slider.geometry(), TrackGeometry::default());
        assert!(slider.complete_measure(second.ticket, TrackGeometry::new(220.0, 20.0, 0.0)));
        assert_eq!(slider.offsets(), vec![100.0]);
    }

    #[test]
    fn set_props_requests_measurement_only_while_unmeasured() {
        let mut slider = Slider::new(SliderConfig::default(), &[50.0], &[], 0).unwrap();
        let request = slider.set_props(SliderConfig::default(), None).unwrap();
        assert!(request.is_some());

        let mut slider = measured(SliderConfig::default(), &[50.0]);
        assert_eq!(slider.set_props(SliderConfig::default(), None), Ok(None));
    }

    #[test]
    fn set_props_reconciles_controlled_values() {
        let mut slider = measured(SliderConfig::default(), &[10.0, 20.0, 30.0]);
        slider
            .set_props(SliderConfig::default(), Some(&[15.0, 25.0]))
            .unwrap();
        assert_eq!(slider.values(), &[15.0, 25.0]);

        // Uncontrolled: existing values are re-aligned to the new grid.
        let config = SliderConfig::default().with_step(10.0);
        slider.set_props(config, None).unwrap();
        assert_eq!(slider.values(), &[20.0, 30.0]);
    }

    #[test]
    fn set_props_rejects_invalid_configuration() {
        let mut slider = measured(SliderConfig::default(), &[10.0]);
        let result = slider.set_props(SliderConfig::default().with_step(-1.0), None);
        assert_eq!(result, Err(ConfigError::NonPositiveStep(-1.0)));
        assert_eq!(slider.config(), &SliderConfig::default());
    }

    #[test]
    fn teardown_cancels_measurement_and_session() {
        let mut slider = measured(SliderConfig::default(), &[50.0]);
        let request = slider.resize();
        slider.handle_mouse_down(0, at(110.0));

        assert_eq!(slider.teardown(), Some(request.ticket));
        assert_eq!(slider.measure_state(), MeasureState::Idle);
        assert_eq!(slider.active_index(), None);
        assert!(slider.release(Capture::Mouse).is_empty());
    }

    #[test]
    fn z_indices_follow_the_last_touched_handle() {
        let mut slider = measured(SliderConfig::default(), &[10.0, 50.0, 90.0]);
        assert_eq!(slider.z_indices(), vec![1, 2, 3]);
        slider.handle_focus(0);
        assert_eq!(slider.z_indices(), vec![3, 1, 2]);
        slider.release(Capture::Keyboard);
        slider.handle_mouse_down(1, at(110.0));
        assert_eq!(slider.z_indices(), vec![2, 3, 1]);
    }

    #[test]
    fn bars_are_only_produced_when_enabled() {
        let slider = measured(SliderConfig::default(), &[20.0, 60.0]);
        assert!(slider.bar_segments().is_empty());

        let slider = measured(SliderConfig::default().with_bars(true), &[20.0, 60.0]);
        let bars = slider.bar_segments();
        assert_eq!(bars.len(), 3);
        assert_eq!(
            bars[1],
            BarSegment {
                start: 40.0,
                end_inset: 80.0
            }
        );
    }
}
