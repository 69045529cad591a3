// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag session: the state that lives between the start and the end of one
//! interaction with a handle.
//!
//! ## Usage
//!
//! 1) A session is opened by [`ValueEngine::start_drag`](crate::ValueEngine::start_drag)
//!    with the [`Capture`] that owns it.
//! 2) Pointer moves are measured against the start position with
//!    [`DragSession::total_offset`].
//! 3) Only a release from the owning capture ends the session, so a stray
//!    mouse-up cannot end a keyboard session and vice versa.
//!
//! ## Minimal example
//!
//! ```
//! use understory_slider::{Capture, DragSession};
//!
//! let session = DragSession::new(1, 40.0, Capture::Mouse, Some(120.0), None);
//! assert_eq!(session.index(), 1);
//! assert_eq!(session.total_offset(150.0), Some(30.0));
//! assert!(session.is_captured_by(Capture::Mouse));
//! assert!(!session.is_captured_by(Capture::Keyboard));
//! ```

use kurbo::Point;

/// The input source that owns a drag session.
///
/// Starting a session subscribes the host to the move/release events of this
/// source; ending it (whatever the path) releases that subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capture {
    /// Mouse moves and mouse-up.
    Mouse,
    /// Single-finger touch moves and touch-end.
    Touch,
    /// Key presses and focus loss.
    Keyboard,
}

/// Whether a touch gesture drags the handle or scrolls the page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollIntent {
    /// No touch move has been seen yet.
    #[default]
    Undecided,
    /// The gesture moves the handle.
    Dragging,
    /// The gesture scrolls; the handle stays put until the touch ends.
    Scrolling,
}

/// State of one interaction with a handle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    index: usize,
    start_value: f64,
    capture: Capture,
    start_position: Option<f64>,
    origin: Option<Point>,
    scroll: ScrollIntent,
}

impl DragSession {
    /// Opens a session on handle `index` currently holding `start_value`.
    ///
    /// `start_position` is the pointer coordinate along the track; keyboard
    /// sessions have none. `origin` is the full pointer position, used by
    /// touch sessions to tell drags from scrolls.
    #[must_use]
    pub fn new(
        index: usize,
        start_value: f64,
        capture: Capture,
        start_position: Option<f64>,
        origin: Option<Point>,
    ) -> Self {
        Self {
            index,
            start_value,
            capture,
            start_position,
            origin,
            scroll: ScrollIntent::Undecided,
        }
    }

    /// Index of the handle being moved.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Value of the handle when the session started.
    #[must_use]
    pub fn start_value(&self) -> f64 {
        self.start_value
    }

    /// Pointer coordinate along the track when the session started.
    #[must_use]
    pub fn start_position(&self) -> Option<f64> {
        self.start_position
    }

    /// Full pointer position when the session started.
    #[must_use]
    pub fn origin(&self) -> Option<Point> {
        self.origin
    }

    /// The input source owning this session.
    #[must_use]
    pub fn capture(&self) -> Capture {
        self.capture
    }

    /// Returns `true` if a release from `capture` ends this session.
    #[must_use]
    pub fn is_captured_by(&self, capture: Capture) -> bool {
        self.capture == capture
    }

    /// Travel along the track since the session started.
    #[must_use]
    pub fn total_offset(&self, position: f64) -> Option<f64> {
        self.start_position.map(|start| position - start)
    }

    /// Current scroll classification.
    #[must_use]
    pub fn scroll_intent(&self) -> ScrollIntent {
        self.scroll
    }

    /// Returns `true` once the gesture was classified as a page scroll.
    #[must_use]
    pub fn is_scrolling(&self) -> bool {
        self.scroll == ScrollIntent::Scrolling
    }

    /// Classifies the gesture on its first move and returns the classification.
    ///
    /// `along` and `across` are the pointer travel along and across the track.
    /// The gesture scrolls when it moved further across than along; later
    /// calls keep the first answer.
    pub fn classify_scroll(&mut self, along: f64, across: f64) -> ScrollIntent {
        if self.scroll == ScrollIntent::Undecided {
            self.scroll = if across.abs() > along.abs() {
                ScrollIntent::Scrolling
            } else {
                ScrollIntent::Dragging
            };
        }
        self.scroll
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_records_start() {
        let session = DragSession::new(2, 15.0, Capture::Touch, Some(10.0), Some(Point::new(10.0, 4.0)));
        assert_eq!(session.index(), 2);
        assert_eq!(session.start_value(), 15.0);
        assert_eq!(session.start_position(), Some(10.0));
        assert_eq!(session.origin(), Some(Point::new(10.0, 4.0)));
        assert_eq!(session.capture(), Capture::Touch);
        assert_eq!(session.scroll_intent(), ScrollIntent::Undecided);
    }

    #[test]
    fn total_offset_is_measured_from_start() {
        let session = DragSession::new(0, 0.0, Capture::Mouse, Some(100.0), None);
        assert_eq!(session.total_offset(130.0), Some(30.0));
        assert_eq!(session.total_offset(90.0), Some(-10.0));
        assert_eq!(session.total_offset(100.0), Some(0.0));
    }

    #[test]
    fn keyboard_sessions_have_no_offset() {
        let session = DragSession::new(0, 0.0, Capture::Keyboard, None, None);
        assert_eq!(session.total_offset(130.0), None);
    }

    #[test]
    fn only_the_owning_capture_matches() {
        let session = DragSession::new(0, 0.0, Capture::Keyboard, None, None);
        assert!(session.is_captured_by(Capture::Keyboard));
        assert!(!session.is_captured_by(Capture::Mouse));
        assert!(!session.is_captured_by(Capture::Touch));
    }

    #[test]
    fn first_touch_move_decides_scrolling() {
        let mut session = DragSession::new(0, 0.0, Capture::Touch, Some(0.0), Some(Point::ZERO));
        assert_eq!(session.classify_scroll(2.0, 10.0), ScrollIntent::Scrolling);
        assert!(session.is_scrolling());
        // Later moves do not change the decision.
        assert_eq!(session.classify_scroll(50.0, 0.0), ScrollIntent::Scrolling);
    }

    #[test]
    fn mostly_horizontal_touch_drags() {
        let mut session = DragSession::new(0, 0.0, Capture::Touch, Some(0.0), Some(Point::ZERO));
        assert_eq!(session.classify_scroll(10.0, 10.0), ScrollIntent::Dragging);
        assert!(!session.is_scrolling());
        assert_eq!(session.classify_scroll(0.0, 40.0), ScrollIntent::Dragging);
    }
}
