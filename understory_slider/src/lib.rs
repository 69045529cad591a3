// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_slider --heading-base-level=0

//! Understory Slider: a headless value and geometry engine for multi-handle range sliders.
//!
//! This crate holds everything a range slider has to get right that is not
//! drawing: mapping pointer positions to values and back, snapping to a step
//! grid, keeping handles ordered and spaced, and turning a stream of mouse,
//! touch and keyboard input into change notifications.
//!
//! - [`GeometryMapper`]: stateless conversion between domain values and pixel
//!   offsets, for both orientations, normal or inverted.
//! - [`ValueEngine`]: the ordered values, stacking order, drag session and the
//!   constraint resolution (minimum distance, optional "pearling" where a
//!   moving handle pushes its neighbors).
//! - [`Slider`]: plain input handlers around an engine, returning
//!   [`SliderEvent`]s for the host to forward.
//! - [`MeasureScheduler`]: a single cancellable track measurement, so a stale
//!   measurement never overwrites a fresh one.
//!
//! The crate does not render anything and does not subscribe to any event
//! source. The host measures its track, extracts page positions and key codes,
//! calls in, and renders from [`Slider::offsets`], [`Slider::z_indices`] and
//! [`Slider::bar_segments`].
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_slider::{
//!     Capture, Slider, SliderConfig, SliderEvent, SliderValue, TrackGeometry,
//! };
//!
//! let config = SliderConfig::new(0.0, 100.0)
//!     .with_min_distance(10.0)
//!     .with_pearling(true);
//! let mut slider = Slider::new(config, &[20.0, 50.0, 80.0], &[], 0).unwrap();
//!
//! // Measure the track once layout has settled: 220px long, 20px handles.
//! let request = slider.mount();
//! slider.complete_measure(request.ticket, TrackGeometry::new(220.0, 20.0, 0.0));
//! assert_eq!(slider.offsets(), vec![40.0, 100.0, 160.0]);
//!
//! // Grab the first handle and drag it 90px (45 units) to the right.
//! slider.handle_mouse_down(0, Point::new(50.0, 0.0));
//! let events = slider.mouse_move(Point::new(140.0, 0.0));
//! assert_eq!(
//!     events.as_slice(),
//!     &[SliderEvent::Change(SliderValue::Multiple(vec![65.0, 75.0, 85.0]))]
//! );
//!
//! let events = slider.release(Capture::Mouse);
//! assert!(matches!(events.as_slice(), [SliderEvent::AfterChange(_)]));
//! ```
//!
//! ## Features
//!
//! - `std` (default): build against the standard library.
//! - `libm`: floating point rounding without `std`.
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

pub mod align;
mod config;
mod engine;
mod error;
mod event;
mod geometry;
mod input;
mod measure;
mod session;
mod slider;

pub use config::{Orientation, SliderConfig, Step};
pub use engine::{SeekOutcome, ValueEngine};
pub use error::ConfigError;
pub use event::{SliderEvent, SliderEvents, SliderValue};
pub use geometry::{Axis, BarSegment, Dimension, Edge, GeometryMapper, TrackGeometry};
pub use input::{Bound, KeyIntent, Modifiers, SliderKey, StepDirection};
pub use measure::{MeasureRequest, MeasureScheduler, MeasureState, MeasureTicket};
pub use session::{Capture, DragSession, ScrollIntent};
pub use slider::Slider;
