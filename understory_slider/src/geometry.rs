// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversion between domain values and pixel offsets along the track.
//!
//! [`GeometryMapper`] is stateless: it is rebuilt from the current
//! [`SliderConfig`] and the last measured [`TrackGeometry`] whenever it is
//! needed. It is the only place where `invert` is applied; everything above it
//! works in "offset from the domain-`min` end of the track" space.
//!
//! ```
//! use understory_slider::{GeometryMapper, Orientation, TrackGeometry};
//!
//! // 220px track with a 20px handle starting at x = 100.
//! let geometry = TrackGeometry::new(220.0, 20.0, 100.0);
//! let mapper = GeometryMapper::new(0.0, 100.0, geometry, Orientation::Horizontal, false);
//!
//! assert_eq!(mapper.value_to_offset(50.0), 100.0);
//! assert_eq!(mapper.offset_to_value(100.0), Some(50.0));
//! // A pointer at x = 110 sits on the center of a handle at offset 0.
//! assert_eq!(mapper.position_to_offset(110.0), 0.0);
//! ```

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use crate::config::{Orientation, SliderConfig};

/// Measured layout of the track, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrackGeometry {
    /// Length of the track along its axis.
    pub track_length: f64,
    /// Size of a handle along the track axis.
    pub handle_size: f64,
    /// Page coordinate of the end of the track where the domain `min` sits.
    ///
    /// This is the leading edge of the track normally and the trailing edge
    /// when the slider is inverted.
    pub track_start: f64,
}

impl TrackGeometry {
    /// Creates a geometry from already extracted measurements.
    #[must_use]
    pub fn new(track_length: f64, handle_size: f64, track_start: f64) -> Self {
        Self {
            track_length,
            handle_size,
            track_start,
        }
    }

    /// Reads the geometry off a measured track rectangle and handle size.
    #[must_use]
    pub fn from_layout(track: Rect, handle: Size, orientation: Orientation, invert: bool) -> Self {
        let (lo, hi, handle_size) = match orientation {
            Orientation::Horizontal => (track.x0, track.x1, handle.width),
            Orientation::Vertical => (track.y0, track.y1, handle.height),
        };
        Self {
            track_length: (hi - lo).abs(),
            handle_size,
            track_start: if invert { hi } else { lo },
        }
    }

    /// Largest offset the leading edge of a handle may reach.
    ///
    /// Zero until the track has been measured, or when the handle does not fit.
    #[must_use]
    pub fn upper_bound(&self) -> f64 {
        (self.track_length - self.handle_size).max(0.0)
    }

    /// Returns `true` once the track is long enough to move a handle along.
    #[must_use]
    pub fn is_measured(&self) -> bool {
        self.upper_bound() > 0.0
    }
}

/// Coordinate axis a slider track runs along.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal, the `x` coordinate.
    X,
    /// Vertical, the `y` coordinate.
    Y,
}

impl Axis {
    /// The dimension that measures the track length.
    #[must_use]
    pub fn size_key(self) -> Dimension {
        match self {
            Self::X => Dimension::Width,
            Self::Y => Dimension::Height,
        }
    }

    /// The axis perpendicular to this one.
    #[must_use]
    pub fn orthogonal(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }

    /// Picks this axis' coordinate out of `point`.
    #[must_use]
    pub fn coordinate(self, point: Point) -> f64 {
        match self {
            Self::X => point.x,
            Self::Y => point.y,
        }
    }
}

/// A box dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dimension {
    /// Horizontal extent.
    Width,
    /// Vertical extent.
    Height,
}

/// A box edge handles and bars are positioned from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    /// Left edge.
    Left,
    /// Right edge.
    Right,
    /// Top edge.
    Top,
    /// Bottom edge.
    Bottom,
}

/// A bar drawn between two handles (or a handle and an end of the track).
///
/// Bars are placed from both ends of the track: `start` is measured from
/// [`GeometryMapper::min_edge`] and `end_inset` from [`GeometryMapper::max_edge`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarSegment {
    /// Offset of the bar's leading edge.
    pub start: f64,
    /// Distance of the bar's trailing edge from the end of the handle range.
    pub end_inset: f64,
}

/// Stateless mapping between domain values and pixel offsets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometryMapper {
    min: f64,
    max: f64,
    geometry: TrackGeometry,
    orientation: Orientation,
    invert: bool,
}

impl GeometryMapper {
    /// Creates a mapper for the domain `[min, max]`.
    ///
    /// No validation happens here; a zero-width domain maps every value to
    /// offset zero.
    #[must_use]
    pub fn new(
        min: f64,
        max: f64,
        geometry: TrackGeometry,
        orientation: Orientation,
        invert: bool,
    ) -> Self {
        Self {
            min,
            max,
            geometry,
            orientation,
            invert,
        }
    }

    /// Creates a mapper using the domain and orientation of `config`.
    #[must_use]
    pub fn from_config(config: &SliderConfig, geometry: TrackGeometry) -> Self {
        Self::new(
            config.min,
            config.max,
            geometry,
            config.orientation,
            config.invert,
        )
    }

    /// The track geometry this mapper was built with.
    #[must_use]
    pub fn geometry(&self) -> TrackGeometry {
        self.geometry
    }

    /// See [`TrackGeometry::upper_bound`].
    #[must_use]
    pub fn upper_bound(&self) -> f64 {
        self.geometry.upper_bound()
    }

    /// Pixel offset of a handle holding `value`.
    #[must_use]
    pub fn value_to_offset(&self, value: f64) -> f64 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        (value - self.min) / range * self.upper_bound()
    }

    /// Domain value of a handle at `offset`.
    ///
    /// Returns `None` while the track has not been measured; handles must not
    /// move until it has.
    #[must_use]
    pub fn offset_to_value(&self, offset: f64) -> Option<f64> {
        let upper_bound = self.upper_bound();
        if upper_bound == 0.0 {
            return None;
        }
        Some(offset / upper_bound * (self.max - self.min) + self.min)
    }

    /// Converts a page coordinate along the axis into a handle offset.
    ///
    /// The result refers to the leading edge of a handle centered on the pointer.
    #[must_use]
    pub fn position_to_offset(&self, position: f64) -> f64 {
        let delta = position - self.geometry.track_start;
        let delta = if self.invert { -delta } else { delta };
        delta - self.geometry.handle_size / 2.0
    }

    /// Pointer travel from `from` to `to`, positive towards the `max` end.
    #[must_use]
    pub fn drag_delta(&self, from: f64, to: f64) -> f64 {
        let delta = to - from;
        if self.invert { -delta } else { delta }
    }

    /// Converts pointer travel into a value delta.
    ///
    /// Returns `None` while the track has not been measured.
    #[must_use]
    pub fn pixels_to_value_delta(&self, pixels: f64) -> Option<f64> {
        let travel = self.geometry.track_length - self.geometry.handle_size;
        if travel <= 0.0 {
            return None;
        }
        Some(pixels / travel * (self.max - self.min))
    }

    /// The axis the track runs along.
    #[must_use]
    pub fn axis(&self) -> Axis {
        match self.orientation {
            Orientation::Horizontal => Axis::X,
            Orientation::Vertical => Axis::Y,
        }
    }

    /// Coordinate of `point` along the track.
    #[must_use]
    pub fn axis_position(&self, point: Point) -> f64 {
        self.axis().coordinate(point)
    }

    /// Coordinate of `point` across the track.
    #[must_use]
    pub fn orthogonal_position(&self, point: Point) -> f64 {
        self.axis().orthogonal().coordinate(point)
    }

    /// Edge handle offsets are measured from.
    #[must_use]
    pub fn min_edge(&self) -> Edge {
        match (self.orientation, self.invert) {
            (Orientation::Horizontal, false) => Edge::Left,
            (Orientation::Horizontal, true) => Edge::Right,
            (Orientation::Vertical, false) => Edge::Top,
            (Orientation::Vertical, true) => Edge::Bottom,
        }
    }

    /// Edge opposite to [`Self::min_edge`].
    #[must_use]
    pub fn max_edge(&self) -> Edge {
        match (self.orientation, self.invert) {
            (Orientation::Horizontal, false) => Edge::Right,
            (Orientation::Horizontal, true) => Edge::Left,
            (Orientation::Vertical, false) => Edge::Bottom,
            (Orientation::Vertical, true) => Edge::Top,
        }
    }

    /// Bars before, between and after the handles at `offsets`.
    ///
    /// Returns `offsets.len() + 1` segments, or none for an empty slider.
    #[must_use]
    pub fn bar_segments(&self, offsets: &[f64]) -> Vec<BarSegment> {
        let (Some(&first), Some(&last)) = (offsets.first(), offsets.last()) else {
            return Vec::new();
        };
        let upper_bound = self.upper_bound();
        let segment = |from: f64, to: f64| BarSegment {
            start: from,
            end_inset: upper_bound - to,
        };

        let mut bars = Vec::with_capacity(offsets.len() + 1);
        bars.push(segment(0.0, first));
        bars.extend(offsets.windows(2).map(|pair| segment(pair[0], pair[1])));
        bars.push(segment(last, upper_bound));
        bars
    }
}
