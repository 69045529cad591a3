// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard input normalization.
//!
//! Hosts translate their platform key events into a [`SliderKey`] plus
//! [`Modifiers`]; [`KeyIntent::from_key`] decides what, if anything, the
//! active handle should do.

use bitflags::bitflags;

/// Keys the slider reacts to. Anything else maps to [`SliderKey::Other`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SliderKey {
    /// `ArrowLeft`.
    ArrowLeft,
    /// `ArrowRight`.
    ArrowRight,
    /// `ArrowUp`.
    ArrowUp,
    /// `ArrowDown`.
    ArrowDown,
    /// `Home`.
    Home,
    /// `End`.
    End,
    /// Any other key.
    Other,
}

bitflags! {
    /// Modifier keys held while a key was pressed.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Control.
        const CTRL = 1 << 0;
        /// Shift.
        const SHIFT = 1 << 1;
        /// Alt / Option.
        const ALT = 1 << 2;
        /// Meta / Command / Windows.
        const META = 1 << 3;
    }
}

impl Modifiers {
    /// Modifiers that make the slider ignore a key press.
    ///
    /// Meta is left out so platform shortcuts that only add it keep stepping.
    pub const BLOCKING: Self = Self::CTRL.union(Self::SHIFT).union(Self::ALT);
}

/// Direction of a single step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepDirection {
    /// Towards `min`.
    Down,
    /// Towards `max`.
    Up,
}

/// End of the domain to jump to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    /// The configured `min`.
    Min,
    /// The configured `max`.
    Max,
}

/// What a key press asks the active handle to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyIntent {
    /// Move by one step.
    Step(StepDirection),
    /// Jump to one end of the domain.
    Jump(Bound),
}

impl KeyIntent {
    /// Interprets a key press.
    ///
    /// Returns `None` for keys the slider ignores and whenever ctrl, shift or
    /// alt is held.
    ///
    /// `ArrowUp` steps towards `min` and `ArrowDown` towards `max`, matching a
    /// vertical track whose `min` end is at the top.
    #[must_use]
    pub fn from_key(key: SliderKey, modifiers: Modifiers) -> Option<Self> {
        if modifiers.intersects(Modifiers::BLOCKING) {
            return None;
        }
        match key {
            SliderKey::ArrowLeft | SliderKey::ArrowUp => Some(Self::Step(StepDirection::Down)),
            SliderKey::ArrowRight | SliderKey::ArrowDown => Some(Self::Step(StepDirection::Up)),
            SliderKey::Home => Some(Self::Jump(Bound::Min)),
            SliderKey::End => Some(Self::Jump(Bound::Max)),
            SliderKey::Other => None,
        }
    }
}
