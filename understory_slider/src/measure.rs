// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Debounced, cancellable track measurement.
//!
//! Layout-affecting events (mount, window resize, a configuration change while
//! the track is still unmeasured) ask for a fresh measurement. The host defers
//! the actual measurement (typically to the next frame, so the track has
//! assumed its new size) and reports back with the ticket it was given.
//!
//! At most one request is outstanding: issuing a new one cancels the previous,
//! and a completion carrying a stale ticket is refused, so an older measurement
//! can never overwrite a fresher one.
//!
//! ```
//! use understory_slider::MeasureScheduler;
//!
//! let mut scheduler = MeasureScheduler::new();
//! let first = scheduler.request();
//! let second = scheduler.request();
//! assert_eq!(second.cancelled, Some(first.ticket));
//!
//! assert!(!scheduler.complete(first.ticket));
//! assert!(scheduler.complete(second.ticket));
//! assert!(scheduler.is_idle());
//! ```

/// Identifies one measurement request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeasureTicket(u64);

impl MeasureTicket {
    /// The raw ticket number, for hosts keying timers by integer.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A newly issued measurement request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeasureRequest {
    /// Ticket to hand back to [`MeasureScheduler::complete`].
    pub ticket: MeasureTicket,
    /// Previously pending request this one replaced; its timer should be cancelled.
    pub cancelled: Option<MeasureTicket>,
}

/// Whether a measurement is outstanding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MeasureState {
    /// No measurement is pending.
    #[default]
    Idle,
    /// A measurement was requested and not yet completed.
    Pending(MeasureTicket),
}

/// Tracks the single outstanding measurement request.
#[derive(Clone, Debug, Default)]
pub struct MeasureScheduler {
    state: MeasureState,
    next: u64,
}

impl MeasureScheduler {
    /// Creates an idle scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> MeasureState {
        self.state
    }

    /// Returns `true` when no measurement is pending.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state == MeasureState::Idle
    }

    /// Issues a new request, cancelling any pending one.
    pub fn request(&mut self) -> MeasureRequest {
        let ticket = MeasureTicket(self.next);
        self.next = self.next.wrapping_add(1);
        let cancelled = self.pending();
        self.state = MeasureState::Pending(ticket);
        MeasureRequest { ticket, cancelled }
    }

    /// Accepts the measurement for `ticket` if it is the pending one.
    ///
    /// Returns `false` for stale or cancelled tickets; their results must be
    /// dropped.
    pub fn complete(&mut self, ticket: MeasureTicket) -> bool {
        if self.state == MeasureState::Pending(ticket) {
            self.state = MeasureState::Idle;
            true
        } else {
            tracing::trace!(ticket = ticket.0, "dropping stale measurement");
            false
        }
    }

    /// Cancels the pending request, if any, and returns its ticket.
    pub fn cancel(&mut self) -> Option<MeasureTicket> {
        let cancelled = self.pending();
        self.state = MeasureState::Idle;
        cancelled
    }

    fn pending(&self) -> Option<MeasureTicket> {
        match self.state {
            MeasureState::Pending(ticket) => Some(ticket),
            MeasureState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_scheduler_is_idle() {
        let scheduler = MeasureScheduler::new();
        assert!(scheduler.is_idle());
        assert_eq!(scheduler.state(), MeasureState::Idle);
    }

    #[test]
    fn request_then_complete() {
        let mut scheduler = MeasureScheduler::new();
        let request = scheduler.request();
        assert_eq!(request.cancelled, None);
        assert_eq!(scheduler.state(), MeasureState::Pending(request.ticket));

        assert!(scheduler.complete(request.ticket));
        assert!(scheduler.is_idle());
        // Completing twice is refused.
        assert!(!scheduler.complete(request.ticket));
    }

    #[test]
    fn newer_request_supersedes_older() {
        let mut scheduler = MeasureScheduler::new();
        let first = scheduler.request();
        let second = scheduler.request();
        let third = scheduler.request();

        assert_eq!(second.cancelled, Some(first.ticket));
        assert_eq!(third.cancelled, Some(second.ticket));
        assert!(!scheduler.complete(first.ticket));
        assert!(!scheduler.complete(second.ticket));
        assert!(scheduler.complete(third.ticket));
    }

    #[test]
    fn cancel_drops_pending_request() {
        let mut scheduler = MeasureScheduler::new();
        assert_eq!(scheduler.cancel(), None);

        let request = scheduler.request();
        assert_eq!(scheduler.cancel(), Some(request.ticket));
        assert!(scheduler.is_idle());
        assert!(!scheduler.complete(request.ticket));
    }

    #[test]
    fn tickets_are_unique() {
        let mut scheduler = MeasureScheduler::new();
        let a = scheduler.request().ticket;
        scheduler.cancel();
        let b = scheduler.request().ticket;
        assert_ne!(a, b);
        assert!(b.get() > a.get());
    }
}
