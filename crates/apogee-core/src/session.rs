// Copyright 2026 The Apogee Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Generation-counted request state for superseding in-flight work.
//!
//! A [`SessionState`] tracks one logical request slot. Every
//! [`begin`](SessionState::begin) bumps a generation counter and hands out a
//! [`SessionTicket`] for that attempt; a result is only accepted while its
//! ticket is still the current generation. Starting a new attempt or
//! cancelling therefore invalidates every older ticket, so late results from
//! superseded work are discarded instead of clobbering newer state. This
//! replaces flag-based cancellation: there is nothing to reset or forget,
//! because stale work disqualifies itself.

/// Proof of which attempt a result belongs to.
///
/// Tickets are cheap copyable tokens. Worker threads carry one alongside
/// their result and present it back to
/// [`SessionState::resolve`]; a ticket from a superseded attempt is
/// rejected there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTicket(u64);

/// Lifecycle of one request slot.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionStatus<T> {
    /// No attempt has been started yet.
    Idle,
    /// An attempt is in flight.
    Loading,
    /// The most recent attempt finished with a value.
    Success(T),
    /// The most recent attempt failed; carries the user-facing message.
    Error(String),
}

impl<T> SessionStatus<T> {
    /// Whether this status is [`SessionStatus::Loading`].
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionStatus::Loading)
    }
}

/// One request slot with supersede-on-restart semantics.
#[derive(Debug)]
pub struct SessionState<T> {
    generation: u64,
    status: SessionStatus<T>,
}

impl<T> Default for SessionState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SessionState<T> {
    /// Creates an idle slot.
    pub fn new() -> Self {
        Self {
            generation: 0,
            status: SessionStatus::Idle,
        }
    }

    /// The current status.
    pub fn status(&self) -> &SessionStatus<T> {
        &self.status
    }

    /// Whether `ticket` belongs to the current attempt.
    pub fn is_current(&self, ticket: SessionTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Starts a new attempt, superseding any attempt in flight.
    ///
    /// Sets the status to [`SessionStatus::Loading`] and returns the ticket
    /// the attempt's eventual result must present to
    /// [`resolve`](Self::resolve).
    pub fn begin(&mut self) -> SessionTicket {
        self.generation += 1;
        self.status = SessionStatus::Loading;
        SessionTicket(self.generation)
    }

    /// Invalidates the current attempt without touching the status.
    ///
    /// Any in-flight result becomes stale and will be discarded by
    /// [`resolve`](Self::resolve). The status deliberately stays as it is;
    /// callers tearing the whole slot down no longer care what it shows, and
    /// leaving it avoids a spurious transition for anyone still observing.
    pub fn cancel(&mut self) {
        self.generation += 1;
    }

    /// Lands `outcome` if `ticket` is still current.
    ///
    /// Returns `true` when the outcome was accepted, `false` when the ticket
    /// was superseded and the outcome dropped.
    pub fn resolve(&mut self, ticket: SessionTicket, outcome: Result<T, String>) -> bool {
        if !self.is_current(ticket) {
            log::trace!(
                "Discarding stale session result (ticket {}, current {}).",
                ticket.0,
                self.generation
            );
            return false;
        }
        self.status = match outcome {
            Ok(value) => SessionStatus::Success(value),
            Err(message) => SessionStatus::Error(message),
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_slot_is_idle() {
        let state: SessionState<String> = SessionState::new();
        assert_eq!(*state.status(), SessionStatus::Idle);
    }

    #[test]
    fn begin_enters_loading() {
        let mut state: SessionState<String> = SessionState::new();
        let ticket = state.begin();
        assert!(state.status().is_loading());
        assert!(state.is_current(ticket));
    }

    #[test]
    fn current_ticket_lands_success() {
        let mut state = SessionState::new();
        let ticket = state.begin();
        assert!(state.resolve(ticket, Ok("payload".to_string())));
        assert_eq!(
            *state.status(),
            SessionStatus::Success("payload".to_string())
        );
    }

    #[test]
    fn current_ticket_lands_error() {
        let mut state: SessionState<String> = SessionState::new();
        let ticket = state.begin();
        assert!(state.resolve(ticket, Err("something went wrong".to_string())));
        assert_eq!(
            *state.status(),
            SessionStatus::Error("something went wrong".to_string())
        );
    }

    #[test]
    fn restart_supersedes_older_attempt() {
        let mut state = SessionState::new();
        let first = state.begin();
        let second = state.begin();

        // The slower first attempt reports after the restart and must lose,
        // regardless of arrival order.
        assert!(!state.resolve(first, Ok("first".to_string())));
        assert!(state.status().is_loading());

        assert!(state.resolve(second, Ok("second".to_string())));
        assert_eq!(*state.status(), SessionStatus::Success("second".to_string()));
    }

    #[test]
    fn late_result_cannot_clobber_newer_success() {
        let mut state = SessionState::new();
        let first = state.begin();
        let second = state.begin();

        assert!(state.resolve(second, Ok("second".to_string())));
        assert!(!state.resolve(first, Err("first failed".to_string())));
        assert_eq!(*state.status(), SessionStatus::Success("second".to_string()));
    }

    #[test]
    fn cancel_invalidates_without_status_transition() {
        let mut state: SessionState<String> = SessionState::new();
        let ticket = state.begin();
        state.cancel();

        assert!(!state.is_current(ticket));
        assert!(state.status().is_loading(), "cancel leaves status untouched");
        assert!(!state.resolve(ticket, Ok("late".to_string())));
        assert!(state.status().is_loading());
    }

    #[test]
    fn begin_after_cancel_issues_fresh_ticket() {
        let mut state = SessionState::new();
        let stale = state.begin();
        state.cancel();
        let fresh = state.begin();

        assert!(!state.is_current(stale));
        assert!(state.resolve(fresh, Ok(7u32)));
        assert_eq!(*state.status(), SessionStatus::Success(7));
    }
}
