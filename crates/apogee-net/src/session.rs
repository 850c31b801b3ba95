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

//! Cancellable, restartable profile fetches.
//!
//! A [`FetchSession`] owns one slot of profile state. Each [`run`]
//! dispatches a worker thread against the provider and stamps the attempt
//! with a generation ticket; results come back over a channel and are
//! applied by [`pump`], which silently drops anything a newer `run` or a
//! [`cancel`] has made stale. Workers are never interrupted, they just
//! lose the right to land their result.
//!
//! [`run`]: FetchSession::run
//! [`pump`]: FetchSession::pump
//! [`cancel`]: FetchSession::cancel

use crate::error::ProviderError;
use crate::profile::{ProfileBundle, ProfileProvider};
use apogee_core::session::{SessionState, SessionStatus, SessionTicket};
use crossbeam_channel::{Receiver, Sender};
use std::sync::Arc;
use std::thread;

/// The one user-facing failure message. Real provider errors go to the log;
/// observers of the session only ever see this string.
pub const FETCH_ERROR_MESSAGE: &str = "Unable to load profile data right now.";

/// Outcome of one worker attempt, tagged with the ticket it was issued.
struct FetchReport {
    ticket: SessionTicket,
    key: String,
    outcome: Result<ProfileBundle, ProviderError>,
}

/// One slot of profile state fed by background fetches.
pub struct FetchSession<P: ProfileProvider> {
    provider: Arc<P>,
    state: SessionState<ProfileBundle>,
    key: Option<String>,
    reports_tx: Sender<FetchReport>,
    reports_rx: Receiver<FetchReport>,
}

impl<P: ProfileProvider> FetchSession<P> {
    /// Creates an idle session backed by `provider`.
    pub fn new(provider: P) -> Self {
        let (reports_tx, reports_rx) = crossbeam_channel::unbounded();
        Self {
            provider: Arc::new(provider),
            state: SessionState::new(),
            key: None,
            reports_tx,
            reports_rx,
        }
    }

    /// Starts a fetch for `key`, superseding any fetch still in flight.
    ///
    /// The status flips to `Loading` immediately. The worker runs to
    /// completion on its own thread; if it loses the race to a newer `run`,
    /// its report is discarded at [`pump`](Self::pump) time.
    pub fn run(&mut self, key: &str) {
        let ticket = self.state.begin();
        self.key = Some(key.to_string());
        log::debug!("Starting profile fetch for '{key}'.");

        let provider = Arc::clone(&self.provider);
        let reports = self.reports_tx.clone();
        let key = key.to_string();
        thread::spawn(move || {
            let outcome = fetch_bundle(provider.as_ref(), &key);
            // A closed channel means the session was dropped mid-flight.
            let _ = reports.send(FetchReport {
                ticket,
                key,
                outcome,
            });
        });
    }

    /// Applies any worker reports that have arrived since the last call.
    ///
    /// # Returns
    ///
    /// `true` if a report was accepted and the status changed.
    pub fn pump(&mut self) -> bool {
        let mut applied = false;
        while let Ok(report) = self.reports_rx.try_recv() {
            applied |= self.apply_report(report);
        }
        applied
    }

    /// Invalidates the in-flight fetch without touching the visible status.
    pub fn cancel(&mut self) {
        if let Some(key) = &self.key {
            log::debug!("Cancelling profile fetch for '{key}'.");
        }
        self.state.cancel();
    }

    /// Current status of the slot.
    pub fn status(&self) -> &SessionStatus<ProfileBundle> {
        self.state.status()
    }

    /// The key of the most recent `run`, if any.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Where to send the user when the fetch has failed.
    ///
    /// `Some` only in the `Error` state, pointing at the provider's
    /// human-facing page for the current key.
    pub fn fallback_url(&self) -> Option<String> {
        match (self.state.status(), &self.key) {
            (SessionStatus::Error(_), Some(key)) => Some(self.provider.profile_url(key)),
            _ => None,
        }
    }

    fn apply_report(&mut self, report: FetchReport) -> bool {
        match report.outcome {
            Ok(bundle) => {
                let accepted = self.state.resolve(report.ticket, Ok(bundle));
                if accepted {
                    log::debug!("Profile fetch for '{}' completed.", report.key);
                }
                accepted
            }
            Err(error) => {
                if self.state.is_current(report.ticket) {
                    log::warn!("Profile fetch for '{}' failed: {error}", report.key);
                }
                self.state
                    .resolve(report.ticket, Err(FETCH_ERROR_MESSAGE.to_string()))
            }
        }
    }
}

/// Fetches the subject and their items, stopping at the first failure.
fn fetch_bundle<P: ProfileProvider + ?Sized>(
    provider: &P,
    key: &str,
) -> Result<ProfileBundle, ProviderError> {
    let subject = provider.subject(key)?;
    let items = provider.subject_items(key)?;
    Ok(ProfileBundle { subject, items })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{SubjectItem, SubjectProfile};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{Duration, Instant};

    /// Configurable in-memory provider. Clones share the call counters so
    /// tests can keep one and hand the other to the session.
    #[derive(Clone)]
    struct StubProvider {
        subject_calls: Arc<AtomicUsize>,
        items_calls: Arc<AtomicUsize>,
        followers: u64,
        item_count: usize,
        fail_subject: bool,
        fail_items: bool,
        delay_key: Option<(String, Duration)>,
    }

    impl StubProvider {
        fn ok() -> Self {
            Self {
                subject_calls: Arc::new(AtomicUsize::new(0)),
                items_calls: Arc::new(AtomicUsize::new(0)),
                followers: 5000,
                item_count: 6,
                fail_subject: false,
                fail_items: false,
                delay_key: None,
            }
        }

        fn maybe_delay(&self, key: &str) {
            if let Some((slow_key, delay)) = &self.delay_key {
                if slow_key == key {
                    thread::sleep(*delay);
                }
            }
        }
    }

    impl ProfileProvider for StubProvider {
        fn subject(&self, key: &str) -> Result<SubjectProfile, ProviderError> {
            self.subject_calls.fetch_add(1, Ordering::SeqCst);
            self.maybe_delay(key);
            if self.fail_subject {
                return Err(ProviderError::Status {
                    context: "subject",
                    status: reqwest::StatusCode::NOT_FOUND,
                });
            }
            Ok(SubjectProfile {
                login: key.to_string(),
                name: None,
                html_url: format!("https://github.com/{key}"),
                bio: None,
                followers: self.followers,
                following: 9,
                public_repos: 8,
            })
        }

        fn subject_items(&self, key: &str) -> Result<Vec<SubjectItem>, ProviderError> {
            self.items_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_items {
                return Err(ProviderError::Status {
                    context: "items",
                    status: reqwest::StatusCode::FORBIDDEN,
                });
            }
            Ok((0..self.item_count)
                .map(|index| SubjectItem {
                    id: index as u64,
                    name: format!("{key}-item-{index}"),
                    html_url: format!("https://github.com/{key}/item-{index}"),
                    stargazers_count: 80,
                    language: Some("Rust".to_string()),
                    updated_at: None,
                })
                .collect())
        }

        fn profile_url(&self, key: &str) -> String {
            format!("https://github.com/{key}")
        }
    }

    /// Helper: pumps until the session leaves `Loading` or five seconds pass.
    fn pump_until_settled(session: &mut FetchSession<StubProvider>) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while session.status().is_loading() {
            session.pump();
            assert!(Instant::now() < deadline, "session did not settle in time");
            thread::sleep(Duration::from_millis(2));
        }
    }

    /// Helper: pumps for a fixed window, returning whether anything landed.
    fn pump_for(session: &mut FetchSession<StubProvider>, window: Duration) -> bool {
        let deadline = Instant::now() + window;
        let mut applied = false;
        while Instant::now() < deadline {
            applied |= session.pump();
            thread::sleep(Duration::from_millis(2));
        }
        applied
    }

    #[test]
    fn successful_fetch_lands_bundle() {
        let stub = StubProvider::ok();
        let mut session = FetchSession::new(stub.clone());

        session.run("octocat");
        assert!(session.status().is_loading());
        pump_until_settled(&mut session);

        match session.status() {
            SessionStatus::Success(bundle) => {
                assert_eq!(bundle.subject.login, "octocat");
                assert_eq!(bundle.subject.followers, 5000);
                assert_eq!(bundle.items.len(), 6);
            }
            other => panic!("expected success, got {other:?}"),
        }
        assert_eq!(stub.subject_calls.load(Ordering::SeqCst), 1);
        assert_eq!(stub.items_calls.load(Ordering::SeqCst), 1);
        assert_eq!(session.fallback_url(), None);
    }

    #[test]
    fn subject_failure_reports_generic_message_and_skips_items() {
        let mut stub = StubProvider::ok();
        stub.fail_subject = true;
        let mut session = FetchSession::new(stub.clone());

        session.run("missing");
        pump_until_settled(&mut session);

        assert_eq!(
            session.status(),
            &SessionStatus::Error(FETCH_ERROR_MESSAGE.to_string())
        );
        assert_eq!(
            stub.items_calls.load(Ordering::SeqCst),
            0,
            "items fetch should be skipped once the subject fetch fails"
        );
        assert_eq!(
            session.fallback_url(),
            Some("https://github.com/missing".to_string())
        );
    }

    #[test]
    fn items_failure_reports_generic_message() {
        let mut stub = StubProvider::ok();
        stub.fail_items = true;
        let mut session = FetchSession::new(stub.clone());

        session.run("octocat");
        pump_until_settled(&mut session);

        assert_eq!(
            session.status(),
            &SessionStatus::Error(FETCH_ERROR_MESSAGE.to_string())
        );
        assert_eq!(stub.subject_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn restart_supersedes_in_flight_fetch() {
        let mut stub = StubProvider::ok();
        stub.delay_key = Some(("a".to_string(), Duration::from_millis(150)));
        let mut session = FetchSession::new(stub);

        session.run("a");
        session.run("b");
        pump_until_settled(&mut session);

        match session.status() {
            SessionStatus::Success(bundle) => assert_eq!(bundle.subject.login, "b"),
            other => panic!("expected success for 'b', got {other:?}"),
        }
        assert_eq!(session.key(), Some("b"));

        // Let the slow "a" worker finish and report; it must change nothing.
        pump_for(&mut session, Duration::from_millis(300));
        match session.status() {
            SessionStatus::Success(bundle) => assert_eq!(bundle.subject.login, "b"),
            other => panic!("stale result clobbered the status: {other:?}"),
        }
    }

    #[test]
    fn cancel_discards_in_flight_result() {
        let mut stub = StubProvider::ok();
        stub.delay_key = Some(("a".to_string(), Duration::from_millis(50)));
        let mut session = FetchSession::new(stub);

        session.run("a");
        session.cancel();

        let applied = pump_for(&mut session, Duration::from_millis(250));
        assert!(!applied, "cancelled fetch must not land");
        assert!(
            session.status().is_loading(),
            "cancel leaves the visible status alone"
        );
    }

    #[test]
    fn fallback_url_requires_error_state() {
        let stub = StubProvider::ok();
        let mut session = FetchSession::new(stub);
        assert_eq!(session.fallback_url(), None, "idle session has no fallback");

        session.run("octocat");
        assert_eq!(session.fallback_url(), None, "loading session has no fallback");
        pump_until_settled(&mut session);
        assert_eq!(session.fallback_url(), None, "successful session has no fallback");
    }
}
