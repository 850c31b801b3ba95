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

//! One-shot readiness notification shared between a producer and observers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A one-shot, thread-safe readiness flag.
///
/// Clones share the same underlying flag, so a producer (for example an
/// asset loader) can hold one clone while a [`ReadinessGate`] observes
/// another. Once set, the signal stays set for the lifetime of all clones;
/// there is no way to reset it.
///
/// [`ReadinessGate`]: crate::gate::ReadinessGate
#[derive(Debug, Clone, Default)]
pub struct ReadySignal {
    set: Arc<AtomicBool>,
}

impl ReadySignal {
    /// Creates a new, unset signal.
    pub fn new() -> Self {
        Self {
            set: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Marks the signal as set.
    ///
    /// Returns `true` for the call that actually set it; repeated calls have
    /// no further effect and return `false`.
    pub fn notify(&self) -> bool {
        !self.set.swap(true, Ordering::SeqCst)
    }

    /// Returns whether the signal has been set.
    pub fn is_set(&self) -> bool {
        self.set.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn starts_unset() {
        let signal = ReadySignal::new();
        assert!(!signal.is_set());
    }

    #[test]
    fn notify_is_one_shot() {
        let signal = ReadySignal::new();
        assert!(signal.notify());
        assert!(signal.is_set());
        // Later calls are absorbed.
        assert!(!signal.notify());
        assert!(!signal.notify());
        assert!(signal.is_set());
    }

    #[test]
    fn clones_share_the_flag() {
        let signal = ReadySignal::new();
        let observer = signal.clone();
        assert!(!observer.is_set());
        signal.notify();
        assert!(observer.is_set());
    }

    #[test]
    fn notify_crosses_threads() {
        let signal = ReadySignal::new();
        let producer = signal.clone();
        let handle = thread::spawn(move || producer.notify());
        assert!(handle.join().unwrap());
        assert!(signal.is_set());
    }
}
