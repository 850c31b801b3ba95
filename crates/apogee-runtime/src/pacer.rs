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

//! Background pacing for the readiness gate.

use apogee_core::gate::{GateEvent, ReadinessGate};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

/// Drives a [`ReadinessGate`] in real time on a background thread.
///
/// The gate is owned by the pacer thread for its whole life; progress and
/// completion escape only through the returned event channel. Stopping or
/// dropping the pacer joins the thread, so no event can be observed after
/// either returns.
pub struct GatePacer {
    running: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl GatePacer {
    /// Spawns the pacing thread for `gate`.
    ///
    /// # Returns
    ///
    /// The pacer handle and the stream of gate events. The thread exits on
    /// its own once the gate completes or every receiver is dropped.
    pub fn spawn(mut gate: ReadinessGate) -> (Self, flume::Receiver<GateEvent>) {
        let (events_tx, events_rx) = flume::unbounded();
        let running = Arc::new(AtomicBool::new(true));
        let thread_running = Arc::clone(&running);
        let tick_duration = gate.config().tick_interval;

        let handle = thread::spawn(move || {
            log::info!("Gate pacer thread started.");
            let mut events = Vec::new();
            let mut previous = Instant::now();

            while thread_running.load(Ordering::Relaxed) {
                let start_time = Instant::now();
                gate.advance(start_time - previous, &mut events);
                previous = start_time;

                let mut receiver_gone = false;
                for event in events.drain(..) {
                    if events_tx.send(event).is_err() {
                        receiver_gone = true;
                    }
                }
                if gate.is_complete() || receiver_gone {
                    break;
                }

                let elapsed = start_time.elapsed();
                if elapsed < tick_duration {
                    thread::sleep(tick_duration - elapsed);
                }
            }

            thread_running.store(false, Ordering::SeqCst);
            log::info!("Gate pacer thread stopped.");
        });

        (
            Self {
                running,
                handle: Some(handle),
            },
            events_rx,
        )
    }

    /// Whether the pacing thread is still driving the gate.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stops the pacing thread and joins it.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for GatePacer {
    fn drop(&mut self) {
        self.stop();
    }
}
