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

//! # Apogee Core
//!
//! Foundational crate for the load-readiness flow: math primitives for
//! bounds work, the minimum-duration readiness gate, the one-shot ready
//! signal, and the generation-tagged session state machine.

#![warn(missing_docs)]

pub mod gate;
pub mod math;
pub mod session;
pub mod signal;
pub mod utils;

pub use signal::ReadySignal;
pub use utils::timer::Stopwatch;
