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

//! Error types for profile data retrieval.

use thiserror::Error;

/// Errors produced by a profile data provider.
///
/// These never reach the user directly; the fetch session logs them and
/// surfaces a stable, generic message instead.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request could not be completed at the transport level.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{context} request returned HTTP status {status}")]
    Status {
        /// Which call failed ("subject" or "items").
        context: &'static str,
        /// The HTTP status the server returned.
        status: reqwest::StatusCode,
    },
}
