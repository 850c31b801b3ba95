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

//! # Apogee Net
//!
//! Profile data retrieval with safe cancellation. A [`FetchSession`] runs
//! the ordered provider calls for a subject on detached worker threads and
//! guarantees, via generation tickets, that a superseded request can never
//! overwrite newer state. [`GithubProfileClient`] is the production
//! [`ProfileProvider`]; tests substitute stubs.

#![warn(missing_docs)]

pub mod error;
pub mod github;
pub mod profile;
pub mod session;

pub use error::ProviderError;
pub use github::{GithubConfig, GithubProfileClient};
pub use profile::{ProfileBundle, ProfileProvider, SubjectItem, SubjectProfile};
pub use session::{FetchSession, FETCH_ERROR_MESSAGE};
