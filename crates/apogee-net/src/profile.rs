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

//! Profile payload types and the provider capability.

use crate::error::ProviderError;
use serde::Deserialize;

/// A subject's headline profile data.
///
/// Field names follow the GitHub REST payload, from which this is
/// deserialized directly.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubjectProfile {
    /// Stable account identifier.
    pub login: String,
    /// Optional display name; fall back to [`Self::login`] when absent.
    #[serde(default)]
    pub name: Option<String>,
    /// Canonical profile URL.
    pub html_url: String,
    /// Optional free-form bio line.
    #[serde(default)]
    pub bio: Option<String>,
    /// Follower count.
    #[serde(default)]
    pub followers: u64,
    /// Followed-account count.
    #[serde(default)]
    pub following: u64,
    /// Public repository count.
    #[serde(default)]
    pub public_repos: u64,
}

impl SubjectProfile {
    /// The name to show: the display name when set, the login otherwise.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.login)
    }
}

/// One entry in a subject's recently-updated items list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubjectItem {
    /// Stable item identifier.
    pub id: u64,
    /// Item name.
    pub name: String,
    /// Canonical item URL.
    pub html_url: String,
    /// Star count.
    #[serde(default)]
    pub stargazers_count: u64,
    /// Primary language label, when detected.
    #[serde(default)]
    pub language: Option<String>,
    /// Last-update timestamp, as reported by the provider.
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// The consolidated result of one successful fetch: the subject plus their
/// recently-updated items.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileBundle {
    /// Headline profile data.
    pub subject: SubjectProfile,
    /// Recently-updated items, at most one page.
    pub items: Vec<SubjectItem>,
}

/// Source of profile data for a subject key.
///
/// Implementations are called from worker threads; errors describe what
/// actually failed and are logged by the session, never shown raw.
pub trait ProfileProvider: Send + Sync + 'static {
    /// Fetches the subject's headline profile.
    fn subject(&self, key: &str) -> Result<SubjectProfile, ProviderError>;

    /// Fetches the subject's recently-updated items.
    fn subject_items(&self, key: &str) -> Result<Vec<SubjectItem>, ProviderError>;

    /// The canonical human-facing profile URL, used as the fallback
    /// affordance when a fetch fails.
    fn profile_url(&self, key: &str) -> String;
}
