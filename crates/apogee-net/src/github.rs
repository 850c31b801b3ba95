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

//! GitHub-backed [`ProfileProvider`] over the REST v3 API.

use crate::error::ProviderError;
use crate::profile::{ProfileProvider, SubjectItem, SubjectProfile};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// How many recently-updated items one fetch requests.
const ITEMS_PER_PAGE: u32 = 6;

/// User agent sent with every request. GitHub rejects requests without one.
const USER_AGENT: &str = concat!("apogee/", env!("CARGO_PKG_VERSION"));

/// Per-request deadline; a stalled call must not hold a fetch session open.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for [`GithubProfileClient`].
#[derive(Debug, Clone)]
pub struct GithubConfig {
    /// API root, without a trailing slash.
    pub api_base: String,
    /// Optional bearer token. Unauthenticated requests work but are
    /// rate-limited aggressively.
    pub token: Option<String>,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_string(),
            token: None,
        }
    }
}

/// Blocking GitHub REST client implementing [`ProfileProvider`].
pub struct GithubProfileClient {
    config: GithubConfig,
    client: reqwest::blocking::Client,
}

impl GithubProfileClient {
    /// Builds a client from the given settings.
    ///
    /// # Returns
    ///
    /// An error if the underlying HTTP client cannot be constructed.
    pub fn new(config: GithubConfig) -> Result<Self, ProviderError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { config, client })
    }

    fn subject_url(&self, key: &str) -> String {
        format!("{}/users/{}", self.config.api_base, key)
    }

    fn items_url(&self, key: &str) -> String {
        format!(
            "{}/users/{}/repos?sort=updated&per_page={}",
            self.config.api_base, key, ITEMS_PER_PAGE
        )
    }

    /// Issues one GET and deserializes the JSON body.
    ///
    /// Non-success statuses become [`ProviderError::Status`] tagged with
    /// `context` so logs say which call failed.
    fn get<T: DeserializeOwned>(&self, context: &'static str, url: &str) -> Result<T, ProviderError> {
        let mut request = self.client.get(url);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status { context, status });
        }
        Ok(response.json()?)
    }
}

impl ProfileProvider for GithubProfileClient {
    fn subject(&self, key: &str) -> Result<SubjectProfile, ProviderError> {
        self.get("subject", &self.subject_url(key))
    }

    fn subject_items(&self, key: &str) -> Result<Vec<SubjectItem>, ProviderError> {
        self.get("items", &self.items_url(key))
    }

    fn profile_url(&self, key: &str) -> String {
        format!("https://github.com/{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: a client pointed at the default API root, no token.
    fn default_client() -> GithubProfileClient {
        GithubProfileClient::new(GithubConfig::default()).unwrap()
    }

    #[test]
    fn subject_url_targets_users_endpoint() {
        let client = default_client();
        assert_eq!(
            client.subject_url("octocat"),
            "https://api.github.com/users/octocat"
        );
    }

    #[test]
    fn items_url_requests_one_page_sorted_by_update() {
        let client = default_client();
        assert_eq!(
            client.items_url("octocat"),
            "https://api.github.com/users/octocat/repos?sort=updated&per_page=6"
        );
    }

    #[test]
    fn api_base_override_is_respected() {
        let config = GithubConfig {
            api_base: "http://127.0.0.1:9999".to_string(),
            token: None,
        };
        let client = GithubProfileClient::new(config).unwrap();
        assert_eq!(client.subject_url("a"), "http://127.0.0.1:9999/users/a");
    }

    #[test]
    fn profile_url_points_at_public_site() {
        let client = default_client();
        assert_eq!(client.profile_url("octocat"), "https://github.com/octocat");
    }
}
