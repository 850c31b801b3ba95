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

//! Runtime configuration.
//!
//! Settings come from three layers, weakest first: built-in defaults, an
//! optional `apogee.json` in the working directory, and environment
//! variables. A missing or malformed file falls back to the layers below
//! it rather than aborting the run.

use apogee_core::gate::GateConfig;
use apogee_net::GithubConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File probed for optional configuration, relative to the working directory.
pub const CONFIG_FILE: &str = "apogee.json";

/// Tunable settings for the runtime binary.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Subject whose profile is fetched.
    pub subject: String,
    /// Path to the binary glTF model; `None` uses the built-in fallback.
    pub model: Option<PathBuf>,
    /// Profile API root, without a trailing slash.
    pub api_base: String,
    /// Optional bearer credential for the profile API.
    pub token: Option<String>,
    /// Minimum visible duration of the readiness gate, in milliseconds.
    pub gate_min_duration_ms: u64,
    /// Readiness gate tick interval, in milliseconds.
    pub gate_tick_interval_ms: u64,
    /// Settle delay before the gate completes, in milliseconds.
    pub gate_settle_delay_ms: u64,
    /// World-space size the model's longest side is normalized to.
    pub target_size: f32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            subject: "octocat".to_string(),
            model: None,
            api_base: "https://api.github.com".to_string(),
            token: None,
            gate_min_duration_ms: 2200,
            gate_tick_interval_ms: 20,
            gate_settle_delay_ms: 350,
            target_size: 2.6,
        }
    }
}

impl RuntimeConfig {
    /// Loads configuration from [`CONFIG_FILE`] and the process environment.
    pub fn load() -> Self {
        Self::from_sources(Path::new(CONFIG_FILE), |name| std::env::var(name).ok())
    }

    /// Loads configuration from an explicit file path and environment lookup.
    ///
    /// # Arguments
    ///
    /// * `path` - Candidate config file; silently skipped when absent.
    /// * `env` - Environment lookup, injectable for tests.
    pub fn from_sources(path: &Path, env: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::from_file(path);

        if let Some(subject) = env("APOGEE_SUBJECT") {
            config.subject = subject;
        }
        if let Some(model) = env("APOGEE_MODEL") {
            config.model = Some(PathBuf::from(model));
        }
        if let Some(api_base) = env("APOGEE_API_BASE") {
            config.api_base = api_base;
        }
        if let Some(token) = env("GITHUB_TOKEN") {
            config.token = Some(token);
        }

        config
    }

    fn from_file(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&contents) {
            Ok(config) => {
                log::info!("Loaded configuration from '{}'.", path.display());
                config
            }
            Err(error) => {
                log::warn!(
                    "Ignoring malformed config '{}': {error}.",
                    path.display()
                );
                Self::default()
            }
        }
    }

    /// Gate timing derived from the millisecond fields.
    pub fn gate_config(&self) -> GateConfig {
        GateConfig {
            min_duration: Duration::from_millis(self.gate_min_duration_ms),
            tick_interval: Duration::from_millis(self.gate_tick_interval_ms),
            settle_delay: Duration::from_millis(self.gate_settle_delay_ms),
        }
    }

    /// Provider settings derived from the API fields.
    pub fn github_config(&self) -> GithubConfig {
        GithubConfig {
            api_base: self.api_base.clone(),
            token: self.token.clone(),
        }
    }
}
