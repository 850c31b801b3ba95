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

// Apogee runtime
// Loads the model and profile data behind a minimum-duration readiness gate,
// then reveals the fitted scene.

mod config;
mod pacer;

use anyhow::Result;
use apogee_core::gate::{GateEvent, ReadinessGate};
use apogee_core::session::SessionStatus;
use apogee_core::{ReadySignal, Stopwatch};
use apogee_net::{FetchSession, GithubProfileClient};
use apogee_scene::{DriftMotion, ModelHandle, ModelInstance, ModelScene};
use config::RuntimeConfig;
use pacer::GatePacer;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = RuntimeConfig::load();
    log::info!("Apogee starting for subject '{}'.", config.subject);

    // The gate starts pacing immediately; the loader races it and notifies
    // the ready signal, whichever way the import went.
    let ready = ReadySignal::new();
    let gate = ReadinessGate::new(config.gate_config(), ready.clone());
    let (mut pacer, gate_events) = GatePacer::spawn(gate);

    let loader_config = config.clone();
    let (instance_tx, instance_rx) = flume::bounded(1);
    let loader = thread::spawn(move || {
        let instance = load_model_instance(&loader_config);
        ready.notify();
        let _ = instance_tx.send(instance);
    });

    let provider = GithubProfileClient::new(config.github_config())?;
    let mut session = FetchSession::new(provider);
    session.run(&config.subject);

    // Drive the loading phase: relay gate progress while applying any fetch
    // reports that arrive along the way.
    loop {
        match gate_events.recv_timeout(Duration::from_millis(50)) {
            Ok(GateEvent::Progress(percent)) => log::debug!("Readiness {percent:.0}%."),
            Ok(GateEvent::Completed) => {
                log::info!("Readiness gate completed.");
                break;
            }
            Err(flume::RecvTimeoutError::Timeout) => {}
            Err(flume::RecvTimeoutError::Disconnected) => break,
        }
        session.pump();
    }
    pacer.stop();

    let instance = instance_rx.recv()?;
    let _ = loader.join();
    reveal_scene(&instance);

    // The blocking client times out stalled requests, so the session always
    // settles.
    while session.status().is_loading() {
        session.pump();
        thread::sleep(Duration::from_millis(25));
    }
    report_profile(&session);

    Ok(())
}

/// Loads the configured model, substituting the fallback station when the
/// asset is absent or fails to import.
fn load_model_instance(config: &RuntimeConfig) -> ModelInstance {
    let watch = Stopwatch::new();
    let scene = match &config.model {
        Some(path) => match std::fs::read(path) {
            Ok(bytes) => match ModelScene::from_slice(&bytes) {
                Ok(scene) => scene,
                Err(error) => {
                    log::warn!(
                        "Import of '{}' failed: {error}. Using the fallback station.",
                        path.display()
                    );
                    ModelScene::fallback_station()
                }
            },
            Err(error) => {
                log::warn!(
                    "Could not read '{}': {error}. Using the fallback station.",
                    path.display()
                );
                ModelScene::fallback_station()
            }
        },
        None => {
            log::info!("No model configured. Using the fallback station.");
            ModelScene::fallback_station()
        }
    };

    let instance = ModelInstance::new(
        ModelHandle::new(scene),
        config.target_size,
        DriftMotion::hero(),
    );
    if let Some(ms) = watch.elapsed_ms() {
        log::info!(
            "Model ready in {ms} ms: {} placements, {} triangles.",
            instance.scene().placement_count(),
            instance.scene().triangle_count()
        );
    }
    instance
}

/// Logs the revealed scene's framing and initial drift pose.
fn reveal_scene(instance: &ModelInstance) {
    let frame = instance.frame();
    let pose = instance.pose_at(0.0);
    log::info!(
        "Revealing scene at scale {:.3} (offset {:?}), drift yaw {:.2}.",
        frame.scale,
        frame.offset,
        pose.yaw
    );
}

/// Logs the settled fetch outcome: the profile summary on success, the
/// generic message plus the direct profile link on failure.
fn report_profile(session: &FetchSession<GithubProfileClient>) {
    match session.status() {
        SessionStatus::Success(bundle) => {
            let subject = &bundle.subject;
            log::info!(
                "{}: {} followers, {} public repos, following {}.",
                subject.display_name(),
                subject.followers,
                subject.public_repos,
                subject.following
            );
            for item in &bundle.items {
                let language = item
                    .language
                    .as_deref()
                    .map(|name| format!(", {name}"))
                    .unwrap_or_default();
                log::info!(
                    "  {} ({} stars{}) {}",
                    item.name,
                    item.stargazers_count,
                    language,
                    item.html_url
                );
            }
        }
        SessionStatus::Error(message) => {
            log::error!("{message}");
            if let Some(url) = session.fallback_url() {
                log::info!("Profile available directly at {url}.");
            }
        }
        SessionStatus::Idle | SessionStatus::Loading => {}
    }
}
