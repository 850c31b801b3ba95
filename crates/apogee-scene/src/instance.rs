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

//! Per-consumer model instances over a shared scene.

use crate::bounds::world_bounds;
use crate::fit::{frame_for_bounds, FitFrame};
use crate::model::{ModelHandle, ModelScene};
use crate::motion::{DriftMotion, MotionPose};
use apogee_core::math::Mat4;

/// One consumer's view of a shared model.
///
/// Construction measures the scene's world bounds from scratch and derives a
/// private [`FitFrame`], so several instances (say, a hero scene and a
/// loading screen) can frame the same geometry at different sizes without
/// ever mutating it.
#[derive(Debug, Clone)]
pub struct ModelInstance {
    handle: ModelHandle,
    frame: FitFrame,
    motion: DriftMotion,
}

impl ModelInstance {
    /// Creates an instance framed to `target_size` with the given drift.
    pub fn new(handle: ModelHandle, target_size: f32, motion: DriftMotion) -> Self {
        let frame = match world_bounds(handle.scene()) {
            Some(bounds) => frame_for_bounds(&bounds, target_size),
            None => {
                log::warn!("Model has no geometry; instance keeps the identity frame.");
                FitFrame::IDENTITY
            }
        };
        Self {
            handle,
            frame,
            motion,
        }
    }

    /// The shared scene this instance views.
    pub fn scene(&self) -> &ModelScene {
        self.handle.scene()
    }

    /// The fit derived for this instance.
    pub fn frame(&self) -> FitFrame {
        self.frame
    }

    /// The drift parameters of this instance.
    pub fn motion(&self) -> DriftMotion {
        self.motion
    }

    /// The drift pose at `t` seconds.
    pub fn pose_at(&self, t: f32) -> MotionPose {
        self.motion.pose_at(t)
    }

    /// The full model-to-world transform at `t` seconds: fit first, then
    /// the drift pose.
    pub fn world_transform_at(&self, t: f32) -> Mat4 {
        self.pose_at(t).transform() * self.frame.composed()
    }
}
