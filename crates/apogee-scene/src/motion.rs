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

//! Idle drift animation: slow sinusoidal sway around a resting pose.

use apogee_core::math::{Mat4, Vec3};

/// The pose of a drifting model at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionPose {
    /// Rotation around the Y-axis, radians.
    pub yaw: f32,
    /// Rotation around the X-axis, radians. Fixed per preset.
    pub pitch: f32,
    /// Rotation around the Z-axis, radians.
    pub roll: f32,
    /// Vertical offset of the whole model.
    pub lift: f32,
}

impl MotionPose {
    /// The pose as a matrix: lift, then yaw, pitch, and roll applied to
    /// origin-centered content.
    pub fn transform(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, self.lift, 0.0))
            * Mat4::from_rotation_y(self.yaw)
            * Mat4::from_rotation_x(self.pitch)
            * Mat4::from_rotation_z(self.roll)
    }
}

/// Parameters of the sinusoidal idle drift.
///
/// Poses are a pure function of elapsed time, cheap enough to evaluate every
/// frame from any loop. The two presets reproduce the hero scene and the
/// loading screen, which differ only in resting yaw and bob rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftMotion {
    /// Resting yaw the sway oscillates around, radians.
    pub base_yaw: f32,
    /// Yaw oscillation frequency, radians per second of phase.
    pub yaw_rate: f32,
    /// Yaw oscillation amplitude, radians.
    pub yaw_span: f32,
    /// Roll oscillation frequency.
    pub roll_rate: f32,
    /// Roll oscillation amplitude, radians.
    pub roll_span: f32,
    /// Vertical bob frequency.
    pub lift_rate: f32,
    /// Vertical bob amplitude.
    pub lift_span: f32,
    /// Fixed pitch, radians.
    pub pitch: f32,
}

impl DriftMotion {
    /// The hero scene's drift.
    pub const fn hero() -> Self {
        Self {
            base_yaw: -0.6,
            yaw_rate: 0.08,
            yaw_span: 0.12,
            roll_rate: 0.05,
            roll_span: 0.04,
            lift_rate: 0.45,
            lift_span: 0.09,
            pitch: 0.15,
        }
    }

    /// The loading screen's drift: turned further away, slightly slower bob.
    pub const fn loading() -> Self {
        Self {
            base_yaw: -0.85,
            lift_rate: 0.42,
            ..Self::hero()
        }
    }

    /// Evaluates the pose at `t` seconds of elapsed time.
    pub fn pose_at(&self, t: f32) -> MotionPose {
        MotionPose {
            yaw: self.base_yaw + (t * self.yaw_rate).sin() * self.yaw_span,
            pitch: self.pitch,
            roll: (t * self.roll_rate).sin() * self.roll_span,
            lift: (t * self.lift_rate).sin() * self.lift_span,
        }
    }
}

impl Default for DriftMotion {
    fn default() -> Self {
        Self::hero()
    }
}
