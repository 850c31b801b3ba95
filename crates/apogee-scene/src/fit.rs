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

//! Origin-centering fit: translate content to the origin, scale to a
//! target size.

use apogee_core::math::{Aabb, Mat4, Vec3};

/// The canonical fit target: the hero scene's largest-dimension size.
pub const TARGET_SIZE: f32 = 2.6;

/// The two-part framing derived from a model's bounds.
///
/// The translation applies to the content and the uniform scale to an
/// enclosing wrapper. Keeping them separate means later rotation and
/// animation compose around the origin with a stable scale factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitFrame {
    /// Translation applied to the content (the negated bounds center).
    pub offset: Vec3,
    /// Uniform scale applied by the wrapper.
    pub scale: f32,
}

impl FitFrame {
    /// The frame that leaves content untouched.
    pub const IDENTITY: Self = Self {
        offset: Vec3::ZERO,
        scale: 1.0,
    };

    /// The full wrapper-over-content transform as a single matrix.
    pub fn composed(&self) -> Mat4 {
        Mat4::from_scale(Vec3::new(self.scale, self.scale, self.scale))
            * Mat4::from_translation(self.offset)
    }

    /// Applies the frame to a world-space point.
    pub fn apply(&self, point: Vec3) -> Vec3 {
        (point + self.offset) * self.scale
    }
}

/// Computes the frame that centers `bounds` at the origin and scales its
/// largest dimension to `target_size`.
///
/// Degenerate bounds (all dimensions zero) substitute a unit dimension, so
/// point-like content renders at `target_size` rather than disappearing or
/// dividing by zero. `bounds` must be a valid box, as produced by
/// [`world_bounds`](crate::bounds::world_bounds).
///
/// The function is pure: the same bounds and target always produce the same
/// frame.
pub fn frame_for_bounds(bounds: &Aabb, target_size: f32) -> FitFrame {
    let center = bounds.center();
    let size = bounds.size();

    let mut max_dimension = size.max_component();
    if !(max_dimension > 0.0) {
        max_dimension = 1.0;
    }

    FitFrame {
        offset: -center,
        scale: target_size / max_dimension,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn frame_matches_reference_bounds() {
        let bounds = Aabb::from_min_max(Vec3::new(-2.0, -1.0, -3.0), Vec3::new(4.0, 5.0, 1.0));

        assert_eq!(bounds.center(), Vec3::new(1.0, 2.0, -1.0));
        assert_eq!(bounds.size(), Vec3::new(6.0, 6.0, 4.0));

        let frame = frame_for_bounds(&bounds, TARGET_SIZE);
        assert_relative_eq!(frame.scale, 2.6 / 6.0, max_relative = 1e-6);
        assert_relative_eq!(frame.offset.x, -1.0, max_relative = 1e-6);
        assert_relative_eq!(frame.offset.y, -2.0, max_relative = 1e-6);
        assert_relative_eq!(frame.offset.z, 1.0, max_relative = 1e-6);
    }

    #[test]
    fn fitted_center_lands_on_the_origin() {
        let bounds = Aabb::from_min_max(Vec3::new(-2.0, -1.0, -3.0), Vec3::new(4.0, 5.0, 1.0));
        let frame = frame_for_bounds(&bounds, TARGET_SIZE);

        let fitted_center = frame.apply(bounds.center());
        assert_relative_eq!(fitted_center.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(fitted_center.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(fitted_center.z, 0.0, epsilon = 1e-6);

        // The largest extent must come out at the target size.
        let fitted_min = frame.apply(bounds.min);
        let fitted_max = frame.apply(bounds.max);
        assert_relative_eq!(fitted_max.x - fitted_min.x, TARGET_SIZE, max_relative = 1e-6);
    }

    #[test]
    fn composed_matrix_agrees_with_apply() {
        let bounds = Aabb::from_min_max(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 8.0, 4.0));
        let frame = frame_for_bounds(&bounds, TARGET_SIZE);

        let point = Vec3::new(1.5, 6.0, 0.5);
        let via_matrix = frame.composed().transform_point(point);
        let via_apply = frame.apply(point);
        assert_relative_eq!(via_matrix.x, via_apply.x, epsilon = 1e-6);
        assert_relative_eq!(via_matrix.y, via_apply.y, epsilon = 1e-6);
        assert_relative_eq!(via_matrix.z, via_apply.z, epsilon = 1e-6);
    }

    #[test]
    fn degenerate_bounds_scale_by_target_alone() {
        let point = Vec3::new(3.0, 3.0, 3.0);
        let bounds = Aabb::from_min_max(point, point);

        let frame = frame_for_bounds(&bounds, TARGET_SIZE);
        assert_relative_eq!(frame.scale, TARGET_SIZE, max_relative = 1e-6);
        assert_eq!(frame.offset, -point);
    }

    #[test]
    fn identity_frame_is_a_no_op() {
        let point = Vec3::new(4.0, -2.0, 7.0);
        assert_eq!(FitFrame::IDENTITY.apply(point), point);
    }

    #[test]
    fn same_inputs_produce_the_same_frame() {
        let bounds = Aabb::from_min_max(Vec3::new(-1.0, -2.0, -3.0), Vec3::new(5.0, 4.0, 3.0));
        let first = frame_for_bounds(&bounds, 1.8);
        let second = frame_for_bounds(&bounds, 1.8);
        assert_eq!(first, second);
    }
}
