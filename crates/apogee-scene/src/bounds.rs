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

//! World-space bounds accumulation over abstract geometry.

use apogee_core::math::{Aabb, Vec3};

/// Anything that can enumerate its geometry as world-space points.
///
/// The fit pipeline only needs point enumeration, so it is written against
/// this capability rather than a concrete scene type.
pub trait GeometrySource {
    /// Calls `visit` once per geometry point, in world space.
    fn for_each_world_point(&self, visit: &mut dyn FnMut(Vec3));
}

/// A bare point cloud is its own world-space geometry.
impl GeometrySource for [Vec3] {
    fn for_each_world_point(&self, visit: &mut dyn FnMut(Vec3)) {
        for point in self {
            visit(*point);
        }
    }
}

/// Accumulates the combined world-space bounds of `source` from scratch.
///
/// Nothing is cached between calls; a freshly imported or cloned instance
/// gets its own measurement. Returns `None` when the source enumerates no
/// points.
pub fn world_bounds<S: GeometrySource + ?Sized>(source: &S) -> Option<Aabb> {
    let mut bounds = Aabb::INVALID;
    let mut seen_any = false;
    source.for_each_world_point(&mut |point| {
        bounds = bounds.merged_with_point(point);
        seen_any = true;
    });
    seen_any.then_some(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_has_no_bounds() {
        let points: [Vec3; 0] = [];
        assert!(world_bounds(points.as_slice()).is_none());
    }

    #[test]
    fn single_point_yields_degenerate_bounds() {
        let points = [Vec3::new(3.0, -1.0, 2.0)];
        let bounds = world_bounds(points.as_slice()).unwrap();
        assert_eq!(bounds.min, points[0]);
        assert_eq!(bounds.max, points[0]);
        assert_eq!(bounds.size(), Vec3::ZERO);
    }

    #[test]
    fn bounds_cover_all_points() {
        let points = [
            Vec3::new(-2.0, 0.5, 1.0),
            Vec3::new(4.0, -1.0, -3.0),
            Vec3::new(1.0, 5.0, 0.0),
        ];
        let bounds = world_bounds(points.as_slice()).unwrap();
        assert_eq!(bounds.min, Vec3::new(-2.0, -1.0, -3.0));
        assert_eq!(bounds.max, Vec3::new(4.0, 5.0, 1.0));
    }

    #[test]
    fn repeated_calls_measure_from_scratch() {
        let points = [Vec3::new(1.0, 1.0, 1.0), Vec3::new(-1.0, -1.0, -1.0)];
        let first = world_bounds(points.as_slice()).unwrap();
        let second = world_bounds(points.as_slice()).unwrap();
        assert_eq!(first.min, second.min);
        assert_eq!(first.max, second.max);
    }
}
