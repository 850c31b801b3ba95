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

//! # Apogee Scene
//!
//! Model handling for the station showcase: binary glTF import, world-space
//! bounds accumulation, origin-centering fit, and the idle drift animation.
//!
//! The crate's centerpiece is the fit pipeline. A [`ModelScene`] is imported
//! once and shared immutably behind a [`ModelHandle`]; every
//! [`ModelInstance`] then recomputes bounds from scratch and derives its own
//! [`FitFrame`], so no consumer ever mutates shared geometry to center it.

#![warn(missing_docs)]

pub mod bounds;
pub mod error;
pub mod fit;
pub mod instance;
pub mod model;
pub mod motion;

pub use bounds::{world_bounds, GeometrySource};
pub use error::SceneError;
pub use fit::{frame_for_bounds, FitFrame, TARGET_SIZE};
pub use instance::ModelInstance;
pub use model::{MeshSurface, ModelHandle, ModelScene, SurfacePlacement, SurfaceShading};
pub use motion::{DriftMotion, MotionPose};
