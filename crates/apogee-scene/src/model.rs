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

//! Binary glTF import into an immutable, shareable scene model.
//!
//! [`ModelScene::from_slice`] parses a self-contained glTF document (GLB or
//! embedded data URIs), flattens the node hierarchy into world-space
//! placements, and keeps one [`MeshSurface`] per primitive. A scene that
//! yields no geometry is an import error; callers degrade to
//! [`ModelScene::fallback_station`] instead.

use crate::bounds::GeometrySource;
use crate::error::SceneError;
use apogee_core::math::{Mat4, Vec3};
use base64::Engine;
use gltf::Buffer;
use std::collections::HashMap;
use std::sync::Arc;

/// Presentation parameters attached to each surface.
///
/// Shadow participation is always forced on; roughness and metalness come
/// from the surface's material, or from the house defaults when the
/// primitive has none.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceShading {
    /// Linear RGBA base color factor.
    pub base_color: [f32; 4],
    /// Perceptual roughness, 0 (mirror) to 1 (diffuse).
    pub roughness: f32,
    /// Metalness factor, 0 (dielectric) to 1 (metal).
    pub metalness: f32,
    /// Whether the surface casts shadows.
    pub cast_shadow: bool,
    /// Whether the surface receives shadows.
    pub receive_shadow: bool,
}

impl Default for SurfaceShading {
    /// The defaults applied where the asset specifies nothing: a white base
    /// color, roughness 0.6, metalness 0.2, shadows on.
    fn default() -> Self {
        Self {
            base_color: [1.0, 1.0, 1.0, 1.0],
            roughness: 0.6,
            metalness: 0.2,
            cast_shadow: true,
            receive_shadow: true,
        }
    }
}

/// One renderable surface: the vertex data of a single glTF primitive.
#[derive(Debug, Clone)]
pub struct MeshSurface {
    /// Name of the mesh this surface came from, if the asset provides one.
    pub name: Option<String>,
    /// Vertex positions in the surface's local space.
    pub positions: Vec<Vec3>,
    /// Triangle indices; `None` for non-indexed geometry.
    pub indices: Option<Vec<u32>>,
    /// Presentation parameters for this surface.
    pub shading: SurfaceShading,
}

impl MeshSurface {
    /// Number of triangles, assuming triangle-list topology.
    pub fn triangle_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len() / 3,
            None => self.positions.len() / 3,
        }
    }
}

/// Places one surface in the scene with an accumulated world transform.
///
/// Several placements may reference the same surface; geometry is stored
/// once per primitive, not once per node.
#[derive(Debug, Clone)]
pub struct SurfacePlacement {
    /// Name of the placing node, if the asset provides one.
    pub name: Option<String>,
    /// World transform of the placing node.
    pub transform: Mat4,
    /// Index into [`ModelScene::surfaces`].
    pub surface: usize,
}

/// A flattened, immutable model: surfaces plus their world placements.
#[derive(Debug, Clone)]
pub struct ModelScene {
    /// Deduplicated surface geometry.
    pub surfaces: Vec<MeshSurface>,
    /// World-space placements referencing [`Self::surfaces`].
    pub placements: Vec<SurfacePlacement>,
}

impl ModelScene {
    /// Imports a self-contained glTF document from raw bytes.
    ///
    /// Accepts GLB containers and JSON documents whose buffers are embedded
    /// as base64 data URIs. External buffer files are rejected. The default
    /// scene (or the first scene, if none is flagged) is flattened with
    /// accumulated node transforms.
    ///
    /// # Arguments
    ///
    /// * `bytes`: The raw content of a `.glb` or `.gltf` file.
    ///
    /// # Returns
    ///
    /// The flattened scene, or a [`SceneError`] if parsing fails, a buffer
    /// cannot be resolved, or no geometry gets placed.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SceneError> {
        let gltf = gltf::Gltf::from_slice(bytes)?;
        let buffer_data = load_buffer_data(&gltf)?;

        let mut surfaces = Vec::new();
        let mut placements = Vec::new();
        let mut surfaces_by_mesh = HashMap::new();

        let scene = gltf
            .document
            .default_scene()
            .or_else(|| gltf.document.scenes().next());
        if let Some(scene) = scene {
            for node in scene.nodes() {
                collect_node(
                    &node,
                    Mat4::IDENTITY,
                    &buffer_data,
                    &mut surfaces,
                    &mut surfaces_by_mesh,
                    &mut placements,
                );
            }
        }

        if placements.is_empty() {
            return Err(SceneError::EmptyScene);
        }
        let model = Self {
            surfaces,
            placements,
        };
        log::debug!(
            "Imported model: {} surfaces, {} placements, {} triangles.",
            model.surfaces.len(),
            model.placement_count(),
            model.triangle_count()
        );
        Ok(model)
    }

    /// Builds the procedural stand-in station used when the primary asset
    /// is missing or fails to import: a central hull with a panel wing on
    /// each side.
    pub fn fallback_station() -> Self {
        let hull_shading = SurfaceShading {
            base_color: [148.0 / 255.0, 163.0 / 255.0, 184.0 / 255.0, 1.0],
            roughness: 0.4,
            metalness: 0.5,
            ..SurfaceShading::default()
        };
        let panel_shading = SurfaceShading {
            base_color: [56.0 / 255.0, 189.0 / 255.0, 248.0 / 255.0, 1.0],
            roughness: 1.0,
            metalness: 0.0,
            ..SurfaceShading::default()
        };

        let surfaces = vec![
            box_surface("hull", Vec3::new(1.0, 0.35, 0.35), hull_shading),
            box_surface("panel", Vec3::new(1.4, 0.12, 0.04), panel_shading),
        ];
        let placements = vec![
            SurfacePlacement {
                name: Some("hull".to_owned()),
                transform: Mat4::IDENTITY,
                surface: 0,
            },
            SurfacePlacement {
                name: Some("panel_port".to_owned()),
                transform: Mat4::from_translation(Vec3::new(-1.0, 0.0, 0.0)),
                surface: 1,
            },
            SurfacePlacement {
                name: Some("panel_starboard".to_owned()),
                transform: Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0)),
                surface: 1,
            },
        ];

        Self {
            surfaces,
            placements,
        }
    }

    /// Number of placed surfaces.
    pub fn placement_count(&self) -> usize {
        self.placements.len()
    }

    /// Total triangle count across all placements.
    pub fn triangle_count(&self) -> usize {
        self.placements
            .iter()
            .map(|placement| self.surfaces[placement.surface].triangle_count())
            .sum()
    }
}

impl GeometrySource for ModelScene {
    fn for_each_world_point(&self, visit: &mut dyn FnMut(Vec3)) {
        for placement in &self.placements {
            let surface = &self.surfaces[placement.surface];
            for position in &surface.positions {
                visit(placement.transform.transform_point(*position));
            }
        }
    }
}

/// A cheaply clonable handle to a shared, immutable [`ModelScene`].
///
/// The scene behind a handle is never mutated; consumers that need their own
/// framing derive a per-instance fit instead (see
/// [`ModelInstance`](crate::instance::ModelInstance)).
#[derive(Debug, Clone)]
pub struct ModelHandle(Arc<ModelScene>);

impl ModelHandle {
    /// Wraps a scene for sharing.
    pub fn new(scene: ModelScene) -> Self {
        Self(Arc::new(scene))
    }

    /// The shared scene.
    pub fn scene(&self) -> &ModelScene {
        &self.0
    }
}

impl From<ModelScene> for ModelHandle {
    fn from(scene: ModelScene) -> Self {
        Self::new(scene)
    }
}

// --- Import Helpers ---

fn load_buffer_data(gltf: &gltf::Gltf) -> Result<Vec<Vec<u8>>, SceneError> {
    let mut buffer_data = Vec::new();
    for buffer in gltf.buffers() {
        match buffer.source() {
            gltf::buffer::Source::Bin => {
                if let Some(blob) = gltf.blob.as_deref() {
                    buffer_data.push(blob.to_vec());
                } else {
                    return Err(SceneError::MissingBinaryChunk);
                }
            }
            gltf::buffer::Source::Uri(uri) => {
                if uri.starts_with("data:") {
                    buffer_data.push(decode_data_uri(uri)?);
                } else {
                    return Err(SceneError::ExternalBuffer(uri.to_owned()));
                }
            }
        }
    }
    Ok(buffer_data)
}

fn decode_data_uri(uri: &str) -> Result<Vec<u8>, SceneError> {
    let prefix = "data:application/octet-stream;base64,";
    if let Some(base64_data) = uri.strip_prefix(prefix) {
        Ok(base64::engine::general_purpose::STANDARD.decode(base64_data)?)
    } else if let Some(base64_data) = uri.strip_prefix("data:application/gltf-buffer;base64,") {
        Ok(base64::engine::general_purpose::STANDARD.decode(base64_data)?)
    } else {
        Err(SceneError::UnsupportedDataUri(uri.to_owned()))
    }
}

fn collect_node(
    node: &gltf::Node<'_>,
    parent: Mat4,
    buffer_data: &[Vec<u8>],
    surfaces: &mut Vec<MeshSurface>,
    surfaces_by_mesh: &mut HashMap<usize, Vec<usize>>,
    placements: &mut Vec<SurfacePlacement>,
) {
    let world = parent * Mat4::from_cols_array(node.transform().matrix());

    if let Some(mesh) = node.mesh() {
        // Geometry is built once per mesh and shared by every placing node.
        if !surfaces_by_mesh.contains_key(&mesh.index()) {
            let start = surfaces.len();
            surfaces.extend(build_mesh_surfaces(&mesh, buffer_data));
            surfaces_by_mesh.insert(mesh.index(), (start..surfaces.len()).collect());
        }
        for &surface in &surfaces_by_mesh[&mesh.index()] {
            placements.push(SurfacePlacement {
                name: node.name().map(str::to_owned),
                transform: world,
                surface,
            });
        }
    }

    for child in node.children() {
        collect_node(
            &child,
            world,
            buffer_data,
            surfaces,
            surfaces_by_mesh,
            placements,
        );
    }
}

fn build_mesh_surfaces(mesh: &gltf::Mesh<'_>, buffer_data: &[Vec<u8>]) -> Vec<MeshSurface> {
    let mut surfaces = Vec::new();
    for primitive in mesh.primitives() {
        let get_buffer_data = |buffer: Buffer<'_>| Some(buffer_data[buffer.index()].as_slice());
        let reader = primitive.reader(get_buffer_data);

        let positions: Vec<Vec3> = match reader.read_positions() {
            Some(iter) => iter.map(|[x, y, z]| Vec3::new(x, y, z)).collect(),
            None => {
                log::warn!(
                    "Skipping primitive without vertex positions in mesh {:?}.",
                    mesh.name()
                );
                continue;
            }
        };
        if positions.is_empty() {
            continue;
        }

        surfaces.push(MeshSurface {
            name: mesh.name().map(str::to_owned),
            positions,
            indices: reader.read_indices().map(|iter| iter.into_u32().collect()),
            shading: shading_for(&primitive.material()),
        });
    }
    surfaces
}

fn shading_for(material: &gltf::Material<'_>) -> SurfaceShading {
    // The default material (no material index) carries no authored factors;
    // it gets the house defaults instead of the glTF spec values.
    if material.index().is_none() {
        return SurfaceShading::default();
    }
    let pbr = material.pbr_metallic_roughness();
    SurfaceShading {
        base_color: pbr.base_color_factor(),
        roughness: pbr.roughness_factor(),
        metalness: pbr.metallic_factor(),
        ..SurfaceShading::default()
    }
}

fn box_surface(name: &str, dimensions: Vec3, shading: SurfaceShading) -> MeshSurface {
    let h = dimensions * 0.5;
    let positions = vec![
        Vec3::new(-h.x, -h.y, -h.z),
        Vec3::new(h.x, -h.y, -h.z),
        Vec3::new(h.x, h.y, -h.z),
        Vec3::new(-h.x, h.y, -h.z),
        Vec3::new(-h.x, -h.y, h.z),
        Vec3::new(h.x, -h.y, h.z),
        Vec3::new(h.x, h.y, h.z),
        Vec3::new(-h.x, h.y, h.z),
    ];
    // Counter-clockwise winding viewed from outside each face.
    let indices = vec![
        4, 5, 6, 6, 7, 4, // front (+z)
        1, 0, 3, 3, 2, 1, // back (-z)
        0, 4, 7, 7, 3, 0, // left (-x)
        5, 1, 2, 2, 6, 5, // right (+x)
        3, 7, 6, 6, 2, 3, // top (+y)
        0, 1, 5, 5, 4, 0, // bottom (-y)
    ];
    MeshSurface {
        name: Some(name.to_owned()),
        positions,
        indices: Some(indices),
        shading,
    }
}
