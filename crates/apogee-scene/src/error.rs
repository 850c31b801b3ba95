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

//! Error types for model import.

use thiserror::Error;

/// Errors produced while importing a model.
#[derive(Debug, Error)]
pub enum SceneError {
    /// The byte stream is not a parseable glTF document.
    #[error("failed to parse glTF document: {0}")]
    Parse(#[from] gltf::Error),

    /// A GLB buffer points at the binary chunk, but the file has none.
    #[error("glTF document references a binary chunk that is missing")]
    MissingBinaryChunk,

    /// A buffer is stored as a data URI in a format other than base64.
    #[error("unsupported data URI format: {0}")]
    UnsupportedDataUri(String),

    /// A base64 data URI failed to decode.
    #[error("failed to decode base64 buffer data: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// A buffer lives in an external file, which this importer does not
    /// fetch. Models must be self-contained (GLB or embedded data URIs).
    #[error("external buffer URI is not supported: {0}")]
    ExternalBuffer(String),

    /// The document parsed but placed no readable geometry in any scene.
    #[error("model contains no readable geometry")]
    EmptyScene,
}
