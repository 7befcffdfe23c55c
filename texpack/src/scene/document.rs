//! Scene documents: image list plus material graph.

use std::fs;
use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;
use thiserror::Error;
use tracing::debug;

use super::gltf::GltfRoot;
use crate::mime::mime_type_from_path;
use crate::usage::{analyze_usage, ImageUsageTable, Material};

const GLB_MAGIC: &[u8; 4] = b"glTF";

/// Result type for scene loading.
pub type SceneResult<T> = Result<T, SceneError>;

/// Errors that can occur while loading a scene document.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid glTF JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid GLB container: {0}")]
    InvalidGlb(#[source] gltf::Error),
}

/// Where an image's bytes live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource<'a> {
    /// External file, URI relative to the document.
    File(&'a str),
    /// Embedded `data:` URI.
    DataUri,
    /// Bytes stored in a buffer view of the document.
    BufferView(usize),
    /// Neither a URI nor a buffer view.
    Missing,
}

/// One entry of the scene's image list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneImage {
    pub name: Option<String>,
    pub uri: Option<String>,
    pub mime_type: Option<String>,
    pub buffer_view: Option<usize>,
}

impl SceneImage {
    pub fn source(&self) -> ImageSource<'_> {
        match (&self.uri, self.buffer_view) {
            (Some(uri), _) if uri.starts_with("data:") => ImageSource::DataUri,
            (Some(uri), _) => ImageSource::File(uri),
            (None, Some(view)) => ImageSource::BufferView(view),
            (None, None) => ImageSource::Missing,
        }
    }

    /// Declared MIME type, else the one implied by the URI extension.
    ///
    /// Empty when neither is known.
    pub fn mime_type(&self) -> &str {
        match (&self.mime_type, self.source()) {
            (Some(mime), _) if !mime.is_empty() => mime.as_str(),
            (_, ImageSource::File(uri)) => mime_type_from_path(uri),
            _ => "",
        }
    }

    /// Path of an external image relative to `base_dir`.
    pub fn file_path(&self, base_dir: &Path) -> Option<PathBuf> {
        match self.source() {
            ImageSource::File(uri) => {
                let decoded = percent_decode_str(uri).decode_utf8_lossy();
                Some(base_dir.join(decoded.as_ref()))
            }
            _ => None,
        }
    }

    /// Short label for reports: name, else URI file name, else `#index`.
    pub fn label(&self, index: usize) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        match self.source() {
            ImageSource::File(uri) => uri.rsplit('/').next().unwrap_or(uri).to_string(),
            _ => format!("#{}", index),
        }
    }
}

/// The parts of a scene relevant to texture compression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneDocument {
    pub images: Vec<SceneImage>,
    pub materials: Vec<Material>,
}

impl SceneDocument {
    /// Load a `.gltf` or `.glb` file.
    pub fn load(path: &Path) -> SceneResult<Self> {
        let bytes = fs::read(path).map_err(|source| SceneError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let document = if bytes.starts_with(GLB_MAGIC) {
            Self::from_glb(&bytes)?
        } else {
            Self::from_gltf_json(&bytes)?
        };

        debug!(
            path = %path.display(),
            images = document.images.len(),
            materials = document.materials.len(),
            "Loaded scene"
        );

        Ok(document)
    }

    /// Parse a glTF JSON document.
    pub fn from_gltf_json(json: &[u8]) -> SceneResult<Self> {
        let root: GltfRoot = serde_json::from_slice(json)?;
        Ok(Self {
            images: root.images(),
            materials: root.materials(),
        })
    }

    /// Parse the JSON chunk of a binary glTF container.
    pub fn from_glb(bytes: &[u8]) -> SceneResult<Self> {
        let glb = gltf::Glb::from_slice(bytes).map_err(SceneError::InvalidGlb)?;
        Self::from_gltf_json(&glb.json)
    }

    /// Infer usage flags for every image of this document.
    pub fn analyze_usage(&self) -> ImageUsageTable {
        analyze_usage(&self.materials, self.images.len())
    }
}
