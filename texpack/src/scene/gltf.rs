//! glTF 2.0 JSON subset needed for usage inference.
//!
//! Only images, textures and the color-relevant material slots are read;
//! everything else in the document is ignored.

use serde::Deserialize;
use tracing::warn;

use super::SceneImage;
use crate::usage::{Material, MetallicRoughness, SpecularGlossiness, TextureRef};

#[derive(Debug, Default, Deserialize)]
pub(super) struct GltfRoot {
    #[serde(default)]
    pub images: Vec<GltfImage>,
    #[serde(default)]
    pub textures: Vec<GltfTexture>,
    #[serde(default)]
    pub materials: Vec<GltfMaterial>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GltfImage {
    pub uri: Option<String>,
    pub mime_type: Option<String>,
    pub buffer_view: Option<usize>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GltfTexture {
    pub source: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GltfTextureInfo {
    pub index: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GltfMetallicRoughness {
    pub base_color_texture: Option<GltfTextureInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GltfSpecularGlossiness {
    pub diffuse_texture: Option<GltfTextureInfo>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct GltfMaterialExtensions {
    #[serde(rename = "KHR_materials_pbrSpecularGlossiness")]
    pub specular_glossiness: Option<GltfSpecularGlossiness>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GltfMaterial {
    pub pbr_metallic_roughness: Option<GltfMetallicRoughness>,
    pub emissive_texture: Option<GltfTextureInfo>,
    pub normal_texture: Option<GltfTextureInfo>,
    #[serde(default)]
    pub extensions: GltfMaterialExtensions,
}

impl GltfRoot {
    /// Resolve a texture slot to the image behind it.
    ///
    /// Texture indices out of range and textures without a source resolve
    /// to no image.
    fn texture_ref(&self, info: &GltfTextureInfo) -> TextureRef {
        let image = self
            .textures
            .get(info.index)
            .and_then(|texture| texture.source);
        if image.is_none() {
            warn!(texture = info.index, "Texture does not resolve to an image, ignoring");
        }
        TextureRef { image }
    }

    pub fn materials(&self) -> Vec<Material> {
        self.materials
            .iter()
            .map(|material| Material {
                pbr_metallic_roughness: material.pbr_metallic_roughness.as_ref().map(|pbr| {
                    MetallicRoughness {
                        base_color_texture: pbr
                            .base_color_texture
                            .as_ref()
                            .map(|info| self.texture_ref(info)),
                    }
                }),
                pbr_specular_glossiness: material.extensions.specular_glossiness.as_ref().map(
                    |pbr| SpecularGlossiness {
                        diffuse_texture: pbr
                            .diffuse_texture
                            .as_ref()
                            .map(|info| self.texture_ref(info)),
                    },
                ),
                emissive_texture: material
                    .emissive_texture
                    .as_ref()
                    .map(|info| self.texture_ref(info)),
                normal_texture: material
                    .normal_texture
                    .as_ref()
                    .map(|info| self.texture_ref(info)),
            })
            .collect()
    }

    pub fn images(&self) -> Vec<SceneImage> {
        self.images
            .iter()
            .map(|image| SceneImage {
                name: image.name.clone(),
                uri: image.uri.clone(),
                mime_type: image.mime_type.clone(),
                buffer_view: image.buffer_view,
            })
            .collect()
    }
}
