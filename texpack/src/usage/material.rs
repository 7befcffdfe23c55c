//! Material graph as seen by usage inference.
//!
//! Only the texture slots that affect color interpretation are modelled.
//! Every slot is optional and every texture reference may fail to resolve
//! to an image; both cases are normal input, not errors.

/// A texture slot that may point at an image in the scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextureRef {
    /// Index into the scene's image list, if the texture has a source.
    pub image: Option<usize>,
}

impl TextureRef {
    /// Reference that resolves to the given image.
    pub fn image(index: usize) -> Self {
        Self { image: Some(index) }
    }

    /// Reference to a texture with no backing image.
    pub fn unresolved() -> Self {
        Self { image: None }
    }
}

/// Metallic-roughness workflow block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetallicRoughness {
    pub base_color_texture: Option<TextureRef>,
}

/// Specular-glossiness workflow block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecularGlossiness {
    pub diffuse_texture: Option<TextureRef>,
}

/// A material and the texture slots relevant to color interpretation.
///
/// A workflow block being `Some` is what declares that workflow; a block
/// with an empty texture slot is valid.
///
/// # Example
///
/// ```
/// use texpack::usage::{Material, TextureRef};
///
/// let material = Material::metallic_roughness(Some(TextureRef::image(0)))
///     .with_normal_texture(TextureRef::image(1));
/// assert!(material.normal_texture.is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Material {
    pub pbr_metallic_roughness: Option<MetallicRoughness>,
    pub pbr_specular_glossiness: Option<SpecularGlossiness>,
    pub emissive_texture: Option<TextureRef>,
    pub normal_texture: Option<TextureRef>,
}

impl Material {
    /// Material declaring the metallic-roughness workflow.
    pub fn metallic_roughness(base_color_texture: Option<TextureRef>) -> Self {
        Self {
            pbr_metallic_roughness: Some(MetallicRoughness { base_color_texture }),
            ..Self::default()
        }
    }

    /// Material declaring the specular-glossiness workflow.
    pub fn specular_glossiness(diffuse_texture: Option<TextureRef>) -> Self {
        Self {
            pbr_specular_glossiness: Some(SpecularGlossiness { diffuse_texture }),
            ..Self::default()
        }
    }

    /// Set the emissive texture slot.
    pub fn with_emissive_texture(mut self, texture: TextureRef) -> Self {
        self.emissive_texture = Some(texture);
        self
    }

    /// Set the normal map texture slot.
    pub fn with_normal_texture(mut self, texture: TextureRef) -> Self {
        self.normal_texture = Some(texture);
        self
    }

    /// Images this material reads as perceptual (sRGB) color data.
    pub(crate) fn perceptual_images(&self) -> impl Iterator<Item = usize> + '_ {
        let base_color = self
            .pbr_metallic_roughness
            .as_ref()
            .and_then(|pbr| pbr.base_color_texture);
        let diffuse = self
            .pbr_specular_glossiness
            .as_ref()
            .and_then(|pbr| pbr.diffuse_texture);

        [base_color, diffuse, self.emissive_texture]
            .into_iter()
            .flatten()
            .filter_map(|texture| texture.image)
    }

    /// Image this material reads as a tangent-space normal map.
    pub(crate) fn normal_map_image(&self) -> Option<usize> {
        self.normal_texture.and_then(|texture| texture.image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_material_references_nothing() {
        let material = Material::default();
        assert_eq!(material.perceptual_images().count(), 0);
        assert_eq!(material.normal_map_image(), None);
    }

    #[test]
    fn test_perceptual_images_collects_all_color_slots() {
        let mut material = Material::metallic_roughness(Some(TextureRef::image(0)))
            .with_emissive_texture(TextureRef::image(2));
        material.pbr_specular_glossiness = Some(SpecularGlossiness {
            diffuse_texture: Some(TextureRef::image(1)),
        });

        let images: Vec<usize> = material.perceptual_images().collect();
        assert_eq!(images, vec![0, 1, 2]);
    }

    #[test]
    fn test_unresolved_references_are_skipped() {
        let material = Material::specular_glossiness(Some(TextureRef::unresolved()))
            .with_normal_texture(TextureRef::unresolved());

        assert_eq!(material.perceptual_images().count(), 0);
        assert_eq!(material.normal_map_image(), None);
    }
}
