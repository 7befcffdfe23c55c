//! Single-pass usage inference over a material list.

use tracing::debug;

use super::Material;

/// How an image is read by the materials that reference it.
///
/// Both flags may be set when content uses one image in conflicting roles;
/// that is kept as-is and resolved at encode time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageUsage {
    /// Referenced as base color, diffuse or emissive (sRGB data).
    pub is_perceptual: bool,
    /// Referenced as a normal map (linear vector data).
    pub is_normal_map: bool,
}

impl ImageUsage {
    /// Usage of an image only read as color.
    pub fn perceptual() -> Self {
        Self {
            is_perceptual: true,
            is_normal_map: false,
        }
    }

    /// Usage of an image only read as a normal map.
    pub fn normal_map() -> Self {
        Self {
            is_perceptual: false,
            is_normal_map: true,
        }
    }

    /// True if no material references the image in a color-relevant slot.
    pub fn is_unreferenced(&self) -> bool {
        !self.is_perceptual && !self.is_normal_map
    }
}

/// Usage flags for every image of a scene, indexed like the image list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageUsageTable {
    entries: Vec<ImageUsage>,
}

impl ImageUsageTable {
    /// Table of `image_count` entries with all flags cleared.
    pub fn new(image_count: usize) -> Self {
        Self {
            entries: vec![ImageUsage::default(); image_count],
        }
    }

    /// Usage of the image at `index`, `None` if out of range.
    pub fn get(&self, index: usize) -> Option<ImageUsage> {
        self.entries.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, ImageUsage)> + '_ {
        self.entries.iter().copied().enumerate()
    }

    fn mark_perceptual(&mut self, index: usize) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.is_perceptual = true;
        }
    }

    fn mark_normal_map(&mut self, index: usize) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.is_normal_map = true;
        }
    }
}

/// Infer per-image usage flags from a material list.
///
/// Walks every material once. Flags only ever go from `false` to `true`,
/// so an image shared between materials ends up with the union of its
/// roles. References that do not resolve to an image, or point past
/// `image_count`, are ignored.
///
/// # Example
///
/// ```
/// use texpack::usage::{analyze_usage, Material, TextureRef};
///
/// let materials = vec![
///     Material::metallic_roughness(Some(TextureRef::image(0)))
///         .with_normal_texture(TextureRef::image(1)),
/// ];
///
/// let usage = analyze_usage(&materials, 3);
/// assert!(usage.get(0).unwrap().is_perceptual);
/// assert!(usage.get(1).unwrap().is_normal_map);
/// assert!(usage.get(2).unwrap().is_unreferenced());
/// ```
pub fn analyze_usage(materials: &[Material], image_count: usize) -> ImageUsageTable {
    let mut table = ImageUsageTable::new(image_count);

    for material in materials {
        for image in material.perceptual_images() {
            table.mark_perceptual(image);
        }

        if let Some(image) = material.normal_map_image() {
            table.mark_normal_map(image);
        }
    }

    debug!(
        materials = materials.len(),
        images = image_count,
        "Analyzed image usage"
    );

    table
}
