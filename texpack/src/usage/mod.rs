//! Image usage inference.
//!
//! Materials decide how the images behind their textures must be
//! interpreted. This module walks the material list once and records, per
//! image, whether it is read as perceptual color (base color, diffuse,
//! emissive) and/or as a normal map.
//!
//! ```text
//! materials ──► analyze_usage ──► ImageUsageTable ──► encoders (read-only)
//! ```

mod analyze;
mod material;

pub use analyze::{analyze_usage, ImageUsage, ImageUsageTable};
pub use material::{Material, MetallicRoughness, SpecularGlossiness, TextureRef};
