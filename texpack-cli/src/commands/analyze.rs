//! `texpack analyze`: print the inferred usage of every scene image.

use std::path::Path;

use console::style;
use texpack::scene::{ImageSource, SceneDocument, SceneImage};
use texpack::usage::ImageUsage;

use crate::error::CliError;

pub fn run(scene_path: &Path) -> Result<(), CliError> {
    let scene = SceneDocument::load(scene_path)?;
    let usage = scene.analyze_usage();

    println!(
        "{} ({} images, {} materials)",
        style(scene_path.display()).bold(),
        scene.images.len(),
        scene.materials.len()
    );

    for (index, flags) in usage.iter() {
        let image = &scene.images[index];
        println!(
            "  [{:>3}] {:<32} {:<12} {}",
            index,
            image.label(index),
            source_kind(image),
            usage_label(flags)
        );
    }

    Ok(())
}

fn source_kind(image: &SceneImage) -> &'static str {
    match image.source() {
        ImageSource::File(_) => "file",
        ImageSource::DataUri => "data-uri",
        ImageSource::BufferView(_) => "buffer-view",
        ImageSource::Missing => "missing",
    }
}

/// Human-readable usage flags.
pub(crate) fn usage_label(usage: ImageUsage) -> String {
    match (usage.is_perceptual, usage.is_normal_map) {
        (true, true) => format!("{} + normal map", style("srgb").yellow()),
        (true, false) => style("srgb").yellow().to_string(),
        (false, true) => style("normal map").cyan().to_string(),
        (false, false) => style("linear").dim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_kind() {
        let file = SceneImage {
            uri: Some("a.png".into()),
            ..SceneImage::default()
        };
        let embedded = SceneImage {
            buffer_view: Some(3),
            ..SceneImage::default()
        };
        assert_eq!(source_kind(&file), "file");
        assert_eq!(source_kind(&embedded), "buffer-view");
        assert_eq!(source_kind(&SceneImage::default()), "missing");
    }

    #[test]
    fn test_usage_label_mentions_flags() {
        console::set_colors_enabled(false);
        assert_eq!(usage_label(ImageUsage::perceptual()), "srgb");
        assert_eq!(usage_label(ImageUsage::normal_map()), "normal map");
        assert_eq!(usage_label(ImageUsage::default()), "linear");
        let both = ImageUsage {
            is_perceptual: true,
            is_normal_map: true,
        };
        assert_eq!(usage_label(both), "srgb + normal map");
    }
}
