//! `texpack pack`: compress every external image of a scene.
//!
//! Usage is inferred once for the whole scene and the encoder is probed
//! once before any image is touched. Per-image failures never abort the
//! run: the image is reported and left unencoded.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use texpack::config::ConfigFile;
use texpack::encoder::{EncodeJob, TextureEncoder};
use texpack::scene::{ImageSource, SceneDocument};
use tracing::{debug, warn};

use super::analyze::usage_label;
use super::common::{build_encoder, EncodeArgs, ResolvedEncodeArgs};
use super::encode::detect_mime_type;
use crate::error::CliError;

/// What happened to one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutcome {
    Encoded { output: PathBuf, bytes: usize },
    Failed(String),
    Skipped(&'static str),
}

/// Per-run counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackSummary {
    pub encoded: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl PackSummary {
    fn record(&mut self, outcome: &ImageOutcome) {
        match outcome {
            ImageOutcome::Encoded { .. } => self.encoded += 1,
            ImageOutcome::Failed(_) => self.failed += 1,
            ImageOutcome::Skipped(_) => self.skipped += 1,
        }
    }
}

pub fn run(
    scene_path: &Path,
    out_dir: &Path,
    args: &EncodeArgs,
    config: &ConfigFile,
    verbose: bool,
) -> Result<(), CliError> {
    let settings = args.resolve(config)?;
    let scene = SceneDocument::load(scene_path)?;

    let encoder = build_encoder(settings.backend, config, verbose);
    if !encoder.is_available() {
        return Err(CliError::EncoderUnavailable(settings.backend));
    }

    fs::create_dir_all(out_dir).map_err(|error| CliError::FileWrite {
        path: out_dir.to_path_buf(),
        error,
    })?;

    let base_dir = scene_path.parent().unwrap_or(Path::new("."));

    let progress = ProgressBar::new(scene.images.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} | {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );
    progress.enable_steady_tick(Duration::from_millis(100));

    let summary = pack_scene(
        &scene,
        base_dir,
        out_dir,
        encoder.as_ref(),
        &settings,
        |label, outcome| {
            progress.inc(1);
            progress.set_message(label.to_string());
            match outcome {
                ImageOutcome::Encoded { output, .. } => {
                    debug!(image = label, output = %output.display(), "Encoded");
                }
                ImageOutcome::Failed(reason) => {
                    progress.println(format!("{} {}: {}", style("✗").red(), label, reason));
                }
                ImageOutcome::Skipped(reason) => {
                    progress.println(format!("{} {}: {}", style("-").dim(), label, reason));
                }
            }
        },
    );

    progress.finish_and_clear();

    println!(
        "{} encoded, {} failed, {} skipped ({} -> {})",
        style(summary.encoded).green(),
        style(summary.failed).red(),
        style(summary.skipped).dim(),
        encoder.name(),
        out_dir.display()
    );

    if summary.failed > 0 {
        return Err(CliError::PackIncomplete {
            failed: summary.failed,
        });
    }
    Ok(())
}

/// Encode every external image of `scene` into `out_dir`.
///
/// `report` is called once per image, in image order.
pub fn pack_scene<F>(
    scene: &SceneDocument,
    base_dir: &Path,
    out_dir: &Path,
    encoder: &dyn TextureEncoder,
    settings: &ResolvedEncodeArgs,
    mut report: F,
) -> PackSummary
where
    F: FnMut(&str, &ImageOutcome),
{
    let usage = scene.analyze_usage();
    let mut summary = PackSummary::default();
    let mut used_names = HashSet::new();

    for (index, flags) in usage.iter() {
        let image = &scene.images[index];
        let label = image.label(index);

        let outcome = match (image.source(), image.file_path(base_dir)) {
            (ImageSource::File(_), Some(path)) => {
                debug!(image = %label, usage = %usage_label(flags), "Packing image");
                let output = output_path(out_dir, &path, index, encoder.extension(), &mut used_names);
                encode_file(&path, image.mime_type(), &output, flags, settings, encoder)
            }
            (ImageSource::DataUri, _) => ImageOutcome::Skipped("data URI"),
            (ImageSource::BufferView(_), _) => ImageOutcome::Skipped("embedded in buffer"),
            _ => ImageOutcome::Skipped("no image source"),
        };

        if let ImageOutcome::Failed(reason) = &outcome {
            warn!(image = %label, "{}", reason);
        }

        summary.record(&outcome);
        report(&label, &outcome);
    }

    summary
}

fn encode_file(
    path: &Path,
    declared_mime: &str,
    output: &Path,
    usage: texpack::usage::ImageUsage,
    settings: &ResolvedEncodeArgs,
    encoder: &dyn TextureEncoder,
) -> ImageOutcome {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) => return ImageOutcome::Failed(format!("failed to read {}: {}", path.display(), e)),
    };

    let mime_type = if declared_mime.is_empty() {
        detect_mime_type(path, &data)
    } else {
        declared_mime
    };

    let job = EncodeJob::new(&data, mime_type)
        .with_usage(usage)
        .with_quality(settings.quality)
        .with_scale(settings.scale)
        .with_uastc(settings.uastc);

    let encoded = match encoder.encode(&job) {
        Ok(encoded) => encoded,
        Err(e) => return ImageOutcome::Failed(e.to_string()),
    };

    match fs::write(output, &encoded) {
        Ok(()) => ImageOutcome::Encoded {
            output: output.to_path_buf(),
            bytes: encoded.len(),
        },
        Err(e) => ImageOutcome::Failed(format!("failed to write {}: {}", output.display(), e)),
    }
}

/// `<out_dir>/<stem>.<ext>`, with `-<index>` appended when the stem was
/// already taken by an earlier image, then `-<n>` until the name is free.
fn output_path(
    out_dir: &Path,
    input: &Path,
    index: usize,
    extension: &str,
    used: &mut HashSet<String>,
) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| format!("image{}", index));

    let mut name = stem.clone();
    let mut attempt = 0;
    while !used.insert(name.clone()) {
        name = match attempt {
            0 => format!("{}-{}", stem, index),
            n => format!("{}-{}-{}", stem, index, n),
        };
        attempt += 1;
    }

    out_dir.join(format!("{}.{}", name, extension))
}
