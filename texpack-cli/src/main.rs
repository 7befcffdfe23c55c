//! texpack CLI - Command-line interface
//!
//! This binary provides a command-line interface to the texpack library.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use texpack::logging::init_logging;
use tracing::debug;

use commands::common::{load_config, BackendArg, EncodeArgs};
use commands::encode::UsageFlags;
use error::CliError;

#[derive(Parser)]
#[command(name = "texpack")]
#[command(version)]
#[command(about = "Compress glTF textures with basisu or toktx", long_about = None)]
struct Cli {
    /// Log debug output and echo every encoder command
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of ~/.texpack/config.ini
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check which encoders are installed
    Check {
        /// Only check this encoder (fails if it is unavailable)
        #[arg(long, value_enum)]
        backend: Option<BackendArg>,
    },

    /// Show how each image of a scene is used by its materials
    Analyze {
        /// Scene file (.gltf or .glb)
        scene: PathBuf,
    },

    /// Encode a single image
    Encode {
        /// Input image (PNG or JPEG)
        input: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        encode: EncodeArgs,

        /// Treat the image as sRGB color data
        #[arg(long)]
        srgb: bool,

        /// Treat the image as a normal map
        #[arg(long)]
        normal_map: bool,
    },

    /// Encode every external image of a scene
    Pack {
        /// Scene file (.gltf or .glb)
        scene: PathBuf,

        /// Directory for the encoded textures
        #[arg(long)]
        out_dir: PathBuf,

        #[command(flatten)]
        encode: EncodeArgs,
    },
}

fn main() {
    let cli = Cli::parse();

    let _logging_guard = match init_logging(cli.verbose, cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => CliError::LoggingInit(e).exit(),
    };

    if let Err(e) = run(cli) {
        e.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_deref())?;
    debug!(?config, "Loaded configuration");

    match cli.command {
        Commands::Check { backend } => commands::check::run(backend, &config, cli.verbose),
        Commands::Analyze { scene } => commands::analyze::run(&scene),
        Commands::Encode {
            input,
            output,
            encode,
            srgb,
            normal_map,
        } => commands::encode::run(
            &input,
            &output,
            &encode,
            UsageFlags { srgb, normal_map },
            &config,
            cli.verbose,
        ),
        Commands::Pack {
            scene,
            out_dir,
            encode,
        } => commands::pack::run(&scene, &out_dir, &encode, &config, cli.verbose),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_encode() {
        let cli = Cli::try_parse_from([
            "texpack",
            "encode",
            "in.png",
            "-o",
            "out.ktx2",
            "--backend",
            "toktx",
            "--quality",
            "90",
            "--normal-map",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Encode {
                encode, normal_map, srgb, ..
            } => {
                assert_eq!(encode.backend, Some(BackendArg::Toktx));
                assert_eq!(encode.quality, Some(90));
                assert!(normal_map);
                assert!(!srgb);
            }
            _ => panic!("expected encode"),
        }
    }

    #[test]
    fn test_quality_out_of_range_is_rejected() {
        let result = Cli::try_parse_from(["texpack", "encode", "a.png", "-o", "a.basis", "--quality", "101"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_pack_with_global_config() {
        let cli = Cli::try_parse_from([
            "texpack",
            "--config",
            "my.ini",
            "pack",
            "scene.gltf",
            "--out-dir",
            "out",
            "--uastc",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("my.ini")));
        match cli.command {
            Commands::Pack { out_dir, encode, .. } => {
                assert_eq!(out_dir, PathBuf::from("out"));
                assert!(encode.uastc);
            }
            _ => panic!("expected pack"),
        }
    }
}
