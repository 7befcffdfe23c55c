//! End-to-end test against real processes.
//!
//! Small shell scripts play the part of `basisu` and `toktx`, reached
//! through the tool override path. Everything lives in one test function:
//! executing a script while another test thread still holds a write
//! handle to a freshly created one fails with ETXTBSY.
//!
//! Run with: `cargo test --test system_runner`

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use texpack::config::ToolConfig;
use texpack::encoder::{
    create_encoder, is_encoder_available, Backend, EncodeError, EncodeJob, EncoderSettings,
};
use texpack::process::{ProcessStatus, SystemRunner};
use texpack::usage::ImageUsage;

const FAKE_BASISU: &str = r#"#!/bin/sh
input=""
output=""
while [ $# -gt 0 ]; do
    case "$1" in
        -version) exit 0 ;;
        -file) input="$2"; shift ;;
        -output_file) output="$2"; shift ;;
    esac
    shift
done
printf 'BASIS' > "$output"
cat "$input" >> "$output"
"#;

const FAKE_TOKTX: &str = r#"#!/bin/sh
if [ "$1" = "--version" ]; then
    exit 0
fi
for last; do :; done
input="$last"
output=""
prev=""
for arg; do
    if [ "$arg" = "$input" ]; then
        output="$prev"
    fi
    prev="$arg"
done
printf 'KTX2' > "$output"
cat "$input" >> "$output"
"#;

const FAILING_TOOL: &str = "#!/bin/sh\nexit 3\n";

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn settings(tool: &Path, temp_dir: &Path) -> EncoderSettings {
    EncoderSettings {
        tool: ToolConfig::with_override_path(tool.to_string_lossy()),
        temp_dir: Some(temp_dir.to_path_buf()),
        verbose: false,
    }
}

#[test]
fn test_fake_tools_through_system_runner() {
    let bin = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let runner = Arc::new(SystemRunner::new());

    // Spaces in the tool path need no quoting.
    let tools_dir = bin.path().join("my tools");
    fs::create_dir(&tools_dir).unwrap();
    let basisu = write_script(&tools_dir, "basisu", FAKE_BASISU);
    let toktx = write_script(&tools_dir, "toktx", FAKE_TOKTX);
    let failing = write_script(&tools_dir, "broken", FAILING_TOOL);

    let image = b"\x89PNG\r\n\x1a\nfake image payload";

    // basisu
    let encoder = create_encoder(Backend::Basisu, runner.clone(), settings(&basisu, work.path()));
    assert!(encoder.is_available());
    let job = EncodeJob::new(image, "image/png").with_usage(ImageUsage::perceptual());
    let encoded = encoder.encode(&job).unwrap();
    assert_eq!(&encoded[..5], b"BASIS");
    assert_eq!(&encoded[5..], image);

    // toktx
    let encoder = create_encoder(Backend::Toktx, runner.clone(), settings(&toktx, work.path()));
    assert!(encoder.is_available());
    let job = EncodeJob::new(image, "image/png")
        .with_usage(ImageUsage::normal_map())
        .with_scale(0.5);
    let encoded = encoder.encode(&job).unwrap();
    assert_eq!(&encoded[..4], b"KTX2");
    assert_eq!(&encoded[4..], image);

    // non-zero exit
    let encoder = create_encoder(Backend::Basisu, runner.clone(), settings(&failing, work.path()));
    assert!(!encoder.is_available());
    match encoder.encode(&EncodeJob::new(image, "image/png")) {
        Err(EncodeError::ProcessFailed { status, .. }) => {
            assert_eq!(status, ProcessStatus::Exited(3));
        }
        other => panic!("Expected ProcessFailed, got {:?}", other),
    }

    // missing executable
    let missing = ToolConfig::with_override_path(tools_dir.join("nope").to_string_lossy());
    assert!(!is_encoder_available(Backend::Toktx, &missing, runner.as_ref(), false));

    assert!(
        fs::read_dir(work.path()).unwrap().next().is_none(),
        "temp files leaked"
    );
}
