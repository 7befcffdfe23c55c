//! texpack - texture color-usage inference and GPU texture compression
//!
//! This library decides how each image referenced by a glTF scene must be
//! color-interpreted and drives external encoders (`basisu`, `toktx`) to
//! compress it accordingly.
//!
//! ```text
//! scene ──► usage::analyze_usage ──► ImageUsageTable
//!                                        │
//!   encoder::TextureEncoder::is_available (once per run)
//!                                        │
//!   encoder::TextureEncoder::encode(EncodeJob) per image ──► .basis / .ktx2
//! ```

pub mod config;
pub mod encoder;
pub mod logging;
pub mod mime;
pub mod process;
pub mod scene;
pub mod temp_file;
pub mod usage;
