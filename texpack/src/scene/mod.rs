//! Scene loading.
//!
//! Reads the image list and material graph out of a glTF 2.0 document
//! (`.gltf` JSON or the JSON chunk of a `.glb`) and converts material
//! texture slots into image indices for [`crate::usage`].

mod document;
mod gltf;

pub use document::{ImageSource, SceneDocument, SceneError, SceneImage, SceneResult};
