//! Keystride core (host-agnostic)
//!
//! Retimes the keyframes of an animation onto a uniform grid, normalizes their
//! interpolation to straight bezier segments, and drives a bake-and-export
//! facility that writes the result to an interchange file.
//!
//! The 3D host is reached through two traits: [`AnimationHost`] for the
//! animation data and frame rate, [`BakeExporter`] for the export call.
//! [`Scene`] and [`JsonBakeExporter`] are the in-memory implementations used by
//! the CLI and tests.

pub mod baking;
pub mod config;
pub mod data;
pub mod document;
pub mod error;
pub mod export;
pub mod host;
pub mod retime;
pub mod sampling;

// Re-exports for consumers (CLI, host adapters)
pub use baking::{
    bake_animation, sample_times, BakeOptions, BakedAnimation, BakedChannel, BakedSample,
    MAX_BAKE_SAMPLES,
};
pub use config::{ExportConfig, Preset, RetimeConfig, Settings};
pub use data::{Animation, Channel, Handle, HandleMode, Interpolation, Keyframe};
pub use document::{load_scene, parse_scene_json, save_scene, scene_to_json};
pub use error::{BakeError, DocumentError, ExportError, RetimeError};
pub use export::{export, BakeExportOptions, BakeExporter, ExportReport, JsonBakeExporter};
pub use host::{AnimationHost, Scene, SceneObject, DEFAULT_FRAME_RATE};
pub use retime::{retime, retime_animation, retime_channel, RetimeReport};
pub use sampling::sample_channel;
