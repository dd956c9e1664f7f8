//! Scene documents: JSON files describing objects, their animation and the frame rate.
//!
//! Notes:
//! - Keyframes may omit interpolation, handles and handle modes; they default to
//!   bezier / auto-clamped with handles collapsed onto the key.
//! - `"co": [time, value]` is accepted as a shorthand for `time`/`value`.
//! - Saved documents are always fully expanded, so load(save(s)) == s.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::data::{Animation, Channel, Handle, HandleMode, Interpolation, Keyframe};
use crate::error::DocumentError;
use crate::host::{Scene, SceneObject, DEFAULT_FRAME_RATE};

/// Parse a scene document.
pub fn parse_scene_json(s: &str) -> Result<Scene, DocumentError> {
    let doc: SceneDoc = serde_json::from_str(s)?;

    let mut objects = Vec::with_capacity(doc.objects.len());
    for obj in doc.objects {
        let animation = match obj.animation {
            Some(anim) => Some(to_animation(anim)?),
            None => None,
        };
        objects.push(SceneObject {
            name: obj.name,
            animation,
        });
    }

    let scene = Scene {
        frame_rate: doc.frame_rate,
        objects,
        active: doc.active,
    };
    validate(&scene)?;
    Ok(scene)
}

pub fn scene_to_json(scene: &Scene) -> Result<String, DocumentError> {
    Ok(serde_json::to_string_pretty(scene)?)
}

pub fn load_scene(path: impl AsRef<Path>) -> Result<Scene, DocumentError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| DocumentError::io(path, e))?;
    parse_scene_json(&text)
}

pub fn save_scene(scene: &Scene, path: impl AsRef<Path>) -> Result<(), DocumentError> {
    let path = path.as_ref();
    let text = scene_to_json(scene)?;
    fs::write(path, text).map_err(|e| DocumentError::io(path, e))
}

fn validate(scene: &Scene) -> Result<(), DocumentError> {
    if scene.frame_rate == 0 {
        return Err(DocumentError::Invalid {
            reason: "frame_rate must be >= 1".into(),
        });
    }
    if let Some(active) = &scene.active {
        if !scene.objects.iter().any(|o| &o.name == active) {
            return Err(DocumentError::Invalid {
                reason: format!("active object '{active}' is not in the scene"),
            });
        }
    }
    Ok(())
}

fn to_animation(doc: AnimationDoc) -> Result<Animation, DocumentError> {
    let mut channels = Vec::with_capacity(doc.channels.len());
    for ch in doc.channels {
        let mut keyframes = Vec::with_capacity(ch.keyframes.len());
        for (i, k) in ch.keyframes.into_iter().enumerate() {
            keyframes.push(to_keyframe(k).map_err(|reason| DocumentError::Invalid {
                reason: format!("{}[{}] keyframe {i}: {reason}", ch.data_path, ch.array_index),
            })?);
        }
        channels.push(Channel {
            data_path: ch.data_path,
            array_index: ch.array_index,
            group: ch.group,
            keyframes,
        });
    }
    Ok(Animation {
        name: doc.name,
        channels,
    })
}

fn to_keyframe(k: KeyframeDoc) -> Result<Keyframe, String> {
    let (time, value) = match (k.co, k.time, k.value) {
        (Some([t, v]), None, None) => (t, v),
        (None, Some(t), Some(v)) => (t, v),
        (Some(_), _, _) => return Err("use either `co` or `time`/`value`, not both".into()),
        _ => return Err("missing `time`/`value`".into()),
    };
    if !time.is_finite() || !value.is_finite() {
        return Err("time and value must be finite".into());
    }
    let base = Keyframe::new(time, value);
    Ok(Keyframe {
        interpolation: k.interpolation.unwrap_or(base.interpolation),
        left_handle: k.left_handle.unwrap_or(base.left_handle),
        right_handle: k.right_handle.unwrap_or(base.right_handle),
        left_handle_mode: k.left_handle_mode.unwrap_or(base.left_handle_mode),
        right_handle_mode: k.right_handle_mode.unwrap_or(base.right_handle_mode),
        ..base
    })
}

// ----- JSON schema (serde) -----

#[derive(Debug, Deserialize)]
struct SceneDoc {
    #[serde(default = "default_frame_rate")]
    frame_rate: u32,
    objects: Vec<ObjectDoc>,
    #[serde(default)]
    active: Option<String>,
}

fn default_frame_rate() -> u32 {
    DEFAULT_FRAME_RATE
}

#[derive(Debug, Deserialize)]
struct ObjectDoc {
    name: String,
    #[serde(default)]
    animation: Option<AnimationDoc>,
}

#[derive(Debug, Deserialize)]
struct AnimationDoc {
    #[serde(default)]
    name: String,
    #[serde(default)]
    channels: Vec<ChannelDoc>,
}

#[derive(Debug, Deserialize)]
struct ChannelDoc {
    data_path: String,
    #[serde(default)]
    array_index: u32,
    #[serde(default)]
    group: Option<String>,
    #[serde(default)]
    keyframes: Vec<KeyframeDoc>,
}

#[derive(Debug, Deserialize)]
struct KeyframeDoc {
    #[serde(default)]
    co: Option<[f64; 2]>,
    #[serde(default)]
    time: Option<f64>,
    #[serde(default)]
    value: Option<f64>,
    #[serde(default)]
    interpolation: Option<Interpolation>,
    #[serde(default)]
    left_handle: Option<Handle>,
    #[serde(default)]
    right_handle: Option<Handle>,
    #[serde(default)]
    left_handle_mode: Option<HandleMode>,
    #[serde(default)]
    right_handle_mode: Option<HandleMode>,
}
