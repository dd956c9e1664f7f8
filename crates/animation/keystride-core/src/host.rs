//! Host animation store: the narrow interface the core needs from a 3D application.
//!
//! `Scene` is the in-memory host used by the CLI and tests.

use serde::{Deserialize, Serialize};

use crate::data::Animation;

/// Frame rate of a scene that does not specify one.
pub const DEFAULT_FRAME_RATE: u32 = 24;

/// Access to the target object's animation and the global playback rate.
pub trait AnimationHost {
    /// Animation of the target object, `None` when it has no animation data.
    fn animation(&self) -> Option<&Animation>;

    fn animation_mut(&mut self) -> Option<&mut Animation>;

    fn frame_rate(&self) -> u32;

    fn set_frame_rate(&mut self, fps: u32);
}

/// A named object that may carry an animation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    #[serde(default)]
    pub animation: Option<Animation>,
}

/// In-memory scene: objects plus the render frame rate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub frame_rate: u32,
    pub objects: Vec<SceneObject>,
    /// Name of the target object. Falls back to the first object when unset.
    #[serde(default)]
    pub active: Option<String>,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            frame_rate: DEFAULT_FRAME_RATE,
            objects: Vec::new(),
            active: None,
        }
    }
}

impl Scene {
    /// Scene with a single active object carrying `animation`.
    pub fn with_animation(object: impl Into<String>, animation: Animation) -> Self {
        let name = object.into();
        Self {
            objects: vec![SceneObject {
                name: name.clone(),
                animation: Some(animation),
            }],
            active: Some(name),
            ..Self::default()
        }
    }

    pub fn active_object(&self) -> Option<&SceneObject> {
        match &self.active {
            Some(name) => self.objects.iter().find(|o| &o.name == name),
            None => self.objects.first(),
        }
    }

    fn active_object_mut(&mut self) -> Option<&mut SceneObject> {
        match self.active.clone() {
            Some(name) => self.objects.iter_mut().find(|o| o.name == name),
            None => self.objects.first_mut(),
        }
    }
}

impl AnimationHost for Scene {
    fn animation(&self) -> Option<&Animation> {
        self.active_object()?.animation.as_ref()
    }

    fn animation_mut(&mut self) -> Option<&mut Animation> {
        self.active_object_mut()?.animation.as_mut()
    }

    fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    fn set_frame_rate(&mut self, fps: u32) {
        self.frame_rate = fps;
    }
}
