//! Canonical keyframe data model (animation, channels, keyframes).
//!
//! These types mirror what a host animation store exposes: an animation is an
//! ordered list of channels, each channel an ordered list of keyframes with
//! bezier handle geometry. The core borrows them for one operation at a time.

use serde::{Deserialize, Serialize};

/// Segment interpolation starting at a keyframe.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Interpolation {
    /// Hold the left value until the next keyframe.
    Constant,
    Linear,
    #[default]
    Bezier,
}

/// How a bezier handle is placed relative to its keyframe.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HandleMode {
    Free,
    Aligned,
    /// Points straight at the neighbouring keyframe (straight segments).
    Vector,
    Auto,
    #[default]
    AutoClamped,
}

/// Handle control point in (time, value) space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Handle {
    pub time: f64,
    pub value: f64,
}

impl Handle {
    pub fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }
}

/// A timed control point on a channel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Time in frames.
    pub time: f64,
    pub value: f64,
    pub interpolation: Interpolation,
    pub left_handle: Handle,
    pub right_handle: Handle,
    pub left_handle_mode: HandleMode,
    pub right_handle_mode: HandleMode,
}

impl Keyframe {
    /// Keyframe with host insert defaults: bezier, auto-clamped, handles collapsed onto the key.
    pub fn new(time: f64, value: f64) -> Self {
        Self {
            time,
            value,
            interpolation: Interpolation::Bezier,
            left_handle: Handle::new(time, value),
            right_handle: Handle::new(time, value),
            left_handle_mode: HandleMode::AutoClamped,
            right_handle_mode: HandleMode::AutoClamped,
        }
    }

    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    pub fn with_handles(mut self, left: Handle, right: Handle, mode: HandleMode) -> Self {
        self.left_handle = left;
        self.right_handle = right;
        self.left_handle_mode = mode;
        self.right_handle_mode = mode;
        self
    }
}

/// One animated scalar property: an ordered sequence of keyframes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    /// Property path on the owning object (e.g. `pose.bones["Hip"].location`).
    pub data_path: String,
    /// Component of the property (axis).
    #[serde(default)]
    pub array_index: u32,
    /// Optional grouping (bone name); preserved but unused by core logic.
    #[serde(default)]
    pub group: Option<String>,
    pub keyframes: Vec<Keyframe>,
}

impl Channel {
    pub fn new(data_path: impl Into<String>, array_index: u32, keyframes: Vec<Keyframe>) -> Self {
        Self {
            data_path: data_path.into(),
            array_index,
            group: None,
            keyframes,
        }
    }

    /// `(first, last)` keyframe times in stored order, or `None` for an empty channel.
    pub fn time_range(&self) -> Option<(f64, f64)> {
        let first = self.keyframes.first()?;
        let (lo, hi) = self
            .keyframes
            .iter()
            .fold((first.time, first.time), |(lo, hi), k| {
                (lo.min(k.time), hi.max(k.time))
            });
        Some((lo, hi))
    }
}

/// Channels owned by a single object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    pub name: String,
    pub channels: Vec<Channel>,
}

impl Animation {
    pub fn new(name: impl Into<String>, channels: Vec<Channel>) -> Self {
        Self {
            name: name.into(),
            channels,
        }
    }

    pub fn keyframe_count(&self) -> usize {
        self.channels.iter().map(|c| c.keyframes.len()).sum()
    }

    /// Earliest and latest keyframe time across all channels.
    pub fn time_range(&self) -> Option<(f64, f64)> {
        self.channels
            .iter()
            .filter_map(Channel::time_range)
            .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)))
    }
}
