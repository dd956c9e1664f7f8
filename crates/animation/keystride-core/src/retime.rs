//! Positional retiming and interpolation normalization.
//!
//! Every channel's i-th keyframe is moved to `start + i * spacing`, regardless
//! of its previous time. Only keyframe order survives; durations between the
//! original keys are discarded. Keys are then forced to bezier interpolation
//! with vector handles collapsed onto the key time, which plays back as
//! straight segments with no overshoot.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::RetimeConfig;
use crate::data::{Animation, Channel, HandleMode, Interpolation, Keyframe};
use crate::error::RetimeError;
use crate::host::AnimationHost;

/// Counts produced by a successful retime.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RetimeReport {
    pub channels_processed: usize,
    pub keyframes_processed: usize,
    /// Frame rate written to the host.
    pub frame_rate: u32,
}

impl RetimeReport {
    /// User-facing status line.
    pub fn message(&self) -> String {
        format!("Keyframes redistributed. FPS = {}", self.frame_rate)
    }
}

/// Retime the host's animation and set its frame rate.
///
/// Fails without touching anything when the config is invalid or the host has
/// no animation. An animation with zero channels succeeds.
pub fn retime<H>(host: &mut H, config: &RetimeConfig) -> Result<RetimeReport, RetimeError>
where
    H: AnimationHost + ?Sized,
{
    config.validate().inspect_err(|e| warn!("retime rejected: {e}"))?;

    let Some(animation) = host.animation_mut() else {
        warn!("retime rejected: target has no animation");
        return Err(RetimeError::NoAnimation);
    };
    let max_keys = animation
        .channels
        .iter()
        .map(|c| c.keyframes.len())
        .max()
        .unwrap_or(0);
    config
        .validate_for(max_keys)
        .inspect_err(|e| warn!("retime rejected: {e}"))?;

    let mut report = retime_animation(animation, config);
    host.set_frame_rate(config.frame_rate);
    report.frame_rate = config.frame_rate;

    info!(
        "retimed {} keyframes across {} channels (start={}, spacing={}, fps={})",
        report.keyframes_processed,
        report.channels_processed,
        config.start,
        config.spacing,
        config.frame_rate
    );
    Ok(report)
}

/// Retime every channel of `animation`. Does not touch the frame rate.
pub fn retime_animation(animation: &mut Animation, config: &RetimeConfig) -> RetimeReport {
    let mut report = RetimeReport::default();
    for channel in &mut animation.channels {
        report.keyframes_processed += retime_channel(channel, config);
        report.channels_processed += 1;
    }
    report
}

/// Retime one channel in place; returns the number of keyframes rewritten.
pub fn retime_channel(channel: &mut Channel, config: &RetimeConfig) -> usize {
    for (i, key) in channel.keyframes.iter_mut().enumerate() {
        normalize_keyframe(key, config.time_at(i));
    }
    debug!(
        "channel {}[{}]: {} keyframes",
        channel.data_path,
        channel.array_index,
        channel.keyframes.len()
    );
    channel.keyframes.len()
}

/// Move `key` to `time` and force bezier/vector with zero-width handles.
/// Handle values are left as they were.
fn normalize_keyframe(key: &mut Keyframe, time: f64) {
    key.time = time;
    key.left_handle.time = time;
    key.right_handle.time = time;
    key.interpolation = Interpolation::Bezier;
    key.left_handle_mode = HandleMode::Vector;
    key.right_handle_mode = HandleMode::Vector;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Handle;

    #[test]
    fn channel_times_follow_index() {
        let mut ch = Channel::new(
            "rotation_euler",
            2,
            vec![
                Keyframe::new(7.0, 1.0),
                Keyframe::new(3.0, 2.0).with_handles(
                    Handle::new(2.0, 1.5),
                    Handle::new(4.0, 2.5),
                    HandleMode::Free,
                ),
            ],
        );
        let cfg = RetimeConfig {
            start: 10.0,
            spacing: 2.0,
            frame_rate: 30,
        };
        assert_eq!(retime_channel(&mut ch, &cfg), 2);
        assert_eq!(ch.keyframes[0].time, 10.0);
        assert_eq!(ch.keyframes[1].time, 12.0);
        assert_eq!(ch.keyframes[1].left_handle, Handle::new(12.0, 1.5));
        assert_eq!(ch.keyframes[1].right_handle, Handle::new(12.0, 2.5));
        assert_eq!(ch.keyframes[1].value, 2.0);
    }

    #[test]
    fn report_message_names_fps() {
        let r = RetimeReport {
            channels_processed: 1,
            keyframes_processed: 2,
            frame_rate: 15,
        };
        assert_eq!(r.message(), "Keyframes redistributed. FPS = 15");
    }
}
