//! Baking API: sample every channel of an animation on a fixed frame grid.

use serde::{Deserialize, Serialize};

use crate::data::{Animation, Channel};
use crate::error::BakeError;
use crate::sampling::{lerp, sample_channel};

/// Line-fit tolerance per unit of simplify factor.
const SIMPLIFY_TOLERANCE_SCALE: f64 = 1e-3;

/// Upper bound on samples per channel in one bake.
pub const MAX_BAKE_SAMPLES: usize = 1_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BakeOptions {
    /// Distance in frames between samples (> 0).
    pub sample_step: f64,
    /// 0 keeps every sample; larger values drop samples lying on a straight line.
    pub simplify_factor: f64,
}

impl Default for BakeOptions {
    fn default() -> Self {
        Self {
            sample_step: 1.0,
            simplify_factor: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BakedSample {
    pub time: f64,
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BakedChannel {
    pub data_path: String,
    pub array_index: u32,
    #[serde(default)]
    pub group: Option<String>,
    pub samples: Vec<BakedSample>,
}

/// Dense clip written to the interchange file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BakedAnimation {
    pub name: String,
    pub frame_rate: u32,
    pub sample_step: f64,
    pub start: f64,
    pub end: f64,
    pub channels: Vec<BakedChannel>,
}

/// Sample times from `start` to `end` inclusive every `step` frames.
/// The last sample always lands on `end`. Fails when the grid would exceed
/// [`MAX_BAKE_SAMPLES`].
pub fn sample_times(start: f64, end: f64, step: f64) -> Result<Vec<f64>, BakeError> {
    if !step.is_finite() || step <= 0.0 {
        return Err(BakeError::InvalidStep { step });
    }
    if end <= start {
        return Ok(vec![start]);
    }
    let steps = ((end - start) / step + 1e-9).floor();
    // One extra slot for the grid origin, one for a trailing `end` sample.
    if !steps.is_finite() || steps + 2.0 > MAX_BAKE_SAMPLES as f64 {
        return Err(BakeError::TooManySamples {
            step,
            start,
            end,
            limit: MAX_BAKE_SAMPLES,
        });
    }
    let count = steps as usize + 1;
    let mut times: Vec<f64> = (0..count).map(|i| start + i as f64 * step).collect();
    if let Some(&last) = times.last() {
        if end - last > 1e-9 {
            times.push(end);
        }
    }
    Ok(times)
}

/// Bake `animation` over its keyed range. Channels keep their stored order.
pub fn bake_animation(
    animation: &Animation,
    frame_rate: u32,
    opts: &BakeOptions,
) -> Result<BakedAnimation, BakeError> {
    let (start, end) = animation.time_range().unwrap_or((0.0, 0.0));
    let times = sample_times(start, end, opts.sample_step)?;
    let channels = animation
        .channels
        .iter()
        .map(|channel| bake_channel(channel, &times, opts.simplify_factor))
        .collect();

    Ok(BakedAnimation {
        name: animation.name.clone(),
        frame_rate,
        sample_step: opts.sample_step,
        start,
        end,
        channels,
    })
}

fn bake_channel(channel: &Channel, times: &[f64], simplify_factor: f64) -> BakedChannel {
    let samples: Vec<BakedSample> = times
        .iter()
        .map(|&time| BakedSample {
            time,
            value: sample_channel(channel, time),
        })
        .collect();
    let samples = if simplify_factor > 0.0 {
        simplify(samples, simplify_factor * SIMPLIFY_TOLERANCE_SCALE)
    } else {
        samples
    };
    BakedChannel {
        data_path: channel.data_path.clone(),
        array_index: channel.array_index,
        group: channel.group.clone(),
        samples,
    }
}

/// Drop interior samples that sit within `tolerance` of the line between
/// the last kept sample and the next one.
fn simplify(samples: Vec<BakedSample>, tolerance: f64) -> Vec<BakedSample> {
    if samples.len() < 3 {
        return samples;
    }
    let mut kept = Vec::with_capacity(samples.len());
    kept.push(samples[0]);
    for w in samples.windows(2).skip(1) {
        let (cur, next) = (w[0], w[1]);
        let prev = kept[kept.len() - 1];
        let u = (cur.time - prev.time) / (next.time - prev.time);
        if (lerp(prev.value, next.value, u) - cur.value).abs() > tolerance {
            kept.push(cur);
        }
    }
    kept.push(samples[samples.len() - 1]);
    kept
}
