//! Channel evaluation at arbitrary times.
//!
//! Model:
//! - Keyframes are taken in stored order; the segment `[k_i, k_{i+1}]` containing
//!   `t` is interpolated according to `k_i.interpolation`.
//! - Bezier segments use the cubic `(k_i, k_i.right_handle, k_{i+1}.left_handle, k_{i+1})`
//!   in (time, value) space; the time polynomial is inverted by bisection.
//! - Vector handles are resolved at sampling time to the one-third point toward the
//!   neighbouring key, so vector/bezier segments are straight lines.
//! - Outside the keyed range the nearest end value is held.

use crate::data::{Channel, Handle, HandleMode, Interpolation, Keyframe};

const BISECT_ITERATIONS: usize = 48;
const BISECT_TOLERANCE: f64 = 1e-9;

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Cubic Bezier basis function
#[inline]
fn cubic_bezier(p0: f64, p1: f64, p2: f64, p3: f64, s: f64) -> f64 {
    let u = 1.0 - s;
    u * u * u * p0 + 3.0 * u * u * s * p1 + 3.0 * u * s * s * p2 + s * s * s * p3
}

/// Find `i` such that `t` lies in `[keys[i].time, keys[i+1].time]`.
/// Returns `None` when `t` is outside the keyed range or there is no segment.
fn find_segment(keys: &[Keyframe], t: f64) -> Option<usize> {
    // Linear scan; channel sizes are bounded by the rig.
    keys.windows(2)
        .position(|w| t >= w[0].time && t <= w[1].time)
}

/// Effective outgoing handle of `k0` on the segment toward `k1`.
fn right_handle(k0: &Keyframe, k1: &Keyframe) -> Handle {
    match k0.right_handle_mode {
        HandleMode::Vector => Handle::new(
            lerp(k0.time, k1.time, 1.0 / 3.0),
            lerp(k0.value, k1.value, 1.0 / 3.0),
        ),
        _ => k0.right_handle,
    }
}

/// Effective incoming handle of `k1` on the segment from `k0`.
fn left_handle(k0: &Keyframe, k1: &Keyframe) -> Handle {
    match k1.left_handle_mode {
        HandleMode::Vector => Handle::new(
            lerp(k1.time, k0.time, 1.0 / 3.0),
            lerp(k1.value, k0.value, 1.0 / 3.0),
        ),
        _ => k1.left_handle,
    }
}

/// Evaluate a bezier segment at time `t` (`k0.time < t < k1.time`).
fn bezier_segment(k0: &Keyframe, k1: &Keyframe, t: f64) -> f64 {
    let h0 = right_handle(k0, k1);
    let h1 = left_handle(k0, k1);
    // Keep the time polynomial monotonic so the inversion is well defined.
    let x1 = h0.time.clamp(k0.time, k1.time);
    let x2 = h1.time.clamp(k0.time, k1.time);

    let mut lo = 0.0f64;
    let mut hi = 1.0f64;
    let mut mid = (t - k0.time) / (k1.time - k0.time);
    for _ in 0..BISECT_ITERATIONS {
        let x = cubic_bezier(k0.time, x1, x2, k1.time, mid);
        if (x - t).abs() < BISECT_TOLERANCE {
            break;
        }
        if x < t {
            lo = mid;
        } else {
            hi = mid;
        }
        mid = 0.5 * (lo + hi);
    }
    cubic_bezier(k0.value, h0.value, h1.value, k1.value, mid)
}

/// Sample a channel at time `t` (frames).
pub fn sample_channel(channel: &Channel, t: f64) -> f64 {
    let keys = &channel.keyframes;
    let (Some(first), Some(last)) = (keys.first(), keys.last()) else {
        // No keys: neutral 0.0 (fail-soft).
        return 0.0;
    };
    if t <= first.time {
        return first.value;
    }
    if t >= last.time {
        return last.value;
    }
    let Some(i) = find_segment(keys, t) else {
        return last.value;
    };
    let (k0, k1) = (&keys[i], &keys[i + 1]);
    let span = k1.time - k0.time;
    if span <= f64::EPSILON {
        return k1.value;
    }
    match k0.interpolation {
        Interpolation::Constant => k0.value,
        Interpolation::Linear => lerp(k0.value, k1.value, (t - k0.time) / span),
        Interpolation::Bezier => bezier_segment(k0, k1, t),
    }
}
