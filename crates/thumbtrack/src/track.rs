//! Value ↔ pixel mapping along the track.
//!
//! Offsets are the left edge of a thumb inside the container, in the
//! unrotated frame. The usable length is `container.width - thumb.width`.
//! RTL flips ratios through `mirror` and nowhere else.

use thumbtrack_core::{Insets, Rect, ValueRange, clamp_between, mirror};

use crate::config::SliderConfig;
use crate::measure::Geometry;

/// Lengths below this are treated as "not laid out yet".
const MIN_TRACK_LENGTH: f32 = 1e-3;

/// Snaps to the nearest multiple of `step` counted from `range.min`.
pub fn snap_step(v: f32, step: f32, range: ValueRange) -> f32 {
    if step > 0.0 {
        let k = ((v - range.min) / step).round();
        range.clamp(range.min + k * step)
    } else {
        range.clamp(v)
    }
}

/// Left offset, in pixels, of a thumb showing `value`.
pub fn thumb_left(value: f32, config: &SliderConfig, geometry: &Geometry) -> f32 {
    let ratio = mirror(config.range().ratio_of(value), config.is_rtl());
    ratio * geometry.track_length().max(0.0)
}

/// Range a thumb may take given its neighbour: thumb 0 stays `buffer` below
/// thumb 1 and thumb 1 stays `buffer` above thumb 0.
pub fn thumb_bounds(active: usize, values: &[f32], config: &SliderConfig) -> (f32, f32) {
    let range = config.range();
    let (mut lo, mut hi) = (range.min, range.max);
    if let [first, second] = values {
        match active {
            0 => hi = hi.min(second - config.buffer()),
            _ => lo = lo.max(first + config.buffer()),
        }
    }
    (lo, hi)
}

/// Pushes two thumbs at least `buffer` apart, moving the upper one first and
/// the lower one only when the upper one hits the maximum.
pub fn separate_thumbs(values: &mut [f32], config: &SliderConfig) {
    let [first, second] = values else {
        return;
    };
    let range = config.range();
    let buffer = config.buffer();
    if *second - *first >= buffer {
        return;
    }
    *second = range.clamp(*first + buffer);
    *first = range.clamp(first.min(*second - buffer));
}

/// Converts a thumb offset back into a value for thumb `active`.
///
/// `None` while the geometry is unmeasured or the track has no length; the
/// caller must then leave the value untouched.
pub fn value_for_offset(
    offset: f32,
    active: usize,
    values: &[f32],
    config: &SliderConfig,
    geometry: &Geometry,
) -> Option<f32> {
    let length = geometry.track_length();
    if !geometry.all_measured || length < MIN_TRACK_LENGTH {
        return None;
    }
    let ratio = mirror(offset / length, config.is_rtl());
    let range = config.range();
    let raw = range.clamp(range.value_at(ratio));
    let stepped = snap_step(raw, config.step, range);
    let (lo, hi) = thumb_bounds(active, values, config);
    let v = clamp_between(stepped, lo, hi);
    v.is_finite().then_some(v)
}

/// Extra hit area around the track, needed when the touch target is larger
/// than the thumb (horizontally) or the container (vertically).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TouchOverflow {
    pub width: f32,
    pub height: f32,
}

impl TouchOverflow {
    pub fn of(config: &SliderConfig, geometry: &Geometry) -> Self {
        let touch = config.thumb_touch_size;
        Self {
            width: (touch.width - geometry.thumb.width).max(0.0),
            height: (touch.height - geometry.container.height).max(0.0),
        }
    }

    /// The interactive surface grows by these on each side (negative margin
    /// plus matching padding in the host's layout).
    pub fn insets(&self) -> Insets {
        Insets {
            horizontal: self.width * 0.5,
            vertical: self.height * 0.5,
        }
    }
}

/// Hit rectangle for a thumb showing `value`, in interactive-surface coordinates.
pub fn thumb_touch_rect(value: f32, config: &SliderConfig, geometry: &Geometry) -> Rect {
    let overflow = TouchOverflow::of(config, geometry);
    let touch = config.thumb_touch_size;
    Rect::new(
        overflow.width * 0.5
            + thumb_left(value, config, geometry)
            + (geometry.thumb.width - touch.width) * 0.5,
        overflow.height * 0.5 + (geometry.container.height - touch.height) * 0.5,
        touch.width,
        touch.height,
    )
}
