//! Helpers for the one-or-two value sequences a slider carries.

use smallvec::SmallVec;

use crate::animation::AnimationHandle;

/// Settled numbers, one per thumb.
pub type Values = SmallVec<[f32; 2]>;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

impl ValueRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Clamps without panicking on an inverted range; the lower bound wins.
    pub fn clamp(&self, v: f32) -> f32 {
        clamp_between(v, self.min, self.max)
    }

    /// Position of `v` as a 0..1 fraction of the range (unclamped).
    pub fn ratio_of(&self, v: f32) -> f32 {
        if self.max > self.min {
            (v - self.min) / self.span()
        } else {
            0.0
        }
    }

    pub fn value_at(&self, ratio: f32) -> f32 {
        self.min + ratio * self.span()
    }

    pub fn contains_zero(&self) -> bool {
        self.min < 0.0 && self.max > 0.0
    }
}

pub fn clamp_between(v: f32, lo: f32, hi: f32) -> f32 {
    v.min(hi).max(lo)
}

/// A configured value before normalization: one number or a sequence.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum RawValue {
    Scalar(f32),
    Many(Vec<f32>),
}

impl Default for RawValue {
    fn default() -> Self {
        RawValue::Scalar(0.0)
    }
}

impl From<f32> for RawValue {
    fn from(v: f32) -> Self {
        RawValue::Scalar(v)
    }
}

impl From<Vec<f32>> for RawValue {
    fn from(v: Vec<f32>) -> Self {
        RawValue::Many(v)
    }
}

impl From<&[f32]> for RawValue {
    fn from(v: &[f32]) -> Self {
        RawValue::Many(v.to_vec())
    }
}

impl<const N: usize> From<[f32; N]> for RawValue {
    fn from(v: [f32; N]) -> Self {
        RawValue::Many(v.to_vec())
    }
}

/// Clamps every entry into `range`, keeping order. A scalar yields one entry;
/// non-finite entries fall back to `range.min`.
pub fn normalize(range: ValueRange, raw: &RawValue) -> Values {
    let fix = |v: f32| {
        if v.is_finite() {
            range.clamp(v)
        } else {
            log::warn!("normalize: non-finite value {v}; using minimum {}", range.min);
            range.clamp(range.min)
        }
    };
    match raw {
        RawValue::Scalar(v) => smallvec::smallvec![fix(*v)],
        RawValue::Many(vs) => vs.iter().copied().map(fix).collect(),
    }
}

/// One thumb's quantity as the value store holds it.
#[derive(Clone, Debug)]
pub enum ThumbValue {
    Settled(f32),
    Animating(AnimationHandle),
}

impl ThumbValue {
    /// What is on screen right now.
    pub fn current(&self) -> f32 {
        match self {
            ThumbValue::Settled(v) => *v,
            ThumbValue::Animating(h) => h.current(),
        }
    }

    /// Where the thumb is headed; equal to `current` once settled.
    pub fn target(&self) -> f32 {
        match self {
            ThumbValue::Settled(v) => *v,
            ThumbValue::Animating(h) => h.target(),
        }
    }

    pub fn handle(&self) -> Option<&AnimationHandle> {
        match self {
            ThumbValue::Animating(h) => Some(h),
            ThumbValue::Settled(_) => None,
        }
    }
}

/// Merges `next` into `previous` by index.
///
/// Shared indices are updated in place: an in-flight animation is retargeted
/// and keeps its handle, a settled slot takes the new number. Indices only in
/// `next` are created settled; indices only in `previous` are dropped.
pub fn reconcile_values(
    previous: impl IntoIterator<Item = ThumbValue>,
    next: &[f32],
) -> SmallVec<[ThumbValue; 2]> {
    let mut previous = previous.into_iter();
    next.iter()
        .map(|&v| match previous.next() {
            Some(ThumbValue::Animating(h)) => {
                if h.target() != v {
                    h.retarget(v);
                }
                ThumbValue::Animating(h)
            }
            Some(ThumbValue::Settled(_)) | None => ThumbValue::Settled(v),
        })
        .collect()
}

/// Index of the smallest entry; ties go to the first one.
pub fn index_of_lowest(numbers: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &n) in numbers.iter().enumerate() {
        if n.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if n >= b => {}
            _ => best = Some((i, n)),
        }
    }
    best.map(|(i, _)| i)
}
