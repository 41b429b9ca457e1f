//! Slider configuration and callbacks.
//!
//! `SliderConfig` is plain data (optionally serde-able); callbacks live in
//! `SliderCallbacks` so the config can be cloned, compared and diffed on
//! every external update.
//!
//! ```rust
//! use thumbtrack::*;
//!
//! let cfg = SliderConfig::new(0.0, 100.0)
//!     .value([20.0, 80.0])
//!     .step(5.0)
//!     .animate_transitions(true);
//! assert_eq!(cfg.buffer(), 5.0);
//! assert!(cfg.validate().is_ok());
//! ```

use std::rc::Rc;

use thumbtrack_core::{
    AnimationSpec, RawValue, Size, TextDirection, ValueRange, text_direction,
};

use crate::error::ConfigError;

/// Minimum gap between two thumbs when no step is configured.
pub const DEFAULT_BUFFER: f32 = 0.1;

/// Hit-target size used when none is configured.
pub const DEFAULT_TOUCH_SIZE: Size = Size {
    width: 40.0,
    height: 40.0,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    #[default]
    Horizontal,
    /// Laid out horizontally and rotated by the host. Sizes and touch
    /// coordinates stay in the unrotated frame; only drag deltas arrive in
    /// screen space, so dragging up moves toward the maximum.
    Vertical,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimationType {
    #[default]
    Timing,
    Spring,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SliderConfig {
    pub value: RawValue,
    pub minimum_value: f32,
    pub maximum_value: f32,
    /// 0 means continuous.
    pub step: f32,
    pub disabled: bool,
    pub orientation: Orientation,
    /// `None` follows the ambient `text_direction()`.
    pub direction: Option<TextDirection>,
    /// Extra fill past a single thumb's left edge; defaults to half the thumb width.
    pub track_right_padding: Option<f32>,
    pub animate_transitions: bool,
    pub animation_type: AnimationType,
    pub animation_config: AnimationSpec,
    pub thumb_touch_size: Size,
    pub track_clickable: bool,
    pub start_from_zero: bool,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            value: RawValue::Scalar(0.0),
            minimum_value: 0.0,
            maximum_value: 1.0,
            step: 0.0,
            disabled: false,
            orientation: Orientation::Horizontal,
            direction: None,
            track_right_padding: None,
            animate_transitions: false,
            animation_type: AnimationType::Timing,
            animation_config: AnimationSpec::default(),
            thumb_touch_size: DEFAULT_TOUCH_SIZE,
            track_clickable: true,
            start_from_zero: false,
        }
    }
}

impl SliderConfig {
    pub fn new(minimum_value: f32, maximum_value: f32) -> Self {
        Self {
            value: RawValue::Scalar(minimum_value),
            minimum_value,
            maximum_value,
            ..Default::default()
        }
    }

    pub fn value(mut self, value: impl Into<RawValue>) -> Self {
        self.value = value.into();
        self
    }
    pub fn step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }
    pub fn direction(mut self, direction: TextDirection) -> Self {
        self.direction = Some(direction);
        self
    }
    pub fn track_right_padding(mut self, padding: f32) -> Self {
        self.track_right_padding = Some(padding);
        self
    }
    pub fn animate_transitions(mut self, animate: bool) -> Self {
        self.animate_transitions = animate;
        self
    }
    pub fn animation(mut self, ty: AnimationType, spec: AnimationSpec) -> Self {
        self.animation_type = ty;
        self.animation_config = spec;
        self
    }
    pub fn thumb_touch_size(mut self, size: Size) -> Self {
        self.thumb_touch_size = size;
        self
    }
    pub fn track_clickable(mut self, clickable: bool) -> Self {
        self.track_clickable = clickable;
        self
    }
    pub fn start_from_zero(mut self, start_from_zero: bool) -> Self {
        self.start_from_zero = start_from_zero;
        self
    }

    pub fn range(&self) -> ValueRange {
        ValueRange::new(self.minimum_value, self.maximum_value)
    }

    pub fn buffer(&self) -> f32 {
        if self.step > 0.0 {
            self.step
        } else {
            DEFAULT_BUFFER
        }
    }

    pub fn is_rtl(&self) -> bool {
        self.direction.unwrap_or_else(text_direction).is_rtl()
    }

    /// The spec handed to `ValueStore::set_animated`. `Spring` keeps the
    /// configured duration and delay and only swaps in spring easing when the
    /// config does not already carry one.
    pub fn transition_spec(&self) -> AnimationSpec {
        match self.animation_type {
            AnimationType::Timing => self.animation_config,
            AnimationType::Spring if self.animation_config.easing.is_spring() => {
                self.animation_config
            }
            AnimationType::Spring => AnimationSpec::spring_phys(
                AnimationSpec::SPRING_DAMPING,
                AnimationSpec::SPRING_STIFFNESS,
                self.animation_config.duration,
            )
            .with_delay(self.animation_config.delay),
        }
    }

    /// Checks for configurations the engine tolerates but renders poorly.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.minimum_value, self.maximum_value);
        if !min.is_finite() || !max.is_finite() {
            return Err(ConfigError::NonFiniteRange { min, max });
        }
        if min >= max {
            return Err(ConfigError::EmptyRange { min, max });
        }
        if !self.step.is_finite() || self.step < 0.0 {
            return Err(ConfigError::InvalidStep { step: self.step });
        }
        if self.step > max - min {
            return Err(ConfigError::StepExceedsRange {
                step: self.step,
                span: max - min,
            });
        }
        let count = match &self.value {
            RawValue::Scalar(_) => 1,
            RawValue::Many(vs) => vs.len(),
        };
        if !(1..=2).contains(&count) {
            return Err(ConfigError::ThumbCount { count });
        }
        if let RawValue::Many(vs) = &self.value
            && let [first, second] = *vs.as_slice()
        {
            if first > second {
                return Err(ConfigError::Unordered { first, second });
            }
            if second - first < self.buffer() {
                return Err(ConfigError::ThumbsTooClose {
                    first,
                    second,
                    buffer: self.buffer(),
                });
            }
        }
        Ok(())
    }
}

/// Receives all raw values and the index of the thumb that caused the event.
pub type ValuesCallback = Rc<dyn Fn(&[f32], usize)>;

#[derive(Clone, Default)]
pub struct SliderCallbacks {
    pub on_value_change: Option<ValuesCallback>,
    pub on_sliding_start: Option<ValuesCallback>,
    pub on_sliding_complete: Option<ValuesCallback>,
}

impl SliderCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_value_change(mut self, f: impl Fn(&[f32], usize) + 'static) -> Self {
        self.on_value_change = Some(Rc::new(f));
        self
    }
    pub fn on_sliding_start(mut self, f: impl Fn(&[f32], usize) + 'static) -> Self {
        self.on_sliding_start = Some(Rc::new(f));
        self
    }
    pub fn on_sliding_complete(mut self, f: impl Fn(&[f32], usize) + 'static) -> Self {
        self.on_sliding_complete = Some(Rc::new(f));
        self
    }

    pub(crate) fn fire(cb: &Option<ValuesCallback>, values: &[f32], active: usize) {
        if let Some(cb) = cb {
            cb(values, active);
        }
    }
}

impl std::fmt::Debug for SliderCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SliderCallbacks")
            .field("on_value_change", &self.on_value_change.is_some())
            .field("on_sliding_start", &self.on_sliding_start.is_some())
            .field("on_sliding_complete", &self.on_sliding_complete.is_some())
            .finish()
    }
}
