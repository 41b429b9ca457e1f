//! # Slider façade
//!
//! `Slider` wires the value store, measurement tracker and gesture controller
//! together behind the host-facing surface:
//!
//! - layout: `on_container_layout`, `on_track_layout`, `on_thumb_layout`
//! - gestures: `should_claim`, `grant`, `moved`, `released`, `terminated`
//! - wheel/keys: `nudge`, `on_scroll`
//! - external updates: `set_config`
//! - per frame: `tick`, then `render_state` for the visual leaves
//!
//! ```rust
//! use thumbtrack::*;
//! use thumbtrack_core::{Size, Vec2};
//!
//! let mut slider = Slider::new(
//!     SliderConfig::new(0.0, 100.0).value(50.0),
//!     SliderCallbacks::new(),
//! );
//! slider.on_container_layout(Size::new(120.0, 40.0));
//! slider.on_thumb_layout(Size::square(20.0));
//!
//! let at_thumb = Vec2::new(70.0, 20.0);
//! assert!(slider.should_claim(at_thumb));
//! slider.grant(at_thumb);
//! slider.moved(Vec2::new(20.0, 0.0));
//! slider.released(Vec2::new(20.0, 0.0));
//! assert_eq!(slider.values().as_slice(), &[70.0]);
//! ```

use smallvec::SmallVec;
use thumbtrack_core::{Size, Values, Vec2, clamp_between, normalize};

use crate::config::{SliderCallbacks, SliderConfig};
use crate::error::ConfigError;
use crate::gesture::{GestureContext, GestureController};
use crate::measure::{Geometry, MeasurementTracker};
use crate::store::ValueStore;
use crate::track::{TouchOverflow, separate_thumbs, snap_step, thumb_bounds, thumb_left};

/// The configured values, clamped into range and kept `buffer` apart.
fn declared_values(config: &SliderConfig) -> Values {
    let mut values = normalize(config.range(), &config.value);
    separate_thumbs(&mut values, config);
    values
}

/// Filled part of the track, in container pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrackFill {
    pub left: f32,
    pub width: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SliderStatus {
    pub sliding: bool,
    pub disabled: bool,
    pub all_measured: bool,
}

/// Everything the visual leaves need for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SliderRenderState {
    pub values: Values,
    /// Left offset of each thumb, following in-flight animations.
    pub thumb_offsets: SmallVec<[f32; 2]>,
    pub fill: TrackFill,
    pub touch_overflow: TouchOverflow,
    pub active_thumb: usize,
    pub status: SliderStatus,
}

pub struct Slider {
    config: SliderConfig,
    callbacks: SliderCallbacks,
    store: ValueStore,
    measurements: MeasurementTracker,
    gestures: GestureController,
}

impl Slider {
    /// Builds a slider. Invalid configurations are logged and tolerated.
    pub fn new(config: SliderConfig, callbacks: SliderCallbacks) -> Self {
        if let Err(e) = config.validate() {
            log::warn!("slider: {e}; values will be clamped");
        }
        let values = declared_values(&config);
        Self {
            store: ValueStore::new(&values),
            config,
            callbacks,
            measurements: MeasurementTracker::new(),
            gestures: GestureController::new(),
        }
    }

    /// Like [`Slider::new`] but refuses configurations `validate` rejects.
    pub fn try_new(config: SliderConfig, callbacks: SliderCallbacks) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config, callbacks))
    }

    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    pub fn set_callbacks(&mut self, callbacks: SliderCallbacks) {
        self.callbacks = callbacks;
    }

    pub fn store(&self) -> &ValueStore {
        &self.store
    }

    pub fn measurements(&self) -> &MeasurementTracker {
        &self.measurements
    }

    pub fn geometry(&self) -> Geometry {
        self.measurements.geometry()
    }

    /// Raw values (animation targets).
    pub fn values(&self) -> Values {
        self.store.values()
    }

    pub fn active_thumb(&self) -> usize {
        self.gestures.active_thumb()
    }

    pub fn is_sliding(&self) -> bool {
        self.gestures.is_sliding()
    }

    /// Applies an external configuration update.
    ///
    /// Values only move when the declared value (or its range) changes, so a
    /// host that re-sends an unchanged config after a drag does not snap the
    /// thumb back.
    pub fn set_config(&mut self, next: SliderConfig) {
        let declared_before = declared_values(&self.config);
        let declared = declared_values(&next);
        let range_changed = self.config.range() != next.range();
        let disabling = next.disabled && !self.config.disabled;
        self.config = next;

        // a disabled slider ignores release, so an open session would never close
        if disabling {
            self.gestures.reset();
        }

        if declared.len() != self.store.len() && self.gestures.is_sliding() {
            log::warn!("slider: thumb count changed mid-drag; dropping the gesture");
            self.gestures.reset();
        }

        if declared == declared_before && declared.len() == self.store.len() {
            if range_changed {
                self.clamp_into_range();
            }
            return;
        }

        let previous = self.store.values();
        if self.config.animate_transitions {
            let spec = self.config.transition_spec();
            self.store.truncate(declared.len());
            for (i, &v) in declared.iter().enumerate() {
                match previous.get(i) {
                    Some(&old) if old == v => {}
                    Some(_) => self.store.set_animated(v, i, spec),
                    None => self.store.set_immediate(v, i),
                }
            }
        } else {
            self.store.reconcile(&declared);
        }
        log::debug!("slider: external values {previous:?} -> {declared:?}");
    }

    fn clamp_into_range(&mut self) {
        let range = self.config.range();
        for (i, v) in self.store.values().into_iter().enumerate() {
            let clamped = range.clamp(v);
            if clamped != v {
                self.store.set_immediate(clamped, i);
            }
        }
    }

    pub fn on_container_layout(&self, size: Size) -> bool {
        self.measurements.record_container(size)
    }

    pub fn on_track_layout(&self, size: Size) -> bool {
        self.measurements.record_track(size)
    }

    pub fn on_thumb_layout(&self, size: Size) -> bool {
        self.measurements.record_thumb(size)
    }

    fn with_gestures<R>(
        &mut self,
        f: impl FnOnce(&mut GestureController, &mut GestureContext<'_>) -> R,
    ) -> R {
        let mut ctx = GestureContext {
            config: &self.config,
            geometry: self.measurements.geometry(),
            store: &mut self.store,
            callbacks: &self.callbacks,
        };
        f(&mut self.gestures, &mut ctx)
    }

    /// `point` is in interactive-surface coordinates (the container grown by
    /// [`TouchOverflow::insets`]).
    pub fn should_claim(&mut self, point: Vec2) -> bool {
        self.with_gestures(|g, ctx| g.should_claim(ctx, point))
    }

    pub fn grant(&mut self, point: Vec2) {
        self.with_gestures(|g, ctx| g.grant(ctx, point))
    }

    pub fn moved(&mut self, delta: Vec2) {
        self.with_gestures(|g, ctx| g.moved(ctx, delta))
    }

    pub fn released(&mut self, delta: Vec2) {
        self.with_gestures(|g, ctx| g.released(ctx, delta))
    }

    pub fn terminated(&mut self, delta: Vec2) {
        self.with_gestures(|g, ctx| g.terminated(ctx, delta))
    }

    /// Moves thumb `index` by whole steps (1% of the range when continuous),
    /// respecting range and ordering. Returns whether the value changed.
    pub fn nudge(&mut self, index: usize, steps: i32) -> bool {
        if self.config.disabled || steps == 0 {
            return false;
        }
        let values = self.store.values();
        let Some(&base) = values.get(index) else {
            return false;
        };
        let range = self.config.range();
        let step = self.config.step;
        let delta = if step > 0.0 { step } else { range.span() * 0.01 };
        let (lo, hi) = thumb_bounds(index, &values, &self.config);
        let next = clamp_between(snap_step(base + steps as f32 * delta, step, range), lo, hi);
        if next == base || !next.is_finite() {
            return false;
        }
        let on_change = &self.callbacks.on_value_change;
        self.store.set_immediate_then(next, index, |store| {
            SliderCallbacks::fire(on_change, &store.values(), index);
        });
        true
    }

    /// Mouse wheel on a single-thumb slider: wheel-up increases. Consumes the
    /// vertical delta and passes the horizontal one through.
    pub fn on_scroll(&mut self, d: Vec2) -> Vec2 {
        if self.config.disabled || self.store.len() != 1 || d.y == 0.0 {
            return d;
        }
        let dir = if d.y.is_sign_negative() { 1 } else { -1 };
        self.nudge(0, dir);
        Vec2 { x: d.x, y: 0.0 }
    }

    /// Advances value animations; returns whether another frame is needed.
    pub fn tick(&mut self) -> bool {
        self.store.tick()
    }

    pub fn thumb_offsets(&self) -> SmallVec<[f32; 2]> {
        let geometry = self.measurements.geometry();
        self.store
            .currents()
            .iter()
            .map(|&v| thumb_left(v, &self.config, &geometry))
            .collect()
    }

    pub fn track_fill(&self) -> TrackFill {
        let geometry = self.measurements.geometry();
        let offsets = self.thumb_offsets();
        let half = geometry.thumb.width * 0.5;

        match offsets.as_slice() {
            [] => TrackFill::default(),
            [offset] => {
                let range = self.config.range();
                if self.config.start_from_zero && range.contains_zero() {
                    let zero = thumb_left(0.0, &self.config, &geometry) + half;
                    let center = offset + half;
                    TrackFill {
                        left: zero.min(center),
                        width: (center - zero).abs(),
                    }
                } else {
                    let pad = self.config.track_right_padding.unwrap_or(half);
                    if self.config.is_rtl() {
                        let left = offset + geometry.thumb.width - pad;
                        TrackFill {
                            left,
                            width: (geometry.container.width - left).max(0.0),
                        }
                    } else {
                        TrackFill {
                            left: 0.0,
                            width: (offset + pad).max(0.0),
                        }
                    }
                }
            }
            many => {
                let lo = many.iter().copied().fold(f32::INFINITY, f32::min);
                let hi = many.iter().copied().fold(f32::NEG_INFINITY, f32::max);
                TrackFill {
                    left: lo + half,
                    width: hi - lo,
                }
            }
        }
    }

    pub fn touch_overflow(&self) -> TouchOverflow {
        TouchOverflow::of(&self.config, &self.measurements.geometry())
    }

    pub fn status(&self) -> SliderStatus {
        SliderStatus {
            sliding: self.gestures.is_sliding(),
            disabled: self.config.disabled,
            all_measured: self.measurements.all_measured(),
        }
    }

    pub fn render_state(&self) -> SliderRenderState {
        SliderRenderState {
            values: self.store.values(),
            thumb_offsets: self.thumb_offsets(),
            fill: self.track_fill(),
            touch_overflow: self.touch_overflow(),
            active_thumb: self.gestures.active_thumb(),
            status: self.status(),
        }
    }
}
