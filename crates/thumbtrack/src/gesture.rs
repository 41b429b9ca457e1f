//! # Gesture controller
//!
//! One touch session at a time, `Idle → Dragging → Idle`:
//!
//! - `should_claim(point)` hit-tests the thumbs (then the track, if
//!   clickable) and remembers which thumb the session will drive.
//! - `grant(point)` anchors the session. A thumb claim anchors at the thumb's
//!   current offset so dragging is relative; a track claim anchors under the
//!   finger so the thumb jumps there.
//! - `moved(delta)` maps `anchor + delta` to a value and sets it immediately.
//! - `released(delta)` / `terminated(delta)` do the same once more and close
//!   the session.
//!
//! `delta` is the cumulative displacement since the grant, as delivered by the
//! platform's pan recognizer.

use thumbtrack_core::{Rect, Vec2, index_of_lowest};

use crate::config::{Orientation, SliderCallbacks, SliderConfig};
use crate::measure::Geometry;
use crate::store::ValueStore;
use crate::track::{TouchOverflow, thumb_left, thumb_touch_rect, value_for_offset};

/// How a session got its thumb.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Claim {
    /// The touch landed inside this thumb's hit rectangle.
    Thumb(usize),
    /// The touch landed on the track; this is the thumb that will seek.
    Track(usize),
}

impl Claim {
    pub fn index(self) -> usize {
        match self {
            Claim::Thumb(i) | Claim::Track(i) => i,
        }
    }
}

/// First rectangle containing `point` wins; otherwise a clickable track hands
/// the touch to the nearest thumb, ties going to the lower index.
pub fn hit_test(rects: &[Rect], point: Vec2, track_clickable: bool) -> Option<Claim> {
    if let Some(i) = rects.iter().position(|r| r.contains(point)) {
        return Some(Claim::Thumb(i));
    }
    if !track_clickable || rects.is_empty() {
        return None;
    }
    if rects.len() == 1 {
        return Some(Claim::Track(0));
    }
    let distances: Vec<f32> = rects
        .iter()
        .map(|r| r.distance_to_point_on_axis(point.x))
        .collect();
    index_of_lowest(&distances).map(Claim::Track)
}

/// Everything a gesture handler reads or writes besides its own session.
pub struct GestureContext<'a> {
    pub config: &'a SliderConfig,
    pub geometry: Geometry,
    pub store: &'a mut ValueStore,
    pub callbacks: &'a SliderCallbacks,
}

impl GestureContext<'_> {
    fn touch_rects(&self) -> Vec<Rect> {
        self.store
            .currents()
            .iter()
            .map(|&v| thumb_touch_rect(v, self.config, &self.geometry))
            .collect()
    }
}

#[derive(Clone, Copy, Debug)]
struct Session {
    claim: Claim,
    previous_left: f32,
    moved: bool,
}

#[derive(Debug, Default)]
pub struct GestureController {
    session: Option<Session>,
    pending: Option<Claim>,
    active: usize,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_sliding(&self) -> bool {
        self.session.is_some()
    }

    pub fn active_thumb(&self) -> usize {
        self.active
    }

    /// Anchor offset of the running session.
    pub fn previous_left(&self) -> Option<f32> {
        self.session.map(|s| s.previous_left)
    }

    /// Claim the session currently running (or about to be granted).
    pub fn claim(&self) -> Option<Claim> {
        self.session.map(|s| s.claim).or(self.pending)
    }

    pub fn should_claim(&mut self, ctx: &GestureContext<'_>, point: Vec2) -> bool {
        if ctx.config.disabled {
            return false;
        }
        if self.session.is_some() {
            log::warn!("slider: touch at {point:?} ignored, a drag is already active");
            return false;
        }
        let claim = hit_test(&ctx.touch_rects(), point, ctx.config.track_clickable);
        log::debug!("slider: claim {claim:?} at {point:?}");
        match claim {
            Some(claim) => {
                self.pending = Some(claim);
                true
            }
            None => {
                self.pending = None;
                false
            }
        }
    }

    pub fn grant(&mut self, ctx: &mut GestureContext<'_>, point: Vec2) {
        if ctx.config.disabled || self.session.is_some() {
            return;
        }
        let claim = match self.pending.take() {
            Some(claim) => claim,
            None => match hit_test(&ctx.touch_rects(), point, ctx.config.track_clickable) {
                Some(claim) => claim,
                None => return,
            },
        };
        self.active = claim.index();

        let previous_left = match claim {
            Claim::Track(_) => {
                let overflow = TouchOverflow::of(ctx.config, &ctx.geometry);
                point.x - ctx.geometry.thumb.width * 0.5 - overflow.width * 0.5
            }
            Claim::Thumb(i) => {
                let current = ctx.store.current(i).unwrap_or(ctx.config.minimum_value);
                thumb_left(current, ctx.config, &ctx.geometry)
            }
        };
        log::debug!(
            "slider: grant {claim:?}, anchor {previous_left:.1}px, measured = {}",
            ctx.geometry.all_measured
        );

        self.session = Some(Session {
            claim,
            previous_left,
            moved: false,
        });
        SliderCallbacks::fire(
            &ctx.callbacks.on_sliding_start,
            &ctx.store.values(),
            self.active,
        );
    }

    pub fn moved(&mut self, ctx: &mut GestureContext<'_>, delta: Vec2) {
        if ctx.config.disabled {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.moved = true;
        let session = *session;
        let active = self.active;

        if let Some(v) = Self::value_for(&session, active, ctx, delta) {
            log::trace!("slider: move {delta:?} -> thumb {active} = {v}");
            let on_change = &ctx.callbacks.on_value_change;
            ctx.store.set_immediate_then(v, active, |store| {
                SliderCallbacks::fire(on_change, &store.values(), active);
            });
        }
    }

    pub fn released(&mut self, ctx: &mut GestureContext<'_>, delta: Vec2) {
        self.finish(ctx, delta);
    }

    /// Another responder took the touch over. Ends the session like a release.
    pub fn terminated(&mut self, ctx: &mut GestureContext<'_>, delta: Vec2) {
        self.finish(ctx, delta);
    }

    /// Drops the session without emitting anything.
    pub fn reset(&mut self) {
        if self.session.take().is_some() {
            log::debug!("slider: session reset");
        }
        self.pending = None;
        self.active = 0;
    }

    fn finish(&mut self, ctx: &mut GestureContext<'_>, delta: Vec2) {
        if ctx.config.disabled {
            return;
        }
        let Some(session) = self.session.take() else {
            return;
        };
        let active = self.active;

        if let Some(v) = Self::value_for(&session, active, ctx, delta) {
            ctx.store.set_immediate(v, active);
            // a tap on the track reports its change only now
            if matches!(session.claim, Claim::Track(_)) && !session.moved {
                SliderCallbacks::fire(
                    &ctx.callbacks.on_value_change,
                    &ctx.store.values(),
                    active,
                );
            }
        }
        log::debug!("slider: release thumb {active}, values {:?}", ctx.store.values());

        SliderCallbacks::fire(
            &ctx.callbacks.on_sliding_complete,
            &ctx.store.values(),
            active,
        );
        self.pending = None;
        self.active = 0;
    }

    fn value_for(
        session: &Session,
        active: usize,
        ctx: &GestureContext<'_>,
        delta: Vec2,
    ) -> Option<f32> {
        // drag-up means "up the track"
        let displacement = match ctx.config.orientation {
            Orientation::Horizontal => delta.x,
            Orientation::Vertical => -delta.y,
        };
        value_for_offset(
            session.previous_left + displacement,
            active,
            &ctx.store.values(),
            ctx.config,
            &ctx.geometry,
        )
    }
}
