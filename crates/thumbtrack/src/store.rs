//! # Value store
//!
//! Holds one [`ThumbValue`] per thumb. A slot is either `Settled` (a plain
//! number) or `Animating` (a shared [`AnimationHandle`]); the store is the only
//! place that moves a slot between the two:
//!
//! - `set_immediate` always leaves a `Settled` slot (and cancels any animation).
//! - `set_animated` turns the slot into `Animating`, reusing an in-flight handle.
//! - `tick` turns finished animations back into `Settled`.
//!
//! Drags must track the finger 1:1, so the gesture controller only ever uses
//! `set_immediate`. External value changes may animate.

use smallvec::SmallVec;
use thumbtrack_core::{AnimationHandle, AnimationSpec, ThumbValue, Values, reconcile_values};

#[derive(Debug, Default)]
pub struct ValueStore {
    thumbs: SmallVec<[ThumbValue; 2]>,
    revision: u64,
}

impl ValueStore {
    pub fn new(values: &[f32]) -> Self {
        Self {
            thumbs: values.iter().map(|&v| ThumbValue::Settled(v)).collect(),
            revision: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.thumbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thumbs.is_empty()
    }

    /// Raw values: animation targets, or the number itself when settled.
    pub fn values(&self) -> Values {
        self.thumbs.iter().map(ThumbValue::target).collect()
    }

    /// What each thumb shows this frame.
    pub fn currents(&self) -> Values {
        self.thumbs.iter().map(ThumbValue::current).collect()
    }

    pub fn current(&self, index: usize) -> Option<f32> {
        self.thumbs.get(index).map(ThumbValue::current)
    }

    pub fn value(&self, index: usize) -> Option<f32> {
        self.thumbs.get(index).map(ThumbValue::target)
    }

    pub fn thumb(&self, index: usize) -> Option<&ThumbValue> {
        self.thumbs.get(index)
    }

    /// Bumped on every mutation through a setter, `truncate` or `reconcile`.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_animating(&self) -> bool {
        self.thumbs
            .iter()
            .any(|t| matches!(t, ThumbValue::Animating(h) if h.is_animating()))
    }

    fn slot_mut(&mut self, index: usize, fill: f32) -> &mut ThumbValue {
        while self.thumbs.len() <= index {
            self.thumbs.push(ThumbValue::Settled(fill));
        }
        &mut self.thumbs[index]
    }

    pub fn set_immediate(&mut self, value: f32, index: usize) {
        *self.slot_mut(index, value) = ThumbValue::Settled(value);
        self.revision += 1;
    }

    /// `set_immediate`, then `on_settled` with the updated store.
    pub fn set_immediate_then(
        &mut self,
        value: f32,
        index: usize,
        on_settled: impl FnOnce(&ValueStore),
    ) {
        self.set_immediate(value, index);
        on_settled(self);
    }

    /// Starts a transition toward `value` and returns right away; playback
    /// advances on `tick`. A missing slot is created at `value`.
    pub fn set_animated(&mut self, value: f32, index: usize, spec: AnimationSpec) {
        let missing = index >= self.thumbs.len();
        let slot = self.slot_mut(index, value);
        if !missing {
            let started = match &*slot {
                ThumbValue::Animating(h) => {
                    h.retarget_with(value, spec);
                    None
                }
                ThumbValue::Settled(from) => {
                    let h = AnimationHandle::new(*from, spec);
                    h.retarget(value);
                    Some(ThumbValue::Animating(h))
                }
            };
            if let Some(started) = started {
                *slot = started;
            }
        }
        self.revision += 1;
    }

    pub fn truncate(&mut self, len: usize) {
        if self.thumbs.len() > len {
            self.thumbs.truncate(len);
            self.revision += 1;
        }
    }

    /// Index-wise merge with `next`; see [`reconcile_values`].
    pub fn reconcile(&mut self, next: &[f32]) {
        let previous = std::mem::take(&mut self.thumbs);
        self.thumbs = reconcile_values(previous, next);
        self.revision += 1;
    }

    /// Advances in-flight animations and settles the finished ones. Returns
    /// whether any thumb is still moving.
    pub fn tick(&mut self) -> bool {
        let mut running = false;
        for slot in self.thumbs.iter_mut() {
            let finished = match &*slot {
                ThumbValue::Animating(h) if h.update() => {
                    running = true;
                    None
                }
                ThumbValue::Animating(h) => Some(h.current()),
                ThumbValue::Settled(_) => None,
            };
            if let Some(v) = finished {
                *slot = ThumbValue::Settled(v);
            }
        }
        running
    }
}
