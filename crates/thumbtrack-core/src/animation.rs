//! # Thumb transitions
//!
//! A thumb that moves because of an external value update glides there
//! through a [`Transition`]: it remembers where it left from, where it is
//! heading and when it started, and [`Transition::sample`] reads the installed
//! [`Clock`] to place the value in between. Nothing runs in the background;
//! the host samples once per frame, usually through `ValueStore::tick`.
//!
//! Transitions that must keep their identity across reconciliation are shared
//! through an [`AnimationHandle`] and compared with [`AnimationHandle::ptr_eq`].

use std::cell::RefCell;
use std::rc::Rc;

use web_time::{Duration, Instant};

thread_local! {
    static CLOCK: RefCell<Option<Box<dyn Clock>>> = const { RefCell::new(None) };
}

/// Time according to the installed clock, or the system clock if none.
pub(crate) fn now() -> Instant {
    CLOCK.with(|c| match c.borrow().as_ref() {
        Some(clock) => clock.now(),
        None => Instant::now(),
    })
}

/// `e^-6.91 ≈ 0.001`: a spring is within 0.1% of its target when its time runs out.
const SPRING_SETTLE_DECAY: f32 = 6.91;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    Spring { damping: f32, stiffness: f32 },
}

impl Easing {
    /// Maps linear progress `t ∈ [0, 1]` to eased progress. Springs overshoot.
    pub fn apply(&self, t: f32) -> f32 {
        match *self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut if t < 0.5 => 2.0 * t * t,
            Easing::EaseInOut => 1.0 - (2.0 - 2.0 * t).powi(2) * 0.5,
            Easing::Spring { damping, stiffness } => {
                let omega = (stiffness / damping).sqrt();
                let zeta = damping / (2.0 * (stiffness * damping).sqrt());
                if zeta >= 1.0 {
                    // critically or over-damped: no visible bounce
                    return Easing::EaseOut.apply(t);
                }
                let omega_d = omega * (1.0 - zeta * zeta).sqrt();
                // the envelope must be spent by t = 1, or the final snap shows
                let decay = (2.0 * zeta * omega).max(SPRING_SETTLE_DECAY);
                1.0 - (-decay * t).exp() * (2.0 * omega_d * t).cos()
            }
        }
    }

    pub fn is_spring(&self) -> bool {
        matches!(self, Easing::Spring { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationSpec {
    pub duration: Duration,
    pub easing: Easing,
    pub delay: Duration,
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(Duration::from_millis(300), Easing::EaseInOut)
    }
}

impl AnimationSpec {
    pub const SPRING_DAMPING: f32 = 0.8;
    pub const SPRING_STIFFNESS: f32 = 200.0;

    pub fn tween(duration: Duration, easing: Easing) -> Self {
        Self {
            duration,
            easing,
            delay: Duration::ZERO,
        }
    }

    /// The default spring over 500ms.
    pub fn spring() -> Self {
        Self::spring_phys(
            Self::SPRING_DAMPING,
            Self::SPRING_STIFFNESS,
            Duration::from_millis(500),
        )
    }

    pub fn spring_phys(damping: f32, stiffness: f32, duration: Duration) -> Self {
        Self::tween(duration, Easing::Spring { damping, stiffness })
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

pub trait Clock: 'static {
    fn now(&self) -> Instant;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Installs the clock transitions on this (UI) thread read from. Replaces any
/// previous one, so tests can step time by installing a new [`TestClock`].
pub fn set_clock(clock: Box<dyn Clock>) {
    CLOCK.with(|c| *c.borrow_mut() = Some(clock));
}

/// A frozen clock for deterministic playback.
#[derive(Clone)]
pub struct TestClock {
    pub t: Instant,
}

impl Clock for TestClock {
    fn now(&self) -> Instant {
        self.t
    }
}

/// One number moving from `from` toward `to`.
#[derive(Clone, Debug)]
pub struct Transition {
    value: f32,
    from: f32,
    to: f32,
    spec: AnimationSpec,
    started: Option<Instant>,
}

impl Transition {
    /// A transition at rest on `value`.
    pub fn new(value: f32, spec: AnimationSpec) -> Self {
        Self {
            value,
            from: value,
            to: value,
            spec,
            started: None,
        }
    }

    /// Heads for `to`, starting from wherever the value is right now, so a
    /// retarget mid-flight does not jump.
    pub fn retarget(&mut self, to: f32) {
        self.from = self.value;
        self.to = to;
        self.started = Some(now());
    }

    pub fn set_spec(&mut self, spec: AnimationSpec) {
        self.spec = spec;
    }

    /// Jumps to `value` and stops.
    pub fn snap_to(&mut self, value: f32) {
        *self = Self::new(value, self.spec);
    }

    /// Moves the value to where the clock says it should be. Returns whether
    /// the transition is still running.
    pub fn sample(&mut self) -> bool {
        let Some(started) = self.started else {
            return false;
        };
        let elapsed = now().saturating_duration_since(started);
        let Some(running) = elapsed.checked_sub(self.spec.delay) else {
            return true;
        };
        if running >= self.spec.duration {
            self.value = self.to;
            self.started = None;
            return false;
        }
        let t = running.as_secs_f32() / self.spec.duration.as_secs_f32();
        self.value = self.from + (self.to - self.from) * self.spec.easing.apply(t);
        true
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }
}

/// Shared, identity-carrying [`Transition`].
#[derive(Clone, Debug)]
pub struct AnimationHandle(Rc<RefCell<Transition>>);

impl AnimationHandle {
    pub fn new(initial: f32, spec: AnimationSpec) -> Self {
        Self(Rc::new(RefCell::new(Transition::new(initial, spec))))
    }

    pub fn ptr_eq(&self, other: &AnimationHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn current(&self) -> f32 {
        self.0.borrow().value()
    }

    pub fn target(&self) -> f32 {
        self.0.borrow().target()
    }

    pub fn retarget(&self, target: f32) {
        self.0.borrow_mut().retarget(target);
    }

    pub fn retarget_with(&self, target: f32, spec: AnimationSpec) {
        let mut transition = self.0.borrow_mut();
        transition.set_spec(spec);
        transition.retarget(target);
    }

    pub fn is_animating(&self) -> bool {
        self.0.borrow().is_running()
    }

    /// Samples the clock; `false` once the target is reached.
    pub fn update(&self) -> bool {
        self.0.borrow_mut().sample()
    }
}
