//! Layout sizes as they are reported by the host.
//!
//! Reports can arrive in any order and repeat freely. A report equal to the
//! stored size is dropped, so subscribers of [`MeasurementTracker::changes`]
//! fire once per real change.

use thumbtrack_core::{Signal, Size, SubId, signal};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Geometry {
    pub container: Size,
    /// Informational; positions never depend on it.
    pub track: Size,
    pub thumb: Size,
    pub all_measured: bool,
}

impl Geometry {
    /// Pixel length a thumb's left edge can travel.
    pub fn track_length(&self) -> f32 {
        self.container.width - self.thumb.width
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeasuredPart {
    Container,
    Track,
    Thumb,
}

pub struct MeasurementTracker {
    geometry: Signal<Geometry>,
}

impl Default for MeasurementTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl MeasurementTracker {
    pub fn new() -> Self {
        Self {
            geometry: signal(Geometry::default()),
        }
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry.get()
    }

    pub fn all_measured(&self) -> bool {
        self.geometry.with(|g| g.all_measured)
    }

    /// Handle to the underlying signal, for subscribing to layout changes.
    pub fn changes(&self) -> &Signal<Geometry> {
        &self.geometry
    }

    pub fn subscribe(&self, f: impl Fn(&Geometry) + 'static) -> SubId {
        self.geometry.subscribe(f)
    }

    pub fn record_container(&self, size: Size) -> bool {
        self.record(MeasuredPart::Container, size)
    }

    pub fn record_track(&self, size: Size) -> bool {
        self.record(MeasuredPart::Track, size)
    }

    pub fn record_thumb(&self, size: Size) -> bool {
        self.record(MeasuredPart::Thumb, size)
    }

    /// Returns whether anything changed.
    pub fn record(&self, part: MeasuredPart, size: Size) -> bool {
        let changed = self.geometry.update(|g| {
            match part {
                MeasuredPart::Container => g.container = size,
                MeasuredPart::Track => g.track = size,
                MeasuredPart::Thumb => g.thumb = size,
            }
            g.all_measured = g.container.width > 0.0 && g.thumb.width > 0.0;
        });
        if changed {
            log::trace!("layout: {part:?} {}x{}", size.width, size.height);
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_repeated_size_fires_once() {
        let tracker = MeasurementTracker::new();
        let fired = Rc::new(Cell::new(0));
        {
            let fired = fired.clone();
            tracker.subscribe(move |_| fired.set(fired.get() + 1));
        }

        assert!(tracker.record_container(Size::new(300.0, 40.0)));
        assert!(!tracker.record_container(Size::new(300.0, 40.0)));
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_ready_needs_container_and_thumb() {
        let tracker = MeasurementTracker::new();
        tracker.record_thumb(Size::square(20.0));
        assert!(!tracker.all_measured());

        tracker.record_track(Size::new(280.0, 4.0));
        assert!(!tracker.all_measured());

        tracker.record_container(Size::new(300.0, 40.0));
        assert!(tracker.all_measured());
        assert_eq!(tracker.geometry().track_length(), 280.0);
    }

    #[test]
    fn test_order_independent() {
        let a = MeasurementTracker::new();
        a.record_container(Size::new(120.0, 40.0));
        a.record_thumb(Size::square(20.0));
        a.record_track(Size::new(100.0, 4.0));

        let b = MeasurementTracker::new();
        b.record_track(Size::new(100.0, 4.0));
        b.record_thumb(Size::square(20.0));
        b.record_container(Size::new(120.0, 40.0));

        assert_eq!(a.geometry(), b.geometry());
    }

    #[test]
    fn test_zero_width_thumb_is_not_ready() {
        let tracker = MeasurementTracker::new();
        tracker.record_container(Size::new(120.0, 40.0));
        tracker.record_thumb(Size::new(0.0, 20.0));
        assert!(!tracker.all_measured());
    }
}
