use std::cell::RefCell;
use std::rc::Rc;

use thumbtrack_core::animation::{TestClock, set_clock};
use thumbtrack_core::{AnimationSpec, Easing, Size, TextDirection, ThumbValue, Vec2};
use web_time::{Duration, Instant};

use crate::*;

type Events = Rc<RefCell<Vec<(&'static str, Vec<f32>, usize)>>>;

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn recorder() -> (SliderCallbacks, Events) {
    let events: Events = Rc::new(RefCell::new(Vec::new()));
    let record = |name: &'static str| {
        let events = events.clone();
        move |values: &[f32], active: usize| {
            events.borrow_mut().push((name, values.to_vec(), active))
        }
    };
    let callbacks = SliderCallbacks::new()
        .on_sliding_start(record("start"))
        .on_value_change(record("change"))
        .on_sliding_complete(record("complete"));
    (callbacks, events)
}

/// 0..100 over a 120px container with a 20px thumb: 1px == 1 unit. The touch
/// target matches the thumb, so surface and container coordinates agree.
fn unit_slider(config: SliderConfig, callbacks: SliderCallbacks) -> Slider {
    init_logs();
    let slider = Slider::new(
        config.thumb_touch_size(Size::square(20.0)),
        callbacks,
    );
    slider.on_container_layout(Size::new(120.0, 40.0));
    slider.on_track_layout(Size::new(120.0, 4.0));
    slider.on_thumb_layout(Size::square(20.0));
    slider
}

fn thumb_center(slider: &Slider, index: usize) -> Vec2 {
    Vec2::new(slider.thumb_offsets()[index] + 10.0, 20.0)
}

fn linear(ms: u64) -> AnimationSpec {
    AnimationSpec::tween(Duration::from_millis(ms), Easing::Linear)
}

struct Lcg(u32);

impl Lcg {
    fn next_unit(&mut self) -> f32 {
        self.0 = self.0.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        (self.0 >> 8) as f32 / (1u32 << 24) as f32
    }
    fn next_delta(&mut self) -> f32 {
        (self.next_unit() - 0.5) * 400.0
    }
}

#[test]
fn test_end_to_end_drag() {
    let (callbacks, events) = recorder();
    let mut slider = unit_slider(SliderConfig::new(0.0, 100.0).value(50.0), callbacks);

    let at = thumb_center(&slider, 0);
    assert!(slider.should_claim(at));
    slider.grant(at);
    assert!(slider.status().sliding);
    slider.moved(Vec2::new(20.0, 0.0));
    slider.released(Vec2::new(20.0, 0.0));

    assert_eq!(
        *events.borrow(),
        vec![
            ("start", vec![50.0], 0),
            ("change", vec![70.0], 0),
            ("complete", vec![70.0], 0),
        ]
    );
    assert!(!slider.status().sliding);
    assert_eq!(slider.active_thumb(), 0);
}

#[test]
fn test_step_quantization() {
    let (callbacks, _) = recorder();
    let mut slider = unit_slider(SliderConfig::new(0.0, 100.0).step(10.0), callbacks);

    let at = thumb_center(&slider, 0);
    assert!(slider.should_claim(at));
    slider.grant(at);
    slider.moved(Vec2::new(47.0, 0.0));
    assert_eq!(slider.values().as_slice(), &[50.0]);
    slider.moved(Vec2::new(63.0, 0.0));
    assert_eq!(slider.values().as_slice(), &[60.0]);
    slider.released(Vec2::new(63.0, 0.0));
    assert_eq!(slider.values().as_slice(), &[60.0]);
}

#[test]
fn test_random_drags_stay_in_range() {
    let (callbacks, _) = recorder();
    let mut slider = unit_slider(SliderConfig::new(0.0, 100.0).value(30.0), callbacks);
    let mut rng = Lcg(7);

    for _ in 0..50 {
        let at = thumb_center(&slider, 0);
        assert!(slider.should_claim(at));
        slider.grant(at);
        let mut delta = Vec2::ZERO;
        for _ in 0..5 {
            delta = Vec2::new(rng.next_delta(), rng.next_delta());
            slider.moved(delta);
            let v = slider.values()[0];
            assert!((0.0..=100.0).contains(&v), "value {v} escaped the range");
        }
        slider.released(delta);
        let v = slider.values()[0];
        assert!((0.0..=100.0).contains(&v), "value {v} escaped the range");
    }
}

#[test]
fn test_random_range_drags_keep_order() {
    let (callbacks, _) = recorder();
    let config = SliderConfig::new(0.0, 100.0).value([20.0, 80.0]).step(5.0);
    let buffer = config.buffer();
    let mut slider = unit_slider(config, callbacks);
    let mut rng = Lcg(42);

    let check = |values: &[f32]| {
        assert!(values.iter().all(|v| (0.0..=100.0).contains(v)), "{values:?}");
        assert!(values[0] <= values[1] - buffer, "thumbs crossed: {values:?}");
    };

    for round in 0..60 {
        let at = thumb_center(&slider, round % 2);
        assert!(slider.should_claim(at));
        slider.grant(at);
        let mut delta = Vec2::ZERO;
        for _ in 0..4 {
            delta = Vec2::new(rng.next_delta(), 0.0);
            slider.moved(delta);
            check(&slider.values());
        }
        slider.released(delta);
        check(&slider.values());
    }
}

#[test]
fn test_continuous_range_keeps_epsilon_gap() {
    let (callbacks, _) = recorder();
    let mut slider = unit_slider(SliderConfig::new(0.0, 100.0).value([40.0, 60.0]), callbacks);

    let at = thumb_center(&slider, 1);
    assert!(slider.should_claim(at));
    slider.grant(at);
    slider.released(Vec2::new(-90.0, 0.0));

    let values = slider.values();
    assert!((values[1] - 40.1).abs() < 1e-4, "{values:?}");
}

#[test]
fn test_disabled_is_inert() {
    let (callbacks, events) = recorder();
    let mut slider = unit_slider(
        SliderConfig::new(0.0, 100.0).value(50.0).disabled(true),
        callbacks,
    );

    let at = thumb_center(&slider, 0);
    assert!(!slider.should_claim(at));
    slider.grant(at);
    slider.moved(Vec2::new(30.0, 0.0));
    slider.released(Vec2::new(30.0, 0.0));
    assert!(!slider.nudge(0, 1));

    assert_eq!(slider.store().revision(), 0);
    assert!(events.borrow().is_empty());
    assert!(slider.status().disabled);
    assert!(!slider.status().sliding);
}

#[test]
fn test_gesture_before_layout_changes_nothing() {
    init_logs();
    let (callbacks, events) = recorder();
    let mut slider = Slider::new(SliderConfig::new(0.0, 100.0).value(50.0), callbacks);
    assert!(!slider.status().all_measured);

    let at = Vec2::new(10.0, 10.0);
    assert!(slider.should_claim(at));
    slider.grant(at);
    slider.moved(Vec2::new(25.0, 0.0));
    slider.terminated(Vec2::new(25.0, 0.0));

    assert_eq!(slider.values().as_slice(), &[50.0]);
    let names: Vec<_> = events.borrow().iter().map(|e| e.0).collect();
    assert_eq!(names, vec!["start", "complete"]);
}

#[test]
fn test_untouchable_track_rejects_misses() {
    let (callbacks, _) = recorder();
    let mut slider = unit_slider(
        SliderConfig::new(0.0, 100.0).value(50.0).track_clickable(false),
        callbacks,
    );
    assert!(!slider.should_claim(Vec2::new(5.0, 20.0)));
    assert!(slider.should_claim(Vec2::new(55.0, 20.0)));
}

#[test]
fn test_animated_external_update() {
    let t0 = Instant::now();
    set_clock(Box::new(TestClock { t: t0 }));

    let (callbacks, events) = recorder();
    let config = SliderConfig::new(0.0, 100.0)
        .value(10.0)
        .animate_transitions(true)
        .animation(AnimationType::Timing, linear(100));
    let mut slider = unit_slider(config.clone(), callbacks);

    slider.set_config(config.clone().value(90.0));
    assert_eq!(slider.values().as_slice(), &[90.0]);
    assert_eq!(slider.thumb_offsets().as_slice(), &[10.0]);

    set_clock(Box::new(TestClock {
        t: t0 + Duration::from_millis(50),
    }));
    assert!(slider.tick());
    assert!((slider.thumb_offsets()[0] - 50.0).abs() < 0.01);

    set_clock(Box::new(TestClock {
        t: t0 + Duration::from_millis(200),
    }));
    assert!(!slider.tick());
    assert_eq!(slider.thumb_offsets().as_slice(), &[90.0]);
    assert!(matches!(slider.store().thumb(0), Some(ThumbValue::Settled(_))));

    // external updates never fire gesture callbacks
    assert!(events.borrow().is_empty());
}

#[test]
fn test_unanimated_external_update_is_immediate() {
    let (callbacks, _) = recorder();
    let config = SliderConfig::new(0.0, 100.0).value(10.0);
    let mut slider = unit_slider(config.clone(), callbacks);

    slider.set_config(config.value(35.0));
    assert_eq!(slider.thumb_offsets().as_slice(), &[35.0]);
    assert!(!slider.tick());
}

#[test]
fn test_resent_config_does_not_undo_drag() {
    let (callbacks, _) = recorder();
    let config = SliderConfig::new(0.0, 100.0).value(50.0);
    let mut slider = unit_slider(config.clone(), callbacks);

    let at = thumb_center(&slider, 0);
    assert!(slider.should_claim(at));
    slider.grant(at);
    slider.released(Vec2::new(-30.0, 0.0));
    assert_eq!(slider.values().as_slice(), &[20.0]);

    let revision = slider.store().revision();
    slider.set_config(config);
    assert_eq!(slider.values().as_slice(), &[20.0]);
    assert_eq!(slider.store().revision(), revision);
}

#[test]
fn test_shrinking_range_clamps_values() {
    let (callbacks, _) = recorder();
    let config = SliderConfig::new(0.0, 100.0).value(50.0);
    let mut slider = unit_slider(config.clone(), callbacks);

    let at = thumb_center(&slider, 0);
    assert!(slider.should_claim(at));
    slider.grant(at);
    slider.released(Vec2::new(40.0, 0.0));
    assert_eq!(slider.values().as_slice(), &[90.0]);

    let mut narrower = config;
    narrower.maximum_value = 60.0;
    slider.set_config(narrower);
    assert_eq!(slider.values().as_slice(), &[60.0]);
}

#[test]
fn test_switch_to_range_keeps_in_flight_animation() {
    let t0 = Instant::now();
    set_clock(Box::new(TestClock { t: t0 }));

    let (callbacks, _) = recorder();
    let config = SliderConfig::new(0.0, 100.0)
        .value(30.0)
        .animate_transitions(true)
        .animation(AnimationType::Timing, linear(300));
    let mut slider = unit_slider(config.clone(), callbacks);

    slider.set_config(config.clone().value(60.0));
    let handle = slider
        .store()
        .thumb(0)
        .and_then(ThumbValue::handle)
        .cloned()
        .expect("animating");

    slider.set_config(config.clone().value([10.0, 90.0]));
    let kept = slider.store().thumb(0).and_then(ThumbValue::handle).expect("still animating");
    assert!(kept.ptr_eq(&handle));
    assert_eq!(slider.values().as_slice(), &[10.0, 90.0]);
    assert!(matches!(slider.store().thumb(1), Some(ThumbValue::Settled(v)) if *v == 90.0));

    // and back to a single thumb
    slider.set_config(config.value(10.0));
    assert_eq!(slider.store().len(), 1);
}

#[test]
fn test_switch_to_range_without_animation() {
    let (callbacks, _) = recorder();
    let config = SliderConfig::new(0.0, 100.0).value(25.0);
    let mut slider = unit_slider(config.clone(), callbacks);

    slider.set_config(config.value([10.0, 90.0]));
    assert_eq!(slider.values().as_slice(), &[10.0, 90.0]);
    assert_eq!(slider.thumb_offsets().as_slice(), &[10.0, 90.0]);
}

#[test]
fn test_thumb_count_change_drops_active_drag() {
    let (callbacks, events) = recorder();
    let config = SliderConfig::new(0.0, 100.0).value([20.0, 80.0]);
    let mut slider = unit_slider(config.clone(), callbacks);

    let at = thumb_center(&slider, 1);
    assert!(slider.should_claim(at));
    slider.grant(at);
    slider.set_config(config.value(50.0));
    assert!(!slider.is_sliding());

    slider.moved(Vec2::new(10.0, 0.0));
    slider.released(Vec2::new(10.0, 0.0));
    let names: Vec<_> = events.borrow().iter().map(|e| e.0).collect();
    assert_eq!(names, vec!["start"]);
}

#[test]
fn test_track_fill_single_thumb() {
    let (callbacks, _) = recorder();
    let slider = unit_slider(SliderConfig::new(0.0, 100.0).value(50.0), callbacks);
    assert_eq!(slider.track_fill(), TrackFill { left: 0.0, width: 60.0 });

    let (callbacks, _) = recorder();
    let padded = unit_slider(
        SliderConfig::new(0.0, 100.0).value(50.0).track_right_padding(0.0),
        callbacks,
    );
    assert_eq!(padded.track_fill(), TrackFill { left: 0.0, width: 50.0 });
}

#[test]
fn test_track_fill_rtl() {
    let (callbacks, _) = recorder();
    let slider = unit_slider(
        SliderConfig::new(0.0, 100.0)
            .value(25.0)
            .direction(TextDirection::Rtl),
        callbacks,
    );
    assert_eq!(slider.thumb_offsets().as_slice(), &[75.0]);
    assert_eq!(slider.track_fill(), TrackFill { left: 85.0, width: 35.0 });
}

#[test]
fn test_rtl_drag_right_decreases() {
    let (callbacks, _) = recorder();
    let mut slider = unit_slider(
        SliderConfig::new(0.0, 100.0)
            .value(50.0)
            .step(1.0)
            .direction(TextDirection::Rtl),
        callbacks,
    );

    let at = thumb_center(&slider, 0);
    assert!(slider.should_claim(at));
    slider.grant(at);
    slider.released(Vec2::new(20.0, 0.0));
    assert_eq!(slider.values().as_slice(), &[30.0]);
}

#[test]
fn test_track_fill_from_zero() {
    let (callbacks, _) = recorder();
    let config = SliderConfig::new(-50.0, 50.0).value(25.0).start_from_zero(true);
    let mut slider = unit_slider(config.clone(), callbacks);
    assert_eq!(slider.track_fill(), TrackFill { left: 60.0, width: 25.0 });

    slider.set_config(config.value(-25.0));
    assert_eq!(slider.track_fill(), TrackFill { left: 35.0, width: 25.0 });
}

#[test]
fn test_track_fill_range() {
    let (callbacks, _) = recorder();
    let slider = unit_slider(SliderConfig::new(0.0, 100.0).value([20.0, 80.0]), callbacks);
    assert_eq!(slider.track_fill(), TrackFill { left: 30.0, width: 60.0 });
}

#[test]
fn test_touch_overflow_from_default_target() {
    init_logs();
    let slider = Slider::new(SliderConfig::new(0.0, 1.0), SliderCallbacks::new());
    slider.on_container_layout(Size::new(200.0, 30.0));
    slider.on_thumb_layout(Size::square(24.0));

    let overflow = slider.touch_overflow();
    assert_eq!(overflow, TouchOverflow { width: 16.0, height: 10.0 });
    assert_eq!(overflow.insets().horizontal, 8.0);
    assert_eq!(overflow.insets().vertical, 5.0);
}

#[test]
fn test_nudge_and_wheel() {
    let (callbacks, events) = recorder();
    let mut slider = unit_slider(SliderConfig::new(0.0, 100.0).value(50.0).step(10.0), callbacks);

    assert!(slider.nudge(0, 1));
    assert_eq!(slider.values().as_slice(), &[60.0]);

    let rest = slider.on_scroll(Vec2::new(3.0, -1.0));
    assert_eq!(rest, Vec2::new(3.0, 0.0));
    assert_eq!(slider.values().as_slice(), &[70.0]);

    slider.on_scroll(Vec2::new(0.0, 2.0));
    assert_eq!(slider.values().as_slice(), &[60.0]);

    assert!(slider.nudge(0, 100));
    assert_eq!(slider.values().as_slice(), &[100.0]);
    assert!(!slider.nudge(0, 1));

    let names: Vec<_> = events.borrow().iter().map(|e| e.0).collect();
    assert_eq!(names, vec!["change"; 4]);
}

#[test]
fn test_nudge_respects_neighbour() {
    let (callbacks, _) = recorder();
    let mut slider = unit_slider(
        SliderConfig::new(0.0, 100.0).value([20.0, 60.0]).step(10.0),
        callbacks,
    );

    assert!(slider.nudge(0, 10));
    assert_eq!(slider.values().as_slice(), &[50.0, 60.0]);
    assert!(!slider.nudge(1, -3));

    // wheel is left to the parent on range sliders
    assert_eq!(slider.on_scroll(Vec2::new(0.0, -1.0)), Vec2::new(0.0, -1.0));
}

#[test]
fn test_try_new_rejects_bad_config() {
    let err = Slider::try_new(SliderConfig::new(10.0, 0.0), SliderCallbacks::new())
        .err()
        .expect("inverted range");
    assert_eq!(err, ConfigError::EmptyRange { min: 10.0, max: 0.0 });
    assert_eq!(
        err.to_string(),
        "minimum value 10 must be below maximum value 0"
    );

    // the lenient constructor still works and pins the thumb
    let slider = Slider::new(SliderConfig::new(10.0, 0.0).value(5.0), SliderCallbacks::new());
    assert_eq!(slider.values().as_slice(), &[10.0]);
}

#[test]
fn test_render_state_snapshot() {
    let (callbacks, _) = recorder();
    let mut slider = unit_slider(SliderConfig::new(0.0, 100.0).value([20.0, 80.0]), callbacks);

    let at = thumb_center(&slider, 1);
    assert!(slider.should_claim(at));
    slider.grant(at);

    let s = slider.render_state();
    insta::assert_snapshot!(
        format!(
            "values={:?} offsets={:?} fill={:.1}+{:.1} active={} sliding={} measured={}",
            s.values.as_slice(),
            s.thumb_offsets.as_slice(),
            s.fill.left,
            s.fill.width,
            s.active_thumb,
            s.status.sliding,
            s.status.all_measured,
        ),
        @"values=[20.0, 80.0] offsets=[20.0, 80.0] fill=30.0+60.0 active=1 sliding=true measured=true"
    );
}

#[test]
fn test_provided_state_nests() {
    let (callbacks, _) = recorder();
    let outer = unit_slider(SliderConfig::new(0.0, 100.0).value(10.0), callbacks);
    let (callbacks, _) = recorder();
    let inner = unit_slider(SliderConfig::new(0.0, 100.0).value([5.0, 95.0]), callbacks);

    let seen = provide_slider_state(outer.render_state(), || {
        let nested = provide_slider_state(inner.render_state(), || {
            slider_state().map(|s| s.values.len())
        });
        (nested, slider_state().map(|s| s.values.len()))
    });
    assert_eq!(seen, (Some(2), Some(1)));
    assert!(slider_state().is_none());
}

#[test]
fn test_disabling_mid_drag_frees_the_slider() {
    let (callbacks, events) = recorder();
    let config = SliderConfig::new(0.0, 100.0)
        .value(50.0)
        .step(10.0)
        .thumb_touch_size(Size::square(20.0));
    let mut slider = unit_slider(config.clone(), callbacks);

    let at = thumb_center(&slider, 0);
    assert!(slider.should_claim(at));
    slider.grant(at);
    slider.set_config(config.clone().disabled(true));
    assert!(!slider.is_sliding());
    slider.released(Vec2::new(10.0, 0.0));
    assert_eq!(slider.values().as_slice(), &[50.0]);

    slider.set_config(config.disabled(false));
    assert!(slider.should_claim(at));
    slider.grant(at);
    slider.released(Vec2::new(10.0, 0.0));
    assert_eq!(slider.values().as_slice(), &[60.0]);

    let names: Vec<_> = events.borrow().iter().map(|e| e.0).collect();
    assert_eq!(names, vec!["start", "start", "change", "complete"]);
}

#[test]
fn test_spring_update_glides_into_place() {
    let t0 = Instant::now();
    set_clock(Box::new(TestClock { t: t0 }));

    let (callbacks, _) = recorder();
    let config = SliderConfig::new(0.0, 100.0)
        .value(0.0)
        .animate_transitions(true)
        .animation(AnimationType::Spring, linear(500));
    let mut slider = unit_slider(config.clone(), callbacks);
    slider.set_config(config.value(100.0));

    set_clock(Box::new(TestClock {
        t: t0 + Duration::from_millis(495),
    }));
    assert!(slider.tick());
    let near_end = slider.thumb_offsets()[0];
    assert!((near_end - 100.0).abs() < 1.0, "offset {near_end} at 495ms");

    set_clock(Box::new(TestClock {
        t: t0 + Duration::from_millis(500),
    }));
    assert!(!slider.tick());
    assert_eq!(slider.thumb_offsets().as_slice(), &[100.0]);
}

#[test]
fn test_touching_range_values_are_pulled_apart() {
    let config = SliderConfig::new(0.0, 100.0).value([50.0, 50.0]).step(10.0);
    let err = Slider::try_new(config.clone(), SliderCallbacks::new())
        .err()
        .expect("thumbs on top of each other");
    assert_eq!(
        err,
        ConfigError::ThumbsTooClose {
            first: 50.0,
            second: 50.0,
            buffer: 10.0
        }
    );

    let (callbacks, _) = recorder();
    let mut slider = unit_slider(config.clone(), callbacks);
    assert_eq!(slider.values().as_slice(), &[50.0, 60.0]);

    slider.set_config(config.value([100.0, 100.0]));
    assert_eq!(slider.values().as_slice(), &[90.0, 100.0]);
}
