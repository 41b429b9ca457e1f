use thumbtrack::*;
use thumbtrack_core::animation::{TestClock, set_clock};
use thumbtrack_core::{AnimationSpec, Easing, Size, Vec2};
use web_time::{Duration, Instant};

const FRAME: Duration = Duration::from_millis(16);

fn logging_callbacks(name: &'static str) -> SliderCallbacks {
    SliderCallbacks::new()
        .on_sliding_start(move |values, active| {
            log::info!("[{name}] start    thumb {active} {values:?}")
        })
        .on_value_change(move |values, active| {
            log::info!("[{name}] change   thumb {active} {values:?}")
        })
        .on_sliding_complete(move |values, active| {
            log::info!("[{name}] complete thumb {active} {values:?}")
        })
}

fn describe(slider: &Slider) -> String {
    let s = slider.render_state();
    format!(
        "values {:?} offsets {:?} fill {:.1}+{:.1} sliding {}",
        s.values.as_slice(),
        s.thumb_offsets.as_slice(),
        s.fill.left,
        s.fill.width,
        s.status.sliding
    )
}

/// Pan recognizers report cumulative deltas; replay one in fixed increments.
fn drag(slider: &mut Slider, from: Vec2, to_dx: f32, steps: u32) {
    if !slider.should_claim(from) {
        log::warn!("nothing to drag at {from:?}");
        return;
    }
    slider.grant(from);
    for i in 1..=steps {
        slider.moved(Vec2::new(to_dx * i as f32 / steps as f32, 0.0));
    }
    slider.released(Vec2::new(to_dx, 0.0));
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Starting drag trace");

    // frames advance a fixed clock so the trace is reproducible
    let mut t = Instant::now();
    set_clock(Box::new(TestClock { t }));

    let config = SliderConfig::new(0.0, 100.0)
        .value([20.0, 80.0])
        .step(5.0)
        .animate_transitions(true)
        .animation(
            AnimationType::Timing,
            AnimationSpec::tween(Duration::from_millis(120), Easing::EaseInOut),
        );
    let mut range = Slider::try_new(config.clone(), logging_callbacks("range"))?;
    range.on_container_layout(Size::new(240.0, 40.0));
    range.on_track_layout(Size::new(240.0, 4.0));
    range.on_thumb_layout(Size::square(24.0));
    log::info!("laid out: {}", describe(&range));

    // drag the upper thumb far left: it stops one step above the lower one
    let upper = range.thumb_offsets()[1];
    let overflow = range.touch_overflow().insets();
    let grab = Vec2::new(overflow.horizontal + upper + 12.0, 20.0);
    drag(&mut range, grab, -200.0, 8);
    log::info!("after drag: {}", describe(&range));

    // tap the track near the right end
    let tap = Vec2::new(220.0, 20.0);
    if range.should_claim(tap) {
        range.grant(tap);
        range.released(Vec2::ZERO);
    }
    log::info!("after tap: {}", describe(&range));

    // external update, animated
    range.set_config(config.value([10.0, 60.0]));
    let mut frames = 0;
    loop {
        t += FRAME;
        set_clock(Box::new(TestClock { t }));
        frames += 1;
        let running = range.tick();
        log::debug!("frame {frames}: {}", describe(&range));
        if !running {
            break;
        }
    }
    log::info!("settled after {frames} frames: {}", describe(&range));

    let mut volume = Slider::try_new(
        SliderConfig::new(0.0, 1.0).value(0.5),
        logging_callbacks("volume"),
    )?;
    volume.on_container_layout(Size::new(200.0, 32.0));
    volume.on_thumb_layout(Size::square(20.0));
    for _ in 0..3 {
        volume.on_scroll(Vec2::new(0.0, -1.0));
    }
    log::info!("after wheel: {}", describe(&volume));

    Ok(())
}
