//! Provider-style access to a slider's render state.
//!
//! Visual leaves (thumb, track, labels) are composed inside
//! [`provide_slider_state`] and read the frame's state with
//! [`slider_state`] instead of having it threaded through every call:
//!
//! ```rust
//! use thumbtrack::*;
//!
//! let slider = Slider::new(SliderConfig::new(0.0, 1.0).value(0.5), SliderCallbacks::new());
//! let thumbs = provide_slider_state(slider.render_state(), || {
//!     slider_state().map(|s| s.thumb_offsets.len())
//! });
//! assert_eq!(thumbs, Some(1));
//! assert!(slider_state().is_none());
//! ```

use std::cell::RefCell;

use crate::slider::SliderRenderState;

thread_local! {
    static STATE_STACK: RefCell<Vec<SliderRenderState>> = const { RefCell::new(Vec::new()) };
}

pub fn provide_slider_state<R>(state: SliderRenderState, f: impl FnOnce() -> R) -> R {
    // pops on unwind too
    struct Guard;
    impl Drop for Guard {
        fn drop(&mut self) {
            STATE_STACK.with(|st| {
                st.borrow_mut().pop();
            });
        }
    }
    STATE_STACK.with(|st| st.borrow_mut().push(state));
    let _guard = Guard;
    f()
}

/// The innermost provided state, if any.
pub fn slider_state() -> Option<SliderRenderState> {
    STATE_STACK.with(|st| st.borrow().last().cloned())
}
