//! Layout direction.
//!
//! Sliders read the ambient direction with [`text_direction`] unless their
//! configuration pins one. Override it for a subtree with
//! [`with_text_direction`]:
//!
//! ```rust
//! use thumbtrack_core::*;
//!
//! let dir = with_text_direction(TextDirection::Rtl, text_direction);
//! assert_eq!(dir, TextDirection::Rtl);
//! assert_eq!(text_direction(), TextDirection::Ltr);
//! ```

use std::cell::RefCell;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn is_rtl(self) -> bool {
        self == TextDirection::Rtl
    }
}

thread_local! {
    static DIRECTION_STACK: RefCell<Vec<TextDirection>> = const { RefCell::new(Vec::new()) };
}

pub fn with_text_direction<R>(dir: TextDirection, f: impl FnOnce() -> R) -> R {
    // pops on unwind too
    struct Guard;
    impl Drop for Guard {
        fn drop(&mut self) {
            DIRECTION_STACK.with(|st| {
                st.borrow_mut().pop();
            });
        }
    }
    DIRECTION_STACK.with(|st| st.borrow_mut().push(dir));
    let _guard = Guard;
    f()
}

pub fn text_direction() -> TextDirection {
    DIRECTION_STACK.with(|st| st.borrow().last().copied().unwrap_or_default())
}

/// Flips a track ratio for right-to-left layouts. Every value/pixel
/// conversion goes through here exactly once.
pub fn mirror(ratio: f32, rtl: bool) -> f32 {
    if rtl { 1.0 - ratio } else { ratio }
}
