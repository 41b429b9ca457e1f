//! # thumbtrack
//!
//! A multi-thumb slider engine. It owns no pixels: the host reports layout
//! sizes and touch events, and reads back thumb offsets, the track fill and
//! hit-area overflow for its own visual leaves.
//!
//! Pieces, leaf-first:
//!
//! - [`store::ValueStore`]: one settled-or-animating quantity per thumb.
//! - [`measure::MeasurementTracker`]: container/track/thumb sizes and the
//!   "all measured" flag.
//! - [`track`]: value ↔ pixel mapping, step snapping, hit rectangles.
//! - [`gesture::GestureController`]: claim/grant/move/release state machine.
//! - [`slider::Slider`]: the façade hosts talk to.
//!
//! Everything runs synchronously on the UI thread. Animations advance only
//! when the host calls [`Slider::tick`].
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use thumbtrack::*;
//! use thumbtrack_core::{Size, Vec2};
//!
//! let changes = Rc::new(RefCell::new(Vec::new()));
//! let callbacks = SliderCallbacks::new().on_value_change({
//!     let changes = changes.clone();
//!     move |values, _active| changes.borrow_mut().push(values.to_vec())
//! });
//!
//! let mut range = Slider::new(
//!     SliderConfig::new(0.0, 100.0).value([20.0, 80.0]).step(10.0),
//!     callbacks,
//! );
//! range.on_container_layout(Size::new(120.0, 40.0));
//! range.on_thumb_layout(Size::square(20.0));
//!
//! // tap the track between the thumbs, closer to the upper one: it seeks on release
//! let tap = Vec2::new(72.0, 20.0);
//! assert!(range.should_claim(tap));
//! range.grant(tap);
//! range.released(Vec2::ZERO);
//! assert_eq!(changes.borrow().last().unwrap(), &vec![20.0, 50.0]);
//! ```

pub mod config;
pub mod error;
pub mod gesture;
pub mod measure;
pub mod provider;
pub mod slider;
pub mod store;
pub mod track;

#[cfg(test)]
mod tests;

pub use config::*;
pub use error::ConfigError;
pub use gesture::{Claim, GestureController};
pub use measure::{Geometry, MeasurementTracker};
pub use provider::{provide_slider_state, slider_state};
pub use slider::{Slider, SliderRenderState, SliderStatus, TrackFill};
pub use store::ValueStore;
pub use track::TouchOverflow;
