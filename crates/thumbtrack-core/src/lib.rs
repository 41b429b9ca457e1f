//! # thumbtrack-core
//!
//! Leaf utilities shared by the slider engine:
//!
//! - `geometry`: `Vec2`, `Size`, `Rect` (hit rectangles) and `Insets`.
//! - `values`: normalization of configured values, index-wise
//!   reconciliation of animated thumbs, nearest-thumb selection.
//! - `animation`: a clock-driven tween/spring engine and `AnimationHandle`.
//! - `signal`: a tiny observable used for measurement notifications.
//! - `direction`: LTR/RTL and the single `mirror` used for ratio flips.
//!
//! ```rust
//! use thumbtrack_core::*;
//!
//! let values = normalize(ValueRange::new(0.0, 100.0), &RawValue::from([-5.0, 140.0]));
//! assert_eq!(values.as_slice(), &[0.0, 100.0]);
//!
//! let rect = Rect::new(20.0, 0.0, 40.0, 40.0);
//! assert!(rect.contains_point(50.0, 10.0));
//! assert_eq!(rect.distance_to_point_on_axis(50.0), 10.0);
//! ```

pub mod animation;
pub mod direction;
pub mod geometry;
pub mod signal;
pub mod values;

pub use animation::{AnimationHandle, AnimationSpec, Easing, Transition};
pub use direction::*;
pub use geometry::*;
pub use signal::*;
pub use values::*;
