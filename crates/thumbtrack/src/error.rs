use thiserror::Error;

/// Configuration problems found by `SliderConfig::validate`.
///
/// The engine never refuses to run with these; the math clamps and the thumb
/// ends up pinned at an extreme instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("range bounds must be finite (min = {min}, max = {max})")]
    NonFiniteRange { min: f32, max: f32 },
    #[error("minimum value {min} must be below maximum value {max}")]
    EmptyRange { min: f32, max: f32 },
    #[error("step must be a finite, non-negative number (got {step})")]
    InvalidStep { step: f32 },
    #[error("step {step} is larger than the range span {span}")]
    StepExceedsRange { step: f32, span: f32 },
    #[error("a slider carries one or two values, got {count}")]
    ThumbCount { count: usize },
    #[error("range values out of order: {first} > {second}")]
    Unordered { first: f32, second: f32 },
    #[error("range values {first} and {second} are closer than the minimum gap {buffer}")]
    ThumbsTooClose { first: f32, second: f32, buffer: f32 },
}
