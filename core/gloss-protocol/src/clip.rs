use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

pub const DEFAULT_FRAME_RATE: f32 = 30.0;
pub const MAX_FRAME_RATE: f32 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
    /// Zero for 2D landmarks.
    pub z: f32,
}

impl Point {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Ordered landmarks of one body part (pose, left hand, face, ...).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct LandmarkGroup {
    pub name: String,
    pub points: Vec<Point>,
}

/// One motion frame. Opaque to the scheduler, interpreted by the renderer.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Frame {
    pub groups: Vec<LandmarkGroup>,
}

impl Frame {
    pub fn point_count(&self) -> usize {
        self.groups.iter().map(|g| g.points.len()).sum()
    }
}

/// Recorded motion for one gloss.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Clip {
    pub gloss: String,
    pub frames: Vec<Frame>,
    pub frame_rate: f32,
}

impl Clip {
    pub fn new(gloss: String, frames: Vec<Frame>, frame_rate: f32) -> Self {
        Self {
            gloss,
            frames,
            frame_rate: clamp_frame_rate(frame_rate),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

/// Non-finite or non-positive rates fall back to the default; others clamp to 1..=120.
pub fn clamp_frame_rate(rate: f32) -> f32 {
    if !rate.is_finite() || rate <= 0.0 {
        return DEFAULT_FRAME_RATE;
    }
    rate.clamp(1.0, MAX_FRAME_RATE)
}
