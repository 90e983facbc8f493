#![no_std] // Shared with the wasm façade

extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(feature = "std")]
extern crate std;

pub mod category;
pub mod clip;
pub mod ids;
pub mod isl;
pub mod model;
pub mod token;

// Re-export core types for convenience
pub use category::{CategoryFlags, SemanticCategory};
pub use clip::{clamp_frame_rate, Clip, Frame, LandmarkGroup, Point, DEFAULT_FRAME_RATE, MAX_FRAME_RATE};
pub use ids::{GlossId, SessionId};
pub use model::*;
pub use token::{word_count, MatchSource, Resolution, Span, Token, TokenKind};
