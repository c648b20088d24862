//! Render synchronization
//!
//! Turns simulation state into sprite instances once per frame. Drawing
//! itself belongs to the windowing/graphics layer.

pub mod frame;
pub mod instance;

pub use frame::{Frame, background_tiles, build_frame};
pub use instance::{Layer, SpriteInstance};
