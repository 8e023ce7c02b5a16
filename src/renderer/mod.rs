//! Rendering module
//!
//! `shapes` describes the scene as plain data; `canvas` paints it onto a
//! browser 2D canvas context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod shapes;

pub use shapes::{Color, Decal, DrawKind, Drawable, build_scene};
