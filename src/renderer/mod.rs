//! Tower rendering
//!
//! Reads simulation state once per frame and draws it; never writes back.
//! Geometry (isometric projection, face colors) is pure and platform-free;
//! the Canvas 2D backend only exists on wasm.

pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use shapes::{Camera, Face, tower_faces};
