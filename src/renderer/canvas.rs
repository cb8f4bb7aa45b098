//! Canvas 2D backend

use glam::Vec2;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::shapes::{Camera, Face, tower_faces, tower_height};
use crate::sim::TowerState;

const BACKGROUND: &str = "#101522";

/// Draws the tower onto a `<canvas>`
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    pub camera: Camera,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;
        let size = Vec2::new(canvas.width() as f32, canvas.height() as f32);
        Ok(Self {
            canvas,
            ctx,
            camera: Camera::new(size),
        })
    }

    /// Re-fit the camera after the canvas is resized
    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        let lift = self.camera.lift;
        self.camera = Camera::new(Vec2::new(width as f32, height as f32));
        self.camera.lift = lift;
    }

    /// Keep the camera on the tower top after a restart
    pub fn reset_camera(&mut self, state: &TowerState) {
        self.camera.snap_to(tower_height(state));
    }

    pub fn render(&mut self, state: &TowerState, dt_ms: f32) {
        self.camera.follow(tower_height(state), dt_ms);

        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        self.ctx.set_fill_style_str(BACKGROUND);
        self.ctx.fill_rect(0.0, 0.0, w, h);

        for face in tower_faces(state, &self.camera) {
            self.fill_face(&face);
        }
    }

    fn fill_face(&self, face: &Face) {
        let [r, g, b, a] = face.color;
        let css = format!(
            "rgba({},{},{},{})",
            (r * 255.0).round() as u8,
            (g * 255.0).round() as u8,
            (b * 255.0).round() as u8,
            a
        );
        self.ctx.set_fill_style_str(&css);
        self.ctx.begin_path();
        let [first, rest @ ..] = face.points;
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.close_path();
        self.ctx.fill();
    }
}
