//! Isometric block geometry
//!
//! World axes: X and Z on the ground plane, Y up. The view looks down from
//! the +X/+Z corner, so the visible faces of a block are its top, its +X
//! side and its +Z side.

use glam::{Vec2, Vec3};

use crate::sim::{Axis, Footprint, TowerState};

/// cos(30°), sin(30°) for the classic 2:1 isometric view
const ISO_COS: f32 = 0.866_025_4;
const ISO_SIN: f32 = 0.5;

/// World units visible across the viewport
const VIEW_WIDTH: f32 = 420.0;
/// Camera starts lifting once the tower is this tall
const FOLLOW_MARGIN: f32 = 64.0;
/// Camera easing time constant (ms)
const FOLLOW_MS: f32 = 180.0;

/// Base block color (#00a878)
const BASE_COLOR: [f32; 4] = [0.0, 0.659, 0.471, 1.0];
/// Hue of level 1 blocks; each level rotates it further
const BLOCK_HUE: f32 = 200.0;
const HUE_STEP: f32 = 12.0;

/// Per-face brightness (top, +X side, +Z side)
const SHADE_TOP: f32 = 1.0;
const SHADE_X: f32 = 0.8;
const SHADE_Z: f32 = 0.62;

/// A filled quad in screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    pub points: [Vec2; 4],
    pub color: [f32; 4],
}

/// Screen mapping that follows the top of the tower
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    /// Screen position of the world origin at zero lift
    pub origin: Vec2,
    /// Pixels per world unit
    pub scale: f32,
    /// World height currently scrolled out of view
    pub lift: f32,
}

impl Camera {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            origin: Vec2::new(viewport.x / 2.0, viewport.y * 0.7),
            scale: viewport.x / VIEW_WIDTH,
            lift: 0.0,
        }
    }

    /// World point to screen pixels
    #[inline]
    pub fn project(&self, p: Vec3) -> Vec2 {
        let iso = Vec2::new((p.x - p.z) * ISO_COS, (p.x + p.z) * ISO_SIN - (p.y - self.lift));
        self.origin + iso * self.scale
    }

    /// Ease toward keeping `top_height` in view
    pub fn follow(&mut self, top_height: f32, dt_ms: f32) {
        let target = (top_height - FOLLOW_MARGIN).max(0.0);
        let t = 1.0 - (-dt_ms.max(0.0) / FOLLOW_MS).exp();
        self.lift += (target - self.lift) * t;
    }

    /// Jump straight to the target (on restart)
    pub fn snap_to(&mut self, top_height: f32) {
        self.lift = (top_height - FOLLOW_MARGIN).max(0.0);
    }
}

/// Convert HSL (h in degrees, s/l in 0-1) to RGB
fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = h.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    [r + m, g + m, b + m]
}

/// Fill color of a block at `level`
pub fn level_color(level: u32) -> [f32; 4] {
    if level == 0 {
        return BASE_COLOR;
    }
    let [r, g, b] = hsl_to_rgb(BLOCK_HUE + level as f32 * HUE_STEP, 0.65, 0.6);
    [r, g, b, 1.0]
}

fn shade(color: [f32; 4], factor: f32) -> [f32; 4] {
    [color[0] * factor, color[1] * factor, color[2] * factor, color[3]]
}

/// Visible faces of one block, back to front
pub fn block_faces(fp: &Footprint, level_height: f32, camera: &Camera) -> [Face; 3] {
    let bottom = fp.level as f32 * level_height;
    let top = bottom + level_height;
    let (x0, x1) = fp.span(Axis::X);
    let (z0, z1) = fp.span(Axis::Z);
    let p = |x: f32, y: f32, z: f32| camera.project(Vec3::new(x, y, z));
    let color = level_color(fp.level);

    [
        Face {
            points: [p(x1, top, z0), p(x1, top, z1), p(x1, bottom, z1), p(x1, bottom, z0)],
            color: shade(color, SHADE_X),
        },
        Face {
            points: [p(x0, top, z1), p(x1, top, z1), p(x1, bottom, z1), p(x0, bottom, z1)],
            color: shade(color, SHADE_Z),
        },
        Face {
            points: [p(x0, top, z0), p(x1, top, z0), p(x1, top, z1), p(x0, top, z1)],
            color: shade(color, SHADE_TOP),
        },
    ]
}

/// All faces to draw for the current state, bottom block first
pub fn tower_faces(state: &TowerState, camera: &Camera) -> Vec<Face> {
    let level_height = state.config.level_height;
    let moving = state.moving.map(|b| b.footprint);
    let mut faces = Vec::with_capacity((state.stack.len() + 1) * 3);
    for fp in state.stack.iter().chain(moving.iter()) {
        faces.extend(block_faces(fp, level_height, camera));
    }
    faces
}

/// Height of the top of the highest block (placed or moving)
pub fn tower_height(state: &TowerState) -> f32 {
    let top_level = state.moving.map_or(state.previous().level, |b| b.footprint.level);
    (top_level + 1) as f32 * state.config.level_height
}
