//! Block footprint geometry
//!
//! A footprint is a block's rectangle on the horizontal plane. Both `center`
//! and `size` are stored as `Vec2` with `x` = world X and `y` = world Z, so
//! `size.x` is the width and `size.y` the depth.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Horizontal axis a level's block slides along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Z,
}

impl Axis {
    /// Even levels slide along X, odd levels along Z
    #[inline]
    pub fn for_level(level: u32) -> Self {
        if level.is_multiple_of(2) { Axis::X } else { Axis::Z }
    }

    /// Component of `v` along this axis
    #[inline]
    pub fn of(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Z => v.y,
        }
    }

    /// Mutable component of `v` along this axis
    #[inline]
    pub fn of_mut(self, v: &mut Vec2) -> &mut f32 {
        match self {
            Axis::X => &mut v.x,
            Axis::Z => &mut v.y,
        }
    }

    pub fn other(self) -> Self {
        match self {
            Axis::X => Axis::Z,
            Axis::Z => Axis::X,
        }
    }
}

/// One block's rectangular extent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    /// Center on the plane (x = X, y = Z)
    pub center: Vec2,
    /// Extent on the plane (x = width, y = depth)
    pub size: Vec2,
    /// Stack index; the base is level 0
    pub level: u32,
}

impl Footprint {
    pub fn new(center_x: f32, center_z: f32, width: f32, depth: f32, level: u32) -> Self {
        Self {
            center: Vec2::new(center_x, center_z),
            size: Vec2::new(width, depth),
            level,
        }
    }

    /// Square base block centered at the origin
    pub fn base(size: f32) -> Self {
        Self::new(0.0, 0.0, size, size, 0)
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.center.x
    }

    #[inline]
    pub fn center_z(&self) -> f32 {
        self.center.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn depth(&self) -> f32 {
        self.size.y
    }

    /// (min, max) extent along `axis`
    pub fn span(&self, axis: Axis) -> (f32, f32) {
        let c = axis.of(self.center);
        let half = axis.of(self.size) / 2.0;
        (c - half, c + half)
    }
}
