//! Placement geometry
//!
//! Deciding whether a dropped block lands on the one below, and what is left
//! of it when it does. Overlap is a 1-D interval intersection along the
//! level's axis; the other axis never changes while a block moves.

use super::footprint::{Axis, Footprint};

/// Result of dropping a moving block onto the previous one
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Within tolerance: aligned exactly with the block below, no shrink
    Snap(Footprint),
    /// Partial overlap: trimmed to the intersection
    Crop(Footprint),
    /// No overlap along the axis
    Miss,
}

impl Placement {
    /// The footprint to push, if the block landed
    pub fn footprint(&self) -> Option<Footprint> {
        match self {
            Placement::Snap(fp) | Placement::Crop(fp) => Some(*fp),
            Placement::Miss => None,
        }
    }
}

/// Signed misalignment of `moving` relative to `previous` along `axis`
#[inline]
pub fn misalignment(previous: &Footprint, moving: &Footprint, axis: Axis) -> f32 {
    axis.of(moving.center) - axis.of(previous.center)
}

/// Length of the shared interval along `axis` for a given misalignment.
/// Zero or negative means the blocks do not touch.
#[inline]
pub fn overlap(previous: &Footprint, delta: f32, axis: Axis) -> f32 {
    axis.of(previous.size) - delta.abs()
}

/// Resolve a drop of `moving` onto `previous`
///
/// The tolerance band is inclusive: `|delta| == tolerance` still snaps.
/// A crop centers the block on the midpoint of the overlapping interval,
/// `previous + delta / 2`, for either sign of `delta`.
pub fn resolve_placement(
    previous: &Footprint,
    moving: &Footprint,
    axis: Axis,
    tolerance: f32,
) -> Placement {
    let delta = misalignment(previous, moving, axis);
    let overlap = overlap(previous, delta, axis);

    if overlap <= 0.0 {
        return Placement::Miss;
    }

    let mut placed = *moving;

    if delta.abs() <= tolerance {
        *axis.of_mut(&mut placed.center) = axis.of(previous.center);
        *axis.of_mut(&mut placed.size) = axis.of(previous.size);
        Placement::Snap(placed)
    } else {
        *axis.of_mut(&mut placed.center) = axis.of(previous.center) + delta / 2.0;
        *axis.of_mut(&mut placed.size) = overlap;
        Placement::Crop(placed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moving_at(x: f32, level: u32) -> Footprint {
        Footprint::new(x, 0.0, 80.0, 80.0, level)
    }

    #[test]
    fn test_small_offset_snaps() {
        let base = Footprint::base(80.0);
        let result = resolve_placement(&base, &moving_at(5.0, 1), Axis::X, 8.0);
        assert_eq!(result, Placement::Snap(Footprint::new(0.0, 0.0, 80.0, 80.0, 1)));
    }

    #[test]
    fn test_tolerance_boundary_is_inclusive() {
        let base = Footprint::base(80.0);
        let result = resolve_placement(&base, &moving_at(-8.0, 1), Axis::X, 8.0);
        assert!(matches!(result, Placement::Snap(_)));
    }

    #[test]
    fn test_crop_to_overlap_midpoint() {
        let base = Footprint::base(80.0);
        let result = resolve_placement(&base, &moving_at(30.0, 1), Axis::X, 8.0);
        let Placement::Crop(fp) = result else {
            panic!("expected crop, got {:?}", result);
        };
        assert_eq!(fp.width(), 50.0);
        assert_eq!(fp.center_x(), 15.0);
        // Untouched axis
        assert_eq!(fp.depth(), 80.0);
        assert_eq!(fp.center_z(), 0.0);
        assert_eq!(fp.level, 1);
    }

    #[test]
    fn test_negative_offset_crops_on_the_other_side() {
        let base = Footprint::base(80.0);
        let fp = resolve_placement(&base, &moving_at(-30.0, 1), Axis::X, 8.0)
            .footprint()
            .unwrap();
        assert_eq!(fp.width(), 50.0);
        assert_eq!(fp.center_x(), -15.0);
    }

    #[test]
    fn test_no_overlap_misses() {
        let base = Footprint::base(80.0);
        assert_eq!(
            resolve_placement(&base, &moving_at(-90.0, 1), Axis::X, 8.0),
            Placement::Miss
        );
        // Touching edges share nothing
        assert_eq!(
            resolve_placement(&base, &moving_at(80.0, 1), Axis::X, 8.0),
            Placement::Miss
        );
    }

    #[test]
    fn test_z_axis_uses_depth() {
        let prev = Footprint::new(12.0, 4.0, 30.0, 60.0, 2);
        let moving = Footprint::new(12.0, 24.0, 30.0, 60.0, 3);
        let fp = resolve_placement(&prev, &moving, Axis::Z, 3.0).footprint().unwrap();
        assert_eq!(fp.depth(), 40.0);
        assert_eq!(fp.center_z(), 14.0);
        assert_eq!(fp.width(), 30.0);
        assert_eq!(fp.center_x(), 12.0);
    }
}
