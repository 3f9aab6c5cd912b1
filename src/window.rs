use crate::bisector::HalfPlane;
use crate::bounds::{BoundingBox, box_side};
use crate::cell::{Cell, CellScratch};
use crate::error::VoronoiError;
use rayon::prelude::*;

/// Whether a finished cell lies entirely inside `window`.
///
/// The cell's polygon is clipped against the window's four half-planes with
/// the same kernel that built it; containment holds iff the clip changes
/// nothing — equal vertex count and every vertex matching within `tolerance`.
/// A polygon that merely overlaps the window, or exits and re-enters it,
/// fails. Edges lying on the window boundary sit inside the tolerance band
/// and count as contained.
///
/// Expects the canonicalized cells produced by
/// [`Tessellation::calculate`](crate::Tessellation::calculate); the window is
/// assumed valid (see [`BoundingBox::window`]). The cell is not mutated.
pub fn is_fully_contained(cell: &Cell, window: &BoundingBox, tolerance: f64) -> bool {
    let mut clipped = cell.clone();
    let mut scratch = CellScratch::default();

    for (axis, is_max) in [(0, false), (0, true), (1, false), (1, true)] {
        let plane = side_plane(window, axis, is_max);
        clipped.clip(&plane, box_side(axis, is_max), tolerance, &mut scratch);
        if clipped.is_empty() {
            return false;
        }
    }
    clipped.canonicalize(tolerance);

    if clipped.vertex_count() != cell.vertex_count() {
        return false;
    }
    cell.vertices()
        .iter()
        .zip(clipped.vertices())
        .all(|(a, b)| (a - b).abs() <= tolerance)
}

/// Filters `cells` down to those fully inside `window`, preserving order.
///
/// Validates the window first: a min not strictly below max on both axes is
/// reported as [`VoronoiError::EmptyWindow`] before any cell is inspected.
pub fn fully_contained(
    cells: &[Cell],
    window: &BoundingBox,
    tolerance: f64,
) -> Result<Vec<Cell>, VoronoiError> {
    window.validate()?;
    Ok(cells
        .par_iter()
        .filter(|cell| is_fully_contained(cell, window, tolerance))
        .cloned()
        .collect())
}

/// Half-plane keeping the window-interior side of one window edge.
fn side_plane(window: &BoundingBox, axis: usize, is_max: bool) -> HalfPlane {
    let mut point = window.min;
    let mut normal = [0.0, 0.0];
    if is_max {
        point = window.max;
        normal[axis] = 1.0;
    } else {
        normal[axis] = -1.0;
    }
    HalfPlane { point, normal }
}
