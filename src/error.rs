use thiserror::Error;

/// Failure conditions of the tessellation and the containment filter.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VoronoiError {
    /// Two sites occupy the same position (within tolerance), so their
    /// power bisector is undefined. Both site indices are reported; only
    /// the cells of the two sites involved fail to build.
    #[error("sites {first} and {second} coincide at ({x}, {y})")]
    CoincidentSites {
        first: usize,
        second: usize,
        x: f64,
        y: f64,
    },

    /// A clipping window whose min does not lie strictly below its max on
    /// both axes encloses no area.
    #[error("window min {min:?} must lie strictly below max {max:?} on both axes")]
    EmptyWindow { min: [f64; 2], max: [f64; 2] },
}
