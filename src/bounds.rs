use crate::error::VoronoiError;

/// Bounding box ID for the left side, it is negative to prevent conflicts with site IDs.
pub const BOX_ID_LEFT: i32 = -1;
/// Bounding box ID for the right side, it is negative to prevent conflicts with site IDs.
pub const BOX_ID_RIGHT: i32 = -2;
/// Bounding box ID for the bottom side, it is negative to prevent conflicts with site IDs.
pub const BOX_ID_BOTTOM: i32 = -3;
/// Bounding box ID for the top side, it is negative to prevent conflicts with site IDs.
pub const BOX_ID_TOP: i32 = -4;

/// Axis-aligned rectangle, used both as the internal clipping frame of the
/// tessellation and as the window of the containment filter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl BoundingBox {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        Self { min, max }
    }

    /// Validated constructor for containment windows: `min` must lie
    /// strictly below `max` on both axes.
    pub fn window(min: [f64; 2], max: [f64; 2]) -> Result<Self, VoronoiError> {
        let window = Self { min, max };
        window.validate()?;
        Ok(window)
    }

    pub fn validate(&self) -> Result<(), VoronoiError> {
        if self.min[0] < self.max[0] && self.min[1] < self.max[1] {
            Ok(())
        } else {
            Err(VoronoiError::EmptyWindow {
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Calculates the ID for a bounding box side based on the axis and direction.
///
/// The IDs start at -1 and decrease.
/// - Axis 0 (X) Min: -1
/// - Axis 0 (X) Max: -2
/// - Axis 1 (Y) Min: -3
/// - Axis 1 (Y) Max: -4
pub fn box_side(axis: usize, is_max: bool) -> i32 {
    -1 - (axis * 2 + if is_max { 1 } else { 0 }) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_side_ids() {
        assert_eq!(box_side(0, false), BOX_ID_LEFT);
        assert_eq!(box_side(0, true), BOX_ID_RIGHT);
        assert_eq!(box_side(1, false), BOX_ID_BOTTOM);
        assert_eq!(box_side(1, true), BOX_ID_TOP);
    }

    #[test]
    fn test_window_validation() {
        assert!(BoundingBox::window([0.0, 0.0], [1.0, 1.0]).is_ok());

        let flat = BoundingBox::window([0.0, 1.0], [1.0, 1.0]);
        assert_eq!(
            flat,
            Err(VoronoiError::EmptyWindow {
                min: [0.0, 1.0],
                max: [1.0, 1.0],
            })
        );

        assert!(BoundingBox::window([2.0, 0.0], [1.0, 1.0]).is_err());
    }
}
