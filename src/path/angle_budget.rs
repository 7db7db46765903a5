use super::direction::Direction;

/// Cumulative turning still allowed while carving one chunk, in degrees.
///
/// `left` is never positive in a fresh budget and `right` never negative;
/// each step shifts both by the signed angle between the new and the old
/// tangent, so turning right eats into `right` and frees up `left`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleBudget {
    pub left: f32,
    pub right: f32,
}

impl AngleBudget {
    pub fn new(left: f32, right: f32) -> Self {
        Self { left, right }
    }

    /// Budget for a path entering a chunk heading `direction`.
    ///
    /// East- and westbound paths may only turn north, so they cannot run back
    /// along the border they just crossed.
    pub fn for_entry(direction: Direction) -> Self {
        match direction {
            Direction::North => Self::new(-90.0, 90.0),
            Direction::NorthEast | Direction::NorthWest => Self::new(-45.0, 45.0),
            Direction::East => Self::new(-90.0, 0.0),
            Direction::West => Self::new(0.0, 90.0),
            other => {
                log::warn!(
                    "AngleBudget: unexpected entry direction {:?}, using the full half-plane",
                    other
                );
                Self::new(-90.0, 90.0)
            }
        }
    }

    /// Shift both limits by `angle` degrees.
    pub fn turned(self, angle: f32) -> Self {
        Self::new(self.left + angle, self.right + angle)
    }

    /// Limits usable for a single step: left in `[-max_tilt, 0]`, right in `[0, max_tilt]`.
    pub fn clamped(self, max_tilt: f32) -> Self {
        Self::new(self.left.clamp(-max_tilt, 0.0), self.right.clamp(0.0, max_tilt))
    }

    pub fn span(&self) -> f32 {
        self.left.abs() + self.right.abs()
    }
}
