//=========================================================================
// Vec2
//
// Minimal two-component vector used for deltas, speeds, positions and
// viewport sizes. Deliberately tiny: the runtime needs component access,
// uniform scaling and a magnitude, nothing more.
//
//=========================================================================

//=== Vec2 ================================================================

/// Two-component `f64` vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Creates a vector from components.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean magnitude.
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Component-wise uniform scale.
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Returns `true` when both components are exactly zero.
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

//--- Operators -----------------------------------------------------------

impl std::ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_of_axis_vectors() {
        assert_eq!(Vec2::new(3.0, 4.0).length(), 5.0);
        assert_eq!(Vec2::ZERO.length(), 0.0);
    }

    #[test]
    fn scale_is_component_wise() {
        let v = Vec2::new(2.0, -3.0).scale(0.5);
        assert_eq!(v, Vec2::new(1.0, -1.5));
    }

    #[test]
    fn is_zero_requires_both_components() {
        assert!(Vec2::ZERO.is_zero());
        assert!(!Vec2::new(0.0, 0.1).is_zero());
    }

    #[test]
    fn add_sub_roundtrip() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(-4.0, 0.5);
        assert_eq!((a + b) - b, a);
    }
}
