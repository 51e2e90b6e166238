pub mod arc_2d;
pub mod disjoint_sets;
pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Tolerances used by the clipping pipeline.
///
/// `distance` decides when two points are the same node and when a point
/// lies on a boundary. `angle` bounds parameter and angular comparisons on
/// arcs and the cross-product test for parallel segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub distance: f64,
    pub angle: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            distance: 1e-9,
            angle: TOLERANCE,
        }
    }
}

impl Tolerance {
    /// Returns a copy with the given distance tolerance.
    #[must_use]
    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = distance;
        self
    }

    /// Returns a copy with the given angular tolerance.
    #[must_use]
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Returns whether two points are within `distance` of each other.
    #[must_use]
    pub fn points_coincide(&self, a: &Point2, b: &Point2) -> bool {
        (a - b).norm_squared() <= self.distance * self.distance
    }
}
