use crate::math::Point2;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point2,
    /// Maximum corner of the bounding box.
    pub max: Point2,
}

impl Aabb {
    /// Returns the smallest box containing all the given points, or `None`
    /// for an empty iterator.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point2>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut aabb = Self {
            min: *first,
            max: *first,
        };
        for p in iter {
            aabb.min.x = aabb.min.x.min(p.x);
            aabb.min.y = aabb.min.y.min(p.y);
            aabb.max.x = aabb.max.x.max(p.x);
            aabb.max.y = aabb.max.y.max(p.y);
        }
        Some(aabb)
    }

    /// Returns the smallest box containing both boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: Point2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Returns whether the boxes overlap once both are grown by `margin`.
    #[must_use]
    pub fn overlaps(&self, other: &Self, margin: f64) -> bool {
        self.min.x <= other.max.x + margin
            && other.min.x <= self.max.x + margin
            && self.min.y <= other.max.y + margin
            && other.min.y <= self.max.y + margin
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn from_points_spans_extremes() {
        let pts = [Point2::new(1.0, 5.0), Point2::new(-2.0, 3.0), Point2::new(4.0, -1.0)];
        let aabb = Aabb::from_points(&pts).unwrap();
        assert_eq!(aabb.min, Point2::new(-2.0, -1.0));
        assert_eq!(aabb.max, Point2::new(4.0, 5.0));
    }

    #[test]
    fn from_no_points_is_none() {
        assert!(Aabb::from_points(&[]).is_none());
    }

    #[test]
    fn touching_boxes_overlap() {
        let a = Aabb::from_points(&[Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)]).unwrap();
        let b = Aabb::from_points(&[Point2::new(1.0, 0.0), Point2::new(2.0, 1.0)]).unwrap();
        let c = Aabb::from_points(&[Point2::new(1.5, 0.0), Point2::new(2.0, 1.0)]).unwrap();
        assert!(a.overlaps(&b, 0.0));
        assert!(!a.overlaps(&c, 0.0));
        assert!(a.overlaps(&c, 0.5));
    }
}
