use glam::Vec3;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point, or `None` for an empty slice
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<AABB> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(AABB::new(first, first), |acc, p| AABB {
            min: acc.min.min(p),
            max: acc.max.max(p),
        }))
    }

    pub fn union(&self, other: &AABB) -> AABB {
        AABB {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Radius of the bounding sphere around `center()`
    pub fn radius(&self) -> f32 {
        self.extent().length() * 0.5
    }
}
