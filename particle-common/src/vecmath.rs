use serde::{Deserialize, Serialize};

/// A simple 3D vector used for particle positions and velocities.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vec3 { x, y, z }
    }

    pub fn zero() -> Self {
        Vec3 { x: 0.0, y: 0.0, z: 0.0 }
    }

    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Magnitude of the vector. For a velocity this is the particle speed.
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Componentwise minimum, used to grow bounding boxes.
    pub fn min(&self, other: Vec3) -> Self {
        Vec3 { x: self.x.min(other.x), y: self.y.min(other.y), z: self.z.min(other.z) }
    }

    /// Componentwise maximum.
    pub fn max(&self, other: Vec3) -> Self {
        Vec3 { x: self.x.max(other.x), y: self.y.max(other.y), z: self.z.max(other.z) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_of_pythagorean_triple() {
        let v = Vec3::new(2.0, 3.0, 6.0);
        assert_eq!(v.length_squared(), 49.0);
        assert_eq!(v.length(), 7.0);
    }

    #[test]
    fn componentwise_bounds() {
        let a = Vec3::new(1.0, -2.0, 5.0);
        let b = Vec3::new(-1.0, 4.0, 5.0);
        assert_eq!(a.min(b), Vec3::new(-1.0, -2.0, 5.0));
        assert_eq!(a.max(b), Vec3::new(1.0, 4.0, 5.0));
        assert_eq!(a.min(a), a);
    }
}
