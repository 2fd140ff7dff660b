use core::ops::{Add, Mul, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2d {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2d {
    pub x: f64,
    pub y: f64,
}

impl Point2d {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dist2(self, rhs: Self) -> f64 {
        (self - rhs).dot(self - rhs)
    }
}

impl Vec2d {
    pub fn dot(self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y
    }

    pub fn cross(self, rhs: Self) -> f64 {
        self.x * rhs.y - self.y * rhs.x
    }

    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }
}

impl Add<Vec2d> for Point2d {
    type Output = Point2d;

    fn add(self, rhs: Vec2d) -> Self::Output {
        Point2d {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub<Point2d> for Point2d {
    type Output = Vec2d;

    fn sub(self, rhs: Point2d) -> Self::Output {
        Vec2d {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Add for Vec2d {
    type Output = Vec2d;

    fn add(self, rhs: Vec2d) -> Self::Output {
        Vec2d {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Vec2d {
    type Output = Vec2d;

    fn sub(self, rhs: Vec2d) -> Self::Output {
        Vec2d {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Mul<f64> for Vec2d {
    type Output = Vec2d;

    fn mul(self, rhs: f64) -> Self::Output {
        Vec2d {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

impl Mul<Vec2d> for f64 {
    type Output = Vec2d;

    fn mul(self, rhs: Vec2d) -> Self::Output {
        rhs * self
    }
}

#[cfg(test)]
mod tests {
    use super::{Point2d, Vec2d};

    #[test]
    fn vec_ops() {
        let a = Vec2d { x: 3.0, y: 4.0 };
        let b = Vec2d { x: 1.0, y: -2.0 };

        assert_eq!(a + b, Vec2d { x: 4.0, y: 2.0 });
        assert_eq!(a - b, Vec2d { x: 2.0, y: 6.0 });
        assert!((a.dot(b) + 5.0).abs() < 1e-12);
        assert!((a.cross(b) + 10.0).abs() < 1e-12);
        assert!((a.norm() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn point_vec_ops() {
        let p = Point2d::new(2.0, 3.0);
        let v = Vec2d { x: 0.5, y: -1.0 };

        assert_eq!(p + v, Point2d::new(2.5, 2.0));
        assert_eq!(p - Point2d::new(1.0, 1.0), Vec2d { x: 1.0, y: 2.0 });
        assert!((p.dist2(Point2d::new(2.0, 0.0)) - 9.0).abs() < 1e-12);
    }
}
