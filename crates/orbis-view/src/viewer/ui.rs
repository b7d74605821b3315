use serde::{Deserialize, Serialize};

/// Pointer position in viewport pixels, origin at the top-left corner.
///
/// Arithmetic saturates at the `i32` range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point2 {
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: i32,
    pub y: i32,
}

/// Axis-aligned screen rectangle kept as the two corners it was spanned from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub from: Point2,
    pub to: Point2,
}

impl Point2 {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

impl Vec2 {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_zero(self) -> bool {
        self.x == 0 && self.y == 0
    }
}

impl Rect {
    pub const fn from_points(from: Point2, to: Point2) -> Self {
        Self { from, to }
    }
}

impl std::ops::Add<Vec2> for Point2 {
    type Output = Point2;

    fn add(self, rhs: Vec2) -> Point2 {
        self.offset(rhs.x, rhs.y)
    }
}

impl std::ops::Sub<Point2> for Point2 {
    type Output = Vec2;

    fn sub(self, rhs: Point2) -> Vec2 {
        Vec2::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

pub const fn pos2(x: i32, y: i32) -> Point2 {
    Point2::new(x, y)
}

pub const fn vec2(x: i32, y: i32) -> Vec2 {
    Vec2::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_saturates_at_the_coordinate_range() {
        assert_eq!(pos2(0, i32::MAX - 10).offset(0, 30), pos2(0, i32::MAX));
        assert_eq!(pos2(i32::MAX, 0) - pos2(i32::MIN, 0), vec2(i32::MAX, 0));
        assert_eq!(pos2(i32::MIN, 0) - pos2(i32::MAX, 0), vec2(i32::MIN, 0));
        assert_eq!(pos2(i32::MIN, 5) + vec2(-1, 0), pos2(i32::MIN, 5));
    }

    #[test]
    fn point_difference_is_displacement() {
        assert_eq!(pos2(50, 80) - pos2(10, 10), vec2(40, 70));
        assert!((pos2(3, 3) - pos2(3, 3)).is_zero());
    }
}
