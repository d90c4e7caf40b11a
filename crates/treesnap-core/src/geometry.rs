//! Pixel and grid coordinate types.
//!
//! Everything the layout engine emits is integral: focus positions live on an
//! integer grid, and sprite tiles are blitted at integer pixel offsets. These
//! types keep the two spaces apart.

use std::ops::{Add, Sub};

use serde::Deserialize;

/// A position in pixel space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub struct Point {
    x: i32,
    y: i32,
}

impl Point {
    /// Create a new point.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the x coordinate.
    pub fn x(self) -> i32 {
        self.x
    }

    /// Returns the y coordinate.
    pub fn y(self) -> i32 {
        self.y
    }

    /// Returns a copy of this point moved by the given deltas.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Returns a copy of this point with a different x coordinate.
    pub fn with_x(self, x: i32) -> Self {
        Self { x, ..self }
    }

    /// Returns a copy of this point with a different y coordinate.
    pub fn with_y(self, y: i32) -> Self {
        Self { y, ..self }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
pub struct Size {
    width: i32,
    height: i32,
}

impl Size {
    /// Create a new size.
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Returns the width.
    pub fn width(self) -> i32 {
        self.width
    }

    /// Returns the height.
    pub fn height(self) -> i32 {
        self.height
    }

    /// Returns `true` if either dimension is zero or negative.
    pub fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Returns a copy of this size with a different height.
    pub fn with_height(self, height: i32) -> Self {
        Self { height, ..self }
    }

    /// Returns half of this size as a point offset, rounding toward zero.
    pub fn half(self) -> Point {
        Point::new(self.width / 2, self.height / 2)
    }
}

/// A cell on the focus grid.
///
/// Grid coordinates are unit-less: one step in `x` is one focus column, one
/// step in `y` is one focus row. Rows grow downward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPoint {
    x: i32,
    y: i32,
}

impl GridPoint {
    /// Create a new grid point.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the column.
    pub fn x(self) -> i32 {
        self.x
    }

    /// Returns the row.
    pub fn y(self) -> i32 {
        self.y
    }

    /// Converts this grid cell to pixel space given the cell pitch and the
    /// pixel position of the grid origin.
    pub fn to_pixels(self, pitch: Point, origin: Point) -> Point {
        Point::new(self.x * pitch.x() + origin.x(), self.y * pitch.y() + origin.y())
    }
}

impl Add for GridPoint {
    type Output = GridPoint;

    fn add(self, other: GridPoint) -> GridPoint {
        GridPoint::new(self.x + other.x, self.y + other.y)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_point_offset_and_add() {
        let p = Point::new(10, 20).offset(5, -5);
        assert_eq!(p, Point::new(15, 15));
        assert_eq!(p + Point::new(1, 1), Point::new(16, 16));
        assert_eq!(p - Point::new(15, 15), Point::default());
    }

    #[test]
    fn test_size_is_empty() {
        assert!(Size::new(0, 10).is_empty());
        assert!(Size::new(10, -1).is_empty());
        assert!(!Size::new(1, 1).is_empty());
    }

    #[test]
    fn test_grid_to_pixels() {
        let cell = GridPoint::new(3, 2);
        let pixels = cell.to_pixels(Point::new(96, 130), Point::new(131, 63));
        assert_eq!(pixels, Point::new(3 * 96 + 131, 2 * 130 + 63));
    }

    fn check_grid_add_is_commutative(a: GridPoint, b: GridPoint) -> Result<(), TestCaseError> {
        prop_assert_eq!(a + b, b + a);
        Ok(())
    }

    fn grid_strategy() -> impl Strategy<Value = GridPoint> {
        (-1000i32..1000, -1000i32..1000).prop_map(|(x, y)| GridPoint::new(x, y))
    }

    proptest! {
        #[test]
        fn grid_add_is_commutative(a in grid_strategy(), b in grid_strategy()) {
            check_grid_add_is_commutative(a, b)?;
        }
    }
}
