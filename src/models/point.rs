//! Profit-bearing locations.

use serde::{Deserialize, Serialize};

/// A location in an orienteering instance.
///
/// Points carry planar coordinates and the profit collected by the first
/// (and only) car that visits them. Depots carry zero profit.
///
/// # Examples
///
/// ```
/// use u_orienteering::models::Point;
///
/// let p = Point::new(41.0, 49.0, 10.0);
/// assert_eq!(p.profit(), 10.0);
///
/// let depot = Point::depot(35.0, 35.0);
/// assert_eq!(depot.profit(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f64,
    y: f64,
    profit: f64,
}

impl Point {
    /// Creates a point with the given coordinates and profit.
    pub fn new(x: f64, y: f64, profit: f64) -> Self {
        Self { x, y, profit }
    }

    /// Creates a zero-profit depot at the given coordinates.
    pub fn depot(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0)
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Profit collected when this point is visited.
    pub fn profit(&self) -> f64 {
        self.profit
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}
