//! Concrete, validated problem instance.

use super::{OrienteeringProblem, Point};
use crate::distance::DistanceMatrix;
use crate::error::InstanceError;

const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// An immutable Team Orienteering Problem instance.
///
/// The first point is the start depot and the last point the end depot.
/// Construction validates every fact the heuristic relies on, so solver code
/// never has to re-check distances or profits.
///
/// # Examples
///
/// ```
/// use u_orienteering::models::{Instance, OrienteeringProblem, Point};
///
/// let instance = Instance::euclidean(
///     vec![
///         Point::depot(0.0, 0.0),
///         Point::new(5.0, 0.0, 3.0),
///         Point::depot(10.0, 0.0),
///     ],
///     1,
///     10.0,
/// )?;
/// assert_eq!(instance.point_count(), 3);
/// assert_eq!(instance.distance(0, 1), 5.0);
/// # Ok::<(), u_orienteering::InstanceError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    points: Vec<Point>,
    distances: DistanceMatrix,
    car_count: usize,
    max_time: f64,
}

impl Instance {
    /// Validates and constructs an instance from an explicit distance matrix.
    pub fn new(
        points: Vec<Point>,
        distances: DistanceMatrix,
        car_count: usize,
        max_time: f64,
    ) -> Result<Self, InstanceError> {
        if points.len() < 2 {
            return Err(InstanceError::TooFewPoints(points.len()));
        }
        if car_count == 0 {
            return Err(InstanceError::NoCars);
        }
        if !max_time.is_finite() || max_time <= 0.0 {
            return Err(InstanceError::InvalidBudget(max_time));
        }
        if distances.size() != points.len() {
            return Err(InstanceError::MatrixSizeMismatch {
                matrix: distances.size(),
                points: points.len(),
            });
        }
        distances.check(SYMMETRY_TOLERANCE)?;
        if let Some((point, p)) = points
            .iter()
            .enumerate()
            .find(|(_, p)| !p.profit().is_finite() || p.profit() < 0.0)
        {
            return Err(InstanceError::InvalidProfit {
                point,
                value: p.profit(),
            });
        }

        let depot_to_depot = distances.get(0, points.len() - 1);
        if depot_to_depot > max_time {
            return Err(InstanceError::DepotsTooFar {
                distance: depot_to_depot,
                max_time,
            });
        }

        Ok(Self {
            points,
            distances,
            car_count,
            max_time,
        })
    }

    /// Constructs an instance whose distances are Euclidean between points.
    pub fn euclidean(
        points: Vec<Point>,
        car_count: usize,
        max_time: f64,
    ) -> Result<Self, InstanceError> {
        let distances = DistanceMatrix::from_points(&points);
        Self::new(points, distances, car_count, max_time)
    }

    /// All points, depots included.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Sum of all customer profits; an upper bound on any solution's profit.
    pub fn total_profit(&self) -> f64 {
        self.points.iter().map(Point::profit).sum()
    }
}

impl OrienteeringProblem for Instance {
    fn point_count(&self) -> usize {
        self.points.len()
    }

    fn car_count(&self) -> usize {
        self.car_count
    }

    fn max_time(&self) -> f64 {
        self.max_time
    }

    fn profit(&self, point: usize) -> f64 {
        self.points[point].profit()
    }

    fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }
}
