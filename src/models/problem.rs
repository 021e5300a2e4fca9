//! Orienteering problem trait.

/// Defines a Team Orienteering Problem instance.
///
/// This trait provides the immutable facts the construction heuristic reads:
/// the points with their profits, the fleet size, the shared per-car time
/// budget, and pairwise distances. Index 0 is the start depot and index
/// `point_count() - 1` the end depot unless an implementation says otherwise.
///
/// # Examples
///
/// ```
/// use u_orienteering::models::OrienteeringProblem;
/// use u_orienteering::distance::DistanceMatrix;
///
/// struct Line {
///     profits: Vec<f64>,
///     distances: DistanceMatrix,
/// }
///
/// impl OrienteeringProblem for Line {
///     fn point_count(&self) -> usize { self.profits.len() }
///     fn car_count(&self) -> usize { 1 }
///     fn max_time(&self) -> f64 { 10.0 }
///     fn profit(&self, point: usize) -> f64 { self.profits[point] }
///     fn distance(&self, from: usize, to: usize) -> f64 {
///         self.distances.get(from, to)
///     }
/// }
///
/// let line = Line {
///     profits: vec![0.0, 3.0, 0.0],
///     distances: DistanceMatrix::from_data(3, vec![
///         0.0, 5.0, 10.0,
///         5.0, 0.0, 5.0,
///         10.0, 5.0, 0.0,
///     ]).unwrap(),
/// };
/// assert_eq!(line.start_depot(), 0);
/// assert_eq!(line.end_depot(), 2);
/// ```
pub trait OrienteeringProblem {
    /// Number of points, depots included.
    fn point_count(&self) -> usize;

    /// Number of cars in the fleet.
    fn car_count(&self) -> usize;

    /// Time budget shared by every car.
    fn max_time(&self) -> f64;

    /// Profit of `point`.
    fn profit(&self, point: usize) -> f64;

    /// Travel distance (and time) from `from` to `to`.
    fn distance(&self, from: usize, to: usize) -> f64;

    /// Index of the start depot.
    fn start_depot(&self) -> usize {
        0
    }

    /// Index of the end depot.
    fn end_depot(&self) -> usize {
        self.point_count().saturating_sub(1)
    }

    /// Returns `true` if `point` is one of the two depots.
    fn is_depot(&self, point: usize) -> bool {
        point == self.start_depot() || point == self.end_depot()
    }
}
