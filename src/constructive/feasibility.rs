//! Reachability checks and car selection.

use crate::models::{OrienteeringProblem, Solution};

/// Returns `true` if at least one car can still be extended to `point`.
///
/// Visited points (depots included) are rejected without querying any car.
/// Cars are queried in index order and the scan stops at the first one that
/// can take the point. Nothing is mutated.
///
/// # Examples
///
/// ```
/// use u_orienteering::models::{Instance, Point, Solution};
/// use u_orienteering::constructive::is_reachable;
///
/// let instance = Instance::euclidean(
///     vec![
///         Point::depot(0.0, 0.0),
///         Point::new(2.0, 0.0, 1.0),
///         Point::new(50.0, 0.0, 9.0),
///         Point::depot(0.0, 0.0),
///     ],
///     2,
///     10.0,
/// )?;
/// let solution = Solution::new(&instance);
/// assert!(is_reachable(&solution, 1));
/// assert!(!is_reachable(&solution, 2));
/// assert!(!is_reachable(&solution, 0));
/// # Ok::<(), u_orienteering::InstanceError>(())
/// ```
pub fn is_reachable<P>(solution: &Solution<'_, P>, point: usize) -> bool
where
    P: OrienteeringProblem + ?Sized,
{
    if solution.is_visited(point) {
        return false;
    }
    (0..solution.car_count()).any(|car| solution.simulate_move(car, point).feasible)
}

/// Returns the car whose current position is closest to `point`, skipping
/// cars for which `excluded` holds.
///
/// Ties go to the lowest car index. Returns `None` when every car is
/// excluded.
pub fn nearest_car<P, F>(solution: &Solution<'_, P>, point: usize, excluded: F) -> Option<usize>
where
    P: OrienteeringProblem + ?Sized,
    F: Fn(usize) -> bool,
{
    let problem = solution.problem();
    (0..solution.car_count())
        .filter(|&car| !excluded(car))
        .map(|car| (car, problem.distance(solution.current_position(car), point)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(car, _)| car)
}
