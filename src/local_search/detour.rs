//! Detour splicing along a freshly driven leg.
//!
//! # Algorithm
//!
//! After a car moves from `previous` to `current`, collect the unvisited
//! non-depot points whose detour
//! `d(current, c) + d(previous, c) - d(previous, current)` stays within the
//! admissible deviation. The leg is undone, and the candidate nearest to the
//! car's position at that point (`previous`) is spliced in between the two
//! (`previous -> c -> current`) if the car's time budget allows it. The
//! process then repeats on the shortened leg `c -> current`.
//! The first candidate that does not fit ends the splicing.
//!
//! Each splice visits a new point, so at most `n` splices happen per call.

use log::trace;

use crate::error::SolveError;
use crate::models::{OrienteeringProblem, Solution};

/// Points spliced into a car's last leg, in splice order.
///
/// After splicing `k` points the car's route ends with
/// `previous, s1, s2, .., sk, current`, so undoing the original move and
/// every splice takes exactly `count() + 1` rollbacks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Splice {
    inserted: Vec<usize>,
}

impl Splice {
    /// Number of spliced points.
    pub fn count(&self) -> usize {
        self.inserted.len()
    }

    /// Returns `true` if nothing was spliced.
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty()
    }

    /// Spliced points in the order they were inserted.
    pub fn inserted(&self) -> &[usize] {
        &self.inserted
    }
}

/// Splices nearby unvisited points into the last leg of `car`.
///
/// # Errors
///
/// Returns [`SolveError::CarAtDepot`] if `car` has not left the start depot,
/// and [`SolveError::InvariantViolated`] if the solution rejects a move that
/// was checked feasible just before.
///
/// # Examples
///
/// ```
/// use u_orienteering::models::{Instance, Point, Solution};
/// use u_orienteering::local_search::splice_detours;
///
/// let instance = Instance::euclidean(
///     vec![
///         Point::depot(0.0, 0.0),
///         Point::new(2.0, 0.0, 1.0),
///         Point::new(8.0, 0.0, 1.0),
///         Point::depot(10.0, 0.0),
///     ],
///     1,
///     30.0,
/// )?;
/// let mut solution = Solution::new(&instance);
/// solution.try_move(0, 2);
///
/// let splice = splice_detours(&mut solution, 0, 0.5).unwrap();
/// assert_eq!(splice.inserted(), &[1]);
/// assert_eq!(solution.route(0), &[0, 1, 2]);
/// # Ok::<(), u_orienteering::InstanceError>(())
/// ```
pub fn splice_detours<P>(
    solution: &mut Solution<'_, P>,
    car: usize,
    max_deviation: f64,
) -> Result<Splice, SolveError>
where
    P: OrienteeringProblem + ?Sized,
{
    let start = solution.problem().start_depot();
    if solution.car_route(car).hops() == 0 || solution.current_position(car) == start {
        return Err(SolveError::CarAtDepot { car });
    }

    let mut splice = Splice::default();
    loop {
        let route = solution.car_route(car);
        let current = route.current();
        let Some(previous) = route.previous() else {
            return Err(SolveError::CarAtDepot { car });
        };
        let Some(candidate) = nearest_in_ellipse(solution, previous, current, max_deviation)
        else {
            break;
        };

        if solution.rollback(car) != Some(current) {
            return Err(SolveError::invariant(car, "leg end vanished before splicing"));
        }
        let path = [candidate, current];
        if !solution.simulate_path(car, &path).feasible {
            if !solution.try_move(car, current).feasible {
                return Err(SolveError::invariant(
                    car,
                    format!("cannot restore point {current} after rejected splice"),
                ));
            }
            break;
        }
        for point in path {
            if !solution.try_move(car, point).feasible {
                return Err(SolveError::invariant(
                    car,
                    format!("move to {point} rejected after feasibility check passed"),
                ));
            }
        }
        trace!("car {car}: spliced {candidate} before {current}");
        splice.inserted.push(candidate);
    }
    Ok(splice)
}

/// The unvisited non-depot point within `max_deviation` of the leg
/// `previous -> current` that lies closest to `previous`. Ties go to the
/// lowest index.
fn nearest_in_ellipse<P>(
    solution: &Solution<'_, P>,
    previous: usize,
    current: usize,
    max_deviation: f64,
) -> Option<usize>
where
    P: OrienteeringProblem + ?Sized,
{
    let problem = solution.problem();
    let leg = problem.distance(previous, current);
    (0..problem.point_count())
        .filter(|&p| !problem.is_depot(p) && !solution.is_visited(p))
        .filter(|&p| {
            problem.distance(current, p) + problem.distance(previous, p) - leg <= max_deviation
        })
        .min_by(|&a, &b| {
            problem
                .distance(previous, a)
                .total_cmp(&problem.distance(previous, b))
        })
}
