//! Rating-driven greedy assignment with speculative tie branches.
//!
//! Each round rates every point and takes the set of points sharing the top
//! rating. The first of them (the canonical point) is assigned to its nearest
//! car that is not yet exhausted; every other tied point is tried on its own
//! nearest car, snapshotted into the branch pool, and undone again. A car
//! that cannot take the canonical point is marked exhausted. The pass ends
//! when every car is exhausted.
//!
//! # Complexity
//!
//! O(n² · m) per round for n points and m cars, with at most n assignments
//! plus m exhaustions per pass.

use log::trace;
use rand::Rng;

use super::feasibility::nearest_car;
use super::rating::top_rated;
use crate::config::GreedyConfig;
use crate::error::SolveError;
use crate::local_search::splice_detours;
use crate::models::{OrienteeringProblem, Solution};

/// What one greedy pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Canonical points assigned.
    pub assigned: usize,
    /// Points added by detour splicing after canonical assignments.
    pub spliced: usize,
    /// Speculative snapshots pushed into the pool.
    pub branches: usize,
}

/// Runs one greedy pass on `solution`, completing it in place.
///
/// Speculative alternatives for rating ties are pushed onto `pool`. The
/// random source is accepted for interface stability and not consumed.
///
/// # Errors
///
/// Propagates [`SolveError`] from detour splicing, and reports
/// [`SolveError::InvariantViolated`] if undoing a speculative branch finds
/// fewer moves than it committed.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_orienteering::config::GreedyConfig;
/// use u_orienteering::constructive::greedy_pass;
/// use u_orienteering::models::{Instance, Point, Solution};
///
/// let instance = Instance::euclidean(
///     vec![
///         Point::depot(0.0, 0.0),
///         Point::new(3.0, 0.0, 5.0),
///         Point::new(-3.0, 0.0, 5.0),
///         Point::depot(0.0, 0.0),
///     ],
///     1,
///     100.0,
/// )?;
/// let mut solution = Solution::new(&instance);
/// let mut pool = Vec::new();
/// let mut rng = StdRng::seed_from_u64(42);
///
/// let summary = greedy_pass(&mut solution, &mut pool, &GreedyConfig::default(), &mut rng)
///     .expect("pass succeeds");
/// assert_eq!(solution.total_profit(), 10.0);
/// assert_eq!(summary.branches, 1);
/// assert_eq!(pool.len(), 1);
/// # Ok::<(), u_orienteering::InstanceError>(())
/// ```
pub fn greedy_pass<'a, P, R>(
    solution: &mut Solution<'a, P>,
    pool: &mut Vec<Solution<'a, P>>,
    config: &GreedyConfig,
    _rng: &mut R,
) -> Result<PassSummary, SolveError>
where
    P: OrienteeringProblem + ?Sized,
    R: Rng + ?Sized,
{
    let mut exhausted = vec![false; solution.car_count()];
    let mut summary = PassSummary::default();

    loop {
        let tied = top_rated(solution, config);
        let Some((&canonical, speculative)) = tied.split_first() else {
            break;
        };

        for &point in speculative {
            if branch_on(solution, pool, point, &exhausted, config)? {
                summary.branches += 1;
            }
        }

        let Some(car) = nearest_car(solution, canonical, |c| exhausted[c]) else {
            break;
        };
        if solution.is_visited(canonical) || !solution.try_move(car, canonical).feasible {
            trace!("car {car} exhausted at point {canonical}");
            exhausted[car] = true;
            continue;
        }
        let splice = splice_detours(solution, car, config.max_deviation())?;
        trace!(
            "car {car} takes {canonical} with {} spliced",
            splice.count()
        );
        summary.assigned += 1;
        summary.spliced += splice.count();
    }

    Ok(summary)
}

/// Tries `point` on its nearest non-exhausted car, snapshots the result into
/// `pool` and restores `solution`. Returns whether a snapshot was taken.
fn branch_on<'a, P>(
    solution: &mut Solution<'a, P>,
    pool: &mut Vec<Solution<'a, P>>,
    point: usize,
    exhausted: &[bool],
    config: &GreedyConfig,
) -> Result<bool, SolveError>
where
    P: OrienteeringProblem + ?Sized,
{
    let Some(car) = nearest_car(solution, point, |c| exhausted[c]) else {
        return Ok(false);
    };
    if solution.is_visited(point) || !solution.try_move(car, point).feasible {
        return Ok(false);
    }

    let splice = splice_detours(solution, car, config.max_deviation())?;
    pool.push(solution.clone());
    trace!(
        "branch: car {car} takes {point} with {} spliced, pool size {}",
        splice.count(),
        pool.len()
    );

    for _ in 0..=splice.count() {
        if solution.rollback(car).is_none() {
            return Err(SolveError::invariant(
                car,
                "speculative branch undo ran out of moves",
            ));
        }
    }
    Ok(true)
}
