//! LIFO exploration of speculative greedy branches.

use log::debug;
use rand::Rng;

use crate::config::GreedyConfig;
use crate::constructive::greedy_pass;
use crate::error::SolveError;
use crate::evaluation::RouteEvaluator;
use crate::models::{Instance, OrienteeringProblem, Solution};

/// Outcome of a branch exploration.
#[derive(Debug)]
pub struct Exploration<'a, P: ?Sized = Instance> {
    /// Most profitable completed solution.
    pub best: Solution<'a, P>,
    /// Partial solutions popped and completed.
    pub pops: usize,
    /// Speculative snapshots pushed by all passes.
    pub branches: usize,
    /// Times a popped solution strictly beat the best so far.
    pub improvements: usize,
    /// Snapshots still in the pool when exploration stopped.
    pub unexplored: usize,
}

/// Explores greedy completions of `initial` and their tie branches.
///
/// The pool starts with a copy of `initial` and is worked in LIFO order. Each
/// popped solution is completed by [`greedy_pass`], which may push further
/// branches. A completion replaces the best only if its profit is strictly
/// higher, so earlier solutions win ties. Stops after
/// [`GreedyConfig::max_pops`] pops or when the pool runs dry.
///
/// # Errors
///
/// Returns [`SolveError::Config`] for an invalid configuration and propagates
/// errors from the greedy pass.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_orienteering::branching::explore;
/// use u_orienteering::config::GreedyConfig;
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
/// let initial = Solution::new(&instance);
/// let mut rng = StdRng::seed_from_u64(1);
///
/// let result = explore(&initial, &GreedyConfig::default(), &mut rng).unwrap();
/// assert_eq!(result.best.total_profit(), 10.0);
/// assert_eq!(result.pops, 2);
/// # Ok::<(), u_orienteering::InstanceError>(())
/// ```
pub fn explore<'a, P, R>(
    initial: &Solution<'a, P>,
    config: &GreedyConfig,
    rng: &mut R,
) -> Result<Exploration<'a, P>, SolveError>
where
    P: OrienteeringProblem + ?Sized,
    R: Rng + ?Sized,
{
    config.validate()?;

    let mut best = initial.clone();
    let mut pool = vec![initial.clone()];
    let mut pops = 0;
    let mut branches = 0;
    let mut improvements = 0;

    while pops < config.max_pops() {
        let Some(mut candidate) = pool.pop() else {
            break;
        };
        pops += 1;

        let summary = greedy_pass(&mut candidate, &mut pool, config, rng)?;
        branches += summary.branches;

        let profit = candidate.total_profit();
        if profit > best.total_profit() {
            debug!(
                "pop {pops}: profit {} -> {profit}, pool size {}",
                best.total_profit(),
                pool.len()
            );
            improvements += 1;
            best = candidate;
        }
    }

    debug!(
        "exploration done: {pops} pops, {branches} branches, {} unexplored, best profit {}",
        pool.len(),
        best.total_profit()
    );

    Ok(Exploration {
        best,
        pops,
        branches,
        improvements,
        unexplored: pool.len(),
    })
}

/// Solves `problem` from an empty solution and verifies the result.
///
/// # Errors
///
/// Everything [`explore`] returns, plus [`SolveError::InvariantViolated`] if
/// [`RouteEvaluator`] finds a violation in the best solution.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_orienteering::config::GreedyConfig;
/// use u_orienteering::models::{Instance, Point};
///
/// let instance = Instance::euclidean(
///     vec![
///         Point::depot(0.0, 0.0),
///         Point::new(1.0, 0.0, 2.0),
///         Point::new(0.0, 2.0, 3.0),
///         Point::new(9.0, 9.0, 50.0),
///         Point::depot(0.0, 0.0),
///     ],
///     2,
///     8.0,
/// )?;
/// let mut rng = StdRng::seed_from_u64(3);
///
/// let solution = u_orienteering::solve(&instance, &GreedyConfig::default(), &mut rng).unwrap();
/// assert_eq!(solution.total_profit(), 5.0);
/// assert!(!solution.is_visited(3));
/// # Ok::<(), u_orienteering::InstanceError>(())
/// ```
pub fn solve<'a, P, R>(
    problem: &'a P,
    config: &GreedyConfig,
    rng: &mut R,
) -> Result<Solution<'a, P>, SolveError>
where
    P: OrienteeringProblem + ?Sized,
    R: Rng + ?Sized,
{
    let exploration = explore(&Solution::new(problem), config, rng)?;
    let evaluator = RouteEvaluator::new(problem);
    if let Some(violation) = evaluator.evaluate(&exploration.best).into_iter().next() {
        return Err(SolveError::invariant(
            violation.car,
            format!("final check failed: {}", violation.kind),
        ));
    }
    Ok(exploration.best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MAX_POPS;
    use crate::distance::DistanceMatrix;
    use crate::error::ConfigError;
    use crate::models::Point;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    fn mirrored() -> Instance {
        Instance::euclidean(
            vec![
                Point::depot(0.0, 0.0),
                Point::new(3.0, 0.0, 5.0),
                Point::new(-3.0, 0.0, 5.0),
                Point::depot(0.0, 0.0),
            ],
            1,
            100.0,
        )
        .expect("valid")
    }

    fn scattered() -> Instance {
        Instance::euclidean(
            vec![
                Point::depot(0.0, 0.0),
                Point::new(1.0, 2.0, 4.0),
                Point::new(-2.0, 1.0, 4.0),
                Point::new(3.0, -1.0, 6.0),
                Point::new(-1.0, -3.0, 5.0),
                Point::new(4.0, 4.0, 9.0),
                Point::new(-5.0, 2.0, 7.0),
                Point::new(2.0, 6.0, 3.0),
                Point::depot(0.0, 0.0),
            ],
            2,
            14.0,
        )
        .expect("valid")
    }

    #[test]
    fn test_single_hop_fills_budget() {
        let points = vec![
            Point::depot(0.0, 0.0),
            Point::new(5.0, 0.0, 3.0),
            Point::depot(10.0, 0.0),
        ];
        let dm = DistanceMatrix::from_data(3, vec![0.0, 5.0, 10.0, 5.0, 0.0, 5.0, 10.0, 5.0, 0.0])
            .expect("3x3");
        let inst = Instance::new(points, dm, 1, 10.0).expect("valid");

        let sol = solve(&inst, &GreedyConfig::default(), &mut rng()).expect("ok");

        assert!(sol.is_visited(1));
        assert_eq!(sol.elapsed_time(0), 10.0);
        assert_eq!(sol.total_profit(), 3.0);
    }

    #[test]
    fn test_unreachable_returns_input() {
        let inst = Instance::euclidean(
            vec![
                Point::depot(0.0, 0.0),
                Point::new(50.0, 0.0, 10.0),
                Point::depot(0.0, 0.0),
            ],
            1,
            20.0,
        )
        .expect("valid");
        let initial = Solution::new(&inst);

        let result = explore(&initial, &GreedyConfig::default(), &mut rng()).expect("ok");

        assert_eq!(result.best, initial);
        assert_eq!(result.best.total_profit(), 0.0);
        assert_eq!(result.pops, 1);
        assert_eq!(result.improvements, 0);
    }

    #[test]
    fn test_tie_branch_is_explored() {
        let inst = mirrored();
        let initial = Solution::new(&inst);

        let result = explore(&initial, &GreedyConfig::default(), &mut rng()).expect("ok");

        assert_eq!(result.pops, 2);
        assert_eq!(result.branches, 1);
        assert_eq!(result.improvements, 1);
        assert_eq!(result.unexplored, 0);
        // The branch reaches the same profit and does not replace the best.
        assert_eq!(result.best.route(0), &[0, 1, 2]);
    }

    #[test]
    fn test_pop_cap_leaves_branches_unexplored() {
        let inst = mirrored();
        let initial = Solution::new(&inst);
        let config = GreedyConfig::default().with_max_pops(1);

        let result = explore(&initial, &config, &mut rng()).expect("ok");

        assert_eq!(result.pops, 1);
        assert_eq!(result.unexplored, 1);
        assert_eq!(result.best.total_profit(), 10.0);
    }

    #[test]
    fn test_never_loses_profit() {
        let inst = scattered();
        let mut initial = Solution::new(&inst);
        assert!(initial.try_move(0, 5).feasible);
        let start_profit = initial.total_profit();

        let result = explore(&initial, &GreedyConfig::default(), &mut rng()).expect("ok");

        assert!(result.best.total_profit() >= start_profit);
        assert!(result.best.is_visited(5));
        assert!(result.pops <= DEFAULT_MAX_POPS);
    }

    #[test]
    fn test_solve_passes_verification() {
        let inst = scattered();
        let sol = solve(&inst, &GreedyConfig::default(), &mut rng()).expect("ok");
        assert!(RouteEvaluator::new(&inst).evaluate(&sol).is_empty());
        for car in 0..sol.car_count() {
            assert!(sol.elapsed_time(car) <= inst.max_time());
        }
        assert!(sol.total_profit() > 0.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let inst = mirrored();
        let initial = Solution::new(&inst);
        let config = GreedyConfig::default().with_max_pops(0);
        let err = explore(&initial, &config, &mut rng()).unwrap_err();
        assert_eq!(err, SolveError::Config(ConfigError::ZeroPops));
    }
}
