//! Point ratings for greedy assignment priority.
//!
//! A rating combines three weighted terms:
//!
//! 1. **Profit**: the point's profit over the mean profit of unvisited points.
//! 2. **Time**: how full the nearest car already is, times the share of its
//!    remaining time the move would consume. Subtracted.
//! 3. **Non-choice**: the profit share of the first unvisited point the
//!    nearest car could still reach after taking this one.
//!
//! Divisions by zero yield [`Term::Unbounded`] instead of floating-point
//! infinities. A zero weight or zero multiplier applied to an unbounded term
//! contributes nothing, and opposing unbounded contributions cancel, leaving
//! the sum of the finite ones.

use std::cmp::Ordering;

use super::feasibility::{is_reachable, nearest_car};
use crate::config::GreedyConfig;
use crate::models::{OrienteeringProblem, Solution};

/// Side on which an unbounded rating lies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Below every finite rating.
    Below,
    /// Above every finite rating.
    Above,
}

/// A rating term before weighting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Term {
    /// A finite value.
    Value(f64),
    /// The result of a division by zero.
    Unbounded,
}

impl Term {
    /// `numerator / denominator`, or [`Term::Unbounded`] for a non-positive
    /// denominator.
    pub fn ratio(numerator: f64, denominator: f64) -> Self {
        if denominator <= 0.0 {
            Self::Unbounded
        } else {
            Self::Value(numerator / denominator)
        }
    }

    /// Multiplies by a non-negative factor; zero times unbounded is zero.
    pub fn scaled(self, factor: f64) -> Self {
        match self {
            Self::Value(v) => Self::Value(v * factor),
            Self::Unbounded if factor == 0.0 => Self::Value(0.0),
            Self::Unbounded => Self::Unbounded,
        }
    }

    fn weighted(self, weight: f64) -> Contribution {
        match self {
            Self::Value(v) => Contribution::Finite(v * weight),
            Self::Unbounded if weight == 0.0 => Contribution::Finite(0.0),
            Self::Unbounded if weight > 0.0 => Contribution::Unbounded(Bound::Above),
            Self::Unbounded => Contribution::Unbounded(Bound::Below),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Contribution {
    Finite(f64),
    Unbounded(Bound),
}

/// Assignment priority of a point.
///
/// Ordered as `Ineligible < Unbounded(Below) < Value(_) < Unbounded(Above)`,
/// with values compared by [`f64::total_cmp`] after folding `-0.0` into
/// `0.0`.
///
/// # Examples
///
/// ```
/// use u_orienteering::constructive::{Bound, Rating};
///
/// assert!(Rating::Ineligible < Rating::Unbounded(Bound::Below));
/// assert!(Rating::Unbounded(Bound::Below) < Rating::Value(-1e9));
/// assert!(Rating::Value(1e9) < Rating::Unbounded(Bound::Above));
/// assert_eq!(Rating::Value(0.0), Rating::Value(-0.0));
/// ```
#[derive(Debug, Clone, Copy)]
pub enum Rating {
    /// Already visited or unreachable by every car.
    Ineligible,
    /// Dominated by an unbounded term.
    Unbounded(Bound),
    /// A finite score.
    Value(f64),
}

impl Rating {
    fn combine(contributions: [Contribution; 3]) -> Self {
        let mut finite = 0.0;
        let mut above = false;
        let mut below = false;
        for c in contributions {
            match c {
                Contribution::Finite(v) => finite += v,
                Contribution::Unbounded(Bound::Above) => above = true,
                Contribution::Unbounded(Bound::Below) => below = true,
            }
        }
        match (above, below) {
            (true, false) => Self::Unbounded(Bound::Above),
            (false, true) => Self::Unbounded(Bound::Below),
            _ => Self::Value(finite),
        }
    }

    /// Returns `true` unless the point is ineligible.
    pub fn is_eligible(&self) -> bool {
        !matches!(self, Self::Ineligible)
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Ineligible => 0,
            Self::Unbounded(Bound::Below) => 1,
            Self::Value(_) => 2,
            Self::Unbounded(Bound::Above) => 3,
        }
    }
}

impl Ord for Rating {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Value(a), Self::Value(b)) => (a + 0.0).total_cmp(&(b + 0.0)),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Rating {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Rating {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Rating {}

/// Rates `point` for assignment.
///
/// Returns [`Rating::Ineligible`] for visited points and for points no car
/// can reach. The non-choice term is evaluated as if the nearest car had
/// moved to `point`; the solution itself is left untouched.
///
/// # Examples
///
/// ```
/// use u_orienteering::config::GreedyConfig;
/// use u_orienteering::constructive::{rate, Rating};
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
/// let solution = Solution::new(&instance);
/// let config = GreedyConfig::default();
///
/// // profit 5 / mean 5, no time used yet, non-choice 5 / 10
/// assert_eq!(rate(&solution, 1, &config), Rating::Value(1.5));
/// assert_eq!(rate(&solution, 0, &config), Rating::Ineligible);
/// # Ok::<(), u_orienteering::InstanceError>(())
/// ```
pub fn rate<P>(solution: &Solution<'_, P>, point: usize, config: &GreedyConfig) -> Rating
where
    P: OrienteeringProblem + ?Sized,
{
    if !is_reachable(solution, point) {
        return Rating::Ineligible;
    }
    let Some(car) = nearest_car(solution, point, |_| false) else {
        return Rating::Ineligible;
    };
    let problem = solution.problem();

    let (unvisited_profit, unvisited_count) = (0..problem.point_count())
        .filter(|&p| !solution.is_visited(p))
        .fold((0.0, 0usize), |(sum, count), p| {
            (sum + problem.profit(p), count + 1)
        });

    let profit_term = if unvisited_count == 0 {
        Term::Unbounded
    } else {
        let mean = unvisited_profit / unvisited_count as f64;
        if mean == 0.0 {
            Term::Value(0.0)
        } else {
            Term::Value(problem.profit(point) / mean)
        }
    };

    let elapsed = solution.elapsed_time(car);
    let max_time = problem.max_time();
    let extra = solution.simulate_move(car, point).extra_time;
    let time_term = Term::ratio(extra, max_time - elapsed).scaled(elapsed / max_time);

    let non_choice_term = non_choice_cost(solution, car, point, unvisited_profit);

    Rating::combine([
        profit_term.weighted(config.profit_weight()),
        time_term.weighted(-config.time_weight()),
        non_choice_term.weighted(config.non_choice_weight()),
    ])
}

/// Profit share of the first unvisited point (by index) that `car` could
/// still reach after moving to `point`.
///
/// When `car` cannot take `point` itself, reachability is judged from the
/// car's current position instead.
fn non_choice_cost<P>(
    solution: &Solution<'_, P>,
    car: usize,
    point: usize,
    unvisited_profit: f64,
) -> Term
where
    P: OrienteeringProblem + ?Sized,
{
    let problem = solution.problem();
    let moved = solution.simulate_move(car, point).feasible;
    let next = (0..problem.point_count()).find(|&q| {
        if q == point || solution.is_visited(q) {
            return false;
        }
        if moved {
            solution.simulate_path(car, &[point, q]).feasible
        } else {
            solution.simulate_move(car, q).feasible
        }
    });
    let reachable_profit = next.map_or(0.0, |q| problem.profit(q));
    Term::ratio(reachable_profit, unvisited_profit)
}

/// Rates every point in index order and returns all points sharing the
/// highest rating, in index order.
///
/// Every tied point is returned, not just the first.
pub fn top_rated<P>(solution: &Solution<'_, P>, config: &GreedyConfig) -> Vec<usize>
where
    P: OrienteeringProblem + ?Sized,
{
    let mut best: Option<Rating> = None;
    let mut tied = Vec::new();
    for point in 0..solution.problem().point_count() {
        let rating = rate(solution, point, config);
        match best.map(|b| rating.cmp(&b)) {
            Some(Ordering::Less) => {}
            Some(Ordering::Equal) => tied.push(point),
            Some(Ordering::Greater) | None => {
                best = Some(rating);
                tied.clear();
                tied.push(point);
            }
        }
    }
    tied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::models::{Instance, Point};

    /// Two equally valuable points mirrored around a shared depot.
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

    /// start --5-- mid --5-- end, budget 10.
    fn single_hop() -> Instance {
        let points = vec![
            Point::depot(0.0, 0.0),
            Point::new(5.0, 0.0, 3.0),
            Point::depot(10.0, 0.0),
        ];
        let dm = DistanceMatrix::from_data(3, vec![0.0, 5.0, 10.0, 5.0, 0.0, 5.0, 10.0, 5.0, 0.0])
            .expect("3x3");
        Instance::new(points, dm, 1, 10.0).expect("valid")
    }

    #[test]
    fn test_term_policy() {
        assert_eq!(Term::ratio(1.0, 0.0), Term::Unbounded);
        assert_eq!(Term::ratio(1.0, 4.0), Term::Value(0.25));
        assert_eq!(Term::Unbounded.scaled(0.0), Term::Value(0.0));
        assert_eq!(Term::Unbounded.scaled(0.5), Term::Unbounded);
        assert!(matches!(Term::Unbounded.weighted(0.0), Contribution::Finite(v) if v == 0.0));
        assert!(matches!(
            Term::Unbounded.weighted(-1.0),
            Contribution::Unbounded(Bound::Below)
        ));
    }

    #[test]
    fn test_opposing_unbounded_cancel() {
        let r = Rating::combine([
            Contribution::Finite(2.0),
            Contribution::Unbounded(Bound::Below),
            Contribution::Unbounded(Bound::Above),
        ]);
        assert_eq!(r, Rating::Value(2.0));
    }

    #[test]
    fn test_rating_order() {
        let mut ratings = vec![
            Rating::Value(1.0),
            Rating::Unbounded(Bound::Above),
            Rating::Ineligible,
            Rating::Value(-3.0),
            Rating::Unbounded(Bound::Below),
        ];
        ratings.sort();
        assert_eq!(
            ratings,
            vec![
                Rating::Ineligible,
                Rating::Unbounded(Bound::Below),
                Rating::Value(-3.0),
                Rating::Value(1.0),
                Rating::Unbounded(Bound::Above),
            ]
        );
        assert!(!Rating::Ineligible.is_eligible());
        assert!(Rating::Value(0.0).is_eligible());
    }

    #[test]
    fn test_rate_terms() {
        let inst = mirrored();
        let sol = Solution::new(&inst);
        let config = GreedyConfig::default();
        assert_eq!(rate(&sol, 1, &config), Rating::Value(1.5));
        assert_eq!(rate(&sol, 2, &config), Rating::Value(1.5));

        let profit_only = GreedyConfig::default().with_weights(1.0, 0.0, 0.0);
        assert_eq!(rate(&sol, 1, &profit_only), Rating::Value(1.0));
    }

    #[test]
    fn test_time_term_penalises_loaded_car() {
        let inst = mirrored();
        let mut sol = Solution::new(&inst);
        assert!(sol.try_move(0, 1).feasible);
        // Car at (3,0) with 6 of 100 used; going to (-3,0) adds 6.
        // profit 5/5 - (0.06 * 6/94) + 0 (nothing left afterwards)
        let config = GreedyConfig::default();
        let expected = 1.0 - 0.06 * (6.0 / 94.0);
        match rate(&sol, 2, &config) {
            Rating::Value(v) => assert!((v - expected).abs() < 1e-12),
            other => panic!("unexpected rating {other:?}"),
        }
    }

    #[test]
    fn test_visited_point_is_ineligible_until_rollback() {
        let inst = mirrored();
        let mut sol = Solution::new(&inst);
        let config = GreedyConfig::default();
        assert!(sol.try_move(0, 1).feasible);
        assert_eq!(rate(&sol, 1, &config), Rating::Ineligible);
        sol.rollback(0);
        assert!(rate(&sol, 1, &config).is_eligible());
    }

    #[test]
    fn test_rate_leaves_solution_untouched() {
        let inst = mirrored();
        let sol = Solution::new(&inst);
        let before = sol.clone();
        let _ = rate(&sol, 1, &GreedyConfig::default());
        assert_eq!(sol, before);
    }

    #[test]
    fn test_full_car_is_unbounded_below() {
        let inst = single_hop();
        let sol = Solution::new(&inst);
        // The car already uses the whole budget: remaining time is zero.
        let config = GreedyConfig::default();
        assert_eq!(rate(&sol, 1, &config), Rating::Unbounded(Bound::Below));

        let no_time = GreedyConfig::default().with_weights(1.0, 0.0, 1.0);
        assert_eq!(rate(&sol, 1, &no_time), Rating::Value(1.0));
    }

    #[test]
    fn test_zero_profit_everywhere() {
        let inst = Instance::euclidean(
            vec![
                Point::depot(0.0, 0.0),
                Point::new(1.0, 0.0, 0.0),
                Point::depot(0.0, 0.0),
            ],
            1,
            10.0,
        )
        .expect("valid");
        let sol = Solution::new(&inst);
        // Zero mean profit gives a zero profit term; zero total profit makes
        // the non-choice term unbounded.
        let config = GreedyConfig::default();
        assert_eq!(rate(&sol, 1, &config), Rating::Unbounded(Bound::Above));
        let no_non_choice = GreedyConfig::default().with_weights(1.0, 1.0, 0.0);
        assert_eq!(rate(&sol, 1, &no_non_choice), Rating::Value(0.0));
    }

    #[test]
    fn test_top_rated_returns_every_tie() {
        let inst = mirrored();
        let sol = Solution::new(&inst);
        assert_eq!(top_rated(&sol, &GreedyConfig::default()), vec![1, 2]);
    }

    #[test]
    fn test_top_rated_single_winner() {
        let inst = Instance::euclidean(
            vec![
                Point::depot(0.0, 0.0),
                Point::new(3.0, 0.0, 5.0),
                Point::new(-3.0, 0.0, 9.0),
                Point::depot(0.0, 0.0),
            ],
            1,
            100.0,
        )
        .expect("valid");
        let sol = Solution::new(&inst);
        assert_eq!(top_rated(&sol, &GreedyConfig::default()), vec![2]);
    }

    #[test]
    fn test_top_rated_all_ineligible() {
        let inst = mirrored();
        let mut sol = Solution::new(&inst);
        assert!(sol.try_move(0, 1).feasible);
        assert!(sol.try_move(0, 2).feasible);
        assert_eq!(top_rated(&sol, &GreedyConfig::default()), vec![0, 1, 2, 3]);
    }
}
