//! Route evaluator that recomputes travel times and checks constraints.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::models::{OrienteeringProblem, RoutePlan, Solution};

/// Absolute slack allowed between recorded and recomputed travel times.
const TIME_TOLERANCE: f64 = 1e-6;

/// A type of constraint violation in a route.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViolationType {
    /// Travel time, closing leg included, exceeds the budget.
    #[error("travel time {time} exceeds budget {max_time}")]
    BudgetExceeded {
        /// Recomputed travel time.
        time: f64,
        /// Time budget.
        max_time: f64,
    },
    /// A point appears on more than one route or twice on the same route.
    #[error("point {point} visited more than once")]
    DuplicateVisit {
        /// The repeated point.
        point: usize,
    },
    /// The route does not begin at the start depot.
    #[error("route starts at {first:?} instead of the start depot")]
    WrongStart {
        /// First route entry, if any.
        first: Option<usize>,
    },
    /// The recorded travel time disagrees with the recomputed one.
    #[error("recorded travel time {recorded} differs from recomputed {recomputed}")]
    TravelTimeMismatch {
        /// Travel time stored with the route.
        recorded: f64,
        /// Travel time recomputed from distances.
        recomputed: f64,
    },
}

/// A constraint violation on one car's route.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("car {car}: {kind}")]
pub struct Violation {
    /// Car whose route is at fault.
    pub car: usize,
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(car: usize, kind: ViolationType) -> Self {
        Self { car, kind }
    }
}

/// Verifies routes from scratch against a problem instance.
///
/// Nothing recorded by the solution is trusted: travel times are rebuilt leg
/// by leg from the distance function.
///
/// # Examples
///
/// ```
/// use u_orienteering::evaluation::RouteEvaluator;
/// use u_orienteering::models::{Instance, Point, Solution};
///
/// let instance = Instance::euclidean(
///     vec![
///         Point::depot(0.0, 0.0),
///         Point::new(3.0, 4.0, 2.0),
///         Point::depot(0.0, 0.0),
///     ],
///     1,
///     20.0,
/// )?;
/// let mut solution = Solution::new(&instance);
/// solution.try_move(0, 1);
///
/// let evaluator = RouteEvaluator::new(&instance);
/// assert!((evaluator.route_time(&[0, 1]) - 10.0).abs() < 1e-10);
/// assert!(evaluator.evaluate(&solution).is_empty());
/// # Ok::<(), u_orienteering::InstanceError>(())
/// ```
pub struct RouteEvaluator<'a, P: ?Sized> {
    problem: &'a P,
}

impl<'a, P: OrienteeringProblem + ?Sized> RouteEvaluator<'a, P> {
    /// Creates a new evaluator for the given problem.
    pub fn new(problem: &'a P) -> Self {
        Self { problem }
    }

    /// Travel time along `route` and on to the end depot.
    ///
    /// An empty route is treated as a car parked at the start depot.
    pub fn route_time(&self, route: &[usize]) -> f64 {
        let end = self.problem.end_depot();
        let last = route
            .last()
            .copied()
            .unwrap_or_else(|| self.problem.start_depot());
        let legs: f64 = route
            .windows(2)
            .map(|w| self.problem.distance(w[0], w[1]))
            .sum();
        legs + self.problem.distance(last, end)
    }

    /// Checks every car of `solution`.
    pub fn evaluate(&self, solution: &Solution<'_, P>) -> Vec<Violation> {
        let mut seen = BTreeSet::new();
        (0..solution.car_count())
            .flat_map(|car| {
                self.check_route(
                    car,
                    solution.route(car),
                    solution.elapsed_time(car),
                    &mut seen,
                )
            })
            .collect()
    }

    /// Checks a serialized plan, e.g. one read back from disk.
    ///
    /// A plan whose route and travel-time lists differ in length reports a
    /// travel-time mismatch for every car without a recorded time.
    pub fn evaluate_plan(&self, plan: &RoutePlan) -> Vec<Violation> {
        let mut seen = BTreeSet::new();
        let mut violations = Vec::new();
        for (car, route) in plan.routes.iter().enumerate() {
            let recorded = plan.travel_times.get(car).copied().unwrap_or(f64::NAN);
            violations.extend(self.check_route(car, route, recorded, &mut seen));
        }
        violations
    }

    fn check_route(
        &self,
        car: usize,
        route: &[usize],
        recorded: f64,
        seen: &mut BTreeSet<usize>,
    ) -> Vec<Violation> {
        let start = self.problem.start_depot();
        let mut violations = Vec::new();

        if route.first() != Some(&start) {
            violations.push(Violation::new(
                car,
                ViolationType::WrongStart {
                    first: route.first().copied(),
                },
            ));
        }

        for &point in route.iter().skip(1) {
            if point == start || !seen.insert(point) {
                violations.push(Violation::new(car, ViolationType::DuplicateVisit { point }));
            }
        }

        let time = self.route_time(route);
        let max_time = self.problem.max_time();
        if time > max_time + TIME_TOLERANCE {
            violations.push(Violation::new(
                car,
                ViolationType::BudgetExceeded { time, max_time },
            ));
        }

        // NaN never compares within tolerance.
        if !((time - recorded).abs() <= TIME_TOLERANCE * time.abs().max(1.0)) {
            violations.push(Violation::new(
                car,
                ViolationType::TravelTimeMismatch {
                    recorded,
                    recomputed: time,
                },
            ));
        }

        violations
    }
}
