//! Mutable solution state with commit/rollback moves.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{CarRoute, Instance, OrienteeringProblem};

/// Result of a (possibly hypothetical) move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOutcome {
    /// Whether the move keeps the car within its time budget and targets an
    /// unvisited point.
    pub feasible: bool,
    /// Travel time added by the move.
    pub extra_time: f64,
}

/// A serializable snapshot of a solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    /// One route per car, start depot first, end depot implied.
    pub routes: Vec<Vec<usize>>,
    /// Travel time per car, closing leg included.
    pub travel_times: Vec<f64>,
    /// Sum of collected profits.
    pub total_profit: f64,
}

/// Per-car routes over a shared problem instance.
///
/// Cars start parked at the start depot with travel time
/// `distance(start, end)`. Moving a car to point `p` costs
/// `distance(cur, p) + distance(p, end) - distance(cur, end)` and is feasible
/// when `p` is unvisited and the resulting travel time stays within the
/// budget. Moves are undone per car in LIFO order with [`Solution::rollback`].
///
/// Cloning copies routes and the visited set only; the instance is shared by
/// reference, so branch snapshots stay proportional to route size.
///
/// # Examples
///
/// ```
/// use u_orienteering::models::{Instance, Point, Solution};
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
/// let mut solution = Solution::new(&instance);
/// assert_eq!(solution.elapsed_time(0), 10.0);
///
/// let outcome = solution.try_move(0, 1);
/// assert!(outcome.feasible);
/// assert!(solution.is_visited(1));
/// assert_eq!(solution.total_profit(), 3.0);
///
/// assert_eq!(solution.rollback(0), Some(1));
/// assert!(!solution.is_visited(1));
/// # Ok::<(), u_orienteering::InstanceError>(())
/// ```
pub struct Solution<'a, P: ?Sized = Instance> {
    problem: &'a P,
    cars: Vec<CarRoute>,
    visited: BTreeSet<usize>,
}

impl<'a, P: OrienteeringProblem + ?Sized> Solution<'a, P> {
    /// Creates an empty solution: every car parked at the start depot.
    pub fn new(problem: &'a P) -> Self {
        let start = problem.start_depot();
        let base = problem.distance(start, problem.end_depot());
        Self {
            problem,
            cars: (0..problem.car_count())
                .map(|_| CarRoute::new(start, base))
                .collect(),
            visited: BTreeSet::new(),
        }
    }

    /// The problem this solution belongs to.
    pub fn problem(&self) -> &'a P {
        self.problem
    }

    /// Number of cars.
    pub fn car_count(&self) -> usize {
        self.cars.len()
    }

    /// All car routes, indexed by car.
    pub fn cars(&self) -> &[CarRoute] {
        &self.cars
    }

    /// Route of a single car.
    pub fn car_route(&self, car: usize) -> &CarRoute {
        &self.cars[car]
    }

    /// Returns `true` if `point` is a depot or served by some car.
    pub fn is_visited(&self, point: usize) -> bool {
        self.problem.is_depot(point) || self.visited.contains(&point)
    }

    /// Number of served (non-depot) points.
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Current position of `car`.
    pub fn current_position(&self, car: usize) -> usize {
        self.cars[car].current()
    }

    /// Number of route entries of `car`, start depot included.
    pub fn route_len(&self, car: usize) -> usize {
        self.cars[car].len()
    }

    /// The `i`-th route entry of `car`.
    pub fn route_entry(&self, car: usize, i: usize) -> Option<usize> {
        self.cars[car].points().get(i).copied()
    }

    /// Route entries of `car`.
    pub fn route(&self, car: usize) -> &[usize] {
        self.cars[car].points()
    }

    /// Travel time of `car`, closing leg to the end depot included.
    pub fn elapsed_time(&self, car: usize) -> f64 {
        self.cars[car].elapsed()
    }

    /// Sum of profits over served points.
    pub fn total_profit(&self) -> f64 {
        self.visited.iter().map(|&p| self.problem.profit(p)).sum()
    }

    /// Travel time added by going from `from` to `point` and then on to the
    /// end depot, instead of going from `from` straight to the end depot.
    pub fn move_cost(&self, from: usize, point: usize) -> f64 {
        let end = self.problem.end_depot();
        self.problem.distance(from, point) + self.problem.distance(point, end)
            - self.problem.distance(from, end)
    }

    /// Evaluates moving `car` to `point` without changing anything.
    pub fn simulate_move(&self, car: usize, point: usize) -> MoveOutcome {
        self.simulate_path(car, &[point])
    }

    /// Evaluates moving `car` through `points` in order without changing
    /// anything. Feasible only if every intermediate step is feasible.
    ///
    /// The travel time after each step is accumulated exactly the way
    /// [`Solution::try_move`] accumulates it, so a feasible path is
    /// guaranteed to commit move by move.
    pub fn simulate_path(&self, car: usize, points: &[usize]) -> MoveOutcome {
        let route = &self.cars[car];
        let mut from = route.current();
        let mut elapsed = route.elapsed();
        let mut extra_time = 0.0;
        let mut feasible = true;
        for (k, &point) in points.iter().enumerate() {
            let cost = self.move_cost(from, point);
            extra_time += cost;
            elapsed += cost;
            let repeated = points[..k].contains(&point);
            if repeated || self.is_visited(point) || elapsed > self.problem.max_time() {
                feasible = false;
            }
            from = point;
        }
        MoveOutcome {
            feasible,
            extra_time,
        }
    }

    /// Moves `car` to `point` if feasible; otherwise leaves state untouched.
    pub fn try_move(&mut self, car: usize, point: usize) -> MoveOutcome {
        let extra_time = self.move_cost(self.cars[car].current(), point);
        let elapsed = self.cars[car].elapsed() + extra_time;
        let feasible = !self.is_visited(point) && elapsed <= self.problem.max_time();
        if feasible {
            self.visited.insert(point);
            self.cars[car].push(point, elapsed);
        }
        MoveOutcome {
            feasible,
            extra_time,
        }
    }

    /// Undoes the most recent committed move of `car`.
    ///
    /// Returns the point that was removed, or `None` if the car is still at
    /// its start depot.
    pub fn rollback(&mut self, car: usize) -> Option<usize> {
        let point = self.cars[car].pop()?;
        self.visited.remove(&point);
        Some(point)
    }

    /// Snapshot suitable for serialization.
    pub fn to_plan(&self) -> RoutePlan {
        RoutePlan {
            routes: self.cars.iter().map(|c| c.points().to_vec()).collect(),
            travel_times: self.cars.iter().map(CarRoute::elapsed).collect(),
            total_profit: self.total_profit(),
        }
    }
}

impl<P: ?Sized> Clone for Solution<'_, P> {
    fn clone(&self) -> Self {
        Self {
            problem: self.problem,
            cars: self.cars.clone(),
            visited: self.visited.clone(),
        }
    }
}

impl<P: ?Sized> PartialEq for Solution<'_, P> {
    fn eq(&self, other: &Self) -> bool {
        self.cars == other.cars && self.visited == other.visited
    }
}

impl<P: ?Sized> fmt::Debug for Solution<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Solution")
            .field("cars", &self.cars)
            .field("visited", &self.visited)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Point;

    fn square() -> Instance {
        // Depots share the origin; customers sit on the axes.
        Instance::euclidean(
            vec![
                Point::depot(0.0, 0.0),
                Point::new(3.0, 0.0, 4.0),
                Point::new(0.0, 4.0, 6.0),
                Point::new(30.0, 0.0, 9.0),
                Point::depot(0.0, 0.0),
            ],
            2,
            20.0,
        )
        .expect("valid")
    }

    #[test]
    fn test_solution_empty() {
        let inst = square();
        let sol = Solution::new(&inst);
        assert_eq!(sol.car_count(), 2);
        assert_eq!(sol.current_position(0), 0);
        assert_eq!(sol.route_len(1), 1);
        assert_eq!(sol.elapsed_time(0), 0.0);
        assert_eq!(sol.total_profit(), 0.0);
        assert_eq!(sol.visited_count(), 0);
    }

    #[test]
    fn test_depots_count_as_visited() {
        let inst = square();
        let sol = Solution::new(&inst);
        assert!(sol.is_visited(0));
        assert!(sol.is_visited(4));
        assert!(!sol.is_visited(1));
    }

    #[test]
    fn test_try_move_commits() {
        let inst = square();
        let mut sol = Solution::new(&inst);
        let outcome = sol.try_move(0, 1);
        assert!(outcome.feasible);
        assert_eq!(outcome.extra_time, 6.0);
        assert_eq!(sol.current_position(0), 1);
        assert_eq!(sol.route_entry(0, 1), Some(1));
        assert_eq!(sol.route_entry(0, 2), None);
        assert_eq!(sol.elapsed_time(0), 6.0);
        assert_eq!(sol.total_profit(), 4.0);
    }

    #[test]
    fn test_try_move_rejects_over_budget() {
        let inst = square();
        let mut sol = Solution::new(&inst);
        let before = sol.clone();
        let outcome = sol.try_move(0, 3);
        assert!(!outcome.feasible);
        assert_eq!(outcome.extra_time, 60.0);
        assert_eq!(sol, before);
    }

    #[test]
    fn test_try_move_rejects_visited() {
        let inst = square();
        let mut sol = Solution::new(&inst);
        assert!(sol.try_move(0, 1).feasible);
        assert!(!sol.try_move(1, 1).feasible);
        assert!(!sol.try_move(1, 4).feasible);
        assert_eq!(sol.route_len(1), 1);
    }

    #[test]
    fn test_simulate_does_not_mutate() {
        let inst = square();
        let sol = Solution::new(&inst);
        let outcome = sol.simulate_move(0, 2);
        assert!(outcome.feasible);
        assert_eq!(outcome.extra_time, 8.0);
        assert_eq!(sol.route_len(0), 1);
        assert!(!sol.is_visited(2));
    }

    #[test]
    fn test_simulate_path_accumulates() {
        let inst = square();
        let sol = Solution::new(&inst);
        // 0 -> 1 -> 2 -> 0 = 3 + 5 + 4
        let outcome = sol.simulate_path(0, &[1, 2]);
        assert!(outcome.feasible);
        assert!((outcome.extra_time - 12.0).abs() < 1e-10);

        assert!(!sol.simulate_path(0, &[1, 1]).feasible);
        assert!(!sol.simulate_path(0, &[1, 3]).feasible);
    }

    #[test]
    fn test_rollback_restores_state() {
        let inst = square();
        let mut sol = Solution::new(&inst);
        assert!(sol.try_move(0, 1).feasible);
        let before = sol.clone();
        assert!(sol.try_move(0, 2).feasible);
        assert_eq!(sol.route_len(0), 3);

        assert_eq!(sol.rollback(0), Some(2));
        assert_eq!(sol.route_len(0), 2);
        assert!(!sol.is_visited(2));
        assert_eq!(sol.elapsed_time(0), before.elapsed_time(0));
        assert_eq!(sol, before);
    }

    #[test]
    fn test_rollback_is_per_car() {
        let inst = square();
        let mut sol = Solution::new(&inst);
        assert!(sol.try_move(0, 1).feasible);
        assert!(sol.try_move(1, 2).feasible);
        assert_eq!(sol.rollback(0), Some(1));
        assert_eq!(sol.route(1), &[0, 2]);
        assert_eq!(sol.rollback(0), None);
    }

    #[test]
    fn test_clone_is_independent() {
        let inst = square();
        let mut sol = Solution::new(&inst);
        let snapshot = sol.clone();
        assert!(sol.try_move(0, 1).feasible);
        assert_ne!(sol, snapshot);
        assert_eq!(snapshot.route_len(0), 1);
    }

    #[test]
    fn test_to_plan() {
        let inst = square();
        let mut sol = Solution::new(&inst);
        assert!(sol.try_move(1, 2).feasible);
        let plan = sol.to_plan();
        assert_eq!(plan.routes, vec![vec![0], vec![0, 2]]);
        assert_eq!(plan.travel_times, vec![0.0, 8.0]);
        assert_eq!(plan.total_profit, 6.0);

        let json = serde_json::to_string(&plan).expect("serialize");
        let back: RoutePlan = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, plan);
    }
}
