//! Per-car route storage.

/// The ordered route driven by a single car.
///
/// A route always starts at the start depot, which is never removed. Each
/// entry records the car's travel time at the moment that entry became its
/// current position, so undoing a move restores the previous travel time
/// exactly. Travel time always includes the closing leg to the end depot,
/// which is not stored as a route entry.
///
/// # Examples
///
/// ```
/// use u_orienteering::models::{Instance, Point, Solution};
///
/// let instance = Instance::euclidean(
///     vec![Point::depot(0.0, 0.0), Point::new(3.0, 4.0, 1.0), Point::depot(0.0, 0.0)],
///     1,
///     20.0,
/// )?;
/// let mut solution = Solution::new(&instance);
/// solution.try_move(0, 1);
///
/// let route = solution.car_route(0);
/// assert_eq!(route.points(), &[0, 1]);
/// assert_eq!(route.hops(), 1);
/// assert_eq!(route.elapsed(), 10.0);
/// # Ok::<(), u_orienteering::InstanceError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CarRoute {
    points: Vec<usize>,
    elapsed: Vec<f64>,
}

impl CarRoute {
    /// Creates a route parked at `start` with the given base travel time.
    pub fn new(start: usize, base_time: f64) -> Self {
        Self {
            points: vec![start],
            elapsed: vec![base_time],
        }
    }

    /// Route entries in visiting order, start depot first.
    pub fn points(&self) -> &[usize] {
        &self.points
    }

    /// Number of route entries, start depot included.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`: the start depot is never removed.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of committed moves (entries after the start depot).
    pub fn hops(&self) -> usize {
        self.points.len() - 1
    }

    /// Current position: the last route entry.
    pub fn current(&self) -> usize {
        self.points[self.points.len() - 1]
    }

    /// The entry before the current position, if the car has moved.
    pub fn previous(&self) -> Option<usize> {
        self.points.len().checked_sub(2).map(|i| self.points[i])
    }

    /// Travel time including the return leg to the end depot.
    pub fn elapsed(&self) -> f64 {
        self.elapsed[self.elapsed.len() - 1]
    }

    pub(crate) fn push(&mut self, point: usize, elapsed: f64) {
        self.points.push(point);
        self.elapsed.push(elapsed);
    }

    /// Removes the last entry; the start depot is never removed.
    pub(crate) fn pop(&mut self) -> Option<usize> {
        if self.points.len() < 2 {
            return None;
        }
        self.elapsed.pop();
        self.points.pop()
    }
}
