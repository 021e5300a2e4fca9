//! Dense travel-time matrix.

use crate::error::InstanceError;
use crate::models::Point;

/// Travel times between every pair of points, row-major.
///
/// Distance and travel time are the same quantity in orienteering: a car
/// spends exactly `get(a, b)` of its budget driving from `a` to `b`.
///
/// # Examples
///
/// ```
/// use u_orienteering::models::Point;
/// use u_orienteering::distance::DistanceMatrix;
///
/// let points = vec![
///     Point::depot(0.0, 0.0),
///     Point::new(3.0, 4.0, 10.0),
///     Point::depot(6.0, 8.0),
/// ];
/// let dm = DistanceMatrix::from_points(&points);
/// assert_eq!(dm.get(0, 1), 5.0);
/// assert_eq!(dm.row(2), &[10.0, 5.0, 0.0]);
/// assert!(dm.check(1e-9).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Euclidean distances between point coordinates.
    pub fn from_points(points: &[Point]) -> Self {
        let data = points
            .iter()
            .flat_map(|a| points.iter().map(move |b| a.distance_to(b)))
            .collect();
        Self {
            size: points.len(),
            data,
        }
    }

    /// Wraps an explicit `size × size` grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        (data.len() == size * size).then_some(Self { size, data })
    }

    /// Travel time from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// All travel times out of `from`.
    pub fn row(&self, from: usize) -> &[f64] {
        &self.data[from * self.size..(from + 1) * self.size]
    }

    /// Number of points covered.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Verifies that every entry is finite and non-negative and that the
    /// matrix is symmetric within `tol`.
    ///
    /// # Errors
    ///
    /// Reports the first offending entry in row-major order as
    /// [`InstanceError::InvalidDistance`] or
    /// [`InstanceError::AsymmetricDistance`].
    pub fn check(&self, tol: f64) -> Result<(), InstanceError> {
        if let Some(idx) = self.data.iter().position(|d| !d.is_finite() || *d < 0.0) {
            return Err(InstanceError::InvalidDistance {
                from: idx / self.size,
                to: idx % self.size,
                value: self.data[idx],
            });
        }
        let asymmetric = (0..self.size)
            .flat_map(|i| ((i + 1)..self.size).map(move |j| (i, j)))
            .find(|&(i, j)| (self.get(i, j) - self.get(j, i)).abs() > tol);
        match asymmetric {
            Some((i, j)) => Err(InstanceError::AsymmetricDistance(i, j)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let dm = DistanceMatrix::from_points(&[
            Point::depot(0.0, 0.0),
            Point::new(3.0, 4.0, 10.0),
            Point::depot(0.0, 8.0),
        ]);
        assert_eq!(dm.size(), 3);
        assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
        assert!((dm.get(2, 0) - 8.0).abs() < 1e-10);
        assert_eq!(dm.get(1, 1), 0.0);
        assert_eq!(dm.row(0).len(), 3);
    }

    #[test]
    fn test_from_data() {
        let dm = DistanceMatrix::from_data(2, vec![0.0, 5.0, 5.0, 0.0]).expect("2x2");
        assert_eq!(dm.get(1, 0), 5.0);
        assert!(dm.check(0.0).is_ok());
        assert!(DistanceMatrix::from_data(2, vec![0.0, 1.0, 2.0]).is_none());
    }

    #[test]
    fn test_check_asymmetric() {
        let dm = DistanceMatrix::from_data(3, vec![0.0, 1.0, 2.0, 1.0, 0.0, 10.0, 2.0, 15.0, 0.0])
            .expect("3x3");
        assert_eq!(dm.check(1e-9), Err(InstanceError::AsymmetricDistance(1, 2)));
        assert!(dm.check(6.0).is_ok());
    }

    #[test]
    fn test_check_invalid_entry() {
        let dm = DistanceMatrix::from_data(2, vec![0.0, 1.0, -1.0, 0.0]).expect("2x2");
        assert_eq!(
            dm.check(1e-9),
            Err(InstanceError::InvalidDistance {
                from: 1,
                to: 0,
                value: -1.0
            })
        );
        let dm = DistanceMatrix::from_data(2, vec![0.0, f64::NAN, 1.0, 0.0]).expect("2x2");
        assert!(matches!(
            dm.check(1e-9),
            Err(InstanceError::InvalidDistance { from: 0, to: 1, .. })
        ));
    }
}
