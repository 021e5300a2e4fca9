//! Reader for the Chao, Golden and Wasil TOP benchmark format.
//!
//! ```text
//! n 4
//! m 2
//! tmax 20.0
//! 0.0 0.0 0
//! 3.0 4.0 10
//! 6.0 0.0 15
//! 0.0 0.0 0
//! ```
//!
//! The header gives the number of points, the number of cars and the time
//! budget. Each following line holds `x y profit`, the first being the start
//! depot and the last the end depot. Fields may be separated by any
//! whitespace; blank lines are ignored. Distances are Euclidean.

use std::str::FromStr;

use crate::error::InstanceError;
use crate::models::{Instance, Point};

/// Parses a Chao benchmark instance.
///
/// # Errors
///
/// Returns [`InstanceError::Parse`] with a 1-based line number for malformed
/// text, and any validation error from [`Instance::new`].
///
/// # Examples
///
/// ```
/// use u_orienteering::benchmark::parse_chao;
/// use u_orienteering::models::OrienteeringProblem;
///
/// let text = "n 3\nm 2\ntmax 12.5\n0 0 0\n3 4 7\n0 0 0\n";
/// let instance = parse_chao(text)?;
/// assert_eq!(instance.point_count(), 3);
/// assert_eq!(instance.car_count(), 2);
/// assert_eq!(instance.max_time(), 12.5);
/// assert_eq!(instance.profit(1), 7.0);
/// # Ok::<(), u_orienteering::InstanceError>(())
/// ```
pub fn parse_chao(text: &str) -> Result<Instance, InstanceError> {
    let mut reader = ChaoReader::new(text);

    let point_count: usize = reader.read_key_value("n")?;
    let car_count: usize = reader.read_key_value("m")?;
    let max_time: f64 = reader.read_key_value("tmax")?;

    let mut points = Vec::new();
    for _ in 0..point_count {
        points.push(reader.read_point()?);
    }
    if let Some((line, _)) = reader.next_line() {
        return Err(parse_error(
            line,
            format!("expected {point_count} point lines, found more"),
        ));
    }

    Instance::euclidean(points, car_count, max_time)
}

struct ChaoReader<'t> {
    lines: std::iter::Enumerate<std::str::Lines<'t>>,
    last_line: usize,
}

impl<'t> ChaoReader<'t> {
    fn new(text: &'t str) -> Self {
        Self {
            lines: text.lines().enumerate(),
            last_line: 0,
        }
    }

    /// Next non-blank line with its 1-based number.
    fn next_line(&mut self) -> Option<(usize, &'t str)> {
        for (index, line) in self.lines.by_ref() {
            self.last_line = index + 1;
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                return Some((index + 1, trimmed));
            }
        }
        None
    }

    fn expect_line(&mut self, what: &str) -> Result<(usize, &'t str), InstanceError> {
        self.next_line().ok_or_else(|| {
            parse_error(
                self.last_line + 1,
                format!("unexpected end of input, expected {what}"),
            )
        })
    }

    fn read_key_value<T: FromStr>(&mut self, key: &str) -> Result<T, InstanceError> {
        let (line, text) = self.expect_line(key)?;
        let mut fields = text.split_whitespace();
        match (fields.next(), fields.next(), fields.next()) {
            (Some(k), Some(value), None) if k == key => parse_field(line, value, key),
            _ => Err(parse_error(line, format!("expected `{key} <value>`, got '{text}'"))),
        }
    }

    fn read_point(&mut self) -> Result<Point, InstanceError> {
        let (line, text) = self.expect_line("a point line")?;
        let fields: Vec<&str> = text.split_whitespace().collect();
        let [x, y, profit] = fields.as_slice() else {
            return Err(parse_error(
                line,
                format!("expected `x y profit`, got {} field(s)", fields.len()),
            ));
        };
        Ok(Point::new(
            parse_field(line, x, "x")?,
            parse_field(line, y, "y")?,
            parse_field(line, profit, "profit")?,
        ))
    }
}

fn parse_field<T: FromStr>(line: usize, value: &str, name: &str) -> Result<T, InstanceError> {
    value
        .parse()
        .map_err(|_| parse_error(line, format!("cannot parse {name} from '{value}'")))
}

fn parse_error(line: usize, message: String) -> InstanceError {
    InstanceError::Parse { line, message }
}
