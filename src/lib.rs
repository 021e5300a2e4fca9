//! # u-orienteering
//!
//! Team Orienteering Problem (TOP) heuristics: a fleet of cars sharing one
//! time budget leaves a start depot, collects profit at the points it visits
//! and must reach the end depot in time. The solver builds routes greedily
//! from point ratings, splices cheap detours into each fresh leg, and
//! explores a bounded pool of branches spawned at rating ties.
//!
//! ## Modules
//!
//! - [`models`]: domain types (Point, Instance, CarRoute, Solution, problem trait)
//! - [`distance`]: dense distance matrix
//! - [`config`]: rating weights, detour deviation and exploration cap
//! - [`constructive`]: reachability, rating engine and the greedy pass
//! - [`local_search`]: detour splicing on a car's last leg
//! - [`branching`]: LIFO branch exploration and the top-level [`solve`]
//! - [`evaluation`]: from-scratch route verification
//! - [`benchmark`]: Chao benchmark reader
//!
//! ## Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use u_orienteering::benchmark::parse_chao;
//! use u_orienteering::config::GreedyConfig;
//!
//! let instance = parse_chao("n 4\nm 1\ntmax 12\n0 0 0\n3 0 5\n0 3 4\n0 0 0\n")?;
//! let mut rng = StdRng::seed_from_u64(0);
//! let solution = u_orienteering::solve(&instance, &GreedyConfig::default(), &mut rng)
//!     .expect("solvable");
//! assert_eq!(solution.total_profit(), 9.0);
//! # Ok::<(), u_orienteering::InstanceError>(())
//! ```

pub mod benchmark;
pub mod branching;
pub mod config;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod local_search;
pub mod models;

pub use branching::solve;
pub use error::{ConfigError, InstanceError, SolveError};
